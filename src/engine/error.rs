use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Filesystem step that was in progress when an engine operation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    CreateDir,
    List,
    Write,
    Remove,
}

impl Operation {
    pub fn label(&self) -> &'static str {
        match self {
            Operation::CreateDir => "create directory",
            Operation::List      => "list",
            Operation::Write     => "write",
            Operation::Remove    => "remove",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// A batch aborted on this entry. Earlier entries of the batch keep their effect.
    #[error("failed to {operation} '{}'{}: {source}", .path.display(), index_suffix(.index))]
    Io {
        operation: Operation,
        path:      PathBuf,
        index:     Option<usize>,
        #[source]
        source:    io::Error,
    },

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl EngineError {
    pub(crate) fn io(operation: Operation, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io { operation, path: path.into(), index: None, source }
    }

    pub(crate) fn write(index: usize, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io { operation: Operation::Write, path: path.into(), index: Some(index), source }
    }

    /// Path of the entry the failure refers to, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Io { path, .. }      => Some(path),
            Self::InvalidRequest(_)    => None,
        }
    }

    pub fn operation(&self) -> Option<Operation> {
        match self {
            Self::Io { operation, .. } => Some(*operation),
            Self::InvalidRequest(_)    => None,
        }
    }

    /// In-batch index of the file being written when generation failed.
    pub fn index(&self) -> Option<usize> {
        match self {
            Self::Io { index, .. }  => *index,
            Self::InvalidRequest(_) => None,
        }
    }
}

fn index_suffix(index: &Option<usize>) -> String {
    match index {
        Some(i) => format!(" (file #{})", i),
        None    => String::new(),
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_error_names_index_and_path() {
        let err = EngineError::write(3, "/tmp/x/File_1_3", io::Error::from(io::ErrorKind::PermissionDenied));
        let msg = err.to_string();
        assert!(msg.starts_with("failed to write '/tmp/x/File_1_3' (file #3)"), "{msg}");
        assert_eq!(err.index(), Some(3));
        assert_eq!(err.operation(), Some(Operation::Write));
    }

    #[test]
    fn remove_error_has_no_index() {
        let err = EngineError::io(Operation::Remove, "/tmp/x/a", io::Error::from(io::ErrorKind::NotFound));
        assert_eq!(err.index(), None);
        assert_eq!(err.path(), Some(Path::new("/tmp/x/a")));
        assert!(err.to_string().starts_with("failed to remove '/tmp/x/a': "));
    }
}
