//! Filler file engine: writes, removes and measures the files that eat space.
//!
//! The engine keeps no registry of what it wrote. Every call lists the
//! working directory again, so files added or removed behind its back are
//! simply picked up on the next call.
//!
//! Batch operations stop at the first failing entry and report it. Whatever
//! already landed on disk stays there: there is no rollback and no retry.

pub mod error;
pub mod job;
pub mod naming;
pub mod payload;
pub mod walk;

pub use error::{EngineError, Operation, Result};

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use walk::TreeUsage;

/// What to generate: `file_count` files of roughly `bytes_per_file` bytes each.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationRequest {
    file_count:     usize,
    bytes_per_file: f64,
}

impl GenerationRequest {
    pub fn new(file_count: usize, bytes_per_file: f64) -> Result<Self> {
        if file_count == 0 {
            return Err(EngineError::InvalidRequest("file count must be at least 1".into()));
        }
        if !bytes_per_file.is_finite() || bytes_per_file < 0.0 {
            return Err(EngineError::InvalidRequest(format!(
                "file size must be a non-negative number of bytes, got {}", bytes_per_file
            )));
        }
        if bytes_per_file >= u64::MAX as f64 {
            return Err(EngineError::InvalidRequest(format!(
                "file size {} does not fit in 64 bits", bytes_per_file
            )));
        }
        Ok(Self { file_count, bytes_per_file })
    }

    pub fn file_count(&self) -> usize { self.file_count }
    pub fn bytes_per_file(&self) -> f64 { self.bytes_per_file }

    /// Size every generated file will actually have.
    pub fn payload_len(&self) -> u64 {
        payload::payload_len(self.bytes_per_file)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenerateReport {
    pub files:          Vec<PathBuf>,
    pub bytes_per_file: u64,
}

impl GenerateReport {
    pub fn total_bytes(&self) -> u64 {
        self.bytes_per_file.saturating_mul(self.files.len() as u64)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RemoveReport {
    pub removed: Vec<PathBuf>,
}

impl RemoveReport {
    pub fn count(&self) -> usize { self.removed.len() }
}

#[derive(Debug, Clone)]
pub struct FillerEngine {
    dir:             PathBuf,
    follow_symlinks: bool,
}

impl FillerEngine {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into(), follow_symlinks: false }
    }

    /// Whether `used_disk` descends through symlinked directories.
    pub fn follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    pub fn dir(&self) -> &Path { &self.dir }

    // ── Generation ────────────────────────────────────────────────────

    pub fn generate(&self, req: &GenerationRequest) -> Result<GenerateReport> {
        fs::create_dir_all(&self.dir)
            .map_err(|e| EngineError::io(Operation::CreateDir, &self.dir, e))?;

        let len   = req.payload_len();
        let stamp = naming::next_batch_stamp();
        let mut files = Vec::with_capacity(req.file_count());

        info!(count = req.file_count(), bytes = len, dir = %self.dir.display(), "generating filler files");

        for index in 0..req.file_count() {
            let path = self.dir.join(naming::file_name(stamp, index));
            self.write_one(&path, len).map_err(|e| EngineError::write(index, &path, e))?;
            debug!(path = %path.display(), "wrote filler file");
            files.push(path);
        }

        Ok(GenerateReport { files, bytes_per_file: len })
    }

    /// Write to a temp file beside the target, then move it into place.
    /// The final name never exists with partial content.
    fn write_one(&self, path: &Path, len: u64) -> io::Result<()> {
        let tmp = tempfile::Builder::new()
            .prefix(".filling-")
            .tempfile_in(&self.dir)?;
        {
            let mut out = BufWriter::new(tmp.as_file());
            payload::write_pattern(&mut out, len)?;
            out.flush()?;
        }
        tmp.as_file().sync_all()?;
        tmp.persist_noclobber(path).map_err(|e| e.error)?;
        Ok(())
    }

    // ── Removal ───────────────────────────────────────────────────────

    /// Delete every entry in the working directory.
    pub fn remove_all(&self) -> Result<RemoveReport> {
        self.remove_up_to(None)
    }

    /// Delete at most `n` entries.
    pub fn remove_count(&self, n: usize) -> Result<RemoveReport> {
        self.remove_up_to(Some(n))
    }

    fn remove_up_to(&self, limit: Option<usize>) -> Result<RemoveReport> {
        let mut report = RemoveReport::default();
        if limit == Some(0) {
            return Ok(report);
        }

        for path in self.entries()? {
            if limit.is_some_and(|n| report.count() >= n) { break; }
            remove_entry(&path).map_err(|e| EngineError::io(Operation::Remove, &path, e))?;
            debug!(path = %path.display(), "removed");
            report.removed.push(path);
        }

        info!(removed = report.count(), dir = %self.dir.display(), "removed filler entries");
        Ok(report)
    }

    /// Entries directly under the working directory, sorted by name.
    /// A missing directory has no entries.
    pub fn entries(&self) -> Result<Vec<PathBuf>> {
        let read = match fs::read_dir(&self.dir) {
            Ok(r) => r,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(EngineError::io(Operation::List, &self.dir, e)),
        };
        let mut out = Vec::new();
        for entry in read {
            let entry = entry.map_err(|e| EngineError::io(Operation::List, &self.dir, e))?;
            out.push(entry.path());
        }
        out.sort();
        Ok(out)
    }

    // ── Accounting ────────────────────────────────────────────────────

    /// Bytes occupied by regular files anywhere under the working directory.
    pub fn used_disk(&self) -> u64 {
        self.usage().bytes
    }

    pub fn usage(&self) -> TreeUsage {
        walk::tree_usage(&self.dir, self.follow_symlinks)
    }
}

fn remove_entry(path: &Path) -> io::Result<()> {
    let meta = fs::symlink_metadata(path)?;
    if meta.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    }
}
