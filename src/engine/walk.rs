use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Totals gathered from one traversal of a directory tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeUsage {
    /// Sum of regular file lengths.
    pub bytes:   u64,
    pub files:   u64,
    pub dirs:    u64,
    /// Entries whose metadata or listing could not be read (counted as 0 bytes).
    pub skipped: u64,
}

/// Depth-first walk with an explicit stack.
///
/// Unreadable entries are skipped, never fatal: the caller gets a best-effort
/// total and `skipped` tells how much was left out. A missing root is an empty
/// tree. With `follow_symlinks`, canonical directory paths are remembered so a
/// link back to an ancestor is walked only once.
pub fn tree_usage(root: &Path, follow_symlinks: bool) -> TreeUsage {
    let mut usage   = TreeUsage::default();
    let mut stack: Vec<PathBuf> = vec![root.to_path_buf()];
    let mut visited: HashSet<PathBuf> = HashSet::new();

    while let Some(dir) = stack.pop() {
        if follow_symlinks {
            match fs::canonicalize(&dir) {
                Ok(canonical) => {
                    if !visited.insert(canonical) { continue; }
                }
                Err(e) => {
                    debug!(path = %dir.display(), error = %e, "cannot canonicalize directory");
                    usage.skipped += 1;
                    continue;
                }
            }
        }

        let entries = match fs::read_dir(&dir) {
            Ok(e) => e,
            Err(e) => {
                // The root itself not existing just means nothing has been eaten yet.
                if dir != root || e.kind() != std::io::ErrorKind::NotFound {
                    debug!(path = %dir.display(), error = %e, "cannot list directory");
                    usage.skipped += 1;
                }
                continue;
            }
        };

        for entry in entries {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    debug!(path = %dir.display(), error = %e, "cannot read directory entry");
                    usage.skipped += 1;
                    continue;
                }
            };
            let path = entry.path();
            let meta = if follow_symlinks { fs::metadata(&path) } else { fs::symlink_metadata(&path) };
            match meta {
                Ok(m) if m.is_dir() => {
                    usage.dirs += 1;
                    stack.push(path);
                }
                Ok(m) if m.is_file() => {
                    usage.files += 1;
                    usage.bytes = usage.bytes.saturating_add(m.len());
                }
                Ok(_) => {}
                Err(e) => {
                    debug!(path = %path.display(), error = %e, "cannot stat entry");
                    usage.skipped += 1;
                }
            }
        }
    }

    usage
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_root_is_empty() {
        let temp = tempfile::tempdir().expect("tempdir");
        let usage = tree_usage(&temp.path().join("nope"), false);
        assert_eq!(usage, TreeUsage::default());
    }

    #[test]
    fn sums_nested_files_and_ignores_directories() {
        let temp = tempfile::tempdir().expect("tempdir");
        let root = temp.path();
        fs::write(root.join("a"), vec![0u8; 30]).expect("write a");
        fs::create_dir_all(root.join("x/y/z")).expect("mkdir");
        fs::write(root.join("x/b"), vec![0u8; 7]).expect("write b");
        fs::write(root.join("x/y/z/c"), vec![0u8; 100]).expect("write c");

        let usage = tree_usage(root, false);
        assert_eq!(usage.bytes, 137);
        assert_eq!(usage.files, 3);
        assert_eq!(usage.dirs, 3);
        assert_eq!(usage.skipped, 0);
    }

    #[cfg(unix)]
    #[test]
    fn symlinks_are_not_followed_by_default() {
        use std::os::unix::fs::symlink;

        let temp   = tempfile::tempdir().expect("tempdir");
        let root   = temp.path().join("root");
        let target = temp.path().join("target");
        fs::create_dir(&root).expect("root");
        fs::create_dir(&target).expect("target");
        fs::write(target.join("big"), vec![0u8; 500]).expect("write");
        symlink(&target, root.join("link")).expect("symlink");

        assert_eq!(tree_usage(&root, false).bytes, 0);
        assert_eq!(tree_usage(&root, true).bytes, 500);
    }

    #[cfg(unix)]
    #[test]
    fn cycle_is_walked_once_when_following_links() {
        use std::os::unix::fs::symlink;

        let temp = tempfile::tempdir().expect("tempdir");
        let root = temp.path().join("root");
        fs::create_dir_all(root.join("sub")).expect("mkdir");
        fs::write(root.join("sub/f"), vec![0u8; 40]).expect("write");
        symlink(&root, root.join("sub/back")).expect("symlink");

        let usage = tree_usage(&root, true);
        assert_eq!(usage.bytes, 40);
    }
}
