//! Filesystem query abstractions for dependency injection.
//!
//! Provides the [`FileSystemOps`] trait so that profile validation can be
//! unit-tested without touching the real filesystem.  Production code uses
//! [`SystemFileSystemOps`]; tests use `MockFileSystemOps`.

use std::path::Path;

/// Abstraction over the filesystem queries the validator performs.
///
/// The production implementation is [`SystemFileSystemOps`].
pub trait FileSystemOps: Send + Sync + std::fmt::Debug {
    /// Returns `true` if `path` is a directory (following symlinks).
    fn is_dir(&self, path: &Path) -> bool;

    /// Returns `true` if `path` is a regular file (not a directory or broken symlink).
    fn is_file(&self, path: &Path) -> bool;
}

/// Production [`FileSystemOps`] implementation that delegates to [`std::fs`].
#[derive(Debug, Default)]
pub struct SystemFileSystemOps;

impl FileSystemOps for SystemFileSystemOps {
    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }
}

/// Mock [`FileSystemOps`] for unit tests.
///
/// Pre-configure directories and regular files using the builder-style
/// methods, then pass a reference to the code under test.
///
/// # Example
///
/// ```ignore
/// use dotdeploy::operations::MockFileSystemOps;
///
/// let fs = MockFileSystemOps::new()
///     .with_dir("/dots/shell")
///     .with_file("/dots/shell/bashrc");
/// ```
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MockFileSystemOps {
    dirs: std::collections::HashSet<std::path::PathBuf>,
    files: std::collections::HashSet<std::path::PathBuf>,
}

#[cfg(test)]
impl MockFileSystemOps {
    /// Create an empty mock with nothing configured.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `path` as an existing directory.
    #[must_use]
    pub fn with_dir(mut self, path: impl Into<std::path::PathBuf>) -> Self {
        self.dirs.insert(path.into());
        self
    }

    /// Mark `path` as an existing regular file.
    #[must_use]
    pub fn with_file(mut self, path: impl Into<std::path::PathBuf>) -> Self {
        self.files.insert(path.into());
        self
    }
}

#[cfg(test)]
impl FileSystemOps for MockFileSystemOps {
    fn is_dir(&self, path: &Path) -> bool {
        self.dirs.contains(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        self.files.contains(path)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn system_ops_see_real_files() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("f");
        std::fs::write(&file, "x").unwrap();

        let ops = SystemFileSystemOps;
        assert!(ops.is_dir(dir.path()));
        assert!(ops.is_file(&file));
        assert!(!ops.is_file(dir.path()));
        assert!(!ops.is_file(&dir.path().join("missing")));
    }

    #[test]
    fn mock_distinguishes_files_and_dirs() {
        let ops = MockFileSystemOps::new()
            .with_dir("/dots")
            .with_file("/dots/f");
        assert!(ops.is_dir(Path::new("/dots")));
        assert!(!ops.is_file(Path::new("/dots")));
        assert!(ops.is_file(Path::new("/dots/f")));
        assert!(!ops.is_dir(Path::new("/other")));
    }
}
