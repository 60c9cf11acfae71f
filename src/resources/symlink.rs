//! Symlink resource.
use std::path::{Path, PathBuf};

use super::error::ResourceError;
use super::helpers::fs::{ensure_parent_dir, remove_existing};
use super::{Resource, ResourceChange, ResourceState};

/// A deployed file materialized as a symbolic link to its source.
#[derive(Debug, Clone)]
pub struct SymlinkResource {
    /// The source file (what the symlink points to).
    pub source: PathBuf,
    /// The target path (where the symlink will be created).
    pub target: PathBuf,
}

impl SymlinkResource {
    /// Create a new symlink resource.
    #[must_use]
    pub const fn new(source: PathBuf, target: PathBuf) -> Self {
        Self { source, target }
    }
}

impl Resource for SymlinkResource {
    fn description(&self) -> String {
        format!("{} -> {}", self.target.display(), self.source.display())
    }

    fn current_state(&self) -> Result<ResourceState, ResourceError> {
        // `exists` follows links, so a dangling link reads as missing.
        if !self.target.exists() {
            return Ok(ResourceState::Missing);
        }

        let meta = self
            .target
            .symlink_metadata()
            .map_err(|source| ResourceError::Inspect {
                path: self.target.clone(),
                source,
            })?;

        if !meta.is_symlink() {
            let current = if meta.is_dir() {
                "target is a real directory"
            } else {
                "target is a regular file"
            };
            return Ok(ResourceState::Incorrect {
                current: current.to_string(),
            });
        }

        if same_file(&self.target, &self.source) {
            Ok(ResourceState::Correct)
        } else {
            let points_to = std::fs::read_link(&self.target).unwrap_or_default();
            Ok(ResourceState::Incorrect {
                current: format!("points to {}", points_to.display()),
            })
        }
    }

    fn apply(&self) -> Result<ResourceChange, ResourceError> {
        if self.current_state()? == ResourceState::Correct {
            return Ok(ResourceChange::AlreadyCorrect);
        }
        ensure_parent_dir(&self.target)?;
        remove_existing(&self.target)?;
        create_symlink(&self.source, &self.target).map_err(|source| ResourceError::Link {
            link: self.target.clone(),
            points_to: self.source.clone(),
            source,
        })?;
        Ok(ResourceChange::Applied)
    }
}

/// Returns `true` if both paths resolve to the same underlying file.
fn same_file(a: &Path, b: &Path) -> bool {
    match (dunce::canonicalize(a), dunce::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Create a symlink at `link` pointing to `target`.
#[cfg(unix)]
fn create_symlink(target: &Path, link: &Path) -> std::io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

/// Create a symlink at `link` pointing to `target`.
#[cfg(windows)]
fn create_symlink(target: &Path, link: &Path) -> std::io::Result<()> {
    std::os::windows::fs::symlink_file(target, link)
}
