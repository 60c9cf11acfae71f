//! Copy resource.
use std::path::PathBuf;

use super::error::ResourceError;
use super::helpers::fs::{ensure_parent_dir, files_identical, remove_existing};
use super::{Resource, ResourceChange, ResourceState};

/// A deployed file materialized as a full copy of its source.
#[derive(Debug, Clone)]
pub struct CopyResource {
    /// The source file.
    pub source: PathBuf,
    /// The target path (where the copy is written).
    pub target: PathBuf,
}

impl CopyResource {
    /// Create a new copy resource.
    #[must_use]
    pub const fn new(source: PathBuf, target: PathBuf) -> Self {
        Self { source, target }
    }
}

impl Resource for CopyResource {
    fn description(&self) -> String {
        format!("{} <= {}", self.target.display(), self.source.display())
    }

    fn current_state(&self) -> Result<ResourceState, ResourceError> {
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

        if meta.is_symlink() {
            return Ok(ResourceState::Incorrect {
                current: "target is a symbolic link".to_string(),
            });
        }
        if meta.is_dir() {
            return Ok(ResourceState::Incorrect {
                current: "target is a real directory".to_string(),
            });
        }

        let identical =
            files_identical(&self.source, &self.target).map_err(|source| ResourceError::Inspect {
                path: self.target.clone(),
                source,
            })?;
        if identical {
            Ok(ResourceState::Correct)
        } else {
            Ok(ResourceState::Incorrect {
                current: "content differs".to_string(),
            })
        }
    }

    fn apply(&self) -> Result<ResourceChange, ResourceError> {
        if self.current_state()? == ResourceState::Correct {
            return Ok(ResourceChange::AlreadyCorrect);
        }
        ensure_parent_dir(&self.target)?;
        remove_existing(&self.target)?;
        std::fs::copy(&self.source, &self.target).map_err(|source| ResourceError::Copy {
            from: self.source.clone(),
            to: self.target.clone(),
            source,
        })?;
        Ok(ResourceChange::Applied)
    }
}
