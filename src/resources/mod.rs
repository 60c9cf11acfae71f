//! Idempotent resource primitives (check + apply pattern).
pub mod backup;
pub mod copy;
pub mod error;
pub mod symlink;

/// Shared filesystem helpers for resource implementations.
pub mod helpers {
    pub mod fs;
}

use error::ResourceError;

/// State of a deployed file relative to its desired state.
///
/// # Examples
///
/// ```
/// use dotdeploy::resources::ResourceState;
///
/// let missing = ResourceState::Missing;
/// let correct = ResourceState::Correct;
/// let wrong = ResourceState::Incorrect { current: "points to /other/path".into() };
///
/// assert_ne!(missing, correct);
/// assert_ne!(wrong, correct);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceState {
    /// Target does not exist (a dangling symlink counts as missing).
    Missing,
    /// Target exists and matches the desired state.
    Correct,
    /// Target exists but does not match the desired state.
    Incorrect {
        /// What is currently at the target.
        current: String,
    },
}

/// Result of applying a resource change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceChange {
    /// Target was created or replaced.
    Applied,
    /// Target was already correct (no change needed).
    AlreadyCorrect,
}

/// Unified interface for deployable files that can be checked and applied.
///
/// # Examples
///
/// ```ignore
/// // All resources follow the same check-then-apply pattern:
/// if resource.needs_change()? {
///     resource.apply()?;
/// }
/// ```
pub trait Resource: std::fmt::Debug {
    /// Human-readable description of this resource.
    fn description(&self) -> String;

    /// Check the current state of the resource.
    ///
    /// Never mutates the filesystem.
    ///
    /// # Errors
    ///
    /// Returns an error if the state cannot be determined.
    fn current_state(&self) -> Result<ResourceState, ResourceError>;

    /// Determine if the resource needs to be changed.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`Resource::current_state`].
    fn needs_change(&self) -> Result<bool, ResourceError> {
        Ok(self.current_state()? != ResourceState::Correct)
    }

    /// Create or replace the target.
    ///
    /// Creates the target's parent directory if needed and removes whatever
    /// file or link currently occupies the target first.  A target that is
    /// already correct is left alone.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent cannot be created, the existing target
    /// cannot be removed, or the replacement cannot be created.
    fn apply(&self) -> Result<ResourceChange, ResourceError>;
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct TestResource {
        state: ResourceState,
    }

    impl Resource for TestResource {
        fn description(&self) -> String {
            "test resource".to_string()
        }

        fn current_state(&self) -> Result<ResourceState, ResourceError> {
            Ok(self.state.clone())
        }

        fn apply(&self) -> Result<ResourceChange, ResourceError> {
            Ok(ResourceChange::Applied)
        }
    }

    #[test]
    fn needs_change_for_missing_resource() {
        let resource = TestResource {
            state: ResourceState::Missing,
        };
        assert!(resource.needs_change().unwrap());
    }

    #[test]
    fn needs_change_for_incorrect_resource() {
        let resource = TestResource {
            state: ResourceState::Incorrect {
                current: "wrong".to_string(),
            },
        };
        assert!(resource.needs_change().unwrap());
    }

    #[test]
    fn no_change_for_correct_resource() {
        let resource = TestResource {
            state: ResourceState::Correct,
        };
        assert!(!resource.needs_change().unwrap());
    }
}
