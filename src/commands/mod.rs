pub mod apply;
pub mod validate;

use std::path::Path;
use std::process::ExitCode;

use crate::config::{self, ProfileModel};
use crate::error::ProfileError;
use crate::logging::Log;

/// Verdict of a command that ran to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Everything checked out (and was deployed, for `apply`).
    Success,
    /// Validation failed.
    Failure,
}

impl Outcome {
    /// Process exit code for this outcome.
    #[must_use]
    pub const fn exit_code(self) -> ExitCode {
        match self {
            Self::Success => ExitCode::SUCCESS,
            Self::Failure => ExitCode::FAILURE,
        }
    }
}

/// Load the profile at `path`, expanding `~` against `home` or, if `None`,
/// the current user's home directory.
///
/// # Errors
///
/// Returns a [`ProfileError`] if the profile is missing, unreadable,
/// malformed or fails interpolation.
pub fn load_profile(
    path: &Path,
    home: Option<&Path>,
    log: &dyn Log,
) -> Result<ProfileModel, ProfileError> {
    log.debug(&format!("loading profile {}", path.display()));
    let model = match home {
        Some(home) => config::load_with_home(path, home)?,
        None => config::load(path)?,
    };
    log.debug(&format!("base path: {}", model.base_path().display()));
    log.debug(&format!(
        "{} group(s), {} file(s)",
        model.groups().len(),
        model.file_count()
    ));
    Ok(model)
}
