use std::path::Path;

use anyhow::Result;

use super::{Outcome, load_profile};
use crate::config::ProfileModel;
use crate::config::validation;
use crate::logging::Log;

/// Summary line logged when any diagnostic was raised.
pub const FAILURE_MESSAGE: &str = "validation failed: one or more errors occurred";

/// Summary line logged when the profile is valid.
pub const SUCCESS_MESSAGE: &str = "validation succeeded";

/// Run the `validate` command.
///
/// # Errors
///
/// Returns an error if the profile cannot be loaded.
pub fn run(profile: &Path, quiet: bool, log: &dyn Log) -> Result<Outcome> {
    run_with_home(profile, None, quiet, log)
}

/// Run the `validate` command with `~` expanding to `home`.
///
/// # Errors
///
/// Returns an error if the profile cannot be loaded.
pub fn run_with_home(
    profile: &Path,
    home: Option<&Path>,
    quiet: bool,
    log: &dyn Log,
) -> Result<Outcome> {
    let model = load_profile(profile, home, log)?;
    Ok(check(&model, quiet, log))
}

/// Validate a loaded profile and log the verdict.
///
/// Quiet mode keeps diagnostics off the console (they still reach the log
/// file at debug level) and logs no summary.
pub fn check(model: &ProfileModel, quiet: bool, log: &dyn Log) -> Outcome {
    let mut diagnostics = Vec::new();
    let valid = validation::validate(model, &mut diagnostics);

    for diagnostic in &diagnostics {
        if quiet {
            log.debug(&diagnostic.to_string());
        } else {
            log.error(&diagnostic.to_string());
        }
    }

    if valid {
        if !quiet {
            log.info(SUCCESS_MESSAGE);
        }
        Outcome::Success
    } else {
        if !quiet {
            log.error(FAILURE_MESSAGE);
        }
        Outcome::Failure
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::logging::MemoryLog;
    use std::path::PathBuf;

    fn fixture(profile: &str) -> (tempfile::TempDir, PathBuf, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let home = dir.path().join("home");
        let dots = dir.path().join("dots");
        std::fs::create_dir_all(&home).unwrap();
        std::fs::create_dir_all(dots.join("shell")).unwrap();
        std::fs::write(dots.join("shell/bashrc"), "rc").unwrap();
        let path = dots.join("profile.ini");
        std::fs::write(&path, profile).unwrap();
        (dir, path, home)
    }

    #[test]
    fn valid_profile_logs_success() {
        let (_dir, path, home) = fixture("[shell]\nbashrc = ~/.bashrc\n");
        let log = MemoryLog::default();
        let outcome = run_with_home(&path, Some(&home), false, &log).unwrap();
        assert_eq!(outcome, Outcome::Success);
        assert_eq!(log.messages("info"), vec![SUCCESS_MESSAGE.to_string()]);
        assert!(log.messages("error").is_empty());
    }

    #[test]
    fn invalid_profile_logs_each_diagnostic() {
        let (_dir, path, home) =
            fixture("[shell]\nbashrc = ~/.bashrc\nmissing = ~/.missing\n/etc/passwd = ~/.pw\n");
        let log = MemoryLog::default();
        let outcome = run_with_home(&path, Some(&home), false, &log).unwrap();
        assert_eq!(outcome, Outcome::Failure);
        let errors = log.messages("error");
        assert_eq!(errors.len(), 3);
        assert!(errors[0].starts_with("no such file: missing"));
        assert!(errors[1].starts_with("file name cannot be an absolute path"));
        assert_eq!(errors[2], FAILURE_MESSAGE);
    }

    #[test]
    fn quiet_mode_keeps_verdict_but_logs_nothing_visible() {
        let (_dir, path, home) = fixture("[shell]\nmissing = ~/.missing\n");
        let log = MemoryLog::default();
        let outcome = run_with_home(&path, Some(&home), true, &log).unwrap();
        assert_eq!(outcome, Outcome::Failure);
        assert!(log.messages("error").is_empty());
        assert!(log.messages("info").is_empty());
        assert!(
            log.messages("debug")
                .iter()
                .any(|m| m.starts_with("no such file: missing"))
        );
    }

    #[test]
    fn missing_profile_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let log = MemoryLog::default();
        let err = run_with_home(
            &dir.path().join("nope.ini"),
            Some(dir.path()),
            false,
            &log,
        )
        .unwrap_err();
        assert!(err.to_string().starts_with("no such file"));
    }
}
