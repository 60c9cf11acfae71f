use std::path::Path;

use anyhow::Result;

use super::{Outcome, load_profile, validate};
use crate::cli::ApplyOpts;
use crate::config::ProfileModel;
use crate::deploy::{self, DeploymentReport};
use crate::logging::Log;

/// Run the `apply` command.
///
/// # Errors
///
/// Returns an error if the profile cannot be loaded or a target cannot be
/// inspected, backed up or written.
pub fn run(opts: &ApplyOpts, log: &dyn Log) -> Result<Outcome> {
    run_with_home(opts, None, log)
}

/// Run the `apply` command with `~` expanding to `home`.
///
/// # Errors
///
/// Returns an error if the profile cannot be loaded or a target cannot be
/// inspected, backed up or written.
pub fn run_with_home(opts: &ApplyOpts, home: Option<&Path>, log: &dyn Log) -> Result<Outcome> {
    let model = load_profile(&opts.profile, home, log)?;
    if apply_model(&model, opts, log)?.is_some() {
        Ok(Outcome::Success)
    } else {
        Ok(Outcome::Failure)
    }
}

/// Validate `model` and, if it is valid, deploy it.
///
/// Diagnostics are always shown.  Returns `None` without touching the
/// filesystem when validation fails, otherwise the deployment report.
///
/// # Errors
///
/// Returns an error if a target cannot be inspected, backed up or written.
pub fn apply_model(
    model: &ProfileModel,
    opts: &ApplyOpts,
    log: &dyn Log,
) -> Result<Option<DeploymentReport>> {
    if validate::check(model, false, log) == Outcome::Failure {
        return Ok(None);
    }

    if opts.dry_run {
        log.stage("Deploying files (dry run)");
    } else {
        log.stage("Deploying files");
    }
    let report = deploy::deploy(model, log, opts.dry_run)?;

    if opts.no_report {
        log.debug(&report.to_string());
    } else {
        log.info(&report.to_string());
    }
    Ok(Some(report))
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::logging::MemoryLog;
    use std::path::PathBuf;

    struct Fixture {
        _dir: tempfile::TempDir,
        home: PathBuf,
        profile: PathBuf,
    }

    fn fixture(profile: &str) -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let home = dir.path().join("home");
        let dots = dir.path().join("dots");
        std::fs::create_dir_all(&home).unwrap();
        std::fs::create_dir_all(dots.join("shell")).unwrap();
        std::fs::write(dots.join("shell/bashrc"), "rc").unwrap();
        let path = dots.join("profile.ini");
        std::fs::write(&path, profile).unwrap();
        Fixture {
            _dir: dir,
            home,
            profile: path,
        }
    }

    fn opts(fx: &Fixture, dry_run: bool, no_report: bool) -> ApplyOpts {
        ApplyOpts {
            profile: fx.profile.clone(),
            dry_run,
            no_report,
        }
    }

    #[test]
    fn report_is_logged_as_info() {
        let fx = fixture("[shell]\nbashrc = ~/.bashrc\n");
        let log = MemoryLog::default();
        let outcome = run_with_home(&opts(&fx, false, false), Some(&fx.home), &log).unwrap();
        assert_eq!(outcome, Outcome::Success);
        let info = log.messages("info");
        assert_eq!(
            info.last().map(String::as_str),
            Some("1 / 1 files(s) changed, 0 file(s) backed up")
        );
        assert_eq!(log.messages("stage"), vec!["Deploying files".to_string()]);
    }

    #[test]
    fn no_report_keeps_report_off_info() {
        let fx = fixture("[shell]\nbashrc = ~/.bashrc\n");
        let log = MemoryLog::default();
        run_with_home(&opts(&fx, false, true), Some(&fx.home), &log).unwrap();
        assert!(
            !log.messages("info")
                .iter()
                .any(|m| m.contains("files(s) changed"))
        );
        assert!(fx.home.join(".bashrc").symlink_metadata().is_ok());
    }

    #[test]
    fn invalid_profile_does_not_deploy() {
        let fx = fixture("[shell]\nbashrc = ~/.bashrc\nmissing = ~/.missing\n");
        let log = MemoryLog::default();
        let outcome = run_with_home(&opts(&fx, false, false), Some(&fx.home), &log).unwrap();
        assert_eq!(outcome, Outcome::Failure);
        assert!(fx.home.join(".bashrc").symlink_metadata().is_err());
        assert!(log.messages("stage").is_empty());
        assert_eq!(
            log.messages("error").last().map(String::as_str),
            Some(validate::FAILURE_MESSAGE)
        );
    }

    #[test]
    fn dry_run_reports_would_change() {
        let fx = fixture("[shell]\nbashrc = ~/.bashrc\n");
        let log = MemoryLog::default();
        let model = load_profile(&fx.profile, Some(&fx.home), &log).unwrap();
        let report = apply_model(&model, &opts(&fx, true, false), &log)
            .unwrap()
            .unwrap();
        insta::assert_snapshot!(
            report.to_string(),
            @"1 / 1 files(s) would change, 0 file(s) would be backed up"
        );
        assert!(fx.home.join(".bashrc").symlink_metadata().is_err());
    }
}
