use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use crate::logging::Verbosity;

/// Version string: `git describe` output when built from a checkout, else the
/// package version.
pub const VERSION: &str = match option_env!("DOTDEPLOY_VERSION") {
    Some(version) => version,
    None => env!("CARGO_PKG_VERSION"),
};

/// Top-level CLI entry point for the dotfile deployer.
#[derive(Parser, Debug)]
#[command(
    name = "dotdeploy",
    about = "Deploy dotfiles from a declarative INI profile",
    version = VERSION
)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output (overrides --quiet)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Console verbosity implied by the flags.
    #[must_use]
    pub const fn verbosity(&self) -> Verbosity {
        let quiet = matches!(&self.command, Command::Validate(opts) if opts.quiet);
        Verbosity::from_flags(self.verbose, quiet)
    }
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check a profile without touching the filesystem
    Validate(ValidateOpts),
    /// Validate a profile, then deploy its files
    Apply(ApplyOpts),
    /// Print version information
    Version,
}

impl Command {
    /// Subcommand name, also used to name the log file.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Validate(_) => "validate",
            Self::Apply(_) => "apply",
            Self::Version => "version",
        }
    }
}

/// Options for the `validate` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct ValidateOpts {
    /// Profile to validate
    pub profile: PathBuf,

    /// Suppress diagnostics; the exit code carries the verdict
    #[arg(short, long)]
    pub quiet: bool,
}

/// Options for the `apply` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct ApplyOpts {
    /// Profile to deploy
    pub profile: PathBuf,

    /// Preview changes without applying
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Do not print the deployment report
    #[arg(long)]
    pub no_report: bool,
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_validate() {
        let cli = Cli::parse_from(["dotdeploy", "validate", "profile.ini"]);
        assert!(
            matches!(&cli.command, Command::Validate(_)),
            "Expected Validate command"
        );
        if let Command::Validate(opts) = cli.command {
            assert_eq!(opts.profile, PathBuf::from("profile.ini"));
            assert!(!opts.quiet);
        }
    }

    #[test]
    fn parse_validate_quiet() {
        let cli = Cli::parse_from(["dotdeploy", "validate", "-q", "profile.ini"]);
        assert_eq!(cli.verbosity(), Verbosity::Quiet);
    }

    #[test]
    fn verbose_overrides_quiet() {
        let cli = Cli::parse_from(["dotdeploy", "-v", "validate", "--quiet", "profile.ini"]);
        assert_eq!(cli.verbosity(), Verbosity::Verbose);
    }

    #[test]
    fn verbose_is_global() {
        let cli = Cli::parse_from(["dotdeploy", "apply", "profile.ini", "-vv"]);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn parse_apply_flags() {
        let cli = Cli::parse_from(["dotdeploy", "apply", "-n", "--no-report", "p.ini"]);
        assert!(
            matches!(&cli.command, Command::Apply(_)),
            "Expected Apply command"
        );
        if let Command::Apply(opts) = cli.command {
            assert!(opts.dry_run);
            assert!(opts.no_report);
            assert_eq!(opts.profile, PathBuf::from("p.ini"));
        }
    }

    #[test]
    fn parse_apply_long_dry_run() {
        let cli = Cli::parse_from(["dotdeploy", "apply", "--dry-run", "p.ini"]);
        assert!(matches!(cli.command, Command::Apply(ApplyOpts { dry_run: true, .. })));
        assert_eq!(cli.verbosity(), Verbosity::Normal);
    }

    #[test]
    fn profile_is_required() {
        assert!(Cli::try_parse_from(["dotdeploy", "apply"]).is_err());
        assert!(Cli::try_parse_from(["dotdeploy", "validate"]).is_err());
    }

    #[test]
    fn parse_version() {
        let cli = Cli::parse_from(["dotdeploy", "version"]);
        assert_eq!(cli.command.name(), "version");
    }
}
