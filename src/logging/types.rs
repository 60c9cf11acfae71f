//! Core logging types: console verbosity and the [`Log`] trait.

/// How much the console shows.  The log file always receives everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    /// Errors only.
    Quiet,
    /// Informational output and above.
    #[default]
    Normal,
    /// Everything, including debug output.
    Verbose,
}

impl Verbosity {
    /// Resolve the console verbosity from CLI flags.
    ///
    /// Any `-v` wins over `--quiet`.
    ///
    /// # Examples
    ///
    /// ```
    /// use dotdeploy::logging::Verbosity;
    ///
    /// assert_eq!(Verbosity::from_flags(0, true), Verbosity::Quiet);
    /// assert_eq!(Verbosity::from_flags(1, true), Verbosity::Verbose);
    /// assert_eq!(Verbosity::from_flags(0, false), Verbosity::Normal);
    /// ```
    #[must_use]
    pub const fn from_flags(verbose: u8, quiet: bool) -> Self {
        if verbose > 0 {
            Self::Verbose
        } else if quiet {
            Self::Quiet
        } else {
            Self::Normal
        }
    }

    /// Returns `true` for [`Verbosity::Quiet`].
    #[must_use]
    pub const fn is_quiet(self) -> bool {
        matches!(self, Self::Quiet)
    }
}

/// Abstraction over logging backends.
///
/// [`Logger`](super::logger::Logger) emits through `tracing`; tests use an
/// in-memory recorder.  Deployment code logs through this trait without
/// knowing which backend is active.
pub trait Log: Send + Sync {
    /// Log a stage header (major section).
    fn stage(&self, msg: &str);
    /// Log an informational message.
    fn info(&self, msg: &str);
    /// Log a debug message (may be suppressed on console).
    fn debug(&self, msg: &str);
    /// Log a warning message.
    fn warn(&self, msg: &str);
    /// Log an error message.
    fn error(&self, msg: &str);
    /// Log a dry-run action message.
    fn dry_run(&self, msg: &str);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_overrides_quiet() {
        assert_eq!(Verbosity::from_flags(3, true), Verbosity::Verbose);
        assert!(!Verbosity::from_flags(1, true).is_quiet());
        assert!(Verbosity::from_flags(0, true).is_quiet());
    }

    #[test]
    fn verbosity_orders_by_detail() {
        assert!(Verbosity::Quiet < Verbosity::Normal);
        assert!(Verbosity::Normal < Verbosity::Verbose);
        assert_eq!(Verbosity::default(), Verbosity::Normal);
    }
}
