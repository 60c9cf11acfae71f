//! Per-run deployment counters and their textual rendering.
use std::fmt;

/// Summary of one deployment pass.
///
/// # Examples
///
/// ```
/// use dotdeploy::deploy::DeploymentReport;
///
/// let report = DeploymentReport { total: 1, changed: 1, backed_up: 0, dry_run: false };
/// assert_eq!(report.to_string(), "1 / 1 files(s) changed, 0 file(s) backed up");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeploymentReport {
    /// File entries considered.
    pub total: usize,
    /// Entries created or replaced (or that would be, in a dry run).
    pub changed: usize,
    /// Backup copies written (or that would be, in a dry run).
    pub backed_up: usize,
    /// Whether the pass ran without mutating the filesystem.
    pub dry_run: bool,
}

impl DeploymentReport {
    /// Empty report for a real or dry run.
    #[must_use]
    pub const fn new(dry_run: bool) -> Self {
        Self {
            total: 0,
            changed: 0,
            backed_up: 0,
            dry_run,
        }
    }

    /// Returns `true` if every counter matches `other`, ignoring the dry-run
    /// flag.
    #[must_use]
    pub const fn same_counts(&self, other: &Self) -> bool {
        self.total == other.total
            && self.changed == other.changed
            && self.backed_up == other.backed_up
    }
}

impl fmt::Display for DeploymentReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            total,
            changed,
            backed_up,
            dry_run,
        } = self;
        if *dry_run {
            write!(
                f,
                "{changed} / {total} files(s) would change, {backed_up} file(s) would be backed up"
            )
        } else {
            write!(
                f,
                "{changed} / {total} files(s) changed, {backed_up} file(s) backed up"
            )
        }
    }
}
