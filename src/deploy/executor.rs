//! Apply a deployment plan: back up, then create or replace each target.
use std::path::{Path, PathBuf};

use super::planner::{Action, DeploymentPlan, PlannedEntry};
use super::report::DeploymentReport;
use crate::config::Mode;
use crate::logging::Log;
use crate::resources::backup::{backup_file, backup_name, would_back_up};
use crate::resources::error::ResourceError;
use crate::resources::ResourceChange;

/// Runs a [`DeploymentPlan`] against the filesystem (or pretends to).
pub struct Executor<'a> {
    log: &'a dyn Log,
    backup_dir: PathBuf,
    dry_run: bool,
}

impl std::fmt::Debug for Executor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Executor")
            .field("log", &"<dyn Log>")
            .field("backup_dir", &self.backup_dir)
            .field("dry_run", &self.dry_run)
            .finish()
    }
}

impl<'a> Executor<'a> {
    /// Executor writing backups to `backup_dir`.
    #[must_use]
    pub fn new(log: &'a dyn Log, backup_dir: &Path, dry_run: bool) -> Self {
        Self {
            log,
            backup_dir: backup_dir.to_path_buf(),
            dry_run,
        }
    }

    /// Process every entry in plan order.
    ///
    /// A dry run performs no mutation but counts exactly what a real run
    /// would.
    ///
    /// # Errors
    ///
    /// Stops at the first backup or apply failure.  Entries already applied
    /// stay applied.
    pub fn execute(&self, plan: &DeploymentPlan) -> Result<DeploymentReport, ResourceError> {
        let mut report = DeploymentReport::new(self.dry_run);
        for planned in &plan.entries {
            report.total += 1;
            let (changed, backed_up) = self.process(planned)?;
            report.changed += usize::from(changed);
            report.backed_up += usize::from(backed_up);
        }
        Ok(report)
    }

    /// Returns `(changed, backed_up)` for one entry.
    fn process(&self, planned: &PlannedEntry) -> Result<(bool, bool), ResourceError> {
        let entry = &planned.entry;
        let resource = entry.resource();
        let desc = resource.description();
        let verb = match entry.effective_mode {
            Mode::Link => "link",
            Mode::Copy => "copy",
        };

        if !planned.action.is_change() {
            self.log.debug(&format!("ok: {desc}"));
            return Ok((false, false));
        }

        let backed_up = if entry.effective_backup_flag {
            self.back_up(&entry.abs_target_path)?
        } else {
            false
        };

        if self.dry_run {
            let msg = if let Action::Replace { current } = &planned.action {
                format!("would {verb} {desc} (currently {current})")
            } else {
                format!("would {verb}: {desc}")
            };
            self.log.dry_run(&msg);
            return Ok((true, backed_up));
        }

        match resource.apply()? {
            ResourceChange::Applied => {
                self.log.debug(&format!("{verb}: {desc}"));
                Ok((true, backed_up))
            }
            ResourceChange::AlreadyCorrect => Ok((false, backed_up)),
        }
    }

    fn back_up(&self, target: &Path) -> Result<bool, ResourceError> {
        if self.dry_run {
            if !would_back_up(target) {
                return Ok(false);
            }
            let dest = self.backup_dir.join(backup_name(target));
            self.log.dry_run(&format!(
                "would back up {} to {}",
                target.display(),
                dest.display()
            ));
            return Ok(true);
        }
        Ok(match backup_file(target, &self.backup_dir)? {
            Some(dest) => {
                self.log.debug(&format!(
                    "backed up {} to {}",
                    target.display(),
                    dest.display()
                ));
                true
            }
            None => false,
        })
    }
}
