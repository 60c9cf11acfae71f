//! Deployment planning and execution.
//!
//! [`plan`] inspects every target and classifies what it needs; an
//! [`Executor`] then backs up and applies the changes (or only reports them
//! in a dry run).
pub mod executor;
pub mod planner;
pub mod report;

pub use executor::Executor;
pub use planner::{Action, DeploymentPlan, PlannedEntry, ResolvedFileEntry, plan, resolve};
pub use report::DeploymentReport;

use crate::config::ProfileModel;
use crate::logging::Log;
use crate::resources::backup::backup_dir;
use crate::resources::error::ResourceError;

/// Plan and execute a deployment of `model` in one pass.
///
/// Backups go to `backup` under the model's base path.
///
/// # Errors
///
/// Returns the first [`ResourceError`] raised while inspecting, backing up
/// or applying a target.
pub fn deploy(
    model: &ProfileModel,
    log: &dyn Log,
    dry_run: bool,
) -> Result<DeploymentReport, ResourceError> {
    let plan = plan(model)?;
    log.debug(&format!(
        "{} of {} file(s) need a change",
        plan.change_count(),
        plan.entries.len()
    ));
    Executor::new(log, &backup_dir(model.base_path()), dry_run).execute(&plan)
}
