//! Resolve every declared file and classify the action it needs.
//!
//! Classification only reads the filesystem and is recomputed on every call.
use std::path::PathBuf;

use crate::config::{Mode, ProfileModel};
use crate::resources::copy::CopyResource;
use crate::resources::error::ResourceError;
use crate::resources::symlink::SymlinkResource;
use crate::resources::{Resource, ResourceState};

/// A file entry with absolute paths and its group's effective settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFileEntry {
    /// Owning group.
    pub group: String,
    /// File name as declared.
    pub file_name: String,
    /// Deploy path as declared (already interpolated).
    pub deploy_path: String,
    /// Absolute source path under the group directory.
    pub abs_source_path: PathBuf,
    /// Absolute target path.
    pub abs_target_path: PathBuf,
    /// Effective deployment mode.
    pub effective_mode: Mode,
    /// Effective backup flag.
    pub effective_backup_flag: bool,
}

impl ResolvedFileEntry {
    /// The resource that materializes this entry in its effective mode.
    #[must_use]
    pub fn resource(&self) -> Box<dyn Resource> {
        let source = self.abs_source_path.clone();
        let target = self.abs_target_path.clone();
        match self.effective_mode {
            Mode::Link => Box::new(SymlinkResource::new(source, target)),
            Mode::Copy => Box::new(CopyResource::new(source, target)),
        }
    }

    /// Classify the action this entry needs right now.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Inspect`] if the target's state cannot be
    /// read.
    pub fn classify(&self) -> Result<Action, ResourceError> {
        Ok(match self.resource().current_state()? {
            ResourceState::Missing => Action::Create,
            ResourceState::Correct => Action::Unchanged,
            ResourceState::Incorrect { current } => Action::Replace { current },
        })
    }
}

/// What a deployment pass has to do for one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Target already matches; nothing to do.
    Unchanged,
    /// Target does not exist (or is a dangling link).
    Create,
    /// Target exists but differs.
    Replace {
        /// What currently occupies the target.
        current: String,
    },
}

impl Action {
    /// Returns `true` for [`Action::Create`] and [`Action::Replace`].
    #[must_use]
    pub const fn is_change(&self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

/// A resolved entry paired with its classified action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedEntry {
    /// The resolved file entry.
    pub entry: ResolvedFileEntry,
    /// The action it needs.
    pub action: Action,
}

/// Every entry of a profile, in group then file declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeploymentPlan {
    /// Planned entries.
    pub entries: Vec<PlannedEntry>,
}

impl DeploymentPlan {
    /// Number of entries that need a change.
    #[must_use]
    pub fn change_count(&self) -> usize {
        self.entries.iter().filter(|p| p.action.is_change()).count()
    }
}

/// Resolve every file entry of `model`.
///
/// Sources resolve against `base_path/group`; targets resolve against the
/// source's directory.  Effective settings are merged per group.
#[must_use]
pub fn resolve(model: &ProfileModel) -> Vec<ResolvedFileEntry> {
    let mut entries = Vec::with_capacity(model.file_count());
    for group in model.groups() {
        let settings = model.effective_settings(&group.name);
        for file in &group.files {
            let abs_source_path = model.source_path(&group.name, &file.file_name);
            let abs_target_path = model.target_path(&abs_source_path, &file.deploy_path);
            entries.push(ResolvedFileEntry {
                group: group.name.clone(),
                file_name: file.file_name.clone(),
                deploy_path: file.deploy_path.clone(),
                abs_source_path,
                abs_target_path,
                effective_mode: settings.mode,
                effective_backup_flag: settings.backup,
            });
        }
    }
    entries
}

/// Resolve and classify every file entry of `model`.
///
/// # Errors
///
/// Returns the first [`ResourceError`] raised while inspecting a target.
pub fn plan(model: &ProfileModel) -> Result<DeploymentPlan, ResourceError> {
    let entries = resolve(model)
        .into_iter()
        .map(|entry| {
            let action = entry.classify()?;
            Ok(PlannedEntry { entry, action })
        })
        .collect::<Result<Vec<_>, ResourceError>>()?;
    Ok(DeploymentPlan { entries })
}
