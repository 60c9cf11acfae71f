//! Structural and filesystem checks on a loaded profile.
use std::path::Path;

use super::profile::{Group, ProfileModel};
use crate::error::Diagnostic;
use crate::operations::{FileSystemOps, SystemFileSystemOps};
use crate::paths::is_prefixed_by;

/// Validate `model` against the real filesystem.
///
/// Every finding is appended to `sink`.  Returns `true` only if nothing was
/// appended.
pub fn validate(model: &ProfileModel, sink: &mut Vec<Diagnostic>) -> bool {
    ProfileValidator::new(model, &SystemFileSystemOps).validate(sink)
}

/// Validator for a [`ProfileModel`] over an injectable filesystem.
///
/// Checks, in order:
/// - the base path is a directory (otherwise stop)
/// - at least one group is declared (otherwise stop)
/// - each group directory exists (otherwise skip that group's files)
/// - each file name is relative, stays inside its group directory, differs
///   from its target and names an existing regular file
///
/// All findings are collected; the pass never stops at the first bad entry.
#[derive(Debug)]
pub struct ProfileValidator<'a> {
    model: &'a ProfileModel,
    fs: &'a dyn FileSystemOps,
}

impl<'a> ProfileValidator<'a> {
    /// Create a validator for `model` that queries `fs` for existence checks.
    #[must_use]
    pub const fn new(model: &'a ProfileModel, fs: &'a dyn FileSystemOps) -> Self {
        Self { model, fs }
    }

    /// Run every check, appending findings to `sink`.
    ///
    /// Returns `true` only if no diagnostic was emitted.
    pub fn validate(&self, sink: &mut Vec<Diagnostic>) -> bool {
        let before = sink.len();

        let base_path = self.model.base_path();
        if !self.fs.is_dir(base_path) {
            sink.push(Diagnostic::BasePathMissing {
                path: base_path.to_path_buf(),
            });
            return false;
        }

        if self.model.groups().is_empty() {
            sink.push(Diagnostic::NoGroupsFound);
            return false;
        }

        for group in self.model.groups() {
            self.validate_group(group, sink);
        }

        sink.len() == before
    }

    fn validate_group(&self, group: &Group, sink: &mut Vec<Diagnostic>) {
        let group_dir = self.model.group_dir(&group.name);
        if !self.fs.is_dir(&group_dir) {
            sink.push(Diagnostic::GroupDirMissing {
                group: group.name.clone(),
                path: group_dir,
            });
            return;
        }

        for file in &group.files {
            if Path::new(&file.file_name).is_absolute() {
                sink.push(Diagnostic::AbsoluteFileName {
                    group: group.name.clone(),
                    file_name: file.file_name.clone(),
                });
                continue;
            }

            let source = self.model.source_path(&group.name, &file.file_name);
            if !is_prefixed_by(&group_dir, &source) {
                sink.push(Diagnostic::FileOutsideGroup {
                    group: group.name.clone(),
                    file_name: file.file_name.clone(),
                    path: source,
                });
                continue;
            }

            let target = self.model.target_path(&source, &file.deploy_path);
            if source == target {
                sink.push(Diagnostic::SourceEqualsTarget {
                    group: group.name.clone(),
                    file_name: file.file_name.clone(),
                    path: source,
                });
                continue;
            }

            if !self.fs.is_file(&source) {
                sink.push(Diagnostic::SourceFileMissing {
                    group: group.name.clone(),
                    file_name: file.file_name.clone(),
                    path: source,
                });
            }
        }
    }
}
