//! The loaded, fully interpolated profile.
//!
//! A [`ProfileModel`] can only be produced by [`super::loader`]; every value
//! in it is already interpolated and `base_path` is absolute.
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::settings::{Settings, SettingsOverlay};
use crate::paths::{abs_path, expanded_abs_path};

/// Name of the section holding interpolation-visible globals.
pub const GLOBAL_SECTION: &str = "global";

/// Section name the INI dialect reserves for defaults.
pub const DEFAULT_SECTION: &str = "DEFAULT";

/// Key of the injected home directory in the `global` section.
pub const HOME_KEY: &str = "home";

/// Key of the resolved base path in the `global` section.
pub const BASE_PATH_KEY: &str = "base_path";

/// A single `file_name = deploy_path` entry of a group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMapping {
    /// Source file name, relative to the group directory.
    pub file_name: String,
    /// Where the file is deployed, as declared (already interpolated).
    pub deploy_path: String,
}

/// A named group of file mappings, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    /// Group name; also the group's directory name under the base path.
    pub name: String,
    /// File entries in declaration order.
    pub files: Vec<FileMapping>,
}

/// In-memory representation of a loaded profile.
#[derive(Debug, Clone)]
pub struct ProfileModel {
    path: PathBuf,
    home: PathBuf,
    base_path: PathBuf,
    global: BTreeMap<String, String>,
    settings: Settings,
    group_settings: BTreeMap<String, SettingsOverlay>,
    groups: Vec<Group>,
}

impl ProfileModel {
    pub(super) const fn new(
        path: PathBuf,
        home: PathBuf,
        base_path: PathBuf,
        global: BTreeMap<String, String>,
        settings: Settings,
        group_settings: BTreeMap<String, SettingsOverlay>,
        groups: Vec<Group>,
    ) -> Self {
        Self {
            path,
            home,
            base_path,
            global,
            settings,
            group_settings,
            groups,
        }
    }

    /// Absolute path of the profile file this model was loaded from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Home directory `~` expands to.
    #[must_use]
    pub fn home(&self) -> &Path {
        &self.home
    }

    /// Absolute directory holding the group directories.
    #[must_use]
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Look up a single `global` value.
    #[must_use]
    pub fn global(&self, key: &str) -> Option<&str> {
        self.global.get(key).map(String::as_str)
    }

    /// Default settings shared by every group.
    #[must_use]
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Sparse override declared for `group`, if any.
    #[must_use]
    pub fn group_settings(&self, group: &str) -> Option<&SettingsOverlay> {
        self.group_settings.get(group)
    }

    /// Groups in declaration order.
    #[must_use]
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Look up a group by name.
    #[must_use]
    pub fn group(&self, name: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.name == name)
    }

    /// Total number of file entries across all groups.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.groups.iter().map(|g| g.files.len()).sum()
    }

    /// Absolute directory of `group` (`base_path/group`).
    #[must_use]
    pub fn group_dir(&self, group: &str) -> PathBuf {
        abs_path(&self.base_path, &[group])
    }

    /// Absolute, normalized source path of `file_name` in `group`.
    #[must_use]
    pub fn source_path(&self, group: &str, file_name: &str) -> PathBuf {
        normalized(&expanded_abs_path(
            &self.group_dir(group),
            file_name,
            &self.home,
        ))
    }

    /// Absolute, normalized target path for `deploy_path`, resolved next to
    /// `source`.
    ///
    /// Absolute deploy paths are normalized too, so `/dots/shell/../shell/x`
    /// compares equal to `/dots/shell/x`.
    #[must_use]
    pub fn target_path(&self, source: &Path, deploy_path: &str) -> PathBuf {
        let source_dir = source.parent().unwrap_or(source);
        normalized(&expanded_abs_path(source_dir, deploy_path, &self.home))
    }

    /// Settings in effect for `group`: the defaults overlaid with the
    /// group's override section, if one exists.
    ///
    /// Computed fresh on every call; the defaults are never modified.
    #[must_use]
    pub fn effective_settings(&self, group: &str) -> Settings {
        self.group_settings
            .get(group)
            .map_or_else(|| self.settings.clone(), |o| self.settings.overlay(o))
    }
}

fn normalized(path: &Path) -> PathBuf {
    abs_path(path, &[] as &[&str])
}

/// Returns `true` if `name` is a reserved section and never a group.
#[must_use]
pub fn is_reserved_section(name: &str) -> bool {
    use super::settings::{GROUP_SETTINGS_SUFFIX, SETTINGS_SECTION};

    name == GLOBAL_SECTION
        || name == SETTINGS_SECTION
        || name == DEFAULT_SECTION
        || name.ends_with(GROUP_SETTINGS_SUFFIX)
}
