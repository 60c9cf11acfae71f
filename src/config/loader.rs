//! Profile loading: read, parse, inject globals, resolve the base path and
//! interpolate into a [`ProfileModel`].
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::ini::{RawDocument, parse_document};
use super::interpolation::{interpolate, interpolate_document};
use super::profile::{
    BASE_PATH_KEY, FileMapping, GLOBAL_SECTION, Group, HOME_KEY, ProfileModel,
    is_reserved_section,
};
use super::settings::{GROUP_SETTINGS_SUFFIX, SETTINGS_SECTION, Settings, SettingsOverlay};
use crate::error::ProfileError;
use crate::paths::{abs_path, expanded_abs_path};

const GROUPS_DIRECTORY_KEY: &str = "groups_directory";

/// Load the profile at `path` using the current user's home directory.
///
/// # Errors
///
/// Returns [`ProfileError::HomeDirUnavailable`] if no home directory can be
/// determined, plus every error of [`load_with_home`].
pub fn load(path: &Path) -> Result<ProfileModel, ProfileError> {
    let home = dirs::home_dir().ok_or(ProfileError::HomeDirUnavailable)?;
    load_with_home(path, &home)
}

/// Load the profile at `path`, injecting `home` as `global.home`.
///
/// # Errors
///
/// Returns an error if:
/// - `path` is not an existing regular file ([`ProfileError::NotFound`])
/// - the file cannot be read ([`ProfileError::Read`])
/// - the text is not a valid profile (see [`parse_profile`])
pub fn load_with_home(path: &Path, home: &Path) -> Result<ProfileModel, ProfileError> {
    if !path.is_file() {
        return Err(ProfileError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path).map_err(|source| ProfileError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let model = parse_profile(&content, path, home)?;
    tracing::debug!(
        "loaded profile {} ({} groups, {} files, base path {})",
        model.path().display(),
        model.groups().len(),
        model.file_count(),
        model.base_path().display()
    );
    Ok(model)
}

/// Build a [`ProfileModel`] from profile text as if it were read from
/// `profile_path`.
///
/// The file at `profile_path` is never touched; only its directory is used
/// as the default base path.
///
/// # Errors
///
/// Returns an error if:
/// - the text cannot be parsed ([`ProfileError::Parse`])
/// - a value references an undefined key or uses malformed `${...}` syntax
///   ([`ProfileError::Interpolation`])
/// - a settings section holds an unrecognized `mode` or `backup` value
///   ([`ProfileError::InvalidSetting`])
pub fn parse_profile(
    content: &str,
    profile_path: &Path,
    home: &Path,
) -> Result<ProfileModel, ProfileError> {
    let profile_path = abs_path(profile_path, &[] as &[&str]);
    let profile_dir = profile_path
        .parent()
        .map_or_else(|| PathBuf::from("/"), Path::to_path_buf);

    let mut doc = RawDocument::default();
    doc.set(GLOBAL_SECTION, HOME_KEY, home.to_string_lossy());
    doc.merge(parse_document(content)?);

    if !doc.has_section(SETTINGS_SECTION) {
        doc.set(SETTINGS_SECTION, "mode", "link");
        doc.set(SETTINGS_SECTION, "backup", "false");
    }

    let base_path = resolve_base_path(&doc, &profile_dir, home)?;
    doc.set(GLOBAL_SECTION, BASE_PATH_KEY, base_path.to_string_lossy());

    let resolved = interpolate_document(&doc)?;
    build_model(resolved, profile_path, home, base_path)
}

/// `settings.groups_directory` (three-tier resolved against the profile's
/// directory) or the profile's directory itself.
fn resolve_base_path(
    doc: &RawDocument,
    profile_dir: &Path,
    home: &Path,
) -> Result<PathBuf, ProfileError> {
    let configured = match doc.get(SETTINGS_SECTION, GROUPS_DIRECTORY_KEY) {
        Some(raw) => interpolate(doc, SETTINGS_SECTION, GROUPS_DIRECTORY_KEY, raw)?,
        None => String::new(),
    };
    let configured = configured.trim();

    if configured.is_empty() {
        Ok(abs_path(profile_dir, &[] as &[&str]))
    } else {
        Ok(expanded_abs_path(profile_dir, configured, home))
    }
}

fn build_model(
    resolved: RawDocument,
    profile_path: PathBuf,
    home: &Path,
    base_path: PathBuf,
) -> Result<ProfileModel, ProfileError> {
    let mut global = BTreeMap::new();
    let mut settings = Settings::default();
    let mut group_settings = BTreeMap::new();
    let mut groups = Vec::new();

    for section in resolved.sections {
        if section.name == GLOBAL_SECTION {
            global.extend(section.entries);
        } else if section.name == SETTINGS_SECTION {
            settings = Settings::from_section(&section)?;
        } else if let Some(group) = section.name.strip_suffix(GROUP_SETTINGS_SUFFIX) {
            let overlay = SettingsOverlay::from_section(&section)?;
            group_settings.insert(group.to_string(), overlay);
        } else if !is_reserved_section(&section.name) {
            groups.push(Group {
                name: section.name,
                files: section
                    .entries
                    .into_iter()
                    .map(|(file_name, deploy_path)| FileMapping {
                        file_name,
                        deploy_path,
                    })
                    .collect(),
            });
        }
    }

    for name in group_settings.keys() {
        if !groups.iter().any(|g| &g.name == name) {
            tracing::debug!("settings override [{name}{GROUP_SETTINGS_SUFFIX}] has no matching group");
        }
    }

    Ok(ProfileModel::new(
        profile_path,
        home.to_path_buf(),
        base_path,
        global,
        settings,
        group_settings,
        groups,
    ))
}
