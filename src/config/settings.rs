//! Deployment settings and the per-group override merge.
use std::fmt;

use super::ini::RawSection;
use crate::error::ProfileError;

/// Name of the default settings section.
pub const SETTINGS_SECTION: &str = "settings";

/// Suffix marking a per-group settings override section (`<group>.settings`).
pub const GROUP_SETTINGS_SUFFIX: &str = ".settings";

const MODE_KEY: &str = "mode";
const BACKUP_KEY: &str = "backup";
const GROUPS_DIRECTORY_KEY: &str = "groups_directory";

/// How a file is materialized at its target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    /// Symbolic link from target to source.
    #[default]
    Link,
    /// Full content copy of the source.
    Copy,
}

impl Mode {
    /// Parse a mode value, case-insensitively.
    ///
    /// # Examples
    ///
    /// ```
    /// use dotdeploy::config::settings::Mode;
    ///
    /// assert_eq!(Mode::parse("LINK"), Some(Mode::Link));
    /// assert_eq!(Mode::parse("cp"), Some(Mode::Copy));
    /// assert_eq!(Mode::parse("hardlink"), None);
    /// ```
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "link" | "symlink" | "ln" => Some(Self::Link),
            "copy" | "cp" => Some(Self::Copy),
            _ => None,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Link => f.write_str("link"),
            Self::Copy => f.write_str("copy"),
        }
    }
}

/// Parse a boolean in the `1|yes|true|on` / `0|no|false|off` style.
#[must_use]
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "yes" | "true" | "on" => Some(true),
        "0" | "no" | "false" | "off" => Some(false),
        _ => None,
    }
}

/// Fully specified deployment settings.
///
/// The profile's `[settings]` section always yields one of these; missing
/// keys take their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    /// Deployment strategy.
    pub mode: Mode,
    /// Whether to back up a target before replacing it.
    pub backup: bool,
    /// Override for the directory holding the group directories.
    pub groups_directory: Option<String>,
}

impl Settings {
    /// Return these settings with every key present in `overlay` replaced.
    ///
    /// `self` is left untouched; the result is a fresh value.
    ///
    /// # Examples
    ///
    /// ```
    /// use dotdeploy::config::settings::{Mode, Settings, SettingsOverlay};
    ///
    /// let defaults = Settings::default();
    /// let overlay = SettingsOverlay { backup: Some(true), ..SettingsOverlay::default() };
    /// let effective = defaults.overlay(&overlay);
    /// assert_eq!(effective.mode, Mode::Link);
    /// assert!(effective.backup);
    /// assert!(!defaults.backup);
    /// ```
    #[must_use]
    pub fn overlay(&self, overlay: &SettingsOverlay) -> Self {
        Self {
            mode: overlay.mode.unwrap_or(self.mode),
            backup: overlay.backup.unwrap_or(self.backup),
            groups_directory: overlay
                .groups_directory
                .clone()
                .or_else(|| self.groups_directory.clone()),
        }
    }

    /// Build the default settings from an interpolated `[settings]` section.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::InvalidSetting`] for an unrecognized `mode` or
    /// `backup` value.
    pub fn from_section(section: &RawSection) -> Result<Self, ProfileError> {
        Ok(Self::default().overlay(&SettingsOverlay::from_section(section)?))
    }
}

/// Sparse per-group settings; `None` means "inherit from the defaults".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsOverlay {
    /// Deployment strategy override.
    pub mode: Option<Mode>,
    /// Backup flag override.
    pub backup: Option<bool>,
    /// Groups directory override.
    pub groups_directory: Option<String>,
}

impl SettingsOverlay {
    /// Build an overlay from an interpolated settings section.
    ///
    /// Unknown keys are ignored with a warning.  An empty
    /// `groups_directory` counts as unset.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::InvalidSetting`] for an unrecognized `mode` or
    /// `backup` value.
    pub fn from_section(section: &RawSection) -> Result<Self, ProfileError> {
        let mut overlay = Self::default();
        for (key, value) in &section.entries {
            match key.as_str() {
                MODE_KEY => {
                    overlay.mode = Some(Mode::parse(value).ok_or_else(|| invalid(
                        section,
                        key,
                        value,
                        "expected link or copy",
                    ))?);
                }
                BACKUP_KEY => {
                    overlay.backup = Some(parse_bool(value).ok_or_else(|| invalid(
                        section,
                        key,
                        value,
                        "expected true/false, yes/no, on/off or 1/0",
                    ))?);
                }
                GROUPS_DIRECTORY_KEY => {
                    overlay.groups_directory =
                        (!value.trim().is_empty()).then(|| value.trim().to_string());
                }
                other => {
                    tracing::warn!("ignoring unknown setting [{}] {other}", section.name);
                }
            }
        }
        Ok(overlay)
    }
}

fn invalid(section: &RawSection, key: &str, value: &str, expected: &'static str) -> ProfileError {
    ProfileError::InvalidSetting {
        section: section.name.clone(),
        key: key.to_string(),
        value: value.to_string(),
        expected,
    }
}
