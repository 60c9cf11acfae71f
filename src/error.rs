//! Domain-specific error types for the deployment engine.
//!
//! Load-time failures are [`ProfileError`] values and abort the run before
//! any validation happens.  Validation findings are [`Diagnostic`] values:
//! they are collected in bulk and only fail the run as a whole.  Command
//! handlers at the CLI boundary convert everything to [`anyhow::Error`] via
//! `?`.
//!
//! # Error hierarchy
//!
//! ```text
//! ProfileError (fatal, load time)
//! ├── NotFound / Read
//! ├── Parse
//! ├── Interpolation
//! ├── InvalidSetting
//! └── HomeDirUnavailable
//!
//! Diagnostic (collected, validation time)
//! ├── BasePathMissing, NoGroupsFound, GroupDirMissing
//! └── AbsoluteFileName, FileOutsideGroup, SourceEqualsTarget, SourceFileMissing
//! ```
//!
//! Apply-time failures live in [`crate::resources::error::ResourceError`].
use std::path::PathBuf;

use thiserror::Error;

/// Errors that arise while loading a profile.
#[derive(Error, Debug)]
pub enum ProfileError {
    /// The profile path does not reference an existing regular file.
    #[error("no such file {}", path.display())]
    NotFound {
        /// Path given by the caller.
        path: PathBuf,
    },

    /// The profile exists but could not be read.
    #[error("IO error reading profile {}: {source}", path.display())]
    Read {
        /// Path to the profile.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The profile text is not valid INI.
    #[error("{message}")]
    Parse {
        /// Single-line parser diagnostic.
        message: String,
    },

    /// A value references an undefined key or uses malformed `${...}` syntax.
    #[error("bad value substitution in [{section}] {key}: {reason}")]
    Interpolation {
        /// Section holding the offending value.
        section: String,
        /// Key holding the offending value.
        key: String,
        /// What went wrong.
        reason: String,
    },

    /// A recognized setting holds a value outside its domain.
    #[error("invalid value for [{section}] {key}: '{value}' ({expected})")]
    InvalidSetting {
        /// Settings section (`settings` or `<group>.settings`).
        section: String,
        /// Setting name.
        key: String,
        /// Value found in the profile.
        value: String,
        /// Description of the accepted values.
        expected: &'static str,
    },

    /// The caller's home directory could not be determined.
    #[error("cannot determine the home directory")]
    HomeDirUnavailable,
}

impl ProfileError {
    /// Build a [`ProfileError::Parse`], collapsing the message to one line.
    #[must_use]
    pub fn parse(message: &str) -> Self {
        Self::Parse {
            message: message.replace(['\r', '\n'], ""),
        }
    }
}

/// Machine-distinguishable kind of a [`Diagnostic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// `global.base_path` is not a directory.
    BasePathMissing,
    /// The profile declares no groups.
    NoGroupsFound,
    /// A group's directory does not exist.
    GroupDirMissing,
    /// A file entry names an absolute path.
    AbsoluteFileName,
    /// A file entry resolves outside its group directory.
    FileOutsideGroup,
    /// A file entry's source and target resolve to the same path.
    SourceEqualsTarget,
    /// A file entry's source is not an existing regular file.
    SourceFileMissing,
}

/// A single validation finding.
///
/// `Display` gives the human-readable text; [`Diagnostic::kind`] gives the
/// kind for programmatic handling.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// `global.base_path` is not a directory.
    #[error("directory not found: no such directory: {}", path.display())]
    BasePathMissing {
        /// The resolved base path.
        path: PathBuf,
    },

    /// The profile declares no groups.
    #[error("no groups found in profile")]
    NoGroupsFound,

    /// A group's directory does not exist.
    #[error("groups directory not found: no such directory: {}", path.display())]
    GroupDirMissing {
        /// Group name.
        group: String,
        /// Expected group directory.
        path: PathBuf,
    },

    /// A file entry names an absolute path.
    #[error("file name cannot be an absolute path: {file_name} in group: {group}")]
    AbsoluteFileName {
        /// Group name.
        group: String,
        /// Declared file name.
        file_name: String,
    },

    /// A file entry resolves outside its group directory.
    #[error("file is outside its group directory: {file_name} in group: {group} ({})", path.display())]
    FileOutsideGroup {
        /// Group name.
        group: String,
        /// Declared file name.
        file_name: String,
        /// Resolved source path.
        path: PathBuf,
    },

    /// A file entry's source and target resolve to the same path.
    #[error("source and target are the same file: {file_name} in group: {group} ({})", path.display())]
    SourceEqualsTarget {
        /// Group name.
        group: String,
        /// Declared file name.
        file_name: String,
        /// The shared resolved path.
        path: PathBuf,
    },

    /// A file entry's source is not an existing regular file.
    #[error("no such file: {file_name} in group: {group}")]
    SourceFileMissing {
        /// Group name.
        group: String,
        /// Declared file name.
        file_name: String,
        /// Resolved source path.
        path: PathBuf,
    },
}

impl Diagnostic {
    /// Return the kind of this diagnostic.
    #[must_use]
    pub const fn kind(&self) -> DiagnosticKind {
        match self {
            Self::BasePathMissing { .. } => DiagnosticKind::BasePathMissing,
            Self::NoGroupsFound => DiagnosticKind::NoGroupsFound,
            Self::GroupDirMissing { .. } => DiagnosticKind::GroupDirMissing,
            Self::AbsoluteFileName { .. } => DiagnosticKind::AbsoluteFileName,
            Self::FileOutsideGroup { .. } => DiagnosticKind::FileOutsideGroup,
            Self::SourceEqualsTarget { .. } => DiagnosticKind::SourceEqualsTarget,
            Self::SourceFileMissing { .. } => DiagnosticKind::SourceFileMissing,
        }
    }
}
