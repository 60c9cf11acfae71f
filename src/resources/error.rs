//! Typed error variants for resource operations.
//!
//! This module provides [`ResourceError`], the error type for resource check
//! and apply operations.  Every variant carries the path involved and the
//! underlying I/O error; callers convert to [`anyhow::Error`] via `?`.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that arise from resource checks and apply operations.
#[derive(Error, Debug)]
pub enum ResourceError {
    /// The current state of a target could not be determined.
    #[error("inspect {}: {source}", path.display())]
    Inspect {
        /// Path being inspected.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// A parent or backup directory could not be created.
    #[error("create directory {}: {source}", path.display())]
    CreateDir {
        /// Directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// An existing target could not be copied into the backup directory.
    #[error("back up {} to {}: {source}", path.display(), backup.display())]
    Backup {
        /// Target being backed up.
        path: PathBuf,
        /// Destination of the backup copy.
        backup: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// An existing target could not be removed before replacement.
    #[error("remove existing {}: {source}", path.display())]
    Remove {
        /// Target that could not be removed.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// A symbolic link could not be created.
    #[error("create link {} -> {}: {source}", link.display(), points_to.display())]
    Link {
        /// Where the link was to be created.
        link: PathBuf,
        /// What the link was to point at.
        points_to: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// A source file could not be copied to its target.
    #[error("copy {} to {}: {source}", from.display(), to.display())]
    Copy {
        /// Source file.
        from: PathBuf,
        /// Target path.
        to: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use std::error::Error as _;

    fn denied() -> io::Error {
        io::Error::new(io::ErrorKind::PermissionDenied, "permission denied")
    }

    #[test]
    fn remove_display() {
        let e = ResourceError::Remove {
            path: PathBuf::from("/home/u/.bashrc"),
            source: denied(),
        };
        assert_eq!(
            e.to_string(),
            "remove existing /home/u/.bashrc: permission denied"
        );
    }

    #[test]
    fn link_display() {
        let e = ResourceError::Link {
            link: PathBuf::from("/home/u/.bashrc"),
            points_to: PathBuf::from("/dots/shell/bashrc"),
            source: denied(),
        };
        assert!(e.to_string().contains("/home/u/.bashrc -> /dots/shell/bashrc"));
    }

    #[test]
    fn backup_display() {
        let e = ResourceError::Backup {
            path: PathBuf::from("/home/u/.bashrc"),
            backup: PathBuf::from("/dots/backup/home_u_.bashrc"),
            source: denied(),
        };
        assert!(e.to_string().contains("home_u_.bashrc"));
    }

    #[test]
    fn variants_expose_io_source() {
        let e = ResourceError::Copy {
            from: PathBuf::from("/a"),
            to: PathBuf::from("/b"),
            source: denied(),
        };
        assert!(e.source().is_some());
    }

    #[test]
    fn resource_error_converts_to_anyhow() {
        let e = ResourceError::CreateDir {
            path: PathBuf::from("/x"),
            source: denied(),
        };
        let _anyhow_err: anyhow::Error = e.into();
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn resource_error_is_send_sync() {
        assert_send_sync::<ResourceError>();
    }
}
