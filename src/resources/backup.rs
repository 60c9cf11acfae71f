//! Backups of targets about to be replaced.
//!
//! A backup is a plain copy of whatever the target resolves to, stored in a
//! flat directory under a name derived from the target's absolute path.
use std::path::{MAIN_SEPARATOR, Path, PathBuf};

use super::error::ResourceError;

/// Name of the backup directory under the base path.
pub const BACKUP_DIR_NAME: &str = "backup";

/// Backup directory for a profile whose groups live under `base_path`.
#[must_use]
pub fn backup_dir(base_path: &Path) -> PathBuf {
    base_path.join(BACKUP_DIR_NAME)
}

/// Flattened backup file name for `target`.
///
/// Every path separator becomes `_` and the leading separator is dropped.
/// Distinct targets can map to the same name (`/a/b_c` and `/a_b/c`).
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use dotdeploy::resources::backup::backup_name;
///
/// assert_eq!(backup_name(Path::new("/home/u/.bashrc")), "home_u_.bashrc");
/// ```
#[must_use]
pub fn backup_name(target: &Path) -> String {
    let raw = target.to_string_lossy();
    let trimmed = raw
        .strip_prefix(['/', MAIN_SEPARATOR])
        .unwrap_or(&*raw);
    trimmed.replace(['/', MAIN_SEPARATOR], "_")
}

/// Returns `true` if [`backup_file`] would write a copy of `target`.
///
/// Only targets resolving to a regular file are backed up; missing targets,
/// dangling links and directories are not.
#[must_use]
pub fn would_back_up(target: &Path) -> bool {
    target.is_file()
}

/// Copy the file `target` resolves to into `backup_dir`.
///
/// The directory is created on demand.  An existing backup of the same name
/// is overwritten.  Returns the backup's path, or `None` if there was nothing
/// to back up.
///
/// # Errors
///
/// Returns [`ResourceError::CreateDir`] if the backup directory cannot be
/// created and [`ResourceError::Backup`] if the copy fails.
pub fn backup_file(target: &Path, backup_dir: &Path) -> Result<Option<PathBuf>, ResourceError> {
    if !would_back_up(target) {
        return Ok(None);
    }

    std::fs::create_dir_all(backup_dir).map_err(|source| ResourceError::CreateDir {
        path: backup_dir.to_path_buf(),
        source,
    })?;

    let backup = backup_dir.join(backup_name(target));
    std::fs::copy(target, &backup).map_err(|source| ResourceError::Backup {
        path: target.to_path_buf(),
        backup: backup.clone(),
        source,
    })?;
    Ok(Some(backup))
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn backup_name_flattens_separators() {
        assert_eq!(backup_name(Path::new("/etc/x/y.conf")), "etc_x_y.conf");
        assert_eq!(backup_name(Path::new("/top")), "top");
    }

    #[cfg(unix)]
    #[test]
    fn backup_name_collision_is_preserved() {
        assert_eq!(
            backup_name(Path::new("/a/b_c")),
            backup_name(Path::new("/a_b/c"))
        );
    }

    #[test]
    fn backup_dir_is_under_base_path() {
        assert_eq!(
            backup_dir(Path::new("/dots")),
            Path::new("/dots").join("backup")
        );
    }

    #[test]
    fn backup_copies_regular_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("home").join(".bashrc");
        std::fs::create_dir_all(target.parent().unwrap()).unwrap();
        std::fs::write(&target, "old rc").unwrap();
        let backups = dir.path().join("dots").join("backup");

        let written = backup_file(&target, &backups).unwrap().unwrap();
        assert_eq!(written, backups.join(backup_name(&target)));
        assert_eq!(std::fs::read_to_string(&written).unwrap(), "old rc");
        assert_eq!(std::fs::read_to_string(&target).unwrap(), "old rc");
    }

    #[test]
    fn missing_target_creates_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let backups = dir.path().join("backup");
        assert!(backup_file(&dir.path().join("none"), &backups).unwrap().is_none());
        assert!(!backups.exists());
    }

    #[test]
    fn directory_target_is_not_backed_up() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!would_back_up(dir.path()));
    }

    #[cfg(unix)]
    #[test]
    fn link_target_backs_up_resolved_content() {
        let dir = tempfile::tempdir().unwrap();
        let real = dir.path().join("real");
        let link = dir.path().join("link");
        std::fs::write(&real, "pointed-at").unwrap();
        std::os::unix::fs::symlink(&real, &link).unwrap();

        let written = backup_file(&link, &dir.path().join("backup"))
            .unwrap()
            .unwrap();
        let meta = std::fs::symlink_metadata(&written).unwrap();
        assert!(!meta.is_symlink());
        assert_eq!(std::fs::read_to_string(&written).unwrap(), "pointed-at");
    }

    #[cfg(unix)]
    #[test]
    fn dangling_link_is_not_backed_up() {
        let dir = tempfile::tempdir().unwrap();
        let link = dir.path().join("link");
        std::os::unix::fs::symlink(dir.path().join("gone"), &link).unwrap();
        assert!(!would_back_up(&link));
    }
}
