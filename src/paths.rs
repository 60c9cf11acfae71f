//! Pure path computation: absolute joining, home-directory expansion and
//! prefix containment.
//!
//! Nothing here touches the filesystem except the `~user` lookup, which
//! consults the system user database.
use std::path::{Component, Path, PathBuf};

/// Join `segments` onto `base` and normalize the result lexically.
///
/// `.` components are dropped and `..` pops the previous component, never
/// climbing above the root.  Symlinks are not resolved and the inputs need
/// not exist.  A relative `base` is anchored at the current working
/// directory.
///
/// # Examples
///
/// ```
/// use std::path::{Path, PathBuf};
/// use dotdeploy::paths::abs_path;
///
/// let p = abs_path(Path::new("/dots"), &["shell", "../git/./config"]);
/// assert_eq!(p, PathBuf::from("/dots/git/config"));
/// ```
#[must_use]
pub fn abs_path<S: AsRef<Path>>(base: &Path, segments: &[S]) -> PathBuf {
    let mut joined = if base.is_absolute() {
        base.to_path_buf()
    } else {
        std::env::current_dir().unwrap_or_default().join(base)
    };
    for segment in segments {
        joined.push(segment);
    }
    normalize(&joined)
}

/// Resolve `path` to an absolute path using the three-tier rule.
///
/// 1. An absolute `path` is returned unchanged.
/// 2. A leading `~` or `~user` is expanded; if the result is absolute it is
///    returned (normalized).
/// 3. Otherwise `path` is resolved relative to `base`.
///
/// `home` is the directory a bare `~` expands to.
///
/// # Examples
///
/// ```
/// use std::path::{Path, PathBuf};
/// use dotdeploy::paths::expanded_abs_path;
///
/// let home = Path::new("/home/alice");
/// let base = Path::new("/dots/shell");
/// assert_eq!(expanded_abs_path(base, "~/.bashrc", home), PathBuf::from("/home/alice/.bashrc"));
/// assert_eq!(expanded_abs_path(base, "rel/x", home), PathBuf::from("/dots/shell/rel/x"));
/// assert_eq!(expanded_abs_path(base, "/etc/motd", home), PathBuf::from("/etc/motd"));
/// ```
#[must_use]
pub fn expanded_abs_path(base: &Path, path: &str, home: &Path) -> PathBuf {
    let candidate = Path::new(path);
    if candidate.is_absolute() {
        return candidate.to_path_buf();
    }

    let expanded = expand_user(path, home);
    if expanded.is_absolute() {
        return normalize(&expanded);
    }

    abs_path(base, &[expanded])
}

/// Expand a leading `~` (to `home`) or `~user` (to that user's home).
///
/// Paths without a leading tilde, and `~user` forms naming an unknown user,
/// are returned unchanged.
#[must_use]
pub fn expand_user(path: &str, home: &Path) -> PathBuf {
    let Some(rest) = path.strip_prefix('~') else {
        return PathBuf::from(path);
    };

    let (user, tail) = rest
        .find(['/', std::path::MAIN_SEPARATOR])
        .map_or((rest, ""), |idx| rest.split_at(idx));
    let tail = tail.trim_start_matches(['/', std::path::MAIN_SEPARATOR]);

    let user_home = if user.is_empty() {
        Some(home.to_path_buf())
    } else {
        user_home_dir(user)
    };

    match user_home {
        Some(dir) if tail.is_empty() => dir,
        Some(dir) => dir.join(tail),
        None => PathBuf::from(path),
    }
}

/// Returns `true` if the string form of `path` starts with the string form
/// of `candidate_base`.
///
/// This is a plain string-prefix test: `/dots/shell-extra/x` counts as
/// prefixed by `/dots/shell`.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use dotdeploy::paths::is_prefixed_by;
///
/// assert!(is_prefixed_by(Path::new("/dots/shell"), Path::new("/dots/shell/bashrc")));
/// assert!(!is_prefixed_by(Path::new("/dots/shell"), Path::new("/dots/git/config")));
/// ```
#[must_use]
pub fn is_prefixed_by(candidate_base: &Path, path: &Path) -> bool {
    let base = abs_path(candidate_base, &[] as &[&str]);
    let path = abs_path(path, &[] as &[&str]);
    path.to_string_lossy()
        .starts_with(base.to_string_lossy().as_ref())
}

/// Lexically normalize an absolute path.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir | Component::Normal(_) => {
                out.push(component.as_os_str());
            }
            Component::CurDir => {}
            Component::ParentDir => {
                if out.parent().is_some() {
                    out.pop();
                }
            }
        }
    }
    out
}

#[cfg(unix)]
fn user_home_dir(user: &str) -> Option<PathBuf> {
    nix::unistd::User::from_name(user)
        .ok()
        .flatten()
        .map(|u| u.dir)
}

#[cfg(not(unix))]
fn user_home_dir(_user: &str) -> Option<PathBuf> {
    None
}
