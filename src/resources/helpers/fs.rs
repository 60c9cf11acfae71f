//! File-system resource helpers.
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use crate::resources::error::ResourceError;

const COMPARE_CHUNK: usize = 64 * 1024;

/// Ensure the parent directory of `path` exists, creating it (and any
/// ancestors) if necessary.
///
/// # Errors
///
/// Returns [`ResourceError::CreateDir`] if the directory cannot be created.
pub fn ensure_parent_dir(path: &Path) -> Result<(), ResourceError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| ResourceError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}

/// Remove an existing file or symlink at `path`, including broken symlinks.
///
/// Returns `true` if something was removed.  Real directories are never
/// removed.
///
/// # Errors
///
/// Returns [`ResourceError::Remove`] if `path` is a real directory or cannot
/// be removed.
pub fn remove_existing(path: &Path) -> Result<bool, ResourceError> {
    let Ok(meta) = path.symlink_metadata() else {
        return Ok(false);
    };
    if meta.is_dir() {
        return Err(ResourceError::Remove {
            path: path.to_path_buf(),
            source: io::Error::new(
                io::ErrorKind::IsADirectory,
                "target is a directory and will not be replaced",
            ),
        });
    }
    std::fs::remove_file(path).map_err(|source| ResourceError::Remove {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(true)
}

/// Returns `true` if `a` and `b` have byte-identical content.
///
/// Sizes are compared first; contents are streamed only when they match.
///
/// # Errors
///
/// Returns an error if either file cannot be opened or read.
pub fn files_identical(a: &Path, b: &Path) -> io::Result<bool> {
    if std::fs::metadata(a)?.len() != std::fs::metadata(b)?.len() {
        return Ok(false);
    }

    let mut left = BufReader::new(File::open(a)?);
    let mut right = BufReader::new(File::open(b)?);
    let mut left_buf = vec![0u8; COMPARE_CHUNK];
    let mut right_buf = vec![0u8; COMPARE_CHUNK];

    loop {
        let n = read_full(&mut left, &mut left_buf)?;
        let m = read_full(&mut right, &mut right_buf)?;
        if left_buf.get(..n) != right_buf.get(..m) {
            return Ok(false);
        }
        if n == 0 {
            return Ok(true);
        }
    }
}

/// Fill `buf` as far as the reader allows; returns the number of bytes read.
fn read_full(reader: &mut impl Read, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while let Some(rest) = buf.get_mut(filled..) {
        if rest.is_empty() {
            break;
        }
        match reader.read(rest) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
