//! Shared filesystem helpers for reading and writing configuration files.

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8::Dir};

use crate::{ConfigkitError, ConfigkitResult};

/// Return the parent directory of `path`, falling back to `"."` when the path
/// has no parent or the parent is empty.
pub(super) fn parent_or_dot(path: &Utf8Path) -> &Utf8Path {
    path.parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."))
}

/// Open the parent directory of `path` via `cap-std` and extract the file name.
///
/// # Errors
///
/// Returns an [`std::io::Error`] if the file name cannot be determined or the
/// parent directory cannot be opened.
pub(super) fn open_parent_dir_and_name(path: &Utf8Path) -> std::io::Result<(Dir, String)> {
    let parent = parent_or_dot(path);
    let file_name = path.file_name().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "cannot determine file name for configuration file path",
        )
    })?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority())?;
    Ok((dir, file_name.to_owned()))
}

/// Reads `path` as UTF-8 text.
///
/// # Errors
///
/// Returns [`ConfigkitError::File`] when the file cannot be opened or read.
pub fn read_text(path: &Utf8Path) -> ConfigkitResult<String> {
    let (dir, name) =
        open_parent_dir_and_name(path).map_err(|err| ConfigkitError::file(path, err))?;
    dir.read_to_string(&name)
        .map_err(|err| ConfigkitError::file(path, err))
}

/// Writes `contents` to `path`, replacing any existing file.
///
/// The parent directory must already exist.
///
/// # Errors
///
/// Returns [`ConfigkitError::File`] when the parent directory cannot be
/// opened or the file cannot be written.
pub fn write_text_file(path: &Utf8Path, contents: &str) -> ConfigkitResult<()> {
    let (dir, name) =
        open_parent_dir_and_name(path).map_err(|err| ConfigkitError::file(path, err))?;
    dir.write(&name, contents)
        .map_err(|err| ConfigkitError::file(path, err))
}

/// Absolute form of `path` for diagnostics, or `path` itself when it cannot
/// be resolved.
pub(super) fn display_path(path: &Utf8Path) -> Utf8PathBuf {
    path.canonicalize_utf8().unwrap_or_else(|_| path.to_path_buf())
}
