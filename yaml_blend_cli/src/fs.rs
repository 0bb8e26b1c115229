//! Filesystem helpers for reading inputs and writing the merged document.

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;

use crate::error::CliError;

/// Opens the directory containing `path` and returns it with the file name.
fn open_parent(path: &Utf8Path) -> Result<(Dir, &str), CliError> {
    let file_name = path
        .file_name()
        .ok_or_else(|| CliError::NotAFile(path.to_path_buf()))?;
    let parent = path
        .parent()
        .filter(|dir| !dir.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(|source| {
        CliError::Io {
            path: parent.to_path_buf(),
            source,
        }
    })?;
    Ok((dir, file_name))
}

/// Reads a document's raw bytes.
///
/// # Errors
///
/// Returns [`CliError::Io`] when the file cannot be read.
pub fn read_document(path: &Utf8Path) -> Result<Vec<u8>, CliError> {
    let (dir, name) = open_parent(path)?;
    let bytes = dir.read(name).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(%path, bytes = bytes.len(), "read document");
    Ok(bytes)
}

/// Reads a UTF-8 text file.
///
/// # Errors
///
/// Returns [`CliError::Io`] when the file cannot be read or is not UTF-8.
pub fn read_text(path: &Utf8Path) -> Result<String, CliError> {
    let (dir, name) = open_parent(path)?;
    dir.read_to_string(name).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes `contents` to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns [`CliError::Io`] when the parent directory is missing or the
/// write fails.
pub fn write_document(path: &Utf8Path, contents: &[u8]) -> Result<(), CliError> {
    let (dir, name) = open_parent(path)?;
    dir.write(name, contents).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(%path, bytes = contents.len(), "wrote merged document");
    Ok(())
}
