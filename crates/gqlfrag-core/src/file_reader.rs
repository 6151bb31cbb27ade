use std::path::Path;
use std::path::PathBuf;
use thiserror::Error;

/// Read a fragment document from disk. Directories and other non-files are
/// rejected up front rather than surfacing as an OS error.
pub(crate) fn read_content(file_path: &Path) -> Result<String, ReadContentError> {
    if !file_path.is_file() {
        return Err(ReadContentError::PathIsNotAFile(file_path.to_path_buf()));
    }

    let bytes = std::fs::read(file_path).map_err(|err| ReadContentError::Io {
        err,
        file_path: file_path.to_path_buf(),
    })?;
    String::from_utf8(bytes).map_err(|err| ReadContentError::NotUtf8 {
        file_path: file_path.to_path_buf(),
        valid_up_to: err.utf8_error().valid_up_to(),
    })
}

#[derive(Debug, Error)]
pub enum ReadContentError {
    #[error("Failed to read {}: {err}", .file_path.display())]
    Io {
        err: std::io::Error,
        file_path: PathBuf,
    },

    #[error("{} is not valid UTF-8 (invalid byte at offset {valid_up_to})", .file_path.display())]
    NotUtf8 {
        file_path: PathBuf,
        valid_up_to: usize,
    },

    #[error("{} is not a file", .0.display())]
    PathIsNotAFile(PathBuf),
}
