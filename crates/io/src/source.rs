use std::fs::File;
use std::path::Path;
use std::path::PathBuf;

use log::info;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("The file '{0}' does not exist")]
    SourceNotFound(PathBuf),

    #[error("Cannot open '{path}': {error}")]
    Unreadable { path: PathBuf, error: std::io::Error },
}

/// Opens the input file at the given path for reading.
///
/// A path that does not exist is reported as [SourceError::SourceNotFound],
/// so that the front ends can distinguish it from other I/O failures.
pub fn open_source(path: impl AsRef<Path>) -> Result<File, SourceError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(SourceError::SourceNotFound(path.to_path_buf()));
    }

    info!("Reading {}...", path.display());
    File::open(path).map_err(|error| SourceError::Unreadable {
        path: path.to_path_buf(),
        error,
    })
}
