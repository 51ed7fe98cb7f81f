use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use crate::view::{LoadOptions, ViewState};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("Document not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Read the raw markdown document at `path`
pub fn read_document(path: &Path) -> Result<String, IoError> {
    if !path.is_file() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    fs::read_to_string(path).map_err(IoError::Io)
}

/// Read the document at `path` and build a fresh view from it
pub fn load_view(path: &Path, options: &LoadOptions) -> Result<ViewState, IoError> {
    let raw = read_document(path)?;
    info!("loaded {} ({} bytes)", path.display(), raw.len());
    Ok(ViewState::load(&raw, options))
}
