use crate::engine::types::SearchResult;
use log::debug;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OpenError {
    #[error("file {0:?} no longer exists under the root folder")]
    NotFound(std::path::PathBuf),
    #[error("failed to launch viewer for {path:?}: {source}")]
    Launch {
        path: std::path::PathBuf,
        source: std::io::Error,
    },
}

/// Open a search result with the OS-registered viewer for `.mm` files.
///
/// The result's relative path is joined back onto the root folder it was
/// found under, so hits from subfolder scans resolve to the right file.
pub fn open_result(result: &SearchResult, root_folder: &Path) -> Result<(), OpenError> {
    let path = root_folder.join(&result.rel_path);
    if !path.is_file() {
        return Err(OpenError::NotFound(path));
    }

    debug!("opening {:?}", path);
    open::that(&path).map_err(|source| OpenError::Launch { path, source })
}
