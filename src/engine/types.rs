use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use thiserror::Error;

/// One candidate `.mm` file produced by a folder scan. Read fresh on every
/// search; never cached across invocations.
#[derive(Debug, Clone)]
pub struct MindMapFile {
    pub path: PathBuf,
    /// Path relative to the scan root. The bare file name is ambiguous once
    /// subfolders are included, so results carry this instead.
    pub rel_path: PathBuf,
    pub name: String,
    pub modified: SystemTime,
    pub size: u64,
}

impl MindMapFile {
    pub fn from_path(path: &Path, root: &Path) -> std::io::Result<Self> {
        let metadata = std::fs::metadata(path)?;
        let rel_path = path.strip_prefix(root).unwrap_or(path).to_path_buf();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        Ok(Self {
            path: path.to_path_buf(),
            rel_path,
            name,
            modified: metadata.modified()?,
            size: metadata.len(),
        })
    }
}

/// Owned element tree built from one parsed `.mm` file. Covers every XML
/// element, not just FreeMind `node` elements; dropped when the file's scan
/// completes.
#[derive(Debug, Clone, Default)]
pub struct MindMapNode {
    /// The element's `TEXT` attribute, empty if absent.
    pub text: String,
    /// Text content of each descendant `richcontent` element, document order.
    /// Populated only for elements with local name `node`.
    pub notes: Vec<String>,
    pub children: Vec<MindMapNode>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchOptions {
    pub query: String,
    pub root_folder: PathBuf,
    pub search_notes: bool,
    pub include_subfolders: bool,
    /// Minimum query length in characters. The baseline contract is a
    /// non-empty query; callers wanting the stricter historical behavior set 2.
    pub min_query_len: usize,
}

impl SearchOptions {
    pub fn new(query: impl Into<String>, root_folder: impl Into<PathBuf>) -> Self {
        Self {
            query: query.into(),
            root_folder: root_folder.into(),
            search_notes: false,
            include_subfolders: false,
            min_query_len: 1,
        }
    }
}

/// One match record. Immutable once created; a new search replaces the
/// previous result set entirely.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub file_name: String,
    /// Relative to the search's root folder; joined back onto it to reopen.
    pub rel_path: PathBuf,
    pub display_text: String,
    pub last_modified: String,
    pub is_note: bool,
}

impl std::fmt::Display for SearchResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} - {} (Last Modified: {})",
            self.file_name, self.display_text, self.last_modified
        )
    }
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("file is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),
    #[error("malformed XML: {0}")]
    Xml(#[from] roxmltree::Error),
}
