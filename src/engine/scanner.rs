use crate::engine::types::MindMapFile;
use log::{debug, warn};
use std::path::Path;
use walkdir::WalkDir;

fn is_mind_map(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("mm"))
        .unwrap_or(false)
}

/// Enumerate candidate `.mm` files under `root`, most recently modified
/// first. A missing or unreadable root yields an empty list; the caller
/// reports "no files found".
pub fn scan_folder(root: &Path, include_subfolders: bool) -> Vec<MindMapFile> {
    if !root.is_dir() {
        warn!("root folder {:?} is not a directory", root);
        return Vec::new();
    }

    let max_depth = if include_subfolders { usize::MAX } else { 1 };
    let mut files = Vec::new();

    for entry in WalkDir::new(root).max_depth(max_depth) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("skipping unreadable entry under {:?}: {}", root, e);
                continue;
            }
        };

        if !entry.file_type().is_file() || !is_mind_map(entry.path()) {
            continue;
        }

        match MindMapFile::from_path(entry.path(), root) {
            Ok(file) => {
                // Zero-byte files cannot be valid XML
                if file.size == 0 {
                    debug!("skipping empty file {:?}", file.path);
                    continue;
                }
                files.push(file);
            }
            Err(e) => {
                warn!("failed to read metadata for {:?}: {}", entry.path(), e);
            }
        }
    }

    // Stable sort keeps directory enumeration order on mtime ties
    files.sort_by(|a, b| b.modified.cmp(&a.modified));
    files
}
