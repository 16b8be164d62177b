use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;

/// Where the remembered root folder lives: a one-line plain-text file under
/// the platform config directory.
pub fn default_folder_pref_path() -> PathBuf {
    let Some(dirs) = ProjectDirs::from("se", "johanandersson", "mmsearch") else {
        return Path::new("default_folder.txt").to_path_buf();
    };
    dirs.config_dir().join("default_folder.txt")
}

/// Load the previously chosen root folder, if any. A missing or empty
/// preference file is not an error.
pub fn load_default_folder(path: &Path) -> Option<PathBuf> {
    let contents = fs::read_to_string(path).ok()?;
    let line = contents.lines().next()?.trim();
    if line.is_empty() {
        return None;
    }
    Some(PathBuf::from(line))
}

pub fn save_default_folder(path: &Path, folder: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, format!("{}\n", folder.display()))
}
