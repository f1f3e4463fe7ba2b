// src/output/writer.rs
//! The only place where result files are written.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Writes `content` to `path` so readers see either the old file or the
/// complete new one, never a partial write.
///
/// The content goes to a sibling temporary file first, which is then renamed
/// over the target. Missing parent directories are created. On failure the
/// temporary file is removed and the target is left untouched.
pub fn write_atomically(path: &Path, content: &str) -> io::Result<usize> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let tmp_path = temporary_path(path);
    log::debug!("Writing {} bytes to {}", content.len(), tmp_path.display());

    if let Err(e) = fs::write(&tmp_path, content) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e);
    }

    #[cfg(target_os = "windows")]
    if path.exists() {
        fs::remove_file(path)?;
    }

    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e);
    }

    log::debug!("Wrote file: {}", path.display());
    Ok(content.len())
}

/// `posts.json` → `posts.json.tmp`, in the same directory as the target.
pub fn temporary_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
