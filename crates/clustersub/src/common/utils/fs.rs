use std::path::{Path, PathBuf};

pub fn absolute_path(path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        match std::env::current_dir() {
            Ok(cwd) => cwd.join(path),
            Err(_) => path,
        }
    }
}

/// Creates `path` (including parents) unless it already exists.
/// Existing contents are left untouched.
pub fn ensure_directory(path: &Path) -> crate::Result<()> {
    if path.is_dir() {
        log::debug!("Directory {} already exists", path.display());
        return Ok(());
    }
    std::fs::create_dir_all(path)?;
    log::debug!("Created directory {}", path.display());
    Ok(())
}
