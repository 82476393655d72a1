//! Atomic file operations so a reader never sees a half-written certificate

use catrust_core::{Error, Result};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;
use uuid::Uuid;

/// Write data to a file atomically by writing to a temporary file and renaming
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    let parent = path.parent().ok_or_else(|| {
        Error::configuration("Invalid file path: no parent directory".to_string())
    })?;

    // Ensure parent directory exists
    fs::create_dir_all(parent)
        .map_err(|e| Error::file_system(parent.to_path_buf(), "create parent directory", e))?;

    // Create temporary file in the same directory to ensure atomic rename
    let temp_name = format!(".{}.tmp", Uuid::new_v4());
    let temp_path = parent.join(&temp_name);

    // Write to temporary file
    let result = (|| -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&temp_path)
            .map_err(|e| Error::file_system(&temp_path, "create temporary file", e))?;

        file.write_all(content)
            .map_err(|e| Error::file_system(&temp_path, "write to temporary file", e))?;

        file.sync_all()
            .map_err(|e| Error::file_system(&temp_path, "sync temporary file", e))?;

        Ok(())
    })();

    // If writing failed, clean up temp file
    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
        return result;
    }

    // Atomic rename
    fs::rename(&temp_path, path).map_err(|e| {
        // Clean up on failure
        let _ = fs::remove_file(&temp_path);
        Error::file_system(path.to_path_buf(), "atomic rename", e)
    })?;

    Ok(())
}

/// Write atomically, then set unix permission bits on the renamed file
#[cfg(unix)]
pub fn write_atomic_with_mode(path: &Path, content: &[u8], mode: u32) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    write_atomic(path, content)?;
    fs::set_permissions(path, fs::Permissions::from_mode(mode))
        .map_err(|e| Error::file_system(path.to_path_buf(), "set permissions", e))
}

#[cfg(not(unix))]
pub fn write_atomic_with_mode(path: &Path, content: &[u8], _mode: u32) -> Result<()> {
    write_atomic(path, content)
}
