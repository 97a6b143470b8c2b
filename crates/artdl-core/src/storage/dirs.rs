//! Destination folder creation that can be undone if the download fails.

use std::io;
use std::path::{Path, PathBuf};

/// Directories created for one download, deepest first. Removed again on drop
/// unless `keep` was called.
#[derive(Debug)]
pub struct CreatedDirs {
    created: Vec<PathBuf>,
}

impl CreatedDirs {
    /// `create_dir_all(path)`, remembering which levels did not exist before.
    pub fn create(path: &Path) -> io::Result<Self> {
        let created: Vec<PathBuf> = path
            .ancestors()
            .take_while(|p| !p.as_os_str().is_empty() && !p.exists())
            .map(Path::to_path_buf)
            .collect();
        std::fs::create_dir_all(path)?;
        Ok(Self { created })
    }

    /// Leave the created directories in place.
    pub fn keep(mut self) {
        self.created.clear();
    }
}

impl Drop for CreatedDirs {
    fn drop(&mut self) {
        for dir in &self.created {
            // remove_dir only succeeds on empty directories; stop at the first
            // one that still holds something.
            if let Err(e) = std::fs::remove_dir(dir) {
                tracing::debug!(path = %dir.display(), "left destination folder in place: {}", e);
                break;
            }
            tracing::debug!(path = %dir.display(), "removed unused destination folder");
        }
    }
}
