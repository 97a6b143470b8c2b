//! Disk side of a download: temp `.part` file, atomic finalize, and the
//! overwrite-rename applied after a successful download.

mod dirs;
mod writer;

pub use dirs::CreatedDirs;
pub use writer::PartFile;

use std::io;
use std::path::{Path, PathBuf};

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Path for the temp file: appends `.part` to the final path (e.g. `lib.jar` → `lib.jar.part`).
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}

/// Moves `from` to `to`, deleting whatever already sits at `to` first.
pub fn replace_file(from: &Path, to: &Path) -> io::Result<()> {
    match std::fs::remove_file(to) {
        Ok(()) => tracing::debug!(path = %to.display(), "removed existing rename target"),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e),
    }
    std::fs::rename(from, to)
}
