//! Reading configuration inputs and writing artifacts

use std::fs::{self, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;

use crate::{Error, Result};

/// Path argument that selects standard input.
pub const STDIN_PATH: &str = "-";

/// Read raw bytes from `path`, or from stdin when `path` is `-`.
pub fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    if path == Path::new(STDIN_PATH) {
        tracing::debug!("Reading configuration from stdin");
        let mut buf = Vec::new();
        std::io::stdin()
            .lock()
            .read_to_end(&mut buf)
            .map_err(|e| Error::io(STDIN_PATH, e))?;
        return Ok(buf);
    }

    tracing::debug!(?path, "Reading configuration");
    fs::read(path).map_err(|e| Error::io(path, e))
}

/// Read UTF-8 text from `path`, or from stdin when `path` is `-`.
pub fn read_text(path: &Path) -> Result<String> {
    let bytes = read_bytes(path)?;
    String::from_utf8(bytes).map_err(|_| Error::NotUtf8 {
        path: path.to_path_buf(),
    })
}

/// Write content atomically to a file with locking.
///
/// The content goes to a temporary sibling first and is renamed over the
/// target, so readers never observe a partially written artifact. On failure
/// the temporary sibling is removed.
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    let temp_path = temp_sibling(path);

    let written = write_temp(&temp_path, path, content)
        .and_then(|()| fs::rename(&temp_path, path).map_err(|e| Error::io(path, e)));
    if let Err(e) = written {
        // The temp file may not exist if opening it failed.
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }

    tracing::debug!(?path, bytes = content.len(), "Wrote artifact");
    Ok(())
}

fn write_temp(temp_path: &Path, path: &Path, content: &[u8]) -> Result<()> {
    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(temp_path)
        .map_err(|e| Error::io(temp_path, e))?;

    temp_file.lock_exclusive().map_err(|_| Error::LockFailed {
        path: path.to_path_buf(),
    })?;

    temp_file
        .write_all(content)
        .map_err(|e| Error::io(temp_path, e))?;
    temp_file.sync_all().map_err(|e| Error::io(temp_path, e))?;

    temp_file.unlock().map_err(|_| Error::LockFailed {
        path: path.to_path_buf(),
    })
}

/// Write text content to a file atomically.
pub fn write_text(path: &Path, content: &str) -> Result<()> {
    write_atomic(path, content.as_bytes())
}

fn temp_sibling(path: &Path) -> PathBuf {
    let temp_name = format!(
        ".{}.{}.tmp",
        path.file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default(),
        std::process::id()
    );
    path.with_file_name(temp_name)
}
