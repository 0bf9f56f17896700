//! Atomic file write helpers.
//!
//! Bytes go to a temp file in the destination directory, are synced, and the
//! temp file is renamed over the target. A reader sees either the old file
//! or the new one, never a partial write. The temp file is deleted if any
//! step fails.

use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

/// Write `bytes` to `path`, replacing any existing file.
pub fn atomic_write(path: impl AsRef<Path>, bytes: &[u8]) -> io::Result<()> {
    let path = path.as_ref();
    let tmp = write_temp(path, bytes)?;
    tmp.persist(path).map_err(|err| err.error)?;
    Ok(())
}

/// Write `bytes` to `path`, failing with [`io::ErrorKind::AlreadyExists`]
/// if the file already exists.
pub fn atomic_write_new(path: impl AsRef<Path>, bytes: &[u8]) -> io::Result<()> {
    let path = path.as_ref();
    let tmp = write_temp(path, bytes)?;
    tmp.persist_noclobber(path).map_err(|err| err.error)?;
    Ok(())
}

fn write_temp(path: &Path, bytes: &[u8]) -> io::Result<NamedTempFile> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(parent)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    Ok(tmp)
}
