//! Crash-safe file replacement.

use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

/// Writes `content` to `path` atomically.
///
/// The content goes to a temporary file in the same directory, which is then
/// renamed over the target. Any reader sees either the fully-old or the
/// fully-new content, never a partial write, and a crash before the rename
/// leaves the original file untouched. The temporary file is removed on
/// failure (orphaned only if the process dies mid-sequence, which is
/// harmless).
pub fn atomic_write(path: &Path, content: &str) -> io::Result<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;

    Ok(())
}
