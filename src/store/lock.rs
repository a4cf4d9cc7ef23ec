//! Scoped exclusive file locking for backing files.
//!
//! Locks are advisory: they only serialize writers that acquire them, which
//! is every code path in this crate that touches a backing file. The lock
//! lives on a sidecar `<file>.lock` rather than the backing file itself,
//! because inserts replace the backing file by atomic rename and a lock on
//! the replaced inode would stop protecting anything. The sidecar is never
//! replaced, so the lock stays valid across inserts.
//!
//! Acquisition blocks with no timeout. A crashed or suspended holder stalls
//! all future writers indefinitely; this is a known limitation of the
//! design, not something this module papers over.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;

use fs2::FileExt;

/// An exclusive advisory lock on the sidecar lock file for `path`.
///
/// The lock is held for the lifetime of this value and released on drop,
/// on every exit path including unwinding.
#[derive(Debug)]
pub struct FileLock {
    file: File,
}

impl FileLock {
    /// Acquires the exclusive lock for `path`, blocking until it is free.
    ///
    /// Creates the sidecar lock file if it does not exist. The backing file
    /// itself is not touched.
    pub fn acquire_exclusive(path: &Path) -> io::Result<Self> {
        let lock_path = Self::lock_path(path);

        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .read(true)
            .write(true)
            .open(&lock_path)?;

        tracing::debug!(path = %lock_path.display(), "waiting for exclusive lock");
        file.lock_exclusive()?;
        tracing::debug!(path = %lock_path.display(), "acquired exclusive lock");

        Ok(Self { file })
    }

    /// The sidecar lock file path for a backing file.
    pub fn lock_path(path: &Path) -> std::path::PathBuf {
        let mut os = path.as_os_str().to_os_string();
        os.push(".lock");
        os.into()
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        // Errors on unlock are unreported; the OS releases the lock when
        // the descriptor closes anyway.
        let _ = fs2::FileExt::unlock(&self.file);
    }
}
