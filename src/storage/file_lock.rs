//! Advisory whole-file locking over the database directory (spec.md §5).
//! Adapted from the teacher's `storage::file_lock::FileLock`: same
//! `flock`-based approach, extended to the shared-vs-exclusive distinction
//! spec.md requires (concurrent readers, one exclusive writer) and made
//! non-blocking end to end (see SPEC_FULL.md §7, open question 4).

use std::fs::{File, OpenOptions};
use std::os::unix::io::AsRawFd;

use libc::{flock, LOCK_EX, LOCK_NB, LOCK_SH, LOCK_UN};

use crate::error::{Error, ErrorKind, Result};
use crate::storage::layout::Layout;

pub struct FileLock {
    file: File,
}

impl FileLock {
    /// Acquire a shared (reader) or exclusive (writer) lock on
    /// `layout.lock_path()`, creating the lock file if it does not exist.
    /// Non-blocking: if the lock is already held incompatibly, returns an
    /// `Io` error rather than waiting.
    pub fn acquire(layout: &Layout, exclusive: bool) -> Result<Self> {
        let lock_path = layout.lock_path();
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .open(&lock_path)?;

        let fd = file.as_raw_fd();
        let operation = (if exclusive { LOCK_EX } else { LOCK_SH }) | LOCK_NB;

        let rc = unsafe { flock(fd, operation) };
        if rc != 0 {
            return Err(Error::new(
                ErrorKind::Io,
                format!(
                    "failed to acquire {} lock on {}",
                    if exclusive { "exclusive" } else { "shared" },
                    lock_path.display(),
                ),
            ));
        }

        Ok(FileLock { file })
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        let fd = self.file.as_raw_fd();
        unsafe {
            flock(fd, LOCK_UN);
        }
    }
}
