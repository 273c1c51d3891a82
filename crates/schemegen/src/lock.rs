//! Cross-process exclusion for generation jobs.
//!
//! Two runs against the same parameter file would compute the same targets and
//! race on the same output files. [`JobLock`] serializes them with an advisory
//! OS file lock on a file in the temp directory whose name is derived from the
//! absolute path of the parameter file. Runs against different parameter files
//! use different lock files and never wait on each other.
//!
//! The lock is held for as long as the guard lives and is released on drop.
//! If the process dies the OS releases it as well.
//!
//! Lock files are left in the temp directory after release, one per distinct
//! parameter file path. Unlinking on drop would let a waiter that already
//! opened the old file and a newcomer that creates a fresh one both hold "the"
//! lock. The files are empty and are cleaned up with the temp directory.
//!
//! ```rust,no_run
//! use std::path::Path;
//! use schemegen::{JobLock, DEFAULT_LOCK_TIMEOUT};
//!
//! let _guard = JobLock::acquire(Path::new("GeneratorParameters.json"), DEFAULT_LOCK_TIMEOUT)?;
//! // ... generate ...
//! # Ok::<(), schemegen::LockError>(())
//! ```

use std::collections::hash_map::DefaultHasher;
use std::fs::{File, OpenOptions, TryLockError};
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};

use crate::error::LockError;

/// How long [`JobLock::acquire`] callers wait by default.
pub const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_secs(10);

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Scoped guard for a named, system-wide job lock.
#[derive(Debug)]
pub struct JobLock {
    file: File,
    path: PathBuf,
}

impl JobLock {
    /// Acquires the lock for `key`, waiting at most `timeout`.
    pub fn acquire(key: &Path, timeout: Duration) -> Result<Self, LockError> {
        Self::acquire_in(&std::env::temp_dir(), key, timeout)
    }

    /// Like [`JobLock::acquire`], with the lock file placed in `dir`.
    pub fn acquire_in(dir: &Path, key: &Path, timeout: Duration) -> Result<Self, LockError> {
        let path = lock_file_path(dir, key);

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .map_err(|source| LockError::Io {
                path: path.clone(),
                source,
            })?;

        let started = Instant::now();
        let mut announced = false;

        loop {
            match file.try_lock() {
                Ok(()) => {
                    tracing::debug!(lock = %path.display(), "acquired generation lock");
                    return Ok(Self { file, path });
                }
                Err(TryLockError::WouldBlock) => {
                    let waited = started.elapsed();
                    if waited >= timeout {
                        return Err(LockError::Timeout {
                            key: key.to_path_buf(),
                            waited,
                        });
                    }
                    if !announced {
                        tracing::info!(key = %key.display(), "waiting for another instance to finish");
                        announced = true;
                    }
                    thread::sleep(POLL_INTERVAL.min(timeout - waited));
                }
                Err(TryLockError::Error(source)) => return Err(LockError::Io { path, source }),
            }
        }
    }
}

impl Drop for JobLock {
    fn drop(&mut self) {
        if let Err(e) = self.file.unlock() {
            tracing::warn!(lock = %self.path.display(), error = %e, "failed to release generation lock");
        }
    }
}

/// Lock file used for `key` inside `dir`.
pub fn lock_file_path(dir: &Path, key: &Path) -> PathBuf {
    let absolute = std::path::absolute(key).unwrap_or_else(|_| key.to_path_buf());
    let mut hasher = DefaultHasher::new();
    absolute.hash(&mut hasher);
    dir.join(format!("schemegen-{:016x}.lock", hasher.finish()))
}
