//! Repository lock
//!
//! Mutating operations hold an exclusive lock on `.vcs/lock` for their whole
//! critical section, so two invocations cannot both read the same branch head
//! and race on updating it. Acquisition never blocks for longer than the
//! configured timeout.
//!
//! The file lock is a POSIX record lock, which is owned by the process: a
//! second attempt from the same process would be granted immediately. Holders
//! within one process are therefore serialized first through a per-path
//! mutex, and only then contend on the file with other processes.

use crate::errors::VcsError;
use anyhow::Context;
use file_guard::{FileGuard, Lock};
use std::collections::HashMap;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Name of the lock file inside the repository directory
pub const LOCK_FILE_NAME: &str = "lock";

/// Environment variable overriding the lock acquisition timeout
pub const LOCK_TIMEOUT_ENV: &str = "VCS_LOCK_TIMEOUT_MS";

pub const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_millis(2000);

const RETRY_INTERVAL: Duration = Duration::from_millis(25);

type ProcessLocks = std::sync::Mutex<HashMap<PathBuf, Arc<Mutex<()>>>>;

static PROCESS_LOCKS: OnceLock<ProcessLocks> = OnceLock::new();

/// Held repository lock, released on drop
pub struct RepositoryLock {
    path: PathBuf,
    // field order matters: the file lock is released before the in-process one
    _guard: FileGuard<Box<File>>,
    _process_guard: OwnedMutexGuard<()>,
}

impl RepositoryLock {
    /// Acquire the lock, retrying until `timeout` elapses
    ///
    /// Fails with `LockTimeout` if another holder, in this process or another
    /// one, keeps holding it.
    pub async fn acquire(path: &Path, timeout: Duration) -> anyhow::Result<Self> {
        let deadline = Instant::now() + timeout;
        let timed_out = || VcsError::LockTimeout(path.to_path_buf(), timeout.as_millis() as u64);

        // closing any descriptor of the lock file drops this process's record
        // lock on it, so the file is only opened while holding the mutex
        let process_guard = tokio::time::timeout(
            deadline.saturating_duration_since(Instant::now()),
            Self::process_mutex(path).lock_owned(),
        )
        .await
        .map_err(|_| timed_out())?;

        loop {
            let file = Self::open(path)?;

            match file_guard::try_lock(Box::new(file), Lock::Exclusive, 0, 1) {
                Ok(guard) => {
                    tracing::debug!(path = ?path, "repository lock acquired");
                    return Ok(RepositoryLock {
                        path: path.to_path_buf(),
                        _guard: guard,
                        _process_guard: process_guard,
                    });
                }
                Err(error) if Self::is_contended(&error) => {
                    if Instant::now() >= deadline {
                        return Err(timed_out().into());
                    }

                    tracing::debug!(path = ?path, "repository lock busy, retrying");
                    tokio::time::sleep(RETRY_INTERVAL).await;
                }
                Err(error) => {
                    return Err(error)
                        .with_context(|| format!("failed to lock repository at {:?}", path));
                }
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open(path: &Path) -> anyhow::Result<File> {
        std::fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)
            .with_context(|| format!("failed to open lock file at {:?}", path))
    }

    /// Mutex shared by every holder of `path` in this process
    ///
    /// Keyed by the canonical parent directory, which exists before the lock
    /// file does, so different spellings of one path share the mutex.
    fn process_mutex(path: &Path) -> Arc<Mutex<()>> {
        let key = match (path.parent(), path.file_name()) {
            (Some(parent), Some(name)) => parent
                .canonicalize()
                .map(|parent| parent.join(name))
                .unwrap_or_else(|_| path.to_path_buf()),
            _ => path.to_path_buf(),
        };
        let mut locks = PROCESS_LOCKS
            .get_or_init(Default::default)
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        Arc::clone(locks.entry(key).or_default())
    }

    fn is_contended(error: &std::io::Error) -> bool {
        matches!(
            error.kind(),
            std::io::ErrorKind::WouldBlock | std::io::ErrorKind::PermissionDenied
        )
    }
}

/// Lock timeout from `VCS_LOCK_TIMEOUT_MS`, or the default
pub fn timeout_from_env() -> Duration {
    std::env::var(LOCK_TIMEOUT_ENV)
        .ok()
        .and_then(|value| value.trim().parse::<u64>().ok())
        .map(Duration::from_millis)
        .unwrap_or(DEFAULT_LOCK_TIMEOUT)
}
