//! The `Lock` type and its acquire/release/wait operations.

use super::identity::Identity;
use crate::config::Config;
use crate::error::{EzlockError, LockError, Result};
use crate::hooks::{self, HookToken};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

/// Lock file used when no path is given.
pub const DEFAULT_LOCK_PATH: &str = ".lock";

/// How long `wait` sleeps between checks unless told otherwise.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Path plus identity. This is all the state the protocol needs, and it is
/// what an exit hook captures.
#[derive(Debug, Clone)]
struct LockFile {
    path: PathBuf,
    identity: Identity,
}

impl LockFile {
    fn is_locked(&self) -> bool {
        self.path.exists()
    }

    fn read_owner(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(EzlockError::io(&self.path, e)),
        }
    }

    fn is_mine(&self) -> Result<bool> {
        match self.read_owner()? {
            Some(owner) => Ok(owner == self.identity.to_string()),
            None => Err(LockError::NotLocked(self.path.clone()).into()),
        }
    }

    fn acquire(&self, force: bool) -> Result<()> {
        if self.is_locked() && !force {
            return Err(LockError::AlreadyLocked(self.path.clone()).into());
        }

        let name = self.identity.to_string();
        fs::write(&self.path, &name).map_err(|e| EzlockError::io(&self.path, e))?;
        tracing::debug!(path = %self.path.display(), %name, force, "acquired lock");
        Ok(())
    }

    fn release(&self, force: bool, rerelease: bool) -> Result<Option<String>> {
        // A file that vanishes between the existence check and the read
        // is treated the same as one that was never there.
        let owner = if self.is_locked() {
            self.read_owner()?
        } else {
            None
        };
        let Some(owner) = owner else {
            if !rerelease {
                return Err(LockError::AlreadyReleased(self.path.clone()).into());
            }
            tracing::trace!(path = %self.path.display(), "lock already released");
            return Ok(None);
        };

        if !force && owner != self.identity.to_string() {
            return Err(LockError::NotOwner {
                path: self.path.clone(),
                owner,
            }
            .into());
        }

        fs::remove_file(&self.path).map_err(|e| EzlockError::io(&self.path, e))?;
        tracing::debug!(path = %self.path.display(), %owner, force, "released lock");
        Ok(Some(owner))
    }
}

/// A cooperative lock backed by the presence of a file.
///
/// The lock is held while a file exists at [`Lock::path`]; its content is the
/// identity of the instance that last acquired it. Nothing is cached in
/// memory, so every instance pointing at the same path (in any process)
/// observes the same state.
///
/// Checks and writes are not atomic: two instances racing through
/// [`Lock::acquire`] can both succeed, and the later write owns the lock.
#[derive(Debug)]
pub struct Lock {
    file: LockFile,
    poll_interval: Duration,
    exit_hook: Option<HookToken>,
}

impl Default for Lock {
    fn default() -> Self {
        Self::new(DEFAULT_LOCK_PATH)
    }
}

impl Lock {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            file: LockFile {
                path: path.into(),
                identity: Identity::next(),
            },
            poll_interval: DEFAULT_POLL_INTERVAL,
            exit_hook: None,
        }
    }

    /// Create a lock and immediately apply [`Lock::set_release_on_exit`].
    pub fn with_release_on_exit<P: Into<PathBuf>>(path: P, release_on_exit: bool) -> Self {
        let mut lock = Self::new(path);
        lock.set_release_on_exit(release_on_exit);
        lock
    }

    pub fn from_config(config: &Config) -> Self {
        let mut lock = Self::with_release_on_exit(config.path.clone(), config.release_on_exit);
        lock.poll_interval = config.poll_interval();
        lock
    }

    pub fn path(&self) -> &Path {
        &self.file.path
    }

    pub fn identity(&self) -> Identity {
        self.file.identity
    }

    /// The text written into the lock file to prove ownership.
    pub fn name(&self) -> String {
        self.file.identity.to_string()
    }

    /// Does the lock file exist?
    pub fn is_locked(&self) -> bool {
        self.file.is_locked()
    }

    /// Was the lock file written by this instance?
    ///
    /// Fails with [`LockError::NotLocked`] if there is no lock file.
    pub fn is_mine(&self) -> Result<bool> {
        self.file.is_mine()
    }

    /// Current content of the lock file, or `None` when unlocked.
    pub fn owner(&self) -> Result<Option<String>> {
        self.file.read_owner()
    }

    /// Create the lock file and stamp it with this instance's name.
    ///
    /// With `force`, an existing lock is overwritten and ownership moves to
    /// this instance.
    pub fn acquire(&self, force: bool) -> Result<()> {
        self.file.acquire(force)
    }

    /// Remove the lock file and return the name that was in it.
    ///
    /// # Arguments
    ///
    /// * `force` - release even if the lock belongs to someone else
    /// * `rerelease` - when `true`, releasing a free lock returns `Ok(None)`
    ///   instead of [`LockError::AlreadyReleased`]
    pub fn release(&self, force: bool, rerelease: bool) -> Result<Option<String>> {
        self.file.release(force, rerelease)
    }

    /// `release(false, true)`.
    pub fn release_default(&self) -> Result<Option<String>> {
        self.release(false, true)
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    pub fn set_poll_interval(&mut self, interval: Duration) {
        self.poll_interval = interval;
    }

    /// Block until the lock file disappears, polling at [`Lock::poll_interval`].
    pub fn wait(&self) {
        self.wait_with_interval(self.poll_interval);
    }

    /// Block until the lock file disappears.
    ///
    /// There is no timeout; the only way out while the lock is held is
    /// terminating the thread or process.
    pub fn wait_with_interval(&self, interval: Duration) {
        tracing::trace!(path = %self.path().display(), ?interval, "waiting for lock");
        while self.is_locked() {
            thread::sleep(interval);
        }
    }

    pub fn release_on_exit(&self) -> bool {
        self.exit_hook.is_some()
    }

    /// Register (or deregister) `release(false, true)` as a process exit hook.
    ///
    /// The hook runs automatically at normal process exit (when `main`
    /// returns or on `std::process::exit`). It keeps its own copy of the path
    /// and identity, so it still runs after this `Lock` is dropped. Exit-time
    /// failures follow normal release rules and are logged by the hook
    /// registry.
    pub fn set_release_on_exit(&mut self, release_on_exit: bool) {
        match (release_on_exit, self.exit_hook) {
            (true, None) => {
                let file = self.file.clone();
                let token = hooks::register(move || file.release(false, true).map(|_| ()));
                tracing::debug!(path = %self.path().display(), ?token, "registered release on exit");
                self.exit_hook = Some(token);
            }
            (false, Some(token)) => {
                hooks::unregister(token);
                tracing::debug!(path = %self.path().display(), ?token, "deregistered release on exit");
                self.exit_hook = None;
            }
            _ => {}
        }
    }

    #[cfg(test)]
    pub(crate) fn exit_hook(&self) -> Option<HookToken> {
        self.exit_hook
    }
}

impl From<&Lock> for bool {
    fn from(lock: &Lock) -> bool {
        lock.is_locked()
    }
}
