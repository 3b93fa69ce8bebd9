//! Scoped use of a lock.

use super::operations::Lock;
use crate::error::Result;

/// Holds a lock for the duration of a scope.
///
/// When dropped, the lock is released with default arguments. `Drop` cannot
/// return errors, so a failed release (for example, another instance forced
/// the lock away) is logged as a warning. Use [`LockGuard::release`] to see
/// the error instead.
#[derive(Debug)]
pub struct LockGuard<'a> {
    lock: &'a Lock,

    /// Whether the lock has been released manually.
    released: bool,
}

impl<'a> LockGuard<'a> {
    pub fn lock(&self) -> &'a Lock {
        self.lock
    }

    /// Release now and report the outcome.
    pub fn release(mut self) -> Result<Option<String>> {
        self.released = true;
        self.lock.release_default()
    }
}

impl Drop for LockGuard<'_> {
    fn drop(&mut self) {
        if !self.released
            && let Err(e) = self.lock.release_default()
        {
            tracing::warn!(
                path = %self.lock.path().display(),
                "failed to release lock at end of scope: {}",
                e
            );
        }
    }
}

impl Lock {
    /// Acquire (without force) and return a guard that releases on drop.
    pub fn scoped(&self) -> Result<LockGuard<'_>> {
        self.acquire(false)?;
        Ok(LockGuard {
            lock: self,
            released: false,
        })
    }

    /// Run `f` while holding the lock.
    ///
    /// The lock is released on every exit path, including panics. If the
    /// release itself fails, that error is returned and `f`'s value is lost.
    pub fn with<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce() -> T,
    {
        let guard = self.scoped()?;
        let value = f();
        guard.release()?;
        Ok(value)
    }
}
