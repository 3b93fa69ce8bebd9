//! ezlock: cooperative file-presence locks.
//!
//! A lock is the existence of a file at a known path. The holder writes its
//! identity (`pid:<pid>, obj:<id>`) into the file so any instance, in any
//! process on the same machine, can tell whether it owns the lock.
//!
//! ```no_run
//! use ezlock::Lock;
//!
//! let lock = Lock::new("build.lock");
//! lock.with(|| {
//!     // exclusive work
//! })?;
//! # Ok::<(), ezlock::EzlockError>(())
//! ```

pub mod config;
pub mod error;
pub mod exit_codes;
pub mod hooks;
pub mod lock;
pub mod logging;

#[cfg(test)]
mod test_support;

pub use config::Config;
pub use error::{EzlockError, LockError, LockErrorKind, Result};
pub use lock::{Identity, Lock, LockGuard};
