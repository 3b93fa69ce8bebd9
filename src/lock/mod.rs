//! File-presence locks.
//!
//! A lock is held while a file exists at a known path. Whoever holds it
//! proves ownership by writing its identity into the file:
//!
//! ```text
//! pid:4242, obj:7
//! ```
//!
//! The format is plain text so any tool can inspect ownership with `cat`.
//!
//! # Guarantees
//!
//! Cooperative only. There is no exclusive create, no lease expiry and no
//! fairness between waiters. A crashed owner leaves a stale lock behind,
//! which has to be cleared with a forced release.
//!
//! # Scoped use
//!
//! [`Lock::scoped`] returns a [`LockGuard`] that releases the lock when
//! dropped, and [`Lock::with`] runs a closure inside such a scope.

mod guard;
mod identity;
mod operations;


pub use guard::LockGuard;
pub use identity::Identity;
pub use operations::{DEFAULT_LOCK_PATH, DEFAULT_POLL_INTERVAL, Lock};
