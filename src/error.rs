//! Error types for ezlock.
//!
//! Lock protocol violations are reported as [`LockError`]. Every other
//! filesystem fault stays an I/O error and is never folded into a lock kind.

use crate::exit_codes;
use std::path::PathBuf;
use thiserror::Error;

/// Kinds of lock protocol violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockErrorKind {
    NotLocked,
    AlreadyLocked,
    AlreadyReleased,
    NotOwner,
}

/// A violation of the lock protocol.
#[derive(Error, Debug)]
pub enum LockError {
    /// Ownership was checked on a lock file that does not exist.
    #[error("attempted to check ownership on lock that doesn't exist: {}", .0.display())]
    NotLocked(PathBuf),

    /// Acquire was called on a held lock without `force`.
    #[error("attempted to acquire an already locked lock: {}", .0.display())]
    AlreadyLocked(PathBuf),

    /// Release was called on a free lock with `rerelease` disabled.
    #[error("attempted to release an already released lock: {}", .0.display())]
    AlreadyReleased(PathBuf),

    /// Release was called by an instance that does not own the lock.
    #[error(
        "attempted to release a lock that isn't mine: {} (held by {owner}), use force to override",
        .path.display()
    )]
    NotOwner { path: PathBuf, owner: String },
}

impl LockError {
    /// The kind of violation, without the path details.
    pub fn kind(&self) -> LockErrorKind {
        match self {
            LockError::NotLocked(_) => LockErrorKind::NotLocked,
            LockError::AlreadyLocked(_) => LockErrorKind::AlreadyLocked,
            LockError::AlreadyReleased(_) => LockErrorKind::AlreadyReleased,
            LockError::NotOwner { .. } => LockErrorKind::NotOwner,
        }
    }
}

/// Main error type for ezlock operations.
#[derive(Error, Debug)]
pub enum EzlockError {
    /// The lock protocol was violated.
    #[error(transparent)]
    Lock(#[from] LockError),

    /// A filesystem operation failed for a reason unrelated to the protocol.
    #[error("I/O error on '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration.
    #[error("{0}")]
    Config(String),
}

impl EzlockError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        EzlockError::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns the lock kind if this is a protocol violation.
    pub fn lock_kind(&self) -> Option<LockErrorKind> {
        match self {
            EzlockError::Lock(e) => Some(e.kind()),
            _ => None,
        }
    }

    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            EzlockError::Lock(_) => exit_codes::LOCK_FAILURE,
            EzlockError::Io { .. } => exit_codes::IO_FAILURE,
            EzlockError::Config(_) => exit_codes::USER_ERROR,
        }
    }
}

/// Result type alias for ezlock operations.
pub type Result<T> = std::result::Result<T, EzlockError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lock_error_has_lock_exit_code() {
        let err: EzlockError = LockError::AlreadyLocked(PathBuf::from(".lock")).into();
        assert_eq!(err.exit_code(), exit_codes::LOCK_FAILURE);
        assert_eq!(err.lock_kind(), Some(LockErrorKind::AlreadyLocked));
    }

    #[test]
    fn io_error_is_not_a_lock_kind() {
        let err = EzlockError::io(
            "/nope/.lock",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.exit_code(), exit_codes::IO_FAILURE);
        assert_eq!(err.lock_kind(), None);
        assert!(err.to_string().contains("/nope/.lock"));
    }

    #[test]
    fn config_error_has_user_exit_code() {
        let err = EzlockError::Config("bad".to_string());
        assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
    }

    #[test]
    fn not_owner_message_names_the_holder() {
        let err = LockError::NotOwner {
            path: PathBuf::from("x.lock"),
            owner: "pid:1, obj:7".to_string(),
        };
        assert_eq!(err.kind(), LockErrorKind::NotOwner);
        let msg = err.to_string();
        assert!(msg.contains("x.lock"));
        assert!(msg.contains("pid:1, obj:7"));
    }
}
