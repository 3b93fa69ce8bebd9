//! Exit code constants for the ezlock driver.
//!
//! - 0: Success
//! - 1: User error (bad config, invalid arguments)
//! - 2: Filesystem failure outside the lock protocol
//! - 3: Lock protocol failure (already locked, not owner, ...)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments or invalid configuration.
pub const USER_ERROR: i32 = 1;

/// I/O failure: permission denied, invalid path, disk full.
pub const IO_FAILURE: i32 = 2;

/// Lock failure: one of the `LockError` kinds.
pub const LOCK_FAILURE: i32 = 3;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct() {
        let codes = [SUCCESS, USER_ERROR, IO_FAILURE, LOCK_FAILURE];
        for (i, &a) in codes.iter().enumerate() {
            for (j, &b) in codes.iter().enumerate() {
                if i != j {
                    assert_ne!(a, b, "Exit codes must be distinct");
                }
            }
        }
    }

    #[test]
    fn success_is_zero() {
        assert_eq!(SUCCESS, 0);
    }
}
