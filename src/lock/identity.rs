//! Ownership tokens written into lock files.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_INSTANCE: AtomicU64 = AtomicU64::new(1);

/// Identity of one `Lock` instance.
///
/// Rendered as `pid:<pid>, obj:<instance>`. The pid is read each time it is
/// rendered, so a forked child never claims its parent's locks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Identity {
    instance: u64,
}

impl Identity {
    /// Allocate a fresh identity, unique within this process.
    pub(crate) fn next() -> Self {
        Self {
            instance: NEXT_INSTANCE.fetch_add(1, Ordering::Relaxed),
        }
    }

    pub fn instance(&self) -> u64 {
        self.instance
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pid:{}, obj:{}", std::process::id(), self.instance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_includes_pid_and_instance() {
        let id = Identity::next();
        assert_eq!(
            id.to_string(),
            format!("pid:{}, obj:{}", std::process::id(), id.instance())
        );
    }

    #[test]
    fn identities_never_repeat() {
        let a = Identity::next();
        let b = Identity::next();
        assert_ne!(a, b);
        assert_ne!(a.to_string(), b.to_string());
    }
}
