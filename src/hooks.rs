//! Process exit hooks.
//!
//! The first registration installs a C `atexit` handler that drains the
//! process-wide registry, so hooks fire when `main` returns or the process
//! calls `std::process::exit`. Aborts and fatal signals skip them.
//!
//! The registry can also be drained early with [`run_exit_hooks`], or by
//! dropping the [`ShutdownGuard`] from [`install`], which also covers
//! unwinding out of `main`. Draining twice is harmless: hooks run once.
//!
//! Failures raised by a hook are logged at `warn` and swallowed so that one
//! failing hook never stops the rest of the shutdown sequence.

use crate::error::Result;
use std::collections::BTreeMap;
use std::sync::{LazyLock, Mutex, MutexGuard, Once};

type Hook = Box<dyn FnOnce() -> Result<()> + Send>;

/// Handle for a registered hook, used to deregister it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HookToken(u64);

/// An ordered set of exit callbacks.
#[derive(Default)]
pub struct ExitHooks {
    next: u64,
    hooks: BTreeMap<HookToken, Hook>,
}

impl std::fmt::Debug for ExitHooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExitHooks")
            .field("tokens", &self.hooks.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl ExitHooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback and return the token that identifies it.
    pub fn register<F>(&mut self, hook: F) -> HookToken
    where
        F: FnOnce() -> Result<()> + Send + 'static,
    {
        let token = HookToken(self.next);
        self.next += 1;
        self.hooks.insert(token, Box::new(hook));
        token
    }

    /// Remove a callback. Returns `false` if the token was not registered.
    pub fn unregister(&mut self, token: HookToken) -> bool {
        self.hooks.remove(&token).is_some()
    }

    pub fn contains(&self, token: HookToken) -> bool {
        self.hooks.contains_key(&token)
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Drain the registry, running hooks newest first.
    ///
    /// Returns the number of hooks that failed.
    pub fn run_all(&mut self) -> usize {
        let hooks = std::mem::take(&mut self.hooks);
        let mut failures = 0;
        for (token, hook) in hooks.into_iter().rev() {
            tracing::debug!(?token, "running exit hook");
            if let Err(e) = hook() {
                failures += 1;
                tracing::warn!(?token, "exit hook failed: {}", e);
            }
        }
        failures
    }
}

static EXIT_HOOKS: LazyLock<Mutex<ExitHooks>> = LazyLock::new(|| Mutex::new(ExitHooks::new()));

fn global() -> MutexGuard<'static, ExitHooks> {
    EXIT_HOOKS.lock().unwrap_or_else(|poison| poison.into_inner())
}

static AT_EXIT: Once = Once::new();

extern "C" fn run_at_exit() {
    // Unwinding out of an `extern "C"` fn aborts the process.
    let _ = std::panic::catch_unwind(run_exit_hooks);
}

fn install_at_exit() {
    AT_EXIT.call_once(|| {
        // SAFETY: `run_at_exit` is a plain function with no captured state.
        if unsafe { libc::atexit(run_at_exit) } != 0 {
            tracing::warn!("failed to install atexit handler; exit hooks need a ShutdownGuard");
        }
    });
}

/// Register a hook with the process-wide registry.
///
/// The hook runs at normal process exit unless it is unregistered first.
pub fn register<F>(hook: F) -> HookToken
where
    F: FnOnce() -> Result<()> + Send + 'static,
{
    install_at_exit();
    global().register(hook)
}

/// Remove a hook from the process-wide registry.
pub fn unregister(token: HookToken) -> bool {
    global().unregister(token)
}

pub fn is_registered(token: HookToken) -> bool {
    global().contains(token)
}

/// Run and drain every process-wide hook. Returns the number of failures.
pub fn run_exit_hooks() -> usize {
    // Take the hooks out first so a hook may itself touch the registry.
    // The token counter stays behind so old tokens are never reissued.
    let mut pending = {
        let mut registry = global();
        ExitHooks {
            next: registry.next,
            hooks: std::mem::take(&mut registry.hooks),
        }
    };
    pending.run_all()
}

/// Runs the process-wide hooks when dropped.
#[derive(Debug)]
#[must_use = "hooks run when the guard is dropped"]
pub struct ShutdownGuard {
    _private: (),
}

/// Create the guard `main` holds for the lifetime of the program.
pub fn install() -> ShutdownGuard {
    ShutdownGuard { _private: () }
}

impl Drop for ShutdownGuard {
    fn drop(&mut self) {
        run_exit_hooks();
    }
}
