//! CLI argument parsing for the ezlock driver.
//!
//! The driver is a thin shell over [`ezlock::Lock`] that lets other processes
//! (and the cross-process tests) take and drop locks by path.

use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;

/// Take, drop and inspect file-presence locks.
#[derive(Parser, Debug)]
#[command(name = "ezlock")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path of the lock file.
    pub path: PathBuf,

    /// What to do with the lock.
    #[arg(value_enum)]
    pub action: Action,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    /// Acquire the lock, failing if it is already held.
    Lock,
    /// Release the lock regardless of owner.
    Unlock,
    /// Take the lock by force and release it when this process exits.
    Onexit,
    /// Take the lock by force, then register and deregister release on exit.
    Unonexit,
    /// Release the lock regardless of owner (wakes up waiters).
    Wait,
    /// Print whether the lock is held and by whom.
    Status,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
