//! ezlock driver.
//!
//! Parses arguments, performs one action on the lock at the given path, and
//! maps errors to exit codes. Exit hooks registered along the way run from
//! the process `atexit` handler once `main` returns.

mod cli;

use cli::{Action, Cli};
use ezlock::{Lock, Result, exit_codes, logging};
use std::process::ExitCode;

fn run(cli: &Cli) -> Result<()> {
    let mut lock = Lock::new(&cli.path);

    match cli.action {
        Action::Lock => lock.acquire(false)?,
        Action::Unlock | Action::Wait => {
            lock.release(true, true)?;
        }
        Action::Onexit => {
            lock.acquire(true)?;
            lock.set_release_on_exit(true);
        }
        Action::Unonexit => {
            lock.acquire(true)?;
            lock.set_release_on_exit(true);
            lock.set_release_on_exit(false);
        }
        Action::Status => match lock.owner()? {
            Some(owner) => println!("locked by {}", owner),
            None => println!("unlocked"),
        },
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse_args();
    logging::init(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::from(err.exit_code() as u8)
        }
    }
}
