use std::path::{Path, PathBuf};
use std::sync::{LazyLock, Mutex};
use tempfile::TempDir;

// The working directory is process-global; tests that change it take turns.
static CWD: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

/// Run `f` with `dir` as the working directory, restoring the previous one
/// afterwards (also when `f` panics).
pub(crate) fn in_current_dir<T>(dir: &Path, f: impl FnOnce() -> T) -> T {
    struct Restore(PathBuf);

    impl Drop for Restore {
        fn drop(&mut self) {
            let _ = std::env::set_current_dir(&self.0);
        }
    }

    let _turn = CWD.lock().unwrap_or_else(|poison| poison.into_inner());
    let _restore = Restore(std::env::current_dir().unwrap());
    std::env::set_current_dir(dir).unwrap();
    f()
}

/// A scratch directory and a lock path inside it that does not exist yet.
pub(crate) fn lock_path_in_tempdir() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("test.lock");
    (temp_dir, path)
}
