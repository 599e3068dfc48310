//! Retention sweeper.
//!
//! Age-based deletion of transient files. Staged inputs and converted
//! artifacts are both disposable: anything older than the retention
//! window is removed regardless of origin or whether it was ever
//! downloaded. Safe to run concurrently with request handling; a file
//! vanishing between listing and deletion counts as already cleaned.

use std::path::{Path, PathBuf};
use std::time::Duration;

/// Delete regular files in `dir` whose modification time is older than
/// `max_age`. Returns the number of files removed. Errors on individual
/// entries are logged and skipped, never propagated.
pub fn sweep(dir: &Path, max_age: Duration) -> usize {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(dir = %dir.display(), error = %e, "Sweep could not read directory");
            return 0;
        }
    };

    let mut removed = 0;
    for entry in entries.flatten() {
        let path = entry.path();
        if !expired(&path, max_age) {
            continue;
        }
        match std::fs::remove_file(&path) {
            Ok(()) => {
                tracing::debug!(file = %path.display(), "Swept expired file");
                removed += 1;
            }
            // Deleted by a concurrent sweep or request: already cleaned.
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(file = %path.display(), error = %e, "Failed to sweep file");
            }
        }
    }
    removed
}

fn expired(path: &Path, max_age: Duration) -> bool {
    let Ok(metadata) = std::fs::metadata(path) else {
        return false;
    };
    if !metadata.is_file() {
        return false;
    }
    metadata
        .modified()
        .ok()
        .and_then(|mtime| mtime.elapsed().ok())
        .is_some_and(|age| age > max_age)
}

/// Background sweeper over the staging and output directories.
#[derive(Clone)]
pub struct RetentionSweeper {
    dirs: Vec<PathBuf>,
    max_age: Duration,
    interval: Duration,
}

impl RetentionSweeper {
    pub fn new(dirs: Vec<PathBuf>, max_age: Duration, interval: Duration) -> Self {
        Self {
            dirs,
            max_age,
            interval,
        }
    }

    /// Sweep all directories once.
    pub fn sweep_all(&self) -> usize {
        self.dirs.iter().map(|dir| sweep(dir, self.max_age)).sum()
    }

    /// Start the periodic sweep task. Returns a JoinHandle for graceful
    /// shutdown.
    pub fn start(self) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            let mut tick = tokio::time::interval(self.interval);
            // The first tick fires immediately; that initial sweep picks
            // up leftovers from a previous run.
            loop {
                tick.tick().await;
                let removed = self.sweep_all();
                if removed > 0 {
                    tracing::info!(removed, "Retention sweep completed");
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_sweep_removes_files_past_max_age() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("stale.bin"), b"x").unwrap();
        std::fs::write(dir.path().join("stale2.bin"), b"y").unwrap();

        // Zero max-age: any measurable age exceeds it.
        let removed = sweep(dir.path(), Duration::ZERO);
        assert_eq!(removed, 2);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_sweep_retains_fresh_files() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("fresh.bin"), b"x").unwrap();

        let removed = sweep(dir.path(), Duration::from_secs(3600));
        assert_eq!(removed, 0);
        assert!(dir.path().join("fresh.bin").exists());
    }

    #[test]
    fn test_sweep_ignores_subdirectories() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();

        let removed = sweep(dir.path(), Duration::ZERO);
        assert_eq!(removed, 0);
        assert!(dir.path().join("nested").exists());
    }

    #[test]
    fn test_sweep_missing_directory_is_noop() {
        let dir = TempDir::new().unwrap();
        let gone = dir.path().join("nonexistent");
        assert_eq!(sweep(&gone, Duration::ZERO), 0);
    }

    #[test]
    fn test_sweep_all_covers_every_directory() {
        let a = TempDir::new().unwrap();
        let b = TempDir::new().unwrap();
        std::fs::write(a.path().join("x"), b"x").unwrap();
        std::fs::write(b.path().join("y"), b"y").unwrap();

        let sweeper = RetentionSweeper::new(
            vec![a.path().to_path_buf(), b.path().to_path_buf()],
            Duration::ZERO,
            Duration::from_secs(300),
        );
        assert_eq!(sweeper.sweep_all(), 2);
    }
}
