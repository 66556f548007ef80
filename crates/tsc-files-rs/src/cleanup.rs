//! Temporary config file lifecycle.
//!
//! The temp tsconfig must disappear on every termination path: normal exit,
//! a caught HUP/INT/TERM, and — on Windows, where a killed process catches
//! nothing — through the detached watchdog chain spawned before the file is
//! even written.

use crate::process::spawn_detached;
use camino::{Utf8Path, Utf8PathBuf};
use std::process::Command;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

const TEMP_PREFIX: &str = "tmp-tsconfig-";
const INTERMEDIATE_BIN: &str = "tsc-files-intermediate";

/// A uniquely named temp config path, not yet written to disk.
#[derive(Debug, Clone)]
pub struct TempConfigFile {
    /// Path of the file, relative to the invoking process's cwd.
    pub path: Utf8PathBuf,
    /// Pid of the process responsible for deleting it.
    pub owner_pid: u32,
}

impl TempConfigFile {
    /// Reserves a name with a random suffix next to the base configuration.
    pub fn acquire(base_config_dir: &Utf8Path) -> Self {
        let suffix = uuid::Uuid::new_v4().simple().to_string();
        Self {
            path: base_config_dir.join(format!("{TEMP_PREFIX}{}.json", &suffix[..12])),
            owner_pid: std::process::id(),
        }
    }
}

/// One-shot deletion of the temp file, shared between the signal handlers,
/// the normal-exit path, and `Drop`.
struct TempFileCleaner {
    path: Utf8PathBuf,
    done: AtomicBool,
}

impl TempFileCleaner {
    /// Deletes the file if this is the first trigger; later triggers and an
    /// already-missing file are silent no-ops.
    fn run(&self) {
        if self.done.swap(true, Ordering::SeqCst) {
            return;
        }
        match std::fs::remove_file(&self.path) {
            Ok(()) => tracing::debug!(path = %self.path, "removed temp tsconfig"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(path = %self.path, error = %e, "failed to remove temp tsconfig"),
        }
    }
}

/// Cleanup subscription for one temp config file.
///
/// Deletes the file when dropped; on unix additionally installs
/// HUP/INT/TERM handlers that delete it and re-raise the conventional shell
/// exit code (129/130/143) so callers observe a stable status.
pub struct CleanupGuard {
    cleaner: Arc<TempFileCleaner>,
}

impl CleanupGuard {
    /// Registers cleanup for `path`. Must run inside a tokio runtime.
    pub fn register(path: Utf8PathBuf) -> Self {
        let cleaner = Arc::new(TempFileCleaner {
            path,
            done: AtomicBool::new(false),
        });

        #[cfg(unix)]
        {
            use tokio::signal::unix::{signal, SignalKind};

            let signals = [
                (SignalKind::hangup(), 129),
                (SignalKind::interrupt(), 130),
                (SignalKind::terminate(), 143),
            ];
            for (kind, exit_code) in signals {
                let cleaner = Arc::clone(&cleaner);
                tokio::spawn(async move {
                    let Ok(mut stream) = signal(kind) else {
                        return;
                    };
                    stream.recv().await;
                    cleaner.run();
                    std::process::exit(exit_code);
                });
            }
        }

        Self { cleaner }
    }

    /// Deletes the file now, on the normal-exit path.
    pub fn cleanup(&self) {
        self.cleaner.run();
    }
}

impl Drop for CleanupGuard {
    fn drop(&mut self) {
        self.cleaner.run();
    }
}

/// Hands the delete obligation to the detached watchdog chain.
///
/// Spawns the intermediate executable (expected next to the current one)
/// with the owner pid and temp path; it re-spawns the monitor and exits, so
/// the obligation survives a kill of the owner's whole process tree. Spawn
/// failure is non-fatal: the owner's own cleanup still covers the common
/// paths.
pub fn spawn_watchdog(temp: &TempConfigFile) {
    let exe = match std::env::current_exe() {
        Ok(exe) => exe,
        Err(e) => {
            tracing::warn!(error = %e, "cannot locate own executable; watchdog not started");
            return;
        }
    };
    let intermediate =
        exe.with_file_name(format!("{INTERMEDIATE_BIN}{}", std::env::consts::EXE_SUFFIX));

    let mut command = Command::new(intermediate);
    command
        .arg(temp.owner_pid.to_string())
        .arg(temp.path.as_str());

    match spawn_detached(command) {
        Ok(child) => tracing::debug!(pid = child.id(), "spawned watchdog intermediate"),
        Err(e) => tracing::warn!(error = %e, "failed to spawn watchdog intermediate"),
    }
}
