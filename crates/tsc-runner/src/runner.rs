//! tsc subprocess invocation.

use camino::{Utf8Path, Utf8PathBuf};
use std::process::Stdio;
use thiserror::Error;
use tokio::process::Command;

/// Error types for the tsc runner.
#[derive(Debug, Error)]
pub enum TscError {
    /// Failed to spawn tsc.
    #[error("failed to spawn tsc: {0}")]
    SpawnFailed(#[from] std::io::Error),
}

/// Normalized outcome of one compiler invocation.
///
/// A non-zero `exit_code` is not an error of this crate: the compiler
/// conventionally exits 2 when it reports type errors, with the diagnostic
/// text on stdout.
#[derive(Debug, Clone, Default)]
pub struct SpawnResult {
    /// Process id of the spawned compiler, when it started at all.
    pub pid: Option<u32>,
    /// The compiler's exit code; -1 when the process died without one.
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

/// Returns whether the workspace resolves dependencies through Yarn PnP.
///
/// PnP keeps no `node_modules/.bin` on disk, so the compiler must be reached
/// through the package manager's run mechanism.
pub fn uses_pnp(workspace_root: &Utf8Path) -> bool {
    workspace_root.join(".pnp.cjs").exists()
}

/// Resolves the tsc binary for a workspace.
///
/// Search order:
/// 1. Workspace `node_modules/.bin/tsc` (`.cmd` on Windows)
/// 2. System PATH
///
/// Falls back to the workspace path when neither exists, so a missing binary
/// surfaces as a spawn error rather than a silent substitute.
pub fn tsc_binary_path(workspace_root: &Utf8Path) -> Utf8PathBuf {
    let suffix = if cfg!(windows) { ".cmd" } else { "" };
    let local = workspace_root.join(format!("node_modules/.bin/tsc{suffix}"));
    if local.exists() {
        return local;
    }

    if let Ok(path) = which::which("tsc") {
        if let Ok(utf8_path) = Utf8PathBuf::try_from(path) {
            tracing::debug!(path = %utf8_path, "using tsc from PATH");
            return utf8_path;
        }
    }

    local
}

/// Runs tsc with the given arguments and captures its output.
///
/// Resolves with a [`SpawnResult`] once the process exits; fails with
/// [`TscError::SpawnFailed`] only when the process could not be started at
/// all (binary missing or not executable).
pub async fn run_tsc(
    args: &[String],
    workspace_root: &Utf8Path,
    is_pnp: bool,
) -> Result<SpawnResult, TscError> {
    let mut command = if is_pnp {
        let mut command = Command::new("yarn");
        command.arg("tsc");
        command
    } else {
        Command::new(tsc_binary_path(workspace_root))
    };

    let child = command
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    let pid = child.id();
    tracing::debug!(?pid, "spawned tsc");

    let output = child.wait_with_output().await?;

    Ok(SpawnResult {
        pid,
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn utf8_tempdir() -> (tempfile::TempDir, Utf8PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::try_from(dir.path().to_path_buf()).unwrap();
        (dir, path)
    }

    #[test]
    fn test_uses_pnp() {
        let (_dir, root) = utf8_tempdir();
        assert!(!uses_pnp(&root));

        std::fs::write(root.join(".pnp.cjs"), "").unwrap();
        assert!(uses_pnp(&root));
    }

    #[test]
    fn test_tsc_binary_path_prefers_workspace() {
        let (_dir, root) = utf8_tempdir();
        let bin_dir = root.join("node_modules/.bin");
        std::fs::create_dir_all(&bin_dir).unwrap();
        let suffix = if cfg!(windows) { ".cmd" } else { "" };
        let local = bin_dir.join(format!("tsc{suffix}"));
        std::fs::write(&local, "").unwrap();

        assert_eq!(tsc_binary_path(&root), local);
    }

    #[cfg(unix)]
    mod unix {
        use super::*;
        use pretty_assertions::assert_eq;
        use std::os::unix::fs::PermissionsExt;

        fn write_stub_tsc(root: &Utf8Path, script: &str) {
            let bin_dir = root.join("node_modules/.bin");
            std::fs::create_dir_all(&bin_dir).unwrap();
            let tsc = bin_dir.join("tsc");
            std::fs::write(&tsc, script).unwrap();
            std::fs::set_permissions(&tsc, std::fs::Permissions::from_mode(0o755)).unwrap();
        }

        #[tokio::test]
        async fn test_run_tsc_relays_output_and_exit_code() {
            let (_dir, root) = utf8_tempdir();
            write_stub_tsc(
                &root,
                "#!/bin/sh\necho \"error TS2322: mock diagnostic\"\necho \"noise\" >&2\nexit 2\n",
            );

            let args = vec!["--noEmit".to_string()];
            let result = run_tsc(&args, &root, false).await.unwrap();

            assert!(result.pid.is_some());
            assert_eq!(result.exit_code, 2);
            assert_eq!(result.stdout, "error TS2322: mock diagnostic\n");
            assert_eq!(result.stderr, "noise\n");
        }

        #[tokio::test]
        async fn test_run_tsc_forwards_arguments_in_order() {
            let (_dir, root) = utf8_tempdir();
            write_stub_tsc(&root, "#!/bin/sh\nfor a in \"$@\"; do echo \"$a\"; done\n");

            let args = vec![
                "-p".to_string(),
                "tmp.json".to_string(),
                "--noEmit".to_string(),
            ];
            let result = run_tsc(&args, &root, false).await.unwrap();

            assert_eq!(result.exit_code, 0);
            assert_eq!(result.stdout, "-p\ntmp.json\n--noEmit\n");
        }

        #[tokio::test]
        async fn test_run_tsc_surfaces_spawn_failure() {
            let (_dir, root) = utf8_tempdir();
            // A present but non-executable file fails at spawn, not at exit.
            let bin_dir = root.join("node_modules/.bin");
            std::fs::create_dir_all(&bin_dir).unwrap();
            std::fs::write(bin_dir.join("tsc"), "not a binary").unwrap();

            let args: Vec<String> = Vec::new();
            let err = run_tsc(&args, &root, false).await.unwrap_err();

            assert!(matches!(err, TscError::SpawnFailed(_)));
        }
    }
}
