//! Per-invocation orchestration.
//!
//! `Start -> Classify -> {Error, NoFiles, Files}`; the no-files path forwards
//! the argument list to tsc untouched, the files path synthesizes a temp
//! tsconfig, runs `tsc -p <temp>`, and deletes the temp file again.

use crate::classify::{classify, UsageError};
use crate::cleanup::{spawn_watchdog, CleanupGuard, TempConfigFile};
use crate::paths::{relative_from_dir, relative_to};
use crate::resolver::{find_nearest_tsconfig, find_workspace_root};
use camino::{Utf8Path, Utf8PathBuf};
use thiserror::Error;
use tsc_runner::{run_tsc, uses_pnp, SpawnResult, TscError};
use tsconfig_rewrite::{rewrite, to_json_pretty, RewriteError};

/// Everything that aborts an invocation before a type-check result exists.
///
/// All variants map to exit code 1; a non-zero compiler exit is a successful
/// invocation, not an error.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Usage(#[from] UsageError),

    #[error("Error: Missing package.json file.\nPlease ensure that your project directory contains a package.json file to manage dependencies and configurations.")]
    MissingManifest,

    #[error("Can't find tsconfig.json from the current working directory or level(s) up.")]
    ConfigNotFound,

    #[error("Can't find {0}")]
    ConfigMissing(Utf8PathBuf),

    #[error(transparent)]
    Rewrite(#[from] RewriteError),

    #[error("failed to read {path}: {source}")]
    ReadFailed {
        path: Utf8PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    WriteFailed {
        path: Utf8PathBuf,
        source: std::io::Error,
    },

    #[error("failed to resolve current directory: {0}")]
    CurrentDir(std::io::Error),

    #[error(transparent)]
    Tsc(#[from] TscError),
}

/// Runs one invocation to completion.
pub async fn run(args: Vec<String>) -> Result<SpawnResult, AppError> {
    let classified = classify(&args)?;

    let cwd = std::env::current_dir()
        .map_err(AppError::CurrentDir)
        .and_then(|dir| {
            Utf8PathBuf::try_from(dir)
                .map_err(|e| AppError::CurrentDir(std::io::Error::other(e)))
        })?;

    let workspace_root = find_workspace_root(&cwd).ok_or(AppError::MissingManifest)?;
    let is_pnp = uses_pnp(&workspace_root);
    tracing::debug!(root = %workspace_root, is_pnp, "resolved workspace");

    if classified.source_files.is_empty() {
        // No explicit files: hand the whole argument list to tsc untouched.
        return Ok(run_tsc(&args, &workspace_root, is_pnp).await?);
    }

    let tsconfig = match classified.project_flag_index {
        Some(index) => {
            let value = Utf8Path::new(&args[index + 1]);
            let relative = relative_to(&cwd, &cwd.join(value));
            if !cwd.join(&relative).exists() {
                return Err(AppError::ConfigMissing(relative));
            }
            relative
        }
        None => find_nearest_tsconfig(&cwd, &workspace_root).ok_or(AppError::ConfigNotFound)?,
    };
    tracing::debug!(tsconfig = %tsconfig, "using base configuration");

    let temp = TempConfigFile::acquire(tsconfig.parent().unwrap_or(Utf8Path::new("")));
    let guard = CleanupGuard::register(temp.path.clone());

    let raw = std::fs::read_to_string(&tsconfig).map_err(|source| AppError::ReadFailed {
        path: tsconfig.clone(),
        source,
    })?;

    // Relativize to the temp file's directory so the binary works from any
    // cwd, and fold in discovered declaration files.
    let temp_dir = temp.path.parent().unwrap_or(Utf8Path::new(""));
    let mut resolved_files: Vec<String> = Vec::new();
    for file in classified
        .source_files
        .iter()
        .chain(classified.declaration_files.iter())
    {
        let relative = relative_from_dir(&cwd, temp_dir, Utf8Path::new(file)).into_string();
        if !resolved_files.contains(&relative) {
            resolved_files.push(relative);
        }
    }

    let config = rewrite(&raw, &resolved_files)?;

    // Windows delivers no signal to a killed process, so the delete
    // obligation is handed to the watchdog chain before the file exists.
    if cfg!(windows) {
        spawn_watchdog(&temp);
    }

    std::fs::write(&temp.path, to_json_pretty(&config)?).map_err(|source| {
        AppError::WriteFailed {
            path: temp.path.clone(),
            source,
        }
    })?;

    let mut tsc_args = vec!["-p".to_string(), temp.path.to_string()];
    tsc_args.extend(classified.passthrough.iter().cloned());

    let result = run_tsc(&tsc_args, &workspace_root, is_pnp).await;
    guard.cleanup();

    Ok(result?)
}
