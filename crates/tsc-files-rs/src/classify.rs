//! CLI argument classification.
//!
//! One left-to-right pass with a single token of lookahead splits the raw
//! argument list into the project flag, explicit source files, discovered
//! declaration files, and everything else (forwarded verbatim to tsc).

use camino::Utf8Path;
use thiserror::Error;
use walkdir::WalkDir;

/// Extensions recognized as explicit source files.
pub const SOURCE_EXTENSIONS: [&str; 8] = ["ts", "tsx", "js", "jsx", "mts", "cts", "mjs", "cjs"];

const EXCLUDE_FILES_FLAG: &str = "--excludeFiles";
const DECLARATION_DIR_FLAG: &str = "--includeDeclarationDir";

/// Errors produced while classifying arguments.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UsageError {
    /// A flag that requires a value was given without one.
    #[error("Missing argument for {0}")]
    MissingArgument(String),

    /// A flag value failed validation.
    #[error("Invalid argument for {0}")]
    InvalidArgument(String),
}

/// The classified view of one invocation's arguments.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ClassifiedArgs {
    /// Index of the last project flag in the original argument list, so the
    /// flag's value can be read back as `args[index + 1]`. Last one wins.
    pub project_flag_index: Option<usize>,

    /// Flags forwarded verbatim to tsc, in their original order.
    pub passthrough: Vec<String>,

    /// Explicit source files, in their original order.
    pub source_files: Vec<String>,

    /// Declaration files discovered under `--includeDeclarationDir`, sorted.
    pub declaration_files: Vec<String>,
}

/// Classifies a raw argument list.
///
/// The first malformed flag halts classification and is returned as a
/// [`UsageError`].
pub fn classify(args: &[String]) -> Result<ClassifiedArgs, UsageError> {
    let mut classified = ClassifiedArgs::default();
    let mut i = 0;

    while i < args.len() {
        let arg = &args[i];
        let lowered = arg.to_ascii_lowercase();

        if lowered == "-p" || lowered == "--project" {
            if i + 1 >= args.len() {
                return Err(UsageError::MissingArgument(arg.clone()));
            }
            classified.project_flag_index = Some(i);
            i += 2;
            continue;
        }

        if arg == EXCLUDE_FILES_FLAG {
            let Some(value) = args.get(i + 1) else {
                return Err(UsageError::MissingArgument(arg.clone()));
            };
            classified.passthrough.push(arg.clone());
            classified.passthrough.push(value.clone());
            i += 2;
            continue;
        }

        if arg == DECLARATION_DIR_FLAG {
            let Some(dir) = args.get(i + 1) else {
                return Err(UsageError::MissingArgument(arg.clone()));
            };
            classified.declaration_files = collect_declaration_files(Utf8Path::new(dir))
                .ok_or_else(|| UsageError::InvalidArgument(arg.clone()))?;
            i += 2;
            continue;
        }

        if arg.starts_with('-') {
            classified.passthrough.push(arg.clone());
        } else if is_source_file(arg) {
            classified.source_files.push(arg.clone());
        } else {
            // Unknown positionals (e.g. globs meant for tsc) pass through.
            classified.passthrough.push(arg.clone());
        }
        i += 1;
    }

    Ok(classified)
}

/// Returns whether a bare token names a recognized source file.
fn is_source_file(token: &str) -> bool {
    Utf8Path::new(token)
        .extension()
        .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext))
}

/// Returns whether a file name follows the declaration-file pattern.
fn is_declaration_file(name: &str) -> bool {
    name.ends_with(".d.ts") || name.ends_with(".d.mts") || name.ends_with(".d.cts")
}

/// Recursively collects declaration files under `dir`, sorted.
///
/// Returns `None` when `dir` does not exist or is not a directory.
fn collect_declaration_files(dir: &Utf8Path) -> Option<Vec<String>> {
    if !dir.is_dir() {
        return None;
    }

    let mut files: Vec<String> = WalkDir::new(dir)
        .follow_links(false)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| {
            let path = entry.path().to_str()?;
            is_declaration_file(path).then(|| path.to_string())
        })
        .collect();
    files.sort();
    Some(files)
}
