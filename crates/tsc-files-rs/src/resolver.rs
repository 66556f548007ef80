//! Workspace root and base-configuration discovery.

use crate::paths::relative_to;
use camino::{Utf8Path, Utf8PathBuf};

const MANIFEST_FILE: &str = "package.json";
const CONFIG_FILE: &str = "tsconfig.json";

/// Finds the nearest ancestor of `start_dir` (inclusive) containing a
/// `package.json`.
///
/// The walk tests the boundary before the file, so the filesystem root
/// itself is never probed: a manifest sitting at `/` is not a workspace.
pub fn find_workspace_root(start_dir: &Utf8Path) -> Option<Utf8PathBuf> {
    let mut dir = start_dir;
    while let Some(parent) = dir.parent() {
        if dir.join(MANIFEST_FILE).exists() {
            return Some(dir.to_owned());
        }
        dir = parent;
    }
    None
}

/// Finds the nearest `tsconfig.json` between `cwd` and `workspace_root`,
/// both inclusive, returned relative to `cwd`.
pub fn find_nearest_tsconfig(cwd: &Utf8Path, workspace_root: &Utf8Path) -> Option<Utf8PathBuf> {
    let mut dir = cwd;
    loop {
        let candidate = dir.join(CONFIG_FILE);
        if candidate.exists() {
            return Some(relative_to(cwd, &candidate));
        }
        if dir == workspace_root {
            return None;
        }
        dir = dir.parent()?;
    }
}
