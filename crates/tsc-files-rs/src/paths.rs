//! Lexical path arithmetic.
//!
//! Purely textual: no filesystem access and no symlink resolution, so the
//! results stay stable regardless of what exists on disk.

use camino::{Utf8Component, Utf8Path, Utf8PathBuf};

/// Collapses `.` and `..` components without touching the filesystem.
pub fn normalize(path: &Utf8Path) -> Utf8PathBuf {
    let mut prefix = Utf8PathBuf::new();
    let mut parts: Vec<&str> = Vec::new();

    for component in path.components() {
        match component {
            Utf8Component::Prefix(_) | Utf8Component::RootDir => {
                prefix.push(component);
            }
            Utf8Component::CurDir => {}
            Utf8Component::ParentDir => {
                if matches!(parts.last(), Some(last) if *last != "..") {
                    parts.pop();
                } else if prefix.as_str().is_empty() {
                    // Relative paths keep leading `..`; at a root it is a no-op.
                    parts.push("..");
                }
            }
            Utf8Component::Normal(part) => parts.push(part),
        }
    }

    let mut out = prefix;
    for part in parts {
        out.push(part);
    }
    out
}

/// Computes the relative path from directory `base` to `target`.
///
/// Both inputs must be absolute. Returns an empty path when they normalize
/// to the same directory.
pub fn relative_to(base: &Utf8Path, target: &Utf8Path) -> Utf8PathBuf {
    let base = normalize(base);
    let target = normalize(target);

    let base_components: Vec<Utf8Component> = base.components().collect();
    let target_components: Vec<Utf8Component> = target.components().collect();

    let common = base_components
        .iter()
        .zip(target_components.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut out = Utf8PathBuf::new();
    for component in &base_components[common..] {
        if !matches!(component, Utf8Component::Prefix(_) | Utf8Component::RootDir) {
            out.push("..");
        }
    }
    for component in &target_components[common..] {
        out.push(component);
    }
    out
}

/// Expresses `target` (absolute, or relative to `cwd`) relative to the
/// directory `dir` (itself absolute, or relative to `cwd`).
pub fn relative_from_dir(cwd: &Utf8Path, dir: &Utf8Path, target: &Utf8Path) -> Utf8PathBuf {
    relative_to(&cwd.join(dir), &cwd.join(target))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_normalize_collapses_dots() {
        assert_eq!(normalize(Utf8Path::new("/a/./b/../c")), "/a/c");
        assert_eq!(normalize(Utf8Path::new("a/b/../../c")), "c");
        assert_eq!(normalize(Utf8Path::new("./a")), "a");
    }

    #[test]
    fn test_normalize_keeps_leading_parent_dirs() {
        assert_eq!(normalize(Utf8Path::new("../../a")), "../../a");
        assert_eq!(normalize(Utf8Path::new("a/../../b")), "../b");
    }

    #[test]
    fn test_normalize_stops_at_root() {
        assert_eq!(normalize(Utf8Path::new("/../a")), "/a");
    }

    #[test]
    fn test_relative_to_descends() {
        assert_eq!(
            relative_to(Utf8Path::new("/a/b"), Utf8Path::new("/a/b/c/d.ts")),
            "c/d.ts"
        );
    }

    #[test]
    fn test_relative_to_ascends() {
        assert_eq!(
            relative_to(Utf8Path::new("/a/b/c"), Utf8Path::new("/a/x.ts")),
            "../../x.ts"
        );
    }

    #[test]
    fn test_relative_to_same_directory() {
        assert_eq!(relative_to(Utf8Path::new("/a/b"), Utf8Path::new("/a/b")), "");
    }

    #[test]
    fn test_relative_from_dir_with_cwd_relative_inputs() {
        let cwd = Utf8Path::new("/repo/pkg");
        assert_eq!(
            relative_from_dir(cwd, Utf8Path::new(""), Utf8Path::new("src/a.ts")),
            "src/a.ts"
        );
        assert_eq!(
            relative_from_dir(cwd, Utf8Path::new("config"), Utf8Path::new("src/a.ts")),
            "../src/a.ts"
        );
        assert_eq!(
            relative_from_dir(cwd, Utf8Path::new("config"), Utf8Path::new("/repo/pkg/b.ts")),
            "../b.ts"
        );
    }
}
