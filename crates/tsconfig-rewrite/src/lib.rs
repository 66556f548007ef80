//! Comment-tolerant tsconfig parsing and file-list rewriting.
//!
//! `tsconfig.json` is a superset of JSON: `//` line comments, `/* */` block
//! comments, and trailing commas are all legal. This crate reduces such a
//! document to strict JSON, then replaces its `files` list with an explicit
//! one and drops `include` so wildcard discovery cannot reintroduce files the
//! caller did not ask for. Every other field passes through unchanged.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Error types for config rewriting.
#[derive(Debug, Error)]
pub enum RewriteError {
    /// Input is not valid JSON even after comment and trailing-comma removal.
    #[error("failed to parse tsconfig: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A parsed project configuration.
///
/// `files` and `include` are the only keys the rewrite touches; everything
/// else rides along in `rest`, preserving the source document's key order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Explicit file list. Authoritative after a rewrite.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<String>>,

    /// Include patterns. Always absent after a rewrite.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include: Option<Value>,

    /// All remaining fields, passed through untouched.
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

/// Parses `raw` tolerantly and substitutes the explicit file list.
///
/// `resolved_files` must already be relative to the directory that will hold
/// the rewritten config.
pub fn rewrite(raw: &str, resolved_files: &[String]) -> Result<ProjectConfig, RewriteError> {
    let mut config: ProjectConfig = serde_json::from_str(&strip_jsonc(raw))?;
    config.files = Some(resolved_files.to_vec());
    config.include = None;
    Ok(config)
}

/// Serializes a config with two-space indentation.
pub fn to_json_pretty(config: &ProjectConfig) -> Result<String, RewriteError> {
    Ok(serde_json::to_string_pretty(config)?)
}

/// Reduces a JSONC document to strict JSON.
///
/// Comment markers inside string literals are left alone, so glob values such
/// as `"./dist/**/*"` or `"/**/.ts"` survive the pass.
pub fn strip_jsonc(raw: &str) -> String {
    strip_trailing_commas(&strip_comments(raw))
}

/// Removes `//` and `/* */` comments outside of string literals.
fn strip_comments(json: &str) -> String {
    let mut result = String::with_capacity(json.len());
    let mut chars = json.chars().peekable();
    let mut in_string = false;

    while let Some(c) = chars.next() {
        if in_string {
            result.push(c);
            if c == '"' {
                in_string = false;
            } else if c == '\\' {
                if let Some(next) = chars.next() {
                    result.push(next);
                }
            }
        } else if c == '"' {
            result.push(c);
            in_string = true;
        } else if c == '/' {
            match chars.peek() {
                Some('/') => {
                    chars.next();
                    while let Some(&next) = chars.peek() {
                        if next == '\n' {
                            break;
                        }
                        chars.next();
                    }
                }
                Some('*') => {
                    chars.next();
                    while let Some(next) = chars.next() {
                        if next == '*' && chars.peek() == Some(&'/') {
                            chars.next();
                            break;
                        }
                    }
                }
                _ => {
                    result.push(c);
                }
            }
        } else {
            result.push(c);
        }
    }

    result
}

/// Removes commas whose next significant character closes an array or object.
///
/// Expects comments to have been stripped already, so only whitespace can sit
/// between a trailing comma and its closing bracket.
fn strip_trailing_commas(json: &str) -> String {
    let chars: Vec<char> = json.chars().collect();
    let mut result = String::with_capacity(json.len());
    let mut in_string = false;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if in_string {
            result.push(c);
            if c == '"' {
                in_string = false;
            } else if c == '\\' && i + 1 < chars.len() {
                result.push(chars[i + 1]);
                i += 1;
            }
        } else if c == '"' {
            result.push(c);
            in_string = true;
        } else if c == ',' {
            let mut j = i + 1;
            while j < chars.len() && chars[j].is_whitespace() {
                j += 1;
            }
            let closes = matches!(chars.get(j), Some('}') | Some(']'));
            if !closes {
                result.push(c);
            }
        } else {
            result.push(c);
        }
        i += 1;
    }

    result
}
