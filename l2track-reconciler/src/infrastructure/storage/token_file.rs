//! Source and token-list files
//!
//! The source file is JSON-with-comments (hand-maintained), mapping
//! chain name to an ordered list of resolution requests. The token-list
//! file is plain JSON, read at the start of a run and overwritten at the
//! end. Rendering is deterministic: struct-ordered keys, two-space
//! indent, trailing newline, so a run against unchanged inputs rewrites
//! the file byte-identically.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use l2track_token_core::domain::entities::{SourceEntry, TokenEntry};

use crate::domain::error::ReconcilerError;

/// The persisted token list: an optional hand-written comment plus the
/// full sorted token array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenListFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub tokens: Vec<TokenEntry>,
}

/// The parsed source file. Chains keep their file order; entries keep
/// theirs.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceFile {
    pub chains: Vec<(String, Vec<SourceEntry>)>,
}

pub fn load_source(path: &Path) -> Result<SourceFile, ReconcilerError> {
    let raw = fs::read_to_string(path).map_err(|e| {
        ReconcilerError::source_data(format!("cannot read {}: {e}", path.display()))
    })?;
    parse_source(&raw)
}

pub fn parse_source(raw: &str) -> Result<SourceFile, ReconcilerError> {
    let clean = strip_jsonc(raw);
    let map: serde_json::Map<String, serde_json::Value> = serde_json::from_str(&clean)
        .map_err(|e| ReconcilerError::source_data(format!("source file is not valid JSON: {e}")))?;

    let mut chains = Vec::with_capacity(map.len());
    for (chain, value) in map {
        let entries: Vec<SourceEntry> = serde_json::from_value(value).map_err(|e| {
            ReconcilerError::source_data(format!("invalid entries for chain {chain}: {e}"))
        })?;
        chains.push((chain, entries));
    }
    Ok(SourceFile { chains })
}

pub fn load_token_list(path: &Path) -> Result<TokenListFile, ReconcilerError> {
    let raw = fs::read_to_string(path).map_err(|e| {
        ReconcilerError::source_data(format!("cannot read {}: {e}", path.display()))
    })?;
    serde_json::from_str(&raw).map_err(|e| {
        ReconcilerError::source_data(format!("token list failed validation: {e}"))
    })
}

pub fn save_token_list(path: &Path, list: &TokenListFile) -> Result<(), ReconcilerError> {
    let mut rendered = serde_json::to_string_pretty(list)
        .map_err(|e| ReconcilerError::storage(format!("cannot serialize token list: {e}")))?;
    rendered.push('\n');
    fs::write(path, rendered).map_err(|e| {
        ReconcilerError::storage(format!("cannot write {}: {e}", path.display()))
    })
}

/// Reduces JSON-with-comments to plain JSON: drops `//` and `/* */`
/// comments and trailing commas, leaving string contents untouched.
pub fn strip_jsonc(raw: &str) -> String {
    // First pass: drop comments
    let mut stripped = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    let mut in_string = false;
    let mut escaped = false;

    while let Some(c) = chars.next() {
        if in_string {
            stripped.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }
        match c {
            '"' => {
                in_string = true;
                stripped.push(c);
            }
            '/' => match chars.peek() {
                Some('/') => {
                    while let Some(&next) = chars.peek() {
                        if next == '\n' {
                            break;
                        }
                        chars.next();
                    }
                }
                Some('*') => {
                    chars.next();
                    let mut prev = '\0';
                    for next in chars.by_ref() {
                        if prev == '*' && next == '/' {
                            break;
                        }
                        prev = next;
                    }
                }
                _ => stripped.push(c),
            },
            _ => stripped.push(c),
        }
    }

    // Second pass: drop commas that directly precede a closing brace or
    // bracket
    let chars: Vec<char> = stripped.chars().collect();
    let mut cleaned = String::with_capacity(stripped.len());
    let mut in_string = false;
    let mut escaped = false;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if in_string {
            cleaned.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            i += 1;
            continue;
        }
        if c == '"' {
            in_string = true;
            cleaned.push(c);
            i += 1;
            continue;
        }
        if c == ',' {
            let mut j = i + 1;
            while j < chars.len() && chars[j].is_whitespace() {
                j += 1;
            }
            if j < chars.len() && (chars[j] == '}' || chars[j] == ']') {
                i += 1;
                continue;
            }
        }
        cleaned.push(c);
        i += 1;
    }

    cleaned
}
