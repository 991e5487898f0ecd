//! Word list loading
//!
//! Accepts:
//! - `{"words": ["cat", "dog"]}`
//! - `["cat", "dog"]`
//! - plain text, one or more words per line

use rustc_hash::FxHashSet;
use serde_json::Value;
use std::fs;
use std::path::Path;

use crate::{Error, Result};

/// Load a word list from a file, choosing the format by content
pub fn load(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)?;
    let words = parse(&content)?;
    tracing::info!(path = %path.display(), count = words.len(), "loaded word list");
    Ok(words)
}

/// Parse word list content. Blank and duplicate entries are dropped, first
/// occurrence wins.
pub fn parse(content: &str) -> Result<Vec<String>> {
    let trimmed = content.trim_start();
    let raw: Vec<String> = if trimmed.starts_with('{') || trimmed.starts_with('[') {
        from_json(&serde_json::from_str(trimmed)?)?
    } else {
        content.split_whitespace().map(|w| w.to_string()).collect()
    };

    let mut seen = FxHashSet::default();
    let words: Vec<String> = raw
        .into_iter()
        .map(|w| w.trim().to_string())
        .filter(|w| !w.is_empty())
        .filter(|w| seen.insert(w.clone()))
        .collect();

    if words.is_empty() {
        return Err(Error::EmptyWordList);
    }

    Ok(words)
}

fn from_json(json: &Value) -> Result<Vec<String>> {
    let array = match json {
        Value::Array(items) => items,
        Value::Object(map) => match map.get("words") {
            Some(Value::Array(items)) => items,
            _ => {
                return Err(Error::WordList {
                    message: "expected a \"words\" array".to_string(),
                })
            }
        },
        _ => {
            return Err(Error::WordList {
                message: "expected an array or an object with \"words\"".to_string(),
            })
        }
    };

    array
        .iter()
        .map(|item| {
            item.as_str().map(str::to_string).ok_or_else(|| Error::WordList {
                message: format!("not a string: {}", item),
            })
        })
        .collect()
}
