//! Minimal JSON path lookup.
//!
//! Supports `$`, `$.field`, `$.field.nested`, `$.array[0]` and `$.array[*]`
//! (the whole array). Enough to address fields of the objects resource.

use serde_json::Value;

use crate::error::{DomainError, DomainResult};

/// Query a JSON value using a simple JSONPath-like syntax.
///
/// Returns `Ok(None)` when the path is well formed but nothing is there.
///
/// # Errors
///
/// Returns an error if the path does not start with `$` or has a
/// non-numeric array index.
pub fn query(json: &Value, path: &str) -> DomainResult<Option<Value>> {
    let Some(rest) = path.trim().strip_prefix('$') else {
        return Err(DomainError::InvalidVariableReference(format!(
            "JSON path must start with '$': {path}"
        )));
    };

    let rest = rest.strip_prefix('.').unwrap_or(rest);
    let mut current = json;

    for segment in split_path_segments(rest) {
        let (name, index) = parse_array_access(&segment)
            .map_or((segment.as_str(), None), |(name, index)| (name, Some(index)));

        if !name.is_empty() {
            match current.get(name) {
                Some(v) => current = v,
                None => return Ok(None),
            }
        }

        match index {
            None => {}
            Some("*") => return Ok(Some(current.clone())),
            Some(index) => {
                let idx: usize = index.parse().map_err(|_| {
                    DomainError::InvalidVariableReference(format!("invalid array index: {index}"))
                })?;
                match current.get(idx) {
                    Some(v) => current = v,
                    None => return Ok(None),
                }
            }
        }
    }

    Ok(Some(current.clone()))
}

/// Split a path into segments, respecting array brackets.
fn split_path_segments(path: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut in_bracket = false;

    for ch in path.chars() {
        match ch {
            '.' if !in_bracket => {
                if !current.is_empty() {
                    segments.push(std::mem::take(&mut current));
                }
            }
            '[' => {
                in_bracket = true;
                current.push(ch);
            }
            ']' => {
                in_bracket = false;
                current.push(ch);
            }
            _ => current.push(ch),
        }
    }

    if !current.is_empty() {
        segments.push(current);
    }

    segments
}

/// Parse array access like "field[0]" into ("field", "0").
fn parse_array_access(segment: &str) -> Option<(&str, &str)> {
    let bracket_start = segment.find('[')?;
    let inner = segment.strip_suffix(']')?;
    Some((&segment[..bracket_start], &inner[bracket_start + 1..]))
}
