// prefs.js reader
//
// Turns the profile's `user_pref("name", value);` lines into PreferenceEntry
// values. Everything that is not a user_pref line (comments, blank lines) is
// skipped; a user_pref line that cannot be parsed is an error.

use crate::error::{PrefError, Result};
use crate::types::{PrefValue, PreferenceEntry};
use regex::Regex;
use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;
use tracing::{debug, warn};

fn user_pref_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"^\s*user_pref\(\s*"(?P<name>[^"]+)"\s*,\s*(?P<value>.+?)\s*\)\s*;\s*$"#)
            .expect("user_pref regex is valid")
    })
}

/// Parse prefs.js content. Duplicate names keep the last value at the
/// position of the first occurrence.
pub fn parse_prefs(content: &str) -> Result<Vec<PreferenceEntry>> {
    let mut entries: Vec<PreferenceEntry> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for (i, line) in content.lines().enumerate() {
        let line_number = i + 1;
        if !line.trim_start().starts_with("user_pref(") {
            continue;
        }

        let parse_error = || PrefError::StoreParseError {
            line_number,
            line: line.to_string(),
        };

        let caps = user_pref_regex().captures(line).ok_or_else(parse_error)?;
        let name = caps["name"].to_string();
        let value = parse_value(&caps["value"]).ok_or_else(parse_error)?;

        match index.get(&name) {
            Some(&pos) => {
                debug!(name = %name, line_number, "duplicate pref, last write wins");
                entries[pos].value = value;
            }
            None => {
                index.insert(name.clone(), entries.len());
                entries.push(PreferenceEntry { name, value });
            }
        }
    }

    Ok(entries)
}

/// Read and parse a prefs.js file. Invalid UTF-8 is replaced rather than rejected.
pub fn read_prefs_file(path: &Path) -> Result<Vec<PreferenceEntry>> {
    if !path.is_file() {
        return Err(PrefError::ProfileNotFound(format!(
            "prefs.js not found at: {}",
            path.display()
        )));
    }

    let bytes = std::fs::read(path).map_err(|e| {
        PrefError::ProfileNotFound(format!("failed to read {}: {e}", path.display()))
    })?;
    let content = String::from_utf8_lossy(&bytes);
    if matches!(content, std::borrow::Cow::Owned(_)) {
        warn!(path = %path.display(), "prefs.js contained invalid UTF-8, replaced");
    }

    parse_prefs(&content)
}

fn parse_value(raw: &str) -> Option<PrefValue> {
    match raw {
        "true" => return Some(PrefValue::Bool(true)),
        "false" => return Some(PrefValue::Bool(false)),
        _ => {}
    }

    if let Some(inner) = raw
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    {
        return unescape(inner).map(PrefValue::Str);
    }

    let digits = raw.strip_prefix('-').unwrap_or(raw);
    if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
        return raw.parse::<i64>().ok().map(PrefValue::Int);
    }

    None
}

fn unescape(inner: &str) -> Option<String> {
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next()? {
                'n' => out.push('\n'),
                'r' => out.push('\r'),
                't' => out.push('\t'),
                'u' => {
                    let hex: String = chars.by_ref().take(4).collect();
                    if hex.len() != 4 {
                        return None;
                    }
                    let code = u32::from_str_radix(&hex, 16).ok()?;
                    out.push(char::from_u32(code)?);
                }
                other => out.push(other),
            },
            // an unescaped quote means the literal ended early
            '"' => return None,
            other => out.push(other),
        }
    }
    Some(out)
}
