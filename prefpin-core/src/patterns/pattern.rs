use regex::Regex;

use crate::error::{PrefError, Result};
use crate::types::{Label, PatternKind};

/// A single classification rule.
///
/// Contains patterns are stored lowercase and compared against the lowercased
/// name; every other kind compares case-sensitively.
#[derive(Debug, Clone)]
pub struct Pattern {
    pub kind: PatternKind,
    pub text: String,
    pub label: Label,
    regex: Option<Regex>,
}

impl Pattern {
    pub fn new(kind: PatternKind, text: &str, label: Label) -> Result<Self> {
        if text.is_empty() {
            return Err(PrefError::InvalidExclusionInput(format!(
                "empty {kind} pattern"
            )));
        }

        let regex = match kind {
            PatternKind::Regex => Some(Regex::new(text).map_err(|source| {
                PrefError::InvalidPattern {
                    pattern: text.to_string(),
                    source,
                }
            })?),
            _ => None,
        };

        let text = match kind {
            PatternKind::Contains => text.to_ascii_lowercase(),
            _ => text.to_string(),
        };

        Ok(Self {
            kind,
            text,
            label,
            regex,
        })
    }

    pub fn excluded(kind: PatternKind, text: &str) -> Result<Self> {
        Self::new(kind, text, Label::Excluded)
    }

    pub fn policy(kind: PatternKind, text: &str) -> Result<Self> {
        Self::new(kind, text, Label::Policy)
    }

    /// `lowered` must be `name.to_ascii_lowercase()`; callers compute it once per name.
    pub fn matches(&self, name: &str, lowered: &str) -> bool {
        match self.kind {
            PatternKind::Exact => name == self.text,
            PatternKind::Prefix => name.starts_with(&self.text),
            PatternKind::Suffix => name.ends_with(&self.text),
            PatternKind::Contains => lowered.contains(&self.text),
            PatternKind::Regex => self
                .regex
                .as_ref()
                .is_some_and(|regex| regex.is_match(name)),
        }
    }

    pub fn is_exclusion(&self) -> bool {
        self.label == Label::Excluded
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.text == other.text && self.label == other.label
    }
}

impl Eq for Pattern {}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(kind: PatternKind, text: &str, name: &str) -> bool {
        let pattern = Pattern::excluded(kind, text).unwrap();
        pattern.matches(name, &name.to_ascii_lowercase())
    }

    #[test]
    fn test_exact_is_whole_name() {
        assert!(check(PatternKind::Exact, "a.b", "a.b"));
        assert!(!check(PatternKind::Exact, "a.b", "a.b.c"));
    }

    #[test]
    fn test_prefix_and_suffix_are_case_sensitive() {
        assert!(check(PatternKind::Prefix, "browser.sessionstore.", "browser.sessionstore.interval"));
        assert!(!check(PatternKind::Prefix, "Browser.", "browser.sessionstore.interval"));
        assert!(check(PatternKind::Suffix, "Id", "app.normandy.clientId"));
        assert!(!check(PatternKind::Suffix, "Id", "layout.grid"));
    }

    #[test]
    fn test_contains_ignores_case() {
        assert!(check(PatternKind::Contains, "ClientID", "toolkit.telemetry.cachedClientID"));
        let pattern = Pattern::excluded(PatternKind::Contains, "UUID").unwrap();
        assert_eq!(pattern.text, "uuid");
    }

    #[test]
    fn test_regex_searches_anywhere() {
        assert!(check(PatternKind::Regex, r"\.last_", "privacy.purge_trackers.last_purge"));
        assert!(!check(PatternKind::Regex, r"^last", "privacy.purge_trackers.last_purge"));
    }

    #[test]
    fn test_empty_text_rejected() {
        let err = Pattern::excluded(PatternKind::Prefix, "").unwrap_err();
        assert!(matches!(err, PrefError::InvalidExclusionInput(_)));
    }

    #[test]
    fn test_bad_regex_rejected() {
        let err = Pattern::excluded(PatternKind::Regex, "(unclosed").unwrap_err();
        assert!(matches!(err, PrefError::InvalidPattern { .. }));
    }
}
