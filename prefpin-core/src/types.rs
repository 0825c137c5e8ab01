use serde::{Deserialize, Serialize};
use std::fmt;

use crate::patterns::Pattern;

// ===== PREFERENCE VALUES =====
// prefs.js only ever stores booleans, integers and strings.

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrefValue {
    Bool(bool),
    Int(i64),
    Str(String),
}

impl From<bool> for PrefValue {
    fn from(value: bool) -> Self {
        PrefValue::Bool(value)
    }
}

impl From<i32> for PrefValue {
    fn from(value: i32) -> Self {
        PrefValue::Int(i64::from(value))
    }
}

impl From<i64> for PrefValue {
    fn from(value: i64) -> Self {
        PrefValue::Int(value)
    }
}

impl From<&str> for PrefValue {
    fn from(value: &str) -> Self {
        PrefValue::Str(value.to_string())
    }
}

impl From<String> for PrefValue {
    fn from(value: String) -> Self {
        PrefValue::Str(value)
    }
}

/// One named preference as read from the profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceEntry {
    pub name: String,
    pub value: PrefValue,
}

impl PreferenceEntry {
    pub fn new(name: impl Into<String>, value: impl Into<PrefValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

// ===== CLASSIFICATION TYPES =====

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Label {
    /// Durable user intent, safe to pin
    Policy,
    /// Runtime state, identifiers or bookkeeping
    Excluded,
}

/// How a pattern's text is compared against a preference name.
/// Variant order is the matching precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    Exact,
    Prefix,
    Suffix,
    Contains,
    Regex,
}

impl PatternKind {
    pub const ALL: [PatternKind; 5] = [
        PatternKind::Exact,
        PatternKind::Prefix,
        PatternKind::Suffix,
        PatternKind::Contains,
        PatternKind::Regex,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PatternKind::Exact => "exact",
            PatternKind::Prefix => "prefix",
            PatternKind::Suffix => "suffix",
            PatternKind::Contains => "contains",
            PatternKind::Regex => "regex",
        }
    }
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Policy => f.write_str("policy"),
            Label::Excluded => f.write_str("excluded"),
        }
    }
}

/// The outcome of classifying one entry.
/// `matched` is None only when the entry fell through to default-allow.
#[derive(Debug, Clone, PartialEq)]
pub struct Decision {
    pub entry: PreferenceEntry,
    pub label: Label,
    pub matched: Option<Pattern>,
}

impl Decision {
    pub fn is_excluded(&self) -> bool {
        self.label == Label::Excluded
    }
}

/// Partition produced by one export run, both halves in source order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportResult {
    pub accepted: Vec<PreferenceEntry>,
    pub rejected: Vec<Decision>,
}

impl ExportResult {
    pub fn total(&self) -> usize {
        self.accepted.len() + self.rejected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}
