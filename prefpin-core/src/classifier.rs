use crate::error::{PrefError, Result};
use crate::patterns::{Pattern, PatternSet};
use crate::types::*;
use tracing::trace;

/// Maps preference names to decisions.
///
/// Stateless: the decision depends only on the name and the pattern set, so a
/// single classifier can be shared freely.
pub struct Classifier;

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Classifier {
    pub fn new() -> Self {
        Self
    }

    pub fn classify_entry(&self, entry: &PreferenceEntry, patterns: &PatternSet) -> Result<Decision> {
        let (label, matched) = self.resolve(&entry.name, patterns)?;
        Ok(Decision {
            entry: entry.clone(),
            label,
            matched: matched.cloned(),
        })
    }

    /// Classify a bare name. The returned decision carries an empty string
    /// value; use `classify_entry` when the value matters.
    pub fn classify(&self, name: &str, patterns: &PatternSet) -> Result<Decision> {
        self.classify_entry(&PreferenceEntry::new(name, ""), patterns)
    }

    /// Exclusions are tried kind by kind (exact, prefix, suffix, contains,
    /// regex) before any policy pattern is consulted.
    fn resolve<'p>(&self, name: &str, patterns: &'p PatternSet) -> Result<(Label, Option<&'p Pattern>)> {
        validate_name(name)?;
        let lowered = name.to_ascii_lowercase();

        if let Some(pattern) = first_match(patterns, Label::Excluded, name, &lowered) {
            trace!(name, kind = %pattern.kind, text = %pattern.text, "excluded");
            return Ok((Label::Excluded, Some(pattern)));
        }

        let policy = first_match(patterns, Label::Policy, name, &lowered);
        trace!(name, annotated = policy.is_some(), "policy");
        Ok((Label::Policy, policy))
    }
}

fn first_match<'p>(
    patterns: &'p PatternSet,
    label: Label,
    name: &str,
    lowered: &str,
) -> Option<&'p Pattern> {
    PatternKind::ALL.iter().find_map(|&kind| {
        let mut candidates = patterns
            .iter_kind(label, kind)
            .filter(|p| p.matches(name, lowered));

        if kind == PatternKind::Prefix {
            // Longest prefix wins; among equal lengths the earliest declared.
            candidates.fold(None, |best: Option<&'p Pattern>, p| match best {
                Some(b) if b.text.len() >= p.text.len() => Some(b),
                _ => Some(p),
            })
        } else {
            candidates.next()
        }
    })
}

fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(PrefError::InvalidInput(name.to_string()));
    }
    if name.chars().any(|c| c == '"' || c.is_control()) {
        return Err(PrefError::InvalidInput(name.to_string()));
    }
    Ok(())
}
