use crate::error::{PrefError, Result};
use crate::types::{Label, PatternKind};

use super::defaults::default_patterns;
use super::pattern::Pattern;

/// Ordered, append-only collection of classification patterns.
///
/// Built once during setup and then only read. There is deliberately no way to
/// remove a pattern: adding exclusions can only move names from policy to
/// excluded, never back.
#[derive(Debug, Clone)]
pub struct PatternSet {
    patterns: Vec<Pattern>,
}

impl Default for PatternSet {
    fn default() -> Self {
        Self::with_defaults().expect("Failed to build default PatternSet")
    }
}

impl PatternSet {
    /// An empty set. Everything classifies as default-allow policy.
    pub fn new() -> Self {
        Self {
            patterns: Vec::new(),
        }
    }

    /// The built-in table
    pub fn with_defaults() -> Result<Self> {
        Ok(Self {
            patterns: default_patterns()?,
        })
    }

    pub fn add_exclusion_prefix(&mut self, text: &str) -> Result<()> {
        if text.is_empty() {
            return Err(PrefError::InvalidExclusionInput(
                "exclusion prefix must not be empty".to_string(),
            ));
        }
        self.patterns
            .push(Pattern::excluded(PatternKind::Prefix, text)?);
        Ok(())
    }

    pub fn add_pattern(&mut self, kind: PatternKind, text: &str, label: Label) -> Result<()> {
        self.patterns.push(Pattern::new(kind, text, label)?);
        Ok(())
    }

    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    /// Patterns with the given label and kind, in declaration order
    pub fn iter_kind(&self, label: Label, kind: PatternKind) -> impl Iterator<Item = &Pattern> {
        self.patterns
            .iter()
            .filter(move |p| p.label == label && p.kind == kind)
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
