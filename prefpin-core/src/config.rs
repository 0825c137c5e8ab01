use crate::error::{PrefError, Result};
use crate::patterns::PatternSet;
use crate::types::{Label, PatternKind};
use serde::{Deserialize, Serialize};

// Default value functions for serde
fn default_true() -> bool {
    true
}

fn default_excluded() -> Label {
    Label::Excluded
}

fn default_header() -> Vec<String> {
    vec![
        "Generated from prefs.js user preferences".to_string(),
        "Policy-only, privacy-first: no IDs, timestamps, counters, UI state, or font pinning"
            .to_string(),
    ]
}

fn default_output_file_name() -> String {
    "librewolf.overrides.cfg".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Seed the pattern set with the built-in exclusion/policy table
    #[serde(default = "default_true")]
    pub use_default_patterns: bool,
    /// Extra exclusion prefixes, appended before any given on the command line
    #[serde(default)]
    pub exclude_prefixes: Vec<String>,
    /// Extra patterns of any kind, appended after the prefixes
    #[serde(default)]
    pub patterns: Vec<PatternConfig>,
    /// Lines of the comment block written at the top of the override file
    #[serde(default = "default_header")]
    pub header: Vec<String>,
    /// File name used inside the base directory when no output path is given
    #[serde(default = "default_output_file_name")]
    pub output_file_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternConfig {
    pub kind: PatternKind,
    pub text: String,
    #[serde(default = "default_excluded")]
    pub label: Label,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            use_default_patterns: true,
            exclude_prefixes: Vec::new(),
            patterns: Vec::new(),
            header: default_header(),
            output_file_name: default_output_file_name(),
        }
    }
}

impl ExportConfig {
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| PrefError::Config(e.to_string()))
    }

    /// Load config from file path
    pub fn load_from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| PrefError::Config(format!("failed to read {path}: {e}")))?;
        Self::from_yaml_str(&content)
    }

    /// Load config with fallback to default.
    /// Also returns the path the config was actually read from, which is None
    /// when no path was given or loading it failed.
    pub fn load_with_fallback(path: Option<&str>) -> (Self, Option<&str>) {
        match path {
            Some(p) => match Self::load_from_file(p) {
                Ok(config) => (config, Some(p)),
                Err(e) => {
                    eprintln!("⚠️  Failed to load config from {}, using defaults ({e})", p);
                    (Self::default(), None)
                }
            },
            None => (Self::default(), None),
        }
    }

    /// Build the pattern set for a run: defaults (unless disabled), config
    /// prefixes, config patterns, then `cli_prefixes` last.
    pub fn build_pattern_set(&self, cli_prefixes: &[String]) -> Result<PatternSet> {
        let mut set = if self.use_default_patterns {
            PatternSet::with_defaults()?
        } else {
            PatternSet::new()
        };

        for prefix in &self.exclude_prefixes {
            set.add_exclusion_prefix(prefix)?;
        }
        for pattern in &self.patterns {
            set.add_pattern(pattern.kind, &pattern.text, pattern.label)?;
        }
        for prefix in cli_prefixes {
            set.add_exclusion_prefix(prefix)?;
        }

        Ok(set)
    }
}
