// prefpin Core Library
//
// Classifies browser preferences into pinnable policy and excluded runtime
// state, and renders the policy subset as an enforced override file.

pub mod classifier;
pub mod config;
pub mod error;
pub mod exporter;
pub mod output;
pub mod patterns;
pub mod prefs_store;
pub mod reporter;
pub mod types;

// Re-export main types and functions for easy use
pub use classifier::Classifier;
pub use config::{ExportConfig, PatternConfig};
pub use error::{PrefError, Result};
pub use exporter::{render_overrides, render_pref_line, render_value_literal, Exporter};
pub use output::write_overrides;
pub use patterns::{Pattern, PatternSet};
pub use prefs_store::{parse_prefs, read_prefs_file};
pub use reporter::{render_skipped_audit, render_stats, summarize, Stats};
pub use types::*;
