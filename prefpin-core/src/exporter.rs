use crate::classifier::Classifier;
use crate::error::Result;
use crate::patterns::PatternSet;
use crate::types::*;
use tracing::debug;

/// Drives one classification pass over a profile snapshot
pub struct Exporter {
    classifier: Classifier,
}

impl Default for Exporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Exporter {
    pub fn new() -> Self {
        Self {
            classifier: Classifier::new(),
        }
    }

    /// Classify every entry and partition them, keeping source order within
    /// each half. No I/O happens here.
    pub fn run(&self, entries: &[PreferenceEntry], patterns: &PatternSet) -> Result<ExportResult> {
        let mut result = ExportResult::default();

        for entry in entries {
            let decision = self.classifier.classify_entry(entry, patterns)?;
            match decision.label {
                Label::Policy => result.accepted.push(decision.entry),
                Label::Excluded => result.rejected.push(decision),
            }
        }

        debug!(
            total = entries.len(),
            accepted = result.accepted.len(),
            rejected = result.rejected.len(),
            "export pass complete"
        );
        Ok(result)
    }
}

/// Literal form used by both `pref(...)` and `user_pref(...)` lines
pub fn render_value_literal(value: &PrefValue) -> String {
    match value {
        PrefValue::Bool(b) => b.to_string(),
        PrefValue::Int(i) => i.to_string(),
        PrefValue::Str(s) => {
            let mut out = String::with_capacity(s.len() + 2);
            out.push('"');
            for c in s.chars() {
                match c {
                    '\\' => out.push_str("\\\\"),
                    '"' => out.push_str("\\\""),
                    '\n' => out.push_str("\\n"),
                    '\r' => out.push_str("\\r"),
                    '\t' => out.push_str("\\t"),
                    other => out.push(other),
                }
            }
            out.push('"');
            out
        }
    }
}

pub fn render_pref_line(entry: &PreferenceEntry) -> String {
    format!(
        "pref(\"{}\", {});",
        entry.name,
        render_value_literal(&entry.value)
    )
}

pub fn render_user_pref_line(entry: &PreferenceEntry) -> String {
    format!(
        "user_pref(\"{}\", {});",
        entry.name,
        render_value_literal(&entry.value)
    )
}

/// Render the whole override file into memory. `header` lines are wrapped in
/// a `/** ... */` block; pass an empty slice for no header.
pub fn render_overrides(accepted: &[PreferenceEntry], header: &[String]) -> String {
    let mut out = String::new();

    if !header.is_empty() {
        out.push_str("/**\n");
        for line in header {
            out.push_str(" * ");
            out.push_str(line);
            out.push('\n');
        }
        out.push_str(" */\n\n");
    }

    for entry in accepted {
        out.push_str(&render_pref_line(entry));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries() -> Vec<PreferenceEntry> {
        vec![
            PreferenceEntry::new("privacy.trackingprotection.enabled", true),
            PreferenceEntry::new("browser.search.totalSearches", 42),
            PreferenceEntry::new("browser.startup.homepage", "about:home"),
            PreferenceEntry::new("privacy.purge_trackers.last_purge", "1234567890"),
            PreferenceEntry::new("network.trr.mode", 3),
        ]
    }

    #[test]
    fn test_run_partitions_in_source_order() {
        let set = PatternSet::with_defaults().unwrap();
        let result = Exporter::new().run(&entries(), &set).unwrap();

        let accepted: Vec<_> = result.accepted.iter().map(|e| e.name.as_str()).collect();
        let rejected: Vec<_> = result.rejected.iter().map(|d| d.entry.name.as_str()).collect();
        assert_eq!(
            accepted,
            vec![
                "privacy.trackingprotection.enabled",
                "browser.startup.homepage",
                "network.trr.mode"
            ]
        );
        assert_eq!(
            rejected,
            vec!["browser.search.totalSearches", "privacy.purge_trackers.last_purge"]
        );
        assert!(result.rejected.iter().all(|d| d.matched.is_some()));
    }

    #[test]
    fn test_run_on_empty_input() {
        let set = PatternSet::with_defaults().unwrap();
        let result = Exporter::new().run(&[], &set).unwrap();
        assert!(result.accepted.is_empty());
        assert!(result.rejected.is_empty());
    }

    #[test]
    fn test_render_pref_line_bool() {
        let entry = PreferenceEntry::new("privacy.trackingprotection.enabled", true);
        assert_eq!(
            render_pref_line(&entry),
            r#"pref("privacy.trackingprotection.enabled", true);"#
        );
    }

    #[test]
    fn test_render_value_literals() {
        assert_eq!(render_value_literal(&PrefValue::Bool(false)), "false");
        assert_eq!(render_value_literal(&PrefValue::Int(-5)), "-5");
        assert_eq!(
            render_value_literal(&PrefValue::Str(r#"C:\path "q""#.to_string())),
            r#""C:\\path \"q\"""#
        );
        assert_eq!(render_value_literal(&PrefValue::Str("a\nb".to_string())), r#""a\nb""#);
    }

    #[test]
    fn test_render_overrides_with_header() {
        let accepted = vec![
            PreferenceEntry::new("a.b", 1),
            PreferenceEntry::new("c.d", "x"),
        ];
        let header = vec!["Generated by prefpin".to_string()];
        let rendered = render_overrides(&accepted, &header);
        assert_eq!(
            rendered,
            "/**\n * Generated by prefpin\n */\n\npref(\"a.b\", 1);\npref(\"c.d\", \"x\");\n"
        );
    }

    #[test]
    fn test_render_overrides_without_header() {
        let rendered = render_overrides(&[PreferenceEntry::new("a.b", false)], &[]);
        assert_eq!(rendered, "pref(\"a.b\", false);\n");
    }
}
