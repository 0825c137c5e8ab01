use serde::Serialize;
use std::collections::BTreeMap;

use crate::exporter::render_user_pref_line;
use crate::types::*;

/// Counts for one export run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub total_seen: usize,
    pub accepted_count: usize,
    pub rejected_count: usize,
    pub rejected_by_kind: BTreeMap<PatternKind, usize>,
}

pub fn summarize(result: &ExportResult) -> Stats {
    let mut rejected_by_kind = BTreeMap::new();
    for decision in &result.rejected {
        if let Some(pattern) = &decision.matched {
            *rejected_by_kind.entry(pattern.kind).or_insert(0) += 1;
        }
    }

    Stats {
        total_seen: result.total(),
        accepted_count: result.accepted.len(),
        rejected_count: result.rejected.len(),
        rejected_by_kind,
    }
}

/// One commented line per skipped entry, in source order, naming the rule
/// that caused the skip.
pub fn render_skipped_audit(result: &ExportResult) -> Vec<String> {
    result
        .rejected
        .iter()
        .map(|decision| {
            let line = render_user_pref_line(&decision.entry);
            match &decision.matched {
                Some(pattern) => format!(
                    "# {line} -- skipped: matched {} pattern \"{}\"",
                    pattern.kind, pattern.text
                ),
                // rejected decisions always carry their pattern
                None => format!("# {line} -- skipped"),
            }
        })
        .collect()
}

pub fn render_stats(stats: &Stats) -> Vec<String> {
    let mut lines = vec![
        format!("Read:     {} prefs", stats.total_seen),
        format!("Accepted: {} prefs", stats.accepted_count),
        format!("Skipped:  {} prefs", stats.rejected_count),
    ];
    for kind in PatternKind::ALL {
        let count = stats.rejected_by_kind.get(&kind).copied().unwrap_or(0);
        lines.push(format!("  by {:<9} {count}", format!("{kind}:")));
    }
    lines
}
