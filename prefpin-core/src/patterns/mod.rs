// Pattern table for the classifier:
// - pattern.rs: a single rule and its matching semantics
// - pattern_set.rs: the ordered, append-only rule collection
// - defaults.rs: the built-in exclusion and policy table

pub mod defaults;
pub mod pattern;
pub mod pattern_set;

pub use pattern::Pattern;
pub use pattern_set::PatternSet;
