//! Heuristic analysis of source text.

pub mod catalog;
mod engine;
mod explanations;
mod rules;
mod suggestions;
mod types;

pub use catalog::CatalogEntry;
pub use engine::analyze;
pub use explanations::{ExplanationRule, EXPLANATION_RULES, MAX_EXPLANATIONS};
pub use rules::{find_rule, FixTemplate, Rule, Scope, MAX_LINE_LENGTH, RULES};
pub use suggestions::NO_ISSUES;
pub use types::{AnalysisResult, Bug, BugKind, Explanation, Fix, Language, Quality, Severity};
