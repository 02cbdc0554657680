//! Searchable listing of every rule and explanation category.

use serde::Serialize;

use super::{ExplanationRule, Rule, EXPLANATION_RULES, RULES};

/// One documented check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub id: &'static str,
    pub title: &'static str,
    /// "warning", "suggestion", or "explanation".
    pub category: String,
    pub scope: &'static str,
    pub description: &'static str,
    pub has_fix: bool,
}

impl From<&Rule> for CatalogEntry {
    fn from(rule: &Rule) -> Self {
        Self {
            id: rule.id,
            title: rule.title,
            category: rule.kind.to_string(),
            scope: rule.scope.as_str(),
            description: rule.description,
            has_fix: rule.fix.is_some(),
        }
    }
}

impl From<&ExplanationRule> for CatalogEntry {
    fn from(rule: &ExplanationRule) -> Self {
        Self {
            id: rule.category,
            title: rule.title,
            category: "explanation".to_string(),
            scope: "all languages",
            description: rule.explanation,
            has_fix: false,
        }
    }
}

/// All entries: bug rules first, then explanation categories.
pub fn entries() -> Vec<CatalogEntry> {
    RULES
        .iter()
        .map(CatalogEntry::from)
        .chain(EXPLANATION_RULES.iter().map(CatalogEntry::from))
        .collect()
}

/// Entries whose title or description contains `term`, ignoring case.
///
/// An empty term matches everything.
pub fn search(term: &str) -> Vec<CatalogEntry> {
    let needle = term.to_lowercase();
    entries()
        .into_iter()
        .filter(|e| {
            e.title.to_lowercase().contains(&needle)
                || e.description.to_lowercase().contains(&needle)
        })
        .collect()
}
