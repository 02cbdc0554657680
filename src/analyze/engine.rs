//! Per-line driver that runs the rule battery.

use tracing::debug;

use super::explanations::{is_explainable, EXPLANATION_RULES, MAX_EXPLANATIONS};
use super::rules::RULES;
use super::suggestions::{suggest, SuggestionContext};
use super::{AnalysisResult, Language};
use crate::quality;

/// Strip surrounding whitespace, line terminators and byte order marks.
///
/// NEL (U+0085) is Unicode whitespace but is kept, like any other
/// non-blank character.
fn trim_line(line: &str) -> &str {
    line.trim_matches(|c: char| c == '\u{FEFF}' || (c.is_whitespace() && c != '\u{0085}'))
}

/// Analyze source text written in the declared language.
///
/// Total over all inputs: empty or malformed text just produces an
/// empty report. Lines are the literal `\n` split of the input, so a
/// trailing newline yields a final empty line and `\r` is removed by
/// trimming only.
pub fn analyze(source: &str, language: Language) -> AnalysisResult {
    let mut bugs = Vec::new();
    let mut fixes = Vec::new();
    let mut explanations = Vec::new();
    let mut line_count = 0;

    for (index, line) in source.split('\n').enumerate() {
        let line_number = index + 1;
        let trimmed = trim_line(line);
        line_count = line_number;

        for rule in RULES.iter().filter(|r| r.scope.applies_to(language)) {
            if let Some((bug, fix)) = rule.check(line_number, trimmed) {
                bugs.push(bug);
                fixes.extend(fix);
            }
        }

        if is_explainable(trimmed) {
            explanations.extend(
                EXPLANATION_RULES
                    .iter()
                    .filter_map(|r| r.explain(line_number, trimmed)),
            );
        }
    }

    explanations.truncate(MAX_EXPLANATIONS);

    let overall_quality = quality::calculate(&bugs);
    let suggestions = suggest(&SuggestionContext {
        language,
        bugs: &bugs,
        explanations: &explanations,
    });

    debug!(
        language = %language,
        lines = line_count,
        bugs = bugs.len(),
        fixes = fixes.len(),
        explanations = explanations.len(),
        quality = %overall_quality,
        "analysis complete"
    );

    AnalysisResult {
        bugs,
        fixes,
        explanations,
        overall_quality,
        suggestions,
    }
}
