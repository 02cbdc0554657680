//! Advisory suggestions derived from a finished analysis.

use super::{Bug, Explanation, Language};

/// What a suggestion check gets to look at.
pub struct SuggestionContext<'a> {
    pub language: Language,
    pub bugs: &'a [Bug],
    pub explanations: &'a [Explanation],
}

impl SuggestionContext<'_> {
    /// Case-sensitive substring search over bug messages.
    fn any_message_contains(&self, needle: &str) -> bool {
        self.bugs.iter().any(|b| b.message.contains(needle))
    }
}

struct SuggestionCheck {
    text: &'static str,
    applies: fn(&SuggestionContext<'_>) -> bool,
}

static SUGGESTION_CHECKS: &[SuggestionCheck] = &[
    SuggestionCheck {
        text: "Modernize variable declarations by using let and const instead of var",
        applies: |ctx| ctx.any_message_contains("var"),
    },
    SuggestionCheck {
        text: "Remove console statements and implement proper logging for production",
        applies: |ctx| ctx.any_message_contains("console"),
    },
    SuggestionCheck {
        text: "Use strict equality (===) to avoid type coercion issues",
        applies: |ctx| ctx.any_message_contains("equality"),
    },
    SuggestionCheck {
        text: "Add explicit semicolons for better code clarity and consistency",
        applies: |ctx| ctx.any_message_contains("semicolon"),
    },
    SuggestionCheck {
        text: "Add null checks or use optional chaining to prevent runtime errors",
        applies: |ctx| ctx.any_message_contains("null"),
    },
    SuggestionCheck {
        text: "Good code structure detected with proper use of functions and control flow",
        applies: |ctx| !ctx.explanations.is_empty(),
    },
    SuggestionCheck {
        text: NO_ISSUES,
        applies: |ctx| ctx.bugs.is_empty(),
    },
    SuggestionCheck {
        text: "Use more Pythonic iteration patterns for better performance and readability",
        applies: |ctx| ctx.language == Language::Python && ctx.any_message_contains("range(len"),
    },
    SuggestionCheck {
        text: "Address TODO comments and incomplete code sections",
        applies: |ctx| ctx.any_message_contains("TODO"),
    },
];

/// Suggestion emitted when no bugs were found.
pub const NO_ISSUES: &str = "Excellent code quality! No issues detected - keep up the good work";

/// Collect every applicable suggestion, in check order.
pub fn suggest(ctx: &SuggestionContext<'_>) -> Vec<String> {
    SUGGESTION_CHECKS
        .iter()
        .filter(|check| (check.applies)(ctx))
        .map(|check| check.text.to_string())
        .collect()
}
