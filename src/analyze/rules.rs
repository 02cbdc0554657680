//! The bug-detection rule battery.
//!
//! Rules are plain descriptors evaluated in table order against each trimmed
//! line. Table order fixes the output order of bugs and fixes on a line, so
//! new rules go at the position they should report in.

use lazy_static::lazy_static;
use regex::Regex;

use super::{Bug, BugKind, Fix, Language, Severity};

lazy_static! {
    /// First `identifier.` on a line, used to insert optional chaining.
    static ref MEMBER_ACCESS: Regex = Regex::new(r"([A-Za-z0-9_]+)\.").unwrap();
}

/// Which declared languages a rule runs for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// JavaScript and TypeScript.
    JavaScriptFamily,
    Python,
    /// Every language.
    Any,
}

impl Scope {
    pub fn applies_to(&self, language: Language) -> bool {
        match self {
            Scope::JavaScriptFamily => language.is_javascript_family(),
            Scope::Python => language == Language::Python,
            Scope::Any => true,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::JavaScriptFamily => "javascript, typescript",
            Scope::Python => "python",
            Scope::Any => "all languages",
        }
    }
}

/// Template for the fix emitted alongside a bug.
pub struct FixTemplate {
    pub title: &'static str,
    pub description: &'static str,
    pub explanation: &'static str,
    /// Produces the suggested replacement from the trimmed line.
    pub rewrite: fn(&str) -> String,
}

/// A single heuristic check.
pub struct Rule {
    /// Stable identifier, part of every bug id this rule emits.
    pub id: &'static str,
    pub title: &'static str,
    pub scope: Scope,
    pub kind: BugKind,
    pub severity: Severity,
    pub message: &'static str,
    pub description: &'static str,
    pub matches: fn(&str) -> bool,
    pub fix: Option<FixTemplate>,
}

impl Rule {
    /// Run this rule against one trimmed line.
    ///
    /// Returns the bug and, when the rule has a template, its fix.
    pub fn check(&self, line_number: usize, trimmed: &str) -> Option<(Bug, Option<Fix>)> {
        if !(self.matches)(trimmed) {
            return None;
        }

        let bug_id = format!("bug-{}-{}", line_number, self.id);
        let fix = self.fix.as_ref().map(|t| Fix {
            id: format!("fix-{}", bug_id),
            bug_id: bug_id.clone(),
            title: t.title.to_string(),
            description: t.description.to_string(),
            code: (t.rewrite)(trimmed),
            explanation: t.explanation.to_string(),
        });

        let bug = Bug {
            id: bug_id,
            line: line_number,
            kind: self.kind,
            message: self.message.to_string(),
            description: self.description.to_string(),
            severity: self.severity,
        };

        Some((bug, fix))
    }
}

/// Maximum trimmed line length, in UTF-16 code units, before the long-line
/// rule fires.
pub const MAX_LINE_LENGTH: usize = 120;

/// All rules, in evaluation order.
pub static RULES: &[Rule] = &[
    // JavaScript / TypeScript
    Rule {
        id: "var",
        title: "var usage",
        scope: Scope::JavaScriptFamily,
        kind: BugKind::Warning,
        severity: Severity::Medium,
        message: "Use of \"var\" keyword",
        description: "The \"var\" keyword has function scope and can lead to hoisting issues, temporal dead zones, and unexpected behavior. Modern JavaScript prefers \"let\" for variables that need reassignment and \"const\" for constants.",
        matches: |line| line.contains("var "),
        fix: Some(FixTemplate {
            title: "Replace var with let/const",
            description: "Use \"const\" for values that won't be reassigned, or \"let\" for variables that will be modified. This provides better scoping and prevents common errors.",
            explanation: "Block-scoped declarations (let/const) are safer than function-scoped var declarations and help prevent bugs related to variable hoisting and scope confusion.",
            rewrite: |line| line.replacen("var ", "const ", 1),
        }),
    },
    Rule {
        id: "equality",
        title: "loose equality",
        scope: Scope::JavaScriptFamily,
        kind: BugKind::Warning,
        severity: Severity::Medium,
        message: "Use of loose equality (==)",
        description: "Loose equality (==) performs type coercion which can lead to unexpected results. For example, \"0\" == 0 is true, but \"0\" === 0 is false. Always use strict equality (===) unless you specifically need type coercion.",
        matches: |line| line.contains("==") && !line.contains("==="),
        fix: Some(FixTemplate {
            title: "Use strict equality",
            description: "Strict equality (===) compares both value and type, preventing unexpected type conversions.",
            explanation: "This ensures that comparisons are predictable and don't rely on JavaScript's sometimes confusing type coercion rules.",
            rewrite: |line| line.replace("==", "==="),
        }),
    },
    Rule {
        id: "console",
        title: "debug print",
        scope: Scope::JavaScriptFamily,
        kind: BugKind::Suggestion,
        severity: Severity::Low,
        message: "Console statement in code",
        description: "Console statements should be removed before production deployment as they can expose sensitive information and impact performance.",
        matches: |line| line.contains("console.log"),
        fix: Some(FixTemplate {
            title: "Remove console statement",
            description: "Remove or replace with proper logging mechanism.",
            explanation: "Use a proper logging library in production or remove debug statements entirely.",
            rewrite: |line| format!("// {} // TODO: Remove debug statement", line),
        }),
    },
    Rule {
        id: "semicolon",
        title: "missing semicolon",
        scope: Scope::JavaScriptFamily,
        kind: BugKind::Suggestion,
        severity: Severity::Low,
        message: "Missing semicolon",
        description: "While JavaScript has automatic semicolon insertion, it's better to be explicit to avoid potential issues.",
        matches: is_missing_semicolon,
        fix: Some(FixTemplate {
            title: "Add semicolon",
            description: "Add explicit semicolon for better code clarity.",
            explanation: "Explicit semicolons make your code more predictable and prevent issues with automatic semicolon insertion.",
            rewrite: |line| format!("{};", line),
        }),
    },
    Rule {
        id: "null-check",
        title: "unchecked DOM access",
        scope: Scope::JavaScriptFamily,
        kind: BugKind::Warning,
        severity: Severity::Medium,
        message: "Potential null reference",
        description: "DOM queries can return null. Consider adding null checks or using optional chaining.",
        matches: |line| {
            line.contains('.')
                && !line.contains("?.")
                && (line.contains("getElementById") || line.contains("querySelector"))
        },
        fix: Some(FixTemplate {
            title: "Add null check",
            description: "Use optional chaining or explicit null checking.",
            explanation: "Optional chaining (?.) safely accesses nested properties even if the reference is null or undefined.",
            rewrite: |line| MEMBER_ACCESS.replace(line, "${1}?.").into_owned(),
        }),
    },
    // Python
    Rule {
        id: "print",
        title: "print usage",
        scope: Scope::Python,
        kind: BugKind::Suggestion,
        severity: Severity::Low,
        message: "Print statement in code",
        description: "Print statements should be replaced with proper logging for production code. The logging module provides better control over output levels and destinations.",
        matches: |line| line.contains("print(") && !line.contains('#'),
        fix: Some(FixTemplate {
            title: "Use logging instead of print",
            description: "Replace print with logging for better production readiness.",
            explanation: "The logging module allows you to control log levels and output destinations, making it more suitable for production applications.",
            rewrite: |line| line.replacen("print(", "logging.info(", 1),
        }),
    },
    Rule {
        id: "type-hints",
        title: "missing type hints",
        scope: Scope::Python,
        kind: BugKind::Suggestion,
        severity: Severity::Low,
        message: "Missing type hints",
        description: "Type hints improve code readability and help catch errors early. Consider adding parameter and return type annotations.",
        matches: |line| line.starts_with("def ") && !line.contains("->") && !line.contains(':'),
        fix: None,
    },
    Rule {
        id: "inefficient-iteration",
        title: "index-based iteration",
        scope: Scope::Python,
        kind: BugKind::Warning,
        severity: Severity::Medium,
        message: "Inefficient iteration pattern",
        description: "Using range(len()) is less Pythonic and less efficient than direct iteration.",
        matches: |line| line.contains("range(len(") && line.contains("))"),
        fix: Some(FixTemplate {
            title: "Use direct iteration",
            description: "Iterate directly over the collection instead of using indices.",
            explanation: "Direct iteration is more readable, less error-prone, and often more efficient in Python.",
            rewrite: |_| {
                "# Use: for item in collection: instead of for i in range(len(collection)):"
                    .to_string()
            },
        }),
    },
    // Every language
    Rule {
        id: "todo",
        title: "marker comments",
        scope: Scope::Any,
        kind: BugKind::Suggestion,
        severity: Severity::Low,
        message: "TODO/FIXME comment found",
        description: "This line contains a TODO, FIXME, or HACK comment indicating incomplete or problematic code.",
        matches: |line| line.contains("TODO") || line.contains("FIXME") || line.contains("HACK"),
        fix: None,
    },
    Rule {
        id: "long-line",
        title: "line length",
        scope: Scope::Any,
        kind: BugKind::Suggestion,
        severity: Severity::Low,
        message: "Line too long",
        description: "This line exceeds 120 characters. Consider breaking it into multiple lines for better readability.",
        matches: |line| line.encode_utf16().count() > MAX_LINE_LENGTH,
        fix: None,
    },
];

/// Substring containment, not tokenization: `if` inside `diff` counts.
fn is_missing_semicolon(line: &str) -> bool {
    !line.is_empty()
        && !line.ends_with(';')
        && !line.ends_with('{')
        && !line.ends_with('}')
        && !line.starts_with("//")
        && !line.contains("if")
        && !line.contains("for")
        && !line.contains("while")
        && !line.contains("function")
}

/// Look up a rule by id.
pub fn find_rule(id: &str) -> Option<&'static Rule> {
    RULES.iter().find(|r| r.id == id)
}
