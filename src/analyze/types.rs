//! Core types for analysis results.

use serde::{Deserialize, Serialize};

/// Languages the analyzer accepts.
///
/// Only JavaScript, TypeScript and Python have dedicated rules; the rest run
/// the language-independent checks only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Javascript,
    Typescript,
    Python,
    Java,
    Cpp,
    Go,
    Rust,
}

impl Language {
    pub const ALL: [Language; 7] = [
        Language::Javascript,
        Language::Typescript,
        Language::Python,
        Language::Java,
        Language::Cpp,
        Language::Go,
        Language::Rust,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Javascript => "javascript",
            Language::Typescript => "typescript",
            Language::Python => "python",
            Language::Java => "java",
            Language::Cpp => "cpp",
            Language::Go => "go",
            Language::Rust => "rust",
        }
    }

    /// Human-readable name.
    pub fn label(&self) -> &'static str {
        match self {
            Language::Javascript => "JavaScript",
            Language::Typescript => "TypeScript",
            Language::Python => "Python",
            Language::Java => "Java",
            Language::Cpp => "C++",
            Language::Go => "Go",
            Language::Rust => "Rust",
        }
    }

    /// File extensions associated with this language (without dot).
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Language::Javascript => &["js", "jsx", "mjs", "cjs"],
            Language::Typescript => &["ts", "tsx", "mts", "cts"],
            Language::Python => &["py", "pyw"],
            Language::Java => &["java"],
            Language::Cpp => &["cpp", "cc", "cxx", "hpp", "hh", "hxx", "h"],
            Language::Go => &["go"],
            Language::Rust => &["rs"],
        }
    }

    /// Determine the language from a file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.to_ascii_lowercase();
        Language::ALL
            .into_iter()
            .find(|lang| lang.extensions().contains(&ext.as_str()))
    }

    /// Whether the JavaScript-family rules apply.
    pub fn is_javascript_family(&self) -> bool {
        matches!(self, Language::Javascript | Language::Typescript)
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "javascript" | "js" => Ok(Language::Javascript),
            "typescript" | "ts" => Ok(Language::Typescript),
            "python" | "py" => Ok(Language::Python),
            "java" => Ok(Language::Java),
            "cpp" | "c++" => Ok(Language::Cpp),
            "go" | "golang" => Ok(Language::Go),
            "rust" | "rs" => Ok(Language::Rust),
            _ => Err(format!("unknown language: {}", s)),
        }
    }
}

/// Bug classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BugKind {
    Error,
    Warning,
    Suggestion,
}

impl std::fmt::Display for BugKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BugKind::Error => write!(f, "error"),
            BugKind::Warning => write!(f, "warning"),
            BugKind::Suggestion => write!(f, "suggestion"),
        }
    }
}

/// Severity levels for bugs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::High => write!(f, "high"),
            Severity::Medium => write!(f, "medium"),
            Severity::Low => write!(f, "low"),
        }
    }
}

/// A flagged issue on one line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bug {
    pub id: String,
    pub line: usize,
    #[serde(rename = "type")]
    pub kind: BugKind,
    pub message: String,
    pub description: String,
    pub severity: Severity,
}

impl Bug {
    /// Identifier of the rule that produced this bug, recovered from the id.
    pub fn rule_id(&self) -> Option<&str> {
        self.id
            .strip_prefix("bug-")
            .and_then(|rest| rest.split_once('-'))
            .map(|(_, rule)| rule)
    }
}

/// A suggested rewrite for the line a bug was found on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fix {
    pub id: String,
    pub bug_id: String,
    pub title: String,
    pub description: String,
    pub code: String,
    pub explanation: String,
}

/// Educational note attached to a source line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Explanation {
    pub id: String,
    pub line: usize,
    pub code: String,
    pub explanation: String,
    pub concepts: Vec<String>,
}

/// Overall quality rating, best first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl Quality {
    pub fn as_str(&self) -> &'static str {
        match self {
            Quality::Excellent => "excellent",
            Quality::Good => "good",
            Quality::Fair => "fair",
            Quality::Poor => "poor",
        }
    }

    /// Whether this rating is worse than `threshold`.
    pub fn is_worse_than(&self, threshold: Quality) -> bool {
        *self > threshold
    }
}

impl std::fmt::Display for Quality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Quality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "excellent" => Ok(Quality::Excellent),
            "good" => Ok(Quality::Good),
            "fair" => Ok(Quality::Fair),
            "poor" => Ok(Quality::Poor),
            _ => Err(format!("unknown quality: {}", s)),
        }
    }
}

/// The output of one analyzer invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub bugs: Vec<Bug>,
    pub fixes: Vec<Fix>,
    pub explanations: Vec<Explanation>,
    pub overall_quality: Quality,
    pub suggestions: Vec<String>,
}

impl AnalysisResult {
    /// Find the bug a fix refers to.
    pub fn bug_for(&self, fix: &Fix) -> Option<&Bug> {
        self.bugs.iter().find(|b| b.id == fix.bug_id)
    }

    /// Number of bugs of the given kind.
    pub fn count_kind(&self, kind: BugKind) -> usize {
        self.bugs.iter().filter(|b| b.kind == kind).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_from_str() {
        assert_eq!("javascript".parse::<Language>(), Ok(Language::Javascript));
        assert_eq!("JS".parse::<Language>(), Ok(Language::Javascript));
        assert_eq!("c++".parse::<Language>(), Ok(Language::Cpp));
        assert_eq!("golang".parse::<Language>(), Ok(Language::Go));
        assert!("cobol".parse::<Language>().is_err());
    }

    #[test]
    fn test_language_from_extension() {
        assert_eq!(Language::from_extension("py"), Some(Language::Python));
        assert_eq!(Language::from_extension("TSX"), Some(Language::Typescript));
        assert_eq!(Language::from_extension("rs"), Some(Language::Rust));
        assert_eq!(Language::from_extension("md"), None);
    }

    #[test]
    fn test_bug_rule_id() {
        let bug = Bug {
            id: "bug-12-null-check".to_string(),
            line: 12,
            kind: BugKind::Warning,
            message: String::new(),
            description: String::new(),
            severity: Severity::Medium,
        };
        assert_eq!(bug.rule_id(), Some("null-check"));
    }

    #[test]
    fn test_quality_ordering() {
        assert!(Quality::Poor.is_worse_than(Quality::Good));
        assert!(!Quality::Good.is_worse_than(Quality::Good));
        assert!(!Quality::Excellent.is_worse_than(Quality::Fair));
    }

    #[test]
    fn test_serialized_field_names() {
        let result = AnalysisResult {
            bugs: vec![Bug {
                id: "bug-1-var".to_string(),
                line: 1,
                kind: BugKind::Warning,
                message: "m".to_string(),
                description: "d".to_string(),
                severity: Severity::Medium,
            }],
            fixes: vec![Fix {
                id: "fix-bug-1-var".to_string(),
                bug_id: "bug-1-var".to_string(),
                title: "t".to_string(),
                description: "d".to_string(),
                code: "c".to_string(),
                explanation: "e".to_string(),
            }],
            explanations: vec![],
            overall_quality: Quality::Good,
            suggestions: vec![],
        };

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["overallQuality"], "good");
        assert_eq!(json["bugs"][0]["type"], "warning");
        assert_eq!(json["bugs"][0]["severity"], "medium");
        assert_eq!(json["fixes"][0]["bugId"], "bug-1-var");
    }
}
