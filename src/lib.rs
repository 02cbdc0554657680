//! Decode - heuristic code analyzer.
//!
//! Decode scans a snippet of source code line by line with a fixed battery
//! of text heuristics. It reports bugs, proposes a rewrite for each line it
//! can fix, attaches short educational explanations to recognizable
//! constructs and rates the snippet's overall quality.
//!
//! # Architecture
//!
//! - `analyze`: the rule tables and the `analyze` entry point
//! - `quality`: overall quality rating from bug counts
//! - `config`: optional YAML config file
//! - `report`: output formatting (pretty, JSON, SARIF)
//! - `assistant`: client for the hosted chat-completion reviewer
//! - `cli`: command-line subcommands
//!
//! # Example
//!
//! ```
//! use decode::{analyze, Language, Quality};
//!
//! let result = analyze("var x = 1;", Language::Javascript);
//! assert_eq!(result.bugs[0].id, "bug-1-var");
//! assert_eq!(result.fixes[0].code, "const x = 1;");
//! assert_eq!(result.overall_quality, Quality::Good);
//! ```

pub mod analyze;
pub mod assistant;
pub mod cli;
pub mod config;
pub mod quality;
pub mod report;

pub use analyze::{
    analyze, AnalysisResult, Bug, BugKind, Explanation, Fix, Language, Quality, Severity,
};
pub use assistant::{AssistantClient, AssistantError};
pub use config::Config;
