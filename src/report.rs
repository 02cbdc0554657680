//! Output formatting for analysis results.
//!
//! Supports three output formats:
//! - Pretty: colored terminal panels for human readability
//! - JSON: the analysis result plus a small envelope, for programmatic use
//! - SARIF: Static Analysis Results Interchange Format for IDE/CI integration

use colored::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt::Write as _;

use crate::analyze::{find_rule, AnalysisResult, Bug, BugKind, Language, Quality};

// =============================================================================
// JSON Format
// =============================================================================

/// JSON report: the analysis result with its fields at the top level.
#[derive(Serialize, Deserialize)]
pub struct JsonReport {
    pub version: String,
    pub path: String,
    pub language: Language,
    #[serde(flatten)]
    pub result: AnalysisResult,
}

/// Render results as pretty-printed JSON.
pub fn render_json(path: &str, language: Language, result: &AnalysisResult) -> anyhow::Result<String> {
    let report = JsonReport {
        version: env!("CARGO_PKG_VERSION").to_string(),
        path: path.to_string(),
        language,
        result: result.clone(),
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

/// Write results in JSON format.
pub fn write_json(path: &str, language: Language, result: &AnalysisResult) -> anyhow::Result<()> {
    println!("{}", render_json(path, language, result)?);
    Ok(())
}

// =============================================================================
// SARIF Format
// =============================================================================

const SARIF_VERSION: &str = "2.1.0";
const SARIF_SCHEMA: &str = "https://raw.githubusercontent.com/oasis-tcs/sarif-spec/master/Schemata/sarif-schema-2.1.0.json";
const TOOL_NAME: &str = "decode";

#[derive(Serialize, Deserialize)]
pub struct SarifReport {
    pub version: String,
    #[serde(rename = "$schema")]
    pub schema: String,
    pub runs: Vec<SarifRun>,
}

#[derive(Serialize, Deserialize)]
pub struct SarifRun {
    pub tool: SarifTool,
    pub results: Vec<SarifResult>,
}

#[derive(Serialize, Deserialize)]
pub struct SarifTool {
    pub driver: SarifDriver,
}

#[derive(Serialize, Deserialize)]
pub struct SarifDriver {
    pub name: String,
    pub version: String,
    pub rules: Vec<SarifRule>,
}

#[derive(Serialize, Deserialize)]
pub struct SarifRule {
    pub id: String,
    pub name: String,
    #[serde(rename = "shortDescription")]
    pub short_description: SarifMessage,
    #[serde(rename = "fullDescription", skip_serializing_if = "Option::is_none")]
    pub full_description: Option<SarifMessage>,
    #[serde(rename = "defaultConfiguration")]
    pub default_config: SarifRuleConfig,
}

#[derive(Serialize, Deserialize)]
pub struct SarifRuleConfig {
    pub level: String,
}

#[derive(Serialize, Deserialize)]
pub struct SarifResult {
    #[serde(rename = "ruleId")]
    pub rule_id: String,
    pub level: String,
    pub message: SarifMessage,
    pub locations: Vec<SarifLocation>,
}

#[derive(Serialize, Deserialize)]
pub struct SarifMessage {
    pub text: String,
}

#[derive(Serialize, Deserialize)]
pub struct SarifLocation {
    #[serde(rename = "physicalLocation")]
    pub physical_location: SarifPhysicalLocation,
}

#[derive(Serialize, Deserialize)]
pub struct SarifPhysicalLocation {
    #[serde(rename = "artifactLocation")]
    pub artifact_location: SarifArtifact,
    pub region: SarifRegion,
}

#[derive(Serialize, Deserialize)]
pub struct SarifArtifact {
    pub uri: String,
}

#[derive(Serialize, Deserialize)]
pub struct SarifRegion {
    #[serde(rename = "startLine")]
    pub start_line: usize,
}

fn map_kind_to_level(kind: BugKind) -> &'static str {
    match kind {
        BugKind::Error => "error",
        BugKind::Warning => "warning",
        BugKind::Suggestion => "note",
    }
}

fn sarif_rule_id(bug: &Bug) -> String {
    bug.rule_id().unwrap_or("unknown").to_string()
}

/// Build a SARIF report for one analyzed input.
pub fn build_sarif(path: &str, result: &AnalysisResult) -> SarifReport {
    let rule_ids: BTreeSet<String> = result.bugs.iter().map(sarif_rule_id).collect();

    let rules: Vec<SarifRule> = rule_ids
        .iter()
        .map(|id| match find_rule(id) {
            Some(rule) => SarifRule {
                id: id.clone(),
                name: rule.title.to_string(),
                short_description: SarifMessage {
                    text: rule.message.to_string(),
                },
                full_description: Some(SarifMessage {
                    text: rule.description.to_string(),
                }),
                default_config: SarifRuleConfig {
                    level: map_kind_to_level(rule.kind).to_string(),
                },
            },
            None => SarifRule {
                id: id.clone(),
                name: "Unknown".to_string(),
                short_description: SarifMessage {
                    text: "Unknown rule type".to_string(),
                },
                full_description: None,
                default_config: SarifRuleConfig {
                    level: "warning".to_string(),
                },
            },
        })
        .collect();

    let results: Vec<SarifResult> = result
        .bugs
        .iter()
        .map(|bug| SarifResult {
            rule_id: sarif_rule_id(bug),
            level: map_kind_to_level(bug.kind).to_string(),
            message: SarifMessage {
                text: format!("{}: {}", bug.message, bug.description),
            },
            locations: vec![SarifLocation {
                physical_location: SarifPhysicalLocation {
                    artifact_location: SarifArtifact {
                        uri: path.replace('\\', "/"),
                    },
                    region: SarifRegion {
                        start_line: bug.line.max(1),
                    },
                },
            }],
        })
        .collect();

    SarifReport {
        version: SARIF_VERSION.to_string(),
        schema: SARIF_SCHEMA.to_string(),
        runs: vec![SarifRun {
            tool: SarifTool {
                driver: SarifDriver {
                    name: TOOL_NAME.to_string(),
                    version: env!("CARGO_PKG_VERSION").to_string(),
                    rules,
                },
            },
            results,
        }],
    }
}

/// Write results in SARIF format.
pub fn write_sarif(path: &str, result: &AnalysisResult) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&build_sarif(path, result))?;
    println!("{}", json);
    Ok(())
}

// =============================================================================
// Pretty Format
// =============================================================================

/// Render results as colored, human-readable panels.
pub fn render_pretty(path: &str, language: Language, result: &AnalysisResult) -> String {
    let mut out = String::new();

    // Writing to a String cannot fail.
    let _ = write_header(&mut out, path, language);
    let _ = write_summary(&mut out, result);
    let _ = write_bugs(&mut out, result);
    let _ = write_fixes(&mut out, result);
    let _ = write_explanations(&mut out, result);

    out
}

/// Write results in pretty (human-readable) format.
pub fn write_pretty(path: &str, language: Language, result: &AnalysisResult) {
    print!("{}", render_pretty(path, language, result));
}

fn write_header(out: &mut String, path: &str, language: Language) -> std::fmt::Result {
    writeln!(out)?;
    writeln!(
        out,
        "  {} v{}",
        TOOL_NAME.cyan().bold(),
        env!("CARGO_PKG_VERSION")
    )?;
    writeln!(out)?;
    writeln!(out, "  {}{}", "Source:   ".dimmed(), path)?;
    writeln!(out, "  {}{}", "Language: ".dimmed(), language.label())?;
    writeln!(out)
}

fn colored_quality(quality: Quality) -> ColoredString {
    let text = quality.as_str();
    match quality {
        Quality::Excellent => text.green().bold(),
        Quality::Good => text.blue(),
        Quality::Fair => text.yellow(),
        Quality::Poor => text.red(),
    }
}

fn write_summary(out: &mut String, result: &AnalysisResult) -> std::fmt::Result {
    writeln!(
        out,
        "  Code quality: {}  {}",
        colored_quality(result.overall_quality),
        format!(
            "({} bugs, {} fixes, {} explanations)",
            result.bugs.len(),
            result.fixes.len(),
            result.explanations.len()
        )
        .dimmed()
    )?;

    if !result.suggestions.is_empty() {
        writeln!(out)?;
        writeln!(out, "  {}", "Suggestions:".bold())?;
        for suggestion in &result.suggestions {
            writeln!(out, "    {} {}", "•".magenta(), suggestion)?;
        }
    }
    writeln!(out)
}

fn kind_tag(kind: BugKind) -> ColoredString {
    match kind {
        BugKind::Error => "ERROR".red(),
        BugKind::Warning => "WARN ".yellow(),
        BugKind::Suggestion => "HINT ".blue(),
    }
}

fn write_bugs(out: &mut String, result: &AnalysisResult) -> std::fmt::Result {
    writeln!(out, "  {} ({}):", "Bugs".bold(), result.bugs.len())?;
    writeln!(out)?;

    if result.bugs.is_empty() {
        writeln!(out, "    {}", "No bugs detected!".green())?;
        writeln!(out, "    {}", "Your code looks clean.".dimmed())?;
        return writeln!(out);
    }

    for bug in &result.bugs {
        writeln!(
            out,
            "    {} {} {}  {}",
            kind_tag(bug.kind),
            format!("line {:<4}", bug.line).dimmed(),
            bug.message,
            format!("[{}]", bug.severity).dimmed()
        )?;
        writeln!(out, "               {}", bug.description)?;
        writeln!(out)?;
    }
    Ok(())
}

fn write_fixes(out: &mut String, result: &AnalysisResult) -> std::fmt::Result {
    writeln!(out, "  {} ({}):", "Fixes".bold(), result.fixes.len())?;
    writeln!(out)?;

    if result.fixes.is_empty() {
        writeln!(out, "    {}", "No fixes needed!".green())?;
        return writeln!(out);
    }

    for fix in &result.fixes {
        let line = result.bug_for(fix).map(|b| b.line).unwrap_or(0);
        writeln!(
            out,
            "    {} {}",
            fix.title.green(),
            format!("(line {})", line).dimmed()
        )?;
        writeln!(out, "      {}", fix.description)?;
        writeln!(out, "      {} {}", "→".cyan(), fix.code.cyan())?;
        writeln!(out, "      {}", fix.explanation.dimmed())?;
        writeln!(out)?;
    }
    Ok(())
}

fn write_explanations(out: &mut String, result: &AnalysisResult) -> std::fmt::Result {
    writeln!(
        out,
        "  {} ({}):",
        "Explanations".bold(),
        result.explanations.len()
    )?;
    writeln!(out)?;

    if result.explanations.is_empty() {
        writeln!(out, "    {}", "No explanations available".dimmed())?;
        return writeln!(out);
    }

    for explanation in &result.explanations {
        writeln!(
            out,
            "    {} {}",
            format!("line {:<4}", explanation.line).dimmed(),
            explanation.code.blue()
        )?;
        writeln!(out, "              {}", explanation.explanation)?;
        writeln!(
            out,
            "              {}",
            explanation.concepts.join(" · ").magenta()
        )?;
        writeln!(out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze::analyze;

    #[test]
    fn test_json_has_result_fields_at_top_level() {
        let result = analyze("var x = 1;", Language::Javascript);
        let json = render_json("input.js", Language::Javascript, &result).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["path"], "input.js");
        assert_eq!(value["language"], "javascript");
        assert_eq!(value["overallQuality"], "good");
        assert_eq!(value["bugs"][0]["id"], "bug-1-var");
        assert_eq!(value["fixes"][0]["bugId"], "bug-1-var");
    }

    #[test]
    fn test_json_round_trip() {
        let result = analyze("print('hi')\n# TODO", Language::Python);
        let json = render_json("-", Language::Python, &result).unwrap();
        let parsed: JsonReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.result, result);
    }

    #[test]
    fn test_sarif_levels_and_rules() {
        let result = analyze("var x = 1\n// TODO", Language::Javascript);
        let sarif = build_sarif("src/app.js", &result);
        let run = &sarif.runs[0];

        let rule_ids: Vec<&str> = run.tool.driver.rules.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(rule_ids, vec!["semicolon", "todo", "var"]);

        let var = run.results.iter().find(|r| r.rule_id == "var").unwrap();
        assert_eq!(var.level, "warning");
        let todo = run.results.iter().find(|r| r.rule_id == "todo").unwrap();
        assert_eq!(todo.level, "note");
        assert_eq!(todo.locations[0].physical_location.region.start_line, 2);
        assert_eq!(
            todo.locations[0].physical_location.artifact_location.uri,
            "src/app.js"
        );
    }

    #[test]
    fn test_pretty_empty_panels() {
        colored::control::set_override(false);
        let result = analyze("", Language::Rust);
        let text = render_pretty("-", Language::Rust, &result);
        assert!(text.contains("Code quality: excellent"));
        assert!(text.contains("No bugs detected!"));
        assert!(text.contains("No fixes needed!"));
        assert!(text.contains("No explanations available"));
    }

    #[test]
    fn test_pretty_lists_findings() {
        colored::control::set_override(false);
        let result = analyze("console.log(x)", Language::Javascript);
        let text = render_pretty("app.js", Language::Javascript, &result);
        assert!(text.contains("Language: JavaScript"));
        assert!(text.contains("Console statement in code"));
        assert!(text.contains("// console.log(x) // TODO: Remove debug statement"));
        assert!(text.contains("Bugs (2):"));
    }
}
