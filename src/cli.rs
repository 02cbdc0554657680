//! Command-line interface for decode.

use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::analyze::{self, catalog, Language, Quality};
use crate::assistant::AssistantClient;
use crate::config::{self, Config};
use crate::report;

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILED: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// Path value meaning "read from standard input".
const STDIN_PATH: &str = "-";

/// Heuristic code analyzer.
///
/// Decode scans source code line by line, flags common issues, proposes
/// rewrites for the lines it flags, explains recognizable constructs and
/// rates the overall quality of the snippet.
#[derive(Parser)]
#[command(name = "decode")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a source file (or stdin) and report bugs, fixes and explanations
    #[command(visible_alias = "check")]
    Analyze(AnalyzeArgs),
    /// Ask the hosted assistant for a free-text review
    Explain(ExplainArgs),
    /// List or search the rule catalogue
    Rules(RulesArgs),
    /// List supported languages
    Languages,
    /// Create a decode.yaml config from the template
    Init(InitArgs),
}

/// Input shared by commands that read source code.
#[derive(Args)]
pub struct SourceArgs {
    /// File to read, or "-" for stdin
    #[arg(default_value = STDIN_PATH)]
    pub path: PathBuf,

    /// Source language (default: from file extension, then config, then javascript)
    #[arg(short, long)]
    pub language: Option<String>,

    /// Path to config YAML file (default: auto-discover)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Arguments for the analyze command.
#[derive(Args)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Output format: pretty, json, or sarif
    #[arg(short, long)]
    pub format: Option<String>,

    /// Exit non-zero when the quality is worse than this level
    #[arg(long)]
    pub fail_on: Option<String>,
}

/// Arguments for the explain command.
#[derive(Args)]
pub struct ExplainArgs {
    #[command(flatten)]
    pub source: SourceArgs,
}

/// Arguments for the rules command.
#[derive(Args)]
pub struct RulesArgs {
    /// Only show entries whose title or description contains this term
    #[arg(short, long)]
    pub search: Option<String>,

    /// Print the catalogue as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the init command.
#[derive(Args)]
pub struct InitArgs {
    /// Output file path
    #[arg(short, long, default_value = "decode.yaml")]
    pub output: PathBuf,
}

/// Source text plus the display name used in reports.
struct Input {
    name: String,
    text: String,
}

fn read_input(path: &Path) -> anyhow::Result<Input> {
    if path.as_os_str() == STDIN_PATH {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        return Ok(Input {
            name: "<stdin>".to_string(),
            text,
        });
    }

    let text = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("cannot read {}: {}", path.display(), e))?;
    Ok(Input {
        name: path.to_string_lossy().to_string(),
        text,
    })
}

/// Resolve the language: flag, then file extension, then config, then JavaScript.
pub fn resolve_language(
    flag: Option<&str>,
    path: &Path,
    config: &Config,
) -> anyhow::Result<Language> {
    if let Some(flag) = flag {
        return flag.parse::<Language>().map_err(anyhow::Error::msg);
    }

    let from_extension = path
        .extension()
        .and_then(|e| e.to_str())
        .and_then(Language::from_extension);
    if let Some(language) = from_extension {
        return Ok(language);
    }

    Ok(config.default_language()?.unwrap_or(Language::Javascript))
}

/// Load the config, printing the error and returning None on failure.
fn load_config(path: Option<&Path>) -> Option<Config> {
    match Config::load(path) {
        Ok((config, _)) => Some(config),
        Err(e) => {
            eprintln!("Error: {}", e);
            None
        }
    }
}

/// Run the analyze command.
pub fn run_analyze(args: &AnalyzeArgs) -> anyhow::Result<i32> {
    let Some(config) = load_config(args.source.config.as_deref()) else {
        return Ok(EXIT_ERROR);
    };

    let format = args
        .format
        .as_deref()
        .unwrap_or_else(|| config.get_format());
    if !config::FORMATS.contains(&format) {
        eprintln!(
            "Error: invalid format {:?}, must be one of: {}",
            format,
            config::FORMATS.join(", ")
        );
        return Ok(EXIT_ERROR);
    }

    let fail_on = match &args.fail_on {
        Some(q) => match q.parse::<Quality>() {
            Ok(q) => Some(q),
            Err(e) => {
                eprintln!("Error: {}", e);
                return Ok(EXIT_ERROR);
            }
        },
        None => config.fail_on()?,
    };

    let language = match resolve_language(
        args.source.language.as_deref(),
        &args.source.path,
        &config,
    ) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Run 'decode languages' to see supported languages");
            return Ok(EXIT_ERROR);
        }
    };

    let input = match read_input(&args.source.path) {
        Ok(i) => i,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(EXIT_ERROR);
        }
    };

    tracing::debug!(path = %input.name, %language, %format, "analyzing");
    let result = analyze::analyze(&input.text, language);

    match format {
        "json" => report::write_json(&input.name, language, &result)?,
        "sarif" => report::write_sarif(&input.name, &result)?,
        _ => report::write_pretty(&input.name, language, &result),
    }

    match fail_on {
        Some(threshold) if result.overall_quality.is_worse_than(threshold) => Ok(EXIT_FAILED),
        _ => Ok(EXIT_SUCCESS),
    }
}

fn spinner(message: &str) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.magenta} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    bar.set_message(message.to_string());
    bar.enable_steady_tick(Duration::from_millis(80));
    bar
}

/// Run the explain command.
pub fn run_explain(args: &ExplainArgs) -> anyhow::Result<i32> {
    let Some(config) = load_config(args.source.config.as_deref()) else {
        return Ok(EXIT_ERROR);
    };

    let input = match read_input(&args.source.path) {
        Ok(i) => i,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(EXIT_ERROR);
        }
    };

    if input.text.trim().is_empty() {
        eprintln!("Error: nothing to explain, the input is empty");
        return Ok(EXIT_ERROR);
    }

    let outcome = AssistantClient::from_env(config.assistant).and_then(|client| {
        let bar = spinner("Asking the assistant...");
        let answer = client.explain_blocking(&input.text);
        bar.finish_and_clear();
        answer
    });

    match outcome {
        Ok(text) => {
            println!("{}", text);
            Ok(EXIT_SUCCESS)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "assistant request failed");
            eprintln!("An error occurred: {}", e);
            Ok(EXIT_ERROR)
        }
    }
}

/// Run the rules command.
pub fn run_rules(args: &RulesArgs) -> anyhow::Result<i32> {
    let entries = match &args.search {
        Some(term) => catalog::search(term),
        None => catalog::entries(),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(EXIT_SUCCESS);
    }

    if entries.is_empty() {
        println!("No matching rules");
        return Ok(EXIT_SUCCESS);
    }

    for entry in &entries {
        let fix = if entry.has_fix { "fix" } else { "" };
        println!(
            "  {:<24} {:<12} {:<24} {}",
            entry.id, entry.category, entry.scope, fix
        );
        println!("      {}", entry.description);
    }

    Ok(EXIT_SUCCESS)
}

/// List supported languages.
pub fn run_languages() -> anyhow::Result<i32> {
    println!("Supported languages:");
    println!();

    for language in Language::ALL {
        let name = if language == Language::Javascript {
            format!("{} (default)", language.as_str())
        } else {
            language.as_str().to_string()
        };
        println!("  {:<20} {}", name, language.extensions().join(", "));
    }

    Ok(EXIT_SUCCESS)
}

/// Run the init command.
pub fn run_init(args: &InitArgs) -> anyhow::Result<i32> {
    if args.output.exists() {
        eprintln!("Error: file already exists: {}", args.output.display());
        eprintln!("Remove it or use --output to specify a different path");
        return Ok(EXIT_ERROR);
    }

    if let Some(parent) = args.output.parent() {
        if !parent.as_os_str().is_empty() && parent != Path::new(".") {
            if let Err(e) = std::fs::create_dir_all(parent) {
                eprintln!("Error: failed to create directory: {}", e);
                return Ok(EXIT_ERROR);
            }
        }
    }

    if let Err(e) = std::fs::write(&args.output, config::TEMPLATE) {
        eprintln!("Error: failed to write config: {}", e);
        return Ok(EXIT_ERROR);
    }

    println!("Created {}", args.output.display());
    println!();
    println!("Next steps:");
    println!("  1. Edit {} to set your defaults", args.output.display());
    println!("  2. Run: decode analyze <file> --config {}", args.output.display());

    Ok(EXIT_SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_language_precedence() {
        let config = Config::parse_str("language: go").unwrap();

        let lang = resolve_language(Some("py"), Path::new("main.rs"), &config).unwrap();
        assert_eq!(lang, Language::Python);

        let lang = resolve_language(None, Path::new("main.rs"), &config).unwrap();
        assert_eq!(lang, Language::Rust);

        let lang = resolve_language(None, Path::new("-"), &config).unwrap();
        assert_eq!(lang, Language::Go);

        let lang = resolve_language(None, Path::new("notes.txt"), &Config::default()).unwrap();
        assert_eq!(lang, Language::Javascript);

        assert!(resolve_language(Some("cobol"), Path::new("-"), &config).is_err());
    }

    #[test]
    fn test_cli_parses_subcommands() {
        let cli = Cli::try_parse_from(["decode", "check", "app.py", "--fail-on", "good"]).unwrap();
        match cli.command {
            Commands::Analyze(args) => {
                assert_eq!(args.source.path, PathBuf::from("app.py"));
                assert_eq!(args.fail_on.as_deref(), Some("good"));
                assert!(args.format.is_none());
            }
            _ => panic!("expected analyze"),
        }

        let cli = Cli::try_parse_from(["decode", "-v", "rules", "--search", "null"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Rules(_)));
    }

    #[test]
    fn test_analyze_exit_codes() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("app.js");
        std::fs::write(&source, "var x = 1\nvar y = 2\nvar z = 3\n").unwrap();
        let config = temp.path().join("decode.yaml");
        std::fs::write(&config, "format: json\n").unwrap();

        let args = |fail_on: Option<&str>| AnalyzeArgs {
            source: SourceArgs {
                path: source.clone(),
                language: None,
                config: Some(config.clone()),
            },
            format: None,
            fail_on: fail_on.map(String::from),
        };

        // Three var warnings is fair.
        assert_eq!(run_analyze(&args(None)).unwrap(), EXIT_SUCCESS);
        assert_eq!(run_analyze(&args(Some("fair"))).unwrap(), EXIT_SUCCESS);
        assert_eq!(run_analyze(&args(Some("good"))).unwrap(), EXIT_FAILED);
        assert_eq!(run_analyze(&args(Some("bogus"))).unwrap(), EXIT_ERROR);
    }

    #[test]
    fn test_analyze_missing_file() {
        let temp = TempDir::new().unwrap();
        let config = temp.path().join("decode.yaml");
        std::fs::write(&config, "").unwrap();
        let args = AnalyzeArgs {
            source: SourceArgs {
                path: temp.path().join("missing.js"),
                language: None,
                config: Some(config),
            },
            format: Some("json".to_string()),
            fail_on: None,
        };
        assert_eq!(run_analyze(&args).unwrap(), EXIT_ERROR);
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("nested").join("decode.yaml");
        let args = InitArgs {
            output: output.clone(),
        };

        assert_eq!(run_init(&args).unwrap(), EXIT_SUCCESS);
        assert_eq!(std::fs::read_to_string(&output).unwrap(), config::TEMPLATE);
        assert_eq!(run_init(&args).unwrap(), EXIT_ERROR);
    }
}
