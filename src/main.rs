//! Decode CLI entry point.

use clap::Parser;
use decode::cli::{self, Cli, Commands, EXIT_ERROR};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize logging on stderr.
///
/// `--verbose` forces debug output; otherwise `RUST_LOG` applies, with
/// warnings only by default.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("decode=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("decode=warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match &cli.command {
        Commands::Analyze(args) => cli::run_analyze(args),
        Commands::Explain(args) => cli::run_explain(args),
        Commands::Rules(args) => cli::run_rules(args),
        Commands::Languages => cli::run_languages(),
        Commands::Init(args) => cli::run_init(args),
    };

    let exit_code = match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            EXIT_ERROR
        }
    };

    std::process::exit(exit_code);
}
