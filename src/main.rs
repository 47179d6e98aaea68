use std::path::PathBuf;
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use safenames::{Config, SafenamesError};
use tracing::info;

#[derive(Parser)]
#[command(name = "safenames")]
#[command(version)]
#[command(
    about = "Catch and correct directory and file names that are not cross compatible.",
    long_about = None
)]
struct Cli {
    /// Files or directories to clean
    input: Vec<PathBuf>,

    /// Collapse multiple whitespace into one " ", also trims leading and trailing whitespace
    #[arg(short, long)]
    collapsewhite: bool,

    /// List every file as it is processed
    #[arg(short, long)]
    verbose: bool,

    /// More debug info (implies --verbose)
    #[arg(long)]
    debug: bool,
}

fn init_tracing(debug: bool) {
    let fallback = if debug { "safenames=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.input.is_empty() {
        let _ = Cli::command().print_help();
        return ExitCode::SUCCESS;
    }

    init_tracing(cli.debug);

    let config = Config {
        collapse_white: cli.collapsewhite,
        verbose: cli.verbose,
        debug: cli.debug,
    };
    info!(?config, inputs = cli.input.len(), "starting");

    match safenames::audit().inputs(cli.input).config(config).run() {
        Ok(results) => {
            println!(
                "{} visited, {} renamed, {} deleted, {} declined, {} protected, {} case conflicts, {} errors",
                results.visited,
                results.renamed,
                results.deleted,
                results.declined,
                results.protected,
                results.duplicates.len(),
                results.errors.len(),
            );
            ExitCode::SUCCESS
        }
        Err(SafenamesError::Cancelled) => {
            println!("^C");
            ExitCode::from(130)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
