#![forbid(unsafe_code)]

mod output;
mod rank;

use clap::Parser;
use output::{CliError, OutputMode};
use std::env;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    name = "linkrank",
    author,
    version,
    about = "linkrank: PageRank and HITS scores for a citation graph",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,

    /// Output format (pretty, text, json). Overrides LINKRANK_FORMAT.
    #[arg(long, value_enum)]
    format: Option<OutputMode>,

    #[command(flatten)]
    rank: rank::RankArgs,
}

impl Cli {
    fn output_mode(&self) -> OutputMode {
        output::resolve_output_mode(self.format)
    }
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("LINKRANK_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "linkrank=debug,info"
        } else {
            "linkrank=info,warn"
        })
    });

    let format = env::var("LINKRANK_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    // Scores own stdout; diagnostics go to stderr.
    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

/// Map an error chain onto the most specific code it carries.
fn classify(err: &anyhow::Error) -> CliError {
    let message = format!("{err:#}");
    if let Some(load) = err.chain().find_map(|c| c.downcast_ref::<linkrank_core::LoadError>()) {
        return CliError::load(load, message);
    }
    let code = err
        .chain()
        .find_map(|c| c.downcast_ref::<linkrank_core::ConfigError>())
        .map_or(
            linkrank_core::ErrorCode::InternalUnexpected,
            linkrank_core::ConfigError::code,
        );
    CliError::new(code, message)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let output = cli.output_mode();
    let stdout = std::io::stdout();
    let result = rank::run_rank(&cli.rank, output, &mut stdout.lock());

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let cli_err = classify(&err);
            let stderr = std::io::stderr();
            let mut w = stderr.lock();
            // stderr may be closed; the exit status still reports failure
            let _ = output::render_error(&mut w, output, &cli_err);
            ExitCode::FAILURE
        }
    }
}
