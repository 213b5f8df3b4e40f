//! Command-line interface for the poirec similarity ranker.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod error;
mod rank;

pub use error::CliError;

use rank::{RankArgs, run_rank};

pub(crate) const ARG_RECORDS: &str = "records";
pub(crate) const ARG_PROFILES: &str = "profiles";
pub(crate) const ARG_CATEGORIES: &str = "categories";
pub(crate) const ARG_TOP_K: &str = "top-k";
pub(crate) const ARG_STRATEGY: &str = "strategy";
pub(crate) const ARG_FORMAT: &str = "format";
pub(crate) const ARG_OUTPUT: &str = "output";
pub(crate) const ENV_RECORDS: &str = "POIREC_CMDS_RANK_RECORDS";

/// Run the poirec CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when arguments or configuration are invalid, inputs
/// cannot be read, ranking fails, or results cannot be written.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    init_logging(cli.verbose)?;
    match cli.command {
        Command::Rank(args) => run_rank(args),
    }
}

fn init_logging(verbose: bool) -> Result<(), CliError> {
    let default_directive = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| CliError::Logging {
            message: err.to_string(),
        })
}

#[derive(Debug, Parser)]
#[command(
    name = "poirec",
    about = "Rank points of interest by similarity to user-history profiles",
    version
)]
struct Cli {
    /// Log run summaries to stderr (overridden by `RUST_LOG`).
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Score businesses from a JSON-lines dump against reference profiles.
    Rank(RankArgs),
}

#[cfg(test)]
mod tests;
