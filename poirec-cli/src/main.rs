//! Entry point for the `poirec` command-line interface.
#![forbid(unsafe_code)]

use poirec_cli::CliError;

fn main() {
    match poirec_cli::run() {
        Ok(()) => {}
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        Err(err) => {
            eprintln!("poirec: {err}");
            std::process::exit(1);
        }
    }
}
