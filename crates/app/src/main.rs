//! Storefront CLI

use std::process::ExitCode;

use clap::Parser;
use storefront_app::observability;

use crate::cli::Cli;

mod cli;

#[tokio::main]
#[expect(clippy::print_stderr, reason = "errors are reported on stderr")]
async fn main() -> ExitCode {
    let _env = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(error) = observability::init(&cli.config.logging) {
        eprintln!("{error}");

        return ExitCode::FAILURE;
    }

    match cli.run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{error}");

            ExitCode::FAILURE
        }
    }
}
