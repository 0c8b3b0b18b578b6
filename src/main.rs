//! Storefront command-line shell

use std::process::ExitCode;

use clap::Parser;

mod cli;

#[expect(clippy::print_stderr, reason = "top-level error reporting")]
#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Load .env file if present (ignore if missing)
    _ = dotenvy::dotenv();

    let cli = cli::Cli::parse();

    if let Err(error) = cli::logging::init_subscriber(&cli.config.logging) {
        eprintln!("failed to initialise logging: {error}");
    }

    match cli.run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{error}");
            ExitCode::FAILURE
        }
    }
}
