use std::process::ExitCode;

mod cli;
mod config;
mod errors;
mod runner;
mod server;
mod services;
mod utils;

use cli::Cli;
use utils::logging;

#[tokio::main]
async fn main() -> ExitCode {
    // Parse CLI arguments; exits with usage when there is nothing to do
    let config = match Cli::parse_config().await {
        Ok(config) => config,
        Err(e) => return fail(e),
    };

    if let Err(e) = logging::init_logging(config.verbose) {
        return fail(e);
    }
    tracing::debug!("Effective config: {:?}", config);

    if let Err(e) = runner::run(config).await {
        tracing::debug!("Run failed: {:?}", e);
        return fail(e);
    }

    ExitCode::SUCCESS
}

fn fail(err: errors::ThttpError) -> ExitCode {
    eprintln!("thttp: {}", err);
    ExitCode::FAILURE
}
