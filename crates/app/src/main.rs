//! Marquee CLI

use std::process::ExitCode;

use tracing::error;

use marquee_app::observability;

use crate::cli::Cli;

mod cli;
mod shutdown;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::load() {
        Ok(cli) => cli,
        Err(parse_error) => parse_error.exit(),
    };

    if let Err(init_error) = observability::init_subscriber(&cli.logging) {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized, must use eprintln for init errors"
        )]
        {
            eprintln!("{init_error}");
        }

        return ExitCode::FAILURE;
    }

    match cli.run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(run_error) => {
            error!("{run_error}");

            ExitCode::FAILURE
        }
    }
}
