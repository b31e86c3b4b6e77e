use clahe_batch::cli::{execute, fatal_error_lines, init_logging, Cli};
use clap::Parser;
use std::process::ExitCode;
use tracing::{error, warn};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match execute(&cli).await {
        Ok(summary) => {
            if !summary.is_complete_success() {
                warn!(
                    "Finished with {} failed and {} skipped files",
                    summary.failed, summary.skipped
                );
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            for line in fatal_error_lines(&err) {
                error!("{line}");
            }
            ExitCode::FAILURE
        }
    }
}
