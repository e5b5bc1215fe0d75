use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use addin_harvest::{Config, Harvester};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let harvester = match Harvester::new(Config::default()) {
        Ok(harvester) => harvester,
        Err(e) => {
            tracing::error!(error = %e, "failed to initialize harvester");
            return ExitCode::from(1);
        }
    };

    match harvester.run().await {
        Ok(summary) => {
            println!(
                "harvested {} listings: {} resolved, {} unavailable, {} skipped",
                summary.listed, summary.resolved, summary.unavailable, summary.skipped
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "harvest aborted");
            ExitCode::from(1)
        }
    }
}
