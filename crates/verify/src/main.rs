use std::process::ExitCode;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use nucap_verify::config::{self, VerifyConfig};
use nucap_verify::connector::LiveConnector;
use nucap_verify::report::Reporter;

#[tokio::main]
async fn main() -> ExitCode {
    let env_files = config::load_env_files();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nucap_verify=info,nucap_db=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::debug!(?env_files, "Loaded env files");

    let mut reporter = Reporter::stdout();
    reporter.header();

    // --- Configuration ---
    let config = match VerifyConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            reporter.database_url_found(!matches!(
                e,
                nucap_verify::VerifyError::MissingDatabaseUrl
            ));
            tracing::error!(error = %e, "Invalid configuration");
            reporter.failed(&e);
            return ExitCode::FAILURE;
        }
    };
    reporter.database_url_found(true);

    // --- Checks ---
    match nucap_verify::run(&config, &LiveConnector, &mut reporter).await {
        Ok(summary) => {
            tracing::info!(
                university_id = summary.university_id,
                count = summary.count_after,
                "Verification passed"
            );
            reporter.passed();
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, step = ?e.step(), "Verification failed");
            reporter.failed(&e);
            ExitCode::FAILURE
        }
    }
}
