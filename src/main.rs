use legajo_gate::config::Config;
use legajo_gate::db::MySqlConnector;
use legajo_gate::services::LoginGate;
use legajo_gate::ui;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "legajo_gate=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    let config = Config::from_env()?;

    tracing::info!("Starting legajo-gate...");
    tracing::info!(
        "Credential store at {} (digest: {}, timeout: {:?})",
        config.db_addr(),
        config.digest_scheme,
        config.auth_timeout
    );

    let connector = MySqlConnector::new(
        &config.db_host,
        config.db_port,
        &config.db_name,
        config.db_timezone.clone(),
    );
    let mut gate = LoginGate::from_config(connector, &config);

    // Terminal input blocks, keep it off the runtime
    while let Some(submission) = tokio::task::spawn_blocking(ui::read_submission).await?? {
        match gate.authenticate(&submission.legajo, &submission.secret).await {
            Ok(session) => {
                ui::show_success(session.legajo(), session.role_user());
                break;
            }
            Err(e) => ui::show_failure(&e),
        }
    }

    if gate.session().is_some() {
        tokio::signal::ctrl_c().await?;
    }

    gate.sign_out().await;
    tracing::info!("legajo-gate stopped");
    Ok(())
}
