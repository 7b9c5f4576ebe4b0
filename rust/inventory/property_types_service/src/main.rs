use anyhow::Context;
use property_types_service::{
    config::Config, domain::models::KindRegistry, entrypoint::Entrypoint,
    inbound::session_file::SessionFile,
};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let config = Config::from_env().context("expected to be able to generate config")?;
    Entrypoint::new(config.environment).init();

    tracing::info!(session_file = %config.session_file.display(), "initialized config");

    let raw = std::fs::read_to_string(&config.session_file)
        .with_context(|| format!("could not read {}", config.session_file.display()))?;
    let session: SessionFile =
        serde_json::from_str(&raw).context("session file is not a valid edit session")?;

    let registry = Arc::new(KindRegistry::new(&config.feature_flags));
    let report = session.dry_run(registry).await?;

    for error in &report.errors {
        tracing::warn!(%error, "session cannot be saved");
    }
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
