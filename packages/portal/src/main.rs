use std::sync::Arc;

use anyhow::Context;
use portal::config::PortalAppConfig;
use portal::{AppContext, LogSurface, Portal, PortalSettings, TokioScheduler};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_target(false).init();

    let config = PortalAppConfig::load().context("Failed to load config")?;
    info!(
        backend = ?config.storage.backend,
        data_dir = %config.storage.data_dir.display(),
        "Portal starting"
    );

    let ctx = Arc::new(AppContext::pending(&config.storage));
    if let Err(e) = ctx.connect(&config.storage).await {
        warn!(error = %e, "Some stores failed to open, continuing without them");
    }

    let portal = Portal::new(
        ctx,
        Arc::new(LogSurface),
        Arc::new(TokioScheduler::new(tokio::runtime::Handle::current())),
        PortalSettings::from(&config),
    );

    let shown = portal.refresh().await;
    info!(slides = shown.carousel.len(), "Portal ready, press Ctrl-C to stop");

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for shutdown signal")?;
    info!("Shutting down");

    Ok(())
}
