use anyhow::Context;

use smilewidgets_infra::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    smilewidgets_observability::init();

    let config = AppConfig::from_env().context("failed to read configuration")?;
    if config.admin_token.is_none() {
        tracing::warn!("ADMIN_TOKEN not set; admin routes are unauthenticated");
    }

    let services = smilewidgets_api::app::services::build_services(&config)
        .await
        .context("failed to initialise pricing store")?;
    let app = smilewidgets_api::app::build_app(services, config.admin_token.clone());

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
