use anyhow::Context;
use reelmark_enrich::Resolver;
use reelmark_server::config::ServerConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::from_env();

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());
    if config.log_json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    let enrich = &config.enrich;
    info!(
        youtube_api = enrich.youtube_api_key.is_some(),
        catalog = enrich.tmdb_api_key.is_some(),
        scraping_proxy = enrich.scraper_api_key.is_some(),
        http_timeout = ?enrich.http_timeout,
        deadline = ?enrich.deadline,
        "enrichment configured"
    );

    let resolver = Resolver::new(config.enrich.clone()).context("failed to build HTTP client")?;
    let app = reelmark_server::routes::build_router(reelmark_server::state::AppState::new(resolver));

    let listener = tokio::net::TcpListener::bind(&config.bind)
        .await
        .context("failed to bind")?;
    info!(addr = %config.bind, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
