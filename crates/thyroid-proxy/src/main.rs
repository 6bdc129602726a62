use thyroid_proxy::{router, ProxyConfig, ProxyState};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = ProxyConfig::from_env();
    if config.api_key.is_none() {
        warn!("GEMINI_API_KEY is not set; every request will get the fallback answer");
    }

    let state = ProxyState::new(&config)?;
    let app = router(state);

    let addr = config.addr();
    info!(model = %config.model, "listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for ctrl-c: {err}");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
