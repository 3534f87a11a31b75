use anyhow::Context;
use dotenvy::dotenv;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use mergington::config::ServerConfig;
use mergington::database::ActivityDirectory;
use mergington::web;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info")),
        )
        .init();

    let config = ServerConfig::from_env();
    let directory = ActivityDirectory::seeded();
    info!(
        version = env!("CARGO_PKG_VERSION"),
        activities = directory.len(),
        static_dir = %config.static_dir.display(),
        "activity directory loaded"
    );

    let app = web::router(directory, &config.static_dir);

    let addr = config.bind_addr().context("invalid HOST/PORT")?;
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            let fallback = config.fallback_addr().context("invalid fallback port")?;
            warn!(%addr, error = %e, %fallback, "bind failed, trying fallback port");
            tokio::net::TcpListener::bind(fallback)
                .await
                .with_context(|| format!("could not bind {}", fallback))?
        }
    };

    let bound_addr = listener.local_addr()?;
    info!("serving on http://{}", bound_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "could not install ctrl-c handler");
        std::future::pending::<()>().await;
    }
    info!("shutting down, directory state is discarded");
}
