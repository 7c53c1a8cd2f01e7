use axum::Extension;
use axum::{
    Router,
    routing::{get, post},
};
use clap::Parser;
use image_search::catalog::fetcher::CatalogFetcher;
use image_search::config::Config;
use image_search::search::handlers::{handle_refresh, handle_search, handle_stats};
use image_search::store::memory::PictureStore;
use image_search::store::refresh::spawn_refresh_loop;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .init();

    tracing::info!(
        "Mirroring {} (page cap {})",
        config.catalog_url,
        config.page_cap
    );

    // 1. Remote catalog + store:
    let fetcher = CatalogFetcher::from_config(&config)?;
    let store = Arc::new(PictureStore::new(fetcher));

    // 2. Initial pass, before the first search is served:
    match store.synchronize().await {
        Ok(report) => tracing::info!(
            "Initial cache ready: {} pictures ({} skipped)",
            store.len(),
            report.skipped
        ),
        Err(e) => tracing::error!("Initial cache refresh failed, serving an empty cache: {}", e),
    }

    // 3. Scheduled refresh:
    match config.refresh_interval() {
        Some(every) => {
            tracing::info!("Refreshing cache every {:?}", every);
            spawn_refresh_loop(store.clone(), every);
        }
        None => tracing::info!("Scheduled refresh disabled"),
    }

    // 4. HTTP Router:
    let app = Router::new()
        .route("/search/:query", get(handle_search::<CatalogFetcher>))
        .route("/refresh", post(handle_refresh::<CatalogFetcher>))
        .route("/stats", get(handle_stats::<CatalogFetcher>))
        .layer(Extension(store));

    // 5. Start HTTP server:
    tracing::info!("HTTP server listening on {}", config.bind);

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
