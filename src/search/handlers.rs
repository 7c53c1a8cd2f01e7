use super::types::{RefreshResponse, SearchParams, SearchResponse};
use crate::catalog::source::CatalogSource;
use crate::error::Error;
use crate::store::memory::PictureStore;
use crate::store::types::StoreStats;

use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::{Extension, Json};
use std::sync::Arc;
use std::time::Instant;

pub async fn handle_search<S>(
    Path(query): Path<String>,
    Query(params): Query<SearchParams>,
    Extension(store): Extension<Arc<PictureStore<S>>>,
) -> (StatusCode, Json<SearchResponse>)
where
    S: CatalogSource + 'static,
{
    let start = Instant::now();

    match store.search(&query, params.field.as_deref()) {
        Ok(results) => {
            tracing::info!(
                "Search result for: {} returned: {} results and took {:.3} msec",
                query,
                results.len(),
                start.elapsed().as_secs_f64() * 1000.0
            );
            (StatusCode::OK, Json(SearchResponse { results }))
        }
        Err(e) => {
            tracing::error!("Search for {} failed: {}", query, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(SearchResponse { results: vec![] }),
            )
        }
    }
}

pub async fn handle_refresh<S>(
    Extension(store): Extension<Arc<PictureStore<S>>>,
) -> (StatusCode, Json<RefreshResponse>)
where
    S: CatalogSource + 'static,
{
    match store.synchronize().await {
        Ok(report) => (
            StatusCode::OK,
            Json(RefreshResponse {
                success: true,
                report: Some(report),
                error: None,
            }),
        ),
        Err(e) => {
            tracing::error!("On-demand refresh failed: {}", e);
            let status = match e {
                Error::Auth(_) => StatusCode::BAD_GATEWAY,
                _ => StatusCode::SERVICE_UNAVAILABLE,
            };
            (
                status,
                Json(RefreshResponse {
                    success: false,
                    report: None,
                    error: Some(e.to_string()),
                }),
            )
        }
    }
}

pub async fn handle_stats<S>(
    Extension(store): Extension<Arc<PictureStore<S>>>,
) -> (StatusCode, Json<StoreStats>)
where
    S: CatalogSource + 'static,
{
    (StatusCode::OK, Json(store.stats()))
}
