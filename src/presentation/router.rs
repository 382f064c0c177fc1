// Static preview server for the dashboard site
use axum::{
    http::{header, HeaderValue},
    routing::get,
    Router,
};
use std::path::Path;
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::presentation::handlers::health_check;

/// Serve `site_dir` as-is. Responses are never cached so an updated
/// manifest shows up on reload.
pub fn site_router(site_dir: &Path) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .fallback_service(ServeDir::new(site_dir).append_index_html_on_directories(true))
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
}
