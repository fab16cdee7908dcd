//! Router setup and the state injected into every handler.
use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::api::handlers;
use crate::catalog::{HttpImageSource, StockModelCatalog};
use crate::config::Config;
use crate::error::AppResult;
use crate::replicate::ReplicateClient;
use crate::tryon::TryOnService;

/// Immutable per-process state. Built once in `main`, shared by `Arc`.
pub struct AppState {
    pub config: Config,
    pub service: TryOnService,
}

impl AppState {
    /// Wire the real Replicate client and HTTP image source from `config`.
    pub fn from_config(config: Config) -> AppResult<Self> {
        let catalog = StockModelCatalog::load(config.stock_catalog_path.as_deref())?;
        let provider = ReplicateClient::new(
            config.replicate_api_base.clone(),
            config.replicate_api_token.clone().unwrap_or_default(),
        )
        .with_polling(config.poll_interval, config.poll_timeout);
        let images = HttpImageSource::new(config.stock_fetch_timeout);
        let service = TryOnService::new(&config, Arc::new(catalog), Arc::new(provider), Arc::new(images));
        Ok(AppState { config, service })
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    let body_limit = state.config.max_upload_bytes;
    Router::new()
        .route("/", get(handlers::root))
        .route("/generate", post(handlers::generate))
        .route("/upload-garment", post(handlers::upload_garment))
        .route("/catalog", get(handlers::catalog))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
