//! Router and shared application state.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use sqlx::{Pool, Sqlite};
use tracing::info;

use spendlog_core::{ReceiptParser, SpendlogConfig, TextExtractor};

use crate::handlers;

#[derive(Clone)]
pub struct AppState {
    pub db: Pool<Sqlite>,
    pub extractor: Arc<TextExtractor>,
    pub parser: Arc<ReceiptParser>,
    pub config: Arc<SpendlogConfig>,
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(|| async { "spendlog is running" }))
        .route("/add_transaction", post(handlers::add_transaction))
        .route("/transactions", get(handlers::list_transactions))
        .route("/export", get(handlers::export_transactions))
        .with_state(state)
}

pub async fn run_server(pool: Pool<Sqlite>, config: SpendlogConfig) -> anyhow::Result<()> {
    let extractor = TextExtractor::from_config(&config.ocr, &config.vision);
    let state = AppState {
        db: pool,
        extractor: Arc::new(extractor),
        parser: Arc::new(ReceiptParser::new()),
        config: Arc::new(config),
    };

    let addr = state.config.server.bind_addr.clone();
    let app = app(state);

    info!("server listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr.as_str()).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
