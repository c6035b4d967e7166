//! HTTP surface: axum router, shared state and server loop.

mod extract;
mod handlers;
mod response;

pub use extract::{parse_request, AppJson};

use axum::{
    routing::{get, post},
    Router,
};
use std::path::Path;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::adapters::GeminiClient;
use crate::core::advisor::Advisor;
use crate::core::schemes::SchemeCatalog;
use crate::core::{ConfigProvider, TextGenerator};
use crate::utils::error::Result;

pub type SharedGenerator = Arc<dyn TextGenerator>;

/// Read-only state shared by every request.
#[derive(Clone)]
pub struct AppState {
    pub advisor: Arc<Advisor<SharedGenerator>>,
    pub model: Arc<str>,
}

impl AppState {
    pub fn new(advisor: Advisor<SharedGenerator>, model: &str) -> Self {
        Self {
            advisor: Arc::new(advisor),
            model: Arc::from(model),
        }
    }

    /// Gemini client plus scheme catalogue, both taken from `config`.
    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        let generator: SharedGenerator = Arc::new(GeminiClient::from_config(config)?);
        let catalog = SchemeCatalog::load(config.schemes_file().map(Path::new))?;
        Ok(Self::new(
            Advisor::with_catalog(generator, catalog),
            config.model(),
        ))
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/financial-advisor", post(handlers::financial_advisor))
        .route("/business-advisor", post(handlers::business_advisor))
        .route("/loan-advisor", post(handlers::loan_advisor))
        .route("/api/recommend-scheme", post(handlers::recommend_scheme))
        .route("/api/scheme-details", post(handlers::scheme_details))
        .route("/get-advice", post(handlers::get_advice))
        .route("/supported-query-types", get(handlers::supported_query_types))
        .route("/income-sources", get(handlers::income_sources))
        .route("/health", get(handlers::health))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serves until Ctrl-C.
pub async fn serve(listener: TcpListener, state: AppState) -> Result<()> {
    let addr = listener.local_addr()?;
    tracing::info!("Advisor API listening on http://{}", addr);

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Advisor API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
