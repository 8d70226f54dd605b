use std::sync::Arc;
use std::time::Duration;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rolodex::engine::schema;
use rolodex::{Catalog, EngineClient};

use crate::handlers::{companies, discover, health, search, tags, AppState};

/// Startup readiness wait: attempts x delay, then degraded mode.
const READY_ATTEMPTS: u32 = 30;
const READY_DELAY: Duration = Duration::from_secs(2);

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub engine_url: String,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        ServerConfig {
            bind_addr: std::env::var("ROLODEX_BIND_ADDR")
                .unwrap_or_else(|_| "0.0.0.0:8000".to_string()),
            engine_url: std::env::var("ELASTICSEARCH_URL")
                .unwrap_or_else(|_| "http://localhost:9200".to_string()),
        }
    }
}

/// Build the application router. Separated from [`serve`] so tests can
/// drive the routes in-process against a stubbed engine.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/search", post(search::search))
        .route("/companies", post(companies::save_company))
        .route("/companies/:id", get(companies::get_company))
        .route(
            "/companies/:id/tags",
            post(companies::add_tag)
                .delete(companies::remove_tag)
                .get(companies::get_company_tags),
        )
        .route("/tags", get(tags::list_tags).post(tags::create_tag))
        .route("/suggest", get(discover::suggest))
        .route("/suggest/cities", get(discover::suggest_cities))
        .route("/filters", get(discover::filter_options))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::very_permissive().max_age(Duration::from_secs(86400)))
        .with_state(state)
}

pub async fn serve() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env();
    let engine = Arc::new(EngineClient::new(config.engine_url.clone()));

    if !engine.wait_until_ready(READY_ATTEMPTS, READY_DELAY).await {
        tracing::warn!(
            url = %config.engine_url,
            "Search engine unreachable after startup wait, proceeding in degraded state"
        );
    } else if let Err(e) = schema::ensure_companies_index(&engine).await {
        // Bootstrap is best-effort at startup; per-request calls surface
        // their own errors.
        tracing::error!(error = %e, "Failed to bootstrap companies index");
    }

    let state = Arc::new(AppState {
        catalog: Catalog::new(engine),
    });
    let app = router(state);

    tracing::info!("Starting rolodex server on {}", config.bind_addr);
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
