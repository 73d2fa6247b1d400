use anyhow::Result;
use axum::{
    extract::DefaultBodyLimit,
    http::{header, Method},
    routing::get,
    serve, Router,
};
use bomview_utils::{init_logging, AppConfig, BomViewError, LinkResolver, RecordPageResolver};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

mod error;
mod handlers;
mod middleware;
mod routes;

use handlers::health_check;
use middleware::request_id_middleware;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = AppConfig::load().unwrap_or_else(|e| {
        eprintln!("{}; using defaults", BomViewError::from(e));
        AppConfig::default()
    });

    init_logging(&config.logging)?;
    info!("Starting BOM viewer service");

    let app = create_app(&config);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let listener = TcpListener::bind(&addr).await?;
    info!("BOM viewer listening on {}", addr);

    serve(listener, app).await?;

    Ok(())
}

pub fn create_app(config: &AppConfig) -> Router {
    let resolver: Arc<dyn LinkResolver> =
        Arc::new(RecordPageResolver::new(config.links.base_url.clone()));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", routes::create_api_routes())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods([Method::GET, Method::POST])
                        .allow_headers([header::CONTENT_TYPE]),
                )
                .layer(DefaultBodyLimit::max(config.server.max_request_size))
                .layer(axum::middleware::from_fn(request_id_middleware)),
        )
        .with_state(AppState {
            config: config.clone(),
            resolver,
        })
}

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub resolver: Arc<dyn LinkResolver>,
}
