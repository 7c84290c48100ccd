use std::sync::Arc;

use axum::http::{header, HeaderName, HeaderValue, Method, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tower::Layer;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::set_header::SetResponseHeaderLayer;
use tracing::{info, warn};
use wheel_shared::constants::API_WHEEL_PREFIX;

use crate::config::Config;
use crate::games::backend_wheel_game::create_router as create_wheel_game_router;
use crate::store::KeyValueStore;

mod config;
mod error;
mod games;
mod logging;
mod middleware;
mod services;
mod store;

#[derive(Clone)]
pub struct AppState {
    pub store: KeyValueStore,
    pub config: Arc<Config>,
}

pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

fn cors_layer(config: &Config) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(config.allowed_origins.clone())
        .allow_methods(vec![Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers(vec![
            HeaderName::from_static("content-type"),
            HeaderName::from_static("x-requested-with"),
        ])
}

pub fn build_app(state: AppState) -> Router {
    let static_dir = &state.config.static_dir;

    // Unknown paths get index.html so the frontend router can take over
    let static_service =
        ServeDir::new(static_dir).not_found_service(ServeFile::new(static_dir.join("index.html")));
    let static_service = SetResponseHeaderLayer::if_not_present(
        header::CACHE_CONTROL,
        HeaderValue::from_static("no-cache"),
    )
    .layer(static_service);

    Router::new()
        .route("/api/health_check", get(health_check))
        .nest(API_WHEEL_PREFIX, create_wheel_game_router(state.clone()))
        .fallback_service(static_service)
        .layer(cors_layer(&state.config))
        .with_state(state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::from_path(".env").ok();
    logging::setup();

    let config = Config::from_env()?;

    let store = match &config.redis_url {
        Some(url) => KeyValueStore::redis(url)?,
        None => {
            warn!("REDIS_URL not set, wheel segments will only live in memory");
            KeyValueStore::memory()
        }
    };
    info!("Using {} store, serving frontend from {:?}", store.backend_name(), config.static_dir);

    let bind_addr = config.bind_addr;
    let app = build_app(AppState {
        store,
        config: Arc::new(config),
    });

    let listener = TcpListener::bind(bind_addr).await?;
    info!("🎡 Wheel listening on {}", bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
