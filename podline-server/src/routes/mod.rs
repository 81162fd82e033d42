use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

use podline_config::Config;

use crate::{
    handlers::{fetch_info_handler, ping_handler},
    infra::app_state::AppState,
};

pub const FETCH_INFO: &str = "/api/fetch_info";
pub const PING: &str = "/ping";

pub fn create_api_router() -> Router<AppState> {
    Router::new().route(FETCH_INFO, post(fetch_info_handler))
}

/// Full application: routes, tracing and CORS, with state attached.
pub fn create_app(state: AppState) -> Router {
    let cors = cors_layer(state.config());

    Router::new()
        .route(PING, get(ping_handler))
        .merge(create_api_router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

/// Permissive in dev mode, allow-list otherwise.
pub fn cors_layer(config: &Config) -> CorsLayer {
    if config.dev_mode {
        return CorsLayer::permissive();
    }

    let allow_origin = if config.cors.is_wildcard_included() {
        AllowOrigin::any()
    } else {
        let origins: Vec<HeaderValue> = config
            .cors
            .allowed_origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!(%origin, "ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}
