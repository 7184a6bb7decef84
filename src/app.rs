use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    routing::get,
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::config::{AppConfig, SecurityConfig};
use crate::database::CakeStore;
use crate::handlers;
use crate::services::CakeService;

/// Shared per-process state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub cakes: CakeService,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(store: Arc<dyn CakeStore>, config: AppConfig) -> Self {
        Self {
            cakes: CakeService::new(store),
            config: Arc::new(config),
        }
    }
}

pub fn app(state: AppState) -> Router {
    let max_body = state.config.api.max_request_size_bytes;
    let cors = cors_layer(&state.config.security);

    let mut router = Router::new()
        // Public
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route(handlers::docs::SWAGGER_PATH, get(handlers::swagger))
        .merge(cake_routes())
        .fallback(handlers::not_found)
        .with_state(state);

    if let Some(cors) = cors {
        router = router.layer(cors);
    }

    // Global middleware
    router.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(DefaultBodyLimit::max(max_body)),
    )
}

fn cake_routes() -> Router<AppState> {
    use handlers::cakes;

    Router::new()
        // Collection operations
        .route(
            "/cakes",
            get(cakes::cakes_get)
                .post(cakes::cakes_post)
                .fallback(handlers::method_not_allowed),
        )
        // Record-level operations
        .route(
            "/cakes/:cake_id",
            get(cakes::cake_get)
                .put(cakes::cake_put)
                .delete(cakes::cake_delete)
                .fallback(handlers::method_not_allowed),
        )
}

fn cors_layer(security: &SecurityConfig) -> Option<CorsLayer> {
    if !security.enable_cors {
        return None;
    }

    if security.cors_origins.iter().any(|o| o == "*") {
        return Some(CorsLayer::permissive());
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    if origins.is_empty() {
        return None;
    }

    Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers([header::CONTENT_TYPE]),
    )
}
