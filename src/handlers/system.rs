use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::{json, Value};

use crate::app::AppState;
use crate::error::ApiError;

use super::docs::SWAGGER_PATH;

/// GET / - Service name, version and endpoint summary
pub async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "name": "Cake API",
        "version": version,
        "description": "API for managing cakes",
        "endpoints": {
            "list": "GET /cakes",
            "add": "POST /cakes",
            "get": "GET /cakes/:cake_id",
            "update": "PUT /cakes/:cake_id",
            "delete": "DELETE /cakes/:cake_id",
            "health": "GET /health",
        },
        "documentation": SWAGGER_PATH,
    }))
}

/// GET /health - Reports whether the cake store is reachable
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();
    let backend = state.cakes.backend();

    match state.cakes.health_check().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok",
                "backend": backend
            })),
        ),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "timestamp": now,
                    "database": "unavailable",
                    "backend": backend
                })),
            )
        }
    }
}

/// Any path without a route
pub async fn not_found() -> ApiError {
    ApiError::not_found("Route not found")
}

/// Known path, unsupported method
pub async fn method_not_allowed() -> ApiError {
    ApiError::method_not_allowed("Method not allowed")
}
