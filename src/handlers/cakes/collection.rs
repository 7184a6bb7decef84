use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
};

use crate::app::AppState;
use crate::database::models::Cake;
use crate::middleware::{ApiResponse, ApiResult, MessageBody};

use super::utils::parse_json_body;

/// GET /cakes - List all cakes
pub async fn get(State(state): State<AppState>) -> ApiResult<Vec<Cake>> {
    let cakes = state.cakes.list().await?;
    Ok(ApiResponse::success(cakes))
}

/// POST /cakes - Add a new cake
pub async fn post(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<MessageBody> {
    let payload = parse_json_body(&body?)?;
    let cake = state.cakes.add(payload).await?;

    Ok(ApiResponse::message_with_id("Cake added successfully", cake.id))
}
