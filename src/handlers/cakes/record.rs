use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, Path, State},
};

use crate::app::AppState;
use crate::database::models::Cake;
use crate::middleware::{ApiResponse, ApiResult, MessageBody};

use super::utils::{parse_cake_id, parse_json_body};

/// GET /cakes/:cake_id - Get a single cake by ID
pub async fn get(State(state): State<AppState>, Path(cake_id): Path<String>) -> ApiResult<Cake> {
    let id = parse_cake_id(&cake_id)?;
    let cake = state.cakes.get(id).await?;
    Ok(ApiResponse::success(cake))
}

/// PUT /cakes/:cake_id - Update the fields present in the body
pub async fn put(
    State(state): State<AppState>,
    Path(cake_id): Path<String>,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<MessageBody> {
    let id = parse_cake_id(&cake_id)?;
    let payload = parse_json_body(&body?)?;
    state.cakes.update(id, payload).await?;

    Ok(ApiResponse::message("Cake updated successfully"))
}

/// DELETE /cakes/:cake_id - Permanently remove a cake
pub async fn delete(
    State(state): State<AppState>,
    Path(cake_id): Path<String>,
) -> ApiResult<MessageBody> {
    let id = parse_cake_id(&cake_id)?;
    state.cakes.delete(id).await?;

    Ok(ApiResponse::message("Cake deleted successfully"))
}
