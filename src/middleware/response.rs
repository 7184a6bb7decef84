use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::json;

/// Wrapper for successful API responses. The payload is serialized as-is,
/// without an envelope, so list endpoints return a bare JSON array.
#[derive(Debug)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
}

/// Confirmation body returned by mutating endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageBody {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a successful API response with 200 status
    pub fn success(data: T) -> Self {
        Self { data }
    }
}

impl ApiResponse<MessageBody> {
    pub fn message(message: impl Into<String>) -> Self {
        Self::success(MessageBody {
            message: message.into(),
            id: None,
        })
    }

    /// Message plus the id of the record it refers to
    pub fn message_with_id(message: impl Into<String>, id: i32) -> Self {
        Self::success(MessageBody {
            message: message.into(),
            id: Some(id),
        })
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        match serde_json::to_value(&self.data) {
            Ok(value) => (StatusCode::OK, Json(value)).into_response(),
            Err(e) => {
                tracing::error!("Failed to serialize response data: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "error": true,
                        "message": "Failed to serialize response data",
                        "code": "INTERNAL_SERVER_ERROR"
                    })),
                )
                    .into_response()
            }
        }
    }
}

pub type ApiResult<T> = Result<ApiResponse<T>, crate::error::ApiError>;
