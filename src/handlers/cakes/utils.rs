use axum::body::Bytes;
use serde_json::Value;

use crate::error::ApiError;

/// Parse the `cake_id` path segment. Anything that is not an i32 can never
/// name a stored cake, so it is reported as not found.
pub fn parse_cake_id(raw: &str) -> Result<i32, ApiError> {
    raw.parse::<i32>().map_err(|_| ApiError::cake_not_found())
}

/// Decode a request body as JSON, reporting syntax errors as 400s
pub fn parse_json_body(body: &Bytes) -> Result<Value, ApiError> {
    if body.is_empty() {
        return Err(ApiError::invalid_json("Request body must be a JSON object"));
    }
    serde_json::from_slice(body).map_err(|e| ApiError::invalid_json(format!("Invalid JSON: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn parses_integer_ids_only() {
        assert_eq!(parse_cake_id("42").unwrap(), 42);
        assert_eq!(parse_cake_id("abc").unwrap_err().status_code(), StatusCode::NOT_FOUND);
        assert_eq!(parse_cake_id("99999999999").unwrap_err().status_code(), StatusCode::NOT_FOUND);
        assert_eq!(parse_cake_id(" 1").unwrap_err().status_code(), StatusCode::NOT_FOUND);
        assert_eq!(parse_cake_id("1\t").unwrap_err().status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn rejects_empty_and_malformed_bodies() {
        let err = parse_json_body(&Bytes::new()).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_JSON");

        let err = parse_json_body(&Bytes::from_static(b"{\"name\": ")).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

        let value = parse_json_body(&Bytes::from_static(b"{\"name\":\"Scone\"}")).unwrap();
        assert_eq!(value["name"], "Scone");
    }
}
