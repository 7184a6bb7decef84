use axum::{
    http::header,
    response::IntoResponse,
};

/// Published OpenAPI description of the cakes endpoints
pub const SWAGGER_JSON: &str = include_str!("../../static/swagger.json");

/// Path the Swagger document is served from
pub const SWAGGER_PATH: &str = "/cake_api/swagger/swagger.json";

/// GET /cake_api/swagger/swagger.json
pub async fn swagger() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/json")], SWAGGER_JSON)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn swagger_document_matches_cake_shape() {
        let doc: Value = serde_json::from_str(SWAGGER_JSON).unwrap();
        let cake = &doc["definitions"]["Cake"]["properties"];

        assert_eq!(cake["id"]["type"], "integer");
        assert_eq!(cake["id"]["format"], "int32");
        assert_eq!(cake["name"]["type"], "string");
        assert_eq!(cake["comment"]["type"], "string");
        assert_eq!(cake["imageUrl"]["type"], "string");
        assert_eq!(cake["yumFactor"]["type"], "integer");
        assert_eq!(cake["yumFactor"]["format"], "int32");

        assert!(doc["paths"]["/cakes"]["get"].is_object());
        assert!(doc["paths"]["/cakes/{cake_id}"]["delete"].is_object());
    }
}
