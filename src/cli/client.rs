use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use url::Url;

use crate::database::models::Cake;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("invalid server URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("API error ({status}): {message}")]
    Api { status: StatusCode, message: String },

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ClientError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Http(e) => e.status(),
            _ => None,
        }
    }
}

/// Confirmation returned by add/update/delete
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MessageResponse {
    pub message: String,
    #[serde(default)]
    pub id: Option<i32>,
}

/// HTTP client for a running Cake API server
#[derive(Clone)]
pub struct CakeClient {
    http: reqwest::Client,
    base_url: Url,
}

impl CakeClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Ok(Self {
            http: reqwest::Client::new(),
            base_url: Url::parse(base_url)?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub async fn list(&self) -> Result<Vec<Cake>, ClientError> {
        self.send(Method::GET, "/cakes", None).await
    }

    pub async fn get(&self, id: i32) -> Result<Cake, ClientError> {
        self.send(Method::GET, &format!("/cakes/{}", id), None).await
    }

    pub async fn add(&self, cake: Value) -> Result<MessageResponse, ClientError> {
        self.send(Method::POST, "/cakes", Some(cake)).await
    }

    pub async fn update(&self, id: i32, fields: Value) -> Result<MessageResponse, ClientError> {
        self.send(Method::PUT, &format!("/cakes/{}", id), Some(fields)).await
    }

    pub async fn delete(&self, id: i32) -> Result<MessageResponse, ClientError> {
        self.send(Method::DELETE, &format!("/cakes/{}", id), None).await
    }

    /// Raw `/health` body; a degraded server still answers with JSON
    pub async fn health(&self) -> Result<(StatusCode, Value), ClientError> {
        let response = self.http.get(self.base_url.join("/health")?).send().await?;
        let status = response.status();
        let body = response.json::<Value>().await?;
        Ok((status, body))
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<T, ClientError> {
        let mut request = self.http.request(method, self.base_url.join(path)?);
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(ClientError::Api {
                status,
                message: error_message(&text),
            });
        }

        Ok(serde_json::from_str(&text)?)
    }
}

/// Pull the `message` out of an API error body, falling back to the raw text
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_api_error_messages() {
        assert_eq!(
            error_message(r#"{"error":true,"message":"Cake not found","code":"NOT_FOUND"}"#),
            "Cake not found"
        );
        assert_eq!(error_message("Payload Too Large\n"), "Payload Too Large");
    }

    #[test]
    fn rejects_invalid_base_url() {
        assert!(matches!(CakeClient::new("not a url"), Err(ClientError::InvalidUrl(_))));
        let client = CakeClient::new("http://localhost:3000").unwrap();
        assert_eq!(client.base_url().as_str(), "http://localhost:3000/");
    }
}
