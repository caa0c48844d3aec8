//! HTTP client for the Gestelit backend.
//!
//! Thin JSON helpers shared by the typed endpoint wrappers. Error bodies of
//! the shape `{"error": "<CODE>"}` become `ApiError::Domain`; everything
//! else is classified by transport layer.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::error::ApiError;
use crate::config::ServerConfig;

/// Wire shape of backend domain rejections.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Wire shape of collection fetches (`{"items": [...]}`).
#[derive(Debug, Deserialize)]
pub(crate) struct ItemsEnvelope<T> {
    pub items: Vec<T>,
}

pub struct Client {
    base_url: String,
    token: Option<String>,
    http: reqwest::Client,
}

impl Client {
    pub fn new(server: &ServerConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("gestelit-console/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(server.timeout_secs))
            .build()
            .map_err(|e| ApiError::network(e.to_string()))?;

        Ok(Self {
            base_url: server.base_url.trim_end_matches('/').to_string(),
            token: server.token.clone(),
            http,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorized(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let req = self.authorized(self.http.get(self.url(path)));
        Self::decode(req.send().await?).await
    }

    pub(crate) async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let req = self.authorized(self.http.post(self.url(path))).json(body);
        Self::decode(req.send().await?).await
    }

    pub(crate) async fn post_unit<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), ApiError> {
        let req = self.authorized(self.http.post(self.url(path))).json(body);
        Self::expect_success(req.send().await?).await
    }

    pub(crate) async fn put_unit<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), ApiError> {
        let req = self.authorized(self.http.put(self.url(path))).json(body);
        Self::expect_success(req.send().await?).await
    }

    pub(crate) async fn delete_unit(&self, path: &str) -> Result<(), ApiError> {
        let req = self.authorized(self.http.delete(self.url(path)));
        Self::expect_success(req.send().await?).await
    }

    async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ApiError> {
        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(Self::classify_failure(status.as_u16(), &body));
        }
        serde_json::from_str(&body).map_err(|e| ApiError::decode(e.to_string()))
    }

    async fn expect_success(resp: reqwest::Response) -> Result<(), ApiError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }
        let body = resp.text().await.unwrap_or_default();
        Err(Self::classify_failure(status.as_u16(), &body))
    }

    fn classify_failure(status: u16, body: &str) -> ApiError {
        if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
            tracing::debug!(code = %parsed.error, status, "backend domain rejection");
            return ApiError::domain(parsed.error);
        }
        // Keep error bodies short in logs and banners
        let message: String = body.chars().take(200).collect();
        ApiError::http(status, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_server() -> ServerConfig {
        ServerConfig {
            base_url: "http://localhost:7031/api/".to_string(),
            token: Some("t0ken".to_string()),
            timeout_secs: 10,
        }
    }

    #[test]
    fn test_url_joins_without_double_slash() {
        let client = Client::new(&test_server()).unwrap();
        assert_eq!(
            client.url("/stations/s1"),
            "http://localhost:7031/api/stations/s1"
        );
        assert_eq!(client.url("workers"), "http://localhost:7031/api/workers");
    }

    #[test]
    fn test_domain_code_parsed_from_error_body() {
        let err = Client::classify_failure(409, r#"{"error":"DUPLICATE_STATION"}"#);
        assert_eq!(err.domain_code(), Some("DUPLICATE_STATION"));
    }

    #[test]
    fn test_non_code_body_becomes_http_error() {
        let err = Client::classify_failure(502, "<html>bad gateway</html>");
        match err {
            ApiError::Http { status, .. } => assert_eq!(status, 502),
            other => panic!("expected Http error, got {other:?}"),
        }
    }

    #[test]
    fn test_long_bodies_truncated() {
        let body = "x".repeat(5000);
        match Client::classify_failure(500, &body) {
            ApiError::Http { message, .. } => assert_eq!(message.len(), 200),
            other => panic!("expected Http error, got {other:?}"),
        }
    }

    #[test]
    fn test_items_envelope_shape() {
        let envelope: ItemsEnvelope<String> =
            serde_json::from_str(r#"{"items":["a","b"]}"#).unwrap();
        assert_eq!(envelope.items, vec!["a", "b"]);
    }
}
