//! Client for the quiz backend.
//!
//! The backend owns scraping, generation and storage; this module only
//! speaks its four JSON endpoints. [`QuizBackend`] is the seam the rest of
//! the crate programs against, and [`ApiClient`] implements it over HTTP.

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ApiConfig;
use crate::error::{Error, Result};
use crate::quiz::{Quiz, QuizSummary};

/// Body of a quiz generation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// Wikipedia article URL.
    pub url: String,
    /// Regenerate even if the backend has a cached quiz for this URL.
    pub force_regenerate: bool,
    /// Have the backend store the article's raw HTML.
    pub store_raw_html: bool,
}

#[derive(Debug, Deserialize)]
struct DeleteResponse {
    #[serde(default)]
    message: String,
}

/// Operations offered by the quiz backend.
#[async_trait]
pub trait QuizBackend: Send + Sync {
    /// Generate (or fetch the cached) quiz for an article.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    async fn generate_quiz(&self, request: &GenerateRequest) -> Result<Quiz>;

    /// List previously generated quizzes, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    async fn history(&self) -> Result<Vec<QuizSummary>>;

    /// Fetch a quiz by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the quiz doesn't exist.
    async fn quiz(&self, id: i64) -> Result<Quiz>;

    /// Delete a quiz by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the quiz doesn't exist.
    async fn delete_quiz(&self, id: i64) -> Result<()>;
}

/// HTTP implementation of [`QuizBackend`].
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client from the `[api]` configuration section.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client can't
    /// be constructed.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let base_url = config.base_url()?;
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
        })
    }

    /// The backend base URL, without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{path}", self.base_url);
        debug!(method = method.as_str(), url = url.as_str(), "backend request");
        self.http.request(method, url)
    }
}

#[async_trait]
impl QuizBackend for ApiClient {
    async fn generate_quiz(&self, request: &GenerateRequest) -> Result<Quiz> {
        let response = self
            .request(Method::POST, "/api/generate-quiz")
            .json(request)
            .send()
            .await?;
        decode(response).await
    }

    async fn history(&self) -> Result<Vec<QuizSummary>> {
        let response = self.request(Method::GET, "/api/history").send().await?;
        decode(response).await
    }

    async fn quiz(&self, id: i64) -> Result<Quiz> {
        let response = self
            .request(Method::GET, &format!("/api/quiz/{id}"))
            .send()
            .await?;
        decode(response).await
    }

    async fn delete_quiz(&self, id: i64) -> Result<()> {
        let response = self
            .request(Method::DELETE, &format!("/api/quiz/{id}"))
            .send()
            .await?;
        let body: DeleteResponse = decode(response).await?;
        debug!(id, message = %body.message, "quiz deleted");
        Ok(())
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    let body = response.bytes().await?;
    if !status.is_success() {
        let detail = extract_detail(&body);
        warn!(status = status.as_u16(), detail = ?detail, "backend request failed");
        return Err(Error::api(status.as_u16(), detail));
    }
    Ok(serde_json::from_slice(&body)?)
}

/// Pull a human-readable message out of a backend error body.
///
/// The backend reports `{"detail": "..."}`; request validation failures
/// report `{"detail": [{"msg": "..."}, ...]}`.
#[must_use]
pub fn extract_detail(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    match value.get("detail")? {
        Value::String(detail) => Some(detail.clone()),
        Value::Array(items) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect();
            (!messages.is_empty()).then(|| messages.join("; "))
        }
        _ => None,
    }
}
