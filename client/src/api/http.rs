//! HTTP Agent Backend
//!
//! Implements the AgentBackend trait over the backend's JSON/HTTP API.
//! The backend listens at a configurable base URL (default
//! http://localhost:5000) and exposes one POST endpoint per pipeline stage
//! plus health and thread-inspection endpoints.
//!
//! Error normalization happens here and nowhere else:
//! - transport failure with no response becomes ApiError::NetworkUnreachable,
//!   naming the configured base URL
//! - a non-success status becomes ApiError::Remote, message taken from the
//!   body's `error` field, then `message` field, then the status line
//! - anything else becomes ApiError::Unknown, keeping the source message

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::json;

use super::{
    extract_error_message, AgentBackend, ApiError, CritiqueResponse, DraftResponse,
    HealthResponse, PlanResponse, ResearchResponse, Result, ThreadHistory, ThreadState,
};

/// HTTP client for the agent backend
#[derive(Debug, Clone)]
pub struct HttpBackend {
    /// Base URL of the backend (no trailing slash)
    base_url: String,

    /// HTTP client for API requests
    client: Client,
}

impl HttpBackend {
    /// Create a new backend client
    ///
    /// A trailing slash on `base_url` is trimmed so endpoint paths join
    /// cleanly. No client-side timeout is set; each call makes exactly one
    /// attempt with the transport defaults.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    /// The configured base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Probe GET /health
    pub async fn health(&self) -> Result<HealthResponse> {
        self.get_json("/health", &[]).await
    }

    /// Fetch the current agent state of a thread (GET /api/get-state)
    pub async fn thread_state(&self, thread_id: &str) -> Result<ThreadState> {
        self.get_json("/api/get-state", &[("thread_id", thread_id)])
            .await
    }

    /// Fetch the checkpoint history of a thread (GET /api/get-state-history)
    pub async fn thread_history(&self, thread_id: &str) -> Result<ThreadHistory> {
        self.get_json("/api/get-state-history", &[("thread_id", thread_id)])
            .await
    }

    async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| self.classify_transport_error(e))?;

        self.decode_response(response).await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| self.classify_transport_error(e))?;

        self.decode_response(response).await
    }

    async fn decode_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Remote(extract_error_message(status, &body)));
        }

        response
            .json()
            .await
            .map_err(|e| ApiError::Unknown(format!("Failed to decode backend response: {}", e)))
    }

    /// Classify an error raised before any response arrived
    ///
    /// Builder errors (malformed URL, bad request construction) never left
    /// the client, so they are not a connectivity problem. Everything else
    /// from send() means no response was received.
    fn classify_transport_error(&self, err: reqwest::Error) -> ApiError {
        if err.is_builder() {
            ApiError::Unknown(err.to_string())
        } else {
            tracing::debug!("transport failure for {}: {}", self.base_url, err);
            ApiError::NetworkUnreachable(self.base_url.clone())
        }
    }
}

#[async_trait]
impl AgentBackend for HttpBackend {
    async fn submit_plan(&self, task: &str) -> Result<PlanResponse> {
        self.post_json("/api/plan", &json!({ "task": task })).await
    }

    async fn submit_research(
        &self,
        plan: &str,
        thread_id: Option<&str>,
    ) -> Result<ResearchResponse> {
        self.post_json(
            "/api/research",
            &json!({ "plan": plan, "thread_id": thread_id }),
        )
        .await
    }

    async fn submit_draft(
        &self,
        task: &str,
        plan: &str,
        thread_id: Option<&str>,
    ) -> Result<DraftResponse> {
        self.post_json(
            "/api/generate",
            &json!({ "task": task, "plan": plan, "thread_id": thread_id }),
        )
        .await
    }

    async fn submit_critique(
        &self,
        draft: &str,
        thread_id: Option<&str>,
    ) -> Result<CritiqueResponse> {
        self.post_json(
            "/api/critique",
            &json!({ "draft": draft, "thread_id": thread_id }),
        )
        .await
    }
}
