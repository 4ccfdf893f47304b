//! Agent Backend API Layer
//!
//! This module defines the contract between the conversation pipeline and the
//! remote agent backend. The backend exposes one endpoint per pipeline stage
//! (plan, research, generate, critique); the AgentBackend trait wraps each as
//! a single-attempt call, and every failure mode is normalized into the
//! ApiError taxonomy before it crosses this boundary.

use async_trait::async_trait;
use serde::Deserialize;
use std::fmt;

pub mod http;

/// Result type for backend operations
pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors that can occur when calling the agent backend
///
/// Exactly three kinds, classified at the HTTP layer:
/// - no response received at all,
/// - the backend responded with a failure status,
/// - anything else (request construction, malformed success body).
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Network error: cannot connect to server at {0}. Make sure the agent backend is running.")]
    NetworkUnreachable(String),

    #[error("{0}")]
    Remote(String),

    #[error("{0}")]
    Unknown(String),
}

/// Contract for the four stage operations of the agent backend
///
/// The pipeline only depends on this trait, so tests can substitute a stub
/// backend without a network. Each call makes exactly one attempt; there are
/// no retries and no timeout beyond the transport default.
#[async_trait]
pub trait AgentBackend: Send + Sync {
    /// Submit the user's task and receive a plan plus a new thread id
    async fn submit_plan(&self, task: &str) -> Result<PlanResponse>;

    /// Submit the plan for research within an existing thread
    async fn submit_research(
        &self,
        plan: &str,
        thread_id: Option<&str>,
    ) -> Result<ResearchResponse>;

    /// Generate a draft from the task and plan within an existing thread
    async fn submit_draft(
        &self,
        task: &str,
        plan: &str,
        thread_id: Option<&str>,
    ) -> Result<DraftResponse>;

    /// Submit the draft for critique within an existing thread
    async fn submit_critique(
        &self,
        draft: &str,
        thread_id: Option<&str>,
    ) -> Result<CritiqueResponse>;
}

/// Thread correlation id as returned by the backend
///
/// The plan endpoint returns a numeric id while the other endpoints echo back
/// whatever string the client sent, so both wire forms must decode.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ThreadId {
    /// Numeric id, as minted by the plan endpoint
    Num(i64),

    /// String id, as echoed by the research/generate/critique endpoints
    Str(String),
}

impl ThreadId {
    /// Normalize the id to its string form
    pub fn into_string(self) -> String {
        match self {
            ThreadId::Num(n) => n.to_string(),
            ThreadId::Str(s) => s,
        }
    }
}

impl fmt::Display for ThreadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThreadId::Num(n) => write!(f, "{}", n),
            ThreadId::Str(s) => write!(f, "{}", s),
        }
    }
}

/// Response of POST /api/plan
///
/// Absent fields decode to empty values; decoding never fails on a missing
/// field.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlanResponse {
    /// Generated plan text
    #[serde(default)]
    pub plan: String,

    /// Correlation id for the new conversation thread
    #[serde(default)]
    pub thread_id: Option<ThreadId>,
}

/// Response of POST /api/research
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResearchResponse {
    /// Search queries the backend derived from the plan
    #[serde(default)]
    pub queries: Vec<String>,

    /// Answers gathered for those queries
    #[serde(default)]
    pub answers: Vec<String>,
}

/// Response of POST /api/generate
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DraftResponse {
    /// Generated draft text
    #[serde(default)]
    pub draft: String,

    /// Revision counter maintained by the backend
    #[serde(default)]
    pub revision_number: i64,
}

/// Response of POST /api/critique
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CritiqueResponse {
    /// Critique of the submitted draft
    #[serde(default)]
    pub critique: String,
}

/// Response of GET /health
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HealthResponse {
    #[serde(default)]
    pub status: String,
}

/// Response of GET /api/get-state
///
/// The agent state is backend-defined; it is carried as opaque JSON and
/// rendered for inspection only.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ThreadState {
    #[serde(default)]
    pub values: serde_json::Value,

    #[serde(default)]
    pub next: serde_json::Value,
}

/// Response of GET /api/get-state-history
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ThreadHistory {
    #[serde(default)]
    pub history: Vec<HistoryStep>,
}

/// One checkpoint in a thread's state history
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryStep {
    #[serde(default)]
    pub step: Option<i64>,

    /// Last graph node that ran at this checkpoint
    #[serde(default)]
    pub lnode: Option<String>,

    #[serde(default)]
    pub next: serde_json::Value,

    #[serde(default)]
    pub revision_number: Option<i64>,

    #[serde(default)]
    pub count: Option<i64>,

    #[serde(default)]
    pub thread_ts: Option<String>,
}

/// Extract a human-readable message from a failure response body
///
/// Priority: body `error` field, then body `message` field, then a generic
/// string built from the status code and canonical reason. Non-JSON bodies
/// fall through to the generic form.
pub fn extract_error_message(status: reqwest::StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["error", "message"] {
            if let Some(msg) = value.get(key).and_then(|v| v.as_str()) {
                if !msg.is_empty() {
                    return msg.to_string();
                }
            }
        }
    }
    format!("Server error ({})", status)
}
