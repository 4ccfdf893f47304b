//! Conversation Pipeline
//!
//! Drives one user submission through the backend's four stages in strict
//! order: plan, research, draft, critique. The thread id minted by the
//! plan stage is threaded into every later call. After each successful stage
//! the pipeline appends one transcript entry per rendered value; the first
//! failure appends a single error entry and stops the run. Failures never
//! propagate past run(); the outcome enum and the transcript are the only
//! signals.
//!
//! There is no caching, no retry, and no cancellation. A new submission
//! re-runs the pipeline from the plan stage with a fresh thread id.

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::api::{AgentBackend, ApiError};

use super::{Session, TranscriptEntry};

/// How a submission ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// All four stages succeeded
    Completed,

    /// A stage failed; the error entry is the last transcript line
    Failed,

    /// Input was empty after trimming; nothing was done
    SkippedEmpty,

    /// A run was already in flight; the submission was refused
    Busy,
}

/// Orchestrator for the four-stage conversation pipeline
pub struct Pipeline {
    backend: Arc<dyn AgentBackend>,
}

impl Pipeline {
    /// Create a pipeline over the given backend
    pub fn new(backend: Arc<dyn AgentBackend>) -> Self {
        Self { backend }
    }

    /// Run one submission through all four stages
    ///
    /// Appends the user entry immediately, holds the session busy for the
    /// duration of the run, and clears it on every exit path.
    pub async fn run(&self, session: &mut Session, input: &str) -> RunOutcome {
        let task = input.trim();
        if task.is_empty() {
            return RunOutcome::SkippedEmpty;
        }
        if session.is_busy() {
            warn!("submission refused: a run is already in flight");
            return RunOutcome::Busy;
        }

        session.push(TranscriptEntry::user(task));
        session.set_busy(true);
        let outcome = self.run_stages(session, task).await;
        session.set_busy(false);
        outcome
    }

    async fn run_stages(&self, session: &mut Session, task: &str) -> RunOutcome {
        info!("planning task");
        let plan_response = match self.backend.submit_plan(task).await {
            Ok(response) => response,
            Err(e) => return Self::fail(session, "plan", e),
        };
        let thread_id = plan_response.thread_id.map(|id| id.into_string());
        session.set_thread_id(thread_id.clone());
        let plan = plan_response.plan;
        session.push(TranscriptEntry::agent(format!(
            "Plan: {}",
            text_or(&plan, "Plan generated")
        )));

        info!("researching plan");
        let research = match self
            .backend
            .submit_research(&plan, thread_id.as_deref())
            .await
        {
            Ok(response) => response,
            Err(e) => return Self::fail(session, "research", e),
        };
        session.push(TranscriptEntry::agent(format!(
            "Research queries: {}",
            list_or(&research.queries, "No queries")
        )));
        session.push(TranscriptEntry::agent(format!(
            "Answers: {}",
            list_or(&research.answers, "No answers")
        )));

        info!("generating draft");
        let draft_response = match self
            .backend
            .submit_draft(task, &plan, thread_id.as_deref())
            .await
        {
            Ok(response) => response,
            Err(e) => return Self::fail(session, "generate", e),
        };
        debug!(revision = draft_response.revision_number, "draft received");
        session.push(TranscriptEntry::agent(format!(
            "Draft: {}",
            text_or(&draft_response.draft, "Draft generated")
        )));

        info!("critiquing draft");
        let critique_response = match self
            .backend
            .submit_critique(&draft_response.draft, thread_id.as_deref())
            .await
        {
            Ok(response) => response,
            Err(e) => return Self::fail(session, "critique", e),
        };
        session.push(TranscriptEntry::agent(format!(
            "Critique: {}",
            text_or(&critique_response.critique, "Critique generated")
        )));

        session.push(TranscriptEntry::agent("Process completed"));
        RunOutcome::Completed
    }

    fn fail(session: &mut Session, stage: &str, err: ApiError) -> RunOutcome {
        warn!("{} stage failed: {}", stage, err);
        session.push(TranscriptEntry::agent(format!("Error: {}", err)));
        RunOutcome::Failed
    }
}

/// Fall back to a fixed placeholder when a stage returned empty text
fn text_or<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.is_empty() {
        placeholder
    } else {
        value
    }
}

/// Render a list as a comma-separated line, with a placeholder when empty
fn list_or(values: &[String], placeholder: &str) -> String {
    if values.is_empty() {
        placeholder.to_string()
    } else {
        values.join(", ")
    }
}
