//! Conversation Session State
//!
//! Holds the transcript of one chat session: an ordered sequence of entries
//! appended as the user submits requests and the pipeline reports stage
//! results. The session also carries the busy flag that gates concurrent
//! submissions and the thread id recorded from the most recent run. Nothing
//! here is persisted; the session lives and dies with the invocation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Who produced a transcript entry
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Origin {
    /// The human submitting requests
    User,

    /// The agent backend, as summarized by the pipeline
    Agent,
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::User => write!(f, "User"),
            Origin::Agent => write!(f, "Agent"),
        }
    }
}

/// One line of the conversation transcript
///
/// Entries are immutable once created and appended in arrival order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TranscriptEntry {
    /// Who produced the entry
    pub origin: Origin,

    /// Entry text as rendered to the user
    pub text: String,
}

impl TranscriptEntry {
    /// Create a user entry
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            origin: Origin::User,
            text: text.into(),
        }
    }

    /// Create an agent entry
    pub fn agent(text: impl Into<String>) -> Self {
        Self {
            origin: Origin::Agent,
            text: text.into(),
        }
    }
}

/// State of one conversation session
#[derive(Debug, Clone, Default)]
pub struct Session {
    /// Full conversation history, in arrival order
    transcript: Vec<TranscriptEntry>,

    /// True strictly while a pipeline run is in flight
    busy: bool,

    /// Thread id returned by the plan stage of the most recent run
    thread_id: Option<String>,
}

impl Session {
    /// Create an empty session
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry to the transcript
    pub fn push(&mut self, entry: TranscriptEntry) {
        self.transcript.push(entry);
    }

    /// The full transcript in arrival order
    pub fn transcript(&self) -> &[TranscriptEntry] {
        &self.transcript
    }

    /// Whether a pipeline run is currently in flight
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub(crate) fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
    }

    /// Thread id of the most recent run, if the plan stage returned one
    pub fn thread_id(&self) -> Option<&str> {
        self.thread_id.as_deref()
    }

    pub(crate) fn set_thread_id(&mut self, thread_id: Option<String>) {
        self.thread_id = thread_id;
    }

    /// Discard the transcript and thread id
    pub fn clear(&mut self) {
        self.transcript.clear();
        self.thread_id = None;
    }
}
