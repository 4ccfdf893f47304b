//! Wayfarer Client Library
//!
//! This library provides the core functionality of the Wayfarer terminal
//! client: a thin HTTP client for the staged travel-planning agent backend
//! and the pipeline that drives its four stages while maintaining the
//! conversation transcript. It is used by both the main binary and the
//! integration tests.

/// Agent backend API layer
pub mod api;

/// Conversation session and pipeline module
pub mod chat;

/// CLI interface module
pub mod cli;

/// Configuration management module
pub mod config;

/// Command handlers module
pub mod handlers;

/// Telemetry and Observability
pub mod telemetry;
