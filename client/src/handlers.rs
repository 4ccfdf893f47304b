//! Command handlers for CLI operations
//!
//! This module implements the handlers for all CLI commands:
//! - chat: interactive session driving the pipeline per submitted line
//! - run: one-shot pipeline execution
//! - status: backend health probe
//! - state: inspect a conversation thread's agent state
//! - history: list a conversation thread's checkpoints

use anyhow::Result;
use serde_json::json;
use std::io::{self, BufRead, Write};
use std::sync::Arc;

use crate::api::http::HttpBackend;
use crate::chat::{Pipeline, RunOutcome, Session};
use crate::config::Config;

/// Output format for command results
#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON output for machine consumption
    Json,
}

fn outcome_label(outcome: RunOutcome) -> &'static str {
    match outcome {
        RunOutcome::Completed => "completed",
        RunOutcome::Failed => "failed",
        RunOutcome::SkippedEmpty => "skipped_empty",
        RunOutcome::Busy => "busy",
    }
}

/// Run a single request through the pipeline
pub async fn handle_run(task: String, config: &Config, format: OutputFormat) -> Result<()> {
    let backend = Arc::new(HttpBackend::new(&config.backend.base_url));
    let pipeline = Pipeline::new(backend);
    let mut session = Session::new();

    if let OutputFormat::Text = format {
        println!("Submitting request: {}", task);
        println!();
    }

    let outcome = pipeline.run(&mut session, &task).await;

    match format {
        OutputFormat::Text => {
            // Skip the user echo; the terminal already shows the request.
            for entry in session.transcript().iter().skip(1) {
                println!("{}: {}", entry.origin, entry.text);
            }
            println!();
            match outcome {
                RunOutcome::Completed => {
                    println!("✓ Request completed");
                    if let Some(thread_id) = session.thread_id() {
                        println!("  Thread: {}", thread_id);
                    }
                }
                RunOutcome::Failed => println!("✗ Request failed"),
                RunOutcome::SkippedEmpty => println!("Nothing to do: the request was empty"),
                RunOutcome::Busy => {}
            }
        }
        OutputFormat::Json => {
            let output = json!({
                "status": outcome_label(outcome),
                "thread_id": session.thread_id(),
                "transcript": session.transcript(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    match outcome {
        RunOutcome::Failed => Err(anyhow::anyhow!("request failed")),
        _ => Ok(()),
    }
}

/// Interactive chat session
///
/// Reads one request per line from stdin and runs the full pipeline for
/// each. The session transcript accumulates across submissions until the
/// user exits; it is never persisted.
pub async fn handle_chat(config: &Config, format: OutputFormat) -> Result<()> {
    let backend = Arc::new(HttpBackend::new(&config.backend.base_url));
    let pipeline = Pipeline::new(backend);
    let mut session = Session::new();

    if let OutputFormat::Text = format {
        println!(
            "Wayfarer travel planning chat (backend: {})",
            config.backend.base_url
        );
        println!("Type a trip request, or 'exit' to quit.");
        println!();
    }

    let stdin = io::stdin();
    loop {
        if let OutputFormat::Text = format {
            print!("you> ");
            io::stdout().flush()?;
        }

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim();
        if input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit") {
            break;
        }

        let before = session.transcript().len();
        let outcome = pipeline.run(&mut session, input).await;

        match format {
            OutputFormat::Text => {
                // The first new entry is the user echo; print agent entries only.
                let new_entries = &session.transcript()[before..];
                for entry in new_entries.iter().skip(1) {
                    println!("agent> {}", entry.text);
                }
                if let RunOutcome::Completed | RunOutcome::Failed = outcome {
                    println!();
                }
            }
            OutputFormat::Json => {
                let output = json!({
                    "status": outcome_label(outcome),
                    "entries": &session.transcript()[before..],
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
        }
    }

    Ok(())
}

/// Check backend reachability via GET /health
pub async fn handle_status(config: &Config, format: OutputFormat) -> Result<()> {
    let backend = HttpBackend::new(&config.backend.base_url);

    match backend.health().await {
        Ok(health) => {
            match format {
                OutputFormat::Text => {
                    println!("Agent backend is reachable at {}", backend.base_url());
                    let status = if health.status.is_empty() {
                        "unknown".to_string()
                    } else {
                        health.status
                    };
                    println!("  Status: {}", status);
                }
                OutputFormat::Json => {
                    let output = json!({
                        "reachable": true,
                        "backend": backend.base_url(),
                        "status": health.status,
                    });
                    println!("{}", serde_json::to_string_pretty(&output)?);
                }
            }
            Ok(())
        }
        Err(e) => {
            match format {
                OutputFormat::Text => {
                    println!("Agent backend is not reachable.");
                    println!("  {}", e);
                }
                OutputFormat::Json => {
                    let output = json!({
                        "reachable": false,
                        "backend": backend.base_url(),
                        "error": e.to_string(),
                    });
                    println!("{}", serde_json::to_string_pretty(&output)?);
                }
            }
            Err(e.into())
        }
    }
}

/// Show the agent state of a conversation thread
pub async fn handle_state(thread_id: String, config: &Config, format: OutputFormat) -> Result<()> {
    let backend = HttpBackend::new(&config.backend.base_url);
    let state = backend.thread_state(&thread_id).await?;

    match format {
        OutputFormat::Text => {
            println!("Thread {} state:", thread_id);
            println!("{}", serde_json::to_string_pretty(&state.values)?);
            if !state.next.is_null() {
                println!();
                println!("Next node: {}", state.next);
            }
        }
        OutputFormat::Json => {
            let output = json!({
                "thread_id": thread_id,
                "values": state.values,
                "next": state.next,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}

/// Show the checkpoint history of a conversation thread
pub async fn handle_history(
    thread_id: String,
    config: &Config,
    format: OutputFormat,
) -> Result<()> {
    let backend = HttpBackend::new(&config.backend.base_url);
    let history = backend.thread_history(&thread_id).await?;

    match format {
        OutputFormat::Text => {
            if history.history.is_empty() {
                println!("No history for thread {}", thread_id);
                return Ok(());
            }

            println!("Thread {} history:", thread_id);
            println!();

            for step in &history.history {
                let step_no = step
                    .step
                    .map(|n| n.to_string())
                    .unwrap_or_else(|| "-".to_string());
                println!("Step {}:", step_no);
                if let Some(lnode) = &step.lnode {
                    println!("  Last node: {}", lnode);
                }
                if let Some(revision) = step.revision_number {
                    println!("  Revision: {}", revision);
                }
                if let Some(count) = step.count {
                    println!("  Count: {}", count);
                }
                if let Some(thread_ts) = &step.thread_ts {
                    println!("  Timestamp: {}", thread_ts);
                }
                println!();
            }
        }
        OutputFormat::Json => {
            let output = json!({
                "thread_id": thread_id,
                "history": history.history.len(),
                "steps": history.history.iter().map(|step| {
                    json!({
                        "step": step.step,
                        "lnode": step.lnode,
                        "next": step.next,
                        "revision_number": step.revision_number,
                        "count": step.count,
                        "thread_ts": step.thread_ts,
                    })
                }).collect::<Vec<_>>(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}
