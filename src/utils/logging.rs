//! Logging utilities
//!
//! Subscriber setup and request summaries for debug logs

use crate::config::LoggingConfig;
use crate::models::chat::LlmRequest;

/// Initialize logging system
///
/// `RUST_LOG` directives override the configured level when present.
pub fn init_logging(config: &LoggingConfig) -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.level));

    let subscriber: Box<dyn tracing::Subscriber + Send + Sync> = if config.format == "json" {
        // JSON format logs
        Box::new(
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .json()
                .with_current_span(true)
                .with_span_list(false)
                .finish(),
        )
    } else {
        // Human readable format
        Box::new(
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .finish(),
        )
    };

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to set tracing subscriber: {}", e))?;

    tracing::debug!("Logging system initialized");
    Ok(())
}

/// Truncate a string with a note about original length
pub fn truncate_content(s: &str, max_len: usize) -> String {
    let char_count = s.chars().count();
    if char_count > max_len {
        let head: String = s.chars().take(max_len).collect();
        format!("{}... ({} chars truncated)", head, char_count - max_len)
    } else {
        s.to_string()
    }
}

/// Create a filtered summary of an LLM request for logging
/// Keeps original structure but truncates the prompt and collapses history
pub fn create_request_log_summary(request: &LlmRequest) -> serde_json::Value {
    let prompt = request
        .prompt
        .as_deref()
        .map(|p| serde_json::Value::String(truncate_content(p, 200)))
        .unwrap_or(serde_json::Value::Null);

    let history = match &request.history {
        Some(turns) => serde_json::json!(format!("[...{} turns]", turns.len())),
        None => serde_json::Value::Null,
    };

    serde_json::json!({
        "prompt": prompt,
        "history": history,
        "origin": request.origin,
        "destination": request.destination,
        "start": request.start,
        "end": request.end,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::chat::ChatTurn;

    #[test]
    fn test_truncate_content() {
        assert_eq!(truncate_content("short", 10), "short");
        assert_eq!(truncate_content("abcdef", 3), "abc... (3 chars truncated)");
        // counts characters, not bytes
        assert_eq!(truncate_content("₹₹₹₹", 2), "₹₹... (2 chars truncated)");
    }

    #[test]
    fn test_request_summary_collapses_history() {
        let request = LlmRequest::prompt("x".repeat(300))
            .with_history(&[ChatTurn::user("a"), ChatTurn::assistant("b")]);

        let summary = create_request_log_summary(&request);
        assert_eq!(summary["history"], "[...2 turns]");
        assert!(summary["prompt"]
            .as_str()
            .unwrap()
            .ends_with("(100 chars truncated)"));
        assert!(summary["origin"].is_null());
    }
}
