//! Smart Travel chat console
//!
//! Reads prompts from stdin and chats with the travel assistant, printing any
//! structured route recommendation embedded in the reply

use anyhow::{Context, Result};
use smarttravel_client::ui::{Notifier, TracingNotifier};
use smarttravel_client::utils::logging::init_logging;
use smarttravel_client::{extract_structured_json, LlmClient, RoutesConfig, Settings};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_stream::wrappers::LinesStream;
use tokio_stream::StreamExt;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::new().context("Failed to load client settings")?;

    init_logging(&settings.logging)?;

    let routes = RoutesConfig::load_default().context("Failed to load route table")?;
    let client = LlmClient::new(&settings, routes).context("Failed to create LLM client")?;
    let notifier = TracingNotifier;

    info!("🚀 {}", smarttravel_client::version_info());
    info!("💬 Chatting with {}", settings.api.base_url);
    println!("Type a prompt, /history to show the conversation, /clear to reset it.");

    let mut lines = LinesStream::new(BufReader::new(tokio::io::stdin()).lines());

    while let Some(line) = lines.next().await {
        let line = line.context("Failed to read stdin")?;
        let prompt = line.trim();

        match prompt {
            "" => continue,
            "/clear" => {
                client.clear_history();
                notifier.info("Chat history cleared");
            }
            "/history" => {
                for turn in client.history() {
                    println!("{:?}: {}", turn.role, turn.content);
                }
            }
            _ => match client.chat(prompt).await {
                Ok(reply) => {
                    println!("{}", reply);
                    if let Some(structured) = extract_structured_json(&reply) {
                        println!("{}", serde_json::to_string_pretty(&structured)?);
                    }
                }
                Err(e) => notifier.report_error(&e),
            },
        }
    }

    Ok(())
}
