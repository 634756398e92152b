//! Simple blocking-style chat example: wait for the full reply.
//!
//! Run with:
//! ```bash
//! export HELIOS_GATEWAY_URL="https://your-project.example.com"
//! export HELIOS_PUBLISHABLE_KEY="your-publishable-key"
//! cargo run --example muse_simple
//! ```

use helios_muse::client::{ChatError, MuseClient};
use helios_muse::model::ChatMessage;
use helios_muse::options::{HttpTransport, TransportOptions};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let base_url = std::env::var("HELIOS_GATEWAY_URL")
        .expect("HELIOS_GATEWAY_URL environment variable must be set");
    let api_key = std::env::var("HELIOS_PUBLISHABLE_KEY")
        .expect("HELIOS_PUBLISHABLE_KEY environment variable must be set");

    let client =
        MuseClient::new(TransportOptions::new(HttpTransport::new(api_key).with_base_url(base_url)));

    // A short multi-turn history; the last turn is the open question.
    let history = vec![
        ChatMessage::user("My favourite painter is Monet."),
        ChatMessage::assistant("A wonderful choice - the master of light."),
        ChatMessage::user("Which of his paintings should I see first?"),
    ];

    match client.chat(history).await {
        Ok(reply) => println!("Muse: {}", reply),
        Err(ChatError::RateLimited) => eprintln!("Rate limited - wait a moment and try again."),
        Err(ChatError::CreditsExhausted) => eprintln!("AI credits are low - try again later."),
        Err(e) => {
            eprintln!("Error: {}", e);
            return Err(e.into());
        }
    }

    Ok(())
}
