//! Streaming chat example.
//!
//! Run with:
//! ```bash
//! export HELIOS_GATEWAY_URL="https://your-project.example.com"
//! export HELIOS_PUBLISHABLE_KEY="your-publishable-key"
//! cargo run --example muse_streaming
//! ```

use std::io::Write;

use futures::StreamExt;
use helios_muse::client::MuseClient;
use helios_muse::model::ChatMessage;
use helios_muse::options::{HttpTransport, TransportOptions};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let base_url = std::env::var("HELIOS_GATEWAY_URL")
        .expect("HELIOS_GATEWAY_URL environment variable must be set");
    let api_key = std::env::var("HELIOS_PUBLISHABLE_KEY")
        .expect("HELIOS_PUBLISHABLE_KEY environment variable must be set");

    let client = MuseClient::new(
        TransportOptions::new(HttpTransport::new(api_key).with_base_url(base_url))
            .with_timeout(std::time::Duration::from_secs(60)),
    );

    let history = vec![ChatMessage::user(
        "Tell me about Vincent van Gogh in two sentences.",
    )];

    println!("Streaming reply from Helios Muse...\n");

    let mut updates = std::pin::pin!(client.chat_stream(history).await?);
    let mut last_len = 0;
    while let Some(update) = updates.next().await {
        let message = update?;
        // Each update carries the whole message; print only what is new.
        print!("{}", &message[last_len..]);
        std::io::stdout().flush()?;
        last_len = message.len();
    }

    println!();
    Ok(())
}
