//! # helios-muse - Helios Muse Streaming Chat Client
//!
//! A small, pragmatic Rust library for the Helios Muse assistant: it
//! posts a conversation history to the Helios chat gateway and
//! incrementally assembles the streamed reply into display-ready text.
//!
//! ## Features
//! - Async-first, tokio compatible
//! - Incremental SSE assembly: fragments append as they arrive
//! - Safe against chunk boundaries splitting lines, JSON payloads, or
//!   multi-byte characters
//! - Explicit session lifecycle (`Idle`/`Streaming`/`Completed`/`Aborted`)
//! - Typed pre-stream failures (rate limit, exhausted credits)
//!
//! ## Architecture
//!
//! Bytes flow through a fixed pipeline, one stage per module:
//!
//! 1. [`decode`] - raw chunks to text, carrying split characters over
//! 2. [`sse`] - text to complete lines, lines to event frames
//! 3. [`delta`] - data payloads to text fragments
//! 4. [`assembler`] - fragments to the growing message, one snapshot
//!    published per fragment
//!
//! [`client::MuseClient`] wires the pipeline to the gateway over HTTP.
//! The assembler itself is transport-agnostic and can be driven byte by
//! byte, which is how its tests exercise it.
//!
//! ## Example
//! ```no_run
//! use futures::StreamExt;
//! use helios_muse::client::MuseClient;
//! use helios_muse::model::ChatMessage;
//! use helios_muse::options::{HttpTransport, TransportOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = MuseClient::new(TransportOptions::new(
//!         HttpTransport::new(std::env::var("HELIOS_PUBLISHABLE_KEY")?)
//!             .with_base_url(std::env::var("HELIOS_GATEWAY_URL")?),
//!     ));
//!
//!     let history = vec![ChatMessage::user("How do I scan an artwork?")];
//!
//!     let mut updates = std::pin::pin!(client.chat_stream(history).await?);
//!     while let Some(update) = updates.next().await {
//!         // Each update is the full message so far, not just the delta.
//!         print!("\r{}", update?);
//!     }
//!     Ok(())
//! }
//! ```

pub mod assembler;
pub mod client;
pub mod decode;
pub mod delta;
pub mod http;
pub mod model;
pub mod options;
pub mod sse;

// Re-exports for convenience
pub use assembler::{assemble_stream, ChatStreamAssembler, MuseResponseExt, SessionState};
pub use client::{ChatError, MuseClient};
pub use model::{ChatMessage, ChatRequest, Role};
