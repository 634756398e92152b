//! Chat gateway client and error types.

use futures::{Stream, StreamExt};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use thiserror::Error;
use tracing::{debug, warn};

use crate::assembler::MuseResponseExt;
use crate::http::{add_extra_headers, build_http_client};
use crate::model::{ChatMessage, ChatRequest};
use crate::options::TransportOptions;

/// Path of the chat function on the gateway.
const DEFAULT_CHAT_PATH: &str = "/functions/v1/helios-chat";

/// Errors that can occur while talking to the chat gateway.
#[derive(Error, Debug)]
pub enum ChatError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The gateway refused the request before any streaming began;
    /// retry after a pause.
    #[error("rate limited by the gateway")]
    RateLimited,

    /// The gateway's AI credits are spent.
    #[error("AI credits exhausted")]
    CreditsExhausted,

    #[error("gateway error ({status}): {body}")]
    Gateway { status: StatusCode, body: String },

    #[error("configuration error: {0}")]
    Config(String),
}

/// Client for the Helios Muse assistant endpoint.
///
/// Posts the conversation history to the gateway's chat function and
/// assembles the streamed assistant reply. The gateway owns the model
/// choice and the persona prompt; this client only carries messages.
///
/// # Example
/// ```no_run
/// use futures::StreamExt;
/// use helios_muse::client::MuseClient;
/// use helios_muse::model::ChatMessage;
/// use helios_muse::options::{HttpTransport, TransportOptions};
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let client = MuseClient::new(TransportOptions::new(
///     HttpTransport::new("publishable-key")
///         .with_base_url("https://helios.example.com".to_string()),
/// ));
///
/// let history = vec![ChatMessage::user("Tell me about Monet")];
/// let mut updates = std::pin::pin!(client.chat_stream(history).await?);
/// while let Some(update) = updates.next().await {
///     println!("{}", update?);
/// }
/// # Ok(())
/// # }
/// ```
pub struct MuseClient {
    transport_options: TransportOptions,
}

impl MuseClient {
    /// Create a new client with the given transport options.
    pub fn new(transport_options: TransportOptions) -> Self {
        Self { transport_options }
    }

    /// Stream the assistant's reply to `messages`.
    ///
    /// Yields the full reply text after each received fragment, so a UI
    /// can render the message bubble as it grows. Dropping the stream
    /// cancels the session; text already observed stays valid. Errors
    /// returned here (rate limit, exhausted credits, other rejections)
    /// happen before any session starts.
    pub async fn chat_stream(
        &self,
        messages: Vec<ChatMessage>,
    ) -> Result<impl Stream<Item = Result<String, ChatError>> + Send, ChatError> {
        let response = self.send_chat_request(messages).await?;
        Ok(response.into_message_stream())
    }

    /// Request a reply and wait for the complete text.
    pub async fn chat(&self, messages: Vec<ChatMessage>) -> Result<String, ChatError> {
        let mut updates = Box::pin(self.chat_stream(messages).await?);
        let mut message = String::new();
        while let Some(update) = updates.next().await {
            message = update?;
        }
        Ok(message)
    }

    async fn send_chat_request(
        &self,
        messages: Vec<ChatMessage>,
    ) -> Result<reqwest::Response, ChatError> {
        if messages.is_empty() {
            return Err(ChatError::Config(
                "conversation history is empty".to_string(),
            ));
        }

        let transport = &self.transport_options.transport;
        let api_key = transport
            .api_key
            .as_ref()
            .ok_or_else(|| ChatError::Config("API key is required".to_string()))?;
        let base_url = transport
            .base_url
            .as_ref()
            .ok_or_else(|| ChatError::Config("gateway base URL is required".to_string()))?;

        let url = format!("{}{}", base_url.trim_end_matches('/'), DEFAULT_CHAT_PATH);
        let http_client = build_http_client(&self.transport_options)?;

        let mut req = http_client
            .post(&url)
            .header(AUTHORIZATION, format!("Bearer {}", api_key.expose_secret()))
            .header(CONTENT_TYPE, "application/json");
        req = add_extra_headers(req, &transport.extra_headers);

        debug!(history = messages.len(), "sending chat request");
        let response = req.json(&ChatRequest { messages }).send().await?;
        Self::check_status(response).await
    }

    /// Map pre-stream rejections to typed errors. No streaming session is
    /// started for a non-success status.
    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ChatError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        warn!(%status, "chat request rejected before streaming");
        match status {
            StatusCode::TOO_MANY_REQUESTS => Err(ChatError::RateLimited),
            StatusCode::PAYMENT_REQUIRED => Err(ChatError::CreditsExhausted),
            _ => {
                let body = response.text().await.unwrap_or_default();
                Err(ChatError::Gateway { status, body })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::HttpTransport;

    fn client_with(base_url: Option<&str>, api_key: Option<&str>) -> MuseClient {
        let mut transport = HttpTransport::default();
        transport.api_key = api_key.map(|k| k.into());
        transport.base_url = base_url.map(|u| u.to_string());
        MuseClient::new(TransportOptions::new(transport))
    }

    #[tokio::test]
    async fn test_empty_history_is_rejected() {
        let client = client_with(Some("https://helios.example.com"), Some("key"));
        let err = client.send_chat_request(vec![]).await.unwrap_err();
        assert!(matches!(err, ChatError::Config(_)));
    }

    #[tokio::test]
    async fn test_missing_api_key_is_rejected() {
        let client = client_with(Some("https://helios.example.com"), None);
        let err = client
            .send_chat_request(vec![ChatMessage::user("hi")])
            .await
            .unwrap_err();
        assert!(matches!(err, ChatError::Config(_)));
    }

    #[tokio::test]
    async fn test_missing_base_url_is_rejected() {
        let client = client_with(None, Some("key"));
        let err = client
            .send_chat_request(vec![ChatMessage::user("hi")])
            .await
            .unwrap_err();
        assert!(matches!(err, ChatError::Config(_)));
    }
}
