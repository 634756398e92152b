//! Incremental assembly of one streamed assistant reply.
//!
//! A reply arrives as raw byte chunks carrying an SSE body. Each chunk is
//! decoded ([`crate::decode`]), split into complete lines
//! ([`crate::sse`]), and classified; data payloads yield text fragments
//! ([`crate::delta`]) that are appended to the growing message. After
//! every fragment the full message so far is published, so a UI can
//! render the bubble as it grows.
//!
//! One [`ChatStreamAssembler`] covers exactly one streaming session:
//!
//! ```text
//! Idle -> Streaming -> Completed
//!              \-----> Aborted
//! ```
//!
//! `Completed` and `Aborted` are terminal; input past either is ignored.

use std::collections::VecDeque;

use bytes::Bytes;
use futures::stream::{self, Stream, StreamExt};
use tracing::debug;

use crate::client::ChatError;
use crate::decode::StreamDecoder;
use crate::delta::extract_content;
use crate::sse::{is_done_marker, EventFrame, LineBuffer};

/// Lifecycle of one streaming session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No bytes processed yet.
    Idle,
    /// Chunks are being consumed.
    Streaming,
    /// The transport ended or the gateway sent its termination marker.
    Completed,
    /// The caller cancelled or the transport failed; partial text kept.
    Aborted,
}

/// Assembles one assistant reply from raw transport chunks.
///
/// Feed chunks in arrival order with [`feed`](Self::feed), then call
/// [`finish`](Self::finish) when the transport reports end of stream, or
/// [`abort`](Self::abort) to cancel. The assembled text only ever grows
/// within a session; fragments append, never replace.
#[derive(Debug)]
pub struct ChatStreamAssembler {
    decoder: StreamDecoder,
    lines: LineBuffer,
    message: String,
    state: SessionState,
}

impl ChatStreamAssembler {
    pub fn new() -> Self {
        Self {
            decoder: StreamDecoder::new(),
            lines: LineBuffer::new(),
            message: String::new(),
            state: SessionState::Idle,
        }
    }

    /// Feed the next transport chunk.
    ///
    /// Returns one snapshot of the full message per extracted fragment,
    /// in arrival order. The list is empty for chunks that complete no
    /// fragment: keep-alives, partial lines, malformed payloads. After
    /// the termination sentinel the session is `Completed` and any
    /// further input is ignored.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<String> {
        if self.is_terminal() {
            return Vec::new();
        }
        self.state = SessionState::Streaming;

        let decoded = self.decoder.decode(chunk);
        self.lines.push(&decoded);

        let mut snapshots = Vec::new();
        while let Some(line) = self.lines.next_line() {
            if self.apply_line(&line, &mut snapshots) {
                self.complete();
                break;
            }
        }
        snapshots
    }

    /// End of stream: flush the decoder and the final unterminated line,
    /// then mark the session `Completed`.
    ///
    /// Idempotent. Returns a final snapshot only if the flush produced
    /// one or more fragments.
    pub fn finish(&mut self) -> Option<String> {
        if self.is_terminal() {
            return None;
        }

        let tail = self.decoder.finish();
        self.lines.push(&tail);

        let mut snapshots = Vec::new();
        let mut saw_sentinel = false;
        while let Some(line) = self.lines.next_line() {
            if self.apply_line(&line, &mut snapshots) {
                saw_sentinel = true;
                break;
            }
        }
        if !saw_sentinel {
            let rest = self.lines.take_rest();
            if !rest.is_empty() {
                self.apply_line(&rest, &mut snapshots);
            }
        }

        self.complete();
        snapshots.pop()
    }

    /// Cancel the session, keeping whatever text already arrived.
    pub fn abort(&mut self) {
        if !self.is_terminal() {
            self.state = SessionState::Aborted;
            debug!(assembled = self.message.len(), "stream aborted");
        }
    }

    /// Full text assembled so far.
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Whether the session reached `Completed` or `Aborted`.
    pub fn is_terminal(&self) -> bool {
        matches!(self.state, SessionState::Completed | SessionState::Aborted)
    }

    /// Process one complete line. Returns `true` when the line was the
    /// termination sentinel.
    fn apply_line(&mut self, line: &str, snapshots: &mut Vec<String>) -> bool {
        match EventFrame::classify(line) {
            EventFrame::Data(payload) => {
                if is_done_marker(&payload) {
                    return true;
                }
                if let Some(fragment) = extract_content(&payload) {
                    self.message.push_str(&fragment);
                    snapshots.push(self.message.clone());
                }
                false
            }
            EventFrame::Blank | EventFrame::Comment | EventFrame::Unrecognized => false,
        }
    }

    fn complete(&mut self) {
        self.state = SessionState::Completed;
        debug!(assembled = self.message.len(), "stream completed");
    }
}

impl Default for ChatStreamAssembler {
    fn default() -> Self {
        Self::new()
    }
}

/// Drive an assembler over a transport byte stream.
///
/// Yields the full message after each received fragment. The stream ends
/// when the transport does or when the gateway sends its termination
/// marker; a transport read error yields one `Err` and then ends, so the
/// caller keeps whatever snapshots it already observed. Dropping the
/// stream cancels the session: no further reads, no further items.
pub fn assemble_stream<S, E>(byte_stream: S) -> impl Stream<Item = Result<String, ChatError>> + Send
where
    S: Stream<Item = Result<Bytes, E>> + Send,
    E: Into<ChatError> + Send,
{
    stream::unfold(
        (Box::pin(byte_stream), ChatStreamAssembler::new(), VecDeque::new()),
        |(mut bytes, mut assembler, mut pending)| async move {
            loop {
                if let Some(snapshot) = pending.pop_front() {
                    return Some((Ok(snapshot), (bytes, assembler, pending)));
                }
                if assembler.is_terminal() {
                    return None;
                }

                match bytes.next().await {
                    Some(Ok(chunk)) => pending.extend(assembler.feed(&chunk)),
                    Some(Err(e)) => {
                        assembler.abort();
                        return Some((Err(e.into()), (bytes, assembler, pending)));
                    }
                    None => pending.extend(assembler.finish()),
                }
            }
        },
    )
}

/// Extension trait for `reqwest::Response` to assemble a streamed reply.
///
/// # Example
/// ```ignore
/// use futures::StreamExt;
/// use helios_muse::assembler::MuseResponseExt;
///
/// let response = client.post(url).send().await?;
/// let mut updates = std::pin::pin!(response.into_message_stream());
/// while let Some(update) = updates.next().await {
///     render(&update?);
/// }
/// ```
pub trait MuseResponseExt {
    /// Convert the response body into a stream of full-message snapshots.
    fn into_message_stream(self) -> impl Stream<Item = Result<String, ChatError>> + Send;
}

impl MuseResponseExt for reqwest::Response {
    fn into_message_stream(self) -> impl Stream<Item = Result<String, ChatError>> + Send {
        assemble_stream(self.bytes_stream())
    }
}
