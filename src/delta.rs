//! Extraction of incremental content from chat-completion payloads.
//!
//! Non-sentinel data payloads are OpenAI-style chat completion chunks.
//! The only part this client consumes is the text fragment at
//! `choices[0].delta.content`; everything else in the chunk is ignored.

use serde::Deserialize;

/// One streamed chunk of a chat completion response.
#[derive(Debug, Deserialize)]
pub struct ChatChunk {
    #[serde(default)]
    pub choices: Vec<ChunkChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChunkChoice {
    pub delta: Option<ChunkDelta>,
}

/// The incremental piece of the assistant message in one chunk.
#[derive(Debug, Deserialize)]
pub struct ChunkDelta {
    pub content: Option<String>,
}

/// Pull the incremental text fragment out of a data payload.
///
/// Returns `None` for anything that is not a well-formed chunk carrying
/// non-empty content: malformed JSON, a shape without the content field,
/// or an empty fragment. None of these end the stream; the caller skips
/// the payload and keeps going.
pub fn extract_content(payload: &str) -> Option<String> {
    let chunk: ChatChunk = serde_json::from_str(payload).ok()?;
    chunk
        .choices
        .into_iter()
        .next()?
        .delta?
        .content
        .filter(|content| !content.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_content() {
        let payload = r#"{"choices":[{"delta":{"content":"Hel"}}]}"#;
        assert_eq!(extract_content(payload).as_deref(), Some("Hel"));
    }

    #[test]
    fn test_ignores_extra_fields() {
        let payload = r#"{"id":"c-1","model":"m","choices":[{"index":0,"delta":{"role":"assistant","content":"hi"},"finish_reason":null}]}"#;
        assert_eq!(extract_content(payload).as_deref(), Some("hi"));
    }

    #[test]
    fn test_malformed_json_is_skipped() {
        assert_eq!(extract_content("{garbage"), None);
        assert_eq!(extract_content(""), None);
        assert_eq!(extract_content(r#"{"choices":[{"delta":{"content":"tru"#), None);
    }

    #[test]
    fn test_missing_fields_are_skipped() {
        assert_eq!(extract_content(r#"{}"#), None);
        assert_eq!(extract_content(r#"{"choices":[]}"#), None);
        assert_eq!(extract_content(r#"{"choices":[{}]}"#), None);
        assert_eq!(extract_content(r#"{"choices":[{"delta":{}}]}"#), None);
        assert_eq!(
            extract_content(r#"{"choices":[{"delta":{"content":null}}]}"#),
            None
        );
    }

    #[test]
    fn test_empty_fragment_is_skipped() {
        assert_eq!(
            extract_content(r#"{"choices":[{"delta":{"content":""}}]}"#),
            None
        );
    }

    #[test]
    fn test_only_first_choice_is_read() {
        let payload = r#"{"choices":[{"delta":{"content":"a"}},{"delta":{"content":"b"}}]}"#;
        assert_eq!(extract_content(payload).as_deref(), Some("a"));
    }
}
