//! Server-Sent Events (SSE) parser for OpenAI-compatible streaming responses.

use bytes::Bytes;
use futures_util::Stream;
use serde::Deserialize;

use crate::error::BackendError;

#[derive(Debug, Deserialize)]
struct StreamResponse {
    choices: Vec<StreamChoice>,
}

#[derive(Debug, Deserialize)]
struct StreamChoice {
    delta: Delta,
}

#[derive(Debug, Deserialize)]
struct Delta {
    content: Option<String>,
}

/// Converts a raw SSE byte stream into a stream of text chunks.
///
/// Lines (and UTF-8 sequences) may be split across network chunks; they are
/// buffered until the terminating newline arrives. The stream ends at `data: [DONE]`.
pub fn sse_to_text_stream(
    byte_stream: impl Stream<Item = reqwest::Result<Bytes>> + Send + 'static,
) -> impl Stream<Item = Result<String, BackendError>> + Send {
    async_stream::stream! {
        use futures_util::StreamExt;

        let mut byte_stream = std::pin::pin!(byte_stream);
        let mut buffer: Vec<u8> = Vec::new();

        while let Some(chunk_result) = byte_stream.next().await {
            let chunk = match chunk_result {
                Ok(c) => c,
                Err(e) => {
                    yield Err(BackendError::Decode(format!("stream error: {e}")));
                    return;
                }
            };

            buffer.extend_from_slice(&chunk);

            // Split on raw bytes so multi-byte characters cut by the network stay intact
            while let Some(line_end) = buffer.iter().position(|&b| b == b'\n') {
                let raw: Vec<u8> = buffer.drain(..=line_end).collect();
                let line = String::from_utf8_lossy(&raw);
                let line = line.trim();

                if line == "data: [DONE]" {
                    return;
                }
                if let Some(content) = parse_sse_line(line) {
                    yield Ok(content);
                }
            }
        }

        if let Some(content) = parse_sse_line(String::from_utf8_lossy(&buffer).trim()) {
            yield Ok(content);
        }
    }
}

/// Extracts the delta text from one `data: {...}` line.
///
/// Returns `None` for non-data lines, empty deltas and undecodable payloads.
fn parse_sse_line(line: &str) -> Option<String> {
    let json_str = line.strip_prefix("data: ")?;

    let response = serde_json::from_str::<StreamResponse>(json_str).ok()?;

    let content: String = response
        .choices
        .into_iter()
        .filter_map(|c| c.delta.content)
        .collect();

    if content.is_empty() {
        None
    } else {
        Some(content)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use futures_util::StreamExt;

    #[test]
    fn test_parse_sse_line_with_content() {
        let line = r#"data: {"choices":[{"delta":{"content":"Bonjour"}}]}"#;
        assert_eq!(parse_sse_line(line), Some("Bonjour".to_string()));
    }

    #[test]
    fn test_parse_sse_line_ignores_empty_and_role_deltas() {
        assert_eq!(
            parse_sse_line(r#"data: {"choices":[{"delta":{"content":""}}]}"#),
            None
        );
        assert_eq!(
            parse_sse_line(r#"data: {"choices":[{"delta":{"role":"assistant"}}]}"#),
            None
        );
    }

    #[test]
    fn test_parse_sse_line_non_data_lines() {
        assert_eq!(parse_sse_line(": keep-alive"), None);
        assert_eq!(parse_sse_line("data: [DONE]"), None);
        assert_eq!(parse_sse_line("data: not json"), None);
        assert_eq!(parse_sse_line(""), None);
    }

    #[tokio::test]
    async fn test_stream_reassembles_split_lines() {
        let chunks: Vec<reqwest::Result<Bytes>> = vec![
            Ok(Bytes::from_static(b"data: {\"choices\":[{\"delta\":{\"con")),
            Ok(Bytes::from_static(b"tent\":\"Bon\"}}]}\n\ndata: {\"choices\":")),
            Ok(Bytes::from_static(b"[{\"delta\":{\"content\":\"jour\"}}]}\n")),
            Ok(Bytes::from_static(b"data: [DONE]\n")),
            Ok(Bytes::from_static(b"data: {\"choices\":[{\"delta\":{\"content\":\"!\"}}]}\n")),
        ];

        let stream = sse_to_text_stream(futures_util::stream::iter(chunks));
        let parts: Vec<String> = stream.map(Result::unwrap).collect().await;

        assert_eq!(parts, vec!["Bon", "jour"]);
    }

    #[tokio::test]
    async fn test_stream_keeps_split_multibyte_characters() {
        let event = r#"data: {"choices":[{"delta":{"content":"こんにちは"}}]}"#;
        let line = format!("{event}\n");
        let line = line.as_bytes();
        let (head, tail) = line.split_at(line.len() - 13);
        let chunks: Vec<reqwest::Result<Bytes>> = vec![
            Ok(Bytes::copy_from_slice(head)),
            Ok(Bytes::copy_from_slice(tail)),
        ];

        let stream = sse_to_text_stream(futures_util::stream::iter(chunks));
        let parts: Vec<String> = stream.map(Result::unwrap).collect().await;

        assert_eq!(parts, vec!["こんにちは"]);
    }

    #[tokio::test]
    async fn test_stream_flushes_unterminated_last_line() {
        let chunks: Vec<reqwest::Result<Bytes>> = vec![Ok(Bytes::from_static(
            b"data: {\"choices\":[{\"delta\":{\"content\":\"Hola\"}}]}",
        ))];

        let stream = sse_to_text_stream(futures_util::stream::iter(chunks));
        let parts: Vec<String> = stream.map(Result::unwrap).collect().await;

        assert_eq!(parts, vec!["Hola"]);
    }
}
