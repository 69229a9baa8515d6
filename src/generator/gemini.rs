// SPDX-License-Identifier: MPL-2.0
//! Google Gemini streaming client.
//!
//! Uses `models/{model}:streamGenerateContent?alt=sse`, which answers with
//! Server-Sent Events. Each `data:` line holds one JSON chunk whose
//! `candidates[0].content.parts[*].text` are the next fragments of the answer.

use super::{FragmentStream, GenerationRequest, TextGenerator};
use crate::error::GenerationError;
use futures_util::future::BoxFuture;
use futures_util::{FutureExt, Stream, StreamExt};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Base URL of the Generative Language API.
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Streaming client for the Gemini API.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_base: String,
}

impl GeminiClient {
    #[must_use]
    pub fn new(http: reqwest::Client) -> Self {
        Self::with_api_base(http, DEFAULT_API_BASE)
    }

    /// Points the client at another endpoint (proxies, tests).
    #[must_use]
    pub fn with_api_base(http: reqwest::Client, api_base: impl Into<String>) -> Self {
        Self {
            http,
            api_base: api_base.into(),
        }
    }

    /// Streaming endpoint for `model`.
    #[must_use]
    pub fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/models/{model}:streamGenerateContent?alt=sse",
            self.api_base.trim_end_matches('/')
        )
    }
}

impl TextGenerator for GeminiClient {
    fn start(
        &self,
        request: GenerationRequest,
    ) -> BoxFuture<'static, Result<FragmentStream, GenerationError>> {
        let http = self.http.clone();
        let url = self.endpoint(&request.model);

        async move {
            let response = http
                .post(&url)
                .header(API_KEY_HEADER, request.credential.as_str())
                .json(&GenerateContentRequest::user_turn(&request.prompt))
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                tracing::warn!(%status, "Gemini rejected the request");
                return Err(GenerationError::from_api_response(status.as_u16(), &body));
            }

            Ok(fragments(response.bytes_stream()))
        }
        .boxed()
    }
}

// =============================================================================
// Wire types
// =============================================================================

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

impl GenerateContentRequest {
    fn user_turn(prompt: &str) -> Self {
        Self {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        }
    }
}

#[derive(Debug, Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct StreamChunk {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    code: Option<u16>,
    #[serde(default)]
    message: Option<String>,
}

// =============================================================================
// SSE decoding
// =============================================================================

/// Splits a byte stream into SSE `data:` payloads.
///
/// Bytes are buffered until a full line is available, so multi-byte
/// characters split across network chunks are decoded correctly.
#[derive(Debug, Default)]
pub struct SseLineBuffer {
    pending: Vec<u8>,
}

impl SseLineBuffer {
    /// Feeds a network chunk and returns the payloads of completed lines.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.pending.extend_from_slice(chunk);

        let mut payloads = Vec::new();
        while let Some(line_end) = self.pending.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.pending.drain(..=line_end).collect();
            if let Some(payload) = data_payload(&line) {
                payloads.push(payload);
            }
        }
        payloads
    }

    /// Flushes a last line that was not terminated by a newline.
    pub fn finish(&mut self) -> Option<String> {
        let line = std::mem::take(&mut self.pending);
        data_payload(&line)
    }
}

fn data_payload(line: &[u8]) -> Option<String> {
    let line = String::from_utf8_lossy(line);
    let line = line.trim_end_matches(['\r', '\n']);
    let data = line.strip_prefix("data:")?.trim_start();
    if data.is_empty() || data == "[DONE]" {
        None
    } else {
        Some(data.to_string())
    }
}

/// Longest excerpt of an unreadable event quoted in the error message.
const EXCERPT_CHARS: usize = 120;

/// Extracts the text fragments of one SSE payload.
///
/// # Errors
///
/// Returns [`GenerationError::Api`] when the chunk carries an error object and
/// [`GenerationError::Stream`] when the payload is not a Gemini JSON chunk, as
/// happens when a proxy answers in place of the API.
pub fn parse_chunk(payload: &str) -> Result<Vec<String>, GenerationError> {
    let chunk: StreamChunk = serde_json::from_str(payload).map_err(|e| {
        tracing::warn!("unreadable stream event: {e}");
        let excerpt: String = payload.chars().take(EXCERPT_CHARS).collect();
        GenerationError::Stream(format!("Unexpected answer from the model service: {excerpt}"))
    })?;

    if let Some(error) = chunk.error {
        return Err(GenerationError::Api {
            status: error.code,
            message: error.message.unwrap_or_default(),
        });
    }

    Ok(chunk
        .candidates
        .into_iter()
        .take(1)
        .filter_map(|candidate| candidate.content)
        .flat_map(|content| content.parts)
        .filter_map(|part| part.text)
        .filter(|text| !text.is_empty())
        .collect())
}

struct FragmentState<S> {
    bytes: S,
    lines: SseLineBuffer,
    ready: VecDeque<Result<String, GenerationError>>,
    finished: bool,
}

impl<S> FragmentState<S> {
    fn absorb(&mut self, payload: &str) {
        match parse_chunk(payload) {
            Ok(texts) => self.ready.extend(texts.into_iter().map(Ok)),
            Err(error) => {
                self.ready.push_back(Err(error));
                self.finished = true;
            }
        }
    }
}

/// Adapts an HTTP body into the ordered stream of answer fragments.
fn fragments<S, B>(bytes: S) -> FragmentStream
where
    S: Stream<Item = Result<B, reqwest::Error>> + Send + 'static,
    B: AsRef<[u8]> + Send + 'static,
{
    let state = FragmentState {
        bytes: Box::pin(bytes),
        lines: SseLineBuffer::default(),
        ready: VecDeque::new(),
        finished: false,
    };

    futures_util::stream::unfold(state, |mut state| async move {
        loop {
            if let Some(item) = state.ready.pop_front() {
                return Some((item, state));
            }
            if state.finished {
                return None;
            }

            match state.bytes.next().await {
                Some(Ok(chunk)) => {
                    for payload in state.lines.push(chunk.as_ref()) {
                        state.absorb(&payload);
                        if state.finished {
                            break;
                        }
                    }
                }
                Some(Err(e)) => {
                    state
                        .ready
                        .push_back(Err(GenerationError::Network(e.to_string())));
                    state.finished = true;
                }
                None => {
                    if let Some(payload) = state.lines.finish() {
                        state.absorb(&payload);
                    }
                    state.finished = true;
                }
            }
        }
    })
    .boxed()
}
