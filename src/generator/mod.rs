// SPDX-License-Identifier: MPL-2.0
//! Turns a plain-language description into PlantUML source.
//!
//! The pipeline is: build a one-turn prompt, stream the model answer,
//! concatenate every fragment in arrival order, strip Markdown fences and
//! check the PlantUML markers. Nothing is shown to the user until the whole
//! answer has arrived.
//!
//! The model is reached through the [`TextGenerator`] trait so the pipeline
//! can be driven by in-memory streams in tests. [`gemini::GeminiClient`] is
//! the production implementation.

pub mod gemini;

use crate::diagram::DiagramSource;
use crate::error::GenerationError;
use futures_util::future::BoxFuture;
use futures_util::stream::BoxStream;
use futures_util::StreamExt;
use std::sync::Arc;

pub use gemini::GeminiClient;

/// Model used when the settings file does not name one.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

const INSTRUCTION: &str = "Generate only valid PlantUML code, nothing else. \
Convert the following description into a PlantUML diagram:";

/// Ordered text fragments produced by the model.
pub type FragmentStream = BoxStream<'static, Result<String, GenerationError>>;

/// A single-turn generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub model: String,
    pub credential: String,
    pub prompt: String,
}

impl GenerationRequest {
    /// Wraps the user's description in the fixed PlantUML instruction.
    pub fn new(
        model: impl Into<String>,
        credential: impl Into<String>,
        description: &str,
    ) -> Self {
        Self {
            model: model.into(),
            credential: credential.into(),
            prompt: build_prompt(description),
        }
    }
}

/// Port for the generative-text collaborator.
pub trait TextGenerator: Send + Sync {
    /// Sends the request and resolves to the stream of answer fragments.
    ///
    /// Errors raised before the first fragment (connection refused, HTTP
    /// error status) are reported by the future; errors in the middle of the
    /// answer are items of the stream.
    fn start(&self, request: GenerationRequest)
        -> BoxFuture<'static, Result<FragmentStream, GenerationError>>;
}

/// Builds the prompt sent to the model.
#[must_use]
pub fn build_prompt(description: &str) -> String {
    format!("{INSTRUCTION} {description}")
}

/// Concatenates every fragment of `stream`, in order.
///
/// # Errors
///
/// Stops at the first failed fragment and returns its error.
pub async fn collect_fragments(mut stream: FragmentStream) -> Result<String, GenerationError> {
    let mut answer = String::new();
    while let Some(fragment) = stream.next().await {
        answer.push_str(&fragment?);
    }
    Ok(answer)
}

/// Runs one generation attempt from request to validated source.
///
/// # Errors
///
/// Returns [`GenerationError::MissingCredential`] without contacting the model
/// when the key is blank, any transport or API failure as reported by the
/// collaborator, or [`GenerationError::MalformedResponse`] when the answer has
/// no PlantUML markers.
pub async fn generate(
    generator: Arc<dyn TextGenerator>,
    request: GenerationRequest,
) -> Result<DiagramSource, GenerationError> {
    if request.credential.trim().is_empty() {
        return Err(GenerationError::MissingCredential);
    }

    let model = request.model.clone();
    tracing::debug!(%model, "requesting diagram");

    let stream = generator.start(request).await?;
    let answer = collect_fragments(stream).await?;
    tracing::debug!(bytes = answer.len(), "model answer received");

    DiagramSource::from_model_output(&answer)
}
