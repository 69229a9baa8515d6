// SPDX-License-Identifier: MPL-2.0
//! Per-window generation state.
//!
//! `Session` owns everything that lives only as long as the window: the
//! description being typed, the current diagram source, the request status
//! and the last error. The diagram URL is never stored; it is derived from
//! the source and the format every time it is needed.

use crate::diagram::{self, DiagramSource, DiagramUrl, RenderFormat};
use crate::error::GenerationError;
use crate::generator::GenerationRequest;

/// Progress of the current generation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestStatus {
    #[default]
    Idle,
    Loading,
    Error,
    Done,
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    input: String,
    source: Option<DiagramSource>,
    status: RequestStatus,
    error: Option<GenerationError>,
    format: RenderFormat,
    /// Bumped whenever the diagram URL may have changed; used to drop stale
    /// preview responses.
    revision: u64,
}

impl Session {
    #[must_use]
    pub fn new(format: RenderFormat) -> Self {
        Self {
            format,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    #[must_use]
    pub fn status(&self) -> RequestStatus {
        self.status
    }

    #[must_use]
    pub fn error(&self) -> Option<&GenerationError> {
        self.error.as_ref()
    }

    #[must_use]
    pub fn source(&self) -> Option<&DiagramSource> {
        self.source.as_ref()
    }

    #[must_use]
    pub fn format(&self) -> RenderFormat {
        self.format
    }

    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.status == RequestStatus::Loading
    }

    /// Whether the Generate button should be enabled.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        !self.is_loading() && !self.input.trim().is_empty()
    }

    /// Starts a generation attempt.
    ///
    /// On success the previous source and error are cleared and the status
    /// becomes `Loading`. On failure nothing changes.
    ///
    /// # Errors
    ///
    /// - [`GenerationError::MissingCredential`] when `credential` is absent or blank
    /// - [`GenerationError::Busy`] while another attempt is loading
    /// - [`GenerationError::EmptyInput`] when the description is blank
    pub fn begin_generation(
        &mut self,
        credential: Option<&str>,
        model: &str,
    ) -> Result<GenerationRequest, GenerationError> {
        let credential = credential
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or(GenerationError::MissingCredential)?;
        if self.is_loading() {
            return Err(GenerationError::Busy);
        }
        if self.input.trim().is_empty() {
            return Err(GenerationError::EmptyInput);
        }

        self.source = None;
        self.error = None;
        self.status = RequestStatus::Loading;
        self.revision += 1;

        Ok(GenerationRequest::new(model, credential, &self.input))
    }

    /// Records the outcome of the running attempt. Ignored when idle.
    pub fn finish_generation(&mut self, result: Result<DiagramSource, GenerationError>) {
        if !self.is_loading() {
            tracing::debug!("ignoring generation result outside of an attempt");
            return;
        }

        match result {
            Ok(source) => {
                self.source = Some(source);
                self.status = RequestStatus::Done;
            }
            Err(error) => {
                self.error = Some(error);
                self.status = RequestStatus::Error;
            }
        }
        self.revision += 1;
    }

    /// Replaces the source with the user's edited text.
    ///
    /// Has no effect until a diagram exists; never contacts the model.
    pub fn edit_source(&mut self, text: impl Into<String>) {
        if self.source.is_some() {
            self.source = Some(DiagramSource::edited(text));
            self.revision += 1;
        }
    }

    pub fn set_format(&mut self, format: RenderFormat) {
        if self.format != format {
            self.format = format;
            self.revision += 1;
        }
    }

    /// Current diagram URL, derived from the source and the format.
    #[must_use]
    pub fn diagram_url(&self, server_url: &str) -> Option<DiagramUrl> {
        self.source
            .as_ref()
            .filter(|source| !source.is_empty())
            .map(|source| diagram::render(server_url, source, self.format))
    }
}
