// SPDX-License-Identifier: MPL-2.0
//! PlantUML diagram source and its conversion into renderable URLs.
//!
//! - [`DiagramSource`]: validated PlantUML text
//! - [`encoding`]: the reversible deflate + base64 token understood by PlantUML servers
//! - [`url`]: composition of the image URL and the raw-source data URL

pub mod encoding;
pub mod url;

pub use url::{raw_source_data_url, render, DiagramUrl, RenderFormat, SOURCE_FILE_NAME};

use crate::error::GenerationError;
use std::fmt;

/// Marker opening every PlantUML diagram.
pub const START_MARKER: &str = "@startuml";

/// Marker closing every PlantUML diagram.
pub const END_MARKER: &str = "@enduml";

/// Language-specific fence openers stripped from model answers.
const OPENING_FENCES: [&str; 2] = ["```plantuml", "```puml"];

/// Generic fence marker, also used to close blocks.
const FENCE: &str = "```";

/// PlantUML text as shown in the source editor.
///
/// Values built with [`DiagramSource::from_model_output`] are guaranteed to
/// carry both markers. Values built with [`DiagramSource::edited`] are whatever
/// the user typed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DiagramSource(String);

impl DiagramSource {
    /// Cleans a raw model answer and checks it looks like PlantUML.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::MalformedResponse`] when either marker is
    /// missing after cleaning.
    pub fn from_model_output(raw: &str) -> Result<Self, GenerationError> {
        let cleaned = strip_code_fences(raw);
        if has_markers(&cleaned) {
            Ok(Self(cleaned))
        } else {
            Err(GenerationError::MalformedResponse)
        }
    }

    /// Wraps text typed in the editor. No validation happens here.
    pub fn edited(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for DiagramSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Removes every Markdown fence around the diagram and trims the result.
#[must_use]
pub fn strip_code_fences(raw: &str) -> String {
    let mut text = raw.to_string();
    for opener in OPENING_FENCES {
        text = text.replace(opener, "");
    }
    text.replace(FENCE, "").trim().to_string()
}

/// Returns `true` when both the start and the end marker are present.
#[must_use]
pub fn has_markers(text: &str) -> bool {
    text.contains(START_MARKER) && text.contains(END_MARKER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fenced_answer_is_cleaned_and_trimmed() {
        let raw = "```plantuml\n@startuml\nUser --> Post\n@enduml\n```\n";
        let source = DiagramSource::from_model_output(raw).expect("valid diagram");
        assert_eq!(source.as_str(), "@startuml\nUser --> Post\n@enduml");
    }

    #[test]
    fn generic_fences_are_removed_everywhere() {
        let raw = "Here you go:\n```\n@startuml\nA -> B\n@enduml\n```";
        let source = DiagramSource::from_model_output(raw).expect("valid diagram");
        assert!(!source.as_str().contains("```"));
        assert!(source.as_str().starts_with("Here you go:"));
    }

    #[test]
    fn puml_fence_is_removed() {
        let raw = "```puml\n@startuml\nA -> B\n@enduml\n```";
        let source = DiagramSource::from_model_output(raw).expect("valid diagram");
        assert_eq!(source.as_str(), "@startuml\nA -> B\n@enduml");
    }

    #[test]
    fn missing_end_marker_is_rejected() {
        let raw = "```plantuml\n@startuml\nUser --> Post\n```";
        assert_eq!(
            DiagramSource::from_model_output(raw),
            Err(GenerationError::MalformedResponse)
        );
    }

    #[test]
    fn missing_start_marker_is_rejected() {
        assert_eq!(
            DiagramSource::from_model_output("User --> Post\n@enduml"),
            Err(GenerationError::MalformedResponse)
        );
    }

    #[test]
    fn plain_prose_is_rejected() {
        assert!(DiagramSource::from_model_output("I cannot help with that.").is_err());
    }

    #[test]
    fn edited_source_is_not_validated() {
        let source = DiagramSource::edited("anything");
        assert_eq!(source.to_string(), "anything");
        assert!(!has_markers(source.as_str()));
    }
}
