// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Config(String),
    Http(String),
    Generation(GenerationError),
}

/// Reasons a generation attempt can fail.
/// Used to provide user-friendly, localized error titles; the message itself
/// is always shown verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// No API key has been saved yet.
    MissingCredential,

    /// The description field is empty.
    EmptyInput,

    /// A generation is already running.
    Busy,

    /// The request could not be sent or the connection dropped.
    Network(String),

    /// The API answered with a non-success status or an error payload.
    Api {
        status: Option<u16>,
        message: String,
    },

    /// A stream event could not be understood.
    Stream(String),

    /// The answer did not contain `@startuml` / `@enduml`.
    MalformedResponse,
}

/// Shown when a failure carries no message of its own.
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong while generating the diagram.";

impl GenerationError {
    /// Returns the i18n message key for this error type.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            GenerationError::MissingCredential => "error-generation-missing-key",
            GenerationError::EmptyInput => "error-generation-empty-input",
            GenerationError::Busy => "error-generation-busy",
            GenerationError::Network(_) => "error-generation-network",
            GenerationError::Api { .. } => "error-generation-api",
            GenerationError::Stream(_) => "error-generation-stream",
            GenerationError::MalformedResponse => "error-generation-malformed",
        }
    }

    /// Text displayed in the error panel, falling back to a generic sentence
    /// when the collaborator gave no detail.
    pub fn user_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            GENERIC_FAILURE_MESSAGE.to_string()
        } else {
            message
        }
    }

    /// Technical detail shown under the message, when there is any.
    pub fn details(&self) -> Option<String> {
        match self {
            GenerationError::Api {
                status: Some(status),
                ..
            } => Some(format!("HTTP {status}")),
            _ => None,
        }
    }

    /// Builds an API error from an HTTP status and the raw response body.
    ///
    /// Gemini wraps failures as `{"error": {"message": ...}}`; anything else
    /// falls back to the status line.
    pub fn from_api_response(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|value| {
                value["error"]["message"]
                    .as_str()
                    .map(std::string::ToString::to_string)
            })
            .unwrap_or_else(|| format!("HTTP status {status}"));

        GenerationError::Api {
            status: Some(status),
            message,
        }
    }
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationError::MissingCredential => {
                write!(f, "Please add your Gemini API key in the settings first.")
            }
            GenerationError::EmptyInput => write!(f, "Describe the diagram you want first."),
            GenerationError::Busy => write!(f, "A diagram is already being generated."),
            GenerationError::Network(msg) => write!(f, "{msg}"),
            GenerationError::Api { message, .. } => write!(f, "{message}"),
            GenerationError::Stream(msg) => write!(f, "{msg}"),
            GenerationError::MalformedResponse => {
                write!(f, "The model did not return valid PlantUML code.")
            }
        }
    }
}

impl std::error::Error for GenerationError {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Http(e) => write!(f, "HTTP Error: {}", e),
            Error::Generation(e) => write!(f, "Generation Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<GenerationError> for Error {
    fn from(err: GenerationError) -> Self {
        Error::Generation(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Http(err.to_string())
    }
}

impl From<reqwest::Error> for GenerationError {
    fn from(err: reqwest::Error) -> Self {
        GenerationError::Network(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_io_error() {
        let err = Error::Io("disk failure".to_string());
        assert_eq!(format!("{}", err), "I/O Error: disk failure");
    }

    #[test]
    fn from_io_error_produces_io_variant() {
        let io_error = std::io::Error::other("boom");
        let err: Error = io_error.into();
        match err {
            Error::Io(message) => assert!(message.contains("boom")),
            _ => panic!("expected Io variant"),
        }
    }

    #[test]
    fn config_error_formats_properly() {
        let err = Error::Config("bad field".into());
        assert_eq!(format!("{}", err), "Config Error: bad field");
    }

    #[test]
    fn generation_error_wraps_into_crate_error() {
        let err: Error = GenerationError::MalformedResponse.into();
        assert!(matches!(
            err,
            Error::Generation(GenerationError::MalformedResponse)
        ));
    }

    #[test]
    fn api_error_uses_gemini_message_when_present() {
        let body = r#"{"error":{"code":400,"message":"API key not valid.","status":"INVALID_ARGUMENT"}}"#;
        let err = GenerationError::from_api_response(400, body);
        assert_eq!(err.user_message(), "API key not valid.");
        assert!(matches!(err, GenerationError::Api { status: Some(400), .. }));
    }

    #[test]
    fn api_error_falls_back_to_status() {
        let err = GenerationError::from_api_response(503, "<html>unavailable</html>");
        assert_eq!(err.user_message(), "HTTP status 503");
    }

    #[test]
    fn empty_network_message_uses_generic_fallback() {
        let err = GenerationError::Network(String::new());
        assert_eq!(err.user_message(), GENERIC_FAILURE_MESSAGE);
    }

    #[test]
    fn malformed_response_has_fixed_message() {
        assert_eq!(
            GenerationError::MalformedResponse.user_message(),
            "The model did not return valid PlantUML code."
        );
    }

    #[test]
    fn generation_error_i18n_keys() {
        assert_eq!(
            GenerationError::MissingCredential.i18n_key(),
            "error-generation-missing-key"
        );
        assert_eq!(
            GenerationError::MalformedResponse.i18n_key(),
            "error-generation-malformed"
        );
        assert_eq!(
            GenerationError::Network("x".into()).i18n_key(),
            "error-generation-network"
        );
    }
}
