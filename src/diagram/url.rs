// SPDX-License-Identifier: MPL-2.0
//! Retrieval URLs for rendered diagrams and raw sources.

use super::encoding;
use super::DiagramSource;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Public PlantUML rendering endpoint.
pub const DEFAULT_SERVER_URL: &str = "https://www.plantuml.com/plantuml";

/// File name offered when downloading the raw source.
pub const SOURCE_FILE_NAME: &str = "diagram.puml";

const DATA_URL_PREFIX: &str = "data:text/plain;charset=utf-8,";

/// Output format requested from the rendering server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderFormat {
    #[default]
    Svg,
    Png,
}

impl RenderFormat {
    pub const ALL: [RenderFormat; 2] = [RenderFormat::Svg, RenderFormat::Png];

    /// Path segment used by the rendering server.
    #[must_use]
    pub fn path_segment(self) -> &'static str {
        match self {
            RenderFormat::Svg => "svg",
            RenderFormat::Png => "png",
        }
    }

    /// Suggested file name for the downloaded image.
    #[must_use]
    pub fn file_name(self) -> &'static str {
        match self {
            RenderFormat::Svg => "diagram.svg",
            RenderFormat::Png => "diagram.png",
        }
    }

    /// Parses a stored value, case-insensitively.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "svg" => Some(RenderFormat::Svg),
            "png" => Some(RenderFormat::Png),
            _ => None,
        }
    }
}

impl fmt::Display for RenderFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RenderFormat::Svg => "SVG",
            RenderFormat::Png => "PNG",
        })
    }
}

/// URL of a rendered diagram on the PlantUML server.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DiagramUrl {
    url: String,
    format: RenderFormat,
}

impl DiagramUrl {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub fn format(&self) -> RenderFormat {
        self.format
    }
}

impl fmt::Display for DiagramUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

/// Builds the image URL for `source` in the requested `format`.
///
/// Pure and deterministic; nothing is fetched here.
#[must_use]
pub fn render(server_url: &str, source: &DiagramSource, format: RenderFormat) -> DiagramUrl {
    let base = server_url.trim_end_matches('/');
    let token = encoding::encode(source.as_str());
    DiagramUrl {
        url: format!("{base}/{}/{token}", format.path_segment()),
        format,
    }
}

/// Builds the `data:` URL used for the "download source" action.
#[must_use]
pub fn raw_source_data_url(source: &DiagramSource) -> String {
    format!("{DATA_URL_PREFIX}{}", urlencoding::encode(source.as_str()))
}

/// Extracts the text carried by a URL built with [`raw_source_data_url`].
#[must_use]
pub fn decode_data_url(url: &str) -> Option<String> {
    let payload = url.strip_prefix(DATA_URL_PREFIX)?;
    urlencoding::decode(payload).ok().map(|text| text.into_owned())
}
