// SPDX-License-Identifier: MPL-2.0
//! Fetching rendered diagrams and saving downloads.
//!
//! Both download actions are URL based: the image points at the rendering
//! server, the raw source is a `data:` URL built locally. [`resolve`] turns
//! either into bytes.

use crate::diagram::url::decode_data_url;
use crate::diagram::{raw_source_data_url, DiagramSource, DiagramUrl, SOURCE_FILE_NAME};
use crate::error::{Error, Result};
use std::path::Path;

/// Builds the HTTP client shared by the model client, previews and downloads.
///
/// # Errors
///
/// Returns [`Error::Http`] if the TLS backend cannot be initialized.
pub fn build_http_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::limited(10))
        .user_agent(concat!("IcedUml/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(Error::from)
}

/// Something the user can save to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadTarget {
    pub url: String,
    pub file_name: String,
}

impl DownloadTarget {
    /// The rendered picture, as served by the rendering server.
    #[must_use]
    pub fn image(url: &DiagramUrl) -> Self {
        Self {
            url: url.as_str().to_string(),
            file_name: url.format().file_name().to_string(),
        }
    }

    /// The PlantUML text, as a local `data:` URL.
    #[must_use]
    pub fn source(source: &DiagramSource) -> Self {
        Self {
            url: raw_source_data_url(source),
            file_name: SOURCE_FILE_NAME.to_string(),
        }
    }

    #[must_use]
    pub fn is_local(&self) -> bool {
        self.url.starts_with("data:")
    }
}

/// Downloads the body of `url`.
///
/// # Errors
///
/// Returns [`Error::Http`] on transport failures and non-success statuses.
pub async fn fetch_bytes(client: &reqwest::Client, url: &str) -> Result<Vec<u8>> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(Error::Http(format!("HTTP status: {status}")));
    }
    Ok(response.bytes().await?.to_vec())
}

/// Resolves a download target into the bytes to write.
///
/// # Errors
///
/// Fails on network errors or when a `data:` URL cannot be decoded.
pub async fn resolve(client: &reqwest::Client, target: &DownloadTarget) -> Result<Vec<u8>> {
    if target.is_local() {
        decode_data_url(&target.url)
            .map(String::into_bytes)
            .ok_or_else(|| Error::Io("unreadable data URL".to_string()))
    } else {
        fetch_bytes(client, &target.url).await
    }
}

/// Resolves `target` and writes it to `path`.
///
/// # Errors
///
/// Propagates resolution and file system errors.
pub async fn save(client: &reqwest::Client, target: &DownloadTarget, path: &Path) -> Result<()> {
    let bytes = resolve(client, target).await?;
    tokio::fs::write(path, bytes).await?;
    tracing::info!(path = %path.display(), "download saved");
    Ok(())
}
