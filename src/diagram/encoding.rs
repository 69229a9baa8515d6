// SPDX-License-Identifier: MPL-2.0
//! PlantUML text encoding.
//!
//! PlantUML servers accept diagram text embedded in the URL path. The text is
//! compressed with raw DEFLATE and written with a base64 variant whose
//! alphabet is `0-9A-Za-z-_`. Groups are always complete: the compressed
//! bytes are padded with zeros to a multiple of three before encoding, which
//! is what the reference encoders do.

use base64::alphabet::Alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use flate2::read::DeflateDecoder;
use flate2::write::DeflateEncoder;
use flate2::Compression;
use std::fmt;
use std::io::{self, Read, Write};

const PLANTUML_ALPHABET: Alphabet =
    match Alphabet::new("0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz-_") {
        Ok(alphabet) => alphabet,
        Err(_) => panic!("invalid PlantUML alphabet"),
    };

const PLANTUML_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &PLANTUML_ALPHABET,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Errors raised while turning a token back into text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The token contains characters outside the PlantUML alphabet.
    InvalidToken(String),
    /// The decoded bytes are not a valid DEFLATE stream.
    Inflate(String),
    /// The inflated bytes are not UTF-8.
    Utf8,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::InvalidToken(msg) => write!(f, "Invalid token: {msg}"),
            DecodeError::Inflate(msg) => write!(f, "Invalid compressed data: {msg}"),
            DecodeError::Utf8 => write!(f, "Decoded text is not UTF-8"),
        }
    }
}

impl std::error::Error for DecodeError {}

/// Encodes PlantUML text into a URL-safe token.
///
/// Deterministic: the same text always yields the same token.
///
/// # Panics
///
/// Never in practice: compression writes into an in-memory buffer, which
/// cannot fail.
#[must_use]
pub fn encode(text: &str) -> String {
    let mut compressed =
        deflate(text.as_bytes()).expect("deflating into a Vec cannot fail");
    let remainder = compressed.len() % 3;
    if remainder != 0 {
        compressed.resize(compressed.len() + 3 - remainder, 0);
    }
    PLANTUML_ENGINE.encode(compressed)
}

/// Reverses [`encode`].
///
/// # Errors
///
/// Fails when the token is not valid PlantUML base64, the payload is not raw
/// DEFLATE data, or the result is not UTF-8.
pub fn decode(token: &str) -> Result<String, DecodeError> {
    let compressed = PLANTUML_ENGINE
        .decode(token)
        .map_err(|e| DecodeError::InvalidToken(e.to_string()))?;

    // Zero padding after the final block is ignored by the decoder.
    let mut inflated = Vec::new();
    DeflateDecoder::new(compressed.as_slice())
        .read_to_end(&mut inflated)
        .map_err(|e| DecodeError::Inflate(e.to_string()))?;

    String::from_utf8(inflated).map_err(|_| DecodeError::Utf8)
}

fn deflate(bytes: &[u8]) -> io::Result<Vec<u8>> {
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(bytes)?;
    encoder.finish()
}
