// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for configuration constants.
//!
//! # Categories
//!
//! - **Generator**: model used for diagram generation
//! - **Render**: PlantUML server and preview behavior

pub use crate::diagram::url::DEFAULT_SERVER_URL;
pub use crate::generator::DEFAULT_MODEL;

// ==========================================================================
// Render Defaults
// ==========================================================================

/// Delay between the last source edit and the preview request (in milliseconds).
pub const PREVIEW_DEBOUNCE_MS: u64 = 400;
