// SPDX-License-Identifier: MPL-2.0
//! `iced_uml` turns natural-language descriptions into UML diagrams.
//!
//! A Gemini model writes PlantUML source for the description, the source is
//! encoded for the public PlantUML server and the rendered picture is shown
//! with download options. Built with the Iced GUI framework, with Fluent
//! localization and TOML preferences.

pub mod app;
pub mod diagram;
pub mod download;
pub mod error;
pub mod generator;
pub mod i18n;
pub mod ui;
