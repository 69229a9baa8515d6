// SPDX-License-Identifier: MPL-2.0
//! Fluent bundles embedded in the binary and locale selection.

use crate::app::config::Config;
use fluent_bundle::{FluentArgs, FluentBundle, FluentResource, FluentValue};
use rust_embed::RustEmbed;
use std::collections::HashMap;
use unic_langid::LanguageIdentifier;

#[derive(RustEmbed)]
#[folder = "assets/i18n/"]
struct Asset;

const DEFAULT_LOCALE: &str = "en-US";

pub struct I18n {
    bundles: HashMap<LanguageIdentifier, FluentBundle<FluentResource>>,
    pub available_locales: Vec<LanguageIdentifier>,
    current_locale: LanguageIdentifier,
}

impl std::fmt::Debug for I18n {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("I18n")
            .field("available_locales", &self.available_locales)
            .field("current_locale", &self.current_locale)
            .finish()
    }
}

impl Default for I18n {
    fn default() -> Self {
        Self::new(None, &Config::default())
    }
}

fn load_bundle(file: &str) -> Option<(LanguageIdentifier, FluentBundle<FluentResource>)> {
    let locale: LanguageIdentifier = file.strip_suffix(".ftl")?.parse().ok()?;
    let content = Asset::get(file)?;
    let source = String::from_utf8_lossy(&content.data).into_owned();
    let resource = FluentResource::try_new(source).unwrap_or_else(|(partial, errors)| {
        tracing::warn!(%locale, broken = errors.len(), "skipping unparsable translations");
        partial
    });

    let mut bundle = FluentBundle::new(vec![locale.clone()]);
    // Plain text in the UI; no bidi isolation marks.
    bundle.set_use_isolating(false);
    if let Err(errors) = bundle.add_resource(resource) {
        tracing::warn!(%locale, duplicates = errors.len(), "duplicate translation keys");
    }
    Some((locale, bundle))
}

impl I18n {
    /// Loads every embedded `.ftl` file and picks the starting locale.
    pub fn new(cli_lang: Option<String>, config: &Config) -> Self {
        let bundles: HashMap<_, _> = Asset::iter().filter_map(|file| load_bundle(&file)).collect();
        let mut available_locales: Vec<_> = bundles.keys().cloned().collect();
        available_locales.sort_by_key(ToString::to_string);

        let current_locale = resolve_locale(cli_lang, config, &available_locales)
            .unwrap_or_else(default_locale);

        Self {
            bundles,
            available_locales,
            current_locale,
        }
    }

    pub fn set_locale(&mut self, locale: LanguageIdentifier) {
        if self.bundles.contains_key(&locale) {
            self.current_locale = locale;
        }
    }

    pub fn current_locale(&self) -> &LanguageIdentifier {
        &self.current_locale
    }

    pub fn tr(&self, key: &str) -> String {
        self.format(key, None)
    }

    /// Translates `key`, substituting `{ $name }` placeholders.
    pub fn tr_with_args(&self, key: &str, args: &[(&str, &str)]) -> String {
        let mut fluent_args = FluentArgs::new();
        for (name, value) in args {
            fluent_args.set(*name, FluentValue::from(*value));
        }
        self.format(key, Some(&fluent_args))
    }

    fn format(&self, key: &str, args: Option<&FluentArgs<'_>>) -> String {
        let translated = self.bundles.get(&self.current_locale).and_then(|bundle| {
            let pattern = bundle.get_message(key)?.value()?;
            let mut errors = Vec::new();
            let value = bundle.format_pattern(pattern, args, &mut errors);
            errors.is_empty().then(|| value.into_owned())
        });
        translated.unwrap_or_else(|| format!("MISSING: {key}"))
    }
}

fn default_locale() -> LanguageIdentifier {
    LanguageIdentifier::from_bytes(DEFAULT_LOCALE.as_bytes()).unwrap_or_default()
}

/// First shipped locale among: command line, settings file, operating system.
/// The OS locale also matches on its bare language ("fr-CA" picks "fr").
fn resolve_locale(
    cli_lang: Option<String>,
    config: &Config,
    available: &[LanguageIdentifier],
) -> Option<LanguageIdentifier> {
    let shipped = |tag: &str| {
        tag.parse::<LanguageIdentifier>()
            .ok()
            .filter(|lang| available.contains(lang))
    };

    cli_lang
        .as_deref()
        .and_then(shipped)
        .or_else(|| config.general.language.as_deref().and_then(shipped))
        .or_else(|| {
            let os: LanguageIdentifier = sys_locale::get_locale()?.parse().ok()?;
            available
                .iter()
                .find(|lang| **lang == os)
                .or_else(|| available.iter().find(|lang| lang.language == os.language))
                .cloned()
        })
}
