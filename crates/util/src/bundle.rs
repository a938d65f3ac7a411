//! Localized string bundles shipped with connector catalogs.
//!
//! Every connector publishes one bundle per locale mapping label/help keys to
//! display text. Lookups are strict: a missing key is an error the caller
//! decides how to surface, never a silently substituted default.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Locale tried when the requested locale has no bundle.
pub const DEFAULT_LOCALE: &str = "en";

/// Error surfaced when a bundle lookup fails.
#[derive(Debug, Error)]
pub enum BundleError {
    /// The key is absent from the bundle.
    #[error("no string for key '{key}' in locale '{locale}'")]
    MissingKey { key: String, locale: String },
}

/// Key-to-text store for a single locale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StringBundle {
    /// Locale tag the strings are written in (e.g. "en", "de").
    #[serde(default = "default_locale")]
    pub locale: String,
    /// Localized strings keyed by label/help key.
    #[serde(default)]
    pub strings: IndexMap<String, String>,
}

impl Default for StringBundle {
    fn default() -> Self {
        Self::new(DEFAULT_LOCALE)
    }
}

impl StringBundle {
    /// Creates an empty bundle for `locale`.
    pub fn new(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            strings: IndexMap::new(),
        }
    }

    /// Adds a string, replacing any previous text under the same key.
    pub fn with(mut self, key: impl Into<String>, text: impl Into<String>) -> Self {
        self.strings.insert(key.into(), text.into());
        self
    }

    /// Localized text for `key`; fails when the key is unknown.
    pub fn lookup(&self, key: &str) -> Result<&str, BundleError> {
        self.strings.get(key).map(String::as_str).ok_or_else(|| BundleError::MissingKey {
            key: key.to_string(),
            locale: self.locale.clone(),
        })
    }
}

fn default_locale() -> String {
    DEFAULT_LOCALE.to_string()
}

/// The bundles of one connector, keyed by locale.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct BundleCatalog {
    #[serde(default)]
    pub bundles: IndexMap<String, StringBundle>,
}

impl BundleCatalog {
    /// Builds a catalog from raw `locale -> strings` tables, stamping each
    /// bundle with the locale it is keyed under.
    pub fn from_tables(tables: IndexMap<String, IndexMap<String, String>>) -> Self {
        let bundles = tables
            .into_iter()
            .map(|(locale, strings)| {
                let bundle = StringBundle {
                    locale: locale.clone(),
                    strings,
                };
                (locale, bundle)
            })
            .collect();
        Self { bundles }
    }

    /// Bundle for `locale`, falling back to [`DEFAULT_LOCALE`] when the
    /// requested locale was not published.
    pub fn for_locale(&self, locale: &str) -> Option<&StringBundle> {
        if let Some(bundle) = self.bundles.get(locale) {
            return Some(bundle);
        }
        debug!(locale, fallback = DEFAULT_LOCALE, "locale not published; trying fallback");
        self.bundles.get(DEFAULT_LOCALE)
    }

    /// True when the connector published no bundles at all.
    pub fn is_empty(&self) -> bool {
        self.bundles.is_empty()
    }
}
