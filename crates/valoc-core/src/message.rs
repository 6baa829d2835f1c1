//! # Localized Message Maps
//!
//! Schema authors attach human-readable failure texts to schema nodes as a
//! mapping from language code to message. The map travels with the violation
//! untouched; collapsing it to a single string happens only at the edges
//! (for example when projecting a schema into MongoDB, whose dialect has no
//! localization concept) and always under an explicit [`LanguagePreference`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Generic text used when a schema node declares no message of its own,
/// or declares none in any preferred language.
pub const FALLBACK_MESSAGE: &str = "failed";

/// A mapping from language code (`"en"`, `"de"`, …) to message text.
///
/// Serializes transparently as a JSON object:
/// `{"de": "Kennung ungültig", "en": "invalid id"}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText(BTreeMap<String, String>);

impl LocalizedText {
    /// An empty message map.
    pub fn new() -> Self {
        Self::default()
    }

    /// A message map holding a single language.
    pub fn in_language(language: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new().with(language, text)
    }

    /// Add (or replace) the text for one language.
    pub fn with(mut self, language: impl Into<String>, text: impl Into<String>) -> Self {
        self.0.insert(language.into(), text.into());
        self
    }

    /// The generic failure message, `{"en": "failed"}`.
    ///
    /// Used whenever a violation must carry a message but the schema node it
    /// resolved to declares none.
    pub fn failure() -> Self {
        Self::in_language("en", FALLBACK_MESSAGE)
    }

    /// Look up the text for one language code.
    pub fn get(&self, language: &str) -> Option<&str> {
        self.0.get(language).map(String::as_str)
    }

    /// Returns true when no language carries a text.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(language, text)` pairs in language order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Collapse the map to a single string under `languages`: the primary
    /// language wins, then the fallback, then [`FALLBACK_MESSAGE`].
    pub fn resolve(&self, languages: &LanguagePreference) -> &str {
        self.get(&languages.primary)
            .or_else(|| self.get(&languages.fallback))
            .unwrap_or(FALLBACK_MESSAGE)
    }
}

/// Which languages a single-string consumer receives, in preference order.
///
/// Deployment-specific: the default (`"en"` then `"de"`) matches the schemas
/// this library grew up with, but callers serving other audiences construct
/// their own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguagePreference {
    /// Language looked up first.
    pub primary: String,
    /// Language looked up when the primary is absent.
    pub fallback: String,
}

impl LanguagePreference {
    /// A preference list with the given primary and fallback languages.
    pub fn new(primary: impl Into<String>, fallback: impl Into<String>) -> Self {
        Self {
            primary: primary.into(),
            fallback: fallback.into(),
        }
    }
}

impl Default for LanguagePreference {
    fn default() -> Self {
        Self::new("en", "de")
    }
}
