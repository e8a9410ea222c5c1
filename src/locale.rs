//! Locale resolution for multi-language content.
//!
//! CMS fields that editors translate arrive in one of two shapes:
//!
//! ```text
//! "Premium Almonds"                                   plain string
//! { "_type": "localeString", "en": "Premium Almonds",
//!   "hi": "प्रीमियम बादाम" }                              locale map
//! ```
//!
//! A plain string is single-locale content and is returned for every
//! locale. A map is looked up by the active locale, then by the default
//! locale. Empty strings count as missing. Keys starting with `_` are CMS
//! bookkeeping and are never treated as locales.
//!
//! Resolution never fails: a missing translation is `None` and the renderer
//! leaves that slot empty.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Locale used when the active locale has no entry.
pub const DEFAULT_LOCALE: &str = "en";

/// A text value available in one or more languages.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LocalizedText {
    Plain(String),
    Localized(BTreeMap<String, String>),
}

impl LocalizedText {
    /// Build a `LocalizedText` from raw JSON.
    ///
    /// Strings become [`LocalizedText::Plain`], objects keep their
    /// string-valued locale entries. Anything else is `None`.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::String(s) => Some(Self::Plain(s.clone())),
            serde_json::Value::Object(map) => {
                let entries: BTreeMap<String, String> = map
                    .iter()
                    .filter(|(k, _)| !k.starts_with('_'))
                    .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
                    .collect();
                Some(Self::Localized(entries))
            }
            _ => None,
        }
    }

    /// True when no locale resolves to a non-empty string.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Plain(s) => s.trim().is_empty(),
            Self::Localized(map) => map.values().all(|s| s.trim().is_empty()),
        }
    }
}

impl From<&str> for LocalizedText {
    fn from(s: &str) -> Self {
        Self::Plain(s.to_string())
    }
}

impl<'de> Deserialize<'de> for LocalizedText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = serde_json::Value::deserialize(deserializer)?;
        Self::from_json(&raw)
            .ok_or_else(|| serde::de::Error::custom("expected a string or a locale map"))
    }
}

/// Locale pair used for every lookup in a render pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Locales {
    pub active: String,
    pub fallback: String,
}

impl Locales {
    pub fn new(active: impl Into<String>, fallback: impl Into<String>) -> Self {
        Self {
            active: active.into(),
            fallback: fallback.into(),
        }
    }

    /// Resolve with this pair. See [`resolve_with_fallback`].
    pub fn resolve<'a>(&self, value: Option<&'a LocalizedText>) -> Option<&'a str> {
        resolve_with_fallback(value, &self.active, &self.fallback)
    }

    /// Resolve and copy into an owned string.
    pub fn text(&self, value: Option<&LocalizedText>) -> Option<String> {
        self.resolve(value).map(str::to_string)
    }
}

impl Default for Locales {
    fn default() -> Self {
        Self::new(DEFAULT_LOCALE, DEFAULT_LOCALE)
    }
}

/// Resolve `value` for `locale`, falling back to [`DEFAULT_LOCALE`].
pub fn resolve<'a>(value: Option<&'a LocalizedText>, locale: &str) -> Option<&'a str> {
    resolve_with_fallback(value, locale, DEFAULT_LOCALE)
}

/// Resolve `value` for `locale`, falling back to `fallback`.
///
/// - Plain strings are returned unchanged regardless of locale.
/// - Locale maps return the `locale` entry, then the `fallback` entry.
/// - Empty or whitespace-only strings are treated as absent.
pub fn resolve_with_fallback<'a>(
    value: Option<&'a LocalizedText>,
    locale: &str,
    fallback: &str,
) -> Option<&'a str> {
    let non_empty = |s: &'a String| Some(s.as_str()).filter(|s| !s.trim().is_empty());
    match value? {
        LocalizedText::Plain(s) => non_empty(s),
        LocalizedText::Localized(map) => map
            .get(locale)
            .and_then(non_empty)
            .or_else(|| map.get(fallback).and_then(non_empty)),
    }
}
