#![forbid(unsafe_code)]

//! The closed language set and per-language string values.
//!
//! The page supports exactly three languages. [`Localized`] stores one
//! string per language as separate fields, so a value that is missing a
//! language cannot be constructed.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A supported display language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Portuguese (Brazil). Authoritative default.
    Pt,
    /// English.
    En,
    /// Spanish.
    Es,
}

impl Language {
    /// Every supported language, in canonical order.
    pub const ALL: [Self; 3] = [Self::Pt, Self::En, Self::Es];

    /// Language used when nothing else is known.
    pub const DEFAULT: Self = Self::Pt;

    /// Two-letter code used in storage and in shadow attribute names.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Pt => "pt",
            Self::En => "en",
            Self::Es => "es",
        }
    }

    /// Parse an exact language code (`pt`, `en`, `es`).
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "pt" => Some(Self::Pt),
            "en" => Some(Self::En),
            "es" => Some(Self::Es),
            _ => None,
        }
    }

    /// Map a system/browser locale tag (`pt-BR`, `en_US`, `ES`) to a
    /// supported language by its primary subtag.
    #[must_use]
    pub fn from_locale_tag(tag: &str) -> Option<Self> {
        let primary = tag
            .trim()
            .split(['-', '_', '.', '@'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        Self::from_code(&primary)
    }

    /// CSS class of the flag icon shown for this language.
    #[must_use]
    pub const fn flag_class(self) -> &'static str {
        match self {
            Self::Pt => "flag-icon-br",
            Self::En => "flag-icon-us",
            Self::Es => "flag-icon-es",
        }
    }
}

impl Default for Language {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Returned when a language code is outside the supported set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsupportedLanguage(pub String);

impl fmt::Display for UnsupportedLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported language code: {:?}", self.0)
    }
}

impl std::error::Error for UnsupportedLanguage {}

impl FromStr for Language {
    type Err = UnsupportedLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| UnsupportedLanguage(s.to_owned()))
    }
}

/// One string per supported language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Localized {
    pub pt: String,
    pub en: String,
    pub es: String,
}

impl Localized {
    /// Build a value from its three translations.
    #[must_use]
    pub fn new(pt: impl Into<String>, en: impl Into<String>, es: impl Into<String>) -> Self {
        Self {
            pt: pt.into(),
            en: en.into(),
            es: es.into(),
        }
    }

    /// The translation for `lang`.
    #[must_use]
    pub fn get(&self, lang: Language) -> &str {
        match lang {
            Language::Pt => &self.pt,
            Language::En => &self.en,
            Language::Es => &self.es,
        }
    }

    /// The authoritative (`pt`) value.
    #[must_use]
    pub fn default_value(&self) -> &str {
        &self.pt
    }

    /// Iterate `(language, text)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Language, &str)> + '_ {
        Language::ALL.into_iter().map(move |lang| (lang, self.get(lang)))
    }
}
