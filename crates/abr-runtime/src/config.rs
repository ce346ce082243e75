#![forbid(unsafe_code)]

//! Site configuration as data.
//!
//! Every tunable of the page (carousel timings, slot element ids, fallback
//! page title) lives in one [`SiteConfig`] loadable from TOML or JSON.
//! Missing sections and fields fall back to the reference values, so a
//! config file only needs to name what it changes.
//!
//! ```toml
//! default_page_title = "ABR Auto Peças"
//!
//! [carousel]
//! splash_ms = 5000
//! autoplay = false
//!
//! [slots]
//! title = "heroTitle"
//! ```

use std::path::Path;
use std::time::Duration;

use abr_core::SlotBindings;
use abr_core::shadow::DEFAULT_PAGE_TITLE;
use serde::{Deserialize, Serialize};

/// Carousel timing parameters, in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    /// How long the splash stays before rotation starts.
    pub splash_ms: u64,
    /// Period of the recurring auto-advance.
    pub auto_advance_ms: u64,
    /// Delay between hiding the panel and injecting new content.
    pub hide_ms: u64,
    /// Delay after which the reveal classes are cleared.
    pub reveal_clear_ms: u64,
    /// Whether the auto-advance timer runs at all.
    pub autoplay: bool,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            splash_ms: 20_000,
            auto_advance_ms: 13_000,
            hide_ms: 300,
            reveal_clear_ms: 600,
            autoplay: true,
        }
    }
}

impl CarouselConfig {
    #[must_use]
    pub const fn splash(&self) -> Duration {
        Duration::from_millis(self.splash_ms)
    }

    #[must_use]
    pub const fn auto_advance(&self) -> Duration {
        Duration::from_millis(self.auto_advance_ms)
    }

    #[must_use]
    pub const fn hide(&self) -> Duration {
        Duration::from_millis(self.hide_ms)
    }

    #[must_use]
    pub const fn reveal_clear(&self) -> Duration {
        Duration::from_millis(self.reveal_clear_ms)
    }
}

/// Top-level page configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub carousel: CarouselConfig,
    pub slots: SlotBindings,
    /// Title used when the `<title>` element lacks a shadow.
    pub default_page_title: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            carousel: CarouselConfig::default(),
            slots: SlotBindings::default(),
            default_page_title: DEFAULT_PAGE_TITLE.to_owned(),
        }
    }
}

impl SiteConfig {
    /// Load from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(ConfigError::Toml)
    }

    /// Load from a TOML file on disk.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(s).map_err(ConfigError::Json)
    }

    /// Load from a JSON file on disk.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Validate all parameters.
    ///
    /// Returns a list of validation errors. An empty list means the config
    /// is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let c = &self.carousel;

        if c.splash_ms == 0 {
            errors.push("carousel.splash_ms must be > 0".into());
        }
        if c.auto_advance_ms == 0 {
            errors.push("carousel.auto_advance_ms must be > 0".into());
        }
        let cycle = c.hide_ms.saturating_add(c.reveal_clear_ms);
        if c.auto_advance_ms != 0 && c.auto_advance_ms <= cycle {
            errors.push(format!(
                "carousel.auto_advance_ms ({}) must exceed hide_ms + reveal_clear_ms ({cycle})",
                c.auto_advance_ms
            ));
        }

        let slots = [
            ("slots.title", &self.slots.title),
            ("slots.description", &self.slots.description),
            ("slots.image", &self.slots.image),
            ("slots.panel", &self.slots.panel),
            ("slots.indicator_prefix", &self.slots.indicator_prefix),
        ];
        for (name, value) in slots {
            if value.trim().is_empty() {
                errors.push(format!("{name} must not be empty"));
            }
        }
        let ids = [&self.slots.title, &self.slots.description, &self.slots.image, &self.slots.panel];
        for (i, a) in ids.iter().enumerate() {
            if ids[i + 1..].contains(a) && !a.is_empty() {
                errors.push(format!("slot id {a:?} is bound more than once"));
            }
        }

        if self.default_page_title.trim().is_empty() {
            errors.push("default_page_title must not be empty".into());
        }
        errors
    }

    /// Parse then validate, folding validation messages into an error.
    pub fn from_toml_str_validated(s: &str) -> Result<Self, ConfigError> {
        let config = Self::from_toml_str(s)?;
        let errors = config.validate();
        if errors.is_empty() {
            Ok(config)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

/// Configuration loading error.
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    Toml(toml::de::Error),
    /// JSON parse error.
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => write!(f, "validation errors: {}", errors.join("; ")),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Toml(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}
