#![forbid(unsafe_code)]

//! ABR catalog page public facade.
//!
//! Re-exports the types a host needs to run the page (catalog, document,
//! configuration, and the [`WebPage`] itself) and offers a unified
//! [`Error`] plus a lightweight prelude.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

#[cfg(feature = "logging")]
pub mod logging;

// --- Core re-exports -------------------------------------------------------

pub use abr_core::{
    Catalog, CatalogEntry, CatalogError, Document, Element, ElementKind, KeyValueStore, Language,
    Localized, MemoryStore, NullStore, PersistedState, SlotBindings, SlotRegistry, SplashContent,
    StorageError, Theme, UnsupportedLanguage,
};

// --- Engine re-exports -----------------------------------------------------

pub use abr_i18n::{ApplyReport, I18nError, LanguageChange, Localizer};
pub use abr_runtime::{
    Carousel, CarouselConfig, CarouselError, CarouselPhase, ConfigError, Direction, SiteConfig,
    Step, TimerQueue, TransitionPhase,
};

// --- Host re-exports -------------------------------------------------------

pub use abr_web::input_parser::{HostEventError, parse_host_event, parse_host_events};
pub use abr_web::{DeterministicClock, PageEvent, StepReport, WebPage, standard_document};

// --- Errors ---------------------------------------------------------------

/// Top-level error type.
#[derive(Debug)]
pub enum Error {
    Catalog(CatalogError),
    Config(ConfigError),
    I18n(I18nError),
    Carousel(CarouselError),
    Storage(StorageError),
    HostEvent(HostEventError),
    /// The global tracing subscriber could not be installed.
    Logging(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Catalog(err) => write!(f, "{err}"),
            Self::Config(err) => write!(f, "{err}"),
            Self::I18n(err) => write!(f, "{err}"),
            Self::Carousel(err) => write!(f, "{err}"),
            Self::Storage(err) => write!(f, "{err}"),
            Self::HostEvent(err) => write!(f, "{err}"),
            Self::Logging(msg) => write!(f, "logging setup failed: {msg}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Catalog(err) => Some(err),
            Self::Config(err) => Some(err),
            Self::I18n(err) => Some(err),
            Self::Carousel(err) => Some(err),
            Self::Storage(err) => Some(err),
            Self::HostEvent(err) => Some(err),
            Self::Logging(_) => None,
        }
    }
}

impl From<CatalogError> for Error {
    fn from(err: CatalogError) -> Self {
        Self::Catalog(err)
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<I18nError> for Error {
    fn from(err: I18nError) -> Self {
        Self::I18n(err)
    }
}

impl From<CarouselError> for Error {
    fn from(err: CarouselError) -> Self {
        Self::Carousel(err)
    }
}

impl From<StorageError> for Error {
    fn from(err: StorageError) -> Self {
        Self::Storage(err)
    }
}

impl From<HostEventError> for Error {
    fn from(err: HostEventError) -> Self {
        Self::HostEvent(err)
    }
}

/// Standard result type for abr APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Page assembly ----------------------------------------------------------

/// Validate `config` and assemble a booted page over the reference markup.
///
/// `catalog_json` replaces the built-in catalog when given.
pub fn build_page(
    config: &SiteConfig,
    catalog_json: Option<&str>,
    store: Box<dyn KeyValueStore>,
    system_locale: Option<&str>,
) -> Result<WebPage> {
    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors).into());
    }
    let catalog = match catalog_json {
        Some(json) => Catalog::from_json_str(json)?,
        None => Catalog::builtin(),
    };
    let mut page = WebPage::standard(config, Arc::new(catalog), store, system_locale);
    page.boot();
    Ok(page)
}

/// [`build_page`] with the configuration read from a TOML file.
pub fn build_page_from_toml(
    path: impl AsRef<Path>,
    store: Box<dyn KeyValueStore>,
    system_locale: Option<&str>,
) -> Result<WebPage> {
    let config = SiteConfig::from_toml_file(path)?;
    build_page(&config, None, store, system_locale)
}

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Catalog, Document, Error, KeyValueStore, Language, Localizer, MemoryStore, PageEvent,
        Result, SiteConfig, WebPage, build_page,
    };

    pub use crate::{core, i18n, runtime, web};
}

pub use abr_core as core;
pub use abr_i18n as i18n;
pub use abr_runtime as runtime;
pub use abr_web as web;
