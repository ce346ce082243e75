#![forbid(unsafe_code)]

//! Core data and contracts for the ABR catalog page.
//!
//! # Role in the workspace
//! `abr-core` owns everything both page components agree on: the closed
//! language set, the shared read-only product [`Catalog`], the in-memory
//! [`Document`] the page renders into, the shadow-attribute naming
//! convention, the [`SlotRegistry`] that hands out capability-typed slot
//! handles, and the best-effort [`KeyValueStore`].
//!
//! # How it fits in the system
//! `abr-i18n` reads shadow attributes from the document, `abr-runtime`
//! writes them through the slot registry, and `abr-web` owns the document
//! and store for one page load. This crate depends on neither.

pub mod catalog;
pub mod document;
pub mod language;
pub mod persisted;
pub mod shadow;
pub mod slot;
pub mod storage;

pub use catalog::{Catalog, CatalogEntry, CatalogError, SplashContent};
pub use document::{Document, Element, ElementKind};
pub use language::{Language, Localized, UnsupportedLanguage};
pub use persisted::{PersistedState, Theme};
pub use shadow::AuxAttr;
pub use slot::{ClassHandle, ImageSlot, SlotBindings, SlotName, SlotRegistry, TextSlot};
pub use storage::{
    KeyValueStore, LANGUAGE_KEY, MemoryStore, NullStore, StorageError, StorageResult, THEME_KEY,
    THEME_USAGE_KEY,
};
