#![forbid(unsafe_code)]

//! Localization substitution engine for the ABR catalog page.
//!
//! Rewrites every participating element of a [`Document`](abr_core::Document)
//! to the active language using only the per-language shadow attributes
//! stored on the element itself. The engine never consults the catalog, so
//! any producer that follows the shadow-attribute contract is localized for
//! free.
//!
//! # Role in the workspace
//! `abr-i18n` sits next to the carousel, not above it: the carousel writes
//! shadows, this crate reads them. Both are wired together by `abr-web`.

pub mod change;
pub mod localizer;

pub use change::{LanguageChange, LanguageListeners, ListenerId};
pub use localizer::{ApplyReport, I18nError, Localizer};
