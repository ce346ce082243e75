#![forbid(unsafe_code)]

//! The localization engine.
//!
//! # Invariants
//!
//! 1. Only shadow attributes on the element are consulted; an element with
//!    no shadow for the active language keeps its current content.
//! 2. Empty shadow values are treated as absent.
//! 3. `apply_language` is idempotent: with no document or language change in
//!    between, a second call writes the same values again.
//! 4. `set_active_language` with an unsupported code changes nothing: not
//!    the active language, not the store, not the document.
//!
//! # Failure Modes
//!
//! - Storage write fails: logged at `warn`, the switch still happens.
//! - `<title>` without a shadow for the active language: the page title
//!   falls back to the default.
//! - No `<title>` element at all: the page title is left alone.

use std::fmt;

use abr_core::document::{Document, Element, ElementKind};
use abr_core::persisted::PersistedState;
use abr_core::shadow::{self, AuxAttr, DEFAULT_PAGE_TITLE, MARKER};
use abr_core::storage::{KeyValueStore, LANGUAGE_KEY};
use abr_core::{Language, UnsupportedLanguage};

use crate::change::{LanguageChange, LanguageListeners};

/// Localization errors. All of them are recoverable by ignoring them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum I18nError {
    /// The requested language code is not in the supported set.
    Unsupported(UnsupportedLanguage),
}

impl fmt::Display for I18nError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsupported(inner) => write!(f, "{inner}"),
        }
    }
}

impl std::error::Error for I18nError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Unsupported(inner) => Some(inner),
        }
    }
}

impl From<UnsupportedLanguage> for I18nError {
    fn from(err: UnsupportedLanguage) -> Self {
        Self::Unsupported(err)
    }
}

/// What one `apply_language` pass did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplyReport {
    /// Participating elements visited.
    pub elements: usize,
    /// Primary targets written (text, placeholder, or alt).
    pub primary_writes: usize,
    /// Auxiliary attributes written.
    pub aux_writes: usize,
}

/// Shadow-attribute localization engine.
#[derive(Debug)]
pub struct Localizer {
    active: Language,
    default_title: String,
    listeners: LanguageListeners,
}

impl Localizer {
    #[must_use]
    pub fn new(active: Language) -> Self {
        Self {
            active,
            default_title: DEFAULT_PAGE_TITLE.to_owned(),
            listeners: LanguageListeners::new(),
        }
    }

    /// Builder: override the fallback page title.
    #[must_use]
    pub fn with_default_title(mut self, title: impl Into<String>) -> Self {
        self.default_title = title.into();
        self
    }

    /// Pick the initial language: persisted choice, then the system locale,
    /// then Portuguese.
    #[must_use]
    pub fn resolve_preference(store: &dyn KeyValueStore, system_locale: Option<&str>) -> Language {
        if let Some(lang) = PersistedState::load(store).language {
            return lang;
        }
        system_locale
            .and_then(Language::from_locale_tag)
            .unwrap_or(Language::DEFAULT)
    }

    /// Engine initialised from [`Self::resolve_preference`].
    #[must_use]
    pub fn from_preferences(store: &dyn KeyValueStore, system_locale: Option<&str>) -> Self {
        Self::new(Self::resolve_preference(store, system_locale))
    }

    #[must_use]
    pub const fn active(&self) -> Language {
        self.active
    }

    #[must_use]
    pub fn default_title(&self) -> &str {
        &self.default_title
    }

    /// Change-notification registry.
    pub fn listeners_mut(&mut self) -> &mut LanguageListeners {
        &mut self.listeners
    }

    /// Switch language, persist it, re-localize `doc`, and notify listeners.
    pub fn set_active_language(
        &mut self,
        code: &str,
        doc: &mut Document,
        store: &mut dyn KeyValueStore,
    ) -> Result<LanguageChange, I18nError> {
        let lang: Language = code.parse()?;
        let change = LanguageChange {
            previous: self.active,
            current: lang,
        };
        self.active = lang;

        if let Err(err) = store.set(LANGUAGE_KEY, lang.code()) {
            tracing::warn!(error = %err, lang = %lang, "could not persist language");
        }

        let report = self.apply_language(doc);
        tracing::debug!(
            from = %change.previous,
            to = %change.current,
            elements = report.elements,
            "language changed"
        );
        self.listeners.notify(&change);
        Ok(change)
    }

    /// Re-localize every participating element and the page title.
    pub fn apply_language(&self, doc: &mut Document) -> ApplyReport {
        let _span = tracing::debug_span!("i18n.apply_language", lang = %self.active).entered();
        let mut report = ApplyReport::default();
        for element in doc.elements_mut() {
            if !shadow::participates(element) {
                continue;
            }
            report.elements += 1;
            localize_element(self.active, element, &mut report);
        }
        self.update_page_title(doc);
        report
    }

    /// Documents without a `<title>` element keep their title.
    fn update_page_title(&self, doc: &mut Document) {
        let Some(element) = doc.first_of_kind(ElementKind::Title) else {
            return;
        };
        let title = non_empty(element.attr(&shadow::primary_shadow(self.active)))
            .unwrap_or(self.default_title.as_str())
            .to_owned();
        doc.set_title(title);
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn localize_element(lang: Language, element: &mut Element, report: &mut ApplyReport) {
    let has_key = non_empty(element.attr(MARKER)).is_some();
    if has_key {
        if let Some(text) = non_empty(element.attr(&shadow::primary_shadow(lang))).map(str::to_owned) {
            match element.kind() {
                ElementKind::Input | ElementKind::TextArea => element.set_attr("placeholder", text),
                ElementKind::Image => element.set_attr("alt", text),
                ElementKind::Text | ElementKind::Title => element.set_text(text),
            }
            report.primary_writes += 1;
        }
    }

    for aux in AuxAttr::ALL {
        if let Some(text) = non_empty(element.attr(&aux.shadow(lang))).map(str::to_owned) {
            element.set_attr(aux.target(), text);
            report.aux_writes += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use abr_core::storage::{MemoryStore, NullStore};
    use abr_core::{Element, Localized};
    use pretty_assertions::assert_eq;

    fn page() -> Document {
        let mut title = Element::new("productTitle", ElementKind::Text).with_text("Vedador X12");
        shadow::write_primary(&mut title, "Vedador X12", &Localized::new("Vedador X12", "Seal X12", "Sello X12"));

        let search = Element::new("searchInput", ElementKind::Input)
            .with_attr("data-i18n", "Buscar")
            .with_attr("data-i18n-en", "Search")
            .with_attr("data-i18n-es", "Buscar")
            .with_attr("data-i18n-aria-label-en", "Search the site");

        let mut image = Element::new("productImage", ElementKind::Image).with_attr("alt", "Vedador X12");
        shadow::write_aux(&mut image, AuxAttr::Alt, "Vedador X12", &Localized::new("Vedador X12", "Seal X12", "Sello X12"));

        let plain = Element::new("footer", ElementKind::Text).with_text("© ABR");

        let head = Element::new("title", ElementKind::Title)
            .with_attr("data-i18n-pt", "ABR Auto Peças")
            .with_attr("data-i18n-en", "ABR Auto Parts");

        Document::new().with(title).with(search).with(image).with(plain).with(head)
    }

    #[test]
    fn apply_routes_by_element_kind() {
        let mut doc = page();
        let engine = Localizer::new(Language::En);
        let report = engine.apply_language(&mut doc);

        assert_eq!(doc.get("productTitle").map(Element::text), Some("Seal X12"));
        assert_eq!(doc.get("searchInput").and_then(|e| e.attr("placeholder")), Some("Search"));
        assert_eq!(doc.get("searchInput").and_then(|e| e.attr("aria-label")), Some("Search the site"));
        assert_eq!(doc.get("productImage").and_then(|e| e.attr("alt")), Some("Seal X12"));
        assert_eq!(doc.get("footer").map(Element::text), Some("© ABR"));
        assert_eq!(doc.title(), "ABR Auto Parts");
        assert_eq!(report.elements, 4);
        assert_eq!(report.primary_writes, 2);
        assert_eq!(report.aux_writes, 2);
    }

    #[test]
    fn missing_shadow_leaves_element_untouched() {
        let mut doc = page();
        let engine = Localizer::new(Language::Es);
        engine.apply_language(&mut doc);
        // No aria-label shadow for es.
        assert_eq!(doc.get("searchInput").and_then(|e| e.attr("aria-label")), None);
        // No es title shadow: fallback.
        assert_eq!(doc.title(), DEFAULT_PAGE_TITLE);
    }

    #[test]
    fn title_untouched_without_title_element() {
        let mut doc = Document::new().with(
            Element::new("x", ElementKind::Text)
                .with_attr("data-i18n", "k")
                .with_attr("data-i18n-en", "Hello"),
        );
        doc.set_title("Catálogo");
        Localizer::new(Language::En).apply_language(&mut doc);
        assert_eq!(doc.title(), "Catálogo");
        assert_eq!(doc.get("x").map(Element::text), Some("Hello"));
    }

    #[test]
    fn empty_shadow_is_absent() {
        let mut doc = Document::new().with(
            Element::new("x", ElementKind::Text)
                .with_text("keep")
                .with_attr("data-i18n", "k")
                .with_attr("data-i18n-en", ""),
        );
        Localizer::new(Language::En).apply_language(&mut doc);
        assert_eq!(doc.get("x").map(Element::text), Some("keep"));
    }

    #[test]
    fn primary_requires_marker_but_aux_does_not() {
        let mut doc = Document::new().with(
            Element::new("x", ElementKind::Text)
                .with_text("keep")
                .with_attr("data-i18n-en", "Hello")
                .with_attr("data-i18n-title-en", "Tooltip"),
        );
        Localizer::new(Language::En).apply_language(&mut doc);
        let el = doc.get("x").expect("present");
        assert_eq!(el.text(), "keep");
        assert_eq!(el.attr("title"), Some("Tooltip"));
    }

    #[test]
    fn apply_is_idempotent() {
        let mut doc = page();
        let engine = Localizer::new(Language::En);
        engine.apply_language(&mut doc);
        let first = doc.serialize();
        engine.apply_language(&mut doc);
        assert_eq!(first, doc.serialize());
    }

    #[test]
    fn set_language_persists_and_applies() {
        let mut doc = page();
        let mut store = MemoryStore::new();
        let mut engine = Localizer::new(Language::Pt);
        let change = engine
            .set_active_language("en", &mut doc, &mut store)
            .expect("supported");
        assert_eq!(change, LanguageChange { previous: Language::Pt, current: Language::En });
        assert_eq!(engine.active(), Language::En);
        assert_eq!(store.get(LANGUAGE_KEY).as_deref(), Some("en"));
        assert_eq!(doc.get("productTitle").map(Element::text), Some("Seal X12"));
    }

    #[test]
    fn unsupported_language_changes_nothing() {
        let mut doc = page();
        let before = doc.serialize();
        let mut store = MemoryStore::new();
        let mut engine = Localizer::new(Language::Pt);
        let err = engine
            .set_active_language("fr", &mut doc, &mut store)
            .expect_err("fr is unsupported");
        assert_eq!(err, I18nError::Unsupported(UnsupportedLanguage("fr".into())));
        assert_eq!(engine.active(), Language::Pt);
        assert!(store.is_empty());
        assert_eq!(doc.serialize(), before);
    }

    #[test]
    fn storage_failure_does_not_block_switch() {
        let mut doc = page();
        let mut engine = Localizer::new(Language::Pt);
        let change = engine.set_active_language("es", &mut doc, &mut NullStore);
        assert!(change.is_ok());
        assert_eq!(doc.get("productTitle").map(Element::text), Some("Sello X12"));
    }

    #[test]
    fn preference_order_is_store_then_system_then_default() {
        let mut store = MemoryStore::new();
        assert_eq!(Localizer::resolve_preference(&store, None), Language::Pt);
        assert_eq!(Localizer::resolve_preference(&store, Some("es-AR")), Language::Es);
        assert_eq!(Localizer::resolve_preference(&store, Some("de-DE")), Language::Pt);
        store.set(LANGUAGE_KEY, "en").unwrap();
        assert_eq!(Localizer::resolve_preference(&store, Some("es-AR")), Language::En);
        store.set(LANGUAGE_KEY, "klingon").unwrap();
        assert_eq!(Localizer::resolve_preference(&store, Some("es-AR")), Language::Es);
    }

    #[test]
    fn listeners_see_changes_after_document_update() {
        use std::cell::RefCell;
        use std::rc::Rc;

        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut engine = Localizer::new(Language::Pt);
        let sink = Rc::clone(&seen);
        engine.listeners_mut().subscribe(move |c| sink.borrow_mut().push(c.current));

        let mut doc = page();
        let mut store = MemoryStore::new();
        engine.set_active_language("en", &mut doc, &mut store).unwrap();
        let _ = engine.set_active_language("xx", &mut doc, &mut store);
        engine.set_active_language("es", &mut doc, &mut store).unwrap();
        assert_eq!(*seen.borrow(), vec![Language::En, Language::Es]);
    }
}
