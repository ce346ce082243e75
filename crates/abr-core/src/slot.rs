#![forbid(unsafe_code)]

//! Slot registry: logical slot names mapped to capability-typed handles.
//!
//! Content producers never look elements up by id themselves. They ask the
//! [`SlotRegistry`] for a handle over a borrowed [`Document`]; the handle
//! exposes only the writes that slot supports. A slot whose element is
//! missing yields `None`, and the caller skips that slot alone.

use serde::{Deserialize, Serialize};

use crate::document::{Document, Element};
use crate::language::Localized;
use crate::shadow::{self, AuxAttr};

/// The three content slots the carousel fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotName {
    Title,
    Description,
    Image,
}

impl SlotName {
    pub const ALL: [Self; 3] = [Self::Title, Self::Description, Self::Image];
}

/// Element ids backing each slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlotBindings {
    pub title: String,
    pub description: String,
    pub image: String,
    /// Container that carries transition classes.
    pub panel: String,
    /// Indicator ids are `{indicator_prefix}{index}`.
    pub indicator_prefix: String,
}

impl Default for SlotBindings {
    fn default() -> Self {
        Self {
            title: "productTitle".into(),
            description: "productDescription".into(),
            image: "productImage".into(),
            panel: "productPanel".into(),
            indicator_prefix: "productIndicator".into(),
        }
    }
}

/// Hands out slot handles over a document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotRegistry {
    bindings: SlotBindings,
}

impl SlotRegistry {
    #[must_use]
    pub fn new(bindings: SlotBindings) -> Self {
        Self { bindings }
    }

    #[must_use]
    pub fn bindings(&self) -> &SlotBindings {
        &self.bindings
    }

    /// Element id bound to `name`.
    #[must_use]
    pub fn element_id(&self, name: SlotName) -> &str {
        match name {
            SlotName::Title => &self.bindings.title,
            SlotName::Description => &self.bindings.description,
            SlotName::Image => &self.bindings.image,
        }
    }

    /// Element id of the indicator for catalog `index`.
    #[must_use]
    pub fn indicator_id(&self, index: usize) -> String {
        format!("{}{index}", self.bindings.indicator_prefix)
    }

    /// Text handle for the title or description slot.
    ///
    /// Returns `None` for [`SlotName::Image`] or when the element is absent.
    pub fn text<'d>(&self, doc: &'d mut Document, name: SlotName) -> Option<TextSlot<'d>> {
        if name == SlotName::Image {
            return None;
        }
        doc.get_mut(self.element_id(name))
            .map(|element| TextSlot { element })
    }

    /// Image handle, if the image element exists.
    pub fn image<'d>(&self, doc: &'d mut Document) -> Option<ImageSlot<'d>> {
        doc.get_mut(&self.bindings.image)
            .map(|element| ImageSlot { element })
    }

    /// Class handle for the panel, if present.
    pub fn panel<'d>(&self, doc: &'d mut Document) -> Option<ClassHandle<'d>> {
        doc.get_mut(&self.bindings.panel)
            .map(|element| ClassHandle { element })
    }

    /// Class handle for the indicator of catalog `index`, if present.
    pub fn indicator<'d>(&self, doc: &'d mut Document, index: usize) -> Option<ClassHandle<'d>> {
        doc.get_mut(&self.indicator_id(index))
            .map(|element| ClassHandle { element })
    }
}

/// Write access to a text slot: literal content plus primary shadows.
#[derive(Debug)]
pub struct TextSlot<'d> {
    element: &'d mut Element,
}

impl TextSlot<'_> {
    /// Currently displayed text.
    #[must_use]
    pub fn literal(&self) -> &str {
        self.element.text()
    }

    pub fn set_literal(&mut self, text: &str) {
        self.element.set_text(text);
    }

    /// Attach the marker (keyed by the default value) and all shadows.
    pub fn write_shadows(&mut self, value: &Localized) {
        shadow::write_primary(self.element, value.default_value(), value);
    }

    /// Detach the slot from localization.
    pub fn clear_shadows(&mut self) {
        shadow::clear_primary(self.element);
    }
}

/// Write access to the image slot.
#[derive(Debug)]
pub struct ImageSlot<'d> {
    element: &'d mut Element,
}

impl ImageSlot<'_> {
    /// Class toggled while the brand logo is shown.
    pub const LOGO_CLASS: &'static str = "abr-logo";

    pub fn set_source(&mut self, path: &str) {
        self.element.set_attr("src", path);
    }

    pub fn set_alt(&mut self, alt: &str) {
        self.element.set_attr("alt", alt);
    }

    pub fn write_alt_shadows(&mut self, value: &Localized) {
        shadow::write_aux(self.element, AuxAttr::Alt, value.default_value(), value);
    }

    pub fn clear_alt_shadows(&mut self) {
        shadow::clear_aux(self.element, AuxAttr::Alt);
    }

    pub fn set_logo(&mut self, logo: bool) {
        if logo {
            self.element.add_class(Self::LOGO_CLASS);
        } else {
            self.element.remove_class(Self::LOGO_CLASS);
        }
    }
}

/// Class-only access, used for the panel and the indicators.
#[derive(Debug)]
pub struct ClassHandle<'d> {
    element: &'d mut Element,
}

impl ClassHandle<'_> {
    pub fn add(&mut self, class: &str) {
        self.element.add_class(class);
    }

    pub fn remove(&mut self, class: &str) {
        self.element.remove_class(class);
    }

    /// Remove several classes at once.
    pub fn remove_all(&mut self, classes: &[&str]) {
        for class in classes {
            self.element.remove_class(class);
        }
    }

    /// Add or remove `class` depending on `on`.
    pub fn toggle(&mut self, class: &str, on: bool) {
        if on {
            self.add(class);
        } else {
            self.remove(class);
        }
    }

    #[must_use]
    pub fn has(&self, class: &str) -> bool {
        self.element.has_class(class)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::ElementKind;
    use crate::language::Language;
    use pretty_assertions::assert_eq;

    fn doc() -> Document {
        Document::new()
            .with(Element::new("productTitle", ElementKind::Text))
            .with(Element::new("productImage", ElementKind::Image))
            .with(Element::new("productPanel", ElementKind::Text))
    }

    #[test]
    fn text_slot_writes_literal_and_shadows() {
        let registry = SlotRegistry::default();
        let mut doc = doc();
        let value = Localized::new("Vedador X12", "Seal X12", "Sello X12");
        {
            let mut slot = registry.text(&mut doc, SlotName::Title).expect("title bound");
            slot.set_literal(value.get(Language::Pt));
            slot.write_shadows(&value);
            assert_eq!(slot.literal(), "Vedador X12");
        }
        let el = doc.get("productTitle").expect("present");
        assert_eq!(el.attr("data-i18n"), Some("Vedador X12"));
        assert_eq!(el.attr("data-i18n-en"), Some("Seal X12"));
    }

    #[test]
    fn missing_elements_yield_none() {
        let registry = SlotRegistry::default();
        let mut doc = doc();
        assert!(registry.text(&mut doc, SlotName::Description).is_none());
        assert!(registry.text(&mut doc, SlotName::Image).is_none());
        assert!(registry.indicator(&mut doc, 0).is_none());
        assert!(registry.image(&mut doc).is_some());
    }

    #[test]
    fn custom_bindings_redirect_slots() {
        let registry = SlotRegistry::new(SlotBindings {
            title: "heroTitle".into(),
            ..SlotBindings::default()
        });
        let mut doc = Document::new().with(Element::new("heroTitle", ElementKind::Text));
        assert!(registry.text(&mut doc, SlotName::Title).is_some());
        assert_eq!(registry.element_id(SlotName::Title), "heroTitle");
        assert_eq!(registry.indicator_id(2), "productIndicator2");
    }

    #[test]
    fn image_logo_class_toggles() {
        let registry = SlotRegistry::default();
        let mut doc = doc();
        registry.image(&mut doc).expect("bound").set_logo(true);
        assert!(doc.get("productImage").is_some_and(|e| e.has_class("abr-logo")));
        registry.image(&mut doc).expect("bound").set_logo(false);
        assert!(!doc.get("productImage").is_some_and(|e| e.has_class("abr-logo")));
    }

    #[test]
    fn class_handle_remove_all() {
        let registry = SlotRegistry::default();
        let mut doc = doc();
        let mut panel = registry.panel(&mut doc).expect("bound");
        panel.add("fade-out");
        panel.add("fade-in");
        panel.remove_all(&["fade-out", "fade-in", "absent"]);
        assert!(!panel.has("fade-out"));
        assert!(!panel.has("fade-in"));
    }
}
