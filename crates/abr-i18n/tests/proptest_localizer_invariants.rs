//! Property-based invariant tests for the localization engine.
//!
//! 1. Shadows written for a value resolve to exactly that value's
//!    translation for every language, for text, input, and image targets.
//! 2. `apply_language` is idempotent.
//! 3. Unsupported language codes never mutate anything.
//! 4. Elements without any shadow attribute are never modified.

use abr_core::shadow::{self, AuxAttr};
use abr_core::storage::MemoryStore;
use abr_core::{Document, Element, ElementKind, Language, Localized};
use abr_i18n::Localizer;
use proptest::prelude::*;

// ── Helpers ──────────────────────────────────────────────────────────

fn localized() -> impl Strategy<Value = Localized> {
    ("[a-zA-Zçãé ]{1,16}", "[a-zA-Z ]{1,16}", "[a-zA-Zñó ]{1,16}")
        .prop_map(|(pt, en, es)| Localized::new(pt, en, es))
}

fn language() -> impl Strategy<Value = Language> {
    prop::sample::select(Language::ALL.to_vec())
}

fn slotted_document(title: &Localized, image: &Localized) -> Document {
    let mut heading = Element::new("productTitle", ElementKind::Text).with_text(title.default_value());
    shadow::write_primary(&mut heading, title.default_value(), title);

    let mut input = Element::new("search", ElementKind::Input);
    shadow::write_primary(&mut input, title.default_value(), title);

    let mut img = Element::new("productImage", ElementKind::Image).with_attr("alt", image.default_value());
    shadow::write_aux(&mut img, AuxAttr::Alt, image.default_value(), image);

    Document::new()
        .with(heading)
        .with(input)
        .with(img)
        .with(Element::new("plain", ElementKind::Text).with_text("untouched"))
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Shadows resolve exactly
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn shadows_resolve_to_translation(title in localized(), image in localized(), lang in language()) {
        let mut doc = slotted_document(&title, &image);
        Localizer::new(lang).apply_language(&mut doc);
        prop_assert_eq!(doc.get("productTitle").map(Element::text), Some(title.get(lang)));
        prop_assert_eq!(doc.get("search").and_then(|e| e.attr("placeholder")), Some(title.get(lang)));
        prop_assert_eq!(doc.get("productImage").and_then(|e| e.attr("alt")), Some(image.get(lang)));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Idempotence
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn apply_twice_is_byte_identical(title in localized(), image in localized(), lang in language()) {
        let mut doc = slotted_document(&title, &image);
        let engine = Localizer::new(lang);
        engine.apply_language(&mut doc);
        let once = doc.serialize();
        engine.apply_language(&mut doc);
        prop_assert_eq!(once, doc.serialize());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Unsupported codes are inert
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn unsupported_codes_are_inert(code in "[a-zA-Z]{0,4}", title in localized(), image in localized()) {
        prop_assume!(Language::from_code(&code).is_none());
        let mut doc = slotted_document(&title, &image);
        let before = doc.serialize();
        let mut store = MemoryStore::new();
        let mut engine = Localizer::new(Language::Pt);
        prop_assert!(engine.set_active_language(&code, &mut doc, &mut store).is_err());
        prop_assert_eq!(engine.active(), Language::Pt);
        prop_assert!(store.is_empty());
        prop_assert_eq!(before, doc.serialize());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Non-participating elements are never modified
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn plain_elements_never_change(title in localized(), image in localized(), lang in language()) {
        let mut doc = slotted_document(&title, &image);
        let report = Localizer::new(lang).apply_language(&mut doc);
        prop_assert_eq!(doc.get("plain").map(Element::text), Some("untouched"));
        prop_assert_eq!(report.elements, 3);
    }
}
