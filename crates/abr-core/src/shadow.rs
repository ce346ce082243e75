#![forbid(unsafe_code)]

//! Shadow-attribute naming convention shared by content producers and the
//! localization engine.
//!
//! ```text
//! data-i18n                    marker, value = content key
//! data-i18n-{lang}             primary shadow per language
//! data-i18n-{aux}              auxiliary marker (aux = title | aria-label | alt)
//! data-i18n-{aux}-{lang}       auxiliary shadow per language
//! ```
//!
//! Any writer that drops these attributes silently detaches the element
//! from localization.

use crate::document::Element;
use crate::language::{Language, Localized};

/// Primary participation marker.
pub const MARKER: &str = "data-i18n";

/// Page title used when the `<title>` element has no shadow for the active
/// language.
pub const DEFAULT_PAGE_TITLE: &str = "ABR Indústria e Comércio de Auto Peças";

/// Secondary presentation hints that carry their own translations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuxAttr {
    /// Tooltip text (`title`).
    Title,
    /// Accessible label (`aria-label`).
    AriaLabel,
    /// Image alternative text (`alt`).
    Alt,
}

impl AuxAttr {
    pub const ALL: [Self; 3] = [Self::AriaLabel, Self::Title, Self::Alt];

    /// The presentation attribute this hint writes to.
    #[must_use]
    pub const fn target(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::AriaLabel => "aria-label",
            Self::Alt => "alt",
        }
    }

    /// `data-i18n-{aux}` marker name.
    #[must_use]
    pub fn marker(self) -> String {
        format!("{MARKER}-{}", self.target())
    }

    /// `data-i18n-{aux}-{lang}` shadow name.
    #[must_use]
    pub fn shadow(self, lang: Language) -> String {
        format!("{MARKER}-{}-{}", self.target(), lang.code())
    }
}

/// `data-i18n-{lang}` shadow name.
#[must_use]
pub fn primary_shadow(lang: Language) -> String {
    format!("{MARKER}-{}", lang.code())
}

/// Whether an element participates in localization at all.
#[must_use]
pub fn participates(element: &Element) -> bool {
    element.has_attr_prefix(MARKER)
}

/// Write the primary marker and every primary shadow.
pub fn write_primary(element: &mut Element, key: &str, value: &Localized) {
    element.set_attr(MARKER, key);
    for (lang, text) in value.iter() {
        element.set_attr(primary_shadow(lang), text);
    }
}

/// Remove the primary marker and every primary shadow.
pub fn clear_primary(element: &mut Element) {
    element.remove_attr(MARKER);
    for lang in Language::ALL {
        element.remove_attr(&primary_shadow(lang));
    }
}

/// Write an auxiliary marker and its shadows.
pub fn write_aux(element: &mut Element, aux: AuxAttr, key: &str, value: &Localized) {
    element.set_attr(aux.marker(), key);
    for (lang, text) in value.iter() {
        element.set_attr(aux.shadow(lang), text);
    }
}

/// Remove an auxiliary marker and its shadows.
pub fn clear_aux(element: &mut Element, aux: AuxAttr) {
    element.remove_attr(&aux.marker());
    for lang in Language::ALL {
        element.remove_attr(&aux.shadow(lang));
    }
}
