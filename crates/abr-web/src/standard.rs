#![forbid(unsafe_code)]

//! Reference markup of the catalog page.
//!
//! Mirrors the static page the behavior layer runs on: navigation, search,
//! contact form, theme toggle, language flag, one card per catalog entry,
//! and the carousel panel with its slots and indicators. Every static
//! string is authored in Portuguese with shadows for all languages.

use abr_core::shadow::{self, AuxAttr, DEFAULT_PAGE_TITLE};
use abr_core::{Catalog, Document, Element, ElementKind, Localized, SlotBindings};

/// Element carrying the `flag-icon-*` class of the active language.
pub const FLAG_ICON_ID: &str = "flagIcon";
/// Base class of the flag icon, kept across language changes.
pub const FLAG_ICON_CLASS: &str = "flag-icon";

fn localized_text(id: &str, kind: ElementKind, key: &str, value: Localized) -> Element {
    let mut element = Element::new(id, kind);
    match kind {
        ElementKind::Input | ElementKind::TextArea => element.set_attr("placeholder", value.default_value()),
        ElementKind::Image => element.set_attr("alt", value.default_value()),
        ElementKind::Text | ElementKind::Title => element.set_text(value.default_value()),
    }
    shadow::write_primary(&mut element, key, &value);
    element
}

/// Build the reference page for `catalog` with slot ids from `slots`.
#[must_use]
pub fn standard_document(catalog: &Catalog, slots: &SlotBindings) -> Document {
    let mut doc = Document::new();
    doc.set_title(DEFAULT_PAGE_TITLE);

    doc.insert(localized_text(
        "pageTitle",
        ElementKind::Title,
        "page.title",
        Localized::new(
            DEFAULT_PAGE_TITLE,
            "ABR Auto Parts Industry and Trade",
            "ABR Industria y Comercio de Autopartes",
        ),
    ));

    let nav = [
        ("navHome", "nav.home", Localized::new("Início", "Home", "Inicio")),
        ("navProducts", "nav.products", Localized::new("Produtos", "Products", "Productos")),
        ("navCatalog", "nav.catalog", Localized::new("Catálogo", "Catalog", "Catálogo")),
        ("navAbout", "nav.about", Localized::new("Sobre Nós", "About Us", "Sobre Nosotros")),
        ("navContact", "nav.contact", Localized::new("Contato", "Contact", "Contacto")),
    ];
    for (id, key, value) in nav {
        doc.insert(localized_text(id, ElementKind::Text, key, value));
    }

    doc.insert(localized_text(
        "searchInput",
        ElementKind::Input,
        "search.placeholder",
        Localized::new("Buscar produtos...", "Search products...", "Buscar productos..."),
    ));
    doc.insert(localized_text(
        "contactMessage",
        ElementKind::TextArea,
        "contact.message",
        Localized::new("Sua mensagem", "Your message", "Su mensaje"),
    ));

    let mut theme_toggle = Element::new("themeToggle", ElementKind::Text)
        .with_attr("aria-label", "Alternar tema")
        .with_attr("title", "Alternar tema");
    let toggle_label = Localized::new("Alternar tema", "Toggle theme", "Cambiar tema");
    shadow::write_aux(&mut theme_toggle, AuxAttr::AriaLabel, "theme.toggle", &toggle_label);
    shadow::write_aux(&mut theme_toggle, AuxAttr::Title, "theme.toggle", &toggle_label);
    doc.insert(theme_toggle);

    doc.insert(
        Element::new(FLAG_ICON_ID, ElementKind::Text)
            .with_class(FLAG_ICON_CLASS)
            .with_class("flag-icon-br"),
    );

    doc.insert(
        localized_text(
            "footerLogo",
            ElementKind::Image,
            "footer.logo",
            Localized::new("Logotipo ABR", "ABR logo", "Logotipo ABR"),
        )
        .with_attr("src", "assets/logo.webp"),
    );

    for entry in catalog.iter() {
        let mut card = localized_text(
            &format!("card-{}", entry.id),
            ElementKind::Text,
            entry.title.default_value(),
            entry.title.clone(),
        )
        .with_attr("data-id", entry.id.as_str());
        card.add_class("product-card");
        doc.insert(card);
        doc.insert(localized_text(
            &format!("card-{}-category", entry.id),
            ElementKind::Text,
            entry.category.default_value(),
            entry.category.clone(),
        ));
    }

    doc.insert(Element::new(slots.panel.as_str(), ElementKind::Text).with_class("product-panel"));
    doc.insert(Element::new(slots.title.as_str(), ElementKind::Text));
    doc.insert(Element::new(slots.description.as_str(), ElementKind::Text));
    doc.insert(Element::new(slots.image.as_str(), ElementKind::Image));
    for i in 0..catalog.len() {
        doc.insert(Element::new(format!("{}{i}", slots.indicator_prefix), ElementKind::Text));
    }
    doc
}
