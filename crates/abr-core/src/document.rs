#![forbid(unsafe_code)]

//! In-memory model of the already-rendered page.
//!
//! The page behavior never creates structure; it only rewrites text,
//! attributes, and classes of elements that exist at load time. A
//! [`Document`] captures exactly that surface: a flat, ordered set of
//! [`Element`]s addressed by unique id, plus the page title.
//!
//! # Invariants
//!
//! 1. Element ids are unique within a document.
//! 2. Iteration order is insertion order and never changes, so two
//!    serializations of an unchanged document are byte-identical.
//! 3. Attribute and class iteration is sorted.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt::Write as _;

/// What kind of element this is. Decides where localized text lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// Ordinary element whose text content is displayed.
    Text,
    /// `<input>`: localized text goes to `placeholder`.
    Input,
    /// `<textarea>`: localized text goes to `placeholder`.
    TextArea,
    /// `<img>`: localized text goes to `alt`.
    Image,
    /// The document `<title>` element.
    Title,
}

impl ElementKind {
    fn tag(self) -> &'static str {
        match self {
            Self::Text => "div",
            Self::Input => "input",
            Self::TextArea => "textarea",
            Self::Image => "img",
            Self::Title => "title",
        }
    }
}

/// One element of the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    id: String,
    kind: ElementKind,
    text: String,
    attrs: BTreeMap<String, String>,
    classes: BTreeSet<String>,
}

impl Element {
    #[must_use]
    pub fn new(id: impl Into<String>, kind: ElementKind) -> Self {
        Self {
            id: id.into(),
            kind,
            text: String::new(),
            attrs: BTreeMap::new(),
            classes: BTreeSet::new(),
        }
    }

    /// Builder: set initial text content.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Builder: set an initial attribute.
    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    /// Builder: add an initial class.
    #[must_use]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.insert(class.into());
        self
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub const fn kind(&self) -> ElementKind {
        self.kind
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attrs.insert(name.into(), value.into());
    }

    /// Remove an attribute, returning its previous value.
    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        self.attrs.remove(name)
    }

    /// Attributes in name order.
    pub fn attrs(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.attrs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Whether any attribute name starts with `prefix`.
    #[must_use]
    pub fn has_attr_prefix(&self, prefix: &str) -> bool {
        self.attrs
            .range(prefix.to_owned()..)
            .next()
            .is_some_and(|(name, _)| name.starts_with(prefix))
    }

    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn add_class(&mut self, class: impl Into<String>) {
        self.classes.insert(class.into());
    }

    /// Remove a class; returns whether it was present.
    pub fn remove_class(&mut self, class: &str) -> bool {
        self.classes.remove(class)
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> + '_ {
        self.classes.iter().map(String::as_str)
    }

    fn write_markup(&self, out: &mut String) {
        let tag = self.kind.tag();
        let _ = write!(out, "<{tag} id=\"{}\"", self.id);
        if !self.classes.is_empty() {
            let joined: Vec<&str> = self.classes().collect();
            let _ = write!(out, " class=\"{}\"", joined.join(" "));
        }
        for (name, value) in &self.attrs {
            let _ = write!(out, " {name}=\"{}\"", escape_attr(value));
        }
        let _ = writeln!(out, ">{}</{tag}>", self.text);
    }
}

fn escape_attr(value: &str) -> String {
    value.replace('&', "&amp;").replace('"', "&quot;")
}

/// The page's element set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    elements: Vec<Element>,
    index: HashMap<String, usize>,
    title: String,
}

impl Document {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an element, replacing any element with the same id in place.
    pub fn insert(&mut self, element: Element) {
        let existing = self.index.get(element.id()).copied();
        match existing {
            Some(slot) => self.elements[slot] = element,
            None => {
                self.index.insert(element.id.clone(), self.elements.len());
                self.elements.push(element);
            }
        }
    }

    /// Builder form of [`Self::insert`].
    #[must_use]
    pub fn with(mut self, element: Element) -> Self {
        self.insert(element);
        self
    }

    /// Remove an element by id.
    pub fn remove(&mut self, id: &str) -> Option<Element> {
        let slot = self.index.remove(id)?;
        let removed = self.elements.remove(slot);
        for position in self.index.values_mut() {
            if *position > slot {
                *position -= 1;
            }
        }
        Some(removed)
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Element> {
        self.index.get(id).map(|&slot| &self.elements[slot])
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.index.get(id).map(|&slot| &mut self.elements[slot])
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn elements(&self) -> impl Iterator<Item = &Element> + '_ {
        self.elements.iter()
    }

    pub fn elements_mut(&mut self) -> impl Iterator<Item = &mut Element> + '_ {
        self.elements.iter_mut()
    }

    /// First element of the given kind.
    #[must_use]
    pub fn first_of_kind(&self, kind: ElementKind) -> Option<&Element> {
        self.elements.iter().find(|e| e.kind == kind)
    }

    /// Current page title (`document.title`).
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Deterministic markup rendering of the whole document.
    #[must_use]
    pub fn serialize(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "<!-- title: {} -->", self.title);
        for element in &self.elements {
            element.write_markup(&mut out);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> Document {
        Document::new()
            .with(Element::new("a", ElementKind::Text).with_text("A"))
            .with(Element::new("b", ElementKind::Image).with_attr("src", "b.webp"))
            .with(Element::new("c", ElementKind::Input).with_class("search"))
    }

    #[test]
    fn lookup_by_id() {
        let doc = sample();
        assert_eq!(doc.len(), 3);
        assert_eq!(doc.get("a").map(Element::text), Some("A"));
        assert_eq!(doc.get("b").and_then(|e| e.attr("src")), Some("b.webp"));
        assert!(doc.get("missing").is_none());
    }

    #[test]
    fn remove_keeps_index_consistent() {
        let mut doc = sample();
        let removed = doc.remove("a").expect("present");
        assert_eq!(removed.id(), "a");
        assert!(!doc.contains("a"));
        assert_eq!(doc.get("c").map(Element::kind), Some(ElementKind::Input));
        assert_eq!(doc.get("b").map(Element::kind), Some(ElementKind::Image));
        assert!(doc.remove("a").is_none());
    }

    #[test]
    fn insert_same_id_replaces_in_place() {
        let mut doc = sample();
        doc.insert(Element::new("a", ElementKind::Text).with_text("A2"));
        assert_eq!(doc.len(), 3);
        assert_eq!(doc.elements().next().map(Element::text), Some("A2"));
    }

    #[test]
    fn attr_prefix_detection() {
        let el = Element::new("x", ElementKind::Text)
            .with_attr("class-hint", "1")
            .with_attr("data-i18n-title-en", "Hi");
        assert!(el.has_attr_prefix("data-i18n"));
        assert!(!el.has_attr_prefix("aria"));
        assert!(!Element::new("y", ElementKind::Text).has_attr_prefix("data-i18n"));
    }

    #[test]
    fn classes_toggle() {
        let mut el = Element::new("x", ElementKind::Text);
        el.add_class("active");
        assert!(el.has_class("active"));
        assert!(el.remove_class("active"));
        assert!(!el.remove_class("active"));
    }

    #[test]
    fn serialize_is_stable() {
        let mut doc = sample();
        doc.set_title("Página");
        let first = doc.serialize();
        assert_eq!(first, doc.serialize());
        assert!(first.starts_with("<!-- title: Página -->\n"));
        assert!(first.contains("<img id=\"b\" src=\"b.webp\"></img>"));
        assert!(first.contains("<input id=\"c\" class=\"search\"></input>"));
    }
}
