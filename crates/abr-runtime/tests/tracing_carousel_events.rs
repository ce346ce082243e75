#![forbid(unsafe_code)]

//! Tracing contract for the carousel.
//!
//! Every render opens a `carousel.render` span carrying the target index and
//! direction; phase changes and navigation emit `debug` events; rejected ids
//! are logged, not propagated as panics.
//!
//! Run:
//!   cargo test -p abr-runtime --test tracing_carousel_events

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use abr_core::{Catalog, Document, Element, ElementKind, SlotRegistry};
use abr_runtime::{Carousel, CarouselConfig, CarouselTimers, Step};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;

// ============================================================================
// Capture layer
// ============================================================================

#[derive(Debug, Clone)]
struct CapturedSpan {
    name: String,
    fields: HashMap<String, String>,
}

#[derive(Debug, Clone)]
struct CapturedEvent {
    level: tracing::Level,
    message: String,
    fields: HashMap<String, String>,
    parent_span_name: Option<String>,
}

#[derive(Clone, Default)]
struct Capture {
    spans: Arc<Mutex<Vec<CapturedSpan>>>,
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl Capture {
    fn spans(&self) -> Vec<CapturedSpan> {
        self.spans.lock().unwrap().clone()
    }

    fn events(&self) -> Vec<CapturedEvent> {
        self.events.lock().unwrap().clone()
    }

    fn messages(&self) -> Vec<String> {
        self.events().into_iter().map(|e| e.message).collect()
    }
}

struct FieldVisitor(Vec<(String, String)>);

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.push((field.name().to_string(), format!("{value:?}")));
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
}

impl<S> tracing_subscriber::Layer<S> for Capture
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(
        &self,
        attrs: &tracing::span::Attributes<'_>,
        _id: &tracing::span::Id,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let mut visitor = FieldVisitor(Vec::new());
        attrs.record(&mut visitor);
        self.spans.lock().unwrap().push(CapturedSpan {
            name: attrs.metadata().name().to_string(),
            fields: visitor.0.into_iter().collect(),
        });
    }

    fn on_event(&self, event: &tracing::Event<'_>, ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut visitor = FieldVisitor(Vec::new());
        event.record(&mut visitor);
        let fields: HashMap<String, String> = visitor.0.into_iter().collect();
        let message = fields.get("message").cloned().unwrap_or_default();
        let parent_span_name = ctx
            .current_span()
            .id()
            .and_then(|id| ctx.span(id))
            .map(|span_ref| span_ref.name().to_string());
        self.events.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            message,
            fields,
            parent_span_name,
        });
    }
}

fn with_capture<F: FnOnce()>(f: F) -> Capture {
    let capture = Capture::default();
    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::filter::LevelFilter::TRACE)
        .with(capture.clone());
    tracing::subscriber::with_default(subscriber, f);
    capture
}

fn page() -> Document {
    Document::new()
        .with(Element::new("productTitle", ElementKind::Text))
        .with(Element::new("productImage", ElementKind::Image))
}

fn carousel() -> Carousel {
    Carousel::new(
        Arc::new(Catalog::builtin()),
        SlotRegistry::default(),
        CarouselConfig::default(),
    )
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn render_span_carries_index_and_direction() {
    let capture = with_capture(|| {
        let (mut c, mut doc, mut timers) = (carousel(), page(), CarouselTimers::new());
        c.start(&mut doc, &mut timers);
        c.go_to("x12", &mut doc, &mut timers).unwrap();
        c.advance(Step::Next, &mut doc, &mut timers);
    });

    let renders: Vec<_> = capture
        .spans()
        .into_iter()
        .filter(|s| s.name == "carousel.render")
        .collect();
    assert_eq!(renders.len(), 2);
    assert_eq!(renders[0].fields.get("index").map(String::as_str), Some("3"));
    assert_eq!(renders[0].fields.get("direction").map(String::as_str), Some("none"));
    assert_eq!(renders[1].fields.get("index").map(String::as_str), Some("0"));
    assert_eq!(renders[1].fields.get("direction").map(String::as_str), Some("up"));
}

#[test]
fn phase_change_and_navigation_are_debug_events() {
    let capture = with_capture(|| {
        let (mut c, mut doc, mut timers) = (carousel(), page(), CarouselTimers::new());
        c.start(&mut doc, &mut timers);
        c.advance(Step::Next, &mut doc, &mut timers);
    });

    let messages = capture.messages();
    assert!(messages.iter().any(|m| m == "carousel splash shown"));
    assert!(messages.iter().any(|m| m == "carousel phase changed"));
    assert!(messages.iter().any(|m| m == "carousel advanced"));

    let phase = capture
        .events()
        .into_iter()
        .find(|e| e.message == "carousel phase changed")
        .unwrap();
    assert_eq!(phase.level, tracing::Level::DEBUG);
    assert_eq!(phase.fields.get("phase").map(String::as_str), Some("showing"));
}

#[test]
fn missing_slots_are_traced_inside_render_cycle() {
    let capture = with_capture(|| {
        let (mut c, mut doc, mut timers) = (carousel(), page(), CarouselTimers::new());
        c.start(&mut doc, &mut timers);
        c.go_to("oring", &mut doc, &mut timers).unwrap();
        while let Some(fired) = timers.pop_due(Duration::from_millis(300)) {
            c.handle(fired, &mut doc, &mut timers);
        }
    });

    let events = capture.events();
    let panel = events
        .iter()
        .find(|e| e.message == "panel missing, transition classes skipped")
        .unwrap();
    assert_eq!(panel.level, tracing::Level::TRACE);
    assert_eq!(panel.parent_span_name.as_deref(), Some("carousel.render"));
    assert!(
        events
            .iter()
            .any(|e| e.message == "slot missing, skipped"
                && e.fields.get("slot").map(String::as_str) == Some("Description"))
    );
}

#[test]
fn unknown_entry_is_logged() {
    let capture = with_capture(|| {
        let (mut c, mut doc, mut timers) = (carousel(), page(), CarouselTimers::new());
        c.start(&mut doc, &mut timers);
        assert!(c.go_to("ghost", &mut doc, &mut timers).is_err());
    });

    let event = capture
        .events()
        .into_iter()
        .find(|e| e.message == "carousel ignored unknown entry")
        .unwrap();
    assert_eq!(event.fields.get("id").map(String::as_str), Some("ghost"));
}
