#![forbid(unsafe_code)]

//! `abr-web` wires the page components into one host-driven unit.
//!
//! Design goals:
//! - **Host-driven I/O**: the embedding environment (a JS shim, a WASM
//!   runner, or a test) pushes user events.
//! - **Deterministic time**: the host advances a monotonic clock explicitly
//!   through [`WebPage::step`]; no timer ever fires on its own.
//! - **No blocking / no threads**: suitable for `wasm32-unknown-unknown`.
//!
//! The crate does not bind to `wasm-bindgen`. It provides the page model a
//! binding layer would wrap.

#[cfg(feature = "input-parser")]
pub mod input_parser;
pub mod page;
pub mod standard;

use core::time::Duration;
use std::collections::VecDeque;

pub use page::{StepReport, WebPage};
pub use standard::{FLAG_ICON_ID, standard_document};

/// Deterministic monotonic clock controlled by the host.
#[derive(Debug, Default, Clone)]
pub struct DeterministicClock {
    now: Duration,
}

impl DeterministicClock {
    /// Create a clock starting at `0`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            now: Duration::ZERO,
        }
    }

    /// Current monotonic time.
    #[must_use]
    pub const fn now(&self) -> Duration {
        self.now
    }

    /// Set current monotonic time. Earlier values are ignored.
    pub fn set(&mut self, now: Duration) {
        self.now = self.now.max(now);
    }

    /// Advance monotonic time by `dt`.
    pub fn advance(&mut self, dt: Duration) {
        self.now = self.now.saturating_add(dt);
    }
}

/// User interaction pushed by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    /// "Next" carousel control.
    NextProduct,
    /// "Previous" carousel control.
    PreviousProduct,
    /// Click on a product card carrying this catalog id.
    SelectProduct(String),
    /// Click on a language option carrying this code.
    SelectLanguage(String),
}

/// FIFO of host events awaiting the next step.
#[derive(Debug, Clone, Default)]
pub struct PageEventQueue {
    queue: VecDeque<PageEvent>,
}

impl PageEventQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_event(&mut self, event: PageEvent) {
        self.queue.push_back(event);
    }

    /// Drain all pending events.
    pub fn drain_events(&mut self) -> impl Iterator<Item = PageEvent> + '_ {
        self.queue.drain(..)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn deterministic_clock_advances_monotonically() {
        let mut c = DeterministicClock::new();
        assert_eq!(c.now(), Duration::ZERO);

        c.advance(Duration::from_millis(10));
        c.advance(Duration::from_millis(5));
        assert_eq!(c.now(), Duration::from_millis(15));

        c.set(Duration::from_millis(3));
        assert_eq!(c.now(), Duration::from_millis(15));

        c.set(Duration::MAX);
        c.advance(Duration::from_secs(1));
        assert_eq!(c.now(), Duration::MAX);
    }

    #[test]
    fn event_queue_is_fifo() {
        let mut q = PageEventQueue::new();
        q.push_event(PageEvent::NextProduct);
        q.push_event(PageEvent::SelectLanguage("en".into()));
        assert_eq!(q.len(), 2);
        let drained: Vec<_> = q.drain_events().collect();
        assert_eq!(
            drained,
            vec![PageEvent::NextProduct, PageEvent::SelectLanguage("en".into())]
        );
        assert!(q.is_empty());
    }
}
