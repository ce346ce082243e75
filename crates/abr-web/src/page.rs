#![forbid(unsafe_code)]

//! One page load: document, store, localizer, carousel, and their timers.
//!
//! [`WebPage`] is the only owner of mutable page state. The host drives it
//! in two ways: [`WebPage::push_event`] queues user interactions and
//! [`WebPage::step`] advances time. Within a step, queued events are
//! dispatched first, at the current instant, then every timer due within
//! the step fires in deadline order.
//!
//! # Invariants
//!
//! - Timers never fire outside `step`.
//! - Rejected events (unknown ids, unsupported languages) leave the
//!   document, the store, and the carousel untouched.
//! - Content revealed by the carousel is re-localized to the active
//!   language before the step returns.
//! - The flag icon carries exactly one `flag-icon-*` class, the active
//!   language's.

use core::time::Duration;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use abr_core::{Catalog, Document, KeyValueStore, Language, SlotRegistry};
use abr_i18n::{LanguageChange, Localizer};
use abr_runtime::{Carousel, CarouselTimers, CarouselUpdate, SiteConfig, Step};

use crate::standard::{FLAG_ICON_CLASS, FLAG_ICON_ID, standard_document};
use crate::{DeterministicClock, PageEvent, PageEventQueue};

/// What one [`WebPage::step`] did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    /// Host events dispatched.
    pub events: usize,
    /// Host events rejected as no-ops.
    pub rejected: usize,
    /// Timers fired.
    pub timers: usize,
    /// Carousel reveals (content injections) during the step.
    pub reveals: usize,
}

/// Host-driven catalog page.
pub struct WebPage {
    clock: DeterministicClock,
    events: PageEventQueue,
    document: Document,
    store: Box<dyn KeyValueStore>,
    localizer: Localizer,
    carousel: Carousel,
    timers: CarouselTimers,
    changes: Rc<RefCell<Vec<LanguageChange>>>,
    booted: bool,
}

impl std::fmt::Debug for WebPage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebPage")
            .field("now", &self.clock.now())
            .field("language", &self.localizer.active())
            .field("phase", &self.carousel.phase())
            .field("pending_events", &self.events.len())
            .field("pending_timers", &self.timers.pending_count())
            .field("booted", &self.booted)
            .finish()
    }
}

impl WebPage {
    /// Assemble a page over an existing document.
    ///
    /// The initial language comes from `store`, then `system_locale`, then
    /// Portuguese. Nothing is rendered until [`boot`](Self::boot).
    #[must_use]
    pub fn new(
        config: &SiteConfig,
        catalog: Arc<Catalog>,
        document: Document,
        store: Box<dyn KeyValueStore>,
        system_locale: Option<&str>,
    ) -> Self {
        let mut localizer = Localizer::from_preferences(&*store, system_locale)
            .with_default_title(config.default_page_title.clone());
        let changes = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&changes);
        localizer
            .listeners_mut()
            .subscribe(move |change: &LanguageChange| sink.borrow_mut().push(*change));

        let carousel = Carousel::new(
            catalog,
            SlotRegistry::new(config.slots.clone()),
            config.carousel.clone(),
        );
        Self {
            clock: DeterministicClock::new(),
            events: PageEventQueue::new(),
            document,
            store,
            localizer,
            carousel,
            timers: CarouselTimers::new(),
            changes,
            booted: false,
        }
    }

    /// Page over the reference markup for `catalog`.
    #[must_use]
    pub fn standard(
        config: &SiteConfig,
        catalog: Arc<Catalog>,
        store: Box<dyn KeyValueStore>,
        system_locale: Option<&str>,
    ) -> Self {
        let document = standard_document(&catalog, &config.slots);
        Self::new(config, catalog, document, store, system_locale)
    }

    /// Localize the page, then show the splash. Idempotent.
    pub fn boot(&mut self) {
        if self.booted {
            return;
        }
        self.booted = true;
        let report = self.localizer.apply_language(&mut self.document);
        self.sync_flag_icon(self.localizer.active());
        self.carousel.start(&mut self.document, &mut self.timers);
        tracing::debug!(
            lang = %self.localizer.active(),
            elements = report.elements,
            "page booted"
        );
    }

    /// Queue a host event for the next step.
    pub fn push_event(&mut self, event: PageEvent) {
        self.events.push_event(event);
    }

    /// Advance time by `dt`, dispatching queued events first.
    pub fn step(&mut self, dt: Duration) -> StepReport {
        let _span = tracing::debug_span!("page.step", now_ms = self.clock.now().as_millis() as u64, dt_ms = dt.as_millis() as u64)
            .entered();
        let mut report = StepReport::default();

        let queued: Vec<PageEvent> = self.events.drain_events().collect();
        for event in queued {
            report.events += 1;
            if !self.dispatch(event) {
                report.rejected += 1;
            }
        }

        self.clock.advance(dt);
        let until = self.clock.now();
        while let Some(fired) = self.timers.pop_due(until) {
            report.timers += 1;
            let update = self.carousel.handle(fired, &mut self.document, &mut self.timers);
            if let CarouselUpdate::Revealed { index } = update {
                report.reveals += 1;
                self.localizer.apply_language(&mut self.document);
                tracing::trace!(index, lang = %self.localizer.active(), "revealed content localized");
            }
        }
        self.timers.advance_to(until);
        report
    }

    fn dispatch(&mut self, event: PageEvent) -> bool {
        match event {
            PageEvent::NextProduct => {
                self.carousel.advance(Step::Next, &mut self.document, &mut self.timers);
                true
            }
            PageEvent::PreviousProduct => {
                self.carousel.advance(Step::Previous, &mut self.document, &mut self.timers);
                true
            }
            PageEvent::SelectProduct(id) => match self.carousel.go_to(&id, &mut self.document, &mut self.timers) {
                Ok(_) => true,
                Err(err) => {
                    tracing::debug!(error = %err, "product selection ignored");
                    false
                }
            },
            PageEvent::SelectLanguage(code) => {
                match self
                    .localizer
                    .set_active_language(&code, &mut self.document, &mut *self.store)
                {
                    Ok(change) => {
                        self.sync_flag_icon(change.current);
                        true
                    }
                    Err(err) => {
                        tracing::debug!(error = %err, "language selection ignored");
                        false
                    }
                }
            }
        }
    }

    fn sync_flag_icon(&mut self, lang: Language) {
        let Some(icon) = self.document.get_mut(FLAG_ICON_ID) else {
            return;
        };
        for other in Language::ALL {
            icon.remove_class(other.flag_class());
        }
        icon.add_class(FLAG_ICON_CLASS);
        icon.add_class(lang.flag_class());
    }

    #[must_use]
    pub fn now(&self) -> Duration {
        self.clock.now()
    }

    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Mutable document access, for hosts that edit markup between steps.
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    #[must_use]
    pub fn localizer(&self) -> &Localizer {
        &self.localizer
    }

    #[must_use]
    pub fn carousel(&self) -> &Carousel {
        &self.carousel
    }

    #[must_use]
    pub fn timers(&self) -> &CarouselTimers {
        &self.timers
    }

    #[must_use]
    pub fn store(&self) -> &dyn KeyValueStore {
        &*self.store
    }

    /// Every successful language selection so far, oldest first.
    #[must_use]
    pub fn language_changes(&self) -> Vec<LanguageChange> {
        self.changes.borrow().clone()
    }

    #[must_use]
    pub const fn is_booted(&self) -> bool {
        self.booted
    }
}
