#![forbid(unsafe_code)]

//! Carousel display controller.
//!
//! Shows either the language-invariant splash or exactly one catalog entry,
//! and owns every timed progression of the product panel: the one-shot
//! splash timer, the recurring auto-advance, and the hide/reveal cycle of
//! each render.
//!
//! The controller never touches elements directly. It writes through the
//! [`SlotRegistry`] handles, which keep the shadow-attribute contract the
//! localization engine reads. Timers live in a caller-owned
//! [`TimerQueue`]; the owner pops due timers and feeds them back through
//! [`Carousel::handle`].
//!
//! # Invariants
//!
//! - The phase leaves `Splash` exactly once per [`Carousel::start`].
//! - At most one auto-advance timer and one transition step are pending.
//! - Once rotation started, the splash timer is never pending.
//! - Every render writes all three language shadows for every slot it
//!   fills; the splash writes none and clears what was there.
//!
//! # Failure Modes
//!
//! - Unknown entry ids are rejected with [`CarouselError::UnknownEntry`]
//!   and change nothing.
//! - A missing slot element skips that slot only; a missing panel skips the
//!   transition classes but content is still written at reveal time.

use std::fmt;
use std::sync::Arc;

use abr_core::{Catalog, CatalogEntry, Document, SlotName, SlotRegistry, SplashContent};

use crate::config::CarouselConfig;
use crate::timer::{Fired, TimerId, TimerQueue};
use crate::transition::{Direction, StepOutcome, Transition, TransitionStep};

/// Panel class present while the splash is shown.
pub const INTRO_CLASS: &str = "abr-intro";
/// Indicator class marking the displayed entry.
pub const ACTIVE_CLASS: &str = "active";

/// Top-level carousel phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CarouselPhase {
    #[default]
    Splash,
    Showing,
}

impl CarouselPhase {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Splash => "splash",
            Self::Showing => "showing",
        }
    }
}

/// Navigation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    Next,
    Previous,
}

/// Timer payloads owned by the carousel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CarouselMsg {
    SplashElapsed,
    AutoAdvance,
    Transition(TransitionStep),
}

/// Timer queue type the carousel schedules on.
pub type CarouselTimers = TimerQueue<CarouselMsg>;

/// What a fired timer did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarouselUpdate {
    /// Stale or foreign timer.
    Ignored,
    /// The splash elapsed and rotation started at entry 0.
    EnteredShowing,
    /// Auto-advance moved to `index`.
    Advanced { index: usize, direction: Direction },
    /// Content for `index` was written into the slots.
    Revealed { index: usize },
    /// The reveal classes were cleared.
    Settled,
}

/// Rejected carousel request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CarouselError {
    /// No catalog entry has this id.
    UnknownEntry(String),
}

impl fmt::Display for CarouselError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownEntry(id) => write!(f, "unknown catalog entry: {id:?}"),
        }
    }
}

impl std::error::Error for CarouselError {}

/// Splash-then-rotate product display.
#[derive(Debug, Clone)]
pub struct Carousel {
    catalog: Arc<Catalog>,
    splash: SplashContent,
    slots: SlotRegistry,
    config: CarouselConfig,
    phase: CarouselPhase,
    current: usize,
    splash_timer: Option<TimerId>,
    auto_timer: Option<TimerId>,
    transition: Transition,
}

impl Carousel {
    #[must_use]
    pub fn new(catalog: Arc<Catalog>, slots: SlotRegistry, config: CarouselConfig) -> Self {
        Self {
            catalog,
            splash: SplashContent::default(),
            slots,
            config,
            phase: CarouselPhase::Splash,
            current: 0,
            splash_timer: None,
            auto_timer: None,
            transition: Transition::new(),
        }
    }

    /// Replace the splash content.
    #[must_use]
    pub fn with_splash(mut self, splash: SplashContent) -> Self {
        self.splash = splash;
        self
    }

    #[must_use]
    pub const fn phase(&self) -> CarouselPhase {
        self.phase
    }

    /// Index of the displayed entry, `None` during the splash.
    #[must_use]
    pub const fn current_index(&self) -> Option<usize> {
        match self.phase {
            CarouselPhase::Splash => None,
            CarouselPhase::Showing => Some(self.current),
        }
    }

    #[must_use]
    pub fn current_entry(&self) -> Option<&CatalogEntry> {
        self.current_index().and_then(|i| self.catalog.get(i))
    }

    #[must_use]
    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    #[must_use]
    pub fn slots(&self) -> &SlotRegistry {
        &self.slots
    }

    #[must_use]
    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    #[must_use]
    pub fn transition(&self) -> &Transition {
        &self.transition
    }

    #[must_use]
    pub const fn splash_timer(&self) -> Option<TimerId> {
        self.splash_timer
    }

    #[must_use]
    pub const fn auto_timer(&self) -> Option<TimerId> {
        self.auto_timer
    }

    /// Show the splash and arm the splash timer.
    pub fn start(&mut self, doc: &mut Document, timers: &mut CarouselTimers) {
        self.stop(timers);
        self.phase = CarouselPhase::Splash;
        self.current = 0;
        self.write_splash(doc);
        self.splash_timer = Some(timers.schedule_once(self.config.splash(), CarouselMsg::SplashElapsed));
        tracing::debug!(
            splash_ms = self.config.splash_ms,
            entries = self.catalog.len(),
            "carousel splash shown"
        );
    }

    /// Cancel every timer the carousel owns.
    pub fn stop(&mut self, timers: &mut CarouselTimers) {
        for id in [self.splash_timer.take(), self.auto_timer.take()].into_iter().flatten() {
            timers.cancel(id);
        }
        self.transition.cancel(timers);
    }

    /// Leave the splash and show entry 0. No-op once rotation started.
    pub fn transition_to_showing(&mut self, doc: &mut Document, timers: &mut CarouselTimers) -> bool {
        if self.phase == CarouselPhase::Showing {
            return false;
        }
        self.enter_showing(timers);
        self.current = 0;
        self.render(0, Direction::None, doc, timers);
        self.restart_autoplay(timers);
        true
    }

    /// Move one entry forward or back and restart the auto-advance.
    ///
    /// During the splash this starts rotation instead: `Next` lands on the
    /// first entry and `Previous` on the last, with a neutral hint.
    pub fn advance(&mut self, step: Step, doc: &mut Document, timers: &mut CarouselTimers) -> Direction {
        let (index, direction) = self.step_target(step);
        if self.phase == CarouselPhase::Splash {
            self.enter_showing(timers);
        }
        self.current = index;
        tracing::debug!(?step, index, direction = direction.as_str(), "carousel advanced");
        self.render(index, direction, doc, timers);
        self.restart_autoplay(timers);
        direction
    }

    /// Jump to the entry with `id` and restart the auto-advance.
    pub fn go_to(
        &mut self,
        id: &str,
        doc: &mut Document,
        timers: &mut CarouselTimers,
    ) -> Result<usize, CarouselError> {
        let Some(index) = self.catalog.position(id) else {
            tracing::debug!(id, "carousel ignored unknown entry");
            return Err(CarouselError::UnknownEntry(id.to_owned()));
        };
        if self.phase == CarouselPhase::Splash {
            self.enter_showing(timers);
        }
        self.current = index;
        tracing::debug!(id, index, "carousel jumped");
        self.render(index, Direction::None, doc, timers);
        self.restart_autoplay(timers);
        Ok(index)
    }

    /// Make entry `index` current and start the hide/reveal cycle towards it.
    ///
    /// The panel starts hiding now; slot content is written when the hide
    /// delay elapses. A cycle already in flight is cancelled.
    fn render(&mut self, index: usize, direction: Direction, doc: &mut Document, timers: &mut CarouselTimers) {
        self.current = index;
        let _span = tracing::debug_span!("carousel.render", index, direction = direction.as_str()).entered();

        match self.slots.panel(doc) {
            Some(mut panel) => {
                panel.remove(INTRO_CLASS);
                panel.remove_all(&Direction::REVEAL_CLASSES);
                panel.remove_all(&Direction::HIDE_CLASSES);
                panel.add(direction.hide_class());
            }
            None => tracing::trace!("panel missing, transition classes skipped"),
        }
        self.mark_indicators(doc, Some(index));

        let superseded = self.transition.begin(
            index,
            direction,
            self.config.hide(),
            timers,
            CarouselMsg::Transition,
        );
        if superseded {
            tracing::trace!("in-flight transition superseded");
        }
    }

    /// Feed a fired timer back into the carousel.
    pub fn handle(
        &mut self,
        fired: Fired<CarouselMsg>,
        doc: &mut Document,
        timers: &mut CarouselTimers,
    ) -> CarouselUpdate {
        match fired.msg {
            CarouselMsg::SplashElapsed => {
                if self.splash_timer != Some(fired.id) {
                    return CarouselUpdate::Ignored;
                }
                self.splash_timer = None;
                if self.transition_to_showing(doc, timers) {
                    CarouselUpdate::EnteredShowing
                } else {
                    CarouselUpdate::Ignored
                }
            }
            CarouselMsg::AutoAdvance => {
                if self.auto_timer != Some(fired.id) || self.phase != CarouselPhase::Showing {
                    return CarouselUpdate::Ignored;
                }
                let (index, direction) = self.step_target(Step::Next);
                self.current = index;
                tracing::debug!(index, direction = direction.as_str(), "carousel auto-advanced");
                self.render(index, direction, doc, timers);
                CarouselUpdate::Advanced { index, direction }
            }
            CarouselMsg::Transition(step) => {
                let outcome = self.transition.on_step(
                    fired.id,
                    step,
                    self.config.reveal_clear(),
                    timers,
                    CarouselMsg::Transition,
                );
                match outcome {
                    StepOutcome::Revealed { target, direction } => {
                        if let Some(mut panel) = self.slots.panel(doc) {
                            panel.remove_all(&Direction::HIDE_CLASSES);
                            panel.add(direction.reveal_class());
                        }
                        self.write_entry(target, doc);
                        CarouselUpdate::Revealed { index: target }
                    }
                    StepOutcome::Settled { .. } => {
                        if let Some(mut panel) = self.slots.panel(doc) {
                            panel.remove_all(&Direction::REVEAL_CLASSES);
                        }
                        CarouselUpdate::Settled
                    }
                    StepOutcome::Ignored => CarouselUpdate::Ignored,
                }
            }
        }
    }

    fn enter_showing(&mut self, timers: &mut CarouselTimers) {
        if let Some(id) = self.splash_timer.take() {
            timers.cancel(id);
        }
        self.phase = CarouselPhase::Showing;
        tracing::debug!(phase = self.phase.as_str(), "carousel phase changed");
    }

    fn restart_autoplay(&mut self, timers: &mut CarouselTimers) {
        if let Some(id) = self.auto_timer.take() {
            timers.cancel(id);
        }
        if self.config.autoplay {
            self.auto_timer = Some(timers.schedule_every(self.config.auto_advance(), CarouselMsg::AutoAdvance));
        }
    }

    fn step_target(&self, step: Step) -> (usize, Direction) {
        let n = self.catalog.len().max(1);
        if self.phase == CarouselPhase::Splash {
            return match step {
                Step::Next => (0, Direction::None),
                Step::Previous => (n - 1, Direction::None),
            };
        }
        let from = self.current;
        match step {
            Step::Next => {
                let to = (from + 1) % n;
                let direction = match to.cmp(&from) {
                    std::cmp::Ordering::Greater => Direction::Down,
                    std::cmp::Ordering::Less => Direction::Up,
                    std::cmp::Ordering::Equal => Direction::None,
                };
                (to, direction)
            }
            Step::Previous => {
                let to = (from + n - 1) % n;
                let direction = if to == from { Direction::None } else { Direction::Up };
                (to, direction)
            }
        }
    }

    fn write_splash(&self, doc: &mut Document) {
        if let Some(mut panel) = self.slots.panel(doc) {
            panel.remove_all(&Direction::HIDE_CLASSES);
            panel.remove_all(&Direction::REVEAL_CLASSES);
            panel.add(INTRO_CLASS);
        }
        for (name, text) in [
            (SlotName::Title, &self.splash.title),
            (SlotName::Description, &self.splash.description),
        ] {
            match self.slots.text(doc, name) {
                Some(mut slot) => {
                    slot.set_literal(text);
                    slot.clear_shadows();
                }
                None => tracing::trace!(slot = ?name, "slot missing, skipped"),
            }
        }
        match self.slots.image(doc) {
            Some(mut image) => {
                image.set_source(&self.splash.image_path);
                image.set_alt(&self.splash.image_alt);
                image.clear_alt_shadows();
                image.set_logo(true);
            }
            None => tracing::trace!(slot = ?SlotName::Image, "slot missing, skipped"),
        }
        self.mark_indicators(doc, None);
    }

    fn write_entry(&self, index: usize, doc: &mut Document) {
        let Some(entry) = self.catalog.get(index) else {
            return;
        };
        for (name, value) in [
            (SlotName::Title, &entry.title),
            (SlotName::Description, &entry.description),
        ] {
            match self.slots.text(doc, name) {
                Some(mut slot) => {
                    slot.set_literal(value.default_value());
                    slot.write_shadows(value);
                    tracing::trace!(slot = ?name, id = %entry.id, "slot written");
                }
                None => tracing::trace!(slot = ?name, "slot missing, skipped"),
            }
        }
        match self.slots.image(doc) {
            Some(mut image) => {
                image.set_source(&entry.image_path);
                image.set_alt(entry.title.default_value());
                image.write_alt_shadows(&entry.title);
                image.set_logo(false);
            }
            None => tracing::trace!(slot = ?SlotName::Image, "slot missing, skipped"),
        }
    }

    fn mark_indicators(&self, doc: &mut Document, active: Option<usize>) {
        for i in 0..self.catalog.len() {
            if let Some(mut indicator) = self.slots.indicator(doc, i) {
                indicator.toggle(ACTIVE_CLASS, active == Some(i));
            }
        }
    }
}
