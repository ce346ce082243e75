#![forbid(unsafe_code)]

//! Hide/reveal transition state machine for the product panel.
//!
//! ```text
//!            begin()                 reveal step              settle step
//!   Idle ───────────────▶ Hiding ─────────────────▶ Revealing ─────────────▶ Idle
//!     ▲                     │ begin()                  │ begin()
//!     └─────────────────────┴──────────────────────────┘  (cancel + restart)
//! ```
//!
//! Exactly one step is ever scheduled. Starting a new transition cancels
//! the in-flight step first, so a superseded render can never write stale
//! content over a newer one.
//!
//! # Invariants
//!
//! - `pending()` is `Some` iff the phase is not `Idle`.
//! - A step whose timer id is not the pending one is ignored.

use std::time::Duration;

use crate::timer::{TimerId, TimerQueue};

/// Visual direction of a content change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Neutral fade.
    #[default]
    None,
    /// Moving forward through the catalog.
    Down,
    /// Moving backwards, or wrapping around.
    Up,
}

impl Direction {
    /// Every class the hide phase may add.
    pub const HIDE_CLASSES: [&'static str; 3] = ["fade-out", "fade-out-down", "fade-out-up"];
    /// Every class the reveal phase may add.
    pub const REVEAL_CLASSES: [&'static str; 3] = ["fade-in", "fade-in-down", "fade-in-up"];

    #[must_use]
    pub const fn hide_class(self) -> &'static str {
        match self {
            Self::None => "fade-out",
            Self::Down => "fade-out-down",
            Self::Up => "fade-out-up",
        }
    }

    #[must_use]
    pub const fn reveal_class(self) -> &'static str {
        match self {
            Self::None => "fade-in",
            Self::Down => "fade-in-down",
            Self::Up => "fade-in-up",
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Down => "down",
            Self::Up => "up",
        }
    }
}

/// Where the panel is in its hide/reveal cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TransitionPhase {
    #[default]
    Idle,
    Hiding,
    Revealing,
}

/// Scheduled step payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransitionStep {
    /// Hide delay elapsed: inject content and start revealing.
    Reveal,
    /// Reveal delay elapsed: clear the reveal classes.
    Settle,
}

/// Outcome of feeding a step to the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Content for `target` must be injected now.
    Revealed { target: usize, direction: Direction },
    /// The cycle finished.
    Settled { direction: Direction },
    /// The step was stale or out of order.
    Ignored,
}

/// Single-slot transition machine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transition {
    phase: TransitionPhase,
    direction: Direction,
    target: usize,
    pending: Option<TimerId>,
}

impl Transition {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn phase(&self) -> TransitionPhase {
        self.phase
    }

    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Entry index the current cycle is moving to.
    #[must_use]
    pub const fn target(&self) -> usize {
        self.target
    }

    #[must_use]
    pub const fn pending(&self) -> Option<TimerId> {
        self.pending
    }

    /// Start hiding towards `target`, cancelling any in-flight step.
    ///
    /// Returns whether a step was superseded.
    pub fn begin<M: Clone>(
        &mut self,
        target: usize,
        direction: Direction,
        hide: Duration,
        timers: &mut TimerQueue<M>,
        wrap: fn(TransitionStep) -> M,
    ) -> bool {
        let superseded = self.cancel(timers);
        self.phase = TransitionPhase::Hiding;
        self.direction = direction;
        self.target = target;
        self.pending = Some(timers.schedule_once(hide, wrap(TransitionStep::Reveal)));
        superseded
    }

    /// Feed a fired step back into the machine.
    pub fn on_step<M: Clone>(
        &mut self,
        id: TimerId,
        step: TransitionStep,
        reveal_clear: Duration,
        timers: &mut TimerQueue<M>,
        wrap: fn(TransitionStep) -> M,
    ) -> StepOutcome {
        if self.pending != Some(id) {
            return StepOutcome::Ignored;
        }
        match (self.phase, step) {
            (TransitionPhase::Hiding, TransitionStep::Reveal) => {
                self.phase = TransitionPhase::Revealing;
                self.pending = Some(timers.schedule_once(reveal_clear, wrap(TransitionStep::Settle)));
                StepOutcome::Revealed {
                    target: self.target,
                    direction: self.direction,
                }
            }
            (TransitionPhase::Revealing, TransitionStep::Settle) => {
                self.phase = TransitionPhase::Idle;
                self.pending = None;
                StepOutcome::Settled {
                    direction: self.direction,
                }
            }
            _ => StepOutcome::Ignored,
        }
    }

    /// Drop the in-flight step and return to `Idle`.
    pub fn cancel<M: Clone>(&mut self, timers: &mut TimerQueue<M>) -> bool {
        self.phase = TransitionPhase::Idle;
        match self.pending.take() {
            Some(id) => timers.cancel(id),
            None => false,
        }
    }
}
