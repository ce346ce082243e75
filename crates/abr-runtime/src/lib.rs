#![forbid(unsafe_code)]

//! Cooperative runtime for the ABR catalog page.
//!
//! # Role in the workspace
//! `abr-runtime` owns time. It provides the deterministic [`TimerQueue`]
//! that stands in for browser timers, the hide/reveal [`Transition`]
//! machine, the [`Carousel`] controller built on both, and the
//! [`SiteConfig`] that parameterizes them.
//!
//! # How it fits in the system
//! The carousel writes catalog content into the document through
//! `abr-core` slot handles. It never reads the active language; the
//! localization engine in `abr-i18n` re-reads the shadows it leaves.
//! `abr-web` owns the queue and pumps due timers into the carousel.

pub mod carousel;
pub mod config;
pub mod timer;
pub mod transition;

pub use carousel::{
    ACTIVE_CLASS, Carousel, CarouselError, CarouselMsg, CarouselPhase, CarouselTimers,
    CarouselUpdate, INTRO_CLASS, Step,
};
pub use config::{CarouselConfig, ConfigError, SiteConfig};
pub use timer::{Fired, TimerId, TimerQueue};
pub use transition::{Direction, StepOutcome, Transition, TransitionPhase, TransitionStep};
