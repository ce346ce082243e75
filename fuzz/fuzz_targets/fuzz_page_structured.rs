#![no_main]

use std::sync::Arc;
use std::time::Duration;

use abr_core::{Catalog, MemoryStore};
use abr_runtime::{CarouselPhase, SiteConfig};
use abr_web::{PageEvent, WebPage};
use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum Op {
    Next,
    Previous,
    Select(u8),
    Language(u8),
    RemoveSlot(u8),
    Step(u16),
}

const IDS: [&str; 5] = ["oring", "d229", "x10", "x12", "ghost"];
const CODES: [&str; 5] = ["pt", "en", "es", "fr", ""];
const SLOTS: [&str; 4] = ["productTitle", "productDescription", "productImage", "productPanel"];

fuzz_target!(|ops: Vec<Op>| {
    let mut page = WebPage::standard(
        &SiteConfig::default(),
        Arc::new(Catalog::builtin()),
        Box::new(MemoryStore::new()),
        None,
    );
    page.boot();

    for op in ops.into_iter().take(256) {
        match op {
            Op::Next => page.push_event(PageEvent::NextProduct),
            Op::Previous => page.push_event(PageEvent::PreviousProduct),
            Op::Select(i) => page.push_event(PageEvent::SelectProduct(IDS[usize::from(i) % IDS.len()].into())),
            Op::Language(i) => page.push_event(PageEvent::SelectLanguage(CODES[usize::from(i) % CODES.len()].into())),
            Op::RemoveSlot(i) => {
                page.document_mut().remove(SLOTS[usize::from(i) % SLOTS.len()]);
            }
            Op::Step(ms) => {
                page.step(Duration::from_millis(u64::from(ms)));
            }
        }

        let carousel = page.carousel();
        match carousel.phase() {
            CarouselPhase::Splash => assert!(carousel.current_index().is_none()),
            CarouselPhase::Showing => {
                assert!(carousel.current_index().is_some_and(|i| i < 4));
                assert!(carousel.splash_timer().is_none());
            }
        }
        // Splash timer, or auto-advance plus at most one transition step.
        assert!(page.timers().pending_count() <= 2);
    }
});
