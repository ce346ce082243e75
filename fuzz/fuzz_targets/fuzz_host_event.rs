#![no_main]

use abr_web::input_parser::{parse_host_event, parse_host_events};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // The parser must never panic, whatever the host sends.
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = parse_host_event(text);
        let _ = parse_host_events(text);
    }
});
