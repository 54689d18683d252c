//! Fuzz target for envelope decoding
//!
//! This fuzzer feeds arbitrary text to the inbound decoder and the bridge:
//! - Malformed JSON
//! - Non-object bodies
//! - Missing, foreign or non-string channel tags
//! - Wrong-typed `type`, `block` and `style` fields
//!
//! The fuzzer should NEVER panic. All invalid inputs should be dropped.

#![no_main]

use libfuzzer_sys::fuzz_target;
use quill_app::Bridge;
use quill_proto::{Inbound, Outbound, CHANNEL};

fuzz_target!(|data: &[u8]| {
    let Ok(raw) = std::str::from_utf8(data) else {
        return;
    };

    let decoded = Inbound::decode(raw);
    let _ = Outbound::decode(raw);

    // Anything accepted must have carried our channel tag.
    if decoded.is_ok() {
        assert!(raw.contains(CHANNEL), "accepted envelope without channel: {raw}");
    }

    let mut bridge = Bridge::new();
    let events = bridge.handle_message(raw);
    assert_eq!(events.is_empty(), decoded.is_err());
    assert!(events.len() <= 1);
});
