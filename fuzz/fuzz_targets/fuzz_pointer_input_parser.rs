#![no_main]

use libfuzzer_sys::fuzz_target;
use reveal_web::{HostInput, parse_encoded_pointer};

fuzz_target!(|data: &[u8]| {
    let Ok(json) = std::str::from_utf8(data) else {
        return;
    };

    // Must never panic, whatever the payload.
    if let Ok(Some(input)) = parse_encoded_pointer(json) {
        assert!(!input.label().is_empty());
        if let HostInput::Click(sample) = &input {
            assert!(sample.client_x().is_some(), "click without coordinate");
        }
    }
});
