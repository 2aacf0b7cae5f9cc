//! Fuzz target: `DiagConfig::from_json`
//!
//! Arbitrary bytes as a configuration override.  Parsing must never panic,
//! and anything accepted must satisfy the timing constraints.
//!
//! cargo fuzz run fuzz_config_json

#![no_main]

use libfuzzer_sys::fuzz_target;
use motordiag::config::DiagConfig;

fuzz_target!(|data: &[u8]| {
    let Ok(json) = core::str::from_utf8(data) else {
        return;
    };
    if let Ok(config) = DiagConfig::from_json(json) {
        assert!(config.response_timeout_ms < config.cycle_period_ms);
        assert!(config.output_lock_timeout_ms > 0);
        assert!((1..=2).contains(&config.expected_responses));
    }
});
