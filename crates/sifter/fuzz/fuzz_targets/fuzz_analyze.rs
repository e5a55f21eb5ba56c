//! Fuzz target for parsing and issue detection.
//!
//! Arbitrary bytes must either be rejected by the parser with an error or
//! produce a report carrying every check, without panicking.

#![no_main]

use libfuzzer_sys::fuzz_target;
use sifter::{Parser, ParserConfig, CHECK_NAMES};

fuzz_target!(|data: &[u8]| {
    // Only process reasonable-sized inputs to avoid OOM
    if data.len() > 100_000 {
        return;
    }

    let parser = Parser::with_config(ParserConfig {
        flexible: true,
        ..Default::default()
    });

    if let Ok((dataset, _)) = parser.parse_bytes(data, "fuzz.csv") {
        let report = sifter::analyze(&dataset);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json.as_object().map(|o| o.len()), Some(CHECK_NAMES.len()));

        let _ = dataset.head_text(5);
        let _ = dataset.describe().to_text();
    }
});
