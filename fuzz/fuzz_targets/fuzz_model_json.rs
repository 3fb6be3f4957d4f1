//! Fuzz target for report model loading.
//!
//! Tests that `ReportModel::from_json` handles arbitrary input without
//! panicking, and that any model it accepts can be rendered.

#![no_main]

use ar_report::{render, PageConfig, ReportModel, StyleSheet};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(json) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(model) = ReportModel::from_json(json) {
        // Oversized rows are a legitimate error, never a panic
        let _ = render(&model, &StyleSheet::standard(), &PageConfig::default());
    }
});
