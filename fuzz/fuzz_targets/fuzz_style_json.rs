//! Fuzz target for style sheet loading.
//!
//! Tests that `StyleSheet::from_json` handles arbitrary input without
//! panicking and that accepted sheets either render or fail validation.

#![no_main]

use ar_report::{render, DateRange, PageConfig, ReportModel, StyleSheet};
use chrono::{TimeZone, Utc};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(json) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(overrides) = StyleSheet::from_json(json) else {
        return;
    };
    let style = StyleSheet::merge(&StyleSheet::standard(), &overrides);

    let start = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
    let Ok(range) = DateRange::new(start, start) else {
        return;
    };
    let Ok(model) = ReportModel::build("Fuzz", "", start, range, Vec::new()) else {
        return;
    };
    let _ = render(&model, &style, &PageConfig::default());
});
