//! Fuzz target for report configuration.
//!
//! Tests that `ReportConfig::from_json` handles arbitrary input and that
//! page sizes, margins and date formats it accepts never panic the renderer.

#![no_main]

use ar_report::{DateRange, ReportConfig, ReportModel, ReportRenderer};
use ar_common::{ActivityFields, ActivityRecord};
use chrono::{Duration, TimeZone, Utc};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(json) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(config) = ReportConfig::from_json(json) else {
        return;
    };

    let start = Utc.with_ymd_and_hms(2025, 1, 1, 8, 0, 0).unwrap();
    let Ok(activity) = ActivityRecord::create(ActivityFields {
        id: "fuzz".into(),
        title: "Fuzzed layout".to_string(),
        description: "Description wrapped under the row".to_string(),
        category: "fuzz".to_string(),
        start_time: start,
        end_time: start + Duration::minutes(45),
    }) else {
        return;
    };
    let Ok(range) = DateRange::new(start, start + Duration::hours(1)) else {
        return;
    };
    let Ok(model) = ReportModel::build("Fuzz", "Fuzzer", start, range, vec![activity]) else {
        return;
    };

    let style = config.resolved_style();
    let _ = ReportRenderer::new(&style, &config.page)
        .with_options(config.options.clone())
        .render(&model);
});
