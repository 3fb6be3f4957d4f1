//! Fuzz target for layout of arbitrary activity sets.
//!
//! Builds models from structured input and checks that pagination either
//! succeeds with every activity placed exactly once or reports an error.

#![no_main]

use ar_report::{
    ActivityFields, ActivityRecord, DateRange, PageConfig, ReportModel, ReportRenderer, RowKind,
    SectionKind, StyleSheet,
};
use arbitrary::Arbitrary;
use chrono::{Duration, TimeZone, Utc};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Entry {
    title: String,
    description: String,
    category: String,
    offset_minutes: u16,
    length_minutes: u16,
}

#[derive(Debug, Arbitrary)]
struct Input {
    max_content_height: u16,
    entries: Vec<Entry>,
}

fuzz_target!(|input: Input| {
    let start = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
    let Ok(range) = DateRange::new(start, start + Duration::minutes(i64::from(u16::MAX))) else {
        return;
    };

    let activities: Vec<ActivityRecord> = input
        .entries
        .into_iter()
        .take(200)
        .enumerate()
        .filter_map(|(i, entry)| {
            let begin = start + Duration::minutes(i64::from(entry.offset_minutes));
            ActivityRecord::create(ActivityFields {
                id: format!("act-{i}").into(),
                title: entry.title,
                description: entry.description,
                category: entry.category,
                start_time: begin,
                end_time: begin + Duration::minutes(i64::from(entry.length_minutes)),
            })
            .ok()
        })
        .collect();
    let count = activities.len();
    let Ok(model) = ReportModel::build("Fuzz", "", start, range, activities) else {
        return;
    };

    let style = StyleSheet::standard();
    let page = PageConfig::default().with_max_content_height(f64::from(input.max_content_height));
    if let Ok(layout) = ReportRenderer::new(&style, &page).layout(&model) {
        let placed = layout
            .pages
            .iter()
            .flat_map(|page| page.rows.iter())
            .filter(|p| p.section == SectionKind::Detail && p.row.kind == RowKind::Data)
            .count();
        assert_eq!(placed, count);
        for page in &layout.pages {
            assert!(page.used <= layout.max_content_height);
        }
    }
});
