//! No-mock integration tests for writing report files.
//!
//! These tests validate:
//! - Reports land at the requested path as complete PDF files
//! - Failed renders leave no file behind and keep any previous report
//! - Output is byte-identical across runs
//! - File-loaded configuration drives page size and sections

use ar_report::{
    generate_report, generate_report_with, ActivityFields, ActivityRecord, DateRange, PageConfig,
    ReportConfig, ReportError, ReportModel, StyleSheet,
};
use chrono::{DateTime, TimeZone, Utc};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

// ============================================================================
// Test Helpers
// ============================================================================

fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 14, hour, minute, 0).unwrap()
}

fn record(id: &str, title: &str, description: &str, start: (u32, u32), end: (u32, u32)) -> ActivityRecord {
    ActivityRecord::create(ActivityFields {
        id: id.into(),
        title: title.to_string(),
        description: description.to_string(),
        category: "work".to_string(),
        start_time: at(start.0, start.1),
        end_time: at(end.0, end.1),
    })
    .unwrap()
}

fn model(activities: Vec<ActivityRecord>) -> ReportModel {
    ReportModel::build(
        "Weekly report",
        "Dana",
        at(18, 0),
        DateRange::new(at(0, 0), at(23, 59)).unwrap(),
        activities,
    )
    .unwrap()
}

fn sample() -> ReportModel {
    model(vec![
        record("a", "Planning", "Sprint planning with the team", (9, 0), (10, 0)),
        record("b", "Review", "", (10, 30), (11, 15)),
    ])
}

fn oversized() -> ReportModel {
    model(vec![record("x", "Huge", &"word ".repeat(4000), (9, 0), (10, 0))])
}

fn entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

// ============================================================================
// Writing
// ============================================================================

#[test]
fn test_report_is_written() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("report.pdf");

    generate_report(&sample(), &StyleSheet::standard(), &PageConfig::default(), &path).unwrap();

    let bytes = fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"%PDF-1.4"));
    assert!(bytes.ends_with(b"%%EOF\n"));
    assert_eq!(entries(dir.path()), vec!["report.pdf"]);
}

#[test]
fn test_failed_render_writes_nothing() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("report.pdf");

    let err = generate_report(&oversized(), &StyleSheet::standard(), &PageConfig::default(), &path)
        .unwrap_err();

    assert!(matches!(err, ReportError::Render(_)));
    assert!(!path.exists());
    assert!(entries(dir.path()).is_empty());
}

#[test]
fn test_failed_render_keeps_previous_report() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("report.pdf");
    let style = StyleSheet::standard();
    let page = PageConfig::default();

    generate_report(&sample(), &style, &page, &path).unwrap();
    let before = fs::read(&path).unwrap();

    assert!(generate_report(&oversized(), &style, &page, &path).is_err());
    assert_eq!(fs::read(&path).unwrap(), before);
    assert_eq!(entries(dir.path()), vec!["report.pdf"]);
}

#[test]
fn test_missing_directory_is_io_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("report.pdf");

    let err = generate_report(&sample(), &StyleSheet::standard(), &PageConfig::default(), &path)
        .unwrap_err();

    assert!(matches!(err, ReportError::Io { .. }));
    assert_eq!(err.code(), 60);
    assert!(!dir.path().join("nested").exists());
}

#[test]
fn test_output_is_byte_identical() {
    let dir = tempdir().unwrap();
    let first = dir.path().join("first.pdf");
    let second = dir.path().join("second.pdf");
    let style = StyleSheet::standard();
    let page = PageConfig::default();

    generate_report(&sample(), &style, &page, &first).unwrap();
    generate_report(&sample(), &style, &page, &second).unwrap();

    assert_eq!(fs::read(first).unwrap(), fs::read(second).unwrap());
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_generate_with_loaded_config() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("report.json");
    fs::write(
        &config_path,
        r##"{
            "page": { "page_size": "letter" },
            "style": { "title": { "size": 30, "color": "#000000", "bold": true } },
            "sections": { "signatures": true },
            "running_header": false
        }"##,
    )
    .unwrap();
    let config = ReportConfig::load(&config_path).unwrap();

    let path = dir.path().join("report.pdf");
    generate_report_with(&sample(), &config, &path).unwrap();

    let pdf = String::from_utf8_lossy(&fs::read(&path).unwrap()).into_owned();
    assert!(pdf.contains("/MediaBox [0 0 612 792]"));
    assert!(pdf.contains("/F2 30 Tf"));
    assert!(pdf.contains("(Reviewer) Tj"));
    assert_eq!(pdf.matches("(Weekly report) Tj").count(), 1);
}

#[test]
fn test_config_style_overrides_merge_over_standard() {
    let config = ReportConfig::new().with_style(StyleSheet::new());
    assert!(config.resolved_style().missing_roles().is_empty());
}
