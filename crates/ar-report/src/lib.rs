//! Paginated PDF reports for logged activities.
//!
//! Compiles a validated [`ReportModel`] into a multi-page PDF with computed
//! aggregates, repeated table headers and "Page X of Y" footers. Output is
//! deterministic: the same model, style and page configuration always give
//! the same bytes.
//!
//! # Sections
//!
//! - Cover: title, author, generation time, reporting period
//! - Summary: totals per category, grand total, optional statistics
//! - Detail: one row per activity in start order, on its own pages
//! - Signatures: optional sign-off lines
//!
//! # Example
//!
//! ```no_run
//! use ar_report::{generate_report, DateRange, PageConfig, ReportModel, StyleSheet};
//! use chrono::{TimeZone, Utc};
//!
//! let range = DateRange::new(
//!     Utc.with_ymd_and_hms(2025, 3, 10, 0, 0, 0).unwrap(),
//!     Utc.with_ymd_and_hms(2025, 3, 14, 23, 59, 0).unwrap(),
//! )
//! .unwrap();
//! let model = ReportModel::build("Weekly report", "Dana", Utc::now(), range, vec![]).unwrap();
//! generate_report(&model, &StyleSheet::standard(), &PageConfig::default(), "report.pdf").unwrap();
//! ```

pub mod config;
pub mod error;
pub mod generator;
pub mod layout;
pub mod metrics;
pub mod model;
pub mod output;
pub mod pdf;
pub mod sections;
pub mod style;
pub mod units;

pub use config::{
    Margins, PageConfig, PageGeometry, PageSize, RenderOptions, ReportConfig, ReportSections,
};
pub use error::{RenderError, ReportError, Result};
pub use generator::{generate_report, generate_report_with, render, ReportRenderer};
pub use layout::{Layout, PageLayout, PlacedRow, RowKind, SectionKind};
pub use model::{ActivityStatistics, Aggregates, CategoryTotal, DateRange, ReportModel};
pub use style::{Color, FontFamily, StyleRole, StyleSheet, StyleToken, DEFAULT_TOKEN};
pub use units::Length;

pub use ar_common::{format_duration, ActivityFields, ActivityId, ActivityRecord, ValidationError};
