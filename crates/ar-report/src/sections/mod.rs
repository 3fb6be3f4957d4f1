//! Section builders: model in, measured flow items out.

pub mod cover;
pub mod detail;
pub mod signatures;
pub mod summary;

use crate::config::{PageGeometry, RenderOptions};
use crate::layout::{Align, Cell, Row, RowKind, Section};
use crate::model::ReportModel;
use crate::style::{StyleRole, StyleSheet};
use crate::units::Length;
use chrono::{DateTime, Utc};
use std::fmt::Write;

/// Everything a section needs besides the model.
#[derive(Debug, Clone, Copy)]
pub struct SectionContext<'a> {
    pub style: &'a StyleSheet,
    pub geometry: &'a PageGeometry,
    pub options: &'a RenderOptions,
}

impl<'a> SectionContext<'a> {
    pub fn new(style: &'a StyleSheet, geometry: &'a PageGeometry, options: &'a RenderOptions) -> Self {
        Self {
            style,
            geometry,
            options,
        }
    }

    pub fn width(&self) -> Length {
        self.geometry.content_width
    }

    /// Format `instant` with the configured pattern. Falls back to RFC 3339
    /// if the pattern cannot be rendered.
    pub fn timestamp(&self, instant: DateTime<Utc>) -> String {
        let mut out = String::new();
        if write!(out, "{}", instant.format(&self.options.datetime_format)).is_err() {
            return instant.to_rfc3339();
        }
        out
    }

    /// Section heading that stays with whatever follows it.
    pub(crate) fn heading(&self, text: &str) -> Row {
        Row::text(
            self.style,
            RowKind::Heading,
            StyleRole::Heading,
            text,
            self.width(),
            Align::Left,
        )
        .keep_with_next()
    }

    /// One row of a table: one wrapped cell per column.
    pub(crate) fn table_row(
        &self,
        kind: RowKind,
        role: StyleRole,
        columns: &[Column],
        texts: &[&str],
    ) -> Row {
        let cells = columns
            .iter()
            .zip(texts)
            .map(|(column, text)| {
                Cell::wrapped(self.style, role, text, column.x, column.width, column.align)
            })
            .collect();
        Row::new(self.style, kind, role, cells)
    }
}

/// A table column after its share of the content width is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub x: Length,
    pub width: Length,
    pub align: Align,
}

/// Split `width` into columns by per-mille shares. The last column takes
/// whatever rounding leaves over so the columns always span the full width.
pub(crate) fn columns(width: Length, shares: &[(i64, Align)]) -> Vec<Column> {
    let mut x = Length::ZERO;
    let last = shares.len().saturating_sub(1);
    shares
        .iter()
        .enumerate()
        .map(|(index, &(share, align))| {
            let column_width = if index == last {
                width - x
            } else {
                Length::from_millipoints(width.millipoints() * share / 1000)
            };
            let column = Column {
                x,
                width: column_width,
                align,
            };
            x += column_width;
            column
        })
        .collect()
}

/// Build every section in document order.
pub fn build_sections(model: &ReportModel, ctx: &SectionContext<'_>) -> Vec<Section> {
    let mut sections = vec![cover::build(model, ctx), summary::build(model, ctx)];
    if !model.is_empty() {
        sections.push(detail::build(model, ctx));
    }
    if ctx.options.sections.signatures {
        sections.push(signatures::build(model, ctx));
    }
    sections
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::config::{PageConfig, PageGeometry, RenderOptions};
    use crate::model::{DateRange, ReportModel};
    use ar_common::{ActivityFields, ActivityRecord};
    use chrono::{DateTime, TimeZone, Utc};

    pub fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 14, hour, minute, 0).unwrap()
    }

    pub fn activity(id: &str, title: &str, category: &str, start: (u32, u32), end: (u32, u32)) -> ActivityRecord {
        ActivityRecord::create(ActivityFields {
            id: id.into(),
            title: title.to_string(),
            description: String::new(),
            category: category.to_string(),
            start_time: at(start.0, start.1),
            end_time: at(end.0, end.1),
        })
        .unwrap()
    }

    pub fn model(activities: Vec<ActivityRecord>) -> ReportModel {
        ReportModel::build(
            "Weekly report",
            "Dana",
            at(18, 0),
            DateRange::new(at(0, 0), at(23, 59)).unwrap(),
            activities,
        )
        .unwrap()
    }

    pub fn geometry() -> PageGeometry {
        PageConfig::default().geometry().unwrap()
    }

    pub fn options() -> RenderOptions {
        RenderOptions::default()
    }
}
