//! Detail section: one table row per activity, in start order.

use super::{columns, Column, SectionContext};
use crate::layout::{Align, Cell, FlowItem, Row, RowKind, Section, SectionKind, Table};
use crate::model::ReportModel;
use crate::style::StyleRole;
use crate::units::Length;
use ar_common::{format_duration, ActivityRecord};

const DETAIL_COLUMNS: [(i64, Align); 5] = [
    (300, Align::Left),
    (160, Align::Left),
    (190, Align::Left),
    (190, Align::Left),
    (160, Align::Right),
];

const HEADERS: [&str; 5] = ["Title", "Category", "Start", "End", "Duration"];

/// Starts on a fresh page. The caller skips this section for empty models.
pub fn build(model: &ReportModel, ctx: &SectionContext<'_>) -> Section {
    let cols = columns(ctx.width(), &DETAIL_COLUMNS);
    let activities = model.sorted_activities();

    let header = ctx
        .table_row(RowKind::TableHeader, StyleRole::TableHeader, &cols, &HEADERS)
        .with_rule_below(StyleRole::TableHeader);

    let rows = activities
        .iter()
        .enumerate()
        .map(|(index, activity)| {
            let row = activity_row(activity, &cols, ctx);
            if index % 2 == 1 {
                row.with_band(StyleRole::AltRow)
            } else {
                row
            }
        })
        .collect();

    let mut section = Section::new(SectionKind::Detail);
    section.push(FlowItem::PageBreak);
    section.push(FlowItem::Row(
        ctx.heading(&format!("Activities ({})", activities.len())),
    ));
    section.push(FlowItem::Table(Table { header, rows }));
    section
}

fn activity_row(activity: &ActivityRecord, cols: &[Column], ctx: &SectionContext<'_>) -> Row {
    let start = ctx.timestamp(activity.start_time());
    let end = ctx.timestamp(activity.end_time());
    let duration = format_duration(activity.duration());
    let texts = [
        activity.title(),
        activity.category(),
        start.as_str(),
        end.as_str(),
        duration.as_str(),
    ];

    let mut cells: Vec<Cell> = cols
        .iter()
        .zip(texts)
        .map(|(column, text)| {
            Cell::wrapped(
                ctx.style,
                StyleRole::TableRow,
                text,
                column.x,
                column.width,
                column.align,
            )
        })
        .collect();

    let description = activity.description().trim();
    if ctx.options.sections.descriptions && !description.is_empty() {
        let offset = cells
            .iter()
            .map(|cell| cell.bottom(ctx.style))
            .max()
            .unwrap_or(Length::ZERO);
        cells.push(
            Cell::wrapped(
                ctx.style,
                StyleRole::TableRow,
                description,
                Length::ZERO,
                ctx.width(),
                Align::Left,
            )
            .below(offset),
        );
    }

    Row::new(ctx.style, RowKind::Data, StyleRole::TableRow, cells)
}
