//! Summary: per-category totals and, optionally, activity statistics.

use super::{columns, Column, SectionContext};
use crate::layout::{Align, FlowItem, Row, RowKind, Section, SectionKind, Table};
use crate::model::ReportModel;
use crate::style::StyleRole;
use ar_common::{format_duration, ActivityRecord};

const CATEGORY_COLUMNS: [(i64, Align); 3] = [
    (500, Align::Left),
    (200, Align::Right),
    (300, Align::Right),
];

const STATISTICS_COLUMNS: [(i64, Align); 2] = [(350, Align::Left), (650, Align::Left)];

pub fn build(model: &ReportModel, ctx: &SectionContext<'_>) -> Section {
    let mut section = Section::new(SectionKind::Summary);
    section.push(FlowItem::Row(ctx.heading("Summary")));
    section.push(FlowItem::Table(category_table(model, ctx)));

    if ctx.options.sections.statistics {
        for row in statistics_rows(model, ctx) {
            section.push(FlowItem::Row(row));
        }
    }
    section
}

fn category_table(model: &ReportModel, ctx: &SectionContext<'_>) -> Table {
    let cols = columns(ctx.width(), &CATEGORY_COLUMNS);
    let aggregates = model.aggregates();

    let header = ctx
        .table_row(
            RowKind::TableHeader,
            StyleRole::TableHeader,
            &cols,
            &["Category", "Count", "Total"],
        )
        .with_rule_below(StyleRole::TableHeader);

    let mut rows: Vec<Row> = aggregates
        .per_category
        .iter()
        .enumerate()
        .map(|(index, total)| {
            let count = total.count.to_string();
            let duration = format_duration(total.total_duration);
            let row = ctx.table_row(
                RowKind::Data,
                StyleRole::TableRow,
                &cols,
                &[total.category.as_str(), count.as_str(), duration.as_str()],
            );
            if index % 2 == 1 {
                row.with_band(StyleRole::AltRow)
            } else {
                row
            }
        })
        .collect();

    let count = aggregates.activity_count.to_string();
    let duration = format_duration(aggregates.total_duration);
    rows.push(
        ctx.table_row(
            RowKind::Total,
            StyleRole::TableHeader,
            &cols,
            &["Total", count.as_str(), duration.as_str()],
        )
        .with_rule_below(StyleRole::TableHeader),
    );

    Table { header, rows }
}

fn describe(activity: Option<&ActivityRecord>) -> String {
    match activity {
        Some(activity) => format!(
            "{} ({})",
            activity.title(),
            format_duration(activity.duration())
        ),
        None => "-".to_string(),
    }
}

fn statistics_rows(model: &ReportModel, ctx: &SectionContext<'_>) -> Vec<Row> {
    let cols: Vec<Column> = columns(ctx.width(), &STATISTICS_COLUMNS);
    let stats = model.statistics();

    let entries = [
        ("Activities", stats.activity_count.to_string()),
        ("Total duration", format_duration(stats.total_duration)),
        ("Average duration", format_duration(stats.average_duration)),
        ("Longest activity", describe(stats.longest.as_ref())),
        ("Shortest activity", describe(stats.shortest.as_ref())),
    ];

    entries
        .iter()
        .map(|(label, value)| {
            ctx.table_row(RowKind::Text, StyleRole::TableRow, &cols, &[*label, value.as_str()])
        })
        .collect()
}
