//! Signature lines closing the report.

use super::{columns, SectionContext};
use crate::layout::{Align, Cell, FlowItem, Row, RowKind, Section, SectionKind};
use crate::model::ReportModel;
use crate::style::StyleRole;
use crate::units::Length;

const SIGNATURE_LINE: &str = "______________________________";
const DATE_LINE: &str = "Date: _______________";

/// Gap above the signature lines.
const LEAD: f64 = 36.0;

pub fn build(model: &ReportModel, ctx: &SectionContext<'_>) -> Section {
    let cols = columns(ctx.width(), &[(500, Align::Center), (500, Align::Center)]);
    let author = if model.author().trim().is_empty() {
        "Author".to_string()
    } else {
        model.author().to_string()
    };

    let mut cells = Vec::new();
    for (column, name) in cols.iter().zip([author.as_str(), "Reviewer"]) {
        let mut offset = Length::from_pt(LEAD);
        for (role, text) in [
            (StyleRole::TableRow, SIGNATURE_LINE),
            (StyleRole::TableHeader, name),
            (StyleRole::TableRow, DATE_LINE),
        ] {
            let cell = Cell::wrapped(ctx.style, role, text, column.x, column.width, column.align)
                .below(offset);
            offset = cell.bottom(ctx.style);
            cells.push(cell);
        }
    }

    let mut section = Section::new(SectionKind::Signatures);
    section.push(FlowItem::Row(Row::new(
        ctx.style,
        RowKind::Block,
        StyleRole::TableRow,
        cells,
    )));
    section
}
