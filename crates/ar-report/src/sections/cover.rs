//! Cover block: title, author, generation time and reporting period.

use super::SectionContext;
use crate::layout::{Align, Cell, FlowItem, Row, RowKind, Section, SectionKind};
use crate::model::ReportModel;
use crate::style::StyleRole;
use crate::units::Length;

/// The cover is a single unsplittable block; it has to fit on page 1.
pub fn build(model: &ReportModel, ctx: &SectionContext<'_>) -> Section {
    let width = ctx.width();
    let range = model.range();

    let mut lines = vec![(StyleRole::Title, model.title().to_string())];
    if !model.author().trim().is_empty() {
        lines.push((StyleRole::TableRow, format!("Prepared by {}", model.author())));
    }
    lines.push((
        StyleRole::Footer,
        format!("Generated {}", ctx.timestamp(model.generated_at())),
    ));
    lines.push((
        StyleRole::Footer,
        format!(
            "Period {} to {}",
            ctx.timestamp(range.start()),
            ctx.timestamp(range.end())
        ),
    ));

    let mut offset = Length::ZERO;
    let cells = lines
        .into_iter()
        .map(|(role, text)| {
            let cell = Cell::wrapped(ctx.style, role, &text, Length::ZERO, width, Align::Center)
                .below(offset);
            offset = cell.bottom(ctx.style);
            cell
        })
        .collect();

    let block = Row::new(ctx.style, RowKind::Block, StyleRole::Title, cells)
        .with_rule_below(StyleRole::Footer);

    let mut section = Section::new(SectionKind::Cover);
    section.push(FlowItem::Row(block));
    section
}
