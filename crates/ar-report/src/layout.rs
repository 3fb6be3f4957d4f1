//! Measured rows and the greedy paginator.
//!
//! Sections are flattened into [`FlowItem`]s whose heights are fixed when
//! they are built. [`paginate`] is the dry pass: it assigns every row a page
//! and a vertical offset without producing any output, so the total page
//! count is known before a single byte of PDF is written.

use crate::error::RenderError;
use crate::metrics::{self, Font};
use crate::style::{StyleRole, StyleSheet};
use crate::units::Length;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Horizontal padding inside every cell, on each side.
pub const CELL_PADDING: f64 = 3.0;

/// The report's sections, in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Cover,
    Summary,
    Detail,
    Signatures,
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SectionKind::Cover => "cover",
            SectionKind::Summary => "summary",
            SectionKind::Detail => "detail",
            SectionKind::Signatures => "signatures",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// What a row is, for drawing and for inspection in tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    /// Unsplittable multi-line block (cover, signatures).
    Block,
    Heading,
    TableHeader,
    Data,
    /// Grand-total row of a table.
    Total,
    /// Free-standing line of text.
    Text,
}

/// Wrapped text placed inside a row. Offsets are relative to the row.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub x: Length,
    pub width: Length,
    /// Distance from the top of the row's text area to the first line.
    pub top: Length,
    pub lines: Vec<String>,
    pub role: StyleRole,
    pub align: Align,
}

impl Cell {
    /// Wrap `text` to fit `width` (minus padding) in the role's font.
    pub fn wrapped(
        style: &StyleSheet,
        role: StyleRole,
        text: &str,
        x: Length,
        width: Length,
        align: Align,
    ) -> Self {
        let token = style.resolve(role);
        let padding = Length::from_pt(CELL_PADDING) * 2;
        let room = if width > padding { width - padding } else { width };
        Cell {
            x,
            width,
            top: Length::ZERO,
            lines: metrics::wrap(text, Font::of(token), token.size, room),
            role,
            align,
        }
    }

    /// Push the cell down by `offset` within its row.
    pub fn below(mut self, offset: Length) -> Self {
        self.top = offset;
        self
    }

    /// Bottom edge of the cell's last line, relative to the row's text area.
    pub fn bottom(&self, style: &StyleSheet) -> Length {
        self.top + metrics::line_height(style.resolve(self.role)) * self.lines.len() as i64
    }
}

/// A horizontal strip that is never split across pages.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub kind: RowKind,
    /// Role whose spacing pads the row.
    pub role: StyleRole,
    pub cells: Vec<Cell>,
    pub height: Length,
    /// Fill the row's background with this role's color.
    pub band: Option<StyleRole>,
    /// Draw a rule under the row in this role's color.
    pub rule_below: Option<StyleRole>,
    /// Move to the next page together with the following unit.
    pub keep_with_next: bool,
}

impl Row {
    /// Build a row and measure it: the tallest cell plus the role's spacing.
    pub fn new(style: &StyleSheet, kind: RowKind, role: StyleRole, cells: Vec<Cell>) -> Self {
        let text_height = cells
            .iter()
            .map(|cell| cell.bottom(style))
            .max()
            .unwrap_or(Length::ZERO);
        let height = text_height + Length::from_pt(style.resolve(role).spacing);
        Row {
            kind,
            role,
            cells,
            height,
            band: None,
            rule_below: None,
            keep_with_next: false,
        }
    }

    /// Single full-width cell.
    pub fn text(
        style: &StyleSheet,
        kind: RowKind,
        role: StyleRole,
        text: &str,
        width: Length,
        align: Align,
    ) -> Self {
        let cell = Cell::wrapped(style, role, text, Length::ZERO, width, align);
        Row::new(style, kind, role, vec![cell])
    }

    pub fn with_band(mut self, role: StyleRole) -> Self {
        self.band = Some(role);
        self
    }

    pub fn with_rule_below(mut self, role: StyleRole) -> Self {
        self.rule_below = Some(role);
        self
    }

    pub fn keep_with_next(mut self) -> Self {
        self.keep_with_next = true;
        self
    }

    /// Concatenated text of every cell, for inspection.
    pub fn text_content(&self) -> String {
        self.cells
            .iter()
            .flat_map(|cell| cell.lines.iter())
            .filter(|line| !line.is_empty())
            .cloned()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// A header row repeated on every page the table touches, plus data rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub header: Row,
    pub rows: Vec<Row>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FlowItem {
    Row(Row),
    Table(Table),
    /// Start a new page unless the current one is still empty.
    PageBreak,
}

impl FlowItem {
    /// Height that must fit for this item to start on the current page.
    fn lead_height(&self) -> Length {
        match self {
            FlowItem::Row(row) => row.height,
            FlowItem::Table(table) => {
                table.header.height + table.rows.first().map_or(Length::ZERO, |r| r.height)
            }
            FlowItem::PageBreak => Length::ZERO,
        }
    }
}

/// A laid-out but unpaginated section.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub kind: SectionKind,
    pub items: Vec<FlowItem>,
}

impl Section {
    pub fn new(kind: SectionKind) -> Self {
        Section {
            kind,
            items: Vec::new(),
        }
    }

    pub fn push(&mut self, item: FlowItem) {
        self.items.push(item);
    }
}

/// A row with its final position.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedRow {
    pub section: SectionKind,
    /// Offset of the row's top from the top of the content area.
    pub y: Length,
    pub row: Row,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PageLayout {
    pub rows: Vec<PlacedRow>,
    pub used: Length,
}

impl PageLayout {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Whether any row of `section` landed on this page.
    pub fn has_section(&self, section: SectionKind) -> bool {
        self.rows.iter().any(|placed| placed.section == section)
    }
}

/// Result of the dry pass: every row assigned to a page.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub pages: Vec<PageLayout>,
    pub max_content_height: Length,
}

impl Layout {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// 1-based numbers of the pages carrying rows of `section`.
    pub fn pages_with(&self, section: SectionKind) -> Vec<usize> {
        self.pages
            .iter()
            .enumerate()
            .filter(|(_, page)| page.has_section(section))
            .map(|(index, _)| index + 1)
            .collect()
    }
}

struct Paginator {
    max: Length,
    pages: Vec<PageLayout>,
    current: PageLayout,
}

impl Paginator {
    fn new(max: Length) -> Self {
        Paginator {
            max,
            pages: Vec::new(),
            current: PageLayout::default(),
        }
    }

    fn fits(&self, height: Length) -> bool {
        self.current.used + height <= self.max
    }

    fn break_page(&mut self) {
        debug!(
            page = self.pages.len() + 1,
            used = %self.current.used,
            "Closing page"
        );
        let full = std::mem::take(&mut self.current);
        self.pages.push(full);
    }

    /// Open a new page if `height` does not fit and the page has content.
    fn ensure_room(&mut self, height: Length) {
        if !self.fits(height) && !self.current.is_empty() {
            self.break_page();
        }
    }

    fn place(&mut self, section: SectionKind, row: Row) {
        let y = self.current.used;
        self.current.used += row.height;
        self.current.rows.push(PlacedRow { section, y, row });
    }

    fn too_tall(&self, section: SectionKind, index: usize, height: Length) -> RenderError {
        RenderError::RowTooTall {
            section,
            index,
            height,
            max: self.max,
        }
    }

    fn place_table(&mut self, section: SectionKind, table: Table) -> Result<(), RenderError> {
        let Table { header, rows } = table;

        if rows.is_empty() {
            if header.height > self.max {
                return Err(self.too_tall(section, 0, header.height));
            }
            self.ensure_room(header.height);
            self.place(section, header);
            return Ok(());
        }

        let mut header_on_page = false;
        for (index, row) in rows.into_iter().enumerate() {
            let unit = header.height + row.height;
            if unit > self.max {
                return Err(self.too_tall(section, index, unit));
            }

            if header_on_page && !self.fits(row.height) {
                self.break_page();
                header_on_page = false;
            }
            if !header_on_page {
                self.ensure_room(unit);
                if index > 0 {
                    debug!(%section, row = index, "Repeating table header");
                }
                self.place(section, header.clone());
                header_on_page = true;
            }
            self.place(section, row);
        }
        Ok(())
    }

    fn finish(mut self) -> Vec<PageLayout> {
        if !self.current.is_empty() || self.pages.is_empty() {
            self.pages.push(self.current);
        }
        self.pages
    }
}

/// Distribute `sections` over pages holding at most `max_content_height` each.
///
/// Rows are placed greedily while `used + height <= max_content_height`.
/// Table headers are repeated at the top of every continuation page and a
/// row flagged `keep_with_next` moves along with the start of the next item
/// whenever both can share a page. Always yields at least one page.
pub fn paginate(sections: Vec<Section>, max_content_height: Length) -> Result<Layout, RenderError> {
    if !max_content_height.is_positive() {
        return Err(RenderError::InvalidPageConfig(format!(
            "max_content_height must be positive, got {max_content_height}"
        )));
    }

    let mut paginator = Paginator::new(max_content_height);

    for section in sections {
        let kind = section.kind;
        let mut items = section.items.into_iter().peekable();
        let mut row_index = 0;

        while let Some(item) = items.next() {
            match item {
                FlowItem::PageBreak => {
                    if !paginator.current.is_empty() {
                        paginator.break_page();
                    }
                }
                FlowItem::Row(row) => {
                    if row.height > max_content_height {
                        return Err(paginator.too_tall(kind, row_index, row.height));
                    }
                    let mut needed = row.height;
                    if row.keep_with_next {
                        let together = needed + items.peek().map_or(Length::ZERO, FlowItem::lead_height);
                        if together <= max_content_height {
                            needed = together;
                        }
                    }
                    paginator.ensure_room(needed);
                    paginator.place(kind, row);
                    row_index += 1;
                }
                FlowItem::Table(table) => paginator.place_table(kind, table)?,
            }
        }
    }

    let pages = paginator.finish();
    debug!(pages = pages.len(), "Pagination complete");
    Ok(Layout {
        pages,
        max_content_height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::StyleToken;

    fn style() -> StyleSheet {
        StyleSheet::standard()
    }

    /// Row of an exact height, independent of font metrics.
    fn fixed(kind: RowKind, points: f64) -> Row {
        Row {
            kind,
            role: StyleRole::TableRow,
            cells: Vec::new(),
            height: Length::from_pt(points),
            band: None,
            rule_below: None,
            keep_with_next: false,
        }
    }

    fn table(rows: usize) -> Table {
        Table {
            header: fixed(RowKind::TableHeader, 20.0),
            rows: (0..rows).map(|_| fixed(RowKind::Data, 10.0)).collect(),
        }
    }

    fn section(kind: SectionKind, items: Vec<FlowItem>) -> Section {
        Section { kind, items }
    }

    #[test]
    fn test_row_measurement_uses_role_token() {
        let style = style();
        let row = Row::text(
            &style,
            RowKind::Text,
            StyleRole::TableRow,
            "short",
            Length::from_pt(400.0),
            Align::Left,
        );
        // 10pt * 1.2 + 6pt spacing
        assert_eq!(row.height, Length::from_pt(18.0));

        let tall = StyleSheet::merge(
            &style,
            &StyleSheet::new().with_role(
                StyleRole::TableRow,
                StyleToken::new(20.0, crate::style::Color::BLACK).with_spacing(0.0),
            ),
        );
        let row = Row::text(
            &tall,
            RowKind::Text,
            StyleRole::TableRow,
            "short",
            Length::from_pt(400.0),
            Align::Left,
        );
        assert_eq!(row.height, Length::from_pt(24.0));
    }

    #[test]
    fn test_wrapped_cells_grow_the_row() {
        let style = style();
        let narrow = Row::text(
            &style,
            RowKind::Text,
            StyleRole::TableRow,
            "a fairly long sentence that cannot fit into a narrow column",
            Length::from_pt(60.0),
            Align::Left,
        );
        assert!(narrow.cells[0].lines.len() > 1);
        assert_eq!(
            narrow.height,
            Length::from_pt(12.0) * narrow.cells[0].lines.len() as i64 + Length::from_pt(6.0)
        );
    }

    #[test]
    fn test_rows_fill_page_exactly() {
        let rows = (0..10)
            .map(|_| FlowItem::Row(fixed(RowKind::Text, 10.0)))
            .collect();
        let layout = paginate(
            vec![section(SectionKind::Summary, rows)],
            Length::from_pt(50.0),
        )
        .unwrap();
        assert_eq!(layout.page_count(), 2);
        assert_eq!(layout.pages[0].rows.len(), 5);
        assert_eq!(layout.pages[0].used, Length::from_pt(50.0));
    }

    #[test]
    fn test_table_header_repeats_on_continuation_pages() {
        // 20 header + 3 * 10 rows = 50 per page
        let layout = paginate(
            vec![section(SectionKind::Detail, vec![FlowItem::Table(table(7))])],
            Length::from_pt(50.0),
        )
        .unwrap();
        assert_eq!(layout.page_count(), 3);
        for page in &layout.pages {
            assert_eq!(page.rows[0].row.kind, RowKind::TableHeader);
            assert_eq!(page.rows[0].y, Length::ZERO);
        }
        let data: usize = layout
            .pages
            .iter()
            .map(|p| p.rows.iter().filter(|r| r.row.kind == RowKind::Data).count())
            .sum();
        assert_eq!(data, 7);
    }

    #[test]
    fn test_header_is_not_orphaned() {
        let layout = paginate(
            vec![section(
                SectionKind::Summary,
                vec![
                    FlowItem::Row(fixed(RowKind::Text, 25.0)),
                    FlowItem::Table(table(2)),
                ],
            )],
            Length::from_pt(50.0),
        )
        .unwrap();
        // 25 + 20 header fits but header + first row does not.
        assert_eq!(layout.pages[0].rows.len(), 1);
        assert_eq!(layout.pages[1].rows[0].row.kind, RowKind::TableHeader);
    }

    #[test]
    fn test_heading_keeps_with_table() {
        let layout = paginate(
            vec![section(
                SectionKind::Detail,
                vec![
                    FlowItem::Row(fixed(RowKind::Text, 15.0)),
                    FlowItem::Row(fixed(RowKind::Heading, 10.0).keep_with_next()),
                    FlowItem::Table(table(1)),
                ],
            )],
            Length::from_pt(50.0),
        )
        .unwrap();
        assert_eq!(layout.page_count(), 2);
        assert_eq!(layout.pages[1].rows[0].row.kind, RowKind::Heading);
    }

    #[test]
    fn test_page_break_skips_empty_pages() {
        let layout = paginate(
            vec![
                section(SectionKind::Cover, vec![FlowItem::PageBreak]),
                section(
                    SectionKind::Summary,
                    vec![
                        FlowItem::Row(fixed(RowKind::Text, 10.0)),
                        FlowItem::PageBreak,
                        FlowItem::PageBreak,
                        FlowItem::Row(fixed(RowKind::Text, 10.0)),
                    ],
                ),
            ],
            Length::from_pt(50.0),
        )
        .unwrap();
        assert_eq!(layout.page_count(), 2);
    }

    #[test]
    fn test_row_too_tall() {
        let err = paginate(
            vec![section(
                SectionKind::Cover,
                vec![FlowItem::Row(fixed(RowKind::Block, 60.0))],
            )],
            Length::from_pt(50.0),
        )
        .unwrap_err();
        assert_eq!(
            err,
            RenderError::RowTooTall {
                section: SectionKind::Cover,
                index: 0,
                height: Length::from_pt(60.0),
                max: Length::from_pt(50.0),
            }
        );
    }

    #[test]
    fn test_data_row_too_tall_with_header() {
        let mut t = table(3);
        t.rows[1] = fixed(RowKind::Data, 35.0);
        let err = paginate(
            vec![section(SectionKind::Detail, vec![FlowItem::Table(t)])],
            Length::from_pt(50.0),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            RenderError::RowTooTall {
                section: SectionKind::Detail,
                index: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_empty_input_still_has_one_page() {
        let layout = paginate(vec![], Length::from_pt(50.0)).unwrap();
        assert_eq!(layout.page_count(), 1);
        assert!(layout.pages[0].is_empty());
    }

    #[test]
    fn test_non_positive_height_is_rejected() {
        let err = paginate(vec![], Length::ZERO).unwrap_err();
        assert!(matches!(err, RenderError::InvalidPageConfig(_)));
    }

    #[test]
    fn test_pages_with_section() {
        let layout = paginate(
            vec![
                section(SectionKind::Cover, vec![FlowItem::Row(fixed(RowKind::Block, 40.0))]),
                section(SectionKind::Summary, vec![FlowItem::Table(table(2))]),
            ],
            Length::from_pt(50.0),
        )
        .unwrap();
        assert_eq!(layout.pages_with(SectionKind::Cover), vec![1]);
        assert_eq!(layout.pages_with(SectionKind::Summary), vec![2]);
    }
}
