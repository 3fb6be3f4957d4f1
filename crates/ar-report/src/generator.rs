//! Report renderer: validation, layout and PDF emission.

use crate::config::{PageConfig, PageGeometry, RenderOptions, ReportConfig};
use crate::error::Result;
use crate::layout::{paginate, Align, Layout, PlacedRow, CELL_PADDING};
use crate::metrics::{self, Font};
use crate::model::ReportModel;
use crate::output::write_atomic;
use crate::pdf::{ContentStreamBuilder, DocumentInfo, PdfWriter};
use crate::sections::{build_sections, SectionContext};
use crate::style::{StyleRole, StyleSheet};
use crate::units::Length;
use std::path::Path;
use tracing::{debug, info, warn};

/// Baseline position within a line box, as a multiple of the font size.
const BASELINE_FACTOR: f64 = 0.85;

/// Width of table and footer rules in points.
const RULE_WIDTH: f64 = 0.5;

/// Turns a [`ReportModel`] into PDF bytes.
///
/// Holds no state between renders; the same renderer can be reused for any
/// number of models.
#[derive(Debug, Clone)]
pub struct ReportRenderer<'a> {
    style: &'a StyleSheet,
    page: &'a PageConfig,
    options: RenderOptions,
}

impl<'a> ReportRenderer<'a> {
    /// Create a renderer with default [`RenderOptions`].
    pub fn new(style: &'a StyleSheet, page: &'a PageConfig) -> Self {
        Self {
            style,
            page,
            options: RenderOptions::default(),
        }
    }

    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Check style, options and page before any layout happens.
    fn prepare(&self) -> Result<PageGeometry> {
        self.style.validate()?;
        self.options.validate()?;

        let missing = self.style.missing_roles();
        if !missing.is_empty() {
            let roles: Vec<&str> = missing.iter().map(StyleRole::as_str).collect();
            warn!(
                roles = %roles.join(", "),
                "Style sheet is missing roles, using the default token"
            );
        }

        Ok(self.page.geometry()?)
    }

    fn layout_with(&self, model: &ReportModel, geometry: &PageGeometry) -> Result<Layout> {
        let ctx = SectionContext::new(self.style, geometry, &self.options);
        let sections = build_sections(model, &ctx);
        debug!(
            sections = sections.len(),
            activities = model.activities().len(),
            max_content_height = %geometry.max_content_height,
            "Laying out report"
        );
        Ok(paginate(sections, geometry.max_content_height)?)
    }

    /// Run the layout pass only.
    pub fn layout(&self, model: &ReportModel) -> Result<Layout> {
        let geometry = self.prepare()?;
        self.layout_with(model, &geometry)
    }

    /// Lay out and emit the complete document.
    pub fn render(&self, model: &ReportModel) -> Result<Vec<u8>> {
        let geometry = self.prepare()?;
        let layout = self.layout_with(model, &geometry)?;
        let page_count = layout.page_count();

        let painter = PagePainter {
            style: self.style,
            geometry: &geometry,
        };
        let mut writer = PdfWriter::new();
        for (index, page) in layout.pages.iter().enumerate() {
            let mut content = ContentStreamBuilder::new();
            for placed in &page.rows {
                painter.row(&mut content, placed);
            }
            if self.options.running_header {
                painter.running_header(&mut content, model.title());
            }
            painter.footer(&mut content, index + 1, page_count);
            debug!(page = index + 1, rows = page.rows.len(), "Emitting page");
            writer.add_page(
                geometry.width.as_pt(),
                geometry.height.as_pt(),
                content.finish(),
            );
        }

        let bytes = writer.finish(&DocumentInfo {
            title: model.title().to_string(),
            author: model.author().to_string(),
            created: model.generated_at(),
        });

        info!(
            bytes = bytes.len(),
            pages = page_count,
            title = %model.title(),
            "Report generated"
        );
        Ok(bytes)
    }
}

/// Draws placed rows and page furniture in PDF coordinates.
struct PagePainter<'a> {
    style: &'a StyleSheet,
    geometry: &'a PageGeometry,
}

impl PagePainter<'_> {
    fn content_top(&self) -> Length {
        self.geometry.height - self.geometry.margin_top
    }

    fn content_right(&self) -> Length {
        self.geometry.margin_left + self.geometry.content_width
    }

    fn rule(&self, content: &mut ContentStreamBuilder, role: StyleRole, y: Length) {
        content
            .save()
            .stroke_color(self.style.resolve(role).color)
            .line(
                self.geometry.margin_left.as_pt(),
                y.as_pt(),
                self.content_right().as_pt(),
                y.as_pt(),
                RULE_WIDTH,
            )
            .restore();
    }

    fn row(&self, content: &mut ContentStreamBuilder, placed: &PlacedRow) {
        let row = &placed.row;
        let top = self.content_top() - placed.y;
        let bottom = top - row.height;

        if let Some(band) = row.band {
            content
                .save()
                .fill_color(self.style.resolve(band).color)
                .fill_rect(
                    self.geometry.margin_left.as_pt(),
                    bottom.as_pt(),
                    self.geometry.content_width.as_pt(),
                    row.height.as_pt(),
                )
                .restore();
        }

        let text_top = top - Length::from_pt(self.style.resolve(row.role).spacing).half();
        let padding = Length::from_pt(CELL_PADDING);
        for cell in &row.cells {
            let token = self.style.resolve(cell.role);
            let font = Font::of(token);
            let line_height = metrics::line_height(token);
            let left = self.geometry.margin_left + cell.x;

            content.fill_color(token.color);
            for (index, line) in cell.lines.iter().enumerate() {
                if line.is_empty() {
                    continue;
                }
                let width = font.text_width(line, token.size);
                let x = match cell.align {
                    Align::Left => left + padding,
                    Align::Right => left + cell.width - padding - width,
                    Align::Center => left + (cell.width - width).half(),
                };
                let baseline = text_top
                    - cell.top
                    - line_height * index as i64
                    - Length::from_pt(token.size * BASELINE_FACTOR);
                content.text(font, token.size, x.as_pt(), baseline.as_pt(), line);
            }
        }

        if let Some(role) = row.rule_below {
            self.rule(content, role, bottom);
        }
    }

    fn running_header(&self, content: &mut ContentStreamBuilder, title: &str) {
        let token = self.style.resolve(StyleRole::Footer);
        let font = Font::of(token);
        let line = metrics::wrap(title, font, token.size, self.geometry.content_width)
            .into_iter()
            .next()
            .unwrap_or_default();
        let baseline = self.geometry.height - self.geometry.margin_top.half();

        content.fill_color(token.color).text(
            font,
            token.size,
            self.geometry.margin_left.as_pt(),
            baseline.as_pt(),
            &line,
        );
    }

    fn footer(&self, content: &mut ContentStreamBuilder, page: usize, page_count: usize) {
        let token = self.style.resolve(StyleRole::Footer);
        let font = Font::of(token);
        let text = format!("Page {page} of {page_count}");
        let width = font.text_width(&text, token.size);
        let baseline = self.geometry.margin_bottom.half();

        self.rule(
            content,
            StyleRole::Footer,
            baseline + metrics::line_height(token),
        );
        content.fill_color(token.color).text(
            font,
            token.size,
            (self.content_right() - width).as_pt(),
            baseline.as_pt(),
            &text,
        );
    }
}

/// Render `model` to PDF bytes with default options.
pub fn render(model: &ReportModel, style: &StyleSheet, page_config: &PageConfig) -> Result<Vec<u8>> {
    ReportRenderer::new(style, page_config).render(model)
}

/// Render `model` and atomically write the PDF to `output_path`.
///
/// Nothing is written unless rendering succeeds; an existing file at
/// `output_path` survives any failure untouched.
pub fn generate_report(
    model: &ReportModel,
    style: &StyleSheet,
    page_config: &PageConfig,
    output_path: impl AsRef<Path>,
) -> Result<()> {
    let bytes = render(model, style, page_config)?;
    write_atomic(output_path.as_ref(), &bytes)
}

/// Like [`generate_report`], with page, style and options from a
/// [`ReportConfig`]. The configured style is merged over the standard sheet.
pub fn generate_report_with(
    model: &ReportModel,
    config: &ReportConfig,
    output_path: impl AsRef<Path>,
) -> Result<()> {
    let style = config.resolved_style();
    let bytes = ReportRenderer::new(&style, &config.page)
        .with_options(config.options.clone())
        .render(model)?;
    write_atomic(output_path.as_ref(), &bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{RenderError, ReportError};
    use crate::layout::{RowKind, SectionKind};
    use crate::model::DateRange;
    use crate::style::{Color, StyleToken};
    use ar_common::{ActivityFields, ActivityRecord};
    use chrono::{DateTime, TimeZone, Utc};

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 14, hour, minute, 0).unwrap()
    }

    fn activity(id: &str, title: &str, category: &str, start: (u32, u32), end: (u32, u32)) -> ActivityRecord {
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

    fn text(bytes: &[u8]) -> String {
        String::from_utf8_lossy(bytes).into_owned()
    }

    #[test]
    fn test_render_produces_pdf() {
        let style = StyleSheet::standard();
        let page = PageConfig::default();
        let model = model(vec![
            activity("a", "A", "work", (9, 0), (10, 0)),
            activity("b", "B", "break", (8, 0), (8, 30)),
        ]);

        let bytes = render(&model, &style, &page).unwrap();
        let pdf = text(&bytes);
        assert!(pdf.starts_with("%PDF-1.4"));
        assert!(pdf.contains("/Count 2"));
        assert!(pdf.contains("(Page 1 of 2) Tj"));
        assert!(pdf.contains("(Page 2 of 2) Tj"));
        assert!(pdf.contains("(Activities \\(2\\)) Tj"));
    }

    #[test]
    fn test_empty_model_is_one_page() {
        let style = StyleSheet::standard();
        let page = PageConfig::default();
        let layout = ReportRenderer::new(&style, &page)
            .layout(&model(vec![]))
            .unwrap();

        assert_eq!(layout.page_count(), 1);
        assert!(layout.pages_with(SectionKind::Detail).is_empty());
        assert_eq!(layout.pages_with(SectionKind::Summary), vec![1]);
    }

    #[test]
    fn test_running_header_can_be_disabled() {
        let style = StyleSheet::standard();
        let page = PageConfig::default();
        let model = model(vec![]);

        let with = ReportRenderer::new(&style, &page).render(&model).unwrap();
        let options = RenderOptions {
            running_header: false,
            ..RenderOptions::default()
        };
        let without = ReportRenderer::new(&style, &page)
            .with_options(options)
            .render(&model)
            .unwrap();

        let count = |bytes: &[u8]| text(bytes).matches("(Weekly report) Tj").count();
        assert_eq!(count(&with), 2);
        assert_eq!(count(&without), 1);
    }

    #[test]
    fn test_cover_must_fit_first_page() {
        let style = StyleSheet::standard();
        let page = PageConfig::default().with_max_content_height(40.0);

        let err = render(&model(vec![]), &style, &page).unwrap_err();
        assert!(matches!(
            err,
            ReportError::Render(RenderError::RowTooTall {
                section: SectionKind::Cover,
                index: 0,
                ..
            })
        ));
    }

    #[test]
    fn test_invalid_style_is_validation_error() {
        let style = StyleSheet::new().with_role(
            StyleRole::TableRow,
            StyleToken::new(-1.0, Color::BLACK),
        );
        let page = PageConfig::default();

        let err = render(&model(vec![]), &style, &page).unwrap_err();
        assert!(matches!(err, ReportError::Validation(_)));
    }

    #[test]
    fn test_invalid_datetime_format_is_rejected() {
        let style = StyleSheet::standard();
        let page = PageConfig::default();
        let options = RenderOptions {
            datetime_format: "%Q".to_string(),
            ..RenderOptions::default()
        };

        let err = ReportRenderer::new(&style, &page)
            .with_options(options)
            .render(&model(vec![]))
            .unwrap_err();
        assert_eq!(err.code(), 12);
    }

    #[test]
    fn test_missing_roles_fall_back() {
        let style = StyleSheet::new();
        let page = PageConfig::default();
        let layout = ReportRenderer::new(&style, &page)
            .layout(&model(vec![activity("a", "A", "work", (9, 0), (10, 0))]))
            .unwrap();

        let heading = layout
            .pages
            .iter()
            .flat_map(|p| p.rows.iter())
            .find(|placed| placed.row.kind == RowKind::Heading)
            .unwrap();
        // 10pt default token: 12pt line plus 4pt spacing
        assert_eq!(heading.row.height, Length::from_pt(16.0));
    }

    #[test]
    fn test_render_is_deterministic() {
        let style = StyleSheet::standard();
        let page = PageConfig::default();
        let model = model(vec![activity("a", "A", "work", (9, 0), (10, 0))]);
        assert_eq!(
            render(&model, &style, &page).unwrap(),
            render(&model, &style, &page).unwrap()
        );
    }
}
