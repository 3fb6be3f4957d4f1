//! Report configuration types.
//!
//! All lengths in configuration are PDF points (1/72 inch). They are turned
//! into exact [`Length`]s once, when [`PageConfig::geometry`] validates them.

use crate::error::RenderError;
use crate::style::StyleSheet;
use crate::units::Length;
use ar_common::ValidationError;
use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Largest page side PDF 1.4 viewers accept (200 inches), in points.
pub const MAX_PAGE_SIDE: f64 = 14_400.0;

/// Paper size.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageSize {
    /// 210 x 297 mm.
    #[default]
    A4,
    /// 8.5 x 11 in.
    Letter,
    /// Any size, in points.
    Custom { width: f64, height: f64 },
}

impl PageSize {
    /// Width and height in points.
    pub fn dimensions(&self) -> (f64, f64) {
        match self {
            PageSize::A4 => (595.28, 841.89),
            PageSize::Letter => (612.0, 792.0),
            PageSize::Custom { width, height } => (*width, *height),
        }
    }
}

/// Page margins in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margins {
    pub fn uniform(points: f64) -> Self {
        Margins {
            top: points,
            right: points,
            bottom: points,
            left: points,
        }
    }

    pub fn uniform_cm(cm: f64) -> Self {
        Self::uniform(cm * crate::units::POINTS_PER_CM)
    }
}

impl Default for Margins {
    fn default() -> Self {
        Margins::uniform_cm(2.0)
    }
}

/// Page size, margins and the height available to content on each page.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PageConfig {
    #[serde(default)]
    pub page_size: PageSize,
    #[serde(default)]
    pub margins: Margins,
    /// Maximum content height per page. Defaults to the page height minus
    /// the top and bottom margins.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_content_height: Option<f64>,
}

/// Validated page measurements used by layout and emission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageGeometry {
    pub width: Length,
    pub height: Length,
    pub margin_top: Length,
    pub margin_right: Length,
    pub margin_bottom: Length,
    pub margin_left: Length,
    pub content_width: Length,
    pub max_content_height: Length,
}

impl PageConfig {
    pub fn new(page_size: PageSize, margins: Margins) -> Self {
        PageConfig {
            page_size,
            margins,
            max_content_height: None,
        }
    }

    pub fn with_page_size(mut self, page_size: PageSize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    /// Cap the content height per page, in points.
    pub fn with_max_content_height(mut self, points: f64) -> Self {
        self.max_content_height = Some(points);
        self
    }

    /// Validate the configuration and compute exact page measurements.
    pub fn geometry(&self) -> Result<PageGeometry, RenderError> {
        let (width, height) = self.page_size.dimensions();
        let side_ok = |side: f64| side.is_finite() && side > 0.0 && side <= MAX_PAGE_SIDE;
        if !(side_ok(width) && side_ok(height)) {
            return Err(RenderError::InvalidPageConfig(format!(
                "page sides must be between 0 and {MAX_PAGE_SIDE}pt, got {width} x {height}"
            )));
        }
        let m = &self.margins;
        for (name, value) in [
            ("top", m.top),
            ("right", m.right),
            ("bottom", m.bottom),
            ("left", m.left),
        ] {
            if !value.is_finite() || !(0.0..=MAX_PAGE_SIDE).contains(&value) {
                return Err(RenderError::InvalidPageConfig(format!(
                    "{name} margin must be between 0 and {MAX_PAGE_SIDE}pt, got {value}"
                )));
            }
        }

        let width = Length::from_pt(width);
        let height = Length::from_pt(height);
        let (margin_top, margin_right, margin_bottom, margin_left) = (
            Length::from_pt(m.top),
            Length::from_pt(m.right),
            Length::from_pt(m.bottom),
            Length::from_pt(m.left),
        );

        let content_width = width - margin_left - margin_right;
        if !content_width.is_positive() {
            return Err(RenderError::InvalidPageConfig(format!(
                "left and right margins leave no room on a {width} wide page"
            )));
        }
        let available = height - margin_top - margin_bottom;
        if !available.is_positive() {
            return Err(RenderError::InvalidPageConfig(format!(
                "top and bottom margins leave no room on a {height} tall page"
            )));
        }

        let max_content_height = match self.max_content_height {
            None => available,
            Some(points) if !points.is_finite() || points <= 0.0 => {
                return Err(RenderError::InvalidPageConfig(format!(
                    "max_content_height must be positive, got {points}"
                )));
            }
            Some(points) => {
                let requested = Length::from_pt(points);
                if requested > available {
                    return Err(RenderError::InvalidPageConfig(format!(
                        "max_content_height {requested} exceeds the {available} between the margins"
                    )));
                }
                if !requested.is_positive() {
                    return Err(RenderError::InvalidPageConfig(format!(
                        "max_content_height must be positive, got {points}"
                    )));
                }
                requested
            }
        };

        Ok(PageGeometry {
            width,
            height,
            margin_top,
            margin_right,
            margin_bottom,
            margin_left,
            content_width,
            max_content_height,
        })
    }
}

/// Optional report sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSections {
    /// Average, longest and shortest activity under the summary table.
    #[serde(default = "default_true")]
    pub statistics: bool,
    /// Activity descriptions beneath each detail row.
    #[serde(default = "default_true")]
    pub descriptions: bool,
    /// Signature lines at the end of the report.
    #[serde(default)]
    pub signatures: bool,
}

fn default_true() -> bool {
    true
}

impl Default for ReportSections {
    fn default() -> Self {
        Self {
            statistics: true,
            descriptions: true,
            signatures: false,
        }
    }
}

/// Rendering switches that are not part of the page or the style.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderOptions {
    #[serde(default)]
    pub sections: ReportSections,
    /// Draw the report title in the top margin of every page.
    #[serde(default = "default_true")]
    pub running_header: bool,
    /// chrono format string for timestamps in the report.
    #[serde(default = "default_datetime_format")]
    pub datetime_format: String,
}

fn default_datetime_format() -> String {
    "%Y-%m-%d %H:%M".to_string()
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            sections: ReportSections::default(),
            running_header: true,
            datetime_format: default_datetime_format(),
        }
    }
}

impl RenderOptions {
    /// Reject format strings chrono cannot render.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.datetime_format.trim().is_empty() {
            return Err(ValidationError::empty("datetime_format"));
        }
        if StrftimeItems::new(&self.datetime_format).any(|item| matches!(item, Item::Error)) {
            return Err(ValidationError::invalid(
                "datetime_format",
                format!("'{}' is not a valid format string", self.datetime_format),
            ));
        }
        Ok(())
    }
}

/// Complete report configuration, as loaded from a JSON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Schema version.
    #[serde(default = "default_schema_version")]
    pub schema_version: String,
    /// Page size and margins.
    #[serde(default)]
    pub page: PageConfig,
    /// Style overrides, merged over [`StyleSheet::standard`].
    #[serde(default)]
    pub style: StyleSheet,
    #[serde(flatten)]
    pub options: RenderOptions,
}

fn default_schema_version() -> String {
    "1.0.0".to_string()
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            page: PageConfig::default(),
            style: StyleSheet::new(),
            options: RenderOptions::default(),
        }
    }
}

impl ReportConfig {
    /// Create a new report configuration.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, page: PageConfig) -> Self {
        self.page = page;
        self
    }

    pub fn with_style(mut self, style: StyleSheet) -> Self {
        self.style = style;
        self
    }

    pub fn with_sections(mut self, sections: ReportSections) -> Self {
        self.options.sections = sections;
        self
    }

    pub fn with_signatures(mut self, enabled: bool) -> Self {
        self.options.sections.signatures = enabled;
        self
    }

    pub fn with_running_header(mut self, enabled: bool) -> Self {
        self.options.running_header = enabled;
        self
    }

    pub fn with_datetime_format(mut self, format: impl Into<String>) -> Self {
        self.options.datetime_format = format.into();
        self
    }

    /// The standard sheet with this configuration's overrides applied.
    pub fn resolved_style(&self) -> StyleSheet {
        StyleSheet::merge(&StyleSheet::standard(), &self.style)
    }

    /// Load configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Read and parse a JSON configuration file.
    pub fn load(path: &Path) -> crate::Result<Self> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| crate::ReportError::io(path, e))?;
        Ok(Self::from_json(&json)?)
    }
}
