//! Text measurement with the PDF standard-14 font metrics.
//!
//! Widths are in 1/1000 em for the printable ASCII range (32..=126).
//! Latin-1 characters above that use the family's average glyph width;
//! anything outside WinAnsi is replaced by `?` before measuring so that
//! the drawn text and the measured text are always the same string.

use crate::style::{FontFamily, StyleToken};
use crate::units::Length;

/// Line height as a multiple of the font size.
pub const LINE_HEIGHT_FACTOR: f64 = 1.2;

#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

const COURIER_WIDTH: u16 = 600;
const HELVETICA_FALLBACK_WIDTH: u16 = 556;
const HELVETICA_BOLD_FALLBACK_WIDTH: u16 = 611;

/// A concrete face: family plus weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Font {
    pub family: FontFamily,
    pub bold: bool,
}

impl Font {
    /// Every face the renderer may reference, in resource order.
    pub const ALL: [Font; 4] = [
        Font::new(FontFamily::Helvetica, false),
        Font::new(FontFamily::Helvetica, true),
        Font::new(FontFamily::Courier, false),
        Font::new(FontFamily::Courier, true),
    ];

    pub const fn new(family: FontFamily, bold: bool) -> Self {
        Font { family, bold }
    }

    pub fn of(token: &StyleToken) -> Self {
        Font::new(token.font_family, token.bold)
    }

    /// PostScript name of the standard font.
    pub fn base_font(&self) -> &'static str {
        match (self.family, self.bold) {
            (FontFamily::Helvetica, false) => "Helvetica",
            (FontFamily::Helvetica, true) => "Helvetica-Bold",
            (FontFamily::Courier, false) => "Courier",
            (FontFamily::Courier, true) => "Courier-Bold",
        }
    }

    /// Name of the font in a page's resource dictionary.
    pub fn resource_name(&self) -> &'static str {
        match (self.family, self.bold) {
            (FontFamily::Helvetica, false) => "F1",
            (FontFamily::Helvetica, true) => "F2",
            (FontFamily::Courier, false) => "F3",
            (FontFamily::Courier, true) => "F4",
        }
    }

    /// Advance width of `c` in 1/1000 em. `c` must already be normalized.
    pub fn glyph_width(&self, c: char) -> u16 {
        if self.family == FontFamily::Courier {
            return COURIER_WIDTH;
        }
        let (table, fallback) = if self.bold {
            (&HELVETICA_BOLD, HELVETICA_BOLD_FALLBACK_WIDTH)
        } else {
            (&HELVETICA, HELVETICA_FALLBACK_WIDTH)
        };
        match c as u32 {
            code @ 32..=126 => table[(code - 32) as usize],
            _ => fallback,
        }
    }

    /// Width of `text` set at `size` points.
    pub fn text_width(&self, text: &str, size: f64) -> Length {
        let units: u64 = text.chars().map(|c| u64::from(self.glyph_width(c))).sum();
        Length::from_pt(units as f64 * size / 1000.0)
    }
}

/// Map `text` onto what a WinAnsi-encoded standard font can show: control
/// characters become spaces, characters outside Latin-1 become `?`.
pub fn normalize(text: &str) -> String {
    text.chars()
        .map(|c| match c as u32 {
            0..=31 | 127 => ' ',
            32..=126 | 160..=255 => c,
            _ => '?',
        })
        .collect()
}

/// Height of one line of text in `token`.
pub fn line_height(token: &StyleToken) -> Length {
    Length::from_pt(token.size * LINE_HEIGHT_FACTOR)
}

/// Height of a row holding `lines` lines of `token` text plus its spacing.
pub fn row_height(token: &StyleToken, lines: usize) -> Length {
    line_height(token) * lines as i64 + Length::from_pt(token.spacing)
}

/// Greedily wrap `text` into lines no wider than `max_width`.
///
/// Breaks at whitespace; a word wider than the line on its own is split
/// between characters. Always returns at least one line.
pub fn wrap(text: &str, font: Font, size: f64, max_width: Length) -> Vec<String> {
    let text = normalize(text);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        if font.text_width(&candidate, size) <= max_width {
            current = candidate;
            continue;
        }
        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if font.text_width(word, size) <= max_width {
            current = word.to_string();
            continue;
        }
        for c in word.chars() {
            current.push(c);
            if current.chars().count() > 1 && font.text_width(&current, size) > max_width {
                current.pop();
                lines.push(std::mem::take(&mut current));
                current.push(c);
            }
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}
