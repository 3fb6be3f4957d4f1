//! Page content stream operators.

use super::object::{encode_text, format_number, write_literal};
use crate::metrics::Font;
use crate::style::Color;

/// Accumulates drawing operators for one page.
#[derive(Debug, Default)]
pub struct ContentStreamBuilder {
    buf: Vec<u8>,
}

impl ContentStreamBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn op(&mut self, operands: &[f64], operator: &str) {
        for value in operands {
            self.buf.extend_from_slice(format_number(*value).as_bytes());
            self.buf.push(b' ');
        }
        self.buf.extend_from_slice(operator.as_bytes());
        self.buf.push(b'\n');
    }

    pub fn save(&mut self) -> &mut Self {
        self.op(&[], "q");
        self
    }

    pub fn restore(&mut self) -> &mut Self {
        self.op(&[], "Q");
        self
    }

    pub fn fill_color(&mut self, color: Color) -> &mut Self {
        self.op(&color.unit_channels(), "rg");
        self
    }

    pub fn stroke_color(&mut self, color: Color) -> &mut Self {
        self.op(&color.unit_channels(), "RG");
        self
    }

    /// Filled rectangle with its lower-left corner at `(x, y)`.
    pub fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> &mut Self {
        self.op(&[x, y, width, height], "re");
        self.op(&[], "f");
        self
    }

    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, width: f64) -> &mut Self {
        self.op(&[width], "w");
        self.op(&[x1, y1], "m");
        self.op(&[x2, y2], "l");
        self.op(&[], "S");
        self
    }

    /// One line of text with its baseline starting at `(x, y)`.
    pub fn text(&mut self, font: Font, size: f64, x: f64, y: f64, text: &str) -> &mut Self {
        self.op(&[], "BT");
        self.buf.push(b'/');
        self.buf.extend_from_slice(font.resource_name().as_bytes());
        self.buf.push(b' ');
        self.op(&[size], "Tf");
        self.op(&[x, y], "Td");
        write_literal(&encode_text(text), &mut self.buf);
        self.buf.extend_from_slice(b" Tj\n");
        self.op(&[], "ET");
        self
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn finish(self) -> Vec<u8> {
        self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::FontFamily;

    #[test]
    fn test_text_operators() {
        let mut content = ContentStreamBuilder::new();
        content
            .fill_color(Color::rgb(255, 0, 0))
            .text(Font::new(FontFamily::Helvetica, true), 10.0, 56.5, 700.0, "Hi (1)");
        let out = String::from_utf8(content.finish()).unwrap();
        assert_eq!(
            out,
            "1 0 0 rg\nBT\n/F2 10 Tf\n56.5 700 Td\n(Hi \\(1\\)) Tj\nET\n"
        );
    }

    #[test]
    fn test_shapes() {
        let mut content = ContentStreamBuilder::new();
        content
            .save()
            .fill_rect(10.0, 20.0, 100.0, 18.0)
            .line(0.0, 5.0, 50.0, 5.0, 0.5)
            .restore();
        let out = String::from_utf8(content.finish()).unwrap();
        assert_eq!(
            out,
            "q\n10 20 100 18 re\nf\n0.5 w\n0 5 m\n50 5 l\nS\nQ\n"
        );
    }
}
