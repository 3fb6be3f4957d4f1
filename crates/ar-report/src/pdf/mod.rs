//! Minimal PDF 1.4 output.
//!
//! ```text
//! page layout -> ContentStreamBuilder -> PdfWriter -> ObjectSerializer -> bytes
//! ```
//!
//! Only what the report needs: the four standard Type1 faces in
//! WinAnsiEncoding, filled rectangles, lines and single-line text runs.
//! Streams are left uncompressed.

mod content;
mod object;
mod writer;

pub use content::ContentStreamBuilder;
pub use object::{encode_text, format_number, Dictionary, Object, ObjectSerializer};
pub use writer::{DocumentInfo, PdfWriter};
