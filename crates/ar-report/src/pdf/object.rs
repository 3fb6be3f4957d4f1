//! PDF object model and its byte serialization.

/// A PDF object. Dictionaries keep insertion order so output is stable.
#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    Null,
    Boolean(bool),
    Integer(i64),
    Real(f64),
    Name(&'static str),
    /// Literal string; bytes are already in the target encoding.
    String(Vec<u8>),
    Array(Vec<Object>),
    Dictionary(Dictionary),
    Reference(u32),
    Stream(Dictionary, Vec<u8>),
}

/// Ordered key/value pairs. Keys are names without the leading slash.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dictionary {
    entries: Vec<(&'static str, Object)>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &'static str, value: Object) -> Self {
        self.entries.push((key, value));
        self
    }

    pub fn typed(kind: &'static str) -> Self {
        Self::new().with("Type", Object::Name(kind))
    }

    pub fn get(&self, key: &str) -> Option<&Object> {
        self.entries
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, value)| value)
    }
}

impl From<Dictionary> for Object {
    fn from(dict: Dictionary) -> Self {
        Object::Dictionary(dict)
    }
}

/// Print a number with at most three decimals and no trailing zeros.
pub fn format_number(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    if rounded == 0.0 || !rounded.is_finite() {
        return "0".to_string();
    }
    let text = format!("{rounded:.3}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    text.to_string()
}

/// Encode `text` for a WinAnsi standard font. Printable ASCII and Latin-1
/// map to themselves; anything else becomes `?`.
pub fn encode_text(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c as u32 {
            code @ (32..=126 | 160..=255) => code as u8,
            _ => b'?',
        })
        .collect()
}

/// Writes objects in PDF syntax.
#[derive(Debug, Default)]
pub struct ObjectSerializer;

impl ObjectSerializer {
    pub fn new() -> Self {
        Self
    }

    pub fn serialize(&self, object: &Object) -> Vec<u8> {
        let mut out = Vec::new();
        self.write(object, &mut out);
        out
    }

    pub fn write(&self, object: &Object, out: &mut Vec<u8>) {
        match object {
            Object::Null => out.extend_from_slice(b"null"),
            Object::Boolean(value) => {
                out.extend_from_slice(if *value { b"true" } else { b"false" })
            }
            Object::Integer(value) => out.extend_from_slice(value.to_string().as_bytes()),
            Object::Real(value) => out.extend_from_slice(format_number(*value).as_bytes()),
            Object::Name(name) => {
                out.push(b'/');
                out.extend_from_slice(name.as_bytes());
            }
            Object::String(bytes) => write_literal(bytes, out),
            Object::Array(items) => {
                out.push(b'[');
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        out.push(b' ');
                    }
                    self.write(item, out);
                }
                out.push(b']');
            }
            Object::Dictionary(dict) => self.write_dictionary(dict, out),
            Object::Reference(id) => out.extend_from_slice(format!("{id} 0 R").as_bytes()),
            Object::Stream(dict, data) => {
                let dict = dict
                    .clone()
                    .with("Length", Object::Integer(data.len() as i64));
                self.write_dictionary(&dict, out);
                out.extend_from_slice(b"\nstream\n");
                out.extend_from_slice(data);
                out.extend_from_slice(b"\nendstream");
            }
        }
    }

    fn write_dictionary(&self, dict: &Dictionary, out: &mut Vec<u8>) {
        out.extend_from_slice(b"<<");
        for (key, value) in &dict.entries {
            out.extend_from_slice(b" /");
            out.extend_from_slice(key.as_bytes());
            out.push(b' ');
            self.write(value, out);
        }
        out.extend_from_slice(b" >>");
    }
}

/// Literal string with the delimiters and backslash escaped. Bytes outside
/// printable ASCII are written as octal escapes so the file stays 7-bit.
pub fn write_literal(bytes: &[u8], out: &mut Vec<u8>) {
    out.push(b'(');
    for &byte in bytes {
        match byte {
            b'(' | b')' | b'\\' => {
                out.push(b'\\');
                out.push(byte);
            }
            32..=126 => out.push(byte),
            _ => out.extend_from_slice(format!("\\{byte:03o}").as_bytes()),
        }
    }
    out.push(b')');
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(object: &Object) -> String {
        String::from_utf8(ObjectSerializer::new().serialize(object)).unwrap()
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(12.0), "12");
        assert_eq!(format_number(0.5), "0.5");
        assert_eq!(format_number(595.2756), "595.276");
        assert_eq!(format_number(-0.0001), "0");
        assert_eq!(format_number(-3.25), "-3.25");
    }

    #[test]
    fn test_string_escaping() {
        assert_eq!(text(&Object::String(b"a(b)c\\".to_vec())), "(a\\(b\\)c\\\\)");
        assert_eq!(text(&Object::String(encode_text("café"))), "(caf\\351)");
        assert_eq!(encode_text("日"), b"?");
    }

    #[test]
    fn test_dictionary_keeps_order() {
        let dict = Dictionary::typed("Page")
            .with("Parent", Object::Reference(2))
            .with(
                "MediaBox",
                Object::Array(vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Real(595.28),
                    Object::Real(841.89),
                ]),
            );
        assert_eq!(
            text(&dict.into()),
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 595.28 841.89] >>"
        );
    }

    #[test]
    fn test_stream_length() {
        let stream = Object::Stream(Dictionary::new(), b"BT ET".to_vec());
        assert_eq!(text(&stream), "<< /Length 5 >>\nstream\nBT ET\nendstream");
    }
}
