//! Role-keyed visual tokens.
//!
//! A [`StyleSheet`] maps each semantic [`StyleRole`] to a [`StyleToken`].
//! Sheets may be partial: resolving a role that is not defined yields
//! [`DEFAULT_TOKEN`] (Helvetica 10pt, black, regular, 4pt spacing), so a
//! render always has something to draw with.

use ar_common::ValidationError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// Semantic role a piece of text plays in the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleRole {
    /// Report title on the cover.
    Title,
    /// Section headings.
    Heading,
    /// Table header rows and grand-total rows.
    TableHeader,
    /// Table data rows.
    TableRow,
    /// Page footer, running header and cover metadata lines.
    Footer,
    /// Band behind every other data row; only the color is used for the fill.
    AltRow,
}

impl StyleRole {
    /// Every role a complete sheet defines.
    pub const ALL: [StyleRole; 6] = [
        StyleRole::Title,
        StyleRole::Heading,
        StyleRole::TableHeader,
        StyleRole::TableRow,
        StyleRole::Footer,
        StyleRole::AltRow,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StyleRole::Title => "title",
            StyleRole::Heading => "heading",
            StyleRole::TableHeader => "table_header",
            StyleRole::TableRow => "table_row",
            StyleRole::Footer => "footer",
            StyleRole::AltRow => "alt_row",
        }
    }
}

impl fmt::Display for StyleRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StyleRole {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StyleRole::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| ValidationError::invalid("style.role", format!("unknown role '{s}'")))
    }
}

/// PDF standard font families the renderer can measure and embed by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontFamily {
    #[default]
    Helvetica,
    Courier,
}

/// RGB color, written as `#RRGGBB` in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }

    /// Parse `#RRGGBB` (the leading `#` is optional).
    pub fn from_hex(hex: &str) -> Result<Self, ValidationError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ValidationError::invalid(
                "color",
                format!("expected #RRGGBB, got '{hex}'"),
            ));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|e| ValidationError::invalid("color", e.to_string()))
        };
        Ok(Color::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Channels scaled to the 0..=1 range PDF color operators take.
    pub fn unit_channels(&self) -> [f64; 3] {
        [self.r, self.g, self.b].map(|c| f64::from(c) / 255.0)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hex = String::deserialize(deserializer)?;
        Color::from_hex(&hex).map_err(serde::de::Error::custom)
    }
}

/// Visual attributes of one role. Sizes are in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleToken {
    pub font_family: FontFamily,
    pub size: f64,
    pub color: Color,
    pub bold: bool,
    /// Vertical padding added to every row drawn with this token.
    pub spacing: f64,
}

/// Token used for any role a sheet leaves undefined.
pub const DEFAULT_TOKEN: StyleToken = StyleToken {
    font_family: FontFamily::Helvetica,
    size: 10.0,
    color: Color::BLACK,
    bold: false,
    spacing: 4.0,
};

static FALLBACK: StyleToken = DEFAULT_TOKEN;

impl Default for StyleToken {
    fn default() -> Self {
        DEFAULT_TOKEN
    }
}

impl StyleToken {
    pub fn new(size: f64, color: Color) -> Self {
        StyleToken {
            size,
            color,
            ..DEFAULT_TOKEN
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn with_spacing(mut self, spacing: f64) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn with_family(mut self, family: FontFamily) -> Self {
        self.font_family = family;
        self
    }

    fn validate(&self, role: StyleRole) -> Result<(), ValidationError> {
        if !self.size.is_finite() || self.size <= 0.0 || self.size > MAX_POINTS {
            return Err(ValidationError::invalid(
                format!("style.{role}.size"),
                format!("must be between 0 and {MAX_POINTS}, got {}", self.size),
            ));
        }
        if !self.spacing.is_finite() || self.spacing < 0.0 || self.spacing > MAX_POINTS {
            return Err(ValidationError::invalid(
                format!("style.{role}.spacing"),
                format!("must be between 0 and {MAX_POINTS}, got {}", self.spacing),
            ));
        }
        Ok(())
    }
}

/// Upper bound for font sizes and spacing, in points.
const MAX_POINTS: f64 = 1000.0;

/// Role-keyed table of style tokens.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StyleSheet {
    tokens: BTreeMap<StyleRole, StyleToken>,
}

impl StyleSheet {
    /// An empty sheet; every role resolves to [`DEFAULT_TOKEN`].
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in complete sheet.
    pub fn standard() -> Self {
        StyleSheet::new()
            .with_role(
                StyleRole::Title,
                StyleToken::new(24.0, Color::rgb(0x1F, 0x29, 0x37))
                    .bold()
                    .with_spacing(12.0),
            )
            .with_role(
                StyleRole::Heading,
                StyleToken::new(16.0, Color::rgb(0x25, 0x63, 0xEB))
                    .bold()
                    .with_spacing(10.0),
            )
            .with_role(
                StyleRole::TableHeader,
                StyleToken::new(10.0, Color::rgb(0x37, 0x41, 0x51))
                    .bold()
                    .with_spacing(6.0),
            )
            .with_role(
                StyleRole::TableRow,
                StyleToken::new(10.0, Color::rgb(0x11, 0x18, 0x27)).with_spacing(6.0),
            )
            .with_role(
                StyleRole::Footer,
                StyleToken::new(9.0, Color::rgb(0x6B, 0x72, 0x80)).with_spacing(4.0),
            )
            .with_role(
                StyleRole::AltRow,
                StyleToken::new(10.0, Color::rgb(0xF3, 0xF4, 0xF6)).with_spacing(6.0),
            )
    }

    /// Set the token for a role, replacing any previous one.
    pub fn with_role(mut self, role: StyleRole, token: StyleToken) -> Self {
        self.tokens.insert(role, token);
        self
    }

    /// Token for `role`, or [`DEFAULT_TOKEN`] if the sheet does not define it.
    pub fn resolve(&self, role: StyleRole) -> &StyleToken {
        self.tokens.get(&role).unwrap_or(&FALLBACK)
    }

    /// Resolve by role name. Unknown names resolve to [`DEFAULT_TOKEN`].
    pub fn resolve_name(&self, name: &str) -> &StyleToken {
        match name.parse::<StyleRole>() {
            Ok(role) => self.resolve(role),
            Err(_) => &FALLBACK,
        }
    }

    /// Whether the sheet itself defines `role`.
    pub fn defines(&self, role: StyleRole) -> bool {
        self.tokens.contains_key(&role)
    }

    /// Combine `base` with `overrides`; for every role `overrides` defines, its token wins.
    pub fn merge(base: &StyleSheet, overrides: &StyleSheet) -> StyleSheet {
        let mut tokens = base.tokens.clone();
        tokens.extend(overrides.tokens.iter().map(|(role, token)| (*role, *token)));
        StyleSheet { tokens }
    }

    /// Required roles this sheet leaves to the default token.
    pub fn missing_roles(&self) -> Vec<StyleRole> {
        StyleRole::ALL
            .into_iter()
            .filter(|role| !self.defines(*role))
            .collect()
    }

    /// Check that every defined token is drawable.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (role, token) in &self.tokens {
            token.validate(*role)?;
        }
        Ok(())
    }

    /// Load a (possibly partial) sheet from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl Serialize for StyleSheet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.tokens.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for StyleSheet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, StyleToken>::deserialize(deserializer)?;
        let mut tokens = BTreeMap::new();
        for (name, token) in raw {
            match name.parse::<StyleRole>() {
                Ok(role) => {
                    tokens.insert(role, token);
                }
                Err(_) => warn!(role = %name, "Ignoring unknown style role"),
            }
        }
        Ok(StyleSheet { tokens })
    }
}
