//! CSS variable-font properties and their declaration strings.
//!
//! Each [`StyleProperty`] expects a number in its own units; the mapping layer
//! produces that number and [`StyleDeclaration`] renders it:
//!
//! | property              | CSS property              | value format        |
//! |-----------------------|---------------------------|---------------------|
//! | `FontWeight`          | `font-weight`             | `550`               |
//! | `FontSlant`           | `font-style`              | `oblique 5deg`      |
//! | `FontSize`            | `font-size`               | `72px`              |
//! | `Variation { tag }`   | `font-variation-settings` | `"wdth" 87.5`       |
//!
//! Numbers render with at most three decimals and no trailing zeros.

use crate::error::{Error, Result};
use crate::range::Range;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Four-character OpenType variation axis tag, e.g. `wdth` or `GRAD`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AxisTag([u8; 4]);

impl AxisTag {
    pub fn new(tag: &str) -> Result<Self> {
        let bytes = tag.as_bytes();
        match <[u8; 4]>::try_from(bytes) {
            Ok(raw) if raw.iter().all(|b| (0x20..=0x7e).contains(b)) => Ok(Self(raw)),
            _ => Err(Error::InvalidTag(tag.to_string())),
        }
    }

    /// For tags known at compile time to be printable ASCII.
    pub(crate) const fn from_raw(raw: [u8; 4]) -> Self {
        Self(raw)
    }

    pub fn as_str(&self) -> &str {
        // Only printable ASCII is accepted by `new`.
        std::str::from_utf8(&self.0).unwrap_or("????")
    }
}

impl fmt::Display for AxisTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for AxisTag {
    type Error = Error;

    fn try_from(tag: String) -> Result<Self> {
        Self::new(&tag)
    }
}

impl From<AxisTag> for String {
    fn from(tag: AxisTag) -> Self {
        tag.as_str().to_string()
    }
}

/// A font styling property that can be driven by input.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StyleProperty {
    FontWeight,
    /// Oblique angle in degrees.
    FontSlant,
    /// Font size in CSS pixels.
    FontSize,
    /// A custom variation axis.
    Variation { tag: AxisTag },
}

impl StyleProperty {
    /// Range used when a binding does not name one.
    ///
    /// Variation axes are font-specific and have no default.
    pub fn default_range(&self) -> Option<Range> {
        let (min, max) = match self {
            StyleProperty::FontWeight => (100.0, 1000.0),
            StyleProperty::FontSlant => (0.0, 10.0),
            StyleProperty::FontSize => (12.0, 144.0),
            StyleProperty::Variation { .. } => return None,
        };
        Some(Range::new_unchecked(min, max))
    }

    /// The CSS property this style is written to.
    pub fn css_property(&self) -> &'static str {
        match self {
            StyleProperty::FontWeight => "font-weight",
            StyleProperty::FontSlant => "font-style",
            StyleProperty::FontSize => "font-size",
            StyleProperty::Variation { .. } => "font-variation-settings",
        }
    }
}

impl fmt::Display for StyleProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleProperty::Variation { tag } => write!(f, "variation '{tag}'"),
            other => f.write_str(other.css_property()),
        }
    }
}

/// A computed value for one property.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StyleDeclaration {
    pub property: StyleProperty,
    pub value: f64,
}

impl StyleDeclaration {
    pub fn new(property: StyleProperty, value: f64) -> Self {
        Self { property, value }
    }

    #[inline]
    pub fn css_property(&self) -> &'static str {
        self.property.css_property()
    }

    /// The value as it is written into CSS.
    pub fn css_value(&self) -> String {
        let n = format_number(self.value);
        match &self.property {
            StyleProperty::FontWeight => n,
            StyleProperty::FontSlant => format!("oblique {n}deg"),
            StyleProperty::FontSize => format!("{n}px"),
            StyleProperty::Variation { tag } => format!("\"{tag}\" {n}"),
        }
    }
}

impl fmt::Display for StyleDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.css_property(), self.css_value())
    }
}

/// Render with up to three decimals, trimming trailing zeros (`550`, `87.5`).
pub(crate) fn format_number(value: f64) -> String {
    let mut s = format!("{value:.3}");
    if s.contains('.') {
        let trimmed = s.trim_end_matches('0').trim_end_matches('.').len();
        s.truncate(trimmed);
    }
    if s == "-0" {
        s = "0".to_string();
    }
    s
}
