//! Mapping profiles: which channel coordinate drives which style property.
//!
//! A [`Binding`] reads one axis of one input channel, normalizes it against the
//! viewport extent of that axis and rescales it into the property's range. A
//! [`MappingProfile`] is a named list of bindings and is what configuration
//! files carry.
//!
//! Two presets reproduce the stock sketches:
//! - [`MappingProfile::weight_slant`]: pointer x → weight, pointer y → slant.
//! - [`MappingProfile::press_variation`]: pointer x → `wdth` axis, press y → size.

use crate::error::{Error, Result};
use crate::event::Channel;
use crate::range::Range;
use crate::snapshot::InputSnapshot;
use crate::style::{AxisTag, StyleDeclaration, StyleProperty};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Horizontal or vertical coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
}

/// Size of the area input coordinates are normalized against, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1920.0,
            height: 1080.0,
        }
    }
}

impl Viewport {
    /// Validate and build a viewport.
    pub fn new(width: f64, height: f64) -> Result<Self> {
        let viewport = Self { width, height };
        viewport.validate()?;
        Ok(viewport)
    }

    pub fn validate(&self) -> Result<()> {
        let ok = |v: f64| v.is_finite() && v > 0.0;
        if ok(self.width) && ok(self.height) {
            Ok(())
        } else {
            Err(Error::InvalidViewport {
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Normalization domain for `axis`: `0..width` or `0..height`.
    pub fn domain(&self, axis: Axis) -> Result<Range> {
        match axis {
            Axis::X => Range::new(0.0, self.width),
            Axis::Y => Range::new(0.0, self.height),
        }
    }
}

/// Maps one channel axis to one style property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Binding {
    pub channel: Channel,
    pub axis: Axis,
    pub property: StyleProperty,
    /// Target range; falls back to [`StyleProperty::default_range`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<Range>,
}

impl Binding {
    pub fn new(channel: Channel, axis: Axis, property: StyleProperty) -> Self {
        Self {
            channel,
            axis,
            property,
            range: None,
        }
    }

    pub fn with_range(mut self, range: Range) -> Self {
        self.range = Some(range);
        self
    }

    /// The effective target range.
    pub fn target_range(&self) -> Result<Range> {
        self.range
            .or_else(|| self.property.default_range())
            .ok_or_else(|| Error::MissingRange(self.property.to_string()))
    }

    /// Compute this binding's declaration for `snapshot`.
    pub fn resolve(
        &self,
        snapshot: &InputSnapshot,
        viewport: &Viewport,
    ) -> Result<StyleDeclaration> {
        let point = snapshot.get(self.channel);
        let coord = match self.axis {
            Axis::X => point.x,
            Axis::Y => point.y,
        };
        let normalized = viewport.domain(self.axis)?.normalize(coord);
        let value = self.target_range()?.denormalize(normalized);
        Ok(StyleDeclaration::new(self.property.clone(), value))
    }
}

/// Serializable set of bindings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MappingProfile {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub bindings: Vec<Binding>,
}

impl Default for MappingProfile {
    fn default() -> Self {
        Self::weight_slant()
    }
}

impl MappingProfile {
    /// Pointer x → font weight `100..1000`, pointer y → oblique angle `0..10`.
    pub fn weight_slant() -> Self {
        Self {
            name: "weight-slant".to_string(),
            description: Some("Pointer position drives weight (x) and slant (y).".to_string()),
            bindings: vec![
                Binding::new(Channel::Pointer, Axis::X, StyleProperty::FontWeight),
                Binding::new(Channel::Pointer, Axis::Y, StyleProperty::FontSlant),
            ],
        }
    }

    /// Pointer x → `wdth` axis `75..125`, last press y → font size `24..200`.
    pub fn press_variation() -> Self {
        let wdth = StyleProperty::Variation {
            tag: AxisTag::from_raw(*b"wdth"),
        };
        let width_range = Range::new_unchecked(75.0, 125.0);
        let size_range = Range::new_unchecked(24.0, 200.0);
        Self {
            name: "press-variation".to_string(),
            description: Some(
                "Pointer x drives the width axis; the last press sets the size.".to_string(),
            ),
            bindings: vec![
                Binding::new(Channel::Pointer, Axis::X, wdth).with_range(width_range),
                Binding::new(Channel::Press, Axis::Y, StyleProperty::FontSize)
                    .with_range(size_range),
            ],
        }
    }

    /// Look up a preset by name.
    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "weight-slant" => Some(Self::weight_slant()),
            "press-variation" => Some(Self::press_variation()),
            _ => None,
        }
    }

    /// Every binding has a range, and no property is bound twice.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for binding in &self.bindings {
            binding.target_range()?;
            if !seen.insert(&binding.property) {
                return Err(Error::DuplicateBinding(binding.property.to_string()));
            }
        }
        Ok(())
    }

    /// Resolve all bindings against one snapshot.
    pub fn resolve(&self, snapshot: &InputSnapshot, viewport: &Viewport) -> Result<FrameOutput> {
        let declarations = self
            .bindings
            .iter()
            .map(|b| b.resolve(snapshot, viewport))
            .collect::<Result<Vec<_>>>()?;
        Ok(FrameOutput { declarations })
    }
}

/// The declarations computed for one frame, in binding order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameOutput {
    pub declarations: Vec<StyleDeclaration>,
}

impl FrameOutput {
    pub fn declaration(&self, property: &StyleProperty) -> Option<&StyleDeclaration> {
        self.declarations.iter().find(|d| &d.property == property)
    }

    pub fn value(&self, property: &StyleProperty) -> Option<f64> {
        self.declaration(property).map(|d| d.value)
    }

    /// All variation axes joined into one `font-variation-settings` value.
    pub fn variation_settings(&self) -> Option<String> {
        let axes: Vec<String> = self
            .declarations
            .iter()
            .filter(|d| matches!(d.property, StyleProperty::Variation { .. }))
            .map(StyleDeclaration::css_value)
            .collect();
        (!axes.is_empty()).then(|| axes.join(", "))
    }

    /// `(css property, css value)` pairs ready to apply to an element.
    ///
    /// Variation axes collapse into a single `font-variation-settings` entry,
    /// placed where the first axis appeared.
    pub fn css_declarations(&self) -> Vec<(&'static str, String)> {
        let mut out = Vec::with_capacity(self.declarations.len());
        let mut variations_done = false;
        for decl in &self.declarations {
            match decl.property {
                StyleProperty::Variation { .. } => {
                    if !variations_done {
                        variations_done = true;
                        if let Some(settings) = self.variation_settings() {
                            out.push((decl.css_property(), settings));
                        }
                    }
                }
                _ => out.push((decl.css_property(), decl.css_value())),
            }
        }
        out
    }
}
