//! Sketch configuration.
//!
//! A configuration names the viewport, the frame rate and the mapping profile.
//! The profile is either a preset name or an inline profile:
//!
//! ```toml
//! frame_rate = 30
//! viewport = { width = 1280, height = 800 }
//! profile = "press-variation"
//! ```
//!
//! ```toml
//! [profile]
//! name = "grade"
//!
//! [[profile.bindings]]
//! channel = "pointer"
//! axis = "y"
//! property = { kind = "variation", tag = "GRAD" }
//! range = { min = -200, max = 150 }
//! ```
//!
//! Every field is optional; missing fields fall back to a 1920×1080 viewport,
//! 60 fps and the `weight-slant` preset.

use crate::binding::{MappingProfile, Viewport};
use crate::error::{Error, Result};
use crate::frame::{self, DEFAULT_FRAME_RATE};
use serde::de::value::MapAccessDeserializer;
use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::path::Path;
use std::time::Duration;

/// A preset reference or a full profile.
///
/// A string selects a preset; a table is parsed as a [`MappingProfile`], so a
/// bad range or axis tag inside it is reported as such.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ProfileSource {
    Preset(String),
    Inline(MappingProfile),
}

impl<'de> Deserialize<'de> for ProfileSource {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct SourceVisitor;

        impl<'de> Visitor<'de> for SourceVisitor {
            type Value = ProfileSource;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a preset name or a profile table")
            }

            fn visit_str<E: de::Error>(self, name: &str) -> std::result::Result<Self::Value, E> {
                Ok(ProfileSource::Preset(name.to_string()))
            }

            fn visit_map<A>(self, map: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                MappingProfile::deserialize(MapAccessDeserializer::new(map))
                    .map(ProfileSource::Inline)
            }
        }

        deserializer.deserialize_any(SourceVisitor)
    }
}

impl Default for ProfileSource {
    fn default() -> Self {
        ProfileSource::Preset("weight-slant".to_string())
    }
}

impl ProfileSource {
    /// Resolve to a concrete, validated profile.
    pub fn resolve(&self) -> Result<MappingProfile> {
        let profile = match self {
            ProfileSource::Preset(name) => MappingProfile::preset(name)
                .ok_or_else(|| Error::UnknownPreset(name.clone()))?,
            ProfileSource::Inline(profile) => profile.clone(),
        };
        profile.validate()?;
        Ok(profile)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub viewport: Viewport,
    pub frame_rate: u32,
    pub profile: ProfileSource,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            frame_rate: DEFAULT_FRAME_RATE,
            profile: ProfileSource::default(),
        }
    }
}

impl Config {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a file: `.json` is parsed as JSON, anything else as TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let config = if is_json {
            Self::from_json_str(&text)?
        } else {
            Self::from_toml_str(&text)?
        };
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.viewport.validate()?;
        frame::frame_interval(self.frame_rate)?;
        self.profile.resolve()?;
        Ok(())
    }

    pub fn frame_interval(&self) -> Result<Duration> {
        frame::frame_interval(self.frame_rate)
    }

    /// The concrete profile this configuration selects.
    pub fn mapping_profile(&self) -> Result<MappingProfile> {
        self.profile.resolve()
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
