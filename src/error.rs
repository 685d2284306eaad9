//! Error type shared by every fallible operation in the crate.
//!
//! Numeric inputs are never rejected: out-of-domain values saturate. The only
//! numeric failure is a degenerate range, which is a programming or
//! configuration mistake rather than a runtime condition.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A mapping domain or codomain with `min >= max` (or a non-finite bound).
    #[error("invalid range: min ({min}) must be finite and strictly less than max ({max})")]
    InvalidRange { min: f64, max: f64 },

    /// Viewport extents must be finite and positive.
    #[error("invalid viewport {width}x{height}")]
    InvalidViewport { width: f64, height: f64 },

    /// OpenType axis tags are exactly four printable ASCII characters.
    #[error("invalid variation axis tag {0:?}")]
    InvalidTag(String),

    #[error("invalid frame rate {0} (expected 1..=1000)")]
    InvalidFrameRate(u32),

    /// A variation-axis binding has no range and the property has no default.
    #[error("binding for {0} needs an explicit range")]
    MissingRange(String),

    /// Two bindings drive the same property.
    #[error("property {0} is bound more than once")]
    DuplicateBinding(String),

    #[error("unknown profile preset {0:?}")]
    UnknownPreset(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("toml serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("json parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Raised by a presentation sink that could not apply a frame.
    #[error("sink error: {0}")]
    Sink(String),
}
