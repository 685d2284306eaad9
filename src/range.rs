//! Saturating range mapping.
//!
//! Two pure functions carry every numeric conversion in the crate:
//! - [`normalize`] folds a value from `min..max` into `[0, 1]`.
//! - [`denormalize`] expands a `[0, 1]` value back out into `min..max`.
//!
//! Both saturate: inputs outside the domain produce the boundary output instead
//! of extrapolating. A `NaN` input saturates to the lower bound so it never
//! reaches a presentation sink.
//!
//! ```
//! use slantwise::range::{denormalize, normalize};
//!
//! let x = normalize(960.0, 0.0, 1920.0).unwrap();
//! assert_eq!(x, 0.5);
//! assert_eq!(denormalize(x, 100.0, 1000.0).unwrap(), 550.0);
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Returns `value` normalized to `[0, 1]` within `min..max`.
///
/// Fails with [`Error::InvalidRange`] when `min >= max` or a bound is not finite.
pub fn normalize(value: f64, min: f64, max: f64) -> Result<f64> {
    Ok(Range::new(min, max)?.normalize(value))
}

/// Returns a `[0, 1]` value expanded back into `min..max`.
///
/// Fails with [`Error::InvalidRange`] when `min >= max` or a bound is not finite.
pub fn denormalize(normalized: f64, min: f64, max: f64) -> Result<f64> {
    Ok(Range::new(min, max)?.denormalize(normalized))
}

/// A validated numeric interval with `min < max`.
///
/// Construction is the only place a range can fail, so the mapping methods on a
/// `Range` are infallible.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawRange", into = "RawRange")]
pub struct Range {
    min: f64,
    max: f64,
}

#[derive(Clone, Copy, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawRange {
    min: f64,
    max: f64,
}

impl TryFrom<RawRange> for Range {
    type Error = Error;

    fn try_from(raw: RawRange) -> Result<Self> {
        Self::new(raw.min, raw.max)
    }
}

impl From<Range> for RawRange {
    fn from(range: Range) -> Self {
        Self {
            min: range.min,
            max: range.max,
        }
    }
}

impl Range {
    /// Validate and build a range.
    pub fn new(min: f64, max: f64) -> Result<Self> {
        if min.is_finite() && max.is_finite() && min < max {
            Ok(Self { min, max })
        } else {
            Err(Error::InvalidRange { min, max })
        }
    }

    /// For constant ranges already known to satisfy `min < max`.
    pub(crate) const fn new_unchecked(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn min(&self) -> f64 {
        self.min
    }

    #[inline]
    pub fn max(&self) -> f64 {
        self.max
    }

    #[inline]
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Fold `value` into `[0, 1]`, saturating outside the interval.
    pub fn normalize(&self, value: f64) -> f64 {
        if value.is_nan() || value <= self.min {
            0.0
        } else if value >= self.max {
            1.0
        } else {
            (value - self.min) / self.span()
        }
    }

    /// Expand a `[0, 1]` value into the interval, saturating outside `[0, 1]`.
    pub fn denormalize(&self, normalized: f64) -> f64 {
        if normalized.is_nan() || normalized <= 0.0 {
            self.min
        } else if normalized >= 1.0 {
            self.max
        } else {
            // rounding can land one ulp past `max`
            (normalized * self.span() + self.min).min(self.max)
        }
    }

    /// Map `value` from `self` onto `target`.
    #[inline]
    pub fn remap(&self, value: f64, target: &Range) -> f64 {
        target.denormalize(self.normalize(value))
    }
}
