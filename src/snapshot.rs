//! Immutable input snapshot.
//!
//! [`InputSnapshot`] is an **owned**, read-only record of the latest coordinates
//! observed on every input [`Channel`]. It is produced by
//! [`StateStore`](crate::store::StateStore) and shared with frame code behind an
//! `Arc`, so a reader always holds a complete snapshot.
//!
//! # Semantics
//! - A snapshot is **immutable**. New input produces a new snapshot via
//!   [`InputSnapshot::merged`]; the old one stays valid for whoever holds it.
//! - Merging is field-wise: channels absent from a [`SnapshotUpdate`] keep their
//!   previous coordinates.
//! - The initial snapshot has every channel at the origin.
//!
//! # Example
//! ```
//! use slantwise::{Channel, InputSnapshot, Point, SnapshotUpdate};
//!
//! let snap = InputSnapshot::default()
//!     .merged(&SnapshotUpdate::pointer(Point::new(10.0, 20.0)));
//! assert_eq!(snap.get(Channel::Pointer), Point::new(10.0, 20.0));
//! assert_eq!(snap.get(Channel::Press), Point::ORIGIN);
//! ```

use crate::event::Channel;
use serde::{Deserialize, Serialize};

/// A 2D coordinate in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Latest coordinates per channel at one instant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct InputSnapshot {
    /// Last pointer position (any movement).
    pub pointer: Point,
    /// Position of the last press.
    pub press: Point,
}

impl InputSnapshot {
    /// Coordinates of a single channel.
    #[inline]
    pub fn get(&self, channel: Channel) -> Point {
        match channel {
            Channel::Pointer => self.pointer,
            Channel::Press => self.press,
        }
    }

    /// Build the successor snapshot: fields present in `update` win, the rest carry over.
    pub fn merged(&self, update: &SnapshotUpdate) -> Self {
        Self {
            pointer: update.pointer.unwrap_or(self.pointer),
            press: update.press.unwrap_or(self.press),
        }
    }
}

/// Partial snapshot: only `Some` fields are written by a merge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SnapshotUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pointer: Option<Point>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub press: Option<Point>,
}

impl SnapshotUpdate {
    pub fn pointer(at: Point) -> Self {
        Self {
            pointer: Some(at),
            ..Self::default()
        }
    }

    pub fn press(at: Point) -> Self {
        Self {
            press: Some(at),
            ..Self::default()
        }
    }

    /// Update targeting a single channel.
    pub fn for_channel(channel: Channel, at: Point) -> Self {
        match channel {
            Channel::Pointer => Self::pointer(at),
            Channel::Press => Self::press(at),
        }
    }

    /// `true` if the update writes no channel.
    pub fn is_empty(&self) -> bool {
        self.pointer.is_none() && self.press.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_keeps_untouched_channels() {
        let start = InputSnapshot {
            pointer: Point::new(1.0, 1.0),
            press: Point::new(2.0, 2.0),
        };
        let next = start.merged(&SnapshotUpdate::press(Point::new(3.0, 3.0)));

        assert_eq!(next.pointer, Point::new(1.0, 1.0));
        assert_eq!(next.press, Point::new(3.0, 3.0));
        // the source snapshot is untouched
        assert_eq!(start.press, Point::new(2.0, 2.0));
    }

    #[test]
    fn empty_update_is_identity() {
        let start = InputSnapshot {
            pointer: Point::new(5.0, 6.0),
            press: Point::ORIGIN,
        };
        let update = SnapshotUpdate::default();
        assert!(update.is_empty());
        assert_eq!(start.merged(&update), start);
    }

    #[test]
    fn update_deserializes_partial_records() {
        let update: SnapshotUpdate =
            serde_json::from_str(r#"{"press": {"x": 4, "y": 8}}"#).unwrap();
        assert_eq!(update, SnapshotUpdate::press(Point::new(4.0, 8.0)));
    }
}
