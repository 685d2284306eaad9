//! Events and channels.
//!
//! Input arrives as small, source-agnostic records ([`InputKind`]), optionally
//! timestamped ([`InputEvent`]). Every kind targets exactly one [`Channel`] of the
//! [`InputSnapshot`](crate::snapshot::InputSnapshot).
//!
//! ## Value conventions
//! - Coordinates are CSS pixels relative to the viewport origin (top-left).
//! - Coordinates are **not** clamped here. Out-of-viewport values (a pointer
//!   captured outside the window) are kept as reported and saturate later, when
//!   they are normalized against the viewport.

use crate::snapshot::{Point, SnapshotUpdate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Instant;

/// Named sub-field of the input snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    /// Latest pointer position, updated on every move.
    Pointer,
    /// Position of the latest press.
    Press,
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channel::Pointer => f.write_str("pointer"),
            Channel::Press => f.write_str("press"),
        }
    }
}

/// A single input change.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputKind {
    /// The pointer moved to `(x, y)`.
    PointerMoved { x: f64, y: f64 },

    /// A press happened at `(x, y)`.
    PointerPressed { x: f64, y: f64 },
}

impl InputKind {
    #[inline]
    pub fn channel(&self) -> Channel {
        match self {
            InputKind::PointerMoved { .. } => Channel::Pointer,
            InputKind::PointerPressed { .. } => Channel::Press,
        }
    }

    #[inline]
    pub fn position(&self) -> Point {
        match *self {
            InputKind::PointerMoved { x, y } | InputKind::PointerPressed { x, y } => {
                Point::new(x, y)
            }
        }
    }
}

/// Timestamped input event.
///
/// This is a lightweight wrapper over [`InputKind`] with a monotonic timestamp.
#[derive(Clone, Copy, Debug)]
pub struct InputEvent {
    /// Capture time (monotonic). Suitable for ordering within a run.
    pub at: Instant,
    /// The actual input change.
    pub kind: InputKind,
}

impl InputEvent {
    /// Stamp `kind` with the current instant.
    pub fn now(kind: InputKind) -> Self {
        Self {
            at: Instant::now(),
            kind,
        }
    }

    pub fn pointer_moved(x: f64, y: f64) -> Self {
        Self::now(InputKind::PointerMoved { x, y })
    }

    pub fn pointer_pressed(x: f64, y: f64) -> Self {
        Self::now(InputKind::PointerPressed { x, y })
    }

    #[inline]
    pub fn channel(&self) -> Channel {
        self.kind.channel()
    }

    /// Partial snapshot record writing only this event's channel.
    pub fn to_update(&self) -> SnapshotUpdate {
        SnapshotUpdate::for_channel(self.channel(), self.kind.position())
    }
}
