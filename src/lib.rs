//! slantwise: pointer input → variable-font styling.
//!
//! Captures the latest pointer coordinates into an immutable snapshot, then once
//! per frame normalizes them against the viewport and rescales them into the
//! ranges CSS font properties expect (weight, oblique angle, size, variation
//! axes).
//!
//! ```
//! use slantwise::{Config, InputEvent, RecordingSink, Sketch, StyleProperty};
//!
//! let sink = RecordingSink::new();
//! let mut sketch = Sketch::new(&Config::default(), sink.clone()).unwrap();
//!
//! sketch.dispatch(&InputEvent::pointer_moved(960.0, 540.0));
//! sketch.tick().unwrap();
//!
//! let frame = sink.last().unwrap();
//! assert_eq!(frame.value(&StyleProperty::FontWeight), Some(550.0));
//! ```

pub mod backends;
pub mod binding;
pub mod config;
pub mod error;
pub mod event;
pub mod eventbus;
pub mod filtered_listener;
pub mod frame;
pub mod logger;
pub mod manager;
pub mod range;
pub mod sink;
pub mod snapshot;
pub mod source;
pub mod store;
pub mod style;

pub use binding::*;
pub use config::{Config, ProfileSource};
pub use error::{Error, Result};
pub use event::*;
pub use eventbus::*;
pub use frame::{CancelFlag, FrameDriver};
pub use manager::*;
pub use range::Range;
pub use sink::*;
pub use snapshot::*;
pub use source::*;
pub use store::*;
pub use style::*;
