//! Presentation sinks: where computed frames go.
//!
//! The crate never touches a document or a window. A host implements
//! [`PresentationSink`] to write each frame's declarations onto its text element;
//! [`RecordingSink`] and [`LogSink`] cover tests, demos and headless runs.

use crate::binding::FrameOutput;
use crate::error::Result;
use std::sync::{Arc, Mutex, PoisonError};

/// Receives one [`FrameOutput`] per frame.
pub trait PresentationSink: Send {
    fn apply(&mut self, frame: &FrameOutput) -> Result<()>;
}

impl<S: PresentationSink + ?Sized> PresentationSink for Box<S> {
    fn apply(&mut self, frame: &FrameOutput) -> Result<()> {
        (**self).apply(frame)
    }
}

/// Keeps every frame it receives.
///
/// Clones share the same buffer, so a test can keep a handle while the driver
/// owns the sink.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    frames: Arc<Mutex<Vec<FrameOutput>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every frame recorded so far.
    pub fn frames(&self) -> Vec<FrameOutput> {
        self.frames
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.frames.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The most recent frame.
    pub fn last(&self) -> Option<FrameOutput> {
        self.frames
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }
}

impl PresentationSink for RecordingSink {
    fn apply(&mut self, frame: &FrameOutput) -> Result<()> {
        self.frames
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(frame.clone());
        Ok(())
    }
}

/// Logs each frame as CSS.
///
/// Frames are logged at `trace` except when the CSS text changes, which is
/// logged at `info`, so a steady pointer does not flood the log.
#[derive(Debug, Default)]
pub struct LogSink {
    last: Option<String>,
}

impl LogSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PresentationSink for LogSink {
    fn apply(&mut self, frame: &FrameOutput) -> Result<()> {
        let css = frame
            .css_declarations()
            .into_iter()
            .map(|(property, value)| format!("{property}: {value};"))
            .collect::<Vec<_>>()
            .join(" ");

        if self.last.as_deref() == Some(css.as_str()) {
            log::trace!(target: "slantwise::style", "{css}");
        } else {
            log::info!(target: "slantwise::style", "{css}");
            self.last = Some(css);
        }
        Ok(())
    }
}
