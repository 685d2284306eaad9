//! Per-frame driver.
//!
//! [`FrameDriver::compute_frame`] is the whole per-frame step: read the current
//! snapshot from the store, resolve the mapping profile against the viewport and
//! hand the declarations to the sink. [`FrameDriver::run`] repeats it at the
//! configured cadence until a [`CancelFlag`] is raised; [`FrameDriver::run_frames`]
//! runs a fixed number of frames back to back for tests and batch rendering.
//!
//! The driver never writes to the store.

use crate::binding::{FrameOutput, MappingProfile, Viewport};
use crate::error::{Error, Result};
use crate::sink::PresentationSink;
use crate::store::StateStore;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Default cadence, in frames per second.
pub const DEFAULT_FRAME_RATE: u32 = 60;

/// Upper bound accepted for the frame rate.
pub const MAX_FRAME_RATE: u32 = 1000;

/// Cloneable stop signal shared between a running loop and whoever stops it.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Clear the flag so the loop can be started again.
    pub fn reset(&self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Frame interval for `rate` frames per second.
pub fn frame_interval(rate: u32) -> Result<Duration> {
    if rate == 0 || rate > MAX_FRAME_RATE {
        return Err(Error::InvalidFrameRate(rate));
    }
    Ok(Duration::from_secs_f64(1.0 / f64::from(rate)))
}

pub struct FrameDriver<S> {
    store: Arc<StateStore>,
    profile: MappingProfile,
    viewport: Viewport,
    sink: S,
    interval: Duration,
    frames: u64,
}

impl<S: PresentationSink> FrameDriver<S> {
    /// Build a driver at [`DEFAULT_FRAME_RATE`]. Validates profile and viewport.
    pub fn new(
        store: Arc<StateStore>,
        profile: MappingProfile,
        viewport: Viewport,
        sink: S,
    ) -> Result<Self> {
        profile.validate()?;
        viewport.validate()?;
        Ok(Self {
            store,
            profile,
            viewport,
            sink,
            interval: frame_interval(DEFAULT_FRAME_RATE)?,
            frames: 0,
        })
    }

    pub fn with_frame_rate(mut self, rate: u32) -> Result<Self> {
        self.interval = frame_interval(rate)?;
        Ok(self)
    }

    /// Compute the next frame's outputs and apply them to the sink.
    pub fn compute_frame(&mut self) -> Result<()> {
        let output = self.peek()?;
        self.sink.apply(&output)?;
        self.frames += 1;
        Ok(())
    }

    /// What the next frame would produce, without touching the sink.
    pub fn peek(&self) -> Result<FrameOutput> {
        let snapshot = self.store.current();
        self.profile.resolve(&snapshot, &self.viewport)
    }

    /// Run exactly `n` frames without pacing. Returns frames produced.
    pub fn run_frames(&mut self, n: u64) -> Result<u64> {
        for _ in 0..n {
            self.compute_frame()?;
        }
        Ok(n)
    }

    /// Run at the configured cadence until `cancel` is raised.
    ///
    /// The flag is checked before every frame; a flag raised before the call
    /// produces no frames. Returns frames produced by this call.
    pub fn run(&mut self, cancel: &CancelFlag) -> Result<u64> {
        self.run_with(cancel, || Ok(()))
    }

    /// Like [`run`](Self::run), calling `before_frame` ahead of every frame
    /// (the host pumps its input sources there).
    pub fn run_with<F>(&mut self, cancel: &CancelFlag, mut before_frame: F) -> Result<u64>
    where
        F: FnMut() -> Result<()>,
    {
        let start = self.frames;
        log::debug!(
            "frame loop started: profile={} interval={:?}",
            self.profile.name,
            self.interval
        );

        while !cancel.is_cancelled() {
            let started = Instant::now();
            before_frame()?;
            self.compute_frame()?;

            let spent = started.elapsed();
            match self.interval.checked_sub(spent) {
                Some(rest) => std::thread::sleep(rest),
                None => {
                    let over = spent - self.interval;
                    log::trace!("frame {} overran by {over:?}", self.frames);
                }
            }
        }

        let produced = self.frames - start;
        log::debug!("frame loop cancelled after {produced} frame(s)");
        Ok(produced)
    }

    /// Change the normalization area (window resize).
    pub fn set_viewport(&mut self, viewport: Viewport) -> Result<()> {
        viewport.validate()?;
        self.viewport = viewport;
        Ok(())
    }

    /// Swap the active profile.
    pub fn set_profile(&mut self, profile: MappingProfile) -> Result<()> {
        profile.validate()?;
        log::info!("switching profile {} -> {}", self.profile.name, profile.name);
        self.profile = profile;
        Ok(())
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn profile(&self) -> &MappingProfile {
        &self.profile
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Total frames produced over the driver's lifetime.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}

impl<S> std::fmt::Debug for FrameDriver<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameDriver")
            .field("profile", &self.profile.name)
            .field("viewport", &self.viewport)
            .field("interval", &self.interval)
            .field("frames", &self.frames)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::RecordingSink;
    use crate::snapshot::{Point, SnapshotUpdate};
    use crate::style::StyleProperty;

    fn driver() -> (FrameDriver<RecordingSink>, Arc<StateStore>, RecordingSink) {
        let store = Arc::new(StateStore::new());
        let sink = RecordingSink::new();
        let driver = FrameDriver::new(
            Arc::clone(&store),
            MappingProfile::weight_slant(),
            Viewport::new(1000.0, 100.0).unwrap(),
            sink.clone(),
        )
        .unwrap();
        (driver, store, sink)
    }

    #[test]
    fn each_frame_reads_latest_snapshot() {
        let (mut driver, store, sink) = driver();
        driver.compute_frame().unwrap();
        store.apply_update(SnapshotUpdate::pointer(Point::new(1000.0, 50.0)));
        driver.compute_frame().unwrap();

        let frames = sink.frames();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].value(&StyleProperty::FontWeight), Some(100.0));
        assert_eq!(frames[1].value(&StyleProperty::FontWeight), Some(1000.0));
        assert_eq!(frames[1].value(&StyleProperty::FontSlant), Some(5.0));
    }

    #[test]
    fn bounded_run() {
        let (mut driver, _, sink) = driver();
        assert_eq!(driver.run_frames(5).unwrap(), 5);
        assert_eq!(sink.len(), 5);
        assert_eq!(driver.frames(), 5);
    }

    #[test]
    fn cancelled_flag_produces_no_frames() {
        let (mut driver, _, sink) = driver();
        let cancel = CancelFlag::new();
        cancel.cancel();
        assert_eq!(driver.run(&cancel).unwrap(), 0);
        assert!(sink.is_empty());
    }

    #[test]
    fn hook_cancels_after_three_frames() {
        let (driver, _, sink) = driver();
        let mut driver = driver.with_frame_rate(MAX_FRAME_RATE).unwrap();
        let cancel = CancelFlag::new();
        let mut calls = 0;
        let produced = driver
            .run_with(&cancel, || {
                calls += 1;
                if calls == 3 {
                    cancel.cancel();
                }
                Ok(())
            })
            .unwrap();

        // the frame whose hook raised the flag still completes
        assert_eq!(produced, 3);
        assert_eq!(sink.len(), 3);
    }

    #[test]
    fn loop_restarts_after_reset() {
        let (driver, _, sink) = driver();
        let mut driver = driver.with_frame_rate(MAX_FRAME_RATE).unwrap();
        assert!((driver.interval().as_secs_f64() - 0.001).abs() < 1e-9);

        let cancel = CancelFlag::new();
        let mut left = 2;
        let mut stop_after = |n: &mut u32| -> Result<()> {
            *n -= 1;
            if *n == 0 {
                cancel.cancel();
            }
            Ok(())
        };
        assert_eq!(driver.run_with(&cancel, || stop_after(&mut left)).unwrap(), 2);

        // still cancelled: nothing runs until the flag is cleared
        assert_eq!(driver.run(&cancel).unwrap(), 0);

        cancel.reset();
        let mut left = 3;
        assert_eq!(driver.run_with(&cancel, || stop_after(&mut left)).unwrap(), 3);
        assert_eq!(sink.len(), 5);
        assert_eq!(driver.frames(), 5);
    }

    #[test]
    fn hook_error_stops_the_loop() {
        let (mut driver, _, sink) = driver();
        let cancel = CancelFlag::new();
        let err = driver
            .run_with(&cancel, || Err(Error::Sink("gone".into())))
            .unwrap_err();
        assert!(matches!(err, Error::Sink(_)));
        assert!(sink.is_empty());
    }

    #[test]
    fn frame_rate_bounds() {
        assert!(frame_interval(0).is_err());
        assert!(frame_interval(MAX_FRAME_RATE + 1).is_err());
        let interval = frame_interval(50).unwrap();
        assert!((interval.as_secs_f64() - 0.02).abs() < 1e-9);
    }

    #[test]
    fn resize_changes_normalization() {
        let (mut driver, store, _) = driver();
        store.apply_update(SnapshotUpdate::pointer(Point::new(500.0, 0.0)));
        assert_eq!(driver.peek().unwrap().value(&StyleProperty::FontWeight), Some(550.0));

        driver.set_viewport(Viewport::new(500.0, 100.0).unwrap()).unwrap();
        assert_eq!(driver.peek().unwrap().value(&StyleProperty::FontWeight), Some(1000.0));
        assert!(driver
            .set_viewport(Viewport {
                width: -1.0,
                height: 1.0
            })
            .is_err());
    }
}
