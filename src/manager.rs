use crate::binding::{MappingProfile, Viewport};
use crate::config::Config;
use crate::error::Result;
use crate::event::InputEvent;
use crate::eventbus::{EventFilter, InputEventBus, InputListener, ListenerId, StoreListener};
use crate::frame::{CancelFlag, FrameDriver};
use crate::logger::Logger;
use crate::sink::PresentationSink;
use crate::snapshot::InputSnapshot;
use crate::source::InputSource;
use crate::store::StateStore;
use std::sync::Arc;

/// Owns the store, the event bus, the input sources and the frame driver.
///
/// Building a sketch does what a page's setup step does by hand: subscribe the
/// store to input and prepare the per-frame loop.
pub struct Sketch<S> {
    store: Arc<StateStore>,
    bus: InputEventBus,
    sources: Vec<Box<dyn InputSource>>,
    driver: FrameDriver<S>,
    cancel: CancelFlag,
}

impl<S: PresentationSink> Sketch<S> {
    pub fn new(config: &Config, sink: S) -> Result<Self> {
        config.validate()?;
        let store = Arc::new(StateStore::new());

        let mut bus = InputEventBus::new();
        bus.add_listener(StoreListener::new(Arc::clone(&store)), EventFilter::All);
        bus.add_listener(Logger::new(), EventFilter::All);

        let driver = FrameDriver::new(
            Arc::clone(&store),
            config.mapping_profile()?,
            config.viewport,
            sink,
        )?
        .with_frame_rate(config.frame_rate)?;

        log::info!(
            "sketch ready: profile={} viewport={}x{} fps={}",
            driver.profile().name,
            config.viewport.width,
            config.viewport.height,
            config.frame_rate
        );

        Ok(Self {
            store,
            bus,
            sources: Vec::new(),
            driver,
            cancel: CancelFlag::new(),
        })
    }

    /// Register a polled input source.
    pub fn add_source<I: InputSource + 'static>(&mut self, source: I) {
        log::debug!("adding source {} ({})", source.name(), source.id());
        self.sources.push(Box::new(source));
    }

    /// Subscribe an extra listener next to the store.
    pub fn add_listener(
        &mut self,
        listener: impl InputListener + 'static,
        filter: EventFilter,
    ) -> ListenerId {
        self.bus.add_listener(listener, filter)
    }

    /// Push one event from a host event handler.
    pub fn dispatch(&mut self, event: &InputEvent) {
        self.bus.emit(event);
    }

    /// Poll every source and dispatch what they produced. Returns the event count.
    pub fn pump(&mut self) -> usize {
        pump_sources(&mut self.sources, &mut self.bus)
    }

    /// Pump sources, then compute one frame.
    pub fn tick(&mut self) -> Result<()> {
        self.pump();
        self.driver.compute_frame()
    }

    /// Tick at the configured frame rate until [`cancel_flag`](Self::cancel_flag) is raised.
    pub fn run(&mut self) -> Result<u64> {
        let sources = &mut self.sources;
        let bus = &mut self.bus;
        self.driver.run_with(&self.cancel, || {
            pump_sources(sources, bus);
            Ok(())
        })
    }

    /// Handle for stopping [`run`](Self::run) from another thread.
    pub fn cancel_flag(&self) -> CancelFlag {
        self.cancel.clone()
    }

    pub fn resize(&mut self, viewport: Viewport) -> Result<()> {
        self.driver.set_viewport(viewport)
    }

    pub fn set_profile(&mut self, profile: MappingProfile) -> Result<()> {
        self.driver.set_profile(profile)
    }

    pub fn snapshot(&self) -> Arc<InputSnapshot> {
        self.store.current()
    }

    pub fn store(&self) -> &Arc<StateStore> {
        &self.store
    }

    pub fn driver(&self) -> &FrameDriver<S> {
        &self.driver
    }

    pub fn sink(&self) -> &S {
        self.driver.sink()
    }
}

fn pump_sources(sources: &mut [Box<dyn InputSource>], bus: &mut InputEventBus) -> usize {
    let mut count = 0;
    for source in sources.iter_mut() {
        let events = source.poll();
        count += events.len();
        bus.emit_all(&events);
    }
    count
}

impl<S> std::fmt::Debug for Sketch<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sketch")
            .field("sources", &self.sources.len())
            .field("bus", &self.bus)
            .field("driver", &self.driver)
            .finish_non_exhaustive()
    }
}
