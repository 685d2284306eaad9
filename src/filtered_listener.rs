use crate::event::InputEvent;
use crate::eventbus::InputListener;

/// Forwards to `inner` only the events `accept` lets through.
///
/// Unlike [`EventFilter::Custom`](crate::eventbus::EventFilter::Custom) the
/// predicate may capture state, e.g. a hit-test region.
#[derive(Debug, Clone)]
pub struct FilteredListener<P, L> {
    accept: P,
    inner: L,
    dropped: u64,
}

impl<P, L> FilteredListener<P, L>
where
    P: FnMut(&InputEvent) -> bool + Send,
    L: InputListener,
{
    pub fn new(accept: P, inner: L) -> Self {
        Self {
            accept,
            inner,
            dropped: 0,
        }
    }

    /// Events rejected by the predicate so far.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    pub fn into_inner(self) -> L {
        self.inner
    }
}

impl<P, L> InputListener for FilteredListener<P, L>
where
    P: FnMut(&InputEvent) -> bool + Send,
    L: InputListener,
{
    fn on_input(&mut self, event: &InputEvent) {
        if (self.accept)(event) {
            self.inner.on_input(event);
        } else {
            self.dropped += 1;
        }
    }
}
