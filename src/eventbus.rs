use crate::event::{Channel, InputEvent};
use crate::store::StateStore;
use std::sync::Arc;

/// Receives input events dispatched by an [`InputEventBus`].
pub trait InputListener: Send {
    fn on_input(&mut self, event: &InputEvent);
}

/// Which events a subscription receives.
#[derive(Debug, Clone, Copy)]
pub enum EventFilter {
    All,
    PointerOnly,
    PressOnly,
    Custom(fn(&InputEvent) -> bool),
}

impl EventFilter {
    pub fn accepts(&self, event: &InputEvent) -> bool {
        match *self {
            EventFilter::All => true,
            EventFilter::PointerOnly => event.channel() == Channel::Pointer,
            EventFilter::PressOnly => event.channel() == Channel::Press,
            EventFilter::Custom(accept) => accept(event),
        }
    }
}

/// Handle returned by [`InputEventBus::add_listener`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(u64);

struct Subscription {
    id: ListenerId,
    filter: EventFilter,
    muted: bool,
    listener: Box<dyn InputListener>,
}

/// Dispatches input events to subscribed listeners in subscription order.
///
/// Ids are never reused, so subscriptions stay sorted by id and lookups are a
/// binary search.
#[derive(Default)]
pub struct InputEventBus {
    next_id: u64,
    subs: Vec<Subscription>,
}

impl InputEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_listener(
        &mut self,
        listener: impl InputListener + 'static,
        filter: EventFilter,
    ) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.subs.push(Subscription {
            id,
            filter,
            muted: false,
            listener: Box::new(listener),
        });
        id
    }

    fn find(&mut self, id: ListenerId) -> Option<&mut Subscription> {
        let at = self.subs.binary_search_by_key(&id, |sub| sub.id).ok()?;
        Some(&mut self.subs[at])
    }

    /// Mute or unmute a listener. Returns `false` if `id` is not subscribed.
    pub fn set_enabled(&mut self, id: ListenerId, enabled: bool) -> bool {
        match self.find(id) {
            Some(sub) => {
                sub.muted = !enabled;
                true
            }
            None => false,
        }
    }

    pub fn enable(&mut self, id: ListenerId) -> bool {
        self.set_enabled(id, true)
    }

    /// Keeps the subscription but stops delivering to it.
    pub fn disable(&mut self, id: ListenerId) -> bool {
        self.set_enabled(id, false)
    }

    /// Returns `false` if `id` was not subscribed.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        match self.subs.binary_search_by_key(&id, |sub| sub.id) {
            Ok(at) => {
                self.subs.remove(at);
                true
            }
            Err(_) => false,
        }
    }

    pub fn len(&self) -> usize {
        self.subs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subs.is_empty()
    }

    /// Deliver `event` to every unmuted listener whose filter accepts it.
    /// Returns how many listeners received it.
    pub fn emit(&mut self, event: &InputEvent) -> usize {
        let mut delivered = 0;
        for sub in self.subs.iter_mut() {
            if sub.muted || !sub.filter.accepts(event) {
                continue;
            }
            sub.listener.on_input(event);
            delivered += 1;
        }
        delivered
    }

    /// [`emit`](Self::emit) each event in order. Returns total deliveries.
    pub fn emit_all(&mut self, events: &[InputEvent]) -> usize {
        events.iter().map(|event| self.emit(event)).sum()
    }
}

impl std::fmt::Debug for InputEventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let muted = self.subs.iter().filter(|sub| sub.muted).count();
        f.debug_struct("InputEventBus")
            .field("listeners", &self.subs.len())
            .field("muted", &muted)
            .finish()
    }
}

/// Forwards every event into a [`StateStore`] as a single-channel update.
#[derive(Debug, Clone)]
pub struct StoreListener {
    store: Arc<StateStore>,
}

impl StoreListener {
    pub fn new(store: Arc<StateStore>) -> Self {
        Self { store }
    }
}

impl InputListener for StoreListener {
    fn on_input(&mut self, event: &InputEvent) {
        self.store.apply_update(event.to_update());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::Point;
    use std::sync::Mutex;

    /// Records the x coordinate of every event it sees.
    struct Collect(Arc<Mutex<Vec<f64>>>);

    impl InputListener for Collect {
        fn on_input(&mut self, event: &InputEvent) {
            self.0.lock().unwrap().push(event.kind.position().x);
        }
    }

    fn collector() -> (Collect, Arc<Mutex<Vec<f64>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        (Collect(Arc::clone(&seen)), seen)
    }

    #[test]
    fn filters_route_by_kind() {
        let mut bus = InputEventBus::new();
        let (moves, seen_moves) = collector();
        let (presses, seen_presses) = collector();
        bus.add_listener(moves, EventFilter::PointerOnly);
        bus.add_listener(presses, EventFilter::PressOnly);

        bus.emit_all(&[
            InputEvent::pointer_moved(1.0, 0.0),
            InputEvent::pointer_pressed(2.0, 0.0),
            InputEvent::pointer_moved(3.0, 0.0),
        ]);

        assert_eq!(*seen_moves.lock().unwrap(), vec![1.0, 3.0]);
        assert_eq!(*seen_presses.lock().unwrap(), vec![2.0]);
    }

    #[test]
    fn custom_filter_and_disable() {
        fn right_half(ev: &InputEvent) -> bool {
            ev.kind.position().x >= 500.0
        }

        let mut bus = InputEventBus::new();
        let (listener, seen) = collector();
        let id = bus.add_listener(listener, EventFilter::Custom(right_half));

        bus.emit(&InputEvent::pointer_moved(100.0, 0.0));
        bus.emit(&InputEvent::pointer_moved(600.0, 0.0));
        bus.disable(id);
        bus.emit(&InputEvent::pointer_moved(700.0, 0.0));
        bus.enable(id);
        bus.emit(&InputEvent::pointer_moved(800.0, 0.0));

        assert_eq!(*seen.lock().unwrap(), vec![600.0, 800.0]);
        assert!(bus.remove_listener(id));
        assert!(!bus.remove_listener(id));
        assert!(!bus.disable(id));
        assert!(bus.is_empty());
    }

    #[test]
    fn emit_counts_deliveries() {
        let mut bus = InputEventBus::new();
        let (all, _) = collector();
        let (moves, _) = collector();
        let (presses, seen_presses) = collector();
        bus.add_listener(all, EventFilter::All);
        let moves = bus.add_listener(moves, EventFilter::PointerOnly);
        let presses = bus.add_listener(presses, EventFilter::PressOnly);

        assert_eq!(bus.emit(&InputEvent::pointer_moved(1.0, 0.0)), 2);
        assert_eq!(bus.emit(&InputEvent::pointer_pressed(2.0, 0.0)), 2);

        assert!(bus.disable(moves));
        assert!(bus.remove_listener(presses));
        let batch = [
            InputEvent::pointer_moved(3.0, 0.0),
            InputEvent::pointer_pressed(4.0, 0.0),
        ];
        assert_eq!(bus.emit_all(&batch), 2);
        assert_eq!(bus.len(), 2);
        assert_eq!(*seen_presses.lock().unwrap(), vec![2.0]);

        // ids stay valid for lookup after an earlier removal
        assert!(bus.set_enabled(moves, true));
        assert_eq!(bus.emit(&InputEvent::pointer_moved(5.0, 0.0)), 2);
    }

    #[test]
    fn store_listener_merges_per_channel() {
        let store = Arc::new(StateStore::new());
        let mut bus = InputEventBus::new();
        bus.add_listener(StoreListener::new(Arc::clone(&store)), EventFilter::All);

        bus.emit(&InputEvent::pointer_pressed(5.0, 6.0));
        bus.emit(&InputEvent::pointer_moved(7.0, 8.0));

        let snap = store.current();
        assert_eq!(snap.press, Point::new(5.0, 6.0));
        assert_eq!(snap.pointer, Point::new(7.0, 8.0));
    }
}
