use crate::event::{InputEvent, InputKind};
use crate::source::InputSource;

/// Scripted pointer: queue moves and presses, then drain them with `poll`.
#[derive(Debug, Default)]
pub struct VirtualPointer {
    id: String,
    name: String,
    events: Vec<InputEvent>,
}

impl VirtualPointer {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            events: Vec::new(),
        }
    }

    /// Inject a raw input event.
    pub fn feed(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Convenience method to move the pointer.
    pub fn move_to(&mut self, x: f64, y: f64) {
        self.feed(InputEvent::now(InputKind::PointerMoved { x, y }));
    }

    /// Press at `(x, y)`. Like a real pointer, a press also moves it there.
    pub fn press_at(&mut self, x: f64, y: f64) {
        self.move_to(x, y);
        self.feed(InputEvent::now(InputKind::PointerPressed { x, y }));
    }

    /// Queue `steps + 1` evenly spaced moves from `from` to `to` (inclusive).
    pub fn sweep(&mut self, from: (f64, f64), to: (f64, f64), steps: u32) {
        let steps = steps.max(1);
        for i in 0..=steps {
            let t = f64::from(i) / f64::from(steps);
            self.move_to(from.0 + (to.0 - from.0) * t, from.1 + (to.1 - from.1) * t);
        }
    }

    /// Number of queued, not yet polled, events.
    pub fn pending(&self) -> usize {
        self.events.len()
    }
}

impl InputSource for VirtualPointer {
    fn poll(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Channel;
    use crate::snapshot::Point;

    #[test]
    fn poll_drains_in_order() {
        let mut ptr = VirtualPointer::new("virtual:0", "Virtual Pointer");
        ptr.move_to(1.0, 2.0);
        ptr.press_at(3.0, 4.0);
        assert_eq!(ptr.pending(), 3);

        let events = ptr.poll();
        let channels: Vec<_> = events.iter().map(InputEvent::channel).collect();
        assert_eq!(channels, [Channel::Pointer, Channel::Pointer, Channel::Press]);
        assert_eq!(events[2].kind.position(), Point::new(3.0, 4.0));
        assert!(ptr.poll().is_empty());
    }

    #[test]
    fn sweep_hits_both_endpoints() {
        let mut ptr = VirtualPointer::new("virtual:0", "Virtual Pointer");
        ptr.sweep((0.0, 0.0), (100.0, 50.0), 4);
        let xs: Vec<f64> = ptr.poll().iter().map(|e| e.kind.position().x).collect();
        assert_eq!(xs, [0.0, 25.0, 50.0, 75.0, 100.0]);
    }
}
