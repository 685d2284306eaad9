use crate::event::InputEvent;
use crate::eventbus::InputListener;

/// A listener that logs every input event at `debug` level under the
/// `slantwise::input` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct Logger;

impl Logger {
    pub fn new() -> Self {
        Logger
    }
}

impl InputListener for Logger {
    fn on_input(&mut self, event: &InputEvent) {
        log::debug!(target: "slantwise::input", "[{}] {:?}", event.channel(), event.kind);
    }
}
