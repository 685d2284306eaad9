use crate::event::InputEvent;

/// A producer of input events polled by the host loop.
///
/// Implementors drain whatever arrived since the previous call; `poll` must not
/// block.
pub trait InputSource {
    fn poll(&mut self) -> Vec<InputEvent>;
    fn name(&self) -> &str;
    fn id(&self) -> &str;
}
