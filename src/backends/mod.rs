//! Input backends for `slantwise`.
//!
//! Implementations of [`InputSource`](crate::source::InputSource). Hosts with a
//! real windowing system implement the trait themselves (or call
//! [`Sketch::dispatch`](crate::manager::Sketch::dispatch) directly from their
//! event handlers); the scripted [`VirtualPointer`](virtual_pointer::VirtualPointer)
//! drives demos and tests.

pub mod virtual_pointer;
