//! Platform abstraction layer
//!
//! Host input (keyboard key codes, touch points) is translated into the
//! per-tick [`TickInput`](crate::sim::TickInput) the simulation consumes.
//! Sources can be combined with [`TickInput::merge`](crate::sim::TickInput::merge).

pub mod keyboard;
pub mod touch;

pub use keyboard::KeyboardState;
pub use touch::TouchControls;
