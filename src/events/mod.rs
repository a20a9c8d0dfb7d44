pub mod keyboard;
pub mod pointer;

pub use keyboard::wire_global_keypress;
pub use pointer::{wire_orbit_handlers, OrbitWiring};
