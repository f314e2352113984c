//! Bounds-checked byte windows handed out by the RAM and const accessors.

mod macros;
mod ro;
mod rw;

pub use ro::ROSlice;
pub use rw::RWSlice;
