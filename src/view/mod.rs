//! Capability-restricted accessors, one per storage class.
//!
//! Each view only has the operations its class permits: const views have
//! no write methods, program-space views never expose a slice, and
//! persistent-store views go through the busy/ready protocol. Views are
//! windows onto one symbol; offsets are relative to the symbol start.

mod constant;
mod eeprom;
mod progmem;
mod ram;

pub use constant::ConstView;
pub use eeprom::EepromView;
pub use progmem::ProgmemView;
pub use ram::RamView;
