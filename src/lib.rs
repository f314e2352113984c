//! A `no_std`, no-alloc model of a microcontroller's memory map.
//!
//! Firmware on small targets spreads its variables over storage with very
//! different rules: initialized and zeroed RAM, RAM the startup code must
//! not touch, constants reachable by ordinary loads, constants that live in
//! program flash behind a dedicated read instruction, and a byte-wide
//! EEPROM with a busy/ready write protocol. This crate describes those
//! regions, places symbols in them, and hands out accessors that only
//! permit what each storage class allows.
//!
//! # Features
//!
//! - **Region catalog** - linker-style placement with consistency checks
//! - **Startup model** - copy/zero/skip per region, driven by a bitmap mask
//! - **Class-restricted views** - RAM, const, program-space and EEPROM accessors
//! - **Restricted printf** - `%d %i %u %x %X %s %c %p %%` into a bounded buffer
//! - **ISR-safe counters** - critical-section protected shared values
//!
//! # Example
//!
//! ```
//! use embedded_memmap::prelude::*;
//!
//! let catalog = RegionCatalog::<4, 8>::builder()
//!     .layout(Layout::ATMEGA328P)
//!     .region(".noinit", StorageClass::RamRaw, 1)
//!     .symbol("reset_counter", 1)
//!     .region(".progmem", StorageClass::ConstIndirect, 4)
//!     .symbol_init("table", &[0xAA, 0xBB, 0xCC, 0xDD])
//!     .region(".eeprom", StorageClass::PersistentByteStore, 2)
//!     .symbol("calibration", 2)
//!     .build()
//!     .unwrap();
//!
//! let mut image = MemoryImage::<256, 64>::new(0x0100);
//! image.flash(&catalog).unwrap();
//! image.startup(&catalog).unwrap();
//! let mut ee = SimEeprom::<64>::new(3);
//! let mut map = MemoryMap::new(&catalog, &mut image, &mut ee);
//!
//! map.with_ram("reset_counter", |v| {
//!     let n = v.read_u8(0)?;
//!     v.write_u8(0, n.wrapping_add(1))
//! })
//! .unwrap()
//! .unwrap();
//!
//! assert_eq!(map.progmem("table").unwrap().read_byte(2), Ok(0xCC));
//!
//! let mut cal = map.eeprom("calibration").unwrap();
//! cal.write_word(0, 0x1234).unwrap();
//! assert_eq!(cal.read_word(0), Ok(0x1234));
//!
//! let mut out: heapless::Vec<u8, 32> = heapless::Vec::new();
//! uprintf!(&mut out, "cal=%x", 0x1234u32).unwrap();
//! assert_eq!(out.as_slice(), b"cal=1234");
//! ```

#![deny(unsafe_code)]
#![no_std]

pub mod catalog;
pub mod counter;
pub mod eeprom;
pub mod error;
pub mod format;
pub mod helpers;
pub mod image;
pub mod map;
pub mod report;
pub mod sink;
pub mod slice;
pub mod space;
pub mod types;
pub mod view;

#[cfg(test)]
mod test_support;

pub use catalog::{CatalogBuilder, Layout, RegionCatalog};
pub use counter::{CounterValue, IsrCounter};
pub use eeprom::{SimEeprom, WriteState};
pub use error::{FormatError, MemError, SinkFull};
pub use format::{Arg, RenderBuffer, format_into, render, render_with};
pub use image::MemoryImage;
pub use map::MemoryMap;
pub use report::print_memory_map;
pub use sink::{ByteSink, PolledTx, TxPort, print};
pub use slice::{ROSlice, RWSlice};
pub use space::{DataSpace, NoStore, PersistentStore, ProgramSpace};
pub use types::{AddressSpace, Region, StartupAction, StorageClass, Symbol};
pub use view::{ConstView, EepromView, ProgmemView, RamView};

pub mod prelude {
    pub use crate::{
        AddressSpace, Arg, ByteSink, ConstView, DataSpace, EepromView, FormatError, IsrCounter,
        Layout, MemError, MemoryImage, MemoryMap, NoStore, PersistentStore, PolledTx,
        ProgmemView, ProgramSpace, ROSlice, RWSlice, RamView, RegionCatalog, SimEeprom,
        StartupAction, StorageClass, TxPort, print, print_memory_map, render, uprintf,
    };
}
