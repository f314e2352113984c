//! Test support utilities - only compiled in test builds.

use core::{cell::Cell, convert::Infallible};

use heapless::Vec;

use crate::{
    catalog::{Layout, RegionCatalog},
    error::MemError,
    format::{Arg, format_into},
    image::MemoryImage,
    sink::{ByteSink, TxPort},
    space::ProgramSpace,
    types::StorageClass,
};

/// 2 KiB of RAM at 0x0100 and 1 KiB of flash.
pub type TestImage = MemoryImage<2048, 1024>;
pub type TestCatalog = RegionCatalog<8, 20>;

/// Sink that records every byte and counts the calls.
pub struct RecordingSink {
    out: Vec<u8, 1024>,
    pub calls: usize,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self {
            out: Vec::new(),
            calls: 0,
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.out
    }
}

impl ByteSink for RecordingSink {
    type Error = Infallible;

    fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error> {
        self.calls += 1;
        // Tests never emit more than the backing capacity.
        let _ = self.out.push(byte);
        Ok(())
    }
}

/// Transmitter that reports busy `delay` times before accepting each byte.
pub struct FlakyPort {
    delay: u32,
    waited: u32,
    pub polls: u32,
    pub sent: Vec<u8, 64>,
}

impl FlakyPort {
    pub fn new(delay: u32) -> Self {
        Self {
            delay,
            waited: 0,
            polls: 0,
            sent: Vec::new(),
        }
    }
}

impl TxPort for FlakyPort {
    fn is_ready(&mut self) -> bool {
        self.polls += 1;
        if self.waited < self.delay {
            self.waited += 1;
            false
        } else {
            true
        }
    }

    fn put(&mut self, byte: u8) {
        self.waited = 0;
        let _ = self.sent.push(byte);
    }
}

/// Program memory that counts reads through the primitive.
pub struct ProgramRom {
    bytes: Vec<u8, 64>,
    pub reads: Cell<u32>,
}

impl ProgramRom {
    pub fn new(contents: &[u8]) -> Self {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(contents).unwrap();
        Self {
            bytes,
            reads: Cell::new(0),
        }
    }
}

impl ProgramSpace for ProgramRom {
    fn read_byte(&self, addr: u32) -> Result<u8, MemError> {
        self.reads.set(self.reads.get() + 1);
        self.bytes
            .get(addr as usize)
            .copied()
            .ok_or(MemError::OutOfBounds)
    }
}

/// Asserts that rendering `format` with `args` produces exactly `expected`.
pub fn assert_renders(format: &[u8], args: &[Arg<'_>], expected: &[u8]) {
    let buf = format_into::<128>(format, args).unwrap();
    assert_eq!(
        buf.as_bytes(),
        expected,
        "rendering {:?}",
        core::str::from_utf8(format)
    );
}

/// Every storage class, laid out on an ATmega328P.
pub fn demo_catalog() -> TestCatalog {
    RegionCatalog::builder()
        .layout(Layout::ATMEGA328P)
        .region(".data", StorageClass::RamInit, 18)
        .symbol_init("global_counter", &[0, 0])
        .symbol_init("global_string", b"Hello\0")
        .symbol_init("global_array", &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10])
        .region(".bss", StorageClass::RamZero, 68)
        .symbol("uninitialized_value", 2)
        .symbol("uninitialized_buffer", 64)
        .symbol("static_uninit", 2)
        .region(".rodata", StorageClass::ConstDirect, 25)
        .symbol_init("error_message", b"Error occurred\0")
        .symbol_init(
            "lookup_table",
            &[100, 0, 200, 0, 0x2C, 0x01, 0x90, 0x01, 0xF4, 0x01],
        )
        .region(".progmem", StorageClass::ConstIndirect, 21)
        .symbol_init("progmem_string", b"This is in Flash\0")
        .symbol_init("progmem_data", &[0xAA, 0xBB, 0xCC, 0xDD])
        .region(".serial_buffers", StorageClass::NamedGroup, 256)
        .symbol("serial_tx_buffer", 128)
        .symbol("serial_rx_buffer", 128)
        .fixed_region(".fixed_memory", 0x0500, 256)
        .symbol("fixed_buffer", 256)
        .region(".noinit", StorageClass::RamRaw, 3)
        .symbol("reset_counter", 1)
        .symbol("persistent_value", 2)
        .region(".eeprom", StorageClass::PersistentByteStore, 34)
        .symbol("eeprom_settings", 32)
        .symbol("eeprom_calibration", 2)
        .build()
        .unwrap()
}

/// An image after power-on: flash burned, startup run over zeroed RAM.
pub fn booted_image(catalog: &TestCatalog) -> TestImage {
    let mut image = TestImage::new(0x0100);
    image.flash(catalog).unwrap();
    image.startup(catalog).unwrap();
    image
}
