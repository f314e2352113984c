//! Walks every storage class on a simulated ATmega328P and prints the map.
//!
//! Run with `cargo run --example memory_tour`.

use std::io::Write;

use embedded_memmap::prelude::*;

/// Forwards bytes to stdout.
struct Stdout(std::io::Stdout);

impl ByteSink for Stdout {
    type Error = std::io::Error;

    fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error> {
        self.0.write_all(&[byte])
    }
}

static TIMER_TICKS: IsrCounter<u16> = IsrCounter::new(0);

fn build_catalog() -> Result<RegionCatalog<8, 20>, MemError> {
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
        .symbol_init("lookup_table", &[100, 0, 200, 0, 0x2C, 0x01, 0x90, 0x01, 0xF4, 0x01])
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
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let catalog = build_catalog()?;
    let mut image = MemoryImage::<2048, 1024>::new(0x0100);
    let mut ee = SimEeprom::<1024>::new(8);
    let mut out = Stdout(std::io::stdout());

    image.power_loss(0);
    image.flash(&catalog)?;

    // Two resets: the noinit counter survives the second startup.
    for _ in 0..2 {
        image.startup(&catalog)?;
        let mut map = MemoryMap::new(&catalog, &mut image, &mut ee);

        let resets = map.with_ram("reset_counter", |v| {
            let n = v.read_u8(0)?.wrapping_add(1);
            v.write_u8(0, n)?;
            Ok::<u8, MemError>(n)
        })??;
        uprintf!(&mut out, "boot #%u\r\n", resets)?;

        map.with_ram("global_counter", |v| v.write_u16(0, 100))??;
        let greeting = map.with_ram("global_string", |v| {
            let mut s = [0u8; 6];
            v.with_ro_slice(0, 6, |slice| slice.copy_to_slice(&mut s))?;
            Ok::<[u8; 6], MemError>(s)
        })??;
        uprintf!(&mut out, "greeting: %s\r\n", &greeting)?;

        let third = map.with_const("lookup_table", |v| v.read_u16(4))??;
        uprintf!(&mut out, "lookup_table[2] = %u\r\n", third)?;

        let flash = map.progmem("progmem_data")?;
        let mut data = [0u8; 4];
        flash.copy_to(0, &mut data)?;
        uprintf!(&mut out, "progmem_data = %X %X %X %X\r\n", data[0], data[1], data[2], data[3])?;

        let mut cal = map.eeprom("eeprom_calibration")?;
        cal.update_block(0, &[0x5A, 0xA5])?;
        let word = cal.read_word(0)?;
        uprintf!(&mut out, "calibration = %x\r\n", word)?;
    }

    TIMER_TICKS.increment();
    uprintf!(&mut out, "ticks = %u\r\n", TIMER_TICKS.get())?;

    print_memory_map(&mut out, &catalog)?;
    Ok(())
}
