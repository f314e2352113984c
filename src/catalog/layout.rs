use crate::types::AddressSpace;

/// Extent of each address space on a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// First data-space address backed by RAM (below it sit I/O registers).
    pub data_origin: u32,
    /// Bytes of RAM.
    pub data_size: u32,
    /// Bytes of program storage.
    pub program_size: u32,
    /// Bytes of the persistent byte store.
    pub persistent_size: u32,
}

impl Layout {
    /// ATmega328P: 2 KiB SRAM at 0x0100, 32 KiB flash, 1 KiB EEPROM.
    pub const ATMEGA328P: Layout = Layout::new(0x0100, 2048, 32 * 1024, 1024);

    pub const fn new(
        data_origin: u32,
        data_size: u32,
        program_size: u32,
        persistent_size: u32,
    ) -> Self {
        Self {
            data_origin,
            data_size,
            program_size,
            persistent_size,
        }
    }

    /// Returns `(first, end)` addresses of a space, `end` exclusive.
    pub fn bounds(&self, space: AddressSpace) -> (u32, u32) {
        match space {
            AddressSpace::Data => (
                self.data_origin,
                self.data_origin.saturating_add(self.data_size),
            ),
            AddressSpace::Program => (0, self.program_size),
            AddressSpace::Persistent => (0, self.persistent_size),
        }
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::ATMEGA328P
    }
}
