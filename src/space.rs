//! Platform-supplied raw storage.
//!
//! The crate never dereferences target addresses itself. A platform hands
//! in one implementation per address space, and the accessors in
//! [`view`](crate::view) only ever reach storage through these traits.

use crate::error::MemError;

/// Ordinary load/store memory.
pub trait DataSpace {
    /// Borrows `len` bytes starting at the absolute address `addr`.
    fn bytes(&self, addr: u32, len: usize) -> Result<&[u8], MemError>;

    /// Mutably borrows `len` bytes starting at the absolute address `addr`.
    fn bytes_mut(&mut self, addr: u32, len: usize) -> Result<&mut [u8], MemError>;
}

/// Program storage that ordinary loads cannot reach.
///
/// There is deliberately no slice access: every byte goes through the
/// dedicated read primitive (`lpm` on AVR).
pub trait ProgramSpace {
    /// Reads one byte from program space.
    fn read_byte(&self, addr: u32) -> Result<u8, MemError>;

    /// Reads a little-endian word from program space.
    fn read_word(&self, addr: u32) -> Result<u16, MemError> {
        let lo = self.read_byte(addr)?;
        let hi = self.read_byte(addr.checked_add(1).ok_or(MemError::OutOfBounds)?)?;
        Ok(u16::from_le_bytes([lo, hi]))
    }
}

/// Byte-addressable non-volatile store with a busy/ready protocol.
///
/// Each programmed cell wears; the endurance budget is finite (typically
/// on the order of 100k cycles per cell) and is not tracked here.
pub trait PersistentStore {
    /// Number of addressable bytes.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Polls the device. Returns true when no write is in progress.
    fn is_ready(&mut self) -> bool;

    /// Reads the current value of a cell. Only called while the store is ready.
    fn read_byte(&self, addr: u16) -> u8;

    /// Starts programming a cell. Only called while the store is ready.
    fn begin_write(&mut self, addr: u16, value: u8);
}

/// Placeholder for targets without a persistent store.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoStore;

impl PersistentStore for NoStore {
    fn len(&self) -> usize {
        0
    }

    fn is_ready(&mut self) -> bool {
        true
    }

    fn read_byte(&self, _addr: u16) -> u8 {
        0xFF
    }

    fn begin_write(&mut self, _addr: u16, _value: u8) {}
}
