//! Simulated persistent byte store.

use crate::space::PersistentStore;

/// Erased EEPROM cells read as all ones.
const ERASED: u8 = 0xFF;

/// Progress of a single cell write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteState {
    Idle,
    /// `begin_write` was called; the device has not been polled since.
    Requested { addr: u16, value: u8 },
    /// Programming; `remaining` more polls report busy.
    Busy { addr: u16, value: u8, remaining: u32 },
}

/// In-memory EEPROM with a write latency measured in ready polls.
///
/// A write moves `Idle -> Requested -> Busy -> Idle`. The cell takes its
/// new value when the device returns to idle; a read while busy sees the
/// old value.
#[derive(Debug, Clone)]
pub struct SimEeprom<const N: usize> {
    cells: [u8; N],
    state: WriteState,
    latency: u32,
    polls: u32,
    programs: u32,
}

impl<const N: usize> SimEeprom<N> {
    /// Creates an erased store whose writes stay busy for `latency` polls.
    pub fn new(latency: u32) -> Self {
        Self {
            cells: [ERASED; N],
            state: WriteState::Idle,
            latency,
            polls: 0,
            programs: 0,
        }
    }

    pub fn state(&self) -> WriteState {
        self.state
    }

    /// Total calls to `is_ready`.
    pub fn polls(&self) -> u32 {
        self.polls
    }

    /// Completed programming cycles across all cells.
    pub fn programs(&self) -> u32 {
        self.programs
    }

    /// Raw cell contents, bypassing the protocol.
    pub fn cells(&self) -> &[u8; N] {
        &self.cells
    }
}

impl<const N: usize> Default for SimEeprom<N> {
    fn default() -> Self {
        Self::new(0)
    }
}

impl<const N: usize> PersistentStore for SimEeprom<N> {
    fn len(&self) -> usize {
        N
    }

    fn is_ready(&mut self) -> bool {
        self.polls += 1;
        match self.state {
            WriteState::Idle => true,
            WriteState::Requested { addr, value } => {
                self.state = WriteState::Busy {
                    addr,
                    value,
                    remaining: self.latency,
                };
                false
            }
            WriteState::Busy {
                addr,
                value,
                remaining: 0,
            } => {
                if let Some(cell) = self.cells.get_mut(addr as usize) {
                    *cell = value;
                }
                self.programs += 1;
                self.state = WriteState::Idle;
                true
            }
            WriteState::Busy {
                addr,
                value,
                remaining,
            } => {
                self.state = WriteState::Busy {
                    addr,
                    value,
                    remaining: remaining - 1,
                };
                false
            }
        }
    }

    fn read_byte(&self, addr: u16) -> u8 {
        self.cells.get(addr as usize).copied().unwrap_or(ERASED)
    }

    fn begin_write(&mut self, addr: u16, value: u8) {
        self.state = WriteState::Requested { addr, value };
    }
}
