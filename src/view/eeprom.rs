use crate::{error::MemError, helpers::window_span, space::PersistentStore};

/// Access to a `PersistentByteStore` symbol.
///
/// Every operation waits for the store to be ready before touching it, and
/// writes wait again after programming, so a read straight after a write
/// always sees the new value. There is no timeout: a store that never
/// becomes ready blocks forever.
///
/// Cells wear out after a finite number of programming cycles. Prefer
/// [`update_byte`](Self::update_byte) for values that rarely change.
pub struct EepromView<'a, E: PersistentStore> {
    store: &'a mut E,
    base: u16,
    len: usize,
}

impl<'a, E: PersistentStore> core::fmt::Debug for EepromView<'a, E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EepromView")
            .field("base", &self.base)
            .field("len", &self.len)
            .finish_non_exhaustive()
    }
}

impl<'a, E: PersistentStore> EepromView<'a, E> {
    pub(crate) fn new(store: &'a mut E, base: u16, len: usize) -> Self {
        Self { store, base, len }
    }

    /// Store address of the first byte.
    pub fn addr(&self) -> u16 {
        self.base
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn read_byte(&mut self, offset: usize) -> Result<u8, MemError> {
        let addr = self.cell(offset, 1)?;
        self.wait_ready();
        Ok(self.store.read_byte(addr))
    }

    /// Reads a little-endian word.
    pub fn read_word(&mut self, offset: usize) -> Result<u16, MemError> {
        let mut raw = [0u8; 2];
        self.read_block(offset, &mut raw)?;
        Ok(u16::from_le_bytes(raw))
    }

    pub fn read_block(&mut self, offset: usize, dest: &mut [u8]) -> Result<(), MemError> {
        self.cell(offset, dest.len())?;
        self.wait_ready();
        for (i, b) in dest.iter_mut().enumerate() {
            let addr = self.cell(offset + i, 1)?;
            *b = self.store.read_byte(addr);
        }
        Ok(())
    }

    /// Programs one cell, even if it already holds `value`.
    pub fn write_byte(&mut self, offset: usize, value: u8) -> Result<(), MemError> {
        let addr = self.cell(offset, 1)?;
        self.program(addr, value);
        Ok(())
    }

    /// Programs one cell only if its value differs. Returns true if a
    /// programming cycle was spent.
    pub fn update_byte(&mut self, offset: usize, value: u8) -> Result<bool, MemError> {
        let addr = self.cell(offset, 1)?;
        self.wait_ready();
        if self.store.read_byte(addr) == value {
            return Ok(false);
        }
        self.program(addr, value);
        Ok(true)
    }

    /// Writes a little-endian word.
    pub fn write_word(&mut self, offset: usize, value: u16) -> Result<(), MemError> {
        self.write_block(offset, &value.to_le_bytes())
    }

    pub fn write_block(&mut self, offset: usize, src: &[u8]) -> Result<(), MemError> {
        self.cell(offset, src.len())?;
        for (i, &b) in src.iter().enumerate() {
            let addr = self.cell(offset + i, 1)?;
            self.program(addr, b);
        }
        Ok(())
    }

    /// Like [`write_block`](Self::write_block) but skips unchanged cells.
    /// Returns the number of cells programmed.
    pub fn update_block(&mut self, offset: usize, src: &[u8]) -> Result<usize, MemError> {
        self.cell(offset, src.len())?;
        let mut programmed = 0;
        for (i, &b) in src.iter().enumerate() {
            if self.update_byte(offset + i, b)? {
                programmed += 1;
            }
        }
        Ok(programmed)
    }

    /// Store address of `offset`, once the whole `len`-byte range is known
    /// to sit inside the window and the 16-bit address space.
    fn cell(&self, offset: usize, len: usize) -> Result<u16, MemError> {
        let (start, end) = window_span(self.len, offset, len)?;
        let last = u16::try_from(end - 1).map_err(|_| MemError::OutOfBounds)?;
        self.base.checked_add(last).ok_or(MemError::OutOfBounds)?;
        let start = u16::try_from(start).map_err(|_| MemError::OutOfBounds)?;
        self.base.checked_add(start).ok_or(MemError::OutOfBounds)
    }

    fn program(&mut self, addr: u16, value: u8) {
        self.wait_ready();
        log::trace!("eeprom write {:#06x} <- {:#04x}", addr, value);
        self.store.begin_write(addr, value);
        self.wait_ready();
    }

    fn wait_ready(&mut self) {
        while !self.store.is_ready() {
            core::hint::spin_loop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        eeprom::{SimEeprom, WriteState},
        space::NoStore,
    };

    #[test]
    fn write_blocks_until_the_store_is_idle() {
        let mut ee = SimEeprom::<64>::new(5);
        let mut view = EepromView::new(&mut ee, 32, 2);

        view.write_word(0, 0x1234).unwrap();
        assert_eq!(view.read_word(0).unwrap(), 0x1234);
        drop(view);

        assert_eq!(ee.state(), WriteState::Idle);
        assert_eq!(&ee.cells()[32..34], &[0x34, 0x12]);
        assert_eq!(ee.programs(), 2);
    }

    #[test]
    fn update_skips_unchanged_cells() {
        let mut ee = SimEeprom::<8>::new(1);
        let mut view = EepromView::new(&mut ee, 0, 8);

        assert!(!view.update_byte(0, 0xFF).unwrap());
        assert!(view.update_byte(0, 0x01).unwrap());
        assert_eq!(view.update_block(0, &[0x01, 0x02, 0xFF]).unwrap(), 1);
        drop(view);

        assert_eq!(ee.programs(), 2);
    }

    #[test]
    fn window_is_enforced() {
        let mut ee = SimEeprom::<8>::new(0);
        let mut view = EepromView::new(&mut ee, 4, 2);

        assert_eq!(view.read_byte(2), Err(MemError::OutOfBounds));
        assert_eq!(view.write_word(1, 0), Err(MemError::OutOfBounds));
        assert_eq!(view.write_block(0, &[]), Err(MemError::ZeroLength));
        drop(view);
        assert_eq!(ee.programs(), 0);
    }

    #[test]
    fn addresses_past_the_16_bit_space_are_out_of_bounds() {
        let mut store = NoStore;
        let mut view = EepromView::new(&mut store, 0xFFFE, 4);

        assert_eq!(view.read_byte(1), Ok(0xFF));
        assert_eq!(view.read_byte(2), Err(MemError::OutOfBounds));
        assert_eq!(view.read_word(1), Err(MemError::OutOfBounds));
        assert_eq!(view.write_block(0, &[0; 3]), Err(MemError::OutOfBounds));
        assert_eq!(view.update_byte(3, 1), Err(MemError::OutOfBounds));
    }

    #[test]
    fn block_read_round_trips_settings() {
        let mut ee = SimEeprom::<32>::new(3);
        let mut view = EepromView::new(&mut ee, 0, 32);

        view.write_block(4, b"cfg").unwrap();
        let mut out = [0u8; 3];
        view.read_block(4, &mut out).unwrap();
        assert_eq!(&out, b"cfg");
    }
}
