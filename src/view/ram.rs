use crate::{
    error::MemError,
    helpers::window_span,
    slice::{ROSlice, RWSlice},
};

/// Load/store access to a RAM-resident symbol.
///
/// Covers `RamInit`, `RamZero`, `RamRaw`, `NamedGroup` and `FixedAddress`.
pub struct RamView<'a> {
    addr: u32,
    bytes: &'a mut [u8],
}

impl<'a> core::fmt::Debug for RamView<'a> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RamView")
            .field("addr", &self.addr)
            .field("len", &self.bytes.len())
            .finish_non_exhaustive()
    }
}

impl<'a> RamView<'a> {
    pub(crate) fn new(addr: u32, bytes: &'a mut [u8]) -> Self {
        Self { addr, bytes }
    }

    /// Absolute address of the first byte.
    pub fn addr(&self) -> u32 {
        self.addr
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Provides zero-copy read access to `len` bytes at `offset`.
    pub fn with_ro_slice<F, R>(&self, offset: usize, len: usize, f: F) -> Result<R, MemError>
    where
        F: FnOnce(ROSlice<'_>) -> R,
    {
        let (start, end) = window_span(self.bytes.len(), offset, len)?;
        Ok(f(ROSlice::new(&self.bytes[start..end])))
    }

    /// Provides zero-copy read-write access to `len` bytes at `offset`.
    pub fn with_rw_slice<F, R>(&mut self, offset: usize, len: usize, f: F) -> Result<R, MemError>
    where
        F: FnOnce(RWSlice<'_>) -> R,
    {
        let (start, end) = window_span(self.bytes.len(), offset, len)?;
        Ok(f(RWSlice::new(&mut self.bytes[start..end])))
    }

    pub fn read_u8(&self, offset: usize) -> Result<u8, MemError> {
        self.bytes.get(offset).copied().ok_or(MemError::OutOfBounds)
    }

    pub fn write_u8(&mut self, offset: usize, value: u8) -> Result<(), MemError> {
        let cell = self.bytes.get_mut(offset).ok_or(MemError::OutOfBounds)?;
        *cell = value;
        Ok(())
    }

    pub fn read_u16(&self, offset: usize) -> Result<u16, MemError> {
        self.with_ro_slice(offset, 2, |s| s.read_u16_le_at(0))
    }

    pub fn write_u16(&mut self, offset: usize, value: u16) -> Result<(), MemError> {
        self.with_rw_slice(offset, 2, |mut s| s.write_u16_le_at(0, value))
    }

    /// Fills the whole symbol with `value`.
    pub fn fill(&mut self, value: u8) {
        self.bytes.fill(value);
    }
}
