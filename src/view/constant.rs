use crate::{error::MemError, helpers::window_span, slice::ROSlice};

/// Read-only access to a `ConstDirect` symbol. There is no way to write.
#[derive(Debug, Clone, Copy)]
pub struct ConstView<'a> {
    addr: u32,
    bytes: &'a [u8],
}

impl<'a> ConstView<'a> {
    pub(crate) fn new(addr: u32, bytes: &'a [u8]) -> Self {
        Self { addr, bytes }
    }

    pub fn addr(&self) -> u32 {
        self.addr
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn with_ro_slice<F, R>(&self, offset: usize, len: usize, f: F) -> Result<R, MemError>
    where
        F: FnOnce(ROSlice<'_>) -> R,
    {
        let (start, end) = window_span(self.bytes.len(), offset, len)?;
        Ok(f(ROSlice::new(&self.bytes[start..end])))
    }

    /// The whole symbol.
    pub fn as_slice(&self) -> ROSlice<'a> {
        ROSlice::new(self.bytes)
    }

    pub fn read_u8(&self, offset: usize) -> Result<u8, MemError> {
        self.bytes.get(offset).copied().ok_or(MemError::OutOfBounds)
    }

    pub fn read_u16(&self, offset: usize) -> Result<u16, MemError> {
        self.with_ro_slice(offset, 2, |s| s.read_u16_le_at(0))
    }
}
