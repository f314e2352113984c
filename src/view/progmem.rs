use crate::{error::MemError, helpers::window_span, space::ProgramSpace};

/// Access to a `ConstIndirect` symbol through the program-space primitive.
///
/// Bytes are copied out one read at a time; no reference into program
/// memory is ever formed.
pub struct ProgmemView<'a, P: ProgramSpace> {
    space: &'a P,
    addr: u32,
    len: usize,
}

impl<'a, P: ProgramSpace> core::fmt::Debug for ProgmemView<'a, P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ProgmemView")
            .field("addr", &self.addr)
            .field("len", &self.len)
            .finish_non_exhaustive()
    }
}

impl<'a, P: ProgramSpace> ProgmemView<'a, P> {
    pub(crate) fn new(space: &'a P, addr: u32, len: usize) -> Self {
        Self { space, addr, len }
    }

    /// Program-space address of the first byte.
    pub fn addr(&self) -> u32 {
        self.addr
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn read_byte(&self, offset: usize) -> Result<u8, MemError> {
        let (start, _) = window_span(self.len, offset, 1)?;
        self.space.read_byte(self.addr + start as u32)
    }

    /// Reads a little-endian word.
    pub fn read_word(&self, offset: usize) -> Result<u16, MemError> {
        let (start, _) = window_span(self.len, offset, 2)?;
        self.space.read_word(self.addr + start as u32)
    }

    /// Copies `dest.len()` bytes starting at `offset` into RAM.
    pub fn copy_to(&self, offset: usize, dest: &mut [u8]) -> Result<(), MemError> {
        let (start, _) = window_span(self.len, offset, dest.len())?;
        for (i, b) in dest.iter_mut().enumerate() {
            *b = self.space.read_byte(self.addr + (start + i) as u32)?;
        }
        Ok(())
    }

    /// Copies a NUL-terminated string into `dest`, stopping at the NUL, the
    /// end of the symbol, or the end of `dest`. Returns the length copied.
    pub fn copy_str(&self, dest: &mut [u8]) -> Result<usize, MemError> {
        let mut n = 0;
        while n < dest.len() && n < self.len {
            let b = self.space.read_byte(self.addr + n as u32)?;
            if b == 0 {
                break;
            }
            dest[n] = b;
            n += 1;
        }
        Ok(n)
    }
}
