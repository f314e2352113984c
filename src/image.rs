//! Host model of a target's RAM and program memory.

use bitmaps::{Bits, BitsImpl};

use crate::{
    catalog::RegionCatalog,
    error::MemError,
    helpers::address_span,
    space::{DataSpace, ProgramSpace},
    types::{AddressSpace, StartupAction},
};

/// Erased flash reads as all ones.
const ERASED: u8 = 0xFF;

/// RAM and program memory of a simulated target.
///
/// # Const Generics
/// - `DS`: bytes of RAM, mapped from `origin`
/// - `PS`: bytes of program memory, mapped from 0
#[derive(Clone)]
pub struct MemoryImage<const DS: usize, const PS: usize> {
    origin: u32,
    data: [u8; DS],
    program: [u8; PS],
}

impl<const DS: usize, const PS: usize> MemoryImage<DS, PS> {
    /// Creates an image with RAM starting at `origin`.
    ///
    /// RAM starts zeroed and flash erased.
    pub fn new(origin: u32) -> Self {
        Self {
            origin,
            data: [0; DS],
            program: [ERASED; PS],
        }
    }

    pub fn origin(&self) -> u32 {
        self.origin
    }

    /// Burns the power-on contents of every program-space symbol.
    ///
    /// Data-space images are not burned: [`startup`](Self::startup) copies
    /// them straight from the catalog.
    pub fn flash<const RC: usize, const SC: usize>(
        &mut self,
        catalog: &RegionCatalog<RC, SC>,
    ) -> Result<(), MemError> {
        for sym in catalog.symbols() {
            let region = catalog.regions().get(sym.region).ok_or(MemError::Inconsistent)?;
            if region.space() != AddressSpace::Program {
                continue;
            }
            let Some(init) = sym.init else { continue };
            if init.is_empty() {
                continue;
            }
            let (start, end) = address_span(0, PS, sym.addr, init.len())?;
            self.program[start..end].copy_from_slice(init);
        }
        Ok(())
    }

    /// Runs the startup step: copies initialized regions, zeroes cleared
    /// ones, and leaves skipped regions untouched.
    ///
    /// Calling it again without [`power_loss`](Self::power_loss) models a
    /// reset: RAM keeps its contents, so skipped regions survive.
    pub fn startup<const RC: usize, const SC: usize>(
        &mut self,
        catalog: &RegionCatalog<RC, SC>,
    ) -> Result<(), MemError>
    where
        BitsImpl<RC>: Bits,
    {
        let mask = catalog.startup_mask();
        let mut idx = mask.first_index();
        while let Some(i) = idx {
            let region = catalog.regions().get(i).ok_or(MemError::Inconsistent)?;
            if region.size > 0 {
                let block = self.bytes_mut(region.start, region.size as usize)?;
                block.fill(0);
            }

            if region.startup == StartupAction::Copy {
                for sym in catalog.symbols_in(i) {
                    let Some(init) = sym.init else { continue };
                    if init.is_empty() {
                        continue;
                    }
                    self.bytes_mut(sym.addr, init.len())?.copy_from_slice(init);
                }
            }

            log::debug!("startup {:?} {} ({} bytes)", region.startup, region.name, region.size);
            idx = mask.next_index(i);
        }
        Ok(())
    }

    /// Loses power: RAM contents become undefined, modeled as `pattern`.
    pub fn power_loss(&mut self, pattern: u8) {
        self.data.fill(pattern);
    }
}

impl<const DS: usize, const PS: usize> DataSpace for MemoryImage<DS, PS> {
    fn bytes(&self, addr: u32, len: usize) -> Result<&[u8], MemError> {
        let (start, end) = address_span(self.origin, DS, addr, len)?;
        Ok(&self.data[start..end])
    }

    fn bytes_mut(&mut self, addr: u32, len: usize) -> Result<&mut [u8], MemError> {
        let (start, end) = address_span(self.origin, DS, addr, len)?;
        Ok(&mut self.data[start..end])
    }
}

impl<const DS: usize, const PS: usize> ProgramSpace for MemoryImage<DS, PS> {
    fn read_byte(&self, addr: u32) -> Result<u8, MemError> {
        self.program
            .get(addr as usize)
            .copied()
            .ok_or(MemError::OutOfBounds)
    }
}

impl<const DS: usize, const PS: usize> core::fmt::Debug for MemoryImage<DS, PS> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MemoryImage")
            .field("origin", &self.origin)
            .field("data_size", &DS)
            .field("program_size", &PS)
            .finish_non_exhaustive()
    }
}
