//! Declared memory regions and the variables placed in them.
//!
//! A [`RegionCatalog`] is the host-side equivalent of a linker map: every
//! region has a storage class, a start and end address, and an ordered
//! list of member symbols. Accessors consult it to decide which access
//! discipline a symbol needs.

mod builder;
mod layout;

use bitmaps::{Bitmap, Bits, BitsImpl};
use heapless::Vec;

pub use builder::{CatalogBuilder, NeedLayout, Ready};
pub use layout::Layout;

use crate::{
    error::MemError,
    types::{AddressSpace, Region, StartupAction, Symbol},
};

/// Placed regions and symbols.
///
/// # Const Generics
/// - `RC`: maximum number of regions
/// - `SC`: maximum number of symbols
#[derive(Debug, Clone)]
pub struct RegionCatalog<const RC: usize, const SC: usize> {
    layout: Layout,
    regions: Vec<Region, RC>,
    symbols: Vec<Symbol, SC>,
}

impl<const RC: usize, const SC: usize> RegionCatalog<RC, SC> {
    /// Starts declaring a catalog.
    pub fn builder() -> CatalogBuilder<RC, SC, NeedLayout> {
        CatalogBuilder::new()
    }

    pub(crate) fn from_parts(
        layout: Layout,
        regions: Vec<Region, RC>,
        symbols: Vec<Symbol, SC>,
    ) -> Self {
        Self {
            layout,
            regions,
            symbols,
        }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn region(&self, name: &str) -> Result<&Region, MemError> {
        self.regions
            .iter()
            .find(|r| r.name == name)
            .ok_or(MemError::UnknownRegion)
    }

    pub fn symbol(&self, name: &str) -> Result<&Symbol, MemError> {
        self.symbols
            .iter()
            .find(|s| s.name == name)
            .ok_or(MemError::UnknownSymbol)
    }

    /// Looks up a symbol together with the region that holds it.
    pub fn resolve(&self, name: &str) -> Result<(&Symbol, &Region), MemError> {
        let sym = self.symbol(name)?;
        let region = self.regions.get(sym.region).ok_or(MemError::Inconsistent)?;
        Ok((sym, region))
    }

    /// Members of the region at `index`, in declaration order.
    pub fn symbols_in(&self, index: usize) -> impl Iterator<Item = &Symbol> + '_ {
        self.symbols.iter().filter(move |s| s.region == index)
    }

    /// Bytes of `space` not covered by any region.
    pub fn unallocated(&self, space: AddressSpace) -> u32 {
        let (first, end) = self.layout.bounds(space);
        let taken: u32 = self
            .regions
            .iter()
            .filter(|r| r.space() == space)
            .map(|r| r.size)
            .sum();
        (end - first).saturating_sub(taken)
    }

    /// Re-verifies the placement invariants.
    ///
    /// * every region satisfies `end - start == size` and fits its space
    /// * no two regions in one space overlap
    /// * members of a region are contiguous, in declaration order, starting
    ///   at the region start, and add up to `used`
    pub fn check_consistency(&self) -> Result<(), MemError> {
        for (i, r) in self.regions.iter().enumerate() {
            if r.end < r.start || r.span() != r.size || r.used > r.size {
                return Err(MemError::Inconsistent);
            }
            let (first, end) = self.layout.bounds(r.space());
            if r.start < first || r.end > end {
                return Err(MemError::OutOfSpace);
            }
            if self.regions[..i].iter().any(|other| other.overlaps(r)) {
                return Err(MemError::Overlap);
            }

            let mut cursor = r.start;
            for s in self.symbols_in(i) {
                if s.addr != cursor {
                    return Err(MemError::Inconsistent);
                }
                cursor += s.size;
            }
            if cursor - r.start != r.used {
                return Err(MemError::Inconsistent);
            }
        }
        Ok(())
    }

    /// Regions the startup code has to touch, one bit per region index.
    ///
    /// Regions whose startup is [`StartupAction::Skip`] or
    /// [`StartupAction::None`] stay clear, so they keep whatever they held.
    pub fn startup_mask(&self) -> Bitmap<RC>
    where
        BitsImpl<RC>: Bits,
    {
        let mut mask = Bitmap::new();
        for (i, r) in self.regions.iter().enumerate() {
            if matches!(r.startup, StartupAction::Copy | StartupAction::Zero) {
                mask.set(i, true);
            }
        }
        mask
    }
}
