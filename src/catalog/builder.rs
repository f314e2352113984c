use core::marker::PhantomData;

use heapless::Vec;

use super::{Layout, RegionCatalog};
use crate::{
    error::MemError,
    types::{AddressSpace, Region, StartupAction, StorageClass, Symbol},
};

// Builder states
pub struct NeedLayout;
pub struct Ready;

#[derive(Clone, Copy)]
struct PendingRegion {
    name: &'static str,
    class: StorageClass,
    fixed: Option<u32>,
    size: u32,
    startup: StartupAction,
}

#[derive(Clone, Copy)]
struct PendingSymbol {
    name: &'static str,
    region: usize,
    size: u32,
    init: Option<&'static [u8]>,
}

/// Declares regions and symbols, then places them like a linker would.
///
/// Declaration errors are remembered and reported by [`build`](Self::build);
/// the first one wins.
///
/// ```
/// use embedded_memmap::prelude::*;
///
/// let catalog = RegionCatalog::<4, 8>::builder()
///     .layout(Layout::ATMEGA328P)
///     .region(".bss", StorageClass::RamZero, 64)
///     .symbol("rx_buffer", 64)
///     .region(".progmem", StorageClass::ConstIndirect, 4)
///     .symbol_init("table", &[0xAA, 0xBB, 0xCC, 0xDD])
///     .build()
///     .unwrap();
///
/// assert_eq!(catalog.region(".bss").unwrap().start, 0x0100);
/// ```
pub struct CatalogBuilder<const RC: usize, const SC: usize, State> {
    layout: Layout,
    regions: Vec<PendingRegion, RC>,
    symbols: Vec<PendingSymbol, SC>,
    error: Option<MemError>,
    _state: PhantomData<State>,
}

impl<const RC: usize, const SC: usize> CatalogBuilder<RC, SC, NeedLayout> {
    pub fn new() -> Self {
        CatalogBuilder {
            layout: Layout::default(),
            regions: Vec::new(),
            symbols: Vec::new(),
            error: None,
            _state: PhantomData,
        }
    }

    /// Sets the address spaces regions are placed into.
    pub fn layout(self, layout: Layout) -> CatalogBuilder<RC, SC, Ready> {
        CatalogBuilder {
            layout,
            regions: self.regions,
            symbols: self.symbols,
            error: self.error,
            _state: PhantomData,
        }
    }
}

impl<const RC: usize, const SC: usize> Default for CatalogBuilder<RC, SC, NeedLayout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const RC: usize, const SC: usize> CatalogBuilder<RC, SC, Ready> {
    /// Declares a region placed after the previous one in its address space.
    ///
    /// `FixedAddress` regions need an address; declare them with
    /// [`fixed_region`](Self::fixed_region).
    pub fn region(mut self, name: &'static str, class: StorageClass, size: u32) -> Self {
        if class == StorageClass::FixedAddress {
            self.fail(MemError::Denied);
            return self;
        }
        self.push_region(PendingRegion {
            name,
            class,
            fixed: None,
            size,
            startup: class.default_startup(),
        })
    }

    /// Declares a RAM region pinned to `addr`.
    pub fn fixed_region(self, name: &'static str, addr: u32, size: u32) -> Self {
        self.push_region(PendingRegion {
            name,
            class: StorageClass::FixedAddress,
            fixed: Some(addr),
            size,
            startup: StorageClass::FixedAddress.default_startup(),
        })
    }

    /// Overrides the startup action of the last declared region.
    ///
    /// Only named groups and fixed regions can change it; other classes
    /// have their startup contract fixed by the class.
    pub fn startup(mut self, action: StartupAction) -> Self {
        match self.regions.last().map(|r| r.class) {
            None => self.fail(MemError::UnknownRegion),
            Some(StorageClass::NamedGroup | StorageClass::FixedAddress)
                if action != StartupAction::None =>
            {
                if let Some(r) = self.regions.last_mut() {
                    r.startup = action;
                }
            }
            Some(_) => self.fail(MemError::Denied),
        }
        self
    }

    /// Adds a zero-initialized member to the last declared region.
    pub fn symbol(self, name: &'static str, size: u32) -> Self {
        self.push_symbol(name, size, None)
    }

    /// Adds a member whose power-on contents are `init`.
    ///
    /// Only regions that startup copies or that live in program space load
    /// an image; anywhere else [`build`](Self::build) fails with
    /// [`MemError::Denied`].
    pub fn symbol_init(self, name: &'static str, init: &'static [u8]) -> Self {
        self.push_symbol(name, init.len() as u32, Some(init))
    }

    /// Adds a member of `size` bytes whose leading bytes are `init`.
    pub fn symbol_sized(self, name: &'static str, size: u32, init: &'static [u8]) -> Self {
        self.push_symbol(name, size, Some(init))
    }

    /// Places everything and validates the result.
    pub fn build(self) -> Result<RegionCatalog<RC, SC>, MemError> {
        if let Some(e) = self.error {
            return Err(e);
        }

        let mut regions: Vec<Region, RC> = Vec::new();
        let mut data_cursor = self.layout.data_origin;
        let mut program_cursor = 0u32;
        let mut persistent_cursor = 0u32;

        for p in self.regions.iter() {
            let space = p.class.address_space();
            let cursor = match space {
                AddressSpace::Data => &mut data_cursor,
                AddressSpace::Program => &mut program_cursor,
                AddressSpace::Persistent => &mut persistent_cursor,
            };

            let start = p.fixed.unwrap_or(*cursor);
            let end = start.checked_add(p.size).ok_or(MemError::OutOfSpace)?;
            let (first, limit) = self.layout.bounds(space);
            if start < first || end > limit {
                log::warn!("region {} ({:#x}..{:#x}) does not fit", p.name, start, end);
                return Err(MemError::OutOfSpace);
            }
            if p.fixed.is_none() {
                *cursor = end;
            }

            let region = Region {
                name: p.name,
                class: p.class,
                start,
                end,
                size: p.size,
                startup: p.startup,
                used: 0,
            };
            if let Some(other) = regions.iter().find(|r| r.overlaps(&region)) {
                log::warn!("region {} overlaps {}", p.name, other.name);
                return Err(MemError::Overlap);
            }
            regions.push(region).map_err(|_| MemError::CatalogFull)?;
        }

        let mut symbols: Vec<Symbol, SC> = Vec::new();
        for p in self.symbols.iter() {
            let region = regions.get_mut(p.region).ok_or(MemError::UnknownRegion)?;
            if p.size > region.free() {
                log::warn!("symbol {} overflows region {}", p.name, region.name);
                return Err(MemError::RegionOverflow);
            }
            // Only copied and burned regions ever load a power-on image.
            if p.init.is_some()
                && region.startup != StartupAction::Copy
                && region.space() != AddressSpace::Program
            {
                log::warn!("symbol {} has an image region {} never loads", p.name, region.name);
                return Err(MemError::Denied);
            }
            let addr = region.start + region.used;
            region.used += p.size;

            symbols
                .push(Symbol {
                    name: p.name,
                    region: p.region,
                    addr,
                    size: p.size,
                    init: p.init,
                })
                .map_err(|_| MemError::CatalogFull)?;
        }

        for r in regions.iter() {
            log::debug!(
                "placed {} [{}] {:#06x}..{:#06x} ({} of {} bytes used)",
                r.name,
                r.class.label(),
                r.start,
                r.end,
                r.used,
                r.size
            );
        }

        let catalog = RegionCatalog::from_parts(self.layout, regions, symbols);
        catalog.check_consistency()?;
        Ok(catalog)
    }

    fn push_region(mut self, region: PendingRegion) -> Self {
        if self.regions.iter().any(|r| r.name == region.name) {
            self.fail(MemError::DuplicateName);
        } else if self.regions.push(region).is_err() {
            self.fail(MemError::CatalogFull);
        }
        self
    }

    fn push_symbol(mut self, name: &'static str, size: u32, init: Option<&'static [u8]>) -> Self {
        let Some(region) = self.regions.len().checked_sub(1) else {
            self.fail(MemError::UnknownRegion);
            return self;
        };
        if init.is_some_and(|i| i.len() > size as usize) {
            self.fail(MemError::InitTooLarge);
        } else if self.symbols.iter().any(|s| s.name == name) {
            self.fail(MemError::DuplicateName);
        } else if self
            .symbols
            .push(PendingSymbol {
                name,
                region,
                size,
                init,
            })
            .is_err()
        {
            self.fail(MemError::CatalogFull);
        }
        self
    }

    fn fail(&mut self, e: MemError) {
        if self.error.is_none() {
            self.error = Some(e);
        }
    }
}
