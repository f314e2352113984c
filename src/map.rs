//! Class-checked access to cataloged symbols.

use crate::{
    catalog::RegionCatalog,
    error::MemError,
    slice::ROSlice,
    space::{DataSpace, PersistentStore, ProgramSpace},
    types::{AddressSpace, StorageClass},
    view::{ConstView, EepromView, ProgmemView, RamView},
};

/// Binds a catalog to the platform's storage and hands out views.
///
/// Each accessor checks the symbol's storage class first and refuses with
/// [`MemError::Denied`] when the class does not permit that kind of access,
/// e.g. asking for a RAM view of program-space data.
///
/// # Example
/// ```
/// use embedded_memmap::prelude::*;
///
/// let catalog = RegionCatalog::<4, 4>::builder()
///     .layout(Layout::ATMEGA328P)
///     .region(".bss", StorageClass::RamZero, 2)
///     .symbol("ticks", 2)
///     .build()
///     .unwrap();
///
/// let mut image = MemoryImage::<256, 64>::new(0x0100);
/// image.startup(&catalog).unwrap();
/// let mut ee = NoStore;
/// let mut map = MemoryMap::new(&catalog, &mut image, &mut ee);
///
/// map.with_ram("ticks", |v| v.write_u16(0, 42)).unwrap().unwrap();
/// assert_eq!(map.with_ram("ticks", |v| v.read_u16(0)).unwrap(), Ok(42));
/// ```
pub struct MemoryMap<'a, T, E, const RC: usize, const SC: usize>
where
    T: DataSpace + ProgramSpace,
    E: PersistentStore,
{
    catalog: &'a RegionCatalog<RC, SC>,
    target: &'a mut T,
    store: &'a mut E,
}

impl<'a, T, E, const RC: usize, const SC: usize> MemoryMap<'a, T, E, RC, SC>
where
    T: DataSpace + ProgramSpace,
    E: PersistentStore,
{
    pub fn new(catalog: &'a RegionCatalog<RC, SC>, target: &'a mut T, store: &'a mut E) -> Self {
        Self {
            catalog,
            target,
            store,
        }
    }

    pub fn catalog(&self) -> &RegionCatalog<RC, SC> {
        self.catalog
    }

    /// Runs `f` with load/store access to a RAM symbol.
    ///
    /// The closure runs inside a critical section, so the access cannot be
    /// torn by an interrupt handler touching the same variable.
    pub fn with_ram<F, R>(&mut self, name: &str, f: F) -> Result<R, MemError>
    where
        F: FnOnce(&mut RamView<'_>) -> R,
    {
        let (sym, region) = self.catalog.resolve(name)?;
        if !region.class.is_writable() {
            log::warn!("{} is {}, not ram", name, region.class.label());
            return Err(MemError::Denied);
        }

        let target = &mut *self.target;
        critical_section::with(|_| {
            let bytes = target.bytes_mut(sym.addr, sym.size as usize)?;
            let mut view = RamView::new(sym.addr, bytes);
            Ok(f(&mut view))
        })
    }

    /// Runs `f` with read-only access to a `ConstDirect` symbol.
    pub fn with_const<F, R>(&self, name: &str, f: F) -> Result<R, MemError>
    where
        F: FnOnce(ConstView<'_>) -> R,
    {
        let (sym, region) = self.catalog.resolve(name)?;
        if region.class != StorageClass::ConstDirect {
            log::warn!("{} is {}, not rodata", name, region.class.label());
            return Err(MemError::Denied);
        }

        let bytes = self.target.bytes(sym.addr, sym.size as usize)?;
        Ok(f(ConstView::new(sym.addr, bytes)))
    }

    /// Returns a view of a `ConstIndirect` symbol.
    pub fn progmem(&self, name: &str) -> Result<ProgmemView<'_, T>, MemError> {
        let (sym, region) = self.catalog.resolve(name)?;
        if !region.class.needs_indirect_read() {
            log::warn!("{} is {}, not progmem", name, region.class.label());
            return Err(MemError::Denied);
        }
        Ok(ProgmemView::new(&*self.target, sym.addr, sym.size as usize))
    }

    /// Returns a view of a `PersistentByteStore` symbol.
    pub fn eeprom(&mut self, name: &str) -> Result<EepromView<'_, E>, MemError> {
        let (sym, region) = self.catalog.resolve(name)?;
        if region.class != StorageClass::PersistentByteStore {
            log::warn!("{} is {}, not eeprom", name, region.class.label());
            return Err(MemError::Denied);
        }

        let end = sym.addr as usize + sym.size as usize;
        if end > self.store.len() {
            return Err(MemError::OutOfBounds);
        }
        let base = u16::try_from(sym.addr).map_err(|_| MemError::OutOfBounds)?;
        Ok(EepromView::new(&mut *self.store, base, sym.size as usize))
    }

    /// Runs `f` over the raw bytes of a whole data-space region.
    ///
    /// Useful for dumps and checksums; classes are not checked beyond the
    /// region living in ordinary memory.
    pub fn read_region<F, R>(&self, name: &str, f: F) -> Result<R, MemError>
    where
        F: FnOnce(ROSlice<'_>) -> R,
    {
        let region = self.catalog.region(name)?;
        if region.space() != AddressSpace::Data {
            return Err(MemError::Denied);
        }
        let bytes = self.target.bytes(region.start, region.size as usize)?;
        Ok(f(ROSlice::new(bytes)))
    }
}
