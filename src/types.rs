/// Physical storage class of a region. Decides how its data may be reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageClass {
    /// Volatile RAM with a power-on value copied from a read-only image (`.data`).
    RamInit,
    /// Volatile RAM cleared to zero at power-on (`.bss`).
    RamZero,
    /// Volatile RAM left untouched by startup, so it survives a reset (`.noinit`).
    RamRaw,
    /// Read-only data reachable with ordinary loads (`.rodata`).
    ConstDirect,
    /// Read-only data in program storage, readable only through the
    /// program-space read primitive (`PROGMEM`).
    ConstIndirect,
    /// Variables grouped under a shared section name. Behaves like RAM;
    /// startup defaults to zeroing.
    NamedGroup,
    /// RAM pinned to one absolute address.
    FixedAddress,
    /// Byte-addressable non-volatile store outside the data address space (`EEMEM`).
    PersistentByteStore,
}

/// Address space a region lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressSpace {
    /// Normal load/store space.
    Data,
    /// Program storage, reached through the special read primitive.
    Program,
    /// Separate non-volatile byte store.
    Persistent,
}

/// What the startup code does to a region before `main` runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartupAction {
    /// Copy the power-on image into place.
    Copy,
    /// Fill with zeros.
    Zero,
    /// Leave the previous contents alone.
    Skip,
    /// Not in volatile memory; nothing to do.
    None,
}

impl StorageClass {
    /// Returns true if ordinary stores may target this class.
    pub fn is_writable(&self) -> bool {
        matches!(
            self,
            StorageClass::RamInit
                | StorageClass::RamZero
                | StorageClass::RamRaw
                | StorageClass::NamedGroup
                | StorageClass::FixedAddress
        )
    }

    /// Returns true if reads must go through the program-space primitive.
    pub fn needs_indirect_read(&self) -> bool {
        matches!(self, StorageClass::ConstIndirect)
    }

    pub fn address_space(&self) -> AddressSpace {
        match self {
            StorageClass::ConstIndirect => AddressSpace::Program,
            StorageClass::PersistentByteStore => AddressSpace::Persistent,
            _ => AddressSpace::Data,
        }
    }

    /// Startup behavior unless a region overrides it.
    pub fn default_startup(&self) -> StartupAction {
        match self {
            // Const data is copied into RAM on targets where loads cannot reach flash.
            StorageClass::RamInit | StorageClass::ConstDirect => StartupAction::Copy,
            StorageClass::RamZero | StorageClass::NamedGroup | StorageClass::FixedAddress => {
                StartupAction::Zero
            }
            StorageClass::RamRaw => StartupAction::Skip,
            StorageClass::ConstIndirect | StorageClass::PersistentByteStore => {
                StartupAction::None
            }
        }
    }

    /// Short section-style label used in diagnostics.
    pub fn label(&self) -> &'static str {
        match self {
            StorageClass::RamInit => "data",
            StorageClass::RamZero => "bss",
            StorageClass::RamRaw => "noinit",
            StorageClass::ConstDirect => "rodata",
            StorageClass::ConstIndirect => "progmem",
            StorageClass::NamedGroup => "group",
            StorageClass::FixedAddress => "fixed",
            StorageClass::PersistentByteStore => "eeprom",
        }
    }
}

/// A placed region, bounded like a pair of linker start/end symbols.
///
/// A consistent region has `end - start == size`; see
/// [`RegionCatalog::check_consistency`](crate::catalog::RegionCatalog::check_consistency).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub name: &'static str,
    pub class: StorageClass,
    /// First byte.
    pub start: u32,
    /// One past the last byte.
    pub end: u32,
    /// Declared size.
    pub size: u32,
    pub startup: StartupAction,
    /// Bytes taken by member symbols.
    pub used: u32,
}

impl Region {
    /// Size measured from the bounds, as diagnostics report it.
    #[inline]
    pub fn span(&self) -> u32 {
        self.end.wrapping_sub(self.start)
    }

    #[inline]
    pub fn space(&self) -> AddressSpace {
        self.class.address_space()
    }

    /// Returns true if the two regions share an address space and at least one byte.
    pub fn overlaps(&self, other: &Region) -> bool {
        self.space() == other.space()
            && self.size > 0
            && other.size > 0
            && self.start < other.end
            && other.start < self.end
    }

    #[inline]
    pub fn free(&self) -> u32 {
        self.size.saturating_sub(self.used)
    }
}

/// A variable placed inside a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Symbol {
    pub name: &'static str,
    /// Index of the owning region in the catalog.
    pub region: usize,
    /// Absolute address in the region's address space.
    pub addr: u32,
    pub size: u32,
    /// Power-on contents. Shorter images are zero-padded.
    pub init: Option<&'static [u8]>,
}
