//! Human-readable memory map dump.

use crate::{
    catalog::RegionCatalog,
    error::FormatError,
    format::{Arg, render},
    sink::ByteSink,
    types::AddressSpace,
};

/// Prints one line per region followed by the free bytes of each space.
///
/// ```text
/// .data [data] 0x100-0x112 18/18
/// ...
/// free: data 1422 progmem 32747 eeprom 990
/// ```
///
/// Returns the number of bytes pushed to `sink`.
pub fn print_memory_map<S: ByteSink, const RC: usize, const SC: usize>(
    sink: &mut S,
    catalog: &RegionCatalog<RC, SC>,
) -> Result<usize, FormatError<S::Error>> {
    let mut total = 0;
    for r in catalog.regions() {
        total += render(
            sink,
            b"%s [%s] %p-%p %u/%u\r\n",
            &[
                Arg::from(r.name),
                Arg::from(r.class.label()),
                Arg::ptr(r.start as usize),
                Arg::ptr(r.end as usize),
                Arg::Uint(r.used),
                Arg::Uint(r.size),
            ],
        )?;
    }
    total += render(
        sink,
        b"free: data %u progmem %u eeprom %u\r\n",
        &[
            Arg::Uint(catalog.unallocated(AddressSpace::Data)),
            Arg::Uint(catalog.unallocated(AddressSpace::Program)),
            Arg::Uint(catalog.unallocated(AddressSpace::Persistent)),
        ],
    )?;
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{RecordingSink, demo_catalog};

    #[test]
    fn one_line_per_region_plus_summary() {
        let catalog = demo_catalog();
        let mut sink = RecordingSink::new();
        let n = print_memory_map(&mut sink, &catalog).unwrap();

        assert_eq!(n, sink.bytes().len());
        let lines = sink.bytes().split(|&b| b == b'\n').filter(|l| !l.is_empty()).count();
        assert_eq!(lines, catalog.regions().len() + 1);
        assert!(sink.bytes().starts_with(b".data [data] 0x100-0x112 18/18\r\n"));
    }

    #[test]
    fn fixed_region_prints_its_pinned_address() {
        let catalog = demo_catalog();
        let mut sink = RecordingSink::new();
        print_memory_map(&mut sink, &catalog).unwrap();

        let needle = b".fixed_memory [fixed] 0x500-0x600 256/256";
        assert!(sink.bytes().windows(needle.len()).any(|w| w == needle));
    }
}
