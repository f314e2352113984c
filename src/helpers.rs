//! Bounds arithmetic for windows into regions and address spaces.
//!
//! These helpers are useful when implementing custom
//! [`DataSpace`](crate::space::DataSpace) or
//! [`ProgramSpace`](crate::space::ProgramSpace) types that need to map an
//! absolute address onto backing storage.

use crate::error::MemError;

/// Calculates the byte range `offset..offset + len` inside a window of
/// `window` bytes.
///
/// Returns `(start, end)` with `end` exclusive.
///
/// # Errors
/// * [`MemError::ZeroLength`] - if `len` is 0
/// * [`MemError::OutOfBounds`] - if the range leaves the window
///
/// # Example
/// ```
/// use embedded_memmap::helpers::window_span;
///
/// assert_eq!(window_span(16, 4, 4), Ok((4, 8)));
/// assert!(window_span(16, 14, 4).is_err());
/// ```
pub fn window_span(window: usize, offset: usize, len: usize) -> Result<(usize, usize), MemError> {
    if len == 0 {
        return Err(MemError::ZeroLength);
    }

    let end = offset.checked_add(len).ok_or(MemError::OutOfBounds)?;
    if end > window {
        return Err(MemError::OutOfBounds);
    }

    Ok((offset, end))
}

/// Maps an absolute address range onto storage that starts at `origin`
/// and holds `window` bytes.
///
/// # Example
/// ```
/// use embedded_memmap::helpers::address_span;
///
/// // 2 KiB of SRAM mapped at 0x0100
/// assert_eq!(address_span(0x0100, 2048, 0x0500, 256), Ok((0x400, 0x500)));
/// assert!(address_span(0x0100, 2048, 0x0040, 1).is_err());
/// ```
pub fn address_span(
    origin: u32,
    window: usize,
    addr: u32,
    len: usize,
) -> Result<(usize, usize), MemError> {
    let offset = addr.checked_sub(origin).ok_or(MemError::OutOfBounds)?;
    window_span(window, offset as usize, len)
}

#[test]
fn window_span_edge_cases() {
    // Zero length
    assert_eq!(window_span(16, 0, 0), Err(MemError::ZeroLength));

    // Out of bounds
    assert_eq!(window_span(16, 15, 2), Err(MemError::OutOfBounds));
    assert_eq!(window_span(16, usize::MAX, 2), Err(MemError::OutOfBounds));

    // Last byte
    assert_eq!(window_span(16, 15, 1), Ok((15, 16)));

    // Whole window
    assert_eq!(window_span(16, 0, 16), Ok((0, 16)));
}

#[test]
fn address_span_below_origin_is_out_of_bounds() {
    assert_eq!(address_span(0x100, 16, 0xFF, 1), Err(MemError::OutOfBounds));
    assert_eq!(address_span(0x100, 16, 0x100, 16), Ok((0, 16)));
}
