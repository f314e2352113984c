use super::buffer::RenderBuffer;

const LOWER: &[u8; 16] = b"0123456789abcdef";
const UPPER: &[u8; 16] = b"0123456789ABCDEF";

/// Enough for a 64-bit value in decimal, which also covers a 64-bit address in hex.
const SCRATCH: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Radix {
    Decimal,
    HexLower,
    HexUpper,
}

impl Radix {
    fn base(self) -> u64 {
        match self {
            Radix::Decimal => 10,
            Radix::HexLower | Radix::HexUpper => 16,
        }
    }

    fn table(self) -> &'static [u8; 16] {
        match self {
            Radix::HexUpper => UPPER,
            Radix::Decimal | Radix::HexLower => LOWER,
        }
    }
}

/// Writes the minimal digit sequence of `value` into `out`.
///
/// Digits are produced least significant first into a scratch array and
/// copied out most significant first. Zero renders as `0`.
pub(crate) fn push_unsigned<const N: usize>(out: &mut RenderBuffer<N>, value: u64, radix: Radix) {
    let mut scratch = [0u8; SCRATCH];
    let mut n = 0;
    let mut v = value;
    let base = radix.base();
    let table = radix.table();

    loop {
        scratch[n] = table[(v % base) as usize];
        n += 1;
        v /= base;
        if v == 0 {
            break;
        }
    }

    for &d in scratch[..n].iter().rev() {
        if !out.push(d) {
            break;
        }
    }
}

/// Writes `value` in decimal with a leading `-` when negative.
pub(crate) fn push_signed<const N: usize>(out: &mut RenderBuffer<N>, value: i32) {
    if value < 0 && !out.push(b'-') {
        return;
    }
    // unsigned_abs keeps i32::MIN in range.
    push_unsigned(out, value.unsigned_abs() as u64, Radix::Decimal);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unsigned(value: u64, radix: Radix) -> RenderBuffer<32> {
        let mut buf = RenderBuffer::new();
        push_unsigned(&mut buf, value, radix);
        buf
    }

    fn signed(value: i32) -> RenderBuffer<32> {
        let mut buf = RenderBuffer::new();
        push_signed(&mut buf, value);
        buf
    }

    #[test]
    fn zero_is_a_single_digit() {
        assert_eq!(unsigned(0, Radix::Decimal).as_bytes(), b"0");
        assert_eq!(unsigned(0, Radix::HexUpper).as_bytes(), b"0");
        assert_eq!(signed(0).as_bytes(), b"0");
    }

    #[test]
    fn integer_extremes() {
        assert_eq!(signed(i32::MIN).as_bytes(), b"-2147483648");
        assert_eq!(signed(i32::MAX).as_bytes(), b"2147483647");
        assert_eq!(unsigned(u32::MAX as u64, Radix::Decimal).as_bytes(), b"4294967295");
        assert_eq!(unsigned(u32::MAX as u64, Radix::HexLower).as_bytes(), b"ffffffff");
        assert_eq!(unsigned(u64::MAX, Radix::Decimal).as_bytes(), b"18446744073709551615");
    }

    #[test]
    fn hex_case_follows_radix() {
        assert_eq!(unsigned(0xAB, Radix::HexLower).as_bytes(), b"ab");
        assert_eq!(unsigned(0xAB, Radix::HexUpper).as_bytes(), b"AB");
    }

    #[test]
    fn digits_truncate_most_significant_first() {
        let mut buf = RenderBuffer::<4>::new();
        push_unsigned(&mut buf, 123456, Radix::Decimal);
        assert_eq!(buf.as_bytes_with_nul(), b"123\0");
        assert!(buf.is_truncated());
    }

    #[test]
    fn sign_alone_when_no_room_for_digits() {
        let mut buf = RenderBuffer::<2>::new();
        push_signed(&mut buf, -7);
        assert_eq!(buf.as_bytes(), b"-");
    }
}
