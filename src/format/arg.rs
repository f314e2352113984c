/// A single typed formatting argument.
///
/// Replaces an untyped variadic list: every value carries its kind, so a
/// directive can be checked against its argument before anything renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arg<'a> {
    /// Signed integer, rendered by `%d`/`%i`.
    Int(i32),
    /// Unsigned integer, rendered by `%u`/`%x`/`%X`.
    Uint(u32),
    /// Single byte character, rendered by `%c`.
    Char(u8),
    /// Byte string, rendered by `%s` up to the first NUL.
    Str(&'a [u8]),
    /// Address, rendered by `%p`.
    Ptr(usize),
}

/// Broad argument category a directive consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgClass {
    Integer,
    Character,
    Bytes,
    Address,
}

impl<'a> Arg<'a> {
    /// Builds a pointer argument from a raw address.
    #[inline]
    pub fn ptr(addr: usize) -> Self {
        Arg::Ptr(addr)
    }

    /// Returns true if a directive consuming `class` can render this argument.
    ///
    /// Integers are accepted by every numeric directive and by `%c`, which
    /// keeps the low byte. Strings and pointers only match their own class.
    pub fn fits(&self, class: ArgClass) -> bool {
        matches!(
            (class, self),
            (ArgClass::Integer, Arg::Int(_) | Arg::Uint(_))
                | (ArgClass::Character, Arg::Char(_) | Arg::Int(_) | Arg::Uint(_))
                | (ArgClass::Bytes, Arg::Str(_))
                | (ArgClass::Address, Arg::Ptr(_))
        )
    }

    /// Reinterprets an integer argument at 32-bit width.
    pub(crate) fn as_bits(&self) -> u32 {
        match *self {
            Arg::Int(v) => v as u32,
            Arg::Uint(v) => v,
            Arg::Char(c) => c as u32,
            Arg::Ptr(p) => p as u32,
            Arg::Str(_) => 0,
        }
    }
}

macro_rules! impl_from_int {
    ($variant:ident, $target:ty, $($src:ty),*) => {
        $(
            impl From<$src> for Arg<'_> {
                #[inline]
                fn from(v: $src) -> Self {
                    Arg::$variant(v as $target)
                }
            }
        )*
    };
}

impl_from_int!(Int, i32, i8, i16, i32);
impl_from_int!(Uint, u32, u8, u16, u32);

impl From<char> for Arg<'_> {
    /// Non-ASCII characters keep only their low byte.
    #[inline]
    fn from(c: char) -> Self {
        Arg::Char(c as u32 as u8)
    }
}

impl<'a> From<&'a str> for Arg<'a> {
    #[inline]
    fn from(s: &'a str) -> Self {
        Arg::Str(s.as_bytes())
    }
}

impl<'a> From<&'a [u8]> for Arg<'a> {
    #[inline]
    fn from(s: &'a [u8]) -> Self {
        Arg::Str(s)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for Arg<'a> {
    #[inline]
    fn from(s: &'a [u8; N]) -> Self {
        Arg::Str(s)
    }
}

impl<T> From<*const T> for Arg<'_> {
    #[inline]
    fn from(p: *const T) -> Self {
        Arg::Ptr(p as usize)
    }
}

impl<T> From<*mut T> for Arg<'_> {
    #[inline]
    fn from(p: *mut T) -> Self {
        Arg::Ptr(p as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversions_pick_the_expected_variant() {
        assert_eq!(Arg::from(-5), Arg::Int(-5));
        assert_eq!(Arg::from(-5i8), Arg::Int(-5));
        assert_eq!(Arg::from(200u8), Arg::Uint(200));
        assert_eq!(Arg::from(0xFFFFu16), Arg::Uint(0xFFFF));
        assert_eq!(Arg::from('A'), Arg::Char(b'A'));
        assert_eq!(Arg::from("ok"), Arg::Str(b"ok"));
        assert_eq!(Arg::from(b"raw"), Arg::Str(b"raw"));
        assert_eq!(Arg::from(0x500 as *const u8), Arg::Ptr(0x500));
    }

    #[test]
    fn class_matching() {
        assert!(Arg::Int(1).fits(ArgClass::Integer));
        assert!(Arg::Uint(1).fits(ArgClass::Integer));
        assert!(Arg::Int(65).fits(ArgClass::Character));
        assert!(Arg::Char(b'x').fits(ArgClass::Character));

        assert!(!Arg::Char(b'x').fits(ArgClass::Integer));
        assert!(!Arg::Str(b"x").fits(ArgClass::Integer));
        assert!(!Arg::Int(0).fits(ArgClass::Bytes));
        assert!(!Arg::Uint(0).fits(ArgClass::Address));
        assert!(Arg::ptr(0).fits(ArgClass::Address));
    }

    #[test]
    fn signed_bits_reinterpret_as_twos_complement() {
        assert_eq!(Arg::Int(-1).as_bits(), 0xFFFF_FFFF);
        assert_eq!(Arg::Uint(7).as_bits(), 7);
    }
}
