use super::macros::{impl_reads, impl_writes};

/// Read-write window over RAM.
#[derive(Debug)]
pub struct RWSlice<'a>(&'a mut [u8]);

impl<'a> RWSlice<'a> {
    #[inline]
    pub fn new(slice: &'a mut [u8]) -> Self {
        Self(slice)
    }

    impl_reads!(u16, i16, u32, i32);
    impl_writes!(u16, i16, u32, i32);
}
