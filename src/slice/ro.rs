use super::macros::impl_reads;

/// Read-only window over directly loadable memory.
#[derive(Debug, Clone, Copy)]
pub struct ROSlice<'a>(&'a [u8]);

impl<'a> ROSlice<'a> {
    #[inline]
    pub fn new(slice: &'a [u8]) -> Self {
        Self(slice)
    }

    impl_reads!(u16, i16, u32, i32);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_words_in_both_orders() {
        let data = [0x78, 0x56, 0x34, 0x12];
        let slice = ROSlice::new(&data);

        assert_eq!(slice.read_u32_le_at(0), 0x12345678);
        assert_eq!(slice.read_u32_be_at(0), 0x78563412);
        assert_eq!(slice.read_u16_le_at(2), 0x1234);
        assert_eq!(slice.read_i16_be_at(2), 0x3412);
    }

    #[test]
    fn c_str_stops_at_nul() {
        let slice = ROSlice::new(b"Error occurred\0");
        assert_eq!(slice.c_str(), b"Error occurred");
        assert_eq!(ROSlice::new(b"abc").c_str(), b"abc");
    }

    #[test]
    fn copies_out() {
        let data = [1, 2, 3, 4];
        let slice = ROSlice::new(&data);
        let mut dest = [0u8; 2];
        slice.copy_to_slice_at(1, &mut dest);
        assert_eq!(dest, [2, 3]);
    }

    #[test]
    #[should_panic]
    fn read_past_end_panics() {
        let data = [0u8; 4];
        ROSlice::new(&data).read_u32_le_at(1);
    }
}
