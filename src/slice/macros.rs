/// Generates `read_<ty>_le_at` / `read_<ty>_be_at` for multi-byte integers.
macro_rules! impl_reads {
    ($($ty:ty),*) => {
        /// Reads a byte at the given offset.
        ///
        /// # Panics
        /// Panics if `offset >= len()`.
        #[inline]
        pub fn read_u8_at(&self, offset: usize) -> u8 {
            self.0[offset]
        }

        $(
            paste::paste! {
                #[doc = "Reads a little-endian `" $ty "` at the given offset."]
                #[doc = ""]
                #[doc = "# Panics"]
                #[doc = "Panics if the value does not fit inside the slice."]
                #[inline]
                pub fn [<read_ $ty _le_at>](&self, offset: usize) -> $ty {
                    <$ty>::from_le_bytes(self.array_at(offset))
                }

                #[doc = "Reads a big-endian `" $ty "` at the given offset."]
                #[doc = ""]
                #[doc = "# Panics"]
                #[doc = "Panics if the value does not fit inside the slice."]
                #[inline]
                pub fn [<read_ $ty _be_at>](&self, offset: usize) -> $ty {
                    <$ty>::from_be_bytes(self.array_at(offset))
                }
            }
        )*

        #[inline]
        fn array_at<const W: usize>(&self, offset: usize) -> [u8; W] {
            let mut raw = [0u8; W];
            raw.copy_from_slice(&self.0[offset..offset + W]);
            raw
        }

        /// Copies the whole slice into `dest`.
        ///
        /// # Panics
        /// Panics if the lengths differ.
        #[inline]
        pub fn copy_to_slice(&self, dest: &mut [u8]) {
            dest.copy_from_slice(&self.0[..]);
        }

        /// Copies `dest.len()` bytes starting at `offset` into `dest`.
        ///
        /// # Panics
        /// Panics if the range leaves the slice.
        #[inline]
        pub fn copy_to_slice_at(&self, offset: usize, dest: &mut [u8]) {
            dest.copy_from_slice(&self.0[offset..offset + dest.len()]);
        }

        /// Bytes up to, not including, the first NUL.
        pub fn c_str(&self) -> &[u8] {
            let end = self.0.iter().position(|&b| b == 0).unwrap_or(self.0.len());
            &self.0[..end]
        }

        #[inline]
        pub fn as_bytes(&self) -> &[u8] {
            &self.0[..]
        }

        #[inline]
        pub fn len(&self) -> usize {
            self.0.len()
        }

        #[inline]
        pub fn is_empty(&self) -> bool {
            self.0.is_empty()
        }
    };
}

/// Generates `write_<ty>_le_at` / `write_<ty>_be_at` for multi-byte integers.
macro_rules! impl_writes {
    ($($ty:ty),*) => {
        /// Writes a byte at the given offset.
        ///
        /// # Panics
        /// Panics if `offset >= len()`.
        #[inline]
        pub fn write_u8_at(&mut self, offset: usize, value: u8) {
            self.0[offset] = value;
        }

        $(
            paste::paste! {
                #[doc = "Writes a little-endian `" $ty "` at the given offset."]
                #[doc = ""]
                #[doc = "# Panics"]
                #[doc = "Panics if the value does not fit inside the slice."]
                #[inline]
                pub fn [<write_ $ty _le_at>](&mut self, offset: usize, value: $ty) {
                    let raw = value.to_le_bytes();
                    self.0[offset..offset + raw.len()].copy_from_slice(&raw);
                }

                #[doc = "Writes a big-endian `" $ty "` at the given offset."]
                #[doc = ""]
                #[doc = "# Panics"]
                #[doc = "Panics if the value does not fit inside the slice."]
                #[inline]
                pub fn [<write_ $ty _be_at>](&mut self, offset: usize, value: $ty) {
                    let raw = value.to_be_bytes();
                    self.0[offset..offset + raw.len()].copy_from_slice(&raw);
                }
            }
        )*

        /// Copies `src` over the whole slice.
        ///
        /// # Panics
        /// Panics if the lengths differ.
        #[inline]
        pub fn copy_from_slice(&mut self, src: &[u8]) {
            self.0.copy_from_slice(src);
        }

        /// Copies `src` starting at `offset`.
        ///
        /// # Panics
        /// Panics if the range leaves the slice.
        #[inline]
        pub fn copy_from_slice_at(&mut self, offset: usize, src: &[u8]) {
            self.0[offset..offset + src.len()].copy_from_slice(src);
        }

        #[inline]
        pub fn fill(&mut self, value: u8) {
            self.0.fill(value);
        }
    };
}

pub(super) use impl_reads;
pub(super) use impl_writes;
