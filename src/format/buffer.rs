/// Fixed-capacity character buffer filled by one render pass.
///
/// Holds at most `N - 1` characters. A NUL terminator always sits right
/// after the last character, so the final slot is reserved for it. Pushing
/// past capacity drops the character and marks the buffer truncated.
#[derive(Clone)]
pub struct RenderBuffer<const N: usize> {
    bytes: [u8; N],
    len: usize,
    truncated: bool,
}

impl<const N: usize> RenderBuffer<N> {
    pub const fn new() -> Self {
        const { assert!(N > 0, "render buffer needs room for the terminator") };
        Self {
            bytes: [0; N],
            len: 0,
            truncated: false,
        }
    }

    /// Appends one character. Returns false if it was dropped.
    #[inline]
    pub fn push(&mut self, b: u8) -> bool {
        if self.len + 1 >= N {
            self.truncated = true;
            return false;
        }
        self.bytes[self.len] = b;
        self.len += 1;
        self.bytes[self.len] = 0;
        true
    }

    /// Appends bytes until the first NUL, the end of `s`, or the buffer is full.
    pub fn push_str(&mut self, s: &[u8]) {
        for &b in s.iter().take_while(|&&b| b != 0) {
            if !self.push(b) {
                break;
            }
        }
    }

    /// Rendered characters, without the terminator.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    /// Rendered characters followed by the NUL terminator.
    #[inline]
    pub fn as_bytes_with_nul(&self) -> &[u8] {
        &self.bytes[..=self.len]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Total slots, including the one reserved for the terminator.
    #[inline]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Returns true if no further character can be stored.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.len + 1 >= N
    }

    /// Returns true if at least one character was dropped.
    #[inline]
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }
}

impl<const N: usize> Default for RenderBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> core::fmt::Debug for RenderBuffer<N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RenderBuffer")
            .field("len", &self.len)
            .field("capacity", &N)
            .field("truncated", &self.truncated)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminator_follows_last_character() {
        let mut buf = RenderBuffer::<8>::new();
        assert_eq!(buf.as_bytes_with_nul(), &[0]);

        buf.push_str(b"abc");
        assert_eq!(buf.as_bytes(), b"abc");
        assert_eq!(buf.as_bytes_with_nul(), b"abc\0");
    }

    #[test]
    fn keeps_capacity_minus_one_characters() {
        let mut buf = RenderBuffer::<4>::new();
        buf.push_str(b"abcdef");

        assert_eq!(buf.len(), 3);
        assert_eq!(buf.as_bytes_with_nul(), b"abc\0");
        assert!(buf.is_full());
        assert!(buf.is_truncated());
    }

    #[test]
    fn exact_fit_is_not_truncation() {
        let mut buf = RenderBuffer::<4>::new();
        buf.push_str(b"abc");
        assert!(buf.is_full());
        assert!(!buf.is_truncated());
        assert!(!buf.push(b'd'));
        assert!(buf.is_truncated());
    }

    #[test]
    fn single_slot_buffer_holds_only_terminator() {
        let mut buf = RenderBuffer::<1>::new();
        assert!(!buf.push(b'a'));
        assert!(buf.is_empty());
        assert_eq!(buf.as_bytes_with_nul(), &[0]);
    }
}
