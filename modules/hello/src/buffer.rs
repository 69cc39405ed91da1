/// Capacity of the buffer behind `/proc/hello`.
pub const MAX_STR_LEN: usize = 1000;

/// Fixed-capacity byte buffer with no length field: unused bytes are zero.
pub struct SharedBuffer<const N: usize> {
    data: [u8; N],
}

impl<const N: usize> Default for SharedBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> SharedBuffer<N> {
    pub const fn new() -> Self {
        SharedBuffer { data: [0; N] }
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    /// What a read of `count` bytes returns. Reads always start at offset 0.
    pub fn contents(&self, count: usize) -> &[u8] {
        &self.data[..count.min(N)]
    }

    /// Zeroes the whole buffer and returns the prefix a write of `count`
    /// bytes fills; input past the capacity is dropped.
    pub fn clear_for_write(&mut self, count: usize) -> &mut [u8] {
        self.data.fill(0);
        &mut self.data[..count.min(N)]
    }

    /// Replaces the content with as much of `src` as fits.
    pub fn overwrite(&mut self, src: &[u8]) -> usize {
        let dst = self.clear_for_write(src.len());
        let n = dst.len();
        dst.copy_from_slice(&src[..n]);
        n
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_write_is_zero_padded() {
        let mut buf = SharedBuffer::<MAX_STR_LEN>::new();
        assert_eq!(buf.overwrite(b"hello world"), 11);
        let out = buf.contents(20);
        assert_eq!(out.len(), 20);
        assert_eq!(&out[..11], b"hello world");
        assert!(out[11..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_long_write_is_truncated() {
        let mut buf = SharedBuffer::<MAX_STR_LEN>::new();
        let input = [b'A'; 1500];
        assert_eq!(buf.overwrite(&input), MAX_STR_LEN);
        assert_eq!(buf.contents(1000), &input[..1000]);
        assert_eq!(buf.contents(usize::MAX).len(), buf.capacity());
    }

    #[test]
    fn test_write_replaces_previous_content() {
        let mut buf = SharedBuffer::<MAX_STR_LEN>::new();
        buf.overwrite(b"foo");
        buf.overwrite(b"ba");
        assert_eq!(buf.contents(3), b"ba\0");
    }

    #[test]
    fn test_empty_write_clears() {
        let mut buf = SharedBuffer::<8>::default();
        buf.overwrite(b"abcdefgh");
        assert_eq!(buf.overwrite(b""), 0);
        assert_eq!(buf.contents(8), [0u8; 8]);
    }

    #[test]
    fn test_reads_are_repeatable() {
        let mut buf = SharedBuffer::<16>::new();
        buf.overwrite(b"same");
        let first: [u8; 16] = buf.contents(16).try_into().unwrap();
        assert_eq!(buf.contents(16), first);
        assert_eq!(buf.contents(0), b"");
    }
}
