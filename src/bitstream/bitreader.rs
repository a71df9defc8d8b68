//! BitReader: bit-level reads over an in-memory HENC frame.
//!
//! Every level of a compressed file is fully resident (the format caps input
//! at 1MB), so the reader borrows a byte slice and walks it with an absolute
//! bit cursor. `None` from any call means the slice ran out of bits; the
//! pipelines convert that into a truncation error.

const BIT_MASK: u8 = 0xff;

/// Reads an MSB-first bitstream from a borrowed byte slice.
#[derive(Debug)]
pub struct BitReader<'a> {
    data: &'a [u8],
    cursor: usize,
    bit_index: usize,
}

impl<'a> BitReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            cursor: 0,
            bit_index: 0,
        }
    }

    /// True while at least one unread bit remains.
    fn have_data(&self) -> bool {
        self.cursor < self.data.len()
    }

    /// Return the next bit as Option<u32> (1 or 0), or None if there is no more data to read.
    pub fn bit(&mut self) -> Option<u32> {
        if !self.have_data() {
            return None;
        }
        let bit = (self.data[self.cursor] & BIT_MASK >> self.bit_index) >> (7 - self.bit_index);
        self.bit_index += 1;
        self.bit_index %= 8;
        if self.bit_index == 0 {
            self.cursor += 1;
        }
        Some(bit as u32)
    }

    /// Return Option<bool> *true* if the next bit is 1, *false* if 0, consuming
    /// the bit, or None if there is no more data to read.
    pub fn bool_bit(&mut self) -> Option<bool> {
        self.bit().map(|bit| bit == 1)
    }

    /// Return Option<u32> of the next n bits (n must be 32 or less), or None
    /// if the slice holds fewer than n bits.
    pub fn bint(&mut self, n: usize) -> Option<u32> {
        debug_assert!(n <= 32);
        if self.cursor * 8 + self.bit_index + n > self.data.len() * 8 {
            return None;
        }
        let mut result = 0_u32;
        for _ in 0..n {
            result <<= 1;
            result |= self.bit()?;
        }
        Some(result)
    }

    /// Returns a byte as an Option<u8>, or None if there is no more data to
    /// read. This is a convenience function, and calls bint(8).
    pub fn byte(&mut self) -> Option<u8> {
        self.bint(8).map(|byte| byte as u8)
    }

    /// Returns an Option<Vec<u8>> of n bytes, or None if fewer remain.
    pub fn bytes(&mut self, n: usize) -> Option<Vec<u8>> {
        let mut result: Vec<u8> = Vec::with_capacity(n);
        for _ in 0..n {
            result.push(self.byte()?);
        }
        Some(result)
    }

    /// Read a null-terminated string of at most max_len bytes (terminator
    /// included). If max_len bytes arrive without a terminator the last byte
    /// read is discarded, bounding the result the way the original format
    /// readers did. None means the data ran out before a terminator.
    pub fn cstr(&mut self, max_len: usize) -> Option<Vec<u8>> {
        let mut result = Vec::new();
        for i in 0..max_len {
            let byte = self.byte()?;
            if byte == 0 {
                return Some(result);
            }
            if i + 1 == max_len {
                // Hit the limit without a terminator: drop the last slot.
                return Some(result);
            }
            result.push(byte);
        }
        Some(result)
    }

    /// Debugging function. Report current position in the buffer.
    pub fn loc(&self) -> String {
        format!("[{}.{}]", self.cursor, self.bit_index)
    }
}

#[cfg(test)]
mod test {
    use super::BitReader;

    #[test]
    fn basic_test() {
        let x = [0b10000001_u8];
        let mut br = BitReader::new(&x);
        assert_eq!(br.bit(), Some(1));
        for _ in 0..6 {
            assert_eq!(br.bit(), Some(0));
        }
        assert_eq!(br.bit(), Some(1));
        assert_eq!(br.bit(), None);
    }

    #[test]
    fn bint_test() {
        let x = [0b00011011];
        let mut br = BitReader::new(&x);
        assert_eq!(br.bint(5), Some(3));
        assert_eq!(br.bint(1), Some(0));
        assert_eq!(br.bint(2), Some(3));
        assert_eq!(br.bint(1), None);
    }

    #[test]
    fn bint_refuses_short_reads() {
        let x = [0xFF];
        let mut br = BitReader::new(&x);
        assert_eq!(br.bint(9), None);
        // The cursor must not have moved on the failed read.
        assert_eq!(br.bint(8), Some(0xFF));
    }

    #[test]
    fn byte_test() {
        let x = "Hello, world!".as_bytes();
        let mut br = BitReader::new(x);
        assert_eq!(br.byte(), Some(b'H'));
        assert_eq!(br.byte(), Some(b'e'));
    }

    #[test]
    fn bytes_test() {
        let x = "Hello, world!".as_bytes();
        let mut br = BitReader::new(x);
        assert_eq!(br.bytes(5), Some("Hello".as_bytes().to_vec()));
    }

    #[test]
    fn unaligned_byte_test() {
        let x = [0b1_0100011, 0b1_0000000];
        let mut br = BitReader::new(&x);
        assert_eq!(br.bit(), Some(1));
        assert_eq!(br.byte(), Some(0b01000111));
    }

    #[test]
    fn cstr_test() {
        let x = [b'h', b'i', 0, b'x'];
        let mut br = BitReader::new(&x);
        assert_eq!(br.cstr(256), Some(b"hi".to_vec()));
        assert_eq!(br.byte(), Some(b'x'));
    }

    #[test]
    fn cstr_bounded_test() {
        // No terminator within the limit: the last read slot is dropped and
        // exactly max_len bytes are consumed.
        let x = [b'a', b'b', b'c', b'd'];
        let mut br = BitReader::new(&x);
        assert_eq!(br.cstr(3), Some(b"ab".to_vec()));
        assert_eq!(br.byte(), Some(b'd'));
    }

    #[test]
    fn loc_test() {
        let x = "Hello, world!".as_bytes();
        let mut br = BitReader::new(x);
        br.bytes(5);
        br.bit();
        assert_eq!(br.loc(), "[5.1]");
    }
}
