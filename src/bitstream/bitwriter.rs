/// Writes an MSB-first bitstream into a growable buffer. Used to build one
/// HENC frame per compression level. Unlike a fixed preallocated buffer, the
/// output vec grows on demand, so a long frame can never overrun memory.
pub struct BitWriter {
    /// Output buffer holding all completed bytes.
    output: Vec<u8>,
    /// Private queue to hold bits that are waiting to be put as bytes into the output buffer.
    queue: u64,
    /// Count of valid bits in the queue (always less than 8 between calls).
    q_bits: u8,
}

impl BitWriter {
    /// Create a new BitWriter. Suggest the capacity be set near the expected
    /// frame size to avoid reallocation.
    pub fn new(capacity: usize) -> Self {
        Self {
            output: Vec::with_capacity(capacity),
            queue: 0,
            q_bits: 0,
        }
    }

    /// Internal bitstream write function. Drains all full bytes from the queue.
    fn write_stream(&mut self) {
        while self.q_bits > 7 {
            let byte = (self.queue >> (self.q_bits - 8)) as u8;
            self.output.push(byte); //push the packed byte out
            self.q_bits -= 8; //adjust the count of bits left in the queue
        }
    }

    /// Write the `count` least significant bits of `data`, most significant
    /// bit first. `count` must be 32 or less; a Huffman code, a tree grammar
    /// bit and every header field all fit that width.
    pub fn write_bits(&mut self, data: u32, count: usize) {
        debug_assert!(count <= 32);
        if count == 0 {
            return;
        }
        self.queue <<= count; //shift queue by bit length
        self.queue |= (data as u64) & (u64::MAX >> (64 - count)); //add data portion to queue
        self.q_bits += count as u8; //update depth of queue bits
        self.write_stream();
    }

    /// Put a whole byte on the stream.
    pub fn write_byte(&mut self, data: u8) {
        self.write_bits(data as u32, 8);
    }

    /// Put a block of raw bytes on the stream in order.
    pub fn write_bytes(&mut self, data: &[u8]) {
        data.iter().for_each(|&byte| self.write_byte(byte));
    }

    /// Write a null-terminated string: each byte as 8 bits, then a zero byte.
    pub fn write_cstr(&mut self, s: &str) {
        self.write_bytes(s.as_bytes());
        self.write_byte(0);
    }

    /// Number of bits written so far.
    pub fn bit_len(&self) -> usize {
        self.output.len() * 8 + self.q_bits as usize
    }

    /// Number of whole bytes the stream occupies, counting a trailing partial byte.
    pub fn byte_len(&self) -> usize {
        (self.bit_len() + 7) / 8
    }

    /// Flushes the remaining bits (1-7) from the queue, padding with 0s in the
    /// least significant bits, and returns the finished byte buffer. Exactly
    /// `byte_len()` bytes come back - never unused capacity.
    pub fn into_bytes(mut self) -> Vec<u8> {
        if self.q_bits > 0 {
            self.queue <<= 8 - self.q_bits; //pad the queue with zeros
            self.q_bits = 8;
            self.write_stream();
        }
        self.output
    }

    /// Debugging function to return the byte.bit position written so far.
    pub fn loc(&self) -> String {
        format!("[{}.{}]", self.bit_len() / 8, self.bit_len() % 8)
    }
}
