use crate::huffman::tree::{NodeKind, Tree};

/// One symbol's Huffman code while it is being built and after it lands in
/// the symbol table. `bits` holds the low `len` bits, most significant
/// meaningful bit first.
///
/// The 32 bit width is safe here: code length is bounded by tree depth, and
/// with the 1,000,000 byte input cap the worst (Fibonacci-weighted) tree
/// stays under 30 levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Code {
    pub bits: u32,
    pub len: u8,
}

impl Code {
    /// Append one bit at the least significant end.
    pub fn push_bit(&mut self, bit: u32) {
        self.bits <<= 1;
        if bit != 0 {
            self.bits |= 0x01;
        }
        self.len += 1;
    }

    /// Undo the last push. Returns the removed bit.
    pub fn pop_bit(&mut self) -> u32 {
        let bit = self.bits & 0x01;
        self.bits >>= 1;
        self.len -= 1;
        bit
    }
}

/// Maps each byte value present in the input to its Huffman code. Bytes that
/// never occur keep the zero code and must not be looked up.
pub struct SymbolTable {
    codes: [Code; 256],
}

impl SymbolTable {
    /// Derive the table by depth-first traversal: descending left pushes 0,
    /// descending right pushes 1, a leaf records a copy of the accumulator.
    /// The lone-leaf tree records the empty (zero length) code.
    pub fn from_tree(tree: &Tree) -> SymbolTable {
        let mut table = SymbolTable {
            codes: [Code::default(); 256],
        };
        let mut curr = Code::default();
        table.populate(tree, tree.head(), &mut curr);
        table
    }

    fn populate(&mut self, tree: &Tree, node: usize, curr: &mut Code) {
        match tree.node(node).kind {
            NodeKind::Leaf { symbol } => {
                self.codes[symbol as usize] = *curr;
            }
            NodeKind::Branch { left, right, .. } => {
                curr.push_bit(0);
                self.populate(tree, left, curr);
                curr.pop_bit();
                curr.push_bit(1);
                self.populate(tree, right, curr);
                curr.pop_bit();
            }
        }
    }

    pub fn code(&self, symbol: u8) -> Code {
        self.codes[symbol as usize]
    }
}

#[cfg(test)]
mod test {
    use super::{Code, SymbolTable};
    use crate::huffman::tree::Tree;
    use crate::tools::freq_count::freqs;

    fn table_for(data: &[u8]) -> SymbolTable {
        let f = freqs(data);
        SymbolTable::from_tree(&Tree::build(&f, data.len()))
    }

    #[test]
    fn push_pop_test() {
        let mut code = Code::default();
        code.push_bit(1);
        code.push_bit(0);
        code.push_bit(1);
        assert_eq!(code, Code { bits: 0b101, len: 3 });
        assert_eq!(code.pop_bit(), 1);
        assert_eq!(code, Code { bits: 0b10, len: 2 });
    }

    #[test]
    fn aaab_codes() {
        // left = B, right = A, so B = "0" and A = "1".
        let table = table_for(b"AAAB");
        assert_eq!(table.code(b'A'), Code { bits: 1, len: 1 });
        assert_eq!(table.code(b'B'), Code { bits: 0, len: 1 });
    }

    #[test]
    fn degenerate_alphabet_zero_length_code() {
        let table = table_for(b"xxxxxx");
        assert_eq!(table.code(b'x'), Code { bits: 0, len: 0 });
    }

    #[test]
    fn shorter_codes_for_frequent_symbols() {
        let table = table_for(b"aaaaaaaabbbbccd");
        assert!(table.code(b'a').len <= table.code(b'b').len);
        assert!(table.code(b'b').len <= table.code(b'c').len);
        assert!(table.code(b'c').len <= table.code(b'd').len);
    }

    #[test]
    fn codes_are_prefix_free() {
        let data = b"the quick brown fox jumps over the lazy dog 0123456789";
        let table = table_for(data);
        let mut present: Vec<u8> = data.to_vec();
        present.sort_unstable();
        present.dedup();

        for &a in &present {
            for &b in &present {
                if a == b {
                    continue;
                }
                let (ca, cb) = (table.code(a), table.code(b));
                if ca.len <= cb.len {
                    // ca must not match the leading ca.len bits of cb.
                    let prefix = cb.bits >> (cb.len - ca.len);
                    assert!(
                        prefix != ca.bits,
                        "code for {:?} is a prefix of {:?}",
                        a as char,
                        b as char
                    );
                }
            }
        }
    }
}
