//! Source-block partitioning.

/// Deterministic source-block partitioning in the manner of RFC 5052 §9.1.
///
/// An object of `object_size` bytes is cut into `total_symbols` symbols of
/// `symbol_size` bytes, and the symbols are divided into blocks of at most
/// `max_symbols` using the RFC partition function: blocks come in at most
/// two sizes differing by one symbol, larger blocks first. Encoder and
/// decoder compute the same layout from the same three inputs, so block
/// boundaries need no side channel.
///
/// The final symbol of the final block may extend past the object; coders
/// zero-fill that tail.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rfc5052Partitioning {
    symbol_size: u32,
    object_size: u32,
    total_symbols: u32,
    blocks: u32,
    large_blocks: u32,
    large_symbols: u32,
    small_symbols: u32,
}

impl Rfc5052Partitioning {
    /// Partition `object_size` bytes into blocks of at most `max_symbols`
    /// symbols of `max_symbol_size` bytes.
    ///
    /// # Panics
    ///
    /// Panics if any argument is zero.
    #[must_use]
    pub fn new(max_symbols: u32, max_symbol_size: u32, object_size: u32) -> Self {
        assert!(max_symbols > 0, "symbol count must be non-zero");
        assert!(max_symbol_size > 0, "symbol size must be non-zero");
        assert!(object_size > 0, "object size must be non-zero");

        let total_symbols = object_size.div_ceil(max_symbol_size);
        let blocks = total_symbols.div_ceil(max_symbols);

        // Partition total_symbols into `blocks` nearly equal parts:
        // `large_blocks` blocks of `large_symbols`, the rest one smaller.
        let large_symbols = total_symbols.div_ceil(blocks);
        let small_symbols = total_symbols / blocks;
        let large_blocks = total_symbols - small_symbols * blocks;

        Self {
            symbol_size: max_symbol_size,
            object_size,
            total_symbols,
            blocks,
            large_blocks,
            large_symbols,
            small_symbols,
        }
    }

    /// Number of blocks in the partitioning.
    #[must_use]
    pub const fn blocks(&self) -> u32 {
        self.blocks
    }

    /// Total number of symbols across all blocks.
    #[must_use]
    pub const fn total_symbols(&self) -> u32 {
        self.total_symbols
    }

    /// Object size in bytes.
    #[must_use]
    pub const fn object_size(&self) -> u32 {
        self.object_size
    }

    /// Number of symbols in `block`.
    ///
    /// # Panics
    ///
    /// Panics if `block` is out of range.
    #[must_use]
    pub fn symbols(&self, block: u32) -> u32 {
        assert!(block < self.blocks, "block index {block} out of range");
        if block < self.large_blocks {
            self.large_symbols
        } else {
            self.small_symbols
        }
    }

    /// Symbol size of `block` in bytes; the same for every block.
    ///
    /// # Panics
    ///
    /// Panics if `block` is out of range.
    #[must_use]
    pub fn symbol_size(&self, block: u32) -> u32 {
        assert!(block < self.blocks, "block index {block} out of range");
        self.symbol_size
    }

    /// Byte offset of `block` within the object.
    ///
    /// # Panics
    ///
    /// Panics if `block` is out of range.
    #[must_use]
    pub fn byte_offset(&self, block: u32) -> u32 {
        assert!(block < self.blocks, "block index {block} out of range");
        let large = block.min(self.large_blocks);
        let small = block - large;
        (large * self.large_symbols + small * self.small_symbols) * self.symbol_size
    }

    /// Number of object bytes carried by `block`. Equal to the block's
    /// full capacity everywhere except possibly the final block.
    ///
    /// # Panics
    ///
    /// Panics if `block` is out of range.
    #[must_use]
    pub fn bytes_used(&self, block: u32) -> u32 {
        let capacity = self.symbols(block) * self.symbol_size;
        let remaining = self.object_size - self.byte_offset(block);
        capacity.min(remaining)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_block_object() {
        let partitioning = Rfc5052Partitioning::new(16, 256, 1000);
        assert_eq!(partitioning.blocks(), 1);
        assert_eq!(partitioning.total_symbols(), 4);
        assert_eq!(partitioning.symbols(0), 4);
        assert_eq!(partitioning.symbol_size(0), 256);
        assert_eq!(partitioning.byte_offset(0), 0);
        assert_eq!(partitioning.bytes_used(0), 1000);
    }

    #[test]
    fn ten_kilobyte_object_covers_exactly() {
        // 10000 bytes at 256-byte symbols: 40 symbols in 3 blocks of
        // 14/13/13.
        let partitioning = Rfc5052Partitioning::new(16, 256, 10000);
        assert_eq!(partitioning.blocks(), 3);
        assert_eq!(partitioning.total_symbols(), 40);
        assert_eq!(partitioning.symbols(0), 14);
        assert_eq!(partitioning.symbols(1), 13);
        assert_eq!(partitioning.symbols(2), 13);

        let mut total = 0;
        for block in 0..3 {
            assert_eq!(partitioning.byte_offset(block), total);
            let used = partitioning.bytes_used(block);
            assert!(used <= partitioning.symbols(block) * partitioning.symbol_size(block));
            total += used;
        }
        assert_eq!(total, 10000);
    }

    #[test]
    fn last_block_carries_the_tail() {
        // 1025 bytes at 256-byte symbols: 5 symbols, one block, 1 padded
        // byte short of 5 * 256.
        let partitioning = Rfc5052Partitioning::new(8, 256, 1025);
        assert_eq!(partitioning.blocks(), 1);
        assert_eq!(partitioning.symbols(0), 5);
        assert_eq!(partitioning.bytes_used(0), 1025);

        // Exactly full blocks have no padding.
        let partitioning = Rfc5052Partitioning::new(4, 256, 4 * 256 * 2);
        assert_eq!(partitioning.blocks(), 2);
        assert_eq!(partitioning.bytes_used(0), 1024);
        assert_eq!(partitioning.bytes_used(1), 1024);
    }

    #[test]
    fn block_sizes_differ_by_at_most_one_symbol() {
        let partitioning = Rfc5052Partitioning::new(10, 17, 12345);
        let counts: Vec<u32> = (0..partitioning.blocks())
            .map(|b| partitioning.symbols(b))
            .collect();
        let max = *counts.iter().max().unwrap();
        let min = *counts.iter().min().unwrap();
        assert!(max - min <= 1);
        assert!(max <= 10);
        // Larger blocks come first.
        let mut sorted = counts.clone();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        assert_eq!(counts, sorted);
    }

    #[test]
    fn tiny_object_is_one_symbol() {
        let partitioning = Rfc5052Partitioning::new(16, 256, 1);
        assert_eq!(partitioning.blocks(), 1);
        assert_eq!(partitioning.symbols(0), 1);
        assert_eq!(partitioning.bytes_used(0), 1);
    }

    #[test]
    fn same_inputs_same_partitioning() {
        let a = Rfc5052Partitioning::new(13, 97, 999_983);
        let b = Rfc5052Partitioning::new(13, 97, 999_983);
        assert_eq!(a, b);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn block_index_bounds_checked() {
        let partitioning = Rfc5052Partitioning::new(16, 256, 1000);
        let _ = partitioning.symbols(1);
    }
}
