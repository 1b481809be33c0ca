//! Deep symbol storage.

/// Owned symbol storage: the entire payload and coefficient matrices live
/// inside the coder.
///
/// Capacity is reserved once at construction; [`initialize`](DeepStorage::initialize)
/// re-dimensions the active block and zero-fills, but never reallocates.
/// Rows are packed by the *active* symbol size, so the first
/// `block_size` bytes of the payload buffer are the block, contiguously.
#[derive(Clone, Debug)]
pub struct DeepStorage {
    symbols: u32,
    symbol_size: u32,
    vector_len: usize,
    max_symbols: u32,
    max_symbol_size: u32,
    max_vector_len: usize,
    payload: Vec<u8>,
    vectors: Vec<u8>,
}

impl DeepStorage {
    /// Reserve storage for up to `max_symbols` rows of `max_symbol_size`
    /// payload bytes and `max_vector_len` packed coefficient bytes, active
    /// at full capacity.
    ///
    /// # Panics
    ///
    /// Panics if `max_symbols` or `max_symbol_size` is zero.
    #[must_use]
    pub fn new(max_symbols: u32, max_symbol_size: u32, max_vector_len: usize) -> Self {
        assert!(max_symbols > 0, "symbol count must be non-zero");
        assert!(max_symbol_size > 0, "symbol size must be non-zero");

        let payload = vec![0; max_symbols as usize * max_symbol_size as usize];
        let vectors = vec![0; max_symbols as usize * max_vector_len];

        Self {
            symbols: max_symbols,
            symbol_size: max_symbol_size,
            vector_len: max_vector_len,
            max_symbols,
            max_symbol_size,
            max_vector_len,
            payload,
            vectors,
        }
    }

    /// Re-dimension for a new block and zero all buffers.
    ///
    /// # Panics
    ///
    /// Panics if the requested dimensions exceed the reserved capacity or
    /// are zero.
    pub fn initialize(&mut self, symbols: u32, symbol_size: u32, vector_len: usize) {
        assert!(symbols > 0 && symbols <= self.max_symbols);
        assert!(symbol_size > 0 && symbol_size <= self.max_symbol_size);
        assert!(vector_len <= self.max_vector_len);

        self.symbols = symbols;
        self.symbol_size = symbol_size;
        self.vector_len = vector_len;
        self.payload.fill(0);
        self.vectors.fill(0);
    }

    /// Number of symbols in the active block.
    #[must_use]
    pub const fn symbols(&self) -> u32 {
        self.symbols
    }

    /// Active symbol size in bytes.
    #[must_use]
    pub const fn symbol_size(&self) -> u32 {
        self.symbol_size
    }

    /// Packed byte length of one coefficient vector.
    #[must_use]
    pub const fn vector_len(&self) -> usize {
        self.vector_len
    }

    /// Active block size in bytes.
    #[must_use]
    pub const fn block_size(&self) -> usize {
        self.symbols as usize * self.symbol_size as usize
    }

    /// Read-only view of payload row `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= symbols`.
    #[must_use]
    pub fn symbol(&self, index: u32) -> &[u8] {
        assert!(index < self.symbols, "symbol index {index} out of range");
        let start = index as usize * self.symbol_size as usize;
        &self.payload[start..start + self.symbol_size as usize]
    }

    /// Writable view of payload row `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= symbols`.
    pub fn symbol_mut(&mut self, index: u32) -> &mut [u8] {
        assert!(index < self.symbols, "symbol index {index} out of range");
        let start = index as usize * self.symbol_size as usize;
        &mut self.payload[start..start + self.symbol_size as usize]
    }

    /// Read-only view of coefficient row `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= symbols`.
    #[must_use]
    pub fn vector(&self, index: u32) -> &[u8] {
        assert!(index < self.symbols, "symbol index {index} out of range");
        let start = index as usize * self.vector_len;
        &self.vectors[start..start + self.vector_len]
    }

    /// Writable view of coefficient row `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= symbols`.
    pub fn vector_mut(&mut self, index: u32) -> &mut [u8] {
        assert!(index < self.symbols, "symbol index {index} out of range");
        let start = index as usize * self.vector_len;
        &mut self.vectors[start..start + self.vector_len]
    }

    /// Simultaneous writable views of payload and coefficient row `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= symbols`.
    pub fn row_mut(&mut self, index: u32) -> (&mut [u8], &mut [u8]) {
        assert!(index < self.symbols, "symbol index {index} out of range");
        let symbol_start = index as usize * self.symbol_size as usize;
        let vector_start = index as usize * self.vector_len;
        (
            &mut self.payload[symbol_start..symbol_start + self.symbol_size as usize],
            &mut self.vectors[vector_start..vector_start + self.vector_len],
        )
    }

    /// Copy one symbol into row `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= symbols` or `src` is not exactly one symbol.
    pub fn set_symbol(&mut self, index: u32, src: &[u8]) {
        assert_eq!(
            src.len(),
            self.symbol_size as usize,
            "source is not one symbol"
        );
        self.symbol_mut(index).copy_from_slice(src);
    }

    /// Copy block data into the storage, starting at symbol 0.
    ///
    /// `src` may be shorter than the block; the remainder keeps its
    /// initialized zeros, which is how the padded tail symbol of the last
    /// block of an object is realized.
    ///
    /// # Panics
    ///
    /// Panics if `src` exceeds the block size.
    pub fn set_symbols(&mut self, src: &[u8]) {
        assert!(
            src.len() <= self.block_size(),
            "source exceeds the block size"
        );
        self.payload[..src.len()].copy_from_slice(src);
    }

    /// Copy `min(dst.len(), block_size)` block bytes into `dst`.
    pub fn copy_symbols(&self, dst: &mut [u8]) {
        let len = dst.len().min(self.block_size());
        dst[..len].copy_from_slice(&self.payload[..len]);
    }

    /// The whole active block as one contiguous slice.
    #[must_use]
    pub fn block_data(&self) -> &[u8] {
        &self.payload[..self.block_size()]
    }
}
