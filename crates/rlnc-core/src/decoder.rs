//! Online linear block decoder.
//!
//! The decoder consumes encoded symbols one at a time and incrementally
//! reduces them against the rows it already holds, keeping its internal
//! matrix in echelon form with unit pivots. Coded and systematic symbols
//! may arrive in any order; a systematic symbol whose pivot slot is taken
//! by a coded row displaces that row and re-inserts it.

use std::marker::PhantomData;

use rlnc_field::Field;

use crate::bitset::BitSet;
use crate::config::CodingConfig;
use crate::error::CodingError;
use crate::factory::SymbolBlock;
use crate::storage::DeepStorage;

/// Incremental Gaussian-elimination decoder for one block.
///
/// Storage for `max_symbols x max_symbol_size` is reserved at construction;
/// the ingest path performs no allocation. Decoding is complete when
/// [`rank`](Self::rank) reaches the symbol count, at which point every row
/// is a decoded source symbol and [`block_data`](Self::block_data) is the
/// original block.
pub struct BlockDecoder<F: Field> {
    config: CodingConfig,
    storage: DeepStorage,
    uncoded: BitSet,
    coded: BitSet,
    rank: u32,
    max_pivot: u32,
    swap_symbol: Vec<u8>,
    swap_vector: Vec<u8>,
    _field: PhantomData<F>,
}

impl<F: Field> BlockDecoder<F> {
    /// Build a decoder with capacity from `config`, active at full size.
    ///
    /// # Errors
    ///
    /// Returns `CodingError` if the configuration is invalid or
    /// `max_symbol_size` does not hold whole field elements.
    pub fn new(config: &CodingConfig) -> Result<Self, CodingError> {
        config.validate()?;
        check_alignment::<F>(config.max_symbol_size)?;

        let max_vector_len = F::packed_len(config.max_symbols as usize);
        Ok(Self {
            config: config.clone(),
            storage: DeepStorage::new(config.max_symbols, config.max_symbol_size, max_vector_len),
            uncoded: BitSet::new(config.max_symbols as usize),
            coded: BitSet::new(config.max_symbols as usize),
            rank: 0,
            max_pivot: 0,
            swap_symbol: vec![0; config.max_symbol_size as usize],
            swap_vector: vec![0; max_vector_len],
            _field: PhantomData,
        })
    }

    /// Reset for a new block of `symbols` symbols of `symbol_size` bytes.
    ///
    /// Zeroes all buffers and bookkeeping; never reallocates.
    ///
    /// # Errors
    ///
    /// Returns `CodingError` if the dimensions are zero, exceed the reserved
    /// capacity, or are misaligned for the field.
    pub fn initialize(&mut self, symbols: u32, symbol_size: u32) -> Result<(), CodingError> {
        self.config.check_block(symbols, symbol_size)?;
        check_alignment::<F>(symbol_size)?;

        self.storage
            .initialize(symbols, symbol_size, F::packed_len(symbols as usize));
        self.uncoded.clear_all();
        self.coded.clear_all();
        self.rank = 0;
        self.max_pivot = 0;
        Ok(())
    }

    /// Ingest a coded symbol.
    ///
    /// `symbol_data` is one symbol of payload and `symbol_id` the packed
    /// coefficient vector describing it; both are reduced in place. The
    /// rank grows by one if the symbol was linearly independent of the
    /// stored rows and is otherwise unchanged; a dependent symbol is not an
    /// error.
    ///
    /// # Panics
    ///
    /// Panics if `symbol_data` is not [`symbol_size`](Self::symbol_size)
    /// bytes or `symbol_id` is not [`vector_length`](Self::vector_length)
    /// bytes.
    pub fn decode(&mut self, symbol_data: &mut [u8], symbol_id: &mut [u8]) {
        assert_eq!(
            symbol_data.len(),
            self.symbol_size() as usize,
            "symbol buffer is not one symbol"
        );
        assert_eq!(
            symbol_id.len(),
            self.vector_length(),
            "coefficient buffer is not one vector"
        );

        self.insert_coded(symbol_data, symbol_id);
    }

    /// Ingest a systematic (uncoded) symbol known to be source symbol
    /// `symbol_index`.
    ///
    /// A duplicate of an already-decoded symbol is a no-op. If a coded row
    /// currently occupies the pivot, the two are swapped and the displaced
    /// row is re-inserted through the coded path; the rank then grows by
    /// one only if the displaced row was independent.
    ///
    /// # Panics
    ///
    /// Panics if `symbol_index >= symbols` or `symbol_data` is not one
    /// symbol.
    pub fn decode_raw(&mut self, symbol_data: &[u8], symbol_index: u32) {
        assert!(
            symbol_index < self.symbols(),
            "symbol index {symbol_index} out of range"
        );
        assert_eq!(
            symbol_data.len(),
            self.symbol_size() as usize,
            "symbol buffer is not one symbol"
        );

        if self.uncoded.get(symbol_index as usize) {
            return;
        }

        if self.coded.get(symbol_index as usize) {
            self.swap_decode(symbol_data, symbol_index);
        } else {
            self.store_uncoded_symbol(symbol_data, symbol_index);
            self.backward_substitute_uncoded(symbol_data, symbol_index);

            self.rank += 1;
            self.uncoded.set(symbol_index as usize);
            if symbol_index > self.max_pivot {
                self.max_pivot = symbol_index;
            }
        }
    }

    /// Current rank: the number of linearly independent rows stored.
    #[must_use]
    pub const fn rank(&self) -> u32 {
        self.rank
    }

    /// True once the rank equals the symbol count and the block is decoded.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.rank == self.symbols()
    }

    /// True if pivot `index` is occupied by a coded or uncoded row.
    ///
    /// # Panics
    ///
    /// Panics if `index >= symbols`.
    #[must_use]
    pub fn symbol_exists(&self, index: u32) -> bool {
        assert!(index < self.symbols(), "symbol index {index} out of range");
        self.uncoded.get(index as usize) || self.coded.get(index as usize)
    }

    /// True if row `index` holds a fully decoded source symbol.
    ///
    /// # Panics
    ///
    /// Panics if `index >= symbols`.
    #[must_use]
    pub fn is_symbol_uncoded(&self, index: u32) -> bool {
        assert!(index < self.symbols(), "symbol index {index} out of range");
        self.uncoded.get(index as usize)
    }

    /// True if row `index` holds a partially reduced coded symbol.
    ///
    /// # Panics
    ///
    /// Panics if `index >= symbols`.
    #[must_use]
    pub fn is_symbol_coded(&self, index: u32) -> bool {
        assert!(index < self.symbols(), "symbol index {index} out of range");
        self.coded.get(index as usize)
    }

    /// Number of symbols in the active block.
    #[must_use]
    pub fn symbols(&self) -> u32 {
        self.storage.symbols()
    }

    /// Active symbol size in bytes.
    #[must_use]
    pub fn symbol_size(&self) -> u32 {
        self.storage.symbol_size()
    }

    /// Packed byte length of one coefficient vector.
    #[must_use]
    pub fn vector_length(&self) -> usize {
        self.storage.vector_len()
    }

    /// Active block size in bytes.
    #[must_use]
    pub fn block_size(&self) -> usize {
        self.storage.block_size()
    }

    /// Largest occupied pivot index, 0 when no row is stored.
    #[must_use]
    pub const fn max_pivot(&self) -> u32 {
        self.max_pivot
    }

    /// Read-only view of payload row `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= symbols`.
    #[must_use]
    pub fn symbol(&self, index: u32) -> &[u8] {
        self.storage.symbol(index)
    }

    /// Read-only view of coefficient row `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= symbols`.
    #[must_use]
    pub fn vector(&self, index: u32) -> &[u8] {
        self.storage.vector(index)
    }

    /// Copy `min(dst.len(), block_size)` decoded block bytes into `dst`.
    pub fn copy_symbols(&self, dst: &mut [u8]) {
        self.storage.copy_symbols(dst);
    }

    /// The block as one contiguous slice; the original source block once
    /// decoding is complete.
    #[must_use]
    pub fn block_data(&self) -> &[u8] {
        self.storage.block_data()
    }

    /// Reduce a coded row against the stored rows and store it at its
    /// pivot, if it has one.
    fn insert_coded(&mut self, symbol_data: &mut [u8], symbol_id: &mut [u8]) {
        let Some(pivot) = self.forward_substitute_to_pivot(symbol_data, symbol_id) else {
            // Linearly dependent: reduced to zero against the stored rows.
            return;
        };

        if !F::BINARY {
            normalize::<F>(symbol_data, symbol_id, pivot);
        }

        self.forward_substitute_from_pivot(symbol_data, symbol_id, pivot);
        self.backward_substitute(symbol_data, symbol_id, pivot);

        if row_is_reduced::<F>(symbol_id, pivot, self.symbols()) {
            // Reduced all the way to a basis vector: this is the decoded
            // source symbol, not a partial combination.
            self.store_uncoded_symbol(symbol_data, pivot);
            self.uncoded.set(pivot as usize);
        } else {
            self.store_coded_symbol(symbol_data, symbol_id, pivot);
            self.coded.set(pivot as usize);
        }

        self.rank += 1;
        if pivot > self.max_pivot {
            self.max_pivot = pivot;
        }
    }

    /// Walk the coefficient vector from index 0, subtracting every stored
    /// row whose pivot column is non-zero, until an unoccupied pivot is
    /// found.
    fn forward_substitute_to_pivot(
        &self,
        symbol_data: &mut [u8],
        symbol_id: &mut [u8],
    ) -> Option<u32> {
        for index in 0..self.symbols() {
            let coefficient = F::coefficient(index as usize, symbol_id);
            if coefficient == F::ZERO {
                continue;
            }

            if !self.symbol_exists(index) {
                return Some(index);
            }

            let vector = self.storage.vector(index);
            let symbol = self.storage.symbol(index);
            if F::BINARY {
                F::subtract_assign(symbol_id, vector);
                F::subtract_assign(symbol_data, symbol);
            } else {
                F::multiply_subtract(symbol_id, vector, coefficient);
                F::multiply_subtract(symbol_data, symbol, coefficient);
            }
        }

        None
    }

    /// Subtract stored rows with pivot index above the new pivot. Rows that
    /// arrived earlier with a higher pivot may still interfere with the
    /// incoming row; after this pass it is in strict echelon form.
    fn forward_substitute_from_pivot(
        &self,
        symbol_data: &mut [u8],
        symbol_id: &mut [u8],
        pivot: u32,
    ) {
        for index in pivot + 1..=self.max_pivot {
            if !self.symbol_exists(index) {
                continue;
            }

            let coefficient = F::coefficient(index as usize, symbol_id);
            if coefficient == F::ZERO {
                continue;
            }

            let vector = self.storage.vector(index);
            let symbol = self.storage.symbol(index);
            if F::BINARY {
                F::subtract_assign(symbol_id, vector);
                F::subtract_assign(symbol_data, symbol);
            } else {
                F::multiply_subtract(symbol_id, vector, coefficient);
                F::multiply_subtract(symbol_data, symbol, coefficient);
            }
        }
    }

    /// Eliminate the new pivot column from every stored coded row.
    /// Uncoded rows are skipped: they are zero outside their own pivot.
    fn backward_substitute(&mut self, symbol_data: &[u8], symbol_id: &[u8], pivot: u32) {
        let symbols = self.symbols();
        for index in 0..=self.max_pivot {
            if index == pivot || !self.coded.get(index as usize) {
                continue;
            }

            let value = F::coefficient(pivot as usize, self.storage.vector(index));
            if value == F::ZERO {
                continue;
            }

            let (symbol, vector) = self.storage.row_mut(index);
            if F::BINARY {
                F::subtract_assign(vector, symbol_id);
                F::subtract_assign(symbol, symbol_data);
            } else {
                F::multiply_subtract(vector, symbol_id, value);
                F::multiply_subtract(symbol, symbol_data, value);
            }

            self.promote_if_reduced(index, symbols);
        }
    }

    /// Eliminate column `pivot` from every stored coded row, where the new
    /// row is the basis vector `e_pivot`. The only coefficient it touches
    /// is the pivot column itself, which cancels exactly, so the vector
    /// update is a single cleared coefficient.
    fn backward_substitute_uncoded(&mut self, symbol_data: &[u8], pivot: u32) {
        let symbols = self.symbols();
        for index in 0..=self.max_pivot {
            if !self.coded.get(index as usize) {
                continue;
            }

            let value = F::coefficient(pivot as usize, self.storage.vector(index));
            if value == F::ZERO {
                continue;
            }

            let (symbol, vector) = self.storage.row_mut(index);
            F::set_coefficient(pivot as usize, vector, F::ZERO);
            if F::BINARY {
                F::subtract_assign(symbol, symbol_data);
            } else {
                F::multiply_subtract(symbol, symbol_data, value);
            }

            self.promote_if_reduced(index, symbols);
        }
    }

    /// A systematic symbol arrived for a pivot held by a coded row: move
    /// the coded row out, subtract the incoming symbol from it, and
    /// re-insert it through the coded path. Its remaining leading
    /// coefficient is above `pivot`, so any pivot it finds is strictly
    /// greater; if it reduced to zero the rank simply does not grow.
    fn swap_decode(&mut self, symbol_data: &[u8], pivot: u32) {
        debug_assert!(self.coded.get(pivot as usize));
        debug_assert!(!self.uncoded.get(pivot as usize));

        self.coded.clear(pivot as usize);

        let symbol_len = self.symbol_size() as usize;
        let vector_len = self.vector_length();

        let mut swap_symbol = std::mem::take(&mut self.swap_symbol);
        let mut swap_vector = std::mem::take(&mut self.swap_vector);
        {
            let (symbol, vector) = self.storage.row_mut(pivot);
            swap_symbol[..symbol_len].copy_from_slice(symbol);
            swap_vector[..vector_len].copy_from_slice(vector);
        }

        // The stored pivot coefficient is 1: coded rows are normalized
        // before they are stored.
        let value = F::coefficient(pivot as usize, &swap_vector);
        debug_assert_eq!(value, F::ONE, "stored pivot coefficient must be 1");

        // Subtract the incoming symbol from the displaced row. With a unit
        // pivot coefficient no scalar multiply is needed.
        F::set_coefficient(pivot as usize, &mut swap_vector, F::ZERO);
        F::subtract_assign(&mut swap_symbol[..symbol_len], symbol_data);

        self.insert_coded(&mut swap_symbol[..symbol_len], &mut swap_vector[..vector_len]);

        // The displaced row may have found no pivot; drop whatever its
        // reduction left behind before the buffers are reused.
        swap_symbol.fill(0);
        swap_vector.fill(0);
        self.swap_symbol = swap_symbol;
        self.swap_vector = swap_vector;

        self.store_uncoded_symbol(symbol_data, pivot);
        self.uncoded.set(pivot as usize);

        // Rank is not bumped here: this pivot was already counted when the
        // displaced row was stored, and `insert_coded` counted the
        // displaced row again only if it stayed independent. No backward
        // substitution either; no coded row holds this column any more.
    }

    /// Store a reduced coded row at its pivot.
    fn store_coded_symbol(&mut self, symbol_data: &[u8], symbol_id: &[u8], pivot: u32) {
        debug_assert!(!self.symbol_exists(pivot));

        let (symbol, vector) = self.storage.row_mut(pivot);
        symbol.copy_from_slice(symbol_data);
        vector.copy_from_slice(symbol_id);
    }

    /// Store a decoded source symbol with the basis vector `e_pivot`.
    fn store_uncoded_symbol(&mut self, symbol_data: &[u8], pivot: u32) {
        debug_assert!(!self.symbol_exists(pivot));

        let (symbol, vector) = self.storage.row_mut(pivot);
        symbol.copy_from_slice(symbol_data);
        vector.fill(0);
        F::set_coefficient(pivot as usize, vector, F::ONE);
    }

    /// A backward-substitution step may leave a coded row with nothing but
    /// its own pivot; from then on it is the decoded source symbol and is
    /// tracked as uncoded, so completion leaves every row uncoded.
    fn promote_if_reduced(&mut self, index: u32, symbols: u32) {
        if row_is_reduced::<F>(self.storage.vector(index), index, symbols) {
            self.coded.clear(index as usize);
            self.uncoded.set(index as usize);
        }
    }
}

impl<F: Field> SymbolBlock for BlockDecoder<F> {
    fn symbols(&self) -> u32 {
        BlockDecoder::symbols(self)
    }

    fn symbol_size(&self) -> u32 {
        BlockDecoder::symbol_size(self)
    }

    fn set_symbols(&mut self, data: &[u8]) {
        self.storage.set_symbols(data);
    }

    fn copy_symbols(&self, dst: &mut [u8]) {
        self.storage.copy_symbols(dst);
    }
}

/// Scale a freshly found pivot row so its pivot coefficient becomes 1.
/// Only reachable on non-binary fields; binary pivots are already 1.
fn normalize<F: Field>(symbol_data: &mut [u8], symbol_id: &mut [u8], pivot: u32) {
    let coefficient = F::coefficient(pivot as usize, symbol_id);
    debug_assert_ne!(coefficient, F::ZERO, "pivot coefficient vanished");

    let inverse = F::invert(coefficient);
    F::multiply_assign(symbol_id, inverse);
    F::multiply_assign(symbol_data, inverse);
}

/// True if a row in echelon form (zeros below `pivot`, unit pivot) has no
/// remaining coefficient above its pivot, i.e. equals the basis vector.
fn row_is_reduced<F: Field>(symbol_id: &[u8], pivot: u32, symbols: u32) -> bool {
    (pivot + 1..symbols).all(|index| F::coefficient(index as usize, symbol_id) == F::ZERO)
}

fn check_alignment<F: Field>(symbol_size: u32) -> Result<(), CodingError> {
    let alignment = u32::try_from(F::ALIGNMENT).expect("field alignment fits u32");
    if symbol_size % alignment != 0 {
        return Err(CodingError::MisalignedSymbolSize {
            symbol_size,
            alignment,
        });
    }
    Ok(())
}
