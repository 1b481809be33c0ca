//! Linear block encoder.

use std::marker::PhantomData;

use rlnc_field::Field;

use crate::config::CodingConfig;
use crate::error::CodingError;
use crate::factory::SymbolBlock;
use crate::storage::DeepStorage;

/// Produces encoded symbols as linear combinations of a stored source
/// block.
///
/// The encoder does not choose coefficients; the caller supplies the packed
/// coefficient vector (see
/// [`RandomCoefficients`](crate::coefficients::RandomCoefficients) for a
/// uniform generator) and the encoder writes the combination it describes.
pub struct BlockEncoder<F: Field> {
    config: CodingConfig,
    storage: DeepStorage,
    _field: PhantomData<F>,
}

impl<F: Field> BlockEncoder<F> {
    /// Build an encoder with capacity from `config`, active at full size.
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
            _field: PhantomData,
        })
    }

    /// Reset for a new block of `symbols` symbols of `symbol_size` bytes.
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
        Ok(())
    }

    /// Write the linear combination described by `symbol_id` into
    /// `symbol_data`.
    ///
    /// # Panics
    ///
    /// Panics if `symbol_data` is not [`symbol_size`](Self::symbol_size)
    /// bytes or `symbol_id` is not [`vector_length`](Self::vector_length)
    /// bytes.
    pub fn encode(&self, symbol_data: &mut [u8], symbol_id: &[u8]) {
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

        symbol_data.fill(0);
        for index in 0..self.symbols() {
            let coefficient = F::coefficient(index as usize, symbol_id);
            if coefficient == F::ZERO {
                continue;
            }

            if F::BINARY {
                F::add_assign(symbol_data, self.storage.symbol(index));
            } else {
                // Characteristic 2: multiply-subtract accumulates.
                F::multiply_subtract(symbol_data, self.storage.symbol(index), coefficient);
            }
        }
    }

    /// Copy source symbol `index` into `symbol_data` for systematic
    /// transmission.
    ///
    /// # Panics
    ///
    /// Panics if `index >= symbols` or `symbol_data` is not one symbol.
    pub fn encode_systematic(&self, symbol_data: &mut [u8], index: u32) {
        assert_eq!(
            symbol_data.len(),
            self.symbol_size() as usize,
            "symbol buffer is not one symbol"
        );
        symbol_data.copy_from_slice(self.storage.symbol(index));
    }

    /// Copy one source symbol into the block.
    ///
    /// # Panics
    ///
    /// Panics if `index >= symbols` or `src` is not one symbol.
    pub fn set_symbol(&mut self, index: u32, src: &[u8]) {
        self.storage.set_symbol(index, src);
    }

    /// Copy block data into the storage, starting at symbol 0. A shorter
    /// source leaves the zero-initialized tail as padding.
    ///
    /// # Panics
    ///
    /// Panics if `src` exceeds the block size.
    pub fn set_symbols(&mut self, src: &[u8]) {
        self.storage.set_symbols(src);
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

    /// The stored block as one contiguous slice.
    #[must_use]
    pub fn block_data(&self) -> &[u8] {
        self.storage.block_data()
    }
}

impl<F: Field> SymbolBlock for BlockEncoder<F> {
    fn symbols(&self) -> u32 {
        BlockEncoder::symbols(self)
    }

    fn symbol_size(&self) -> u32 {
        BlockEncoder::symbol_size(self)
    }

    fn set_symbols(&mut self, data: &[u8]) {
        self.storage.set_symbols(data);
    }

    fn copy_symbols(&self, dst: &mut [u8]) {
        self.storage.copy_symbols(dst);
    }
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
