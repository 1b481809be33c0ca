//! Coder construction.

use std::marker::PhantomData;

use rlnc_field::Field;

use crate::config::CodingConfig;
use crate::decoder::BlockDecoder;
use crate::encoder::BlockEncoder;
use crate::error::CodingError;

/// A coder holding one block's symbol storage.
///
/// Both encoders and decoders expose their storage this way; the object
/// layer loads block data through it without caring which it built.
pub trait SymbolBlock {
    /// Number of symbols in the active block.
    fn symbols(&self) -> u32;

    /// Active symbol size in bytes.
    fn symbol_size(&self) -> u32;

    /// Active block size in bytes.
    fn block_size(&self) -> usize {
        self.symbols() as usize * self.symbol_size() as usize
    }

    /// Copy block data into the coder's storage, starting at symbol 0.
    /// Shorter-than-block input leaves the zero-initialized tail in place.
    fn set_symbols(&mut self, data: &[u8]);

    /// Copy `min(dst.len(), block_size)` block bytes out of the coder's
    /// storage.
    fn copy_symbols(&self, dst: &mut [u8]);
}

/// Builds coders for blocks within a fixed capacity envelope.
pub trait CoderFactory {
    /// The coder type this factory builds.
    type Coder;

    /// Maximum number of symbols a built coder supports.
    fn max_symbols(&self) -> u32;

    /// Maximum symbol size a built coder supports.
    fn max_symbol_size(&self) -> u32;

    /// Build a coder initialized for a block of `symbols` symbols of
    /// `symbol_size` bytes.
    ///
    /// # Errors
    ///
    /// Returns `CodingError` if the block parameters do not fit the
    /// factory's capacity envelope or the field's alignment.
    fn build(&mut self, symbols: u32, symbol_size: u32) -> Result<Self::Coder, CodingError>;
}

/// Factory for independent (non-pooled) block encoders.
#[derive(Clone, Debug)]
pub struct EncoderFactory<F: Field> {
    config: CodingConfig,
    _field: PhantomData<F>,
}

impl<F: Field> EncoderFactory<F> {
    /// Create a factory for the given capacity.
    ///
    /// # Errors
    ///
    /// Returns `CodingError` if the configuration is invalid.
    pub fn new(config: CodingConfig) -> Result<Self, CodingError> {
        config.validate()?;
        Ok(Self {
            config,
            _field: PhantomData,
        })
    }
}

impl<F: Field> CoderFactory for EncoderFactory<F> {
    type Coder = BlockEncoder<F>;

    fn max_symbols(&self) -> u32 {
        self.config.max_symbols
    }

    fn max_symbol_size(&self) -> u32 {
        self.config.max_symbol_size
    }

    fn build(&mut self, symbols: u32, symbol_size: u32) -> Result<Self::Coder, CodingError> {
        let mut encoder = BlockEncoder::new(&self.config)?;
        encoder.initialize(symbols, symbol_size)?;
        Ok(encoder)
    }
}

/// Factory for independent (non-pooled) block decoders.
#[derive(Clone, Debug)]
pub struct DecoderFactory<F: Field> {
    config: CodingConfig,
    _field: PhantomData<F>,
}

impl<F: Field> DecoderFactory<F> {
    /// Create a factory for the given capacity.
    ///
    /// # Errors
    ///
    /// Returns `CodingError` if the configuration is invalid.
    pub fn new(config: CodingConfig) -> Result<Self, CodingError> {
        config.validate()?;
        Ok(Self {
            config,
            _field: PhantomData,
        })
    }
}

impl<F: Field> CoderFactory for DecoderFactory<F> {
    type Coder = BlockDecoder<F>;

    fn max_symbols(&self) -> u32 {
        self.config.max_symbols
    }

    fn max_symbol_size(&self) -> u32 {
        self.config.max_symbol_size
    }

    fn build(&mut self, symbols: u32, symbol_size: u32) -> Result<Self::Coder, CodingError> {
        let mut decoder = BlockDecoder::new(&self.config)?;
        decoder.initialize(symbols, symbol_size)?;
        Ok(decoder)
    }
}
