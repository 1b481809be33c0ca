//! Coder configuration.

use serde::{Deserialize, Serialize};

use crate::error::CodingError;

/// Capacity configuration shared by all coders of a deployment.
///
/// A coder reserves `max_symbols * max_symbol_size` bytes of payload storage
/// at construction; re-initializing for a new block never reallocates.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodingConfig {
    /// Maximum number of source symbols per block.
    ///
    /// Default: 64
    pub max_symbols: u32,

    /// Maximum symbol size in bytes.
    ///
    /// Default: 1024
    pub max_symbol_size: u32,
}

impl Default for CodingConfig {
    fn default() -> Self {
        Self {
            max_symbols: 64,
            max_symbol_size: 1024,
        }
    }
}

impl CodingConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `CodingError` if either bound is zero or the resulting block
    /// byte count overflows `u32`.
    pub fn validate(&self) -> Result<(), CodingError> {
        if self.max_symbols == 0 {
            return Err(CodingError::ZeroSymbols);
        }
        if self.max_symbol_size == 0 {
            return Err(CodingError::ZeroSymbolSize);
        }
        if self.max_symbols.checked_mul(self.max_symbol_size).is_none() {
            return Err(CodingError::BlockTooLarge {
                symbols: self.max_symbols,
                symbol_size: self.max_symbol_size,
            });
        }
        Ok(())
    }

    /// Byte count of a full-capacity block.
    #[must_use]
    pub const fn max_block_size(&self) -> u32 {
        self.max_symbols * self.max_symbol_size
    }

    /// Check that per-block parameters fit this configuration.
    ///
    /// # Errors
    ///
    /// Returns `CodingError` if `symbols` or `symbol_size` is zero or
    /// exceeds the configured maximum.
    pub fn check_block(&self, symbols: u32, symbol_size: u32) -> Result<(), CodingError> {
        if symbols == 0 {
            return Err(CodingError::ZeroSymbols);
        }
        if symbol_size == 0 {
            return Err(CodingError::ZeroSymbolSize);
        }
        if symbols > self.max_symbols {
            return Err(CodingError::TooManySymbols {
                symbols,
                max: self.max_symbols,
            });
        }
        if symbol_size > self.max_symbol_size {
            return Err(CodingError::SymbolSizeTooLarge {
                symbol_size,
                max: self.max_symbol_size,
            });
        }
        Ok(())
    }
}
