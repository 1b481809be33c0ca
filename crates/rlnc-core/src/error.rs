//! Coding error types.

use thiserror::Error;

/// Errors from coder construction and initialization.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodingError {
    /// A block must hold at least one symbol.
    #[error("symbol count must be non-zero")]
    ZeroSymbols,

    /// Symbols must carry at least one byte.
    #[error("symbol size must be non-zero")]
    ZeroSymbolSize,

    /// Requested more symbols than the coder was built for.
    #[error("symbol count {symbols} exceeds maximum {max}")]
    TooManySymbols {
        /// Requested symbol count.
        symbols: u32,
        /// Maximum the coder reserves capacity for.
        max: u32,
    },

    /// Requested a larger symbol than the coder was built for.
    #[error("symbol size {symbol_size} exceeds maximum {max}")]
    SymbolSizeTooLarge {
        /// Requested symbol size in bytes.
        symbol_size: u32,
        /// Maximum the coder reserves capacity for.
        max: u32,
    },

    /// Symbol size must hold a whole number of field elements.
    #[error("symbol size {symbol_size} is not a multiple of the field alignment {alignment}")]
    MisalignedSymbolSize {
        /// Requested symbol size in bytes.
        symbol_size: u32,
        /// Field element stride in bytes.
        alignment: u32,
    },

    /// The block byte count does not fit the 32-bit size model.
    #[error("block of {symbols} symbols x {symbol_size} bytes overflows the block size")]
    BlockTooLarge {
        /// Requested symbol count.
        symbols: u32,
        /// Requested symbol size in bytes.
        symbol_size: u32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        assert_eq!(
            CodingError::ZeroSymbols.to_string(),
            "symbol count must be non-zero"
        );

        let err = CodingError::TooManySymbols {
            symbols: 100,
            max: 64,
        };
        assert_eq!(err.to_string(), "symbol count 100 exceeds maximum 64");

        let err = CodingError::MisalignedSymbolSize {
            symbol_size: 5,
            alignment: 2,
        };
        assert_eq!(
            err.to_string(),
            "symbol size 5 is not a multiple of the field alignment 2"
        );
    }

    #[test]
    fn errors_are_clone_and_eq() {
        let err = CodingError::ZeroSymbolSize;
        assert_eq!(err.clone(), err);
    }
}
