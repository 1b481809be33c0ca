//! Object-layer error types.

use rlnc_core::CodingError;
use thiserror::Error;

/// Errors from object partitioning and block-coder orchestration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ObjectError {
    /// Objects must contain at least one byte.
    #[error("cannot code an empty object")]
    EmptyObject,

    /// Asked for a block the partitioning does not have.
    #[error("block index {index} out of range: object has {count} blocks")]
    BlockIndexOutOfRange {
        /// The requested block index.
        index: u32,
        /// Number of blocks in the partitioning.
        count: u32,
    },

    /// The factory refused to build a coder for the block.
    #[error(transparent)]
    Coding(#[from] CodingError),
}
