//! Object encoder.

use rlnc_core::{CoderFactory, SymbolBlock};
use tracing::debug;

use crate::data::ObjectData;
use crate::error::ObjectError;
use crate::partition::Rfc5052Partitioning;

/// Drives block encoders over an object too large for a single block.
///
/// Computes the partitioning eagerly from the factory's capacity envelope
/// and the object size; [`build`](Self::build) then constructs one coder
/// per block and loads it with that block's byte range. Repeated builds of
/// the same block return independent coders holding the same bytes.
pub struct ObjectEncoder<'a, F, D>
where
    F: CoderFactory,
    F::Coder: SymbolBlock,
    D: ObjectData,
{
    factory: &'a mut F,
    data: D,
    partitioning: Rfc5052Partitioning,
}

impl<'a, F, D> ObjectEncoder<'a, F, D>
where
    F: CoderFactory,
    F::Coder: SymbolBlock,
    D: ObjectData,
{
    /// Bind a coder factory to an object data view.
    ///
    /// # Errors
    ///
    /// Returns `ObjectError::EmptyObject` if the data view is empty.
    pub fn new(factory: &'a mut F, data: D) -> Result<Self, ObjectError> {
        if data.size() == 0 {
            return Err(ObjectError::EmptyObject);
        }

        let partitioning = Rfc5052Partitioning::new(
            factory.max_symbols(),
            factory.max_symbol_size(),
            data.size(),
        );
        debug!(
            object_size = data.size(),
            blocks = partitioning.blocks(),
            total_symbols = partitioning.total_symbols(),
            "partitioned object for encoding"
        );

        Ok(Self {
            factory,
            data,
            partitioning,
        })
    }

    /// Number of block encoders this object needs.
    #[must_use]
    pub fn encoders(&self) -> u32 {
        self.partitioning.blocks()
    }

    /// Object size in bytes.
    #[must_use]
    pub fn object_size(&self) -> u32 {
        self.data.size()
    }

    /// The block layout shared with the decoding side.
    #[must_use]
    pub const fn partitioning(&self) -> &Rfc5052Partitioning {
        &self.partitioning
    }

    /// Build the coder for `block`, loaded with the block's bytes.
    ///
    /// # Errors
    ///
    /// Returns `ObjectError` if `block` is out of range or the factory
    /// refuses the block dimensions.
    pub fn build(&mut self, block: u32) -> Result<F::Coder, ObjectError> {
        if block >= self.partitioning.blocks() {
            return Err(ObjectError::BlockIndexOutOfRange {
                index: block,
                count: self.partitioning.blocks(),
            });
        }

        let symbols = self.partitioning.symbols(block);
        let symbol_size = self.partitioning.symbol_size(block);
        let mut coder = self.factory.build(symbols, symbol_size)?;

        let offset = self.partitioning.byte_offset(block);
        let bytes_used = self.partitioning.bytes_used(block);
        self.data.read(&mut coder, offset, bytes_used);

        debug!(
            block,
            symbols, symbol_size, offset, bytes_used, "built block encoder"
        );
        Ok(coder)
    }
}
