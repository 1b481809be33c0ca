//! Object decoder.

use rlnc_core::{CoderFactory, SymbolBlock};
use tracing::debug;

use crate::error::ObjectError;
use crate::partition::Rfc5052Partitioning;

/// Builds per-block decoders for an object and reassembles the decoded
/// blocks.
///
/// Uses the same deterministic partitioning as [`ObjectEncoder`]
/// (`crate::ObjectEncoder`), so both sides agree on block boundaries from
/// the factory capacity and the object size alone.
pub struct ObjectDecoder<'a, F>
where
    F: CoderFactory,
{
    factory: &'a mut F,
    partitioning: Rfc5052Partitioning,
}

impl<'a, F> ObjectDecoder<'a, F>
where
    F: CoderFactory,
{
    /// Bind a coder factory to an object size.
    ///
    /// # Errors
    ///
    /// Returns `ObjectError::EmptyObject` if `object_size` is zero.
    pub fn new(factory: &'a mut F, object_size: u32) -> Result<Self, ObjectError> {
        if object_size == 0 {
            return Err(ObjectError::EmptyObject);
        }

        let partitioning = Rfc5052Partitioning::new(
            factory.max_symbols(),
            factory.max_symbol_size(),
            object_size,
        );
        debug!(
            object_size,
            blocks = partitioning.blocks(),
            "partitioned object for decoding"
        );

        Ok(Self {
            factory,
            partitioning,
        })
    }

    /// Number of block decoders this object needs.
    #[must_use]
    pub fn decoders(&self) -> u32 {
        self.partitioning.blocks()
    }

    /// Object size in bytes.
    #[must_use]
    pub fn object_size(&self) -> u32 {
        self.partitioning.object_size()
    }

    /// The block layout shared with the encoding side.
    #[must_use]
    pub const fn partitioning(&self) -> &Rfc5052Partitioning {
        &self.partitioning
    }

    /// Build an initialized, empty decoder for `block`.
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
        let coder = self.factory.build(symbols, symbol_size)?;

        debug!(block, symbols, symbol_size, "built block decoder");
        Ok(coder)
    }

    /// Copy the decoded bytes of `block` into their place in `object`,
    /// dropping the padded tail.
    ///
    /// # Errors
    ///
    /// Returns `ObjectError::BlockIndexOutOfRange` if `block` is out of
    /// range.
    ///
    /// # Panics
    ///
    /// Panics if `object` is smaller than the object size.
    pub fn copy_block(
        &self,
        block: u32,
        coder: &F::Coder,
        object: &mut [u8],
    ) -> Result<(), ObjectError>
    where
        F::Coder: SymbolBlock,
    {
        if block >= self.partitioning.blocks() {
            return Err(ObjectError::BlockIndexOutOfRange {
                index: block,
                count: self.partitioning.blocks(),
            });
        }
        assert!(
            object.len() >= self.object_size() as usize,
            "object buffer is smaller than the object"
        );

        let offset = self.partitioning.byte_offset(block) as usize;
        let bytes_used = self.partitioning.bytes_used(block) as usize;
        coder.copy_symbols(&mut object[offset..offset + bytes_used]);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rlnc_core::{CodingConfig, DecoderFactory};
    use rlnc_field::Binary;

    use super::*;

    fn factory() -> DecoderFactory<Binary> {
        DecoderFactory::new(CodingConfig {
            max_symbols: 16,
            max_symbol_size: 256,
        })
        .unwrap()
    }

    #[test]
    fn empty_object_rejected() {
        let mut factory = factory();
        assert!(matches!(
            ObjectDecoder::new(&mut factory, 0),
            Err(ObjectError::EmptyObject)
        ));
    }

    #[test]
    fn partitioning_matches_the_encoding_side() {
        let mut factory = factory();
        let decoder = ObjectDecoder::new(&mut factory, 10000).unwrap();

        assert_eq!(decoder.decoders(), 3);
        assert_eq!(decoder.object_size(), 10000);
        assert_eq!(decoder.partitioning().symbols(0), 14);
    }

    #[test]
    fn built_decoders_match_block_dimensions() {
        let mut factory = factory();
        let mut object_decoder = ObjectDecoder::new(&mut factory, 10000).unwrap();

        let block = object_decoder.build(2).unwrap();
        assert_eq!(block.symbols(), 13);
        assert_eq!(block.symbol_size(), 256);
        assert_eq!(block.rank(), 0);
    }

    #[test]
    fn systematic_blocks_reassemble_the_object() {
        let object: Vec<u8> = (0..1000u32).map(|i| (i % 241) as u8).collect();
        let mut factory = factory();
        let mut object_decoder = ObjectDecoder::new(&mut factory, 1000).unwrap();

        let mut out = vec![0u8; 1000];
        let partitioning = object_decoder.partitioning().clone();
        for block in 0..object_decoder.decoders() {
            let mut coder = object_decoder.build(block).unwrap();

            let offset = partitioning.byte_offset(block) as usize;
            let used = partitioning.bytes_used(block) as usize;
            let symbol_size = partitioning.symbol_size(block) as usize;
            let block_bytes = &object[offset..offset + used];

            for (i, chunk) in block_bytes.chunks(symbol_size).enumerate() {
                let mut symbol = vec![0u8; symbol_size];
                symbol[..chunk.len()].copy_from_slice(chunk);
                coder.decode_raw(&symbol, i as u32);
            }

            assert!(coder.is_complete());
            object_decoder.copy_block(block, &coder, &mut out).unwrap();
        }

        assert_eq!(out, object);
    }

    #[test]
    fn out_of_range_block_rejected() {
        let mut factory = factory();
        let mut object_decoder = ObjectDecoder::new(&mut factory, 100).unwrap();
        assert!(matches!(
            object_decoder.build(1),
            Err(ObjectError::BlockIndexOutOfRange { .. })
        ));

        let coder = object_decoder.build(0).unwrap();
        let mut out = vec![0u8; 100];
        assert!(matches!(
            object_decoder.copy_block(1, &coder, &mut out),
            Err(ObjectError::BlockIndexOutOfRange { .. })
        ));
    }
}
