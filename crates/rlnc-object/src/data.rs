//! Object data sources.

use rlnc_core::SymbolBlock;

/// A readable view of the object being encoded.
///
/// The object layer addresses it by byte range and loads ranges straight
/// into a coder's symbol storage.
pub trait ObjectData {
    /// Object size in bytes.
    fn size(&self) -> u32;

    /// Copy `length` bytes starting at `offset` into the coder's storage.
    ///
    /// # Panics
    ///
    /// Panics if the range lies outside the object or exceeds the coder's
    /// block size.
    fn read<C: SymbolBlock>(&self, coder: &mut C, offset: u32, length: u32);
}

impl ObjectData for &[u8] {
    fn size(&self) -> u32 {
        u32::try_from(self.len()).expect("object exceeds the 32-bit size model")
    }

    fn read<C: SymbolBlock>(&self, coder: &mut C, offset: u32, length: u32) {
        let start = offset as usize;
        let end = start + length as usize;
        coder.set_symbols(&self[start..end]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal coder standing in for the real ones.
    struct RecordingBlock {
        symbols: u32,
        symbol_size: u32,
        stored: Vec<u8>,
    }

    impl SymbolBlock for RecordingBlock {
        fn symbols(&self) -> u32 {
            self.symbols
        }

        fn symbol_size(&self) -> u32 {
            self.symbol_size
        }

        fn set_symbols(&mut self, data: &[u8]) {
            assert!(data.len() <= self.block_size());
            self.stored[..data.len()].copy_from_slice(data);
        }

        fn copy_symbols(&self, dst: &mut [u8]) {
            let len = dst.len().min(self.stored.len());
            dst[..len].copy_from_slice(&self.stored[..len]);
        }
    }

    #[test]
    fn slice_reads_by_range() {
        let object: Vec<u8> = (0..100).collect();
        let data: &[u8] = &object;
        assert_eq!(data.size(), 100);

        let mut coder = RecordingBlock {
            symbols: 4,
            symbol_size: 10,
            stored: vec![0; 40],
        };
        data.read(&mut coder, 20, 30);
        assert_eq!(&coder.stored[..30], &object[20..50]);
        assert_eq!(&coder.stored[30..], &[0u8; 10]);
    }
}
