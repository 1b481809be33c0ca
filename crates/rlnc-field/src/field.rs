//! The field abstraction consumed by the block coders.

use std::fmt::Debug;

/// A finite field together with its packed vector representation.
///
/// Implementations are zero-sized types; every operation is an associated
/// function so the coders dispatch statically and the `BINARY` branch folds
/// at compile time.
///
/// Two buffer layouts share the same operations:
///
/// - *Coefficient vectors* pack one element per coefficient index; scalar
///   access goes through [`coefficient`](Field::coefficient) /
///   [`set_coefficient`](Field::set_coefficient) because the packing is
///   field-specific.
/// - *Symbol payloads* are plain byte buffers whose length is a multiple of
///   [`ALIGNMENT`](Field::ALIGNMENT) bytes.
///
/// The whole-buffer operations treat both layouts identically.
pub trait Field {
    /// Unpacked field element.
    type Element: Copy + Eq + Debug;

    /// True for GF(2). The decoders branch on this constant to take the
    /// XOR-only path; with a constant condition both arms compile away.
    const BINARY: bool;

    /// Element width in bits.
    const BITS: u32;

    /// Byte stride a payload buffer length must be a multiple of.
    const ALIGNMENT: usize;

    /// Additive identity.
    const ZERO: Self::Element;

    /// Multiplicative identity.
    const ONE: Self::Element;

    /// Packed byte length of a coefficient vector with `elements` entries.
    #[must_use]
    fn packed_len(elements: usize) -> usize;

    /// Extract the coefficient at `index` from a packed vector.
    ///
    /// # Panics
    ///
    /// Panics if `index` addresses bytes beyond `vector`.
    #[must_use]
    fn coefficient(index: usize, vector: &[u8]) -> Self::Element;

    /// Store `value` at `index` in a packed vector.
    ///
    /// # Panics
    ///
    /// Panics if `index` addresses bytes beyond `vector`.
    fn set_coefficient(index: usize, vector: &mut [u8], value: Self::Element);

    /// Multiplicative inverse of a non-zero element.
    ///
    /// # Panics
    ///
    /// Panics if `element` is zero.
    #[must_use]
    fn invert(element: Self::Element) -> Self::Element;

    /// `dst += src`, elementwise.
    ///
    /// # Panics
    ///
    /// Panics if the buffer lengths differ.
    fn add_assign(dst: &mut [u8], src: &[u8]);

    /// `dst -= src`, elementwise.
    ///
    /// # Panics
    ///
    /// Panics if the buffer lengths differ.
    fn subtract_assign(dst: &mut [u8], src: &[u8]);

    /// `dst *= scalar`, elementwise.
    fn multiply_assign(dst: &mut [u8], scalar: Self::Element);

    /// `dst -= scalar * src`, elementwise.
    ///
    /// # Panics
    ///
    /// Panics if the buffer lengths differ.
    fn multiply_subtract(dst: &mut [u8], src: &[u8], scalar: Self::Element);
}
