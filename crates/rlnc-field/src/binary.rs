//! GF(2): the binary field.

use crate::field::Field;

/// GF(2). Coefficient vectors pack eight coefficients per byte, LSB-first;
/// payload buffers are operated on byte-at-a-time.
///
/// Addition and subtraction are XOR, and the only non-zero scalar is 1, so
/// the multiply operations degenerate to masking and XOR.
pub struct Binary;

impl Field for Binary {
    type Element = u8;

    const BINARY: bool = true;
    const BITS: u32 = 1;
    const ALIGNMENT: usize = 1;
    const ZERO: u8 = 0;
    const ONE: u8 = 1;

    fn packed_len(elements: usize) -> usize {
        elements.div_ceil(8)
    }

    fn coefficient(index: usize, vector: &[u8]) -> u8 {
        (vector[index / 8] >> (index % 8)) & 1
    }

    fn set_coefficient(index: usize, vector: &mut [u8], value: u8) {
        debug_assert!(value <= 1, "GF(2) scalar out of range: {value}");
        let mask = 1u8 << (index % 8);
        if value == 0 {
            vector[index / 8] &= !mask;
        } else {
            vector[index / 8] |= mask;
        }
    }

    fn invert(element: u8) -> u8 {
        assert_eq!(element, 1, "inverse of zero is undefined");
        1
    }

    fn add_assign(dst: &mut [u8], src: &[u8]) {
        assert_eq!(dst.len(), src.len(), "buffer length mismatch");
        for (d, s) in dst.iter_mut().zip(src) {
            *d ^= *s;
        }
    }

    fn subtract_assign(dst: &mut [u8], src: &[u8]) {
        // Characteristic 2: subtraction is addition.
        Self::add_assign(dst, src);
    }

    fn multiply_assign(dst: &mut [u8], scalar: u8) {
        debug_assert!(scalar <= 1, "GF(2) scalar out of range: {scalar}");
        if scalar == 0 {
            dst.fill(0);
        }
    }

    fn multiply_subtract(dst: &mut [u8], src: &[u8], scalar: u8) {
        debug_assert!(scalar <= 1, "GF(2) scalar out of range: {scalar}");
        if scalar != 0 {
            Self::add_assign(dst, src);
        }
    }
}
