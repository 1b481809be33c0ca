//! Coefficient vector generation.

use std::marker::PhantomData;

use rand::RngCore;
use rlnc_field::Field;

/// Uniform random coefficient vectors over `F`.
///
/// Fills packed vectors directly from an RNG; for GF(2) the unused high
/// bits of the final byte are masked to zero so stored vectors stay
/// byte-comparable.
pub struct RandomCoefficients<F: Field, R: RngCore> {
    rng: R,
    _field: PhantomData<F>,
}

impl<F: Field, R: RngCore> RandomCoefficients<F, R> {
    /// Wrap an RNG. Pass a seeded RNG for reproducible vectors.
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            _field: PhantomData,
        }
    }

    /// Fill `symbol_id` with a uniform coefficient vector for a block of
    /// `symbols` symbols.
    ///
    /// # Panics
    ///
    /// Panics if `symbol_id` is not the packed length of `symbols`
    /// coefficients.
    pub fn generate(&mut self, symbols: u32, symbol_id: &mut [u8]) {
        assert_eq!(
            symbol_id.len(),
            F::packed_len(symbols as usize),
            "coefficient buffer is not one vector"
        );

        self.rng.fill_bytes(symbol_id);

        if F::BINARY {
            let tail_bits = symbols as usize % 8;
            if tail_bits != 0 {
                if let Some(last) = symbol_id.last_mut() {
                    *last &= (1 << tail_bits) - 1;
                }
            }
        }
    }
}
