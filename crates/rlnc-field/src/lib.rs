//! Finite-field arithmetic for RLNC block coding.
//!
//! Coefficient vectors and symbol payloads are packed byte buffers holding
//! field elements; this crate provides the element arithmetic, the packed
//! scalar access, and the whole-buffer operations the coders run their
//! elimination loops on.
//!
//! # Fields
//!
//! - [`Binary`] — GF(2), eight coefficients per byte. Addition is XOR and
//!   every non-zero scalar is 1, which lets the decoder skip scalar
//!   multiplies entirely.
//! - [`Binary8`] — GF(2⁸) modulo `0x11D`, one byte per coefficient, with
//!   log/exp multiplication tables built at compile time.
//! - [`Binary16`] — GF(2¹⁶) modulo `0x1100B`, little-endian byte pairs.
//!
//! All three have characteristic 2, so subtraction coincides with addition
//! and `multiply_subtract` doubles as a multiply-accumulate.

#![forbid(unsafe_code)]

mod binary;
mod binary8;
mod binary16;
mod field;

pub use binary::Binary;
pub use binary8::Binary8;
pub use binary16::Binary16;
pub use field::Field;
