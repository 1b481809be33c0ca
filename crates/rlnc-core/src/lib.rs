//! Online RLNC block coding.
//!
//! A block of up to `max_symbols` source symbols is encoded as linear
//! combinations over a finite field and decoded by incremental Gaussian
//! elimination: every arriving symbol is reduced against the rows already
//! held, stored at its pivot if independent, and back-substituted into the
//! rest. Coded and systematic symbols mix freely and arrive in any order;
//! once the rank reaches the symbol count the storage *is* the decoded
//! block.
//!
//! # Overview
//!
//! - [`BlockDecoder`] / [`BlockEncoder`] — per-block coders over a
//!   [`Field`](rlnc_field::Field), with storage reserved once and reused
//!   across blocks via `initialize`.
//! - [`DeepStorage`] — the owned payload and coefficient matrices.
//! - [`RandomCoefficients`] — uniform coefficient vector generation.
//! - [`EncoderFactory`] / [`DecoderFactory`] — build coders inside a
//!   [`CodingConfig`] capacity envelope; the object layer drives these
//!   through the [`CoderFactory`] trait.

#![forbid(unsafe_code)]

mod bitset;
mod coefficients;
mod config;
mod decoder;
mod encoder;
mod error;
mod factory;
mod golden;
mod storage;

pub use coefficients::RandomCoefficients;
pub use config::CodingConfig;
pub use decoder::BlockDecoder;
pub use encoder::BlockEncoder;
pub use error::CodingError;
pub use factory::{CoderFactory, DecoderFactory, EncoderFactory, SymbolBlock};
pub use storage::DeepStorage;
