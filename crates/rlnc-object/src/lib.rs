//! Object-level orchestration for RLNC block coding.
//!
//! An object too large for one block is cut into independently coded
//! blocks by a deterministic partitioning both ends compute from the same
//! inputs, so block boundaries need no side-channel agreement. The
//! [`ObjectEncoder`] builds one loaded block encoder per block; the
//! [`ObjectDecoder`] builds the matching block decoders and reassembles
//! the decoded blocks into the object.

#![forbid(unsafe_code)]

mod data;
mod decoder;
mod encoder;
mod error;
mod partition;

pub use data::ObjectData;
pub use decoder::ObjectDecoder;
pub use encoder::ObjectEncoder;
pub use error::ObjectError;
pub use partition::Rfc5052Partitioning;
