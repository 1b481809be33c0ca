//! Golden scenario tests for the block coders.
//!
//! Hand-worked reference sequences with exact expected states, small enough
//! to verify on paper.
