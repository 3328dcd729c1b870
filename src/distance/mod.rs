//! Distance tables and ID/index bookkeeping.
//!
//! Provides dense integer distance matrices between two vertex sets, with a
//! per-row nearest-first ordering, and the mapping between stable vertex IDs
//! and matrix indices.

mod id_index;
mod matrix;

pub use id_index::IdIndexMap;
pub use matrix::{Distance, DistanceMatrix};
