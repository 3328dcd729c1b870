//! Constructive heuristics for the p-dispersion seeding problem.
//!
//! - [`OriginalGreedyDispersion`] — greedy dispersion with full recomputation, O(m·p²)
//! - [`FastGreedyDispersion`] — greedy dispersion with a distance memory, O(m·p)
//! - [`RandomizedGreedyDispersion`] — GRASP construction through a [`RestrictedCandidateList`], O(m·p)

mod dispersion;
mod err;
mod rcl;
mod rgd;
mod traits;

pub use dispersion::{FastGreedyDispersion, OriginalGreedyDispersion};
pub use err::{validate_beta, InvalidBetaError};
pub use rcl::RestrictedCandidateList;
pub use rgd::RandomizedGreedyDispersion;
pub use traits::Constructive;
