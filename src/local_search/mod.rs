//! Local search for the alpha-neighbor p-center problem.
//!
//! - [`Allocator`] — per-user ranks of the `alpha + 1` nearest open centers
//! - [`AlphaNeighborhood`] — a user's centers around rank alpha
//! - [`LargestTwoGains`] — top-2 selection over per-center gains
//! - [`AlphaFastVertexSubstitution`] — swap-based local search, O(n·m·p) per step

mod afvs;
mod allocator;
mod alpha_neighborhood;
mod err;
mod largest_two;
mod traits;

pub use afvs::{AfvsState, AlphaFastVertexSubstitution, ImprovementStrategy, PotentialSwap};
pub use allocator::Allocator;
pub use alpha_neighborhood::AlphaNeighborhood;
pub use err::{
    validate_parameters, AfvsConfigError, AlphaOutOfRangeError, FacilityCountError,
    SolutionSizeError,
};
pub use largest_two::{GainsFacility, LargestTwoGains};
pub use traits::{LocalSearch, PathRelinking};
