//! Local search capabilities used by the GRASP loop.

use std::collections::BTreeSet;

use crate::models::VertexId;

use super::PotentialSwap;

/// An improvement procedure that can be reloaded with a new starting
/// solution and run to a local optimum.
pub trait LocalSearch {
    /// Solution type the search operates on.
    type Solution;

    /// Error raised when a starting solution is rejected.
    type Error;

    /// Number of centers every solution must open.
    fn p(&self) -> usize;

    /// Replaces the current solution, re-deriving any internal state.
    fn set_solution(&mut self, solution: Self::Solution) -> Result<(), Self::Error>;

    /// Applies improving moves until none is left. Returns `true` if at least
    /// one move was applied.
    fn try_improve(&mut self) -> bool;

    /// The current solution.
    fn solution(&self) -> &Self::Solution;

    /// Moves applied since the last [`set_solution`](LocalSearch::set_solution).
    fn moves(&self) -> usize;
}

/// A local search that can also take the restricted, possibly worsening
/// steps of a path between two solutions.
pub trait PathRelinking: LocalSearch {
    /// Best swap opening one of `candidates_in` and closing one of
    /// `candidates_out` in the current solution, improving or not.
    fn relinking_swap(
        &mut self,
        candidates_in: &BTreeSet<VertexId>,
        candidates_out: &BTreeSet<VertexId>,
    ) -> Option<PotentialSwap>;

    /// Applies `swap` unconditionally. Returns `false` if it does not fit
    /// the current solution.
    fn apply_swap(&mut self, swap: PotentialSwap) -> bool;
}
