//! Construction capability used by the GRASP loop.

use rand::Rng;

use super::InvalidBetaError;

/// A heuristic that builds a starting solution of `p` centers.
pub trait Constructive {
    /// Solution type produced.
    type Solution;

    /// Number of centers to open.
    fn p(&self) -> usize;

    /// Builds a solution, drawing every random choice from `rng`.
    fn construct<R: Rng>(&mut self, rng: &mut R) -> Self::Solution;

    /// Sets the greediness of the next constructions. Deterministic
    /// heuristics ignore it.
    fn set_beta(&mut self, beta: f64) -> Result<(), InvalidBetaError> {
        let _ = beta;
        Ok(())
    }
}
