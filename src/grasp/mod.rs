//! GRASP metaheuristic for the alpha-neighbor p-center problem.
//!
//! - [`Grasp`] — construction + local search loop, generic over both components
//! - [`ReactiveBeta`] — adaptive RCL greediness
//! - [`ElitePool`] — diverse elite solutions kept across iterations
//! - [`post_optimize`] — path relinking over every pair of elites
//! - [`run_parallel`] — independent restarts on the rayon pool

mod config;
mod elite_pool;
mod err;
mod parallel;
mod path_relinking;
mod reactive;
mod runner;

pub use config::{BetaStrategy, GraspConfig};
pub use elite_pool::ElitePool;
pub use err::{GraspConfigError, InvalidPoolLimitError, InvalidReactiveLevelsError};
pub use parallel::run_parallel;
pub use path_relinking::{path_relink, post_optimize, PostOptimizationStats, RelinkedPath};
pub use reactive::ReactiveBeta;
pub use runner::{
    improvement_percentage, Grasp, GraspIteration, GraspResult, ImprovementStats,
};

use crate::models::{AnpcpSolution, Instance};

/// Runs RGD + AFVS GRASP on `instance` with `config`.
pub fn solve(
    instance: &Instance,
    config: GraspConfig,
) -> Result<GraspResult<AnpcpSolution>, GraspConfigError> {
    let mut grasp = Grasp::rgd_afvs(instance, config)?;
    grasp.run().map_err(GraspConfigError::from)
}
