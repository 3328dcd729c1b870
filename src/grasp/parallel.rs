//! Independent GRASP restarts on the rayon pool.
//!
//! Each worker owns its constructive heuristic and local search and shares
//! only the read-only instance. Worker `w` is seeded with `seed + w`, so a
//! seeded parallel run is reproducible regardless of scheduling.

use std::time::Duration;

use rayon::iter::{IntoParallelIterator, ParallelIterator};

use crate::models::{AnpcpSolution, Instance};

use super::config::GraspConfig;
use super::err::GraspConfigError;
use super::runner::{Grasp, GraspResult, ImprovementStats};

/// Runs `workers` RGD + AFVS loops in parallel and keeps the best.
///
/// Ties go to the lowest worker index. Iterations, improvements and moves
/// are summed over workers and the elapsed time is the slowest worker's.
/// `workers == 0` runs a single worker.
///
/// # Examples
///
/// ```
/// use u_anpcp::grasp::{run_parallel, GraspConfig};
/// use u_anpcp::models::{Instance, Vertex};
///
/// let vertices: Vec<Vertex> = (0..15).map(|i| Vertex::new(i, (i * 7 % 15) as f64, i as f64)).collect();
/// let instance = Instance::same_set(vertices).unwrap();
///
/// let config = GraspConfig::new(4, 2).with_max_iterations(5).with_seed(1);
/// let result = run_parallel(&instance, &config, 4).unwrap();
/// assert_eq!(result.seed, 1);
/// ```
#[tracing::instrument(level = "debug", name = "GRASP parallel", skip(instance, config))]
pub fn run_parallel(
    instance: &Instance,
    config: &GraspConfig,
    workers: usize,
) -> Result<GraspResult<AnpcpSolution>, GraspConfigError> {
    config.validate(instance.m())?;
    let workers = workers.max(1);
    let base_seed = config.seed.unwrap_or_else(rand::random::<u64>);

    let results: Vec<Result<GraspResult<AnpcpSolution>, GraspConfigError>> = (0..workers)
        .into_par_iter()
        .map(|w| {
            let worker_config = config.clone().with_seed(worker_seed(base_seed, w));
            let mut grasp = Grasp::rgd_afvs(instance, worker_config)?;
            grasp.run().map_err(GraspConfigError::from)
        })
        .collect();

    let mut merged: Option<GraspResult<AnpcpSolution>> = None;
    for result in results {
        let result = result?;
        merged = Some(match merged {
            None => result,
            Some(acc) => merge(acc, result),
        });
    }
    let Some(mut merged) = merged else {
        unreachable!("at least one worker runs");
    };
    merged.seed = base_seed;

    tracing::info!(
        workers,
        best_objective = merged.best_objective,
        iterations = merged.iterations,
        "parallel GRASP finished"
    );
    Ok(merged)
}

fn worker_seed(base: u64, worker: usize) -> u64 {
    base.wrapping_add(worker as u64)
}

/// Folds `next` into `acc`; `acc` keeps its best solution on ties.
fn merge(
    acc: GraspResult<AnpcpSolution>,
    next: GraspResult<AnpcpSolution>,
) -> GraspResult<AnpcpSolution> {
    let mut stats: ImprovementStats = acc.improvement_stats;
    stats.merge(&next.improvement_stats);
    let elapsed: Duration = acc.elapsed.max(next.elapsed);
    let best_constructed_objective = acc
        .best_constructed_objective
        .min(next.best_constructed_objective);
    let iterations = acc.iterations + next.iterations;
    let improvements = acc.improvements + next.improvements;
    let total_moves = acc.total_moves + next.total_moves;

    let winner = if next.best_objective < acc.best_objective {
        next
    } else {
        acc
    };
    GraspResult {
        best_constructed_objective,
        iterations,
        improvements,
        improvement_stats: stats,
        total_moves,
        elapsed,
        ..winner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FacilitySolution, Vertex, VertexId};

    fn scattered(len: usize) -> Instance {
        let vertices = (0..len)
            .map(|i| Vertex::new(i, ((i * 37) % 101) as f64, ((i * 53) % 89) as f64))
            .collect();
        Instance::same_set(vertices).expect("valid")
    }

    fn ids(solution: &AnpcpSolution) -> Vec<VertexId> {
        solution.centers().iter().copied().collect()
    }

    #[test]
    fn test_parallel_matches_best_sequential_worker() {
        let instance = scattered(30);
        let config = GraspConfig::new(5, 2).with_max_iterations(6).with_seed(40);
        let merged = run_parallel(&instance, &config, 3).expect("valid");

        let singles: Vec<GraspResult<AnpcpSolution>> = (0..3)
            .map(|w| {
                let cfg = config.clone().with_seed(40 + w as u64);
                Grasp::rgd_afvs(&instance, cfg)
                    .expect("valid")
                    .run()
                    .expect("run")
            })
            .collect();

        let mut winner = &singles[0];
        for single in &singles[1..] {
            if single.best_objective < winner.best_objective {
                winner = single;
            }
        }
        assert_eq!(merged.best_objective, winner.best_objective);
        assert_eq!(ids(&merged.best_solution), ids(&winner.best_solution));
        assert_eq!(
            merged.iterations,
            singles.iter().map(|s| s.iterations).sum::<usize>()
        );
        assert_eq!(
            merged.total_moves,
            singles.iter().map(|s| s.total_moves).sum::<usize>()
        );
        assert_eq!(merged.improvement_stats.count, merged.iterations);
        assert_eq!(merged.seed, 40);
    }

    #[test]
    fn test_zero_workers_runs_one() {
        let instance = scattered(12);
        let config = GraspConfig::new(3, 1).with_max_iterations(4).with_seed(9);
        let merged = run_parallel(&instance, &config, 0).expect("valid");
        let single = Grasp::rgd_afvs(&instance, config)
            .expect("valid")
            .run()
            .expect("run");
        assert_eq!(merged.iterations, single.iterations);
        assert_eq!(merged.best_objective, single.best_objective);
    }

    #[test]
    fn test_invalid_config_fails_before_work() {
        let instance = scattered(4);
        assert!(run_parallel(&instance, &GraspConfig::new(5, 1), 2).is_err());
    }

    #[test]
    fn test_worker_seed_wraps() {
        assert_eq!(worker_seed(u64::MAX, 1), 0);
        assert_eq!(worker_seed(10, 3), 13);
    }
}
