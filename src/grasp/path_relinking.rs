//! Path relinking between elite solutions.
//!
//! # Algorithm
//!
//! Relinking walks from a starting solution towards a target one. Each step
//! opens a facility of the target that the walk has not opened yet and
//! closes a facility of the start that the walk has not closed yet, picking
//! the pair with the lowest resulting objective even if it is worse than the
//! current one. Every intermediate solution is improved by the local search
//! and the best local optimum found along the path is returned. The walk
//! stops one swap short of the target.
//!
//! Post-optimization relinks every pair of elites, collects the results in
//! a fresh pool and repeats while the fresh pool beats the previous one.
//!
//! # Reference
//!
//! Resende, M. G. C. & Ribeiro, C. C. (2005). "GRASP with Path-Relinking:
//! Recent Advances and Applications". *Metaheuristics: Progress as Real
//! Problem Solvers*, 29-63.

use std::collections::BTreeSet;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::distance::Distance;
use crate::local_search::PathRelinking;
use crate::models::{FacilitySolution, VertexId};

use super::elite_pool::ElitePool;
use super::runner::{improvement_percentage, objective_of};

/// Best local optimum found on one relinking path.
#[derive(Debug, Clone)]
pub struct RelinkedPath<S> {
    pub solution: S,
    pub objective: Distance,
    /// Swaps taken along the path.
    pub steps: usize,
}

/// Summary of a post-optimization pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PostOptimizationStats {
    /// Best objective before relinking.
    pub initial_objective: Distance,
    /// Best objective after relinking.
    pub best_objective: Distance,
    /// Generations run, including the last non-improving one.
    pub generations: usize,
    /// Generations whose pool beat the previous one.
    pub improving_generations: usize,
    /// Pairs relinked over all generations.
    pub paths: usize,
    /// Relinking swaps over all generations.
    pub steps: usize,
    pub elapsed: Duration,
}

impl PostOptimizationStats {
    /// Gain of relinking over the initial best, in percent.
    pub fn improvement(&self) -> f64 {
        improvement_percentage(self.initial_objective, self.best_objective)
    }
}

/// Relinks `starting` towards `target` with `local_search`.
///
/// Returns `None` when the solutions differ in at most one swap, since the
/// path then has no intermediate solution. The local search holds the last
/// local optimum of the path afterwards.
///
/// O(|starting Δ target| · cost of a local search run)
pub fn path_relink<L>(
    local_search: &mut L,
    starting: &L::Solution,
    target: &L::Solution,
) -> Result<Option<RelinkedPath<L::Solution>>, L::Error>
where
    L: PathRelinking,
    L::Solution: FacilitySolution + Clone,
{
    let mut candidates_in: BTreeSet<VertexId> = target
        .centers()
        .difference(starting.centers())
        .copied()
        .collect();
    let mut candidates_out: BTreeSet<VertexId> = starting
        .centers()
        .difference(target.centers())
        .copied()
        .collect();

    let mut relinked = starting.clone();
    let mut best: Option<RelinkedPath<L::Solution>> = None;
    let mut steps = 0;

    while candidates_in.len() > 1 {
        local_search.set_solution(relinked)?;
        let Some(swap) = local_search.relinking_swap(&candidates_in, &candidates_out) else {
            break;
        };
        if !local_search.apply_swap(swap) {
            break;
        }
        candidates_in.remove(&swap.facility_in);
        candidates_out.remove(&swap.facility_out);
        steps += 1;
        relinked = local_search.solution().clone();

        local_search.try_improve();
        let objective = objective_of(local_search.solution());
        tracing::trace!(
            facility_in = swap.facility_in,
            facility_out = swap.facility_out,
            relinked = swap.objective,
            improved = objective,
            "relinking step"
        );
        if best.as_ref().map_or(true, |b| objective < b.objective) {
            best = Some(RelinkedPath {
                solution: local_search.solution().clone(),
                objective,
                steps: 0,
            });
        }
    }

    Ok(best.map(|path| RelinkedPath { steps, ..path }))
}

/// Relinks every pair of elites generation after generation.
///
/// Each generation relinks pairs `(i, j)` with `i < j` in slot order and
/// offers the results to an empty pool with the same parameters. The new
/// pool replaces the old one only if its best is strictly better, so the
/// returned pool's best never exceeds the input pool's best.
#[tracing::instrument(
    level = "debug",
    name = "path relinking",
    skip_all,
    fields(elites = pool.len())
)]
pub fn post_optimize<L>(
    local_search: &mut L,
    pool: ElitePool<L::Solution>,
) -> Result<(ElitePool<L::Solution>, PostOptimizationStats), L::Error>
where
    L: PathRelinking,
    L::Solution: FacilitySolution + Clone,
{
    let start = Instant::now();
    let initial_objective = pool.best_objective().unwrap_or(Distance::MAX);
    let mut stats = PostOptimizationStats {
        initial_objective,
        best_objective: initial_objective,
        ..PostOptimizationStats::default()
    };

    let mut pool = pool;
    loop {
        let mut next = pool.emptied();
        let elites: Vec<&L::Solution> = pool.iter().map(|(solution, _)| solution).collect();
        for (i, starting) in elites.iter().enumerate() {
            for target in &elites[i + 1..] {
                let Some(path) = path_relink(local_search, *starting, *target)? else {
                    continue;
                };
                stats.paths += 1;
                stats.steps += path.steps;
                next.try_add(path.solution);
            }
        }
        stats.generations += 1;

        let improved = match (next.best_objective(), pool.best_objective()) {
            (Some(new_best), Some(old_best)) => new_best < old_best,
            (Some(_), None) => true,
            (None, _) => false,
        };
        tracing::debug!(
            generation = stats.generations,
            elites = next.len(),
            best = ?next.best_objective(),
            improved,
            "relinking generation"
        );
        if !improved {
            break;
        }
        stats.improving_generations += 1;
        pool = next;
    }

    stats.best_objective = pool.best_objective().unwrap_or(initial_objective);
    stats.elapsed = start.elapsed();
    tracing::info!(
        initial_objective,
        best_objective = stats.best_objective,
        generations = stats.generations,
        paths = stats.paths,
        "post-optimization finished"
    );
    Ok((pool, stats))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::local_search::AlphaFastVertexSubstitution;
    use crate::models::{alpha_objective, AnpcpSolution, Instance, Vertex};

    fn scattered(len: usize) -> Instance {
        let vertices = (0..len)
            .map(|i| Vertex::new(i, ((i * 37) % 101) as f64, ((i * 53) % 89) as f64))
            .collect();
        Instance::same_set(vertices).expect("valid")
    }

    fn evaluated(
        afvs: &mut AlphaFastVertexSubstitution<'_>,
        instance: &Instance,
        centers: &[VertexId],
    ) -> AnpcpSolution {
        let solution =
            AnpcpSolution::with_centers(instance, centers.iter().copied()).expect("known ids");
        afvs.set_solution(solution).expect("size p");
        afvs.solution().clone()
    }

    fn ids<S: FacilitySolution>(solution: &S) -> Vec<VertexId> {
        solution.centers().iter().copied().collect()
    }

    #[test]
    fn test_relink_returns_checked_local_optimum() {
        let instance = scattered(20);
        let start = AnpcpSolution::with_centers(&instance, [0, 1, 2, 3]).expect("known ids");
        let mut afvs = AlphaFastVertexSubstitution::new(&instance, 4, 2, start).expect("valid");
        let starting = evaluated(&mut afvs, &instance, &[0, 1, 2, 3]);
        let target = evaluated(&mut afvs, &instance, &[10, 11, 12, 13]);

        let path = path_relink(&mut afvs, &starting, &target)
            .expect("size p")
            .expect("four swaps apart");
        assert_eq!(path.steps, 3);
        let check = alpha_objective(&instance, &ids(&path.solution), 2).expect("feasible");
        assert_eq!(path.objective, check.distance);
        assert_eq!(path.solution.objective_value(), Some(check.distance));
        assert_eq!(path.solution.size(), 4);
    }

    #[test]
    fn test_relink_needs_two_swaps() {
        let instance = scattered(12);
        let start = AnpcpSolution::with_centers(&instance, [0, 1, 2]).expect("known ids");
        let mut afvs = AlphaFastVertexSubstitution::new(&instance, 3, 1, start).expect("valid");
        let starting = evaluated(&mut afvs, &instance, &[0, 1, 2]);
        let one_swap = evaluated(&mut afvs, &instance, &[0, 1, 5]);

        assert!(path_relink(&mut afvs, &starting, &starting)
            .expect("size p")
            .is_none());
        assert!(path_relink(&mut afvs, &starting, &one_swap)
            .expect("size p")
            .is_none());
    }

    #[test]
    fn test_post_optimize_never_worsens_pool_best() {
        let instance = scattered(30);
        let start = AnpcpSolution::with_centers(&instance, [0, 1, 2, 3, 4]).expect("known ids");
        let mut afvs = AlphaFastVertexSubstitution::new(&instance, 5, 2, start).expect("valid");

        let mut pool = ElitePool::new(4).expect("valid");
        for centers in [
            [0, 1, 2, 3, 4],
            [5, 6, 7, 8, 9],
            [10, 11, 12, 13, 14],
            [15, 16, 17, 18, 19],
        ] {
            assert!(pool.try_add(evaluated(&mut afvs, &instance, &centers)));
        }
        let before = pool.best_objective().expect("non-empty");

        let (pool, stats) = post_optimize(&mut afvs, pool).expect("size p");
        let after = pool.best_objective().expect("non-empty");
        assert!(after <= before);
        assert_eq!(stats.initial_objective, before);
        assert_eq!(stats.best_objective, after);
        assert!(stats.generations >= 1);
        assert_eq!(stats.generations, stats.improving_generations + 1);
        assert!(stats.paths >= 6);
        assert!(stats.improvement() >= 0.0);

        for (solution, objective) in pool.iter() {
            let check = alpha_objective(&instance, &ids(solution), 2).expect("feasible");
            assert_eq!(objective, check.distance);
        }
    }

    #[test]
    fn test_post_optimize_single_elite_is_noop() {
        let instance = scattered(12);
        let start = AnpcpSolution::with_centers(&instance, [0, 1, 2]).expect("known ids");
        let mut afvs = AlphaFastVertexSubstitution::new(&instance, 3, 1, start).expect("valid");
        let mut pool = ElitePool::new(3).expect("valid");
        pool.try_add(evaluated(&mut afvs, &instance, &[0, 1, 2]));

        let (pool, stats) = post_optimize(&mut afvs, pool).expect("size p");
        assert_eq!(pool.len(), 1);
        assert_eq!(stats.paths, 0);
        assert_eq!(stats.generations, 1);
        assert_eq!(stats.initial_objective, stats.best_objective);
    }
}
