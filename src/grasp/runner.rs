//! GRASP loop: randomized construction followed by local search.
//!
//! # Algorithm
//!
//! Every iteration picks a beta, builds a seed solution with the
//! constructive heuristic, loads it into the local search, improves it to a
//! local optimum and keeps it if it strictly beats the best so far. The loop
//! runs at least once and stops after `max_iterations` consecutive
//! non-improving iterations or once `time_limit` has elapsed.
//!
//! With a `pool_limit` above one, every local optimum is also offered to an
//! [`ElitePool`] and the pool is post-optimized by path relinking once the
//! loop ends. Post-optimization is not bounded by `time_limit`.
//!
//! # Reference
//!
//! Feo, T. A. & Resende, M. G. C. (1995). "Greedy Randomized Adaptive Search
//! Procedures". *Journal of Global Optimization* 6, 109-133.

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::constructive::{Constructive, RandomizedGreedyDispersion};
use crate::distance::Distance;
use crate::local_search::{
    AfvsConfigError, AlphaFastVertexSubstitution, LocalSearch, PathRelinking, SolutionSizeError,
};
use crate::models::{AnpcpSolution, FacilitySolution, Instance};

use super::config::{BetaStrategy, GraspConfig};
use super::elite_pool::ElitePool;
use super::err::GraspConfigError;
use super::path_relinking::{post_optimize, PostOptimizationStats};
use super::reactive::ReactiveBeta;

/// Relative change from `constructed` to `improved`, in percent.
///
/// Zero when `constructed` is zero.
pub fn improvement_percentage(constructed: Distance, improved: Distance) -> f64 {
    if constructed == 0 {
        return 0.0;
    }
    100.0 * constructed.abs_diff(improved) as f64 / constructed as f64
}

pub(super) fn objective_of<S: FacilitySolution>(solution: &S) -> Distance {
    solution.objective_value().unwrap_or(Distance::MAX)
}

/// Running min, max and mean of the local search improvement percentage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ImprovementStats {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub avg: f64,
}

impl ImprovementStats {
    pub fn record(&mut self, value: f64) {
        if self.count == 0 {
            self.min = value;
            self.max = value;
        } else {
            self.min = self.min.min(value);
            self.max = self.max.max(value);
        }
        self.count += 1;
        self.avg += (value - self.avg) / self.count as f64;
    }

    /// Combines the statistics of two independent runs.
    pub fn merge(&mut self, other: &ImprovementStats) {
        if other.count == 0 {
            return;
        }
        if self.count == 0 {
            *self = *other;
            return;
        }
        let total = self.count + other.count;
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
        self.avg = (self.avg * self.count as f64 + other.avg * other.count as f64) / total as f64;
        self.count = total;
    }
}

/// Snapshot taken after every GRASP iteration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraspIteration {
    /// Zero-based iteration index.
    pub iteration: usize,
    pub beta: f64,
    /// Objective of the seed solution before local search.
    pub constructed_objective: Distance,
    /// Objective at the local optimum.
    pub improved_objective: Distance,
    /// [`improvement_percentage`] of this iteration.
    pub improvement: f64,
    /// Local search moves applied in this iteration.
    pub moves: usize,
    pub best_constructed_objective: Distance,
    pub best_objective: Distance,
    pub iterations_without_improvement: usize,
    pub elapsed: Duration,
}

/// Outcome of a GRASP run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraspResult<S> {
    pub best_solution: S,
    pub best_objective: Distance,
    /// Best objective among seed solutions, before local search.
    pub best_constructed_objective: Distance,
    pub iterations: usize,
    /// Iterations that produced a new best.
    pub improvements: usize,
    /// Index of the last iteration that produced a new best.
    pub last_improvement: usize,
    pub improvement_stats: ImprovementStats,
    pub total_moves: usize,
    pub elapsed: Duration,
    /// Seed of the random stream, for replay.
    pub seed: u64,
    /// Path relinking summary, when the elite pool is enabled.
    pub post_optimization: Option<PostOptimizationStats>,
}

impl<S> GraspResult<S> {
    /// Gap between the best seed and the best local optimum, in percent.
    pub fn constructed_gap(&self) -> f64 {
        improvement_percentage(self.best_constructed_objective, self.best_objective)
    }
}

#[cfg(feature = "json")]
impl<S: Serialize> GraspResult<S> {
    /// Renders the result as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// GRASP over a constructive heuristic and a local search.
///
/// # Examples
///
/// ```
/// use u_anpcp::grasp::{Grasp, GraspConfig};
/// use u_anpcp::models::{alpha_objective, FacilitySolution, Instance, Vertex};
///
/// let vertices: Vec<Vertex> = (0..12)
///     .map(|i| Vertex::new(i, (i % 4) as f64 * 10.0, (i / 4) as f64 * 10.0))
///     .collect();
/// let instance = Instance::same_set(vertices).unwrap();
///
/// let config = GraspConfig::new(4, 2).with_max_iterations(10).with_seed(7);
/// let mut grasp = Grasp::rgd_afvs(&instance, config).unwrap();
/// let result = grasp.run().unwrap();
///
/// let centers: Vec<usize> = result.best_solution.centers().iter().copied().collect();
/// let check = alpha_objective(&instance, &centers, 2).unwrap();
/// assert_eq!(result.best_objective, check.distance);
/// ```
pub struct Grasp<C, L: LocalSearch> {
    constructive: C,
    local_search: L,
    config: GraspConfig,
    reactive: Option<ReactiveBeta>,
    elite_pool: Option<ElitePool<L::Solution>>,
}

impl<C, L> Grasp<C, L>
where
    C: Constructive,
    L: PathRelinking,
    L::Solution: From<C::Solution> + FacilitySolution + Clone,
{
    /// Fails if the search parameters are invalid, if either component opens
    /// a number of centers other than `config.p`, or if the constructive
    /// heuristic rejects a beta the strategy can pick.
    ///
    /// Uniform betas are drawn from `[0, 1)` and are not checked here.
    pub fn new(mut constructive: C, local_search: L, config: GraspConfig) -> Result<Self, GraspConfigError> {
        config.validate_search()?;
        for p in [constructive.p(), local_search.p()] {
            if p != config.p {
                return Err(GraspConfigError::SizeMismatch(SolutionSizeError::new(config.p, p)));
            }
        }
        let reactive = match config.beta {
            BetaStrategy::Reactive { levels, .. } => Some(ReactiveBeta::new(levels)?),
            _ => None,
        };
        match (config.beta, &reactive) {
            (BetaStrategy::Fixed(beta), _) => constructive.set_beta(beta)?,
            (_, Some(reactive)) => {
                for &beta in reactive.betas() {
                    constructive.set_beta(beta)?;
                }
            }
            _ => {}
        }
        let elite_pool = if config.post_optimizes() {
            Some(ElitePool::with_min_symmetric_difference(
                config.pool_limit,
                config.min_symmetric_difference,
            )?)
        } else {
            None
        };
        Ok(Self {
            constructive,
            local_search,
            config,
            reactive,
            elite_pool,
        })
    }

    pub fn config(&self) -> &GraspConfig {
        &self.config
    }

    pub fn constructive(&self) -> &C {
        &self.constructive
    }

    pub fn local_search(&self) -> &L {
        &self.local_search
    }

    /// Beta statistics of the last run, for the reactive strategy.
    pub fn reactive(&self) -> Option<&ReactiveBeta> {
        self.reactive.as_ref()
    }

    /// Elite pool after the post-optimization of the last run.
    pub fn elite_pool(&self) -> Option<&ElitePool<L::Solution>> {
        self.elite_pool.as_ref()
    }

    /// Runs until the budget is exhausted.
    pub fn run(&mut self) -> Result<GraspResult<L::Solution>, L::Error> {
        self.run_with_observer(|_| {})
    }

    /// Runs until the budget is exhausted, passing every iteration record to
    /// `observer`.
    pub fn run_with_observer<F>(&mut self, mut observer: F) -> Result<GraspResult<L::Solution>, L::Error>
    where
        F: FnMut(&GraspIteration),
    {
        let seed = self.config.seed.unwrap_or_else(rand::random::<u64>);
        let mut rng = StdRng::seed_from_u64(seed);
        self.search(&mut rng, seed, &mut observer)
    }

    fn next_beta<R: Rng>(&self, rng: &mut R) -> (Option<usize>, f64) {
        match (self.config.beta, &self.reactive) {
            (BetaStrategy::Fixed(beta), _) => (None, beta),
            (BetaStrategy::Reactive { .. }, Some(reactive)) => {
                let (level, beta) = reactive.choose(rng);
                (Some(level), beta)
            }
            _ => (None, rng.random::<f64>()),
        }
    }

    #[tracing::instrument(
        level = "debug",
        name = "GRASP",
        skip_all,
        fields(p = self.config.p, alpha = self.config.alpha, seed = seed)
    )]
    fn search<F>(
        &mut self,
        rng: &mut StdRng,
        seed: u64,
        observer: &mut F,
    ) -> Result<GraspResult<L::Solution>, L::Error>
    where
        F: FnMut(&GraspIteration),
    {
        let start = Instant::now();
        let max_iterations = self.config.max_iterations;
        let time_limit = self.config.time_limit;
        tracing::info!(
            max_iterations,
            time_limit = ?time_limit,
            beta = ?self.config.beta,
            "GRASP started"
        );
        if let Some(reactive) = self.reactive.as_mut() {
            reactive.reset();
        }
        let mut elite_pool = self.elite_pool.as_ref().map(ElitePool::emptied);

        let mut best_solution = self.local_search.solution().clone();
        let mut best_objective = Distance::MAX;
        let mut best_constructed = Distance::MAX;
        let mut stats = ImprovementStats::default();
        let mut iteration = 0;
        let mut improvements = 0;
        let mut last_improvement = 0;
        let mut without_improvement = 0;
        let mut total_moves = 0;

        loop {
            let (level, beta) = self.next_beta(rng);
            let accepted = self.constructive.set_beta(beta).is_ok();
            debug_assert!(accepted, "beta {beta} is checked in Grasp::new");
            let constructed = self.constructive.construct(rng);
            self.local_search.set_solution(constructed.into())?;
            let constructed_objective = objective_of(self.local_search.solution());
            best_constructed = best_constructed.min(constructed_objective);

            self.local_search.try_improve();
            let improved_objective = objective_of(self.local_search.solution());
            let moves = self.local_search.moves();
            total_moves += moves;
            if let Some(pool) = elite_pool.as_mut() {
                pool.try_add(self.local_search.solution().clone());
            }

            let improvement = improvement_percentage(constructed_objective, improved_objective);
            stats.record(improvement);

            if let Some(level) = level {
                if let Some(reactive) = self.reactive.as_mut() {
                    reactive.increment(level, improved_objective);
                }
            }

            if improvements == 0 || improved_objective < best_objective {
                best_solution = self.local_search.solution().clone();
                best_objective = improved_objective;
                improvements += 1;
                last_improvement = iteration;
                without_improvement = 0;
                tracing::debug!(iteration, best_objective, beta, "new best");
            } else {
                without_improvement += 1;
            }

            if let BetaStrategy::Reactive { period, .. } = self.config.beta {
                if iteration > 0 && iteration % period == 0 {
                    if let Some(reactive) = self.reactive.as_mut() {
                        reactive.update(best_objective);
                    }
                }
            }

            let record = GraspIteration {
                iteration,
                beta,
                constructed_objective,
                improved_objective,
                improvement,
                moves,
                best_constructed_objective: best_constructed,
                best_objective,
                iterations_without_improvement: without_improvement,
                elapsed: start.elapsed(),
            };
            tracing::trace!(
                iteration,
                constructed_objective,
                improved_objective,
                moves,
                "iteration"
            );
            observer(&record);
            iteration += 1;

            if without_improvement >= max_iterations {
                break;
            }
            if time_limit.is_some_and(|limit| record.elapsed >= limit) {
                break;
            }
        }

        let post_optimization = match elite_pool {
            Some(pool) => {
                let (pool, mut summary) = post_optimize(&mut self.local_search, pool)?;
                summary.initial_objective = best_objective;
                if let (Some(elite), Some(objective)) = (pool.best(), pool.best_objective()) {
                    if objective < best_objective {
                        best_solution = elite.clone();
                        best_objective = objective;
                        tracing::debug!(best_objective, "new best from path relinking");
                    }
                }
                summary.best_objective = best_objective;
                self.elite_pool = Some(pool);
                Some(summary)
            }
            None => None,
        };

        let elapsed = start.elapsed();
        tracing::info!(
            iterations = iteration,
            best_objective,
            best_constructed,
            total_moves,
            elapsed_ms = elapsed.as_millis() as u64,
            "GRASP finished"
        );

        Ok(GraspResult {
            best_solution,
            best_objective,
            best_constructed_objective: best_constructed,
            iterations: iteration,
            improvements,
            last_improvement,
            improvement_stats: stats,
            total_moves,
            elapsed,
            seed,
            post_optimization,
        })
    }
}

impl<'a> Grasp<RandomizedGreedyDispersion<'a>, AlphaFastVertexSubstitution<'a>> {
    /// RGD construction with AFVS improvement, the standard pairing.
    ///
    /// The local search starts from the `p` lowest facility IDs; every
    /// iteration replaces that solution.
    pub fn rgd_afvs(instance: &'a Instance, config: GraspConfig) -> Result<Self, GraspConfigError> {
        config.validate(instance.m())?;
        let initial_beta = match config.beta {
            BetaStrategy::Fixed(beta) => beta,
            _ => 0.0,
        };
        let rgd = RandomizedGreedyDispersion::new(instance, config.p, initial_beta)?;
        let start = AnpcpSolution::with_centers(
            instance,
            instance.facility_ids().iter().copied().take(config.p),
        )
        .map_err(AfvsConfigError::from)?;
        let afvs = AlphaFastVertexSubstitution::new(instance, config.p, config.alpha, start)?
            .with_strategy(config.improvement);
        Grasp::new(rgd, afvs, config)
    }
}
