//! GRASP configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constructive::validate_beta;
use crate::local_search::{validate_parameters, ImprovementStrategy};

use super::err::{GraspConfigError, InvalidPoolLimitError, InvalidReactiveLevelsError};

/// How the RCL greediness is picked each iteration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BetaStrategy {
    /// Same beta every iteration.
    Fixed(f64),
    /// Beta drawn uniformly from `[0, 1)` every iteration.
    Uniform,
    /// Reactive GRASP over `levels` evenly spaced betas in `[0, 1]`, with
    /// probabilities refreshed every `period` iterations.
    Reactive { levels: usize, period: usize },
}

impl BetaStrategy {
    /// Reactive strategy with 11 levels (steps of 0.1) and a period of 25.
    pub fn reactive() -> Self {
        BetaStrategy::Reactive {
            levels: 11,
            period: 25,
        }
    }
}

impl Default for BetaStrategy {
    fn default() -> Self {
        BetaStrategy::Fixed(0.2)
    }
}

/// Budget and parameters of a GRASP run.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_anpcp::grasp::{BetaStrategy, GraspConfig};
///
/// let config = GraspConfig::new(10, 2)
///     .with_max_iterations(50)
///     .with_time_limit(Duration::from_secs(30))
///     .with_beta(BetaStrategy::reactive())
///     .with_seed(42);
/// assert!(config.validate(100).is_ok());
/// assert!(config.validate(5).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraspConfig {
    /// Number of centers to open.
    pub p: usize,
    /// Rank of the nearest center each user is measured against.
    pub alpha: usize,
    /// Consecutive non-improving iterations before stopping.
    pub max_iterations: usize,
    /// Wall-clock budget, unbounded when `None`.
    pub time_limit: Option<Duration>,
    /// RCL greediness per iteration.
    pub beta: BetaStrategy,
    /// Random seed, drawn from entropy when `None`.
    pub seed: Option<u64>,
    /// Local search scanning strategy.
    pub improvement: ImprovementStrategy,
    /// Capacity of the elite pool. Path relinking post-optimization runs
    /// only when it is at least 2.
    pub pool_limit: usize,
    /// Facilities an elite must differ in from every other elite.
    pub min_symmetric_difference: usize,
}

impl GraspConfig {
    /// Creates a configuration with the default budget: 100 non-improving
    /// iterations, no time limit, `beta = 0.2`, no post-optimization.
    pub fn new(p: usize, alpha: usize) -> Self {
        Self {
            p,
            alpha,
            max_iterations: 100,
            time_limit: None,
            beta: BetaStrategy::default(),
            seed: None,
            improvement: ImprovementStrategy::default(),
            pool_limit: 1,
            min_symmetric_difference: 4,
        }
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.time_limit = Some(time_limit);
        self
    }

    pub fn with_beta(mut self, beta: BetaStrategy) -> Self {
        self.beta = beta;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_improvement(mut self, improvement: ImprovementStrategy) -> Self {
        self.improvement = improvement;
        self
    }

    /// Keeps up to `pool_limit` elites and relinks them after the loop.
    pub fn with_pool_limit(mut self, pool_limit: usize) -> Self {
        self.pool_limit = pool_limit;
        self
    }

    pub fn with_min_symmetric_difference(mut self, min_symmetric_difference: usize) -> Self {
        self.min_symmetric_difference = min_symmetric_difference;
        self
    }

    /// Returns `true` if path relinking runs after the loop.
    pub fn post_optimizes(&self) -> bool {
        self.pool_limit > 1
    }

    /// Checks the configuration against an instance with `m` facilities.
    pub fn validate(&self, m: usize) -> Result<(), GraspConfigError> {
        validate_parameters(self.p, self.alpha, m)?;
        self.validate_search()
    }

    /// Checks the budget, the pool and the beta strategy only.
    pub fn validate_search(&self) -> Result<(), GraspConfigError> {
        if self.max_iterations == 0 {
            return Err(GraspConfigError::ZeroIterations);
        }
        if self.pool_limit == 0 {
            return Err(InvalidPoolLimitError::new(0).into());
        }
        match self.beta {
            BetaStrategy::Fixed(beta) => {
                validate_beta(beta)?;
            }
            BetaStrategy::Uniform => {}
            BetaStrategy::Reactive { levels, period } => {
                if levels < 2 {
                    return Err(InvalidReactiveLevelsError::new(levels).into());
                }
                if period == 0 {
                    return Err(GraspConfigError::ZeroPeriod);
                }
            }
        }
        Ok(())
    }
}
