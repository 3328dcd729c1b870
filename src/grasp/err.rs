//! GRASP configuration errors.

use crate::constructive::InvalidBetaError;
use crate::local_search::{AfvsConfigError, SolutionSizeError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidReactiveLevelsError {
    levels: usize,
}

impl InvalidReactiveLevelsError {
    pub fn new(levels: usize) -> Self {
        Self { levels }
    }

    pub fn levels(&self) -> usize {
        self.levels
    }
}

impl std::fmt::Display for InvalidReactiveLevelsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Reactive beta needs at least 2 levels, got {}",
            self.levels
        )
    }
}

impl std::error::Error for InvalidReactiveLevelsError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidPoolLimitError {
    limit: usize,
}

impl InvalidPoolLimitError {
    pub fn new(limit: usize) -> Self {
        Self { limit }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}

impl std::fmt::Display for InvalidPoolLimitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Elite pool limit must be positive, got {}", self.limit)
    }
}

impl std::error::Error for InvalidPoolLimitError {}

#[derive(Debug, Clone, PartialEq)]
pub enum GraspConfigError {
    Afvs(AfvsConfigError),
    Beta(InvalidBetaError),
    ReactiveLevels(InvalidReactiveLevelsError),
    PoolLimit(InvalidPoolLimitError),
    /// A component opens a different number of centers than the config.
    SizeMismatch(SolutionSizeError),
    /// The reactive update period is zero.
    ZeroPeriod,
    /// The iteration budget is zero.
    ZeroIterations,
}

impl std::fmt::Display for GraspConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GraspConfigError::Afvs(err) => write!(f, "{}", err),
            GraspConfigError::Beta(err) => write!(f, "{}", err),
            GraspConfigError::ReactiveLevels(err) => write!(f, "{}", err),
            GraspConfigError::PoolLimit(err) => write!(f, "{}", err),
            GraspConfigError::SizeMismatch(err) => write!(f, "{}", err),
            GraspConfigError::ZeroPeriod => write!(f, "Reactive beta period must be positive"),
            GraspConfigError::ZeroIterations => {
                write!(f, "Iterations without improvement must be positive")
            }
        }
    }
}

impl std::error::Error for GraspConfigError {}

impl From<AfvsConfigError> for GraspConfigError {
    fn from(err: AfvsConfigError) -> Self {
        GraspConfigError::Afvs(err)
    }
}

impl From<InvalidBetaError> for GraspConfigError {
    fn from(err: InvalidBetaError) -> Self {
        GraspConfigError::Beta(err)
    }
}

impl From<InvalidReactiveLevelsError> for GraspConfigError {
    fn from(err: InvalidReactiveLevelsError) -> Self {
        GraspConfigError::ReactiveLevels(err)
    }
}

impl From<InvalidPoolLimitError> for GraspConfigError {
    fn from(err: InvalidPoolLimitError) -> Self {
        GraspConfigError::PoolLimit(err)
    }
}
