//! Constructive heuristic errors.

/// Greediness parameter outside `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InvalidBetaError {
    beta: f64,
}

impl InvalidBetaError {
    pub fn new(beta: f64) -> Self {
        Self { beta }
    }

    pub fn beta(&self) -> f64 {
        self.beta
    }
}

impl std::fmt::Display for InvalidBetaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Beta must lie in [0, 1], got {}", self.beta)
    }
}

impl std::error::Error for InvalidBetaError {}

/// Checks `0 <= beta <= 1`, rejecting NaN.
pub fn validate_beta(beta: f64) -> Result<f64, InvalidBetaError> {
    if (0.0..=1.0).contains(&beta) {
        Ok(beta)
    } else {
        Err(InvalidBetaError::new(beta))
    }
}
