//! Local search configuration errors.

use crate::models::UnknownFacilityError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlphaOutOfRangeError {
    alpha: usize,
    p: usize,
}

impl AlphaOutOfRangeError {
    pub fn new(alpha: usize, p: usize) -> Self {
        Self { alpha, p }
    }

    pub fn alpha(&self) -> usize {
        self.alpha
    }

    pub fn p(&self) -> usize {
        self.p
    }
}

impl std::fmt::Display for AlphaOutOfRangeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Alpha must satisfy 1 <= alpha < p, got alpha = {} and p = {}",
            self.alpha, self.p
        )
    }
}

impl std::error::Error for AlphaOutOfRangeError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolutionSizeError {
    expected: usize,
    actual: usize,
}

impl SolutionSizeError {
    pub fn new(expected: usize, actual: usize) -> Self {
        Self { expected, actual }
    }

    pub fn expected(&self) -> usize {
        self.expected
    }

    pub fn actual(&self) -> usize {
        self.actual
    }
}

impl std::fmt::Display for SolutionSizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Starting solution has {} centers, expected p = {}",
            self.actual, self.expected
        )
    }
}

impl std::error::Error for SolutionSizeError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FacilityCountError {
    p: usize,
    m: usize,
}

impl FacilityCountError {
    pub fn new(p: usize, m: usize) -> Self {
        Self { p, m }
    }

    pub fn p(&self) -> usize {
        self.p
    }

    pub fn m(&self) -> usize {
        self.m
    }
}

impl std::fmt::Display for FacilityCountError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Cannot open p = {} centers among {} facilities",
            self.p, self.m
        )
    }
}

impl std::error::Error for FacilityCountError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AfvsConfigError {
    AlphaOutOfRange(AlphaOutOfRangeError),
    SolutionSize(SolutionSizeError),
    FacilityCount(FacilityCountError),
    UnknownFacility(UnknownFacilityError),
}

impl std::fmt::Display for AfvsConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AfvsConfigError::AlphaOutOfRange(err) => write!(f, "{}", err),
            AfvsConfigError::SolutionSize(err) => write!(f, "{}", err),
            AfvsConfigError::FacilityCount(err) => write!(f, "{}", err),
            AfvsConfigError::UnknownFacility(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for AfvsConfigError {}

impl From<AlphaOutOfRangeError> for AfvsConfigError {
    fn from(err: AlphaOutOfRangeError) -> Self {
        AfvsConfigError::AlphaOutOfRange(err)
    }
}

impl From<SolutionSizeError> for AfvsConfigError {
    fn from(err: SolutionSizeError) -> Self {
        AfvsConfigError::SolutionSize(err)
    }
}

impl From<FacilityCountError> for AfvsConfigError {
    fn from(err: FacilityCountError) -> Self {
        AfvsConfigError::FacilityCount(err)
    }
}

impl From<UnknownFacilityError> for AfvsConfigError {
    fn from(err: UnknownFacilityError) -> Self {
        AfvsConfigError::UnknownFacility(err)
    }
}

/// Checks `1 <= alpha < p <= m`.
pub fn validate_parameters(p: usize, alpha: usize, m: usize) -> Result<(), AfvsConfigError> {
    if p > m {
        return Err(FacilityCountError::new(p, m).into());
    }
    if alpha == 0 || alpha >= p {
        return Err(AlphaOutOfRangeError::new(alpha, p).into());
    }
    Ok(())
}
