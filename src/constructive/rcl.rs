//! Restricted candidate list (RCL) for GRASP construction.
//!
//! # Algorithm
//!
//! Candidates are collected with their greedy value. Selection computes
//!
//! ```text
//! threshold = max - beta · (max - min)
//! ```
//!
//! over the collected values and picks uniformly at random among the
//! candidates whose value reaches the threshold. `beta = 0` is pure greedy,
//! `beta = 1` is uniform random. The list is emptied after every selection.
//!
//! # Reference
//!
//! Feo, T. A. & Resende, M. G. C. (1995). "Greedy Randomized Adaptive Search
//! Procedures". *Journal of Global Optimization* 6, 109-133.

use rand::Rng;

use crate::distance::Distance;

use super::err::{validate_beta, InvalidBetaError};

/// Candidate facilities of one construction round.
///
/// # Examples
///
/// ```
/// use u_anpcp::constructive::RestrictedCandidateList;
///
/// let mut rcl = RestrictedCandidateList::new(0.0).unwrap();
/// rcl.add(0, 20);
/// rcl.add(1, 10);
/// rcl.add(2, 30);
///
/// let mut rng = rand::rng();
/// assert_eq!(rcl.facility_to_insert(&mut rng), 2);
/// assert!(rcl.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct RestrictedCandidateList {
    beta: f64,
    candidates: Vec<(usize, Distance)>,
    max: Distance,
    min: Distance,
}

impl RestrictedCandidateList {
    /// Creates an empty list. Fails unless `0 <= beta <= 1`.
    pub fn new(beta: f64) -> Result<Self, InvalidBetaError> {
        Ok(Self {
            beta: validate_beta(beta)?,
            candidates: Vec::new(),
            max: Distance::MIN,
            min: Distance::MAX,
        })
    }

    pub fn beta(&self) -> f64 {
        self.beta
    }

    pub fn set_beta(&mut self, beta: f64) -> Result<(), InvalidBetaError> {
        self.beta = validate_beta(beta)?;
        Ok(())
    }

    /// Adds a candidate and widens the value range.
    pub fn add(&mut self, facility: usize, distance: Distance) {
        self.candidates.push((facility, distance));
        self.max = self.max.max(distance);
        self.min = self.min.min(distance);
    }

    /// Current threshold, or `None` while the list is empty.
    pub fn threshold(&self) -> Option<f64> {
        if self.candidates.is_empty() {
            return None;
        }
        let (max, min) = (self.max as f64, self.min as f64);
        Some(max - self.beta * (max - min))
    }

    /// Candidates whose value reaches the threshold, in insertion order.
    pub fn eligible(&self) -> Vec<usize> {
        let Some(threshold) = self.threshold() else {
            return Vec::new();
        };
        self.candidates
            .iter()
            .filter(|&&(_, d)| d as f64 >= threshold)
            .map(|&(facility, _)| facility)
            .collect()
    }

    /// Picks an eligible candidate uniformly at random and empties the list.
    ///
    /// # Panics
    ///
    /// Panics if the list is empty.
    pub fn facility_to_insert<R: Rng>(&mut self, rng: &mut R) -> usize {
        let eligible = self.eligible();
        assert!(
            !eligible.is_empty(),
            "restricted candidate list has no candidates to select from"
        );
        let k = rng.random_range(0..eligible.len() as u64) as usize;
        self.clear();
        eligible[k]
    }

    pub fn clear(&mut self) {
        self.candidates.clear();
        self.max = Distance::MIN;
        self.min = Distance::MAX;
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}
