//! Bounded pool of good and mutually distinct solutions.
//!
//! A candidate is admitted only if its center set differs from every elite
//! in at least `min_symmetric_difference` facilities. Once the pool is full,
//! a candidate strictly better than the worst elite evicts the elite most
//! similar to it; ties go to the elite with the larger objective, then to
//! the lower slot.

use crate::distance::Distance;
use crate::models::FacilitySolution;

use super::err::InvalidPoolLimitError;

#[derive(Debug, Clone)]
struct Elite<S> {
    solution: S,
    objective: Distance,
}

/// Elite solutions kept for path relinking.
///
/// # Examples
///
/// ```
/// use u_anpcp::grasp::ElitePool;
/// use u_anpcp::models::AnpcpSolution;
///
/// let pool = ElitePool::<AnpcpSolution>::new(5).unwrap();
/// assert_eq!(pool.min_symmetric_difference(), 4);
/// assert!(pool.is_empty());
/// assert!(ElitePool::<AnpcpSolution>::new(0).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct ElitePool<S> {
    limit: usize,
    min_symmetric_difference: usize,
    elites: Vec<Elite<S>>,
    best: Option<usize>,
    worst: Option<usize>,
}

impl<S: FacilitySolution> ElitePool<S> {
    /// Pool of at most `limit` elites differing in at least 4 facilities.
    pub fn new(limit: usize) -> Result<Self, InvalidPoolLimitError> {
        Self::with_min_symmetric_difference(limit, 4)
    }

    pub fn with_min_symmetric_difference(
        limit: usize,
        min_symmetric_difference: usize,
    ) -> Result<Self, InvalidPoolLimitError> {
        if limit == 0 {
            return Err(InvalidPoolLimitError::new(limit));
        }
        Ok(Self {
            limit,
            min_symmetric_difference,
            elites: Vec::with_capacity(limit),
            best: None,
            worst: None,
        })
    }

    /// An empty pool with the same limit and admission threshold.
    pub fn emptied(&self) -> Self {
        Self {
            limit: self.limit,
            min_symmetric_difference: self.min_symmetric_difference,
            elites: Vec::with_capacity(self.limit),
            best: None,
            worst: None,
        }
    }

    pub fn clear(&mut self) {
        self.elites.clear();
        self.best = None;
        self.worst = None;
    }

    /// Offers `candidate` to the pool and returns `true` if it was admitted.
    ///
    /// Candidates without an objective value are rejected. O(limit · p)
    pub fn try_add(&mut self, candidate: S) -> bool {
        let Some(objective) = candidate.objective_value() else {
            return false;
        };

        // (symmetric difference, elite objective, slot) of the eviction target
        let mut closest: Option<(usize, Distance, usize)> = None;
        for (slot, elite) in self.elites.iter().enumerate() {
            let difference = elite
                .solution
                .centers()
                .symmetric_difference(candidate.centers())
                .count();
            if difference < self.min_symmetric_difference {
                return false;
            }
            let closer = closest.map_or(true, |(d, o, _)| {
                difference < d || (difference == d && elite.objective > o)
            });
            if closer {
                closest = Some((difference, elite.objective, slot));
            }
        }

        let elite = Elite {
            solution: candidate,
            objective,
        };
        if self.elites.len() < self.limit {
            self.elites.push(elite);
        } else {
            let beats_worst = self.worst_objective().is_some_and(|worst| objective < worst);
            let Some((_, _, slot)) = closest.filter(|_| beats_worst) else {
                return false;
            };
            self.elites[slot] = elite;
        }
        self.refresh_extremes();
        true
    }

    fn refresh_extremes(&mut self) {
        self.best = None;
        self.worst = None;
        for (slot, elite) in self.elites.iter().enumerate() {
            if self.best.map_or(true, |b| elite.objective < self.elites[b].objective) {
                self.best = Some(slot);
            }
            if self.worst.map_or(true, |w| elite.objective > self.elites[w].objective) {
                self.worst = Some(slot);
            }
        }
    }

    /// Elite with the smallest objective; the lowest slot on ties.
    pub fn best(&self) -> Option<&S> {
        self.best.map(|slot| &self.elites[slot].solution)
    }

    pub fn best_objective(&self) -> Option<Distance> {
        self.best.map(|slot| self.elites[slot].objective)
    }

    /// Elite with the largest objective; the lowest slot on ties.
    pub fn worst(&self) -> Option<&S> {
        self.worst.map(|slot| &self.elites[slot].solution)
    }

    pub fn worst_objective(&self) -> Option<Distance> {
        self.worst.map(|slot| self.elites[slot].objective)
    }

    /// Elites and their objectives in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (&S, Distance)> + '_ {
        self.elites.iter().map(|e| (&e.solution, e.objective))
    }

    pub fn len(&self) -> usize {
        self.elites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elites.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.elites.len() == self.limit
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn min_symmetric_difference(&self) -> usize {
        self.min_symmetric_difference
    }
}
