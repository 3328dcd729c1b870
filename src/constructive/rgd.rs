//! Randomized greedy dispersion (RGD) for GRASP.
//!
//! Same incremental memory as [`FastGreedyDispersion`](super::FastGreedyDispersion),
//! but every round all closed facilities go through a
//! [`RestrictedCandidateList`] instead of taking the argmax.
//!
//! # Complexity
//!
//! O(m · p)

use rand::Rng;

use crate::models::{Instance, PdpSolution};

use super::dispersion::{first_center, memory_dispersion};
use super::{Constructive, InvalidBetaError, RestrictedCandidateList};

/// Greedy randomized dispersion construction.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use u_anpcp::constructive::{Constructive, RandomizedGreedyDispersion};
/// use u_anpcp::models::{FacilitySolution, Instance, Vertex};
///
/// let vertices: Vec<Vertex> = (0..8).map(|i| Vertex::new(i, i as f64, (i * i) as f64)).collect();
/// let instance = Instance::same_set(vertices).unwrap();
///
/// let mut rgd = RandomizedGreedyDispersion::new(&instance, 4, 0.3).unwrap();
/// let solution = rgd.construct(&mut StdRng::seed_from_u64(42));
/// assert_eq!(solution.size(), 4);
/// assert!(solution.objective_value().is_some());
/// ```
#[derive(Debug, Clone)]
pub struct RandomizedGreedyDispersion<'a> {
    instance: &'a Instance,
    p: usize,
    rcl: RestrictedCandidateList,
}

impl<'a> RandomizedGreedyDispersion<'a> {
    /// Fails unless `0 <= beta <= 1`.
    pub fn new(instance: &'a Instance, p: usize, beta: f64) -> Result<Self, InvalidBetaError> {
        Ok(Self {
            instance,
            p,
            rcl: RestrictedCandidateList::new(beta)?,
        })
    }

    pub fn beta(&self) -> f64 {
        self.rcl.beta()
    }
}

impl Constructive for RandomizedGreedyDispersion<'_> {
    type Solution = PdpSolution;

    fn p(&self) -> usize {
        self.p
    }

    fn construct<R: Rng>(&mut self, rng: &mut R) -> PdpSolution {
        let order = self.instance.facility_map().indices_by_id();
        let first = order[first_center(order.len(), rng)];
        let rcl = &mut self.rcl;
        rcl.clear();
        memory_dispersion(self.instance, self.p, first, |candidates| {
            for &(facility, distance) in candidates {
                rcl.add(facility, distance);
            }
            Some(rcl.facility_to_insert(rng))
        })
    }

    fn set_beta(&mut self, beta: f64) -> Result<(), InvalidBetaError> {
        self.rcl.set_beta(beta)
    }
}
