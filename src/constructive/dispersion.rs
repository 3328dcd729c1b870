//! Greedy maximum-dispersion construction.
//!
//! # Algorithm
//!
//! Starts from a uniformly random facility and repeatedly opens the closed
//! facility farthest from its nearest open center, until `p` centers are
//! open. Ties go to the lowest facility ID.
//!
//! [`OriginalGreedyDispersion`] recomputes every distance to the solution in
//! O(p) per facility. [`FastGreedyDispersion`] keeps a memory of those
//! distances and lowers it against the last inserted center only, which
//! also yields the critical pair without a final O(p²) pass. Both open the
//! same facilities for the same random stream.
//!
//! # Complexity
//!
//! - Original: O(m · p²)
//! - Fast: O(m · p)
//!
//! # Reference
//!
//! Erkut, E. (1990). "The discrete p-dispersion problem". *European Journal
//! of Operational Research* 46(1), 48-60.

use rand::Rng;

use crate::distance::Distance;
use crate::models::{CriticalPair, FacilitySolution, Instance, PdpSolution, VertexId};

use super::Constructive;

/// Draws the position of the first center in ascending ID order.
pub(super) fn first_center<R: Rng>(m: usize, rng: &mut R) -> usize {
    rng.random_range(0..m as u64) as usize
}

/// Candidate with the largest value; the first one wins ties.
pub(super) fn farthest(candidates: &[(usize, Distance)]) -> Option<usize> {
    let mut best: Option<(usize, Distance)> = None;
    for &(facility, distance) in candidates {
        if best.map_or(true, |(_, b)| distance > b) {
            best = Some((facility, distance));
        }
    }
    best.map(|(facility, _)| facility)
}

/// Memory-based greedy dispersion from the facility index `first`.
///
/// Every round, `select` receives the closed facilities in ascending ID
/// order with their distance to the solution and returns the one to open.
pub(super) fn memory_dispersion<S>(
    instance: &Instance,
    p: usize,
    first: usize,
    mut select: S,
) -> PdpSolution
where
    S: FnMut(&[(usize, Distance)]) -> Option<usize>,
{
    let ff = instance.distances_ff();
    let map = ff.row_map();
    let order = map.indices_by_id();
    let m = order.len();

    let mut solution = PdpSolution::from_instance(instance);
    if p == 0 {
        return solution;
    }

    let mut memory = vec![Distance::MAX; m];
    let mut nearest = vec![first; m];
    let mut open = vec![false; m];
    let mut candidates: Vec<(usize, Distance)> = Vec::with_capacity(m);
    let mut critical: Option<CriticalPair> = None;

    let mut last = first;
    open[last] = true;
    solution.insert(map.id(last));

    while solution.size() < p {
        // O(m)
        candidates.clear();
        for &f in order {
            if open[f] {
                continue;
            }
            let d = ff.get(f, last);
            if d < memory[f] {
                memory[f] = d;
                nearest[f] = last;
            }
            candidates.push((f, memory[f]));
        }
        if candidates.is_empty() {
            break;
        }

        let Some(chosen) = select(&candidates) else {
            break;
        };
        if critical.map_or(true, |c| memory[chosen] < c.distance) {
            critical = Some(CriticalPair::new(
                map.id(chosen),
                map.id(nearest[chosen]),
                memory[chosen],
            ));
        }
        open[chosen] = true;
        solution.insert(map.id(chosen));
        last = chosen;
    }

    solution.set_critical_pair(critical);
    solution
}

/// Greedy dispersion with full recomputation, O(m · p²).
///
/// Leaves the objective unset; call
/// [`PdpSolution::update_objective_value`] to compute it.
#[derive(Debug, Clone)]
pub struct OriginalGreedyDispersion<'a> {
    instance: &'a Instance,
    p: usize,
}

impl<'a> OriginalGreedyDispersion<'a> {
    pub fn new(instance: &'a Instance, p: usize) -> Self {
        Self { instance, p }
    }

    /// Builds a solution starting from the given facility.
    ///
    /// Returns `None` if `first` is not a facility of the instance.
    pub fn construct_from(&self, first: VertexId) -> Option<PdpSolution> {
        let index = self.instance.facility_map().index(first)?;
        Some(self.build(index))
    }

    fn build(&self, first: usize) -> PdpSolution {
        let ff = self.instance.distances_ff();
        let map = ff.row_map();

        let mut solution = PdpSolution::from_instance(self.instance);
        if self.p == 0 {
            return solution;
        }

        let mut open = vec![false; map.len()];
        let mut centers = vec![first];
        open[first] = true;
        solution.insert(map.id(first));

        let mut candidates: Vec<(usize, Distance)> = Vec::with_capacity(map.len());
        while centers.len() < self.p {
            candidates.clear();
            for &f in map.indices_by_id() {
                if open[f] {
                    continue;
                }
                // O(p)
                let d = centers
                    .iter()
                    .map(|&c| ff.get(f, c))
                    .min()
                    .unwrap_or(Distance::MAX);
                candidates.push((f, d));
            }
            let Some(chosen) = farthest(&candidates) else {
                break;
            };
            open[chosen] = true;
            centers.push(chosen);
            solution.insert(map.id(chosen));
        }
        solution
    }
}

impl Constructive for OriginalGreedyDispersion<'_> {
    type Solution = PdpSolution;

    fn p(&self) -> usize {
        self.p
    }

    fn construct<R: Rng>(&mut self, rng: &mut R) -> PdpSolution {
        let order = self.instance.facility_map().indices_by_id();
        let first = order[first_center(order.len(), rng)];
        self.build(first)
    }
}

/// Greedy dispersion with an incremental distance memory, O(m · p).
///
/// The critical pair is set on the returned solution.
///
/// # Examples
///
/// ```
/// use u_anpcp::constructive::FastGreedyDispersion;
/// use u_anpcp::models::{FacilitySolution, Instance, Vertex};
///
/// let vertices: Vec<Vertex> = (0..5).map(|i| Vertex::new(i, i as f64 * 10.0, 0.0)).collect();
/// let instance = Instance::same_set(vertices).unwrap();
///
/// let fgd = FastGreedyDispersion::new(&instance, 3);
/// let solution = fgd.construct_from(0).unwrap();
/// assert_eq!(solution.centers().iter().copied().collect::<Vec<_>>(), vec![0, 2, 4]);
/// assert_eq!(solution.objective_value(), Some(20));
/// ```
#[derive(Debug, Clone)]
pub struct FastGreedyDispersion<'a> {
    instance: &'a Instance,
    p: usize,
}

impl<'a> FastGreedyDispersion<'a> {
    pub fn new(instance: &'a Instance, p: usize) -> Self {
        Self { instance, p }
    }

    /// Builds a solution starting from the given facility.
    ///
    /// Returns `None` if `first` is not a facility of the instance.
    pub fn construct_from(&self, first: VertexId) -> Option<PdpSolution> {
        let index = self.instance.facility_map().index(first)?;
        Some(self.build(index))
    }

    fn build(&self, first: usize) -> PdpSolution {
        memory_dispersion(self.instance, self.p, first, farthest)
    }
}

impl Constructive for FastGreedyDispersion<'_> {
    type Solution = PdpSolution;

    fn p(&self) -> usize {
        self.p
    }

    fn construct<R: Rng>(&mut self, rng: &mut R) -> PdpSolution {
        let order = self.instance.facility_map().indices_by_id();
        let first = order[first_center(order.len(), rng)];
        self.build(first)
    }
}
