//! Alpha Fast Vertex Substitution (AFVS) local search.
//!
//! # Algorithm
//!
//! Vertex substitution specialized for the alpha-neighbor objective. For
//! every closed facility `fi` that is closer to the critical user than the
//! current objective, each user contributes a *loss* (its alpha-th distance
//! if a center it depends on is closed) and a *gain* (its alpha-th distance
//! otherwise) to the centers returned by its [`AlphaNeighborhood`]. Attracted
//! users also raise a floor every swap with `fi` must pay. The objective of
//! closing center `c` is then
//!
//! ```text
//! max(floor, losses[c], largest gain of any other center)
//! ```
//!
//! which a top-2 selection over the gains answers in O(1) per center. The
//! best swap is applied only if it strictly improves the objective; the
//! allocator and critical allocation are then re-derived.
//!
//! # Complexity
//!
//! O(n · m · p) per evaluated step, O(n · m) per applied swap.
//!
//! # Reference
//!
//! Mladenović, N., Labbé, M. & Hansen, P. (2003). "Solving the p-Center
//! Problem with Tabu Search and Variable Neighborhood Search". *Networks*
//! 42(1), 48-64.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::distance::Distance;
use crate::models::{Allocation, AnpcpSolution, FacilitySolution, Instance, VertexId};

use super::err::{validate_parameters, AfvsConfigError, SolutionSizeError};
use super::{
    Allocator, AlphaNeighborhood, GainsFacility, LargestTwoGains, LocalSearch, PathRelinking,
};

/// How facility-in candidates are scanned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImprovementStrategy {
    /// Evaluate every candidate and apply the best swap.
    #[default]
    Best,
    /// Apply the first strictly improving swap found.
    First,
}

/// Phase of the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AfvsState {
    /// Looking for an improving swap.
    Evaluating,
    /// No single swap improves the objective.
    LocalOptimum,
}

/// Best swap found for one facility-in and its estimated objective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PotentialSwap {
    pub facility_in: VertexId,
    pub facility_out: VertexId,
    pub objective: Distance,
}

/// AFVS over a borrowed instance.
///
/// One instance can be reused across many starting solutions through
/// [`set_solution`](Self::set_solution).
///
/// # Examples
///
/// ```
/// use u_anpcp::local_search::AlphaFastVertexSubstitution;
/// use u_anpcp::models::{AnpcpSolution, FacilitySolution, Instance, Vertex};
///
/// let vertices: Vec<Vertex> = (0..6).map(|i| Vertex::new(i, i as f64 * 10.0, 0.0)).collect();
/// let instance = Instance::same_set(vertices).unwrap();
/// let start = AnpcpSolution::with_centers(&instance, [0, 1, 2]).unwrap();
///
/// let mut afvs = AlphaFastVertexSubstitution::new(&instance, 3, 2, start).unwrap();
/// assert_eq!(afvs.solution().objective_value(), Some(40));
/// assert!(afvs.try_improve());
/// assert_eq!(afvs.solution().objective_value(), Some(30));
/// assert!(!afvs.try_improve());
/// ```
#[derive(Debug, Clone)]
pub struct AlphaFastVertexSubstitution<'a> {
    instance: &'a Instance,
    p: usize,
    alpha: usize,
    strategy: ImprovementStrategy,
    solution: AnpcpSolution,
    allocator: Allocator,
    is_center: Vec<bool>,
    /// Open facility indices, ascending by ID.
    centers: Vec<usize>,
    /// Closed facility indices, ascending by ID.
    closed: Vec<usize>,
    critical_user: usize,
    losses: Vec<Distance>,
    gains: Vec<Distance>,
    state: AfvsState,
    moves: usize,
    total_moves: usize,
}

impl<'a> AlphaFastVertexSubstitution<'a> {
    /// Creates the search and derives the allocator of `solution`.
    ///
    /// Fails unless `1 <= alpha < p <= m` and `solution` opens exactly `p`
    /// facilities of `instance`.
    pub fn new(
        instance: &'a Instance,
        p: usize,
        alpha: usize,
        solution: AnpcpSolution,
    ) -> Result<Self, AfvsConfigError> {
        validate_parameters(p, alpha, instance.m())?;
        let m = instance.m();
        let mut afvs = Self {
            instance,
            p,
            alpha,
            strategy: ImprovementStrategy::default(),
            solution: AnpcpSolution::from_instance(instance),
            allocator: Allocator::new(alpha, instance.n(), m),
            is_center: vec![false; m],
            centers: Vec::with_capacity(p),
            closed: Vec::with_capacity(m - p),
            critical_user: 0,
            losses: vec![0; m],
            gains: vec![0; m],
            state: AfvsState::Evaluating,
            moves: 0,
            total_moves: 0,
        };
        afvs.set_solution(solution)?;
        Ok(afvs)
    }

    /// Sets the candidate scanning strategy.
    pub fn with_strategy(mut self, strategy: ImprovementStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Loads a new starting solution. O(n · m)
    ///
    /// The closed set is rebuilt from the instance, so only the centers of
    /// `solution` matter.
    pub fn set_solution(&mut self, solution: AnpcpSolution) -> Result<(), AfvsConfigError> {
        let solution = AnpcpSolution::with_centers(self.instance, solution.centers().iter().copied())?;
        if solution.size() != self.p {
            return Err(SolutionSizeError::new(self.p, solution.size()).into());
        }

        let facility_map = self.instance.facility_map();
        self.is_center.fill(false);
        for &id in solution.centers() {
            if let Some(index) = facility_map.index(id) {
                self.is_center[index] = true;
            }
        }
        self.solution = solution;
        self.moves = 0;
        self.refresh_center_lists();
        self.reallocate();
        self.state = AfvsState::Evaluating;
        Ok(())
    }

    /// Runs [`step`](Self::step) until a local optimum is reached.
    /// Returns `true` if any swap was applied.
    #[tracing::instrument(level = "debug", name = "afvs", skip_all, fields(p = self.p, alpha = self.alpha))]
    pub fn try_improve(&mut self) -> bool {
        let mut improved = false;
        while self.step() {
            improved = true;
        }
        tracing::debug!(
            moves = self.moves,
            objective = ?self.solution.objective_value(),
            "local optimum"
        );
        improved
    }

    /// Evaluates the neighborhood once and applies the best swap if it
    /// strictly improves the objective.
    pub fn step(&mut self) -> bool {
        let Some(current) = self.solution.objective_value() else {
            self.state = AfvsState::LocalOptimum;
            return false;
        };

        self.state = AfvsState::Evaluating;
        match self.best_swap() {
            Some(swap) if swap.objective < current => {
                self.apply(swap);
                true
            }
            _ => {
                self.state = AfvsState::LocalOptimum;
                false
            }
        }
    }

    /// Best swap over the facility-in candidates that are closer to the
    /// critical user than the current objective.
    ///
    /// Candidates are scanned in ascending ID order; ties keep the first.
    pub fn best_swap(&mut self) -> Option<PotentialSwap> {
        let current = self.solution.objective_value()?;
        let instance = self.instance;
        let uf = instance.distances_uf();

        let mut best: Option<PotentialSwap> = None;
        for k in 0..self.closed.len() {
            let fi = self.closed[k];
            if uf.get(self.critical_user, fi) >= current {
                continue;
            }
            let Some(candidate) = self.evaluate(fi, |_| true) else {
                continue;
            };
            if best.map_or(true, |b| candidate.objective < b.objective) {
                best = Some(candidate);
                if self.strategy == ImprovementStrategy::First && candidate.objective < current {
                    break;
                }
            }
        }
        best
    }

    /// Best facility-out for opening `facility_in`, without pruning.
    ///
    /// Returns `None` if `facility_in` is not a closed facility.
    pub fn potential_swap(&mut self, facility_in: VertexId) -> Option<PotentialSwap> {
        let fi = self.instance.facility_map().index(facility_in)?;
        if self.is_center[fi] {
            return None;
        }
        self.evaluate(fi, |_| true)
    }

    /// Best swap opening one of `candidates_in` and closing one of
    /// `candidates_out`, whether or not it improves. O(|candidates_in| · n · p)
    ///
    /// IDs that are not closed (for `candidates_in`) or not open (for
    /// `candidates_out`) are ignored. Ties keep the lowest IDs.
    pub fn relinking_swap(
        &mut self,
        candidates_in: &BTreeSet<VertexId>,
        candidates_out: &BTreeSet<VertexId>,
    ) -> Option<PotentialSwap> {
        let instance = self.instance;
        let facility_map = instance.facility_map();
        let mut may_close = vec![false; self.is_center.len()];
        for &id in candidates_out {
            if let Some(c) = facility_map.index(id) {
                may_close[c] = self.is_center[c];
            }
        }

        let mut best: Option<PotentialSwap> = None;
        for &id in candidates_in {
            let Some(fi) = facility_map.index(id) else {
                continue;
            };
            if self.is_center[fi] {
                continue;
            }
            let Some(candidate) = self.evaluate(fi, |c| may_close[c]) else {
                continue;
            };
            if best.map_or(true, |b| candidate.objective < b.objective) {
                best = Some(candidate);
            }
        }
        best
    }

    /// Opens `facility_in` and closes `facility_out` even if the objective
    /// gets worse. O(n · m)
    ///
    /// Returns `false`, leaving the solution untouched, unless `facility_in`
    /// is closed and `facility_out` is open.
    pub fn force_swap(&mut self, facility_in: VertexId, facility_out: VertexId) -> bool {
        let instance = self.instance;
        let facility_map = instance.facility_map();
        match (facility_map.index(facility_in), facility_map.index(facility_out)) {
            (Some(fi), Some(fo)) if !self.is_center[fi] && self.is_center[fo] => {
                self.commit(fi, fo);
                self.state = AfvsState::Evaluating;
                true
            }
            _ => false,
        }
    }

    /// Estimated objective of opening `fi` and closing the best center that
    /// `may_close` accepts. O(n · p)
    ///
    /// Returns `None` if no center is accepted.
    fn evaluate<F>(&mut self, fi: usize, may_close: F) -> Option<PotentialSwap>
    where
        F: Fn(usize) -> bool,
    {
        let instance = self.instance;
        let uf = instance.distances_uf();

        for &c in &self.centers {
            self.losses[c] = 0;
            self.gains[c] = 0;
        }

        let mut floor: Distance = 0;
        for user in 0..instance.n() {
            let fi_distance = uf.get(user, fi);
            let nb = AlphaNeighborhood::new(&self.allocator, user, &self.centers, uf, fi_distance);
            let (loss, gain) = if nb.is_user_attracted() {
                let gain = fi_distance.max(nb.alpha_minus_one_distance());
                floor = floor.max(gain);
                (nb.alpha_distance(), gain)
            } else {
                (
                    fi_distance.min(nb.alpha_plus_one_distance()),
                    nb.alpha_distance(),
                )
            };
            for c in nb.updating_centers() {
                self.losses[c] = self.losses[c].max(loss);
                self.gains[c] = self.gains[c].max(gain);
            }
        }

        let gains = &self.gains;
        let top = LargestTwoGains::from_gains(
            self.centers
                .iter()
                .map(|&c| GainsFacility::new(c, gains[c])),
        );

        let mut best: Option<(usize, Distance)> = None;
        for &c in &self.centers {
            if !may_close(c) {
                continue;
            }
            let estimate = floor.max(self.losses[c]).max(top.largest_excluding(c));
            if best.map_or(true, |(_, b)| estimate < b) {
                best = Some((c, estimate));
            }
        }

        let facility_map = instance.facility_map();
        best.map(|(out, objective)| PotentialSwap {
            facility_in: facility_map.id(fi),
            facility_out: facility_map.id(out),
            objective,
        })
    }

    fn apply(&mut self, swap: PotentialSwap) {
        let instance = self.instance;
        let facility_map = instance.facility_map();
        if let (Some(fi), Some(fo)) = (
            facility_map.index(swap.facility_in),
            facility_map.index(swap.facility_out),
        ) {
            self.commit(fi, fo);
        }
        debug_assert_eq!(self.solution.objective_value(), Some(swap.objective));
    }

    /// Opens index `fi`, closes index `fo` and re-derives the allocation.
    fn commit(&mut self, fi: usize, fo: usize) {
        let previous = self.solution.objective_value();
        let instance = self.instance;
        let facility_map = instance.facility_map();
        let (facility_in, facility_out) = (facility_map.id(fi), facility_map.id(fo));

        self.is_center[fi] = true;
        self.is_center[fo] = false;
        self.solution.swap(facility_in, facility_out);
        self.refresh_center_lists();
        self.reallocate();
        self.moves += 1;
        self.total_moves += 1;

        tracing::debug!(
            facility_in,
            facility_out,
            previous = ?previous,
            objective = ?self.solution.objective_value(),
            "applied swap"
        );
    }

    fn refresh_center_lists(&mut self) {
        self.centers.clear();
        self.closed.clear();
        for &f in self.instance.facility_map().indices_by_id() {
            if self.is_center[f] {
                self.centers.push(f);
            } else {
                self.closed.push(f);
            }
        }
    }

    /// Re-derives the ranks and the critical allocation. O(n · m)
    fn reallocate(&mut self) {
        let instance = self.instance;
        let uf = instance.distances_uf();
        self.allocator
            .allocate_all(0..instance.n(), |u| uf.nearest(u), &self.is_center);

        let allocator = &self.allocator;
        let centers = &self.centers;
        let user_map = uf.row_map();
        let facility_map = uf.col_map();
        self.solution
            .update_critical_allocation(user_map.indices_by_id().iter().copied(), |u| {
                let (center, distance) = allocator.alpha_distance(u, centers, uf);
                Allocation::new(user_map.id(u), facility_map.id(center), distance)
            });
        self.critical_user = self
            .solution
            .critical_allocation()
            .and_then(|a| user_map.index(a.user_id))
            .unwrap_or(0);
    }

    pub fn solution(&self) -> &AnpcpSolution {
        &self.solution
    }

    pub fn into_solution(self) -> AnpcpSolution {
        self.solution
    }

    pub fn allocator(&self) -> &Allocator {
        &self.allocator
    }

    pub fn instance(&self) -> &'a Instance {
        self.instance
    }

    pub fn state(&self) -> AfvsState {
        self.state
    }

    pub fn strategy(&self) -> ImprovementStrategy {
        self.strategy
    }

    pub fn p(&self) -> usize {
        self.p
    }

    pub fn alpha(&self) -> usize {
        self.alpha
    }

    /// Swaps applied since the last `set_solution`.
    pub fn moves(&self) -> usize {
        self.moves
    }

    /// Swaps applied over the lifetime of this search.
    pub fn total_moves(&self) -> usize {
        self.total_moves
    }
}

impl LocalSearch for AlphaFastVertexSubstitution<'_> {
    type Solution = AnpcpSolution;
    type Error = AfvsConfigError;

    fn p(&self) -> usize {
        self.p
    }

    fn set_solution(&mut self, solution: AnpcpSolution) -> Result<(), AfvsConfigError> {
        AlphaFastVertexSubstitution::set_solution(self, solution)
    }

    fn try_improve(&mut self) -> bool {
        AlphaFastVertexSubstitution::try_improve(self)
    }

    fn solution(&self) -> &AnpcpSolution {
        &self.solution
    }

    fn moves(&self) -> usize {
        self.moves
    }
}

impl PathRelinking for AlphaFastVertexSubstitution<'_> {
    fn relinking_swap(
        &mut self,
        candidates_in: &BTreeSet<VertexId>,
        candidates_out: &BTreeSet<VertexId>,
    ) -> Option<PotentialSwap> {
        AlphaFastVertexSubstitution::relinking_swap(self, candidates_in, candidates_out)
    }

    fn apply_swap(&mut self, swap: PotentialSwap) -> bool {
        self.force_swap(swap.facility_in, swap.facility_out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::local_search::{AlphaOutOfRangeError, FacilityCountError};
    use crate::models::{alpha_objective, UnknownFacilityError, Vertex};
    use proptest::prelude::*;

    fn line(len: usize) -> Instance {
        let vertices = (0..len)
            .map(|i| Vertex::new(i, i as f64 * 10.0, 0.0))
            .collect();
        Instance::same_set(vertices).expect("valid")
    }

    fn centers_of(afvs: &AlphaFastVertexSubstitution<'_>) -> Vec<VertexId> {
        afvs.solution().centers().iter().copied().collect()
    }

    fn brute_best(instance: &Instance, centers: &[VertexId], fi: VertexId, alpha: usize) -> Distance {
        centers
            .iter()
            .map(|&out| {
                let mut next: Vec<VertexId> = centers.iter().copied().filter(|&c| c != out).collect();
                next.push(fi);
                alpha_objective(instance, &next, alpha)
                    .expect("feasible")
                    .distance
            })
            .min()
            .expect("non-empty")
    }

    #[test]
    fn test_config_errors() {
        let instance = line(5);
        let start = || AnpcpSolution::with_centers(&instance, [0, 1, 2]).expect("known ids");

        let err = AlphaFastVertexSubstitution::new(&instance, 3, 3, start()).unwrap_err();
        assert_eq!(
            err,
            AfvsConfigError::AlphaOutOfRange(AlphaOutOfRangeError::new(3, 3))
        );

        let err = AlphaFastVertexSubstitution::new(&instance, 6, 2, start()).unwrap_err();
        assert_eq!(err, AfvsConfigError::FacilityCount(FacilityCountError::new(6, 5)));

        let err = AlphaFastVertexSubstitution::new(&instance, 2, 1, start()).unwrap_err();
        assert_eq!(err, AfvsConfigError::SolutionSize(SolutionSizeError::new(2, 3)));
    }

    #[test]
    fn test_unknown_center_rejected() {
        let instance = line(5);
        let other = line(9);
        let start = AnpcpSolution::with_centers(&other, [0, 1, 8]).expect("known ids");
        let err = AlphaFastVertexSubstitution::new(&instance, 3, 1, start).unwrap_err();
        assert_eq!(err, AfvsConfigError::UnknownFacility(UnknownFacilityError::new(8)));
    }

    #[test]
    fn test_initial_critical_allocation() {
        let instance = line(6);
        let start = AnpcpSolution::with_centers(&instance, [0, 1, 2]).expect("known ids");
        let afvs = AlphaFastVertexSubstitution::new(&instance, 3, 2, start).expect("valid");
        assert_eq!(
            afvs.solution().critical_allocation(),
            Some(Allocation::new(5, 1, 40))
        );
        assert_eq!(afvs.state(), AfvsState::Evaluating);
    }

    #[test]
    fn test_line_improves_to_optimum() {
        let instance = line(6);
        let start = AnpcpSolution::with_centers(&instance, [0, 1, 2]).expect("known ids");
        let mut afvs = AlphaFastVertexSubstitution::new(&instance, 3, 2, start).expect("valid");

        assert!(afvs.try_improve());
        assert_eq!(centers_of(&afvs), vec![1, 2, 3]);
        assert_eq!(
            afvs.solution().critical_allocation(),
            Some(Allocation::new(5, 2, 30))
        );
        assert_eq!(afvs.moves(), 1);
        assert_eq!(afvs.state(), AfvsState::LocalOptimum);

        assert!(!afvs.try_improve());
        assert_eq!(centers_of(&afvs), vec![1, 2, 3]);
        assert_eq!(afvs.moves(), 1);
    }

    #[test]
    fn test_first_improvement_takes_lowest_candidate() {
        let instance = line(6);
        let start = AnpcpSolution::with_centers(&instance, [0, 1, 2]).expect("known ids");
        let mut afvs = AlphaFastVertexSubstitution::new(&instance, 3, 2, start)
            .expect("valid")
            .with_strategy(ImprovementStrategy::First);
        assert!(afvs.step());
        assert_eq!(centers_of(&afvs), vec![1, 2, 3]);
        assert!(!afvs.step());
    }

    #[test]
    fn test_potential_swap() {
        let instance = line(6);
        let start = AnpcpSolution::with_centers(&instance, [0, 1, 2]).expect("known ids");
        let mut afvs = AlphaFastVertexSubstitution::new(&instance, 3, 2, start).expect("valid");

        assert_eq!(afvs.potential_swap(1), None);
        assert_eq!(afvs.potential_swap(42), None);
        assert_eq!(
            afvs.potential_swap(3),
            Some(PotentialSwap {
                facility_in: 3,
                facility_out: 0,
                objective: 30,
            })
        );
        // evaluating leaves the solution untouched
        assert_eq!(centers_of(&afvs), vec![0, 1, 2]);
    }

    #[test]
    fn test_set_solution_resets_moves() {
        let instance = line(6);
        let start = AnpcpSolution::with_centers(&instance, [0, 1, 2]).expect("known ids");
        let mut afvs = AlphaFastVertexSubstitution::new(&instance, 3, 2, start.clone()).expect("valid");
        afvs.try_improve();
        afvs.set_solution(start).expect("valid");
        assert_eq!(afvs.moves(), 0);
        assert_eq!(afvs.total_moves(), 1);
        assert_eq!(afvs.solution().objective_value(), Some(40));

        let err = afvs
            .set_solution(AnpcpSolution::with_centers(&instance, [0]).expect("known ids"))
            .unwrap_err();
        assert_eq!(err, AfvsConfigError::SolutionSize(SolutionSizeError::new(3, 1)));
    }

    #[test]
    fn test_two_sets_alpha_one() {
        // users on both ends, facilities spread between them
        let users = vec![Vertex::new(0, 0.0, 0.0), Vertex::new(1, 100.0, 0.0)];
        let facilities: Vec<Vertex> = (0..5)
            .map(|i| Vertex::new(i, i as f64 * 25.0, 0.0))
            .collect();
        let instance = Instance::two_sets(users, facilities).expect("valid");
        let start = AnpcpSolution::with_centers(&instance, [1, 2]).expect("known ids");
        let mut afvs = AlphaFastVertexSubstitution::new(&instance, 2, 1, start).expect("valid");
        assert_eq!(afvs.solution().objective_value(), Some(50));
        assert!(afvs.try_improve());
        // reaching {0, 4} would take two swaps
        assert_eq!(centers_of(&afvs), vec![1, 3]);
        assert_eq!(afvs.solution().objective_value(), Some(25));
        assert_eq!(afvs.moves(), 1);
    }

    fn scenario() -> impl Strategy<Value = (Vec<(i32, i32)>, Vec<(i32, i32)>, usize, usize, Vec<usize>)> {
        (
            prop::collection::vec((-60i32..60, -60i32..60), 4..9),
            prop::collection::vec((-60i32..60, -60i32..60), 1..8),
        )
            .prop_flat_map(|(facilities, users)| {
                let m = facilities.len();
                (Just(facilities), Just(users), 2..=m.min(5))
            })
            .prop_flat_map(|(facilities, users, p)| {
                let m = facilities.len();
                (
                    Just(facilities),
                    Just(users),
                    Just(p),
                    1..p,
                    prop::sample::subsequence((0..m).collect::<Vec<_>>(), p),
                )
            })
    }

    fn to_vertices(coords: &[(i32, i32)]) -> Vec<Vertex> {
        coords
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| Vertex::new(i, x as f64, y as f64))
            .collect()
    }

    #[test]
    fn test_relinking_swap_respects_candidates() {
        let instance = line(6);
        let start = AnpcpSolution::with_centers(&instance, [0, 1, 2]).expect("known ids");
        let mut afvs = AlphaFastVertexSubstitution::new(&instance, 3, 2, start).expect("valid");

        let only_in: BTreeSet<VertexId> = [3, 4].into_iter().collect();
        let only_out: BTreeSet<VertexId> = [2].into_iter().collect();
        let swap = afvs
            .relinking_swap(&only_in, &only_out)
            .expect("candidates available");
        assert_eq!(swap.facility_out, 2);
        assert!(only_in.contains(&swap.facility_in));
        let expected = [3, 4]
            .iter()
            .map(|&fi| {
                alpha_objective(&instance, &[0, 1, fi], 2)
                    .expect("feasible")
                    .distance
            })
            .min();
        assert_eq!(Some(swap.objective), expected);

        // open IDs as facility-in and closed IDs as facility-out are ignored
        let open_in: BTreeSet<VertexId> = [0].into_iter().collect();
        assert_eq!(afvs.relinking_swap(&open_in, &only_out), None);
        let closed_out: BTreeSet<VertexId> = [5].into_iter().collect();
        assert_eq!(afvs.relinking_swap(&only_in, &closed_out), None);
    }

    #[test]
    fn test_force_swap_accepts_worse_objective() {
        let instance = line(6);
        let start = AnpcpSolution::with_centers(&instance, [1, 2, 3]).expect("known ids");
        let mut afvs = AlphaFastVertexSubstitution::new(&instance, 3, 2, start).expect("valid");
        assert!(!afvs.try_improve());
        let optimum = afvs.solution().objective_value();

        assert!(afvs.force_swap(0, 2));
        assert_eq!(centers_of(&afvs), vec![0, 1, 3]);
        let expected = alpha_objective(&instance, &[0, 1, 3], 2).expect("feasible");
        assert_eq!(afvs.solution().objective_value(), Some(expected.distance));
        assert!(afvs.solution().objective_value() >= optimum);
        assert_eq!(afvs.moves(), 1);
        assert_eq!(afvs.state(), AfvsState::Evaluating);

        assert!(!afvs.force_swap(0, 3));
        assert!(!afvs.force_swap(4, 2));
        assert!(!afvs.force_swap(9, 1));
        assert_eq!(centers_of(&afvs), vec![0, 1, 3]);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_estimates_match_brute_force((facilities, users, p, alpha, start) in scenario()) {
            let instance = Instance::two_sets(to_vertices(&users), to_vertices(&facilities)).unwrap();
            let solution = AnpcpSolution::with_centers(&instance, start.iter().copied()).unwrap();
            let mut afvs = AlphaFastVertexSubstitution::new(&instance, p, alpha, solution).unwrap();

            let expected = alpha_objective(&instance, &start, alpha).unwrap();
            prop_assert_eq!(afvs.solution().objective_value(), Some(expected.distance));

            let closed: Vec<VertexId> = afvs.solution().closed_facilities().iter().copied().collect();
            for fi in closed {
                let swap = afvs.potential_swap(fi).unwrap();
                prop_assert_eq!(swap.objective, brute_best(&instance, &start, fi, alpha));
            }
        }

        #[test]
        fn prop_reaches_local_optimum((facilities, users, p, alpha, start) in scenario()) {
            let instance = Instance::two_sets(to_vertices(&users), to_vertices(&facilities)).unwrap();
            let solution = AnpcpSolution::with_centers(&instance, start.iter().copied()).unwrap();
            let mut afvs = AlphaFastVertexSubstitution::new(&instance, p, alpha, solution).unwrap();

            let mut previous = afvs.solution().objective_value().unwrap();
            while afvs.step() {
                let current = afvs.solution().objective_value().unwrap();
                prop_assert!(current < previous);
                previous = current;
            }
            prop_assert_eq!(afvs.state(), AfvsState::LocalOptimum);

            let centers = centers_of(&afvs);
            prop_assert_eq!(centers.len(), p);
            let expected = alpha_objective(&instance, &centers, alpha).unwrap();
            prop_assert_eq!(previous, expected.distance);

            for &fi in afvs.solution().closed_facilities() {
                prop_assert!(brute_best(&instance, &centers, fi, alpha) >= previous);
            }
            prop_assert!(!afvs.try_improve());
            prop_assert_eq!(centers_of(&afvs), centers);
        }
    }
}
