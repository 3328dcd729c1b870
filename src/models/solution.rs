//! Solution types for the ANPCP and its p-dispersion seeding sub-problem.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::distance::{Distance, DistanceMatrix};

use super::err::UnknownFacilityError;
use super::{Allocation, CriticalPair, Instance, VertexId};

/// Partition of all facility IDs into open centers and closed facilities.
///
/// Invariant: the two sets are disjoint and their union is the facility set
/// the partition was created with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacilityPartition {
    centers: BTreeSet<VertexId>,
    closed: BTreeSet<VertexId>,
}

impl FacilityPartition {
    /// Creates a partition with every facility closed.
    pub fn all_closed(facilities: BTreeSet<VertexId>) -> Self {
        Self {
            centers: BTreeSet::new(),
            closed: facilities,
        }
    }

    /// Creates a partition from explicit sets.
    ///
    /// Returns `None` if the sets overlap.
    pub fn from_sets(centers: BTreeSet<VertexId>, closed: BTreeSet<VertexId>) -> Option<Self> {
        if !centers.is_disjoint(&closed) {
            return None;
        }
        Some(Self { centers, closed })
    }

    /// Opens a closed facility. Returns `false` if it was not closed.
    pub fn insert(&mut self, facility_id: VertexId) -> bool {
        if !self.closed.remove(&facility_id) {
            return false;
        }
        self.centers.insert(facility_id);
        true
    }

    /// Closes an open center. Returns `false` if it was not open.
    pub fn remove(&mut self, facility_id: VertexId) -> bool {
        if !self.centers.remove(&facility_id) {
            return false;
        }
        self.closed.insert(facility_id);
        true
    }

    /// Opens `facility_in` and closes `facility_out`.
    ///
    /// Leaves the partition untouched and returns `false` unless `facility_in`
    /// is closed and `facility_out` is open.
    pub fn swap(&mut self, facility_in: VertexId, facility_out: VertexId) -> bool {
        if !self.closed.contains(&facility_in) || !self.centers.contains(&facility_out) {
            return false;
        }
        self.insert(facility_in);
        self.remove(facility_out);
        true
    }

    /// Open centers, ascending by ID.
    pub fn centers(&self) -> &BTreeSet<VertexId> {
        &self.centers
    }

    /// Closed facilities, ascending by ID.
    pub fn closed(&self) -> &BTreeSet<VertexId> {
        &self.closed
    }
}

/// Capabilities shared by every solution variant.
///
/// Mutations invalidate the critical record; it must be recomputed by the
/// owning heuristic before the objective value is trusted again.
pub trait FacilitySolution {
    /// Record whose distance is the objective value.
    type Critical: Copy;

    /// The underlying open/closed partition.
    fn partition(&self) -> &FacilityPartition;

    /// Mutable access to the partition. Callers are responsible for the
    /// critical record.
    fn partition_mut(&mut self) -> &mut FacilityPartition;

    /// The critical record, if computed.
    fn critical(&self) -> Option<Self::Critical>;

    /// Forgets the critical record.
    fn clear_critical(&mut self);

    /// Objective value, if computed.
    fn objective_value(&self) -> Option<Distance>;

    /// Open centers, ascending by ID.
    fn centers(&self) -> &BTreeSet<VertexId> {
        self.partition().centers()
    }

    /// Closed facilities, ascending by ID.
    fn closed_facilities(&self) -> &BTreeSet<VertexId> {
        self.partition().closed()
    }

    /// Number of open centers.
    fn size(&self) -> usize {
        self.partition().centers().len()
    }

    /// Opens a facility.
    fn insert(&mut self, facility_id: VertexId) -> bool {
        let changed = self.partition_mut().insert(facility_id);
        if changed {
            self.clear_critical();
        }
        changed
    }

    /// Closes a center.
    fn remove(&mut self, facility_id: VertexId) -> bool {
        let changed = self.partition_mut().remove(facility_id);
        if changed {
            self.clear_critical();
        }
        changed
    }

    /// Replaces `facility_out` with `facility_in`.
    fn swap(&mut self, facility_in: VertexId, facility_out: VertexId) -> bool {
        let changed = self.partition_mut().swap(facility_in, facility_out);
        if changed {
            self.clear_critical();
        }
        changed
    }
}

fn open_facilities<I>(
    instance: &Instance,
    centers: I,
) -> Result<FacilityPartition, UnknownFacilityError>
where
    I: IntoIterator<Item = VertexId>,
{
    let mut partition = FacilityPartition::all_closed(instance.facility_ids().clone());
    for id in centers {
        if !instance.facility_ids().contains(&id) {
            return Err(UnknownFacilityError::new(id));
        }
        partition.insert(id);
    }
    Ok(partition)
}

/// A solution of the alpha-neighbor p-center problem.
///
/// The objective is the largest distance between a user and its alpha-th
/// nearest open center; the allocation realizing it is the critical
/// allocation.
///
/// # Examples
///
/// ```
/// use u_anpcp::models::{AnpcpSolution, FacilitySolution, Instance, Vertex};
///
/// let vertices = vec![Vertex::new(0, 0.0, 0.0), Vertex::new(1, 1.0, 0.0)];
/// let instance = Instance::same_set(vertices).unwrap();
/// let mut sol = AnpcpSolution::from_instance(&instance);
/// assert_eq!(sol.size(), 0);
/// assert!(sol.insert(1));
/// assert_eq!(sol.centers().len(), 1);
/// assert_eq!(sol.objective_value(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnpcpSolution {
    partition: FacilityPartition,
    critical_allocation: Option<Allocation>,
}

impl AnpcpSolution {
    /// Creates an empty solution with every facility of `instance` closed.
    pub fn from_instance(instance: &Instance) -> Self {
        Self::from_partition(FacilityPartition::all_closed(instance.facility_ids().clone()))
    }

    /// Creates a solution with exactly the given centers open.
    pub fn with_centers<I>(instance: &Instance, centers: I) -> Result<Self, UnknownFacilityError>
    where
        I: IntoIterator<Item = VertexId>,
    {
        Ok(Self::from_partition(open_facilities(instance, centers)?))
    }

    /// Wraps an existing partition without a critical allocation.
    pub fn from_partition(partition: FacilityPartition) -> Self {
        Self {
            partition,
            critical_allocation: None,
        }
    }

    /// The critical allocation, if computed.
    pub fn critical_allocation(&self) -> Option<Allocation> {
        self.critical_allocation
    }

    /// Recomputes the critical allocation from each user's alpha-th nearest
    /// center. Ties keep the first user yielded.
    ///
    /// `users` may yield IDs or matrix indices; `alpha_nearest` maps each to
    /// its allocation. O(n) calls to `alpha_nearest`.
    pub fn update_critical_allocation<I, F>(&mut self, users: I, mut alpha_nearest: F)
    where
        I: IntoIterator,
        F: FnMut(I::Item) -> Allocation,
    {
        let mut critical: Option<Allocation> = None;
        for user_id in users {
            let allocation = alpha_nearest(user_id);
            if critical.map_or(true, |c| allocation.distance > c.distance) {
                critical = Some(allocation);
            }
        }
        self.critical_allocation = critical;
    }
}

impl FacilitySolution for AnpcpSolution {
    type Critical = Allocation;

    fn partition(&self) -> &FacilityPartition {
        &self.partition
    }

    fn partition_mut(&mut self) -> &mut FacilityPartition {
        &mut self.partition
    }

    fn critical(&self) -> Option<Allocation> {
        self.critical_allocation
    }

    fn clear_critical(&mut self) {
        self.critical_allocation = None;
    }

    fn objective_value(&self) -> Option<Distance> {
        self.critical_allocation.map(|a| a.distance)
    }
}

impl From<PdpSolution> for AnpcpSolution {
    fn from(solution: PdpSolution) -> Self {
        Self::from_partition(solution.partition)
    }
}

/// A solution of the p-dispersion problem, used to seed the ANPCP search.
///
/// The objective is the smallest pairwise distance among open centers; the
/// pair realizing it is the critical pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PdpSolution {
    partition: FacilityPartition,
    critical_pair: Option<CriticalPair>,
}

impl PdpSolution {
    /// Creates an empty solution with every facility of `instance` closed.
    pub fn from_instance(instance: &Instance) -> Self {
        Self::from_partition(FacilityPartition::all_closed(instance.facility_ids().clone()))
    }

    /// Creates a solution with exactly the given centers open.
    pub fn with_centers<I>(instance: &Instance, centers: I) -> Result<Self, UnknownFacilityError>
    where
        I: IntoIterator<Item = VertexId>,
    {
        Ok(Self::from_partition(open_facilities(instance, centers)?))
    }

    /// Wraps an existing partition without a critical pair.
    pub fn from_partition(partition: FacilityPartition) -> Self {
        Self {
            partition,
            critical_pair: None,
        }
    }

    /// The critical pair, if computed.
    pub fn critical_pair(&self) -> Option<CriticalPair> {
        self.critical_pair
    }

    /// Finds the minimum distance among all pairs of centers.
    ///
    /// Pairs are scanned in ascending ID order and ties keep the first pair.
    /// Returns `None` (and clears the pair) with fewer than two centers.
    ///
    /// O(p²)
    pub fn update_objective_value(&mut self, distances_ff: &DistanceMatrix) -> Option<Distance> {
        let map = distances_ff.row_map();
        let centers: Vec<(VertexId, usize)> = self
            .partition
            .centers()
            .iter()
            .filter_map(|&id| map.index(id).map(|index| (id, index)))
            .collect();

        let mut critical: Option<CriticalPair> = None;
        for (a, &(id_a, index_a)) in centers.iter().enumerate() {
            for &(id_b, index_b) in &centers[a + 1..] {
                let distance = distances_ff.get(index_a, index_b);
                if critical.map_or(true, |c| distance < c.distance) {
                    critical = Some(CriticalPair::new(id_a, id_b, distance));
                }
            }
        }

        self.critical_pair = critical;
        critical.map(|c| c.distance)
    }

    pub(crate) fn set_critical_pair(&mut self, pair: Option<CriticalPair>) {
        self.critical_pair = pair;
    }
}

impl FacilitySolution for PdpSolution {
    type Critical = CriticalPair;

    fn partition(&self) -> &FacilityPartition {
        &self.partition
    }

    fn partition_mut(&mut self) -> &mut FacilityPartition {
        &mut self.partition
    }

    fn critical(&self) -> Option<CriticalPair> {
        self.critical_pair
    }

    fn clear_critical(&mut self) {
        self.critical_pair = None;
    }

    fn objective_value(&self) -> Option<Distance> {
        self.critical_pair.map(|c| c.distance)
    }
}
