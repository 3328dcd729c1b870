//! Problem instance: users, candidate facilities and their distances.

use std::collections::BTreeSet;

use crate::distance::{Distance, DistanceMatrix, IdIndexMap};

use super::err::{EmptyVertexSetError, InstanceError, VertexRole};
use super::{Vertex, VertexId};

/// Whether users and facilities share one vertex set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstanceKind {
    /// Every vertex is both a user and a candidate facility.
    SameSet,
    /// Users and facilities are disjoint sets.
    TwoSets,
}

/// An immutable ANPCP instance.
///
/// Holds the users (`n = |U|`), the candidate facilities (`m = |F|`), the
/// user-facility distance matrix and the facility-facility distance matrix.
/// Both sets are non-empty and IDs are unique within each set.
///
/// # Examples
///
/// ```
/// use u_anpcp::models::{Instance, InstanceKind, Vertex};
///
/// let vertices = vec![
///     Vertex::new(0, 0.0, 0.0),
///     Vertex::new(1, 3.0, 4.0),
///     Vertex::new(2, 6.0, 8.0),
/// ];
/// let instance = Instance::same_set(vertices).unwrap();
/// assert_eq!(instance.kind(), InstanceKind::SameSet);
/// assert_eq!(instance.n(), 3);
/// assert_eq!(instance.m(), 3);
/// assert_eq!(instance.distances_ff().get(0, 2), 10);
/// ```
#[derive(Debug, Clone)]
pub struct Instance {
    name: String,
    kind: InstanceKind,
    users: Vec<Vertex>,
    facilities: Vec<Vertex>,
    distances_uf: DistanceMatrix,
    distances_ff: DistanceMatrix,
    user_ids: BTreeSet<VertexId>,
    facility_ids: BTreeSet<VertexId>,
}

impl Instance {
    /// Creates an instance where every vertex is both a user and a facility.
    pub fn same_set(vertices: Vec<Vertex>) -> Result<Self, InstanceError> {
        let (user_map, facility_map) = Self::validate(&vertices, &vertices)?;
        let distances_ff =
            DistanceMatrix::euclidean(&vertices, facility_map.clone(), &vertices, facility_map.clone());
        let distances_uf = DistanceMatrix::euclidean(&vertices, user_map, &vertices, facility_map);
        Ok(Self::assemble(
            InstanceKind::SameSet,
            vertices.clone(),
            vertices,
            distances_uf,
            distances_ff,
        ))
    }

    /// Creates an instance with separate user and facility sets.
    pub fn two_sets(users: Vec<Vertex>, facilities: Vec<Vertex>) -> Result<Self, InstanceError> {
        let (user_map, facility_map) = Self::validate(&users, &facilities)?;
        let distances_ff = DistanceMatrix::euclidean(
            &facilities,
            facility_map.clone(),
            &facilities,
            facility_map.clone(),
        );
        let distances_uf = DistanceMatrix::euclidean(&users, user_map, &facilities, facility_map);
        Ok(Self::assemble(
            InstanceKind::TwoSets,
            users,
            facilities,
            distances_uf,
            distances_ff,
        ))
    }

    /// Creates an instance from explicit row-major distance tables.
    ///
    /// `uf` is `n × m` (users by facilities) and `ff` is `m × m`. Vertex
    /// coordinates are kept for reference only. The instance is same-set when
    /// `users == facilities`.
    pub fn from_distances(
        users: Vec<Vertex>,
        facilities: Vec<Vertex>,
        uf: Vec<Distance>,
        ff: Vec<Distance>,
    ) -> Result<Self, InstanceError> {
        let (user_map, facility_map) = Self::validate(&users, &facilities)?;
        let distances_ff = DistanceMatrix::from_data(facility_map.clone(), facility_map.clone(), ff)?;
        let distances_uf = DistanceMatrix::from_data(user_map, facility_map, uf)?;
        let kind = if users == facilities {
            InstanceKind::SameSet
        } else {
            InstanceKind::TwoSets
        };
        Ok(Self::assemble(kind, users, facilities, distances_uf, distances_ff))
    }

    /// Sets a display name for this instance.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    fn validate(
        users: &[Vertex],
        facilities: &[Vertex],
    ) -> Result<(IdIndexMap, IdIndexMap), InstanceError> {
        if facilities.is_empty() {
            return Err(EmptyVertexSetError::new(VertexRole::Facility).into());
        }
        if users.is_empty() {
            return Err(EmptyVertexSetError::new(VertexRole::User).into());
        }
        let facility_map = IdIndexMap::from_vertices(facilities, VertexRole::Facility)?;
        let user_map = IdIndexMap::from_vertices(users, VertexRole::User)?;
        Ok((user_map, facility_map))
    }

    fn assemble(
        kind: InstanceKind,
        users: Vec<Vertex>,
        facilities: Vec<Vertex>,
        distances_uf: DistanceMatrix,
        distances_ff: DistanceMatrix,
    ) -> Self {
        let user_ids = users.iter().map(Vertex::id).collect();
        let facility_ids = facilities.iter().map(Vertex::id).collect();
        Self {
            name: String::new(),
            kind,
            users,
            facilities,
            distances_uf,
            distances_ff,
            user_ids,
            facility_ids,
        }
    }

    /// Display name (empty unless set).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Same-set or two-set variant.
    pub fn kind(&self) -> InstanceKind {
        self.kind
    }

    /// Users in index order.
    pub fn users(&self) -> &[Vertex] {
        &self.users
    }

    /// Facilities in index order.
    pub fn facilities(&self) -> &[Vertex] {
        &self.facilities
    }

    /// Number of users, `n = |U|`.
    pub fn n(&self) -> usize {
        self.users.len()
    }

    /// Number of facilities, `m = |F|`.
    pub fn m(&self) -> usize {
        self.facilities.len()
    }

    /// User-facility distances (`n × m`).
    pub fn distances_uf(&self) -> &DistanceMatrix {
        &self.distances_uf
    }

    /// Facility-facility distances (`m × m`).
    pub fn distances_ff(&self) -> &DistanceMatrix {
        &self.distances_ff
    }

    /// Set of user IDs.
    pub fn user_ids(&self) -> &BTreeSet<VertexId> {
        &self.user_ids
    }

    /// Set of facility IDs.
    pub fn facility_ids(&self) -> &BTreeSet<VertexId> {
        &self.facility_ids
    }

    /// ID/index map of the users.
    pub fn user_map(&self) -> &IdIndexMap {
        self.distances_uf.row_map()
    }

    /// ID/index map of the facilities.
    pub fn facility_map(&self) -> &IdIndexMap {
        self.distances_ff.row_map()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DuplicateIdError;

    fn grid_vertices(side: usize) -> Vec<Vertex> {
        (0..side * side)
            .map(|i| Vertex::new(i, (i % side) as f64 * 10.0, (i / side) as f64 * 10.0))
            .collect()
    }

    #[test]
    fn test_same_set() {
        let instance = Instance::same_set(grid_vertices(3)).expect("valid");
        assert_eq!(instance.kind(), InstanceKind::SameSet);
        assert_eq!(instance.n(), 9);
        assert_eq!(instance.m(), 9);
        assert_eq!(instance.users(), instance.facilities());
        assert_eq!(instance.distances_uf().get(0, 8), 28);
        assert_eq!(instance.distances_ff().get(0, 8), 28);
        assert!(instance.distances_ff().is_symmetric());
    }

    #[test]
    fn test_two_sets() {
        let users = vec![Vertex::new(0, 0.0, 0.0), Vertex::new(1, 0.0, 1.0)];
        let facilities = vec![
            Vertex::new(0, 3.0, 4.0),
            Vertex::new(1, 5.0, 12.0),
            Vertex::new(2, 65.0, 72.0),
        ];
        let instance = Instance::two_sets(users, facilities)
            .expect("valid")
            .with_name("tiny");
        assert_eq!(instance.name(), "tiny");
        assert_eq!(instance.kind(), InstanceKind::TwoSets);
        assert_eq!(instance.n(), 2);
        assert_eq!(instance.m(), 3);
        assert_eq!(instance.distances_uf().rows(), 2);
        assert_eq!(instance.distances_uf().cols(), 3);
        assert_eq!(instance.distances_uf().get(0, 2), 97);
        assert_eq!(instance.distances_ff().rows(), 3);
        assert_eq!(instance.facility_ids().len(), 3);
        assert_eq!(instance.user_ids().len(), 2);
    }

    #[test]
    fn test_single_user_single_facility() {
        let instance = Instance::two_sets(
            vec![Vertex::new(0, 0.0, 0.0)],
            vec![Vertex::new(0, 1.0, 1.0)],
        )
        .expect("valid");
        assert_eq!(instance.n(), 1);
        assert_eq!(instance.m(), 1);
    }

    #[test]
    fn test_empty_sets_rejected() {
        let err = Instance::two_sets(vec![Vertex::new(0, 0.0, 0.0)], vec![]).unwrap_err();
        assert_eq!(
            err,
            InstanceError::EmptyVertexSet(EmptyVertexSetError::new(VertexRole::Facility))
        );
        let err = Instance::two_sets(vec![], vec![Vertex::new(0, 0.0, 0.0)]).unwrap_err();
        assert_eq!(
            err,
            InstanceError::EmptyVertexSet(EmptyVertexSetError::new(VertexRole::User))
        );
        assert!(Instance::same_set(vec![]).is_err());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let facilities = vec![Vertex::new(3, 0.0, 0.0), Vertex::new(3, 1.0, 0.0)];
        let err = Instance::two_sets(vec![Vertex::new(0, 0.0, 0.0)], facilities).unwrap_err();
        assert_eq!(
            err,
            InstanceError::DuplicateId(DuplicateIdError::new(VertexRole::Facility, 3))
        );
    }

    #[test]
    fn test_from_distances() {
        let vertices: Vec<Vertex> = (0..3).map(|i| Vertex::new(i, 0.0, 0.0)).collect();
        let table = vec![0, 4, 7, 4, 0, 2, 7, 2, 0];
        let instance =
            Instance::from_distances(vertices.clone(), vertices, table.clone(), table).expect("valid");
        assert_eq!(instance.kind(), InstanceKind::SameSet);
        assert_eq!(instance.distances_ff().get(0, 2), 7);
        assert_eq!(instance.distances_uf().nearest(0), &[0, 1, 2]);
        assert_eq!(instance.distances_uf().nearest(2), &[2, 1, 0]);
    }

    #[test]
    fn test_from_distances_wrong_size() {
        let vertices: Vec<Vertex> = (0..2).map(|i| Vertex::new(i, 0.0, 0.0)).collect();
        let err = Instance::from_distances(vertices.clone(), vertices, vec![0, 1, 1, 0], vec![0])
            .unwrap_err();
        assert!(matches!(err, InstanceError::DimensionMismatch(_)));
    }

    #[test]
    fn test_maps_follow_vertex_order() {
        let users = vec![Vertex::new(42, 0.0, 0.0)];
        let facilities = vec![Vertex::new(7, 1.0, 0.0), Vertex::new(3, 2.0, 0.0)];
        let instance = Instance::two_sets(users, facilities).expect("valid");
        assert_eq!(instance.user_map().index(42), Some(0));
        assert_eq!(instance.facility_map().index(3), Some(1));
        assert_eq!(instance.facility_map().indices_by_id(), &[1, 0]);
    }
}
