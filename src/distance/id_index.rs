//! Bidirectional mapping between stable vertex IDs and matrix indices.

use std::collections::HashMap;

use crate::models::{DuplicateIdError, Vertex, VertexId, VertexRole};

/// Maps stable vertex IDs to dense 0-based indices and back.
///
/// Indices follow the order in which vertices were supplied and never change.
/// Solutions open and close facilities by ID, while distance lookups and the
/// dense bookkeeping tables of the heuristics work on indices.
///
/// # Examples
///
/// ```
/// use u_anpcp::distance::IdIndexMap;
/// use u_anpcp::models::VertexRole;
///
/// let map = IdIndexMap::from_ids([30, 10, 20], VertexRole::Facility).unwrap();
/// assert_eq!(map.index(10), Some(1));
/// assert_eq!(map.id(2), 20);
/// assert_eq!(map.indices_by_id(), &[1, 2, 0]);
/// ```
#[derive(Debug, Clone)]
pub struct IdIndexMap {
    ids: Vec<VertexId>,
    indices: HashMap<VertexId, usize>,
    by_id: Vec<usize>,
}

impl IdIndexMap {
    /// Builds the map from IDs in index order.
    ///
    /// Returns an error on the first repeated ID.
    pub fn from_ids<I>(ids: I, role: VertexRole) -> Result<Self, DuplicateIdError>
    where
        I: IntoIterator<Item = VertexId>,
    {
        let ids: Vec<VertexId> = ids.into_iter().collect();
        let mut indices = HashMap::with_capacity(ids.len());
        for (index, &id) in ids.iter().enumerate() {
            if indices.insert(id, index).is_some() {
                return Err(DuplicateIdError::new(role, id));
            }
        }

        let mut by_id: Vec<usize> = (0..ids.len()).collect();
        by_id.sort_unstable_by_key(|&index| ids[index]);

        Ok(Self {
            ids,
            indices,
            by_id,
        })
    }

    /// Builds the map from the IDs of the given vertices.
    pub fn from_vertices(vertices: &[Vertex], role: VertexRole) -> Result<Self, DuplicateIdError> {
        Self::from_ids(vertices.iter().map(Vertex::id), role)
    }

    /// Identity map where ID `i` lives at index `i`.
    pub fn identity(len: usize) -> Self {
        Self {
            ids: (0..len).collect(),
            indices: (0..len).map(|i| (i, i)).collect(),
            by_id: (0..len).collect(),
        }
    }

    /// Matrix index of `id`, if present.
    pub fn index(&self, id: VertexId) -> Option<usize> {
        self.indices.get(&id).copied()
    }

    /// Stable ID stored at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn id(&self, index: usize) -> VertexId {
        self.ids[index]
    }

    /// Returns `true` if `id` is mapped.
    pub fn contains(&self, id: VertexId) -> bool {
        self.indices.contains_key(&id)
    }

    /// All IDs in index order.
    pub fn ids(&self) -> &[VertexId] {
        &self.ids
    }

    /// All indices, ordered by ascending ID.
    pub fn indices_by_id(&self) -> &[usize] {
        &self.by_id
    }

    /// Number of mapped vertices.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns `true` if no vertex is mapped.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_ids_roundtrip() {
        let map = IdIndexMap::from_ids([5, 3, 9], VertexRole::User).expect("unique");
        assert_eq!(map.len(), 3);
        for index in 0..map.len() {
            assert_eq!(map.index(map.id(index)), Some(index));
        }
        assert_eq!(map.index(4), None);
        assert!(map.contains(9));
        assert!(!map.contains(0));
    }

    #[test]
    fn test_duplicate_id() {
        let err = IdIndexMap::from_ids([1, 2, 1], VertexRole::Facility).unwrap_err();
        assert_eq!(err.id(), 1);
        assert_eq!(err.role(), VertexRole::Facility);
    }

    #[test]
    fn test_indices_by_id() {
        let map = IdIndexMap::from_ids([8, 2, 5, 0], VertexRole::Facility).expect("unique");
        assert_eq!(map.indices_by_id(), &[3, 1, 2, 0]);
    }

    #[test]
    fn test_identity() {
        let map = IdIndexMap::identity(4);
        assert_eq!(map.ids(), &[0, 1, 2, 3]);
        assert_eq!(map.index(2), Some(2));
        assert!(!map.is_empty());
    }

    #[test]
    fn test_from_vertices() {
        let vertices = vec![Vertex::new(4, 0.0, 0.0), Vertex::new(1, 1.0, 1.0)];
        let map = IdIndexMap::from_vertices(&vertices, VertexRole::User).expect("unique");
        assert_eq!(map.index(4), Some(0));
        assert_eq!(map.index(1), Some(1));
    }
}
