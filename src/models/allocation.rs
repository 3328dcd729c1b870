//! Allocation and critical pair records.

use serde::{Deserialize, Serialize};

use crate::distance::Distance;

use super::VertexId;

/// A user allocated to one of its open centers.
///
/// The critical allocation of an ANPCP solution is the allocation whose
/// distance equals the objective value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Allocation {
    /// User being served.
    pub user_id: VertexId,
    /// Center serving the user.
    pub center_id: VertexId,
    /// Distance between them.
    pub distance: Distance,
}

impl Allocation {
    /// Creates a new allocation.
    pub fn new(user_id: VertexId, center_id: VertexId, distance: Distance) -> Self {
        Self {
            user_id,
            center_id,
            distance,
        }
    }
}

/// The two open centers realizing the p-dispersion objective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CriticalPair {
    /// Center with the lower ID.
    pub first: VertexId,
    /// Center with the higher ID.
    pub second: VertexId,
    /// Distance between them.
    pub distance: Distance,
}

impl CriticalPair {
    /// Creates a pair, ordering the centers by ID.
    pub fn new(a: VertexId, b: VertexId, distance: Distance) -> Self {
        Self {
            first: a.min(b),
            second: a.max(b),
            distance,
        }
    }

    /// The pair as `(first, second)`.
    pub fn centers(&self) -> (VertexId, VertexId) {
        (self.first, self.second)
    }
}
