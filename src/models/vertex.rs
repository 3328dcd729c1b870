//! Vertex type.

use serde::{Deserialize, Serialize};

/// Stable identifier of a user or facility.
///
/// IDs never change while a solution is mutated; matrix indices are derived
/// from them through an [`IdIndexMap`](crate::distance::IdIndexMap).
pub type VertexId = usize;

/// A point on the plane acting as a user, a facility, or both.
///
/// # Examples
///
/// ```
/// use u_anpcp::models::Vertex;
///
/// let origin = Vertex::new(0, 0.0, 0.0);
/// let v = Vertex::new(1, 3.0, 4.0);
/// assert_eq!(v.id(), 1);
/// assert!((origin.distance_to(&v) - 5.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    id: VertexId,
    x: f64,
    y: f64,
}

impl Vertex {
    /// Creates a new vertex.
    pub fn new(id: VertexId, x: f64, y: f64) -> Self {
        Self { id, x, y }
    }

    /// Stable vertex ID.
    pub fn id(&self) -> VertexId {
        self.id
    }

    /// X-coordinate.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Y-coordinate.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Euclidean distance to another vertex.
    pub fn distance_to(&self, other: &Vertex) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_new() {
        let v = Vertex::new(7, 10.0, 20.0);
        assert_eq!(v.id(), 7);
        assert_eq!(v.x(), 10.0);
        assert_eq!(v.y(), 20.0);
    }

    #[test]
    fn test_vertex_distance() {
        let a = Vertex::new(0, 0.0, 0.0);
        assert!((a.distance_to(&Vertex::new(1, 3.0, 4.0)) - 5.0).abs() < 1e-10);
        assert!((a.distance_to(&Vertex::new(2, 5.0, 12.0)) - 13.0).abs() < 1e-10);
        assert!((a.distance_to(&Vertex::new(3, 65.0, 72.0)) - 97.0).abs() < 1e-10);
    }

    #[test]
    fn test_vertex_distance_symmetric() {
        let a = Vertex::new(0, 1.0, 2.0);
        let b = Vertex::new(1, 4.0, 6.0);
        assert!((a.distance_to(&b) - b.distance_to(&a)).abs() < 1e-10);
    }
}
