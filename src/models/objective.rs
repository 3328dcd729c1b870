//! Direct evaluation of the alpha-neighbor p-center objective.
//!
//! For every user the open centers are sorted by `(distance, center ID)` and
//! the alpha-th one is taken; the objective is the largest such distance.
//! This is the reference the incremental local search is checked against.
//!
//! # Complexity
//!
//! O(n · p log p)

use super::{Allocation, Instance, VertexId};

/// Computes the critical allocation of `centers` for the given `alpha`.
///
/// Users are scanned in ascending ID order and ties keep the first user.
/// Returns `None` if `alpha` is zero, exceeds the number of centers, or a
/// center is not a facility of the instance.
///
/// # Examples
///
/// ```
/// use u_anpcp::models::{alpha_objective, Instance, Vertex};
///
/// let vertices: Vec<Vertex> = (0..4).map(|i| Vertex::new(i, i as f64 * 10.0, 0.0)).collect();
/// let instance = Instance::same_set(vertices).unwrap();
/// let critical = alpha_objective(&instance, &[0, 3], 2).unwrap();
/// assert_eq!(critical.distance, 30);
/// ```
pub fn alpha_objective(
    instance: &Instance,
    centers: &[VertexId],
    alpha: usize,
) -> Option<Allocation> {
    if alpha == 0 || alpha > centers.len() {
        return None;
    }

    let uf = instance.distances_uf();
    let columns: Vec<(VertexId, usize)> = centers
        .iter()
        .map(|&id| uf.col_map().index(id).map(|j| (id, j)))
        .collect::<Option<_>>()?;

    let user_map = uf.row_map();
    let mut critical: Option<Allocation> = None;
    let mut row: Vec<(u64, VertexId)> = Vec::with_capacity(columns.len());

    for &i in user_map.indices_by_id() {
        row.clear();
        row.extend(columns.iter().map(|&(id, j)| (uf.get(i, j), id)));
        row.sort_unstable();
        let (distance, center_id) = row[alpha - 1];
        if critical.map_or(true, |c| distance > c.distance) {
            critical = Some(Allocation::new(user_map.id(i), center_id, distance));
        }
    }
    critical
}
