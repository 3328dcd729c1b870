//! Dense integer distance matrix.

use crate::models::{DimensionMismatchError, DuplicateIdError, Vertex, VertexId, VertexRole};

use super::IdIndexMap;

/// Integer distance between two vertices (Euclidean, truncated).
pub type Distance = u64;

/// A dense `rows × cols` distance table between two vertex sets, stored in
/// row-major order.
///
/// Besides O(1) lookup, every row keeps its columns sorted by ascending
/// distance (ties by ascending column ID). The ordering is computed once at
/// construction in O(rows · cols · log cols) and drives the allocator of the
/// local search.
///
/// # Examples
///
/// ```
/// use u_anpcp::models::Vertex;
/// use u_anpcp::distance::DistanceMatrix;
///
/// let users = vec![Vertex::new(0, 0.0, 0.0)];
/// let facilities = vec![
///     Vertex::new(0, 5.0, 12.0),
///     Vertex::new(1, 3.0, 4.0),
/// ];
/// let dm = DistanceMatrix::from_vertices(&users, &facilities).unwrap();
/// assert_eq!(dm.get(0, 0), 13);
/// assert_eq!(dm.get(0, 1), 5);
/// assert_eq!(dm.next_nearest_ids(0).collect::<Vec<_>>(), vec![1, 0]);
/// ```
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    data: Vec<Distance>,
    rows: usize,
    cols: usize,
    row_map: IdIndexMap,
    col_map: IdIndexMap,
    nearest: Vec<usize>,
    max_pair: Option<(usize, usize)>,
}

impl DistanceMatrix {
    /// Computes a truncated Euclidean matrix with `rows` as users and `cols`
    /// as facilities.
    pub fn from_vertices(rows: &[Vertex], cols: &[Vertex]) -> Result<Self, DuplicateIdError> {
        let row_map = IdIndexMap::from_vertices(rows, VertexRole::User)?;
        let col_map = IdIndexMap::from_vertices(cols, VertexRole::Facility)?;
        Ok(Self::euclidean(rows, row_map, cols, col_map))
    }

    /// Computes a truncated Euclidean matrix over already-validated ID maps.
    ///
    /// The maps must list the vertices in the same order as the slices.
    pub fn euclidean(
        rows: &[Vertex],
        row_map: IdIndexMap,
        cols: &[Vertex],
        col_map: IdIndexMap,
    ) -> Self {
        debug_assert_eq!(rows.len(), row_map.len());
        debug_assert_eq!(cols.len(), col_map.len());

        let mut data = Vec::with_capacity(rows.len() * cols.len());
        for from in rows {
            for to in cols {
                data.push(from.distance_to(to) as Distance);
            }
        }
        Self::build(data, row_map, col_map)
    }

    /// Creates a matrix from an explicit row-major table.
    ///
    /// Returns an error if the data length doesn't match `rows * cols`.
    pub fn from_data(
        row_map: IdIndexMap,
        col_map: IdIndexMap,
        data: Vec<Distance>,
    ) -> Result<Self, DimensionMismatchError> {
        let expected = row_map.len() * col_map.len();
        if data.len() != expected {
            return Err(DimensionMismatchError::new(expected, data.len()));
        }
        Ok(Self::build(data, row_map, col_map))
    }

    fn build(data: Vec<Distance>, row_map: IdIndexMap, col_map: IdIndexMap) -> Self {
        let rows = row_map.len();
        let cols = col_map.len();

        let mut max_pair = None;
        let mut current_max = 0;
        for i in 0..rows {
            for j in 0..cols {
                let d = data[i * cols + j];
                if max_pair.is_none() || d > current_max {
                    current_max = d;
                    max_pair = Some((i, j));
                }
            }
        }

        // O(rows · cols · log cols)
        let mut nearest = Vec::with_capacity(rows * cols);
        for i in 0..rows {
            let row = &data[i * cols..(i + 1) * cols];
            let mut order: Vec<usize> = (0..cols).collect();
            order.sort_by_key(|&j| (row[j], col_map.id(j)));
            nearest.extend(order);
        }

        Self {
            data,
            rows,
            cols,
            row_map,
            col_map,
            nearest,
            max_pair,
        }
    }

    /// Returns the distance between row index `from` and column index `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[inline]
    pub fn get(&self, from: usize, to: usize) -> Distance {
        self.data[from * self.cols + to]
    }

    /// Returns the distance between two vertices given by ID.
    pub fn by_id(&self, from: VertexId, to: VertexId) -> Option<Distance> {
        let i = self.row_map.index(from)?;
        let j = self.col_map.index(to)?;
        Some(self.get(i, j))
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// ID map of the row vertices.
    pub fn row_map(&self) -> &IdIndexMap {
        &self.row_map
    }

    /// ID map of the column vertices.
    pub fn col_map(&self) -> &IdIndexMap {
        &self.col_map
    }

    /// Index pair realizing the largest distance, first in row-major order.
    pub fn max_pair(&self) -> Option<(usize, usize)> {
        self.max_pair
    }

    /// Largest distance in the matrix, or 0 when empty.
    pub fn max_distance(&self) -> Distance {
        self.max_pair.map_or(0, |(i, j)| self.get(i, j))
    }

    /// Column indices of row `from`, nearest first.
    #[inline]
    pub fn nearest(&self, from: usize) -> &[usize] {
        &self.nearest[from * self.cols..(from + 1) * self.cols]
    }

    /// Column IDs of row `from`, nearest first.
    pub fn next_nearest_ids(&self, from: usize) -> impl Iterator<Item = VertexId> + '_ {
        self.nearest(from).iter().map(|&j| self.col_map.id(j))
    }

    /// Returns `true` if the matrix is square and symmetric.
    pub fn is_symmetric(&self) -> bool {
        if self.rows != self.cols {
            return false;
        }
        for i in 0..self.rows {
            for j in (i + 1)..self.cols {
                if self.get(i, j) != self.get(j, i) {
                    return false;
                }
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn origin_and_up() -> Vec<Vertex> {
        vec![
            Vertex::new(0, 0.0, 0.0),
            Vertex::new(1, 0.0, 1.0),
            Vertex::new(2, 0.0, 2.0),
        ]
    }

    fn triangles() -> Vec<Vertex> {
        vec![
            Vertex::new(0, 8.0, 15.0),
            Vertex::new(1, 5.0, 12.0),
            Vertex::new(2, 7.0, 24.0),
        ]
    }

    #[test]
    fn test_single_vertex() {
        let v = vec![Vertex::new(0, 0.0, 0.0)];
        let dm = DistanceMatrix::from_vertices(&v, &v).expect("unique");
        assert_eq!(dm.get(0, 0), 0);
        assert_eq!(dm.max_pair(), Some((0, 0)));
    }

    #[test]
    fn test_truncated_euclidean() {
        let users = &origin_and_up()[..2];
        let facilities = vec![Vertex::new(0, 3.0, 4.0), Vertex::new(1, 5.0, 12.0)];
        let dm = DistanceMatrix::from_vertices(users, &facilities).expect("unique");
        assert_eq!(dm.get(0, 0), 5);
        assert_eq!(dm.get(0, 1), 13);
        // sqrt(18) = 4.24..., sqrt(146) = 12.08...
        assert_eq!(dm.get(1, 0), 4);
        assert_eq!(dm.get(1, 1), 12);
        assert_eq!(dm.max_pair(), Some((0, 1)));
        assert_eq!(dm.max_distance(), 13);

        let far = DistanceMatrix::from_vertices(&users[..1], &[Vertex::new(7, 65.0, 72.0)])
            .expect("unique");
        assert_eq!(far.get(0, 0), 97);
        assert_eq!(far.by_id(0, 7), Some(97));
    }

    #[test]
    fn test_three_by_three() {
        let dm = DistanceMatrix::from_vertices(&origin_and_up(), &triangles()).expect("unique");
        let expected = [[17, 13, 25], [16, 12, 24], [15, 11, 23]];
        for (i, row) in expected.iter().enumerate() {
            for (j, &d) in row.iter().enumerate() {
                assert_eq!(dm.get(i, j), d);
            }
        }
        assert_eq!(dm.max_pair(), Some((0, 2)));
    }

    #[test]
    fn test_nearest_rows() {
        let dm = DistanceMatrix::from_vertices(&origin_and_up(), &triangles()).expect("unique");
        for i in 0..3 {
            assert_eq!(dm.nearest(i), &[1, 0, 2]);
            assert_eq!(dm.next_nearest_ids(i).collect::<Vec<_>>(), vec![1, 0, 2]);
        }
    }

    #[test]
    fn test_nearest_ties_by_id() {
        let users = vec![Vertex::new(0, 0.0, 0.0)];
        let facilities = vec![
            Vertex::new(9, 1.0, 0.0),
            Vertex::new(4, -1.0, 0.0),
            Vertex::new(6, 0.0, 1.0),
        ];
        let dm = DistanceMatrix::from_vertices(&users, &facilities).expect("unique");
        assert_eq!(dm.next_nearest_ids(0).collect::<Vec<_>>(), vec![4, 6, 9]);
    }

    #[test]
    fn test_by_id() {
        let users = vec![Vertex::new(10, 0.0, 0.0)];
        let facilities = vec![Vertex::new(20, 3.0, 4.0)];
        let dm = DistanceMatrix::from_vertices(&users, &facilities).expect("unique");
        assert_eq!(dm.by_id(10, 20), Some(5));
        assert_eq!(dm.by_id(20, 10), None);
    }

    #[test]
    fn test_from_data() {
        let dm = DistanceMatrix::from_data(
            IdIndexMap::identity(2),
            IdIndexMap::identity(2),
            vec![0, 5, 5, 0],
        )
        .expect("valid");
        assert_eq!(dm.get(0, 1), 5);
        assert!(dm.is_symmetric());
    }

    #[test]
    fn test_from_data_invalid_size() {
        let err = DistanceMatrix::from_data(
            IdIndexMap::identity(2),
            IdIndexMap::identity(2),
            vec![0, 1, 2],
        )
        .unwrap_err();
        assert_eq!(err.expected(), 4);
        assert_eq!(err.actual(), 3);
    }

    #[test]
    fn test_asymmetric_matrix() {
        let dm = DistanceMatrix::from_data(
            IdIndexMap::identity(2),
            IdIndexMap::identity(2),
            vec![0, 10, 15, 0],
        )
        .expect("valid");
        assert!(!dm.is_symmetric());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let v = vec![Vertex::new(1, 0.0, 0.0), Vertex::new(1, 1.0, 1.0)];
        assert!(DistanceMatrix::from_vertices(&v, &origin_and_up()).is_err());
    }

    fn points(max_len: usize) -> impl Strategy<Value = Vec<(i32, i32)>> {
        prop::collection::vec((-500i32..500, -500i32..500), 1..max_len)
    }

    fn to_vertices(coords: &[(i32, i32)]) -> Vec<Vertex> {
        coords
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| Vertex::new(i, x as f64, y as f64))
            .collect()
    }

    proptest! {
        #[test]
        fn prop_rows_sorted_and_complete(a in points(12), b in points(12)) {
            let dm = DistanceMatrix::from_vertices(&to_vertices(&a), &to_vertices(&b)).unwrap();
            for i in 0..dm.rows() {
                let order = dm.nearest(i);
                let mut seen = order.to_vec();
                seen.sort_unstable();
                prop_assert_eq!(seen, (0..dm.cols()).collect::<Vec<_>>());
                for w in order.windows(2) {
                    prop_assert!(dm.get(i, w[0]) <= dm.get(i, w[1]));
                }
            }
        }

        #[test]
        fn prop_same_set_symmetric(a in points(12)) {
            let v = to_vertices(&a);
            let dm = DistanceMatrix::from_vertices(&v, &v).unwrap();
            prop_assert!(dm.is_symmetric());
            for i in 0..dm.rows() {
                prop_assert_eq!(dm.get(i, i), 0);
                for j in 0..dm.cols() {
                    prop_assert_eq!(dm.get(i, j), v[i].distance_to(&v[j]).floor() as Distance);
                }
            }
        }
    }
}
