//! Rank table of each user's nearest open centers.
//!
//! # Algorithm
//!
//! For every user, walks the user's precomputed nearest-first facility order,
//! skips closed facilities and assigns ranks 1, 2, ... to open centers,
//! stopping once rank `alpha + 1` has been assigned. Every other entry of the
//! row is 0.
//!
//! The table is never patched incrementally: it must be re-derived with
//! [`Allocator::allocate_all`] after every insert, remove or swap.
//!
//! # Complexity
//!
//! O(n · m) worst case, O(n · (alpha + 1)) when open centers are spread
//! through the orderings.

use crate::distance::{Distance, DistanceMatrix};

/// Dense `n × m` table of center ranks, indexed by user and facility index.
///
/// # Examples
///
/// ```
/// use u_anpcp::local_search::Allocator;
/// use u_anpcp::models::{Instance, Vertex};
///
/// let vertices: Vec<Vertex> = (0..4).map(|i| Vertex::new(i, i as f64, 0.0)).collect();
/// let instance = Instance::same_set(vertices).unwrap();
/// let uf = instance.distances_uf();
///
/// let mut allocator = Allocator::new(1, 4, 4);
/// allocator.allocate_all(0..4, |u| uf.nearest(u), &[true, false, true, true]);
/// assert_eq!(allocator.rank(0, 0), 1);
/// assert_eq!(allocator.rank(0, 2), 2);
/// assert_eq!(allocator.rank(0, 3), 0);
/// ```
#[derive(Debug, Clone)]
pub struct Allocator {
    alpha: usize,
    n: usize,
    m: usize,
    ranks: Vec<u32>,
}

impl Allocator {
    /// Creates an empty table for `n` users and `m` facilities.
    pub fn new(alpha: usize, n: usize, m: usize) -> Self {
        Self {
            alpha,
            n,
            m,
            ranks: vec![0; n * m],
        }
    }

    /// Re-derives the ranks of the given users.
    ///
    /// `nearest(u)` must return every facility index of user `u`, nearest
    /// first; `is_center[f]` marks open facilities.
    pub fn allocate_all<'d, I, F>(&mut self, users: I, nearest: F, is_center: &[bool])
    where
        I: IntoIterator<Item = usize>,
        F: Fn(usize) -> &'d [usize],
    {
        let limit = (self.alpha + 1) as u32;
        for user in users {
            let row = &mut self.ranks[user * self.m..(user + 1) * self.m];
            row.fill(0);
            let mut rank = 0;
            for &facility in nearest(user) {
                if !is_center[facility] {
                    continue;
                }
                rank += 1;
                row[facility] = rank;
                if rank == limit {
                    break;
                }
            }
        }
    }

    /// Rank of `facility` for `user`, or 0 if it is not among the user's
    /// `alpha + 1` nearest open centers.
    #[inline]
    pub fn rank(&self, user: usize, facility: usize) -> u32 {
        self.ranks[user * self.m + facility]
    }

    /// The center holding `rank` for `user`, scanning `centers`.
    ///
    /// O(p)
    pub fn center_at_rank(&self, user: usize, rank: u32, centers: &[usize]) -> Option<usize> {
        centers
            .iter()
            .copied()
            .find(|&facility| self.rank(user, facility) == rank)
    }

    /// Distance from `user` to its alpha-th nearest open center.
    ///
    /// # Panics
    ///
    /// Panics if no center holds rank alpha, which means the table is stale.
    pub fn alpha_distance(
        &self,
        user: usize,
        centers: &[usize],
        distances_uf: &DistanceMatrix,
    ) -> (usize, Distance) {
        let center = self
            .center_at_rank(user, self.alpha as u32, centers)
            .unwrap_or_else(|| panic!("user index {} has no alpha-th center, allocator is stale", user));
        (center, distances_uf.get(user, center))
    }

    pub fn alpha(&self) -> usize {
        self.alpha
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn m(&self) -> usize {
        self.m
    }
}
