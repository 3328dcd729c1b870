//! A user's ranked open centers around the alpha-th one.

use crate::distance::{Distance, DistanceMatrix};

use super::Allocator;

/// The `alpha + 1` nearest open centers of one user, together with the
/// distance from that user to a candidate facility-in.
///
/// Built from a freshly derived [`Allocator`]; used to decide how opening the
/// candidate and closing each center would change the user's alpha-th
/// distance.
#[derive(Debug, Clone)]
pub struct AlphaNeighborhood {
    alpha: usize,
    fi_distance: Distance,
    /// `(facility index, distance)` at position `rank - 1`.
    ranked: Vec<(usize, Distance)>,
}

impl AlphaNeighborhood {
    /// Collects the user's centers of rank 1 to `alpha + 1`.
    ///
    /// # Panics
    ///
    /// Panics if fewer than `alpha + 1` ranked centers are found among
    /// `centers`, which means the allocator was not re-derived after the last
    /// mutation.
    pub fn new(
        allocator: &Allocator,
        user: usize,
        centers: &[usize],
        distances_uf: &DistanceMatrix,
        fi_distance: Distance,
    ) -> Self {
        let alpha = allocator.alpha();
        let mut ranked: Vec<Option<(usize, Distance)>> = vec![None; alpha + 1];
        let mut found = 0;
        for &facility in centers {
            let rank = allocator.rank(user, facility) as usize;
            if rank == 0 || rank > alpha + 1 {
                continue;
            }
            if ranked[rank - 1].is_none() {
                found += 1;
            }
            ranked[rank - 1] = Some((facility, distances_uf.get(user, facility)));
            if found == alpha + 1 {
                break;
            }
        }

        assert!(
            found == alpha + 1,
            "user index {} has {} ranked centers, expected {}: allocator is stale",
            user,
            found,
            alpha + 1
        );

        Self {
            alpha,
            fi_distance,
            ranked: ranked.into_iter().flatten().collect(),
        }
    }

    /// Distance to the `(alpha - 1)`-th nearest center, 0 when alpha is 1.
    pub fn alpha_minus_one_distance(&self) -> Distance {
        if self.alpha == 1 {
            0
        } else {
            self.ranked[self.alpha - 2].1
        }
    }

    /// Distance to the alpha-th nearest center.
    pub fn alpha_distance(&self) -> Distance {
        self.ranked[self.alpha - 1].1
    }

    /// Distance to the `(alpha + 1)`-th nearest center.
    pub fn alpha_plus_one_distance(&self) -> Distance {
        self.ranked[self.alpha].1
    }

    pub fn fi_distance(&self) -> Distance {
        self.fi_distance
    }

    /// `true` if the facility-in would rank before the current alpha-th
    /// center.
    pub fn is_user_attracted(&self) -> bool {
        self.fi_distance < self.alpha_distance()
    }

    /// Facility index holding `rank` (1-based), if within `1..=alpha + 1`.
    pub fn center_at(&self, rank: usize) -> Option<usize> {
        rank.checked_sub(1)
            .and_then(|k| self.ranked.get(k))
            .map(|&(facility, _)| facility)
    }

    /// Centers whose removal changes this user's alpha-th distance: every
    /// center ranked below alpha, plus the alpha-th one when the user is not
    /// attracted. Never the `(alpha + 1)`-th.
    pub fn updating_centers(&self) -> impl Iterator<Item = usize> + '_ {
        let count = if self.is_user_attracted() {
            self.alpha - 1
        } else {
            self.alpha
        };
        self.ranked[..count].iter().map(|&(facility, _)| facility)
    }
}
