//! Top-2 selection over per-center gains.

use crate::distance::Distance;

/// A center and its accumulated gain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GainsFacility {
    pub facility: usize,
    pub gain: Distance,
}

impl GainsFacility {
    pub fn new(facility: usize, gain: Distance) -> Self {
        Self { facility, gain }
    }
}

/// The two largest gains, first-seen wins ties.
///
/// # Examples
///
/// ```
/// use u_anpcp::local_search::{GainsFacility, LargestTwoGains};
///
/// let top = LargestTwoGains::from_gains([
///     GainsFacility::new(0, 5),
///     GainsFacility::new(1, 9),
///     GainsFacility::new(2, 7),
/// ]);
/// assert_eq!(top.first().map(|g| g.facility), Some(1));
/// assert_eq!(top.second().map(|g| g.facility), Some(2));
/// assert_eq!(top.largest_excluding(1), 7);
/// assert_eq!(top.largest_excluding(0), 9);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LargestTwoGains {
    first: Option<GainsFacility>,
    second: Option<GainsFacility>,
}

impl LargestTwoGains {
    /// Scans `gains` once. O(p)
    pub fn from_gains<I>(gains: I) -> Self
    where
        I: IntoIterator<Item = GainsFacility>,
    {
        let mut top = Self::default();
        for candidate in gains {
            top.offer(candidate);
        }
        top
    }

    fn offer(&mut self, candidate: GainsFacility) {
        match self.first {
            Some(first) if candidate.gain <= first.gain => {
                if self.second.map_or(true, |s| candidate.gain > s.gain) {
                    self.second = Some(candidate);
                }
            }
            _ => {
                self.second = self.first;
                self.first = Some(candidate);
            }
        }
    }

    pub fn first(&self) -> Option<GainsFacility> {
        self.first
    }

    pub fn second(&self) -> Option<GainsFacility> {
        self.second
    }

    /// Largest gain among centers other than `facility`, or 0 if there is
    /// none. O(1)
    pub fn largest_excluding(&self, facility: usize) -> Distance {
        let pick = match self.first {
            Some(first) if first.facility == facility => self.second,
            other => other,
        };
        pick.map_or(0, |g| g.gain)
    }
}
