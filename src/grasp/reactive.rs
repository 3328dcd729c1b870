//! Reactive GRASP beta selection.
//!
//! # Algorithm
//!
//! Keeps `k` evenly spaced betas in `[0, 1]`, each with a selection
//! probability (initially `1 / k`) and the running mean of the objectives it
//! produced. On update, every beta gets `q_i = best / mean_i`, where betas
//! never chosen use the mean of the tried ones, and the probabilities become
//! `q_i / Σ q`. Betas that lead to better solutions are picked more often.
//!
//! # Reference
//!
//! Prais, M. & Ribeiro, C. C. (2000). "Reactive GRASP: An Application to a
//! Matrix Decomposition Problem in TDMA Traffic Assignment". *INFORMS Journal
//! on Computing* 12(3), 164-176.

use rand::distr::weighted::WeightedIndex;
use rand::distr::Distribution;
use rand::Rng;

use crate::distance::Distance;

use super::err::InvalidReactiveLevelsError;

/// Probability distribution over beta levels, adapted to search results.
#[derive(Debug, Clone)]
pub struct ReactiveBeta {
    betas: Vec<f64>,
    probabilities: Vec<f64>,
    counts: Vec<usize>,
    means: Vec<f64>,
}

impl ReactiveBeta {
    /// Creates `levels` evenly spaced betas from 0 to 1 with uniform
    /// probabilities. Fails if `levels < 2`.
    pub fn new(levels: usize) -> Result<Self, InvalidReactiveLevelsError> {
        if levels < 2 {
            return Err(InvalidReactiveLevelsError::new(levels));
        }
        let step = 1.0 / (levels - 1) as f64;
        Ok(Self {
            betas: (0..levels).map(|i| i as f64 * step).collect(),
            probabilities: vec![1.0 / levels as f64; levels],
            counts: vec![0; levels],
            means: vec![0.0; levels],
        })
    }

    /// Forgets all statistics.
    pub fn reset(&mut self) {
        let levels = self.betas.len();
        self.probabilities.fill(1.0 / levels as f64);
        self.counts.fill(0);
        self.means.fill(0.0);
    }

    /// Draws a level by roulette. Returns `(level, beta)`.
    pub fn choose<R: Rng>(&self, rng: &mut R) -> (usize, f64) {
        let level = match WeightedIndex::new(&self.probabilities) {
            Ok(dist) => dist.sample(rng),
            Err(_) => rng.random_range(0..self.betas.len() as u64) as usize,
        };
        (level, self.betas[level])
    }

    /// Folds an objective value into the running mean of `level`.
    pub fn increment(&mut self, level: usize, objective: Distance) {
        self.counts[level] += 1;
        let n = self.counts[level] as f64;
        self.means[level] += (objective as f64 - self.means[level]) / n;
    }

    /// Recomputes the probabilities against the best objective so far.
    ///
    /// Does nothing until some level has been tried.
    pub fn update(&mut self, best: Distance) {
        let tried: Vec<f64> = self
            .counts
            .iter()
            .zip(&self.means)
            .filter(|&(&c, _)| c > 0)
            .map(|(_, &mean)| mean)
            .collect();
        if tried.is_empty() {
            return;
        }
        let global_mean = tried.iter().sum::<f64>() / tried.len() as f64;

        let best = best as f64;
        let qs: Vec<f64> = self
            .counts
            .iter()
            .zip(&self.means)
            .map(|(&c, &mean)| {
                let mean = if c == 0 { global_mean } else { mean };
                if mean > 0.0 {
                    best / mean
                } else {
                    1.0
                }
            })
            .collect();
        let total: f64 = qs.iter().sum();
        if total <= 0.0 {
            return;
        }
        for (p, q) in self.probabilities.iter_mut().zip(qs) {
            *p = q / total;
        }
    }

    pub fn betas(&self) -> &[f64] {
        &self.betas
    }

    pub fn probabilities(&self) -> &[f64] {
        &self.probabilities
    }

    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    pub fn means(&self) -> &[f64] {
        &self.means
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_levels() {
        let reactive = ReactiveBeta::new(11).expect("valid");
        assert_eq!(reactive.betas().len(), 11);
        assert_eq!(reactive.betas()[0], 0.0);
        assert!((reactive.betas()[3] - 0.3).abs() < 1e-12);
        assert_eq!(reactive.betas()[10], 1.0);
        for &p in reactive.probabilities() {
            assert!((p - 1.0 / 11.0).abs() < 1e-12);
        }
        assert!(ReactiveBeta::new(1).is_err());
    }

    #[test]
    fn test_running_mean() {
        let mut reactive = ReactiveBeta::new(3).expect("valid");
        reactive.increment(1, 10);
        reactive.increment(1, 20);
        reactive.increment(1, 30);
        assert_eq!(reactive.counts(), &[0, 3, 0]);
        assert!((reactive.means()[1] - 20.0).abs() < 1e-12);
    }

    #[test]
    fn test_update_uses_global_mean_for_untried() {
        let mut reactive = ReactiveBeta::new(3).expect("valid");
        reactive.increment(0, 10);
        reactive.increment(2, 20);
        reactive.update(10);
        // q = [1, 10/15, 0.5]
        let total = 1.0 + 10.0 / 15.0 + 0.5;
        let expected = [1.0 / total, (10.0 / 15.0) / total, 0.5 / total];
        for (p, e) in reactive.probabilities().iter().zip(expected) {
            assert!((p - e).abs() < 1e-12);
        }
        let sum: f64 = reactive.probabilities().iter().sum();
        assert!((sum - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_update_without_data_keeps_uniform() {
        let mut reactive = ReactiveBeta::new(4).expect("valid");
        reactive.update(100);
        assert_eq!(reactive.probabilities(), &[0.25; 4]);
    }

    #[test]
    fn test_zero_objectives() {
        let mut reactive = ReactiveBeta::new(2).expect("valid");
        reactive.increment(0, 0);
        reactive.increment(1, 10);
        reactive.update(0);
        assert_eq!(reactive.probabilities(), &[1.0, 0.0]);
    }

    #[test]
    fn test_choose_follows_probabilities() {
        let mut reactive = ReactiveBeta::new(2).expect("valid");
        reactive.increment(0, 0);
        reactive.increment(1, 10);
        reactive.update(0);
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..50 {
            assert_eq!(reactive.choose(&mut rng), (0, 0.0));
        }
    }

    #[test]
    fn test_reset() {
        let mut reactive = ReactiveBeta::new(2).expect("valid");
        reactive.increment(0, 4);
        reactive.update(4);
        reactive.reset();
        assert_eq!(reactive.counts(), &[0, 0]);
        assert_eq!(reactive.probabilities(), &[0.5, 0.5]);
    }
}
