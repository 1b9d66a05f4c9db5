//! Sources of the randomized success signal.
//!
//! The runner only sees the `Sampler` trait, so tests and replays can swap
//! the random source for a fixed sequence or a closure.

use std::str::FromStr;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::SamplerConfig;
use crate::error::{Result, RetryError};

/// Produces one value in [0, 1) per call
pub trait Sampler {
    fn sample(&mut self) -> f64;
}

impl<F> Sampler for F
where
    F: FnMut() -> f64,
{
    fn sample(&mut self) -> f64 {
        self()
    }
}

/// Uniform random values backed by `StdRng`
#[derive(Debug, Clone)]
pub struct RandomSampler {
    rng: StdRng,
}

impl RandomSampler {
    /// Seed from the operating system
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Reproducible sampler: the same seed yields the same values
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl Sampler for RandomSampler {
    fn sample(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}

/// Replays a fixed list of values.
///
/// Once the list runs out, the last value repeats.
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceSampler {
    values: Vec<f64>,
    cursor: usize,
}

impl SequenceSampler {
    pub fn new(values: Vec<f64>) -> Result<Self> {
        if values.is_empty() {
            return Err(RetryError::InvalidSequence("sequence must not be empty".to_string()));
        }
        if let Some(bad) = values.iter().find(|v| !(0.0..=1.0).contains(*v)) {
            return Err(RetryError::InvalidSequence(format!(
                "value {} is outside [0, 1]",
                bad
            )));
        }
        Ok(Self { values, cursor: 0 })
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

impl Sampler for SequenceSampler {
    fn sample(&mut self) -> f64 {
        let idx = self.cursor.min(self.values.len() - 1);
        self.cursor = self.cursor.saturating_add(1);
        self.values[idx]
    }
}

impl FromStr for SequenceSampler {
    type Err = RetryError;

    /// Parse a comma-separated list such as `0.1, 0.3, 0.7`
    fn from_str(s: &str) -> Result<Self> {
        let values = s
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| {
                part.parse::<f64>()
                    .map_err(|e| RetryError::InvalidSequence(format!("'{}': {}", part, e)))
            })
            .collect::<Result<Vec<f64>>>()?;
        Self::new(values)
    }
}

/// Pick the sampler a config asks for: a fixed sequence wins over a seed,
/// and with neither the OS seeds the generator.
pub fn from_config(config: &SamplerConfig) -> Result<Box<dyn Sampler>> {
    if let Some(values) = &config.sequence {
        log::debug!("Replaying fixed sequence of {} value(s)", values.len());
        return Ok(Box::new(SequenceSampler::new(values.clone())?));
    }
    match config.seed {
        Some(seed) => {
            log::debug!("Using seeded sampler: seed={}", seed);
            Ok(Box::new(RandomSampler::seeded(seed)))
        }
        None => Ok(Box::new(RandomSampler::new())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_is_a_sampler() {
        let mut calls = 0;
        let mut sampler = || {
            calls += 1;
            0.5
        };
        assert_eq!(Sampler::sample(&mut sampler), 0.5);
        assert_eq!(Sampler::sample(&mut sampler), 0.5);
        drop(sampler);
        assert_eq!(calls, 2);
    }

    #[test]
    fn test_random_sampler_range() {
        let mut sampler = RandomSampler::new();
        for _ in 0..1000 {
            let v = sampler.sample();
            assert!((0.0..1.0).contains(&v), "value {} out of range", v);
        }
    }

    #[test]
    fn test_seeded_sampler_is_reproducible() {
        let mut a = RandomSampler::seeded(42);
        let mut b = RandomSampler::seeded(42);
        let xs: Vec<f64> = (0..10).map(|_| a.sample()).collect();
        let ys: Vec<f64> = (0..10).map(|_| b.sample()).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn test_different_seeds_diverge() {
        let mut a = RandomSampler::seeded(1);
        let mut b = RandomSampler::seeded(2);
        let xs: Vec<f64> = (0..10).map(|_| a.sample()).collect();
        let ys: Vec<f64> = (0..10).map(|_| b.sample()).collect();
        assert_ne!(xs, ys);
    }

    #[test]
    fn test_sequence_replays_then_repeats_last() {
        let mut sampler = SequenceSampler::new(vec![0.1, 0.3, 0.7]).unwrap();
        assert_eq!(sampler.sample(), 0.1);
        assert_eq!(sampler.sample(), 0.3);
        assert_eq!(sampler.sample(), 0.7);
        assert_eq!(sampler.sample(), 0.7);
        assert_eq!(sampler.sample(), 0.7);
    }

    #[test]
    fn test_sequence_rejects_empty() {
        let err = SequenceSampler::new(vec![]).unwrap_err();
        assert!(matches!(err, RetryError::InvalidSequence(_)));
    }

    #[test]
    fn test_sequence_rejects_out_of_range() {
        assert!(SequenceSampler::new(vec![0.2, 1.5]).is_err());
        assert!(SequenceSampler::new(vec![-0.1]).is_err());
        assert!(SequenceSampler::new(vec![f64::NAN]).is_err());
    }

    #[test]
    fn test_sequence_from_str() {
        let sampler: SequenceSampler = " 0.1, 0.3 ,0.7".parse().unwrap();
        assert_eq!(sampler.values(), &[0.1, 0.3, 0.7]);
    }

    #[test]
    fn test_sequence_from_str_trailing_comma() {
        let sampler: SequenceSampler = "0.0,".parse().unwrap();
        assert_eq!(sampler.values(), &[0.0]);
    }

    #[test]
    fn test_from_config_prefers_sequence() {
        let config = SamplerConfig {
            seed: Some(9),
            sequence: Some(vec![0.25]),
        };
        let mut sampler = from_config(&config).unwrap();
        assert_eq!(sampler.sample(), 0.25);
        assert_eq!(sampler.sample(), 0.25);
    }

    #[test]
    fn test_from_config_seeded_matches_direct_seed() {
        let config = SamplerConfig {
            seed: Some(9),
            sequence: None,
        };
        let mut boxed = from_config(&config).unwrap();
        let mut direct = RandomSampler::seeded(9);
        for _ in 0..5 {
            assert_eq!(boxed.sample(), direct.sample());
        }
    }

    #[test]
    fn test_from_config_rejects_bad_sequence() {
        let config = SamplerConfig {
            seed: None,
            sequence: Some(vec![]),
        };
        assert!(from_config(&config).is_err());
    }

    #[test]
    fn test_sequence_from_str_rejects_garbage() {
        let err = "0.1,abc".parse::<SequenceSampler>().unwrap_err();
        assert!(err.to_string().contains("abc"));
        assert!("".parse::<SequenceSampler>().is_err());
    }
}
