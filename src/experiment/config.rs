//! Experiment configuration.

use crate::model::BallotConfig;

/// Configuration for [`ExperimentRunner`](super::ExperimentRunner).
///
/// One trial is run per entry of `leans`; trial `i` draws all of its
/// randomness from a noise source seeded with `seed + i`.
///
/// # Examples
///
/// ```
/// use u_election::experiment::ExperimentConfig;
///
/// let config = ExperimentConfig::default()
///     .with_lean_sweep(-20.0, 20.0, 5.0)
///     .with_voters(500)
///     .with_seed(3);
/// assert_eq!(config.leans.len(), 9);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExperimentConfig {
    /// Partisan lean of each trial, in percentage points toward
    /// Republicans (negative leans toward Democrats).
    pub leans: Vec<f64>,

    /// Voters sampled per trial.
    pub n_voters: usize,

    /// Noise applied when deriving ballots.
    pub ballot: BallotConfig,

    /// Base seed; trial `i` uses `seed + i`.
    pub seed: u64,

    /// Runs trials on the rayon pool (requires the `parallel` feature).
    ///
    /// Results are identical to a sequential run.
    pub parallel: bool,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            leans: vec![-20.0, -10.0, 0.0, 10.0, 20.0],
            n_voters: 1000,
            ballot: BallotConfig::default(),
            seed: 0,
            parallel: false,
        }
    }
}

impl ExperimentConfig {
    pub fn with_leans(mut self, leans: Vec<f64>) -> Self {
        self.leans = leans;
        self
    }

    /// Leans from `start` to `end` inclusive in steps of `step`.
    ///
    /// A non-positive step yields just `start`.
    pub fn with_lean_sweep(mut self, start: f64, end: f64, step: f64) -> Self {
        self.leans = if step > 0.0 {
            let n = ((end - start) / step + 1e-9).floor().max(0.0) as usize;
            (0..=n).map(|i| start + step * i as f64).collect()
        } else {
            vec![start]
        };
        self
    }

    pub fn with_voters(mut self, n: usize) -> Self {
        self.n_voters = n;
        self
    }

    pub fn with_ballot_config(mut self, ballot: BallotConfig) -> Self {
        self.ballot = ballot;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.leans.is_empty() {
            return Err("at least one lean is required".into());
        }
        if self.leans.iter().any(|l| !l.is_finite()) {
            return Err("leans must be finite".into());
        }
        if self.n_voters == 0 {
            return Err("n_voters must be > 0".into());
        }
        self.ballot.validate()
    }
}
