//! Voters and ballot construction.

use std::sync::Arc;

use super::ballot::Ballot;
use super::candidate::Candidate;
use super::noise::NoiseSource;
use super::party::Party;
use crate::error::Result;

/// Noise configuration applied when a voter scores candidates.
///
/// # Examples
///
/// ```
/// use u_election::model::BallotConfig;
///
/// let config = BallotConfig::default().with_uncertainty(0.5);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BallotConfig {
    /// Standard deviation of the Gaussian noise added to each score.
    pub uncertainty: f64,
}

impl Default for BallotConfig {
    fn default() -> Self {
        Self { uncertainty: 0.5 }
    }
}

impl BallotConfig {
    pub fn with_uncertainty(mut self, uncertainty: f64) -> Self {
        self.uncertainty = uncertainty;
        self
    }

    pub fn validate(&self) -> std::result::Result<(), String> {
        if !self.uncertainty.is_finite() || self.uncertainty < 0.0 {
            return Err("uncertainty must be finite and non-negative".into());
        }
        Ok(())
    }
}

/// A voter: a party registration and an ideology position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Voter {
    party: Party,
    ideology: f64,
}

impl Voter {
    pub fn new(party: Party, ideology: f64) -> Self {
        Self { party, ideology }
    }

    pub fn party(&self) -> Party {
        self.party
    }

    pub fn ideology(&self) -> f64 {
        self.ideology
    }

    /// A new voter shifted by `offset` along the spectrum.
    pub fn skewed(&self, offset: f64) -> Voter {
        Voter {
            party: self.party,
            ideology: self.ideology + offset,
        }
    }

    /// Negative ideological distance to `candidate`.
    pub fn distance_score(&self, candidate: &Candidate) -> f64 {
        -(self.ideology - candidate.ideology()).abs()
    }

    /// Total score: distance, affinity, quality, and one Gaussian draw.
    pub fn score(
        &self,
        candidate: &Candidate,
        config: &BallotConfig,
        noise: &mut NoiseSource,
    ) -> Result<f64> {
        let affinity = candidate.affinity_for(self.party)?;
        let uncertainty = noise.gaussian() * config.uncertainty;
        Ok(self.distance_score(candidate) + affinity + uncertainty + candidate.quality())
    }

    /// Ranks `candidates` by descending score into a weight-1.0 ballot.
    ///
    /// Each candidate consumes one Gaussian draw (in slate order) and
    /// then one boolean draw for tie-breaking equal scores.
    pub fn ballot(
        &self,
        candidates: &[Arc<Candidate>],
        config: &BallotConfig,
        noise: &mut NoiseSource,
    ) -> Result<Ballot> {
        let scores = candidates
            .iter()
            .map(|c| self.score(c, config, noise))
            .collect::<Result<Vec<f64>>>()?;
        let tie_breaks: Vec<bool> = candidates.iter().map(|_| noise.next_bool()).collect();

        let mut order: Vec<usize> = (0..candidates.len()).collect();
        order.sort_by(|&a, &b| {
            scores[b]
                .total_cmp(&scores[a])
                .then(tie_breaks[a].cmp(&tie_breaks[b]))
        });

        let ranking = order.into_iter().map(|i| candidates[i].clone()).collect();
        Ok(Ballot::new(*self, ranking))
    }
}
