//! Voter populations.
//!
//! Groups are Gaussian in ideology; a [`Population`] samples every group
//! in proportion to its weight and keeps the voters sorted by ideology.

use std::sync::Arc;

use super::ballot::Ballot;
use super::candidate::Candidate;
use super::noise::NoiseSource;
use super::party::Party;
use super::voter::{BallotConfig, Voter};
use crate::error::{ElectionError, Result};

/// Share of the electorate registered as independent in lean-built populations.
const INDEPENDENT_WEIGHT: f64 = 0.20;

/// Floor on either major party's share in lean-built populations.
const MIN_PARTY_WEIGHT: f64 = 0.05;

/// A Gaussian block of voters sharing one party tag.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PopulationGroup {
    pub party: Party,
    pub mean: f64,
    pub stddev: f64,
    /// Relative size of the group.
    pub weight: f64,
}

impl PopulationGroup {
    pub fn new(party: Party, mean: f64, stddev: f64, weight: f64) -> Self {
        Self {
            party,
            mean,
            stddev,
            weight,
        }
    }

    /// Draws `n` voters from N(mean, stddev²).
    pub fn sample(&self, n: usize, noise: &mut NoiseSource) -> Vec<Voter> {
        (0..n)
            .map(|_| Voter::new(self.party, noise.gaussian() * self.stddev + self.mean))
            .collect()
    }
}

/// A sampled electorate.
#[derive(Debug, Clone)]
pub struct Population {
    groups: Vec<PopulationGroup>,
    voters: Vec<Voter>,
}

impl Population {
    /// Samples `n_voters` across `groups` by weight.
    ///
    /// Each group contributes `floor(weight * n_voters / total_weight)`
    /// voters, so the sample can fall a few voters short of `n_voters`.
    pub fn sample(
        groups: Vec<PopulationGroup>,
        n_voters: usize,
        noise: &mut NoiseSource,
    ) -> Result<Self> {
        let total: f64 = groups.iter().map(|g| g.weight).sum();
        if groups.is_empty() || !(total > 0.0) {
            return Err(ElectionError::InvalidConfig(
                "population needs at least one group with positive weight".into(),
            ));
        }

        let mut voters = Vec::with_capacity(n_voters);
        for group in &groups {
            let n = (group.weight * n_voters as f64 / total) as usize;
            voters.extend(group.sample(n, noise));
        }
        voters.sort_by(|a, b| a.ideology().total_cmp(&b.ideology()));

        Ok(Self { groups, voters })
    }

    /// Builds the standard three-group electorate for a partisan lean.
    ///
    /// `lean` is in percentage points, positive toward Republicans. The
    /// major parties split 80% of the electorate by lean (each floored at
    /// 5%), independents hold 20%, and every group's mean is shifted by
    /// `skew_factor` times the weight gap.
    pub fn from_lean(
        lean: f64,
        partisanship: f64,
        stddev: f64,
        skew_factor: f64,
        n_voters: usize,
        noise: &mut NoiseSource,
    ) -> Result<Self> {
        let r_pct = 0.5 + lean / 2.0 / 100.0;
        let d_pct = 0.5 - lean / 2.0 / 100.0;
        let r_weight = ((1.0 - INDEPENDENT_WEIGHT) * r_pct).max(MIN_PARTY_WEIGHT);
        let d_weight = ((1.0 - INDEPENDENT_WEIGHT) * d_pct).max(MIN_PARTY_WEIGHT);
        let skew = (r_weight - d_weight) / 2.0 * skew_factor * 100.0;

        let groups = vec![
            PopulationGroup::new(Party::Republican, partisanship + skew, stddev, r_weight * 100.0),
            PopulationGroup::new(Party::Democratic, -partisanship + skew, stddev, d_weight * 100.0),
            PopulationGroup::new(Party::Independent, skew, stddev, INDEPENDENT_WEIGHT * 100.0),
        ];
        Self::sample(groups, n_voters, noise)
    }

    pub fn groups(&self) -> &[PopulationGroup] {
        &self.groups
    }

    /// Voters sorted by ideology, left to right.
    pub fn voters(&self) -> &[Voter] {
        &self.voters
    }

    pub fn len(&self) -> usize {
        self.voters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voters.is_empty()
    }

    /// Ideology of the voter at the middle of the sorted sample.
    pub fn median_ideology(&self) -> Option<f64> {
        self.voters.get(self.voters.len() / 2).map(|v| v.ideology())
    }

    /// Weighted mean of group means.
    pub fn approximate_median_ideology(&self) -> f64 {
        let total: f64 = self.groups.iter().map(|g| g.weight).sum();
        self.groups.iter().map(|g| g.weight * g.mean / total).sum()
    }

    /// Fraction of total group weight held by `party`.
    pub fn percent_weight(&self, party: Party) -> f64 {
        let total: f64 = self.groups.iter().map(|g| g.weight).sum();
        let party_weight: f64 = self
            .groups
            .iter()
            .filter(|g| g.party == party)
            .map(|g| g.weight)
            .sum();
        party_weight / total
    }

    /// One ballot per voter, in voter order, all drawing from `noise`.
    pub fn ballots(
        &self,
        candidates: &[Arc<Candidate>],
        config: &BallotConfig,
        noise: &mut NoiseSource,
    ) -> Result<Vec<Ballot>> {
        self.voters
            .iter()
            .map(|v| v.ballot(candidates, config, noise))
            .collect()
    }
}
