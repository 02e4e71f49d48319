//! Three-group districts with normally distributed partisan slates.

use std::sync::Arc;

use super::types::Scenario;
use crate::error::{ElectionError, Result};
use crate::model::{Candidate, NoiseSource, Party, Population};

/// A district of Democrats, Republicans and independents with a slate of
/// `n_partisan` candidates per major party plus one candidate near the
/// median voter.
///
/// Partisan candidates are drawn around their party's group mean, pushed
/// outward by `candidate_skew`. The median candidate runs under whichever
/// major party holds more weight.
///
/// # Examples
///
/// ```
/// use u_election::experiment::{NormalPartisanScenario, Scenario};
/// use u_election::model::NoiseSource;
///
/// let scenario = NormalPartisanScenario::default().with_partisan_candidates(2);
/// let mut noise = NoiseSource::new(1);
/// let population = scenario.population(5.0, 200, &mut noise).unwrap();
/// let slate = scenario.candidates(&population, &mut noise).unwrap();
/// assert_eq!(slate.len(), 5);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NormalPartisanScenario {
    /// Distance of each major party's mean from the center.
    pub partisanship: f64,
    /// Spread of every voter group.
    pub stddev: f64,
    /// Shift of every group mean per point of lean.
    pub skew_factor: f64,
    /// Candidates per major party.
    pub n_partisan: usize,
    /// Spread of partisan candidates around their party's mean.
    pub ideology_variance: f64,
    /// Spread of candidate quality around zero.
    pub quality_variance: f64,
    /// Spread of the median candidate around the median voter.
    pub median_variance: f64,
    /// Outward offset of partisan candidates from their party's mean.
    pub candidate_skew: f64,
}

impl Default for NormalPartisanScenario {
    fn default() -> Self {
        Self {
            partisanship: 1.0,
            stddev: 1.0,
            skew_factor: 0.01,
            n_partisan: 3,
            ideology_variance: 0.2,
            quality_variance: 0.0,
            median_variance: 0.1,
            candidate_skew: 0.0,
        }
    }
}

impl NormalPartisanScenario {
    pub fn with_partisanship(mut self, partisanship: f64) -> Self {
        self.partisanship = partisanship;
        self
    }

    pub fn with_stddev(mut self, stddev: f64) -> Self {
        self.stddev = stddev;
        self
    }

    pub fn with_skew_factor(mut self, skew_factor: f64) -> Self {
        self.skew_factor = skew_factor;
        self
    }

    pub fn with_partisan_candidates(mut self, n: usize) -> Self {
        self.n_partisan = n;
        self
    }

    pub fn with_ideology_variance(mut self, variance: f64) -> Self {
        self.ideology_variance = variance;
        self
    }

    pub fn with_quality_variance(mut self, variance: f64) -> Self {
        self.quality_variance = variance;
        self
    }

    pub fn with_median_variance(mut self, variance: f64) -> Self {
        self.median_variance = variance;
        self
    }

    pub fn with_candidate_skew(mut self, skew: f64) -> Self {
        self.candidate_skew = skew;
        self
    }

    fn group_mean(population: &Population, party: Party) -> Option<f64> {
        population
            .groups()
            .iter()
            .find(|g| g.party == party)
            .map(|g| g.mean)
    }

    fn partisan_slate(
        &self,
        party: Party,
        mean: f64,
        noise: &mut NoiseSource,
    ) -> Vec<Arc<Candidate>> {
        (1..=self.n_partisan)
            .map(|i| {
                let ideology = mean
                    + party.skew_sign() * self.candidate_skew
                    + noise.gaussian() * self.ideology_variance;
                let quality = noise.gaussian() * self.quality_variance;
                Candidate::builder(format!("{}-{i}", initial(party)), party)
                    .ideology(ideology)
                    .quality(quality)
                    .shared()
            })
            .collect()
    }
}

fn initial(party: Party) -> &'static str {
    match party {
        Party::Democratic => "D",
        Party::Independent => "I",
        Party::Republican => "R",
    }
}

impl Scenario for NormalPartisanScenario {
    fn population(
        &self,
        lean: f64,
        n_voters: usize,
        noise: &mut NoiseSource,
    ) -> Result<Population> {
        Population::from_lean(
            lean,
            self.partisanship,
            self.stddev,
            self.skew_factor,
            n_voters,
            noise,
        )
    }

    fn candidates(
        &self,
        population: &Population,
        noise: &mut NoiseSource,
    ) -> Result<Vec<Arc<Candidate>>> {
        let median = population.median_ideology().ok_or(ElectionError::EmptyElectorate)?;
        let dominant = if population.percent_weight(Party::Republican)
            > population.percent_weight(Party::Democratic)
        {
            Party::Republican
        } else {
            Party::Democratic
        };
        let median_candidate = Candidate::builder(format!("{}-V", initial(dominant)), dominant)
            .ideology(median + noise.gaussian() * self.median_variance)
            .quality(noise.gaussian() * self.quality_variance)
            .shared();

        let missing = |party: Party| {
            ElectionError::InvalidConfig(format!("population has no {party} group"))
        };
        let d_mean = Self::group_mean(population, Party::Democratic)
            .ok_or_else(|| missing(Party::Democratic))?;
        let r_mean = Self::group_mean(population, Party::Republican)
            .ok_or_else(|| missing(Party::Republican))?;

        let mut slate = self.partisan_slate(Party::Democratic, d_mean, noise);
        slate.push(median_candidate);
        slate.extend(self.partisan_slate(Party::Republican, r_mean, noise));
        Ok(slate)
    }
}
