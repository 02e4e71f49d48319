//! Election definitions: the inputs one trial hands to every process.

use std::sync::Arc;

use super::ballot::Ballot;
use super::candidate::Candidate;
use super::noise::NoiseSource;
use super::population::Population;
use super::voter::BallotConfig;
use crate::error::Result;

/// A candidate slate and the ballots cast over it.
///
/// Build it once per trial and run every competing process against the
/// same definition so comparisons share one ballot set.
#[derive(Debug, Clone)]
pub struct ElectionDefinition {
    pub candidates: Vec<Arc<Candidate>>,
    pub ballots: Vec<Ballot>,
}

impl ElectionDefinition {
    pub fn new(candidates: Vec<Arc<Candidate>>, ballots: Vec<Ballot>) -> Self {
        Self { candidates, ballots }
    }

    /// Derives ballots from a population before the run.
    pub fn from_population(
        candidates: Vec<Arc<Candidate>>,
        population: &Population,
        config: &BallotConfig,
        noise: &mut NoiseSource,
    ) -> Result<Self> {
        let ballots = population.ballots(&candidates, config, noise)?;
        Ok(Self { candidates, ballots })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Party, PopulationGroup};

    #[test]
    fn test_equal_seeds_equal_definitions() {
        let candidates = vec![
            Candidate::builder("D", Party::Democratic).ideology(-0.5).shared(),
            Candidate::builder("R", Party::Republican).ideology(0.5).shared(),
        ];
        let build = || {
            let mut noise = NoiseSource::new(21);
            let pop = Population::sample(
                vec![PopulationGroup::new(Party::Independent, 0.0, 1.0, 1.0)],
                200,
                &mut noise,
            )
            .unwrap();
            ElectionDefinition::from_population(
                candidates.clone(),
                &pop,
                &BallotConfig::default(),
                &mut noise,
            )
            .unwrap()
        };

        let (a, b) = (build(), build());
        assert_eq!(a.ballots.len(), 200);
        assert_eq!(a.ballots, b.ballots);
    }
}
