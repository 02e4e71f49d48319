//! Trial loop comparing election processes on shared ballots.
//!
//! # Algorithm
//!
//! For trial `i` with lean `leans[i]`:
//!
//! 1. Seed a fresh [`NoiseSource`] with `seed + i`
//! 2. Sample the population, then the slate, then one ballot per voter
//! 3. Run every election over that same definition and score its winner
//!    against the trial's voters
//!
//! Trials share nothing mutable, so they may run on the rayon pool; the
//! records come back in trial order either way.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, info};

use super::config::ExperimentConfig;
use super::types::{ExperimentResult, Scenario, TrialRecord};
use crate::error::{ElectionError, Result};
use crate::model::{ElectionDefinition, NoiseSource};
use crate::process::{Election, ElectionProcess};
use crate::result::ElectionResult;
use crate::satisfaction::ballot_satisfaction;

/// Runs a set of elections across a lean sweep.
///
/// # Usage
///
/// ```
/// use u_election::experiment::{ExperimentConfig, ExperimentRunner, NormalPartisanScenario};
/// use u_election::primary::TopNPrimary;
/// use u_election::process::{ComposableElection, Election, GeneralRule};
///
/// let elections = vec![
///     Election::General(GeneralRule::plurality()),
///     Election::Composable(ComposableElection::new(
///         TopNPrimary::top_two(),
///         GeneralRule::instant_runoff(),
///     )),
/// ];
/// let config = ExperimentConfig::default().with_voters(200).with_seed(42);
///
/// let scenario = NormalPartisanScenario::default();
/// let result = ExperimentRunner::run(&scenario, &elections, &config).unwrap();
/// assert_eq!(result.records().len(), config.leans.len() * elections.len());
/// ```
pub struct ExperimentRunner;

impl ExperimentRunner {
    pub fn run<S: Scenario>(
        scenario: &S,
        elections: &[Election],
        config: &ExperimentConfig,
    ) -> Result<ExperimentResult> {
        config.validate().map_err(ElectionError::InvalidConfig)?;

        info!(
            trials = config.leans.len(),
            elections = elections.len(),
            n_voters = config.n_voters,
            seed = config.seed,
            "experiment start"
        );

        let trials: Vec<(usize, f64)> = config.leans.iter().copied().enumerate().collect();
        let per_trial: Vec<Result<Vec<TrialRecord>>> = if config.parallel {
            run_parallel(scenario, elections, config, &trials)
        } else {
            trials
                .iter()
                .map(|&(trial, lean)| run_trial(scenario, elections, config, trial, lean))
                .collect()
        };

        let mut records = Vec::with_capacity(trials.len() * elections.len());
        for trial in per_trial {
            records.extend(trial?);
        }

        info!(records = records.len(), "experiment complete");
        Ok(ExperimentResult::new(records))
    }
}

#[cfg(feature = "parallel")]
fn run_parallel<S: Scenario>(
    scenario: &S,
    elections: &[Election],
    config: &ExperimentConfig,
    trials: &[(usize, f64)],
) -> Vec<Result<Vec<TrialRecord>>> {
    trials
        .par_iter()
        .map(|&(trial, lean)| run_trial(scenario, elections, config, trial, lean))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn run_parallel<S: Scenario>(
    scenario: &S,
    elections: &[Election],
    config: &ExperimentConfig,
    trials: &[(usize, f64)],
) -> Vec<Result<Vec<TrialRecord>>> {
    trials
        .iter()
        .map(|&(trial, lean)| run_trial(scenario, elections, config, trial, lean))
        .collect()
}

fn run_trial<S: Scenario>(
    scenario: &S,
    elections: &[Election],
    config: &ExperimentConfig,
    trial: usize,
    lean: f64,
) -> Result<Vec<TrialRecord>> {
    let mut noise = NoiseSource::new(config.seed.wrapping_add(trial as u64));
    let population = scenario.population(lean, config.n_voters, &mut noise)?;
    let candidates = scenario.candidates(&population, &mut noise)?;
    let definition =
        ElectionDefinition::from_population(candidates, &population, &config.ballot, &mut noise)?;

    debug!(
        trial,
        lean,
        voters = population.len(),
        candidates = definition.candidates.len(),
        "trial prepared"
    );

    elections
        .iter()
        .map(|election| -> Result<TrialRecord> {
            let outcome = election.run_definition(&definition)?;
            let winner = outcome.winner()?;
            let satisfaction = ballot_satisfaction(winner, &definition.ballots)?;
            Ok(TrialRecord {
                trial,
                lean,
                process: election.name(),
                winner: winner.name().to_string(),
                winner_ideology: winner.ideology(),
                satisfaction,
            })
        })
        .collect()
}
