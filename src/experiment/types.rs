//! Scenario contract and experiment records.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::Result;
use crate::model::{Candidate, NoiseSource, Population};

/// Supplies the electorate and slate for one trial.
///
/// Both methods draw from the trial's own noise source, population
/// first, so a scenario is reproducible from the trial seed alone.
///
/// # Thread Safety
///
/// `Scenario` must be `Send + Sync` because the runner may evaluate
/// trials in parallel using rayon.
pub trait Scenario: Send + Sync {
    /// Samples `n_voters` voters for a district with the given lean.
    fn population(&self, lean: f64, n_voters: usize, noise: &mut NoiseSource) -> Result<Population>;

    /// Builds the candidate slate for a sampled population.
    fn candidates(
        &self,
        population: &Population,
        noise: &mut NoiseSource,
    ) -> Result<Vec<Arc<Candidate>>>;
}

/// One election's outcome in one trial.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrialRecord {
    pub trial: usize,
    pub lean: f64,
    pub process: String,
    pub winner: String,
    pub winner_ideology: f64,
    pub satisfaction: f64,
}

/// Every trial record of an experiment, in trial then election order.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExperimentResult {
    records: Vec<TrialRecord>,
}

impl ExperimentResult {
    pub(crate) fn new(records: Vec<TrialRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[TrialRecord] {
        &self.records
    }

    /// Records produced by the election named `process`.
    pub fn for_process<'a>(
        &'a self,
        process: &'a str,
    ) -> impl Iterator<Item = &'a TrialRecord> + 'a {
        self.records.iter().filter(move |r| r.process == process)
    }

    /// Mean satisfaction of `process` across trials, if it ran at all.
    pub fn mean_satisfaction(&self, process: &str) -> Option<f64> {
        let (sum, n) = self
            .for_process(process)
            .fold((0.0, 0usize), |(sum, n), r| (sum + r.satisfaction, n + 1));
        (n > 0).then(|| sum / n as f64)
    }

    /// Mean satisfaction per process, keyed by process name.
    pub fn summary(&self) -> BTreeMap<String, f64> {
        let mut totals: BTreeMap<String, (f64, usize)> = BTreeMap::new();
        for r in &self.records {
            let entry = totals.entry(r.process.clone()).or_insert((0.0, 0));
            entry.0 += r.satisfaction;
            entry.1 += 1;
        }
        totals
            .into_iter()
            .map(|(name, (sum, n))| (name, sum / n as f64))
            .collect()
    }
}
