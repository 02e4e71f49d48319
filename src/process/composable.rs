//! Primary-then-general pipeline.
//!
//! The primary narrows the slate; the general stage then runs over the
//! advancing candidates (in the primary's order) with the same, unmodified
//! ballots, reading each ranking among the survivors. Satisfaction is
//! scored once, here, from the general-stage winner against every voter
//! who cast a ballot.

use std::sync::Arc;

use tracing::debug;

use super::election::{GeneralRule, PrimaryRule};
use super::types::ElectionProcess;
use crate::error::Result;
use crate::model::{Ballot, Candidate};
use crate::result::{CandidateResult, ElectionResult, Outcome};
use crate::satisfaction::ballot_satisfaction;

/// Both stages of a composed election plus the satisfaction score.
///
/// Delegates `ordered_results()`, `winner()` and `n_votes()` to the
/// general stage.
#[derive(Debug, Clone)]
pub struct ComposableResult {
    primary: Outcome,
    general: Outcome,
    satisfaction: f64,
}

impl ComposableResult {
    pub fn primary(&self) -> &Outcome {
        &self.primary
    }

    pub fn general(&self) -> &Outcome {
        &self.general
    }

    /// Candidates the primary advanced to the general.
    pub fn advancing(&self) -> Vec<Arc<Candidate>> {
        self.primary.candidates()
    }
}

impl ElectionResult for ComposableResult {
    fn kind(&self) -> &'static str {
        "composable"
    }

    fn ordered_results(&self) -> &[CandidateResult] {
        self.general.ordered_results()
    }

    fn voter_satisfaction(&self) -> f64 {
        self.satisfaction
    }

    fn n_votes(&self) -> f64 {
        self.general.n_votes()
    }
}

/// A primary rule feeding a general rule.
#[derive(Debug, Clone, PartialEq)]
pub struct ComposableElection {
    primary: PrimaryRule,
    general: GeneralRule,
    debug: bool,
}

impl ComposableElection {
    pub fn new(primary: impl Into<PrimaryRule>, general: GeneralRule) -> Self {
        Self {
            primary: primary.into(),
            general,
            debug: false,
        }
    }

    /// Sets the debug flag on this pipeline and both of its stages.
    pub fn with_debug(self, debug: bool) -> Self {
        Self {
            primary: self.primary.with_debug(debug),
            general: self.general.with_debug(debug),
            debug,
        }
    }

    pub fn primary(&self) -> &PrimaryRule {
        &self.primary
    }

    pub fn general(&self) -> &GeneralRule {
        &self.general
    }

    /// Runs both stages.
    ///
    /// # Errors
    ///
    /// Propagates either stage's error, `EmptyResult` when the general
    /// stage has no candidates, and `EmptyElectorate` when no ballots
    /// were cast.
    pub fn count(
        &self,
        candidates: &[Arc<Candidate>],
        ballots: &[Ballot],
    ) -> Result<ComposableResult> {
        let primary = self.primary.run(candidates, ballots)?;
        let advancing = primary.candidates();

        if self.debug {
            let names: Vec<&str> = advancing.iter().map(|c| c.name()).collect();
            debug!(primary = %self.primary.name(), advancing = ?names, "primary complete");
        }

        let general = self.general.run(&advancing, ballots)?;
        let winner = general.winner()?;
        let satisfaction = ballot_satisfaction(winner, ballots)?;

        if self.debug {
            debug!(
                general = %self.general.name(),
                winner = winner.name(),
                ideology = winner.ideology(),
                satisfaction,
                "general complete"
            );
        }

        Ok(ComposableResult {
            primary,
            general,
            satisfaction,
        })
    }
}

impl ElectionProcess for ComposableElection {
    fn name(&self) -> String {
        format!("composable_{}_to_{}", self.primary.name(), self.general.name())
    }

    fn run(&self, candidates: &[Arc<Candidate>], ballots: &[Ballot]) -> Result<Outcome> {
        self.count(candidates, ballots)
            .map(|r| Outcome::Composable(Box::new(r)))
    }
}
