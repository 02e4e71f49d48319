//! Nonpartisan top-N primary.
//!
//! One plurality count over every candidate and every ballot; the `n`
//! leaders advance whatever their party.

use std::sync::Arc;

use tracing::debug;

use crate::error::{ElectionError, Result};
use crate::general::{PluralityResult, SimplePlurality};
use crate::model::{Ballot, Candidate};
use crate::process::{validate_ballots, ElectionProcess};
use crate::result::{CandidateResult, ElectionResult, Outcome, NEUTRAL_SATISFACTION};

/// The single primary count and the candidates it advances.
#[derive(Debug, Clone, PartialEq)]
pub struct TopNPrimaryResult {
    n: usize,
    primary: PluralityResult,
    advancing: Vec<CandidateResult>,
}

impl TopNPrimaryResult {
    /// Configured number of advancing candidates.
    pub fn n(&self) -> usize {
        self.n
    }

    /// The full plurality count, every candidate included.
    pub fn primary(&self) -> &PluralityResult {
        &self.primary
    }

    /// Up to `n` leaders, most votes first.
    pub fn final_candidates(&self) -> Vec<Arc<Candidate>> {
        self.advancing.iter().map(|r| r.candidate.clone()).collect()
    }
}

impl ElectionResult for TopNPrimaryResult {
    fn kind(&self) -> &'static str {
        "topNPrimary"
    }

    fn ordered_results(&self) -> &[CandidateResult] {
        &self.advancing
    }

    fn voter_satisfaction(&self) -> f64 {
        NEUTRAL_SATISFACTION
    }

    fn n_votes(&self) -> f64 {
        self.primary.n_votes()
    }
}

/// Advances the `n` plurality leaders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopNPrimary {
    n: usize,
    debug: bool,
}

impl TopNPrimary {
    pub fn new(n: usize) -> Self {
        Self { n, debug: false }
    }

    /// The common top-two ("jungle") primary.
    pub fn top_two() -> Self {
        Self::new(2)
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn n(&self) -> usize {
        self.n
    }

    /// Counts the primary.
    ///
    /// # Errors
    ///
    /// [`ElectionError::InvalidConfig`] when `n` is zero.
    pub fn count(
        &self,
        candidates: &[Arc<Candidate>],
        ballots: &[Ballot],
    ) -> Result<TopNPrimaryResult> {
        if self.n == 0 {
            return Err(ElectionError::InvalidConfig(
                "top-N primary must advance at least one candidate".into(),
            ));
        }
        validate_ballots(ballots)?;

        let primary = SimplePlurality::new()
            .with_debug(self.debug)
            .tally(candidates, ballots);
        let advancing: Vec<CandidateResult> =
            primary.ordered_results().iter().take(self.n).cloned().collect();

        if self.debug {
            for r in &advancing {
                debug!(candidate = r.candidate.name(), votes = r.votes, "advances");
            }
        }

        Ok(TopNPrimaryResult {
            n: self.n,
            primary,
            advancing,
        })
    }
}

impl ElectionProcess for TopNPrimary {
    fn name(&self) -> String {
        format!("top{}Primary", self.n)
    }

    fn run(&self, candidates: &[Arc<Candidate>], ballots: &[Ballot]) -> Result<Outcome> {
        self.count(candidates, ballots).map(Outcome::TopNPrimary)
    }
}
