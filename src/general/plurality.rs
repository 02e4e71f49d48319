//! Simple plurality: every ballot counts for its top remaining choice.
//!
//! This is the base counter the other rules reuse.

use std::sync::Arc;

use tracing::debug;

use crate::error::Result;
use crate::model::{Ballot, Candidate};
use crate::process::{validate_ballots, ElectionProcess};
use crate::result::{rank_by_votes, CandidateResult, ElectionResult, Outcome, NEUTRAL_SATISFACTION};

/// Result of one plurality count.
#[derive(Debug, Clone, PartialEq)]
pub struct PluralityResult {
    results: Vec<CandidateResult>,
    n_votes: f64,
}

impl PluralityResult {
    /// Wraps already-ordered results.
    pub fn new(results: Vec<CandidateResult>) -> Self {
        let n_votes = results.iter().map(|r| r.votes).sum();
        Self { results, n_votes }
    }

    /// Share of the vote held by the leader, or `None` with no votes cast.
    pub fn leader_share(&self) -> Option<f64> {
        match self.results.first() {
            Some(top) if self.n_votes > 0.0 => Some(top.votes / self.n_votes),
            _ => None,
        }
    }
}

impl ElectionResult for PluralityResult {
    fn kind(&self) -> &'static str {
        "simplePlurality"
    }

    fn ordered_results(&self) -> &[CandidateResult] {
        &self.results
    }

    fn voter_satisfaction(&self) -> f64 {
        NEUTRAL_SATISFACTION
    }

    fn n_votes(&self) -> f64 {
        self.n_votes
    }
}

/// First-past-the-post counter.
///
/// Every supplied candidate appears in the result, with zero votes if
/// nobody ranked them first among the slate. Equal tallies keep slate
/// order; pre-sort the slate for a canonical tie-break.
///
/// # Examples
///
/// ```
/// use u_election::general::SimplePlurality;
/// use u_election::model::{Ballot, Candidate, Party, Voter};
/// use u_election::result::ElectionResult;
///
/// let a = Candidate::builder("A", Party::Democratic).shared();
/// let b = Candidate::builder("B", Party::Republican).shared();
/// let voter = Voter::new(Party::Independent, 0.0);
/// let ballots = vec![
///     Ballot::new(voter, vec![a.clone(), b.clone()]),
///     Ballot::new(voter, vec![b.clone(), a.clone()]),
///     Ballot::new(voter, vec![b.clone(), a.clone()]),
/// ];
///
/// let result = SimplePlurality::new().count(&[a, b], &ballots).unwrap();
/// assert_eq!(result.winner().unwrap().name(), "B");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimplePlurality {
    debug: bool,
}

impl SimplePlurality {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables per-count tracing.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Validates the ballots, then counts.
    pub fn count(
        &self,
        candidates: &[Arc<Candidate>],
        ballots: &[Ballot],
    ) -> Result<PluralityResult> {
        validate_ballots(ballots)?;
        Ok(self.tally(candidates, ballots))
    }

    /// Counts without validation, for rules that already validated.
    pub(crate) fn tally(
        &self,
        candidates: &[Arc<Candidate>],
        ballots: &[Ballot],
    ) -> PluralityResult {
        let mut votes = vec![0.0; candidates.len()];
        for ballot in ballots {
            if let Some(i) = ballot.top_index_among(candidates) {
                votes[i] += ballot.weight();
            }
        }
        let result = PluralityResult::new(rank_by_votes(candidates, &votes));

        if self.debug {
            for r in result.ordered_results() {
                debug!(
                    candidate = r.candidate.name(),
                    ideology = r.candidate.ideology(),
                    votes = r.votes,
                    "plurality tally"
                );
            }
        }
        result
    }
}

impl ElectionProcess for SimplePlurality {
    fn name(&self) -> String {
        "simplePlurality".into()
    }

    fn run(&self, candidates: &[Arc<Candidate>], ballots: &[Ballot]) -> Result<Outcome> {
        self.count(candidates, ballots).map(Outcome::Plurality)
    }
}
