//! The shared output contract of every election process.
//!
//! Concrete rules return their own result types; [`Outcome`] tags them
//! so callers can hold any of them behind one type while still reaching
//! the rule-specific audit data.

use std::sync::Arc;

use crate::error::{ElectionError, Result};
use crate::general::{
    CondorcetResult, HeadToHeadResult, InstantRunoffResult, PluralityResult, RunoffResult,
};
use crate::model::Candidate;
use crate::primary::{PartyPrimaryResult, TopNPrimaryResult};
use crate::process::ComposableResult;

/// Satisfaction reported by results that do not score it themselves.
///
/// Primary stages and standalone general rules report this; only the
/// composition layer computes a real score.
pub const NEUTRAL_SATISFACTION: f64 = 0.0;

/// Votes credited to one candidate in one count.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateResult {
    pub candidate: Arc<Candidate>,
    pub votes: f64,
}

impl CandidateResult {
    pub fn new(candidate: Arc<Candidate>, votes: f64) -> Self {
        Self { candidate, votes }
    }
}

/// Contract every election result satisfies.
///
/// `winner()` is always the first entry of `ordered_results()`.
pub trait ElectionResult {
    /// Short label used in error messages.
    fn kind(&self) -> &'static str;

    /// Results, most votes first, ties in candidate order.
    fn ordered_results(&self) -> &[CandidateResult];

    /// Voter-satisfaction score in `[0, 1]`, or [`NEUTRAL_SATISFACTION`].
    fn voter_satisfaction(&self) -> f64;

    /// Total weighted votes cast.
    fn n_votes(&self) -> f64;

    /// The top entry of [`ordered_results`](Self::ordered_results).
    ///
    /// # Errors
    ///
    /// [`ElectionError::EmptyResult`] when no candidate is present.
    fn winner(&self) -> Result<&Arc<Candidate>> {
        self.ordered_results()
            .first()
            .map(|r| &r.candidate)
            .ok_or_else(|| ElectionError::EmptyResult {
                process: self.kind().to_string(),
            })
    }
}

/// Any result produced by an [`ElectionProcess`](crate::process::ElectionProcess).
#[derive(Debug, Clone)]
pub enum Outcome {
    Plurality(PluralityResult),
    Runoff(RunoffResult),
    InstantRunoff(InstantRunoffResult),
    Condorcet(CondorcetResult),
    HeadToHead(HeadToHeadResult),
    PartyPrimary(PartyPrimaryResult),
    TopNPrimary(TopNPrimaryResult),
    Composable(Box<ComposableResult>),
}

impl Outcome {
    fn inner(&self) -> &dyn ElectionResult {
        match self {
            Outcome::Plurality(r) => r,
            Outcome::Runoff(r) => r,
            Outcome::InstantRunoff(r) => r,
            Outcome::Condorcet(r) => r,
            Outcome::HeadToHead(r) => r,
            Outcome::PartyPrimary(r) => r,
            Outcome::TopNPrimary(r) => r,
            Outcome::Composable(r) => r.as_ref(),
        }
    }

    /// Candidates listed in `ordered_results()`, in order.
    pub fn candidates(&self) -> Vec<Arc<Candidate>> {
        self.ordered_results()
            .iter()
            .map(|r| r.candidate.clone())
            .collect()
    }
}

impl ElectionResult for Outcome {
    fn kind(&self) -> &'static str {
        self.inner().kind()
    }

    fn ordered_results(&self) -> &[CandidateResult] {
        self.inner().ordered_results()
    }

    fn voter_satisfaction(&self) -> f64 {
        self.inner().voter_satisfaction()
    }

    fn n_votes(&self) -> f64 {
        self.inner().n_votes()
    }

    fn winner(&self) -> Result<&Arc<Candidate>> {
        self.inner().winner()
    }
}

/// Pairs `votes[i]` with `candidates[i]` and orders by votes, descending.
///
/// The sort is stable, so equal tallies keep slate order.
pub(crate) fn rank_by_votes(candidates: &[Arc<Candidate>], votes: &[f64]) -> Vec<CandidateResult> {
    let mut results: Vec<CandidateResult> = candidates
        .iter()
        .zip(votes)
        .map(|(c, &v)| CandidateResult::new(c.clone(), v))
        .collect();
    results.sort_by(|a, b| b.votes.total_cmp(&a.votes));
    results
}
