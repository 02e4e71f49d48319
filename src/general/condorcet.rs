//! Pairwise (Condorcet) tournament with Copeland-style ranking.
//!
//! Every unordered pair meets in a two-candidate plurality count over the
//! full ballot set. Candidates are then ranked by:
//!
//! 1. more pairwise wins
//! 2. smaller worst-loss margin (the narrowest defeat; infinite if unbeaten)
//! 3. name, ascending
//!
//! The top of that ranking is the Condorcet winner whenever one exists,
//! and a deterministic pick inside a cycle otherwise. Positions below the
//! top are not a recursive Condorcet ordering (pairwise contests are not
//! rerun with earlier winners removed), so the result exposes only the
//! top entry.

use std::cmp::Ordering;
use std::sync::Arc;

use tracing::debug;

use super::plurality::SimplePlurality;
use crate::error::Result;
use crate::model::{Ballot, Candidate};
use crate::process::{total_weight, validate_ballots, ElectionProcess};
use crate::result::{CandidateResult, ElectionResult, Outcome, NEUTRAL_SATISFACTION};

/// Outcome of one head-to-head contest.
#[derive(Debug, Clone, PartialEq)]
pub struct PairwiseComparison {
    pub winner: Arc<Candidate>,
    pub loser: Arc<Candidate>,
    pub winner_votes: f64,
    pub loser_votes: f64,
}

impl PairwiseComparison {
    pub fn margin(&self) -> f64 {
        self.winner_votes - self.loser_votes
    }
}

#[derive(Debug, Clone)]
struct CondorcetStats {
    candidate: Arc<Candidate>,
    wins: usize,
    smallest_loss_margin: f64,
}

impl CondorcetStats {
    fn ranking(&self, other: &Self) -> Ordering {
        other
            .wins
            .cmp(&self.wins)
            .then(self.smallest_loss_margin.total_cmp(&other.smallest_loss_margin))
            .then_with(|| self.candidate.name().cmp(other.candidate.name()))
    }
}

/// All pairwise contests and the tournament winner.
#[derive(Debug, Clone, PartialEq)]
pub struct CondorcetResult {
    comparisons: Vec<PairwiseComparison>,
    top: Vec<CandidateResult>,
    n_votes: f64,
}

impl CondorcetResult {
    /// Every head-to-head contest, in slate-pair order.
    pub fn comparisons(&self) -> &[PairwiseComparison] {
        &self.comparisons
    }
}

impl ElectionResult for CondorcetResult {
    fn kind(&self) -> &'static str {
        "condorcet"
    }

    /// The tournament winner alone; its `votes` field holds its pairwise wins.
    fn ordered_results(&self) -> &[CandidateResult] {
        &self.top
    }

    fn voter_satisfaction(&self) -> f64 {
        NEUTRAL_SATISFACTION
    }

    fn n_votes(&self) -> f64 {
        self.n_votes
    }
}

/// Round-robin of two-candidate plurality contests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CondorcetElection {
    debug: bool,
}

impl CondorcetElection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn count(
        &self,
        candidates: &[Arc<Candidate>],
        ballots: &[Ballot],
    ) -> Result<CondorcetResult> {
        validate_ballots(ballots)?;

        let plurality = SimplePlurality::new();
        let mut stats: Vec<CondorcetStats> = candidates
            .iter()
            .map(|c| CondorcetStats {
                candidate: c.clone(),
                wins: 0,
                smallest_loss_margin: f64::INFINITY,
            })
            .collect();
        let n = candidates.len();
        let mut comparisons = Vec::with_capacity(n * n.saturating_sub(1) / 2);

        for i in 0..n {
            for j in (i + 1)..n {
                let pair = [candidates[i].clone(), candidates[j].clone()];
                let contest = plurality.tally(&pair, ballots);
                // plurality lists every supplied candidate, so both are present
                let (first, second) = (
                    &contest.ordered_results()[0],
                    &contest.ordered_results()[1],
                );
                let comparison = PairwiseComparison {
                    winner: first.candidate.clone(),
                    loser: second.candidate.clone(),
                    winner_votes: first.votes,
                    loser_votes: second.votes,
                };

                let (w, l) = if comparison.winner == candidates[i] {
                    (i, j)
                } else {
                    (j, i)
                };
                stats[w].wins += 1;
                let loss = &mut stats[l].smallest_loss_margin;
                *loss = loss.min(comparison.margin());

                if self.debug {
                    debug!(
                        winner = comparison.winner.name(),
                        loser = comparison.loser.name(),
                        winner_votes = comparison.winner_votes,
                        loser_votes = comparison.loser_votes,
                        margin = comparison.margin(),
                        "pairwise contest"
                    );
                }
                comparisons.push(comparison);
            }
        }

        stats.sort_by(CondorcetStats::ranking);
        let top = stats
            .first()
            .map(|s| vec![CandidateResult::new(s.candidate.clone(), s.wins as f64)])
            .unwrap_or_default();

        Ok(CondorcetResult {
            comparisons,
            top,
            n_votes: total_weight(ballots),
        })
    }
}

impl ElectionProcess for CondorcetElection {
    fn name(&self) -> String {
        "condorcet".into()
    }

    fn run(&self, candidates: &[Arc<Candidate>], ballots: &[Ballot]) -> Result<Outcome> {
        self.count(candidates, ballots).map(Outcome::Condorcet)
    }
}
