//! Instant-runoff voting.
//!
//! # Algorithm
//!
//! 1. Every ballot counts for its highest-ranked active candidate
//! 2. If the leader holds at least half of the total ballot weight, or
//!    is the only active candidate left, the round is final
//! 3. Otherwise the last-placed candidate is eliminated and the loop
//!    repeats over the same ballots
//!
//! A round in which no active candidate receives a vote is returned as
//! final without eliminating anyone. The active set otherwise loses
//! exactly one candidate per non-final round, so a slate of `n`
//! candidates finishes within `n` rounds. Slates listing a candidate
//! twice are rejected.

use std::sync::Arc;

use tracing::debug;

use crate::error::Result;
use crate::model::{Ballot, Candidate};
use crate::process::{total_weight, validate_ballots, validate_slate, ElectionProcess};
use crate::result::{
    rank_by_votes, CandidateResult, ElectionResult, Outcome, NEUTRAL_SATISFACTION,
};

/// One elimination round.
#[derive(Debug, Clone, PartialEq)]
pub struct IrvRound {
    /// Candidates still in the running at the start of the round.
    pub active: Vec<Arc<Candidate>>,
    /// Tally over `active`, most votes first.
    pub results: Vec<CandidateResult>,
}

impl IrvRound {
    /// Last-placed candidate of the round.
    pub fn trailing(&self) -> Option<&CandidateResult> {
        self.results.last()
    }
}

/// Every round of an instant-runoff count.
///
/// `winner()` and `ordered_results()` read the final round only.
#[derive(Debug, Clone, PartialEq)]
pub struct InstantRunoffResult {
    rounds: Vec<IrvRound>,
    n_votes: f64,
}

impl InstantRunoffResult {
    pub fn rounds(&self) -> &[IrvRound] {
        &self.rounds
    }

    pub fn final_round(&self) -> Option<&IrvRound> {
        self.rounds.last()
    }

    /// Final-round results followed by each earlier round's eliminated
    /// candidate, most recently eliminated first.
    pub fn all_round_results(&self) -> Vec<CandidateResult> {
        let Some((last, earlier)) = self.rounds.split_last() else {
            return Vec::new();
        };
        let mut results = last.results.clone();
        results.extend(earlier.iter().rev().filter_map(|r| r.trailing().cloned()));
        results
    }
}

impl ElectionResult for InstantRunoffResult {
    fn kind(&self) -> &'static str {
        "instantRunoff"
    }

    fn ordered_results(&self) -> &[CandidateResult] {
        self.final_round()
            .map(|r| r.results.as_slice())
            .unwrap_or(&[])
    }

    fn voter_satisfaction(&self) -> f64 {
        NEUTRAL_SATISFACTION
    }

    fn n_votes(&self) -> f64 {
        self.n_votes
    }
}

/// Ranked-choice count with last-place elimination.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InstantRunoffElection {
    debug: bool,
}

impl InstantRunoffElection {
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
    ) -> Result<InstantRunoffResult> {
        validate_slate(candidates)?;
        validate_ballots(ballots)?;

        let n_weighted_ballots = total_weight(ballots);
        let mut active: Vec<Arc<Candidate>> = candidates.to_vec();
        let mut rounds: Vec<IrvRound> = Vec::with_capacity(candidates.len());

        loop {
            let round = tally_round(&active, ballots);
            if round.results.iter().all(|r| r.votes == 0.0) {
                // Nobody to eliminate on merit; the round stands as cast.
                if self.debug {
                    debug!(
                        round = rounds.len() + 1,
                        active = active.len(),
                        "irv round without votes"
                    );
                }
                rounds.push(round);
                break;
            }

            if self.debug {
                debug!(round = rounds.len() + 1, active = active.len(), "irv round");
                for r in &round.results {
                    debug!(
                        candidate = r.candidate.name(),
                        ideology = r.candidate.ideology(),
                        votes = r.votes,
                        "irv tally"
                    );
                }
            }

            let leader_votes = round.results[0].votes;
            let majority = n_weighted_ballots > 0.0 && leader_votes / n_weighted_ballots >= 0.5;
            let sole_survivor = active.len() == 1;

            if majority || sole_survivor {
                rounds.push(round);
                break;
            }

            let eliminated = round.results[round.results.len() - 1].candidate.clone();

            if self.debug {
                debug!(candidate = eliminated.name(), "eliminated");
            }
            active.retain(|c| *c != eliminated);
            rounds.push(round);
        }

        Ok(InstantRunoffResult {
            rounds,
            n_votes: n_weighted_ballots,
        })
    }
}

fn tally_round(active: &[Arc<Candidate>], ballots: &[Ballot]) -> IrvRound {
    let mut votes = vec![0.0; active.len()];
    for ballot in ballots {
        if let Some(i) = ballot.top_index_among(active) {
            votes[i] += ballot.weight();
        }
    }
    IrvRound {
        active: active.to_vec(),
        results: rank_by_votes(active, &votes),
    }
}

impl ElectionProcess for InstantRunoffElection {
    fn name(&self) -> String {
        "instantRunoff".into()
    }

    fn run(&self, candidates: &[Arc<Candidate>], ballots: &[Ballot]) -> Result<Outcome> {
        self.count(candidates, ballots).map(Outcome::InstantRunoff)
    }
}
