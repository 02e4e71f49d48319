//! Head-to-head election decided by ranked pairs (Tideman).
//!
//! # Algorithm
//!
//! 1. Build the pairwise preference matrix. A ballot prefers each slate
//!    candidate it ranks over everyone it ranks lower and over every
//!    slate candidate it leaves unranked.
//! 2. Form one pair per candidate couple, majority side first. Pairs are
//!    sorted by margin, then by the winner's share of the pair, then by
//!    the winner's and loser's names.
//! 3. Lock pairs in that order, skipping any pair that would close a
//!    cycle. The candidate left without a locked defeat takes the next
//!    place.
//! 4. Remove the placed candidate and its pairs, then repeat on the rest.
//!
//! A pair with equal support on both sides lists the earlier slate
//! candidate as its winner.
//!
//! # Reference
//!
//! Tideman (1987), "Independence of clones as a criterion for voting rules"

use std::cmp::Ordering;
use std::sync::Arc;

use tracing::debug;

use crate::error::Result;
use crate::model::{Ballot, Candidate};
use crate::process::{total_weight, validate_ballots, validate_slate, ElectionProcess};
use crate::result::{CandidateResult, ElectionResult, Outcome, NEUTRAL_SATISFACTION};

/// One candidate couple, majority side first.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedPair {
    pub winner: Arc<Candidate>,
    pub loser: Arc<Candidate>,
    pub winner_votes: f64,
    pub loser_votes: f64,
}

impl RankedPair {
    pub fn margin(&self) -> f64 {
        self.winner_votes - self.loser_votes
    }

    /// Winner's share of the votes expressing a preference in this pair.
    ///
    /// Zero when no ballot separates the two.
    pub fn share(&self) -> f64 {
        let total = self.winner_votes + self.loser_votes;
        if total > 0.0 {
            self.winner_votes / total
        } else {
            0.0
        }
    }

    /// Strongest pair first.
    fn strength(&self, other: &Self) -> Ordering {
        other
            .margin()
            .total_cmp(&self.margin())
            .then(other.share().total_cmp(&self.share()))
            .then_with(|| self.winner.name().cmp(other.winner.name()))
            .then_with(|| self.loser.name().cmp(other.loser.name()))
    }
}

#[derive(Debug, Clone)]
struct Contest {
    winner: usize,
    loser: usize,
    pair: RankedPair,
}

/// Full ranked-pairs ordering of the slate.
///
/// Unlike the Condorcet tournament, every position is a real placement,
/// so `ordered_results()` lists the whole slate. Each entry's `votes`
/// holds its rank points: `n - 1` for the winner down to `0` for last.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadToHeadResult {
    pairs: Vec<RankedPair>,
    preferences: Vec<Vec<f64>>,
    ranking: Vec<CandidateResult>,
    n_votes: f64,
}

impl HeadToHeadResult {
    /// Every candidate couple, strongest first.
    pub fn pairs(&self) -> &[RankedPair] {
        &self.pairs
    }

    /// `preferences()[i][j]` is the weight preferring slate entry `i` over `j`.
    pub fn preferences(&self) -> &[Vec<f64>] {
        &self.preferences
    }
}

impl ElectionResult for HeadToHeadResult {
    fn kind(&self) -> &'static str {
        "headToHead"
    }

    fn ordered_results(&self) -> &[CandidateResult] {
        &self.ranking
    }

    fn voter_satisfaction(&self) -> f64 {
        NEUTRAL_SATISFACTION
    }

    fn n_votes(&self) -> f64 {
        self.n_votes
    }
}

/// Ranked-pairs election over full ballot preferences.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeadToHeadElection {
    debug: bool,
}

impl HeadToHeadElection {
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
    ) -> Result<HeadToHeadResult> {
        validate_slate(candidates)?;
        validate_ballots(ballots)?;

        let preferences = preference_matrix(candidates, ballots);
        let contests = sorted_contests(candidates, &preferences);
        let order = self.place(candidates, &contests);

        let last = order.len().saturating_sub(1);
        let ranking = order
            .iter()
            .enumerate()
            .map(|(place, &i)| CandidateResult::new(candidates[i].clone(), (last - place) as f64))
            .collect();

        Ok(HeadToHeadResult {
            pairs: contests.into_iter().map(|c| c.pair).collect(),
            preferences,
            ranking,
            n_votes: total_weight(ballots),
        })
    }

    /// Repeatedly locks the remaining pairs and places the undefeated candidate.
    fn place(&self, candidates: &[Arc<Candidate>], contests: &[Contest]) -> Vec<usize> {
        let n = candidates.len();
        let mut remaining: Vec<usize> = (0..n).collect();
        let mut placed = vec![false; n];
        let mut order = Vec::with_capacity(n);

        while !remaining.is_empty() {
            let mut locked: Vec<Vec<usize>> = vec![Vec::new(); n];
            let mut defeated = vec![false; n];

            for contest in contests
                .iter()
                .filter(|c| !placed[c.winner] && !placed[c.loser])
            {
                if reaches(&locked, contest.loser, contest.winner) {
                    if self.debug {
                        debug!(
                            winner = contest.pair.winner.name(),
                            loser = contest.pair.loser.name(),
                            margin = contest.pair.margin(),
                            "pair skipped, would close a cycle"
                        );
                    }
                    continue;
                }
                locked[contest.winner].push(contest.loser);
                defeated[contest.loser] = true;
            }

            // Locked pairs form no cycle, so some remaining candidate is undefeated.
            let pos = remaining.iter().position(|&c| !defeated[c]).unwrap_or(0);
            let next = remaining.remove(pos);
            placed[next] = true;

            if self.debug {
                debug!(
                    place = order.len() + 1,
                    candidate = candidates[next].name(),
                    ideology = candidates[next].ideology(),
                    "placed"
                );
            }
            order.push(next);
        }
        order
    }
}

fn preference_matrix(candidates: &[Arc<Candidate>], ballots: &[Ballot]) -> Vec<Vec<f64>> {
    let n = candidates.len();
    let mut matrix = vec![vec![0.0; n]; n];
    let mut listed: Vec<usize> = Vec::with_capacity(n);
    let mut seen = vec![false; n];

    for ballot in ballots {
        listed.clear();
        seen.fill(false);
        for choice in ballot.ranking() {
            if let Some(i) = candidates.iter().position(|c| c == choice) {
                if !seen[i] {
                    seen[i] = true;
                    listed.push(i);
                }
            }
        }

        let weight = ballot.weight();
        for (k, &i) in listed.iter().enumerate() {
            for &j in &listed[k + 1..] {
                matrix[i][j] += weight;
            }
            for j in (0..n).filter(|&j| !seen[j]) {
                matrix[i][j] += weight;
            }
        }
    }
    matrix
}

fn sorted_contests(candidates: &[Arc<Candidate>], matrix: &[Vec<f64>]) -> Vec<Contest> {
    let n = candidates.len();
    let mut contests = Vec::with_capacity(n * n.saturating_sub(1) / 2);
    for i in 0..n {
        for j in 0..i {
            // j precedes i on the slate and keeps a tied pair.
            let (winner, loser) = if matrix[i][j] > matrix[j][i] {
                (i, j)
            } else {
                (j, i)
            };
            contests.push(Contest {
                winner,
                loser,
                pair: RankedPair {
                    winner: candidates[winner].clone(),
                    loser: candidates[loser].clone(),
                    winner_votes: matrix[winner][loser],
                    loser_votes: matrix[loser][winner],
                },
            });
        }
    }
    contests.sort_by(|a, b| a.pair.strength(&b.pair));
    contests
}

/// Whether `to` is reachable from `from` along locked pairs.
fn reaches(locked: &[Vec<usize>], from: usize, to: usize) -> bool {
    let mut visited = vec![false; locked.len()];
    let mut stack = vec![from];
    while let Some(node) = stack.pop() {
        if node == to {
            return true;
        }
        if std::mem::replace(&mut visited[node], true) {
            continue;
        }
        stack.extend(&locked[node]);
    }
    false
}

impl ElectionProcess for HeadToHeadElection {
    fn name(&self) -> String {
        "headToHead".into()
    }

    fn run(&self, candidates: &[Arc<Candidate>], ballots: &[Ballot]) -> Result<Outcome> {
        self.count(candidates, ballots).map(Outcome::HeadToHead)
    }
}
