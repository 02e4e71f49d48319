//! Ranked ballots.

use std::sync::Arc;

use super::candidate::Candidate;
use super::voter::Voter;

/// One voter's ranked preference order plus a weight.
///
/// Processes read ballots and never reorder them. Restricting a contest
/// to fewer candidates is done by asking for the top choice among an
/// active set, not by rebuilding the ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct Ballot {
    voter: Voter,
    ranking: Vec<Arc<Candidate>>,
    weight: f64,
}

impl Ballot {
    /// Builds a ballot with weight 1.0.
    pub fn new(voter: Voter, ranking: Vec<Arc<Candidate>>) -> Self {
        Self {
            voter,
            ranking,
            weight: 1.0,
        }
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// The voter who cast this ballot.
    pub fn voter(&self) -> &Voter {
        &self.voter
    }

    /// Full ranking, most preferred first.
    pub fn ranking(&self) -> &[Arc<Candidate>] {
        &self.ranking
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Most-preferred candidate on the whole ballot.
    pub fn first_choice(&self) -> Option<&Arc<Candidate>> {
        self.ranking.first()
    }

    /// Highest-ranked candidate that is still in `active`.
    ///
    /// Returns `None` when the ballot ranks nobody in the set.
    pub fn top_choice_among(&self, active: &[Arc<Candidate>]) -> Option<&Arc<Candidate>> {
        self.ranking.iter().find(|c| active.contains(c))
    }

    /// Position of the top active choice within `active`.
    pub(crate) fn top_index_among(&self, active: &[Arc<Candidate>]) -> Option<usize> {
        self.ranking
            .iter()
            .find_map(|c| active.iter().position(|a| a == c))
    }
}
