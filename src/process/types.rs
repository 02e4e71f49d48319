//! The election-process contract.

use std::sync::Arc;

use crate::error::{ElectionError, Result};
use crate::model::{Ballot, Candidate};
use crate::result::Outcome;

/// A rule that turns a slate and its ballots into an [`Outcome`].
///
/// Implementations are pure functions of their arguments: the same
/// candidates and ballots always give a bit-identical outcome. A process
/// may emit `tracing` events when its debug flag is set, but never lets
/// them affect the count.
pub trait ElectionProcess {
    /// Stable identifier used to group results in comparisons.
    fn name(&self) -> String;

    /// Runs the election.
    ///
    /// # Errors
    ///
    /// Fails only on structurally invalid input (see
    /// [`ElectionError`]).
    fn run(&self, candidates: &[Arc<Candidate>], ballots: &[Ballot]) -> Result<Outcome>;
}

/// Rejects ballots whose weight is negative or not finite.
pub(crate) fn validate_ballots(ballots: &[Ballot]) -> Result<()> {
    for (index, ballot) in ballots.iter().enumerate() {
        let weight = ballot.weight();
        if !weight.is_finite() || weight < 0.0 {
            return Err(ElectionError::InvalidBallot {
                index,
                reason: format!("weight {weight} must be finite and non-negative"),
            });
        }
    }
    Ok(())
}

/// Rejects a slate that lists the same candidate twice.
pub(crate) fn validate_slate(candidates: &[Arc<Candidate>]) -> Result<()> {
    for (i, candidate) in candidates.iter().enumerate() {
        if candidates[..i].contains(candidate) {
            return Err(ElectionError::InvalidConfig(format!(
                "candidate {} appears more than once on the slate",
                candidate.name()
            )));
        }
    }
    Ok(())
}

/// Sum of ballot weights.
pub(crate) fn total_weight(ballots: &[Ballot]) -> f64 {
    ballots.iter().map(Ballot::weight).sum()
}
