//! Voter-satisfaction metric.
//!
//! With `L` voters strictly left of the winner out of `T` voters, the
//! score is `1 − |2L/T − 1|`: 1.0 when the winner splits the electorate
//! in half, falling linearly to 0 as everyone sits on one side. Only the
//! ordinal position matters, not the distance. Voters are counted by
//! head, ignoring ballot weight.

use crate::error::{ElectionError, Result};
use crate::model::{Ballot, Candidate, Voter};

/// Scores `winner` against an electorate of voters.
///
/// # Errors
///
/// [`ElectionError::EmptyElectorate`] when `voters` is empty.
pub fn voter_satisfaction<'a, I>(winner: &Candidate, voters: I) -> Result<f64>
where
    I: IntoIterator<Item = &'a Voter>,
{
    let mut left = 0usize;
    let mut total = 0usize;
    for voter in voters {
        total += 1;
        if voter.ideology() < winner.ideology() {
            left += 1;
        }
    }
    if total == 0 {
        return Err(ElectionError::EmptyElectorate);
    }
    Ok(1.0 - (2.0 * left as f64 / total as f64 - 1.0).abs())
}

/// Scores `winner` against the voters who cast `ballots`.
pub fn ballot_satisfaction(winner: &Candidate, ballots: &[Ballot]) -> Result<f64> {
    voter_satisfaction(winner, ballots.iter().map(Ballot::voter))
}
