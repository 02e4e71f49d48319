//! Shared machinery for two-party primaries.

use std::sync::Arc;

use super::config::PrimaryCounting;
use crate::general::{PluralityWithRunoff, SimplePlurality};
use crate::model::{Ballot, Candidate, Party};
use crate::result::{CandidateResult, ElectionResult, Outcome, NEUTRAL_SATISFACTION};

/// Which primary produced a [`PartyPrimaryResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimaryKind {
    Closed,
    Open,
}

/// Per-party primary counts plus the field advancing to the general.
///
/// `ordered_results()` lists the Democratic winner, the Republican
/// winner, then every candidate outside the two major parties (at zero
/// votes). `winner()` is the first of those, kept for callers expecting
/// a single primary winner.
#[derive(Debug, Clone)]
pub struct PartyPrimaryResult {
    kind: PrimaryKind,
    democratic: Box<Outcome>,
    republican: Box<Outcome>,
    advancing: Vec<CandidateResult>,
}

impl PartyPrimaryResult {
    pub(crate) fn new(
        kind: PrimaryKind,
        democratic: Outcome,
        republican: Outcome,
        all_candidates: &[Arc<Candidate>],
    ) -> Self {
        let mut advancing: Vec<CandidateResult> = Vec::new();
        advancing.extend(democratic.ordered_results().first().cloned());
        advancing.extend(republican.ordered_results().first().cloned());

        for candidate in all_candidates {
            if !candidate.party().is_major()
                && !advancing.iter().any(|r| &r.candidate == candidate)
            {
                advancing.push(CandidateResult::new(candidate.clone(), 0.0));
            }
        }

        Self {
            kind,
            democratic: Box::new(democratic),
            republican: Box::new(republican),
            advancing,
        }
    }

    pub fn primary_kind(&self) -> PrimaryKind {
        self.kind
    }

    pub fn democratic_primary(&self) -> &Outcome {
        &self.democratic
    }

    pub fn republican_primary(&self) -> &Outcome {
        &self.republican
    }

    pub fn democratic_winner(&self) -> Option<&Arc<Candidate>> {
        self.democratic.winner().ok()
    }

    pub fn republican_winner(&self) -> Option<&Arc<Candidate>> {
        self.republican.winner().ok()
    }

    /// Candidates advancing to the general election.
    pub fn final_candidates(&self) -> Vec<Arc<Candidate>> {
        self.advancing.iter().map(|r| r.candidate.clone()).collect()
    }
}

impl ElectionResult for PartyPrimaryResult {
    fn kind(&self) -> &'static str {
        match self.kind {
            PrimaryKind::Closed => "closedPrimary",
            PrimaryKind::Open => "openPrimary",
        }
    }

    fn ordered_results(&self) -> &[CandidateResult] {
        &self.advancing
    }

    fn voter_satisfaction(&self) -> f64 {
        NEUTRAL_SATISFACTION
    }

    /// Votes cast across both party primaries.
    fn n_votes(&self) -> f64 {
        self.democratic.n_votes() + self.republican.n_votes()
    }
}

/// Candidates of `party`, in slate order.
pub(crate) fn party_slate(candidates: &[Arc<Candidate>], party: Party) -> Vec<Arc<Candidate>> {
    candidates
        .iter()
        .filter(|c| c.party() == party)
        .cloned()
        .collect()
}

/// Counts one party's primary with the configured method.
///
/// Ballots must already be validated.
pub(crate) fn count_party_primary(
    counting: PrimaryCounting,
    candidates: &[Arc<Candidate>],
    ballots: &[Ballot],
    debug: bool,
) -> Outcome {
    match counting {
        PrimaryCounting::SimplePlurality => Outcome::Plurality(
            SimplePlurality::new()
                .with_debug(debug)
                .tally(candidates, ballots),
        ),
        PrimaryCounting::PluralityWithRunoff => Outcome::Runoff(
            PluralityWithRunoff::new()
                .with_debug(debug)
                .tally(candidates, ballots),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::general::PluralityResult;

    fn cand(name: &str, party: Party) -> Arc<Candidate> {
        Candidate::builder(name, party).shared()
    }

    fn single(candidate: &Arc<Candidate>, votes: f64) -> Outcome {
        Outcome::Plurality(PluralityResult::new(vec![CandidateResult::new(
            candidate.clone(),
            votes,
        )]))
    }

    #[test]
    fn test_advancing_order() {
        let d = cand("D", Party::Democratic);
        let r = cand("R", Party::Republican);
        let i = cand("I", Party::Independent);
        let slate = vec![i.clone(), r.clone(), d.clone()];

        let dem = single(&d, 10.0);
        let rep = single(&r, 7.0);
        let result = PartyPrimaryResult::new(PrimaryKind::Closed, dem, rep, &slate);

        assert_eq!(result.final_candidates(), vec![d.clone(), r.clone(), i.clone()]);
        assert_eq!(result.ordered_results()[0].votes, 10.0);
        assert_eq!(result.ordered_results()[2].votes, 0.0);
        assert_eq!(result.winner().unwrap(), &d);
        assert_eq!(result.n_votes(), 17.0);
        assert_eq!(result.kind(), "closedPrimary");
    }

    #[test]
    fn test_missing_party_falls_back() {
        let r = cand("R", Party::Republican);
        let empty = Outcome::Plurality(PluralityResult::new(vec![]));
        let rep = single(&r, 3.0);
        let result = PartyPrimaryResult::new(PrimaryKind::Open, empty, rep, &[r.clone()]);

        assert!(result.democratic_winner().is_none());
        assert_eq!(result.republican_winner(), Some(&r));
        assert_eq!(result.winner().unwrap(), &r);
    }

    #[test]
    fn test_nobody_advances() {
        let empty = || Outcome::Plurality(PluralityResult::new(vec![]));
        let result = PartyPrimaryResult::new(PrimaryKind::Open, empty(), empty(), &[]);
        assert!(result.winner().is_err());
    }
}
