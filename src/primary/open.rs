//! Open party primary.
//!
//! Every ballot joins the primary of the party owning its top choice
//! among the slate, regardless of the voter's registration. Ballots whose
//! top choice is outside both major parties sit out both primaries.

use std::sync::Arc;

use tracing::debug;

use super::config::OpenPrimaryConfig;
use super::party::{count_party_primary, party_slate, PartyPrimaryResult, PrimaryKind};
use crate::error::Result;
use crate::model::{Ballot, Candidate, Party};
use crate::process::{validate_ballots, ElectionProcess};
use crate::result::Outcome;

/// Open (or semi-closed) party primary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OpenPrimary {
    config: OpenPrimaryConfig,
    debug: bool,
}

impl OpenPrimary {
    pub fn new(config: OpenPrimaryConfig) -> Self {
        Self {
            config,
            debug: false,
        }
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn config(&self) -> &OpenPrimaryConfig {
        &self.config
    }

    pub fn count(
        &self,
        candidates: &[Arc<Candidate>],
        ballots: &[Ballot],
    ) -> Result<PartyPrimaryResult> {
        validate_ballots(ballots)?;

        let mut democratic_ballots = Vec::new();
        let mut republican_ballots = Vec::new();
        let mut abstained = 0usize;

        for ballot in ballots {
            match self.primary_for(ballot, candidates) {
                Some(Party::Democratic) => democratic_ballots.push(ballot.clone()),
                Some(Party::Republican) => republican_ballots.push(ballot.clone()),
                _ => abstained += 1,
            }
        }

        if self.debug {
            debug!(
                democratic = democratic_ballots.len(),
                republican = republican_ballots.len(),
                abstained,
                semi_closed = self.config.semi_closed,
                "open primary electorate"
            );
        }

        let democratic = count_party_primary(
            self.config.counting,
            &party_slate(candidates, Party::Democratic),
            &democratic_ballots,
            self.debug,
        );
        let republican = count_party_primary(
            self.config.counting,
            &party_slate(candidates, Party::Republican),
            &republican_ballots,
            self.debug,
        );

        Ok(PartyPrimaryResult::new(
            PrimaryKind::Open,
            democratic,
            republican,
            candidates,
        ))
    }

    /// Major party whose primary `ballot` votes in, if any.
    fn primary_for(&self, ballot: &Ballot, candidates: &[Arc<Candidate>]) -> Option<Party> {
        let party = ballot.top_choice_among(candidates)?.party();
        if !party.is_major() {
            return None;
        }

        let registered = ballot.voter().party();
        if self.config.semi_closed && registered.is_major() && registered != party {
            return None;
        }
        Some(party)
    }
}

impl ElectionProcess for OpenPrimary {
    fn name(&self) -> String {
        if self.config.semi_closed {
            "semiClosedPrimary".into()
        } else {
            "openPrimary".into()
        }
    }

    fn run(&self, candidates: &[Arc<Candidate>], ballots: &[Ballot]) -> Result<Outcome> {
        self.count(candidates, ballots).map(Outcome::PartyPrimary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Voter;
    use crate::primary::{ClosedPrimary, PrimaryCounting};
    use crate::result::ElectionResult;

    fn cand(name: &str, party: Party, ideology: f64) -> Arc<Candidate> {
        Candidate::builder(name, party).ideology(ideology).shared()
    }

    fn ballots(n: usize, party: Party, ranking: &[&Arc<Candidate>]) -> Vec<Ballot> {
        let ranking: Vec<Arc<Candidate>> = ranking.iter().map(|c| (*c).clone()).collect();
        (0..n)
            .map(|_| Ballot::new(Voter::new(party, 0.0), ranking.clone()))
            .collect()
    }

    #[test]
    fn test_crossover_voters_follow_top_choice() {
        let d1 = cand("D1", Party::Democratic, -1.0);
        let d2 = cand("D2", Party::Democratic, -0.2);
        let r1 = cand("R1", Party::Republican, 1.0);
        let slate = vec![d1.clone(), d2.clone(), r1.clone()];

        let mut all = ballots(3, Party::Democratic, &[&d1, &d2, &r1]);
        // Republicans and independents crossing over to a moderate Democrat.
        all.extend(ballots(2, Party::Republican, &[&d2, &r1, &d1]));
        all.extend(ballots(2, Party::Independent, &[&d2, &d1, &r1]));
        all.extend(ballots(1, Party::Republican, &[&r1, &d2, &d1]));

        let open = OpenPrimary::default().count(&slate, &all).unwrap();
        assert_eq!(open.democratic_winner(), Some(&d2));
        assert_eq!(open.republican_winner(), Some(&r1));
        assert_eq!(open.n_votes(), 8.0);
        assert_eq!(open.kind(), "openPrimary");

        let semi = OpenPrimary::new(OpenPrimaryConfig::default().with_semi_closed(true))
            .count(&slate, &all)
            .unwrap();
        // Crossover Republicans are held back; independents still count.
        assert_eq!(semi.democratic_primary().n_votes(), 5.0);
        assert_eq!(semi.democratic_winner(), Some(&d1));
        assert_eq!(semi.n_votes(), 6.0);
    }

    #[test]
    fn test_independent_top_choice_abstains() {
        let d = cand("D", Party::Democratic, -1.0);
        let r = cand("R", Party::Republican, 1.0);
        let i = cand("I", Party::Independent, 0.0);
        let slate = vec![d.clone(), r.clone(), i.clone()];

        let mut all = ballots(4, Party::Independent, &[&i, &d, &r]);
        all.extend(ballots(1, Party::Democratic, &[&d, &i, &r]));

        let result = OpenPrimary::default().count(&slate, &all).unwrap();
        assert_eq!(result.n_votes(), 1.0);
        assert_eq!(result.final_candidates(), vec![d.clone(), r.clone(), i.clone()]);
    }

    #[test]
    fn test_matches_closed_primary_on_party_line_ballots() {
        let d1 = cand("D1", Party::Democratic, -1.0);
        let d2 = cand("D2", Party::Democratic, -0.4);
        let r1 = cand("R1", Party::Republican, 0.4);
        let r2 = cand("R2", Party::Republican, 1.0);
        let slate = vec![d1.clone(), d2.clone(), r1.clone(), r2.clone()];

        let mut all = ballots(3, Party::Democratic, &[&d2, &d1, &r1, &r2]);
        all.extend(ballots(2, Party::Democratic, &[&d1, &d2, &r1, &r2]));
        all.extend(ballots(2, Party::Republican, &[&r1, &r2, &d2, &d1]));
        all.extend(ballots(3, Party::Republican, &[&r2, &r1, &d2, &d1]));

        let open = OpenPrimary::default().count(&slate, &all).unwrap();
        let closed = ClosedPrimary::default().count(&slate, &all).unwrap();
        assert_eq!(open.final_candidates(), closed.final_candidates());
        assert_eq!(open.n_votes(), closed.n_votes());
    }

    #[test]
    fn test_names_and_counting_method() {
        assert_eq!(OpenPrimary::default().name(), "openPrimary");
        let semi = OpenPrimary::new(
            OpenPrimaryConfig::default()
                .with_semi_closed(true)
                .with_counting(PrimaryCounting::PluralityWithRunoff),
        );
        assert_eq!(semi.name(), "semiClosedPrimary");

        let d = cand("D", Party::Democratic, -1.0);
        let result = semi.count(&[d.clone()], &ballots(1, Party::Democratic, &[&d])).unwrap();
        assert!(matches!(result.democratic_primary(), Outcome::Runoff(_)));
    }
}
