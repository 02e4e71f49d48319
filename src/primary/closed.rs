//! Closed party primary.
//!
//! Each major party's primary is decided by its own registered voters
//! over its own candidates. Independents take no part, and every
//! non-major candidate advances unopposed.
//!
//! With a positive skew, each primary electorate is pulled toward its
//! party's pole (Democrats left, Republicans right) and ballots are
//! regenerated for the shifted voters. Regenerated ballots keep the
//! weight of the ballot they replace.

use std::sync::Arc;

use tracing::debug;

use super::config::ClosedPrimaryConfig;
use super::party::{count_party_primary, party_slate, PartyPrimaryResult, PrimaryKind};
use crate::error::{ElectionError, Result};
use crate::model::{Ballot, Candidate, NoiseSource, Party};
use crate::process::{validate_ballots, ElectionProcess};
use crate::result::Outcome;

/// Closed party primary.
///
/// # Examples
///
/// ```
/// use u_election::model::{Ballot, Candidate, Party, Voter};
/// use u_election::primary::ClosedPrimary;
///
/// let d1 = Candidate::builder("D1", Party::Democratic).ideology(-1.0).shared();
/// let d2 = Candidate::builder("D2", Party::Democratic).ideology(-0.5).shared();
/// let r1 = Candidate::builder("R1", Party::Republican).ideology(1.0).shared();
/// let slate = vec![d1.clone(), d2.clone(), r1.clone()];
///
/// let dem = Voter::new(Party::Democratic, -0.8);
/// let rep = Voter::new(Party::Republican, 0.9);
/// let ballots = vec![
///     Ballot::new(dem, vec![d2.clone(), d1.clone(), r1.clone()]),
///     Ballot::new(rep, vec![r1.clone(), d2.clone(), d1.clone()]),
/// ];
///
/// let result = ClosedPrimary::default().count(&slate, &ballots).unwrap();
/// assert_eq!(result.final_candidates(), vec![d2, r1]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClosedPrimary {
    config: ClosedPrimaryConfig,
    debug: bool,
}

impl ClosedPrimary {
    pub fn new(config: ClosedPrimaryConfig) -> Self {
        Self {
            config,
            debug: false,
        }
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn config(&self) -> &ClosedPrimaryConfig {
        &self.config
    }

    pub fn count(
        &self,
        candidates: &[Arc<Candidate>],
        ballots: &[Ballot],
    ) -> Result<PartyPrimaryResult> {
        self.config.validate().map_err(ElectionError::InvalidConfig)?;
        validate_ballots(ballots)?;

        let mut noise = NoiseSource::new(self.config.seed);
        let democratic = self.party_primary(Party::Democratic, candidates, ballots, &mut noise)?;
        let republican = self.party_primary(Party::Republican, candidates, ballots, &mut noise)?;

        Ok(PartyPrimaryResult::new(
            PrimaryKind::Closed,
            democratic,
            republican,
            candidates,
        ))
    }

    fn party_primary(
        &self,
        party: Party,
        candidates: &[Arc<Candidate>],
        ballots: &[Ballot],
        noise: &mut NoiseSource,
    ) -> Result<Outcome> {
        let slate = party_slate(candidates, party);
        let members = ballots.iter().filter(|b| b.voter().party() == party);

        let primary_ballots: Vec<Ballot> = if self.config.skew > 0.0 {
            let offset = party.skew_sign() * self.config.skew;
            members
                .map(|b| {
                    b.voter()
                        .skewed(offset)
                        .ballot(&slate, &self.config.ballot, noise)
                        .map(|regenerated| regenerated.with_weight(b.weight()))
                })
                .collect::<Result<_>>()?
        } else {
            members.cloned().collect()
        };

        if self.debug {
            debug!(
                party = party.short_name(),
                candidates = slate.len(),
                ballots = primary_ballots.len(),
                skew = self.config.skew,
                "closed primary electorate"
            );
        }

        Ok(count_party_primary(
            self.config.counting,
            &slate,
            &primary_ballots,
            self.debug,
        ))
    }
}

impl ElectionProcess for ClosedPrimary {
    fn name(&self) -> String {
        "closedPrimary".into()
    }

    fn run(&self, candidates: &[Arc<Candidate>], ballots: &[Ballot]) -> Result<Outcome> {
        self.count(candidates, ballots).map(Outcome::PartyPrimary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BallotConfig, Voter};
    use crate::primary::PrimaryCounting;
    use crate::result::ElectionResult;

    struct Fixture {
        d_left: Arc<Candidate>,
        d_center: Arc<Candidate>,
        r_center: Arc<Candidate>,
        r_right: Arc<Candidate>,
        ind: Arc<Candidate>,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                d_left: Candidate::builder("DL", Party::Democratic).ideology(-1.5).shared(),
                d_center: Candidate::builder("DC", Party::Democratic).ideology(-0.3).shared(),
                r_center: Candidate::builder("RC", Party::Republican).ideology(0.3).shared(),
                r_right: Candidate::builder("RR", Party::Republican).ideology(1.5).shared(),
                ind: Candidate::builder("I", Party::Independent).ideology(0.0).shared(),
            }
        }

        fn slate(&self) -> Vec<Arc<Candidate>> {
            vec![
                self.d_left.clone(),
                self.d_center.clone(),
                self.r_center.clone(),
                self.r_right.clone(),
                self.ind.clone(),
            ]
        }
    }

    fn ballots(n: usize, party: Party, ideology: f64, ranking: &[&Arc<Candidate>]) -> Vec<Ballot> {
        let ranking: Vec<Arc<Candidate>> = ranking.iter().map(|c| (*c).clone()).collect();
        (0..n)
            .map(|_| Ballot::new(Voter::new(party, ideology), ranking.clone()))
            .collect()
    }

    #[test]
    fn test_only_members_vote_in_their_primary() {
        let f = Fixture::new();
        let mut all = ballots(3, Party::Democratic, -0.4, &[&f.d_center, &f.d_left]);
        all.extend(ballots(2, Party::Democratic, -1.2, &[&f.d_left, &f.d_center]));
        all.extend(ballots(4, Party::Republican, 1.2, &[&f.r_right, &f.r_center]));
        // Independents would swing both primaries if they voted.
        all.extend(ballots(10, Party::Independent, 0.0, &[&f.d_left, &f.r_center]));

        let result = ClosedPrimary::default().count(&f.slate(), &all).unwrap();

        assert_eq!(result.democratic_winner(), Some(&f.d_center));
        assert_eq!(result.republican_winner(), Some(&f.r_right));
        assert_eq!(
            result.final_candidates(),
            vec![f.d_center.clone(), f.r_right.clone(), f.ind.clone()]
        );
        assert_eq!(result.n_votes(), 9.0);
        assert_eq!(result.voter_satisfaction(), 0.0);
    }

    #[test]
    fn test_runoff_counting_inside_party() {
        let f = Fixture::new();
        let d_mid = Candidate::builder("DM", Party::Democratic).ideology(-0.8).shared();
        let slate = vec![f.d_left.clone(), f.d_center.clone(), d_mid.clone(), f.r_center.clone()];

        let mut all = ballots(4, Party::Democratic, -1.5, &[&f.d_left, &d_mid, &f.d_center]);
        all.extend(ballots(3, Party::Democratic, -0.3, &[&f.d_center, &d_mid, &f.d_left]));
        all.extend(ballots(3, Party::Democratic, -0.8, &[&d_mid, &f.d_center, &f.d_left]));

        let plurality = ClosedPrimary::default().count(&slate, &all).unwrap();
        assert_eq!(plurality.democratic_winner(), Some(&f.d_left));

        let runoff = ClosedPrimary::new(
            ClosedPrimaryConfig::default().with_counting(PrimaryCounting::PluralityWithRunoff),
        )
        .count(&slate, &all)
        .unwrap();
        // DL 4 vs DC 6 after DM's voters transfer.
        assert_eq!(runoff.democratic_winner(), Some(&f.d_center));
        assert!(matches!(runoff.democratic_primary(), Outcome::Runoff(_)));
    }

    #[test]
    fn test_skew_regenerates_ballots_deterministically() {
        let f = Fixture::new();
        let mut all = ballots(5, Party::Democratic, -0.3, &[&f.d_center, &f.d_left]);
        all.extend(ballots(5, Party::Republican, 0.3, &[&f.r_center, &f.r_right]));

        let config = ClosedPrimaryConfig::default()
            .with_skew(2.0)
            .with_seed(11)
            .with_ballot_config(BallotConfig::default().with_uncertainty(0.1));
        let skewed = ClosedPrimary::new(config.clone()).count(&f.slate(), &all).unwrap();
        let again = ClosedPrimary::new(config).count(&f.slate(), &all).unwrap();

        assert_eq!(skewed.final_candidates(), again.final_candidates());
        assert_eq!(skewed.n_votes(), 10.0);
        // At -2.3 the left Democrat is far closer than the centrist.
        assert_eq!(skewed.democratic_winner(), Some(&f.d_left));
        assert_eq!(skewed.republican_winner(), Some(&f.r_right));
    }

    #[test]
    fn test_skew_keeps_ballot_weights() {
        let f = Fixture::new();
        let all: Vec<Ballot> = ballots(2, Party::Democratic, -1.0, &[&f.d_left])
            .into_iter()
            .map(|b| b.with_weight(2.5))
            .collect();

        let result = ClosedPrimary::new(ClosedPrimaryConfig::default().with_skew(0.5))
            .count(&f.slate(), &all)
            .unwrap();
        assert_eq!(result.democratic_primary().n_votes(), 5.0);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let f = Fixture::new();
        let err = ClosedPrimary::new(ClosedPrimaryConfig::default().with_skew(-1.0))
            .count(&f.slate(), &[])
            .unwrap_err();
        assert!(matches!(err, ElectionError::InvalidConfig(_)));
    }

    #[test]
    fn test_no_ballots_falls_back_to_slate_order() {
        let f = Fixture::new();
        let result = ClosedPrimary::default().count(&f.slate(), &[]).unwrap();
        // Zero-vote tallies still rank every party candidate.
        assert_eq!(result.democratic_winner(), Some(&f.d_left));
        assert_eq!(result.republican_winner(), Some(&f.r_center));
        assert_eq!(result.n_votes(), 0.0);
    }
}
