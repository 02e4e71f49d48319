//! Closed sets of election rules behind one dispatch point.

use std::sync::Arc;

use super::composable::ComposableElection;
use super::types::ElectionProcess;
use crate::error::Result;
use crate::general::{
    CondorcetElection, HeadToHeadElection, InstantRunoffElection, PluralityWithRunoff,
    SimplePlurality,
};
use crate::model::{Ballot, Candidate, ElectionDefinition};
use crate::primary::{ClosedPrimary, OpenPrimary, TopNPrimary};
use crate::result::Outcome;

/// Rules that decide a final winner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneralRule {
    Plurality(SimplePlurality),
    Runoff(PluralityWithRunoff),
    InstantRunoff(InstantRunoffElection),
    Condorcet(CondorcetElection),
    HeadToHead(HeadToHeadElection),
}

impl GeneralRule {
    pub fn plurality() -> Self {
        GeneralRule::Plurality(SimplePlurality::new())
    }

    pub fn runoff() -> Self {
        GeneralRule::Runoff(PluralityWithRunoff::new())
    }

    pub fn instant_runoff() -> Self {
        GeneralRule::InstantRunoff(InstantRunoffElection::new())
    }

    pub fn condorcet() -> Self {
        GeneralRule::Condorcet(CondorcetElection::new())
    }

    pub fn head_to_head() -> Self {
        GeneralRule::HeadToHead(HeadToHeadElection::new())
    }

    /// Every general rule with default settings.
    pub fn all() -> [GeneralRule; 5] {
        [
            Self::plurality(),
            Self::runoff(),
            Self::instant_runoff(),
            Self::condorcet(),
            Self::head_to_head(),
        ]
    }

    pub fn with_debug(self, debug: bool) -> Self {
        match self {
            GeneralRule::Plurality(p) => GeneralRule::Plurality(p.with_debug(debug)),
            GeneralRule::Runoff(p) => GeneralRule::Runoff(p.with_debug(debug)),
            GeneralRule::InstantRunoff(p) => GeneralRule::InstantRunoff(p.with_debug(debug)),
            GeneralRule::Condorcet(p) => GeneralRule::Condorcet(p.with_debug(debug)),
            GeneralRule::HeadToHead(p) => GeneralRule::HeadToHead(p.with_debug(debug)),
        }
    }

    fn process(&self) -> &dyn ElectionProcess {
        match self {
            GeneralRule::Plurality(p) => p,
            GeneralRule::Runoff(p) => p,
            GeneralRule::InstantRunoff(p) => p,
            GeneralRule::Condorcet(p) => p,
            GeneralRule::HeadToHead(p) => p,
        }
    }
}

impl ElectionProcess for GeneralRule {
    fn name(&self) -> String {
        self.process().name()
    }

    fn run(&self, candidates: &[Arc<Candidate>], ballots: &[Ballot]) -> Result<Outcome> {
        self.process().run(candidates, ballots)
    }
}

/// Rules that narrow the field before the general election.
#[derive(Debug, Clone, PartialEq)]
pub enum PrimaryRule {
    Closed(ClosedPrimary),
    Open(OpenPrimary),
    TopN(TopNPrimary),
}

impl PrimaryRule {
    pub fn with_debug(self, debug: bool) -> Self {
        match self {
            PrimaryRule::Closed(p) => PrimaryRule::Closed(p.with_debug(debug)),
            PrimaryRule::Open(p) => PrimaryRule::Open(p.with_debug(debug)),
            PrimaryRule::TopN(p) => PrimaryRule::TopN(p.with_debug(debug)),
        }
    }

    fn process(&self) -> &dyn ElectionProcess {
        match self {
            PrimaryRule::Closed(p) => p,
            PrimaryRule::Open(p) => p,
            PrimaryRule::TopN(p) => p,
        }
    }
}

impl From<ClosedPrimary> for PrimaryRule {
    fn from(p: ClosedPrimary) -> Self {
        PrimaryRule::Closed(p)
    }
}

impl From<OpenPrimary> for PrimaryRule {
    fn from(p: OpenPrimary) -> Self {
        PrimaryRule::Open(p)
    }
}

impl From<TopNPrimary> for PrimaryRule {
    fn from(p: TopNPrimary) -> Self {
        PrimaryRule::TopN(p)
    }
}

impl ElectionProcess for PrimaryRule {
    fn name(&self) -> String {
        self.process().name()
    }

    fn run(&self, candidates: &[Arc<Candidate>], ballots: &[Ballot]) -> Result<Outcome> {
        self.process().run(candidates, ballots)
    }
}

/// Any configured election, standalone or composed.
///
/// # Examples
///
/// ```
/// use u_election::model::{Ballot, Candidate, ElectionDefinition, Party, Voter};
/// use u_election::primary::TopNPrimary;
/// use u_election::process::{ComposableElection, Election, ElectionProcess, GeneralRule};
/// use u_election::result::ElectionResult;
///
/// let a = Candidate::builder("A", Party::Democratic).ideology(-0.5).shared();
/// let b = Candidate::builder("B", Party::Republican).ideology(0.5).shared();
/// let left = Voter::new(Party::Democratic, -0.4);
/// let right = Voter::new(Party::Republican, 0.6);
/// let definition = ElectionDefinition::new(
///     vec![a.clone(), b.clone()],
///     vec![
///         Ballot::new(left, vec![a.clone(), b.clone()]),
///         Ballot::new(left, vec![a.clone(), b.clone()]),
///         Ballot::new(right, vec![b.clone(), a.clone()]),
///     ],
/// );
///
/// let election = Election::Composable(ComposableElection::new(
///     TopNPrimary::top_two(),
///     GeneralRule::instant_runoff(),
/// ));
/// assert_eq!(election.name(), "composable_top2Primary_to_instantRunoff");
///
/// let outcome = election.run_definition(&definition).unwrap();
/// assert_eq!(outcome.winner().unwrap(), &a);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Election {
    General(GeneralRule),
    Primary(PrimaryRule),
    Composable(ComposableElection),
}

impl Election {
    pub fn with_debug(self, debug: bool) -> Self {
        match self {
            Election::General(g) => Election::General(g.with_debug(debug)),
            Election::Primary(p) => Election::Primary(p.with_debug(debug)),
            Election::Composable(c) => Election::Composable(c.with_debug(debug)),
        }
    }

    /// Runs over a prepared slate and ballot set.
    pub fn run_definition(&self, definition: &ElectionDefinition) -> Result<Outcome> {
        self.run(&definition.candidates, &definition.ballots)
    }

    fn process(&self) -> &dyn ElectionProcess {
        match self {
            Election::General(g) => g,
            Election::Primary(p) => p,
            Election::Composable(c) => c,
        }
    }
}

impl From<GeneralRule> for Election {
    fn from(rule: GeneralRule) -> Self {
        Election::General(rule)
    }
}

impl From<PrimaryRule> for Election {
    fn from(rule: PrimaryRule) -> Self {
        Election::Primary(rule)
    }
}

impl From<ComposableElection> for Election {
    fn from(election: ComposableElection) -> Self {
        Election::Composable(election)
    }
}

impl ElectionProcess for Election {
    fn name(&self) -> String {
        self.process().name()
    }

    fn run(&self, candidates: &[Arc<Candidate>], ballots: &[Ballot]) -> Result<Outcome> {
        self.process().run(candidates, ballots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Party, Voter};
    use crate::primary::{ClosedPrimaryConfig, OpenPrimaryConfig};
    use crate::result::ElectionResult;

    #[test]
    fn test_general_rule_names() {
        let names: Vec<String> = GeneralRule::all().iter().map(|r| r.name()).collect();
        assert_eq!(
            names,
            vec![
                "simplePlurality",
                "pluralityWithRunoff",
                "instantRunoff",
                "condorcet",
                "headToHead",
            ]
        );
    }

    #[test]
    fn test_primary_rule_names() {
        let closed: PrimaryRule = ClosedPrimary::new(ClosedPrimaryConfig::default()).into();
        let open: PrimaryRule = OpenPrimary::new(OpenPrimaryConfig::default()).into();
        let top: PrimaryRule = TopNPrimary::new(3).into();
        assert_eq!(closed.name(), "closedPrimary");
        assert_eq!(open.name(), "openPrimary");
        assert_eq!(top.name(), "top3Primary");
    }

    #[test]
    fn test_dispatch_matches_direct_count() {
        let a = Candidate::builder("A", Party::Independent).shared();
        let b = Candidate::builder("B", Party::Independent).shared();
        let voter = Voter::new(Party::Independent, 0.0);
        let ballots = vec![
            Ballot::new(voter, vec![a.clone(), b.clone()]),
            Ballot::new(voter, vec![b.clone(), a.clone()]),
            Ballot::new(voter, vec![b.clone(), a.clone()]),
        ];
        let slate = vec![a.clone(), b.clone()];

        let direct = SimplePlurality::new().count(&slate, &ballots).unwrap();
        let election = Election::from(GeneralRule::plurality().with_debug(true));
        let outcome = election
            .run_definition(&ElectionDefinition::new(slate, ballots))
            .unwrap();

        match outcome {
            Outcome::Plurality(result) => assert_eq!(result, direct),
            other => panic!("unexpected outcome {}", other.kind()),
        }
    }
}
