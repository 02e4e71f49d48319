//! Plurality with a top-two runoff.

use std::sync::Arc;

use tracing::debug;

use super::plurality::{PluralityResult, SimplePlurality};
use crate::error::Result;
use crate::model::{Ballot, Candidate};
use crate::process::{validate_ballots, ElectionProcess};
use crate::result::{CandidateResult, ElectionResult, Outcome};

/// First round plus the runoff, when one was held.
#[derive(Debug, Clone, PartialEq)]
pub struct RunoffResult {
    first_round: PluralityResult,
    runoff: Option<PluralityResult>,
}

impl RunoffResult {
    pub fn first_round(&self) -> &PluralityResult {
        &self.first_round
    }

    /// The two-candidate contest, if the first round had no majority.
    pub fn runoff(&self) -> Option<&PluralityResult> {
        self.runoff.as_ref()
    }

    /// The count that decides the election.
    pub fn final_round(&self) -> &PluralityResult {
        self.runoff.as_ref().unwrap_or(&self.first_round)
    }
}

impl ElectionResult for RunoffResult {
    fn kind(&self) -> &'static str {
        "pluralityWithRunoff"
    }

    fn ordered_results(&self) -> &[CandidateResult] {
        self.final_round().ordered_results()
    }

    fn voter_satisfaction(&self) -> f64 {
        self.final_round().voter_satisfaction()
    }

    fn n_votes(&self) -> f64 {
        self.final_round().n_votes()
    }
}

/// Plurality, then a rerun between the top two unless the leader holds
/// a strict majority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PluralityWithRunoff {
    debug: bool,
}

impl PluralityWithRunoff {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn count(&self, candidates: &[Arc<Candidate>], ballots: &[Ballot]) -> Result<RunoffResult> {
        validate_ballots(ballots)?;
        Ok(self.tally(candidates, ballots))
    }

    pub(crate) fn tally(&self, candidates: &[Arc<Candidate>], ballots: &[Ballot]) -> RunoffResult {
        let plurality = SimplePlurality::new().with_debug(self.debug);
        let first_round = plurality.tally(candidates, ballots);

        if first_round.leader_share().is_some_and(|share| share > 0.5) {
            return RunoffResult {
                first_round,
                runoff: None,
            };
        }

        let finalists: Vec<Arc<Candidate>> = match first_round.ordered_results() {
            [first, second, ..] => vec![first.candidate.clone(), second.candidate.clone()],
            _ => {
                return RunoffResult {
                    first_round,
                    runoff: None,
                }
            }
        };

        if self.debug {
            debug!(
                first = finalists[0].name(),
                second = finalists[1].name(),
                "no majority, running top-two runoff"
            );
        }

        let runoff = plurality.tally(&finalists, ballots);
        RunoffResult {
            first_round,
            runoff: Some(runoff),
        }
    }
}

impl ElectionProcess for PluralityWithRunoff {
    fn name(&self) -> String {
        "pluralityWithRunoff".into()
    }

    fn run(&self, candidates: &[Arc<Candidate>], ballots: &[Ballot]) -> Result<Outcome> {
        self.count(candidates, ballots).map(Outcome::Runoff)
    }
}
