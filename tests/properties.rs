//! Property tests for the counting rules.

use std::sync::Arc;

use proptest::prelude::*;
use u_election::general::{
    CondorcetElection, HeadToHeadElection, InstantRunoffElection, PluralityWithRunoff,
    SimplePlurality,
};
use u_election::model::{Ballot, Candidate, Party, Voter};
use u_election::primary::{ClosedPrimary, OpenPrimary};
use u_election::result::ElectionResult;
use u_election::satisfaction::voter_satisfaction;

const NAMES: [&str; 6] = ["A", "B", "C", "D", "E", "F"];

fn slate(n: usize) -> Vec<Arc<Candidate>> {
    (0..n)
        .map(|i| {
            let party = if i % 2 == 0 {
                Party::Democratic
            } else {
                Party::Republican
            };
            Candidate::builder(NAMES[i], party)
                .ideology(i as f64 - 2.5)
                .shared()
        })
        .collect()
}

/// A ranking over a prefix of a shuffled slate, plus a weight.
fn ranking(n: usize) -> impl Strategy<Value = (Vec<usize>, f64)> {
    (
        Just((0..n).collect::<Vec<usize>>()).prop_shuffle(),
        0..=n,
        prop_oneof![Just(1.0), Just(0.5), Just(2.0)],
    )
        .prop_map(|(order, len, weight)| (order[..len].to_vec(), weight))
}

fn election() -> impl Strategy<Value = (usize, Vec<(Vec<usize>, f64)>)> {
    (1usize..=6).prop_flat_map(|n| (Just(n), prop::collection::vec(ranking(n), 0..40)))
}

fn ballots(slate: &[Arc<Candidate>], raw: &[(Vec<usize>, f64)]) -> Vec<Ballot> {
    raw.iter()
        .map(|(order, weight)| {
            let party = order
                .first()
                .map(|&i| slate[i].party())
                .unwrap_or(Party::Independent);
            let ranking = order.iter().map(|&i| slate[i].clone()).collect();
            Ballot::new(Voter::new(party, 0.0), ranking).with_weight(*weight)
        })
        .collect()
}

proptest! {
    #[test]
    fn plurality_lists_every_candidate_and_counts_every_ranked_ballot((n, raw) in election()) {
        let slate = slate(n);
        let ballots = ballots(&slate, &raw);
        let result = SimplePlurality::new().count(&slate, &ballots).unwrap();

        prop_assert_eq!(result.ordered_results().len(), n);
        let counted: f64 = result.ordered_results().iter().map(|r| r.votes).sum();
        let ranked: f64 = ballots
            .iter()
            .filter(|b| !b.ranking().is_empty())
            .map(|b| b.weight())
            .sum();
        prop_assert_eq!(counted, ranked);
        for pair in result.ordered_results().windows(2) {
            prop_assert!(pair[0].votes >= pair[1].votes);
        }
    }

    #[test]
    fn irv_terminates_within_slate_size((n, raw) in election()) {
        let slate = slate(n);
        let ballots = ballots(&slate, &raw);
        let result = InstantRunoffElection::new().count(&slate, &ballots).unwrap();

        prop_assert!(!result.rounds().is_empty());
        prop_assert!(result.rounds().len() <= n);
        for pair in result.rounds().windows(2) {
            prop_assert_eq!(pair[1].active.len() + 1, pair[0].active.len());
        }
    }

    #[test]
    fn irv_winner_has_half_the_round_or_stands_alone((n, raw) in election()) {
        let slate = slate(n);
        let ballots = ballots(&slate, &raw);
        let result = InstantRunoffElection::new().count(&slate, &ballots).unwrap();

        let last = result.final_round().unwrap();
        let round_votes: f64 = last.results.iter().map(|r| r.votes).sum();
        let leader = last.results[0].votes;
        prop_assert!(last.active.len() == 1 || 2.0 * leader >= round_votes);
        prop_assert_eq!(result.winner().unwrap(), &last.results[0].candidate);
    }

    #[test]
    fn runoff_skipped_on_strict_majority((n, raw) in election()) {
        let slate = slate(n);
        let ballots = ballots(&slate, &raw);
        let first = SimplePlurality::new().count(&slate, &ballots).unwrap();
        let result = PluralityWithRunoff::new().count(&slate, &ballots).unwrap();

        prop_assert_eq!(result.first_round(), &first);
        if first.leader_share().is_some_and(|share| share > 0.5) {
            prop_assert!(result.runoff().is_none());
            prop_assert_eq!(result.ordered_results(), first.ordered_results());
        }
    }

    #[test]
    fn condorcet_is_deterministic((n, raw) in election()) {
        let slate = slate(n);
        let ballots = ballots(&slate, &raw);
        let a = CondorcetElection::new().count(&slate, &ballots).unwrap();
        let b = CondorcetElection::new().with_debug(true).count(&slate, &ballots).unwrap();

        prop_assert_eq!(&a, &b);
        prop_assert_eq!(a.comparisons().len(), n * (n - 1) / 2);
        prop_assert!(a.winner().is_ok());
    }

    #[test]
    fn condorcet_cycle_picks_same_winner_for_any_slate_order(
        order in Just(vec![0usize, 1, 2]).prop_shuffle(),
        k in 1usize..5,
    ) {
        let base = slate(3);
        let (a, b, c) = (&base[0], &base[1], &base[2]);
        let cycle = [[a, b, c], [b, c, a], [c, a, b]];
        let mut ballots = Vec::new();
        for ranking in &cycle {
            for _ in 0..k {
                let ranking: Vec<Arc<Candidate>> = ranking.iter().map(|c| (*c).clone()).collect();
                ballots.push(Ballot::new(Voter::new(Party::Independent, 0.0), ranking));
            }
        }
        let shuffled: Vec<Arc<Candidate>> = order.iter().map(|&i| base[i].clone()).collect();

        let result = CondorcetElection::new().count(&shuffled, &ballots).unwrap();
        prop_assert_eq!(result.winner().unwrap().name(), "A");
    }

    #[test]
    fn head_to_head_places_every_candidate_once((n, raw) in election()) {
        let slate = slate(n);
        let ballots = ballots(&slate, &raw);
        let result = HeadToHeadElection::new().count(&slate, &ballots).unwrap();

        prop_assert_eq!(result.ordered_results().len(), n);
        prop_assert_eq!(result.pairs().len(), n * (n - 1) / 2);
        for candidate in &slate {
            let placements = result
                .ordered_results()
                .iter()
                .filter(|r| &r.candidate == candidate)
                .count();
            prop_assert_eq!(placements, 1);
        }
        for pair in result.pairs().windows(2) {
            prop_assert!(pair[0].margin() >= pair[1].margin());
        }
    }

    #[test]
    fn head_to_head_places_a_condorcet_winner_first((n, raw) in election()) {
        let slate = slate(n);
        let ballots = ballots(&slate, &raw);
        let result = HeadToHeadElection::new().count(&slate, &ballots).unwrap();

        let prefs = result.preferences();
        let beats_all = (0..n).find(|&i| (0..n).all(|j| j == i || prefs[i][j] > prefs[j][i]));
        if let Some(i) = beats_all {
            prop_assert_eq!(result.winner().unwrap(), &slate[i]);
        }
    }

    #[test]
    fn closed_and_open_agree_on_party_line_ballots((n, raw) in election()) {
        prop_assume!(n >= 2);
        let slate = slate(n);
        // Voter party follows the top choice, so nobody crosses over.
        let raw: Vec<(Vec<usize>, f64)> =
            raw.into_iter().filter(|(order, _)| !order.is_empty()).collect();
        let ballots = ballots(&slate, &raw);

        let closed = ClosedPrimary::default().count(&slate, &ballots).unwrap();
        let open = OpenPrimary::default().count(&slate, &ballots).unwrap();

        prop_assert_eq!(closed.democratic_winner(), open.democratic_winner());
        prop_assert_eq!(closed.republican_winner(), open.republican_winner());
        prop_assert_eq!(closed.final_candidates(), open.final_candidates());
    }

    #[test]
    fn satisfaction_stays_in_unit_interval(
        ideologies in prop::collection::vec(-3.0f64..3.0, 1..60),
        winner_ideology in -4.0f64..4.0,
    ) {
        let voters: Vec<Voter> =
            ideologies.iter().map(|&x| Voter::new(Party::Independent, x)).collect();
        let winner = Candidate::builder("W", Party::Independent).ideology(winner_ideology).build();
        let s = voter_satisfaction(&winner, &voters).unwrap();
        prop_assert!((0.0..=1.0).contains(&s));
    }

    #[test]
    fn satisfaction_is_one_at_the_split(half in 1usize..30) {
        let mut voters = vec![Voter::new(Party::Democratic, -1.0); half];
        voters.extend(vec![Voter::new(Party::Republican, 1.0); half]);
        let winner = Candidate::builder("W", Party::Independent).ideology(0.0).build();
        prop_assert_eq!(voter_satisfaction(&winner, &voters).unwrap(), 1.0);
    }
}
