//! General-election rules.
//!
//! Each rule counts ranked ballots over a slate and produces the final
//! ranked result:
//!
//! - [`SimplePlurality`]: first choices among the slate; the base counter
//! - [`PluralityWithRunoff`]: plurality, then a top-two rerun without a
//!   strict majority
//! - [`InstantRunoffElection`]: last-place elimination until a majority
//! - [`CondorcetElection`]: pairwise tournament with Copeland-style ranking
//! - [`HeadToHeadElection`]: ranked pairs over full ballot preferences
//!
//! Run standalone, these rules report neutral satisfaction; the
//! composition layer scores satisfaction from the general-stage winner.
//!
//! # References
//!
//! - Hare (1859), *Treatise on the Election of Representatives*
//! - Copeland (1951), "A reasonable social welfare function"
//! - Tideman (1987), "Independence of clones as a criterion for voting rules"

mod condorcet;
mod head_to_head;
mod irv;
mod plurality;
mod runoff;

pub use condorcet::{CondorcetElection, CondorcetResult, PairwiseComparison};
pub use head_to_head::{HeadToHeadElection, HeadToHeadResult, RankedPair};
pub use irv::{InstantRunoffElection, InstantRunoffResult, IrvRound};
pub use plurality::{PluralityResult, SimplePlurality};
pub use runoff::{PluralityWithRunoff, RunoffResult};
