//! Running elections: the process contract, rule dispatch, and the
//! primary-to-general pipeline.
//!
//! [`ElectionProcess`] is the single entry point. Concrete rules
//! implement it directly; [`GeneralRule`], [`PrimaryRule`] and
//! [`Election`] wrap them as closed sets so callers can hold any
//! configured election by value.

mod composable;
mod election;
mod types;

pub use composable::{ComposableElection, ComposableResult};
pub use election::{Election, GeneralRule, PrimaryRule};
pub use types::ElectionProcess;

pub(crate) use types::{total_weight, validate_ballots, validate_slate};
