//! Composable election-rule engine.
//!
//! Counts ranked ballots under interchangeable rules and chains a primary
//! stage into a general stage:
//!
//! - **General rules** ([`general`]): simple plurality, plurality with a
//!   top-two runoff, instant-runoff voting, a pairwise Condorcet
//!   tournament with Copeland-style ranking, and ranked pairs (Tideman).
//! - **Primaries** ([`primary`]): closed party primaries (with optional
//!   ideological skew), open and semi-closed primaries, and nonpartisan
//!   top-N primaries.
//! - **Composition** ([`process`]): any primary feeding any general rule
//!   over the same ballots, scored with a voter-satisfaction metric
//!   ([`satisfaction`]).
//! - **Experiments** ([`experiment`]): seeded sweeps over partisan lean
//!   that run many processes on shared ballot sets.
//!
//! # Architecture
//!
//! Every rule implements [`process::ElectionProcess`] and is a pure
//! function of its candidates and ballots: randomness only enters through
//! an explicitly seeded [`model::NoiseSource`], so identical inputs give
//! bit-identical results. Diagnostic output goes through `tracing` and
//! is gated per process by a debug flag that never affects counts.

pub mod error;
pub mod experiment;
pub mod general;
pub mod model;
pub mod primary;
pub mod process;
pub mod result;
pub mod satisfaction;

pub use error::{ElectionError, Result};
