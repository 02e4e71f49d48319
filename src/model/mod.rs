//! Inputs consumed by the election engine.
//!
//! - [`Candidate`] and [`Party`]: the slate and its affinity snapshots
//! - [`Voter`], [`Ballot`], [`BallotConfig`]: ranked preferences and how
//!   they are derived from ideology, affinity, quality, and noise
//! - [`Population`]: Gaussian voter groups sampled into an electorate
//! - [`NoiseSource`]: the seeded randomness behind all of the above
//! - [`ElectionDefinition`]: one trial's slate plus ballots

mod ballot;
mod candidate;
mod definition;
mod noise;
mod party;
mod population;
mod voter;

pub use ballot::Ballot;
pub use candidate::{Candidate, CandidateBuilder};
pub use definition::ElectionDefinition;
pub use noise::{create_rng, NoiseSource};
pub use party::{Party, PARTY_AFFINITY};
pub use population::{Population, PopulationGroup};
pub use voter::{BallotConfig, Voter};
