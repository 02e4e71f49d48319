//! Primary stages that narrow a slate before the general election.
//!
//! - [`ClosedPrimary`]: each major party's registered voters pick its
//!   nominee, optionally with a polarizing skew
//! - [`OpenPrimary`]: voters join the primary of their top choice's party
//!   (semi-closed mode keeps major-party voters at home)
//! - [`TopNPrimary`]: one nonpartisan plurality count advancing `n`
//!
//! Candidates outside the two major parties bypass party primaries and
//! always advance.

mod closed;
mod config;
mod open;
mod party;
mod topn;

pub use closed::ClosedPrimary;
pub use config::{ClosedPrimaryConfig, OpenPrimaryConfig, PrimaryCounting};
pub use open::OpenPrimary;
pub use party::{PartyPrimaryResult, PrimaryKind};
pub use topn::{TopNPrimary, TopNPrimaryResult};
