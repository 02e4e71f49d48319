//! Crate-wide error type.
//!
//! Every variant is a contract violation by the calling simulation driver.
//! None of them is retried or degraded; they propagate to the caller as-is.

use thiserror::Error;

use crate::model::Party;

/// Errors raised by election processes and their inputs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ElectionError {
    /// A winner was requested from a result holding no candidates.
    #[error("no candidates in {process} result")]
    EmptyResult {
        /// Name of the process (or result kind) that came back empty.
        process: String,
    },

    /// A candidate was asked for its affinity toward a group it has no entry for.
    #[error("candidate {candidate} has no affinity for {party}")]
    UnknownAffinity { candidate: String, party: Party },

    /// A ballot handed to a process is structurally unsound.
    #[error("ballot {index} is invalid: {reason}")]
    InvalidBallot { index: usize, reason: String },

    /// Satisfaction was requested over an electorate with no voters.
    #[error("cannot score satisfaction over an empty electorate")]
    EmptyElectorate,

    /// A process or experiment was configured with unusable parameters.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Shorthand for results carrying an [`ElectionError`].
pub type Result<T> = std::result::Result<T, ElectionError>;
