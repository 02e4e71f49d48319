//! Primary-stage configuration.

use crate::model::BallotConfig;

/// Counting method used inside each party's primary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PrimaryCounting {
    /// Single plurality count.
    #[default]
    SimplePlurality,
    /// Plurality with a top-two runoff.
    PluralityWithRunoff,
}

impl PrimaryCounting {
    /// `PluralityWithRunoff` when `use_runoff`, otherwise `SimplePlurality`.
    pub fn from_runoff_flag(use_runoff: bool) -> Self {
        if use_runoff {
            PrimaryCounting::PluralityWithRunoff
        } else {
            PrimaryCounting::SimplePlurality
        }
    }
}

/// Configuration for [`ClosedPrimary`](super::ClosedPrimary).
///
/// # Examples
///
/// ```
/// use u_election::primary::{ClosedPrimaryConfig, PrimaryCounting};
///
/// let config = ClosedPrimaryConfig::default()
///     .with_counting(PrimaryCounting::PluralityWithRunoff)
///     .with_skew(0.5)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClosedPrimaryConfig {
    pub counting: PrimaryCounting,

    /// Ideological offset applied to each party's primary electorate:
    /// subtracted for Democrats, added for Republicans.
    ///
    /// Zero reuses the existing ballots; a positive skew regenerates them.
    pub skew: f64,

    /// Noise used when regenerating skewed ballots.
    pub ballot: BallotConfig,

    /// Seed of the noise source used when regenerating skewed ballots.
    pub seed: u64,
}

impl Default for ClosedPrimaryConfig {
    fn default() -> Self {
        Self {
            counting: PrimaryCounting::SimplePlurality,
            skew: 0.0,
            ballot: BallotConfig::default(),
            seed: 0,
        }
    }
}

impl ClosedPrimaryConfig {
    pub fn with_counting(mut self, counting: PrimaryCounting) -> Self {
        self.counting = counting;
        self
    }

    pub fn with_skew(mut self, skew: f64) -> Self {
        self.skew = skew;
        self
    }

    pub fn with_ballot_config(mut self, ballot: BallotConfig) -> Self {
        self.ballot = ballot;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if !self.skew.is_finite() || self.skew < 0.0 {
            return Err("skew must be finite and non-negative".into());
        }
        self.ballot.validate()
    }
}

/// Configuration for [`OpenPrimary`](super::OpenPrimary).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OpenPrimaryConfig {
    pub counting: PrimaryCounting,

    /// Keeps major-party voters inside their own party's primary.
    ///
    /// A Democrat whose top choice is a Republican casts no primary vote
    /// (and vice versa); independents still follow their top choice.
    pub semi_closed: bool,
}

impl OpenPrimaryConfig {
    pub fn with_counting(mut self, counting: PrimaryCounting) -> Self {
        self.counting = counting;
        self
    }

    pub fn with_semi_closed(mut self, semi_closed: bool) -> Self {
        self.semi_closed = semi_closed;
        self
    }
}
