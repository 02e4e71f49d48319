//! Party tags and their default affinity tables.

use std::collections::BTreeMap;
use std::fmt;

/// Affinity a party's candidates enjoy among the party's own voters.
pub const PARTY_AFFINITY: f64 = 1.5;

/// A party or voter group on the one-dimensional spectrum.
///
/// Ordering follows the short name, which keeps affinity maps and any
/// derived hashes stable across runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Party {
    Democratic,
    Independent,
    Republican,
}

impl Party {
    /// All groups, in short-name order.
    pub const ALL: [Party; 3] = [Party::Democratic, Party::Independent, Party::Republican];

    /// Three-letter tag used in candidate names and traces.
    pub fn short_name(self) -> &'static str {
        match self {
            Party::Democratic => "Dem",
            Party::Independent => "Ind",
            Party::Republican => "Rep",
        }
    }

    /// Looks a party up by its short name.
    pub fn from_short_name(short: &str) -> Option<Party> {
        Party::ALL.into_iter().find(|p| p.short_name() == short)
    }

    /// Whether this is one of the two parties holding partisan primaries.
    pub fn is_major(self) -> bool {
        !matches!(self, Party::Independent)
    }

    /// Direction a primary electorate of this party is pushed.
    ///
    /// Democrats move left (−1), Republicans right (+1), independents stay put.
    pub fn skew_sign(self) -> f64 {
        match self {
            Party::Democratic => -1.0,
            Party::Independent => 0.0,
            Party::Republican => 1.0,
        }
    }

    /// Default affinity a candidate of this party holds for each voter group.
    pub fn default_affinity(self) -> BTreeMap<Party, f64> {
        let half = PARTY_AFFINITY / 2.0;
        let (dem, ind, rep) = match self {
            Party::Democratic => (PARTY_AFFINITY, half, 0.0),
            Party::Independent => (0.0, half, 0.0),
            Party::Republican => (0.0, half, PARTY_AFFINITY),
        };
        BTreeMap::from([
            (Party::Democratic, dem),
            (Party::Independent, ind),
            (Party::Republican, rep),
        ])
    }
}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Party::Democratic => "Democratic",
            Party::Independent => "Independent",
            Party::Republican => "Republican",
        };
        f.write_str(name)
    }
}
