//! Candidates.

use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use super::party::Party;
use crate::error::{ElectionError, Result};

/// A candidate on the ballot.
///
/// Immutable once built. Equality and hashing cover every field, floats
/// by bit pattern, so the same candidate seen from two pipeline stages
/// compares equal. Share it as `Arc<Candidate>`.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Candidate {
    name: String,
    party: Party,
    ideology: f64,
    quality: f64,
    incumbent: bool,
    affinity: BTreeMap<Party, f64>,
}

impl Candidate {
    /// Starts a builder with the party's default affinity snapshot.
    ///
    /// ```
    /// use u_election::model::{Candidate, Party};
    ///
    /// let c = Candidate::builder("D-1", Party::Democratic)
    ///     .ideology(-0.4)
    ///     .quality(0.2)
    ///     .build();
    /// assert_eq!(c.name(), "D-1");
    /// assert_eq!(c.affinity_for(Party::Democratic).unwrap(), 1.5);
    /// ```
    pub fn builder(name: impl Into<String>, party: Party) -> CandidateBuilder {
        CandidateBuilder {
            name: name.into(),
            party,
            ideology: 0.0,
            quality: 0.0,
            incumbent: false,
            affinity: party.default_affinity(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn party(&self) -> Party {
        self.party
    }

    /// Position on the one-dimensional ideological spectrum.
    pub fn ideology(&self) -> f64 {
        self.ideology
    }

    pub fn quality(&self) -> f64 {
        self.quality
    }

    pub fn incumbent(&self) -> bool {
        self.incumbent
    }

    /// The full affinity snapshot taken at construction.
    pub fn affinity(&self) -> &BTreeMap<Party, f64> {
        &self.affinity
    }

    /// Affinity toward voters of `party`.
    ///
    /// # Errors
    ///
    /// [`ElectionError::UnknownAffinity`] when the snapshot has no entry
    /// for `party`. Missing entries are a data-setup bug, never zero.
    pub fn affinity_for(&self, party: Party) -> Result<f64> {
        self.affinity
            .get(&party)
            .copied()
            .ok_or_else(|| ElectionError::UnknownAffinity {
                candidate: self.name.clone(),
                party,
            })
    }

    /// Compact `Dem:1.50 Ind:0.75` rendering for traces.
    pub fn affinity_string(&self) -> String {
        self.affinity
            .iter()
            .map(|(party, value)| format!("{}:{:.2}", party.short_name(), value))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.party == other.party
            && self.ideology.to_bits() == other.ideology.to_bits()
            && self.quality.to_bits() == other.quality.to_bits()
            && self.incumbent == other.incumbent
            && self.affinity.len() == other.affinity.len()
            && self
                .affinity
                .iter()
                .zip(other.affinity.iter())
                .all(|((pa, va), (pb, vb))| pa == pb && va.to_bits() == vb.to_bits())
    }
}

impl Eq for Candidate {}

impl Hash for Candidate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.party.hash(state);
        self.ideology.to_bits().hash(state);
        self.quality.to_bits().hash(state);
        self.incumbent.hash(state);
        for (party, value) in &self.affinity {
            party.hash(state);
            value.to_bits().hash(state);
        }
    }
}

/// Builder for [`Candidate`].
#[derive(Debug, Clone)]
pub struct CandidateBuilder {
    name: String,
    party: Party,
    ideology: f64,
    quality: f64,
    incumbent: bool,
    affinity: BTreeMap<Party, f64>,
}

impl CandidateBuilder {
    pub fn ideology(mut self, ideology: f64) -> Self {
        self.ideology = ideology;
        self
    }

    pub fn quality(mut self, quality: f64) -> Self {
        self.quality = quality;
        self
    }

    pub fn incumbent(mut self, incumbent: bool) -> Self {
        self.incumbent = incumbent;
        self
    }

    /// Overrides one entry of the affinity snapshot.
    pub fn affinity(mut self, party: Party, value: f64) -> Self {
        self.affinity.insert(party, value);
        self
    }

    /// Replaces the whole affinity snapshot.
    pub fn affinity_map(mut self, affinity: BTreeMap<Party, f64>) -> Self {
        self.affinity = affinity;
        self
    }

    pub fn build(self) -> Candidate {
        Candidate {
            name: self.name,
            party: self.party,
            ideology: self.ideology,
            quality: self.quality,
            incumbent: self.incumbent,
            affinity: self.affinity,
        }
    }

    /// Builds straight into the shared handle every process consumes.
    pub fn shared(self) -> Arc<Candidate> {
        Arc::new(self.build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_equality_is_by_value() {
        let a = Candidate::builder("R-1", Party::Republican).ideology(0.7).shared();
        let b = Candidate::builder("R-1", Party::Republican).ideology(0.7).shared();
        let c = Candidate::builder("R-1", Party::Republican).ideology(0.71).shared();

        assert_eq!(a, b);
        assert_ne!(a, c);

        let set: HashSet<Arc<Candidate>> = [a, b, c].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_affinity_override_does_not_touch_other_candidates() {
        let plain = Candidate::builder("D-1", Party::Democratic).build();
        let tweaked = Candidate::builder("D-2", Party::Democratic)
            .affinity(Party::Independent, 1.0)
            .build();

        assert!((plain.affinity_for(Party::Independent).unwrap() - 0.75).abs() < 1e-12);
        assert!((tweaked.affinity_for(Party::Independent).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_unknown_affinity_fails() {
        let c = Candidate::builder("I-1", Party::Independent)
            .affinity_map(BTreeMap::from([(Party::Independent, 0.75)]))
            .build();

        let err = c.affinity_for(Party::Democratic).unwrap_err();
        assert_eq!(
            err,
            ElectionError::UnknownAffinity {
                candidate: "I-1".into(),
                party: Party::Democratic
            }
        );
    }

    #[test]
    fn test_affinity_string() {
        let c = Candidate::builder("R-1", Party::Republican).build();
        assert_eq!(c.affinity_string(), "Dem:0.00 Ind:0.75 Rep:1.50");
    }
}
