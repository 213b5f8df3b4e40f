//! Candidates, scored candidates, and reference vectors.

use crate::FeatureVector;

/// A business identifier paired with its feature vector.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Candidate {
    /// Business identifier.
    pub id: String,
    /// Numeric payload.
    pub features: FeatureVector,
}

impl Candidate {
    /// Pair an identifier with its features.
    pub fn new(id: impl Into<String>, features: impl Into<FeatureVector>) -> Self {
        Self {
            id: id.into(),
            features: features.into(),
        }
    }
}

/// A candidate together with its similarity to a reference vector.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoredCandidate {
    /// Similarity to the reference vector.
    pub similarity: f64,
    /// Business identifier.
    pub id: String,
    /// Numeric payload.
    pub features: FeatureVector,
}

impl ScoredCandidate {
    /// Attach a similarity score to `candidate`.
    #[must_use]
    pub fn new(candidate: Candidate, similarity: f64) -> Self {
        let Candidate { id, features } = candidate;
        Self {
            similarity,
            id,
            features,
        }
    }

    /// Drop the score and return the underlying candidate.
    #[must_use]
    pub fn into_candidate(self) -> Candidate {
        Candidate::new(self.id, self.features)
    }
}

/// A labelled user profile that candidates are ranked against.
///
/// # Examples
/// ```
/// use poirec_core::ReferenceVector;
///
/// let reference = ReferenceVector::new("weekend", vec![10.0, 10.0, 1.0, 5.0]);
/// assert_eq!(reference.dimension(), 4);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReferenceVector {
    /// Human-readable profile name used in output.
    pub label: String,
    /// Profile features, shaped like a candidate's.
    pub features: FeatureVector,
}

impl ReferenceVector {
    /// Label a feature vector.
    pub fn new(label: impl Into<String>, features: impl Into<FeatureVector>) -> Self {
        Self {
            label: label.into(),
            features: features.into(),
        }
    }

    /// Number of dimensions.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.features.len()
    }
}
