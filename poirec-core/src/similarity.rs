//! Compare feature vectors.
//!
//! The `Similarity` trait scores a candidate's
//! [`FeatureVector`](crate::FeatureVector) against a reference vector.
//! Rankers are generic over it so alternative measures can be plugged in.

use thiserror::Error;

use crate::FeatureVector;

/// Two vectors of different lengths were compared.
///
/// Feature vectors built under one schema always share a length, so this
/// signals a construction bug upstream rather than bad input data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cannot compare vectors of length {left} and {right}")]
pub struct DimensionMismatch {
    /// Length of the left-hand vector.
    pub left: usize,
    /// Length of the right-hand vector.
    pub right: usize,
}

impl DimensionMismatch {
    /// Succeed when both slices have the same length.
    ///
    /// # Errors
    /// Returns the mismatch when the lengths differ.
    pub const fn check(left: &[f64], right: &[f64]) -> Result<(), Self> {
        if left.len() == right.len() {
            Ok(())
        } else {
            Err(Self {
                left: left.len(),
                right: right.len(),
            })
        }
    }
}

/// Score how closely a candidate matches a reference vector.
///
/// Higher values mean a closer match. Implementations must be thread-safe
/// (`Send` + `Sync`) so independent groups can be ranked concurrently, and
/// must be deterministic for identical inputs.
///
/// # Examples
///
/// ```rust
/// use poirec_core::{DimensionMismatch, FeatureVector, Similarity};
///
/// struct DotProduct;
///
/// impl Similarity for DotProduct {
///     fn similarity(
///         &self,
///         reference: &FeatureVector,
///         candidate: &FeatureVector,
///     ) -> Result<f64, DimensionMismatch> {
///         DimensionMismatch::check(reference.as_slice(), candidate.as_slice())?;
///         Ok(reference
///             .as_slice()
///             .iter()
///             .zip(candidate.as_slice())
///             .map(|(a, b)| a * b)
///             .sum())
///     }
/// }
///
/// let a = FeatureVector::new(vec![1.0, 2.0]);
/// let b = FeatureVector::new(vec![3.0, 4.0]);
/// assert_eq!(DotProduct.similarity(&a, &b), Ok(11.0));
/// ```
pub trait Similarity: Send + Sync {
    /// Return the similarity between `reference` and `candidate`.
    ///
    /// # Errors
    /// Returns [`DimensionMismatch`] when the vectors differ in length.
    fn similarity(
        &self,
        reference: &FeatureVector,
        candidate: &FeatureVector,
    ) -> Result<f64, DimensionMismatch>;
}
