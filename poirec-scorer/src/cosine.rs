//! Cosine similarity with a zero-vector guard.

use poirec_core::{DimensionMismatch, FeatureVector, Similarity};

/// Cosine similarity between feature vectors.
///
/// Returns `0.0` whenever either vector is all zeros instead of dividing by
/// a zero norm.
///
/// # Examples
/// ```
/// use poirec_core::{FeatureVector, Similarity};
/// use poirec_scorer::CosineSimilarity;
///
/// let a = FeatureVector::new(vec![1.0, 0.0]);
/// let b = FeatureVector::new(vec![0.0, 3.0]);
/// assert_eq!(CosineSimilarity.similarity(&a, &b), Ok(0.0));
/// assert_eq!(CosineSimilarity.similarity(&a, &a), Ok(1.0));
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CosineSimilarity;

impl Similarity for CosineSimilarity {
    fn similarity(
        &self,
        reference: &FeatureVector,
        candidate: &FeatureVector,
    ) -> Result<f64, DimensionMismatch> {
        cosine_similarity(reference.as_slice(), candidate.as_slice())
    }
}

/// Compute `dot(left, right) / (|left| * |right|)`.
///
/// Both vectors are first scaled by their largest absolute component, which
/// leaves the cosine unchanged and keeps the intermediate sums finite. The
/// result is clamped to `-1.0..=1.0` to absorb rounding.
///
/// # Errors
/// Returns [`DimensionMismatch`] when the slices differ in length.
#[expect(
    clippy::float_arithmetic,
    reason = "cosine similarity divides a dot product by the vector norms"
)]
pub fn cosine_similarity(left: &[f64], right: &[f64]) -> Result<f64, DimensionMismatch> {
    DimensionMismatch::check(left, right)?;
    let left_scale = max_abs(left);
    let right_scale = max_abs(right);
    if left_scale == 0.0 || right_scale == 0.0 {
        return Ok(0.0);
    }
    let (mut dot, mut left_sq, mut right_sq) = (0.0_f64, 0.0_f64, 0.0_f64);
    for (a, b) in left.iter().zip(right) {
        let x = a / left_scale;
        let y = b / right_scale;
        dot += x * y;
        left_sq += x * x;
        right_sq += y * y;
    }
    // A single square root keeps `cos(v, v)` at exactly 1.0.
    Ok((dot / (left_sq * right_sq).sqrt()).clamp(-1.0, 1.0))
}

fn max_abs(values: &[f64]) -> f64 {
    values.iter().fold(0.0_f64, |largest, value| largest.max(value.abs()))
}
