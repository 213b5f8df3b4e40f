//! Fixed-width numeric feature vectors and the builder that produces them.
//!
//! A feature vector is laid out as `[latitude, longitude, one-hot categories
//! ..., stars]`. The identifier never appears inside the numeric payload; it
//! travels alongside it in [`Candidate`].

use std::fmt;

use crate::{BusinessRecord, Candidate, CategorySchema, RawRecord, RecordError};

/// Leading dimensions holding latitude and longitude.
pub const GEO_DIMENSIONS: usize = 2;

/// Trailing dimensions holding the star rating.
pub const RATING_DIMENSIONS: usize = 1;

/// Ordered numeric payload compared by similarity functions.
///
/// `Display` renders the values comma-separated, which is also the grouped
/// pipeline's key encoding.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct FeatureVector(Vec<f64>);

impl FeatureVector {
    /// Wrap raw values.
    #[must_use]
    pub const fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    /// Borrow the values.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Number of dimensions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Report whether the vector has no dimensions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Report whether every component is exactly zero.
    ///
    /// An empty vector counts as zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|value| *value == 0.0_f64)
    }

    /// Consume the wrapper and return the values.
    #[must_use]
    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }
}

impl From<Vec<f64>> for FeatureVector {
    fn from(values: Vec<f64>) -> Self {
        Self(values)
    }
}

impl FromIterator<f64> for FeatureVector {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl AsRef<[f64]> for FeatureVector {
    fn as_ref(&self) -> &[f64] {
        &self.0
    }
}

impl fmt::Display for FeatureVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut values = self.0.iter();
        if let Some(first) = values.next() {
            write!(f, "{first}")?;
        }
        for value in values {
            write!(f, ",{value}")?;
        }
        Ok(())
    }
}

/// Assemble [`Candidate`]s from business records under a category schema.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use poirec_core::{BusinessRecord, CategorySchema, FeatureBuilder};
///
/// let schema = CategorySchema::new(["Food", "Italian", "Shopping"]).unwrap();
/// let builder = FeatureBuilder::new(&schema);
/// let record = BusinessRecord::new("b-1", Coord { x: -119.7, y: 34.4 }, "Italian", 4.5);
///
/// let candidate = builder.build(&record);
/// assert_eq!(candidate.id, "b-1");
/// assert_eq!(candidate.features.as_slice(), &[34.4, -119.7, 0.0, 1.0, 0.0, 4.5]);
/// assert_eq!(builder.dimension(), 6);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FeatureBuilder<'schema> {
    schema: &'schema CategorySchema,
}

impl<'schema> FeatureBuilder<'schema> {
    /// Create a builder over `schema`.
    #[must_use]
    pub const fn new(schema: &'schema CategorySchema) -> Self {
        Self { schema }
    }

    /// Schema used for category encoding.
    #[must_use]
    pub const fn schema(&self) -> &'schema CategorySchema {
        self.schema
    }

    /// Length of every vector this builder produces.
    #[must_use]
    pub fn dimension(&self) -> usize {
        GEO_DIMENSIONS + self.schema.len() + RATING_DIMENSIONS
    }

    /// Vectorise a validated record.
    #[must_use]
    pub fn build(&self, record: &BusinessRecord) -> Candidate {
        let mut values = Vec::with_capacity(self.dimension());
        values.push(record.latitude());
        values.push(record.longitude());
        values.extend(self.schema.encode(&record.categories));
        values.push(record.stars);
        Candidate::new(record.id.clone(), FeatureVector::new(values))
    }

    /// Validate and vectorise a raw record.
    ///
    /// # Errors
    /// Returns [`RecordError::MissingField`] when a required field is absent
    /// and [`RecordError::MalformedNumber`] when latitude, longitude, or
    /// stars is not a finite number.
    pub fn build_raw(&self, raw: &RawRecord) -> Result<Candidate, RecordError> {
        BusinessRecord::try_from(raw).map(|record| self.build(&record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RecordField;
    use geo::Coord;
    use rstest::rstest;

    #[rstest]
    fn builds_vector_of_schema_width() {
        let schema = CategorySchema::shared();
        let builder = FeatureBuilder::new(schema);
        let record = BusinessRecord::new("x", Coord { x: 1.0, y: 2.0 }, "Bars, Unknown", 3.0);

        let candidate = builder.build(&record);

        assert_eq!(candidate.features.len(), 28);
        assert_eq!(candidate.features.len(), builder.dimension());
        assert_eq!(candidate.features.as_slice().first(), Some(&2.0));
        assert_eq!(candidate.features.as_slice().get(1), Some(&1.0));
        assert_eq!(candidate.features.as_slice().get(25), Some(&1.0));
        assert_eq!(candidate.features.as_slice().last(), Some(&3.0));
    }

    #[rstest]
    fn raw_build_propagates_missing_fields() {
        let schema = CategorySchema::shared();
        let raw = RawRecord::new()
            .with_field(RecordField::BusinessId, "x")
            .with_field(RecordField::Longitude, "1.0")
            .with_field(RecordField::Categories, "Food")
            .with_field(RecordField::Stars, "2.0");

        let err = FeatureBuilder::new(schema)
            .build_raw(&raw)
            .expect_err("latitude missing");

        assert_eq!(
            err,
            RecordError::MissingField {
                field: RecordField::Latitude
            }
        );
    }

    #[rstest]
    #[case(vec![], true)]
    #[case(vec![0.0, 0.0], true)]
    #[case(vec![0.0, -0.0], true)]
    #[case(vec![0.0, 1e-300], false)]
    fn detects_zero_vectors(#[case] values: Vec<f64>, #[case] expected: bool) {
        assert_eq!(FeatureVector::new(values).is_zero(), expected);
    }

    #[rstest]
    #[case(vec![], "")]
    #[case(vec![1.0], "1")]
    #[case(vec![34.426_678_7, -119.711_196_8, 0.0, 5.0], "34.4266787,-119.7111968,0,5")]
    fn displays_comma_separated(#[case] values: Vec<f64>, #[case] expected: &str) {
        assert_eq!(FeatureVector::new(values).to_string(), expected);
    }
}
