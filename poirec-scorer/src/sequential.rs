//! Single-pass ranking of a record stream against every reference vector.

use log::{info, warn};
use poirec_core::{
    Candidate, CategorySchema, FeatureBuilder, RawRecord, RecordField, ReferenceVector,
    ScoredCandidate, Similarity,
};

use crate::{
    CosineSimilarity, ProfileRanking, RankingError, RankingReport, RankingStats, TopKSelector,
};

struct ProfileSlot {
    reference: ReferenceVector,
    selector: TopKSelector,
}

/// Rank candidates against every reference vector in one pass.
///
/// Each reference vector owns an independent [`TopKSelector`]. Records that
/// fail validation are logged at `warn` and counted as skipped.
///
/// # Examples
/// ```
/// use poirec_core::{CategorySchema, RawRecord, RecordField, ReferenceVector};
/// use poirec_scorer::SequentialRanker;
///
/// let schema = CategorySchema::new(["Food"]).unwrap();
/// let reference = ReferenceVector::new("near", vec![1.0, 1.0, 1.0, 5.0]);
/// let mut ranker = SequentialRanker::new(&schema, vec![reference], 1).unwrap();
///
/// let record = RawRecord::new()
///     .with_field(RecordField::BusinessId, "b-1")
///     .with_field(RecordField::Latitude, "1")
///     .with_field(RecordField::Longitude, "1")
///     .with_field(RecordField::Categories, "Food")
///     .with_field(RecordField::Stars, "5");
/// ranker.offer_raw(&record).unwrap();
///
/// let report = ranker.finish();
/// assert_eq!(report.rankings[0].results[0].id, "b-1");
/// ```
pub struct SequentialRanker<'schema, S = CosineSimilarity> {
    builder: FeatureBuilder<'schema>,
    similarity: S,
    profiles: Vec<ProfileSlot>,
    stats: RankingStats,
}

impl<'schema> SequentialRanker<'schema, CosineSimilarity> {
    /// Create a cosine-similarity ranker.
    ///
    /// # Errors
    /// Returns [`RankingError::ReferenceDimension`] when a reference vector
    /// is not shaped like the vectors `schema` produces.
    pub fn new(
        schema: &'schema CategorySchema,
        references: Vec<ReferenceVector>,
        top_k: usize,
    ) -> Result<Self, RankingError> {
        Self::with_similarity(schema, references, top_k, CosineSimilarity)
    }
}

impl<'schema, S: Similarity> SequentialRanker<'schema, S> {
    /// Create a ranker using a custom similarity measure.
    ///
    /// # Errors
    /// Returns [`RankingError::ReferenceDimension`] when a reference vector
    /// is not shaped like the vectors `schema` produces.
    pub fn with_similarity(
        schema: &'schema CategorySchema,
        references: Vec<ReferenceVector>,
        top_k: usize,
        similarity: S,
    ) -> Result<Self, RankingError> {
        let builder = FeatureBuilder::new(schema);
        validate_references(&builder, &references)?;
        let profiles = references
            .into_iter()
            .map(|reference| ProfileSlot {
                reference,
                selector: TopKSelector::new(top_k),
            })
            .collect();
        Ok(Self {
            builder,
            similarity,
            profiles,
            stats: RankingStats::default(),
        })
    }

    /// Validate, vectorise, and offer a raw record.
    ///
    /// Invalid records are logged and skipped rather than reported.
    ///
    /// # Errors
    /// Returns [`RankingError::Dimension`] when the similarity measure
    /// rejects the vectors.
    pub fn offer_raw(&mut self, raw: &RawRecord) -> Result<(), RankingError> {
        match self.builder.build_raw(raw) {
            Ok(candidate) => self.offer(&candidate),
            Err(err) => {
                warn!(
                    "skipping business {}: {err}",
                    raw.get(RecordField::BusinessId).unwrap_or("<unidentified>")
                );
                self.stats.skipped = self.stats.skipped.saturating_add(1);
                Ok(())
            }
        }
    }

    /// Offer an already vectorised candidate to every reference vector.
    ///
    /// # Errors
    /// Returns [`RankingError::Dimension`] when `candidate` is not shaped
    /// like the reference vectors.
    pub fn offer(&mut self, candidate: &Candidate) -> Result<(), RankingError> {
        for slot in &mut self.profiles {
            let similarity = self
                .similarity
                .similarity(&slot.reference.features, &candidate.features)?;
            if slot.selector.admits(similarity) {
                slot.selector
                    .insert(ScoredCandidate::new(candidate.clone(), similarity));
            }
        }
        self.stats.accepted = self.stats.accepted.saturating_add(1);
        Ok(())
    }

    /// Counters for the records offered so far.
    #[must_use]
    pub const fn stats(&self) -> RankingStats {
        self.stats
    }

    /// Consume the ranker and return each reference's results, best first.
    #[must_use]
    pub fn finish(self) -> RankingReport {
        info!(
            "ranked {} businesses against {} profiles ({} skipped)",
            self.stats.accepted,
            self.profiles.len(),
            self.stats.skipped
        );
        let rankings = self
            .profiles
            .into_iter()
            .map(|mut slot| ProfileRanking {
                results: slot.selector.drain(),
                reference: slot.reference,
            })
            .collect();
        RankingReport {
            rankings,
            stats: self.stats,
        }
    }
}

/// Rank a stream of raw records with cosine similarity.
///
/// # Errors
/// Returns [`RankingError`] when a reference vector has the wrong shape.
pub fn rank_records<I>(
    schema: &CategorySchema,
    references: Vec<ReferenceVector>,
    top_k: usize,
    records: I,
) -> Result<RankingReport, RankingError>
where
    I: IntoIterator<Item = RawRecord>,
{
    let mut ranker = SequentialRanker::new(schema, references, top_k)?;
    for record in records {
        ranker.offer_raw(&record)?;
    }
    Ok(ranker.finish())
}

pub(crate) fn validate_references(
    builder: &FeatureBuilder<'_>,
    references: &[ReferenceVector],
) -> Result<(), RankingError> {
    let expected = builder.dimension();
    references
        .iter()
        .find(|reference| reference.dimension() != expected)
        .map_or(Ok(()), |reference| {
            Err(RankingError::ReferenceDimension {
                label: reference.label.clone(),
                expected,
                actual: reference.dimension(),
            })
        })
}
