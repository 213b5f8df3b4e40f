//! Two-stage ranking that partitions work by reference vector.
//!
//! The map stage turns each record into one `(key, value)` pair per distinct
//! reference vector, using the text encoding from [`poirec_core::wire`]. Pairs
//! are then grouped by key and every group is reduced to its best candidates
//! on its own scoped thread. Identical reference vectors share a key, so they
//! are ranked once and receive the same results.

use std::collections::BTreeMap;
use std::thread;

use log::{debug, info, warn};
use poirec_core::wire::{decode_key, decode_value, encode_key, encode_value};
use poirec_core::{
    Candidate, CategorySchema, FeatureBuilder, FeatureVector, RawRecord, RecordField,
    ReferenceVector, ScoredCandidate, Similarity,
};

use crate::sequential::validate_references;
use crate::{MapError, ProfileRanking, RankingError, RankingReport, RankingStats, TopKSelector};

/// Keyed pairs emitted by the map stage.
pub type KeyedValue = (String, String);

/// Map stage: vectorise records and fan them out to every reference key.
#[derive(Debug, Clone)]
pub struct RecordMapper<'schema> {
    builder: FeatureBuilder<'schema>,
    keys: Vec<String>,
}

impl<'schema> RecordMapper<'schema> {
    /// Create a mapper emitting one pair per distinct reference vector.
    ///
    /// # Errors
    /// Returns [`RankingError::ReferenceDimension`] when a reference vector
    /// is not shaped like the vectors `schema` produces.
    pub fn new(
        schema: &'schema CategorySchema,
        references: &[ReferenceVector],
    ) -> Result<Self, RankingError> {
        let builder = FeatureBuilder::new(schema);
        validate_references(&builder, references)?;
        let mut keys: Vec<String> = Vec::with_capacity(references.len());
        for reference in references {
            let key = encode_key(&reference.features);
            if !keys.contains(&key) {
                keys.push(key);
            }
        }
        Ok(Self { builder, keys })
    }

    /// Distinct group keys in first-seen order.
    #[must_use]
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Emit `(reference key, encoded candidate)` for each distinct key.
    ///
    /// # Errors
    /// Returns [`MapError::Record`] for invalid records and
    /// [`MapError::Wire`] when the identifier cannot be encoded.
    pub fn map_record(&self, raw: &RawRecord) -> Result<Vec<KeyedValue>, MapError> {
        let candidate = self.builder.build_raw(raw)?;
        let value = encode_value(&candidate)?;
        Ok(self
            .keys
            .iter()
            .map(|key| (key.clone(), value.clone()))
            .collect())
    }
}

/// Collect pairs into groups keyed by reference vector.
///
/// Values keep their arrival order within a group.
#[must_use]
pub fn group_by_key<I>(pairs: I) -> BTreeMap<String, Vec<String>>
where
    I: IntoIterator<Item = KeyedValue>,
{
    let mut groups: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (key, value) in pairs {
        groups.entry(key).or_default().push(value);
    }
    groups
}

/// The reduce-stage result for one group.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupRanking {
    /// Encoded group key.
    pub key: String,
    /// Decoded reference vector.
    pub reference: FeatureVector,
    /// Retained candidates, most similar first.
    pub results: Vec<ScoredCandidate>,
    /// Values that could not be decoded.
    pub skipped: u64,
}

/// Reduce stage: rank every encoded candidate in a group.
///
/// Undecodable values are logged and skipped.
///
/// # Errors
/// Returns [`RankingError::GroupKey`] when `key` does not decode and
/// [`RankingError::Dimension`] when a candidate is shaped differently from
/// the reference vector.
pub fn reduce_group<S>(
    key: &str,
    values: &[String],
    top_k: usize,
    similarity: &S,
) -> Result<GroupRanking, RankingError>
where
    S: Similarity + ?Sized,
{
    let reference = decode_key(key).map_err(|source| RankingError::GroupKey {
        key: key.to_owned(),
        source,
    })?;
    let mut skipped = 0_u64;
    let candidates = values
        .iter()
        .filter_map(|value| match decode_value(value) {
            Ok(candidate) => Some(candidate),
            Err(err) => {
                warn!("skipping undecodable value {value:?}: {err}");
                skipped = skipped.saturating_add(1);
                None
            }
        });
    let results = rank_group(&reference, candidates, top_k, similarity)?;
    debug!(
        "reduced group of {} values to {} candidates",
        values.len(),
        results.len()
    );
    Ok(GroupRanking {
        key: key.to_owned(),
        reference,
        results,
        skipped,
    })
}

/// Rank candidates against one reference vector.
///
/// # Errors
/// Returns [`RankingError::Dimension`] when a candidate is shaped
/// differently from `reference`.
pub fn rank_group<I, S>(
    reference: &FeatureVector,
    candidates: I,
    top_k: usize,
    similarity: &S,
) -> Result<Vec<ScoredCandidate>, RankingError>
where
    I: IntoIterator<Item = Candidate>,
    S: Similarity + ?Sized,
{
    let mut selector = TopKSelector::new(top_k);
    for candidate in candidates {
        let score = similarity.similarity(reference, &candidate.features)?;
        if selector.admits(score) {
            selector.insert(ScoredCandidate::new(candidate, score));
        }
    }
    Ok(selector.drain())
}

/// Rank a stream of raw records with the map, group, and reduce stages.
///
/// Results are returned per reference vector in input order, matching
/// [`rank_records`](crate::rank_records) for the same input.
///
/// # Errors
/// Returns [`RankingError`] when a reference vector has the wrong shape or a
/// group worker fails.
pub fn rank_grouped<I, S>(
    schema: &CategorySchema,
    references: Vec<ReferenceVector>,
    top_k: usize,
    records: I,
    similarity: &S,
) -> Result<RankingReport, RankingError>
where
    I: IntoIterator<Item = RawRecord>,
    S: Similarity + ?Sized,
{
    let mapper = RecordMapper::new(schema, &references)?;
    let mut stats = RankingStats::default();
    let mut pairs = Vec::new();
    for record in records {
        match mapper.map_record(&record) {
            Ok(emitted) => {
                stats.accepted = stats.accepted.saturating_add(1);
                pairs.extend(emitted);
            }
            Err(err) => {
                warn!(
                    "skipping business {}: {err}",
                    record
                        .get(RecordField::BusinessId)
                        .unwrap_or("<unidentified>")
                );
                stats.skipped = stats.skipped.saturating_add(1);
            }
        }
    }

    let groups = group_by_key(pairs);
    let reduced = reduce_groups(&groups, top_k, similarity)?;
    stats.undecodable = reduced
        .values()
        .fold(0_u64, |total, group| total.saturating_add(group.skipped));
    info!(
        "ranked {} businesses in {} groups ({} skipped, {} undecodable)",
        stats.accepted,
        groups.len(),
        stats.skipped,
        stats.undecodable
    );

    let rankings = references
        .into_iter()
        .map(|reference| {
            let results = reduced
                .get(&encode_key(&reference.features))
                .map(|group| group.results.clone())
                .unwrap_or_default();
            ProfileRanking { reference, results }
        })
        .collect();
    Ok(RankingReport { rankings, stats })
}

fn reduce_groups<S>(
    groups: &BTreeMap<String, Vec<String>>,
    top_k: usize,
    similarity: &S,
) -> Result<BTreeMap<String, GroupRanking>, RankingError>
where
    S: Similarity + ?Sized,
{
    thread::scope(|scope| {
        let handles: Vec<_> = groups
            .iter()
            .map(|(key, values)| {
                let handle = scope.spawn(move || reduce_group(key, values, top_k, similarity));
                (key, handle)
            })
            .collect();

        let mut reduced = BTreeMap::new();
        for (key, handle) in handles {
            let group = handle
                .join()
                .map_err(|_| RankingError::WorkerPanicked { key: key.clone() })??;
            reduced.insert(group.key.clone(), group);
        }
        Ok(reduced)
    })
}
