//! Facade crate for the poirec similarity ranker.
//!
//! This crate re-exports the core data model and the ranking strategies, and
//! exposes the file-facing collaborators behind the `data` feature.

#![forbid(unsafe_code)]

pub use poirec_core::{
    BusinessRecord, Candidate, CategorySchema, CategorySchemaError, DimensionMismatch,
    FeatureBuilder, FeatureVector, RawRecord, RecordError, RecordField, ReferenceVector,
    ScoredCandidate, Similarity, WireError, wire,
};

pub use poirec_scorer::{
    CosineSimilarity, ProfileRanking, RankingError, RankingReport, RankingStats, RecordMapper,
    SelectorState, SequentialRanker, TopKSelector, cosine_similarity, rank_grouped, rank_records,
};

#[cfg(feature = "data")]
pub use poirec_data::{
    BusinessReader, IngestError, OutputFormat, ProfileLoadError, WriteError, builtin_profiles,
    load_category_schema, load_profiles, write_rankings,
};
