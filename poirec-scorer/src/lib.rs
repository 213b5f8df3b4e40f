//! Similarity scoring and top-K ranking of business candidates.
//!
//! The crate ranks candidates against one or more reference vectors with
//! cosine similarity and keeps the best `K` per reference. Two orchestration
//! strategies produce identical results for identifiers without a comma:
//! - [`SequentialRanker`] streams records once, offering each candidate to a
//!   bounded selector per reference vector.
//! - [`rank_grouped`] emits keyed text pairs, groups them by reference
//!   vector, and reduces each group on its own thread.
//!
//! # Examples
//!
//! ```
//! use poirec_core::{CategorySchema, RawRecord, RecordField, ReferenceVector};
//! use poirec_scorer::{CosineSimilarity, rank_grouped, rank_records};
//!
//! let schema = CategorySchema::new(["Food", "Bars"]).expect("valid schema");
//! let reference = ReferenceVector::new("bars", vec![10.0, 10.0, 0.0, 1.0, 4.0]);
//! let record = |id: &str, categories: &str| {
//!     RawRecord::new()
//!         .with_field(RecordField::BusinessId, id)
//!         .with_field(RecordField::Latitude, "10")
//!         .with_field(RecordField::Longitude, "10")
//!         .with_field(RecordField::Categories, categories)
//!         .with_field(RecordField::Stars, "4")
//! };
//! let records = vec![record("pub", "Bars"), record("diner", "Food")];
//!
//! let sequential = rank_records(&schema, vec![reference.clone()], 1, records.clone())
//!     .expect("rank sequentially");
//! let grouped = rank_grouped(&schema, vec![reference], 1, records, &CosineSimilarity)
//!     .expect("rank grouped");
//!
//! assert_eq!(sequential, grouped);
//! assert_eq!(sequential.rankings[0].results[0].id, "pub");
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod cosine;
mod error;
mod grouped;
mod sequential;
mod top_k;
mod types;

pub use cosine::{CosineSimilarity, cosine_similarity};
pub use error::{MapError, RankingError};
pub use grouped::{
    GroupRanking, KeyedValue, RecordMapper, group_by_key, rank_group, rank_grouped, reduce_group,
};
pub use sequential::{SequentialRanker, rank_records};
pub use top_k::{SelectorState, TopKSelector};
pub use types::{ProfileRanking, RankingReport, RankingStats};
