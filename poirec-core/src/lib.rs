//! Core domain types for the poirec similarity ranker.
//!
//! poirec scores points of interest against user-history profiles. This
//! crate holds everything that does not depend on a particular similarity
//! measure or execution shape:
//! - **Records**: [`RawRecord`] carries a business's textual fields and
//!   [`BusinessRecord`] its validated form.
//! - **Features**: [`CategorySchema`] one-hot encodes category text and
//!   [`FeatureBuilder`] lays out `[latitude, longitude, categories..., stars]`
//!   as a [`FeatureVector`].
//! - **Ranking inputs and outputs**: [`Candidate`], [`ScoredCandidate`], and
//!   the labelled [`ReferenceVector`] profiles.
//! - **Seams**: the [`Similarity`] trait and the [`wire`] codec used by the
//!   grouped pipeline.
//!
//! # Examples
//!
//! ```
//! use poirec_core::{CategorySchema, FeatureBuilder, RawRecord, RecordField};
//!
//! # fn main() -> Result<(), poirec_core::RecordError> {
//! let raw = RawRecord::new()
//!     .with_field(RecordField::BusinessId, "tasty-1")
//!     .with_field(RecordField::Latitude, "34.42")
//!     .with_field(RecordField::Longitude, "-119.70")
//!     .with_field(RecordField::Categories, "Food, Bakeries")
//!     .with_field(RecordField::Stars, "4.5");
//!
//! let candidate = FeatureBuilder::new(CategorySchema::shared()).build_raw(&raw)?;
//! assert_eq!(candidate.features.len(), 28);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod candidate;
pub mod category;
mod feature;
mod record;
mod similarity;
pub mod wire;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use candidate::{Candidate, ReferenceVector, ScoredCandidate};
pub use category::{
    CATEGORY_SEPARATOR, CategorySchema, CategorySchemaError, DEFAULT_CATEGORY_LABELS,
};
pub use feature::{FeatureBuilder, FeatureVector, GEO_DIMENSIONS, RATING_DIMENSIONS};
pub use record::{BusinessRecord, RawRecord, RecordError, RecordField};
pub use similarity::{DimensionMismatch, Similarity};
pub use wire::WireError;
