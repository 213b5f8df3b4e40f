//! File-facing collaborators for the poirec ranker.
//!
//! Responsibilities:
//! - Stream businesses from JSON-lines dumps as [`RawRecord`](poirec_core::RawRecord)s.
//! - Load reference profiles and category schemas from JSON files, with the
//!   built-in history profiles as a fallback.
//! - Render ranking results as JSON lines or reducer-style text.
//!
//! Boundaries:
//! - Record validation and vectorisation live in `poirec-core`.
//! - Scoring and selection live in `poirec-scorer`.
//!
//! File access goes through `cap-std` ambient-authority helpers over UTF-8
//! `camino` paths.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod fs;
mod ingest;
mod output;
mod profiles;

pub use ingest::{BusinessReader, IngestError, LineError, parse_business_line};
pub use output::{OutputFormat, ParseOutputFormatError, WriteError, write_rankings};
pub use profiles::{
    PRINTING_SERVICES, ProfileLoadError, SANTA_BARBARA_FOOD, builtin_profiles,
    load_category_schema, load_profiles,
};
