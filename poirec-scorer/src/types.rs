//! Ranking results shared by both orchestration strategies.

use poirec_core::{ReferenceVector, ScoredCandidate};

/// Counters describing how many records a ranking consumed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RankingStats {
    /// Records that produced a candidate.
    pub accepted: u64,
    /// Records dropped because they failed validation.
    pub skipped: u64,
    /// Grouped values the reduce stage could not decode. Always zero for
    /// sequential runs.
    pub undecodable: u64,
}

/// The best candidates found for one reference vector.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileRanking {
    /// Reference vector the results were ranked against.
    pub reference: ReferenceVector,
    /// Retained candidates, most similar first.
    pub results: Vec<ScoredCandidate>,
}

/// Output of a complete ranking run.
#[derive(Debug, Clone, PartialEq)]
pub struct RankingReport {
    /// One entry per reference vector, in the order they were supplied.
    pub rankings: Vec<ProfileRanking>,
    /// Record counters for the run.
    pub stats: RankingStats,
}
