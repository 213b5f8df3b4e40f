//! Writers for ranking results.

use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;

use poirec_core::FeatureVector;
use poirec_scorer::RankingReport;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rendering used by [`write_rankings`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One JSON object per retained candidate.
    #[default]
    Json,
    /// `similarity<TAB>id: v1,v2,...` lines under a `# label` header per
    /// profile.
    Text,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Json => "json",
            Self::Text => "text",
        })
    }
}

/// An unrecognised output format name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown output format {0:?}; expected `json` or `text`")]
pub struct ParseOutputFormatError(String);

impl FromStr for OutputFormat {
    type Err = ParseOutputFormatError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "text" => Ok(Self::Text),
            _ => Err(ParseOutputFormatError(value.to_owned())),
        }
    }
}

/// Errors raised while writing results.
#[derive(Debug, Error)]
pub enum WriteError {
    /// The sink rejected a write.
    #[error("failed to write rankings")]
    Io(#[from] io::Error),
    /// A result could not be serialised.
    #[error("failed to serialise rankings")]
    Serialise(#[from] serde_json::Error),
}

#[derive(Serialize)]
struct RankedLine<'a> {
    profile: &'a str,
    rank: usize,
    id: &'a str,
    similarity: f64,
    features: &'a FeatureVector,
}

/// Write every profile's results to `writer`, best first.
///
/// # Errors
/// Returns [`WriteError`] when writing or serialisation fails.
///
/// # Examples
/// ```
/// use poirec_core::{Candidate, ReferenceVector, ScoredCandidate};
/// use poirec_data::{OutputFormat, write_rankings};
/// use poirec_scorer::{ProfileRanking, RankingReport, RankingStats};
///
/// let report = RankingReport {
///     rankings: vec![ProfileRanking {
///         reference: ReferenceVector::new("home", vec![1.0, 0.0]),
///         results: vec![ScoredCandidate::new(Candidate::new("b1", vec![1.0, 0.5]), 0.9)],
///     }],
///     stats: RankingStats::default(),
/// };
/// let mut out = Vec::new();
/// write_rankings(&mut out, &report, OutputFormat::Text)?;
/// assert_eq!(String::from_utf8(out)?, "# home\n0.9\tb1: 1,0.5\n");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn write_rankings<W: Write>(
    mut writer: W,
    report: &RankingReport,
    format: OutputFormat,
) -> Result<(), WriteError> {
    for ranking in &report.rankings {
        let label = ranking.reference.label.as_str();
        if format == OutputFormat::Text {
            writeln!(writer, "# {label}")?;
        }
        for (index, scored) in ranking.results.iter().enumerate() {
            match format {
                OutputFormat::Text => writeln!(
                    writer,
                    "{}\t{}: {}",
                    scored.similarity, scored.id, scored.features
                )?,
                OutputFormat::Json => {
                    let line = RankedLine {
                        profile: label,
                        rank: index.saturating_add(1),
                        id: &scored.id,
                        similarity: scored.similarity,
                        features: &scored.features,
                    };
                    serde_json::to_writer(&mut writer, &line)?;
                    writer.write_all(b"\n")?;
                }
            }
        }
    }
    writer.flush()?;
    Ok(())
}
