//! Error types emitted by the poirec CLI.

use std::sync::Arc;

use camino::Utf8PathBuf;
use poirec_data::{IngestError, ProfileLoadError, WriteError};
use poirec_scorer::RankingError;
use thiserror::Error;

/// Errors emitted by the poirec CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required positional argument is missing after configuration merging.
    #[error("missing <{field}> argument (pass it positionally or set {env})")]
    MissingPositional {
        field: &'static str,
        env: &'static str,
    },
    /// `--top-k` was zero.
    #[error("--{field} must be at least 1")]
    ZeroTopK { field: &'static str },
    /// A referenced input path does not exist.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        field: &'static str,
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Reading the business dump failed.
    #[error(transparent)]
    Ingest(#[from] IngestError),
    /// Loading profiles or the category schema failed.
    #[error(transparent)]
    LoadProfiles(#[from] ProfileLoadError),
    /// Ranking was aborted.
    #[error("ranking failed: {0}")]
    Ranking(#[from] RankingError),
    /// The output file could not be created.
    #[error("failed to create output file {path:?}: {source}")]
    CreateOutput {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Writing the results failed.
    #[error(transparent)]
    WriteOutput(#[from] WriteError),
    /// A global log subscriber was already installed.
    #[error("failed to initialise logging: {message}")]
    Logging { message: String },
}
