//! Rank command implementation for the poirec CLI.

use std::io::{self, BufWriter, Write};

use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, ValueEnum};
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use poirec_core::CategorySchema;
use poirec_data::fs::{create_utf8_file, is_regular_file};
use poirec_data::{
    BusinessReader, OutputFormat, builtin_profiles, load_category_schema, load_profiles,
    write_rankings,
};
use poirec_scorer::{CosineSimilarity, RankingReport, SequentialRanker, rank_grouped};
use serde::{Deserialize, Serialize};

use crate::{
    ARG_CATEGORIES, ARG_FORMAT, ARG_OUTPUT, ARG_PROFILES, ARG_RECORDS, ARG_STRATEGY, ARG_TOP_K,
    CliError, ENV_RECORDS,
};

/// Results kept per profile when `--top-k` is not given.
pub(crate) const DEFAULT_TOP_K: usize = 3;

/// How the ranking work is laid out.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Strategy {
    /// Stream records through one selector per profile.
    #[default]
    Sequential,
    /// Map records to per-profile groups and reduce each group on its own
    /// thread.
    Grouped,
}

/// CLI arguments for the `rank` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "rank",
    long_about = "Score every business in a JSON-lines dump against each \
                 reference profile by cosine similarity and keep the best \
                 matches per profile. Options can come from CLI flags, \
                 configuration files, or POIREC_CMDS_RANK_* environment \
                 variables.",
    about = "Rank businesses against reference profiles"
)]
#[ortho_config(prefix = "POIREC")]
pub(crate) struct RankArgs {
    /// Path to a JSON-lines business dump.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) records: Option<Utf8PathBuf>,
    /// JSON file of labelled reference vectors (defaults to the built-in
    /// history profiles).
    #[arg(long = ARG_PROFILES, value_name = "path")]
    #[serde(default)]
    pub(crate) profiles: Option<Utf8PathBuf>,
    /// JSON array of category labels (defaults to the built-in schema).
    #[arg(long = ARG_CATEGORIES, value_name = "path")]
    #[serde(default)]
    pub(crate) categories: Option<Utf8PathBuf>,
    /// Number of matches kept per profile.
    #[arg(long = ARG_TOP_K, value_name = "n")]
    #[serde(default)]
    pub(crate) top_k: Option<usize>,
    /// Execution strategy.
    #[arg(long = ARG_STRATEGY, value_enum)]
    #[serde(default)]
    pub(crate) strategy: Option<Strategy>,
    /// Output rendering: `json` or `text`.
    #[arg(long = ARG_FORMAT, value_name = "format")]
    #[serde(default)]
    pub(crate) format: Option<OutputFormat>,
    /// Write results here instead of stdout.
    #[arg(long = ARG_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
}

impl RankArgs {
    pub(crate) fn into_config(self) -> Result<RankConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RankConfig::try_from(merged)
    }
}

/// Resolved `rank` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RankConfig {
    pub(crate) records: Utf8PathBuf,
    pub(crate) profiles: Option<Utf8PathBuf>,
    pub(crate) categories: Option<Utf8PathBuf>,
    pub(crate) top_k: usize,
    pub(crate) strategy: Strategy,
    pub(crate) format: OutputFormat,
    pub(crate) output: Option<Utf8PathBuf>,
}

impl RankConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        Self::require_existing(&self.records, ARG_RECORDS)?;
        if let Some(profiles) = &self.profiles {
            Self::require_existing(profiles, ARG_PROFILES)?;
        }
        if let Some(categories) = &self.categories {
            Self::require_existing(categories, ARG_CATEGORIES)?;
        }
        Ok(())
    }

    fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
        match is_regular_file(path) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::SourcePathNotFile {
                field,
                path: path.to_path_buf(),
            }),
            Err(source) if source.kind() == io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field,
                    path: path.to_path_buf(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field,
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

impl TryFrom<RankArgs> for RankConfig {
    type Error = CliError;

    fn try_from(args: RankArgs) -> Result<Self, Self::Error> {
        let records = args.records.ok_or(CliError::MissingPositional {
            field: ARG_RECORDS,
            env: ENV_RECORDS,
        })?;
        let top_k = args.top_k.unwrap_or(DEFAULT_TOP_K);
        if top_k == 0 {
            return Err(CliError::ZeroTopK { field: ARG_TOP_K });
        }
        Ok(Self {
            records,
            profiles: args.profiles,
            categories: args.categories,
            top_k,
            strategy: args.strategy.unwrap_or_default(),
            format: args.format.unwrap_or_default(),
            output: args.output,
        })
    }
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<RankConfig, CliError> {
    let merged = RankArgs::merge_from_layers(layers).map_err(CliError::from)?;
    RankConfig::try_from(merged)
}

pub(crate) fn run_rank(args: RankArgs) -> Result<(), CliError> {
    let mut stdout = io::stdout().lock();
    run_rank_with(args, &mut stdout)
}

/// Run `rank`, writing to `stdout` unless `--output` names a file.
pub(crate) fn run_rank_with(args: RankArgs, stdout: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    let report = execute_rank(&config)?;
    match &config.output {
        Some(path) => {
            let file = create_utf8_file(path).map_err(|source| CliError::CreateOutput {
                path: path.clone(),
                source,
            })?;
            write_rankings(BufWriter::new(file), &report, config.format)?;
        }
        None => write_rankings(stdout, &report, config.format)?,
    }
    Ok(())
}

pub(crate) fn execute_rank(config: &RankConfig) -> Result<RankingReport, CliError> {
    let loaded_schema = config
        .categories
        .as_deref()
        .map(load_category_schema)
        .transpose()?;
    let schema = loaded_schema.as_ref().unwrap_or_else(|| CategorySchema::shared());
    let profiles = config
        .profiles
        .as_deref()
        .map_or_else(|| Ok(builtin_profiles()), load_profiles)?;
    info!(
        "ranking {} against {} profiles with {:?} strategy",
        config.records,
        profiles.len(),
        config.strategy
    );

    let mut reader = BusinessReader::open(&config.records)?;
    let report = match config.strategy {
        Strategy::Sequential => {
            let mut ranker = SequentialRanker::new(schema, profiles, config.top_k)?;
            for record in reader.by_ref() {
                ranker.offer_raw(&record?)?;
            }
            ranker.finish()
        }
        Strategy::Grouped => {
            let records = reader.by_ref().collect::<Result<Vec<_>, _>>()?;
            rank_grouped(schema, profiles, config.top_k, records, &CosineSimilarity)?
        }
    };
    info!(
        "read {} lines from {} ({} unparseable)",
        reader.lines_read(),
        config.records,
        reader.skipped()
    );
    Ok(report)
}
