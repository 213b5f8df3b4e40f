//! Focused unit tests covering rank configuration and execution.

use super::helpers::{BUSINESS_DUMP, Workspace, text_sections};
use super::*;
use camino::{Utf8Path, Utf8PathBuf};
use poirec_data::{OutputFormat, PRINTING_SERVICES, SANTA_BARBARA_FOOD};
use rstest::{fixture, rstest};
use std::fs;

#[fixture]
fn workspace() -> Workspace {
    Workspace::new()
}

fn config_for(records: Utf8PathBuf) -> RankConfig {
    RankConfig::try_from(RankArgs {
        records: Some(records),
        ..RankArgs::default()
    })
    .expect("records given")
}

#[rstest]
fn converting_without_records_errors() {
    let err = RankConfig::try_from(RankArgs::default()).expect_err("records are required");
    assert_eq!(
        err.to_string(),
        format!("missing <{ARG_RECORDS}> argument (pass it positionally or set {ENV_RECORDS})")
    );
    match err {
        CliError::MissingPositional { field, env } => {
            assert_eq!(field, ARG_RECORDS);
            assert_eq!(env, ENV_RECORDS);
        }
        other => panic!("expected MissingPositional, found {other:?}"),
    }
}

#[rstest]
fn merge_layers_maps_configuration_errors() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let mut composer = MergeComposer::new();
    composer.push_cli(json!({ "top_k": "many" }));

    match config_from_layers_for_test(composer.layers()) {
        Err(CliError::Configuration(_)) => {}
        other => panic!("expected CliError::Configuration, found {other:?}"),
    }
}

#[rstest]
fn merge_layers_honours_precedence(workspace: Workspace) {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let env_records = workspace.path("from-env.json");
    let mut composer = MergeComposer::new();
    composer.push_file(
        json!({
            "records": workspace.path("from-file.json").as_str(),
            "top_k": 7,
            "strategy": "grouped",
        }),
        None,
    );
    composer.push_environment(json!({
        "records": env_records.as_str(),
        "top_k": 5,
    }));
    composer.push_cli(json!({ "top_k": 2 }));

    let config = config_from_layers_for_test(composer.layers()).expect("merged config");

    assert_eq!(config.records, env_records);
    assert_eq!(config.top_k, 2);
    assert_eq!(config.strategy, Strategy::Grouped);
    assert_eq!(config.format, OutputFormat::Json);
}

#[rstest]
fn merge_layers_fill_records_from_file(workspace: Workspace) {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let file_records = workspace.path("from-file.json");
    let mut composer = MergeComposer::new();
    composer.push_file(json!({ "records": file_records.as_str(), "top_k": 4 }), None);

    let config = config_from_layers_for_test(composer.layers()).expect("merged config");

    assert_eq!(config.records, file_records);
    assert_eq!(config.top_k, 4);
}

#[rstest]
fn converting_applies_defaults() {
    let config = config_for(Utf8PathBuf::from("dump.json"));

    assert_eq!(config.top_k, 3);
    assert_eq!(config.strategy, Strategy::Sequential);
    assert_eq!(config.format, OutputFormat::Json);
    assert_eq!(config.profiles, None);
    assert_eq!(config.output, None);
}

#[rstest]
fn converting_rejects_zero_top_k() {
    let args = RankArgs {
        records: Some(Utf8PathBuf::from("dump.json")),
        top_k: Some(0),
        ..RankArgs::default()
    };
    match RankConfig::try_from(args) {
        Err(CliError::ZeroTopK { field }) => assert_eq!(field, ARG_TOP_K),
        other => panic!("expected ZeroTopK, found {other:?}"),
    }
}

#[rstest]
fn parses_every_rank_option() {
    let cli = Cli::try_parse_from([
        "poirec",
        "--verbose",
        "rank",
        "dump.json",
        "--profiles",
        "profiles.json",
        "--categories",
        "categories.json",
        "--top-k",
        "5",
        "--strategy",
        "grouped",
        "--format",
        "text",
        "--output",
        "out/ranked.txt",
    ])
    .expect("valid command line");

    assert!(cli.verbose);
    let Command::Rank(args) = cli.command;
    assert_eq!(args.records.as_deref(), Some(Utf8Path::new("dump.json")));
    assert_eq!(args.profiles.as_deref(), Some(Utf8Path::new("profiles.json")));
    assert_eq!(args.categories.as_deref(), Some(Utf8Path::new("categories.json")));
    assert_eq!(args.top_k, Some(5));
    assert_eq!(args.strategy, Some(Strategy::Grouped));
    assert_eq!(args.format, Some(OutputFormat::Text));
    assert_eq!(args.output.as_deref(), Some(Utf8Path::new("out/ranked.txt")));
}

#[rstest]
fn rejects_unknown_strategy() {
    let outcome = Cli::try_parse_from(["poirec", "rank", "dump.json", "--strategy", "batch"]);
    assert!(outcome.is_err());
}

#[rstest]
fn validate_sources_reports_missing_records(workspace: Workspace) {
    let config = config_for(workspace.path("missing.json"));
    match config.validate_sources() {
        Err(CliError::MissingSourceFile { field, .. }) => assert_eq!(field, ARG_RECORDS),
        other => panic!("expected MissingSourceFile, found {other:?}"),
    }
}

#[rstest]
fn validate_sources_rejects_directories(workspace: Workspace) {
    let config = config_for(workspace.root().to_path_buf());
    match config.validate_sources() {
        Err(CliError::SourcePathNotFile { field, .. }) => assert_eq!(field, ARG_RECORDS),
        other => panic!("expected SourcePathNotFile, found {other:?}"),
    }
}

#[rstest]
fn validate_sources_checks_optional_inputs(workspace: Workspace) {
    let mut config = config_for(workspace.write("dump.json", BUSINESS_DUMP));
    config.categories = Some(workspace.path("categories.json"));
    match config.validate_sources() {
        Err(CliError::MissingSourceFile { field, .. }) => assert_eq!(field, ARG_CATEGORIES),
        other => panic!("expected MissingSourceFile, found {other:?}"),
    }
}

#[rstest]
fn strategies_produce_identical_reports(workspace: Workspace) {
    let mut config = config_for(workspace.write("dump.json", BUSINESS_DUMP));
    let sequential = execute_rank(&config).expect("sequential run");
    config.strategy = Strategy::Grouped;
    let grouped = execute_rank(&config).expect("grouped run");

    assert_eq!(sequential, grouped);
    assert_eq!(sequential.stats.accepted, 5);
    assert_eq!(sequential.stats.skipped, 1);
}

#[rstest]
fn custom_profiles_and_categories_are_used(workspace: Workspace) {
    let mut config = config_for(workspace.write("dump.json", BUSINESS_DUMP));
    config.categories = Some(workspace.write("categories.json", r#"["Food","Printing Services"]"#));
    config.profiles = Some(workspace.write(
        "profiles.json",
        r#"[{"label":"printers","features":[10.0,10.0,0,1,5]}]"#,
    ));
    config.top_k = 1;

    let report = execute_rank(&config).expect("rank");

    let ranking = report.rankings.first().expect("one profile");
    assert_eq!(ranking.reference.label, "printers");
    let ids: Vec<&str> = ranking.results.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, ["copy-corner"]);
}

#[rstest]
fn misshapen_profiles_abort_the_run(workspace: Workspace) {
    let mut config = config_for(workspace.write("dump.json", BUSINESS_DUMP));
    config.profiles = Some(workspace.write(
        "profiles.json",
        r#"[{"label":"short","features":[1.0,2.0]}]"#,
    ));

    match execute_rank(&config) {
        Err(CliError::Ranking(_)) => {}
        other => panic!("expected Ranking error, found {other:?}"),
    }
}

#[rstest]
fn output_flag_writes_to_file_instead_of_stdout(workspace: Workspace) {
    let output = workspace.path("results/ranked.txt");
    let args = RankArgs {
        records: Some(workspace.write("dump.json", BUSINESS_DUMP)),
        format: Some(OutputFormat::Text),
        output: Some(output.clone()),
        ..RankArgs::default()
    };
    let mut stdout = Vec::new();

    run_rank_with(args, &mut stdout).expect("rank");

    assert!(stdout.is_empty());
    let written = fs::read_to_string(&output).expect("output file");
    let labels: Vec<String> = text_sections(&written)
        .into_iter()
        .map(|(label, _)| label)
        .collect();
    assert_eq!(labels, [SANTA_BARBARA_FOOD, PRINTING_SERVICES]);
}
