use std::fs;

use labgrid_cli::output::{OutputFormat, write_outcome};
use labgrid_cli::pipeline::{InputKind, build_parser, parse_file, resolve_lexicon};
use labgrid_model::ParserOptions;

const PAGED: &str = r#"{
  "pages": [
    {
      "tables": [
        {
          "bbox": {"x0": 0, "top": 100, "x1": 500, "bottom": 200},
          "grid": [["Показатель", "Результат"], ["Гемоглобин", "140"], ["СОЭ", "12"]]
        }
      ],
      "text_lines": [
        {"x0": 10, "top": 70, "x1": 300, "bottom": 90, "text": "ОБЩИЙ АНАЛИЗ КРОВИ"}
      ]
    }
  ]
}"#;

const FLOW: &str = r#"{
  "blocks": [
    {"paragraph": "Коагулограмма"},
    {"table": [["Тест", "Результат"], ["МНО", "1,1"]]}
  ]
}"#;

fn default_parser() -> labgrid_core::LabReportParser {
    build_parser(resolve_lexicon(None).unwrap(), ParserOptions::default()).unwrap()
}

#[test]
fn parses_paged_document_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.json");
    fs::write(&path, PAGED).unwrap();

    let outcome = parse_file(&default_parser(), &path, InputKind::Paged).unwrap();
    let names: Vec<_> = outcome.results.iter().map(|r| r.test_name.as_str()).collect();
    assert_eq!(names, vec!["Гемоглобин", "СОЭ"]);
    assert_eq!(outcome.results[0].category, "ОБЩИЙ АНАЛИЗ КРОВИ");
    assert_eq!(outcome.results[0].value, Some(140.0));
}

#[test]
fn parses_flow_document_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("flow.json");
    fs::write(&path, FLOW).unwrap();

    let outcome = parse_file(&default_parser(), &path, InputKind::Flow).unwrap();
    assert_eq!(outcome.results.len(), 1);
    assert_eq!(outcome.results[0].category, "Коагулограмма");
    assert_eq!(outcome.results[0].value, Some(1.1));
}

#[test]
fn malformed_document_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "{\"pages\": [").unwrap();

    let error = parse_file(&default_parser(), &path, InputKind::Paged).unwrap_err();
    assert!(format!("{error:#}").contains("broken.json"));
}

#[test]
fn missing_document_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");
    assert!(parse_file(&default_parser(), &path, InputKind::Paged).is_err());
}

#[test]
fn custom_lexicon_file_is_used() {
    let dir = tempfile::tempdir().unwrap();
    let lexicon_path = dir.path().join("lexicon.json");
    fs::write(
        &lexicon_path,
        r#"{"column_keywords": {"test_name": ["analyte"], "result": ["outcome"]}}"#,
    )
    .unwrap();
    let lexicon = resolve_lexicon(Some(&lexicon_path)).unwrap();
    assert_eq!(lexicon.column_keywords.result, vec!["outcome".to_string()]);
    // Families missing from the file keep their built-in values.
    assert!(!lexicon.noise_terms.is_empty());
}

#[test]
fn invalid_lexicon_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let lexicon_path = dir.path().join("lexicon.json");
    fs::write(&lexicon_path, r#"{"column_keywords": {"result": []}}"#).unwrap();
    let error = resolve_lexicon(Some(&lexicon_path)).unwrap_err();
    assert!(format!("{error:#}").contains("lexicon.json"));
}

#[test]
fn json_output_is_the_full_outcome() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.json");
    fs::write(&path, PAGED).unwrap();
    let outcome = parse_file(&default_parser(), &path, InputKind::Paged).unwrap();

    let mut buffer = Vec::new();
    write_outcome(&mut buffer, &outcome, OutputFormat::Json).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
    assert_eq!(value["results"][1]["test_name"], "СОЭ");
    assert_eq!(value["stats"]["tables"], 1);
    assert_eq!(value["metadata"]["printed_at"], serde_json::Value::Null);
}

#[test]
fn table_output_renders_results() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.json");
    fs::write(&path, PAGED).unwrap();
    let outcome = parse_file(&default_parser(), &path, InputKind::Paged).unwrap();

    let mut buffer = Vec::new();
    write_outcome(&mut buffer, &outcome, OutputFormat::Table).unwrap();
    let text = String::from_utf8(buffer).unwrap();
    assert!(text.contains("Гемоглобин"));
    assert!(text.contains("ОБЩИЙ АНАЛИЗ КРОВИ"));
}
