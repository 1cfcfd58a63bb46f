use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{error, info, info_span};

use labgrid_cli::output::{OutputFormat, output_path, write_outcome};
use labgrid_cli::pipeline::{InputKind, build_parser, parse_file, resolve_lexicon};
use labgrid_cli::types::{BatchResult, DocumentFailure, DocumentSummary};
use labgrid_core::LabReportParser;
use labgrid_model::ParserOptions;

use crate::cli::{LexiconArgs, ParseArgs};

pub fn run_lexicon(args: &LexiconArgs) -> Result<()> {
    let lexicon = resolve_lexicon(args.lexicon.as_deref())?;
    let json = serde_json::to_string_pretty(&lexicon).context("serialize lexicon")?;
    println!("{json}");
    Ok(())
}

pub fn run_parse(args: &ParseArgs) -> Result<BatchResult> {
    let lexicon = resolve_lexicon(args.lexicon.as_deref())?;
    let parser = build_parser(lexicon, parser_options(args))?;
    let kind = if args.flow {
        InputKind::Flow
    } else {
        InputKind::Paged
    };
    let format = OutputFormat::from(args.format);
    if let Some(dir) = &args.output {
        fs::create_dir_all(dir)
            .with_context(|| format!("create output directory {}", dir.display()))?;
    }

    let mut result = BatchResult::default();
    for path in &args.files {
        let span = info_span!("input", path = %path.display());
        let _guard = span.enter();
        match process_document(&parser, path, kind, format, args.output.as_deref()) {
            Ok(summary) => result.documents.push(summary),
            Err(error) => {
                let message = format!("{error:#}");
                error!(error = %message, "document failed");
                result.failures.push(DocumentFailure {
                    path: path.clone(),
                    error: message,
                });
            }
        }
    }
    info!(
        documents = result.documents.len(),
        failures = result.failures.len(),
        "batch finished"
    );
    Ok(result)
}

fn parser_options(args: &ParseArgs) -> ParserOptions {
    let mut options = if args.strict {
        ParserOptions::strict()
    } else if args.relaxed {
        ParserOptions::relaxed()
    } else {
        ParserOptions::default()
    };
    if let Some(threshold) = args.match_threshold {
        options = options.with_match_threshold(threshold);
    }
    if let Some(window) = args.header_window {
        options = options.with_header_window(window);
    }
    if let Some(category) = &args.default_category {
        options = options.with_default_category(category.clone());
    }
    options.with_antibiotic_cleanup(!args.keep_antibiotic_names)
}

fn process_document(
    parser: &LabReportParser,
    path: &Path,
    kind: InputKind,
    format: OutputFormat,
    output_dir: Option<&Path>,
) -> Result<DocumentSummary> {
    let outcome = parse_file(parser, path, kind)?;

    let output = match output_dir {
        Some(dir) => {
            let target = output_path(dir, path, format);
            let file = File::create(&target)
                .with_context(|| format!("create {}", target.display()))?;
            let mut writer = BufWriter::new(file);
            write_outcome(&mut writer, &outcome, format)?;
            writer
                .flush()
                .with_context(|| format!("write {}", target.display()))?;
            Some(target)
        }
        None => {
            let mut stdout = io::stdout().lock();
            write_outcome(&mut stdout, &outcome, format)?;
            None
        }
    };

    Ok(DocumentSummary {
        path: path.to_path_buf(),
        output,
        records: outcome.results.len(),
        patient_found: !outcome.patient.is_empty(),
        stats: outcome.stats,
    })
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::cli::{Cli, Command};

    fn parse_args(argv: &[&str]) -> ParseArgs {
        match Cli::try_parse_from(argv).unwrap().command {
            Command::Parse(args) => args,
            Command::Lexicon(_) => panic!("expected the parse command"),
        }
    }

    #[test]
    fn option_flags_reach_the_parser() {
        let args = parse_args(&[
            "labgrid",
            "parse",
            "report.json",
            "--relaxed",
            "--match-threshold",
            "83",
            "--header-window",
            "150",
            "--default-category",
            "Прочие исследования",
            "--keep-antibiotic-names",
        ]);
        let options = parser_options(&args);
        assert_eq!(options.match_threshold, 83.0);
        assert_eq!(options.header_threshold, ParserOptions::relaxed().header_threshold);
        assert_eq!(options.header_window, 150.0);
        assert_eq!(options.default_category, "Прочие исследования");
        assert!(!options.clean_antibiotic_names);
    }

    #[test]
    fn defaults_without_flags() {
        let options = parser_options(&parse_args(&["labgrid", "parse", "report.json"]));
        assert_eq!(options, ParserOptions::default());
    }
}
