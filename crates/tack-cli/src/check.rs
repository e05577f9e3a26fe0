//! `check` subcommand handler

use crate::OutputFormat;
use crate::utils::{collect_sources, read_source};
use std::process;
use std::time::{Duration, Instant};
use tack_core::diagnostics::Diagnostic;
use tack_core::pipeline::{Pipeline, PipelineResult};

/// Result of checking one source
pub struct FileReport {
    pub file: String,
    pub source: String,
    /// Stage that failed, if any
    pub stage: Option<&'static str>,
    pub diagnostics: Vec<Diagnostic>,
    /// Wall time of every stage that ran, in order
    pub timings: Vec<(&'static str, Duration)>,
}

impl FileReport {
    pub fn passed(&self) -> bool {
        self.stage.is_none()
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "file": self.file,
            "passed": self.passed(),
            "stage": self.stage,
            "diagnostics": self
                .diagnostics
                .iter()
                .map(|d| d.to_json(&self.source))
                .collect::<Vec<_>>(),
        })
    }
}

/// Run every stage over `source`
pub fn check_source(file: &str, source: String) -> FileReport {
    let pipeline = Pipeline::new(source, file.to_string());
    let mut timings = Vec::new();

    let (stage, diagnostics) = match run_stages(&pipeline, &mut timings) {
        Ok(()) => (None, Vec::new()),
        Err(e) => (Some(e.stage()), e.diagnostics()),
    };

    FileReport {
        file: file.to_string(),
        source: pipeline.source().to_string(),
        stage,
        diagnostics,
        timings,
    }
}

fn run_stages(
    pipeline: &Pipeline,
    timings: &mut Vec<(&'static str, Duration)>,
) -> PipelineResult<()> {
    let start = Instant::now();
    let program = pipeline.parse();
    timings.push(("parse", start.elapsed()));
    let program = program?;

    let start = Instant::now();
    let names = pipeline.resolve(&program);
    timings.push(("resolve", start.elapsed()));
    let names = names?;

    let start = Instant::now();
    let types = pipeline.typecheck(&program, &names);
    timings.push(("typecheck", start.elapsed()));
    types.map(|_| ())
}

/// Check every source named on the command line, exiting with status 1 if any fails
pub fn handle_check(paths: &[String], format: OutputFormat, timings: bool) {
    let files = match collect_sources(paths) {
        Ok(files) => files,
        Err(err) => {
            eprintln!("Error collecting sources: {err}");
            process::exit(1);
        }
    };

    let mut failed = 0;
    for file in &files {
        let source = match read_source(file) {
            Ok(content) => content,
            Err(err) => {
                eprintln!("Error reading file '{file}': {err}");
                failed += 1;
                continue;
            }
        };

        let report = check_source(file, source);
        if !report.passed() {
            failed += 1;
        }

        if timings {
            for (stage, elapsed) in &report.timings {
                eprintln!("{file}: {stage} in {elapsed:?}");
            }
        }

        match format {
            OutputFormat::Human => print_human(&report),
            OutputFormat::Json => println!("{}", report.to_json()),
        }
    }

    if format == OutputFormat::Human && files.len() > 1 {
        eprintln!("Checked {} file(s), {failed} failed", files.len());
    }

    if failed > 0 {
        process::exit(1);
    }
}

fn print_human(report: &FileReport) {
    if report.passed() {
        println!("{}: ok", report.file);
        return;
    }
    for diagnostic in &report.diagnostics {
        eprintln!("{}", diagnostic.format(&report.source));
    }
}
