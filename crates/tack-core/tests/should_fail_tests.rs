//! Fixture runner for programs that must be rejected.
//!
//! Each `tests/should_fail/**/*.tack` has a sibling `.expect` file. Its first line names the
//! stage that must fail (`parse`, `name` or `type`); the remaining lines list the expected
//! diagnostic kinds in emission order. Parse fixtures only name the stage.

use std::{
    fs,
    path::{Path, PathBuf},
};
use tack_core::pipeline::{Pipeline, PipelineError};

fn collect(dir: &Path, ext: &str, files: &mut Vec<PathBuf>) {
    for entry in fs::read_dir(dir).expect("Failed to read fixture directory") {
        let entry = entry.expect("Failed to read directory entry");
        let path = entry.path();
        if path.is_dir() {
            collect(&path, ext, files);
            continue;
        }
        if path.extension().and_then(|s| s.to_str()) == Some(ext) {
            files.push(path);
        }
    }
}

fn fixtures(subdir: &str) -> Vec<PathBuf> {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join(subdir);
    let mut files = Vec::new();
    collect(&dir, "tack", &mut files);
    files.sort();
    files
}

fn read_normalized(path: &Path) -> String {
    fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e))
        .replace("\r\n", "\n")
}

/// Kind names of every diagnostic in a pipeline failure
fn kind_names(error: &PipelineError) -> Vec<String> {
    match error {
        PipelineError::Parse(_) => Vec::new(),
        PipelineError::Name { errors, .. } => {
            errors.iter().map(|e| e.kind.name().to_string()).collect()
        }
        PipelineError::Typecheck { errors, .. } => {
            errors.iter().map(|e| e.kind.name().to_string()).collect()
        }
    }
}

#[test]
fn test_should_fail_programs() {
    let files = fixtures("should_fail");
    assert!(!files.is_empty(), "No should_fail fixtures found");

    let mut failures = Vec::new();

    for tack_path in files {
        let test_name = tack_path.display().to_string();
        let source = read_normalized(&tack_path);

        let expect_path = tack_path.with_extension("expect");
        if !expect_path.exists() {
            failures.push(format!("❌ {test_name}: Missing .expect file"));
            continue;
        }
        let expect = read_normalized(&expect_path);
        let mut lines = expect.lines().map(str::trim).filter(|l| !l.is_empty());
        let expected_stage = lines.next().unwrap_or_default().to_lowercase();
        let expected_kinds: Vec<String> = lines.map(str::to_string).collect();

        let pipeline = Pipeline::new(source, test_name.clone());
        match pipeline.check_all() {
            Ok(_) => failures.push(format!(
                "❌ {test_name}: Expected {expected_stage} failure but checking succeeded"
            )),
            Err(error) if error.stage() != expected_stage => failures.push(format!(
                "❌ {test_name}: Expected {expected_stage} failure, got {} failure:\n{}",
                error.stage(),
                error.format_with_source(pipeline.source())
            )),
            Err(error) => {
                let kinds = kind_names(&error);
                if !expected_kinds.is_empty() && kinds != expected_kinds {
                    failures.push(format!(
                        "❌ {test_name}: Expected diagnostics {expected_kinds:?}, got {kinds:?}"
                    ));
                } else {
                    println!("✓ {test_name} ({expected_stage} failed as expected)");
                }
            }
        }
    }

    if !failures.is_empty() {
        panic!(
            "\n{} should_fail test(s) had issues:\n\n{}",
            failures.len(),
            failures.join("\n")
        );
    }
}

#[test]
fn test_programs_check_cleanly() {
    let files = fixtures("programs");
    assert!(!files.is_empty(), "No program fixtures found");

    let mut failures = Vec::new();

    for tack_path in files {
        let test_name = tack_path.display().to_string();
        let pipeline = Pipeline::new(read_normalized(&tack_path), test_name.clone());

        match pipeline.check_all() {
            Ok(checked) => {
                let typed = checked.types.iter().count();
                if typed != checked.program.node_count as usize {
                    failures.push(format!(
                        "❌ {test_name}: {typed} of {} nodes typed",
                        checked.program.node_count
                    ));
                }
            }
            Err(error) => failures.push(format!(
                "❌ {test_name}: {}",
                error.format_with_source(pipeline.source())
            )),
        }
    }

    if !failures.is_empty() {
        panic!("\n{}", failures.join("\n"));
    }
}
