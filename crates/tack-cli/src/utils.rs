//! Shared CLI utilities for reading input and finding sources

use std::fs;
use std::io::{self, Read};
use std::path::Path;
use walkdir::WalkDir;

/// Extension of Tack source files
pub const SOURCE_EXTENSION: &str = "tack";

/// Read source code from a file or stdin.
/// If `file` is "-", reads from stdin. Otherwise reads from the specified file.
pub fn read_source(file: &str) -> io::Result<String> {
    if file == "-" {
        let mut source = String::new();
        io::stdin().read_to_string(&mut source)?;
        Ok(source)
    } else {
        fs::read_to_string(file)
    }
}

/// Expand command line paths into the list of sources to check.
///
/// Directories are walked recursively for `*.tack` files, sorted by path. Files and `-`
/// are kept as given, in order.
pub fn collect_sources(paths: &[String]) -> io::Result<Vec<String>> {
    let mut sources = Vec::new();

    for path in paths {
        if path != "-" && Path::new(path).is_dir() {
            let mut found = Vec::new();
            for entry in WalkDir::new(path).sort_by_file_name() {
                let entry = entry.map_err(io::Error::other)?;
                if entry.file_type().is_file()
                    && entry.path().extension().and_then(|e| e.to_str()) == Some(SOURCE_EXTENSION)
                {
                    found.push(entry.path().display().to_string());
                }
            }
            sources.extend(found);
        } else {
            sources.push(path.clone());
        }
    }

    Ok(sources)
}

/// Read a source or exit with status 1
pub fn read_source_or_exit(file: &str) -> String {
    match read_source(file) {
        Ok(content) => content,
        Err(err) => {
            eprintln!("Error reading file '{file}': {err}");
            std::process::exit(1);
        }
    }
}
