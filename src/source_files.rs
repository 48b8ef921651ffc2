//! Source discovery and file conversion
//!
//! Finds C++ sources under the paths given on the command line, converts
//! each one and writes the Java file next to it (or under an output
//! directory).

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use walkdir::WalkDir;

use crate::config::ConverterConfig;
use crate::diagnostics::Diagnostic;
use crate::error::{Error, Result};
use crate::transpile_main::{convert_source_with, Conversion};

/// Extensions recognized as C++ sources
pub const SOURCE_EXTENSIONS: &[&str] = &["cpp", "cc", "cxx"];

pub fn is_cpp_source(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map_or(false, |ext| SOURCE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}

/// A file is returned as is; a directory is walked recursively for C++
/// sources, sorted by path
pub fn discover_sources(path: &Path) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    if !path.is_dir() {
        return Err(Error::NotFound(path.to_path_buf()));
    }

    let mut sources: Vec<PathBuf> = WalkDir::new(path)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.file_type().is_file() && is_cpp_source(entry.path()))
        .map(|entry| entry.into_path())
        .collect();
    sources.sort();

    if sources.is_empty() {
        return Err(Error::NoSources(path.to_path_buf()));
    }
    debug!(root = %path.display(), count = sources.len(), "discovered sources");
    Ok(sources)
}

/// `dir/abc123.cpp` → `dir/abc123.java`, or `out/abc123.java` with an output
/// directory
pub fn output_path_for(input: &Path, output_dir: Option<&Path>, extension: &str) -> PathBuf {
    let renamed = input.with_extension(extension);
    match (output_dir, renamed.file_name()) {
        (Some(dir), Some(name)) => dir.join(name),
        _ => renamed,
    }
}

/// Outcome of converting one file
#[derive(Debug, Clone)]
pub struct FileReport {
    pub input: PathBuf,
    /// `None` when the output was not written to disk
    pub output: Option<PathBuf>,
    pub conversion: Conversion,
}

impl FileReport {
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.conversion.diagnostics
    }

    /// One `path: message in line N: text` entry per diagnostic
    pub fn diagnostic_lines(&self) -> Vec<String> {
        self.diagnostics()
            .iter()
            .map(|d| format!("{}: {}", self.input.display(), d))
            .collect()
    }
}

pub fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::io(path, e))
}

/// Convert `input` without writing anything
pub fn convert_path(input: &Path, config: &ConverterConfig) -> Result<FileReport> {
    let source = read_source(input)?;
    let conversion = convert_source_with(&source, config);
    Ok(FileReport { input: input.to_path_buf(), output: None, conversion })
}

/// Convert `input` and write the Java file
pub fn convert_file(input: &Path, config: &ConverterConfig, output_dir: Option<&Path>) -> Result<FileReport> {
    let mut report = convert_path(input, config)?;
    let output = output_path_for(input, output_dir, &config.output_extension);

    if let Some(dir) = output_dir {
        fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;
    }
    fs::write(&output, report.conversion.to_text()).map_err(|e| Error::io(&output, e))?;

    info!(
        input = %input.display(),
        output = %output.display(),
        lines = report.conversion.lines.len(),
        diagnostics = report.conversion.diagnostics.len(),
        "converted"
    );
    report.output = Some(output);
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transpile_main::convert_source;

    #[test]
    fn test_source_extensions() {
        assert!(is_cpp_source(Path::new("a/b.cpp")));
        assert!(is_cpp_source(Path::new("b.CC")));
        assert!(!is_cpp_source(Path::new("b.java")));
        assert!(!is_cpp_source(Path::new("Makefile")));
    }

    #[test]
    fn test_output_path() {
        assert_eq!(
            output_path_for(Path::new("dir/abc123.cpp"), None, "java"),
            PathBuf::from("dir/abc123.java")
        );
        assert_eq!(
            output_path_for(Path::new("dir/abc123.cpp"), Some(Path::new("out")), "java"),
            PathBuf::from("out/abc123.java")
        );
    }

    #[test]
    fn test_diagnostic_lines_carry_source_text() {
        let report = FileReport {
            input: PathBuf::from("sol.cpp"),
            output: None,
            conversion: convert_source("int a = 0;\nx = st.top(), st.pop();"),
        };
        let lines = report.diagnostic_lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("sol.cpp: "));
        assert!(lines[0].ends_with(" in line 2: x = st.top(), st.pop();"));
    }

    #[test]
    fn test_missing_path() {
        let err = discover_sources(Path::new("definitely/not/here")).unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }
}
