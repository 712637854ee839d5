//! CLI command implementations.

pub mod clean;
pub mod export;
pub mod inspect;
pub mod join;

use std::path::{Path, PathBuf};

use colored::{ColoredString, Colorize};

/// Fail early with a readable message when the input is missing.
pub(crate) fn require_file(file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }
    Ok(())
}

/// `<dir>/<stem><suffix>.<extension>` next to `file`.
pub(crate) fn sibling_path(file: &Path, suffix: &str, extension: &str) -> PathBuf {
    let stem = file.file_stem().unwrap_or_default().to_string_lossy();
    file.with_file_name(format!("{}{}.{}", stem, suffix, extension))
}

/// Health score colored by band.
pub(crate) fn colored_score(score: u32) -> ColoredString {
    let text = format!("{}/100", score);
    if score >= 80 {
        text.green()
    } else if score >= 50 {
        text.yellow()
    } else {
        text.red()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sibling_path() {
        let path = sibling_path(Path::new("data/sales.csv"), "_clean", "tsv");
        assert_eq!(path, PathBuf::from("data/sales_clean.tsv"));
    }

    #[test]
    fn test_require_file_missing() {
        let err = require_file(Path::new("does/not/exist.csv")).unwrap_err();
        assert!(err.to_string().contains("File not found"));
    }
}
