//! Clean command - apply corrective fixes and write the cleaned rows.

use std::path::PathBuf;

use colored::Colorize;
use datasense::{DataSense, ExportFormat, TransformOperation};

use super::{colored_score, require_file, sibling_path};
use crate::cli::OutputFormat;

pub fn run(
    file: PathBuf,
    missing: bool,
    constant: bool,
    output: Option<PathBuf>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    require_file(&file)?;

    // No selection means both fixes
    let (missing, constant) = if missing || constant {
        (missing, constant)
    } else {
        (true, true)
    };

    let mut operations = Vec::new();
    if missing {
        operations.push(TransformOperation::CleanMissing);
    }
    if constant {
        operations.push(TransformOperation::RemoveConstantColumns);
    }

    let datasense = DataSense::new();
    let data = datasense.load(&file)?;
    let before = data.score().unwrap_or(100);

    println!(
        "{} {}",
        "Cleaning".cyan().bold(),
        data.file_name.white()
    );

    tracing::debug!(?operations, "cleaning");
    let (cleaned, report) = datasense.clean(&data, &operations);

    for change in &report.changes {
        println!("  {:24} {}", change.column, change.description);
    }

    if report.is_noop() {
        println!("{}", "Nothing to fix - data looks clean!".green());
    } else {
        println!(
            "Filled {} values, removed {} columns",
            report.values_changed.to_string().white().bold(),
            report.columns_removed.len().to_string().white().bold()
        );
    }

    println!(
        "Health score: {} -> {}",
        colored_score(before),
        colored_score(cleaned.score().unwrap_or(100))
    );

    let format = ExportFormat::from(format);
    let output_path = output.unwrap_or_else(|| sibling_path(&file, "_clean", format.extension()));
    cleaned.export(&output_path, format)?;
    tracing::info!(path = %output_path.display(), rows = cleaned.row_count(), "wrote cleaned rows");

    println!();
    println!(
        "{} {}",
        "Saved to".green().bold(),
        output_path.display().to_string().white()
    );

    Ok(())
}
