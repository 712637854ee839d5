//! Export command - save the loaded table and its health report as JSON.

use std::path::PathBuf;

use colored::Colorize;
use datasense::DataSense;

use super::{colored_score, require_file, sibling_path};

pub fn run(file: PathBuf, output: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    require_file(&file)?;

    let data = DataSense::new().load(&file)?;
    let output_path = output.unwrap_or_else(|| sibling_path(&file, ".datasense", "json"));

    data.save(&output_path)?;
    tracing::info!(id = %data.id, path = %output_path.display(), "saved table");

    println!(
        "{} {} ({} rows, score {})",
        "Saved to".green().bold(),
        output_path.display().to_string().white(),
        data.row_count(),
        colored_score(data.score().unwrap_or(100))
    );

    Ok(())
}
