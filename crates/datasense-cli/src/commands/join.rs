//! Join command - inner-join two files and write the joined rows.

use std::path::PathBuf;

use colored::Colorize;
use datasense::{DataSense, ExportFormat, RelationshipType};

use super::require_file;
use crate::cli::OutputFormat;

pub fn run(
    left: PathBuf,
    right: PathBuf,
    left_field: String,
    right_field: String,
    relationship_type: RelationshipType,
    output: Option<PathBuf>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    require_file(&left)?;
    require_file(&right)?;

    let datasense = DataSense::new();
    let left_data = datasense.load(&left)?;
    let right_data = datasense.load(&right)?;

    for (data, field) in [(&left_data, &left_field), (&right_data, &right_field)] {
        if !data.has_column(field) {
            tracing::warn!(file = %data.file_name, field = %field, "join field not found");
            println!(
                "{} {} has no column '{}'; the join will be empty.",
                "Warning:".yellow().bold(),
                data.file_name,
                field
            );
        }
    }

    let joined = datasense.join(
        &left_data,
        &right_data,
        &left_field,
        &right_field,
        relationship_type,
    );
    let relationship = &joined.relationship;

    println!(
        "{} {}.{} -> {}.{} ({})",
        "Joined".cyan().bold(),
        left_data.file_name.white(),
        relationship.from_field,
        right_data.file_name.white(),
        relationship.to_field,
        relationship.relationship_type
    );
    println!(
        "{} rows, {} columns",
        joined.data.row_count().to_string().white().bold(),
        joined.data.column_count()
    );

    let format = ExportFormat::from(format);
    let output_path = output.unwrap_or_else(|| {
        left.with_file_name(format!("{}.{}", joined.data.file_name, format.extension()))
    });
    joined.data.export(&output_path, format)?;
    tracing::info!(path = %output_path.display(), rows = joined.data.row_count(), "wrote joined rows");

    println!();
    println!(
        "{} {}",
        "Saved to".green().bold(),
        output_path.display().to_string().white()
    );

    Ok(())
}
