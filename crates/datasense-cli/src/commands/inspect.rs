//! Inspect command - print a table's schema and health report.

use std::path::PathBuf;

use colored::Colorize;
use datasense::{DataSense, DataSenseConfig, ParserConfig, Severity};

use super::{colored_score, require_file};

pub fn run(
    file: PathBuf,
    json_output: bool,
    delimiter: Option<char>,
    no_typing: bool,
    max_rows: Option<usize>,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    require_file(&file)?;

    let delimiter = match delimiter {
        Some(c) if c.is_ascii() => Some(c as u8),
        Some(c) => return Err(format!("Delimiter must be a single ASCII character, got '{}'", c).into()),
        None => None,
    };

    let config = DataSenseConfig {
        parser: ParserConfig {
            delimiter,
            max_rows,
            dynamic_typing: !no_typing,
            ..ParserConfig::default()
        },
    };

    tracing::debug!(?config, "inspect configuration");
    let data = DataSense::with_config(config).load(&file)?;

    if json_output {
        let summary = serde_json::json!({
            "id": data.id,
            "file_name": data.file_name,
            "columns": data.columns,
            "summary": data.summary,
            "health": data.health,
            "source": data.source,
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!(
        "{} {} ({} rows, {} columns)",
        "Inspecting".cyan().bold(),
        data.file_name.white(),
        data.row_count().to_string().white().bold(),
        data.column_count()
    );
    println!();

    println!("{}", "Schema:".yellow().bold());
    for column in &data.columns {
        println!("  {:24} {}", column, data.column_type(column).label());
    }
    println!();

    let Some(health) = data.health.as_ref() else {
        return Ok(());
    };

    println!("Health score: {}", colored_score(health.score));

    if health.issues.is_empty() {
        println!("{}", "No issues found - data looks clean!".green());
        return Ok(());
    }

    println!();
    println!("{}", "Issues:".yellow().bold());
    for issue in &health.issues {
        let severity = match issue.severity {
            Severity::High => issue.severity.label().red(),
            Severity::Medium => issue.severity.label().yellow(),
            Severity::Low => issue.severity.label().blue(),
        };
        println!(
            "  [{:6}] {:24} {}",
            severity,
            issue.column,
            issue.message
        );
        if verbose {
            println!("           {} (-{})", issue.issue_type.label().dimmed(), issue.penalty());
        }
    }

    println!();
    println!("{}", "Suggestions:".yellow().bold());
    for suggestion in &health.suggestions {
        println!("  - {}", suggestion);
    }

    println!();
    println!(
        "Run {} to fix them.",
        format!("datasense clean {}", file.display()).cyan().bold()
    );

    Ok(())
}
