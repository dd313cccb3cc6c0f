use crate::api::ImportStrategy;
use crate::core::storage::AppCtx;
use console::style;
use serde_json::Value;
use std::fs;

/// Import prompts from a JSON file.
pub fn run(ctx: &mut AppCtx, file: &str, strategy: Option<&str>) -> Result<(), String> {
    let strategy = match strategy {
        Some(raw) => raw.parse::<ImportStrategy>().map_err(|e| e.to_string())?,
        None => ctx.config.import_strategy,
    };

    let raw = fs::read_to_string(file).map_err(|e| format!("Read error: {}", e))?;
    let document: Value =
        serde_json::from_str(&raw).map_err(|e| format!("Invalid JSON in {}: {}", file, e))?;
    let report = ctx
        .vault
        .import_document(&document, strategy)
        .map_err(|e| e.to_string())?;
    ctx.save()?;

    println!(
        "{} imported {}, replaced {}, skipped {} ({})",
        style("•").green().bold(),
        style(report.imported).yellow(),
        style(report.replaced).yellow(),
        style(report.skipped).yellow(),
        strategy
    );
    if report.categories_added > 0 {
        println!("  {} new categories", report.categories_added);
    }
    if report.malformed_count() > 0 {
        println!(
            "{} {} malformed records ignored:",
            style("•").red().bold(),
            report.malformed_count()
        );
        for bad in &report.malformed {
            println!("  - {}", bad);
        }
    }
    Ok(())
}
