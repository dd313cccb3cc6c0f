use crate::api::ExportDocument;
use crate::core::storage::AppCtx;
use console::style;
use std::collections::BTreeSet;
use std::fs;

/// Keep only the requested prompts and the categories they reference.
fn select(mut doc: ExportDocument, ids: &str) -> Result<ExportDocument, String> {
    let wanted: BTreeSet<&str> = ids
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .collect();
    let unknown: Vec<&str> = wanted
        .iter()
        .copied()
        .filter(|id| !doc.prompts.iter().any(|p| p.id == *id))
        .collect();
    if !unknown.is_empty() {
        return Err(format!("No prompt with ID {}", unknown.join(", ")));
    }

    doc.prompts.retain(|p| wanted.contains(p.id.as_str()));
    let used: BTreeSet<&str> = doc
        .prompts
        .iter()
        .filter_map(|p| p.category.as_deref())
        .collect();
    let categories = doc
        .categories
        .iter()
        .filter(|c| used.contains(c.as_str()))
        .cloned()
        .collect();
    doc.categories = categories;
    Ok(doc)
}

/// Export prompts to a JSON file.
pub fn run(ctx: &AppCtx, ids: Option<&str>, out_path: &str) -> Result<(), String> {
    let mut doc = ctx.vault.export_snapshot();
    if let Some(ids) = ids {
        doc = select(doc, ids)?;
    }

    let serialized =
        serde_json::to_string_pretty(&doc).map_err(|e| format!("Serialize error: {}", e))?;
    fs::write(out_path, serialized).map_err(|e| format!("Write error: {}", e))?;
    tracing::info!(
        prompts = doc.prompts.len(),
        categories = doc.categories.len(),
        path = out_path,
        "Exported prompts"
    );
    println!(
        "{} {} prompts exported to {}",
        style("•").green().bold(),
        doc.prompts.len(),
        out_path
    );
    Ok(())
}
