use crate::core::storage::AppCtx;
use console::style;
use std::collections::BTreeMap;

/// Register a category name.
pub fn add(ctx: &mut AppCtx, name: &str) -> Result<(), String> {
    let added = ctx.vault.add_category(name).map_err(|e| e.to_string())?;
    if !added {
        println!("{} category '{}' already exists", style("•").yellow(), name.trim());
        return Ok(());
    }
    ctx.save()?;
    println!("{} category '{}' added", style("•").green().bold(), name.trim());
    Ok(())
}

/// List registered categories with the number of prompts in each.
pub fn list(ctx: &AppCtx) -> Result<(), String> {
    let store = ctx.vault.store();
    let mut counts: BTreeMap<&str, usize> = store.categories().map(|c| (c, 0)).collect();
    let mut uncategorized = 0;
    for prompt in store.prompts() {
        match prompt.category.as_deref() {
            Some(name) => *counts.entry(name).or_insert(0) += 1,
            None => uncategorized += 1,
        }
    }

    if counts.is_empty() {
        println!("{}", style("No categories").green().bold());
    } else {
        println!("{}", style("Categories:").green().bold());
        for (name, count) in &counts {
            println!("  {} {} ({})", style("•").green(), name, count);
        }
    }
    if uncategorized > 0 {
        println!("  {} {} ({})", style("•").dim(), style("(uncategorized)").dim(), uncategorized);
    }
    Ok(())
}
