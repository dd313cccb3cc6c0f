use crate::core::storage::AppCtx;
use console::style;

/// Display a prompt and record that it was used.
pub fn run(ctx: &mut AppCtx, id: &str) -> Result<(), String> {
    ctx.vault.touch_used(id).map_err(|e| e.to_string())?;
    ctx.save()?;

    let pd = ctx.vault.get(id).map_err(|e| e.to_string())?;
    println!("{} {}", style("Title:").green().bold(), pd.title);
    println!(
        "{} {}",
        style("Category:").green().bold(),
        pd.category.as_deref().unwrap_or("(uncategorized)")
    );
    if !pd.tags.is_empty() {
        println!("{} {}", style("Tags:").green().bold(), pd.tags.join(", "));
    }
    println!(
        "{} {}",
        style("Words:").green().bold(),
        pd.word_count()
    );
    println!(
        "{} {}  {} {}",
        style("Created:").green().bold(),
        pd.created_at.format("%Y-%m-%d %H:%M"),
        style("Modified:").green().bold(),
        pd.modified_at.format("%Y-%m-%d %H:%M")
    );
    println!("{}", style("Content:").green().bold());
    println!("{}", pd.content);
    Ok(())
}
