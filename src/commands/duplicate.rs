use crate::core::storage::AppCtx;
use console::style;

/// Copy a prompt under a new ID.
pub fn run(ctx: &mut AppCtx, id: &str) -> Result<(), String> {
    let new_id = ctx.vault.duplicate_prompt(id).map_err(|e| e.to_string())?;
    ctx.save()?;
    let title = ctx
        .vault
        .get(&new_id)
        .map(|p| p.title.clone())
        .unwrap_or_default();
    println!(
        "{} prompt {} duplicated as {} '{}'",
        style("•").green().bold(),
        id,
        style(&new_id).yellow(),
        title
    );
    Ok(())
}
