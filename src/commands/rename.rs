use crate::api::PromptPatch;
use crate::core::storage::AppCtx;
use console::style;

/// Rename a prompt.
pub fn run(ctx: &mut AppCtx, id: &str, title: &str) -> Result<(), String> {
    ctx.vault
        .update_prompt(id, PromptPatch::default().title(title))
        .map_err(|e| e.to_string())?;
    ctx.save()?;
    println!("{} prompt {} renamed", style("•").green().bold(), id);
    Ok(())
}
