use crate::core::storage::AppCtx;
use console::style;
use copypasta::{ClipboardContext, ClipboardProvider};

/// Copy prompt content to clipboard.
pub fn run(ctx: &mut AppCtx, id: &str) -> Result<(), String> {
    let content = ctx.vault.get(id).map_err(|e| e.to_string())?.content.clone();

    let mut ctx_clip = ClipboardContext::new().map_err(|e| format!("Clipboard error: {}", e))?;
    ctx_clip
        .set_contents(content)
        .map_err(|e| format!("Clipboard set error: {}", e))?;

    ctx.vault.touch_used(id).map_err(|e| e.to_string())?;
    ctx.save()?;
    println!("{} copied to clipboard", style("•").green().bold());
    Ok(())
}
