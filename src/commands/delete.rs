use crate::core::storage::AppCtx;
use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm};

/// Delete a prompt, asking first unless `yes` is set.
pub fn run(ctx: &mut AppCtx, id: &str, yes: bool) -> Result<(), String> {
    let title = ctx.vault.get(id).map_err(|e| e.to_string())?.title.clone();
    if !yes {
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(format!("Delete '{}' ({})? This cannot be undone", title, id))
            .default(false)
            .interact()
            .map_err(|e| e.to_string())?;
        if !confirmed {
            println!("{}", style("Aborted.").yellow());
            return Ok(());
        }
    }

    ctx.vault.delete_prompt(id).map_err(|e| e.to_string())?;
    ctx.save()?;
    println!("{} prompt {} deleted", style("•").green().bold(), id);
    Ok(())
}
