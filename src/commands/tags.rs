use crate::api::TagIndex;
use crate::core::storage::AppCtx;
use console::style;

/// Show every tag in use and how many prompts carry it.
pub fn run(ctx: &AppCtx) -> Result<(), String> {
    let counts = TagIndex::counts(ctx.vault.store());
    if counts.is_empty() {
        println!("{}", style("No tags").green().bold());
        return Ok(());
    }
    let selected = &ctx.vault.criteria().tags;
    println!("{}", style("Tags:").green().bold());
    for (tag, count) in counts {
        let marker = if selected.contains(&tag) {
            style("*").cyan().bold()
        } else {
            style(" ")
        };
        println!("  {} {} ({})", marker, style(&tag).cyan(), count);
    }
    Ok(())
}
