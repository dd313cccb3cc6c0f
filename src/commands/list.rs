use super::filter::criteria_from_args;
use super::prompt_line;
use crate::cli::FilterArgs;
use crate::core::storage::AppCtx;
use console::style;

/// List the visible prompts. Without options the session filter applies.
pub fn run(ctx: &AppCtx, args: &FilterArgs) -> Result<(), String> {
    let criteria = if args.is_empty() {
        ctx.vault.criteria().clone()
    } else {
        criteria_from_args(args, ctx.config.sort)?
    };
    let hits = ctx.vault.visible_prompts(&criteria);

    if hits.is_empty() {
        if ctx.vault.store().is_empty() {
            println!("{}", style("No saved prompts").green().bold());
        } else {
            println!("{}", style("No match").yellow());
        }
        return Ok(());
    }

    if criteria.is_unfiltered() {
        println!("{}", style("Saved Prompts:").green().bold());
    } else {
        println!(
            "{} {}",
            style("Matches:").green().bold(),
            style(format!("{} of {}", hits.len(), ctx.vault.store().len())).dim()
        );
    }
    for prompt in hits {
        println!("{}", prompt_line(prompt));
    }
    Ok(())
}
