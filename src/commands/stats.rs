use crate::api::TagIndex;
use crate::core::storage::AppCtx;
use console::style;

/// Display statistics about the prompt store.
pub fn run(ctx: &AppCtx) -> Result<(), String> {
    let store = ctx.vault.store();
    let uncategorized = store.prompts().filter(|p| p.category.is_none()).count();
    let words: usize = store.prompts().map(|p| p.word_count()).sum();
    let tag_counts = TagIndex::counts(store);

    println!("{}", style("Prompt Vault Statistics").bold().underlined());
    println!(
        "{}: {}",
        style("Total Prompts").cyan(),
        style(store.len()).yellow()
    );
    println!(
        "{}: {}",
        style("Categories").cyan(),
        style(store.categories().count()).yellow()
    );
    println!(
        "{}: {}",
        style("Uncategorized Prompts").cyan(),
        style(uncategorized).yellow()
    );
    println!(
        "{}: {}",
        style("Distinct Tags").cyan(),
        style(tag_counts.len()).yellow()
    );
    println!("{}: {}", style("Total Words").cyan(), style(words).yellow());

    if !tag_counts.is_empty() {
        let mut sorted_tags: Vec<_> = tag_counts.into_iter().collect();
        sorted_tags.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        println!("\n{}", style("Top Tags:").bold().underlined());
        for (tag, count) in sorted_tags.iter().take(10) {
            println!("  - {} ({})", style(tag).green(), count);
        }
    }

    let recent = store
        .prompts()
        .filter_map(|p| p.last_used_at.map(|at| (at, p)))
        .max_by(|a, b| a.0.cmp(&b.0).then_with(|| b.1.id.cmp(&a.1.id)));
    if let Some((at, prompt)) = recent {
        println!(
            "\n{} {} ({}, {})",
            style("Last Used:").bold().underlined(),
            prompt.title,
            style(&prompt.id).yellow(),
            at.format("%Y-%m-%d %H:%M")
        );
    }

    Ok(())
}
