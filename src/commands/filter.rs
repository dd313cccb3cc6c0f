use crate::api::{CategoryFilter, FilterCriteria, SortOrder};
use crate::cli::FilterArgs;
use crate::core::storage::AppCtx;
use console::style;

/// Turn command-line filter options into criteria, starting from `sort`
/// when no `--sort` is given.
pub fn criteria_from_args(args: &FilterArgs, sort: SortOrder) -> Result<FilterCriteria, String> {
    let sort = match &args.sort {
        Some(raw) => raw.parse::<SortOrder>().map_err(|e| e.to_string())?,
        None => sort,
    };
    let category = if args.uncategorized {
        CategoryFilter::Uncategorized
    } else {
        match args.category.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => CategoryFilter::Named(name.to_string()),
            _ => CategoryFilter::Any,
        }
    };

    let criteria = args.tag.iter().fold(
        FilterCriteria::default()
            .search(args.search.clone().unwrap_or_default())
            .category(category)
            .sort(sort),
        |criteria, tag| criteria.tag(tag.trim()),
    );
    Ok(criteria)
}

/// Set, adjust or clear the session filter.
pub fn run(ctx: &mut AppCtx, args: &FilterArgs, toggle: &[String], clear: bool) -> Result<(), String> {
    if clear {
        ctx.vault.clear_criteria();
    }
    if !args.is_empty() {
        let sort = ctx.vault.criteria().sort;
        let criteria = criteria_from_args(args, sort)?;
        ctx.vault.set_criteria(criteria);
    }
    for tag in toggle {
        let selected = ctx.vault.toggle_tag(tag);
        if !selected && !ctx.vault.current_tag_index().contains(tag) {
            println!("{} tag '{}' is not used by any prompt", style("•").yellow(), tag);
        }
    }

    let criteria = ctx.vault.criteria();
    println!("{}", style("Active filter:").green().bold());
    println!(
        "  search:   {}",
        if criteria.search.trim().is_empty() {
            "-"
        } else {
            criteria.search.as_str()
        }
    );
    let category = match &criteria.category {
        CategoryFilter::Any => "-".to_string(),
        CategoryFilter::Uncategorized => "(uncategorized)".to_string(),
        CategoryFilter::Named(name) => name.clone(),
    };
    println!("  category: {}", category);
    println!(
        "  tags:     {}",
        if criteria.tags.is_empty() {
            "-".to_string()
        } else {
            criteria.tags.join(", ")
        }
    );
    println!("  sort:     {}", criteria.sort);
    println!(
        "  {} of {} prompts visible",
        style(ctx.vault.visible().len()).yellow(),
        ctx.vault.store().len()
    );
    Ok(())
}
