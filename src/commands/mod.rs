use crate::cli::{CategoryCmd, Cmd};
use crate::core::storage::{AppCtx, Prompt};
use console::style;

pub mod category;
pub mod copy;
pub mod delete;
pub mod duplicate;
pub mod edit;
pub mod export;
pub mod filter;
pub mod get;
pub mod import;
pub mod interactive;
pub mod list;
pub mod new;
pub mod rename;
pub mod stats;
pub mod tag;
pub mod tags;

/// Dispatches the parsed command to the appropriate handler.
pub fn dispatch(command: Cmd, ctx: &mut AppCtx) -> Result<(), String> {
    match command {
        Cmd::List { filter } => list::run(ctx, &filter),
        Cmd::New {
            title,
            content,
            category,
            tags,
        } => new::run(ctx, title, content, category, tags),
        Cmd::Get { id } => get::run(ctx, &id),
        Cmd::Edit { id } => edit::run(ctx, &id),
        Cmd::Rename { id, title } => rename::run(ctx, &id, &title),
        Cmd::Tag { id, changes } => tag::run(ctx, &id, &changes),
        Cmd::Duplicate { id } => duplicate::run(ctx, &id),
        Cmd::Delete { id, yes } => delete::run(ctx, &id, yes),
        Cmd::Copy { id } => copy::run(ctx, &id),
        Cmd::Category(category_cmd) => match category_cmd {
            CategoryCmd::Add { name } => category::add(ctx, &name),
            CategoryCmd::List => category::list(ctx),
        },
        Cmd::Tags => tags::run(ctx),
        Cmd::Filter {
            filter,
            toggle,
            clear,
        } => filter::run(ctx, &filter, &toggle, clear),
        Cmd::Export { ids, out } => export::run(ctx, ids.as_deref(), &out),
        Cmd::Import { file, strategy } => import::run(ctx, &file, strategy.as_deref()),
        Cmd::Stats => stats::run(ctx),
        Cmd::Interactive => interactive::run(ctx),
    }
}

/// One-line summary used by listings.
pub(crate) fn prompt_line(prompt: &Prompt) -> String {
    let mut line = format!(
        "  {} {} - {}",
        style("•").green(),
        style(&prompt.id).yellow(),
        prompt.title
    );
    if let Some(category) = &prompt.category {
        line.push_str(&format!(" {}", style(format!("[{}]", category)).dim()));
    }
    if !prompt.tags.is_empty() {
        let tags: Vec<String> = prompt.tags.iter().map(|t| format!("#{}", t)).collect();
        line.push_str(&format!(" {}", style(tags.join(" ")).cyan()));
    }
    line
}
