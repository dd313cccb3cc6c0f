use crate::api::PromptPatch;
use crate::core::{storage::AppCtx, utils::parse_tag_line};
use console::style;
use dialoguer::{theme::ColorfulTheme, Editor, Input, Select};

/// Edit a prompt's fields one at a time, then save them together.
pub fn run(ctx: &mut AppCtx, id: &str) -> Result<(), String> {
    let original = ctx.vault.get(id).map_err(|e| e.to_string())?.clone();
    let theme = ColorfulTheme::default();
    let mut patch = PromptPatch::default();

    loop {
        let selections = &[
            "Edit Title",
            "Edit Content",
            "Edit Category",
            "Edit Tags",
            "Finish Editing",
        ];
        let selection = Select::with_theme(&theme)
            .with_prompt("What would you like to do?")
            .default(0)
            .items(&selections[..])
            .interact()
            .map_err(|e| e.to_string())?;

        match selection {
            0 => {
                let title: String = Input::with_theme(&theme)
                    .with_prompt("Title")
                    .with_initial_text(patch.title.as_deref().unwrap_or(&original.title))
                    .interact_text()
                    .map_err(|e| format!("Title error: {}", e))?;
                if title.trim().is_empty() {
                    println!("{}", style("Title cannot be empty.").red());
                    continue;
                }
                let title = title.trim();
                patch.title = (title != original.title).then(|| title.to_string());
            }
            1 => {
                let current = patch.content.as_deref().unwrap_or(&original.content);
                let edited = Editor::new()
                    .edit(current)
                    .map_err(|e| format!("Editor error: {}", e))?;
                // None means the editor was closed without saving.
                if let Some(edited) = edited {
                    patch.content = (edited != original.content).then_some(edited);
                    println!("{}", style("Content updated.").green());
                }
            }
            2 => {
                let current = match &patch.category {
                    Some(category) => category.clone(),
                    None => original.category.clone(),
                };
                let category: String = Input::with_theme(&theme)
                    .with_prompt("Category (empty to clear)")
                    .with_initial_text(current.unwrap_or_default())
                    .allow_empty(true)
                    .interact_text()
                    .map_err(|e| format!("Category error: {}", e))?;
                let category = category.trim();
                let category = (!category.is_empty()).then(|| category.to_string());
                patch.category = (category != original.category).then_some(category);
            }
            3 => {
                let current = patch.tags.as_ref().unwrap_or(&original.tags).join(", ");
                let line: String = Input::with_theme(&theme)
                    .with_prompt("Tags (comma‑separated)")
                    .with_initial_text(current)
                    .allow_empty(true)
                    .interact_text()
                    .map_err(|e| format!("Tags error: {}", e))?;
                let tags = parse_tag_line(&line);
                patch.tags = (tags != original.tags).then_some(tags);
            }
            _ => break,
        }
    }

    if patch.is_empty() {
        println!(
            "{}",
            style("No changes detected. Nothing to save.").yellow()
        );
        return Ok(());
    }

    ctx.vault
        .update_prompt(id, patch)
        .map_err(|e| e.to_string())?;
    ctx.save()?;
    println!(
        "{} Prompt '{}' updated successfully.",
        style("•").green().bold(),
        id
    );
    Ok(())
}
