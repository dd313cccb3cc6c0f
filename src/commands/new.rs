use crate::core::{storage::AppCtx, utils::parse_tag_line};
use console::style;
use dialoguer::{theme::ColorfulTheme, Editor, Input};

/// Create a new prompt, asking for whatever was not given on the command line.
pub fn run(
    ctx: &mut AppCtx,
    title: Option<String>,
    content: Option<String>,
    category: Option<String>,
    tags: Option<String>,
) -> Result<(), String> {
    let theme = ColorfulTheme::default();
    let interactive = title.is_none();

    let title = match title {
        Some(title) => title,
        None => Input::with_theme(&theme)
            .with_prompt("Title")
            .interact_text()
            .map_err(|e| format!("Title error: {}", e))?,
    };
    if title.trim().is_empty() {
        return Err("Title cannot be empty".to_string());
    }

    let category = match category {
        Some(category) => category,
        None if interactive => {
            let known: Vec<&str> = ctx.vault.store().categories().collect();
            let prompt = if known.is_empty() {
                "Category (optional)".to_string()
            } else {
                format!("Category (optional; known: {})", known.join(", "))
            };
            Input::with_theme(&theme)
                .with_prompt(prompt)
                .allow_empty(true)
                .interact_text()
                .map_err(|e| format!("Category error: {}", e))?
        }
        None => String::new(),
    };

    let tags_line = match tags {
        Some(tags) => tags,
        None if interactive => Input::with_theme(&theme)
            .with_prompt("Tags (comma‑separated, optional)")
            .allow_empty(true)
            .interact_text()
            .map_err(|e| format!("Tags error: {}", e))?,
        None => String::new(),
    };

    let content = match content {
        Some(content) => content,
        None => Editor::new()
            .edit("Enter your prompt content here.")
            .map_err(|e| format!("Editor error: {}", e))?
            .unwrap_or_default(),
    };

    let id = ctx
        .vault
        .create_prompt(&title, &content, Some(&category), parse_tag_line(&tags_line))
        .map_err(|e| e.to_string())?;
    ctx.save()?;

    println!(
        "{} Prompt saved with ID {} and title '{}'",
        style("•").green().bold(),
        style(&id).yellow(),
        title.trim()
    );
    Ok(())
}
