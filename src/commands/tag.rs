use crate::api::PromptPatch;
use crate::core::storage::AppCtx;
use console::style;

#[derive(Debug, PartialEq, Eq)]
enum TagChange<'a> {
    Add(&'a str),
    Remove(&'a str),
}

fn parse_change(raw: &str) -> Option<TagChange<'_>> {
    let raw = raw.trim();
    let change = match raw.strip_prefix('-') {
        Some(tag) => TagChange::Remove(tag.trim()),
        None => TagChange::Add(raw.strip_prefix('+').unwrap_or(raw).trim()),
    };
    match change {
        TagChange::Add("") | TagChange::Remove("") => None,
        change => Some(change),
    }
}

/// Apply `changes` to `tags` in order. Removing an absent tag is a no-op.
fn apply_changes(tags: &[String], changes: &[String]) -> Result<Vec<String>, String> {
    let mut tags = tags.to_vec();
    for raw in changes {
        match parse_change(raw) {
            Some(TagChange::Add(tag)) => {
                if !tags.iter().any(|t| t == tag) {
                    tags.push(tag.to_string());
                }
            }
            Some(TagChange::Remove(tag)) => tags.retain(|t| t != tag),
            None => return Err(format!("Invalid tag change '{}'", raw)),
        }
    }
    Ok(tags)
}

/// Add or remove tags on a prompt.
pub fn run(ctx: &mut AppCtx, id: &str, changes: &[String]) -> Result<(), String> {
    let current = &ctx.vault.get(id).map_err(|e| e.to_string())?.tags;
    let tags = apply_changes(current, changes)?;
    if &tags == current {
        println!("{}", style("Tags unchanged.").yellow());
        return Ok(());
    }

    ctx.vault
        .update_prompt(id, PromptPatch::default().tags(tags.clone()))
        .map_err(|e| e.to_string())?;
    ctx.save()?;
    println!(
        "{} prompt {} tags: {}",
        style("•").green().bold(),
        id,
        if tags.is_empty() {
            "(none)".to_string()
        } else {
            tags.join(", ")
        }
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn plus_minus_and_bare_changes() {
        let tags = strings(&["a", "b"]);
        let out = apply_changes(&tags, &strings(&["+c", "-a", "d", "b"])).unwrap();
        assert_eq!(out, strings(&["b", "c", "d"]));
    }

    #[test]
    fn removing_missing_tag_is_noop() {
        let tags = strings(&["a"]);
        assert_eq!(apply_changes(&tags, &strings(&["-zzz"])).unwrap(), tags);
    }

    #[test]
    fn empty_change_is_rejected() {
        assert!(apply_changes(&[], &strings(&["-"])).is_err());
        assert!(apply_changes(&[], &strings(&["+ "])).is_err());
    }
}
