//! Defines the command-line interface structure using clap.

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "prompt-vault", version, about = "Local prompt library")]
pub struct Cli {
    /// Log store operations to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Cmd,
}

/// Search, category and tag options shared by `list` and `filter`.
#[derive(Args, Debug, Default, Clone)]
pub struct FilterArgs {
    #[arg(long, short, help = "Case-insensitive text to look for in title, content or tags")]
    pub search: Option<String>,
    #[arg(long, short, help = "Only prompts in this exact category")]
    pub category: Option<String>,
    #[arg(long, conflicts_with = "category", help = "Only prompts without a category")]
    pub uncategorized: bool,
    #[arg(long, short, help = "Only prompts carrying this tag (repeat to require several)")]
    pub tag: Vec<String>,
    #[arg(long, help = "Sort by modified, created, title or last-used")]
    pub sort: Option<String>,
}

impl FilterArgs {
    pub fn is_empty(&self) -> bool {
        self.search.is_none()
            && self.category.is_none()
            && !self.uncategorized
            && self.tag.is_empty()
            && self.sort.is_none()
    }
}

#[derive(Subcommand)]
pub enum Cmd {
    /// List prompts, optionally filtered
    List {
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Create a new prompt
    New {
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long, help = "Comma-separated tags")]
        tags: Option<String>,
    },
    /// Show a prompt and mark it as used
    Get { id: String },
    /// Edit an existing prompt
    Edit { id: String },
    /// Rename a prompt's title
    Rename {
        id: String,
        #[arg(long, help = "New title for the prompt")]
        title: String,
    },
    /// Add (+tag or tag) or remove (-tag) tags on a prompt
    Tag {
        id: String,
        #[arg(
            trailing_var_arg = true,
            allow_hyphen_values = true,
            required = true,
            num_args = 1..,
            help = "Tag changes; put `--` before the first one if it is -h or -v"
        )]
        changes: Vec<String>,
    },
    /// Copy a prompt under a new ID
    Duplicate { id: String },
    /// Delete a prompt by ID
    Delete {
        id: String,
        #[arg(long, short, help = "Do not ask for confirmation")]
        yes: bool,
    },
    /// Copy a prompt's content to the clipboard
    Copy { id: String },
    /// Manage categories
    #[command(subcommand)]
    Category(CategoryCmd),
    /// Show every tag in use with its prompt count
    Tags,
    /// Set the session filter used by `list` without arguments (interactive mode)
    Filter {
        #[command(flatten)]
        filter: FilterArgs,
        #[arg(long, help = "Toggle a tag in the current selection")]
        toggle: Vec<String>,
        #[arg(long, help = "Reset every filter")]
        clear: bool,
    },
    /// Export prompts to a JSON file
    Export {
        #[arg(long, help = "Comma-separated list of prompt IDs to export")]
        ids: Option<String>,
        #[arg(long, help = "Output file path")]
        out: String,
    },
    /// Import prompts from a JSON file
    Import {
        file: String,
        #[arg(long, help = "On ID collision: skip, replace or duplicate")]
        strategy: Option<String>,
    },
    /// Show store statistics
    Stats,
    /// Start an interactive session (REPL)
    Interactive,
}

#[derive(Subcommand)]
pub enum CategoryCmd {
    /// Register a category name
    Add { name: String },
    /// List registered categories with prompt counts
    List,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag_changes(args: &[&str]) -> Vec<String> {
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Cmd::Tag { changes, .. } => changes,
            _ => panic!("expected the tag command"),
        }
    }

    #[test]
    fn tag_removals_after_the_first_change_are_values() {
        let changes = tag_changes(&["prompt-vault", "tag", "ab12", "+x", "-h", "-v"]);
        assert_eq!(changes, vec!["+x", "-h", "-v"]);
    }

    #[test]
    fn double_dash_lets_a_change_look_like_a_flag() {
        let cli = Cli::try_parse_from(["prompt-vault", "tag", "ab12", "--", "-v", "-h"]).unwrap();
        assert!(!cli.verbose);
        match cli.command {
            Cmd::Tag { changes, .. } => assert_eq!(changes, vec!["-v", "-h"]),
            _ => panic!("expected the tag command"),
        }
    }

    #[test]
    fn plain_removal_is_accepted() {
        assert_eq!(tag_changes(&["prompt-vault", "tag", "ab12", "-old"]), vec!["-old"]);
    }
}
