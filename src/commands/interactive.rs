use crate::cli::{Cli, Cmd};
use crate::commands::dispatch;
use crate::core::storage::AppCtx;
use clap::Parser;
use console::style;
use dialoguer::Input;

/// Run the CLI in interactive REPL mode. The vault stays loaded between
/// commands so the session filter carries over.
pub fn run(ctx: &mut AppCtx) -> Result<(), String> {
    println!("Entering interactive mode. Type 'exit' or 'quit' to leave.");
    loop {
        let input: String = Input::new()
            .with_prompt(format!("{}", style("pv >").blue().bold()))
            .allow_empty(true)
            .interact_text()
            .map_err(|e| format!("Input error: {}", e))?;

        let input = input.trim();
        if input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit") {
            break;
        }
        if input.is_empty() {
            continue;
        }

        let args = match shell_words::split(input) {
            Ok(args) => args,
            Err(e) => {
                eprintln!("• Error parsing command: {}", e);
                continue;
            }
        };

        let full_args = std::iter::once("prompt-vault".to_string()).chain(args);

        match Cli::try_parse_from(full_args) {
            Ok(cli) => {
                if matches!(cli.command, Cmd::Interactive) {
                    eprintln!("• Already in interactive mode");
                    continue;
                }
                if let Err(e) = dispatch(cli.command, ctx) {
                    eprintln!("• {}", e);
                }
            }
            Err(e) => {
                e.print().unwrap_or(());
            }
        }
    }
    Ok(())
}
