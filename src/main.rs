use clap::Parser;
use prompt_vault::cli::Cli;
use prompt_vault::commands;
use prompt_vault::core::{logging, storage::AppCtx};

fn main() {
    if let Err(e) = run() {
        eprintln!("• {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let mut ctx = AppCtx::init()?;
    commands::dispatch(cli.command, &mut ctx)
}
