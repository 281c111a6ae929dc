use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use streaks::cli::args::{Cli, Commands};
use streaks::cli::commands;
use streaks::error::StreaksError;
use streaks::habits::HabitStore;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), StreaksError> {
    let cli = Cli::parse();
    let format = cli.output;

    let output = match cli.command {
        Commands::Add(args) => {
            let store = HabitStore::open()?;
            commands::add(&store, &args, format)?
        }
        Commands::List => {
            let store = HabitStore::open()?;
            commands::list(&store, format)?
        }
        Commands::Done { id } => {
            let store = HabitStore::open()?;
            commands::done(&store, id, format)?
        }
        Commands::Edit(args) => {
            let store = HabitStore::open()?;
            commands::edit(&store, &args, format)?
        }
        Commands::Delete { id, yes } => {
            let mut store = HabitStore::open()?;
            commands::delete(&mut store, id, yes, format)?
        }
        Commands::Stats { id } => {
            let store = HabitStore::open()?;
            commands::stats(&store, id, format)?
        }
        Commands::Export { path } => {
            let store = HabitStore::open()?;
            commands::export(&store, path, format)?
        }
        Commands::Completions { shell } => commands::completions(shell),
        Commands::Tui => {
            let store = HabitStore::open()?;
            streaks::tui::run(store)?;
            String::new()
        }
    };

    if !output.is_empty() {
        println!("{}", output);
    }
    Ok(())
}
