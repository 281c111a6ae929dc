use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "streaks")]
#[command(about = "A habit tracker for your terminal")]
#[command(long_about = "streaks - A habit tracker for your terminal

Register daily habits, mark them done, and keep an eye on your streaks.
Completions are recorded once per calendar day; statistics cover the
current streak, a rolling 30-day window, and weekly/monthly buckets.

QUICK START:
  streaks add \"Read\" --remind 21:00    Register a habit with a reminder
  streaks done 1                        Mark habit 1 done for today
  streaks list                          Show all habits with streaks
  streaks stats 1                       Show streak and bucket statistics

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting

For more information on a specific command, run:
  streaks <command> --help")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Use 'pretty' for human-readable colored output (default),
    /// or 'json' for machine-readable output suitable for scripting.
    #[arg(short, long, value_enum, default_value = "pretty", global = true)]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Register a new habit
    ///
    /// The habit is created today and starts with an empty completion
    /// log. An optional reminder fires once per interactive session at
    /// the given clock time.
    ///
    /// # Examples
    ///
    ///   streaks add "Read"
    ///   streaks add "Morning run" --remind 07:30
    #[command(alias = "a")]
    Add(AddArgs),

    /// List all habits
    ///
    /// Shows every registered habit with its id, creation date, current
    /// streak, last completion date, and reminder time.
    ///
    /// # Examples
    ///
    ///   streaks list
    ///   streaks ls -o json
    #[command(alias = "ls")]
    List,

    /// Mark a habit done for today
    ///
    /// Records at most one completion per calendar day; marking a habit
    /// that is already done today is a no-op, not an error. Without an
    /// id, an interactive fuzzy picker opens.
    ///
    /// # Examples
    ///
    ///   streaks done 1
    ///   streaks d          Pick the habit interactively
    #[command(alias = "d")]
    Done {
        /// Habit id (picker opens when omitted)
        id: Option<i64>,
    },

    /// Edit a habit's name or reminder
    ///
    /// The habit id and creation date never change. Editing cancels any
    /// pending reminder; a new one is armed only if the habit still has
    /// a reminder time afterwards.
    ///
    /// # Examples
    ///
    ///   streaks edit 1 --name "Read more"
    ///   streaks edit 1 --remind 21:00
    ///   streaks edit 1 --clear-reminder
    Edit(EditArgs),

    /// Delete a habit and its completion log
    ///
    /// Removes the habit's log entries first, then the habit itself.
    /// Asks for confirmation unless --yes is given.
    ///
    /// # Examples
    ///
    ///   streaks delete 1
    ///   streaks rm 1 --yes
    #[command(alias = "rm")]
    Delete {
        /// Habit id (picker opens when omitted)
        id: Option<i64>,
        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Show streak and bucket statistics for a habit
    ///
    /// Reports the current streak, the rolling 30-day window, the most
    /// recent completions, and weekly (4) and monthly (6) buckets.
    ///
    /// # Examples
    ///
    ///   streaks stats 1
    ///   streaks stats 1 -o json
    Stats {
        /// Habit id (picker opens when omitted)
        id: Option<i64>,
    },

    /// Export the habit report to a CSV file
    ///
    /// Writes one row per (habit, completion date) pair with a
    /// `Habit,Created,Done` header. Habits with no completions still
    /// produce one row with an empty Done field.
    ///
    /// # Examples
    ///
    ///   streaks export
    ///   streaks export ~/habits.csv
    Export {
        /// Output path (defaults to the exports directory)
        path: Option<PathBuf>,
    },

    /// Generate shell completions
    ///
    /// # Examples
    ///
    ///   streaks completions zsh > ~/.zfunc/_streaks
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },

    /// Open the interactive habit grid
    ///
    /// A full-screen table of habits with keys for add, edit, delete,
    /// mark-done, stats, and export. Stored reminders are armed while
    /// the grid is open and fire on the status line.
    Tui,
}

/// Arguments for the add command.
#[derive(Args)]
pub struct AddArgs {
    /// Habit name
    pub name: String,

    /// Daily reminder time in 24-hour HH:MM format
    #[arg(long, value_name = "HH:MM")]
    pub remind: Option<String>,
}

/// Arguments for the edit command.
#[derive(Args)]
pub struct EditArgs {
    /// Habit id
    pub id: i64,

    /// New habit name
    #[arg(long)]
    pub name: Option<String>,

    /// New reminder time in 24-hour HH:MM format
    #[arg(long, value_name = "HH:MM", conflicts_with = "clear_reminder")]
    pub remind: Option<String>,

    /// Remove the reminder
    #[arg(long)]
    pub clear_reminder: bool,
}
