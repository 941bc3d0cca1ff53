use clap::{Parser, Subcommand, ValueEnum};
use leads_kanban::LeadStatus;
use std::path::PathBuf;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Yaml,
}

#[derive(Parser, Debug)]
#[command(name = "leads")]
#[command(version)]
#[command(about = "Work the lead kanban board from the command line")]
#[command(long_about = "
leads shows the sales lead board and applies the same gestures the web board
offers: moving a lead onto a column or onto another lead, and adding, deleting
and restoring columns. Every change goes to the lead API first and the board is
rebuilt from what the API returns.

Global arguments can be used with any command:
  --config      Merge this configuration file over the discovered ones
  --memory      Work on a local JSON seed file instead of the API
  --format      Set output format (table, json, yaml)
  --verbose     Show progress logging
  --debug       Show reconciliation detail
  --quiet       Suppress all logging except errors

Example usage:
  leads board                              # Show the board
  leads move 64f1c2 Contacted              # Drop a lead on a status column
  leads move 64f1c2 64f1c9                 # Drop a lead on another lead
  leads column add \"Hot Leads\"             # Add a custom column
  leads --format=json columns              # List columns as JSON
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file merged over the discovered ones
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Use a JSON seed file as the store; changes are written back to it
    #[arg(long, global = true, value_name = "FILE")]
    pub memory: Option<PathBuf>,

    /// Name recorded on logged operations
    #[arg(long, global = true)]
    pub actor: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(long, value_enum, global = true, default_value_t)]
    pub format: OutputFormat,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show every column with its leads
    Board,
    /// List columns with their lead counts
    Columns,
    /// Drop a lead on a column or on another lead
    #[command(long_about = "
Drop a lead on a target. The target is a column id (a status such as
\"Contacted\" or a custom column id) or the id of another lead, in which case
the lead joins that lead's column. Dropping within the same column only
reorders and is not saved. Without a target nothing happens.
")]
    Move {
        /// Lead to move
        lead: String,
        /// Column id or lead id to drop on
        target: Option<String>,
    },
    /// Add, delete or restore columns
    Column {
        #[command(subcommand)]
        command: ColumnCommands,
    },
    /// Manage leads
    Lead {
        #[command(subcommand)]
        command: LeadCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum ColumnCommands {
    /// Add a custom column after the existing ones
    Add {
        /// Column title; must not match an existing column
        title: String,
    },
    /// Delete a column, moving its leads to New first
    Delete {
        /// Status value or custom column id
        id: String,
    },
    /// Show a deleted status column again
    Restore {
        /// Status value, e.g. "In Discussion"
        status: LeadStatus,
    },
}

#[derive(Subcommand, Debug)]
pub enum LeadCommands {
    /// Delete a lead
    Delete {
        /// Lead to delete
        id: String,
    },
}

impl Commands {
    /// Whether the command can change stored data
    pub fn is_mutation(&self) -> bool {
        !matches!(self, Self::Board | Self::Columns)
    }
}
