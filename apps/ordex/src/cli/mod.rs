//! # Ordex CLI Module
//!
//! This module implements the CLI interface for Ordex.
//!
//! ## Available Commands
//!
//! - `show` - Derive and print the current order of the snapshot
//! - `move` - Compute (and optionally apply) a move mapping
//! - `remove` - Compute (and optionally apply) a removal mapping
//! - `check` - Diagnose the stored positions of a snapshot
//! - `init` - Initialize a new snapshot file

mod commands;

use clap::{Parser, Subcommand};
use ordex_core::OrdexError;
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Ordex - dense manual ordering for position-carrying records.
///
/// Computes the complete identity -> position mapping that restores a
/// gap-free 0..N-1 ordering after moving or removing a record. The snapshot
/// file is the storage layer; the core never touches it.
#[derive(Parser, Debug)]
#[command(name = "ordex")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to the snapshot file
    #[arg(short = 'f', long, global = true, default_value = "records.json")]
    pub file: PathBuf,

    /// Snapshot format: "json" (array of records) or "text" (id[:position] lines)
    #[arg(short = 't', long, global = true, default_value = "json")]
    pub format: String,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Derive and print the current order of the snapshot
    Show,

    /// Move a record to a new index and print the resulting mapping
    #[command(name = "move")]
    MoveRecord {
        /// Identity of the record to relocate
        #[arg(short, long)]
        id: u64,

        /// Requested zero-based destination index (clamps to append)
        #[arg(long)]
        to: usize,

        /// Apply the mapping to the snapshot file
        #[arg(short, long)]
        write: bool,
    },

    /// Remove a record, close the gap, and print the resulting mapping
    #[command(name = "remove")]
    RemoveRecord {
        /// Identity of the record to drop
        #[arg(short, long)]
        id: u64,

        /// Apply the mapping (and the removal) to the snapshot file
        #[arg(short, long)]
        write: bool,
    },

    /// Diagnose the stored positions of a snapshot
    Check,

    /// Initialize a new snapshot file
    Init {
        /// Force initialization even if the file exists
        #[arg(long)]
        force: bool,

        /// Number of pre-positioned records to seed
        #[arg(short, long, default_value = "0")]
        count: usize,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub fn execute(cli: Cli) -> Result<(), OrdexError> {
    let format = cli.format.as_str();
    let json_mode = cli.json_mode;

    match cli.command {
        Some(Commands::MoveRecord { id, to, write }) => {
            cmd_move(&cli.file, format, json_mode, id, to, write)
        }
        Some(Commands::RemoveRecord { id, write }) => {
            cmd_remove(&cli.file, format, json_mode, id, write)
        }
        Some(Commands::Check) => cmd_check(&cli.file, format, json_mode),
        Some(Commands::Init { force, count }) => cmd_init(&cli.file, format, force, count),
        // No subcommand - show the derived order by default
        Some(Commands::Show) | None => cmd_show(&cli.file, format, json_mode),
    }
}
