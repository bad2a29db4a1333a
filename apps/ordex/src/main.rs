//! # Ordex - Dense Manual Ordering
//!
//! The main binary for the Ordex reindexing core.
//!
//! This application provides a CLI over a caller-owned snapshot file:
//! it derives the current order, computes move/remove mappings, and can
//! apply a computed mapping back to the snapshot.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │              apps/ordex (THE BINARY)         │
//! │                                              │
//! │  ┌─────────────┐        ┌────────────────┐   │
//! │  │   CLI       │        │  Snapshot I/O  │   │
//! │  │  (clap)     │        │  (json/text)   │   │
//! │  └──────┬──────┘        └───────┬────────┘   │
//! │         │                       │            │
//! │         └───────────┬───────────┘            │
//! │                     ▼                        │
//! │             ┌───────────────┐                │
//! │             │  ordex-core   │                │
//! │             │  (THE LOGIC)  │                │
//! │             └───────────────┘                │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Show the derived order of a snapshot
//! ordex -f records.json show
//!
//! # Move record 5 to index 2 and rewrite the snapshot
//! ordex -f records.json move --id 5 --to 2 --write
//!
//! # Drop record 5, close the gap, print the mapping as JSON
//! ordex -f records.json --json-mode remove --id 5
//! ```

mod cli;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() {
    // Parse CLI arguments
    let cli = cli::Cli::parse();

    // Initialize tracing — ORDEX_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("ORDEX_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let default_filter = if cli.verbose {
        "ordex=debug"
    } else {
        "ordex=info"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }

    // Display startup banner
    if !cli.quiet {
        print_banner();
    }

    // Execute command
    if let Err(e) = cli::execute(cli) {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the Ordex startup banner.
fn print_banner() {
    println!(
        r#"
  ORDEX v{}

  Dense • Deterministic • Stateless
"#,
        env!("CARGO_PKG_VERSION")
    );
}
