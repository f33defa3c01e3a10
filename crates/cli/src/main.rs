//! Malisek CLI - catalog management tools.
//!
//! # Usage
//!
//! ```bash
//! # Write the built-in demo catalog to a JSON file
//! malisek-cli catalog seed data/catalog.json
//!
//! # Load and validate a catalog document
//! malisek-cli catalog validate data/catalog.json
//! ```
//!
//! # Commands
//!
//! - `catalog seed` - Write the built-in demo catalog
//! - `catalog validate` - Check a catalog document against the data
//!   invariants

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "malisek-cli")]
#[command(author, version, about = "Malisek CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage catalog documents
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// Write the built-in demo catalog to a JSON file
    Seed {
        /// Output path for the catalog document
        path: PathBuf,
    },
    /// Load and validate a catalog document
    Validate {
        /// Path of the catalog document
        path: PathBuf,
    },
}

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli);

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Catalog { action } => match action {
            CatalogAction::Seed { path } => commands::catalog::seed(&path)?,
            CatalogAction::Validate { path } => commands::catalog::validate(&path)?,
        },
    }
    Ok(())
}
