//! # cogs: COGS Suite Command Line
//!
//! Costing reports, the sales dashboard and file imports over the local
//! SQLite database.
//!
//! ## Command Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  cogs <command>                                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbConfig::from_env() + --db ──► Database::new (migrations applied)    │
//! │       │                                                                 │
//! │       ├── report ──► db.costing_report()  ──► render::costing_table    │
//! │       ├── sales  ──► db.enriched_sales()  ──► analytics ──► render     │
//! │       ├── import ──► Role check ──► import_* (all-or-nothing)          │
//! │       │                           ──► replace_all / append             │
//! │       └── export ──► Role check ──► db.enriched_sales() ──► JSON Lines │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod commands;
mod render;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use cogs_core::analytics::SalesFilter;
use cogs_core::{ImportError, ImportKind, Role};
use cogs_db::{Database, DbConfig};
use tracing::info;

#[derive(Parser)]
#[command(name = "cogs")]
#[command(version)]
#[command(about = "Recipe costing, pricing and sales reports for outlet chains", long_about = None)]
struct Cli {
    /// Database file path (overrides COGS_DATABASE)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print raw cost, HPP, selling price and margin for every menu
    Report {
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Print sales KPIs and breakdowns
    Sales {
        /// Only this outlet
        #[arg(long)]
        outlet: Option<String>,

        /// Only this period (e.g. 2025-03)
        #[arg(long)]
        period: Option<String>,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Import a JSON array of rows keyed by column header
    Import {
        /// What the file contains
        #[arg(value_enum)]
        kind: ImportTarget,

        /// Path to the rows file
        file: PathBuf,

        /// Role of the operator; only admins may import
        #[arg(long, env = "COGS_ROLE", default_value = "viewer")]
        role: Role,
    },

    /// Write enriched sales to a JSON Lines file
    Export {
        /// Only this outlet
        #[arg(long)]
        outlet: Option<String>,

        /// Only this period (e.g. 2025-03)
        #[arg(long)]
        period: Option<String>,

        /// Role of the operator; only admins may export
        #[arg(long, env = "COGS_ROLE", default_value = "viewer")]
        role: Role,

        /// Output path
        file: PathBuf,
    },
}

/// Import targets as spelled on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ImportTarget {
    Ingredients,
    Recipes,
    Sales,
}

impl From<ImportTarget> for ImportKind {
    fn from(target: ImportTarget) -> Self {
        match target {
            ImportTarget::Ingredients => ImportKind::Ingredients,
            ImportTarget::Recipes => ImportKind::RecipeLines,
            ImportTarget::Sales => ImportKind::Sales,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = DbConfig::from_env()?;
    if let Some(path) = cli.db {
        config.database_path = path;
    }

    let path = config.database_path.display().to_string();
    let db = Database::new(config)
        .await
        .with_context(|| format!("opening database {}", path))?;

    let result = run(&db, cli.command).await;
    db.close().await;

    println!("{}", result?);
    Ok(())
}

async fn run(db: &Database, command: Commands) -> Result<String> {
    match command {
        Commands::Report { json } => commands::report(db, json).await,
        Commands::Sales {
            outlet,
            period,
            json,
        } => commands::sales(db, outlet, period, json).await,
        Commands::Import { kind, file, role } => {
            info!(kind = ?kind, file = %file.display(), role = %role, "Importing");
            let text = std::fs::read_to_string(&file)
                .with_context(|| format!("reading {}", file.display()))?;
            let outcome = commands::import(db, kind.into(), &text, role)
                .await
                .map_err(|err| {
                    if let Some(rejected) = err.downcast_ref::<ImportError>() {
                        for issue in &rejected.issues {
                            eprintln!("  {}", issue);
                        }
                    }
                    err
                })?;
            Ok(outcome.to_string())
        }
        Commands::Export {
            outlet,
            period,
            role,
            file,
        } => {
            let export = commands::export(db, SalesFilter::new(outlet, period), role).await?;
            std::fs::write(&file, &export.body)
                .with_context(|| format!("writing {}", file.display()))?;
            info!(rows = export.rows, file = %file.display(), "Sales exported");
            Ok(format!("Exported {} sales rows to {}", export.rows, file.display()))
        }
    }
}
