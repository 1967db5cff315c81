//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `orgcatalog_core` linkage without starting the HTTP server.
//! - Seed a database file and run area queries against it from a shell.
//! - Keep output deterministic (JSON on stdout) for scripted checks.

use clap::{Parser, Subcommand};
use orgcatalog_core::{
    open_db, seed_catalog, AreaQuery, AreaShape, SeedOutcome, SqliteCatalogService,
};
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

/// Organization catalog smoke, seed and query tool
#[derive(Parser, Debug)]
#[command(name = "orgcatalog_cli", version)]
struct Cli {
    /// Defaults to `ping`
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Command {
    /// Print core linkage and version
    Ping,
    /// Load the demo dataset into an empty catalog database
    Seed {
        /// SQLite file, created when missing
        db_path: PathBuf,
    },
    /// Print organizations inside an area as JSON
    #[command(allow_negative_numbers = true)]
    Nearby {
        db_path: PathBuf,
        /// Center latitude in degrees
        lat: f64,
        /// Center longitude in degrees
        lon: f64,
        /// Radius in meters
        radius: f64,
        /// circle or square
        #[arg(default_value_t = AreaShape::Circle)]
        shape: AreaShape,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli.command.unwrap_or(Command::Ping)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("orgcatalog_cli error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<(), Box<dyn Error>> {
    match command {
        Command::Ping => {
            println!("orgcatalog_core ping={}", orgcatalog_core::ping());
            println!("orgcatalog_core version={}", orgcatalog_core::core_version());
        }
        Command::Seed { db_path } => {
            let mut conn = open_db(&db_path)?;
            match seed_catalog(&mut conn)? {
                SeedOutcome::Seeded(counts) => println!(
                    "seeded buildings={} businesses={} organizations={} phones={} tags={}",
                    counts.buildings,
                    counts.businesses,
                    counts.organizations,
                    counts.phones,
                    counts.tags
                ),
                SeedOutcome::AlreadySeeded => println!("already seeded"),
            }
        }
        Command::Nearby {
            db_path,
            lat,
            lon,
            radius,
            shape,
        } => {
            let query = AreaQuery::new(lat, lon, radius, shape)?;
            let conn = open_db(&db_path)?;
            let service = SqliteCatalogService::sqlite(&conn)?;
            let organizations = service.organizations_nearby(&query)?;
            println!("{}", serde_json::to_string_pretty(&organizations)?);
        }
    }
    Ok(())
}
