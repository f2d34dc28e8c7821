//! # pgrate CLI
//!
//! A task runner around the `psql` and `cue` command line tools for
//! managing SQL migrations and typed configuration profiles.
//!
//! ## Commands
//!
//! - `pgrate up <profile>`: apply the DDL scripts in the `up/` directory
//! - `pgrate down <profile>`: apply the drop-statement DDL scripts in the
//!   `down/` directory
//! - `pgrate gen-config <profile>`: vet, format and export a CUE profile
//!   to the JSON file the migration commands read
//!
//! ## Layout
//!
//! Commands run from the project root and expect:
//!
//! ```text
//! config/
//! ├── cue/
//! │   ├── schema.cue          # field constraints for every profile
//! │   └── <profile>.cue       # profile values
//! └── <profile>.json          # written by gen-config, read by up/down
//! scripts/ddl/                # or wherever migrationScriptsDir points
//! ├── up/001-users.sql        # applied in numeric order
//! └── down/001-users.sql
//! ```
//!
//! ## Examples
//!
//! ```bash
//! # Generate config/local.json from config/cue/local.cue
//! pgrate gen-config local
//!
//! # Apply all up scripts for the local profile
//! pgrate up local
//!
//! # Revert with the down scripts
//! pgrate down local
//! ```
//!
//! Migrations run through psql with `-w` (never prompt), so the password
//! must come from `~/.pgpass` or the environment. All scripts are executed
//! regardless of errors within an individual file; check the psql output
//! to determine whether any statement failed.

use anyhow::{bail, Context, Result};
use clap::{Arg, Command};
use std::process::Command as ProcessCommand;

use pgrate::config::{config_file_path, ConfigFile};
use pgrate::cue::cue_paths;
use pgrate::psql::{psql_args, Direction};

fn main() -> Result<()> {
    setup_tracing()?;

    let matches = Command::new("pgrate")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Apply SQL migrations with psql and generate config profiles with cue")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("up")
                .about("Apply the DDL scripts in the up directory")
                .arg(profile_arg()),
        )
        .subcommand(
            Command::new("down")
                .about("Apply the drop-statement DDL scripts in the down directory")
                .arg(profile_arg()),
        )
        .subcommand(
            Command::new("gen-config")
                .about("Vet, format and export a CUE profile to JSON")
                .arg(profile_arg()),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("up", sub_matches)) => {
            let profile = sub_matches.get_one::<String>("profile").unwrap();
            migrate(Direction::Up, profile)
        }
        Some(("down", sub_matches)) => {
            let profile = sub_matches.get_one::<String>("profile").unwrap();
            migrate(Direction::Down, profile)
        }
        Some(("gen-config", sub_matches)) => {
            let profile = sub_matches.get_one::<String>("profile").unwrap();
            gen_config(profile)
        }
        _ => unreachable!("Subcommand required"),
    }
}

fn profile_arg() -> Arg {
    Arg::new("profile")
        .help("Name of the config profile (a <profile>.json under ./config)")
        .required(true)
        .index(1)
}

/// Runs psql over the DDL scripts of one direction for the given profile.
fn migrate(direction: Direction, profile: &str) -> Result<()> {
    let config_path = config_file_path(profile);
    let config_file = ConfigFile::load(&config_path)
        .with_context(|| format!("Failed to load config profile '{profile}'"))?;

    let args = psql_args(direction, &config_file.config).with_context(|| {
        format!("Failed to assemble psql arguments for the {direction} migration")
    })?;

    run("psql", &args)?;

    println!("Applied {direction} scripts for profile '{profile}'");

    Ok(())
}

/// Vets, formats and exports the CUE sources of the given profile.
///
/// The three cue invocations run in order and the first failure stops the
/// command, so an invalid profile never overwrites its JSON output.
fn gen_config(profile: &str) -> Result<()> {
    let paths = cue_paths(profile);

    run("cue", &paths.vet_args())?;
    run("cue", &paths.fmt_args())?;
    run("cue", &paths.export_args())?;

    println!("Wrote {}", paths.output.display());

    Ok(())
}

/// Spawns an external program with inherited stdio and waits for it.
fn run(program: &str, args: &[String]) -> Result<()> {
    tracing::info!("running {program} {}", args.join(" "));

    let status = ProcessCommand::new(program)
        .args(args)
        .status()
        .with_context(|| format!("Failed to execute {program}"))?;

    if !status.success() {
        bail!("{program} exited with {status}");
    }

    Ok(())
}

fn setup_tracing() -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))?;

    Ok(())
}
