use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Convert FLO-2D simulation output into a mesh with result datasets.
#[derive(Parser)]
#[command(
    name = "flo2d",
    version,
    about = "Inspect and export FLO-2D simulation results"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to TOML configuration file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Load a simulation and print its mesh and result groups.
    Inspect(InspectArgs),
    /// Load a simulation and write result groups into a binary container.
    Export(ExportArgs),
}

/// Arguments for the `inspect` subcommand.
#[derive(clap::Args)]
pub struct InspectArgs {
    /// Any file in the simulation directory, usually CADPTS.DAT.
    pub path: PathBuf,
}

/// Arguments for the `export` subcommand.
#[derive(clap::Args)]
pub struct ExportArgs {
    /// Any file in the simulation directory, usually CADPTS.DAT.
    pub path: PathBuf,

    /// Container to write; appended to if it exists.
    #[arg(short, long)]
    pub output: PathBuf,

    /// Group to export (repeatable). Defaults to every result group.
    #[arg(short, long = "group")]
    pub groups: Vec<String>,

    /// Override the time units recorded with each group.
    #[arg(long = "time-units")]
    pub time_units: Option<String>,
}
