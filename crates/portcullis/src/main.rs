//! Portcullis CLI
//!
//! Loads an access map file and answers role, module and controller queries.

mod cli;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use portcullis::Config;
use portcullis::access_map::load_access_control;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Access map file (.yml, .yaml or .toml). Defaults to PORTCULLIS_ACCESS_MAP.
    #[arg(long, global = true)]
    map: Option<PathBuf>,

    /// Print machine-readable JSON instead of tables.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every declared role.
    Roles,
    /// List the project modules and menus available to a role.
    Modules {
        #[arg(long)]
        role: String,
    },
    /// List the controllers a role may access with the given modules selected.
    Controllers {
        #[arg(long)]
        role: String,
        /// Selected module name (repeatable).
        #[arg(long = "module")]
        modules: Vec<String>,
    },
    /// Load and validate the access map, printing a summary.
    Check,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::from_env().context("failed to load configuration")?;

    init_tracing(&config);

    let path = args.map.unwrap_or(config.access_map);
    info!(path = %path.display(), "loading access map");

    let access = load_access_control(&path)
        .with_context(|| format!("failed to load access map {}", path.display()))?;

    let output = match &args.command {
        Command::Roles => cli::cmd_roles(&access, args.json)?,
        Command::Modules { role } => cli::cmd_modules(&access, role, args.json)?,
        Command::Controllers { role, modules } => {
            cli::cmd_controllers(&access, role, modules, args.json)?
        }
        Command::Check => cli::cmd_check(&access, &path, args.json)?,
    };

    println!("{output}");
    Ok(())
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
