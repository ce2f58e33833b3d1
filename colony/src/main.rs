//! Colony permissions admin tool

mod commands;
mod store;

use anyhow::Result;
use clap::Parser;
use colony_core::{logging, Config};
use tracing::debug;

use commands::Command;
use store::ColonyStore;

#[derive(Parser, Debug)]
#[command(name = "colony")]
#[command(about = "Inspect and edit colony permissions", long_about = None)]
struct Cli {
    /// Config file (TOML, YAML or JSON)
    #[arg(long, short)]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref())?;
    if let Err(errors) = config.validate() {
        for e in &errors {
            eprintln!("Config validation error: {e}");
        }
        return Err(anyhow::anyhow!(
            "Configuration validation failed with {} error(s)",
            errors.len()
        ));
    }

    logging::init_logging(&config.logging)?;

    let mut store = ColonyStore::open(&config.storage)?;
    let output = commands::run(&cli.command, &mut store, &config.sync)?;
    println!("{output}");

    if !store.save_if_dirty()? {
        debug!("Nothing changed, permissions file left as is");
    }
    Ok(())
}
