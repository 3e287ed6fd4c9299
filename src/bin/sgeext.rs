//! Downloads (mostly from GitHub) gemoji PNGs into a local directory.
//!
//! Usage:
//!   sgeext                       # whole database into ./emoji
//!   sgeext -l bow tada -n        # two emoji, saved under their names
//!   sgeext -o -d /tmp/emoji -f   # Unicode emoji only, overwrite existing

use anyhow::{Context, Result};
use clap::Parser;
use sgeext::logging::init_logging;
use sgeext::{CatalogRetriever, Config, ExtractOptions, Extractor, GemLocator, HttpTransport};
use std::env;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sgeext", version)]
#[command(about = "A simple gemoji emojis extractor (for non macOS users)")]
struct Cli {
    /// Extraction path location [default: ./emoji]
    #[arg(short, long)]
    directory: Option<PathBuf>,
    /// Force file download, even if they already exist
    #[arg(short, long)]
    force: bool,
    /// List of emojis aliases to operate on
    #[arg(short, long, num_args = 1.., value_name = "ALIAS")]
    list: Vec<String>,
    /// Save emojis under their "real" name instead of unicode
    #[arg(short, long)]
    names: bool,
    /// Ignores "fake" emojis (images) added by GitHub
    #[arg(short, long)]
    only_emojis: bool,
    /// Show debugging logs and monitor progression
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let workdir = env::current_dir().context("resolving working directory")?;
    let config = Config::from_env();
    let transport = HttpTransport::new(&config).context("building HTTP client")?;
    let locator = GemLocator::new(config.gem_command.clone());
    let catalogs = CatalogRetriever::new(&transport, config.catalog_url.clone(), &workdir);

    let options = ExtractOptions {
        directory: cli.directory.unwrap_or_else(|| workdir.join("emoji")),
        force: cli.force,
        subset: cli.list,
        real_names: cli.names,
        only_emojis: cli.only_emojis,
    };

    Extractor::new(&locator, &catalogs, &transport, &config).run(&options)?;
    Ok(())
}
