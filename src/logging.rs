//! `env_logger` setup for the binary.

use log::LevelFilter;
use std::io::Write;

/// Overrides the level chosen by `--verbose` using env_logger directives.
pub const LOG_ENV: &str = "SGEEXT_LOG";

pub fn level_for(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Info
    } else {
        LevelFilter::Warn
    }
}

/// Installs the global logger; lines read `[LEVEL] : message` on stderr.
pub fn init_logging(verbose: bool) {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(level_for(verbose))
        .parse_env(LOG_ENV)
        .format(|buf, record| writeln!(buf, "[{}] : {}", record.level(), record.args()));
    if let Err(err) = builder.try_init() {
        eprintln!("logger already initialized: {err}");
    }
}
