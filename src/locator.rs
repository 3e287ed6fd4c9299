//! Discovery of a local gemoji gem installation.
//!
//! `gem which gemoji` prints the path of the gem's entry file, usually
//! `/var/lib/gems/X.Y.Z/gems/gemoji-T.U.V/lib/gemoji.rb`. The install root
//! is the `gemoji-*` directory two levels above it. Absence is the common
//! case and is reported as `None`, never as an error.

use crate::error::ExtractError;
use regex::Regex;
use std::path::{MAIN_SEPARATOR_STR, PathBuf};
use std::process::{Command, Stdio};
use std::sync::LazyLock;

static GEM_ENTRY_PATH: LazyLock<Regex> = LazyLock::new(|| {
    let sep = regex::escape(MAIN_SEPARATOR_STR);
    Regex::new(&format!(r"^(.+?{sep}gemoji-.+?{sep})lib{sep}gemoji\.rb$")).expect("static regex")
});

pub trait InstallLocator {
    fn locate(&self) -> Option<PathBuf>;
}

/// Queries RubyGems through an external `gem` executable.
#[derive(Debug, Clone)]
pub struct GemLocator {
    command: String,
}

impl GemLocator {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    fn query(&self) -> Result<PathBuf, ExtractError> {
        let output = Command::new(&self.command)
            .args(["which", "gemoji"])
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .map_err(|err| {
                ExtractError::LocalInstallNotFound(format!("running {}: {err}", self.command))
            })?;
        if !output.status.success() {
            return Err(ExtractError::LocalInstallNotFound(format!(
                "{} which gemoji exited with {}",
                self.command, output.status
            )));
        }
        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_gem_which_output(&stdout).ok_or_else(|| {
            ExtractError::LocalInstallNotFound(
                "gemoji looks installed on your system, but couldn't locate it precisely".to_string(),
            )
        })
    }
}

impl Default for GemLocator {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_GEM_COMMAND)
    }
}

impl InstallLocator for GemLocator {
    fn locate(&self) -> Option<PathBuf> {
        match self.query() {
            Ok(root) => {
                log::info!(
                    "Found gemoji gem installation folder : '{}'.",
                    root.display()
                );
                Some(root)
            }
            Err(err) => {
                log::info!("{err}.");
                None
            }
        }
    }
}

/// Install root (with trailing separator) from `gem which gemoji` output.
pub fn parse_gem_which_output(output: &str) -> Option<PathBuf> {
    GEM_ENTRY_PATH
        .captures(output.trim())
        .map(|caps| PathBuf::from(&caps[1]))
}
