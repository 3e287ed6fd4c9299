//! Failure taxonomy for an extraction run.
//!
//! Only [`ExtractError::OutputDirectory`] is fatal. Everything else is
//! logged where it is observed and folded into the run counters.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    /// Missing or corrupt catalog; the run proceeds with an empty catalog.
    #[error("could not read or load the emojis database {source_name}: {reason}")]
    CatalogUnreadable { source_name: String, reason: String },

    /// No usable local gemoji installation; falls back to the remote catalog.
    #[error("localization of the gemoji gem installation failed: {0}")]
    LocalInstallNotFound(String),

    /// The asset server answered with anything but 200.
    #[error("<{url}> does not exist (HTTP {status}), can't download")]
    AssetNotFound { url: String, status: u16 },

    #[error("transfer to \"{}\" failed: {source}", .target.display())]
    AssetTransferFailed {
        target: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("the following emojis have not been found: '{}'", .0.join("', '"))]
    UnmatchedRequest(Vec<String>),

    #[error("unable to create extraction directory \"{}\": {source}", .path.display())]
    OutputDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ExtractError {
    pub(crate) fn transfer(target: impl Into<PathBuf>, source: io::Error) -> Self {
        ExtractError::AssetTransferFailed {
            target: target.into(),
            source,
        }
    }
}
