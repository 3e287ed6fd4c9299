//! Resolution engine: walks the catalog once, classifies each entry, and
//! hands it to the matching acquirer.
//!
//! Entries with a glyph are true emoji and always come from the asset
//! server under `unicode/`. Entries without one are GitHub's own images;
//! those are copied from a local gemoji install when one was found and
//! downloaded otherwise. The source is decided once per run.

use crate::acquire::{
    Acquirer, Acquisition, AssetRequest, LocalCopier, RemoteAcquirer, create_dir,
};
use crate::catalog::{CatalogEntry, CatalogSource};
use crate::config::Config;
use crate::error::ExtractError;
use crate::identifier::normalize;
use crate::locator::InstallLocator;
use crate::transport::Transport;
use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};

/// Subdirectory (and URL segment) for true emoji.
pub const UNICODE_DIR: &str = "unicode";

#[derive(Debug, Clone, Default)]
pub struct ExtractOptions {
    pub directory: PathBuf,
    /// Re-transfer assets whose target already exists.
    pub force: bool,
    /// Aliases to operate on; empty means the whole catalog.
    pub subset: Vec<String>,
    /// Save true emoji under their canonical alias instead of the identifier.
    pub real_names: bool,
    /// Ignore GitHub's non-Unicode images.
    pub only_emojis: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryKind {
    TrueEmoji { identifier: String },
    FakeImage,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetSource {
    Local(PathBuf),
    Remote,
}

impl AssetSource {
    pub fn install_root(&self) -> Option<&Path> {
        match self {
            AssetSource::Local(root) => Some(root.as_path()),
            AssetSource::Remote => None,
        }
    }
}

impl From<Option<PathBuf>> for AssetSource {
    fn from(root: Option<PathBuf>) -> Self {
        root.map_or(AssetSource::Remote, AssetSource::Local)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub kind: EntryKind,
    pub request: AssetRequest,
}

/// Decide what to fetch for `entry`, or `None` when the entry is filtered
/// out by `only_emojis`.
pub fn classify(entry: &CatalogEntry, options: &ExtractOptions) -> Option<Plan> {
    let alias = entry.canonical_alias();
    match &entry.glyph {
        Some(glyph) => {
            let identifier = normalize(glyph);
            log::info!("Unicode value of '{alias}' found : {identifier}");
            let file_stem = if options.real_names {
                alias
            } else {
                identifier.as_str()
            };
            let request = AssetRequest {
                name: format!("{UNICODE_DIR}/{identifier}"),
                target: options
                    .directory
                    .join(UNICODE_DIR)
                    .join(format!("{file_stem}.png")),
            };
            Some(Plan {
                kind: EntryKind::TrueEmoji { identifier },
                request,
            })
        }
        None if options.only_emojis => None,
        None => Some(Plan {
            kind: EntryKind::FakeImage,
            request: AssetRequest {
                name: alias.to_string(),
                target: options.directory.join(format!("{alias}.png")),
            },
        }),
    }
}

/// User-requested aliases not matched yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestedSubset {
    remaining: BTreeSet<String>,
}

impl RequestedSubset {
    pub fn new<I, S>(aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            remaining: aliases.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.remaining.is_empty()
    }

    /// Removes and returns every remaining alias that `aliases` contains.
    pub fn take_matches(&mut self, aliases: &[String]) -> BTreeSet<String> {
        let matched: BTreeSet<String> = aliases
            .iter()
            .filter(|alias| self.remaining.contains(alias.as_str()))
            .cloned()
            .collect();
        for alias in &matched {
            self.remaining.remove(alias);
        }
        matched
    }

    pub fn into_remaining(self) -> Vec<String> {
        self.remaining.into_iter().collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionOutcome {
    /// Entries handed to an acquirer.
    pub attempted: usize,
    /// Attempts that ended with the asset on disk, skips included.
    pub succeeded: usize,
    pub skipped: usize,
    pub failed: usize,
    /// Requested aliases no catalog entry carried.
    pub unmatched: Vec<String>,
}

impl ExtractionOutcome {
    fn record(&mut self, result: Result<Acquisition, ExtractError>) {
        self.attempted += 1;
        match result {
            Ok(Acquisition::Transferred(_)) => self.succeeded += 1,
            Ok(Acquisition::Skipped(_)) => {
                self.succeeded += 1;
                self.skipped += 1;
            }
            Err(err @ ExtractError::AssetNotFound { .. }) => {
                self.failed += 1;
                log::warn!("{err}.");
            }
            Err(err) => {
                self.failed += 1;
                log::error!("{err}.");
            }
        }
    }
}

impl fmt::Display for ExtractionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Successfully downloaded / copied {} emojis ! ({} already present, {} failed)",
            self.succeeded, self.skipped, self.failed
        )
    }
}

pub struct Extractor<'a> {
    locator: &'a dyn InstallLocator,
    catalogs: &'a dyn CatalogSource,
    transport: &'a dyn Transport,
    config: &'a Config,
}

impl<'a> Extractor<'a> {
    pub fn new(
        locator: &'a dyn InstallLocator,
        catalogs: &'a dyn CatalogSource,
        transport: &'a dyn Transport,
        config: &'a Config,
    ) -> Self {
        Self {
            locator,
            catalogs,
            transport,
            config,
        }
    }

    /// Run one extraction.
    ///
    /// Returns `Err` only when the extraction directory cannot be created.
    /// Per-asset failures are logged and counted in the outcome.
    pub fn run(&self, options: &ExtractOptions) -> Result<ExtractionOutcome, ExtractError> {
        let mut subset = RequestedSubset::new(options.subset.iter().cloned());
        let filtering = !subset.is_empty();

        let source = AssetSource::from(self.locator.locate());
        let catalog = self.catalogs.catalog(source.install_root());
        log::debug!("catalog holds {} entries", catalog.len());

        ensure_output_dir(&options.directory)?;

        let remote = RemoteAcquirer::new(self.transport, self.config, options.force);
        let local = source
            .install_root()
            .map(|root| LocalCopier::new(root, options.force));

        let mut outcome = ExtractionOutcome::default();
        for entry in catalog.entries() {
            if filtering {
                // An entry may satisfy several requested names at once, e.g.
                // `bow` and `bowing_man`.
                let matched = subset.take_matches(&entry.aliases);
                if matched.is_empty() {
                    continue;
                }
                log::debug!(
                    "'{}' matched requested {:?}",
                    entry.canonical_alias(),
                    matched
                );
            }

            if let Some(plan) = classify(entry, options) {
                let acquirer: &dyn Acquirer = match (&plan.kind, &local) {
                    (EntryKind::FakeImage, Some(copier)) => copier as &dyn Acquirer,
                    _ => &remote,
                };
                outcome.record(acquirer.acquire(&plan.request));
            }

            if filtering && subset.is_empty() {
                break;
            }
        }

        outcome.unmatched = subset.into_remaining();
        if !outcome.unmatched.is_empty() {
            log::warn!(
                "{}",
                ExtractError::UnmatchedRequest(outcome.unmatched.clone())
            );
        }
        log::info!("{outcome}");
        Ok(outcome)
    }
}

fn ensure_output_dir(path: &Path) -> Result<(), ExtractError> {
    create_dir(path).map_err(|source| ExtractError::OutputDirectory {
        path: path.to_path_buf(),
        source,
    })
}
