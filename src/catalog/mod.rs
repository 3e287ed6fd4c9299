//! Emoji database loading.
//!
//! The gemoji database is a JSON array of entries, each with an `aliases`
//! array and, for real Unicode emoji, the literal glyph under `emoji`.
//! Loading never fails the run: an unreadable database becomes an empty
//! [`Catalog`] and a logged [`ExtractError::CatalogUnreadable`].

pub mod retriever;

pub use retriever::{CatalogRetriever, CatalogSource};

use crate::error::ExtractError;
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Relative location of the database inside a gemoji installation.
pub const LOCAL_CATALOG_PATH: &str = "db/emoji.json";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CatalogEntry {
    /// First alias is canonical.
    pub aliases: Vec<String>,
    /// Present only for true Unicode emoji.
    #[serde(default, rename = "emoji")]
    pub glyph: Option<String>,
}

impl CatalogEntry {
    pub fn canonical_alias(&self) -> &str {
        self.aliases.first().map(String::as_str).unwrap_or_default()
    }

    pub fn is_true_emoji(&self) -> bool {
        self.glyph.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Builds a catalog, dropping entries without any alias.
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        let entries = entries
            .into_iter()
            .filter(|entry| {
                let keep = !entry.aliases.is_empty();
                if !keep {
                    log::debug!("dropping catalog entry without aliases: {entry:?}");
                }
                keep
            })
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Strict parse; callers that must not fail use [`load_catalog_from_reader`].
pub fn parse_catalog<R: Read>(reader: R, source_name: &str) -> Result<Catalog, ExtractError> {
    serde_json::from_reader::<_, Vec<CatalogEntry>>(reader)
        .map(Catalog::new)
        .map_err(|err| ExtractError::CatalogUnreadable {
            source_name: source_name.to_string(),
            reason: err.to_string(),
        })
}

pub fn load_catalog_from_reader<R: Read>(reader: R, source_name: &str) -> Catalog {
    parse_catalog(reader, source_name).unwrap_or_else(|err| {
        log::error!("{err}");
        Catalog::default()
    })
}

pub fn load_catalog_from_path(path: &Path) -> Catalog {
    let source_name = format!("\"{}\"", path.display());
    match File::open(path) {
        Ok(file) => load_catalog_from_reader(BufReader::new(file), &source_name),
        Err(err) => {
            log::error!(
                "{}",
                ExtractError::CatalogUnreadable {
                    source_name,
                    reason: err.to_string(),
                }
            );
            Catalog::default()
        }
    }
}
