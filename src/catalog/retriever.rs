//! Supplies the catalog for a run, from the local gem or from GitHub.

use crate::catalog::{Catalog, LOCAL_CATALOG_PATH, load_catalog_from_path, parse_catalog};
use crate::error::ExtractError;
use crate::transport::Transport;
use std::io::{self, BufReader, Seek, SeekFrom};
use std::path::{Path, PathBuf};

pub trait CatalogSource {
    /// Never fails; an unreachable or corrupt database is an empty catalog.
    fn catalog(&self, local_root: Option<&Path>) -> Catalog;
}

/// Reads `db/emoji.json` under a local install, otherwise downloads the
/// canonical database into a temporary file in `workdir`.
pub struct CatalogRetriever<'a> {
    transport: &'a dyn Transport,
    catalog_url: String,
    workdir: PathBuf,
}

impl<'a> CatalogRetriever<'a> {
    pub fn new(
        transport: &'a dyn Transport,
        catalog_url: impl Into<String>,
        workdir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            transport,
            catalog_url: catalog_url.into(),
            workdir: workdir.into(),
        }
    }

    fn fetch_remote(&self) -> Catalog {
        let source_name = format!("<{}>", self.catalog_url);
        let mut temp = match tempfile::Builder::new()
            .prefix(".emoji-")
            .suffix(".json")
            .tempfile_in(&self.workdir)
        {
            Ok(temp) => temp,
            Err(err) => return unreadable(source_name, err.to_string()),
        };
        let temp_path = temp.path().to_path_buf();

        log::info!(
            "Downloading <{}> to \"{}\"",
            self.catalog_url,
            temp_path.display()
        );
        let catalog = match self.download_into(temp.as_file_mut()) {
            Ok(()) => parse_catalog(BufReader::new(temp.as_file()), &source_name)
                .unwrap_or_else(|err| {
                    log::error!("{err}");
                    Catalog::default()
                }),
            Err(reason) => unreadable(source_name, reason),
        };

        // Removal happens whether or not the load succeeded.
        match temp.close() {
            Ok(()) => log::info!(
                "The temporary emojis database (\"{}\") has been removed.",
                temp_path.display()
            ),
            Err(err) => log::warn!(
                "could not remove temporary emojis database \"{}\": {err}",
                temp_path.display()
            ),
        }
        catalog
    }

    fn download_into(&self, file: &mut std::fs::File) -> Result<(), String> {
        let mut fetched = self
            .transport
            .get(&self.catalog_url)
            .map_err(|err| err.to_string())?;
        if !fetched.is_ok() {
            return Err(format!("HTTP {}", fetched.status));
        }
        io::copy(&mut fetched.body, file).map_err(|err| err.to_string())?;
        file.seek(SeekFrom::Start(0))
            .map_err(|err| err.to_string())?;
        Ok(())
    }
}

impl CatalogSource for CatalogRetriever<'_> {
    fn catalog(&self, local_root: Option<&Path>) -> Catalog {
        match local_root {
            Some(root) => load_catalog_from_path(&root.join(LOCAL_CATALOG_PATH)),
            None => self.fetch_remote(),
        }
    }
}

fn unreadable(source_name: String, reason: String) -> Catalog {
    log::error!(
        "{}",
        ExtractError::CatalogUnreadable {
            source_name,
            reason
        }
    );
    Catalog::default()
}
