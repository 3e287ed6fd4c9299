//! Simple gemoji emoji extractor.
//!
//! Resolves every entry of the gemoji database into a PNG on disk. Unicode
//! emoji are fetched from GitHub's asset server by codepoint; GitHub's own
//! images are copied from a local `gemoji` gem when one is installed and
//! downloaded otherwise. Re-runs skip assets that already exist.

pub mod acquire;
pub mod catalog;
pub mod config;
pub mod error;
pub mod extract;
pub mod identifier;
pub mod locator;
pub mod logging;
pub mod transport;

pub use acquire::{Acquirer, Acquisition, AssetRequest, LocalCopier, RemoteAcquirer};
pub use catalog::{
    Catalog, CatalogEntry, CatalogRetriever, CatalogSource, load_catalog_from_path,
    load_catalog_from_reader, parse_catalog,
};
pub use config::Config;
pub use error::ExtractError;
pub use extract::{
    AssetSource, EntryKind, ExtractOptions, ExtractionOutcome, Extractor, Plan, RequestedSubset,
    classify,
};
pub use identifier::{normalize, normalize_raw, raw_identifier};
pub use locator::{GemLocator, InstallLocator, parse_gem_which_output};
pub use transport::{Fetched, HttpTransport, Transport};
