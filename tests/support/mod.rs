#![allow(dead_code)]

// In-memory collaborators so extraction runs never touch the network or
// spawn `gem`.

use serde_json::{Value, json};
use sgeext::{Catalog, CatalogSource, Config, Fetched, InstallLocator, Transport};
use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Cursor, Read};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

pub const ASSETS_URL: &str = "https://assets.test/emoji";
pub const CATALOG_URL: &str = "https://catalog.test/db/emoji.json";

pub fn test_config() -> Config {
    Config {
        assets_url: ASSETS_URL.to_string(),
        catalog_url: CATALOG_URL.to_string(),
        ..Config::default()
    }
}

pub fn asset_url(name: &str) -> String {
    format!("{ASSETS_URL}/{name}.png")
}

#[derive(Clone, Debug)]
pub enum Route {
    Body(Vec<u8>),
    Status(u16),
    Refused,
    // Streams the bytes, then fails mid-transfer.
    Broken(Vec<u8>),
}

#[derive(Default)]
pub struct FakeTransport {
    routes: BTreeMap<String, Route>,
    requests: Mutex<Vec<String>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(mut self, url: impl Into<String>, route: Route) -> Self {
        self.routes.insert(url.into(), route);
        self
    }

    /// Every asset of the sample catalog answers with a tiny PNG body.
    pub fn serving_sample_assets() -> Self {
        SAMPLE_ASSET_NAMES
            .iter()
            .fold(Self::new(), |transport, name| {
                transport.route(asset_url(name), Route::Body(png_bytes(name)))
            })
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap_or_else(|err| err.into_inner())
            .clone()
    }

    pub fn clear_requests(&self) {
        self.requests
            .lock()
            .unwrap_or_else(|err| err.into_inner())
            .clear();
    }
}

impl Transport for FakeTransport {
    fn get(&self, url: &str) -> io::Result<Fetched> {
        self.requests
            .lock()
            .unwrap_or_else(|err| err.into_inner())
            .push(url.to_string());
        match self.routes.get(url).cloned() {
            Some(Route::Body(bytes)) => Ok(Fetched {
                status: 200,
                body: Box::new(Cursor::new(bytes)),
            }),
            Some(Route::Status(status)) => Ok(Fetched {
                status,
                body: Box::new(io::empty()),
            }),
            Some(Route::Refused) => Err(io::Error::new(
                io::ErrorKind::ConnectionRefused,
                "connection refused",
            )),
            Some(Route::Broken(bytes)) => Ok(Fetched {
                status: 200,
                body: Box::new(BrokenReader {
                    inner: Cursor::new(bytes),
                }),
            }),
            None => Ok(Fetched {
                status: 404,
                body: Box::new(io::empty()),
            }),
        }
    }
}

struct BrokenReader {
    inner: Cursor<Vec<u8>>,
}

impl Read for BrokenReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.inner.read(buf)? {
            0 => Err(io::Error::new(
                io::ErrorKind::ConnectionReset,
                "connection reset mid-body",
            )),
            n => Ok(n),
        }
    }
}

pub struct FakeLocator(pub Option<PathBuf>);

impl InstallLocator for FakeLocator {
    fn locate(&self) -> Option<PathBuf> {
        self.0.clone()
    }
}

// Serves a fixed catalog and remembers which install root it was asked
// about.
pub struct StaticCatalog {
    catalog: Catalog,
    roots: Mutex<Vec<Option<PathBuf>>>,
}

impl StaticCatalog {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            roots: Mutex::new(Vec::new()),
        }
    }

    pub fn roots_seen(&self) -> Vec<Option<PathBuf>> {
        self.roots
            .lock()
            .unwrap_or_else(|err| err.into_inner())
            .clone()
    }
}

impl CatalogSource for StaticCatalog {
    fn catalog(&self, local_root: Option<&Path>) -> Catalog {
        self.roots
            .lock()
            .unwrap_or_else(|err| err.into_inner())
            .push(local_root.map(Path::to_path_buf));
        self.catalog.clone()
    }
}

/// Asset names of the sample catalog, in catalog order.
pub const SAMPLE_ASSET_NAMES: &[&str] = &[
    "unicode/1f600",
    "unicode/1f647",
    "octocat",
    "unicode/1f1eb-1f1f7",
    "unicode/1f937-2642",
    "shipit",
];

pub fn sample_catalog_json() -> Value {
    json!([
        {"emoji": "\u{1f600}", "description": "grinning face", "aliases": ["grinning"], "tags": ["smile", "happy"]},
        {"emoji": "\u{1f647}", "aliases": ["bowing_man", "bow"], "tags": ["respect", "thanks"]},
        {"aliases": ["octocat"], "tags": [], "category": "GitHub Custom Emoji"},
        {"emoji": "\u{1f1eb}\u{1f1f7}", "aliases": ["fr"], "tags": ["france", "french"]},
        {"emoji": "\u{1f937}\u{200d}\u{2642}\u{fe0f}", "aliases": ["man_shrugging"]},
        {"aliases": ["shipit", "squirrel"]}
    ])
}

pub fn sample_catalog() -> Catalog {
    let bytes = serde_json::to_vec(&sample_catalog_json()).unwrap_or_default();
    sgeext::load_catalog_from_reader(bytes.as_slice(), "sample catalog")
}

pub fn png_bytes(name: &str) -> Vec<u8> {
    let mut bytes = b"\x89PNG\r\n\x1a\n".to_vec();
    bytes.extend_from_slice(name.as_bytes());
    bytes
}

// Lays out `<root>/db/emoji.json` and `<root>/images/<alias>.png` like an
// installed gemoji gem.
pub fn install_fake_gem(root: &Path, images: &[&str]) -> io::Result<()> {
    fs::create_dir_all(root.join("db"))?;
    fs::create_dir_all(root.join("images"))?;
    fs::write(
        root.join("db/emoji.json"),
        serde_json::to_vec(&sample_catalog_json())?,
    )?;
    for name in images {
        fs::write(root.join(format!("images/{name}.png")), png_bytes(name))?;
    }
    Ok(())
}

pub fn dir_entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .map(|entries| {
            entries
                .filter_map(Result::ok)
                .map(|entry| entry.file_name().to_string_lossy().into_owned())
                .collect()
        })
        .unwrap_or_default();
    names.sort();
    names
}
