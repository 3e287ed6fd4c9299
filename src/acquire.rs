//! The two ways an asset lands on disk: downloaded from the asset server or
//! copied out of a local gemoji installation.
//!
//! Both honor the same contract. An existing target is left alone (and
//! counts as success) unless `force` is set, and a failure is reported to
//! the caller without aborting the run.

use crate::config::Config;
use crate::error::ExtractError;
use crate::transport::Transport;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// One asset to materialize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRequest {
    /// Name in the asset namespace, without extension: `octocat` or
    /// `unicode/1f600`.
    pub name: String,
    /// Final location on disk.
    pub target: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Acquisition {
    /// Target was already present.
    Skipped(PathBuf),
    Transferred(PathBuf),
}

impl Acquisition {
    pub fn path(&self) -> &Path {
        match self {
            Acquisition::Skipped(path) | Acquisition::Transferred(path) => path,
        }
    }
}

pub trait Acquirer {
    fn acquire(&self, request: &AssetRequest) -> Result<Acquisition, ExtractError>;
}

/// Downloads `<assets_url>/<name>.png`.
pub struct RemoteAcquirer<'a> {
    transport: &'a dyn Transport,
    config: &'a Config,
    force: bool,
}

impl<'a> RemoteAcquirer<'a> {
    pub fn new(transport: &'a dyn Transport, config: &'a Config, force: bool) -> Self {
        Self {
            transport,
            config,
            force,
        }
    }

    fn download(&self, url: &str, target: &Path) -> Result<(), ExtractError> {
        let mut fetched = self
            .transport
            .get(url)
            .map_err(|err| ExtractError::transfer(target, err))?;
        if !fetched.is_ok() {
            return Err(ExtractError::AssetNotFound {
                url: url.to_string(),
                status: fetched.status,
            });
        }

        let dir = parent_dir(target);
        create_dir(dir).map_err(|err| ExtractError::transfer(dir, err))?;

        // Stream into a sibling temp file so a broken transfer never leaves
        // a truncated PNG at `target`.
        let mut staged =
            NamedTempFile::new_in(dir).map_err(|err| ExtractError::transfer(target, err))?;
        io::copy(&mut fetched.body, staged.as_file_mut())
            .and_then(|_| staged.as_file().sync_all())
            .and_then(|_| set_file_mode(staged.as_file()))
            .map_err(|err| ExtractError::transfer(target, err))?;
        staged
            .persist(target)
            .map_err(|err| ExtractError::transfer(target, err.error))?;
        Ok(())
    }
}

impl Acquirer for RemoteAcquirer<'_> {
    fn acquire(&self, request: &AssetRequest) -> Result<Acquisition, ExtractError> {
        if !self.force && request.target.exists() {
            log::info!(
                "The file \"{}\" already exists, run `-f` to download it again.",
                request.target.display()
            );
            return Ok(Acquisition::Skipped(request.target.clone()));
        }

        let url = self.config.asset_url(&request.name);
        log::info!("Downloading <{url}> to \"{}\"", request.target.display());
        self.download(&url, &request.target)?;
        Ok(Acquisition::Transferred(request.target.clone()))
    }
}

/// Copies `<root>/images/<name>.png` out of a gemoji installation.
#[derive(Debug, Clone)]
pub struct LocalCopier {
    images: PathBuf,
    force: bool,
}

impl LocalCopier {
    pub fn new(install_root: &Path, force: bool) -> Self {
        Self {
            images: install_root.join("images"),
            force,
        }
    }

    pub fn source_path(&self, name: &str) -> PathBuf {
        self.images.join(format!("{name}.png"))
    }
}

impl Acquirer for LocalCopier {
    fn acquire(&self, request: &AssetRequest) -> Result<Acquisition, ExtractError> {
        if !self.force && request.target.exists() {
            log::info!(
                "The file \"{}\" already exists, run `-f` to copy it again.",
                request.target.display()
            );
            return Ok(Acquisition::Skipped(request.target.clone()));
        }

        let source = self.source_path(&request.name);
        log::info!(
            "Copying '{}' from your local system to \"{}\".",
            source.display(),
            request.target.display()
        );
        let dir = parent_dir(&request.target);
        create_dir(dir).map_err(|err| ExtractError::transfer(dir, err))?;
        fs::copy(&source, &request.target)
            .map_err(|err| ExtractError::transfer(&request.target, err))?;
        Ok(Acquisition::Transferred(request.target.clone()))
    }
}

fn parent_dir(target: &Path) -> &Path {
    target.parent().unwrap_or_else(|| Path::new("."))
}

/// `mkdir -p` with mode 0o755 on unix.
pub(crate) fn create_dir(path: &Path) -> io::Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o755);
    }
    builder.create(path)
}

/// Temp files are created 0o600; published assets are 0o644 on unix.
fn set_file_mode(file: &fs::File) -> io::Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(fs::Permissions::from_mode(0o644))?;
    }
    #[cfg(not(unix))]
    let _ = file;
    Ok(())
}
