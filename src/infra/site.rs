//! Filesystem-backed site content reads.

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use thiserror::Error;
use tokio::fs;

/// Errors that can occur while reading site content from disk.
#[derive(Debug, Error)]
pub enum SiteStoreError {
    #[error("invalid site path")]
    InvalidPath,
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Asset subdirectories exposed under their own URL prefixes.
pub const STATIC_PREFIXES: &[&str] = &["css", "js", "data", "images"];

/// Read access to the directory of pages and static assets the server
/// publishes. Page HTML lives at the top level; assets live under the
/// [`STATIC_PREFIXES`] subdirectories.
#[derive(Debug, Clone)]
pub struct SiteStore {
    root: PathBuf,
}

impl SiteStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Read a page file. `Ok(None)` when the file does not exist.
    pub async fn read_page(&self, file: &str) -> Result<Option<String>, SiteStoreError> {
        let path = self.resolve(file)?;
        match fs::read_to_string(&path).await {
            Ok(html) => Ok(Some(html)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    /// Read a static asset beneath one of the exposed prefixes.
    pub async fn read_asset(
        &self,
        prefix: &str,
        file: &str,
    ) -> Result<Option<Vec<u8>>, SiteStoreError> {
        let path = self.resolve(&format!("{prefix}/{file}"))?;
        match fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    // Only plain path segments may extend the root; anything else (parent
    // references, absolute paths, prefixes) is rejected.
    fn resolve(&self, relative: &str) -> Result<PathBuf, SiteStoreError> {
        let mut sanitized = self.root.clone();
        for component in Path::new(relative).components() {
            match component {
                Component::Normal(part) => sanitized.push(part),
                _ => return Err(SiteStoreError::InvalidPath),
            }
        }
        Ok(sanitized)
    }
}
