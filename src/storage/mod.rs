//! Local image storage.
//!
//! Uploaded photos are written to a flat directory, one file per LINE
//! message id, for the print station to pick up.

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use async_trait::async_trait;
use tracing::debug;

use crate::bot::ports::ImageStore;

/// Directory that receives uploaded images.
#[derive(Debug, Clone)]
pub struct ImageDirectory {
    root: PathBuf,
}

impl ImageDirectory {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path an image named `name` is stored at.
    pub fn path_for(&self, name: &str) -> Result<PathBuf> {
        if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-') {
            bail!("invalid image name: {:?}", name);
        }
        Ok(self.root.join(format!("{name}.jpg")))
    }

    /// Write `bytes` to disk, creating the directory on first use.
    pub async fn write(&self, name: &str, bytes: &[u8]) -> Result<PathBuf> {
        let path = self.path_for(name)?;
        tokio::fs::create_dir_all(&self.root).await?;
        tokio::fs::write(&path, bytes).await?;

        debug!("Saved {} bytes to {}", bytes.len(), path.display());
        Ok(path)
    }
}

#[async_trait]
impl ImageStore for ImageDirectory {
    async fn save_image(&self, name: &str, bytes: &[u8]) -> Result<PathBuf> {
        self.write(name, bytes).await
    }
}
