//! Named brand-mark assets.
//!
//! The compositor only needs to know that a mark exists, decodes, and what
//! shape it is. Drawing it is the rasterizer's job, so a lookup returns
//! [`AssetInfo`] rather than pixels.

use super::backend::BackendError;
use serde::Serialize;
use std::path::PathBuf;

/// A resolved, decodable mark image.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssetInfo {
    /// Logical path as requested, e.g. `brands/sony.png`.
    pub path: String,
    pub width: u32,
    pub height: u32,
}

impl AssetInfo {
    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }
}

/// Lookup of mark images by logical path.
pub trait AssetSource: Sync {
    fn lookup(&self, path: &str) -> Result<AssetInfo, BackendError>;
}

/// Assets stored under a directory on disk.
#[derive(Debug, Clone)]
pub struct FsAssets {
    root: PathBuf,
}

impl FsAssets {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl AssetSource for FsAssets {
    /// Decode the file fully so a truncated or corrupt mark is caught here
    /// rather than at draw time.
    fn lookup(&self, path: &str) -> Result<AssetInfo, BackendError> {
        let full = self.root.join(path);
        let img = image::ImageReader::open(&full)?
            .with_guessed_format()?
            .decode()?;
        if img.width() == 0 || img.height() == 0 {
            return Err(BackendError::ProcessingFailed(format!(
                "{} has no pixels",
                full.display()
            )));
        }
        Ok(AssetInfo {
            path: path.to_string(),
            width: img.width(),
            height: img.height(),
        })
    }
}

/// An asset source with nothing in it. Every brand falls back to text.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAssets;

impl AssetSource for NoAssets {
    fn lookup(&self, path: &str) -> Result<AssetInfo, BackendError> {
        Err(BackendError::ProcessingFailed(format!(
            "no asset source configured for {path}"
        )))
    }
}
