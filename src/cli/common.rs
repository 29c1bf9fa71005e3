//! Manifest lookup shared by every command.

use anyhow::Result;
use std::path::PathBuf;
use tracing::debug;

use crate::catalog::AssetCatalog;
use crate::config::{AssetManifest, find_manifest_with_optional, load_catalog};

/// Where to find the manifest and which profile to build it for.
#[derive(Debug, Clone, Default)]
pub struct ManifestOptions {
    /// Explicit manifest path; searched for when `None`.
    pub path: Option<PathBuf>,
    /// Active profile; the manifest's default when `None`.
    pub profile: Option<String>,
}

impl ManifestOptions {
    /// The manifest file to read.
    pub fn manifest_path(&self) -> Result<PathBuf> {
        find_manifest_with_optional(self.path.clone())
    }

    /// Parse the manifest without building a catalog.
    pub fn load_manifest(&self) -> Result<(PathBuf, AssetManifest)> {
        let path = self.manifest_path()?;
        let manifest = AssetManifest::load(&path)?;
        Ok((path, manifest))
    }

    /// Build the catalog for the selected profile.
    pub fn load_catalog(&self) -> Result<AssetCatalog> {
        let path = self.manifest_path()?;
        debug!(
            "Using manifest {} (profile: {})",
            path.display(),
            self.profile.as_deref().unwrap_or("<manifest default>")
        );
        load_catalog(&path, self.profile.as_deref())
    }
}
