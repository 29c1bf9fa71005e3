//! The asset manifest (`assets.toml`) and catalog loading.
//!
//! Entries are arrays of tables, so file order is registration order and a
//! library must appear after every library it depends on.
//!
//! ```toml
//! profiles = ["development", "production"]
//! default_profile = "development"
//!
//! [[library]]
//! name = "jquery"
//! url = ["/js/jquery.js", "/js/jquery.min.js"]
//!
//! [[library]]
//! name = "deform"
//! url = "/js/deform.js"
//! depends = ["jquery"]
//!
//! [[stylesheet]]
//! name = "base"
//! url = "/css/base.css"
//! priority = 1
//!
//! [[bottom_script]]
//! name = "focus"
//! url = "/js/focus.js"
//! depends = ["jquery"]
//!
//! [[package]]
//! name = "forms"
//! libraries = ["deform"]
//! stylesheets = ["base"]
//! onload = "deform.load();"
//! ```

use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::parse_config;
use crate::catalog::{AssetCatalog, Package};
use crate::core::{AssetError, DEFAULT_PROFILE, Profiles, Urls};

/// Default manifest file name.
pub const MANIFEST_FILE: &str = "assets.toml";

/// Parsed contents of an asset manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AssetManifest {
    /// Declared profiles. Empty means a single profile named `default`.
    #[serde(default)]
    pub profiles: Vec<String>,

    /// Profile used when none is selected explicitly.
    #[serde(default)]
    pub default_profile: Option<String>,

    #[serde(default, rename = "library")]
    pub libraries: Vec<LibraryEntry>,

    #[serde(default, rename = "stylesheet")]
    pub stylesheets: Vec<StylesheetEntry>,

    #[serde(default, rename = "bottom_script")]
    pub bottom_scripts: Vec<BottomScriptEntry>,

    #[serde(default, rename = "package")]
    pub packages: Vec<PackageEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LibraryEntry {
    pub name: String,
    pub url: Urls,
    #[serde(default)]
    pub depends: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StylesheetEntry {
    pub name: String,
    pub url: Urls,
    #[serde(default)]
    pub priority: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BottomScriptEntry {
    pub name: String,
    pub url: Urls,
    #[serde(default)]
    pub depends: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PackageEntry {
    pub name: String,
    #[serde(default)]
    pub libraries: Vec<String>,
    #[serde(default)]
    pub stylesheets: Vec<String>,
    #[serde(default)]
    pub bottom_scripts: Vec<String>,
    #[serde(default)]
    pub onload: Option<String>,
}

impl AssetManifest {
    /// Read and parse a manifest file.
    pub fn load(path: &Path) -> Result<Self> {
        debug!("Loading asset manifest from {}", path.display());
        parse_config(path)
    }

    /// Resolve the active profile.
    ///
    /// `selected` wins over `default_profile`; with neither, the first declared
    /// profile is active.
    pub fn profiles(&self, selected: Option<&str>) -> Result<Profiles, AssetError> {
        let names = if self.profiles.is_empty() {
            vec![DEFAULT_PROFILE.to_string()]
        } else {
            self.profiles.clone()
        };

        match selected.or(self.default_profile.as_deref()) {
            Some(active) => Profiles::named(names, active),
            None => Profiles::new(names, 0),
        }
    }

    /// Build a catalog, registering entries in file order.
    ///
    /// Libraries are registered first, then stylesheets, bottom scripts and
    /// packages. The first failing entry aborts the build.
    pub fn into_catalog(&self, selected: Option<&str>) -> Result<AssetCatalog, AssetError> {
        let profiles = self.profiles(selected)?;
        info!("Building asset catalog for profile '{}'", profiles.active_name());
        let mut catalog = AssetCatalog::new(profiles);

        for entry in &self.libraries {
            let depends: Vec<&str> = entry.depends.iter().map(String::as_str).collect();
            catalog.register_library(&entry.name, entry.url.clone(), &depends)?;
        }
        for entry in &self.stylesheets {
            catalog.register_stylesheet(&entry.name, entry.url.clone(), entry.priority)?;
        }
        for entry in &self.bottom_scripts {
            let depends: Vec<&str> = entry.depends.iter().map(String::as_str).collect();
            catalog.register_bottom_script(&entry.name, entry.url.clone(), &depends)?;
        }
        for entry in &self.packages {
            let mut package = Package::new(&entry.name)
                .with_libraries(entry.libraries.iter().cloned())
                .with_stylesheets(entry.stylesheets.iter().cloned())
                .with_bottom_scripts(entry.bottom_scripts.iter().cloned());
            if let Some(onload) = &entry.onload {
                package = package.with_onload(onload.as_str());
            }
            catalog.register_package(package)?;
        }

        Ok(catalog)
    }
}

impl FromStr for AssetManifest {
    type Err = AssetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(s)?)
    }
}

/// Find `assets.toml` in the current directory or the nearest parent.
pub fn find_manifest() -> Result<PathBuf> {
    let current = std::env::current_dir()
        .context("Cannot determine current working directory")?;
    Ok(find_manifest_from(current)?)
}

/// Search `start` and each of its ancestors for `assets.toml`.
pub fn find_manifest_from(start: PathBuf) -> Result<PathBuf, AssetError> {
    let mut current = start.clone();
    loop {
        let candidate = current.join(MANIFEST_FILE);
        if candidate.is_file() {
            debug!("Found asset manifest at {}", candidate.display());
            return Ok(candidate);
        }

        if !current.pop() {
            return Err(AssetError::ManifestNotFound {
                file: MANIFEST_FILE.to_string(),
                start,
            });
        }
    }
}

/// Use `explicit` when given, otherwise search upwards from the current directory.
pub fn find_manifest_with_optional(explicit: Option<PathBuf>) -> Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path),
        None => find_manifest(),
    }
}

/// Load a manifest file and build its catalog in one step.
pub fn load_catalog(path: &Path, profile: Option<&str>) -> Result<AssetCatalog> {
    let manifest = AssetManifest::load(path)?;
    manifest
        .into_catalog(profile)
        .with_context(|| format!("Failed to build asset catalog from {}", path.display()))
}
