//! Package registration and resolution.
//!
//! Packages are stored without validating their members. Resolution happens
//! when a page requires the package (or when `pagedeps validate` walks every
//! package), and fails with [`AssetError::UnknownAsset`] naming the first
//! missing member.

use tracing::trace;

use super::entries::Entries;
use super::types::{BottomScript, Library, Package, Stylesheet};
use super::AssetCatalog;
use crate::core::{AssetError, AssetKind};

/// Packages keyed by name, in registration order.
#[derive(Debug, Clone, Default)]
pub struct PackageIndex {
    packages: Entries<Package>,
}

/// A package whose members have all been found in the catalog.
#[derive(Debug, Clone)]
pub struct ResolvedPackage<'a> {
    /// The package itself
    pub package: &'a Package,
    /// Libraries in declared order
    pub libraries: Vec<&'a Library>,
    /// Stylesheets in declared order
    pub stylesheets: Vec<&'a Stylesheet>,
    /// Bottom scripts in declared order
    pub bottom_scripts: Vec<&'a BottomScript>,
}

impl PackageIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn register(&mut self, package: Package) -> Result<&Package, AssetError> {
        if package.name.trim().is_empty() {
            return Err(AssetError::configuration("package name must not be empty"));
        }
        if self.packages.contains(&package.name) {
            return Err(AssetError::DuplicateName {
                kind: AssetKind::Package,
                name: package.name,
            });
        }
        Ok(self.packages.insert(package.name.clone(), package))
    }

    pub(crate) fn remove(&mut self, name: &str) -> Result<Package, AssetError> {
        self.packages.remove(name).ok_or_else(|| AssetError::unknown(AssetKind::Package, name))
    }

    pub fn get(&self, name: &str) -> Option<&Package> {
        self.packages.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.packages.contains(name)
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Packages in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Package> {
        self.packages.iter()
    }

    /// Look up a package and every member it names.
    pub fn resolve<'a>(
        &'a self,
        name: &str,
        catalog: &'a AssetCatalog,
    ) -> Result<ResolvedPackage<'a>, AssetError> {
        let package =
            self.packages.get(name).ok_or_else(|| AssetError::unknown(AssetKind::Package, name))?;

        let libraries = package
            .libraries
            .iter()
            .map(|n| catalog.get_library(n))
            .collect::<Result<Vec<_>, _>>()?;
        let stylesheets = package
            .stylesheets
            .iter()
            .map(|n| catalog.get_stylesheet(n))
            .collect::<Result<Vec<_>, _>>()?;
        let bottom_scripts = package
            .bottom_scripts
            .iter()
            .map(|n| catalog.get_bottom_script(n))
            .collect::<Result<Vec<_>, _>>()?;

        trace!(
            "Resolved package '{}': {} libraries, {} stylesheets, {} bottom scripts",
            name,
            libraries.len(),
            stylesheets.len(),
            bottom_scripts.len()
        );

        Ok(ResolvedPackage {
            package,
            libraries,
            stylesheets,
            bottom_scripts,
        })
    }
}
