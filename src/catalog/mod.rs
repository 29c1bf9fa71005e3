//! The process-wide asset catalog.
//!
//! An [`AssetCatalog`] is populated once while the application starts, then
//! shared read-only by every rendering context. All graph work happens here, at
//! registration time:
//!
//! - a library may only depend on libraries that are already registered, so the
//!   dependency graph is acyclic by construction and no cycle search is needed
//! - each library stores the full transitive closure of its dependencies,
//!   dependency-first and duplicate-free, so a page only concatenates lists
//! - each stylesheet gets a priority, explicit or auto-assigned in registration
//!   order starting at [`AUTO_PRIORITY_START`]
//!
//! Registration is fail-fast: a malformed entry is rejected whole and leaves the
//! catalog exactly as it was, while earlier registrations stand.
//!
//! # Example
//!
//! ```rust
//! use pagedeps::catalog::{AssetCatalog, Package};
//! use pagedeps::core::Profiles;
//!
//! # fn main() -> Result<(), pagedeps::core::AssetError> {
//! let mut catalog = AssetCatalog::new(Profiles::new(["development", "production"], 1)?);
//! catalog.register_library("jquery", ["/js/jquery.js", "/js/jquery.min.js"], &[])?;
//! catalog.register_library("jquery.ui", "/js/jquery-ui.js", &["jquery"])?;
//! catalog.register_stylesheet("base", "/css/base.css", Some(1))?;
//! catalog.register_package(Package::new("ui").with_libraries(["jquery.ui"]))?;
//!
//! let ui = catalog.get_library("jquery.ui")?;
//! assert_eq!(ui.dependencies(), ["jquery"]);
//! assert_eq!(catalog.get_library("jquery")?.url(), "/js/jquery.min.js");
//! # Ok(())
//! # }
//! ```

mod entries;
pub mod packages;
pub mod types;

use std::collections::HashSet;

use tracing::debug;

use self::entries::Entries;
use crate::core::{AssetError, AssetKind, Profiles, Urls};

pub use packages::{PackageIndex, ResolvedPackage};
pub use types::{BottomScript, Library, Onload, Package, Stylesheet};

/// First priority handed to a stylesheet registered without one.
///
/// Later auto-assigned priorities count up from here, so explicit priorities
/// below this value sort ahead of every stylesheet that relies on declaration
/// order.
pub const AUTO_PRIORITY_START: i64 = 100;

/// Registry of every library, stylesheet, bottom script and package known to
/// the application.
#[derive(Debug, Clone)]
pub struct AssetCatalog {
    profiles: Profiles,
    libraries: Entries<Library>,
    stylesheets: Entries<Stylesheet>,
    bottom_scripts: Entries<BottomScript>,
    packages: PackageIndex,
    next_priority: i64,
}

impl AssetCatalog {
    /// An empty catalog serving the active profile of `profiles`.
    pub fn new(profiles: Profiles) -> Self {
        Self {
            profiles,
            libraries: Entries::new(),
            stylesheets: Entries::new(),
            bottom_scripts: Entries::new(),
            packages: PackageIndex::new(),
            next_priority: AUTO_PRIORITY_START,
        }
    }

    /// The profiles this catalog was configured with.
    pub fn profiles(&self) -> &Profiles {
        &self.profiles
    }

    /// Register a script library.
    ///
    /// `depends` names libraries that must already be registered. The stored
    /// library carries the transitive closure of those dependencies.
    ///
    /// # Errors
    ///
    /// - [`AssetError::Configuration`] for an empty name or a URL count that does
    ///   not match the declared profiles
    /// - [`AssetError::DuplicateName`] if the name is taken
    /// - [`AssetError::SelfDependency`] if `depends` contains `name`
    /// - [`AssetError::UnknownDependency`] naming the first unregistered dependency
    pub fn register_library(
        &mut self,
        name: &str,
        urls: impl Into<Urls>,
        depends: &[&str],
    ) -> Result<&Library, AssetError> {
        let name = check_name(AssetKind::Library, name)?;
        if self.libraries.contains(name) {
            return Err(AssetError::DuplicateName {
                kind: AssetKind::Library,
                name: name.to_string(),
            });
        }
        if depends.contains(&name) {
            return Err(AssetError::SelfDependency {
                name: name.to_string(),
            });
        }

        let url = self.profiles.select(name, &urls.into())?;
        let dependencies = self.expand_dependencies(AssetKind::Library, name, depends)?;

        debug!(
            "Registered library '{}' at {} ({} dependencies: {})",
            name,
            url,
            dependencies.len(),
            dependencies.join(", ")
        );

        let library = Library {
            name: name.to_string(),
            url,
            depends: dedup(depends),
            dependencies,
        };
        Ok(self.libraries.insert(name.to_string(), library))
    }

    /// Register a stylesheet.
    ///
    /// Without an explicit `priority` the stylesheet gets the next value of an
    /// auto-incrementing sequence, so declaration order decides among such
    /// stylesheets.
    pub fn register_stylesheet(
        &mut self,
        name: &str,
        urls: impl Into<Urls>,
        priority: Option<i64>,
    ) -> Result<&Stylesheet, AssetError> {
        let name = check_name(AssetKind::Stylesheet, name)?;
        if self.stylesheets.contains(name) {
            return Err(AssetError::DuplicateName {
                kind: AssetKind::Stylesheet,
                name: name.to_string(),
            });
        }

        let url = self.profiles.select(name, &urls.into())?;
        let priority = match priority {
            Some(priority) => priority,
            None => {
                let auto = self.next_priority;
                self.next_priority += 1;
                auto
            }
        };

        debug!("Registered stylesheet '{}' at {} (priority {})", name, url, priority);

        let stylesheet = Stylesheet {
            name: name.to_string(),
            url,
            priority,
        };
        Ok(self.stylesheets.insert(name.to_string(), stylesheet))
    }

    /// Register a script that belongs at the bottom of the page body.
    ///
    /// `depends` follows the same rules as for [`register_library`](Self::register_library).
    pub fn register_bottom_script(
        &mut self,
        name: &str,
        urls: impl Into<Urls>,
        depends: &[&str],
    ) -> Result<&BottomScript, AssetError> {
        let name = check_name(AssetKind::BottomScript, name)?;
        if self.bottom_scripts.contains(name) {
            return Err(AssetError::DuplicateName {
                kind: AssetKind::BottomScript,
                name: name.to_string(),
            });
        }

        let url = self.profiles.select(name, &urls.into())?;
        let libraries = self.expand_dependencies(AssetKind::BottomScript, name, depends)?;

        debug!("Registered bottom script '{}' at {} ({} libraries)", name, url, libraries.len());

        let script = BottomScript {
            name: name.to_string(),
            url,
            depends: dedup(depends),
            libraries,
        };
        Ok(self.bottom_scripts.insert(name.to_string(), script))
    }

    /// Register a package. Its members are resolved when it is required.
    pub fn register_package(&mut self, package: Package) -> Result<&Package, AssetError> {
        debug!(
            "Registering package '{}' ({} libraries, {} stylesheets, {} bottom scripts)",
            package.name,
            package.libraries.len(),
            package.stylesheets.len(),
            package.bottom_scripts.len()
        );
        self.packages.register(package)
    }

    /// Remove a library that nothing else depends on.
    pub fn remove_library(&mut self, name: &str) -> Result<Library, AssetError> {
        if !self.libraries.contains(name) {
            return Err(AssetError::unknown(AssetKind::Library, name));
        }

        let dependents: Vec<String> = self
            .libraries
            .iter()
            .filter(|l| l.depends_on(name))
            .map(|l| l.name.clone())
            .chain(
                self.bottom_scripts
                    .iter()
                    .filter(|s| s.libraries.iter().any(|l| l == name))
                    .map(|s| s.name.clone()),
            )
            .collect();
        if !dependents.is_empty() {
            return Err(AssetError::AssetInUse {
                name: name.to_string(),
                dependents,
            });
        }

        debug!("Removed library '{}'", name);
        self.libraries.remove(name).ok_or_else(|| AssetError::unknown(AssetKind::Library, name))
    }

    pub fn remove_stylesheet(&mut self, name: &str) -> Result<Stylesheet, AssetError> {
        debug!("Removing stylesheet '{}'", name);
        self.stylesheets
            .remove(name)
            .ok_or_else(|| AssetError::unknown(AssetKind::Stylesheet, name))
    }

    pub fn remove_bottom_script(&mut self, name: &str) -> Result<BottomScript, AssetError> {
        debug!("Removing bottom script '{}'", name);
        self.bottom_scripts
            .remove(name)
            .ok_or_else(|| AssetError::unknown(AssetKind::BottomScript, name))
    }

    pub fn remove_package(&mut self, name: &str) -> Result<Package, AssetError> {
        debug!("Removing package '{}'", name);
        self.packages.remove(name)
    }

    pub fn library(&self, name: &str) -> Option<&Library> {
        self.libraries.get(name)
    }

    pub fn stylesheet(&self, name: &str) -> Option<&Stylesheet> {
        self.stylesheets.get(name)
    }

    pub fn bottom_script(&self, name: &str) -> Option<&BottomScript> {
        self.bottom_scripts.get(name)
    }

    pub fn package(&self, name: &str) -> Option<&Package> {
        self.packages.get(name)
    }

    /// Like [`library`](Self::library), failing with [`AssetError::UnknownAsset`].
    pub fn get_library(&self, name: &str) -> Result<&Library, AssetError> {
        self.library(name).ok_or_else(|| AssetError::unknown(AssetKind::Library, name))
    }

    /// Like [`stylesheet`](Self::stylesheet), failing with [`AssetError::UnknownAsset`].
    pub fn get_stylesheet(&self, name: &str) -> Result<&Stylesheet, AssetError> {
        self.stylesheet(name).ok_or_else(|| AssetError::unknown(AssetKind::Stylesheet, name))
    }

    /// Like [`bottom_script`](Self::bottom_script), failing with [`AssetError::UnknownAsset`].
    pub fn get_bottom_script(&self, name: &str) -> Result<&BottomScript, AssetError> {
        self.bottom_script(name).ok_or_else(|| AssetError::unknown(AssetKind::BottomScript, name))
    }

    /// Libraries in registration order.
    pub fn libraries(&self) -> impl Iterator<Item = &Library> {
        self.libraries.iter()
    }

    /// Stylesheets in registration order.
    pub fn stylesheets(&self) -> impl Iterator<Item = &Stylesheet> {
        self.stylesheets.iter()
    }

    /// Bottom scripts in registration order.
    pub fn bottom_scripts(&self) -> impl Iterator<Item = &BottomScript> {
        self.bottom_scripts.iter()
    }

    pub fn packages(&self) -> &PackageIndex {
        &self.packages
    }

    /// Number of entries of the given kind.
    pub fn count(&self, kind: AssetKind) -> usize {
        match kind {
            AssetKind::Library => self.libraries.len(),
            AssetKind::Stylesheet => self.stylesheets.len(),
            AssetKind::BottomScript => self.bottom_scripts.len(),
            AssetKind::Package => self.packages.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        [AssetKind::Library, AssetKind::Stylesheet, AssetKind::BottomScript, AssetKind::Package]
            .iter()
            .all(|kind| self.count(*kind) == 0)
    }

    /// Render the direct-dependency tree of a library.
    ///
    /// Libraries already printed elsewhere in the tree are marked `(*)` and not
    /// expanded again.
    ///
    /// ```text
    /// deform.widgets
    /// ├── deform
    /// │   └── jquery
    /// └── jquery.ui
    ///     └── jquery (*)
    /// ```
    pub fn dependency_tree(&self, name: &str) -> Result<String, AssetError> {
        let root = self.get_library(name)?;
        let mut result = format!("{}\n", root.name);
        let mut visited = HashSet::new();
        visited.insert(root.name.as_str());
        self.build_tree_string(root, &mut result, "", &mut visited);
        Ok(result)
    }

    fn build_tree_string<'a>(
        &'a self,
        node: &'a Library,
        result: &mut String,
        prefix: &str,
        visited: &mut HashSet<&'a str>,
    ) {
        for (i, dep) in node.depends.iter().enumerate() {
            let is_last = i == node.depends.len() - 1;
            let connector = if is_last {
                "└── "
            } else {
                "├── "
            };

            let Some(library) = self.libraries.get(dep) else {
                continue;
            };
            if !visited.insert(library.name.as_str()) {
                result.push_str(&format!("{prefix}{connector}{} (*)\n", library.name));
                continue;
            }
            result.push_str(&format!("{prefix}{connector}{}\n", library.name));

            let child_prefix = if is_last {
                format!("{prefix}    ")
            } else {
                format!("{prefix}│   ")
            };
            self.build_tree_string(library, result, &child_prefix, visited);
        }
    }

    /// Flatten the closures of `depends` into one dependency-first list.
    ///
    /// Each dependency contributes its own stored closure followed by itself.
    /// Because dependencies are registered before dependents, every closure is
    /// already complete and the walk never recurses.
    fn expand_dependencies(
        &self,
        kind: AssetKind,
        dependent: &str,
        depends: &[&str],
    ) -> Result<Vec<String>, AssetError> {
        let mut closure = Vec::new();
        let mut seen: HashSet<&str> = HashSet::new();

        for dep in depends {
            let library =
                self.libraries.get(dep).ok_or_else(|| AssetError::UnknownDependency {
                    kind,
                    dependent: dependent.to_string(),
                    dependency: (*dep).to_string(),
                })?;

            for name in library.dependencies.iter().chain(std::iter::once(&library.name)) {
                if seen.insert(name.as_str()) {
                    closure.push(name.clone());
                }
            }
        }

        Ok(closure)
    }
}

impl Default for AssetCatalog {
    fn default() -> Self {
        Self::new(Profiles::single())
    }
}

fn check_name(kind: AssetKind, name: &str) -> Result<&str, AssetError> {
    if name.trim().is_empty() {
        return Err(AssetError::configuration(format!("{kind} name must not be empty")));
    }
    Ok(name)
}

fn dedup(names: &[&str]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(names.len());
    for name in names {
        if !out.iter().any(|n| n == name) {
            out.push((*name).to_string());
        }
    }
    out
}
