//! Per-request asset requirements.
//!
//! A [`PageAssetSet`] is created for one rendering context (typically one HTTP
//! request), borrows the shared [`AssetCatalog`], collects whatever the view
//! and template code says it needs, and finally produces ordered,
//! duplicate-free output.
//!
//! # Ordering rules
//!
//! - **Scripts**: for each required library, in requirement order, its
//!   dependency closure then the library itself. A URL already emitted is
//!   skipped, so a shared dependency appears once, at its first position.
//! - **Stylesheets**: sorted by `(priority, name)`, independent of the order in
//!   which they were required.
//! - **Bottom scripts**: requirement order, after every head script.
//! - **Onload**: requirement order, never deduplicated.
//!
//! Any requirement naming an unknown asset fails with
//! [`AssetError::UnknownAsset`] and leaves the page unchanged, so a render can
//! never silently drop a script.
//!
//! # Example
//!
//! ```rust
//! use pagedeps::catalog::AssetCatalog;
//! use pagedeps::page::PageAssetSet;
//!
//! # fn main() -> Result<(), pagedeps::core::AssetError> {
//! let mut catalog = AssetCatalog::default();
//! catalog.register_library("jquery", "/jq.js", &[])?;
//! catalog.register_library("jquery.ui", "/jqui.js", &["jquery"])?;
//! catalog.register_library("deform", "/deform.js", &["jquery"])?;
//!
//! let mut page = PageAssetSet::new(&catalog);
//! page.require_library("jquery.ui")?;
//! page.require_library("deform")?;
//! assert_eq!(page.script_urls(), ["/jq.js", "/jqui.js", "/deform.js"]);
//! # Ok(())
//! # }
//! ```

pub mod render;

use std::collections::HashSet;

use serde::Serialize;
use tracing::{debug, trace};

use crate::catalog::{AssetCatalog, BottomScript, Library, Stylesheet};
use crate::core::AssetError;

pub use render::OnloadWrap;

/// Requirements gathered while one page is being built.
#[derive(Debug, Clone)]
pub struct PageAssetSet<'a> {
    catalog: &'a AssetCatalog,
    libraries: Vec<&'a Library>,
    stylesheets: Vec<&'a Stylesheet>,
    bottom_scripts: Vec<&'a BottomScript>,
    onload: Vec<String>,
}

/// Fully resolved output of a page, in emission order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedPage {
    pub scripts: Vec<String>,
    pub stylesheets: Vec<String>,
    pub bottom_scripts: Vec<String>,
    pub onload: Vec<String>,
}

impl<'a> PageAssetSet<'a> {
    /// An empty page backed by `catalog`.
    pub fn new(catalog: &'a AssetCatalog) -> Self {
        Self {
            catalog,
            libraries: Vec::new(),
            stylesheets: Vec::new(),
            bottom_scripts: Vec::new(),
            onload: Vec::new(),
        }
    }

    pub fn catalog(&self) -> &'a AssetCatalog {
        self.catalog
    }

    /// Require a library. Requiring it again has no further effect.
    pub fn require_library(&mut self, name: &str) -> Result<(), AssetError> {
        let library = self.catalog.get_library(name)?;
        self.push_library(library);
        Ok(())
    }

    /// Require several libraries in order.
    ///
    /// All names are looked up before anything is recorded, so an unknown name
    /// leaves the page unchanged.
    pub fn require_libraries<S: AsRef<str>>(&mut self, names: &[S]) -> Result<(), AssetError> {
        let libraries = names
            .iter()
            .map(|n| self.catalog.get_library(n.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        for library in libraries {
            self.push_library(library);
        }
        Ok(())
    }

    /// Require a stylesheet. Requiring it again has no further effect.
    pub fn require_stylesheet(&mut self, name: &str) -> Result<(), AssetError> {
        let stylesheet = self.catalog.get_stylesheet(name)?;
        self.push_stylesheet(stylesheet);
        Ok(())
    }

    /// Require several stylesheets; all-or-nothing like [`require_libraries`](Self::require_libraries).
    pub fn require_stylesheets<S: AsRef<str>>(&mut self, names: &[S]) -> Result<(), AssetError> {
        let stylesheets = names
            .iter()
            .map(|n| self.catalog.get_stylesheet(n.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        for stylesheet in stylesheets {
            self.push_stylesheet(stylesheet);
        }
        Ok(())
    }

    /// Require a bottom script along with the libraries it depends on.
    pub fn require_bottom_script(&mut self, name: &str) -> Result<(), AssetError> {
        let script = self.catalog.get_bottom_script(name)?;
        self.push_bottom_script(script)
    }

    /// Require a package: its libraries, stylesheets and bottom scripts in
    /// declared order, then its onload snippet.
    ///
    /// Every member is resolved first; a package naming an unknown asset fails
    /// without changing the page.
    pub fn require_package(&mut self, name: &str) -> Result<(), AssetError> {
        let resolved = self.catalog.packages().resolve(name, self.catalog)?;
        // Bottom script dependencies were validated at registration.
        let script_libraries = resolved
            .bottom_scripts
            .iter()
            .flat_map(|s| s.depends.iter())
            .map(|n| self.catalog.get_library(n))
            .collect::<Result<Vec<_>, _>>()?;

        debug!("Requiring package '{}'", name);

        for library in resolved.libraries {
            self.push_library(library);
        }
        for stylesheet in resolved.stylesheets {
            self.push_stylesheet(stylesheet);
        }
        for library in script_libraries {
            self.push_library(library);
        }
        for script in resolved.bottom_scripts {
            if !self.bottom_scripts.iter().any(|s| s.name == script.name) {
                self.bottom_scripts.push(script);
            }
        }
        if let Some(onload) = resolved.package.onload() {
            let code = onload.evaluate();
            if !code.trim().is_empty() {
                self.onload.push(code);
            }
        }
        Ok(())
    }

    /// Append an inline snippet. Snippets are never deduplicated.
    pub fn add_onload(&mut self, code: impl Into<String>) {
        self.onload.push(code.into());
    }

    /// Required libraries in requirement order (not expanded).
    pub fn required_libraries(&self) -> &[&'a Library] {
        &self.libraries
    }

    /// Required stylesheets in requirement order (not sorted).
    pub fn required_stylesheets(&self) -> &[&'a Stylesheet] {
        &self.stylesheets
    }

    /// Required bottom scripts in requirement order.
    pub fn required_bottom_scripts(&self) -> &[&'a BottomScript] {
        &self.bottom_scripts
    }

    /// Onload snippets in the order they were added.
    pub fn onload(&self) -> &[String] {
        &self.onload
    }

    /// Whether nothing has been required yet.
    pub fn is_empty(&self) -> bool {
        self.libraries.is_empty()
            && self.stylesheets.is_empty()
            && self.bottom_scripts.is_empty()
            && self.onload.is_empty()
    }

    /// Head script URLs: dependencies first, each URL once.
    pub fn script_urls(&self) -> Vec<&'a str> {
        let mut seen = HashSet::new();
        let mut urls = Vec::new();

        for library in &self.libraries {
            for dep in &library.dependencies {
                // Closures only name registered libraries and the catalog is
                // immutable while this page borrows it.
                if let Some(dep) = self.catalog.library(dep)
                    && seen.insert(dep.url.as_str())
                {
                    urls.push(dep.url.as_str());
                }
            }
            if seen.insert(library.url.as_str()) {
                urls.push(library.url.as_str());
            }
        }

        trace!("Resolved {} script url(s) from {} libraries", urls.len(), self.libraries.len());
        urls
    }

    /// Stylesheet URLs sorted by `(priority, name)`, each URL once.
    pub fn stylesheet_urls(&self) -> Vec<&'a str> {
        let mut sorted = self.stylesheets.clone();
        sorted.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));

        let mut seen = HashSet::new();
        sorted.into_iter().map(|s| s.url.as_str()).filter(|url| seen.insert(*url)).collect()
    }

    /// Bottom script URLs in requirement order, skipping any URL already
    /// loaded in the head.
    pub fn bottom_script_urls(&self) -> Vec<&'a str> {
        let mut seen: HashSet<&str> = self.script_urls().into_iter().collect();
        self.bottom_scripts
            .iter()
            .map(|s| s.url.as_str())
            .filter(|url| seen.insert(*url))
            .collect()
    }

    /// Every output list, owned, in emission order.
    pub fn resolve(&self) -> ResolvedPage {
        ResolvedPage {
            scripts: self.script_urls().into_iter().map(str::to_string).collect(),
            stylesheets: self.stylesheet_urls().into_iter().map(str::to_string).collect(),
            bottom_scripts: self.bottom_script_urls().into_iter().map(str::to_string).collect(),
            onload: self.onload.clone(),
        }
    }

    fn push_library(&mut self, library: &'a Library) {
        if self.libraries.iter().any(|l| l.name == library.name) {
            trace!("Library '{}' already required", library.name);
            return;
        }
        trace!("Requiring library '{}'", library.name);
        self.libraries.push(library);
    }

    fn push_stylesheet(&mut self, stylesheet: &'a Stylesheet) {
        if !self.stylesheets.iter().any(|s| s.name == stylesheet.name) {
            trace!("Requiring stylesheet '{}'", stylesheet.name);
            self.stylesheets.push(stylesheet);
        }
    }

    fn push_bottom_script(&mut self, script: &'a BottomScript) -> Result<(), AssetError> {
        let libraries = script
            .depends
            .iter()
            .map(|n| self.catalog.get_library(n))
            .collect::<Result<Vec<_>, _>>()?;
        for library in libraries {
            self.push_library(library);
        }
        if !self.bottom_scripts.iter().any(|s| s.name == script.name) {
            trace!("Requiring bottom script '{}'", script.name);
            self.bottom_scripts.push(script);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Onload, Package};
    use crate::test_utils::deform_catalog;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_deform_scenario() {
        let catalog = deform_catalog();
        let mut page = PageAssetSet::new(&catalog);

        page.require_library("jquery.ui").unwrap();
        page.require_library("deform").unwrap();
        page.require_stylesheet("deform").unwrap();
        page.require_stylesheet("base").unwrap();

        assert_eq!(page.script_urls(), ["/jq.js", "/jqui.js", "/deform.js"]);
        assert_eq!(page.stylesheet_urls(), ["/base.css", "/deform.css"]);
    }

    #[test]
    fn test_require_library_is_idempotent() {
        let catalog = deform_catalog();
        let mut once = PageAssetSet::new(&catalog);
        once.require_library("deform").unwrap();

        let mut twice = PageAssetSet::new(&catalog);
        twice.require_library("deform").unwrap();
        twice.require_library("deform").unwrap();

        assert_eq!(once.script_urls(), twice.script_urls());
        assert_eq!(twice.required_libraries().len(), 1);
    }

    #[test]
    fn test_dependency_required_after_dependent_is_not_repeated() {
        let catalog = deform_catalog();
        let mut page = PageAssetSet::new(&catalog);
        page.require_libraries(&["deform", "jquery", "jquery.ui"]).unwrap();
        assert_eq!(page.script_urls(), ["/jq.js", "/deform.js", "/jqui.js"]);
    }

    #[test]
    fn test_unknown_library_leaves_page_unchanged() {
        let catalog = deform_catalog();
        let mut page = PageAssetSet::new(&catalog);
        page.require_library("jquery").unwrap();

        let err = page.require_library("underscore").unwrap_err();
        assert!(matches!(err, AssetError::UnknownAsset { .. }));
        assert_eq!(page.script_urls(), ["/jq.js"]);

        let err = page.require_libraries(&["deform", "underscore"]).unwrap_err();
        assert!(matches!(err, AssetError::UnknownAsset { .. }));
        assert_eq!(page.script_urls(), ["/jq.js"]);
    }

    #[test]
    fn test_stylesheet_order_is_independent_of_requirement_order() {
        let catalog = deform_catalog();
        let mut forward = PageAssetSet::new(&catalog);
        forward.require_stylesheets(&["base", "deform"]).unwrap();
        let mut backward = PageAssetSet::new(&catalog);
        backward.require_stylesheets(&["deform", "base"]).unwrap();

        assert_eq!(forward.stylesheet_urls(), backward.stylesheet_urls());
    }

    #[test]
    fn test_equal_priorities_sort_by_name() {
        let mut catalog = AssetCatalog::default();
        catalog.register_stylesheet("zebra", "/z.css", Some(10)).unwrap();
        catalog.register_stylesheet("apple", "/a.css", Some(10)).unwrap();
        let mut page = PageAssetSet::new(&catalog);
        page.require_stylesheets(&["zebra", "apple"]).unwrap();
        assert_eq!(page.stylesheet_urls(), ["/a.css", "/z.css"]);
    }

    #[test]
    fn test_package_expands_like_individual_requirements() {
        let mut catalog = deform_catalog();
        catalog
            .register_package(
                Package::new("forms")
                    .with_libraries(["jquery.ui", "deform"])
                    .with_stylesheets(["deform"])
                    .with_onload("deform.load();"),
            )
            .unwrap();

        let mut via_package = PageAssetSet::new(&catalog);
        via_package.require_package("forms").unwrap();

        let mut by_hand = PageAssetSet::new(&catalog);
        by_hand.require_library("jquery.ui").unwrap();
        by_hand.require_library("deform").unwrap();
        by_hand.require_stylesheet("deform").unwrap();
        by_hand.add_onload("deform.load();");

        assert_eq!(via_package.resolve(), by_hand.resolve());
    }

    #[test]
    fn test_package_with_unknown_member_fails_whole() {
        let mut catalog = deform_catalog();
        catalog
            .register_package(Package::new("broken").with_libraries(["jquery", "missing"]))
            .unwrap();
        let mut page = PageAssetSet::new(&catalog);
        assert!(page.require_package("broken").is_err());
        assert!(page.is_empty());
        assert!(matches!(
            page.require_package("nope"),
            Err(AssetError::UnknownAsset { .. })
        ));
    }

    #[test]
    fn test_package_onload_is_evaluated_per_require() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let mut catalog = deform_catalog();
        catalog
            .register_package(Package::new("lazy").with_onload(Onload::lazy(move || {
                format!("step({});", counter.fetch_add(1, Ordering::SeqCst))
            })))
            .unwrap();

        let mut page = PageAssetSet::new(&catalog);
        page.require_package("lazy").unwrap();
        page.require_package("lazy").unwrap();
        assert_eq!(page.onload(), ["step(0);", "step(1);"]);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_onload_is_not_deduplicated() {
        let catalog = deform_catalog();
        let mut page = PageAssetSet::new(&catalog);
        page.add_onload("a();");
        page.add_onload("b();");
        page.add_onload("a();");
        assert_eq!(page.onload(), ["a();", "b();", "a();"]);
    }

    #[test]
    fn test_bottom_scripts_pull_libraries_into_head() {
        let mut catalog = deform_catalog();
        catalog.register_bottom_script("table", "/table.js", &["jquery.ui"]).unwrap();
        let mut page = PageAssetSet::new(&catalog);
        page.require_bottom_script("table").unwrap();
        page.require_bottom_script("table").unwrap();

        assert_eq!(page.script_urls(), ["/jq.js", "/jqui.js"]);
        assert_eq!(page.bottom_script_urls(), ["/table.js"]);
    }

    #[test]
    fn test_bottom_script_url_already_in_head_is_skipped() {
        let mut catalog = deform_catalog();
        catalog.register_bottom_script("deform-again", "/deform.js", &[]).unwrap();
        let mut page = PageAssetSet::new(&catalog);
        page.require_library("deform").unwrap();
        page.require_bottom_script("deform-again").unwrap();
        assert!(page.bottom_script_urls().is_empty());
    }

    #[test]
    fn test_shared_url_emitted_once() {
        let mut catalog = AssetCatalog::default();
        catalog.register_library("jquery", "/jq.js", &[]).unwrap();
        catalog.register_library("$", "/jq.js", &[]).unwrap();
        let mut page = PageAssetSet::new(&catalog);
        page.require_libraries(&["jquery", "$"]).unwrap();
        assert_eq!(page.script_urls(), ["/jq.js"]);
    }
}
