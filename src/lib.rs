//! pagedeps - page asset dependency resolution
//!
//! A registry of JavaScript libraries, CSS stylesheets, bottom scripts and
//! packages, plus a per-request collector that turns "this page needs X"
//! into an ordered, duplicate-free list of `<script>` and `<link>` tags.
//!
//! # Architecture Overview
//!
//! - An [`AssetCatalog`](catalog::AssetCatalog) is built once at startup,
//!   either in code or from an `assets.toml` manifest, and then shared
//!   read-only (`&AssetCatalog` or `Arc<AssetCatalog>`) by every request.
//! - Each request creates a [`PageAssetSet`](page::PageAssetSet) borrowing the
//!   catalog, records requirements as templates run, and renders the result.
//!
//! Library dependency closures are computed when a library is registered.
//! Because a dependency must be registered before anything that depends on
//! it, the dependency graph cannot contain cycles.
//!
//! # Core Modules
//!
//! - [`catalog`] - registration of libraries, stylesheets, bottom scripts and packages
//! - [`page`] - per-request requirements, ordering and HTML rendering
//! - [`config`] - the `assets.toml` manifest and catalog loading
//! - [`core`] - errors, asset kinds and deployment profiles
//! - [`cli`] - the `pagedeps` command-line tool
//!
//! # Example
//!
//! ```rust
//! use pagedeps::catalog::AssetCatalog;
//! use pagedeps::core::Profiles;
//! use pagedeps::page::{OnloadWrap, PageAssetSet};
//!
//! # fn main() -> Result<(), pagedeps::core::AssetError> {
//! let profiles = Profiles::named(["development", "production"], "production")?;
//! let mut catalog = AssetCatalog::new(profiles);
//! catalog.register_library("jquery", ["/js/jquery.js", "/js/jquery.min.js"], &[])?;
//! catalog.register_library("deform", "/js/deform.js", &["jquery"])?;
//! catalog.register_stylesheet("deform", "/css/deform.css", None)?;
//!
//! let mut page = PageAssetSet::new(&catalog);
//! page.require_library("deform")?;
//! page.require_stylesheet("deform")?;
//! page.add_onload("deform.load();");
//!
//! assert_eq!(page.script_urls(), ["/js/jquery.min.js", "/js/deform.js"]);
//! let head = page.render_head();
//! let bottom = page.render_bottom(OnloadWrap::Jquery);
//! # let _ = (head, bottom);
//! # Ok(())
//! # }
//! ```
//!
//! # Manifest Format (assets.toml)
//!
//! ```toml
//! profiles = ["development", "production"]
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
//! name = "deform"
//! url = "/css/deform.css"
//! ```
//!
//! # Command-Line Usage
//!
//! ```bash
//! pagedeps render deform css:deform --onload 'deform.load();'
//! pagedeps --profile production render --format json deform
//! pagedeps tree deform
//! pagedeps validate --strict
//! pagedeps list --kind css
//! ```

pub mod catalog;
pub mod cli;
pub mod config;
pub mod core;
pub mod page;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
