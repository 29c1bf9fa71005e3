//! Configuration loading for pagedeps
//!
//! Applications usually keep their asset declarations in a TOML manifest
//! (`assets.toml`) rather than in code. This module turns such a file into a
//! ready [`AssetCatalog`](crate::catalog::AssetCatalog).
//!
//! # Modules
//!
//! - `manifest` - the manifest schema and catalog building
//! - `parser` - generic TOML parsing with file path context
//!
//! # Profile selection
//!
//! The active profile is chosen, in order of precedence, by:
//!
//! 1. the `--profile` flag or the `PAGEDEPS_PROFILE` environment variable
//! 2. `default_profile` in the manifest
//! 3. the first entry of `profiles`
//!
//! A manifest without `profiles` has a single profile named `default`.
//!
//! Without `--manifest-path`, `assets.toml` is looked up in the current
//! directory and then in each parent directory.

mod manifest;
mod parser;

pub use manifest::{
    AssetManifest, BottomScriptEntry, LibraryEntry, MANIFEST_FILE, PackageEntry, StylesheetEntry,
    find_manifest, find_manifest_from, find_manifest_with_optional, load_catalog,
};
pub use parser::parse_config;
