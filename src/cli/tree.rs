//! Display library dependency trees.
//!
//! With library names, prints one tree per name. Without, prints a tree for
//! every root library (one that no other library depends on), in
//! registration order.
//!
//! ```text
//! deform.widgets
//! ├── deform
//! │   └── jquery
//! └── jquery.ui
//!     └── jquery (*)
//!
//! (*) = shown above
//! ```

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use super::common::ManifestOptions;
use crate::catalog::AssetCatalog;

#[derive(Args, Debug)]
pub struct TreeCommand {
    /// Libraries to show (default: every root library)
    #[arg(value_name = "LIBRARY")]
    libraries: Vec<String>,
}

impl TreeCommand {
    pub fn execute_with_manifest_path(self, options: ManifestOptions) -> Result<()> {
        let catalog = options.load_catalog()?;
        print!("{}", self.render(&catalog)?);
        Ok(())
    }

    fn render(&self, catalog: &AssetCatalog) -> Result<String> {
        let names: Vec<&str> = if self.libraries.is_empty() {
            root_libraries(catalog)
        } else {
            self.libraries.iter().map(String::as_str).collect()
        };

        if names.is_empty() {
            return Ok(format!("{}\n", "No libraries registered".yellow()));
        }

        let mut trees = Vec::with_capacity(names.len());
        for name in names {
            trees.push(catalog.dependency_tree(name)?);
        }

        let mut output = trees.join("\n");
        if output.contains("(*)") {
            output.push_str(&format!("\n{}\n", "(*) = shown above".dimmed()));
        }
        Ok(output)
    }
}

fn root_libraries(catalog: &AssetCatalog) -> Vec<&str> {
    catalog
        .libraries()
        .filter(|candidate| {
            !catalog.libraries().any(|other| other.direct_dependencies().iter().any(|d| d == candidate.name()))
        })
        .map(|library| library.name())
        .collect()
}
