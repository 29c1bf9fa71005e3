//! Validate an asset manifest.
//!
//! Checks, in order:
//!
//! 1. the manifest parses and has no unknown keys
//! 2. every entry registers for each declared profile (URL counts, dependency
//!    order, duplicate names)
//! 3. every package resolves, i.e. names only registered assets
//!
//! Warnings (an empty manifest, libraries nothing references) only fail the
//! run with `--strict`.
//!
//! ```bash
//! pagedeps validate
//! pagedeps validate --format json --strict
//! ```

use anyhow::Result;
use clap::{Args, ValueEnum};
use colored::Colorize;
use serde::Serialize;
use std::collections::HashSet;
use tracing::debug;

use super::common::ManifestOptions;
use crate::catalog::AssetCatalog;
use crate::config::AssetManifest;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text with colors
    #[default]
    Text,
    /// A single JSON object for automation
    Json,
}

#[derive(Args, Debug)]
pub struct ValidateCommand {
    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Treat warnings as errors
    #[arg(long)]
    strict: bool,
}

/// Outcome of a validation run, printed as-is with `--format json`.
#[derive(Debug, Default, Serialize)]
struct ValidationResults {
    valid: bool,
    manifest_valid: bool,
    /// Profiles whose catalog built without errors.
    profiles_valid: Vec<String>,
    packages_resolvable: bool,
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl ValidateCommand {
    pub fn execute_with_manifest_path(self, options: ManifestOptions) -> Result<()> {
        let mut results = ValidationResults::default();

        let (path, manifest) = match options.load_manifest() {
            Ok(loaded) => loaded,
            Err(e) => {
                results.errors.push(format!("{e:#}"));
                self.report(&results);
                return Err(e);
            }
        };
        results.manifest_valid = true;
        debug!("Validating {}", path.display());

        self.check(&manifest, options.profile.as_deref(), &mut results);
        results.valid = self.passed(&results);
        self.report(&results);

        if results.valid {
            Ok(())
        } else {
            Err(anyhow::anyhow!(
                "Validation of {} failed with {} error(s) and {} warning(s)",
                path.display(),
                results.errors.len(),
                results.warnings.len()
            ))
        }
    }

    /// Build the catalog for each profile in turn, or only for `selected`.
    fn check(&self, manifest: &AssetManifest, selected: Option<&str>, results: &mut ValidationResults) {
        let profiles: Vec<Option<String>> = match selected {
            Some(profile) => vec![Some(profile.to_string())],
            None if manifest.profiles.is_empty() => vec![None],
            None => manifest.profiles.iter().cloned().map(Some).collect(),
        };

        let mut packages_ok = true;
        let mut first_catalog = None;
        for profile in profiles {
            let catalog = match manifest.into_catalog(profile.as_deref()) {
                Ok(catalog) => catalog,
                Err(e) => {
                    let label = profile.as_deref().unwrap_or("default");
                    results.errors.push(format!("profile '{label}': {e}"));
                    packages_ok = false;
                    continue;
                }
            };
            results.profiles_valid.push(catalog.profiles().active_name().to_string());
            first_catalog.get_or_insert(catalog);
        }

        // Package contents do not depend on the profile, one catalog is enough.
        if let Some(catalog) = &first_catalog {
            for package in catalog.packages().iter() {
                if let Err(e) = catalog.packages().resolve(package.name(), catalog) {
                    results.errors.push(format!("package '{}': {e}", package.name()));
                    packages_ok = false;
                }
            }
            results.warnings.extend(warnings(catalog));
        }
        results.packages_resolvable = packages_ok && first_catalog.is_some();
    }

    fn passed(&self, results: &ValidationResults) -> bool {
        results.errors.is_empty() && !(self.strict && !results.warnings.is_empty())
    }

    fn report(&self, results: &ValidationResults) {
        if self.format == OutputFormat::Json {
            match serde_json::to_string_pretty(results) {
                Ok(json) => println!("{json}"),
                Err(e) => eprintln!("Failed to serialize validation results: {e}"),
            }
            return;
        }

        if results.manifest_valid {
            println!("{} Manifest parsed", "✓".green());
        }
        for profile in &results.profiles_valid {
            println!("{} Profile '{}' builds", "✓".green(), profile);
        }
        if results.packages_resolvable {
            println!("{} All packages resolve", "✓".green());
        }
        for warning in &results.warnings {
            println!("{} Warning: {}", "⚠".yellow(), warning);
        }
        for error in &results.errors {
            println!("{} {}", "✗".red(), error);
        }

        if results.valid {
            println!("{}", "Manifest is valid".green().bold());
        } else {
            println!("{}", "Manifest is invalid".red().bold());
        }
    }
}

/// Non-fatal findings about a built catalog.
fn warnings(catalog: &AssetCatalog) -> Vec<String> {
    if catalog.is_empty() {
        return vec!["No assets defined in manifest".to_string()];
    }

    let mut referenced: HashSet<&str> = HashSet::new();
    for library in catalog.libraries() {
        referenced.extend(library.dependencies().iter().map(String::as_str));
    }
    for script in catalog.bottom_scripts() {
        referenced.extend(script.libraries().iter().map(String::as_str));
    }

    for package in catalog.packages().iter() {
        referenced.extend(package.libraries().iter().map(String::as_str));
    }

    // Without packages every library is presumably required directly by
    // templates.
    let mut found = Vec::new();
    if !catalog.packages().is_empty() {
        for library in catalog.libraries() {
            if !referenced.contains(library.name()) {
                found.push(format!("library '{}' is not used by any package", library.name()));
            }
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::ManifestFixture;

    fn run(fixture: ManifestFixture, strict: bool) -> (bool, ValidationResults) {
        let manifest: AssetManifest = fixture.content.parse().unwrap();
        let cmd = ValidateCommand {
            format: OutputFormat::Json,
            strict,
        };
        let mut results = ValidationResults::default();
        cmd.check(&manifest, None, &mut results);
        (cmd.passed(&results), results)
    }

    #[test]
    fn test_basic_manifest_is_valid_for_every_profile() {
        let (passed, results) = run(ManifestFixture::basic(), true);
        assert!(passed, "{:?}", results.errors);
        assert_eq!(results.profiles_valid, ["development", "production"]);
        assert!(results.packages_resolvable);
    }

    #[test]
    fn test_broken_package_reported() {
        let (passed, results) = run(ManifestFixture::broken_package(), false);
        assert!(!passed);
        assert!(!results.packages_resolvable);
        assert!(results.errors[0].contains("package 'widgets'"));
        assert!(results.errors[0].contains("unknown stylesheet 'widgets'"));
    }

    #[test]
    fn test_out_of_order_dependency_reported() {
        let (passed, results) = run(ManifestFixture::out_of_order(), false);
        assert!(!passed);
        assert!(results.profiles_valid.is_empty());
        assert!(results.errors[0].contains("depends on unknown library 'jquery'"));
    }

    #[test]
    fn test_empty_manifest_warns() {
        let fixture = ManifestFixture {
            name: "empty".to_string(),
            content: String::new(),
        };
        let (passed, results) = run(fixture.clone(), false);
        assert!(passed);
        assert_eq!(results.warnings, ["No assets defined in manifest"]);

        let (passed, _) = run(fixture, true);
        assert!(!passed);
    }
}
