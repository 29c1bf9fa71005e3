//! List registered assets.
//!
//! ```bash
//! pagedeps list
//! pagedeps list --kind css
//! pagedeps --profile production list --format json
//! ```

use anyhow::Result;
use clap::{Args, ValueEnum};
use colored::Colorize;
use serde::Serialize;

use super::common::ManifestOptions;
use crate::catalog::AssetCatalog;
use crate::core::AssetKind;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    #[default]
    Table,
    Json,
}

#[derive(Args, Debug)]
pub struct ListCommand {
    /// Only list one kind (lib, css, bottom, package)
    #[arg(short, long)]
    kind: Option<AssetKind>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = ListFormat::Table)]
    format: ListFormat,
}

/// One row of the listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct ListEntry {
    kind: AssetKind,
    name: String,
    /// URL for the active profile; packages have none.
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    /// Dependencies, stylesheet priority, or package contents.
    detail: String,
}

impl ListCommand {
    pub fn execute_with_manifest_path(self, options: ManifestOptions) -> Result<()> {
        let catalog = options.load_catalog()?;
        let entries = self.collect(&catalog);

        match self.format {
            ListFormat::Json => println!("{}", serde_json::to_string_pretty(&entries)?),
            ListFormat::Table => print_table(&catalog, &entries),
        }
        Ok(())
    }

    fn collect(&self, catalog: &AssetCatalog) -> Vec<ListEntry> {
        let wanted = |kind: AssetKind| self.kind.is_none_or(|k| k == kind);
        let mut entries = Vec::new();

        if wanted(AssetKind::Library) {
            entries.extend(catalog.libraries().map(|l| ListEntry {
                kind: AssetKind::Library,
                name: l.name().to_string(),
                url: Some(l.url().to_string()),
                detail: l.dependencies().join(", "),
            }));
        }
        if wanted(AssetKind::Stylesheet) {
            entries.extend(catalog.stylesheets().map(|s| ListEntry {
                kind: AssetKind::Stylesheet,
                name: s.name().to_string(),
                url: Some(s.url().to_string()),
                detail: format!("priority {}", s.priority()),
            }));
        }
        if wanted(AssetKind::BottomScript) {
            entries.extend(catalog.bottom_scripts().map(|s| ListEntry {
                kind: AssetKind::BottomScript,
                name: s.name().to_string(),
                url: Some(s.url().to_string()),
                detail: s.libraries().join(", "),
            }));
        }
        if wanted(AssetKind::Package) {
            entries.extend(catalog.packages().iter().map(|p| ListEntry {
                kind: AssetKind::Package,
                name: p.name().to_string(),
                url: None,
                detail: format!(
                    "{} lib, {} css, {} bottom{}",
                    p.libraries().len(),
                    p.stylesheets().len(),
                    p.bottom_scripts().len(),
                    if p.onload().is_some() { ", onload" } else { "" }
                ),
            }));
        }
        entries
    }
}

fn print_table(catalog: &AssetCatalog, entries: &[ListEntry]) {
    if entries.is_empty() {
        println!("No assets registered.");
        return;
    }

    println!("{} {}", "Profile:".bold(), catalog.profiles().active_name());
    println!();
    println!("{:<15} {:<24} {:<36} {}", "KIND".bold(), "NAME".bold(), "URL".bold(), "DETAIL".bold());
    println!("{}", "-".repeat(90).bright_black());
    for entry in entries {
        println!(
            "{:<15} {:<24} {:<36} {}",
            entry.kind.to_string().cyan(),
            entry.name,
            entry.url.as_deref().unwrap_or("-"),
            entry.detail.bright_black()
        );
    }
    println!();
    println!("{}: {} assets", "Total".green().bold(), entries.len());
}
