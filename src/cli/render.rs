//! Resolve a page's requirements and print its assets.
//!
//! Requirements are positional `kind:name` pairs applied in the order given,
//! which is the order a template would call the requirement API in. A bare
//! name is a library.
//!
//! ```bash
//! pagedeps render jquery.ui deform css:deform css:base
//! pagedeps render package:forms --onload 'init();' --wrap dom
//! pagedeps render --format json package:forms
//! ```
//!
//! # Output
//!
//! `html` prints the head fragment (stylesheets, then scripts), a blank line,
//! and the bottom fragment (bottom scripts, then the onload block). `json`
//! prints the resolved URL lists and onload snippets.

use anyhow::Result;
use clap::{Args, ValueEnum};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info};

use super::common::ManifestOptions;
use crate::catalog::AssetCatalog;
use crate::core::{AssetError, AssetKind};
use crate::page::{OnloadWrap, PageAssetSet};

/// One `kind:name` requirement from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    pub kind: AssetKind,
    pub name: String,
}

impl Requirement {
    /// Apply this requirement to `page`.
    pub fn apply(&self, page: &mut PageAssetSet<'_>) -> Result<(), AssetError> {
        match self.kind {
            AssetKind::Library => page.require_library(&self.name),
            AssetKind::Stylesheet => page.require_stylesheet(&self.name),
            AssetKind::BottomScript => page.require_bottom_script(&self.name),
            AssetKind::Package => page.require_package(&self.name),
        }
    }
}

impl FromStr for Requirement {
    type Err = AssetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, name) = match s.split_once(':') {
            Some((kind, name)) => (kind.parse()?, name),
            None => (AssetKind::Library, s),
        };

        if name.trim().is_empty() {
            return Err(AssetError::configuration(format!("requirement '{s}' has no name")));
        }

        Ok(Self {
            kind,
            name: name.to_string(),
        })
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}'", self.kind, self.name)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum RenderFormat {
    /// `<link>` and `<script>` tags
    #[default]
    Html,
    /// Resolved URL lists as JSON
    Json,
}

#[derive(Args, Debug)]
pub struct RenderCommand {
    /// Requirements as `kind:name` (kinds: lib, css, bottom, package)
    #[arg(value_name = "KIND:NAME", required = true)]
    requirements: Vec<Requirement>,

    /// Inline JavaScript to run once the page has loaded (repeatable)
    #[arg(long, value_name = "CODE")]
    onload: Vec<String>,

    /// How the onload block is wrapped: none, jquery or dom
    #[arg(long, default_value_t = OnloadWrap::Jquery)]
    wrap: OnloadWrap,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = RenderFormat::Html)]
    format: RenderFormat,
}

impl RenderCommand {
    pub fn execute_with_manifest_path(self, options: ManifestOptions) -> Result<()> {
        let catalog = options.load_catalog()?;
        let output = self.render(&catalog)?;
        println!("{output}");
        Ok(())
    }

    /// Apply every requirement to a fresh page and format the result.
    ///
    /// Stops at the first unknown asset; nothing is printed in that case.
    fn render(&self, catalog: &AssetCatalog) -> Result<String> {
        let mut page = PageAssetSet::new(catalog);
        for requirement in &self.requirements {
            debug!("Requiring {requirement}");
            requirement.apply(&mut page)?;
        }
        for code in &self.onload {
            page.add_onload(code.as_str());
        }

        info!(
            "Resolved {} requirement(s) for profile '{}'",
            self.requirements.len(),
            catalog.profiles().active_name()
        );

        match self.format {
            RenderFormat::Html => {
                let head = page.render_head();
                let bottom = page.render_bottom(self.wrap);
                Ok(if bottom.is_empty() {
                    head
                } else {
                    format!("{head}\n\n{bottom}")
                })
            }
            RenderFormat::Json => Ok(serde_json::to_string_pretty(&page.resolve())?),
        }
    }
}
