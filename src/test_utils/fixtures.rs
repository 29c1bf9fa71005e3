//! Sample asset manifests for tests.

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::MANIFEST_FILE;

/// Test fixture for creating sample assets.toml files
#[derive(Clone, Debug)]
pub struct ManifestFixture {
    pub content: String,
    pub name: String,
}

impl ManifestFixture {
    /// Two profiles, the deform walkthrough assets, a bottom script and a package.
    pub fn basic() -> Self {
        Self {
            name: "basic".to_string(),
            content: r#"
profiles = ["development", "production"]
default_profile = "development"

[[library]]
name = "jquery"
url = ["/static/jquery.js", "/static/jquery.min.js"]

[[library]]
name = "jquery.ui"
url = ["/static/jquery-ui.js", "/static/jquery-ui.min.js"]
depends = ["jquery"]

[[library]]
name = "deform"
url = "/static/deform.js"
depends = ["jquery"]

[[stylesheet]]
name = "deform"
url = "/static/deform.css"

[[stylesheet]]
name = "base"
url = "/static/base.css"
priority = 1

[[bottom_script]]
name = "autofocus"
url = "/static/autofocus.js"
depends = ["jquery"]

[[package]]
name = "forms"
libraries = ["jquery.ui", "deform"]
stylesheets = ["deform", "base"]
bottom_scripts = ["autofocus"]
onload = "deform.load();"
"#
            .trim()
            .to_string(),
        }
    }

    /// A package that names a stylesheet nobody registered.
    pub fn broken_package() -> Self {
        Self {
            name: "broken_package".to_string(),
            content: r#"
[[library]]
name = "jquery"
url = "/static/jquery.js"

[[package]]
name = "widgets"
libraries = ["jquery"]
stylesheets = ["widgets"]
"#
            .trim()
            .to_string(),
        }
    }

    /// A library declared before its dependency.
    pub fn out_of_order() -> Self {
        Self {
            name: "out_of_order".to_string(),
            content: r#"
[[library]]
name = "deform"
url = "/static/deform.js"
depends = ["jquery"]

[[library]]
name = "jquery"
url = "/static/jquery.js"
"#
            .trim()
            .to_string(),
        }
    }

    /// Manifest with invalid syntax
    pub fn invalid_syntax() -> Self {
        Self {
            name: "invalid_syntax".to_string(),
            content: r#"
[[library]
name = "jquery"
url = "/static/jquery.js
"#
            .trim()
            .to_string(),
        }
    }

    /// Write this manifest to `dir/assets.toml`.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let manifest_path = dir.join(MANIFEST_FILE);
        fs::write(&manifest_path, &self.content)?;
        Ok(manifest_path)
    }
}
