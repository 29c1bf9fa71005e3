//! HTML fragments for a resolved page.
//!
//! These are plain string builders. URLs get basic attribute quoting (`&`,
//! `"`, `<`, `>`); any further escaping is up to the caller. Onload snippets are
//! inserted verbatim.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::PageAssetSet;
use crate::core::AssetError;

/// How the combined onload block is wrapped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OnloadWrap {
    /// Snippets run as soon as the block is parsed.
    None,
    /// `jQuery(function () { ... });`
    #[default]
    Jquery,
    /// `document.addEventListener("DOMContentLoaded", function () { ... });`
    Dom,
}

impl fmt::Display for OnloadWrap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Jquery => write!(f, "jquery"),
            Self::Dom => write!(f, "dom"),
        }
    }
}

impl FromStr for OnloadWrap {
    type Err = AssetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "jquery" => Ok(Self::Jquery),
            "dom" | "domcontentloaded" => Ok(Self::Dom),
            _ => Err(AssetError::configuration(format!(
                "unknown onload wrapper '{s}' (expected none, jquery or dom)"
            ))),
        }
    }
}

/// Quote a value for use inside a double-quoted HTML attribute.
pub fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn script_tag(url: &str) -> String {
    format!("<script type=\"text/javascript\" src=\"{}\"></script>", escape_attr(url))
}

pub fn stylesheet_tag(url: &str) -> String {
    format!("<link rel=\"stylesheet\" type=\"text/css\" href=\"{}\" />", escape_attr(url))
}

/// Combine snippets into one inline script block. Empty input renders nothing.
pub fn onload_block<S: AsRef<str>>(snippets: &[S], wrap: OnloadWrap) -> String {
    if snippets.is_empty() {
        return String::new();
    }

    let body = snippets.iter().map(|s| s.as_ref()).collect::<Vec<&str>>().join("\n");
    let body = match wrap {
        OnloadWrap::None => body,
        OnloadWrap::Jquery => format!("jQuery(function () {{\n{body}\n}});"),
        OnloadWrap::Dom => {
            format!("document.addEventListener(\"DOMContentLoaded\", function () {{\n{body}\n}});")
        }
    };
    format!("<script type=\"text/javascript\">\n{body}\n</script>")
}

fn tags(urls: &[&str], tag: fn(&str) -> String) -> String {
    urls.iter().map(|url| tag(url)).collect::<Vec<_>>().join("\n")
}

impl PageAssetSet<'_> {
    /// `<script>` tags for head libraries, one per line.
    pub fn render_scripts(&self) -> String {
        tags(&self.script_urls(), script_tag)
    }

    /// `<link>` tags for stylesheets, one per line.
    pub fn render_stylesheets(&self) -> String {
        tags(&self.stylesheet_urls(), stylesheet_tag)
    }

    /// `<script>` tags for bottom scripts, one per line.
    pub fn render_bottom_scripts(&self) -> String {
        tags(&self.bottom_script_urls(), script_tag)
    }

    pub fn render_onload(&self, wrap: OnloadWrap) -> String {
        onload_block(self.onload(), wrap)
    }

    /// Everything that belongs inside `<head>`: stylesheets, then scripts.
    pub fn render_head(&self) -> String {
        join_nonempty([self.render_stylesheets(), self.render_scripts()])
    }

    /// Everything that belongs at the end of `<body>`: bottom scripts, then
    /// the onload block.
    pub fn render_bottom(&self, wrap: OnloadWrap) -> String {
        join_nonempty([self.render_bottom_scripts(), self.render_onload(wrap)])
    }
}

fn join_nonempty<const N: usize>(parts: [String; N]) -> String {
    parts.into_iter().filter(|p| !p.is_empty()).collect::<Vec<_>>().join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::AssetCatalog;
    use crate::test_utils::deform_catalog;

    #[test]
    fn test_escape_attr() {
        assert_eq!(escape_attr("/a.js?x=1&y=\"2\""), "/a.js?x=1&amp;y=&quot;2&quot;");
        assert_eq!(escape_attr("<b>"), "&lt;b&gt;");
        assert_eq!(escape_attr("/plain.js"), "/plain.js");
    }

    #[test]
    fn test_tags() {
        assert_eq!(
            script_tag("/jq.js"),
            "<script type=\"text/javascript\" src=\"/jq.js\"></script>"
        );
        assert_eq!(
            stylesheet_tag("/base.css"),
            "<link rel=\"stylesheet\" type=\"text/css\" href=\"/base.css\" />"
        );
    }

    #[test]
    fn test_onload_block_wrappers() {
        let snippets = ["a();", "b();"];
        assert_eq!(
            onload_block(&snippets, OnloadWrap::None),
            "<script type=\"text/javascript\">\na();\nb();\n</script>"
        );
        assert_eq!(
            onload_block(&snippets, OnloadWrap::Jquery),
            "<script type=\"text/javascript\">\njQuery(function () {\na();\nb();\n});\n</script>"
        );
        assert!(onload_block(&snippets, OnloadWrap::Dom).contains("DOMContentLoaded"));
        assert_eq!(onload_block::<&str>(&[], OnloadWrap::Jquery), "");
    }

    #[test]
    fn test_onload_wrap_parse() {
        assert_eq!("none".parse::<OnloadWrap>().unwrap(), OnloadWrap::None);
        assert_eq!("jQuery".parse::<OnloadWrap>().unwrap(), OnloadWrap::Jquery);
        assert_eq!("DOMContentLoaded".parse::<OnloadWrap>().unwrap(), OnloadWrap::Dom);
        assert!("ready".parse::<OnloadWrap>().is_err());
        assert_eq!(OnloadWrap::default().to_string(), "jquery");
    }

    #[test]
    fn test_render_head_and_bottom() {
        let mut catalog = deform_catalog();
        catalog.register_bottom_script("table", "/table.js", &["jquery"]).unwrap();

        let mut page = crate::page::PageAssetSet::new(&catalog);
        page.require_library("deform").unwrap();
        page.require_stylesheet("base").unwrap();
        page.require_bottom_script("table").unwrap();
        page.add_onload("deform.load();");

        assert_eq!(
            page.render_head(),
            "<link rel=\"stylesheet\" type=\"text/css\" href=\"/base.css\" />\n\
             <script type=\"text/javascript\" src=\"/jq.js\"></script>\n\
             <script type=\"text/javascript\" src=\"/deform.js\"></script>"
        );
        assert_eq!(
            page.render_bottom(OnloadWrap::None),
            "<script type=\"text/javascript\" src=\"/table.js\"></script>\n\
             <script type=\"text/javascript\">\ndeform.load();\n</script>"
        );
    }

    #[test]
    fn test_empty_page_renders_nothing() {
        let catalog = AssetCatalog::default();
        let page = crate::page::PageAssetSet::new(&catalog);
        assert_eq!(page.render_head(), "");
        assert_eq!(page.render_bottom(OnloadWrap::Jquery), "");
    }
}
