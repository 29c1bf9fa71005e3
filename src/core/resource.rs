//! Asset kinds known to the catalog.
//!
//! Every named entry in an [`AssetCatalog`](crate::catalog::AssetCatalog) lives in
//! one of four namespaces. The same name may be used in different namespaces (a
//! `deform` library and a `deform` stylesheet are distinct entries), so errors
//! and log lines always carry the kind alongside the name.

use serde::{Deserialize, Serialize};

/// Namespace of a catalog entry.
///
/// # Examples
///
/// ```rust
/// use pagedeps::core::AssetKind;
///
/// assert_eq!(AssetKind::Library.to_string(), "library");
/// assert_eq!(AssetKind::BottomScript.to_string(), "bottom script");
/// assert_eq!("stylesheet".parse::<AssetKind>().unwrap(), AssetKind::Stylesheet);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AssetKind {
    /// A script loaded in the page head, possibly depending on other libraries.
    Library,

    /// A CSS stylesheet, ordered by priority.
    Stylesheet,

    /// A script emitted at the end of the body, after the markup it touches.
    BottomScript,

    /// A named bundle of libraries, stylesheets and bottom scripts.
    Package,
}

impl AssetKind {
    /// Plural form used in listings and summaries.
    #[must_use]
    pub const fn plural(&self) -> &'static str {
        match self {
            Self::Library => "libraries",
            Self::Stylesheet => "stylesheets",
            Self::BottomScript => "bottom scripts",
            Self::Package => "packages",
        }
    }
}

impl std::fmt::Display for AssetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssetKind::Library => write!(f, "library"),
            AssetKind::Stylesheet => write!(f, "stylesheet"),
            AssetKind::BottomScript => write!(f, "bottom script"),
            AssetKind::Package => write!(f, "package"),
        }
    }
}

impl std::str::FromStr for AssetKind {
    type Err = crate::core::AssetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "library" | "lib" | "js" => Ok(AssetKind::Library),
            "stylesheet" | "css" => Ok(AssetKind::Stylesheet),
            "bottom-script" | "bottom script" | "bottom" => Ok(AssetKind::BottomScript),
            "package" => Ok(AssetKind::Package),
            _ => Err(crate::core::AssetError::Configuration {
                message: format!("unknown asset kind '{s}'"),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_kind_display_roundtrips_through_from_str() {
        for kind in [
            AssetKind::Library,
            AssetKind::Stylesheet,
            AssetKind::BottomScript,
            AssetKind::Package,
        ] {
            assert_eq!(kind.to_string().parse::<AssetKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_asset_kind_aliases() {
        assert_eq!("js".parse::<AssetKind>().unwrap(), AssetKind::Library);
        assert_eq!("CSS".parse::<AssetKind>().unwrap(), AssetKind::Stylesheet);
        assert_eq!("bottom_script".parse::<AssetKind>().unwrap(), AssetKind::BottomScript);
        assert!("font".parse::<AssetKind>().is_err());
    }

    #[test]
    fn test_asset_kind_serde() {
        let json = serde_json::to_string(&AssetKind::BottomScript).unwrap();
        assert_eq!(json, "\"bottom-script\"");
        let parsed: AssetKind = serde_json::from_str("\"package\"").unwrap();
        assert_eq!(parsed, AssetKind::Package);
    }

    #[test]
    fn test_plural() {
        assert_eq!(AssetKind::Library.plural(), "libraries");
        assert_eq!(AssetKind::Package.plural(), "packages");
    }
}
