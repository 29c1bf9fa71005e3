//! Typed catalog records.
//!
//! Records are created by [`AssetCatalog`](super::AssetCatalog) registration
//! methods, which select the URL of the active profile and expand dependency
//! closures. Apart from [`Package`], which callers build and hand over, the
//! records are read-only from the outside.

use std::fmt;
use std::sync::Arc;

/// A script loaded in the page head.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Library {
    pub(crate) name: String,
    pub(crate) url: String,
    pub(crate) depends: Vec<String>,
    pub(crate) dependencies: Vec<String>,
}

impl Library {
    /// Unique library name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// URL selected for the active profile.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Direct dependencies, as declared.
    pub fn direct_dependencies(&self) -> &[String] {
        &self.depends
    }

    /// Transitive closure of dependencies, dependency-first, without duplicates.
    ///
    /// Computed once at registration. Never contains the library itself.
    pub fn dependencies(&self) -> &[String] {
        &self.dependencies
    }

    /// Whether `name` appears anywhere in this library's dependency closure.
    pub fn depends_on(&self, name: &str) -> bool {
        self.dependencies.iter().any(|d| d == name)
    }
}

/// A CSS stylesheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stylesheet {
    pub(crate) name: String,
    pub(crate) url: String,
    pub(crate) priority: i64,
}

impl Stylesheet {
    /// Unique stylesheet name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// URL selected for the active profile.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Explicit or auto-assigned priority; lower sorts first.
    pub const fn priority(&self) -> i64 {
        self.priority
    }

    /// The total order stylesheets are emitted in: priority, then name.
    pub fn sort_key(&self) -> (i64, &str) {
        (self.priority, self.name.as_str())
    }
}

/// A script emitted at the bottom of the body.
///
/// Bottom scripts are not libraries: nothing can depend on them. They may
/// depend on libraries, which are then loaded in the head.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BottomScript {
    pub(crate) name: String,
    pub(crate) url: String,
    pub(crate) depends: Vec<String>,
    pub(crate) libraries: Vec<String>,
}

impl BottomScript {
    /// Unique bottom script name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// URL selected for the active profile.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Libraries named at registration.
    pub fn direct_dependencies(&self) -> &[String] {
        &self.depends
    }

    /// Every library this script needs, dependency-first.
    pub fn libraries(&self) -> &[String] {
        &self.libraries
    }
}

/// Inline script run once the page has loaded.
///
/// A package may carry either fixed text or a closure evaluated each time the
/// package is required, for snippets that embed per-request values.
#[derive(Clone)]
pub enum Onload {
    /// Fixed script text.
    Text(String),
    /// Script text produced at require time.
    Lazy(Arc<dyn Fn() -> String + Send + Sync>),
}

impl Onload {
    /// Wrap a closure that produces the script text on demand.
    pub fn lazy<F>(f: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        Self::Lazy(Arc::new(f))
    }

    /// Produce the script text, calling the closure for lazy values.
    pub fn evaluate(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Lazy(f) => f(),
        }
    }
}

impl fmt::Debug for Onload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Self::Lazy(_) => f.write_str("Lazy(..)"),
        }
    }
}

impl From<&str> for Onload {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Onload {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

/// A named bundle of assets required together.
///
/// Member names are not checked at registration; they are resolved when the
/// package is required, so packages may be declared before their members.
///
/// ```rust
/// use pagedeps::catalog::Package;
///
/// let package = Package::new("deform")
///     .with_libraries(["deform"])
///     .with_stylesheets(["deform"])
///     .with_onload("deform.load();");
/// assert_eq!(package.libraries(), ["deform"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Package {
    pub(crate) name: String,
    pub(crate) libraries: Vec<String>,
    pub(crate) stylesheets: Vec<String>,
    pub(crate) bottom_scripts: Vec<String>,
    pub(crate) onload: Option<Onload>,
}

impl Package {
    /// An empty package.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the libraries, in the order they will be required.
    #[must_use]
    pub fn with_libraries<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.libraries = names.into_iter().map(Into::into).collect();
        self
    }

    /// Set the stylesheets.
    #[must_use]
    pub fn with_stylesheets<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stylesheets = names.into_iter().map(Into::into).collect();
        self
    }

    /// Set the bottom scripts.
    #[must_use]
    pub fn with_bottom_scripts<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.bottom_scripts = names.into_iter().map(Into::into).collect();
        self
    }

    /// Attach an onload snippet.
    #[must_use]
    pub fn with_onload(mut self, onload: impl Into<Onload>) -> Self {
        self.onload = Some(onload.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn libraries(&self) -> &[String] {
        &self.libraries
    }

    pub fn stylesheets(&self) -> &[String] {
        &self.stylesheets
    }

    pub fn bottom_scripts(&self) -> &[String] {
        &self.bottom_scripts
    }

    pub fn onload(&self) -> Option<&Onload> {
        self.onload.as_ref()
    }
}
