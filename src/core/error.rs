//! Error handling for pagedeps
//!
//! Every failure in this crate is a configuration or programming error, never a
//! transient condition: nothing is retried, and every error propagates straight
//! to the caller. The error system has two layers:
//!
//! - [`AssetError`] - strongly-typed failures returned by the catalog and by
//!   page requirement methods
//! - [`ErrorContext`] - wrapper adding a suggestion and details for CLI display
//!
//! # Error Categories
//!
//! - **Registration**: [`AssetError::DuplicateName`], [`AssetError::UnknownDependency`],
//!   [`AssetError::SelfDependency`], [`AssetError::Configuration`]
//! - **Lookup**: [`AssetError::UnknownAsset`], raised at request time when a page
//!   requires something the catalog does not know
//! - **Removal**: [`AssetError::AssetInUse`]
//! - **Manifest loading**: [`AssetError::Io`], [`AssetError::Toml`]
//!
//! # Examples
//!
//! ```rust,no_run
//! use pagedeps::core::{AssetError, AssetKind, user_friendly_error};
//!
//! let error = AssetError::UnknownAsset {
//!     kind: AssetKind::Library,
//!     name: "jquery.ui".to_string(),
//! };
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display(); // colored error, details and suggestion on stderr
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

use crate::core::AssetKind;

/// The main error type for catalog and page operations.
///
/// Registration failures leave the catalog without the offending entry; all
/// earlier successful registrations stand. Requirement failures leave the page
/// exactly as it was before the failing call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssetError {
    /// A name was registered twice in the same namespace.
    #[error("{kind} '{name}' is already registered")]
    DuplicateName {
        /// Namespace of the clashing entry
        kind: AssetKind,
        /// The clashing name
        name: String,
    },

    /// A library or bottom script names a dependency that is not registered yet.
    ///
    /// Dependencies must be registered before their dependents; this ordering
    /// rule is what keeps the dependency graph acyclic.
    #[error("{kind} '{dependent}' depends on unknown library '{dependency}'")]
    UnknownDependency {
        /// Namespace of the entry being registered
        kind: AssetKind,
        /// Name of the entry being registered
        dependent: String,
        /// The missing library name
        dependency: String,
    },

    /// A library lists itself among its own dependencies.
    #[error("library '{name}' cannot depend on itself")]
    SelfDependency {
        /// The offending library
        name: String,
    },

    /// A name was looked up that the catalog does not contain.
    #[error("unknown {kind} '{name}'")]
    UnknownAsset {
        /// Namespace that was searched
        kind: AssetKind,
        /// The missing name
        name: String,
    },

    /// A library cannot be removed because other entries depend on it.
    #[error("library '{name}' is still required by {}", dependents.join(", "))]
    AssetInUse {
        /// The library that was asked to be removed
        name: String,
        /// Entries whose dependency closure contains it
        dependents: Vec<String>,
    },

    /// Malformed configuration: empty names, profile/URL count mismatches, bad
    /// profile selection.
    #[error("configuration error: {message}")]
    Configuration {
        /// What was wrong
        message: String,
    },

    /// No manifest was given and none was found by searching upwards.
    #[error("no {file} found in {} or any parent directory", start.display())]
    ManifestNotFound {
        /// File name that was searched for
        file: String,
        /// Directory the search started from
        start: std::path::PathBuf,
    },

    /// Reading an asset manifest failed
    #[error("IO error: {0}")]
    Io(String),

    /// Parsing an asset manifest failed
    #[error("TOML parsing error: {0}")]
    Toml(String),
}

impl AssetError {
    /// Shorthand for [`AssetError::Configuration`].
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Shorthand for [`AssetError::UnknownAsset`].
    pub fn unknown(kind: AssetKind, name: impl Into<String>) -> Self {
        Self::UnknownAsset {
            kind,
            name: name.into(),
        }
    }
}

impl From<std::io::Error> for AssetError {
    fn from(error: std::io::Error) -> Self {
        Self::Io(error.to_string())
    }
}

impl From<toml::de::Error> for AssetError {
    fn from(error: toml::de::Error) -> Self {
        Self::Toml(error.to_string())
    }
}

/// An [`AssetError`] with optional user-facing guidance.
///
/// ```rust,no_run
/// use pagedeps::core::{AssetError, ErrorContext};
///
/// let context = ErrorContext::new(AssetError::configuration("no profiles declared"))
///     .with_suggestion("Add `profiles = [\"default\"]` to assets.toml")
///     .with_details("Every URL list is matched against the declared profiles");
///
/// println!("{}", context);
/// ```
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: AssetError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Wrap an error with no suggestion or details.
    #[must_use]
    pub const fn new(error: AssetError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion, printed in green.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add details, printed in yellow.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error, details and suggestion to stderr with terminal colors.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error into an [`ErrorContext`] with a suggestion where one is known.
///
/// Recognizes [`AssetError`] (directly or anywhere in an `anyhow` context
/// chain), [`std::io::Error`] and [`toml::de::Error`]. Anything else becomes a
/// configuration error carrying the full cause chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(asset_error) = error.chain().find_map(|e| e.downcast_ref::<AssetError>()) {
        return create_error_context(asset_error.clone());
    }

    if let Some(io_error) = error.chain().find_map(|e| e.downcast_ref::<std::io::Error>()) {
        let ctx = ErrorContext::new(AssetError::Io(chain_message(&error)));
        return match io_error.kind() {
            std::io::ErrorKind::NotFound => ctx
                .with_suggestion("Check the --manifest-path value, or create assets.toml in your project root"),
            std::io::ErrorKind::PermissionDenied => {
                ctx.with_suggestion("Check the file permissions of the asset manifest")
            }
            _ => ctx,
        };
    }

    if error.chain().any(|e| e.downcast_ref::<toml::de::Error>().is_some()) {
        return ErrorContext::new(AssetError::Toml(chain_message(&error)))
            .with_suggestion("Check the TOML syntax of the asset manifest. Entries are declared as [[library]], [[stylesheet]], [[bottom_script]] and [[package]] tables")
            .with_details("Unknown keys are rejected so that typos do not silently drop assets");
    }

    ErrorContext::new(AssetError::configuration(chain_message(&error)))
}

fn chain_message(error: &anyhow::Error) -> String {
    let mut message = error.to_string();

    let chain: Vec<String> =
        error.chain().skip(1).map(std::string::ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    message
}

fn create_error_context(error: AssetError) -> ErrorContext {
    match &error {
        AssetError::DuplicateName {
            kind,
            name,
        } => {
            let (kind, name) = (*kind, name.clone());
            ErrorContext::new(error)
                .with_suggestion(format!("Rename or remove the second {kind} declared as '{name}'"))
                .with_details("Each name may be registered once per asset kind")
        }
        AssetError::UnknownDependency {
            dependency,
            ..
        } => {
            let dependency = dependency.clone();
            ErrorContext::new(error)
                .with_suggestion(format!(
                    "Declare library '{dependency}' before anything that depends on it"
                ))
                .with_details(
                    "Dependencies must be registered before their dependents; this is what keeps the dependency graph free of cycles",
                )
        }
        AssetError::SelfDependency {
            ..
        } => ErrorContext::new(error).with_suggestion("Remove the library's own name from its depends list"),
        AssetError::UnknownAsset {
            kind,
            ..
        } => {
            let kind = *kind;
            ErrorContext::new(error)
                .with_suggestion(format!("Register the {kind} in the asset manifest or fix the name"))
                .with_details("A page that requires an unknown asset fails as a whole instead of rendering an incomplete asset list")
        }
        AssetError::AssetInUse {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Remove the dependent entries first"),
        AssetError::Configuration {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Check that every url list has one entry per declared profile"),
        AssetError::ManifestNotFound {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Create assets.toml in your project root or pass --manifest-path"),
        AssetError::Io(_) | AssetError::Toml(_) => ErrorContext::new(error),
    }
}
