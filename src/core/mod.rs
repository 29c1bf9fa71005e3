//! Core types shared by the catalog, the page and the CLI.
//!
//! - [`AssetError`] / [`ErrorContext`] / [`user_friendly_error`] - error taxonomy
//!   and CLI presentation
//! - [`AssetKind`] - the four namespaces a catalog entry can live in
//! - [`Profiles`] / [`Urls`] - environment profiles and per-profile URL selection

pub mod error;
pub mod profile;
pub mod resource;

pub use error::{AssetError, ErrorContext, user_friendly_error};
pub use profile::{DEFAULT_PROFILE, Profiles, Urls};
pub use resource::AssetKind;
