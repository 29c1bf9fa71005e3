//! Test utilities for pagedeps
//!
//! Available to unit tests and, with the `test-utils` feature, to integration
//! tests.
//!
//! ```rust,no_run
//! use pagedeps::page::PageAssetSet;
//! use pagedeps::test_utils::{deform_catalog, init_test_logging};
//!
//! init_test_logging(None);
//! let catalog = deform_catalog();
//! let mut page = PageAssetSet::new(&catalog);
//! page.require_library("deform").unwrap();
//! ```

pub mod fixtures;

pub use fixtures::ManifestFixture;

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::catalog::AssetCatalog;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Uses `level` when given, otherwise `RUST_LOG` if it is set, otherwise
/// installs nothing. Safe to call from every test.
///
/// ```bash
/// RUST_LOG=pagedeps=trace cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .with_ansi(true)
            .try_init();
    });
}

/// The catalog from the jquery / jquery.ui / deform walkthrough.
///
/// - library `jquery` at `/jq.js`
/// - library `jquery.ui` at `/jqui.js`, depends on `jquery`
/// - library `deform` at `/deform.js`, depends on `jquery`
/// - stylesheet `deform` at `/deform.css`, auto priority
/// - stylesheet `base` at `/base.css`, priority 1
///
/// # Panics
///
/// Never in practice; the registrations are static.
pub fn deform_catalog() -> AssetCatalog {
    let mut catalog = AssetCatalog::default();
    catalog.register_library("jquery", "/jq.js", &[]).unwrap();
    catalog.register_library("jquery.ui", "/jqui.js", &["jquery"]).unwrap();
    catalog.register_library("deform", "/deform.js", &["jquery"]).unwrap();
    catalog.register_stylesheet("deform", "/deform.css", None).unwrap();
    catalog.register_stylesheet("base", "/base.css", Some(1)).unwrap();
    catalog
}
