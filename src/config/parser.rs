//! Generic TOML parsing with file path context.
//!
//! ```rust,no_run
//! use pagedeps::config::parse_config;
//! use serde::Deserialize;
//! use std::path::Path;
//!
//! #[derive(Deserialize)]
//! struct MyConfig {
//!     name: String,
//! }
//!
//! # fn example() -> anyhow::Result<()> {
//! let config: MyConfig = parse_config(Path::new("config.toml"))?;
//! println!("Config: {}", config.name);
//! # Ok(())
//! # }
//! ```
//!
//! Errors keep the underlying I/O or TOML error as their cause:
//!
//! ```text
//! Failed to parse config file: /path/to/assets.toml
//! Caused by:
//!     invalid type: integer `3`, expected a string
//! ```

use anyhow::{Context, Result};
use std::path::Path;

/// Read a TOML file and deserialize it into `T`.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not valid TOML, or does not
/// match the shape of `T`. The message names the file.
pub fn parse_config<T>(path: &Path) -> Result<T>
where
    T: serde::de::DeserializeOwned,
{
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: T = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

    Ok(config)
}
