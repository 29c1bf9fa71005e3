//! Environment profiles and per-profile URL selection.
//!
//! A catalog is built for exactly one active profile (for example
//! `development` or `production`). Each asset registration supplies either a
//! single URL shared by every profile or one URL per declared profile; the
//! catalog keeps only the URL of the active profile.

use serde::{Deserialize, Serialize};

use crate::core::AssetError;

/// Name used when a catalog declares no profiles of its own.
pub const DEFAULT_PROFILE: &str = "default";

/// The declared profiles and which one is active for this process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profiles {
    names: Vec<String>,
    active: usize,
}

impl Profiles {
    /// Declare profiles and select the active one by index.
    ///
    /// Fails with [`AssetError::Configuration`] when `names` is empty, contains
    /// duplicates, or `active` is out of range.
    pub fn new<I, S>(names: I, active: usize) -> Result<Self, AssetError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();

        if names.is_empty() {
            return Err(AssetError::configuration("at least one profile must be declared"));
        }
        for (i, name) in names.iter().enumerate() {
            if name.trim().is_empty() {
                return Err(AssetError::configuration("profile names must not be empty"));
            }
            if names[..i].contains(name) {
                return Err(AssetError::configuration(format!("profile '{name}' declared twice")));
            }
        }
        if active >= names.len() {
            return Err(AssetError::configuration(format!(
                "active profile index {active} is out of range for {} declared profile(s)",
                names.len()
            )));
        }

        Ok(Self {
            names,
            active,
        })
    }

    /// Declare profiles and select the active one by name.
    pub fn named<I, S>(names: I, active: &str) -> Result<Self, AssetError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        let index = names.iter().position(|n| n == active).ok_or_else(|| {
            AssetError::configuration(format!(
                "profile '{active}' is not declared (declared: {})",
                names.join(", ")
            ))
        })?;
        Self::new(names, index)
    }

    /// A single profile named [`DEFAULT_PROFILE`].
    #[must_use]
    pub fn single() -> Self {
        Self {
            names: vec![DEFAULT_PROFILE.to_string()],
            active: 0,
        }
    }

    /// All declared profile names, in declaration order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Index of the active profile.
    pub const fn active_index(&self) -> usize {
        self.active
    }

    /// Name of the active profile.
    pub fn active_name(&self) -> &str {
        &self.names[self.active]
    }

    /// Number of declared profiles.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Always false: a profile set holds at least one profile.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Pick the URL for the active profile.
    ///
    /// `asset` is only used for the error message.
    pub fn select(&self, asset: &str, urls: &Urls) -> Result<String, AssetError> {
        match urls {
            Urls::Shared(url) => {
                check_url(asset, url)?;
                Ok(url.clone())
            }
            Urls::PerProfile(list) if list.len() == 1 => {
                check_url(asset, &list[0])?;
                Ok(list[0].clone())
            }
            Urls::PerProfile(list) if list.len() == self.names.len() => {
                for url in list {
                    check_url(asset, url)?;
                }
                Ok(list[self.active].clone())
            }
            Urls::PerProfile(list) => Err(AssetError::configuration(format!(
                "'{asset}' declares {} url(s) but {} profile(s) are configured ({})",
                list.len(),
                self.names.len(),
                self.names.join(", ")
            ))),
        }
    }
}

impl Default for Profiles {
    fn default() -> Self {
        Self::single()
    }
}

fn check_url(asset: &str, url: &str) -> Result<(), AssetError> {
    if url.trim().is_empty() {
        return Err(AssetError::configuration(format!("'{asset}' has an empty url")));
    }
    Ok(())
}

/// URLs supplied at registration: one for all profiles, or one per profile.
///
/// Deserializes from either a string or an array of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Urls {
    /// The same URL in every profile.
    Shared(String),
    /// One URL per declared profile, in profile order. A one-element list is
    /// treated like [`Urls::Shared`].
    PerProfile(Vec<String>),
}

impl From<&str> for Urls {
    fn from(url: &str) -> Self {
        Self::Shared(url.to_string())
    }
}

impl From<String> for Urls {
    fn from(url: String) -> Self {
        Self::Shared(url)
    }
}

impl From<Vec<String>> for Urls {
    fn from(urls: Vec<String>) -> Self {
        Self::PerProfile(urls)
    }
}

impl From<Vec<&str>> for Urls {
    fn from(urls: Vec<&str>) -> Self {
        Self::PerProfile(urls.into_iter().map(str::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Urls {
    fn from(urls: [&str; N]) -> Self {
        Self::PerProfile(urls.iter().map(|u| (*u).to_string()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_per_profile() {
        let profiles = Profiles::new(["development", "production"], 1).unwrap();
        let url = profiles.select("jquery", &["/jq.js", "/jq.min.js"].into()).unwrap();
        assert_eq!(url, "/jq.min.js");
        assert_eq!(profiles.active_name(), "production");
    }

    #[test]
    fn test_single_url_reused_for_every_profile() {
        let profiles = Profiles::new(["development", "production"], 0).unwrap();
        assert_eq!(profiles.select("a", &"/a.js".into()).unwrap(), "/a.js");
        assert_eq!(profiles.select("a", &["/a.js"].into()).unwrap(), "/a.js");
    }

    #[test]
    fn test_count_mismatch_is_configuration_error() {
        let profiles = Profiles::new(["development", "production", "staging"], 0).unwrap();
        let err = profiles.select("jquery", &["/jq.js", "/jq.min.js"].into()).unwrap_err();
        assert!(matches!(err, AssetError::Configuration { .. }));
        assert!(err.to_string().contains("declares 2 url(s) but 3 profile(s)"));
    }

    #[test]
    fn test_empty_url_rejected() {
        let profiles = Profiles::single();
        assert!(profiles.select("a", &"  ".into()).is_err());
    }

    #[test]
    fn test_invalid_profile_sets() {
        assert!(Profiles::new(Vec::<String>::new(), 0).is_err());
        assert!(Profiles::new(["dev", "dev"], 0).is_err());
        assert!(Profiles::new(["dev"], 1).is_err());
        assert!(Profiles::named(["dev", "prod"], "staging").is_err());
        assert_eq!(Profiles::named(["dev", "prod"], "prod").unwrap().active_index(), 1);
    }

    #[test]
    fn test_urls_deserialize_untagged() {
        #[derive(Deserialize)]
        struct Entry {
            url: Urls,
        }

        let one: Entry = toml::from_str(r#"url = "/a.js""#).unwrap();
        assert_eq!(one.url, Urls::Shared("/a.js".to_string()));

        let many: Entry = toml::from_str(r#"url = ["/a.js", "/a.min.js"]"#).unwrap();
        assert_eq!(many.url, Urls::PerProfile(vec!["/a.js".into(), "/a.min.js".into()]));
    }
}
