//! Tuning for discovery and population.

use serde::Deserialize;

use crate::error::ConfigError;

/// Options shared by every setter a [`crate::Discovery`] builds.
///
/// ```
/// use objgen::PopulateConfig;
///
/// let config = PopulateConfig::from_toml_str("relax_on_failure = false").unwrap();
/// assert!(!config.relax_on_failure);
/// assert!(config.include_inherited);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PopulateConfig {
	/// Retry a failed write once with relaxed member access.
	pub relax_on_failure: bool,
	/// Discover fields and methods declared on supertypes as well.
	pub include_inherited: bool,
}

impl Default for PopulateConfig {
	fn default() -> Self {
		Self {
			relax_on_failure: true,
			include_inherited: true,
		}
	}
}

impl PopulateConfig {
	pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
		Ok(toml::from_str(source)?)
	}
}
