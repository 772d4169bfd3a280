//! Error types for discovery, registration and configuration.

use objgen_reflect::{IntrospectError, MemberError};
use thiserror::Error;

/// Discovery failed for a whole class.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiscoveryError {
	#[error("cannot discover properties: {0}")]
	Introspect(#[from] IntrospectError),
}

/// An explicit registration could not be stored.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
	#[error("cannot register property: {0}")]
	Introspect(#[from] IntrospectError),

	/// Neither a field nor a setter matches the property name.
	#[error("no field or setter for `{property}` on `{class}`")]
	Unresolved {
		class: &'static str,
		property: String,
	},
}

/// A generator could not produce a value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("generator failed: {message}")]
pub struct GenerateError {
	pub message: String,
}

impl GenerateError {
	pub fn new(message: impl std::fmt::Display) -> Self {
		Self {
			message: message.to_string(),
		}
	}
}

/// Why one property was left unwritten on one target.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PropertyError {
	#[error(transparent)]
	Member(#[from] MemberError),

	#[error(transparent)]
	Generate(#[from] GenerateError),
}

/// Errors that can occur when parsing configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("invalid populate config: {0}")]
	Toml(#[from] toml::de::Error),
}
