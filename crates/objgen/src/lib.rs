//! Property discovery for populating test fixtures.
//!
//! Given a [`ClassInfo`], [`Discovery`] works out every mutable property of the
//! class (backing fields, single-argument setters, collection append methods),
//! pairs fields with their accessors by naming convention, merges explicitly
//! registered overrides, and returns a deterministic [`Plan`] of [`Setter`]s.
//! Applying the plan to a fresh instance fills it with generated values.
//!
//! # Pipeline
//!
//! 1. [`Registry::applicable_properties`] seeds the plan with registered overrides.
//! 2. Every field and every `set*`/`add*` method is turned into a setter by
//!    [`SetterFactory`], which pairs members through [`naming`] and [`finder`].
//! 3. Setters are deduplicated by [`Setter::identity`] (first wins) and sorted by
//!    [`SetterKey`].
//!
//! # Failure Policy
//!
//! Only a class that refuses introspection fails discovery. A property that cannot
//! be written is retried once with relaxed access and otherwise skipped; the skip
//! is recorded as an [`Outcome`] in the [`Report`] instead of surfacing as an
//! error.
//!
//! [`ClassInfo`]: objgen_reflect::ClassInfo

pub mod config;
pub mod discovery;
pub mod error;
pub mod factory;
pub mod finder;
pub mod generator;
pub mod naming;
pub mod registry;
pub mod setter;

pub use config::PopulateConfig;
pub use discovery::{Discovery, Plan, Report};
pub use error::{ConfigError, DiscoveryError, GenerateError, PropertyError, RegistryError};
pub use factory::SetterFactory;
pub use generator::{
	Constant, EmptyCollection, Fallible, GeneratorLookup, GeneratorTable, SharedGenerator,
	ValueGenerator,
};
pub use registry::Registry;
pub use setter::{Outcome, Setter, SetterKey};

#[cfg(test)]
pub(crate) mod test_fixtures;
