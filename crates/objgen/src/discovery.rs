//! Property discovery and population.
//!
//! # Role
//!
//! [`Discovery`] turns a [`ClassInfo`] into a [`Plan`]: every setter that can fill
//! an instance of the class, registered overrides first, deduplicated by
//! [`Setter::identity`] and ordered by [`SetterKey`].
//!
//! # Invariants
//!
//! - A plan never holds two setters with the same identity.
//! - A registered setter shadows the discovered one for the same members.
//! - The plan order depends only on the class surface and the registry contents,
//!   never on hash order or discovery order.
//!
//! [`SetterKey`]: crate::SetterKey

use std::sync::Arc;

use indexmap::IndexMap;
use indexmap::map::Entry;
use objgen_reflect::{ClassInfo, Reflect};
use tracing::{debug, trace};

use crate::config::PopulateConfig;
use crate::error::{DiscoveryError, PropertyError, RegistryError};
use crate::factory::SetterFactory;
use crate::generator::{GeneratorLookup, ValueGenerator};
use crate::naming::is_qualifying_name;
use crate::registry::Registry;
use crate::setter::{Outcome, Setter};

/// Discovers and applies the properties of described classes.
///
/// ```
/// use std::sync::Arc;
///
/// use objgen::{Discovery, GeneratorTable, Registry};
/// use objgen_reflect::{ClassBuilder, impl_reflect};
///
/// #[derive(Default)]
/// struct Person {
/// 	age: u32,
/// }
/// impl_reflect!(Person);
///
/// let class = ClassBuilder::<Person>::new("Person")
/// 	.private_field("age", |p: &mut Person| &mut p.age)
/// 	.method("setAge", |p: &mut Person, age: u32| p.age = age)
/// 	.build();
/// let discovery = Discovery::new(Arc::new(Registry::new()), Arc::new(GeneratorTable::with_defaults()));
/// discovery.register(&class, "age", || 42u32).unwrap();
///
/// let (person, report) = discovery.populate_new::<Person>(&class).unwrap();
/// assert_eq!(person.age, 42);
/// assert!(report.is_complete());
/// ```
#[derive(Debug, Clone)]
pub struct Discovery {
	registry: Arc<Registry>,
	factory: SetterFactory,
	config: PopulateConfig,
}

impl Discovery {
	pub fn new(registry: Arc<Registry>, lookup: Arc<dyn GeneratorLookup>) -> Self {
		Self::with_config(registry, lookup, PopulateConfig::default())
	}

	pub fn with_config(
		registry: Arc<Registry>,
		lookup: Arc<dyn GeneratorLookup>,
		config: PopulateConfig,
	) -> Self {
		Self {
			registry,
			factory: SetterFactory::with_config(lookup, &config),
			config,
		}
	}

	pub fn registry(&self) -> &Arc<Registry> {
		&self.registry
	}

	pub fn factory(&self) -> &SetterFactory {
		&self.factory
	}

	pub fn config(&self) -> &PopulateConfig {
		&self.config
	}

	/// Overrides the generator used for `property` on `class` and its subtypes.
	pub fn register(
		&self,
		class: &ClassInfo,
		property: &str,
		generator: impl ValueGenerator + 'static,
	) -> Result<(), RegistryError> {
		self.registry
			.register(&self.factory, class, property, Arc::new(generator))
	}

	/// Every setter that can fill an instance of `class`.
	///
	/// Fails only when `class` refuses introspection. Members without a usable
	/// generator are left out.
	pub fn extract_available_properties(&self, class: &ClassInfo) -> Result<Plan, DiscoveryError> {
		let fields = class.fields()?;
		let methods = class.methods()?;
		let own = class.key();
		let inherited = self.config.include_inherited;

		let mut found = IndexMap::new();
		for setter in self.registry.applicable_properties(class) {
			insert_first(&mut found, setter);
		}
		for field in fields
			.iter()
			.filter(|field| inherited || field.declaring() == own)
		{
			if let Some(setter) = self.factory.create_field_setter(class, field) {
				insert_first(&mut found, Arc::new(setter));
			}
		}
		for method in methods.iter().filter(|method| {
			!method.is_static()
				&& is_qualifying_name(method.name())
				&& (inherited || method.declaring() == own)
		}) {
			if let Some(setter) = self.factory.create_method_setter(class, method) {
				insert_first(&mut found, Arc::new(setter));
			}
		}

		let mut setters: Vec<_> = found.into_values().collect();
		setters.sort_by_cached_key(|setter| setter.key());
		debug!(
			class = class.name(),
			setters = setters.len(),
			"properties discovered"
		);
		Ok(Plan {
			class: class.name(),
			setters,
		})
	}

	/// Builds a default `T` and fills it through the plan for `class`.
	pub fn populate_new<T>(&self, class: &ClassInfo) -> Result<(T, Report), DiscoveryError>
	where
		T: Reflect + Default,
	{
		let plan = self.extract_available_properties(class)?;
		let mut target = T::default();
		let report = plan.populate(&mut target);
		Ok((target, report))
	}
}

fn insert_first(found: &mut IndexMap<String, Arc<Setter>>, setter: Arc<Setter>) {
	match found.entry(setter.identity()) {
		Entry::Occupied(kept) => {
			trace!(kept = ?kept.get(), dropped = ?setter, "duplicate setter");
		}
		Entry::Vacant(slot) => {
			slot.insert(setter);
		}
	}
}

/// Ordered setters for one class.
#[derive(Debug, Clone)]
pub struct Plan {
	class: &'static str,
	setters: Vec<Arc<Setter>>,
}

impl Plan {
	pub fn class(&self) -> &'static str {
		self.class
	}

	pub fn iter(&self) -> std::slice::Iter<'_, Arc<Setter>> {
		self.setters.iter()
	}

	pub fn len(&self) -> usize {
		self.setters.len()
	}

	pub fn is_empty(&self) -> bool {
		self.setters.is_empty()
	}

	pub fn identities(&self) -> Vec<String> {
		self.setters.iter().map(|setter| setter.identity()).collect()
	}

	/// Applies every setter in order. Failed properties are recorded, not
	/// returned as errors.
	pub fn populate(&self, target: &mut dyn Reflect) -> Report {
		let outcomes = self
			.setters
			.iter()
			.map(|setter| (setter.identity(), setter.apply(&mut *target)))
			.collect();
		Report { outcomes }
	}
}

impl<'a> IntoIterator for &'a Plan {
	type Item = &'a Arc<Setter>;
	type IntoIter = std::slice::Iter<'a, Arc<Setter>>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

/// Per-property outcomes of one [`Plan::populate`] call, in plan order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
	outcomes: Vec<(String, Outcome)>,
}

impl Report {
	pub fn outcomes(&self) -> &[(String, Outcome)] {
		&self.outcomes
	}

	/// Identities of the properties that were written.
	pub fn applied(&self) -> impl Iterator<Item = &str> + '_ {
		self.outcomes
			.iter()
			.filter(|(_, outcome)| outcome.is_applied())
			.map(|(identity, _)| identity.as_str())
	}

	/// Identities of the abandoned properties with the last error seen.
	pub fn skipped(&self) -> impl Iterator<Item = (&str, &PropertyError)> + '_ {
		self.outcomes.iter().filter_map(|(identity, outcome)| match outcome {
			Outcome::Skipped(err) => Some((identity.as_str(), err)),
			_ => None,
		})
	}

	/// Returns true if no property was skipped.
	pub fn is_complete(&self) -> bool {
		self.skipped().next().is_none()
	}
}
