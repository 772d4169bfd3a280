//! Explicitly registered property overrides.
//!
//! # Role
//!
//! A [`Registry`] holds setters registered for specific (class, property) pairs.
//! Discovery consults it first, so a registered generator wins over the one the
//! lookup would pick for the same member.
//!
//! # Concurrency
//!
//! - **Reads:** Wait-free (atomic load of the current snapshot).
//! - **Writes:** Read-copy-update loop; a replacement of one property is a single
//!   atomic swap and concurrent registrations are never lost.
//!
//! # Invariants
//!
//! - At most one setter per [`SetterKey`]; a later registration replaces the
//!   earlier one.
//! - Entries live as long as the registry; nothing is evicted implicitly.

use std::collections::BTreeMap;
use std::sync::Arc;

use arc_swap::ArcSwap;
use objgen_reflect::ClassInfo;
use tracing::{debug, warn};

use crate::error::RegistryError;
use crate::factory::SetterFactory;
use crate::finder::{find_field, find_setter};
use crate::generator::SharedGenerator;
use crate::setter::{Setter, SetterKey};

type Entries = BTreeMap<SetterKey, Arc<Setter>>;

/// Ordered store of registered setters.
///
/// Created once by the harness and shared (usually behind an `Arc`) with every
/// [`crate::Discovery`] that should honour the overrides.
#[derive(Default)]
pub struct Registry {
	entries: ArcSwap<Entries>,
}

impl Registry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers `generator` for `property` on `class`.
	///
	/// The property name is matched case-insensitively against fields declared on
	/// `class` and setters visible on it.
	pub fn register(
		&self,
		factory: &SetterFactory,
		class: &ClassInfo,
		property: &str,
		generator: SharedGenerator,
	) -> Result<(), RegistryError> {
		class.methods()?;
		let property = property.to_lowercase();
		let field = find_field(class, &property);
		let method = find_setter(class, &property);
		let Some(setter) = factory.build(class, field, method, generator) else {
			warn!(class = class.name(), property, "registration matched no member");
			return Err(RegistryError::Unresolved {
				class: class.name(),
				property,
			});
		};
		if let Some(previous) = self.insert(setter) {
			debug!(class = class.name(), setter = %previous, "registration replaced");
		}
		Ok(())
	}

	/// Stores `setter`, returning the entry it replaced.
	pub fn insert(&self, setter: Setter) -> Option<Arc<Setter>> {
		let key = setter.key();
		let setter = Arc::new(setter);
		let previous = self.entries.rcu(|current| {
			let mut next = Entries::clone(current);
			next.insert(key.clone(), Arc::clone(&setter));
			next
		});
		previous.get(&key).cloned()
	}

	/// Registered setters that apply to instances of `class`, most specific
	/// first.
	pub fn applicable_properties(&self, class: &ClassInfo) -> Vec<Arc<Setter>> {
		let entries = self.entries.load();
		entries
			.values()
			.filter(|setter| class.can_replace(&setter.affected_class()))
			.cloned()
			.collect()
	}

	/// Drops every registration.
	pub fn clear(&self) {
		self.entries.store(Arc::default());
	}

	pub fn len(&self) -> usize {
		self.entries.load().len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.load().is_empty()
	}
}

impl std::fmt::Debug for Registry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let entries = self.entries.load();
		f.debug_list().entries(entries.values()).finish()
	}
}
