//! Builds [`Setter`]s from discovered members.

use std::sync::Arc;

use objgen_reflect::{ClassInfo, FieldDef, MethodDef, TypeDesc};
use tracing::trace;

use crate::config::PopulateConfig;
use crate::finder::{find_append_method, find_field, find_override, find_setter};
use crate::generator::{EmptyCollection, GeneratorLookup, SharedGenerator};
use crate::naming::{
	append_canonical_name, canonical_name, field_canonical_name, has_append_prefix,
};
use crate::setter::Setter;

/// Pairs fields with accessors and decides between direct and collection setters.
#[derive(Clone)]
pub struct SetterFactory {
	lookup: Arc<dyn GeneratorLookup>,
	relax_on_failure: bool,
}

impl SetterFactory {
	pub fn new(lookup: Arc<dyn GeneratorLookup>) -> Self {
		Self::with_config(lookup, &PopulateConfig::default())
	}

	pub fn with_config(lookup: Arc<dyn GeneratorLookup>, config: &PopulateConfig) -> Self {
		Self {
			lookup,
			relax_on_failure: config.relax_on_failure,
		}
	}

	pub fn lookup(&self) -> &Arc<dyn GeneratorLookup> {
		&self.lookup
	}

	/// Builds a setter for `field` and `method` on instances of `class`.
	///
	/// Both members may be declared on `class` or on a supertype. Methods resolve
	/// to the override `class` dispatches to. A collection-typed field yields a
	/// collection setter whose initializer resets the field (through its setter
	/// when one exists) and whose append method receives one value from
	/// `generator`. `method` itself is not used in that case; the append method is
	/// looked up by the field's name on the field's declaring class.
	pub fn build(
		&self,
		class: &ClassInfo,
		field: Option<Arc<FieldDef>>,
		method: Option<Arc<MethodDef>>,
		generator: SharedGenerator,
	) -> Option<Setter> {
		let field = match field {
			Some(field) if field.ty().is_collection() => field,
			field => {
				let method = method.map(|method| find_override(class, &method));
				return Setter::direct(field, method, generator, self.relax_on_failure);
			}
		};
		let declaring = class.ancestor(field.declaring()).unwrap_or(class);
		let property = field_canonical_name(field.name());
		let append =
			find_append_method(declaring, &property).map(|append| find_override(class, &append));
		let set = find_setter(declaring, &property).map(|set| find_override(class, &set));
		let container = self.container_generator(field.ty())?;
		let initializer = Setter::direct(Some(field), set, container, self.relax_on_failure)?;
		Some(Setter::collection(
			initializer,
			append,
			generator,
			self.relax_on_failure,
		))
	}

	/// Setter for a field found on `class`, with a generator for its type.
	///
	/// Collection fields get a generator for their element type, which feeds the
	/// append method.
	pub fn create_field_setter(
		&self,
		class: &ClassInfo,
		field: &Arc<FieldDef>,
	) -> Option<Setter> {
		let ty = field.ty();
		let generator = self.generator_for(ty.element().unwrap_or(ty))?;
		self.create_field_setter_with(class, field, generator)
	}

	pub fn create_field_setter_with(
		&self,
		class: &ClassInfo,
		field: &Arc<FieldDef>,
		generator: SharedGenerator,
	) -> Option<Setter> {
		let declaring = class.ancestor(field.declaring()).unwrap_or(class);
		let method = find_setter(declaring, &field_canonical_name(field.name()));
		self.build(class, Some(Arc::clone(field)), method, generator)
	}

	/// Setter for a single-argument method found on `class`.
	///
	/// Methods taking any other number of parameters yield `None`. A method paired
	/// with a collection field is fed by the element generator.
	pub fn create_method_setter(
		&self,
		class: &ClassInfo,
		method: &Arc<MethodDef>,
	) -> Option<Setter> {
		let [param] = method.params() else {
			return None;
		};
		let declaring = class.ancestor(method.declaring()).unwrap_or(class);
		let field = backing_field(declaring, method.name());
		let ty = field
			.as_ref()
			.and_then(|field| field.ty().element())
			.unwrap_or(param);
		let generator = self.generator_for(ty)?;
		self.build(class, field, Some(Arc::clone(method)), generator)
	}

	pub fn create_method_setter_with(
		&self,
		class: &ClassInfo,
		method: &Arc<MethodDef>,
		generator: SharedGenerator,
	) -> Option<Setter> {
		if method.arity() != 1 {
			return None;
		}
		let declaring = class.ancestor(method.declaring()).unwrap_or(class);
		let field = backing_field(declaring, method.name());
		self.build(class, field, Some(Arc::clone(method)), generator)
	}

	fn generator_for(&self, ty: &TypeDesc) -> Option<SharedGenerator> {
		let generator = self.lookup.generator_for(ty);
		if generator.is_none() {
			trace!(ty = ty.name(), "no generator");
		}
		generator
	}

	fn container_generator(&self, ty: &TypeDesc) -> Option<SharedGenerator> {
		self.lookup.generator_for(ty).or_else(|| {
			ty.empty()
				.map(|empty| Arc::new(EmptyCollection(empty)) as SharedGenerator)
		})
	}
}

/// Field backing `method`, searched on its declaring class and then outward. An
/// `add*` method that matches no field by its own name is tried against the
/// pluralised name, so `addTag` pairs with `tags`.
fn backing_field(declaring: &ClassInfo, method: &str) -> Option<Arc<FieldDef>> {
	let canonical = canonical_name(method);
	let plural = has_append_prefix(method).then(|| append_canonical_name(method));
	declaring.ancestors().find_map(|class| {
		find_field(class, &canonical)
			.or_else(|| plural.as_deref().and_then(|plural| find_field(class, plural)))
	})
}

impl std::fmt::Debug for SetterFactory {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("SetterFactory")
			.field("relax_on_failure", &self.relax_on_failure)
			.finish_non_exhaustive()
	}
}
