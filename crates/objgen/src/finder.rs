//! Member lookup by canonical property name.
//!
//! Each finder returns the first candidate in declaration order. A second match is
//! only traced: ambiguous names are resolved deterministically, never reported.
//! A class that refuses introspection has no candidates.

use std::sync::Arc;

use objgen_reflect::{ClassInfo, FieldDef, MethodDef, Visibility};
use tracing::trace;

use crate::naming::{
	append_canonical_name, canonical_name, field_canonical_name, has_append_prefix,
	has_setter_prefix,
};

/// Field declared directly on `class` whose name folds to `property`.
pub fn find_field(class: &ClassInfo, property: &str) -> Option<Arc<FieldDef>> {
	let fields = class.declared_fields().ok()?;
	first_match(
		class,
		"field",
		property,
		fields
			.iter()
			.filter(|field| field_canonical_name(field.name()) == property),
	)
}

/// Single-argument `set*` method visible on `class` for `property`.
pub fn find_setter(class: &ClassInfo, property: &str) -> Option<Arc<MethodDef>> {
	let methods = class.methods().ok()?;
	first_match(
		class,
		"setter",
		property,
		methods.iter().filter(|method| {
			is_unary_instance(method)
				&& has_setter_prefix(method.name())
				&& canonical_name(method.name()) == property
		}),
	)
}

/// Single-argument `add*` method visible on `class` whose pluralised name starts
/// with `property`.
pub fn find_append_method(class: &ClassInfo, property: &str) -> Option<Arc<MethodDef>> {
	let methods = class.methods().ok()?;
	first_match(
		class,
		"append method",
		property,
		methods.iter().filter(|method| {
			is_unary_instance(method)
				&& has_append_prefix(method.name())
				&& append_canonical_name(method.name()).starts_with(property)
		}),
	)
}

/// The override of `method` that instances of `class` dispatch to.
///
/// Public methods are overridden by a same-signature method on `class` or a nearer
/// supertype; anything else is returned as is.
pub fn find_override(class: &ClassInfo, method: &Arc<MethodDef>) -> Arc<MethodDef> {
	if method.visibility() != Visibility::Public {
		return Arc::clone(method);
	}
	class
		.methods()
		.ok()
		.and_then(|methods| {
			methods
				.into_iter()
				.find(|candidate| candidate.same_signature(method))
		})
		.unwrap_or_else(|| Arc::clone(method))
}

fn is_unary_instance(method: &MethodDef) -> bool {
	!method.is_static() && method.arity() == 1
}

fn first_match<'a, T, I>(class: &ClassInfo, what: &str, property: &str, mut candidates: I) -> Option<Arc<T>>
where
	T: std::fmt::Debug + 'a,
	I: Iterator<Item = &'a Arc<T>>,
{
	let first = candidates.next()?;
	if let Some(other) = candidates.next() {
		trace!(
			class = class.name(),
			property,
			chosen = ?first,
			ignored = ?other,
			"ambiguous {what}"
		);
	}
	Some(Arc::clone(first))
}

#[cfg(test)]
mod tests;
