use std::sync::Arc;

use objgen_reflect::ClassBuilder;

use super::*;
use crate::test_fixtures::{Employee, Person, employee_class, person_class, vault_class};

/// Field names are folded; the property is expected in canonical form.
#[test]
fn test_find_field_folds_field_names() {
	let class = ClassBuilder::<Person>::new("Person")
		.field("nickName", |p: &mut Person| &mut p.nickname)
		.build();
	let field = find_field(&class, "nickname").expect("nickName");
	assert_eq!(field.name(), "nickName");
	assert!(find_field(&class, "missing").is_none());
}

/// Only fields declared on the class itself are candidates.
#[test]
fn test_find_field_ignores_inherited() {
	let person = person_class();
	let employee = employee_class(&person);
	assert!(find_field(&employee, "age").is_none());
	assert!(find_field(&employee, "salary").is_some());
}

/// Setters are found on the class and its supertypes.
#[test]
fn test_find_setter_sees_inherited_methods() {
	let person = person_class();
	let employee = employee_class(&person);
	let setter = find_setter(&employee, "age").expect("inherited setAge");
	assert_eq!(setter.name(), "setAge");
	assert_eq!(setter.declaring().name(), "Person");
	assert!(find_setter(&employee, "tag").is_none());
}

#[test]
fn test_find_append_method_matches_plural() {
	let person = person_class();
	let append = find_append_method(&person, "tags").expect("addTag");
	assert_eq!(append.name(), "addTag");
	assert!(find_append_method(&person, "name").is_none());
}

/// Static and multi-argument methods never qualify.
#[test]
fn test_finders_skip_non_unary_and_static() {
	let class = ClassBuilder::<Person>::new("Person")
		.static_method("setAge", |_: u32| {})
		.method2::<u32, u32>("setName")
		.method2::<String, u32>("addTag")
		.build();
	assert!(find_setter(&class, "age").is_none());
	assert!(find_setter(&class, "name").is_none());
	assert!(find_append_method(&class, "tags").is_none());
}

/// With two candidates the first in declaration order wins.
#[test]
fn test_ambiguous_setter_takes_first() {
	let class = ClassBuilder::<Person>::new("Person")
		.method("setName", |p: &mut Person, name: String| p.name = name)
		.method("SETNAME", |p: &mut Person, name: String| p.nickname = name)
		.build();
	let setter = find_setter(&class, "name").expect("setter");
	assert_eq!(setter.name(), "setName");
}

#[test]
fn test_restricted_class_has_no_candidates() {
	let vault = vault_class();
	assert!(find_field(&vault, "secret").is_none());
	assert!(find_setter(&vault, "secret").is_none());
}

/// A supertype method resolves to the subtype's same-signature override.
#[test]
fn test_find_override_prefers_subtype() {
	let person = person_class();
	let employee = ClassBuilder::<Employee>::extending("Employee", &person)
		.method("setName", |e: &mut Employee, name: String| e.badge = name)
		.build();
	let base = find_setter(&person, "name").unwrap();
	let resolved = find_override(&employee, &base);
	assert_eq!(resolved.declaring().name(), "Employee");

	let age = find_setter(&person, "age").unwrap();
	assert!(Arc::ptr_eq(&find_override(&employee, &age), &age));
}

/// Private methods are never overridden.
#[test]
fn test_find_override_keeps_private_methods() {
	let base = ClassBuilder::<Person>::new("Person")
		.private_method("setAge", |p: &mut Person, age: u32| p.age = age)
		.build();
	let sub = ClassBuilder::<Employee>::extending("Employee", &base)
		.method("setAge", |e: &mut Employee, _: u32| e.salary = 1)
		.build();
	let private = base.declared_methods().unwrap()[0].clone();
	let resolved = find_override(&sub, &private);
	assert_eq!(resolved.declaring().name(), "Person");
}
