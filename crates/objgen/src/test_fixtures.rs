//! Shared classes for unit tests.
//!
//! `Person` covers every member shape discovery understands. `Employee` extends
//! it and adds a setter that always rejects its argument.

use std::sync::Arc;

use objgen_reflect::{ClassBuilder, ClassInfo, impl_reflect};

use crate::generator::{Constant, GeneratorTable};

#[derive(Debug, Default, Clone, PartialEq)]
pub(crate) struct Person {
	pub age: u32,
	pub name: String,
	pub tags: Vec<String>,
	pub nickname: String,
}
impl_reflect!(Person);

#[derive(Debug, Default, Clone, PartialEq)]
pub(crate) struct Employee {
	pub person: Person,
	pub salary: u64,
	pub badge: String,
}
impl_reflect!(Employee => person);

#[derive(Debug, Default)]
pub(crate) struct Vault {
	pub secret: u32,
}
impl_reflect!(Vault);

pub(crate) const AGE: u32 = 42;
pub(crate) const SALARY: u64 = 1000;
pub(crate) const TEXT: &str = "x";

pub(crate) fn person_class() -> Arc<ClassInfo> {
	ClassBuilder::<Person>::new("Person")
		.private_field("age", |p: &mut Person| &mut p.age)
		.field("name", |p: &mut Person| &mut p.name)
		.collection_field::<Vec<String>, String, _>("tags", |p: &mut Person| &mut p.tags)
		.private_field("nickname", |p: &mut Person| &mut p.nickname)
		.method("setAge", |p: &mut Person, age: u32| p.age = age)
		.method("setName", |p: &mut Person, name: String| p.name = name)
		.method("addTag", |p: &mut Person, tag: String| p.tags.push(tag))
		.method("setTags", |p: &mut Person, tags: Vec<String>| p.tags = tags)
		.build()
}

pub(crate) fn employee_class(person: &Arc<ClassInfo>) -> Arc<ClassInfo> {
	ClassBuilder::<Employee>::extending("Employee", person)
		.private_field("salary", |e: &mut Employee| &mut e.salary)
		.field("badge", |e: &mut Employee| &mut e.badge)
		.method("setSalary", |e: &mut Employee, salary: u64| e.salary = salary)
		.fallible_method("setBadge", |_: &mut Employee, _: String| {
			Err::<(), _>("badges are issued, not set")
		})
		.build()
}

pub(crate) fn vault_class() -> Arc<ClassInfo> {
	ClassBuilder::<Vault>::new("Vault")
		.private_field("secret", |v: &mut Vault| &mut v.secret)
		.restricted()
		.build()
}

/// Fixed values for every type the fixtures declare.
pub(crate) fn fixed_generators() -> GeneratorTable {
	GeneratorTable::new()
		.with::<u32>(Constant(AGE))
		.with::<u64>(Constant(SALARY))
		.with::<String>(Constant(TEXT.to_owned()))
}
