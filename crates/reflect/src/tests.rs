use std::sync::Arc;

use pretty_assertions::assert_eq;

use crate::{
	Access, ClassBuilder, ClassInfo, IntrospectError, MemberError, Value, Visibility, impl_reflect,
	locate,
};

#[derive(Debug, Default, Clone, PartialEq)]
struct Animal {
	name: String,
	legs: u8,
}
impl_reflect!(Animal);

#[derive(Debug, Default, Clone, PartialEq)]
struct Dog {
	animal: Animal,
	tricks: Vec<String>,
}
impl_reflect!(Dog => animal);

fn animal_class() -> Arc<ClassInfo> {
	ClassBuilder::<Animal>::new("Animal")
		.field("name", |a: &mut Animal| &mut a.name)
		.private_field("legs", |a: &mut Animal| &mut a.legs)
		.method("setName", |a: &mut Animal, name: String| a.name = name)
		.private_method("setLegs", |a: &mut Animal, legs: u8| a.legs = legs)
		.build()
}

fn dog_class(animal: &Arc<ClassInfo>) -> Arc<ClassInfo> {
	ClassBuilder::<Dog>::extending("Dog", animal)
		.collection_field::<Vec<String>, String, _>("tricks", |d: &mut Dog| &mut d.tricks)
		.method("addTrick", |d: &mut Dog, trick: String| d.tricks.push(trick))
		.method("setName", |d: &mut Dog, name: String| d.animal.name = format!("dog {name}"))
		.build()
}

fn boxed<T: Send + Sync + 'static>(value: T) -> Value {
	Box::new(value)
}

/// `locate` finds the target itself and walks embedded supertype parts.
#[test]
fn test_locate_walks_supertype_chain() {
	let mut dog = Dog::default();
	assert!(locate::<Dog>(&mut dog).is_some());
	locate::<Animal>(&mut dog).expect("animal part").legs = 4;
	assert_eq!(dog.animal.legs, 4);
	assert!(locate::<String>(&mut dog).is_none());
}

/// Public fields accept checked writes; private ones only relaxed writes.
#[test]
fn test_field_visibility_gates_checked_writes() {
	let class = animal_class();
	let fields = class.fields().unwrap();
	let legs = fields.iter().find(|f| f.name() == "legs").unwrap();
	assert_eq!(legs.visibility(), Visibility::Private);

	let mut animal = Animal::default();
	let value = boxed(3u8);
	assert_eq!(
		legs.write(&mut animal, &value, Access::Checked),
		Err(MemberError::Inaccessible { member: "legs" })
	);
	assert_eq!(animal.legs, 0);

	legs.write(&mut animal, &value, Access::Relaxed).unwrap();
	assert_eq!(animal.legs, 3);
}

/// A value of the wrong type is reported, not written.
#[test]
fn test_type_mismatch_is_reported() {
	let class = animal_class();
	let name = class.declared_fields().unwrap()[0].clone();
	let mut animal = Animal::default();
	let err = name
		.write(&mut animal, &boxed(7i32), Access::Relaxed)
		.unwrap_err();
	assert!(matches!(err, MemberError::TypeMismatch { member: "name", .. }));
	assert_eq!(animal, Animal::default());
}

/// Members declared on a supertype write into the embedded part of a subtype.
#[test]
fn test_inherited_field_writes_through_subtype() {
	let animal = animal_class();
	let dog = dog_class(&animal);
	let fields = dog.fields().unwrap();
	let names: Vec<_> = fields.iter().map(|f| f.name()).collect();
	assert_eq!(names, vec!["tricks", "name", "legs"]);

	let legs = fields.iter().find(|f| f.name() == "legs").unwrap();
	assert_eq!(legs.declaring(), animal.key());

	let mut target = Dog::default();
	legs.write(&mut target, &boxed(4u8), Access::Relaxed).unwrap();
	assert_eq!(target.animal.legs, 4);
}

/// Overridden and private supertype methods are not inherited.
#[test]
fn test_methods_skip_overridden_and_private_inherited() {
	let animal = animal_class();
	let dog = dog_class(&animal);
	let methods = dog.methods().unwrap();
	let listed: Vec<_> = methods
		.iter()
		.map(|m| (m.name(), m.declaring().name()))
		.collect();
	assert_eq!(listed, vec![("addTrick", "Dog"), ("setName", "Dog")]);

	let mut target = Dog::default();
	methods[1]
		.invoke(&mut target, &boxed(String::from("rex")), Access::Checked)
		.unwrap();
	assert_eq!(target.animal.name, "dog rex");
}

/// A member invoked against a target without its declaring part fails cleanly.
#[test]
fn test_target_mismatch() {
	let animal = animal_class();
	let dog = dog_class(&animal);
	let add = dog.declared_methods().unwrap()[0].clone();
	let mut stranger = Animal::default();
	let err = add
		.invoke(&mut stranger, &boxed(String::from("sit")), Access::Checked)
		.unwrap_err();
	assert_eq!(
		err,
		MemberError::TargetMismatch {
			member: "addTrick",
			expected: "Dog"
		}
	);
}

/// Hierarchy queries follow the supertype chain only.
#[test]
fn test_can_replace_and_depth() {
	let animal = animal_class();
	let dog = dog_class(&animal);
	assert_eq!(animal.depth(), 0);
	assert_eq!(dog.depth(), 1);
	assert!(dog.can_replace(animal.key()));
	assert!(dog.can_replace(dog.key()));
	assert!(!animal.can_replace(dog.key()));
}

/// Collection fields describe their element and build empty containers.
#[test]
fn test_collection_type_desc() {
	let dog = dog_class(&animal_class());
	let tricks = dog.declared_fields().unwrap()[0].clone();
	let ty = tricks.ty();
	assert!(ty.is_collection());
	assert!(ty.element().unwrap().is::<String>());
	let empty = (ty.empty().unwrap())();
	assert_eq!((*empty).downcast_ref::<Vec<String>>(), Some(&Vec::new()));
}

/// Fallible methods surface their own error text.
#[test]
fn test_fallible_method_reports_invocation_error() {
	let class = ClassBuilder::<Animal>::new("Animal")
		.fallible_method("setLegs", |_: &mut Animal, legs: u8| {
			if legs > 4 { Err(format!("{legs} legs")) } else { Ok(()) }
		})
		.build();
	let set_legs = class.declared_methods().unwrap()[0].clone();
	let err = set_legs
		.invoke(&mut Animal::default(), &boxed(8u8), Access::Checked)
		.unwrap_err();
	assert_eq!(
		err,
		MemberError::Invocation {
			member: "setLegs",
			message: "8 legs".into()
		}
	);
}

/// Two-argument and static methods are listed with their shape.
#[test]
fn test_method_shapes() {
	let class = ClassBuilder::<Animal>::new("Animal")
		.method2::<String, u8>("setBoth")
		.static_method("setDefaultLegs", |_: u8| {})
		.build();
	let methods = class.declared_methods().unwrap();
	assert_eq!(methods[0].arity(), 2);
	assert!(matches!(
		methods[0].invoke(&mut Animal::default(), &boxed(1u8), Access::Relaxed),
		Err(MemberError::Arity { arity: 2, .. })
	));
	assert!(methods[1].is_static());
	methods[1]
		.invoke(&mut Animal::default(), &boxed(1u8), Access::Checked)
		.unwrap();
}

/// Restricted classes refuse enumeration, including through subtypes.
#[test]
fn test_restricted_class() {
	let sealed = ClassBuilder::<Animal>::new("Animal").restricted().build();
	assert_eq!(
		sealed.fields().unwrap_err(),
		IntrospectError::Restricted { class: "Animal" }
	);
	let dog = dog_class(&sealed);
	assert!(dog.methods().is_err());
	assert!(dog.declared_fields().is_ok());
}
