use std::any::{Any, TypeId};
use std::fmt::Display;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::class::ClassInfo;
use crate::error::MemberError;
use crate::member::{FieldDef, MemberWriter, MethodDef, Visibility};
use crate::reflect::{Reflect, locate};
use crate::types::{ClassKey, TypeDesc, Value};

/// Describes the member surface of `C`.
///
/// ```
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
/// assert_eq!(class.fields().unwrap().len(), 1);
/// ```
pub struct ClassBuilder<C> {
	key: ClassKey,
	parent: Option<Arc<ClassInfo>>,
	fields: Vec<Arc<FieldDef>>,
	methods: Vec<Arc<MethodDef>>,
	restricted: bool,
	_marker: PhantomData<fn() -> C>,
}

impl<C: Any> ClassBuilder<C> {
	pub fn new(name: &'static str) -> Self {
		Self {
			key: ClassKey::new(name, TypeId::of::<C>(), 0),
			parent: None,
			fields: Vec::new(),
			methods: Vec::new(),
			restricted: false,
			_marker: PhantomData,
		}
	}

	/// Starts a class whose supertype is `parent`.
	///
	/// `C` must reach the parent's type through [`Reflect::super_mut`].
	pub fn extending(name: &'static str, parent: &Arc<ClassInfo>) -> Self {
		Self {
			key: ClassKey::new(name, TypeId::of::<C>(), parent.depth() + 1),
			parent: Some(Arc::clone(parent)),
			..Self::new(name)
		}
	}

	/// Marks the class as refusing member enumeration.
	pub fn restricted(mut self) -> Self {
		self.restricted = true;
		self
	}

	/// A public scalar field.
	pub fn field<T, F>(self, name: &'static str, project: F) -> Self
	where
		T: Clone + Any + Send + Sync,
		F: Fn(&mut C) -> &mut T + Send + Sync + 'static,
	{
		self.push_field(name, TypeDesc::of::<T>(), Visibility::Public, project)
	}

	/// A private scalar field; only relaxed writes reach it.
	pub fn private_field<T, F>(self, name: &'static str, project: F) -> Self
	where
		T: Clone + Any + Send + Sync,
		F: Fn(&mut C) -> &mut T + Send + Sync + 'static,
	{
		self.push_field(name, TypeDesc::of::<T>(), Visibility::Private, project)
	}

	/// A private collection field of type `T` holding `E` elements.
	pub fn collection_field<T, E, F>(self, name: &'static str, project: F) -> Self
	where
		T: Clone + Default + Any + Send + Sync,
		E: Any,
		F: Fn(&mut C) -> &mut T + Send + Sync + 'static,
	{
		self.push_field(
			name,
			TypeDesc::collection::<T, E>(),
			Visibility::Private,
			project,
		)
	}

	/// A public single-argument method.
	pub fn method<T, F>(self, name: &'static str, f: F) -> Self
	where
		T: Clone + Any + Send + Sync,
		F: Fn(&mut C, T) + Send + Sync + 'static,
	{
		self.push_method::<T, _>(name, Visibility::Public, move |this, arg| {
			f(this, arg);
			Ok::<(), MemberError>(())
		})
	}

	/// A private single-argument method; only relaxed invocations reach it.
	pub fn private_method<T, F>(self, name: &'static str, f: F) -> Self
	where
		T: Clone + Any + Send + Sync,
		F: Fn(&mut C, T) + Send + Sync + 'static,
	{
		self.push_method::<T, _>(name, Visibility::Private, move |this, arg| {
			f(this, arg);
			Ok::<(), MemberError>(())
		})
	}

	/// A public single-argument method that can reject its argument.
	pub fn fallible_method<T, E, F>(self, name: &'static str, f: F) -> Self
	where
		T: Clone + Any + Send + Sync,
		E: Display,
		F: Fn(&mut C, T) -> Result<(), E> + Send + Sync + 'static,
	{
		self.push_method::<T, _>(name, Visibility::Public, move |this, arg| {
			f(this, arg).map_err(|err| MemberError::Invocation {
				member: name,
				message: err.to_string(),
			})
		})
	}

	/// A public two-argument method. It is listed with the class surface but can
	/// never be invoked with a single generated value.
	pub fn method2<A: Any, B: Any>(mut self, name: &'static str) -> Self {
		let invoker: MemberWriter = Arc::new(move |_target: &mut dyn Reflect, _value: &Value| -> Result<(), MemberError> {
			Err(MemberError::Arity {
				member: name,
				arity: 2,
			})
		});
		self.methods.push(Arc::new(MethodDef {
			name,
			declaring: self.key,
			params: vec![TypeDesc::of::<A>(), TypeDesc::of::<B>()],
			visibility: Visibility::Public,
			is_static: false,
			invoker,
		}));
		self
	}

	/// A public associated function taking one argument and no receiver.
	pub fn static_method<T, F>(mut self, name: &'static str, f: F) -> Self
	where
		T: Clone + Any + Send + Sync,
		F: Fn(T) + Send + Sync + 'static,
	{
		let expected = std::any::type_name::<T>();
		let invoker: MemberWriter = Arc::new(move |_target: &mut dyn Reflect, value: &Value| -> Result<(), MemberError> {
			let arg = (**value)
				.downcast_ref::<T>()
				.cloned()
				.ok_or(MemberError::TypeMismatch {
					member: name,
					expected,
				})?;
			f(arg);
			Ok(())
		});
		self.methods.push(Arc::new(MethodDef {
			name,
			declaring: self.key,
			params: vec![TypeDesc::of::<T>()],
			visibility: Visibility::Public,
			is_static: true,
			invoker,
		}));
		self
	}

	pub fn build(self) -> Arc<ClassInfo> {
		Arc::new(ClassInfo {
			key: self.key,
			parent: self.parent,
			fields: self.fields,
			methods: self.methods,
			restricted: self.restricted,
		})
	}

	fn push_field<T, F>(
		mut self,
		name: &'static str,
		ty: TypeDesc,
		visibility: Visibility,
		project: F,
	) -> Self
	where
		T: Clone + Any + Send + Sync,
		F: Fn(&mut C) -> &mut T + Send + Sync + 'static,
	{
		let class = self.key.name();
		let expected = std::any::type_name::<T>();
		let writer: MemberWriter = Arc::new(move |target: &mut dyn Reflect, value: &Value| -> Result<(), MemberError> {
			let value = (**value)
				.downcast_ref::<T>()
				.cloned()
				.ok_or(MemberError::TypeMismatch {
					member: name,
					expected,
				})?;
			let this = locate::<C>(target).ok_or(MemberError::TargetMismatch {
				member: name,
				expected: class,
			})?;
			*project(this) = value;
			Ok(())
		});
		self.fields.push(Arc::new(FieldDef {
			name,
			declaring: self.key,
			ty,
			visibility,
			writer,
		}));
		self
	}

	fn push_method<T, F>(mut self, name: &'static str, visibility: Visibility, f: F) -> Self
	where
		T: Clone + Any + Send + Sync,
		F: Fn(&mut C, T) -> Result<(), MemberError> + Send + Sync + 'static,
	{
		let class = self.key.name();
		let expected = std::any::type_name::<T>();
		let invoker: MemberWriter = Arc::new(move |target: &mut dyn Reflect, value: &Value| -> Result<(), MemberError> {
			let arg = (**value)
				.downcast_ref::<T>()
				.cloned()
				.ok_or(MemberError::TypeMismatch {
					member: name,
					expected,
				})?;
			let this = locate::<C>(target).ok_or(MemberError::TargetMismatch {
				member: name,
				expected: class,
			})?;
			f(this, arg)
		});
		self.methods.push(Arc::new(MethodDef {
			name,
			declaring: self.key,
			params: vec![TypeDesc::of::<T>()],
			visibility,
			is_static: false,
			invoker,
		}));
		self
	}
}
