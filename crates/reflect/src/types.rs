use std::any::{Any, TypeId};

/// A generated value, type-erased.
///
/// Accessors clone the concrete value out of the box, so one value can be offered
/// to a member more than once.
pub type Value = Box<dyn Any + Send + Sync>;

/// Shape of a declared member type.
#[derive(Debug, Clone)]
pub enum TypeKind {
	/// Anything written in one piece.
	Scalar,
	/// A container populated by initialising it and appending elements.
	Collection {
		/// Element type accepted by append methods.
		element: Box<TypeDesc>,
		/// Builds an empty container.
		empty: fn() -> Value,
	},
}

/// Declared type of a field or method parameter.
#[derive(Debug, Clone)]
pub struct TypeDesc {
	name: &'static str,
	id: TypeId,
	kind: TypeKind,
}

fn empty_of<C: Default + Any + Send + Sync>() -> Value {
	Box::new(C::default())
}

impl TypeDesc {
	/// Describes a scalar type.
	pub fn of<T: Any>() -> Self {
		Self {
			name: std::any::type_name::<T>(),
			id: TypeId::of::<T>(),
			kind: TypeKind::Scalar,
		}
	}

	/// Describes a collection `C` holding elements of type `E`.
	pub fn collection<C, E>() -> Self
	where
		C: Default + Any + Send + Sync,
		E: Any,
	{
		Self {
			name: std::any::type_name::<C>(),
			id: TypeId::of::<C>(),
			kind: TypeKind::Collection {
				element: Box::new(Self::of::<E>()),
				empty: empty_of::<C>,
			},
		}
	}

	pub fn name(&self) -> &'static str {
		self.name
	}

	pub fn id(&self) -> TypeId {
		self.id
	}

	pub fn kind(&self) -> &TypeKind {
		&self.kind
	}

	pub fn is<T: Any>(&self) -> bool {
		self.id == TypeId::of::<T>()
	}

	pub fn is_collection(&self) -> bool {
		matches!(self.kind, TypeKind::Collection { .. })
	}

	/// Element type for collections, `None` for scalars.
	pub fn element(&self) -> Option<&TypeDesc> {
		match &self.kind {
			TypeKind::Collection { element, .. } => Some(element),
			TypeKind::Scalar => None,
		}
	}

	/// Constructor of an empty container, `None` for scalars.
	pub fn empty(&self) -> Option<fn() -> Value> {
		match &self.kind {
			TypeKind::Collection { empty, .. } => Some(*empty),
			TypeKind::Scalar => None,
		}
	}
}

impl PartialEq for TypeDesc {
	fn eq(&self, other: &Self) -> bool {
		self.id == other.id
	}
}

impl Eq for TypeDesc {}

/// Identity of a described class.
///
/// `depth` counts supertypes above the class, so a subclass always has a greater
/// depth than any of its ancestors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClassKey {
	name: &'static str,
	id: TypeId,
	depth: usize,
}

impl ClassKey {
	pub(crate) fn new(name: &'static str, id: TypeId, depth: usize) -> Self {
		Self { name, id, depth }
	}

	pub fn name(&self) -> &'static str {
		self.name
	}

	pub fn id(&self) -> TypeId {
		self.id
	}

	pub fn depth(&self) -> usize {
		self.depth
	}
}

impl std::fmt::Display for ClassKey {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.name)
	}
}
