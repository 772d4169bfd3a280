use std::sync::Arc;

use crate::error::MemberError;
use crate::reflect::Reflect;
use crate::types::{ClassKey, TypeDesc, Value};

/// Type-erased write of one value into a target.
pub type MemberWriter = Arc<dyn Fn(&mut dyn Reflect, &Value) -> Result<(), MemberError> + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
	Public,
	Private,
}

/// How strictly a write honours member visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Access {
	/// Private members are refused.
	Checked,
	/// Visibility is ignored.
	Relaxed,
}

impl Access {
	fn permits(self, visibility: Visibility) -> bool {
		self == Access::Relaxed || visibility == Visibility::Public
	}
}

/// A declared field.
pub struct FieldDef {
	pub(crate) name: &'static str,
	pub(crate) declaring: ClassKey,
	pub(crate) ty: TypeDesc,
	pub(crate) visibility: Visibility,
	pub(crate) writer: MemberWriter,
}

impl FieldDef {
	pub fn name(&self) -> &'static str {
		self.name
	}

	pub fn declaring(&self) -> &ClassKey {
		&self.declaring
	}

	pub fn ty(&self) -> &TypeDesc {
		&self.ty
	}

	pub fn visibility(&self) -> Visibility {
		self.visibility
	}

	/// Assigns `value` to this field on `target`.
	pub fn write(
		&self,
		target: &mut dyn Reflect,
		value: &Value,
		access: Access,
	) -> Result<(), MemberError> {
		if !access.permits(self.visibility) {
			return Err(MemberError::Inaccessible { member: self.name });
		}
		(self.writer)(target, value)
	}
}

impl std::fmt::Debug for FieldDef {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("FieldDef")
			.field("name", &self.name)
			.field("declaring", &self.declaring.name())
			.field("ty", &self.ty.name())
			.field("visibility", &self.visibility)
			.finish()
	}
}

/// A declared method.
pub struct MethodDef {
	pub(crate) name: &'static str,
	pub(crate) declaring: ClassKey,
	pub(crate) params: Vec<TypeDesc>,
	pub(crate) visibility: Visibility,
	pub(crate) is_static: bool,
	pub(crate) invoker: MemberWriter,
}

impl MethodDef {
	pub fn name(&self) -> &'static str {
		self.name
	}

	pub fn declaring(&self) -> &ClassKey {
		&self.declaring
	}

	pub fn params(&self) -> &[TypeDesc] {
		&self.params
	}

	pub fn arity(&self) -> usize {
		self.params.len()
	}

	pub fn visibility(&self) -> Visibility {
		self.visibility
	}

	pub fn is_static(&self) -> bool {
		self.is_static
	}

	/// Returns true if both methods share a name and parameter types.
	pub fn same_signature(&self, other: &MethodDef) -> bool {
		self.name == other.name && self.params == other.params
	}

	/// Invokes this method on `target` with `value` as its single argument.
	pub fn invoke(
		&self,
		target: &mut dyn Reflect,
		value: &Value,
		access: Access,
	) -> Result<(), MemberError> {
		if self.arity() != 1 {
			return Err(MemberError::Arity {
				member: self.name,
				arity: self.arity(),
			});
		}
		if !access.permits(self.visibility) {
			return Err(MemberError::Inaccessible { member: self.name });
		}
		(self.invoker)(target, value)
	}
}

impl std::fmt::Debug for MethodDef {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let params: Vec<_> = self.params.iter().map(TypeDesc::name).collect();
		f.debug_struct("MethodDef")
			.field("name", &self.name)
			.field("declaring", &self.declaring.name())
			.field("params", &params)
			.field("visibility", &self.visibility)
			.field("is_static", &self.is_static)
			.finish()
	}
}
