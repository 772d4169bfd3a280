use std::sync::Arc;

use crate::error::IntrospectError;
use crate::member::{FieldDef, MethodDef, Visibility};
use crate::types::ClassKey;

/// The member surface of one described class.
///
/// Built by [`crate::ClassBuilder`]. Fields and methods are kept in declaration
/// order; inherited members come from the parent `ClassInfo`.
#[derive(Debug)]
pub struct ClassInfo {
	pub(crate) key: ClassKey,
	pub(crate) parent: Option<Arc<ClassInfo>>,
	pub(crate) fields: Vec<Arc<FieldDef>>,
	pub(crate) methods: Vec<Arc<MethodDef>>,
	pub(crate) restricted: bool,
}

impl ClassInfo {
	pub fn key(&self) -> &ClassKey {
		&self.key
	}

	pub fn name(&self) -> &'static str {
		self.key.name()
	}

	pub fn parent(&self) -> Option<&Arc<ClassInfo>> {
		self.parent.as_ref()
	}

	/// Number of supertypes above this class.
	pub fn depth(&self) -> usize {
		self.key.depth()
	}

	/// This class followed by its supertypes, nearest first.
	pub fn ancestors(&self) -> impl Iterator<Item = &ClassInfo> + '_ {
		std::iter::successors(Some(self), |class| class.parent.as_deref())
	}

	/// The class in this hierarchy identified by `key`.
	pub fn ancestor(&self, key: &ClassKey) -> Option<&ClassInfo> {
		self.ancestors().find(|class| class.key == *key)
	}

	/// Returns true if a member declared on `other` applies to instances of this
	/// class, i.e. `other` is this class or one of its supertypes.
	pub fn can_replace(&self, other: &ClassKey) -> bool {
		self.ancestor(other).is_some()
	}

	pub fn is_restricted(&self) -> bool {
		self.restricted
	}

	/// Fields declared directly on this class.
	pub fn declared_fields(&self) -> Result<&[Arc<FieldDef>], IntrospectError> {
		self.check()?;
		Ok(&self.fields)
	}

	/// Methods declared directly on this class.
	pub fn declared_methods(&self) -> Result<&[Arc<MethodDef>], IntrospectError> {
		self.check()?;
		Ok(&self.methods)
	}

	/// Own fields followed by inherited ones.
	pub fn fields(&self) -> Result<Vec<Arc<FieldDef>>, IntrospectError> {
		let mut fields = Vec::new();
		for class in self.ancestors() {
			fields.extend(class.declared_fields()?.iter().cloned());
		}
		Ok(fields)
	}

	/// Own methods followed by inherited public methods that no nearer class
	/// overrides.
	pub fn methods(&self) -> Result<Vec<Arc<MethodDef>>, IntrospectError> {
		let mut methods: Vec<Arc<MethodDef>> = self.declared_methods()?.to_vec();
		for class in self.ancestors().skip(1) {
			for method in class.declared_methods()? {
				if method.visibility() != Visibility::Public {
					continue;
				}
				if methods.iter().any(|seen| seen.same_signature(method)) {
					continue;
				}
				methods.push(Arc::clone(method));
			}
		}
		Ok(methods)
	}

	fn check(&self) -> Result<(), IntrospectError> {
		if self.restricted {
			return Err(IntrospectError::Restricted {
				class: self.key.name(),
			});
		}
		Ok(())
	}
}
