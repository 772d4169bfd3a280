//! Resolved assignment units.
//!
//! A [`Setter`] pairs a target member with a value source. Direct setters write
//! through a setter method or, failing that, the field itself. Collection setters
//! first reset the backing container and then append one generated element.
//!
//! # Invariants
//!
//! - A setter always has a field or a method.
//! - A collection setter's initializer is declared on the same class as its
//!   append method's owner.
//! - [`Setter::apply`] never panics on a failed write or a failed generator and
//!   never returns an error; the failure is reported as [`Outcome::Skipped`].

use std::cmp::{Ordering, Reverse};
use std::sync::Arc;

use objgen_reflect::{Access, ClassKey, FieldDef, MemberError, MethodDef, Reflect, Value};
use tracing::{debug, trace};

use crate::error::PropertyError;
use crate::generator::SharedGenerator;

/// What happened to one property on one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
	/// Written on the first attempt.
	Applied,
	/// Written after relaxing member access.
	AppliedRelaxed,
	/// Abandoned for this target.
	Skipped(PropertyError),
}

impl Outcome {
	pub fn is_applied(&self) -> bool {
		!matches!(self, Outcome::Skipped(_))
	}

	fn severity(&self) -> u8 {
		match self {
			Outcome::Applied => 0,
			Outcome::AppliedRelaxed => 1,
			Outcome::Skipped(_) => 2,
		}
	}

	/// The less successful of two outcomes; `self` on a tie.
	fn worse(self, other: Outcome) -> Outcome {
		if other.severity() > self.severity() {
			other
		} else {
			self
		}
	}
}

pub struct Setter {
	kind: SetterKind,
	generator: SharedGenerator,
	relax_on_failure: bool,
}

enum SetterKind {
	Direct(Members),
	Collection {
		initializer: Box<Setter>,
		append: Option<Arc<MethodDef>>,
	},
}

/// The members a direct setter knows about; at least one is present.
enum Members {
	Field(Arc<FieldDef>),
	Method(Arc<MethodDef>),
	Paired(Arc<FieldDef>, Arc<MethodDef>),
}

impl Members {
	fn new(field: Option<Arc<FieldDef>>, method: Option<Arc<MethodDef>>) -> Option<Self> {
		match (field, method) {
			(Some(field), Some(method)) => Some(Members::Paired(field, method)),
			(Some(field), None) => Some(Members::Field(field)),
			(None, Some(method)) => Some(Members::Method(method)),
			(None, None) => None,
		}
	}

	fn field(&self) -> Option<&Arc<FieldDef>> {
		match self {
			Members::Field(field) | Members::Paired(field, _) => Some(field),
			Members::Method(_) => None,
		}
	}

	fn method(&self) -> Option<&Arc<MethodDef>> {
		match self {
			Members::Method(method) | Members::Paired(_, method) => Some(method),
			Members::Field(_) => None,
		}
	}

	fn declaring(&self) -> ClassKey {
		match self {
			Members::Field(field) | Members::Paired(field, _) => *field.declaring(),
			Members::Method(method) => *method.declaring(),
		}
	}

	/// Prefers the method; the field is only written when no method exists.
	fn write(
		&self,
		target: &mut dyn Reflect,
		value: &Value,
		access: Access,
	) -> Result<(), MemberError> {
		match self {
			Members::Method(method) | Members::Paired(_, method) => {
				method.invoke(target, value, access)
			}
			Members::Field(field) => field.write(target, value, access),
		}
	}
}

impl Setter {
	/// A setter writing through `method` if present, else `field`.
	///
	/// Returns `None` when both are absent.
	pub fn direct(
		field: Option<Arc<FieldDef>>,
		method: Option<Arc<MethodDef>>,
		generator: SharedGenerator,
		relax_on_failure: bool,
	) -> Option<Self> {
		Some(Self {
			kind: SetterKind::Direct(Members::new(field, method)?),
			generator,
			relax_on_failure,
		})
	}

	/// A setter that runs `initializer` and then appends one element produced by
	/// `generator` through `append`.
	pub fn collection(
		initializer: Setter,
		append: Option<Arc<MethodDef>>,
		generator: SharedGenerator,
		relax_on_failure: bool,
	) -> Self {
		Self {
			kind: SetterKind::Collection {
				initializer: Box::new(initializer),
				append,
			},
			generator,
			relax_on_failure,
		}
	}

	pub fn is_collection(&self) -> bool {
		matches!(self.kind, SetterKind::Collection { .. })
	}

	/// Backing field, for collection setters the container field.
	pub fn field(&self) -> Option<&Arc<FieldDef>> {
		match &self.kind {
			SetterKind::Direct(members) => members.field(),
			SetterKind::Collection { initializer, .. } => initializer.field(),
		}
	}

	/// Accessor method: the setter for direct setters, the append method for
	/// collection setters.
	pub fn method(&self) -> Option<&Arc<MethodDef>> {
		match &self.kind {
			SetterKind::Direct(members) => members.method(),
			SetterKind::Collection { append, .. } => append.as_ref(),
		}
	}

	pub fn initializer(&self) -> Option<&Setter> {
		match &self.kind {
			SetterKind::Direct(_) => None,
			SetterKind::Collection { initializer, .. } => Some(initializer),
		}
	}

	/// Class declaring the written member; used for specificity, not dispatch.
	pub fn affected_class(&self) -> ClassKey {
		match &self.kind {
			SetterKind::Direct(members) => members.declaring(),
			SetterKind::Collection { initializer, .. } => initializer.affected_class(),
		}
	}

	/// `field / method` with `-` for a missing member.
	///
	/// Collection setters report their initializer's identity, so a container
	/// field discovered twice collapses into one setter.
	pub fn identity(&self) -> String {
		match &self.kind {
			SetterKind::Direct(members) => format!(
				"{} / {}",
				members.field().map_or("-", |field| field.name()),
				members.method().map_or("-", |method| method.name()),
			),
			SetterKind::Collection { initializer, .. } => initializer.identity(),
		}
	}

	pub fn key(&self) -> SetterKey {
		match &self.kind {
			SetterKind::Direct(members) => {
				let class = members.declaring();
				SetterKey {
					rank: Rank::Direct,
					depth: Reverse(class.depth()),
					class: class.name(),
					field: Reverse(members.field().map(|field| field.name())),
					method: Reverse(members.method().map(|method| method.name())),
					class_id: class,
				}
			}
			SetterKind::Collection { initializer, .. } => SetterKey {
				rank: Rank::Collection,
				..initializer.key()
			},
		}
	}

	/// Writes one generated value into `target`.
	///
	/// A collection setter reports the worse of its reset and its append, so a
	/// skipped reset is visible even when the append went through.
	pub fn apply(&self, target: &mut dyn Reflect) -> Outcome {
		match &self.kind {
			SetterKind::Direct(members) => {
				let value = match self.generate() {
					Ok(value) => value,
					Err(skipped) => return skipped,
				};
				self.attempt(target, &value, |target, value, access| {
					members.write(target, value, access)
				})
			}
			SetterKind::Collection {
				initializer,
				append,
			} => {
				let initialized = initializer.apply(target);
				let Some(append) = append else {
					return initialized;
				};
				let appended = match self.generate() {
					Ok(element) => self.attempt(target, &element, |target, value, access| {
						append.invoke(target, value, access)
					}),
					Err(skipped) => skipped,
				};
				initialized.worse(appended)
			}
		}
	}

	fn generate(&self) -> Result<Value, Outcome> {
		self.generator.generate().map_err(|err| {
			debug!(setter = %self.identity(), error = %err, "property skipped");
			Outcome::Skipped(err.into())
		})
	}

	fn attempt<W>(&self, target: &mut dyn Reflect, value: &Value, write: W) -> Outcome
	where
		W: Fn(&mut dyn Reflect, &Value, Access) -> Result<(), MemberError>,
	{
		let first = match write(&mut *target, value, Access::Checked) {
			Ok(()) => return Outcome::Applied,
			Err(err) => err,
		};
		if !self.relax_on_failure {
			debug!(setter = %self.identity(), error = %first, "property skipped");
			return Outcome::Skipped(first.into());
		}
		match write(target, value, Access::Relaxed) {
			Ok(()) => {
				trace!(setter = %self.identity(), error = %first, "applied with relaxed access");
				Outcome::AppliedRelaxed
			}
			Err(err) => {
				debug!(setter = %self.identity(), error = %err, "property skipped");
				Outcome::Skipped(err.into())
			}
		}
	}
}

impl std::fmt::Debug for Setter {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Setter")
			.field("identity", &self.identity())
			.field("collection", &self.is_collection())
			.field("class", &self.affected_class().name())
			.finish()
	}
}

impl std::fmt::Display for Setter {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(&self.identity())
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
enum Rank {
	Collection,
	Direct,
}

/// Total order over setters.
///
/// Collection setters come first. Then deeper (more specific) declaring classes,
/// class name, field name descending and method name descending, with the class
/// identity as the last tie-break. Two setters with equal keys describe the same
/// logical property.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SetterKey {
	rank: Rank,
	depth: Reverse<usize>,
	class: &'static str,
	field: Reverse<Option<&'static str>>,
	method: Reverse<Option<&'static str>>,
	class_id: ClassKey,
}

impl Ord for SetterKey {
	fn cmp(&self, other: &Self) -> Ordering {
		self.rank
			.cmp(&other.rank)
			.then_with(|| self.depth.cmp(&other.depth))
			.then_with(|| self.class.cmp(other.class))
			.then_with(|| self.field.cmp(&other.field))
			.then_with(|| self.method.cmp(&other.method))
			.then_with(|| self.class_id.cmp(&other.class_id))
	}
}

impl PartialOrd for SetterKey {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl SetterKey {
	pub fn is_collection(&self) -> bool {
		self.rank == Rank::Collection
	}

	pub fn class(&self) -> &ClassKey {
		&self.class_id
	}
}
