//! Error types for member access and class enumeration.

use thiserror::Error;

/// A single member write or invocation failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MemberError {
	/// The member is private and the write was not relaxed.
	#[error("member `{member}` is not accessible")]
	Inaccessible { member: &'static str },

	/// The offered value is not of the member's declared type.
	#[error("member `{member}` expects a `{expected}`")]
	TypeMismatch {
		member: &'static str,
		expected: &'static str,
	},

	/// The target does not contain the member's declaring type.
	#[error("target has no `{expected}` part for member `{member}`")]
	TargetMismatch {
		member: &'static str,
		expected: &'static str,
	},

	/// Only single-argument methods can be invoked with one value.
	#[error("method `{member}` takes {arity} parameters")]
	Arity { member: &'static str, arity: usize },

	/// The member's own logic rejected the value.
	#[error("method `{member}` failed: {message}")]
	Invocation {
		member: &'static str,
		message: String,
	},
}

/// The member surface of a class could not be enumerated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntrospectError {
	#[error("class `{class}` does not permit introspection")]
	Restricted { class: &'static str },
}
