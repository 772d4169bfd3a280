//! Explicit member metadata for populated types.
//!
//! Rust has no runtime reflection, so types that want to be populated describe
//! their mutable surface up front. A [`ClassInfo`] lists the fields and methods a
//! type declares; every member carries a type-erased accessor that writes a
//! generated [`Value`] into a target reached through the [`Reflect`] trait.
//!
//! # Mental Model
//!
//! 1. **Describe:** [`ClassBuilder`] records fields (projections into the struct)
//!    and methods (closures taking one argument) together with their visibility.
//! 2. **Enumerate:** [`ClassInfo::fields`] and [`ClassInfo::methods`] expose the
//!    member surface, inherited members included.
//! 3. **Write:** [`FieldDef::write`] and [`MethodDef::invoke`] locate the declaring
//!    type inside the target via [`Reflect::super_mut`] and apply the value.
//!
//! # Access Policy
//!
//! Private members reject [`Access::Checked`] writes with
//! [`MemberError::Inaccessible`]. Callers that still want the write retry with
//! [`Access::Relaxed`].

mod builder;
mod class;
mod error;
mod member;
mod reflect;
mod types;

pub use builder::ClassBuilder;
pub use class::ClassInfo;
pub use error::{IntrospectError, MemberError};
pub use member::{Access, FieldDef, MemberWriter, MethodDef, Visibility};
pub use reflect::{Reflect, locate};
pub use types::{ClassKey, TypeDesc, TypeKind, Value};

#[cfg(test)]
mod tests;
