//! Value generators and the type-keyed lookup used for discovered members.

use std::any::{Any, TypeId};
use std::fmt::Display;
use std::sync::Arc;

use objgen_reflect::{TypeDesc, Value};
use rand::distr::Alphanumeric;
use rand::Rng;
use rustc_hash::FxHashMap;

use crate::error::GenerateError;

/// Produces one value per call.
///
/// Any `Fn() -> T` closure is a generator; wrap closures that can fail in
/// [`Fallible`]:
///
/// ```
/// use objgen::{Fallible, ValueGenerator};
///
/// let generator = || 42u32;
/// let value = generator.generate().unwrap();
/// assert_eq!(value.downcast_ref::<u32>(), Some(&42));
///
/// let exhausted = Fallible(|| Err::<u32, _>("pool exhausted"));
/// assert!(exhausted.generate().is_err());
/// ```
pub trait ValueGenerator: Send + Sync {
	/// A failure skips the property on the current target only.
	fn generate(&self) -> Result<Value, GenerateError>;
}

pub type SharedGenerator = Arc<dyn ValueGenerator>;

impl<F, T> ValueGenerator for F
where
	F: Fn() -> T + Send + Sync,
	T: Any + Send + Sync,
{
	fn generate(&self) -> Result<Value, GenerateError> {
		Ok(Box::new(self()))
	}
}

/// A closure returning `Result`; its error becomes a [`GenerateError`].
#[derive(Debug, Clone, Copy)]
pub struct Fallible<F>(pub F);

impl<F, T, E> ValueGenerator for Fallible<F>
where
	F: Fn() -> Result<T, E> + Send + Sync,
	T: Any + Send + Sync,
	E: Display,
{
	fn generate(&self) -> Result<Value, GenerateError> {
		match (self.0)() {
			Ok(value) => Ok(Box::new(value)),
			Err(err) => Err(GenerateError::new(err)),
		}
	}
}

/// Always yields a clone of the held value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constant<T>(pub T);

impl<T> ValueGenerator for Constant<T>
where
	T: Clone + Any + Send + Sync,
{
	fn generate(&self) -> Result<Value, GenerateError> {
		Ok(Box::new(self.0.clone()))
	}
}

/// Yields a fresh empty container.
#[derive(Debug, Clone, Copy)]
pub struct EmptyCollection(pub fn() -> Value);

impl ValueGenerator for EmptyCollection {
	fn generate(&self) -> Result<Value, GenerateError> {
		Ok((self.0)())
	}
}

/// Resolves a generator for a declared member type.
pub trait GeneratorLookup: Send + Sync {
	fn generator_for(&self, ty: &TypeDesc) -> Option<SharedGenerator>;
}

impl<F> GeneratorLookup for F
where
	F: Fn(&TypeDesc) -> Option<SharedGenerator> + Send + Sync,
{
	fn generator_for(&self, ty: &TypeDesc) -> Option<SharedGenerator> {
		self(ty)
	}
}

/// Generators keyed by exact type.
///
/// Collection types without an entry fall back to [`EmptyCollection`].
#[derive(Clone, Default)]
pub struct GeneratorTable {
	by_type: FxHashMap<TypeId, SharedGenerator>,
}

const MAX_STRING_LEN: usize = 16;

fn random_string() -> String {
	let mut rng = rand::rng();
	let len = rng.random_range(1..=MAX_STRING_LEN);
	(&mut rng)
		.sample_iter(Alphanumeric)
		.take(len)
		.map(char::from)
		.collect()
}

macro_rules! insert_random {
	($table:ident: $($ty:ty),+ $(,)?) => {
		$( $table.insert::<$ty>(|| rand::rng().random::<$ty>()); )+
	};
}

impl GeneratorTable {
	/// An empty table.
	pub fn new() -> Self {
		Self::default()
	}

	/// Random generators for primitive numbers, `bool`, `char` and `String`.
	pub fn with_defaults() -> Self {
		let mut table = Self::new();
		insert_random!(table: i8, i16, i32, i64, i128, u8, u16, u32, u64, u128, f32, f64, bool, char);
		table.insert::<isize>(|| rand::rng().random::<i64>() as isize);
		table.insert::<usize>(|| rand::rng().random::<u64>() as usize);
		table.insert::<String>(random_string);
		table
	}

	/// Sets the generator used for `T`, replacing any previous one.
	pub fn insert<T: Any>(&mut self, generator: impl ValueGenerator + 'static) -> &mut Self {
		self.by_type.insert(TypeId::of::<T>(), Arc::new(generator));
		self
	}

	/// Builder form of [`GeneratorTable::insert`].
	pub fn with<T: Any>(mut self, generator: impl ValueGenerator + 'static) -> Self {
		self.insert::<T>(generator);
		self
	}

	pub fn len(&self) -> usize {
		self.by_type.len()
	}

	pub fn is_empty(&self) -> bool {
		self.by_type.is_empty()
	}
}

impl GeneratorLookup for GeneratorTable {
	fn generator_for(&self, ty: &TypeDesc) -> Option<SharedGenerator> {
		if let Some(generator) = self.by_type.get(&ty.id()) {
			return Some(Arc::clone(generator));
		}
		ty.empty()
			.map(|empty| Arc::new(EmptyCollection(empty)) as SharedGenerator)
	}
}

impl std::fmt::Debug for GeneratorTable {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("GeneratorTable")
			.field("types", &self.by_type.len())
			.finish()
	}
}

#[cfg(test)]
mod tests;
