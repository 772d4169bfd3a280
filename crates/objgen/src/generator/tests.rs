use objgen_reflect::TypeDesc;

use super::*;

fn generate_with<T: Clone + 'static>(lookup: &dyn GeneratorLookup) -> Option<T> {
	let generator = lookup.generator_for(&TypeDesc::of::<T>())?;
	let value = generator.generate().ok()?;
	(*value).downcast_ref::<T>().cloned()
}

/// Explicit entries win and replace earlier ones for the same type.
#[test]
fn test_table_insert_replaces() {
	let table = GeneratorTable::new()
		.with::<u32>(Constant(1u32))
		.with::<u32>(Constant(2u32));
	assert_eq!(table.len(), 1);
	assert_eq!(generate_with::<u32>(&table), Some(2));
}

/// Unknown scalar types have no generator.
#[test]
fn test_table_unknown_scalar() {
	let table = GeneratorTable::new();
	assert!(table.is_empty());
	assert!(table.generator_for(&TypeDesc::of::<u8>()).is_none());
}

/// Collections fall back to an empty container.
#[test]
fn test_table_collection_fallback() {
	let table = GeneratorTable::new();
	let ty = TypeDesc::collection::<Vec<u8>, u8>();
	let value = table.generator_for(&ty).expect("collection fallback").generate().unwrap();
	assert_eq!((*value).downcast_ref::<Vec<u8>>(), Some(&Vec::new()));
}

/// Defaults cover primitives and produce non-empty alphanumeric strings.
#[test]
fn test_defaults() {
	let table = GeneratorTable::with_defaults();
	assert!(generate_with::<i64>(&table).is_some());
	assert!(generate_with::<bool>(&table).is_some());
	assert!(generate_with::<usize>(&table).is_some());
	for _ in 0..32 {
		let text = generate_with::<String>(&table).expect("string generator");
		assert!((1..=MAX_STRING_LEN).contains(&text.len()));
		assert!(text.chars().all(|c| c.is_ascii_alphanumeric()));
	}
}

/// Closures act as both generators and lookups.
#[test]
fn test_closure_lookup() {
	let lookup = |ty: &TypeDesc| -> Option<SharedGenerator> {
		ty.is::<u16>().then(|| Arc::new(|| 7u16) as SharedGenerator)
	};
	assert_eq!(generate_with::<u16>(&lookup), Some(7));
	assert_eq!(generate_with::<u32>(&lookup), None);
}

/// Fallible closures report their error instead of a value.
#[test]
fn test_fallible_generator() {
	let ok = Fallible(|| Ok::<_, String>(3i8));
	let value = ok.generate().unwrap();
	assert_eq!((*value).downcast_ref::<i8>(), Some(&3));

	let failing = Fallible(|| Err::<i8, _>("no more ids"));
	assert_eq!(
		failing.generate().unwrap_err(),
		GenerateError::new("no more ids")
	);
}
