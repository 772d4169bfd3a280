//! Canonical property names.
//!
//! A field `count`, a setter `setCount` and an appender `addCount` all resolve to
//! the property `count`. Every function here is pure and total.

const SETTER_PREFIX: &str = "set";
const APPEND_PREFIX: &str = "add";

/// Lowercases `member` and strips a leading `set` or `add`.
///
/// The prefix is only stripped when something follows it, so `set` and `add`
/// canonicalise to themselves.
pub fn canonical_name(member: &str) -> String {
	let lower = member.to_lowercase();
	let prefixed = lower.starts_with(SETTER_PREFIX) || lower.starts_with(APPEND_PREFIX);
	if prefixed && lower.len() > SETTER_PREFIX.len() {
		lower[SETTER_PREFIX.len()..].to_owned()
	} else {
		lower
	}
}

/// Pluralised property name an append method is expected to fill.
pub fn append_canonical_name(member: &str) -> String {
	let mut name = canonical_name(member);
	name.push('s');
	name
}

/// Fields carry no prefix; they are only case-folded.
pub fn field_canonical_name(field: &str) -> String {
	field.to_lowercase()
}

pub fn has_setter_prefix(member: &str) -> bool {
	starts_with_ignore_case(member, SETTER_PREFIX)
}

pub fn has_append_prefix(member: &str) -> bool {
	starts_with_ignore_case(member, APPEND_PREFIX)
}

/// Methods named `set*` or `add*` are candidates for discovery.
pub fn is_qualifying_name(member: &str) -> bool {
	has_setter_prefix(member) || has_append_prefix(member)
}

fn starts_with_ignore_case(name: &str, prefix: &str) -> bool {
	name.get(..prefix.len())
		.is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}
