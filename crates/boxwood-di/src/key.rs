//! Dependency keys
//!
//! A [`DependencyKey`] is the canonical string joining a container's
//! registration map and its cache. Keys derived from types are normalized so
//! that wrapper noise does not split one logical type into several keys:
//!
//! - `Option<T>` (any depth) keys as `T`
//! - `PhantomData<T>`, the "type of `T`" marker, keys as `T`
//! - `dyn Trait + Send + Sync` keys as `Trait`
//!
//! # Examples
//!
//! ```
//! use boxwood_di::DependencyKey;
//! use std::marker::PhantomData;
//!
//! struct Database;
//!
//! let key = DependencyKey::of::<Database>();
//! assert_eq!(key, DependencyKey::of::<Option<Database>>());
//! assert_eq!(key, DependencyKey::of::<Option<Option<Database>>>());
//! assert_eq!(key, DependencyKey::of::<PhantomData<Database>>());
//! ```

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

/// Key of the unit type, standing for "no argument".
///
/// Labels normalizing to this key are left out of argument-list renderings.
pub const NO_ARGUMENT: &str = "()";

const WRAPPERS: &[&str] = &[
	"core::option::Option<",
	"std::option::Option<",
	"core::marker::PhantomData<",
	"std::marker::PhantomData<",
];

/// Canonical identifier of a registration inside a container.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DependencyKey(Arc<str>);

impl DependencyKey {
	/// Derives the key for a type.
	pub fn of<T: ?Sized>() -> Self {
		Self(Arc::from(normalize(std::any::type_name::<T>())))
	}

	/// Derives the key for the static type of a value.
	pub fn of_val<T: ?Sized>(_value: &T) -> Self {
		Self::of::<T>()
	}

	/// Creates an explicit key, used verbatim.
	///
	/// Explicit keys let one result type carry several registrations, for
	/// example one per argument shape.
	///
	/// ```
	/// use boxwood_di::DependencyKey;
	///
	/// let key = DependencyKey::named("greeter.required-name");
	/// assert_eq!(key.as_str(), "greeter.required-name");
	/// ```
	pub fn named(name: impl Into<String>) -> Self {
		Self(Arc::from(name.into()))
	}

	/// Returns the key as a string slice.
	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// Returns `true` for the unit "no argument" key.
	pub fn is_no_argument(&self) -> bool {
		&*self.0 == NO_ARGUMENT
	}
}

impl fmt::Display for DependencyKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl fmt::Debug for DependencyKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "DependencyKey({:?})", &*self.0)
	}
}

impl Borrow<str> for DependencyKey {
	fn borrow(&self) -> &str {
		&self.0
	}
}

impl From<&str> for DependencyKey {
	fn from(name: &str) -> Self {
		Self::named(name)
	}
}

impl From<String> for DependencyKey {
	fn from(name: String) -> Self {
		Self::named(name)
	}
}

/// Returns the diagnostic label of a type.
///
/// Labels are the raw type names; only keys are normalized.
pub fn type_label<T: ?Sized>() -> String {
	std::any::type_name::<T>().to_string()
}

/// Returns `true` if a label stands for "no argument" (`()` or `Option<()>`).
pub fn is_no_argument_label(label: &str) -> bool {
	normalize(label) == NO_ARGUMENT
}

/// Normalizes a type name into key form.
pub fn normalize(type_name: &str) -> String {
	let mut current = type_name.trim();
	loop {
		let stripped = strip_dyn(current);
		match unwrap_wrapper(stripped) {
			Some(inner) => current = inner.trim(),
			None => return stripped.to_string(),
		}
	}
}

fn unwrap_wrapper(name: &str) -> Option<&str> {
	WRAPPERS.iter().find_map(|prefix| {
		name.strip_prefix(*prefix)
			.and_then(|rest| rest.strip_suffix('>'))
	})
}

// `dyn A + B + C` keeps only the principal trait `A`.
fn strip_dyn(name: &str) -> &str {
	let Some(rest) = name.strip_prefix("dyn ") else {
		return name;
	};
	let mut depth = 0usize;
	for (idx, ch) in rest.char_indices() {
		match ch {
			'<' | '(' | '[' => depth += 1,
			'>' | ')' | ']' => depth = depth.saturating_sub(1),
			'+' if depth == 0 => return rest[..idx].trim_end(),
			_ => {}
		}
	}
	rest.trim_end()
}
