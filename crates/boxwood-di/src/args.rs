//! Type-erased argument forwarding
//!
//! Callers supply arguments as a tuple ([`IntoArgs`]); factories declare their
//! parameters as a tuple of [`FromArg`] types ([`Params`]). In between, the
//! values travel as an [`ArgList`] of [`Arg`]s and are bound back, in order,
//! when the factory runs.
//!
//! A position the caller leaves out arrives as [`Arg::Missing`]. Only an
//! optional parameter accepts it (as `None`); a required parameter fails to
//! bind, which is how optional-argument defaulting works.
//!
//! ```
//! use boxwood_di::{IntoArgs, Params};
//!
//! let args = ("ada".to_string(),).into_args();
//! let (name, age) = <(String, Option<u32>)>::extract(args).unwrap();
//! assert_eq!(name, "ada");
//! assert_eq!(age, None);
//!
//! let missing = <(String,)>::extract(().into_args());
//! assert!(missing.is_err());
//! ```

use crate::key::{is_no_argument_label, type_label};
use std::any::Any;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// One type-erased argument.
pub enum Arg {
	/// The caller did not supply this position.
	Missing,
	/// A supplied value together with the label of its type.
	Value {
		/// The erased value.
		value: Box<dyn Any>,
		/// Type label captured when the value was erased.
		label: &'static str,
	},
}

impl Arg {
	/// Erases a value.
	pub fn value<T: 'static>(value: T) -> Self {
		Arg::Value {
			value: Box::new(value),
			label: std::any::type_name::<T>(),
		}
	}

	/// Returns `true` if the caller omitted this position.
	pub fn is_missing(&self) -> bool {
		matches!(self, Arg::Missing)
	}

	/// Returns the label of the supplied value.
	pub fn label(&self) -> Option<&'static str> {
		match self {
			Arg::Missing => None,
			Arg::Value { label, .. } => Some(label),
		}
	}

	/// Recovers the concrete value, handing the argument back on mismatch.
	pub fn downcast<T: 'static>(self) -> Result<T, Arg> {
		match self {
			Arg::Missing => Err(Arg::Missing),
			Arg::Value { value, label } => match value.downcast::<T>() {
				Ok(value) => Ok(*value),
				Err(value) => Err(Arg::Value { value, label }),
			},
		}
	}
}

impl std::fmt::Debug for Arg {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Arg::Missing => f.write_str("Missing"),
			Arg::Value { label, .. } => f.debug_tuple("Value").field(label).finish(),
		}
	}
}

/// Ordered list of erased arguments.
#[derive(Debug, Default)]
pub struct ArgList(Vec<Arg>);

impl ArgList {
	/// Creates an empty list.
	pub fn new() -> Self {
		Self(Vec::new())
	}

	/// Appends an argument.
	pub fn push(&mut self, arg: Arg) {
		self.0.push(arg);
	}

	/// Number of positions, missing ones included.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns `true` if no position was supplied.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Labels of the supplied values, for diagnostics.
	///
	/// Missing positions and unit values are left out.
	pub fn labels(&self) -> Vec<String> {
		self.0
			.iter()
			.filter_map(Arg::label)
			.filter(|label| !is_no_argument_label(label))
			.map(str::to_string)
			.collect()
	}
}

impl From<Vec<Arg>> for ArgList {
	fn from(args: Vec<Arg>) -> Self {
		Self(args)
	}
}

impl IntoIterator for ArgList {
	type Item = Arg;
	type IntoIter = std::vec::IntoIter<Arg>;

	fn into_iter(self) -> Self::IntoIter {
		self.0.into_iter()
	}
}

/// Types a factory parameter can be bound to.
///
/// Implemented for `Option<T>` (accepting a missing argument as `None`), for
/// the common std types, and for user types through [`impl_from_arg!`].
///
/// [`impl_from_arg!`]: crate::impl_from_arg
pub trait FromArg: Sized + 'static {
	/// Binds the argument, handing it back if it does not fit.
	fn from_arg(arg: Arg) -> Result<Self, Arg>;

	/// Label of the parameter type, for diagnostics.
	fn label() -> String {
		type_label::<Self>()
	}
}

impl<T: FromArg> FromArg for Option<T> {
	fn from_arg(arg: Arg) -> Result<Self, Arg> {
		if arg.is_missing() {
			return Ok(None);
		}
		match arg.downcast::<Option<T>>() {
			Ok(value) => Ok(value),
			Err(arg) => T::from_arg(arg).map(Some),
		}
	}
}

impl FromArg for String {
	fn from_arg(arg: Arg) -> Result<Self, Arg> {
		match arg.downcast::<String>() {
			Ok(value) => Ok(value),
			Err(arg) => arg.downcast::<&'static str>().map(str::to_string),
		}
	}
}

impl<T: ?Sized + 'static> FromArg for Arc<T> {
	fn from_arg(arg: Arg) -> Result<Self, Arg> {
		arg.downcast::<Self>()
	}
}

impl<T: ?Sized + 'static> FromArg for Box<T> {
	fn from_arg(arg: Arg) -> Result<Self, Arg> {
		arg.downcast::<Self>()
	}
}

impl<T: 'static> FromArg for Vec<T> {
	fn from_arg(arg: Arg) -> Result<Self, Arg> {
		arg.downcast::<Self>()
	}
}

impl<K: 'static, V: 'static, S: 'static> FromArg for HashMap<K, V, S> {
	fn from_arg(arg: Arg) -> Result<Self, Arg> {
		arg.downcast::<Self>()
	}
}

impl<K: 'static, V: 'static> FromArg for BTreeMap<K, V> {
	fn from_arg(arg: Arg) -> Result<Self, Arg> {
		arg.downcast::<Self>()
	}
}

/// Implements [`FromArg`] for concrete types by exact downcast.
///
/// ```
/// use boxwood_di::{Arg, FromArg, impl_from_arg};
///
/// #[derive(Debug, PartialEq)]
/// struct Port(u16);
/// impl_from_arg!(Port);
///
/// assert_eq!(Port::from_arg(Arg::value(Port(8080))).unwrap(), Port(8080));
/// assert!(Port::from_arg(Arg::Missing).is_err());
/// ```
#[macro_export]
macro_rules! impl_from_arg {
	($($ty:ty),* $(,)?) => {
		$(
			impl $crate::FromArg for $ty {
				fn from_arg(arg: $crate::Arg) -> ::std::result::Result<Self, $crate::Arg> {
					arg.downcast::<Self>()
				}
			}
		)*
	};
}

impl_from_arg!(
	(),
	bool,
	char,
	i8,
	i16,
	i32,
	i64,
	i128,
	isize,
	u8,
	u16,
	u32,
	u64,
	u128,
	usize,
	f32,
	f64,
	&'static str,
	std::path::PathBuf,
	std::time::Duration,
	crate::key::DependencyKey,
);

/// A parameter that could not be bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unbound {
	/// Zero-based parameter position.
	pub position: usize,
	/// Declared parameter label.
	pub expected: String,
	/// Label of the supplied value, `None` when the argument was omitted.
	pub supplied: Option<String>,
}

/// A factory's declared parameter list: a tuple of [`FromArg`] types.
pub trait Params: Sized + 'static {
	/// Labels of the declared parameters, in order.
	fn labels() -> Vec<String>;

	/// Binds the supplied arguments, in order.
	///
	/// Positions beyond the declared arity are ignored.
	fn extract(args: ArgList) -> Result<Self, Unbound>;
}

/// Values a caller can pass as arguments: tuples of `'static` values.
pub trait IntoArgs {
	/// Erases the values into an [`ArgList`].
	fn into_args(self) -> ArgList;
}

impl IntoArgs for ArgList {
	fn into_args(self) -> ArgList {
		self
	}
}

impl IntoArgs for Vec<Arg> {
	fn into_args(self) -> ArgList {
		ArgList::from(self)
	}
}

fn bind<A: FromArg>(arg: Arg, position: usize) -> Result<A, Unbound> {
	A::from_arg(arg).map_err(|arg| Unbound {
		position,
		expected: A::label(),
		supplied: arg.label().map(str::to_string),
	})
}

macro_rules! impl_arity {
	($($ty:ident $var:ident),*) => {
		impl<$($ty: FromArg),*> Params for ($($ty,)*) {
			fn labels() -> Vec<String> {
				vec![$($ty::label()),*]
			}

			#[allow(unused_mut, unused_variables, unused_assignments)]
			fn extract(args: ArgList) -> Result<Self, Unbound> {
				let mut args = args.into_iter();
				let mut position = 0usize;
				Ok(($(
					{
						let $var = bind::<$ty>(args.next().unwrap_or(Arg::Missing), position)?;
						position += 1;
						$var
					},
				)*))
			}
		}

		impl<$($ty: 'static),*> IntoArgs for ($($ty,)*) {
			fn into_args(self) -> ArgList {
				let ($($var,)*) = self;
				ArgList::from(vec![$(Arg::value($var)),*])
			}
		}
	};
}

impl_arity!();
impl_arity!(A a);
impl_arity!(A a, B b);
impl_arity!(A a, B b, C c);
impl_arity!(A a, B b, C c, D d);
impl_arity!(A a, B b, C c, D d, E e);
impl_arity!(A a, B b, C c, D d, E e, F f);
impl_arity!(A a, B b, C c, D d, E e, F f, G g);
impl_arity!(A a, B b, C c, D d, E e, F f, G g, H h);
