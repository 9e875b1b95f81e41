//! Resolution requests
//!
//! [`Resolution`] is the request builder behind every `get` call. It derives
//! the dependency key, applies the scope policy, and either reports failures
//! ([`try_get`](Resolution::try_get)) or logs them and yields `None`
//! ([`get`](Resolution::get)).
//!
//! Single-scope resolution is check-then-act: two threads missing the cache
//! at the same time both run the factory, and the last write wins the cache.
//!
//! # Examples
//!
//! ```
//! use boxwood_di::{Directory, DependencyKey, Scope};
//!
//! let container = Directory::new().container("doc");
//! container.register_at(
//!     DependencyKey::named("greeting"),
//!     Scope::Single,
//!     |_, (name, punctuation): (String, Option<char>)| {
//!         Ok(format!("hello {name}{}", punctuation.unwrap_or('.')))
//!     },
//! );
//!
//! let greeting = container
//!     .resolve::<String>()
//!     .key("greeting")
//!     .scope(Scope::Factory)
//!     .args(("ada".to_string(),))
//!     .get()
//!     .unwrap();
//! assert_eq!(*greeting, "hello ada.");
//! ```

use crate::args::{Arg, ArgList, IntoArgs};
use crate::container::Container;
use crate::error::{DiError, DiResult};
use crate::key::{DependencyKey, type_label};
use crate::logging::di_event;
use crate::registration::downcast_instance;
use crate::scope::Scope;
use std::marker::PhantomData;
use std::sync::Arc;

/// A pending request for a `T`.
#[must_use = "a resolution does nothing until `get` or `try_get` is called"]
pub struct Resolution<'c, T: ?Sized> {
	container: &'c Container,
	key: Option<DependencyKey>,
	scope: Option<Scope>,
	args: ArgList,
	_marker: PhantomData<fn() -> Arc<T>>,
}

impl<'c, T: ?Sized + Send + Sync + 'static> Resolution<'c, T> {
	pub(crate) fn new(container: &'c Container) -> Self {
		Self {
			container,
			key: None,
			scope: None,
			args: ArgList::new(),
			_marker: PhantomData,
		}
	}

	/// Looks up an explicit key instead of the key of `T`.
	pub fn key(mut self, key: impl Into<DependencyKey>) -> Self {
		self.key = Some(key.into());
		self
	}

	/// Looks up the key of `K` instead of the key of `T`.
	pub fn expect<K: ?Sized>(self) -> Self {
		self.key(DependencyKey::of::<K>())
	}

	/// Overrides the registration's scope for this request.
	pub fn scope(mut self, scope: Scope) -> Self {
		self.scope = Some(scope);
		self
	}

	/// Replaces the arguments with `args`.
	pub fn args(mut self, args: impl IntoArgs) -> Self {
		self.args = args.into_args();
		self
	}

	/// Appends one argument.
	pub fn arg<V: 'static>(mut self, value: V) -> Self {
		self.args.push(Arg::value(value));
		self
	}

	/// Appends an omitted argument, bound as `None` by optional parameters.
	pub fn missing(mut self) -> Self {
		self.args.push(Arg::Missing);
		self
	}

	/// Resolves, logging any failure and returning `None` in its place.
	///
	/// Type mismatches are logged at debug level only, so one key can be
	/// tried with several candidate types.
	pub fn get(self) -> Option<Arc<T>> {
		let container = self.container;
		match self.try_get() {
			Ok(value) => Some(value),
			Err(err @ DiError::TypeMismatch { .. }) => {
				di_event!(container.log(), debug, container = %container.id(), "{err}");
				None
			}
			Err(err) => {
				di_event!(container.log(), error, container = %container.id(), "{err}");
				None
			}
		}
	}

	/// Resolves, reporting any failure.
	pub fn try_get(self) -> DiResult<Arc<T>> {
		let Self {
			container,
			key,
			scope,
			args,
			..
		} = self;
		let key = key.unwrap_or_else(DependencyKey::of::<T>);
		let core = container.core();

		let Some(registration) = core.get_registration(&key) else {
			return Err(not_registered::<T>(container, &args));
		};

		if !registration.produces::<T>() {
			return Err(type_mismatch::<T>(container, &key, registration.result_label()));
		}

		let scope = scope.unwrap_or(registration.scope());
		if scope.is_cached() {
			if let Some(cached) = core.get_cached(&key) {
				di_event!(container.log(), debug, container = %container.id(), key = %key, "cache hit");
				return downcast_instance::<T>(&cached)
					.ok_or_else(|| type_mismatch::<T>(container, &key, "a cached instance of another type"));
			}
		}

		let instance = registration.invoke(container, &key, args)?;
		let value = downcast_instance::<T>(&instance)
			.ok_or_else(|| type_mismatch::<T>(container, &key, registration.result_label()))?;
		if scope.is_cached() {
			core.set_cached(key, instance);
		}
		Ok(value)
	}
}

fn not_registered<T: ?Sized>(container: &Container, args: &ArgList) -> DiError {
	let expected = type_label::<T>();
	let (actual, actual_args) = match container.core().find_producer(&expected) {
		Some((_, registration)) => (
			Some(registration.result_label().to_string()),
			registration.arg_labels().to_vec(),
		),
		None => (None, Vec::new()),
	};
	DiError::NotRegistered {
		container_id: container.id().to_string(),
		expected,
		expected_args: args.labels(),
		actual,
		actual_args,
	}
}

fn type_mismatch<T: ?Sized>(container: &Container, key: &DependencyKey, actual: &str) -> DiError {
	DiError::TypeMismatch {
		container_id: container.id().to_string(),
		key: key.to_string(),
		expected: type_label::<T>(),
		actual: actual.to_string(),
	}
}
