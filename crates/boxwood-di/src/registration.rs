//! Registrations
//!
//! A [`Registration`] records how to produce a dependency: its scope, the
//! labels used in diagnostics, and a type-erased factory.

use crate::args::{ArgList, Params, Unbound};
use crate::container::Container;
use crate::error::{DiError, DiResult};
use crate::key::{DependencyKey, is_no_argument_label, type_label};
use crate::scope::Scope;
use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

/// A produced value with its type erased.
///
/// The concrete type behind the `dyn Any` is always `Arc<T>`, so trait-object
/// results survive erasure and come back out via `downcast_ref::<Arc<T>>()`.
pub type ErasedInstance = Arc<dyn Any + Send + Sync>;

/// Failure of an erased factory invocation, before the key is known.
pub(crate) enum Invocation {
	Unbound(Unbound),
	Failed(DiError),
}

type FactoryInner = Arc<dyn Fn(&Container, ArgList) -> Result<ErasedInstance, Invocation> + Send + Sync>;

/// Wrapper type for erased factory functions
pub struct FactoryFn(FactoryInner);

impl FactoryFn {
	/// Wraps a typed factory, binding its parameters on each call.
	pub fn new<T, A, F>(factory: F) -> Self
	where
		T: ?Sized + Send + Sync + 'static,
		A: Params,
		F: Fn(&Container, A) -> DiResult<Arc<T>> + Send + Sync + 'static,
	{
		Self(Arc::new(move |container: &Container, args: ArgList| {
			let params = A::extract(args).map_err(Invocation::Unbound)?;
			let value = factory(container, params).map_err(Invocation::Failed)?;
			Ok(Arc::new(value) as ErasedInstance)
		}))
	}

	pub(crate) fn call(&self, container: &Container, args: ArgList) -> Result<ErasedInstance, Invocation> {
		(self.0)(container, args)
	}
}

impl Clone for FactoryFn {
	fn clone(&self) -> Self {
		Self(Arc::clone(&self.0))
	}
}

/// How to produce one dependency.
#[derive(Clone)]
pub struct Registration {
	scope: Scope,
	result_label: String,
	arg_labels: Vec<String>,
	result_type: TypeId,
	factory: FactoryFn,
}

impl Registration {
	/// Creates a registration from a factory producing `Arc<T>`.
	///
	/// `T` may be unsized, e.g. `dyn Trait + Send + Sync`.
	pub fn new<T, A, F>(scope: Scope, factory: F) -> Self
	where
		T: ?Sized + Send + Sync + 'static,
		A: Params,
		F: Fn(&Container, A) -> DiResult<Arc<T>> + Send + Sync + 'static,
	{
		Self {
			scope,
			result_label: type_label::<T>(),
			arg_labels: A::labels()
				.into_iter()
				.filter(|label| !is_no_argument_label(label))
				.collect(),
			result_type: TypeId::of::<Arc<T>>(),
			factory: FactoryFn::new(factory),
		}
	}

	/// Default scope of this registration.
	pub fn scope(&self) -> Scope {
		self.scope
	}

	/// Label of the produced type.
	pub fn result_label(&self) -> &str {
		&self.result_label
	}

	/// Labels of the declared parameters, unit placeholders excluded.
	pub fn arg_labels(&self) -> &[String] {
		&self.arg_labels
	}

	/// Returns `true` if the registration produces `Arc<T>`.
	pub fn produces<T: ?Sized + 'static>(&self) -> bool {
		self.result_type == TypeId::of::<Arc<T>>()
	}

	/// Invokes the factory with the supplied arguments.
	pub fn invoke(
		&self,
		container: &Container,
		key: &DependencyKey,
		args: ArgList,
	) -> DiResult<ErasedInstance> {
		self.factory.call(container, args).map_err(|failure| match failure {
			Invocation::Unbound(unbound) => DiError::BindingMismatch {
				container_id: container.id().to_string(),
				key: key.to_string(),
				position: unbound.position,
				expected: unbound.expected,
				supplied: unbound.supplied,
			},
			Invocation::Failed(err) => err,
		})
	}

	/// One-line description used by registration listings.
	pub fn describe(&self, key: &DependencyKey) -> String {
		if self.arg_labels.is_empty() {
			format!("{key} => {} [{}]", self.result_label, self.scope)
		} else {
			format!(
				"{key} => {} ({}) [{}]",
				self.result_label,
				self.arg_labels.join(", "),
				self.scope
			)
		}
	}
}

impl fmt::Debug for Registration {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Registration")
			.field("scope", &self.scope)
			.field("result_label", &self.result_label)
			.field("arg_labels", &self.arg_labels)
			.finish_non_exhaustive()
	}
}

/// Recovers a typed handle from an erased instance.
pub(crate) fn downcast_instance<T: ?Sized + Send + Sync + 'static>(
	instance: &ErasedInstance,
) -> Option<Arc<T>> {
	instance.downcast_ref::<Arc<T>>().cloned()
}
