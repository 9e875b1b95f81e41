//! # Boxwood
//!
//! A runtime dependency-injection container with named, isolated containers.
//!
//! This crate re-exports the engine in [`boxwood_di`] and adds a [`prelude`]
//! for the common imports.
//!
//! ## Quick Example
//!
//! ```rust
//! use boxwood::prelude::*;
//! use std::sync::Arc;
//!
//! trait Clock: Send + Sync {
//!     fn now(&self) -> u64;
//! }
//!
//! struct FixedClock(u64);
//!
//! impl Clock for FixedClock {
//!     fn now(&self) -> u64 {
//!         self.0
//!     }
//! }
//!
//! struct Scheduler {
//!     clock: Arc<dyn Clock>,
//! }
//!
//! let directory = Directory::new();
//! let container = directory.container("scheduler");
//! container
//!     .register_as::<dyn Clock, _, _>(Scope::Single, |_, ()| Ok(Arc::new(FixedClock(7))))
//!     .register(Scope::Factory, |c, ()| {
//!         Ok(Scheduler {
//!             clock: c.try_get::<dyn Clock>()?,
//!         })
//!     });
//!
//! let scheduler = container.get::<Scheduler>().unwrap();
//! assert_eq!(scheduler.clock.now(), 7);
//! ```
//!
//! ## Process-wide containers
//!
//! [`global`] holds a lazily built [`Directory`] configured from the
//! environment (see [`DiSettings::from_env`]); [`Container::new`] returns a
//! container from it.

pub use boxwood_di;

pub use boxwood_di::{
	Arg, ArgList, Container, ContainerCore, DefaultContainerId, DependencyKey, DiError, DiResult,
	DiSettings, Directory, ErasedInstance, FactoryFn, FromArg, GLOBAL_CONTAINER_ID, IntoArgs,
	NO_ARGUMENT, Params, Registration, Resolution, Scope, Unbound, global, impl_from_arg,
};

/// Common imports.
pub mod prelude {
	pub use boxwood_di::{
		Container, DependencyKey, DiError, DiResult, Directory, FromArg, IntoArgs, Scope, global,
		impl_from_arg,
	};
}
