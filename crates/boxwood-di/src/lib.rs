//! # Boxwood Dependency Injection
//!
//! A runtime dependency-injection container. Factories are registered under
//! a key derived from the type they produce; resolution looks the key up,
//! runs the factory, and applies the registration's scope.
//!
//! ## Features
//!
//! - **Scoped**: `Factory` builds a fresh value per resolution, `Single`
//!   builds once per container and caches it
//! - **Named containers**: any number of isolated containers in a
//!   [`Directory`], plus a default one
//! - **Arguments**: factories declare a parameter tuple; optional parameters
//!   accept omitted arguments
//! - **Trait objects**: `dyn Trait` registrations via
//!   [`Container::register_as`]
//! - **Recoverable**: [`Container::get`] logs failures and yields `None`;
//!   [`Container::try_get`] reports them as [`DiError`]
//!
//! ## Example
//!
//! ```rust
//! use boxwood_di::{Directory, Scope};
//! use std::sync::Arc;
//!
//! struct ClassA;
//!
//! struct ClassB {
//!     class_a: Arc<ClassA>,
//! }
//!
//! let directory = Directory::new();
//! let container = directory.container("R1");
//! container
//!     .register(Scope::Single, |_, ()| Ok(ClassA))
//!     .register(Scope::Factory, |c, ()| {
//!         Ok(ClassB {
//!             class_a: c.try_get::<ClassA>()?,
//!         })
//!     });
//!
//! let a = container.get::<ClassA>().unwrap();
//! let b = container.get::<ClassB>().unwrap();
//! assert!(Arc::ptr_eq(&a, &b.class_a));
//!
//! assert!(directory.container("R2").get::<ClassA>().is_none());
//! ```
//!
//! ## Arguments
//!
//! ```rust
//! use boxwood_di::{Directory, Scope};
//!
//! struct Greeter {
//!     name: String,
//! }
//!
//! let container = Directory::new().container("args");
//! container
//!     .register_at("greeter.required", Scope::Factory, |_, (name,): (String,)| {
//!         Ok(Greeter { name })
//!     })
//!     .register_at("greeter.optional", Scope::Factory, |_, (name,): (Option<String>,)| {
//!         Ok(Greeter { name: name.unwrap_or_else(|| "anonymous".to_string()) })
//!     });
//!
//! let named = container.resolve::<Greeter>().key("greeter.required").arg("ada").get();
//! assert_eq!(named.unwrap().name, "ada");
//!
//! let anonymous = container.resolve::<Greeter>().key("greeter.optional").get();
//! assert_eq!(anonymous.unwrap().name, "anonymous");
//!
//! assert!(container.resolve::<Greeter>().key("greeter.required").get().is_none());
//! ```

pub mod args;
pub mod container;
pub mod directory;
pub mod error;
pub mod global;
pub mod key;
pub mod registration;
pub mod resolution;
pub mod scope;
pub mod settings;

mod logging;

pub use args::{Arg, ArgList, FromArg, IntoArgs, Params, Unbound};
pub use container::{Container, ContainerCore};
pub use directory::Directory;
pub use error::{DiError, DiResult};
pub use key::{DependencyKey, NO_ARGUMENT};
pub use registration::{ErasedInstance, FactoryFn, Registration};
pub use resolution::Resolution;
pub use scope::Scope;
pub use settings::{DefaultContainerId, DiSettings, GLOBAL_CONTAINER_ID};
