//! Container directory
//!
//! A [`Directory`] maps container identifiers to containers. Every lookup and
//! mutation goes through one mutex, so directory operations are totally
//! ordered across threads. Each directory is independent: tests can build
//! their own instead of sharing the process-wide one in [`crate::global`].
//!
//! # Examples
//!
//! ```
//! use boxwood_di::{Directory, Scope};
//!
//! let directory = Directory::new();
//! let r1 = directory.container("R1");
//! let r2 = directory.container("R2");
//!
//! r1.register(Scope::Factory, |_, ()| Ok(42u32));
//!
//! assert_eq!(*r1.get::<u32>().unwrap(), 42);
//! assert!(r2.get::<u32>().is_none());
//! assert!(directory.container("R1").same_container(&r1));
//! ```

use crate::container::{Container, ContainerCore};
use crate::error::{DiError, DiResult};
use crate::logging::{LogSwitch, di_event};
use crate::settings::DiSettings;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

pub(crate) struct DirectoryInner {
	containers: Mutex<HashMap<String, Arc<ContainerCore>>>,
	default_id: String,
	settings: DiSettings,
	log: LogSwitch,
}

impl DirectoryInner {
	/// Removes `core` from the map if it is still the one registered under its
	/// identifier.
	pub(crate) fn remove_core(&self, core: &Arc<ContainerCore>) {
		let mut containers = self.containers.lock();
		if containers
			.get(core.id())
			.is_some_and(|current| Arc::ptr_eq(current, core))
		{
			containers.remove(core.id());
		}
	}
}

/// Registry of named containers.
///
/// Cloning is cheap; clones share the same map.
#[derive(Clone)]
pub struct Directory {
	inner: Arc<DirectoryInner>,
}

impl Directory {
	/// Creates a directory with default settings.
	pub fn new() -> Self {
		Self::with_settings(DiSettings::default())
	}

	/// Creates a directory with the given settings.
	pub fn with_settings(settings: DiSettings) -> Self {
		let default_id = settings.default_container.resolve();
		let log = LogSwitch::new(settings.logging_enabled);
		Self {
			inner: Arc::new(DirectoryInner {
				containers: Mutex::new(HashMap::new()),
				default_id,
				settings,
				log,
			}),
		}
	}

	pub(crate) fn from_inner(inner: Arc<DirectoryInner>) -> Self {
		Self { inner }
	}

	fn handle(&self, core: Arc<ContainerCore>) -> Container {
		Container::attached(core, Arc::downgrade(&self.inner), self.inner.log.clone())
	}

	pub(crate) fn log(&self) -> &LogSwitch {
		&self.inner.log
	}

	/// Settings this directory was built with.
	pub fn settings(&self) -> &DiSettings {
		&self.inner.settings
	}

	/// Returns the container registered under `id`, creating it if absent.
	pub fn container(&self, id: impl Into<String>) -> Container {
		let id = id.into();
		let mut containers = self.inner.containers.lock();
		if let Some(core) = containers.get(&id) {
			return self.handle(Arc::clone(core));
		}
		let core = Arc::new(ContainerCore::new(id.clone()));
		containers.insert(id, Arc::clone(&core));
		drop(containers);
		di_event!(self.inner.log, info, container = %core.id(), "created container");
		self.handle(core)
	}

	/// Returns the container registered under `id`, if any.
	pub fn lookup(&self, id: &str) -> Option<Container> {
		let core = self.inner.containers.lock().get(id).cloned()?;
		Some(self.handle(core))
	}

	/// Like [`lookup`](Self::lookup), reporting an unknown identifier.
	pub fn try_lookup(&self, id: &str) -> DiResult<Container> {
		self.lookup(id)
			.ok_or_else(|| DiError::ContainerNotFound(id.to_string()))
	}

	/// Adds a container under its own identifier.
	///
	/// If the identifier is taken, the error is logged and the existing
	/// container is kept and returned. Otherwise the returned handle is
	/// the given container, now attached to this directory.
	///
	/// Only the returned handle knows the directory. The handle passed in
	/// still shares registrations and cache, but its
	/// [`drop_completely`](Container::drop_completely) leaves the directory
	/// entry in place.
	pub fn register(&self, container: &Container) -> Container {
		match self.try_register(container) {
			Ok(attached) => attached,
			Err(err) => {
				di_event!(self.inner.log, error, container = %container.id(), "{err}");
				let existing = self.inner.containers.lock().get(container.id()).cloned();
				match existing {
					Some(core) => self.handle(core),
					// Removed between the two lock scopes.
					None => self.register(container),
				}
			}
		}
	}

	/// Adds a container, failing if its identifier is taken.
	pub fn try_register(&self, container: &Container) -> DiResult<Container> {
		let mut containers = self.inner.containers.lock();
		if containers.contains_key(container.id()) {
			return Err(DiError::DuplicateContainerRegistration(container.id().to_string()));
		}
		containers.insert(container.id().to_string(), Arc::clone(container.core_arc()));
		drop(containers);
		di_event!(self.inner.log, info, container = %container.id(), "registered container");
		Ok(self.handle(Arc::clone(container.core_arc())))
	}

	/// Removes the container registered under `id`.
	///
	/// Existing handles keep working but are no longer reachable by lookup.
	pub fn remove(&self, id: &str) -> Option<Container> {
		let core = self.inner.containers.lock().remove(id)?;
		di_event!(self.inner.log, info, container = %id, "removed container");
		Some(self.handle(core))
	}

	/// Returns `true` if a container is registered under `id`.
	pub fn contains(&self, id: &str) -> bool {
		self.inner.containers.lock().contains_key(id)
	}

	/// Registered identifiers, sorted.
	pub fn ids(&self) -> Vec<String> {
		let mut ids: Vec<_> = self.inner.containers.lock().keys().cloned().collect();
		ids.sort();
		ids
	}

	/// Number of registered containers.
	pub fn len(&self) -> usize {
		self.inner.containers.lock().len()
	}

	/// Returns `true` if no container is registered.
	pub fn is_empty(&self) -> bool {
		self.inner.containers.lock().is_empty()
	}

	/// Identifier of the default container.
	pub fn default_id(&self) -> &str {
		&self.inner.default_id
	}

	/// Returns the default container, creating it on first use.
	pub fn default_container(&self) -> Container {
		self.container(self.inner.default_id.clone())
	}

	/// Turns diagnostics on or off for this directory and all its containers.
	pub fn set_logging_enabled(&self, enabled: bool) {
		self.inner.log.set(enabled);
	}

	/// Returns `true` if diagnostics are emitted.
	pub fn logging_enabled(&self) -> bool {
		self.inner.log.enabled()
	}
}

impl Default for Directory {
	fn default() -> Self {
		Self::new()
	}
}

impl fmt::Debug for Directory {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Directory")
			.field("default_id", &self.inner.default_id)
			.field("containers", &self.ids())
			.finish()
	}
}
