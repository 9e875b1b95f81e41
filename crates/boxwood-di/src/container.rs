//! Containers
//!
//! A [`ContainerCore`] owns one container's registration map and instance
//! cache. [`Container`] is the cloneable handle callers work with: it adds the
//! registration surface, resolution entry points, and the link back to the
//! [`Directory`](crate::Directory) the container lives in.
//!
//! # Examples
//!
//! ```
//! use boxwood_di::{Directory, Scope};
//! use std::sync::Arc;
//!
//! struct Config {
//!     url: String,
//! }
//!
//! struct Repository {
//!     config: Arc<Config>,
//! }
//!
//! let directory = Directory::new();
//! let container = directory.container("app");
//!
//! container
//!     .register(Scope::Single, |_, ()| {
//!         Ok(Config { url: "postgres://localhost".to_string() })
//!     })
//!     .register(Scope::Factory, |c, ()| {
//!         let config = c.try_get::<Config>()?;
//!         Ok(Repository { config })
//!     });
//!
//! let repo = container.get::<Repository>().unwrap();
//! assert_eq!(repo.config.url, "postgres://localhost");
//! ```

use crate::args::{IntoArgs, Params};
use crate::directory::DirectoryInner;
use crate::error::DiResult;
use crate::key::DependencyKey;
use crate::logging::{LogSwitch, di_event};
use crate::registration::{ErasedInstance, Registration};
use crate::resolution::Resolution;
use crate::scope::Scope;
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::{Arc, Weak};

/// Registration map and instance cache of one container.
///
/// Each operation takes the relevant lock only for its own duration; no lock
/// is held while a factory runs.
pub struct ContainerCore {
	id: String,
	registrations: RwLock<HashMap<DependencyKey, Registration>>,
	cache: RwLock<HashMap<DependencyKey, ErasedInstance>>,
}

impl ContainerCore {
	/// Creates an empty core.
	pub fn new(id: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			registrations: RwLock::new(HashMap::new()),
			cache: RwLock::new(HashMap::new()),
		}
	}

	/// Container identifier.
	pub fn id(&self) -> &str {
		&self.id
	}

	/// Stores a registration, replacing any previous one under `key`.
	///
	/// The cache is left untouched.
	pub fn set_registration(&self, key: DependencyKey, registration: Registration) -> Registration {
		self.registrations.write().insert(key, registration.clone());
		registration
	}

	/// Returns the registration under `key`.
	pub fn get_registration(&self, key: &DependencyKey) -> Option<Registration> {
		self.registrations.read().get(key).cloned()
	}

	/// Removes the registration under `key`.
	pub fn remove_registration(&self, key: &DependencyKey) -> Option<Registration> {
		self.registrations.write().remove(key)
	}

	/// Returns the cached instance under `key`.
	pub fn get_cached(&self, key: &DependencyKey) -> Option<ErasedInstance> {
		self.cache.read().get(key).cloned()
	}

	/// Caches an instance under `key`, replacing any previous one.
	pub fn set_cached(&self, key: DependencyKey, instance: ErasedInstance) {
		self.cache.write().insert(key, instance);
	}

	/// Replaces the whole registration map in one write.
	///
	/// The cache is left untouched.
	pub fn replace_registrations(&self, registrations: HashMap<DependencyKey, Registration>) {
		*self.registrations.write() = registrations;
	}

	/// Removes exactly the given registrations.
	pub fn unregister(&self, keys: &[DependencyKey]) {
		if keys.is_empty() {
			return;
		}
		let mut registrations = self.registrations.write();
		for key in keys {
			registrations.remove(key);
		}
	}

	/// Keeps only the given registrations; an empty list clears them all.
	pub fn unregister_all_except(&self, keys: &[DependencyKey]) {
		retain_only(&mut self.registrations.write(), keys);
	}

	/// Drops exactly the given cached instances.
	pub fn drop_cached(&self, keys: &[DependencyKey]) {
		if keys.is_empty() {
			return;
		}
		let mut cache = self.cache.write();
		for key in keys {
			cache.remove(key);
		}
	}

	/// Keeps only the given cached instances; an empty list clears the cache.
	pub fn drop_cached_except(&self, keys: &[DependencyKey]) {
		retain_only(&mut self.cache.write(), keys);
	}

	/// Clears registrations and cache.
	pub fn drop_all(&self) {
		self.registrations.write().clear();
		self.cache.write().clear();
	}

	/// Snapshot of all registrations.
	pub fn registrations(&self) -> HashMap<DependencyKey, Registration> {
		self.registrations.read().clone()
	}

	/// Registered keys, sorted.
	pub fn registered_keys(&self) -> Vec<DependencyKey> {
		let mut keys: Vec<_> = self.registrations.read().keys().cloned().collect();
		keys.sort();
		keys
	}

	/// Returns `true` if `key` has a registration.
	pub fn is_registered(&self, key: &DependencyKey) -> bool {
		self.registrations.read().contains_key(key)
	}

	/// Returns `true` if `key` has a cached instance.
	pub fn is_cached(&self, key: &DependencyKey) -> bool {
		self.cache.read().contains_key(key)
	}

	/// Number of registrations.
	pub fn registration_count(&self) -> usize {
		self.registrations.read().len()
	}

	/// Number of cached instances.
	pub fn cached_count(&self) -> usize {
		self.cache.read().len()
	}

	/// First registration (by key order) producing a type labelled `label`.
	pub(crate) fn find_producer(&self, label: &str) -> Option<(DependencyKey, Registration)> {
		self.registrations
			.read()
			.iter()
			.filter(|(_, registration)| registration.result_label() == label)
			.min_by(|(a, _), (b, _)| a.cmp(b))
			.map(|(key, registration)| (key.clone(), registration.clone()))
	}
}

impl fmt::Debug for ContainerCore {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ContainerCore")
			.field("id", &self.id)
			.field("registrations", &self.registration_count())
			.field("cached", &self.cached_count())
			.finish()
	}
}

fn retain_only<V>(map: &mut HashMap<DependencyKey, V>, keys: &[DependencyKey]) {
	if keys.is_empty() {
		map.clear();
		return;
	}
	let keep: HashSet<&DependencyKey> = keys.iter().collect();
	map.retain(|key, _| keep.contains(key));
}

/// Handle to one container.
///
/// Cloning is cheap; clones share the same registrations and cache.
/// Registration methods take `&self` and return it, so calls chain.
#[derive(Clone)]
pub struct Container {
	core: Arc<ContainerCore>,
	directory: Weak<DirectoryInner>,
	log: LogSwitch,
}

impl Container {
	/// Returns the container registered under `id` in the process-wide
	/// directory, creating it if absent.
	pub fn new(id: impl Into<String>) -> Self {
		crate::global::container(id)
	}

	/// Creates a container outside any directory.
	///
	/// [`Directory::register`](crate::Directory::register) can adopt it later;
	/// use the handle it returns for anything that touches the directory.
	pub fn detached(id: impl Into<String>) -> Self {
		Self {
			core: Arc::new(ContainerCore::new(id)),
			directory: Weak::new(),
			log: LogSwitch::new(true),
		}
	}

	pub(crate) fn attached(core: Arc<ContainerCore>, directory: Weak<DirectoryInner>, log: LogSwitch) -> Self {
		Self { core, directory, log }
	}

	pub(crate) fn core_arc(&self) -> &Arc<ContainerCore> {
		&self.core
	}

	pub(crate) fn log(&self) -> &LogSwitch {
		&self.log
	}

	/// Underlying registration map and cache.
	pub fn core(&self) -> &ContainerCore {
		&self.core
	}

	/// Container identifier.
	pub fn id(&self) -> &str {
		self.core.id()
	}

	/// Returns `true` if both handles point at the same container.
	pub fn same_container(&self, other: &Container) -> bool {
		Arc::ptr_eq(&self.core, &other.core)
	}

	/// Returns `true` if diagnostics are emitted for this container.
	pub fn logging_enabled(&self) -> bool {
		self.log.enabled()
	}

	/// Registers a factory under the key of `T`.
	pub fn register<T, A, F>(&self, scope: Scope, factory: F) -> &Self
	where
		T: Send + Sync + 'static,
		A: Params,
		F: Fn(&Container, A) -> DiResult<T> + Send + Sync + 'static,
	{
		self.register_at(DependencyKey::of::<T>(), scope, factory)
	}

	/// Registers a factory under an explicit key.
	pub fn register_at<T, A, F>(&self, key: impl Into<DependencyKey>, scope: Scope, factory: F) -> &Self
	where
		T: Send + Sync + 'static,
		A: Params,
		F: Fn(&Container, A) -> DiResult<T> + Send + Sync + 'static,
	{
		let registration = Registration::new(scope, move |c: &Container, args: A| factory(c, args).map(Arc::new));
		self.insert(key.into(), registration)
	}

	/// Registers a factory producing a shared, possibly unsized, value under
	/// the key of `I`.
	///
	/// ```
	/// use boxwood_di::{Container, Scope};
	/// use std::sync::Arc;
	///
	/// trait Greeter: Send + Sync {
	///     fn greet(&self) -> String;
	/// }
	///
	/// struct English;
	///
	/// impl Greeter for English {
	///     fn greet(&self) -> String {
	///         "hello".to_string()
	///     }
	/// }
	///
	/// let container = Container::detached("doc");
	/// container.register_as::<dyn Greeter, _, _>(Scope::Single, |_, ()| Ok(Arc::new(English)));
	///
	/// let greeter = container.get::<dyn Greeter>().unwrap();
	/// assert_eq!(greeter.greet(), "hello");
	/// ```
	pub fn register_as<I, A, F>(&self, scope: Scope, factory: F) -> &Self
	where
		I: ?Sized + Send + Sync + 'static,
		A: Params,
		F: Fn(&Container, A) -> DiResult<Arc<I>> + Send + Sync + 'static,
	{
		self.insert(DependencyKey::of::<I>(), Registration::new(scope, factory))
	}

	/// Registers one factory under every key in `keys`.
	///
	/// Each key gets its own registration and, under single scope, its own
	/// cached instance.
	pub fn register_keys<I, A, F>(&self, keys: &[DependencyKey], scope: Scope, factory: F) -> &Self
	where
		I: ?Sized + Send + Sync + 'static,
		A: Params,
		F: Fn(&Container, A) -> DiResult<Arc<I>> + Send + Sync + 'static,
	{
		let registration = Registration::new(scope, factory);
		for key in keys {
			self.insert(key.clone(), registration.clone());
		}
		self
	}

	/// Stores a prepared registration under `key`.
	pub fn insert(&self, key: DependencyKey, registration: Registration) -> &Self {
		di_event!(
			self.log,
			info,
			container = %self.id(),
			key = %key,
			scope = %registration.scope(),
			"registered dependency"
		);
		self.core.set_registration(key, registration);
		self
	}

	/// Starts a resolution request for `T`.
	pub fn resolve<T: ?Sized + Send + Sync + 'static>(&self) -> Resolution<'_, T> {
		Resolution::new(self)
	}

	/// Resolves `T` without arguments, absent on any failure.
	pub fn get<T: ?Sized + Send + Sync + 'static>(&self) -> Option<Arc<T>> {
		self.resolve::<T>().get()
	}

	/// Resolves `T` with arguments, absent on any failure.
	pub fn get_with<T, Args>(&self, args: Args) -> Option<Arc<T>>
	where
		T: ?Sized + Send + Sync + 'static,
		Args: IntoArgs,
	{
		self.resolve::<T>().args(args).get()
	}

	/// Resolves `T` without arguments, reporting failures.
	pub fn try_get<T: ?Sized + Send + Sync + 'static>(&self) -> DiResult<Arc<T>> {
		self.resolve::<T>().try_get()
	}

	/// Removes the registration of `T`.
	pub fn unregister<T: ?Sized>(&self) -> &Self {
		self.unregister_keys(&[DependencyKey::of::<T>()])
	}

	/// Removes exactly the given registrations.
	pub fn unregister_keys(&self, keys: &[DependencyKey]) -> &Self {
		self.core.unregister(keys);
		di_event!(self.log, info, container = %self.id(), keys = ?keys, "unregistered dependencies");
		self
	}

	/// Keeps only the given registrations; an empty list removes them all.
	pub fn unregister_all_except(&self, keys: &[DependencyKey]) -> &Self {
		self.core.unregister_all_except(keys);
		di_event!(self.log, info, container = %self.id(), kept = ?keys, "unregistered all dependencies except kept keys");
		self
	}

	/// Drops the cached instances of the given keys.
	pub fn drop_cached(&self, keys: &[DependencyKey]) -> &Self {
		self.core.drop_cached(keys);
		di_event!(self.log, info, container = %self.id(), keys = ?keys, "dropped cached instances");
		self
	}

	/// Keeps only the cached instances of the given keys; an empty list drops
	/// the whole cache.
	pub fn drop_all_cached_except(&self, keys: &[DependencyKey]) -> &Self {
		self.core.drop_cached_except(keys);
		di_event!(self.log, info, container = %self.id(), kept = ?keys, "dropped all cached instances except kept keys");
		self
	}

	/// Clears registrations and cache.
	pub fn drop_all(&self) {
		self.core.drop_all();
		di_event!(self.log, info, container = %self.id(), "dropped container contents");
	}

	/// Clears the container and removes it from its directory.
	///
	/// A later lookup of the same identifier creates a fresh container; this
	/// handle keeps pointing at the old, now empty, one.
	pub fn drop_completely(&self) {
		self.drop_all();
		if let Some(directory) = self.directory.upgrade() {
			directory.remove_core(&self.core);
		}
		di_event!(self.log, info, container = %self.id(), "removed container from directory");
	}

	/// Copies every registration of `other` into this container, `other`
	/// winning on key collision. Caches are untouched.
	pub fn merge_from(&self, other: &Container) -> &Self {
		if self.same_container(other) {
			return self;
		}
		let incoming = other.core.registrations();
		let count = incoming.len();
		for (key, registration) in incoming {
			self.core.set_registration(key, registration);
		}
		di_event!(
			self.log,
			info,
			container = %self.id(),
			source = %other.id(),
			count,
			"merged registrations"
		);
		self
	}

	/// Returns the container `new_id` holding exactly the registrations of
	/// both containers, this container winning on key collision.
	///
	/// The union is computed before the target is touched, so `new_id` may
	/// name either source. Registrations previously held by the target are
	/// replaced; caches are untouched. The new container is created in this
	/// container's directory, or detached if this container has none.
	pub fn combine(&self, other: &Container, new_id: impl Into<String>) -> Container {
		let mut union = other.core.registrations();
		union.extend(self.core.registrations());
		let count = union.len();

		let combined = match self.directory.upgrade() {
			Some(inner) => crate::directory::Directory::from_inner(inner).container(new_id),
			None => Container::detached(new_id),
		};
		combined.core.replace_registrations(union);
		di_event!(
			self.log,
			info,
			container = %combined.id(),
			first = %self.id(),
			second = %other.id(),
			count,
			"combined registrations"
		);
		combined
	}

	/// Logs the sorted registered keys and returns them as strings.
	pub fn print_all_registrations(&self) -> Vec<String> {
		let keys: Vec<String> = self.registered_keys().iter().map(DependencyKey::to_string).collect();
		di_event!(self.log, info, container = %self.id(), registrations = ?keys, "registered dependencies");
		keys
	}

	/// Registered keys, sorted.
	pub fn registered_keys(&self) -> Vec<DependencyKey> {
		self.core.registered_keys()
	}

	/// Returns `true` if `key` has a registration.
	pub fn is_registered(&self, key: &DependencyKey) -> bool {
		self.core.is_registered(key)
	}

	/// Returns `true` if `key` has a cached instance.
	pub fn is_cached(&self, key: &DependencyKey) -> bool {
		self.core.is_cached(key)
	}

	/// Number of registrations.
	pub fn registration_count(&self) -> usize {
		self.core.registration_count()
	}

	/// Number of cached instances.
	pub fn cached_count(&self) -> usize {
		self.core.cached_count()
	}

	/// Returns the registration stored under `key`.
	pub fn registration(&self, key: &DependencyKey) -> Option<Registration> {
		self.core.get_registration(key)
	}
}

impl fmt::Debug for Container {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Container")
			.field("id", &self.id())
			.field("registrations", &self.registration_count())
			.field("cached", &self.cached_count())
			.field("attached", &(self.directory.strong_count() > 0))
			.finish()
	}
}
