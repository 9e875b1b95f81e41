//! Process-wide directory and convenience resolution
//!
//! The global [`Directory`] is built lazily from [`DiSettings::from_env`]. The
//! free functions here resolve against its default container or a named one.
//!
//! ```
//! use boxwood_di::{Scope, global};
//!
//! global::default_container().register(Scope::Single, |_, ()| Ok(String::from("shared")));
//! assert_eq!(*global::get::<String>().unwrap(), "shared");
//! ```

use crate::args::IntoArgs;
use crate::container::Container;
use crate::directory::Directory;
use crate::error::DiResult;
use crate::logging::di_event;
use crate::settings::DiSettings;
use once_cell::sync::Lazy;
use std::sync::Arc;

static DIRECTORY: Lazy<Directory> = Lazy::new(|| Directory::with_settings(DiSettings::from_env()));

/// The process-wide directory.
pub fn directory() -> &'static Directory {
	&DIRECTORY
}

/// Returns the named container of the process-wide directory, creating it if
/// absent.
pub fn container(id: impl Into<String>) -> Container {
	DIRECTORY.container(id)
}

/// Returns the process-wide default container.
pub fn default_container() -> Container {
	DIRECTORY.default_container()
}

/// Resolves `T` from the default container, absent on any failure.
pub fn get<T: ?Sized + Send + Sync + 'static>() -> Option<Arc<T>> {
	default_container().get::<T>()
}

/// Resolves `T` with arguments from the default container.
pub fn get_with<T, Args>(args: Args) -> Option<Arc<T>>
where
	T: ?Sized + Send + Sync + 'static,
	Args: IntoArgs,
{
	default_container().get_with::<T, Args>(args)
}

/// Resolves `T` from the default container, reporting failures.
pub fn try_get<T: ?Sized + Send + Sync + 'static>() -> DiResult<Arc<T>> {
	default_container().try_get::<T>()
}

/// Resolves `T` from an existing named container.
///
/// An unknown identifier is logged and yields `None`; no container is created.
pub fn get_in<T: ?Sized + Send + Sync + 'static>(container_id: &str) -> Option<Arc<T>> {
	match DIRECTORY.try_lookup(container_id) {
		Ok(container) => container.get::<T>(),
		Err(err) => {
			di_event!(DIRECTORY.log(), error, container = %container_id, "{err}");
			None
		}
	}
}

/// Turns diagnostics of the process-wide directory on or off.
pub fn set_logging_enabled(enabled: bool) {
	DIRECTORY.set_logging_enabled(enabled);
}

