//! Dependency scopes

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a registration's instances are shared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
	/// A fresh instance on every resolution. The cache is never touched.
	Factory,
	/// One instance per container, created on first resolution and cached
	/// until explicitly dropped.
	#[default]
	Single,
}

impl Scope {
	/// Returns `true` if resolutions under this scope go through the cache.
	pub fn is_cached(self) -> bool {
		matches!(self, Scope::Single)
	}
}

impl fmt::Display for Scope {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Scope::Factory => f.write_str("factory"),
			Scope::Single => f.write_str("single"),
		}
	}
}
