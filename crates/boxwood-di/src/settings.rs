//! Directory settings
//!
//! Settings can be built in code, deserialized, or read from the environment:
//!
//! | Variable | Effect |
//! |---|---|
//! | `BOXWOOD_LOGGING` | `false`/`0`/`off` disables container diagnostics |
//! | `BOXWOOD_DEFAULT_CONTAINER` | identifier of the default container; `generated` picks a fresh UUID |

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier used by the process-wide directory for the default container.
pub const GLOBAL_CONTAINER_ID: &str = "GLOBAL_RESOLVER";

const ENV_LOGGING: &str = "BOXWOOD_LOGGING";
const ENV_DEFAULT_CONTAINER: &str = "BOXWOOD_DEFAULT_CONTAINER";
const GENERATED: &str = "generated";

/// How the default container identifier is chosen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DefaultContainerId {
	/// A fixed, well-known identifier.
	Fixed(String),
	/// A fresh UUID v4 per directory.
	Generated,
}

impl Default for DefaultContainerId {
	fn default() -> Self {
		Self::Fixed(GLOBAL_CONTAINER_ID.to_string())
	}
}

impl DefaultContainerId {
	/// Produces the identifier.
	pub fn resolve(&self) -> String {
		match self {
			Self::Fixed(id) => id.clone(),
			Self::Generated => uuid::Uuid::new_v4().to_string(),
		}
	}
}

impl fmt::Display for DefaultContainerId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Fixed(id) => f.write_str(id),
			Self::Generated => f.write_str(GENERATED),
		}
	}
}

/// Settings of a [`Directory`](crate::Directory).
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiSettings {
	/// Emit container diagnostics through `tracing`
	#[serde(default = "default_logging")]
	pub logging_enabled: bool,

	/// Default container identifier
	#[serde(default)]
	pub default_container: DefaultContainerId,
}

fn default_logging() -> bool {
	true
}

impl Default for DiSettings {
	fn default() -> Self {
		Self {
			logging_enabled: default_logging(),
			default_container: DefaultContainerId::default(),
		}
	}
}

impl DiSettings {
	/// Create new settings with defaults
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets whether diagnostics are emitted.
	pub fn with_logging(mut self, enabled: bool) -> Self {
		self.logging_enabled = enabled;
		self
	}

	/// Sets the default container identifier.
	pub fn with_default_container(mut self, id: DefaultContainerId) -> Self {
		self.default_container = id;
		self
	}

	/// Load settings from environment variables
	///
	/// Unset or unparsable variables keep their defaults.
	pub fn from_env() -> Self {
		Self::from_lookup(|name| std::env::var(name).ok())
	}

	/// Load settings through a variable lookup function.
	///
	/// ```
	/// use boxwood_di::{DefaultContainerId, DiSettings};
	///
	/// let settings = DiSettings::from_lookup(|name| match name {
	///     "BOXWOOD_LOGGING" => Some("off".to_string()),
	///     "BOXWOOD_DEFAULT_CONTAINER" => Some("generated".to_string()),
	///     _ => None,
	/// });
	///
	/// assert!(!settings.logging_enabled);
	/// assert_eq!(settings.default_container, DefaultContainerId::Generated);
	/// ```
	pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
		let mut settings = Self::default();

		if let Some(enabled) = lookup(ENV_LOGGING).as_deref().and_then(parse_flag) {
			settings.logging_enabled = enabled;
		}

		if let Some(id) = lookup(ENV_DEFAULT_CONTAINER) {
			let id = id.trim();
			if id.eq_ignore_ascii_case(GENERATED) {
				settings.default_container = DefaultContainerId::Generated;
			} else if !id.is_empty() {
				settings.default_container = DefaultContainerId::Fixed(id.to_string());
			}
		}

		settings
	}
}

fn parse_flag(value: &str) -> Option<bool> {
	match value.trim().to_lowercase().as_str() {
		"1" | "true" | "yes" | "on" => Some(true),
		"0" | "false" | "no" | "off" => Some(false),
		_ => None,
	}
}
