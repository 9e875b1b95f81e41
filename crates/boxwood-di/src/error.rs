//! Error types for registration and resolution.
//!
//! Every variant here is recoverable. The resolution boundary
//! ([`Resolution::get`](crate::Resolution::get)) logs the error and turns it
//! into an absent value; [`Resolution::try_get`](crate::Resolution::try_get)
//! hands it to the caller instead.

use thiserror::Error;

/// Result type for dependency-injection operations.
pub type DiResult<T> = Result<T, DiError>;

/// Dependency-injection errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum DiError {
	/// No registration exists for the requested key.
	#[error("{}", render_not_registered(.container_id, .expected, .expected_args, .actual, .actual_args))]
	NotRegistered {
		/// Container the lookup ran against.
		container_id: String,
		/// Label of the requested type.
		expected: String,
		/// Labels of the supplied arguments.
		expected_args: Vec<String>,
		/// Label of the registration found under the key, if any.
		actual: Option<String>,
		/// Argument labels of the registration found under the key.
		actual_args: Vec<String>,
	},

	/// The requested container identifier is not in the directory.
	#[error("{0} - does not exist")]
	ContainerNotFound(String),

	/// A supplied argument could not be bound to the factory's parameter.
	#[error(
		"{container_id} - binding failed for {key}: parameter {position} expects {expected} but received {}",
		.supplied.as_deref().unwrap_or("no value")
	)]
	BindingMismatch {
		/// Container the lookup ran against.
		container_id: String,
		/// Dependency key being resolved.
		key: String,
		/// Zero-based parameter position.
		position: usize,
		/// Declared parameter label.
		expected: String,
		/// Label of the supplied value, `None` when the argument was omitted.
		supplied: Option<String>,
	},

	/// A container is already registered under this identifier.
	#[error("container {0} is already registered")]
	DuplicateContainerRegistration(String),

	/// The registration produces a value of a different type than requested.
	#[error("{container_id} - {key} produces {actual}, not {expected}")]
	TypeMismatch {
		/// Container the lookup ran against.
		container_id: String,
		/// Dependency key being resolved.
		key: String,
		/// Label of the requested type.
		expected: String,
		/// Label of the type the registration produces.
		actual: String,
	},

	/// A factory reported its own failure.
	#[error("factory failed: {0}")]
	Factory(String),
}

impl DiError {
	/// Creates a [`DiError::Factory`] from any displayable message.
	///
	/// # Examples
	///
	/// ```
	/// use boxwood_di::DiError;
	///
	/// let err = DiError::factory("database unreachable");
	/// assert_eq!(err.to_string(), "factory failed: database unreachable");
	/// ```
	pub fn factory(message: impl std::fmt::Display) -> Self {
		Self::Factory(message.to_string())
	}

	/// Returns `true` for errors caused by a missing registration.
	pub fn is_not_registered(&self) -> bool {
		matches!(self, Self::NotRegistered { .. })
	}
}

fn render_not_registered(
	container_id: &str,
	expected: &str,
	expected_args: &[String],
	actual: &Option<String>,
	actual_args: &[String],
) -> String {
	let mut out = format!("{container_id} - resolution failed - expected {expected}");
	if !expected_args.is_empty() {
		out.push_str(&format!(" with args {expected_args:?}"));
	}
	out.push_str(" but found ");
	out.push_str(actual.as_deref().unwrap_or("nil"));
	if !actual_args.is_empty() {
		out.push_str(&format!(" with args {actual_args:?}"));
	}
	out
}
