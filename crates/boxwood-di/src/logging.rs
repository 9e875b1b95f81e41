//! Switchable diagnostics
//!
//! Every container event goes through [`di_event!`], which checks the shared
//! logging flag before handing the event to `tracing`.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Logging switch shared by a directory and all of its containers.
#[derive(Debug, Clone)]
pub(crate) struct LogSwitch(Arc<AtomicBool>);

impl LogSwitch {
	pub(crate) fn new(enabled: bool) -> Self {
		Self(Arc::new(AtomicBool::new(enabled)))
	}

	pub(crate) fn enabled(&self) -> bool {
		self.0.load(Ordering::Relaxed)
	}

	pub(crate) fn set(&self, enabled: bool) {
		self.0.store(enabled, Ordering::Relaxed);
	}
}

/// Emits a `tracing` event at the given level if the switch is on.
macro_rules! di_event {
	($switch:expr, $level:ident, $($arg:tt)+) => {
		if $switch.enabled() {
			::tracing::$level!($($arg)+);
		}
	};
}

pub(crate) use di_event;
