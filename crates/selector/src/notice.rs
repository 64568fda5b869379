//! Transient, non-blocking notices shown by the host.

use std::time::Duration;

/// Severity level for notices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Level {
	/// Informational message (default).
	#[default]
	Info,
	/// Warning message.
	Warn,
	/// Error message.
	Error,
}

/// Controls automatic dismissal of notices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoDismiss {
	/// Notice remains visible until manually dismissed.
	Never,
	/// Notice automatically dismisses after the specified duration.
	After(Duration),
}

impl AutoDismiss {
	/// Default auto-dismiss duration (4 seconds).
	pub const DEFAULT: Self = Self::After(Duration::from_secs(4));
}

impl Default for AutoDismiss {
	fn default() -> Self {
		Self::DEFAULT
	}
}

/// A message for the host to display without interrupting the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
	pub level: Level,
	pub message: String,
	pub auto_dismiss: AutoDismiss,
}

impl Notice {
	/// Creates a notice with the default auto-dismiss behavior.
	pub fn new(level: Level, message: impl Into<String>) -> Self {
		Self {
			level,
			message: message.into(),
			auto_dismiss: AutoDismiss::DEFAULT,
		}
	}

	pub fn info(message: impl Into<String>) -> Self {
		Self::new(Level::Info, message)
	}

	pub fn warn(message: impl Into<String>) -> Self {
		Self::new(Level::Warn, message)
	}
}
