use thiserror::Error;

/// A source of variant definitions could not be enumerated.
///
/// Never fatal: the registry builder logs it and continues with the
/// remaining sources.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("failed to enumerate variants from {origin}: {reason}")]
pub struct DiscoveryError {
	/// Name of the source that failed.
	pub origin: String,
	/// Human-readable failure description.
	pub reason: String,
}

impl DiscoveryError {
	pub fn new(origin: impl Into<String>, reason: impl Into<String>) -> Self {
		Self {
			origin: origin.into(),
			reason: reason.into(),
		}
	}
}

/// A variant factory failed to produce a fresh instance.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FactoryError {
	/// The factory reported a failure.
	#[error("{0}")]
	Failed(String),
	/// The factory panicked; the payload message is preserved.
	#[error("factory panicked: {0}")]
	Panicked(String),
	/// The definition is abstract or generic and has no factory.
	#[error("variant is not instantiable: {0}")]
	NotInstantiable(&'static str),
}

impl FactoryError {
	pub fn failed(reason: impl Into<String>) -> Self {
		Self::Failed(reason.into())
	}
}
