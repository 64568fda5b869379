use morph_variants::FactoryError;
use thiserror::Error;

use crate::binding::FieldId;
use crate::notice::Notice;

/// The host document refused a committed write.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BindingError {
	/// The owning document cannot be modified.
	#[error("document is read-only: {0}")]
	ReadOnly(String),
	/// The host rejected the value for another reason.
	#[error("{0}")]
	Rejected(String),
}

/// Errors surfaced by selection operations.
///
/// None of these leave a field half-written: the previously committed value
/// and expand flag are kept whenever one is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
	/// The chosen variant's factory failed.
	#[error("could not create {variant}: {source}")]
	Instantiation {
		variant: &'static str,
		#[source]
		source: FactoryError,
	},
	/// A command named a variant the registry does not know.
	#[error("unknown variant: {0}")]
	UnknownVariant(String),
	/// A command was dispatched to a different field than it was built for.
	#[error("command for field {command} applied to field {field}")]
	FieldMismatch { command: FieldId, field: FieldId },
	/// An empty selection was requested for a field that requires a value.
	#[error("field {0} requires a value")]
	NoneNotAllowed(FieldId),
	/// The field does not store polymorphic values of this contract.
	#[error("field {0} is not polymorphic")]
	NotPolymorphic(FieldId),
	/// The host document rejected the write.
	#[error("could not update field {field}: {source}")]
	Commit {
		field: FieldId,
		#[source]
		source: BindingError,
	},
}

impl SelectionError {
	/// Converts the error into a transient notice for the user.
	pub fn notice(&self) -> Notice {
		Notice::warn(self.to_string())
	}
}
