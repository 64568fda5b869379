//! Host field bindings.
//!
//! A [`FieldBinding`] is the host document model's view of one field: its
//! current instance, its expand flag and a begin/assign/commit write
//! protocol. The controller never keeps a binding between calls.
//! [`MemoryField`] is an in-memory implementation for hosts without a
//! document model of their own.

use std::any::TypeId;

use morph_variants::Contract;

use crate::error::BindingError;

/// Opaque identifier of a field within its document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldId(pub u64);

impl core::fmt::Display for FieldId {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		write!(f, "#{}", self.0)
	}
}

/// How the host stores a field's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKind {
	/// Stores a reference to any implementation of the declared contract.
	Polymorphic,
	/// Stores one fixed type inline.
	Plain,
}

/// A field exposed by the host document model.
pub trait FieldBinding<C: ?Sized + Contract> {
	/// Returns the field's identifier.
	fn id(&self) -> FieldId;

	/// Returns how the host stores this field.
	fn storage(&self) -> StorageKind;

	/// Returns the field's declared type: the contract for polymorphic fields,
	/// the concrete variant type for plain ones.
	fn declared_type(&self) -> TypeId;

	/// Per-field override of the controller's none-allowed setting.
	fn none_allowed(&self) -> Option<bool> {
		None
	}

	/// Returns the committed instance.
	fn value(&self) -> Option<&C>;

	/// Returns the committed instance for in-place editing of its sub-fields.
	fn value_mut(&mut self) -> Option<&mut C>;

	fn is_expanded(&self) -> bool;

	fn set_expanded(&mut self, expanded: bool);

	/// Starts an update scope, refreshing from the underlying storage.
	fn begin_update(&mut self);

	/// Stages a replacement value inside the current update scope.
	fn assign(&mut self, value: Option<Box<C>>);

	/// Applies the staged value.
	///
	/// On error the staged value must be discarded and the previously
	/// committed value kept.
	fn commit(&mut self) -> Result<(), BindingError>;
}

enum Pending<C: ?Sized> {
	Open,
	Assigned(Option<Box<C>>),
}

/// In-memory field with staged writes.
pub struct MemoryField<C: ?Sized + Contract> {
	id: FieldId,
	storage: StorageKind,
	declared: TypeId,
	none_allowed: Option<bool>,
	value: Option<Box<C>>,
	expanded: bool,
	pending: Option<Pending<C>>,
	read_only: Option<String>,
	revision: u64,
}

impl<C: ?Sized + Contract> MemoryField<C> {
	/// Creates an empty field that stores any implementation of `C`.
	pub fn polymorphic(id: FieldId) -> Self {
		Self {
			id,
			storage: StorageKind::Polymorphic,
			declared: TypeId::of::<C>(),
			none_allowed: None,
			value: None,
			expanded: false,
			pending: None,
			read_only: None,
			revision: 0,
		}
	}

	/// Creates a field declared with the concrete type `V`.
	pub fn plain<V: 'static>(id: FieldId, value: Box<C>) -> Self {
		Self {
			storage: StorageKind::Plain,
			declared: TypeId::of::<V>(),
			value: Some(value),
			..Self::polymorphic(id)
		}
	}

	/// Sets the committed value without going through an update scope.
	pub fn with_value(mut self, value: Box<C>) -> Self {
		self.value = Some(value);
		self
	}

	pub fn with_none_allowed(mut self, none_allowed: bool) -> Self {
		self.none_allowed = Some(none_allowed);
		self
	}

	pub fn with_expanded(mut self, expanded: bool) -> Self {
		self.expanded = expanded;
		self
	}

	/// Makes every following commit fail with [`BindingError::ReadOnly`].
	pub fn set_read_only(&mut self, reason: Option<String>) {
		self.read_only = reason;
	}

	/// Returns the number of successful commits that changed the value.
	pub fn revision(&self) -> u64 {
		self.revision
	}

	/// Returns true while an update scope is open.
	pub fn is_updating(&self) -> bool {
		self.pending.is_some()
	}

	/// Drops the committed value, returning it.
	pub fn take(&mut self) -> Option<Box<C>> {
		self.value.take()
	}
}

impl<C: ?Sized + Contract> FieldBinding<C> for MemoryField<C> {
	fn id(&self) -> FieldId {
		self.id
	}

	fn storage(&self) -> StorageKind {
		self.storage
	}

	fn declared_type(&self) -> TypeId {
		self.declared
	}

	fn none_allowed(&self) -> Option<bool> {
		self.none_allowed
	}

	fn value(&self) -> Option<&C> {
		self.value.as_deref()
	}

	fn value_mut(&mut self) -> Option<&mut C> {
		self.value.as_deref_mut()
	}

	fn is_expanded(&self) -> bool {
		self.expanded
	}

	fn set_expanded(&mut self, expanded: bool) {
		self.expanded = expanded;
	}

	fn begin_update(&mut self) {
		if self.pending.is_some() {
			tracing::warn!(field = %self.id, "update scope reopened; discarding staged value");
		}
		self.pending = Some(Pending::Open);
	}

	fn assign(&mut self, value: Option<Box<C>>) {
		if self.pending.is_none() {
			tracing::warn!(field = %self.id, "assign outside an update scope");
		}
		self.pending = Some(Pending::Assigned(value));
	}

	fn commit(&mut self) -> Result<(), BindingError> {
		let Some(pending) = self.pending.take() else {
			return Ok(());
		};
		if let Some(reason) = &self.read_only {
			return Err(BindingError::ReadOnly(reason.clone()));
		}
		if let Pending::Assigned(value) = pending {
			self.value = value;
			self.revision += 1;
		}
		Ok(())
	}
}

impl<C: ?Sized + Contract> core::fmt::Debug for MemoryField<C> {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_struct("MemoryField")
			.field("id", &self.id)
			.field("storage", &self.storage)
			.field("bound", &self.value.is_some())
			.field("expanded", &self.expanded)
			.field("revision", &self.revision)
			.finish()
	}
}
