//! Variant definitions and their static registration entries.
//!
//! Each [`variant!`](crate::variant) invocation creates a `VariantDef` and
//! submits a type-erased [`VariantReg`] via `inventory::submit!`. A contract's
//! registry later scans every submitted entry and keeps the ones whose
//! contract matches.

use std::any::{Any, TypeId};
use std::panic::{self, AssertUnwindSafe};

use crate::{Contract, FactoryError, RegistryEntry, RegistryMeta};

/// Zero-argument constructor producing a fresh boxed instance.
pub type Factory<C> = fn() -> Result<Box<C>, FactoryError>;

/// Eligibility class of a definition.
pub enum VariantKind<C: ?Sized + 'static> {
	/// Instantiable type with its factory.
	Concrete(Factory<C>),
	/// Placeholder for a type that cannot be constructed on its own.
	Abstract,
	/// Type that still needs type parameters before it can be constructed.
	Generic,
}

impl<C: ?Sized + 'static> Clone for VariantKind<C> {
	fn clone(&self) -> Self {
		*self
	}
}

impl<C: ?Sized + 'static> Copy for VariantKind<C> {}

impl<C: ?Sized + 'static> core::fmt::Debug for VariantKind<C> {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		match self {
			Self::Concrete(_) => f.write_str("Concrete"),
			Self::Abstract => f.write_str("Abstract"),
			Self::Generic => f.write_str("Generic"),
		}
	}
}

/// Definition of one implementation of contract `C`.
pub struct VariantDef<C: ?Sized + 'static> {
	/// Common registry metadata.
	pub meta: RegistryMeta,
	/// Returns the [`TypeId`] of the concrete type.
	pub type_of: fn() -> TypeId,
	/// Marks this variant as the contract's preferred default.
	pub is_default: bool,
	/// Eligibility and factory.
	pub kind: VariantKind<C>,
}

impl<C: ?Sized + 'static> VariantDef<C> {
	/// Creates a definition that is not marked as default.
	pub const fn new(meta: RegistryMeta, type_of: fn() -> TypeId, kind: VariantKind<C>) -> Self {
		Self {
			meta,
			type_of,
			is_default: false,
			kind,
		}
	}

	/// Sets the default marker.
	pub const fn with_default(self, is_default: bool) -> Self {
		Self { is_default, ..self }
	}

	/// Returns the concrete type this definition describes.
	#[inline]
	pub fn variant_type(&self) -> TypeId {
		(self.type_of)()
	}

	/// Returns true if the definition is concrete and non-generic.
	#[inline]
	pub fn is_eligible(&self) -> bool {
		matches!(self.kind, VariantKind::Concrete(_))
	}

	/// Runs the factory, converting a panic into [`FactoryError::Panicked`].
	pub fn instantiate(&self) -> Result<Box<C>, FactoryError> {
		let VariantKind::Concrete(factory) = self.kind else {
			return Err(FactoryError::NotInstantiable(self.meta.id));
		};
		panic::catch_unwind(AssertUnwindSafe(factory)).unwrap_or_else(|payload| {
			Err(FactoryError::Panicked(panic_message(payload.as_ref())))
		})
	}
}

impl<C: ?Sized + Contract> VariantDef<C> {
	/// Returns true if `value` is an instance of this variant's concrete type.
	#[inline]
	pub fn matches(&self, value: &C) -> bool {
		value.concrete_type_id() == self.variant_type()
	}
}

impl<C: ?Sized + 'static> RegistryEntry for VariantDef<C> {
	fn meta(&self) -> &RegistryMeta {
		&self.meta
	}
}

impl<C: ?Sized + 'static> core::fmt::Debug for VariantDef<C> {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_struct("VariantDef")
			.field("id", &self.meta.id)
			.field("is_default", &self.is_default)
			.field("kind", &self.kind)
			.finish()
	}
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
	if let Some(msg) = payload.downcast_ref::<&str>() {
		(*msg).to_string()
	} else if let Some(msg) = payload.downcast_ref::<String>() {
		msg.clone()
	} else {
		"non-string panic payload".to_string()
	}
}

/// Type-erased registration entry collected via `inventory`.
///
/// Entries for every contract share one collection; a registry keeps only
/// those whose contract id matches its own.
pub struct VariantReg {
	contract: fn() -> TypeId,
	def: &'static (dyn Any + Send + Sync),
}

inventory::collect!(VariantReg);

impl VariantReg {
	/// Wraps a definition for submission.
	pub const fn new<C: ?Sized + 'static>(def: &'static VariantDef<C>) -> Self {
		Self {
			contract: TypeId::of::<C>,
			def,
		}
	}

	/// Returns the contract this entry was registered under.
	pub fn contract(&self) -> TypeId {
		(self.contract)()
	}

	/// Recovers the typed definition if this entry belongs to contract `C`.
	pub fn downcast<C: ?Sized + 'static>(&self) -> Option<&'static VariantDef<C>> {
		if self.contract() != TypeId::of::<C>() {
			return None;
		}
		let def: &'static (dyn Any + Send + Sync) = self.def;
		def.downcast_ref::<VariantDef<C>>()
	}
}
