//! Fallible variant sources.
//!
//! Static [`variant!`](crate::variant) entries cannot fail, but some variant
//! tables are only known at startup (plugin manifests, generated catalogs).
//! Such a table registers a [`VariantSourceDef`] whose `discover` function may
//! fail; the registry builder logs the failure and keeps going.

use std::any::{Any, TypeId};

use crate::{DiscoveryError, VariantDef};

/// Enumerates variant definitions for contract `C` at registry build time.
pub struct VariantSourceDef<C: ?Sized + 'static> {
	/// Source name used in diagnostics.
	pub name: &'static str,
	/// Produces the definitions this source contributes, in discovery order.
	pub discover: fn() -> Result<Vec<&'static VariantDef<C>>, DiscoveryError>,
}

impl<C: ?Sized + 'static> VariantSourceDef<C> {
	pub const fn new(
		name: &'static str,
		discover: fn() -> Result<Vec<&'static VariantDef<C>>, DiscoveryError>,
	) -> Self {
		Self { name, discover }
	}
}

impl<C: ?Sized + 'static> core::fmt::Debug for VariantSourceDef<C> {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_struct("VariantSourceDef")
			.field("name", &self.name)
			.finish()
	}
}

/// Type-erased source entry collected via `inventory`.
pub struct SourceReg {
	contract: fn() -> TypeId,
	def: &'static (dyn Any + Send + Sync),
}

inventory::collect!(SourceReg);

impl SourceReg {
	/// Wraps a source definition for submission.
	pub const fn new<C: ?Sized + 'static>(def: &'static VariantSourceDef<C>) -> Self {
		Self {
			contract: TypeId::of::<C>,
			def,
		}
	}

	/// Returns the contract this source was registered under.
	pub fn contract(&self) -> TypeId {
		(self.contract)()
	}

	/// Recovers the typed source if it belongs to contract `C`.
	pub fn downcast<C: ?Sized + 'static>(&self) -> Option<&'static VariantSourceDef<C>> {
		if self.contract() != TypeId::of::<C>() {
			return None;
		}
		let def: &'static (dyn Any + Send + Sync) = self.def;
		def.downcast_ref::<VariantSourceDef<C>>()
	}
}
