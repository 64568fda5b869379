//! Per-contract variant registries.
//!
//! A *contract* is a trait whose implementations can be swapped at runtime
//! (stored as `Box<dyn Trait>`). Every concrete implementation registers a
//! [`VariantDef`] through [`variant!`], and each contract lazily builds its own
//! immutable [`Registry`] the first time [`Contract::registry`] is called:
//!
//! ```rust,ignore
//! pub trait Shape: std::any::Any {
//!     fn area(&self) -> f32;
//! }
//! morph_variants::contract!(Shape);
//!
//! #[derive(Default)]
//! pub struct Circle;
//! impl Shape for Circle {
//!     fn area(&self) -> f32 { 3.14 }
//! }
//! morph_variants::variant!(Shape, Circle, { description: "A unit circle", default: true });
//!
//! let shapes = <dyn Shape as Contract>::registry();
//! assert_eq!(shapes.default_variant().map(|v| v.name()), Some("Circle"));
//! ```
//!
//! Registration is a static table collected with `inventory`, so discovery
//! never touches a live type system and every catalog is auditable in tests.

use std::any::{Any, TypeId};

pub mod display;
mod error;
pub mod index;
mod macros;
pub mod source;
pub mod variant;

pub use display::{NameStyle, nicify, split_words, strip_affixes};
pub use error::{DiscoveryError, FactoryError};
pub use index::{DiscoveryReport, DuplicatePolicy, Registry, RegistryBuilder};
pub use source::{SourceReg, VariantSourceDef};
pub use variant::{Factory, VariantDef, VariantKind, VariantReg};

#[doc(hidden)]
pub use {inventory, paste};

/// Represents where a variant was defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RegistrySource {
	/// Built directly into the host.
	Builtin,
	/// Defined in a library crate.
	Crate(&'static str),
	/// Produced at startup by a [`VariantSourceDef`].
	Runtime,
}

impl core::fmt::Display for RegistrySource {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		match self {
			Self::Builtin => write!(f, "builtin"),
			Self::Crate(name) => write!(f, "crate:{name}"),
			Self::Runtime => write!(f, "runtime"),
		}
	}
}

/// Common metadata for registered variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryMeta {
	/// Unique identifier (e.g., "morph-names::StandardNameGenerator").
	pub id: &'static str,
	/// Declared type name, before any display processing.
	pub name: &'static str,
	/// Description for help text.
	pub description: &'static str,
	/// Where this variant was defined.
	pub source: RegistrySource,
}

impl RegistryMeta {
	/// Creates a new RegistryMeta with all fields specified.
	pub const fn new(
		id: &'static str,
		name: &'static str,
		description: &'static str,
		source: RegistrySource,
	) -> Self {
		Self {
			id,
			name,
			description,
			source,
		}
	}

	/// Creates a builtin RegistryMeta whose id equals its name.
	pub const fn minimal(name: &'static str, description: &'static str) -> Self {
		Self {
			id: name,
			name,
			description,
			source: RegistrySource::Builtin,
		}
	}
}

/// Trait for accessing registry metadata from definition types.
pub trait RegistryEntry {
	/// Returns the metadata struct for this registry item.
	fn meta(&self) -> &RegistryMeta;

	/// Returns the unique identifier.
	fn id(&self) -> &'static str {
		self.meta().id
	}

	/// Returns the declared type name.
	fn name(&self) -> &'static str {
		self.meta().name
	}

	/// Returns the description.
	fn description(&self) -> &'static str {
		self.meta().description
	}

	/// Returns where this item was defined.
	fn source(&self) -> RegistrySource {
		self.meta().source
	}
}

/// A trait-object type whose implementations are catalogued in a [`Registry`].
///
/// Implemented for `dyn Trait` by [`contract!`]. The trait must have
/// [`Any`] as a supertrait so bound instances can report their concrete type.
pub trait Contract: 'static {
	/// Contract name used in logs and registry labels.
	const NAME: &'static str;

	/// Returns the registry for this contract, building it on first use.
	fn registry() -> &'static Registry<Self>;

	/// Upcasts a bound instance for downcasting to its concrete type.
	fn as_any(&self) -> &dyn Any;

	/// Mutable counterpart of [`as_any`](Self::as_any).
	fn as_any_mut(&mut self) -> &mut dyn Any;

	/// Returns the [`TypeId`] of the concrete type behind this instance.
	fn concrete_type_id(&self) -> TypeId {
		Any::type_id(self.as_any())
	}
}
