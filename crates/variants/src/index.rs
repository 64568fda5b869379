//! Registry construction and lookup.
//!
//! Every contract uses the same pattern, generated by
//! [`contract!`](crate::contract):
//!
//! ```rust,ignore
//! static REGISTRY: LazyLock<Registry<dyn Shape>> = LazyLock::new(|| {
//!     RegistryBuilder::new("Shape")
//!         .extend_inventory()
//!         .extend_sources()
//!         .build()
//! });
//! ```

use std::any::TypeId;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::panic::{self, AssertUnwindSafe};

use crate::{Contract, RegistryEntry, SourceReg, VariantDef, VariantReg, VariantSourceDef};

/// Policy for handling duplicate ids or names during registry construction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
	/// Panic with detailed error message.
	///
	/// Meant for tests and CI audits of the registration tables.
	Panic,
	/// Keep the first definition seen for a key.
	#[default]
	FirstWins,
	/// Overwrite with the last definition seen.
	LastWins,
}

/// Counters describing what happened while a registry was built.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DiscoveryReport {
	/// Definitions offered to the builder.
	pub scanned: usize,
	/// Abstract or generic definitions that were left out.
	pub ineligible: usize,
	/// Definitions dropped because their concrete type was already present.
	pub duplicates: usize,
	/// Sources whose enumeration failed and were skipped.
	pub failed_sources: usize,
}

/// Immutable catalog of the variants of contract `C`.
///
/// Preserves discovery order and resolves the default once at build time.
pub struct Registry<C: ?Sized + 'static> {
	label: &'static str,
	variants: Vec<&'static VariantDef<C>>,
	by_id: HashMap<&'static str, &'static VariantDef<C>>,
	by_name: HashMap<&'static str, &'static VariantDef<C>>,
	by_type: HashMap<TypeId, &'static VariantDef<C>>,
	default: Option<&'static VariantDef<C>>,
	report: DiscoveryReport,
}

impl<C: ?Sized + 'static> Registry<C> {
	/// Returns the label the registry was built with.
	#[inline]
	pub fn label(&self) -> &'static str {
		self.label
	}

	/// Returns the number of variants.
	#[inline]
	pub fn count(&self) -> usize {
		self.variants.len()
	}

	/// Returns true if no eligible variant was found.
	#[inline]
	pub fn is_empty(&self) -> bool {
		self.variants.is_empty()
	}

	/// Returns all variants in discovery order.
	#[inline]
	pub fn variants(&self) -> &[&'static VariantDef<C>] {
		&self.variants
	}

	/// Returns an iterator over all variants in discovery order.
	#[inline]
	pub fn iter(&self) -> impl Iterator<Item = &'static VariantDef<C>> + '_ {
		self.variants.iter().copied()
	}

	/// Returns the declared type names in discovery order.
	pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
		self.iter().map(|v| v.name())
	}

	/// Returns the resolved default variant.
	///
	/// The first variant marked as default in discovery order, else the first
	/// variant, else `None` for an empty registry.
	#[inline]
	pub fn default_variant(&self) -> Option<&'static VariantDef<C>> {
		self.default
	}

	/// Looks up a variant by id, falling back to its declared name.
	///
	/// Ids take precedence: a key that is one variant's id and another's
	/// name resolves to the variant with that id.
	#[inline]
	pub fn get(&self, key: &str) -> Option<&'static VariantDef<C>> {
		self.by_id(key).or_else(|| self.by_name.get(key).copied())
	}

	/// Looks up a variant by id only.
	#[inline]
	pub fn by_id(&self, id: &str) -> Option<&'static VariantDef<C>> {
		self.by_id.get(id).copied()
	}

	/// Looks up a variant by its concrete type.
	#[inline]
	pub fn by_type(&self, type_id: TypeId) -> Option<&'static VariantDef<C>> {
		self.by_type.get(&type_id).copied()
	}

	/// Returns the build counters.
	#[inline]
	pub fn report(&self) -> DiscoveryReport {
		self.report
	}
}

impl<C: ?Sized + Contract> Registry<C> {
	/// Returns the variant describing a bound instance, if it is registered.
	pub fn variant_of(&self, value: &C) -> Option<&'static VariantDef<C>> {
		self.by_type(value.concrete_type_id())
	}
}

impl<C: ?Sized + 'static> core::fmt::Debug for Registry<C> {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_struct("Registry")
			.field("label", &self.label)
			.field("variants", &self.variants)
			.field("default", &self.default.map(|d| d.id()))
			.field("report", &self.report)
			.finish()
	}
}

/// Builder for constructing a [`Registry`].
///
/// Collects definitions in discovery order, filters ineligible ones,
/// de-duplicates by concrete type and key, and resolves the default.
pub struct RegistryBuilder<C: ?Sized + 'static> {
	label: &'static str,
	defs: Vec<&'static VariantDef<C>>,
	policy: DuplicatePolicy,
	failed_sources: usize,
}

impl<C: ?Sized + 'static> RegistryBuilder<C> {
	/// Creates a new builder with the given label for diagnostics.
	pub fn new(label: &'static str) -> Self {
		Self {
			label,
			defs: Vec::new(),
			policy: DuplicatePolicy::default(),
			failed_sources: 0,
		}
	}

	/// Sets the duplicate key handling policy.
	pub fn duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
		self.policy = policy;
		self
	}

	/// Adds a single definition to the builder.
	pub fn push(mut self, def: &'static VariantDef<C>) -> Self {
		self.defs.push(def);
		self
	}

	/// Adds multiple definitions to the builder.
	pub fn extend<I: IntoIterator<Item = &'static VariantDef<C>>>(mut self, defs: I) -> Self {
		self.defs.extend(defs);
		self
	}

	/// Collects every statically registered definition for contract `C`.
	///
	/// Link order is not stable across platforms, so entries are appended
	/// sorted by id.
	pub fn extend_inventory(mut self) -> Self {
		let mut found: Vec<&'static VariantDef<C>> = Vec::new();
		for reg in inventory::iter::<VariantReg> {
			if let Some(def) = reg.downcast::<C>() {
				found.push(def);
			}
		}
		found.sort_by(|a, b| a.meta.id.cmp(b.meta.id));
		self.defs.extend(found);
		self
	}

	/// Appends the definitions produced by `source`.
	///
	/// A source that fails or panics is logged and skipped.
	pub fn extend_source(mut self, source: &VariantSourceDef<C>) -> Self {
		match panic::catch_unwind(AssertUnwindSafe(source.discover)) {
			Ok(Ok(defs)) => self.defs.extend(defs),
			Ok(Err(error)) => {
				tracing::warn!(registry = self.label, source = source.name, %error, "skipping variant source");
				self.failed_sources += 1;
			}
			Err(_) => {
				tracing::warn!(registry = self.label, source = source.name, "variant source panicked; skipping");
				self.failed_sources += 1;
			}
		}
		self
	}

	/// Runs every registered [`VariantSourceDef`] for contract `C`, by name.
	pub fn extend_sources(mut self) -> Self {
		let mut sources: Vec<&'static VariantSourceDef<C>> = Vec::new();
		for reg in inventory::iter::<SourceReg> {
			if let Some(source) = reg.downcast::<C>() {
				sources.push(source);
			}
		}
		sources.sort_by(|a, b| a.name.cmp(b.name));
		for source in sources {
			self = self.extend_source(source);
		}
		self
	}

	/// Builds the registry.
	///
	/// # Panics
	///
	/// Panics if duplicate keys are found and policy is [`DuplicatePolicy::Panic`].
	pub fn build(self) -> Registry<C> {
		let mut report = DiscoveryReport {
			scanned: self.defs.len(),
			failed_sources: self.failed_sources,
			..DiscoveryReport::default()
		};

		let mut variants = Vec::with_capacity(self.defs.len());
		let mut by_type = HashMap::with_capacity(self.defs.len());

		for def in self.defs {
			if !def.is_eligible() {
				tracing::debug!(registry = self.label, id = def.id(), kind = ?def.kind, "skipping ineligible variant");
				report.ineligible += 1;
				continue;
			}
			match by_type.entry(def.variant_type()) {
				Entry::Occupied(existing) => {
					let existing: &&'static VariantDef<C> = existing.get();
					if !std::ptr::eq(*existing, def) {
						tracing::warn!(
							registry = self.label,
							existing = existing.id(),
							new = def.id(),
							"concrete type registered twice; keeping first"
						);
					}
					report.duplicates += 1;
				}
				Entry::Vacant(slot) => {
					slot.insert(def);
					variants.push(def);
				}
			}
		}

		let mut by_id = HashMap::with_capacity(variants.len());
		let mut by_name = HashMap::with_capacity(variants.len());
		for &def in &variants {
			Self::insert_key(self.label, self.policy, &mut by_id, def.meta.id, def);
			Self::insert_key(self.label, self.policy, &mut by_name, def.meta.name, def);
		}

		let default = variants
			.iter()
			.copied()
			.find(|v| v.is_default)
			.or_else(|| variants.first().copied());

		tracing::debug!(
			registry = self.label,
			count = variants.len(),
			default = default.map(|d| d.id()),
			?report,
			"built variant registry"
		);

		Registry {
			label: self.label,
			variants,
			by_id,
			by_name,
			by_type,
			default,
			report,
		}
	}

	fn insert_key(
		label: &'static str,
		policy: DuplicatePolicy,
		map: &mut HashMap<&'static str, &'static VariantDef<C>>,
		key: &'static str,
		def: &'static VariantDef<C>,
	) {
		if let Some(&existing) = map.get(key) {
			if std::ptr::eq(existing, def) {
				return;
			}
			match policy {
				DuplicatePolicy::Panic => panic!(
					"duplicate variant key in {}: key={:?} existing_id={} new_id={}",
					label,
					key,
					existing.id(),
					def.id()
				),
				DuplicatePolicy::FirstWins => {}
				DuplicatePolicy::LastWins => {
					map.insert(key, def);
				}
			}
		} else {
			map.insert(key, def);
		}
	}
}

#[cfg(test)]
mod tests;
