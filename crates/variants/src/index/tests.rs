use std::any::{Any, TypeId};

use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::*;
use crate::{DiscoveryError, FactoryError, RegistryMeta, VariantKind};

trait Shape: Any {}

struct Tag<const N: usize>;
impl<const N: usize> Shape for Tag<N> {}

fn make_tag() -> Result<Box<dyn Shape>, FactoryError> {
	Ok(Box::new(Tag::<0>))
}

const TYPES: [fn() -> TypeId; 12] = [
	TypeId::of::<Tag<0>>,
	TypeId::of::<Tag<1>>,
	TypeId::of::<Tag<2>>,
	TypeId::of::<Tag<3>>,
	TypeId::of::<Tag<4>>,
	TypeId::of::<Tag<5>>,
	TypeId::of::<Tag<6>>,
	TypeId::of::<Tag<7>>,
	TypeId::of::<Tag<8>>,
	TypeId::of::<Tag<9>>,
	TypeId::of::<Tag<10>>,
	TypeId::of::<Tag<11>>,
];

/// Leaks a concrete definition for tag `n`.
fn def(name: &'static str, n: usize, is_default: bool) -> &'static VariantDef<dyn Shape> {
	Box::leak(Box::new(
		VariantDef::new(
			RegistryMeta::minimal(name, ""),
			TYPES[n],
			VariantKind::Concrete(make_tag),
		)
		.with_default(is_default),
	))
}

fn ineligible(name: &'static str, n: usize, kind: VariantKind<dyn Shape>) -> &'static VariantDef<dyn Shape> {
	Box::leak(Box::new(VariantDef::new(RegistryMeta::minimal(name, ""), TYPES[n], kind)))
}

fn ids(registry: &Registry<dyn Shape>) -> Vec<&'static str> {
	registry.iter().map(|v| v.id()).collect()
}

#[test]
fn marked_default_wins_regardless_of_position() {
	let marked = def("Gamma", 2, true);
	let registry = RegistryBuilder::new("shapes")
		.push(def("Alpha", 0, false))
		.push(def("Beta", 1, false))
		.push(marked)
		.build();

	assert!(std::ptr::eq(registry.default_variant().unwrap(), marked));
}

/// A marker found after an unmarked variant must still be applied.
#[test]
fn later_default_marker_is_not_ignored() {
	let registry = RegistryBuilder::new("shapes")
		.push(def("Alpha", 0, false))
		.push(def("Beta", 1, true))
		.build();

	assert_eq!(registry.default_variant().map(|d| d.id()), Some("Beta"));
}

#[test]
fn first_marked_wins_over_later_marked() {
	let registry = RegistryBuilder::new("shapes")
		.push(def("Alpha", 0, false))
		.push(def("Beta", 1, true))
		.push(def("Gamma", 2, true))
		.build();

	assert_eq!(registry.default_variant().map(|d| d.id()), Some("Beta"));
}

#[test]
fn unmarked_registry_defaults_to_first() {
	let registry = RegistryBuilder::new("shapes")
		.push(def("Alpha", 0, false))
		.push(def("Beta", 1, false))
		.build();

	assert_eq!(registry.default_variant().map(|d| d.id()), Some("Alpha"));
}

#[test]
fn empty_registry_has_no_default() {
	let registry = RegistryBuilder::<dyn Shape>::new("shapes").build();

	assert_eq!(registry.count(), 0);
	assert!(registry.is_empty());
	assert!(registry.default_variant().is_none());
}

#[test]
fn ineligible_definitions_are_excluded() {
	let registry = RegistryBuilder::new("shapes")
		.push(ineligible("Base", 0, VariantKind::Abstract))
		.push(def("Alpha", 1, false))
		.push(ineligible("Wrapper", 2, VariantKind::Generic))
		.build();

	assert_eq!(ids(&registry), vec!["Alpha"]);
	assert_eq!(registry.report().ineligible, 2);
	assert_eq!(registry.report().scanned, 3);
	assert!(registry.get("Base").is_none());
}

#[test]
fn abstract_default_marker_does_not_become_default() {
	let base: &'static VariantDef<dyn Shape> = Box::leak(Box::new(
		VariantDef::new(RegistryMeta::minimal("Base", ""), TYPES[0], VariantKind::Abstract)
			.with_default(true),
	));
	let registry = RegistryBuilder::new("shapes")
		.push(base)
		.push(def("Alpha", 1, false))
		.build();

	assert_eq!(registry.default_variant().map(|d| d.id()), Some("Alpha"));
}

#[test]
fn duplicate_concrete_types_keep_first() {
	let registry = RegistryBuilder::new("shapes")
		.push(def("Alpha", 0, false))
		.push(def("AlphaAgain", 0, true))
		.build();

	assert_eq!(ids(&registry), vec!["Alpha"]);
	assert_eq!(registry.report().duplicates, 1);
	assert_eq!(registry.default_variant().map(|d| d.id()), Some("Alpha"));
}

#[test]
fn lookup_by_id_name_and_type() {
	let alpha: &'static VariantDef<dyn Shape> = Box::leak(Box::new(VariantDef::new(
		RegistryMeta::new("shapes::Alpha", "Alpha", "", crate::RegistrySource::Builtin),
		TYPES[0],
		VariantKind::Concrete(make_tag),
	)));
	let registry = RegistryBuilder::new("shapes").push(alpha).build();

	assert!(std::ptr::eq(registry.get("shapes::Alpha").unwrap(), alpha));
	assert!(std::ptr::eq(registry.get("Alpha").unwrap(), alpha));
	assert!(std::ptr::eq(registry.by_type(TypeId::of::<Tag<0>>()).unwrap(), alpha));
	assert!(registry.get("unknown").is_none());
}

#[test]
fn ids_take_precedence_over_names() {
	let plugin: &'static VariantDef<dyn Shape> = Box::leak(Box::new(VariantDef::new(
		RegistryMeta::new("plugin-a::Foo", "Foo", "", crate::RegistrySource::Builtin),
		TYPES[0],
		VariantKind::Concrete(make_tag),
	)));
	let bare = def("Foo", 1, false);
	let registry = RegistryBuilder::new("shapes").push(plugin).push(bare).build();

	assert!(std::ptr::eq(registry.by_id("Foo").unwrap(), bare));
	assert!(std::ptr::eq(registry.by_id("plugin-a::Foo").unwrap(), plugin));
	assert!(std::ptr::eq(registry.get("Foo").unwrap(), bare));
	assert!(registry.by_id("shapes::Foo").is_none());
}

#[test]
fn first_wins_keeps_first_key_but_both_items() {
	let first = def("Alpha", 0, false);
	let second = def("Alpha", 1, false);
	let registry = RegistryBuilder::new("shapes")
		.push(first)
		.push(second)
		.duplicate_policy(DuplicatePolicy::FirstWins)
		.build();

	assert!(std::ptr::eq(registry.get("Alpha").unwrap(), first));
	assert_eq!(registry.count(), 2);
}

#[test]
fn last_wins_overwrites_key() {
	let second = def("Alpha", 1, false);
	let registry = RegistryBuilder::new("shapes")
		.push(def("Alpha", 0, false))
		.push(second)
		.duplicate_policy(DuplicatePolicy::LastWins)
		.build();

	assert!(std::ptr::eq(registry.get("Alpha").unwrap(), second));
}

#[test]
#[should_panic(expected = "duplicate variant key")]
fn panic_policy_rejects_duplicate_keys() {
	let _registry = RegistryBuilder::new("shapes")
		.push(def("Alpha", 0, false))
		.push(def("Alpha", 1, false))
		.duplicate_policy(DuplicatePolicy::Panic)
		.build();
}

fn failing_source() -> Result<Vec<&'static VariantDef<dyn Shape>>, DiscoveryError> {
	Err(DiscoveryError::new("broken-plugin", "manifest unreadable"))
}

fn panicking_source() -> Result<Vec<&'static VariantDef<dyn Shape>>, DiscoveryError> {
	panic!("plugin table corrupted")
}

fn healthy_source() -> Result<Vec<&'static VariantDef<dyn Shape>>, DiscoveryError> {
	Ok(vec![def("Delta", 3, false), def("Echo", 4, false)])
}

#[test]
fn failing_sources_are_skipped() {
	let registry = RegistryBuilder::new("shapes")
		.push(def("Alpha", 0, false))
		.extend_source(&VariantSourceDef::new("broken", failing_source))
		.extend_source(&VariantSourceDef::new("panics", panicking_source))
		.extend_source(&VariantSourceDef::new("healthy", healthy_source))
		.build();

	assert_eq!(ids(&registry), vec!["Alpha", "Delta", "Echo"]);
	assert_eq!(registry.report().failed_sources, 2);
}

proptest! {
	#[test]
	fn default_is_first_marked_or_first(marks in prop::collection::vec(any::<bool>(), 0..12)) {
		let builder = marks
			.iter()
			.enumerate()
			.fold(RegistryBuilder::new("shapes"), |b, (n, &marked)| b.push(def("Variant", n, marked)));
		let registry = builder.build();

		let expected = marks.iter().position(|&m| m).or(if marks.is_empty() { None } else { Some(0) });
		let actual = registry
			.default_variant()
			.and_then(|d| registry.iter().position(|v| std::ptr::eq(v, d)));

		prop_assert_eq!(registry.count(), marks.len());
		prop_assert_eq!(actual, expected);
	}
}
