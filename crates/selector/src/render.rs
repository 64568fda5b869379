//! Per-variant render strategies.
//!
//! A contract's controller draws the selector row itself and delegates the
//! bound instance's own sub-fields to the [`VariantRenderer`] registered for
//! its concrete type. Variants without a renderer have no expandable content.

use std::any::TypeId;
use std::collections::HashMap;
use std::marker::PhantomData;

use morph_variants::Contract;

use crate::config::Metrics;
use crate::geometry::Rect;
use crate::paint::Painter;

/// Measures and draws the sub-fields of one concrete variant `V`.
pub trait VariantRenderer<V: 'static>: 'static {
	/// Total height of the sub-fields. Zero means no expandable content.
	fn height(&self, value: &V, metrics: &Metrics) -> u16;

	/// Draws the sub-fields top-to-bottom inside `area`.
	fn draw(&self, area: Rect, value: &mut V, painter: &mut dyn Painter, metrics: &Metrics);
}

trait ErasedRenderer<C: ?Sized> {
	fn height(&self, value: &C, metrics: &Metrics) -> u16;
	fn draw(&self, area: Rect, value: &mut C, painter: &mut dyn Painter, metrics: &Metrics);
}

struct Typed<V, R> {
	renderer: R,
	_variant: PhantomData<fn(&V)>,
}

impl<C, V, R> ErasedRenderer<C> for Typed<V, R>
where
	C: ?Sized + Contract,
	V: 'static,
	R: VariantRenderer<V>,
{
	fn height(&self, value: &C, metrics: &Metrics) -> u16 {
		value
			.as_any()
			.downcast_ref::<V>()
			.map_or(0, |v| self.renderer.height(v, metrics))
	}

	fn draw(&self, area: Rect, value: &mut C, painter: &mut dyn Painter, metrics: &Metrics) {
		if let Some(v) = value.as_any_mut().downcast_mut::<V>() {
			self.renderer.draw(area, v, painter, metrics);
		}
	}
}

/// Renderers of one contract, keyed by concrete type.
pub(crate) struct RendererTable<C: ?Sized> {
	by_type: HashMap<TypeId, Box<dyn ErasedRenderer<C>>>,
}

impl<C: ?Sized + Contract> RendererTable<C> {
	pub(crate) fn new() -> Self {
		Self {
			by_type: HashMap::new(),
		}
	}

	pub(crate) fn insert<V: 'static, R: VariantRenderer<V>>(&mut self, renderer: R) {
		let previous = self.by_type.insert(
			TypeId::of::<V>(),
			Box::new(Typed {
				renderer,
				_variant: PhantomData::<fn(&V)>,
			}),
		);
		if previous.is_some() {
			tracing::warn!(
				contract = C::NAME,
				variant = std::any::type_name::<V>(),
				"renderer replaced"
			);
		}
	}

	pub(crate) fn len(&self) -> usize {
		self.by_type.len()
	}

	pub(crate) fn height(&self, value: &C, metrics: &Metrics) -> u16 {
		self.by_type
			.get(&value.concrete_type_id())
			.map_or(0, |r| r.height(value, metrics))
	}

	pub(crate) fn draw(&self, area: Rect, value: &mut C, painter: &mut dyn Painter, metrics: &Metrics) {
		if let Some(r) = self.by_type.get(&value.concrete_type_id()) {
			r.draw(area, value, painter, metrics);
		}
	}
}
