//! The selection controller.
//!
//! One controller serves every field of a contract. It measures and draws the
//! selector row, builds the variant menu, and performs transactional writes
//! into the host's [`FieldBinding`]. Per-field state lives in the binding and
//! is never cached here.

use std::any::TypeId;

use morph_variants::{Contract, NameStyle, Registry, RegistryEntry, VariantDef, nicify};

use crate::binding::{FieldBinding, StorageKind};
use crate::command::{Choice, SelectionCommand};
use crate::config::DrawerConfig;
use crate::error::SelectionError;
use crate::geometry::Rect;
use crate::menu::{CATEGORY_SEPARATOR, Menu, NONE_LABEL, category_of};
use crate::paint::Painter;
use crate::render::{RendererTable, VariantRenderer};

/// Label shown for an instance whose type is not in the registry.
pub const UNREGISTERED_LABEL: &str = "Unregistered";

/// Whether a field holds an instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindState {
	Unbound,
	Bound,
}

/// Whether a field's sub-content is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fold {
	Collapsed,
	Expanded,
}

/// Observable state of one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldState {
	pub bind: BindState,
	pub fold: Fold,
}

/// Drives layout and selection for fields of contract `C`.
pub struct SelectionController<C: ?Sized + Contract> {
	registry: &'static Registry<C>,
	renderers: RendererTable<C>,
	names: NameStyle,
	siblings: Vec<&'static str>,
	config: DrawerConfig,
}

impl<C: ?Sized + Contract> SelectionController<C> {
	/// Starts building a controller over `C`'s registry.
	pub fn builder() -> SelectionControllerBuilder<C> {
		SelectionControllerBuilder {
			registry: None,
			renderers: RendererTable::new(),
			names: NameStyle::default(),
			config: DrawerConfig::default(),
		}
	}

	/// Returns the registry the controller lists.
	pub fn registry(&self) -> &'static Registry<C> {
		self.registry
	}

	/// Returns the layout and menu settings in use.
	pub fn config(&self) -> &DrawerConfig {
		&self.config
	}

	/// Returns true if the field stores polymorphic values of exactly `C`.
	pub fn is_polymorphic(&self, binding: &impl FieldBinding<C>) -> bool {
		binding.storage() == StorageKind::Polymorphic && binding.declared_type() == TypeId::of::<C>()
	}

	/// Returns whether an empty selection is permitted for `binding`.
	///
	/// A field that requires a value falls back to allowing `None` when the
	/// registry has no variants, since there is nothing safe to assign.
	pub fn none_allowed(&self, binding: &impl FieldBinding<C>) -> bool {
		let configured = binding.none_allowed().unwrap_or(self.config.none_allowed);
		if !configured && self.registry.is_empty() {
			tracing::debug!(
				contract = C::NAME,
				field = %binding.id(),
				"field requires a value but no variants exist; allowing None"
			);
			return true;
		}
		configured
	}

	/// Returns the display name of a variant.
	pub fn display_name(&self, variant: &VariantDef<C>) -> String {
		nicify(&self.names.apply(variant.name(), &self.siblings))
	}

	/// Returns the dropdown caption for the field's current value.
	pub fn selection_label(&self, binding: &impl FieldBinding<C>) -> String {
		match binding.value() {
			None => NONE_LABEL.to_string(),
			Some(value) => self
				.registry
				.variant_of(value)
				.map_or_else(|| UNREGISTERED_LABEL.to_string(), |v| self.display_name(v)),
		}
	}

	/// Returns the field's position in the bound/fold state space.
	pub fn state(&self, binding: &impl FieldBinding<C>) -> FieldState {
		FieldState {
			bind: if binding.value().is_some() {
				BindState::Bound
			} else {
				BindState::Unbound
			},
			fold: if binding.is_expanded() {
				Fold::Expanded
			} else {
				Fold::Collapsed
			},
		}
	}

	/// Returns the height of the bound instance's sub-fields, or zero.
	pub fn content_height(&self, binding: &impl FieldBinding<C>) -> u16 {
		binding
			.value()
			.map_or(0, |value| self.renderers.height(value, &self.config.metrics))
	}

	/// Assigns the default variant to an empty field that requires a value.
	///
	/// Returns true if a value was assigned.
	pub fn validate(&self, binding: &mut impl FieldBinding<C>) -> Result<bool, SelectionError> {
		if self.none_allowed(binding) || binding.value().is_some() {
			return Ok(false);
		}
		let Some(default) = self.registry.default_variant() else {
			return Ok(false);
		};
		self.set(binding, Some(default))?;
		tracing::debug!(contract = C::NAME, field = %binding.id(), variant = default.id(), "assigned default variant");
		Ok(true)
	}

	/// Returns the total height the field needs.
	///
	/// Validates the field first, so a required field is never measured empty.
	/// Validation failures are only logged here; [`render`](Self::render)
	/// reports them to the user. The label never changes the height, so
	/// unlike `render` this takes none.
	pub fn measure_height(&self, binding: &mut impl FieldBinding<C>) -> u16 {
		let metrics = &self.config.metrics;
		if !self.is_polymorphic(binding) {
			return self.content_height(binding);
		}
		if let Err(error) = self.validate(binding) {
			tracing::warn!(contract = C::NAME, field = %binding.id(), %error, "default assignment failed");
		}

		let mut height = metrics.line_height;
		let content = self.content_height(binding);
		if content > 0 && binding.is_expanded() {
			height += metrics.vertical_spacing + content;
		}
		height
	}

	/// Draws the field into `area`.
	///
	/// Plain fields draw their sub-fields directly. Polymorphic fields draw a
	/// label or foldout, the selection dropdown, and, when expanded, the
	/// sub-fields one row below and one level in. A required field whose
	/// default cannot be created is reported through [`Painter::notify`].
	pub fn render(
		&self,
		area: Rect,
		binding: &mut impl FieldBinding<C>,
		label: &str,
		painter: &mut dyn Painter,
	) {
		let metrics = &self.config.metrics;
		if !self.is_polymorphic(binding) {
			if let Some(value) = binding.value_mut() {
				self.renderers.draw(area, value, painter, metrics);
			}
			return;
		}
		if let Err(error) = self.validate(binding) {
			painter.notify(error.notice());
		}

		let row = area.row(metrics.line_height);
		let (label_area, dropdown_area) = row.split_label(metrics.label_width, metrics.label_gap);

		if binding.value().is_some() && self.content_height(binding) > 0 {
			let expanded = painter.foldout(label_area, binding.is_expanded(), label);
			if expanded != binding.is_expanded() {
				binding.set_expanded(expanded);
			}
		} else {
			painter.label(label_area, label);
		}

		if painter.dropdown_button(dropdown_area, &self.selection_label(binding)) {
			let menu = self.build_menu(binding);
			if let Some(command) = painter.show_menu(dropdown_area, menu)
				&& let Err(error) = self.apply(binding, command)
			{
				painter.notify(error.notice());
			}
		}

		let content = self.content_height(binding);
		if content > 0 && binding.is_expanded() {
			let sub_area = area
				.below(metrics.line_height + metrics.vertical_spacing)
				.indent(metrics.indent_width)
				.row(content);
			if let Some(value) = binding.value_mut() {
				self.renderers.draw(sub_area, value, painter, metrics);
			}
		}
	}

	/// Builds the selection menu for `binding`.
	///
	/// Lists a `None` entry when allowed, then every variant; lists longer
	/// than the flat limit are grouped by the first character of each name.
	pub fn build_menu(&self, binding: &impl FieldBinding<C>) -> Menu {
		let field = binding.id();
		let current = binding.value();
		let mut menu = Menu::new();

		let show_none = self.none_allowed(binding);
		if show_none {
			menu.push_entry(NONE_LABEL, current.is_none(), SelectionCommand::clear(field));
		}
		if self.registry.is_empty() {
			return menu;
		}
		if show_none {
			menu.push_separator();
		}

		let grouped = self.registry.count() > self.config.flat_menu_limit;
		for variant in self.registry.iter() {
			let name = self.display_name(variant);
			let path = match category_of(&name) {
				Some(category) if grouped => format!("{category}{CATEGORY_SEPARATOR}{name}"),
				_ => name,
			};
			let checked = current.is_some_and(|value| variant.matches(value));
			menu.push_entry(path, checked, SelectionCommand::variant(field, variant.id()));
		}
		menu
	}

	/// Applies a menu command to `binding`.
	pub fn apply(
		&self,
		binding: &mut impl FieldBinding<C>,
		command: SelectionCommand,
	) -> Result<(), SelectionError> {
		let field = binding.id();
		if command.field != field {
			return Err(SelectionError::FieldMismatch {
				command: command.field,
				field,
			});
		}
		if !self.is_polymorphic(binding) {
			return Err(SelectionError::NotPolymorphic(field));
		}
		match command.choice {
			Choice::None if !self.none_allowed(binding) => Err(SelectionError::NoneNotAllowed(field)),
			Choice::None => self.set(binding, None),
			Choice::Variant(id) => {
				let variant = self
					.registry
					.by_id(id)
					.ok_or_else(|| SelectionError::UnknownVariant(id.to_string()))?;
				self.set(binding, Some(variant))
			}
		}
	}

	/// Replaces the field's value with a fresh instance of `variant`, or
	/// clears it.
	///
	/// The instance is built before the update scope opens, so a failing
	/// factory leaves the field exactly as it was. Clearing also collapses
	/// the field.
	pub fn set(
		&self,
		binding: &mut impl FieldBinding<C>,
		variant: Option<&VariantDef<C>>,
	) -> Result<(), SelectionError> {
		let field = binding.id();
		let value = match variant {
			Some(variant) => Some(variant.instantiate().map_err(|source| {
				tracing::warn!(contract = C::NAME, %field, variant = variant.id(), error = %source, "variant instantiation failed");
				SelectionError::Instantiation {
					variant: variant.id(),
					source,
				}
			})?),
			None => None,
		};
		let clearing = value.is_none();

		binding.begin_update();
		binding.assign(value);
		binding.commit().map_err(|source| {
			tracing::warn!(contract = C::NAME, %field, error = %source, "field commit rejected");
			SelectionError::Commit { field, source }
		})?;

		if clearing {
			binding.set_expanded(false);
		}
		tracing::trace!(
			contract = C::NAME,
			%field,
			variant = variant.map(|v| v.id()),
			"field updated"
		);
		Ok(())
	}
}

impl<C: ?Sized + Contract> core::fmt::Debug for SelectionController<C> {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_struct("SelectionController")
			.field("contract", &C::NAME)
			.field("variants", &self.registry.count())
			.field("renderers", &self.renderers.len())
			.field("names", &self.names)
			.field("config", &self.config)
			.finish()
	}
}

/// Builder for [`SelectionController`].
pub struct SelectionControllerBuilder<C: ?Sized + Contract> {
	registry: Option<&'static Registry<C>>,
	renderers: RendererTable<C>,
	names: NameStyle,
	config: DrawerConfig,
}

impl<C: ?Sized + Contract> SelectionControllerBuilder<C> {
	/// Uses `registry` instead of the contract's global one.
	pub fn registry(mut self, registry: &'static Registry<C>) -> Self {
		self.registry = Some(registry);
		self
	}

	/// Registers the renderer for variant `V`'s sub-fields.
	pub fn renderer<V: 'static>(mut self, renderer: impl VariantRenderer<V>) -> Self {
		self.renderers.insert::<V, _>(renderer);
		self
	}

	/// Sets how raw type names are post-processed before display.
	pub fn name_style(mut self, names: NameStyle) -> Self {
		self.names = names;
		self
	}

	/// Replaces the default [`DrawerConfig`].
	pub fn config(mut self, config: DrawerConfig) -> Self {
		self.config = config;
		self
	}

	/// Finishes the controller, falling back to `C`'s global registry.
	pub fn build(self) -> SelectionController<C> {
		let registry = self.registry.unwrap_or_else(C::registry);
		SelectionController {
			registry,
			renderers: self.renderers,
			names: self.names,
			siblings: registry.names().collect(),
			config: self.config,
		}
	}
}
