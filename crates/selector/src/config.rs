//! Drawer configuration.
//!
//! Parsed from TOML; every key is optional:
//!
//! ```toml
//! none-allowed = false
//! flat-menu-limit = 10
//!
//! [metrics]
//! line-height = 1
//! vertical-spacing = 1
//! label-width = 24
//! label-gap = 1
//! indent-width = 2
//! ```

use serde::Deserialize;
use thiserror::Error;

use crate::menu::FLAT_MENU_LIMIT;

/// Errors that can occur when parsing configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// The TOML document could not be parsed or had unexpected keys.
	#[error("TOML parse error: {0}")]
	Toml(#[from] toml::de::Error),
}

/// Layout metrics in host units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct Metrics {
	/// Height of the selector row.
	pub line_height: u16,
	/// Gap between stacked rows.
	pub vertical_spacing: u16,
	/// Width of the label column.
	pub label_width: u16,
	/// Gap between the label column and the dropdown.
	pub label_gap: u16,
	/// Horizontal offset of one indentation level.
	pub indent_width: u16,
}

impl Default for Metrics {
	fn default() -> Self {
		Self {
			line_height: 1,
			vertical_spacing: 1,
			label_width: 24,
			label_gap: 1,
			indent_width: 2,
		}
	}
}

/// Configuration shared by every field a controller draws.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct DrawerConfig {
	/// Whether an empty selection is offered. Fields may override it.
	pub none_allowed: bool,
	/// Largest variant count still listed flat; larger menus are grouped.
	pub flat_menu_limit: usize,
	pub metrics: Metrics,
}

impl Default for DrawerConfig {
	fn default() -> Self {
		Self {
			none_allowed: false,
			flat_menu_limit: FLAT_MENU_LIMIT,
			metrics: Metrics::default(),
		}
	}
}

impl DrawerConfig {
	/// Parses a configuration from TOML.
	pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
		Ok(toml::from_str(input)?)
	}

	pub fn with_none_allowed(mut self, none_allowed: bool) -> Self {
		self.none_allowed = none_allowed;
		self
	}

	pub fn with_metrics(mut self, metrics: Metrics) -> Self {
		self.metrics = metrics;
		self
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn empty_document_uses_defaults() {
		assert_eq!(DrawerConfig::from_toml_str("").unwrap(), DrawerConfig::default());
	}

	#[test]
	fn partial_document_overrides_some_keys() {
		let config = DrawerConfig::from_toml_str(
			r#"
			none-allowed = true

			[metrics]
			label-width = 12
			"#,
		)
		.unwrap();

		assert!(config.none_allowed);
		assert_eq!(config.flat_menu_limit, 10);
		assert_eq!(config.metrics.label_width, 12);
		assert_eq!(config.metrics.line_height, 1);
	}

	#[test]
	fn unknown_keys_are_rejected() {
		let err = DrawerConfig::from_toml_str("noneAllowed = true").unwrap_err();
		assert!(matches!(err, ConfigError::Toml(_)));
	}
}
