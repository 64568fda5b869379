//! Selection menus.
//!
//! A [`Menu`] is an ordered list of entries and separators. Entry paths that
//! contain [`CATEGORY_SEPARATOR`] are shown by the host as nested
//! submenus; the controller uses this to group long variant lists by their
//! first letter.

use crate::command::SelectionCommand;

/// Largest number of variants listed without grouping.
pub const FLAT_MENU_LIMIT: usize = 10;

/// Separates a category from the entry label in a menu path.
pub const CATEGORY_SEPARATOR: char = '/';

/// Label of the entry that clears a field.
pub const NONE_LABEL: &str = "None";

/// One selectable menu entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
	/// Label path, `Category/Label` or just `Label`.
	pub path: String,
	/// Whether the entry reflects the current selection.
	pub checked: bool,
	/// Command dispatched when the entry is picked.
	pub command: SelectionCommand,
}

impl MenuEntry {
	/// Returns the category part of the path, if any.
	pub fn category(&self) -> Option<&str> {
		self.path
			.split_once(CATEGORY_SEPARATOR)
			.map(|(category, _)| category)
	}

	/// Returns the label without its category.
	pub fn label(&self) -> &str {
		self.path
			.split_once(CATEGORY_SEPARATOR)
			.map_or(self.path.as_str(), |(_, label)| label)
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuItem {
	Entry(MenuEntry),
	Separator,
}

/// Ordered menu contents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Menu {
	items: Vec<MenuItem>,
}

impl Menu {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn push_entry(&mut self, path: impl Into<String>, checked: bool, command: SelectionCommand) {
		self.items.push(MenuItem::Entry(MenuEntry {
			path: path.into(),
			checked,
			command,
		}));
	}

	pub fn push_separator(&mut self) {
		self.items.push(MenuItem::Separator);
	}

	/// Returns entries and separators in display order.
	pub fn items(&self) -> &[MenuItem] {
		&self.items
	}

	/// Returns the entries in display order, skipping separators.
	pub fn entries(&self) -> impl Iterator<Item = &MenuEntry> + '_ {
		self.items.iter().filter_map(|item| match item {
			MenuItem::Entry(entry) => Some(entry),
			MenuItem::Separator => None,
		})
	}

	/// Returns the number of entries.
	pub fn len(&self) -> usize {
		self.entries().count()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Returns the first checked entry.
	pub fn checked(&self) -> Option<&MenuEntry> {
		self.entries().find(|entry| entry.checked)
	}

	/// Looks up an entry by its full path.
	pub fn find(&self, path: &str) -> Option<&MenuEntry> {
		self.entries().find(|entry| entry.path == path)
	}

	/// Returns true if any entry is nested under a category.
	pub fn is_categorized(&self) -> bool {
		self.entries().any(|entry| entry.category().is_some())
	}

	/// Groups categorized entries, in order of each category's first entry.
	pub fn categories(&self) -> Vec<(&str, Vec<&MenuEntry>)> {
		let mut groups: Vec<(&str, Vec<&MenuEntry>)> = Vec::new();
		for entry in self.entries() {
			let Some(category) = entry.category() else {
				continue;
			};
			match groups.iter_mut().find(|(name, _)| *name == category) {
				Some((_, members)) => members.push(entry),
				None => groups.push((category, vec![entry])),
			}
		}
		groups
	}
}

/// Returns the grouping category for a display name: its first character.
pub fn category_of(display_name: &str) -> Option<char> {
	display_name.chars().next()
}
