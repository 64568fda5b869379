//! A scripted [`Painter`] that records every call.
//!
//! Used by tests and by headless hosts that drive fields without a UI.
//! Interactions are scripted ahead of a render pass and consumed once.

use std::collections::HashMap;

use crate::command::SelectionCommand;
use crate::geometry::Rect;
use crate::menu::Menu;
use crate::notice::Notice;
use crate::paint::Painter;

/// One recorded drawing call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaintCall {
	Label { area: Rect, text: String },
	Foldout { area: Rect, expanded: bool, text: String },
	Dropdown { area: Rect, text: String },
	Menu { anchor: Rect, menu: Menu },
	TextField { area: Rect, label: String, value: String },
}

impl PaintCall {
	pub fn area(&self) -> Rect {
		match self {
			Self::Label { area, .. }
			| Self::Foldout { area, .. }
			| Self::Dropdown { area, .. }
			| Self::TextField { area, .. } => *area,
			Self::Menu { anchor, .. } => *anchor,
		}
	}
}

#[derive(Debug, Default)]
pub struct RecordingPainter {
	calls: Vec<PaintCall>,
	notices: Vec<Notice>,
	toggle_foldout: bool,
	click_dropdown: bool,
	pick: Option<String>,
	edits: HashMap<String, String>,
}

impl RecordingPainter {
	pub fn new() -> Self {
		Self::default()
	}

	/// The next foldout drawn flips its state.
	pub fn toggle_foldout(&mut self) -> &mut Self {
		self.toggle_foldout = true;
		self
	}

	/// The next dropdown drawn reports activation.
	pub fn click_dropdown(&mut self) -> &mut Self {
		self.click_dropdown = true;
		self
	}

	/// The next menu shown resolves to the entry with this path.
	///
	/// Without a scripted pick, menus behave as deferred and return nothing.
	pub fn pick(&mut self, path: impl Into<String>) -> &mut Self {
		self.pick = Some(path.into());
		self
	}

	/// The next text field with `label` is edited to `value`.
	pub fn edit(&mut self, label: impl Into<String>, value: impl Into<String>) -> &mut Self {
		self.edits.insert(label.into(), value.into());
		self
	}

	pub fn calls(&self) -> &[PaintCall] {
		&self.calls
	}

	pub fn notices(&self) -> &[Notice] {
		&self.notices
	}

	/// Returns the most recently shown menu.
	pub fn last_menu(&self) -> Option<&Menu> {
		self.calls.iter().rev().find_map(|call| match call {
			PaintCall::Menu { menu, .. } => Some(menu),
			_ => None,
		})
	}

	/// Returns the text of every label and foldout, in drawing order.
	pub fn labels(&self) -> Vec<&str> {
		self.calls
			.iter()
			.filter_map(|call| match call {
				PaintCall::Label { text, .. } | PaintCall::Foldout { text, .. } => Some(text.as_str()),
				_ => None,
			})
			.collect()
	}

	/// Returns the caption of the last dropdown drawn.
	pub fn dropdown_text(&self) -> Option<&str> {
		self.calls.iter().rev().find_map(|call| match call {
			PaintCall::Dropdown { text, .. } => Some(text.as_str()),
			_ => None,
		})
	}

	/// Forgets recorded calls and notices, keeping unconsumed scripts.
	pub fn clear(&mut self) {
		self.calls.clear();
		self.notices.clear();
	}
}

impl Painter for RecordingPainter {
	fn label(&mut self, area: Rect, text: &str) {
		self.calls.push(PaintCall::Label {
			area,
			text: text.to_string(),
		});
	}

	fn foldout(&mut self, area: Rect, expanded: bool, text: &str) -> bool {
		self.calls.push(PaintCall::Foldout {
			area,
			expanded,
			text: text.to_string(),
		});
		expanded ^ std::mem::take(&mut self.toggle_foldout)
	}

	fn dropdown_button(&mut self, area: Rect, text: &str) -> bool {
		self.calls.push(PaintCall::Dropdown {
			area,
			text: text.to_string(),
		});
		std::mem::take(&mut self.click_dropdown)
	}

	fn show_menu(&mut self, anchor: Rect, menu: Menu) -> Option<SelectionCommand> {
		let command = self
			.pick
			.take()
			.and_then(|path| menu.find(&path).map(|entry| entry.command));
		self.calls.push(PaintCall::Menu { anchor, menu });
		command
	}

	fn text_field(&mut self, area: Rect, label: &str, value: &mut String) -> bool {
		let edit = self.edits.remove(label);
		let changed = edit.as_ref().is_some_and(|edit| edit != value);
		if let Some(edit) = edit {
			*value = edit;
		}
		self.calls.push(PaintCall::TextField {
			area,
			label: label.to_string(),
			value: value.clone(),
		});
		changed
	}

	fn notify(&mut self, notice: Notice) {
		tracing::debug!(level = ?notice.level, message = %notice.message, "notice");
		self.notices.push(notice);
	}
}
