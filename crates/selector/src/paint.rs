//! Host drawing primitives.

use crate::command::SelectionCommand;
use crate::geometry::Rect;
use crate::menu::Menu;
use crate::notice::Notice;

/// Immediate-mode drawing surface supplied by the host UI toolkit.
pub trait Painter {
	/// Draws a static label.
	fn label(&mut self, area: Rect, text: &str);

	/// Draws a foldout toggle and returns its new expanded state.
	fn foldout(&mut self, area: Rect, expanded: bool, text: &str) -> bool;

	/// Draws a dropdown button and returns true if it was activated.
	fn dropdown_button(&mut self, area: Rect, text: &str) -> bool;

	/// Shows `menu` below `anchor`.
	///
	/// Hosts that can resolve the pick within the same event return it here
	/// and the controller applies it immediately. Hosts with deferred menus
	/// return `None` and later dispatch the entry's command through
	/// [`SelectionController::apply`](crate::SelectionController::apply).
	fn show_menu(&mut self, anchor: Rect, menu: Menu) -> Option<SelectionCommand>;

	/// Draws an editable text field and returns true if `value` changed.
	fn text_field(&mut self, area: Rect, label: &str, value: &mut String) -> bool;

	/// Shows a transient notice.
	fn notify(&mut self, notice: Notice);
}
