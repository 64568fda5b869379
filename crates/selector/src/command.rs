//! Replayable selection commands.

use crate::binding::FieldId;

/// What a menu entry selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Choice {
	/// Clear the field.
	None,
	/// Bind a fresh instance of the variant with this registry id.
	Variant(&'static str),
}

/// A selection for one field, dispatched through
/// [`SelectionController::apply`](crate::SelectionController::apply).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SelectionCommand {
	pub field: FieldId,
	pub choice: Choice,
}

impl SelectionCommand {
	pub const fn clear(field: FieldId) -> Self {
		Self {
			field,
			choice: Choice::None,
		}
	}

	pub const fn variant(field: FieldId, id: &'static str) -> Self {
		Self {
			field,
			choice: Choice::Variant(id),
		}
	}
}
