//! Layout rectangles handed to host drawing primitives.

/// A rectangle with position and size, in host layout units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
	pub x: u16,
	pub y: u16,
	pub width: u16,
	pub height: u16,
}

impl Rect {
	/// Creates a new rectangle.
	pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
		Self {
			x,
			y,
			width,
			height,
		}
	}

	/// Returns true if the rectangle has zero area.
	pub const fn is_empty(&self) -> bool {
		self.width == 0 || self.height == 0
	}

	/// Returns the right edge x coordinate (exclusive).
	pub const fn right(&self) -> u16 {
		self.x.saturating_add(self.width)
	}

	/// Returns the bottom edge y coordinate (exclusive).
	pub const fn bottom(&self) -> u16 {
		self.y.saturating_add(self.height)
	}

	/// Returns the same rectangle with a different height.
	pub const fn with_height(self, height: u16) -> Self {
		Self { height, ..self }
	}

	/// Returns the topmost row of `height` units.
	pub fn row(self, height: u16) -> Self {
		self.with_height(height.min(self.height))
	}

	/// Moves the top edge down by `dy`, shrinking the height.
	pub fn below(self, dy: u16) -> Self {
		let dy = dy.min(self.height);
		Self {
			y: self.y.saturating_add(dy),
			height: self.height - dy,
			..self
		}
	}

	/// Moves the left edge right by `dx`, shrinking the width.
	pub fn indent(self, dx: u16) -> Self {
		let dx = dx.min(self.width);
		Self {
			x: self.x.saturating_add(dx),
			width: self.width - dx,
			..self
		}
	}

	/// Splits a row into a label column of `label_width` and the remainder,
	/// separated by `gap`.
	pub fn split_label(self, label_width: u16, gap: u16) -> (Self, Self) {
		let label_width = label_width.min(self.width);
		let label = Self {
			width: label_width,
			..self
		};
		(label, self.indent(label_width.saturating_add(gap)))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn split_label_leaves_gap() {
		let (label, field) = Rect::new(2, 5, 40, 1).split_label(10, 1);

		assert_eq!(label, Rect::new(2, 5, 10, 1));
		assert_eq!(field, Rect::new(13, 5, 29, 1));
	}

	#[test]
	fn split_label_clamps_to_narrow_rows() {
		let (label, field) = Rect::new(0, 0, 6, 1).split_label(10, 1);

		assert_eq!(label.width, 6);
		assert!(field.is_empty());
	}

	#[test]
	fn below_and_indent_shrink() {
		let area = Rect::new(0, 0, 20, 10).below(3).indent(2);

		assert_eq!(area, Rect::new(2, 3, 18, 7));
		assert_eq!(area.bottom(), 10);
		assert_eq!(area.right(), 20);
	}
}
