//! Editor layout for [`StandardNameGenerator`].

use morph_selector::{Metrics, Painter, Rect, VariantRenderer};

use crate::{NamePart, StandardNameGenerator};

const LIST_SEPARATOR: &str = ", ";

/// Draws the feminine, masculine and neutral parts and the family names
/// top-to-bottom, one spacing apart. Each list is edited as comma-separated
/// text.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardNameGeneratorRenderer;

fn part_height(metrics: &Metrics) -> u16 {
	2 * metrics.line_height
}

fn list_field(painter: &mut dyn Painter, area: Rect, label: &str, names: &mut Vec<String>) {
	let mut text = names.join(LIST_SEPARATOR);
	if painter.text_field(area, label, &mut text) {
		*names = split_list(&text);
		tracing::trace!(label, count = names.len(), "name list edited");
	}
}

fn draw_part(painter: &mut dyn Painter, area: Rect, title: &str, part: &mut NamePart, metrics: &Metrics) {
	let line = metrics.line_height;
	list_field(painter, area.row(line), &format!("{title} given names"), &mut part.given_names);
	list_field(
		painter,
		area.below(line).row(line),
		&format!("{title} middle names"),
		&mut part.middle_names,
	);
}

/// Splits comma-separated text into trimmed, non-empty names.
pub(crate) fn split_list(text: &str) -> Vec<String> {
	text.split(',')
		.map(str::trim)
		.filter(|name| !name.is_empty())
		.map(str::to_string)
		.collect()
}

impl VariantRenderer<StandardNameGenerator> for StandardNameGeneratorRenderer {
	fn height(&self, _value: &StandardNameGenerator, metrics: &Metrics) -> u16 {
		3 * (part_height(metrics) + metrics.vertical_spacing) + metrics.line_height
	}

	fn draw(&self, area: Rect, value: &mut StandardNameGenerator, painter: &mut dyn Painter, metrics: &Metrics) {
		let step = part_height(metrics) + metrics.vertical_spacing;
		let parts = [
			("Feminine", &mut value.feminine),
			("Masculine", &mut value.masculine),
			("Neutral", &mut value.neutral),
		];

		let mut offset = 0;
		for (title, part) in parts {
			draw_part(painter, area.below(offset).row(part_height(metrics)), title, part, metrics);
			offset += step;
		}
		list_field(
			painter,
			area.below(offset).row(metrics.line_height),
			"Family names",
			&mut value.family_names,
		);
	}
}

#[cfg(test)]
mod tests {
	use morph_selector::{PaintCall, RecordingPainter};
	use pretty_assertions::assert_eq;
	use rstest::rstest;

	use super::*;

	#[rstest]
	#[case("Ada, Grace", vec!["Ada", "Grace"])]
	#[case(" Ada ,, ", vec!["Ada"])]
	#[case("", vec![])]
	fn lists_split_on_commas(#[case] text: &str, #[case] expected: Vec<&str>) {
		assert_eq!(split_list(text), expected);
	}

	#[test]
	fn height_covers_four_fields_and_spacing() {
		let metrics = Metrics::default();

		assert_eq!(StandardNameGeneratorRenderer.height(&StandardNameGenerator::default(), &metrics), 10);
	}

	#[test]
	fn fields_are_stacked_with_spacing() {
		let metrics = Metrics::default();
		let mut value = StandardNameGenerator::default();
		value.family_names = vec!["Okafor".into(), "Lindqvist".into()];
		let mut painter = RecordingPainter::new();

		StandardNameGeneratorRenderer.draw(Rect::new(2, 3, 30, 10), &mut value, &mut painter, &metrics);

		let fields: Vec<(u16, &str)> = painter
			.calls()
			.iter()
			.filter_map(|call| match call {
				PaintCall::TextField { area, label, .. } => Some((area.y, label.as_str())),
				_ => None,
			})
			.collect();
		assert_eq!(
			fields,
			vec![
				(3, "Feminine given names"),
				(4, "Feminine middle names"),
				(6, "Masculine given names"),
				(7, "Masculine middle names"),
				(9, "Neutral given names"),
				(10, "Neutral middle names"),
				(12, "Family names"),
			]
		);
		assert!(matches!(
			painter.calls().last(),
			Some(PaintCall::TextField { value, .. }) if value == "Okafor, Lindqvist"
		));
	}

	#[test]
	fn edits_replace_lists() {
		let mut value = StandardNameGenerator::default();
		let mut painter = RecordingPainter::new();
		painter.edit("Neutral given names", "Robin, Sam");

		StandardNameGeneratorRenderer.draw(Rect::new(0, 0, 30, 10), &mut value, &mut painter, &Metrics::default());

		assert_eq!(value.neutral.given_names, vec!["Robin".to_string(), "Sam".to_string()]);
		assert!(value.feminine.given_names.is_empty());
	}
}
