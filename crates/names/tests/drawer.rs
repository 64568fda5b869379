use morph_names::{NameGender, NameGenerator, StandardNameGenerator, controller, generate};
use morph_selector::{DrawerConfig, FieldBinding, FieldId, MemoryField, Rect, RecordingPainter};
use morph_variants::{Contract, RegistryEntry};
use pretty_assertions::assert_eq;

#[test]
fn standard_generator_is_the_registered_default() {
	let registry = <dyn NameGenerator as Contract>::registry();

	assert_eq!(registry.default_variant().map(|v| v.name()), Some("StandardNameGenerator"));
	assert_eq!(
		registry.get("morph-names::StandardNameGenerator").map(|v| v.description()),
		Some("Draws given, middle and family names from editable pools")
	);
}

#[test]
fn menu_shows_post_processed_name() {
	let controller = controller(DrawerConfig::default().with_none_allowed(true));
	let field = MemoryField::<dyn NameGenerator>::polymorphic(FieldId(1));

	let menu = controller.build_menu(&field);
	let paths: Vec<&str> = menu.entries().map(|e| e.path.as_str()).collect();

	assert_eq!(paths, vec!["None", "Standard"]);
	assert_eq!(menu.checked().map(|e| e.path.as_str()), Some("None"));
}

#[test]
fn editing_pools_through_the_drawer() {
	let controller = controller(DrawerConfig::default());
	let mut field = MemoryField::<dyn NameGenerator>::polymorphic(FieldId(1));

	assert_eq!(controller.measure_height(&mut field), 1);
	assert_eq!(controller.selection_label(&field), "Standard");

	let mut painter = RecordingPainter::new();
	painter
		.toggle_foldout()
		.edit("Neutral given names", "Robin")
		.edit("Neutral middle names", "Ash")
		.edit("Family names", "Okafor");
	controller.render(Rect::new(0, 0, 60, 12), &mut field, "Names", &mut painter);

	assert_eq!(controller.measure_height(&mut field), 1 + 1 + 10);
	let generator = field.value().unwrap();
	assert_eq!(generate(generator, NameGender::Masculine).unwrap(), "Robin Ash Okafor");

	let standard = generator.as_any().downcast_ref::<StandardNameGenerator>().unwrap();
	assert_eq!(standard.neutral.given_names, vec!["Robin".to_string()]);
}

#[test]
fn plain_standard_field_renders_without_selector() {
	let controller = controller(DrawerConfig::default());
	let mut field = MemoryField::<dyn NameGenerator>::plain::<StandardNameGenerator>(
		FieldId(2),
		Box::new(StandardNameGenerator::default()),
	);
	let mut painter = RecordingPainter::new();

	assert_eq!(controller.measure_height(&mut field), 10);
	controller.render(Rect::new(0, 0, 60, 10), &mut field, "Names", &mut painter);

	assert!(painter.dropdown_text().is_none());
	assert_eq!(painter.calls().len(), 7);
}
