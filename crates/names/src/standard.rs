use morph_variants::variant;
use rand::RngCore;
use rand::seq::SliceRandom;
use serde::Deserialize;

use crate::{NameError, NameGender, NameGenerator, Pool};

/// Given and middle names for one gender.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct NamePart {
	pub given_names: Vec<String>,
	pub middle_names: Vec<String>,
}

/// Draws one given, one middle and one family name uniformly from pools.
///
/// Masculine and feminine names are drawn from their own pool merged with the
/// neutral one; neutral names only from the neutral pool.
///
/// ```toml
/// family-names = ["Okafor", "Lindqvist"]
///
/// [neutral]
/// given-names = ["Robin"]
/// middle-names = ["Ash"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct StandardNameGenerator {
	pub feminine: NamePart,
	pub masculine: NamePart,
	pub neutral: NamePart,
	pub family_names: Vec<String>,
}

impl StandardNameGenerator {
	/// Parses name pools from TOML.
	pub fn from_toml_str(input: &str) -> Result<Self, NameError> {
		toml::from_str(input).map_err(|e| NameError::Parse(e.to_string()))
	}

	/// Returns the gendered part, or `None` for neutral.
	fn gendered(&self, gender: NameGender) -> Option<&NamePart> {
		match gender {
			NameGender::Masculine => Some(&self.masculine),
			NameGender::Feminine => Some(&self.feminine),
			NameGender::Neutral => None,
		}
	}

	/// Returns every given name available for `gender`.
	pub fn given_names(&self, gender: NameGender) -> Vec<&str> {
		self.merged(gender, |part| &part.given_names)
	}

	/// Returns every middle name available for `gender`.
	pub fn middle_names(&self, gender: NameGender) -> Vec<&str> {
		self.merged(gender, |part| &part.middle_names)
	}

	fn merged<'a>(&'a self, gender: NameGender, names: fn(&NamePart) -> &Vec<String>) -> Vec<&'a str> {
		self.gendered(gender)
			.into_iter()
			.chain(std::iter::once(&self.neutral))
			.flat_map(|part| names(part).iter().map(String::as_str))
			.collect()
	}
}

fn pick<'a>(
	names: &[&'a str],
	pool: Pool,
	gender: NameGender,
	rng: &mut dyn RngCore,
) -> Result<&'a str, NameError> {
	names
		.choose(rng)
		.copied()
		.ok_or(NameError::EmptyPool { pool, gender })
}

impl NameGenerator for StandardNameGenerator {
	fn generate_name(&self, gender: NameGender, rng: &mut dyn RngCore) -> Result<String, NameError> {
		let family: Vec<&str> = self.family_names.iter().map(String::as_str).collect();

		let given = pick(&self.given_names(gender), Pool::Given, gender, &mut *rng)?;
		let middle = pick(&self.middle_names(gender), Pool::Middle, gender, &mut *rng)?;
		let family = pick(&family, Pool::Family, gender, rng)?;

		tracing::trace!(%gender, given, middle, family, "generated name");
		Ok(format!("{given} {middle} {family}"))
	}
}

variant!(NameGenerator, StandardNameGenerator, {
	description: "Draws given, middle and family names from editable pools",
	default: true,
});

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;
	use rand::SeedableRng;
	use rand::rngs::StdRng;
	use rstest::rstest;

	use super::*;

	fn names(list: &[&str]) -> Vec<String> {
		list.iter().map(|s| s.to_string()).collect()
	}

	fn sample() -> StandardNameGenerator {
		StandardNameGenerator {
			feminine: NamePart {
				given_names: names(&["Ada"]),
				middle_names: names(&["Grace"]),
			},
			masculine: NamePart {
				given_names: names(&["Alan"]),
				middle_names: names(&["Mathison"]),
			},
			neutral: NamePart {
				given_names: names(&["Robin"]),
				middle_names: names(&["Ash"]),
			},
			family_names: names(&["Okafor"]),
		}
	}

	#[rstest]
	#[case(NameGender::Feminine, vec!["Ada", "Robin"])]
	#[case(NameGender::Masculine, vec!["Alan", "Robin"])]
	#[case(NameGender::Neutral, vec!["Robin"])]
	fn gendered_pools_include_neutral(#[case] gender: NameGender, #[case] expected: Vec<&str>) {
		assert_eq!(sample().given_names(gender), expected);
	}

	#[test]
	fn neutral_name_uses_only_neutral_pools() {
		let mut rng = StdRng::seed_from_u64(7);

		for _ in 0..16 {
			assert_eq!(
				sample().generate_name(NameGender::Neutral, &mut rng).unwrap(),
				"Robin Ash Okafor"
			);
		}
	}

	#[test]
	fn gendered_name_draws_from_merged_pools() {
		let generator = sample();
		let mut rng = StdRng::seed_from_u64(42);

		for _ in 0..32 {
			let name = generator.generate_name(NameGender::Feminine, &mut rng).unwrap();
			let parts: Vec<&str> = name.split(' ').collect();
			assert_eq!(parts.len(), 3);
			assert!(["Ada", "Robin"].contains(&parts[0]), "{name}");
			assert!(["Grace", "Ash"].contains(&parts[1]), "{name}");
			assert_eq!(parts[2], "Okafor");
		}
	}

	#[rstest]
	#[case::no_given(|g: &mut StandardNameGenerator| g.neutral.given_names.clear(), Pool::Given)]
	#[case::no_middle(|g: &mut StandardNameGenerator| g.neutral.middle_names.clear(), Pool::Middle)]
	#[case::no_family(|g: &mut StandardNameGenerator| g.family_names.clear(), Pool::Family)]
	fn empty_pool_is_an_error(#[case] drain: fn(&mut StandardNameGenerator), #[case] pool: Pool) {
		let mut generator = sample();
		drain(&mut generator);
		let mut rng = StdRng::seed_from_u64(0);

		assert_eq!(
			generator.generate_name(NameGender::Neutral, &mut rng),
			Err(NameError::EmptyPool {
				pool,
				gender: NameGender::Neutral,
			})
		);
	}

	#[test]
	fn default_generator_has_no_names() {
		let mut rng = StdRng::seed_from_u64(0);

		assert!(matches!(
			StandardNameGenerator::default().generate_name(NameGender::Masculine, &mut rng),
			Err(NameError::EmptyPool { pool: Pool::Given, .. })
		));
	}

	#[test]
	fn pools_parse_from_toml() {
		let generator = StandardNameGenerator::from_toml_str(
			r#"
			family-names = ["Okafor"]

			[neutral]
			given-names = ["Robin"]
			middle-names = ["Ash"]
			"#,
		)
		.unwrap();

		assert_eq!(generator.given_names(NameGender::Masculine), vec!["Robin"]);
		assert_eq!(generator.family_names, names(&["Okafor"]));
		assert!(matches!(
			StandardNameGenerator::from_toml_str("nicknames = []"),
			Err(NameError::Parse(_))
		));
	}
}
