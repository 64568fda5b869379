//! Display names for variants.
//!
//! Menus show a variant as `nicify(post_process(type_name))`. The
//! post-processing step is chosen per contract with [`NameStyle`], typically to
//! drop a word every variant of that contract shares (`StandardNameGenerator`
//! under `NameGenerator` reads better as `Standard`).

use std::borrow::Cow;

/// Per-contract post-processing applied to raw type names before display.
#[derive(Debug, Clone, Copy, Default)]
pub enum NameStyle {
	/// Use the type name unchanged.
	#[default]
	Verbatim,
	/// Strip a fixed prefix and suffix when present.
	Strip {
		prefix: &'static str,
		suffix: &'static str,
	},
	/// Strip the leading and trailing words shared by every sibling name.
	///
	/// Needs at least two siblings; a lone variant keeps its full name.
	CommonAffixes,
	/// Arbitrary transform.
	Custom(fn(&str) -> String),
}

impl NameStyle {
	/// Shorthand for stripping a fixed suffix.
	pub const fn strip_suffix(suffix: &'static str) -> Self {
		Self::Strip { prefix: "", suffix }
	}

	/// Applies the style to `raw`, given the names of every variant of the
	/// same contract.
	pub fn apply<'a>(&self, raw: &'a str, siblings: &[&str]) -> Cow<'a, str> {
		match *self {
			Self::Verbatim => Cow::Borrowed(raw),
			Self::Strip { prefix, suffix } => Cow::Borrowed(strip_affixes(raw, prefix, suffix)),
			Self::CommonAffixes => {
				let (prefix, suffix) = common_affixes(siblings);
				Cow::Borrowed(strip_affixes(raw, &prefix, &suffix))
			}
			Self::Custom(transform) => Cow::Owned(transform(raw)),
		}
	}
}

/// Removes `prefix` and `suffix` from `name` when present.
///
/// Never strips a name down to nothing; if removing an affix would leave an
/// empty string, that affix is kept.
pub fn strip_affixes<'a>(name: &'a str, prefix: &str, suffix: &str) -> &'a str {
	let mut out = name;
	if !prefix.is_empty()
		&& let Some(rest) = out.strip_prefix(prefix)
		&& !rest.is_empty()
	{
		out = rest;
	}
	if !suffix.is_empty()
		&& let Some(rest) = out.strip_suffix(suffix)
		&& !rest.is_empty()
	{
		out = rest;
	}
	out
}

/// Splits an identifier into words at underscores, lower-to-upper
/// transitions, acronym ends and digit runs.
///
/// `HTTPServer2Config` becomes `["HTTP", "Server", "2", "Config"]`.
pub fn split_words(ident: &str) -> Vec<&str> {
	let chars: Vec<(usize, char)> = ident.char_indices().collect();
	let mut words = Vec::new();
	let mut start: Option<usize> = None;

	for (i, &(pos, c)) in chars.iter().enumerate() {
		if c == '_' {
			if let Some(s) = start.take() {
				words.push(&ident[s..pos]);
			}
			continue;
		}
		if let Some(s) = start
			&& i > 0
		{
			let prev = chars[i - 1].1;
			let next = chars.get(i + 1).map(|&(_, n)| n);
			let boundary = if c.is_uppercase() {
				prev.is_lowercase()
					|| prev.is_ascii_digit()
					|| (prev.is_uppercase() && next.is_some_and(char::is_lowercase))
			} else if c.is_ascii_digit() {
				!prev.is_ascii_digit()
			} else {
				prev.is_ascii_digit()
			};
			if boundary {
				words.push(&ident[s..pos]);
				start = Some(pos);
			}
		} else if start.is_none() {
			start = Some(pos);
		}
	}
	if let Some(s) = start {
		words.push(&ident[s..]);
	}
	words
}

/// Turns an identifier into a human-readable label.
///
/// Drops member-style prefixes (`m_`, `k` before an uppercase letter, leading
/// underscores), separates words with spaces and capitalizes the first letter:
/// `m_familyNames` becomes `Family Names`.
pub fn nicify(ident: &str) -> String {
	let trimmed = strip_member_prefix(ident);
	let mut out = String::with_capacity(trimmed.len() + 4);
	for word in split_words(trimmed) {
		if out.is_empty() {
			let mut chars = word.chars();
			if let Some(first) = chars.next() {
				out.extend(first.to_uppercase());
				out.push_str(chars.as_str());
			}
		} else {
			out.push(' ');
			out.push_str(word);
		}
	}
	out
}

fn strip_member_prefix(ident: &str) -> &str {
	if let Some(rest) = ident.strip_prefix("m_") {
		return rest;
	}
	let mut chars = ident.chars();
	if chars.next() == Some('k') && chars.next().is_some_and(char::is_uppercase) {
		return &ident[1..];
	}
	ident.trim_start_matches('_')
}

/// Returns the longest word-aligned prefix and suffix shared by all names.
///
/// Affixes are only reported when every name keeps at least one word of its
/// own, and only for two or more names.
fn common_affixes(names: &[&str]) -> (String, String) {
	if names.len() < 2 {
		return (String::new(), String::new());
	}
	let split: Vec<Vec<&str>> = names.iter().map(|n| split_words(n)).collect();
	let shortest = split.iter().map(Vec::len).min().unwrap_or(0);

	let mut lead = 0;
	while lead < shortest && split.iter().all(|w| w[lead] == split[0][lead]) {
		lead += 1;
	}
	let mut trail = 0;
	while trail < shortest - lead
		&& split
			.iter()
			.all(|w| w[w.len() - 1 - trail] == split[0][split[0].len() - 1 - trail])
	{
		trail += 1;
	}
	if lead + trail >= shortest {
		return (String::new(), String::new());
	}

	let first = &split[0];
	(
		first[..lead].concat(),
		first[first.len() - trail..].concat(),
	)
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;
	use rstest::rstest;

	use super::*;

	#[rstest]
	#[case("StandardNameGenerator", "Standard Name Generator")]
	#[case("HTTPServer", "HTTP Server")]
	#[case("Vector3", "Vector 3")]
	#[case("m_familyNames", "Family Names")]
	#[case("kMaxLength", "Max Length")]
	#[case("_hidden_value", "Hidden value")]
	#[case("", "")]
	fn nicify_cases(#[case] raw: &str, #[case] expected: &str) {
		assert_eq!(nicify(raw), expected);
	}

	#[test]
	fn split_words_handles_acronyms_and_digits() {
		assert_eq!(split_words("HTTPServer2Config"), vec!["HTTP", "Server", "2", "Config"]);
		assert_eq!(split_words("snake_case_name"), vec!["snake", "case", "name"]);
	}

	#[test]
	fn strip_affixes_never_empties_a_name() {
		assert_eq!(strip_affixes("StandardNameGenerator", "", "NameGenerator"), "Standard");
		assert_eq!(strip_affixes("NameGenerator", "", "NameGenerator"), "NameGenerator");
		assert_eq!(strip_affixes("LegacyWidget", "Legacy", "Widget"), "Widget");
	}

	#[test]
	fn common_affixes_strip_shared_words() {
		let names = ["FastNameGenerator", "SlowNameGenerator"];
		let style = NameStyle::CommonAffixes;
		assert_eq!(style.apply(names[0], &names), "Fast");
		assert_eq!(style.apply(names[1], &names), "Slow");
	}

	#[test]
	fn common_affixes_keep_lone_variant_intact() {
		let names = ["StandardNameGenerator"];
		assert_eq!(NameStyle::CommonAffixes.apply(names[0], &names), "StandardNameGenerator");
	}

	#[test]
	fn common_affixes_ignore_identical_names() {
		let names = ["Same", "Same"];
		assert_eq!(NameStyle::CommonAffixes.apply("Same", &names), "Same");
	}
}
