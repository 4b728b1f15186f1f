//! Casing conversions for schema identifiers.
//!
//! Words are maximal runs of letters and digits; everything else separates them.

/// Convert to lower camel case: `my_variable_name` -> `myVariableName`.
pub fn to_camel_case(name: &str) -> String {
	let mut out = String::with_capacity(name.len());
	for (idx, word) in words(name).enumerate() {
		if idx == 0 {
			push_with_first(&mut out, word, char::to_lowercase);
		} else {
			push_with_first(&mut out, word, char::to_uppercase);
		}
	}
	out
}

/// Convert to upper camel case: `my_variable_name` -> `MyVariableName`.
pub fn to_pascal_case(name: &str) -> String {
	let mut out = String::with_capacity(name.len());
	for word in words(name) {
		push_with_first(&mut out, word, char::to_uppercase);
	}
	out
}

/// Convert to snake case: `MyVariableName` -> `my_variable_name`.
///
/// Each uppercase letter is lowercased and, unless it starts the input,
/// preceded by `_`. Other characters pass through unchanged.
pub fn to_snake_case(name: &str) -> String {
	let mut out = String::with_capacity(name.len() + name.len() / 2);
	for (idx, ch) in name.chars().enumerate() {
		if ch.is_uppercase() {
			if idx != 0 {
				out.push('_');
			}
			out.extend(ch.to_lowercase());
		} else {
			out.push(ch);
		}
	}
	out
}

fn words(name: &str) -> impl Iterator<Item = &str> {
	name.split(|ch: char| !ch.is_alphanumeric()).filter(|word| !word.is_empty())
}

fn push_with_first<I>(out: &mut String, word: &str, first: fn(char) -> I)
where
	I: Iterator<Item = char>,
{
	let mut chars = word.chars();
	if let Some(head) = chars.next() {
		out.extend(first(head));
		out.push_str(chars.as_str());
	}
}
