//! Formatting helpers shared by complex-rule expressions and the locale
//! handlers. Every helper emits balanced inline tags only.

/// `<i>text</i>`
pub fn italic(text: &str) -> String {
	format!("<i>{text}</i>")
}

/// `<b>text</b>`
pub fn bold(text: &str) -> String {
	format!("<b>{text}</b>")
}

/// `<sup>text</sup>`
pub fn superscript(text: &str) -> String {
	format!("<sup>{text}</sup>")
}

/// `<sub>text</sub>`
pub fn subscript(text: &str) -> String {
	format!("<sub>{text}</sub>")
}

pub fn small_caps(text: &str) -> String {
	format!("<span style=\"font-variant:small-caps\">{text}</span>")
}

/// `(text)`
pub fn parenthesis(text: &str) -> String {
	format!("({text})")
}

/// `“text”`
pub fn quote(text: &str) -> String {
	format!("“{text}”")
}

/// The qualifier convention: `<i>(text)</i>`.
pub fn term(text: &str) -> String {
	italic(&parenthesis(text))
}

/// Uppercase the first character and leave the rest untouched.
pub fn capitalize(text: &str) -> String {
	let mut chars = text.chars();
	match chars.next() {
		Some(first) => first.to_uppercase().chain(chars).collect(),
		None => String::new(),
	}
}

/// Convert a positive integer to Roman numerals. Zero yields an empty string.
pub fn roman(mut number: u32) -> String {
	const NUMERALS: [(u32, &str); 13] = [
		(1000, "M"),
		(900, "CM"),
		(500, "D"),
		(400, "CD"),
		(100, "C"),
		(90, "XC"),
		(50, "L"),
		(40, "XL"),
		(10, "X"),
		(9, "IX"),
		(5, "V"),
		(4, "IV"),
		(1, "I"),
	];

	let mut result = String::new();
	for (value, numeral) in NUMERALS {
		while number >= value {
			result.push_str(numeral);
			number -= value;
		}
	}
	result
}

/// Join non-empty parts with `separator`, using `last_separator` before the
/// final part: `concat(&["a", "b", "c"], ", ", " and ")` is `a, b and c`.
pub fn concat(parts: &[&str], separator: &str, last_separator: &str) -> String {
	let parts: Vec<&str> = parts.iter().copied().filter(|p| !p.is_empty()).collect();
	match parts.as_slice() {
		[] => String::new(),
		[only] => (*only).to_string(),
		[init @ .., last] => format!("{}{last_separator}{last}", init.join(separator)),
	}
}

/// `A` or `An` depending on the first letter of `next`.
pub fn indefinite_article(next: &str) -> &'static str {
	match next.chars().next().map(|c| c.to_ascii_lowercase()) {
		Some('a' | 'e' | 'i' | 'o' | 'u') => "An",
		_ => "A",
	}
}
