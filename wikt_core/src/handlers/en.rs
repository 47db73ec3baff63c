use super::DefaultHandler;
use super::LocaleTemplateHandler;
use crate::Construct;
use crate::RenderContext;
use crate::helpers::bold;
use crate::helpers::concat;
use crate::helpers::indefinite_article;
use crate::helpers::italic;
use crate::helpers::parenthesis;
use crate::helpers::quote;
use crate::helpers::term;

/// Fallback families for English-language entries. The first positional
/// field of these constructs is the entry's language code.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishHandler;

impl LocaleTemplateHandler for EnglishHandler {
	fn locale(&self) -> &str {
		"en"
	}

	fn render(&self, construct: &Construct, ctx: &RenderContext<'_>) -> String {
		match construct.name.as_str() {
			"bor" | "der" | "inh" => etymology(construct, ctx, ""),
			"lbor" => etymology(construct, ctx, "Learned borrowing from "),
			"cog" | "noncog" => cognate(construct, ctx),
			"compound" | "af" | "affix" => compound(construct),
			"prefix" | "suffix" | "confix" => affix(construct),
			"place" => place(construct),
			"given name" => given_name(construct),
			"surname" => surname(construct),
			"lb" | "lbl" | "label" => labels(construct, ctx),
			"gloss" => parenthesis(construct.arg(0)),
			name if name.ends_with(" of") => form_of(construct),
			_ => DefaultHandler.render(construct, ctx),
		}
	}
}

/// The mentioned term, its transliteration and its gloss:
/// `<i>term</i> (tr) (“gloss”)`.
fn mention(construct: &Construct, term_index: usize) -> String {
	let alt = construct
		.named("alt")
		.unwrap_or_else(|| construct.arg(term_index + 1));
	let shown = if alt.is_empty() {
		construct.arg(term_index)
	} else {
		alt
	};
	let gloss = construct
		.named_any(&["t", "gloss"])
		.unwrap_or_else(|| construct.arg(term_index + 2));

	let mut parts = Vec::new();
	if !shown.is_empty() {
		parts.push(italic(shown));
	}
	if let Some(tr) = construct.named("tr") {
		parts.push(parenthesis(tr));
	}
	if !gloss.is_empty() {
		parts.push(parenthesis(&quote(gloss)));
	}

	parts.join(" ")
}

/// `{{bor|en|la|bonus}}` → `Latin <i>bonus</i>`.
fn etymology(construct: &Construct, ctx: &RenderContext<'_>, lead: &str) -> String {
	let language = ctx.rules().language(construct.arg(1));
	if construct.named("notext").is_some() {
		return mention(construct, 2);
	}

	let phrase = concat(&[language, &mention(construct, 2)], " ", " ");
	format!("{lead}{phrase}")
}

/// `{{cog|fr|bon}}` → `French <i>bon</i>`.
fn cognate(construct: &Construct, ctx: &RenderContext<'_>) -> String {
	let language = ctx.rules().language(construct.arg(0));
	concat(&[language, &mention(construct, 1)], " ", " ")
}

/// `{{compound|en|foot|ball}}` → `<i>foot</i> + <i>ball</i>`.
fn compound(construct: &Construct) -> String {
	let parts: Vec<String> = construct
		.positional
		.iter()
		.skip(1)
		.filter(|part| !part.is_empty())
		.map(|part| italic(part))
		.collect();
	parts.join(" + ")
}

/// `{{prefix|en|un|do}}` → `<i>un-</i> + <i>do</i>`,
/// `{{suffix|en|do|er}}` → `<i>do</i> + <i>-er</i>`,
/// `{{confix|en|neo|logism}}` → `<i>neo-</i> + <i>-logism</i>`.
fn affix(construct: &Construct) -> String {
	let with_hyphen = |part: &str, leading: bool| {
		if part.is_empty() || part.starts_with('-') || part.ends_with('-') {
			part.to_string()
		} else if leading {
			format!("-{part}")
		} else {
			format!("{part}-")
		}
	};

	let (first, second, third) = (construct.arg(1), construct.arg(2), construct.arg(3));
	let parts = match construct.name.as_str() {
		"prefix" => vec![with_hyphen(first, false), second.to_string()],
		"suffix" => vec![first.to_string(), with_hyphen(second, true)],
		_ if third.is_empty() => vec![with_hyphen(first, false), with_hyphen(second, true)],
		_ => {
			vec![
				with_hyphen(first, false),
				second.to_string(),
				with_hyphen(third, true),
			]
		}
	};

	parts
		.iter()
		.filter(|part| !part.is_empty())
		.map(|part| italic(part))
		.collect::<Vec<_>>()
		.join(" + ")
}

/// `{{place|en|city|s/Texas|c/USA}}` → `A city in Texas, USA`.
fn place(construct: &Construct) -> String {
	let placetype = construct.arg(1).split('/').next().unwrap_or_default();
	if placetype.is_empty() {
		return String::new();
	}

	let holonyms: Vec<&str> = construct
		.positional
		.iter()
		.skip(2)
		.map(|holonym| holonym.rsplit('/').next().unwrap_or(holonym))
		.filter(|holonym| !holonym.is_empty())
		.collect();

	let article = indefinite_article(placetype);
	if holonyms.is_empty() {
		format!("{article} {placetype}")
	} else {
		format!("{article} {placetype} in {}", holonyms.join(", "))
	}
}

/// `{{given name|en|male}}` → `A male given name`.
fn given_name(construct: &Construct) -> String {
	let gender = construct.named("gender").unwrap_or_else(|| construct.arg(1));
	let phrase = if gender.is_empty() {
		"A given name".to_string()
	} else {
		format!("{} {gender} given name", indefinite_article(gender))
	};

	with_origin(phrase, construct)
}

/// `{{surname|en|from=Old English}}` → `A surname, from Old English`.
fn surname(construct: &Construct) -> String {
	with_origin("A surname".to_string(), construct)
}

fn with_origin(phrase: String, construct: &Construct) -> String {
	match construct.named("from") {
		Some(origin) => format!("{phrase}, from {origin}"),
		None => phrase,
	}
}

/// `{{lb|en|archaic|_|slang|or|dialectal}}` → `<i>(archaic slang or
/// dialectal)</i>`. Labels are looked up in the locale's label table.
fn labels(construct: &Construct, ctx: &RenderContext<'_>) -> String {
	let mut joined = String::new();
	let mut separator = "";

	for code in construct.positional.iter().skip(1) {
		match code.as_str() {
			"" => {}
			"_" => separator = " ",
			"or" | "and" => separator = if code == "or" { " or " } else { " and " },
			_ => {
				if !joined.is_empty() {
					joined.push_str(separator);
				}
				joined.push_str(ctx.rules().label(code));
				separator = ", ";
			}
		}
	}

	if joined.is_empty() {
		String::new()
	} else {
		term(&joined)
	}
}

/// `{{plural of|en|cat}}` → `plural of <b>cat</b>`.
fn form_of(construct: &Construct) -> String {
	let target = match construct.arg(2) {
		"" => construct.arg(1),
		alt => alt,
	};

	if target.is_empty() {
		construct.name.clone()
	} else {
		format!("{} {}", construct.name, bold(target))
	}
}
