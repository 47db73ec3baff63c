use super::DefaultHandler;
use super::LocaleTemplateHandler;
use crate::Construct;
use crate::RenderContext;
use crate::helpers::concat;
use crate::helpers::italic;
use crate::helpers::parenthesis;
use crate::helpers::roman;
use crate::helpers::small_caps;
use crate::helpers::superscript;

/// Fallback families for French-language entries.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrenchHandler;

impl LocaleTemplateHandler for FrenchHandler {
	fn locale(&self) -> &str {
		"fr"
	}

	fn render(&self, construct: &Construct, ctx: &RenderContext<'_>) -> String {
		match construct.name.as_str() {
			"étyl" => etyl(construct, ctx),
			"composé de" => compose_de(construct),
			"siècle" => siecle(construct),
			"lien" => {
				construct
					.named("sens")
					.unwrap_or_else(|| construct.arg(0))
					.to_string()
			}
			"lang" => construct.arg(1).to_string(),
			"prénom" => prenom(construct),
			"nom w pc" => nom_w_pc(construct),
			_ => DefaultHandler.render(construct, ctx),
		}
	}
}

/// `« text »` with non-breaking spaces.
fn guillemets(text: &str) -> String {
	format!("«\u{a0}{text}\u{a0}»")
}

/// `{{étyl|la|fr|mot=bonus|sens=bon}}` → `latin <i>bonus</i> (« bon »)`.
fn etyl(construct: &Construct, ctx: &RenderContext<'_>) -> String {
	let language = ctx.rules().language(construct.arg(0));
	let word = construct.named("mot").unwrap_or_else(|| construct.arg(2));

	let mut parts = vec![language.to_string()];
	if !word.is_empty() {
		parts.push(italic(word));
	}
	if let Some(tr) = construct.named("tr") {
		parts.push(italic(tr));
	}
	if let Some(sense) = construct.named("sens") {
		parts.push(parenthesis(&guillemets(sense)));
	}

	parts.join(" ")
}

/// `{{composé de|porte|manteau|lang=fr}}` → `composé de <i>porte</i> et de
/// <i>manteau</i>`. `m=1` capitalizes the leading word.
fn compose_de(construct: &Construct) -> String {
	let parts: Vec<String> = construct
		.positional
		.iter()
		.filter(|part| !part.is_empty())
		.map(|part| italic(part))
		.collect();
	let parts: Vec<&str> = parts.iter().map(String::as_str).collect();

	let lead = if construct.named("m").is_some() {
		"Composé de"
	} else {
		"composé de"
	};

	if parts.is_empty() {
		return lead.to_string();
	}

	format!("{lead} {}", concat(&parts, ", ", " et de "))
}

/// `{{siècle|16}}` → small-caps `XVI` followed by `<sup>e</sup> siècle`.
/// A field that is not an integer is taken to be a numeral already.
fn siecle(construct: &Construct) -> String {
	let century = construct.arg(0);
	if century.is_empty() {
		return String::new();
	}

	let (numeral, suffix) = match century.parse::<u32>() {
		Ok(1) => ("I".to_string(), "er"),
		Ok(number) => (roman(number), "e"),
		Err(_) => (century.to_uppercase(), if century == "I" { "er" } else { "e" }),
	};

	format!("{}{} siècle", small_caps(&numeral), superscript(suffix))
}

/// `{{prénom|fr|m}}` → `Prénom masculin`.
fn prenom(construct: &Construct) -> String {
	let gender = match construct.arg(1) {
		"m" | "masculin" => " masculin",
		"f" | "féminin" => " féminin",
		"mf" | "mixte" | "épicène" => " épicène",
		_ => "",
	};

	format!("Prénom{gender}")
}

/// `{{nom w pc|Victor|Hugo}}` → `Victor` followed by `Hugo` in small caps.
fn nom_w_pc(construct: &Construct) -> String {
	let (first, last) = (construct.arg(0), construct.arg(1));
	if last.is_empty() {
		return first.to_string();
	}

	concat(&[first, &small_caps(last)], " ", " ")
}
