use crate::Construct;
use crate::RenderContext;
use crate::WiktResult;
use crate::helpers::term;
use crate::sandbox;

/// The plain-link construct. It renders its last field whatever the locale.
pub const PLAIN_LINK: &str = "w";

/// Resolve one construct against the current locale's rules.
///
/// The first match wins: the plain link, then the ignored set, complex rules,
/// italic labels and literals, and finally the locale's fallback handler,
/// which owns the arity heuristic for names nothing else recognizes. Only a
/// failing complex rule is an error.
pub fn resolve(construct: &Construct, ctx: &RenderContext<'_>) -> WiktResult<String> {
	let rules = ctx.rules();
	let name = construct.name.as_str();

	if name == PLAIN_LINK {
		return Ok(construct.last_field().to_string());
	}

	if rules.is_ignored(name) {
		return Ok(String::new());
	}

	if rules.complex_rule(name).is_some() {
		return sandbox::evaluate(rules.environment(), construct, ctx);
	}

	if let Some(label) = rules.italic_label(name) {
		return Ok(term(label));
	}

	if let Some(literal) = rules.literal(name) {
		return Ok(literal.to_string());
	}

	Ok(rules.handler().render(construct, ctx))
}
