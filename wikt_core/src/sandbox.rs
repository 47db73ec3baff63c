//! Evaluation of complex rules.
//!
//! A complex rule is a [`minijinja`] expression. Each locale owns one
//! environment holding the helper library and one compiled template per rule,
//! named after the rule. An expression can read the construct (`args`,
//! `kwargs`, `name`), the current `word` and `locale`, and call the helpers
//! below. Nothing in the environment performs I/O or keeps state between
//! evaluations.
//!
//! ```text
//! italic(args|last)
//! lang(args[0]) ~ " " ~ italic(args[1]) ~ (" " ~ quote(kwargs.t) if kwargs.t else "")
//! small_caps(roman(args[0])) ~ superscript("e") ~ " siècle"
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

use minijinja::AutoEscape;
use minijinja::Environment;
use minijinja::Error;
use minijinja::ErrorKind;
use minijinja::Value;
use minijinja::context;
use minijinja::escape_formatter;

use crate::Construct;
use crate::RenderContext;
use crate::WiktError;
use crate::WiktResult;
use crate::helpers;

pub(crate) type LookupTable = Arc<BTreeMap<String, String>>;

/// Build the sandbox environment for one locale. `labels` and `languages`
/// back the `label()` and `lang()` lookups.
pub(crate) fn build_environment(labels: LookupTable, languages: LookupTable) -> Environment<'static> {
	let mut env = Environment::new();
	env.set_auto_escape_callback(|_| AutoEscape::None);
	// `none` renders as empty text, like `undefined`.
	env.set_formatter(|out, state, value| {
		if value.is_none() {
			Ok(())
		} else {
			escape_formatter(out, state, value)
		}
	});

	env.add_function("italic", |value: Value| helpers::italic(&text_of(&value)));
	env.add_function("bold", |value: Value| helpers::bold(&text_of(&value)));
	env.add_function("superscript", |value: Value| {
		helpers::superscript(&text_of(&value))
	});
	env.add_function("subscript", |value: Value| helpers::subscript(&text_of(&value)));
	env.add_function("small_caps", |value: Value| {
		helpers::small_caps(&text_of(&value))
	});
	env.add_function("capitalize", |value: Value| {
		helpers::capitalize(&text_of(&value))
	});
	env.add_function("term", |value: Value| helpers::term(&text_of(&value)));
	env.add_function("parenthesis", |value: Value| {
		helpers::parenthesis(&text_of(&value))
	});
	env.add_function("quote", |value: Value| helpers::quote(&text_of(&value)));
	env.add_function("roman", roman);
	env.add_function("label", move |code: Value| lookup(&labels, &code));
	env.add_function("lang", move |code: Value| lookup(&languages, &code));

	env
}

/// Compile the complex rule `name` into `env`. The source must be a single
/// expression; syntax errors surface here rather than at render time.
pub(crate) fn compile_rule(
	env: &mut Environment<'static>,
	locale: &str,
	name: &str,
	source: &str,
) -> WiktResult<()> {
	let compile_error = |e: Error| {
		WiktError::RuleCompile {
			locale: locale.to_string(),
			name: name.to_string(),
			reason: e.to_string(),
		}
	};

	env.compile_expression_owned(source.to_string())
		.map_err(compile_error)?;
	env.add_template_owned(name.to_string(), format!("{{{{ {source} }}}}"))
		.map_err(compile_error)
}

/// Evaluate the compiled rule named after `construct`.
pub(crate) fn evaluate(
	env: &Environment<'static>,
	construct: &Construct,
	ctx: &RenderContext<'_>,
) -> WiktResult<String> {
	env.get_template(&construct.name)
		.and_then(|template| {
			template.render(context! {
				args => &construct.positional,
				kwargs => &construct.named,
				name => &construct.name,
				word => ctx.word(),
				locale => ctx.locale(),
			})
		})
		.map_err(|e| evaluation_error(construct, ctx, &e))
}

fn evaluation_error(construct: &Construct, ctx: &RenderContext<'_>, error: &Error) -> WiktError {
	tracing::debug!(word = ctx.word(), name = %construct.name, %error, "complex rule failed");
	WiktError::RuleEvaluation {
		word: ctx.word().to_string(),
		name: construct.name.clone(),
		reason: error.to_string(),
	}
}

/// Undefined and `none` values read as empty text.
fn text_of(value: &Value) -> String {
	if value.is_undefined() || value.is_none() {
		String::new()
	} else {
		value.to_string()
	}
}

fn lookup(table: &BTreeMap<String, String>, code: &Value) -> String {
	let code = text_of(code);
	table.get(&code).cloned().unwrap_or(code)
}

fn roman(value: Value) -> Result<String, Error> {
	let text = text_of(&value);
	let number: u32 = text.trim().parse().map_err(|_| {
		Error::new(
			ErrorKind::InvalidOperation,
			format!("roman() expects a positive integer, got `{text}`"),
		)
	})?;

	Ok(helpers::roman(number))
}
