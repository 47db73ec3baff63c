use std::collections::BTreeMap;
use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::RenderContext;
use crate::RenderDiagnostic;
use crate::lexer::split_fields;

/// Keys of named fields: letters, digits, `_` and `-`, with inner spaces
/// allowed (`{{…|first name=…}}`).
static FIELD_KEY: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^[\p{L}\p{N}_-](?:[\p{L}\p{N}_ -]*[\p{L}\p{N}_-])?$").unwrap());

/// Highest positional slot a numbered key (`{{…|3=…}}`) may address. Larger
/// keys are kept as ordinary named fields.
pub const MAX_POSITIONAL_SLOT: usize = 64;

/// A parsed construct invocation, `{{name|positional…|key=value…}}`.
///
/// Positional fields keep their source order. Named fields are keyed
/// uniquely; a repeated key keeps its last value. A named field whose key is
/// a positive integer up to [`MAX_POSITIONAL_SLOT`] addresses the positional
/// slot of that (1-based) index. Unnumbered fields fill slots 1, 2, … in
/// order, whatever numbered keys appear between them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Construct {
	/// The construct name, trimmed.
	pub name: String,
	/// Positional fields in order, trimmed.
	pub positional: Vec<String>,
	/// Named fields, trimmed.
	pub named: BTreeMap<String, String>,
	/// Byte span of the construct (markers included) in the text it was
	/// found in.
	pub span: Range<usize>,
	/// Whether trimming changed the name or any field.
	pub had_extra_whitespace: bool,
}

impl Construct {
	/// Total number of fields, the name included.
	pub fn total_fields(&self) -> usize {
		1 + self.positional.len() + self.named.len()
	}

	/// The positional field at `index`, or `""` when absent.
	pub fn arg(&self, index: usize) -> &str {
		self.positional.get(index).map_or("", String::as_str)
	}

	/// The named field `key`, if present and non-empty.
	pub fn named(&self, key: &str) -> Option<&str> {
		self.named
			.get(key)
			.map(String::as_str)
			.filter(|value| !value.is_empty())
	}

	/// The first non-empty named field among `keys`.
	pub fn named_any(&self, keys: &[&str]) -> Option<&str> {
		keys.iter().find_map(|key| self.named(key))
	}

	/// The last positional field, or `""` when there is none.
	pub fn last_field(&self) -> &str {
		self.positional.last().map_or("", String::as_str)
	}
}

/// Parse a construct body (the text between `{{` and `}}`) without emitting
/// diagnostics.
pub fn parse_construct(body: &str) -> Construct {
	parse_fields(body, 0..0).0
}

/// Parse a construct body found at `span` and report superfluous whitespace
/// for names outside the locale's diagnostics skip-set.
pub fn parse_invocation(body: &str, span: Range<usize>, ctx: &mut RenderContext<'_>) -> Construct {
	let (construct, untrimmed) = parse_fields(body, span);

	if construct.had_extra_whitespace && !ctx.rules().skips_diagnostics(&construct.name) {
		tracing::warn!(
			word = ctx.word(),
			name = %construct.name,
			fields = ?untrimmed,
			"superfluous whitespace in construct"
		);
		ctx.push_diagnostic(RenderDiagnostic::ExtraWhitespace {
			word: ctx.word().to_string(),
			name: construct.name.clone(),
			fields: untrimmed,
		});
	}

	construct
}

/// Split `body` into a [`Construct`] and the list of fields (as written)
/// that trimming altered.
fn parse_fields(body: &str, span: Range<usize>) -> (Construct, Vec<String>) {
	let mut fields = split_fields(body).into_iter();
	let mut untrimmed = Vec::new();
	let mut trim = |field: &str| {
		let trimmed = field.trim();
		if trimmed.len() != field.len() {
			untrimmed.push(field.to_string());
		}
		trimmed.to_string()
	};

	let name = fields.next().map(&mut trim).unwrap_or_default();
	let mut slots = BTreeMap::new();
	let mut next_slot = 1;
	let mut named = BTreeMap::new();

	for field in fields {
		let value = trim(field);

		let Some((key, rest)) = value.split_once('=') else {
			slots.insert(next_slot, value);
			next_slot += 1;
			continue;
		};

		let key = key.trim();
		if !FIELD_KEY.is_match(key) {
			slots.insert(next_slot, value);
			next_slot += 1;
			continue;
		}

		let rest = rest.trim().to_string();
		match key.parse::<usize>() {
			Ok(index) if (1..=MAX_POSITIONAL_SLOT).contains(&index) => {
				slots.insert(index, rest);
			}
			_ => {
				named.insert(key.to_string(), rest);
			}
		}
	}

	let last_slot = slots.keys().next_back().copied().unwrap_or(0);
	let positional = (1..=last_slot)
		.map(|index| slots.remove(&index).unwrap_or_default())
		.collect();

	let construct = Construct {
		name,
		positional,
		named,
		span,
		had_extra_whitespace: !untrimmed.is_empty(),
	};

	(construct, untrimmed)
}
