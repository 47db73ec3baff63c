use serde::Serialize;

use crate::LocaleRuleSet;

/// A non-fatal notice about malformed input. Processing always continues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[non_exhaustive]
pub enum RenderDiagnostic {
	/// A construct's name or fields carried surrounding whitespace. The
	/// trimmed form was used.
	ExtraWhitespace {
		/// The word being rendered.
		word: String,
		/// The construct name, trimmed.
		name: String,
		/// The fields whose trimmed form differs, as written in the source.
		fields: Vec<String>,
	},
}

impl std::fmt::Display for RenderDiagnostic {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::ExtraWhitespace { word, name, fields } => {
				write!(
					f,
					"superfluous whitespace in `{name}` while rendering `{word}`: {fields:?}"
				)
			}
		}
	}
}

/// State for a single render call: the locale's rules, the word being
/// processed and the diagnostics collected so far. Discarded when the call
/// returns.
#[derive(Debug)]
pub struct RenderContext<'a> {
	rules: &'a LocaleRuleSet,
	word: &'a str,
	diagnostics: Vec<RenderDiagnostic>,
}

impl<'a> RenderContext<'a> {
	pub fn new(rules: &'a LocaleRuleSet, word: &'a str) -> Self {
		Self {
			rules,
			word,
			diagnostics: Vec::new(),
		}
	}

	/// The rule set of the current locale.
	pub fn rules(&self) -> &'a LocaleRuleSet {
		self.rules
	}

	/// The word whose markup is being rendered.
	pub fn word(&self) -> &'a str {
		self.word
	}

	pub fn locale(&self) -> &'a str {
		self.rules.locale()
	}

	pub(crate) fn push_diagnostic(&mut self, diagnostic: RenderDiagnostic) {
		self.diagnostics.push(diagnostic);
	}

	pub(crate) fn into_diagnostics(self) -> Vec<RenderDiagnostic> {
		self.diagnostics
	}
}
