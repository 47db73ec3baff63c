use std::ops::Range;

use serde::Serialize;

use crate::LocaleRuleSet;
use crate::RenderContext;
use crate::RenderDiagnostic;
use crate::WiktError;
use crate::WiktResult;
use crate::extractor::body_of;
use crate::extractor::first_top_level_span;
use crate::extractor::innermost_spans;
use crate::finalize;
use crate::lexer::count_markers;
use crate::normalize;
use crate::parse_invocation;
use crate::resolve;

/// The result of rendering one entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Rendered {
	/// The display-ready fragment.
	pub text: String,
	/// Non-fatal notices emitted while rendering.
	pub diagnostics: Vec<RenderDiagnostic>,
}

impl Rendered {
	pub fn has_diagnostics(&self) -> bool {
		!self.diagnostics.is_empty()
	}
}

/// Where the expansion driver is in its loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExpansionState {
	/// Looking for innermost constructs.
	Scanning,
	/// Substituting every innermost construct found by the last scan.
	Reducing,
	/// No innermost construct is left; looking for the first top-level one.
	TopLevelScanning,
	/// Substituting the top-level construct found by the last scan.
	TopLevelReducing,
	Done,
}

/// Render the markup of `word` with the rules of one locale.
///
/// The markup is normalized, every construct is expanded, and the result goes
/// through the closing normalizer pass. Recoverable problems are reported in
/// [`Rendered::diagnostics`]; only a failing complex rule or an expansion
/// that stops making progress is an error.
pub fn render(markup: &str, rules: &LocaleRuleSet, word: &str) -> WiktResult<Rendered> {
	let mut ctx = RenderContext::new(rules, word);

	let text = normalize(markup, rules.namespaces());
	let text = expand(&text, &mut ctx)?;
	let text = finalize(&text);

	Ok(Rendered {
		text,
		diagnostics: ctx.into_diagnostics(),
	})
}

/// Expand every construct in `text` until no terminated construct remains.
///
/// Innermost constructs are reduced in bulk first. Once none is left, the
/// remaining constructs are reduced one at a time from the left. Every step
/// must lower the number of markers in the text, otherwise the expansion
/// fails with [`WiktError::NonTerminating`]. An unterminated `{{` is left in
/// place.
pub fn expand(text: &str, ctx: &mut RenderContext<'_>) -> WiktResult<String> {
	let mut text = text.to_string();
	let mut markers = count_markers(&text);
	let mut spans: Vec<Range<usize>> = Vec::new();
	let mut state = ExpansionState::Scanning;

	loop {
		tracing::trace!(?state, markers, spans = spans.len(), "expansion step");

		state = match state {
			ExpansionState::Scanning => {
				spans = innermost_spans(&text);
				if spans.is_empty() {
					ExpansionState::TopLevelScanning
				} else {
					ExpansionState::Reducing
				}
			}
			ExpansionState::Reducing => {
				text = reduce(&text, &spans, ctx)?;
				markers = check_progress(&text, markers, ctx)?;
				ExpansionState::Scanning
			}
			ExpansionState::TopLevelScanning => {
				match first_top_level_span(&text) {
					Some(span) => {
						spans = vec![span];
						ExpansionState::TopLevelReducing
					}
					None => ExpansionState::Done,
				}
			}
			ExpansionState::TopLevelReducing => {
				text = reduce(&text, &spans, ctx)?;
				markers = check_progress(&text, markers, ctx)?;
				ExpansionState::TopLevelScanning
			}
			ExpansionState::Done => {
				tracing::debug!(word = ctx.word(), remaining = markers, "expansion done");
				return Ok(text);
			}
		};
	}
}

/// Build a new buffer from `text` with each of the non-overlapping `spans`
/// replaced by the rendering of its construct.
fn reduce(text: &str, spans: &[Range<usize>], ctx: &mut RenderContext<'_>) -> WiktResult<String> {
	let mut output = String::with_capacity(text.len());
	let mut cursor = 0;

	for span in spans {
		output.push_str(&text[cursor..span.start]);

		let construct = parse_invocation(body_of(text, span), span.clone(), ctx);
		let fragment = resolve(&construct, ctx)?;
		tracing::trace!(name = %construct.name, %fragment, "resolved construct");

		output.push_str(&fragment);
		cursor = span.end;
	}

	output.push_str(&text[cursor..]);
	Ok(output)
}

/// The marker count of `text`, which must be below `previous`.
fn check_progress(text: &str, previous: usize, ctx: &RenderContext<'_>) -> WiktResult<usize> {
	let markers = count_markers(text);
	if markers < previous {
		return Ok(markers);
	}

	tracing::error!(word = ctx.word(), text, "expansion made no progress");
	Err(WiktError::NonTerminating {
		word: ctx.word().to_string(),
		text: text.to_string(),
	})
}
