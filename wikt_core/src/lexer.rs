use std::ops::Range;

use logos::Logos;

/// Flat tokens for construct scanning. Everything that is not a marker or a
/// field separator is collapsed into `Text`.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Marker {
	/// `{{`
	#[token("{{")]
	Open,
	/// `}}`
	#[token("}}")]
	Close,
	/// `|`
	#[token("|")]
	Pipe,
	/// A stray `{` or `}` that is not part of a marker pair.
	#[regex(r"[{}]")]
	Brace,
	#[regex(r"[^{}|]+")]
	Text,
}

/// A marker together with its byte span in the scanned text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Lexeme {
	pub kind: Marker,
	pub span: Range<usize>,
}

/// Tokenize `text` into lexemes. Bytes logos cannot classify are reported as
/// `Text` so that spans always cover the input.
pub(crate) fn tokenize(text: &str) -> Vec<Lexeme> {
	Marker::lexer(text)
		.spanned()
		.map(|(result, span)| {
			Lexeme {
				kind: result.unwrap_or(Marker::Text),
				span,
			}
		})
		.collect()
}

/// Number of open and close markers in `text`. The expansion driver uses this
/// as its progress measure.
pub(crate) fn count_markers(text: &str) -> usize {
	tokenize(text)
		.iter()
		.filter(|lexeme| matches!(lexeme.kind, Marker::Open | Marker::Close))
		.count()
}

/// Split a construct body on `|` separators that are not nested inside an
/// inner `{{…}}` pair. Returned slices are untrimmed.
pub(crate) fn split_fields(body: &str) -> Vec<&str> {
	let mut fields = Vec::new();
	let mut depth = 0usize;
	let mut start = 0;

	for lexeme in tokenize(body) {
		match lexeme.kind {
			Marker::Open => depth += 1,
			Marker::Close => depth = depth.saturating_sub(1),
			Marker::Pipe if depth == 0 => {
				fields.push(&body[start..lexeme.span.start]);
				start = lexeme.span.end;
			}
			Marker::Pipe | Marker::Brace | Marker::Text => {}
		}
	}

	fields.push(&body[start..]);
	fields
}
