//! Locating construct spans in text.
//!
//! Two scans are offered. [`innermost_spans`] returns every `{{…}}` span that
//! contains no other marker and no stray brace; these spans never overlap and
//! can be reduced in one pass. [`first_top_level_span`] is used once no such
//! span remains: it takes the first `{{` and depth-counts forward to its
//! matching `}}`.

use std::ops::Range;

use crate::lexer::Marker;
use crate::lexer::tokenize;

/// Width of the `{{` and `}}` markers in bytes.
pub(crate) const MARKER_LEN: usize = 2;

/// All innermost construct spans in `text`, left to right. Each span covers
/// the opening and closing markers.
pub fn innermost_spans(text: &str) -> Vec<Range<usize>> {
	let mut spans = Vec::new();
	let mut candidate: Option<usize> = None;

	for lexeme in tokenize(text) {
		match lexeme.kind {
			Marker::Open => candidate = Some(lexeme.span.start),
			Marker::Brace => candidate = None,
			Marker::Close => {
				if let Some(start) = candidate.take() {
					spans.push(start..lexeme.span.end);
				}
			}
			Marker::Pipe | Marker::Text => {}
		}
	}

	spans
}

/// The first top-level construct span in `text`, if its opening marker is
/// terminated. Only `{{` raises the depth; any `}}` lowers it, and the scan
/// stops at the `}}` that brings it back to zero. An unterminated opening
/// marker yields `None`.
pub fn first_top_level_span(text: &str) -> Option<Range<usize>> {
	let lexemes = tokenize(text);
	let first = lexemes
		.iter()
		.position(|lexeme| lexeme.kind == Marker::Open)?;
	let start = lexemes[first].span.start;
	let mut depth = 1usize;

	for lexeme in &lexemes[first + 1..] {
		match lexeme.kind {
			Marker::Open => depth += 1,
			Marker::Close => {
				depth -= 1;
				if depth == 0 {
					return Some(start..lexeme.span.end);
				}
			}
			Marker::Pipe | Marker::Brace | Marker::Text => {}
		}
	}

	None
}

/// The body of a construct span: the text between its markers.
pub(crate) fn body_of<'a>(text: &'a str, span: &Range<usize>) -> &'a str {
	&text[span.start + MARKER_LEN..span.end - MARKER_LEN]
}
