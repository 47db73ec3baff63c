//! Inline markup that does not involve constructs.
//!
//! [`normalize`] runs before expansion and rewrites comments, references,
//! magic words, headings, list markers, links and emphasis. [`finalize`] runs
//! after expansion and tidies whitespace. Both are idempotent.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Captures;
use regex::Regex;

use crate::Namespaces;

static COMMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").unwrap());
static REF_SELF_CLOSING: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"(?i)<ref\b[^>]*/>").unwrap());
static REF_PAIRED: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"(?is)<ref\b[^>]*>.*?</ref\s*>").unwrap());
static MAGIC_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"__[A-Z]+__").unwrap());
static HEADING: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"(?m)^[ \t]*=+[ \t]*(.+?)[ \t]*=+[ \t\r]*$").unwrap());
static LIST_MARKER: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"(?m)^[ \t]*[#*:;]+[ \t]*").unwrap());
static LOCAL_LINK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[\[([^\[\]]*)\]\]").unwrap());
static EXTERNAL_LINK: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"\[(?:https?:)?//[^\s\]]+(?:[ \t]+([^\]]*))?\]").unwrap());
static BARE_URL: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"https?://[^\s<>\[\]{}|]+").unwrap());
static BOLD_ITALIC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"'''''(.+?)'''''").unwrap());
static BOLD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"'''(.+?)'''").unwrap());
static ITALIC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"''(.+?)''").unwrap());
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ \t\r\n]+").unwrap());

/// Characters that open a heading or a list item at the start of a line,
/// with the entity that stands in for them.
const LINE_MARKUP: [(char, &str); 5] = [
	('=', "&#61;"),
	('#', "&#35;"),
	('*', "&#42;"),
	(':', "&#58;"),
	(';', "&#59;"),
];

static SPACE_BEFORE_CLOSING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" ([,.)])").unwrap());

/// The opening pass: rewrite inline markup into plain text or inline tags.
/// Links into `namespaces`' media or hidden namespaces are deleted.
pub fn normalize(text: &str, namespaces: &Namespaces) -> String {
	let text = COMMENT.replace_all(text, "");
	let text = REF_SELF_CLOSING.replace_all(&text, "");
	let text = REF_PAIRED.replace_all(&text, "");
	let text = MAGIC_WORD.replace_all(&text, "");
	let text = HEADING.replace_all(&text, "${1}");
	let text = LIST_MARKER.replace_all(&text, "");
	let text = replace_links(&text, namespaces);
	let text = EXTERNAL_LINK.replace_all(&text, "${1}");
	let text = BARE_URL.replace_all(&text, "");
	let text = BOLD_ITALIC.replace_all(&text, "<i><b>${1}</b></i>");
	let text = BOLD.replace_all(&text, "<b>${1}</b>");
	let text = ITALIC.replace_all(&text, "<i>${1}</i>");

	text.into_owned()
}

/// The closing pass: collapse whitespace, drop spaces before `,` `.` `)` and
/// after `(`, and trim. A leading character that [`normalize`] would read as
/// a heading or list marker is written as an entity.
pub fn finalize(text: &str) -> String {
	let text = text.replace("&nbsp;", " ");
	let text = WHITESPACE.replace_all(&text, " ");
	let text = SPACE_BEFORE_CLOSING.replace_all(&text, "${1}");
	let text = text.replace("( ", "(");

	escape_line_markup(text.trim())
}

fn escape_line_markup(text: &str) -> String {
	let mut chars = text.chars();
	let entity = chars
		.next()
		.and_then(|first| LINE_MARKUP.iter().find(|(marker, _)| *marker == first))
		.map(|(_, entity)| *entity);

	match entity {
		Some(entity) => format!("{entity}{}", chars.as_str()),
		None => text.to_string(),
	}
}

/// Replace local links innermost first, so that a caption holding a link is
/// resolved before the link that contains it.
fn replace_links<'a>(text: &'a str, namespaces: &Namespaces) -> Cow<'a, str> {
	let mut text = Cow::Borrowed(text);

	while LOCAL_LINK.is_match(&text) {
		let replaced = LOCAL_LINK
			.replace_all(&text, |caps: &Captures<'_>| render_link(&caps[1], namespaces))
			.into_owned();
		text = Cow::Owned(replaced);
	}

	text
}

/// `[[target]]` → target without its anchor, `[[target|…|label]]` → label.
fn render_link(inner: &str, namespaces: &Namespaces) -> String {
	let fields: Vec<&str> = inner.split('|').map(str::trim).collect();
	let target = fields.first().copied().unwrap_or_default();

	if namespaces.is_dropped(target) {
		return String::new();
	}

	if let Some(label) = fields.last().filter(|label| fields.len() > 1 && !label.is_empty()) {
		return (*label).to_string();
	}

	let target = target.trim_start_matches(':');
	match target.split_once('#') {
		Some(("", anchor)) => anchor.to_string(),
		Some((page, _)) => page.to_string(),
		None => target.to_string(),
	}
}
