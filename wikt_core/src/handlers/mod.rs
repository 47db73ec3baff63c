//! Locale fallback handlers.
//!
//! When no table of a [`LocaleRuleSet`](crate::LocaleRuleSet) resolves a
//! construct, the locale's handler is consulted. A handler implements the
//! families of constructs that need real logic in that locale and hands every
//! name it does not recognize to [`DefaultHandler`].

use std::sync::Arc;

use crate::Construct;
use crate::RenderContext;
use crate::helpers::capitalize;
use crate::helpers::term;

mod en;
mod fr;

pub use en::EnglishHandler;
pub use fr::FrenchHandler;

/// The per-locale fallback for constructs that no rule table resolves.
///
/// Implementations must always return a string, possibly empty, and must not
/// panic on unrecognized input.
pub trait LocaleTemplateHandler: std::fmt::Debug + Send + Sync {
	/// The locale this handler was written for, or `"*"` for the default.
	fn locale(&self) -> &str;

	/// Render `construct`.
	fn render(&self, construct: &Construct, ctx: &RenderContext<'_>) -> String;
}

/// The shared fallback every locale handler delegates to.
///
/// - An empty name renders nothing.
/// - With one or two fields in total, the construct is taken for a
///   qualifier and rendered as its capitalized name, `<i>(Name)</i>`.
/// - With more fields there is no safe guess, so it renders nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultHandler;

impl LocaleTemplateHandler for DefaultHandler {
	fn locale(&self) -> &str {
		"*"
	}

	fn render(&self, construct: &Construct, _ctx: &RenderContext<'_>) -> String {
		if construct.name.is_empty() || construct.total_fields() > 2 {
			return String::new();
		}

		term(&capitalize(&construct.name))
	}
}

/// The handler registered for `locale`. Locales without a dedicated handler
/// get the [`DefaultHandler`].
pub fn handler_for(locale: &str) -> Arc<dyn LocaleTemplateHandler> {
	match locale {
		"en" => Arc::new(EnglishHandler),
		"fr" => Arc::new(FrenchHandler),
		_ => Arc::new(DefaultHandler),
	}
}
