use derive_more::Deref;
use derive_more::DerefMut;
use rayon::prelude::*;
use serde::Deserialize;
use serde::Serialize;

use crate::LocaleRegistry;
use crate::Rendered;
use crate::WiktResult;
use crate::render;

/// One dictionary entry to render.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Entry {
	pub word: String,
	/// The entry's locale. Entries without one use the batch default.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub locale: Option<String>,
	pub markup: String,
}

/// The outcome of rendering one [`Entry`].
#[derive(Debug)]
pub struct EntryOutcome {
	pub word: String,
	pub locale: String,
	pub result: WiktResult<Rendered>,
}

impl EntryOutcome {
	pub fn is_ok(&self) -> bool {
		self.result.is_ok()
	}
}

/// Outcomes of a batch, in input order.
#[derive(Debug, Default, Deref, DerefMut)]
pub struct BatchOutcomes(
	#[deref]
	#[deref_mut]
	Vec<EntryOutcome>,
);

impl BatchOutcomes {
	/// Outcomes whose entry failed to render.
	pub fn failures(&self) -> impl Iterator<Item = &EntryOutcome> {
		self.0.iter().filter(|outcome| !outcome.is_ok())
	}

	pub fn has_failures(&self) -> bool {
		self.failures().next().is_some()
	}

	pub fn into_inner(self) -> Vec<EntryOutcome> {
		self.0
	}
}

/// Render `entries` in parallel. Outcomes are returned in input order, and a
/// failing entry never affects the others.
pub fn render_batch(
	entries: &[Entry],
	registry: &LocaleRegistry,
	default_locale: &str,
) -> BatchOutcomes {
	let outcomes = entries
		.par_iter()
		.map(|entry| {
			let locale = entry.locale.as_deref().unwrap_or(default_locale);
			let result = registry
				.get(locale)
				.and_then(|rules| render(&entry.markup, rules, &entry.word));

			if let Err(error) = &result {
				tracing::error!(word = %entry.word, locale, %error, "failed to render entry");
			}

			EntryOutcome {
				word: entry.word.clone(),
				locale: locale.to_string(),
				result,
			}
		})
		.collect();

	BatchOutcomes(outcomes)
}
