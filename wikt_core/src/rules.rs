//! Locale rule sets and the registry that holds them.
//!
//! A [`LocaleRuleSet`] is built once per locale from a [`RuleTable`] and is
//! never mutated afterwards; render calls borrow it. The [`LocaleRegistry`]
//! maps locale codes to rule sets and is built at startup from the embedded
//! tables plus any tables named in `wikt.toml`.

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;

use minijinja::Environment;
use serde::Deserialize;
use serde::Serialize;

use crate::LocaleTemplateHandler;
use crate::WiktConfig;
use crate::WiktError;
use crate::WiktResult;
use crate::handler_for;
use crate::sandbox;
use crate::sandbox::LookupTable;

/// Rule tables compiled into the library.
pub const BUILTIN_TABLES: [(&str, &str); 2] = [
	("en", include_str!("../locales/en.toml")),
	("fr", include_str!("../locales/fr.toml")),
];

/// Namespaces used when a table names none.
const DEFAULT_MEDIA_NAMESPACES: [&str; 2] = ["File", "Image"];
const DEFAULT_HIDDEN_NAMESPACES: [&str; 1] = ["Category"];

/// The serialized form of a locale's rules.
///
/// ```toml
/// ignored = ["attention", "ébauche"]
/// diagnostics_skip = ["lb"]
/// media_namespaces = ["File", "Image", "Fichier"]
///
/// [italic]
/// archaic = "Archaic"
///
/// [literal]
/// sic = "[sic]"
///
/// [complex]
/// term = "italic(args|last)"
///
/// [labels]
/// obsolete = "obsolete"
///
/// [languages]
/// la = "Latin"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleTable {
	/// Names whose constructs are deleted.
	#[serde(default)]
	pub ignored: BTreeSet<String>,
	/// Names exempt from the superfluous-whitespace warning.
	#[serde(default)]
	pub diagnostics_skip: BTreeSet<String>,
	/// Link namespaces holding embedded media. Such links are deleted.
	#[serde(default)]
	pub media_namespaces: Vec<String>,
	/// Link namespaces that never render, such as categories.
	#[serde(default)]
	pub hidden_namespaces: Vec<String>,
	/// Names rendered as `<i>(Label)</i>`.
	#[serde(default)]
	pub italic: BTreeMap<String, String>,
	/// Names replaced by fixed text.
	#[serde(default)]
	pub literal: BTreeMap<String, String>,
	/// Names bound to a sandboxed expression.
	#[serde(default)]
	pub complex: BTreeMap<String, String>,
	/// Label code to display text, for `label()` and label constructs.
	#[serde(default)]
	pub labels: BTreeMap<String, String>,
	/// Language code to language name, for `lang()` and etymologies.
	#[serde(default)]
	pub languages: BTreeMap<String, String>,
}

impl RuleTable {
	/// Parse a table from TOML. `origin` names the source in errors.
	pub fn from_toml(source: &str, origin: &str) -> WiktResult<Self> {
		toml::from_str(source).map_err(|e| {
			WiktError::RuleTableParse {
				path: origin.to_string(),
				reason: e.to_string(),
			}
		})
	}

	/// Read and parse a table file.
	pub fn load(path: &Path) -> WiktResult<Self> {
		let origin = path.display().to_string();
		let source = std::fs::read_to_string(path).map_err(|e| {
			WiktError::RuleTableParse {
				path: origin.clone(),
				reason: e.to_string(),
			}
		})?;

		Self::from_toml(&source, &origin)
	}

	/// The built-in table for `locale`, if one ships with the library.
	pub fn builtin(locale: &str) -> Option<WiktResult<Self>> {
		BUILTIN_TABLES
			.iter()
			.find(|(code, _)| *code == locale)
			.map(|(code, source)| Self::from_toml(source, &format!("<builtin {code}>")))
	}

	/// Merge `overlay` into this table. Entries of `overlay` win; non-empty
	/// namespace lists replace the current ones.
	pub fn merge(&mut self, overlay: RuleTable) {
		self.ignored.extend(overlay.ignored);
		self.diagnostics_skip.extend(overlay.diagnostics_skip);
		if !overlay.media_namespaces.is_empty() {
			self.media_namespaces = overlay.media_namespaces;
		}
		if !overlay.hidden_namespaces.is_empty() {
			self.hidden_namespaces = overlay.hidden_namespaces;
		}
		self.italic.extend(overlay.italic);
		self.literal.extend(overlay.literal);
		self.complex.extend(overlay.complex);
		self.labels.extend(overlay.labels);
		self.languages.extend(overlay.languages);
	}
}

/// Link namespaces the normalizer treats specially.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespaces {
	media: Vec<String>,
	hidden: Vec<String>,
}

impl Namespaces {
	pub fn new(media: Vec<String>, hidden: Vec<String>) -> Self {
		let lower = |names: Vec<String>| -> Vec<String> {
			names.iter().map(|name| name.to_lowercase()).collect()
		};
		Self {
			media: lower(media),
			hidden: lower(hidden),
		}
	}

	/// Whether a link to `target` must be deleted rather than rendered. A
	/// leading `:` makes the link an ordinary one.
	pub fn is_dropped(&self, target: &str) -> bool {
		let Some((namespace, _)) = target.split_once(':') else {
			return false;
		};
		let namespace = namespace.trim().to_lowercase();

		self.media.contains(&namespace) || self.hidden.contains(&namespace)
	}
}

impl Default for Namespaces {
	fn default() -> Self {
		Self::new(
			or_defaults(Vec::new(), &DEFAULT_MEDIA_NAMESPACES),
			or_defaults(Vec::new(), &DEFAULT_HIDDEN_NAMESPACES),
		)
	}
}

fn or_defaults(names: Vec<String>, defaults: &[&str]) -> Vec<String> {
	if names.is_empty() {
		defaults.iter().map(ToString::to_string).collect()
	} else {
		names
	}
}

/// Counts of a rule set's tables, for listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleSetSummary {
	pub locale: String,
	pub handler: String,
	pub ignored: usize,
	pub complex: usize,
	pub italic: usize,
	pub literal: usize,
	pub labels: usize,
	pub languages: usize,
}

/// The immutable rules of one locale.
#[derive(Debug)]
pub struct LocaleRuleSet {
	locale: String,
	ignored: BTreeSet<String>,
	complex: BTreeMap<String, String>,
	italic: BTreeMap<String, String>,
	literal: BTreeMap<String, String>,
	diagnostics_skip: BTreeSet<String>,
	labels: LookupTable,
	languages: LookupTable,
	namespaces: Namespaces,
	handler: Arc<dyn LocaleTemplateHandler>,
	environment: Environment<'static>,
}

impl LocaleRuleSet {
	/// Build a rule set. Every complex rule is compiled here so that syntax
	/// errors surface at load time.
	pub fn new(
		locale: impl Into<String>,
		table: RuleTable,
		handler: Arc<dyn LocaleTemplateHandler>,
	) -> WiktResult<Self> {
		let locale = locale.into();
		let labels = Arc::new(table.labels);
		let languages = Arc::new(table.languages);
		let mut environment =
			sandbox::build_environment(Arc::clone(&labels), Arc::clone(&languages));

		for (name, source) in &table.complex {
			sandbox::compile_rule(&mut environment, &locale, name, source)?;
		}

		let namespaces = Namespaces::new(
			or_defaults(table.media_namespaces, &DEFAULT_MEDIA_NAMESPACES),
			or_defaults(table.hidden_namespaces, &DEFAULT_HIDDEN_NAMESPACES),
		);

		tracing::debug!(
			locale = %locale,
			handler = handler.locale(),
			complex = table.complex.len(),
			"built locale rule set"
		);

		Ok(Self {
			locale,
			ignored: table.ignored,
			complex: table.complex,
			italic: table.italic,
			literal: table.literal,
			diagnostics_skip: table.diagnostics_skip,
			labels,
			languages,
			namespaces,
			handler,
			environment,
		})
	}

	/// Parse `source` as a rule table and build a rule set with the locale's
	/// registered handler.
	pub fn from_toml(locale: &str, source: &str) -> WiktResult<Self> {
		let table = RuleTable::from_toml(source, locale)?;
		Self::new(locale, table, handler_for(locale))
	}

	pub fn locale(&self) -> &str {
		&self.locale
	}

	pub fn is_ignored(&self, name: &str) -> bool {
		self.ignored.contains(name)
	}

	/// The expression bound to `name`, if it is a complex rule.
	pub fn complex_rule(&self, name: &str) -> Option<&str> {
		self.complex.get(name).map(String::as_str)
	}

	pub fn italic_label(&self, name: &str) -> Option<&str> {
		self.italic.get(name).map(String::as_str)
	}

	pub fn literal(&self, name: &str) -> Option<&str> {
		self.literal.get(name).map(String::as_str)
	}

	pub fn skips_diagnostics(&self, name: &str) -> bool {
		self.diagnostics_skip.contains(name)
	}

	/// The display text of label `code`, or the code itself.
	pub fn label<'a>(&'a self, code: &'a str) -> &'a str {
		self.labels.get(code).map_or(code, String::as_str)
	}

	/// The name of language `code`, or the code itself.
	pub fn language<'a>(&'a self, code: &'a str) -> &'a str {
		self.languages.get(code).map_or(code, String::as_str)
	}

	pub fn namespaces(&self) -> &Namespaces {
		&self.namespaces
	}

	/// The locale's fallback handler.
	pub fn handler(&self) -> &dyn LocaleTemplateHandler {
		self.handler.as_ref()
	}

	pub(crate) fn environment(&self) -> &Environment<'static> {
		&self.environment
	}

	pub fn summary(&self) -> RuleSetSummary {
		RuleSetSummary {
			locale: self.locale.clone(),
			handler: self.handler.locale().to_string(),
			ignored: self.ignored.len(),
			complex: self.complex.len(),
			italic: self.italic.len(),
			literal: self.literal.len(),
			labels: self.labels.len(),
			languages: self.languages.len(),
		}
	}
}

/// Locale code to rule set. Built once at startup, read-only afterwards.
#[derive(Debug, Default)]
pub struct LocaleRegistry {
	rule_sets: BTreeMap<String, Arc<LocaleRuleSet>>,
}

impl LocaleRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// A registry holding the built-in locales.
	pub fn builtin() -> WiktResult<Self> {
		let mut registry = Self::new();
		for (locale, source) in BUILTIN_TABLES {
			registry.register(LocaleRuleSet::from_toml(locale, source)?);
		}
		Ok(registry)
	}

	/// A registry holding the built-in locales with the tables listed in
	/// `config` merged over them or added to them.
	pub fn from_config(config: &WiktConfig) -> WiktResult<Self> {
		let mut registry = Self::builtin()?;

		for (locale, path) in config.rule_paths() {
			let overlay = RuleTable::load(&path)?;
			let table = match RuleTable::builtin(locale) {
				Some(builtin) => {
					let mut table = builtin?;
					table.merge(overlay);
					table
				}
				None => overlay,
			};

			tracing::debug!(locale, path = %path.display(), "loaded rule table");
			registry.register(LocaleRuleSet::new(locale, table, handler_for(locale))?);
		}

		Ok(registry)
	}

	/// Add or replace the rule set for its locale.
	pub fn register(&mut self, rule_set: LocaleRuleSet) {
		self.rule_sets
			.insert(rule_set.locale().to_string(), Arc::new(rule_set));
	}

	/// The rule set for `locale`.
	pub fn get(&self, locale: &str) -> WiktResult<&LocaleRuleSet> {
		self.rule_sets
			.get(locale)
			.map(|rule_set| &**rule_set)
			.ok_or_else(|| WiktError::UnknownLocale(locale.to_string()))
	}

	/// Registered rule sets in locale order.
	pub fn iter(&self) -> impl Iterator<Item = &LocaleRuleSet> {
		self.rule_sets.values().map(|rule_set| &**rule_set)
	}

	pub fn len(&self) -> usize {
		self.rule_sets.len()
	}

	pub fn is_empty(&self) -> bool {
		self.rule_sets.is_empty()
	}
}
