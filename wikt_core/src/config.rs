use std::collections::BTreeMap;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::WiktError;
use crate::WiktResult;

/// Locale used when neither the config file nor the command line names one.
pub const DEFAULT_LOCALE: &str = "en";

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] = ["wikt.toml", ".wikt.toml", ".config/wikt.toml"];

/// Configuration loaded from a `wikt.toml` file.
///
/// ```toml
/// locale = "fr"
///
/// [rules]
/// fr = "rules/fr.toml"
/// it = "rules/it.toml"
/// ```
///
/// Each `[rules]` entry maps a locale to a rule table. A table for a locale
/// that ships with built-in rules is merged over them; any other locale is
/// registered with the shared default fallback handler.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WiktConfig {
	/// The locale used when an entry does not name one.
	#[serde(default)]
	pub locale: Option<String>,
	/// Map of locale to rule table path. Relative paths are resolved against
	/// the directory containing the config file.
	#[serde(default)]
	pub rules: BTreeMap<String, PathBuf>,
	/// Directory the config was loaded from. Not part of the file format.
	#[serde(skip)]
	pub root: PathBuf,
}

impl WiktConfig {
	/// Resolve the config path from known discovery candidates.
	#[must_use]
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file at `root`.
	/// Returns `None` if no candidate exists.
	pub fn load(root: &Path) -> WiktResult<Option<WiktConfig>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		Self::load_file(&config_path).map(Some)
	}

	/// Load the config from an explicit path.
	pub fn load_file(path: &Path) -> WiktResult<WiktConfig> {
		let content = std::fs::read_to_string(path)?;
		let mut config: WiktConfig =
			toml::from_str(&content).map_err(|e| WiktError::ConfigParse(e.to_string()))?;

		config.root = path
			.parent()
			.map(Path::to_path_buf)
			.unwrap_or_default();

		Ok(config)
	}

	/// The configured default locale, or [`DEFAULT_LOCALE`].
	pub fn default_locale(&self) -> &str {
		self.locale.as_deref().unwrap_or(DEFAULT_LOCALE)
	}

	/// Rule table paths with relative entries resolved against the config
	/// directory.
	pub fn rule_paths(&self) -> impl Iterator<Item = (&str, PathBuf)> {
		self.rules.iter().map(|(locale, path)| {
			let resolved = if path.is_absolute() {
				path.clone()
			} else {
				self.root.join(path)
			};
			(locale.as_str(), resolved)
		})
	}
}
