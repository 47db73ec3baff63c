use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum WiktError {
	#[error(transparent)]
	#[diagnostic(code(wikt::io_error))]
	Io(#[from] std::io::Error),

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(wikt::config_parse),
		help("check that wikt.toml is valid TOML with an optional `locale` key and a [rules] section")
	)]
	ConfigParse(String),

	#[error("failed to load rule table `{path}`: {reason}")]
	#[diagnostic(
		code(wikt::rule_table_parse),
		help(
			"rule tables accept `ignored`, `diagnostics_skip`, `media_namespaces`, \
			 `hidden_namespaces` and the [italic], [literal], [complex], [labels], [languages] \
			 tables"
		)
	)]
	RuleTableParse { path: String, reason: String },

	#[error("invalid complex rule `{name}` for locale `{locale}`: {reason}")]
	#[diagnostic(
		code(wikt::rule_compile),
		help("complex rules are minijinja expressions, e.g. `italic(args|last)`")
	)]
	RuleCompile {
		locale: String,
		name: String,
		reason: String,
	},

	#[error("complex rule `{name}` failed while rendering `{word}`: {reason}")]
	#[diagnostic(
		code(wikt::rule_evaluation),
		help("the rule expects fields this construct does not provide; fix the locale rule table")
	)]
	RuleEvaluation {
		word: String,
		name: String,
		reason: String,
	},

	#[error("expansion of `{word}` made no progress on: {text}")]
	#[diagnostic(
		code(wikt::non_terminating),
		help("a construct is malformed or a rule re-introduces `{{{{` markers in its output")
	)]
	NonTerminating { word: String, text: String },

	#[error("unknown locale: `{0}`")]
	#[diagnostic(
		code(wikt::unknown_locale),
		help("register a rule table for this locale under [rules] in wikt.toml")
	)]
	UnknownLocale(String),
}

pub type WiktResult<T> = Result<T, WiktError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
