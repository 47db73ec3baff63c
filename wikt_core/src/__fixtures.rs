use crate::LocaleRegistry;
use crate::LocaleRuleSet;
use crate::Namespaces;
use crate::Rendered;
use crate::WiktResult;
use crate::finalize;
use crate::normalize;
use crate::render;

/// A small rule table exercising every category.
pub(crate) const TEST_RULES: &str = r#"
ignored = ["b", "rfv"]
diagnostics_skip = ["quiet"]

[italic]
foo = "Bar"

[literal]
sic = "[sic]"
loop = "{{loop}}"

[complex]
a = "args|last"
year = "roman(args[0])"
greet = "'Hello, ' ~ (kwargs.name or word)"
maybe = "kwargs.t or none"
"#;

pub(crate) const TEST_WORD: &str = "test";

pub(crate) fn test_rules() -> LocaleRuleSet {
	LocaleRuleSet::from_toml("xx", TEST_RULES).unwrap_or_else(|e| panic!("test rules: {e}"))
}

pub(crate) fn builtin_registry() -> LocaleRegistry {
	LocaleRegistry::builtin().unwrap_or_else(|e| panic!("builtin registry: {e}"))
}

/// Render `markup` with the test rules.
pub(crate) fn render_test(markup: &str) -> WiktResult<Rendered> {
	render(markup, &test_rules(), TEST_WORD)
}

/// Render `markup` with one of the built-in locales.
pub(crate) fn render_builtin(locale: &str, markup: &str) -> WiktResult<String> {
	let registry = builtin_registry();
	let rendered = render(markup, registry.get(locale)?, TEST_WORD)?;
	Ok(rendered.text)
}

/// Both normalizer passes with the default namespaces.
pub(crate) fn clean(text: &str) -> String {
	finalize(&normalize(text, &Namespaces::default()))
}

pub(crate) const CAT_ENTRY: &str = r"===Etymology===
From {{inh|en|enm|cat}}, from {{inh|en|ang|catt}}.<ref>{{R:OED}}</ref>

===Noun===
'''cat''' (''plural'' [[cats]])

# {{lb|en|countable}} A [[domestic]] [[feline]] {{q|''Felis catus''}}.
#: {{ux|en|The '''cat''' sat.}}
[[File:Cat03.jpg|thumb|A cat]]
[[Category:en:Cats]]
";
