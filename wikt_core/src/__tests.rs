use rstest::rstest;
use similar_asserts::assert_eq;
use tracing_test::traced_test;

use super::__fixtures::*;
use super::*;
use crate::lexer::count_markers;
use crate::lexer::split_fields;

// --- Rendering scenarios ---

#[test]
fn italic_label_renders_as_term() -> WiktResult<()> {
	let rendered = render_test("{{foo}}")?;
	assert_eq!(rendered.text, "<i>(Bar)</i>");
	assert!(!rendered.has_diagnostics());

	Ok(())
}

#[test]
fn unknown_name_with_one_field_renders_generic_label() -> WiktResult<()> {
	assert_eq!(render_test("{{unknown|x}}")?.text, "<i>(Unknown)</i>");

	Ok(())
}

#[test]
fn unknown_name_with_many_fields_is_dropped() -> WiktResult<()> {
	assert_eq!(render_test("{{unknown|x|y|z}}")?.text, "");

	Ok(())
}

#[test]
fn inner_constructs_resolve_before_outer() -> WiktResult<()> {
	assert_eq!(render_test("{{a|{{b}}}}")?.text, "");
	assert_eq!(render_test("{{a|x|{{foo}}}}")?.text, "<i>(Bar)</i>");
	assert_eq!(render_test("{{a|{{a|{{a|deep}}}}}}")?.text, "deep");

	Ok(())
}

#[test]
fn emphasis_is_rendered_as_tags() -> WiktResult<()> {
	assert_eq!(
		render_test("'''strong''' and ''italic''")?.text,
		"<b>strong</b> and <i>italic</i>"
	);

	Ok(())
}

#[test]
fn extra_whitespace_renders_like_trimmed_form() -> WiktResult<()> {
	let spaced = render_test("{{ foo | bar }}")?;
	let trimmed = render_test("{{foo|bar}}")?;

	assert_eq!(spaced.text, trimmed.text);
	assert!(trimmed.diagnostics.is_empty());
	assert_eq!(
		spaced.diagnostics,
		vec![RenderDiagnostic::ExtraWhitespace {
			word: TEST_WORD.to_string(),
			name: "foo".to_string(),
			fields: vec![" foo ".to_string(), " bar ".to_string()],
		}]
	);

	Ok(())
}

#[test]
#[traced_test]
fn extra_whitespace_is_logged() -> WiktResult<()> {
	render_test("{{foo |bar}}")?;
	assert!(logs_contain("superfluous whitespace in construct"));

	Ok(())
}

#[test]
fn diagnostics_skip_set_silences_whitespace_warning() -> WiktResult<()> {
	let rendered = render_test("{{ quiet | x }}")?;
	assert_eq!(rendered.text, "<i>(Quiet)</i>");
	assert!(rendered.diagnostics.is_empty());

	Ok(())
}

#[test]
fn diagnostic_display_names_word_and_construct() {
	let diagnostic = RenderDiagnostic::ExtraWhitespace {
		word: "chat".to_string(),
		name: "foo".to_string(),
		fields: vec![" foo".to_string()],
	};
	assert_eq!(
		diagnostic.to_string(),
		"superfluous whitespace in `foo` while rendering `chat`: [\" foo\"]"
	);
}

// --- Resolution laws ---

#[rstest]
#[case::bare("{{b}}")]
#[case::positional("{{b|anything}}")]
#[case::named("{{rfv|x|y=z}}")]
#[case::nested("{{b|{{foo}}}}")]
fn ignored_names_are_deleted(#[case] markup: &str) -> WiktResult<()> {
	assert_eq!(render_test(markup)?.text, "");

	Ok(())
}

#[rstest]
#[case::name_only("{{zork}}")]
#[case::one_positional("{{zork|x}}")]
#[case::one_empty_positional("{{zork|}}")]
#[case::one_named("{{zork|k=v}}")]
fn arity_fallback_for_unknown_names(#[case] markup: &str) -> WiktResult<()> {
	assert_eq!(render_test(markup)?.text, "<i>(Zork)</i>");

	Ok(())
}

#[rstest]
#[case::en("en")]
#[case::fr("fr")]
fn arity_fallback_is_locale_independent(#[case] locale: &str) -> WiktResult<()> {
	assert_eq!(render_builtin(locale, "{{zork|x}}")?, "<i>(Zork)</i>");
	assert_eq!(render_builtin(locale, "{{zork}}")?, "<i>(Zork)</i>");

	Ok(())
}

#[rstest]
#[case::two_positional("{{zork|a|b}}")]
#[case::mixed("{{zork|a|k=v}}")]
#[case::many("{{zork|a|b|c|d=e}}")]
fn unknown_names_with_many_fields_are_dropped(#[case] markup: &str) -> WiktResult<()> {
	assert_eq!(render_test(markup)?.text, "");

	Ok(())
}

#[rstest]
#[case::bare("{{sic}}")]
#[case::one_field("{{sic|x}}")]
#[case::many_fields("{{sic|x|y|z=w}}")]
fn literals_ignore_their_fields(#[case] markup: &str) -> WiktResult<()> {
	assert_eq!(render_test(markup)?.text, "[sic]");

	Ok(())
}

#[test]
fn empty_name_renders_nothing() -> WiktResult<()> {
	assert_eq!(render_test("a {{}} b {{|x}} c")?.text, "a b c");

	Ok(())
}

#[rstest]
#[case::single("{{w|Paris}}", "Paris")]
#[case::labelled("{{w|Paris|the capital}}", "the capital")]
#[case::empty("{{w}}", "")]
fn plain_link_renders_its_last_field(#[case] markup: &str, #[case] expected: &str) -> WiktResult<()> {
	assert_eq!(render_test(markup)?.text, expected);

	Ok(())
}

#[rstest]
#[case::word("{{greet}}", "Hello, test")]
#[case::named("{{greet|name=Ann}}", "Hello, Ann")]
#[case::roman("{{year|16}}", "XVI")]
#[case::undefined("x {{a}} y", "x y")]
#[case::none("x {{maybe}} y", "x y")]
#[case::some("{{maybe|t=v}}", "v")]
fn complex_rules_read_the_construct(#[case] markup: &str, #[case] expected: &str) -> WiktResult<()> {
	assert_eq!(render_test(markup)?.text, expected);

	Ok(())
}

#[test]
fn complex_rules_are_compiled_with_the_rule_set() -> WiktResult<()> {
	let rules = test_rules();
	assert!(rules.environment().get_template("year").is_ok());
	assert!(rules.environment().get_template("foo").is_err());

	let mut ctx = RenderContext::new(&rules, TEST_WORD);
	let construct = parse_construct("year|4");
	assert_eq!(resolve(&construct, &ctx)?, "IV");
	assert_eq!(expand("{{year|9}} {{year|10}}", &mut ctx)?, "IX X");

	Ok(())
}

// --- Failures and termination ---

#[test]
fn failing_complex_rule_is_an_evaluation_error() {
	let result = render_test("{{year|abc}}");
	assert!(
		matches!(&result, Err(WiktError::RuleEvaluation { word, name, .. }) if word == TEST_WORD && name == "year"),
		"unexpected result: {result:?}"
	);
}

#[test]
fn invalid_complex_rule_fails_at_load_time() {
	let result = LocaleRuleSet::from_toml("xx", "[complex]\nbroken = \"italic(\"\n");
	assert!(
		matches!(&result, Err(WiktError::RuleCompile { locale, name, .. }) if locale == "xx" && name == "broken"),
		"unexpected result: {result:?}"
	);
}

#[test]
fn unknown_rule_table_key_is_rejected() {
	let result = RuleTable::from_toml("unknown = 1\n", "inline");
	assert!(matches!(result, Err(WiktError::RuleTableParse { .. })));
}

#[test]
fn rule_that_reintroduces_markers_does_not_loop() {
	let result = render_test("before {{loop}} after");
	assert!(
		matches!(&result, Err(WiktError::NonTerminating { text, .. }) if text.contains("{{loop}}")),
		"unexpected result: {result:?}"
	);
}

#[rstest]
#[case::alone("{{foo", "{{foo")]
#[case::after_construct("text {{foo}} and {{bar", "text <i>(Bar)</i> and {{bar")]
#[case::closing_only("foo}} bar", "foo}} bar")]
fn unterminated_markers_stay_literal(#[case] markup: &str, #[case] expected: &str) -> WiktResult<()> {
	assert_eq!(render_test(markup)?.text, expected);

	Ok(())
}

#[test]
fn stray_braces_are_left_to_top_level_pass() -> WiktResult<()> {
	assert_eq!(render_test("{{a|{x}}}")?.text, "{x}");

	Ok(())
}

#[rstest]
#[case::scenario("{{foo}} {{unknown|x}} '''b'''")]
#[case::nested("{{a|{{b}}}} [[cat|kitty]] and ''it''")]
#[case::unterminated("text {{foo}} and {{bar")]
#[case::whitespace("  lots   of\n\nspace ( here ) , ok .")]
#[case::leading_equals("{{w|=}} x {{w|=}}")]
#[case::leading_hash("{{w|#}} x")]
#[case::leading_star("{{w|*}} x")]
#[case::leading_colon("{{w|:}} x")]
#[case::leading_semicolon("{{w|;}} x")]
fn rendering_is_idempotent(#[case] markup: &str) -> WiktResult<()> {
	let once = render_test(markup)?;
	let twice = render_test(&once.text)?;
	assert_eq!(once.text, twice.text);

	Ok(())
}

#[rstest]
#[case::entry(CAT_ENTRY)]
#[case::equals_literal("{{=}} x {{=}}")]
fn builtin_rendering_is_idempotent(#[case] markup: &str) -> WiktResult<()> {
	let once = render_builtin("en", markup)?;
	assert_eq!(render_builtin("en", &once)?, once);

	Ok(())
}

#[test]
fn rendered_line_markup_is_escaped() -> WiktResult<()> {
	assert_eq!(render_builtin("en", "{{=}} x {{=}}")?, "&#61; x =");

	Ok(())
}

#[test]
fn full_entry_renders() -> WiktResult<()> {
	let text = render_builtin("en", CAT_ENTRY)?;
	insta::assert_snapshot!(text, @"Etymology From Middle English <i>cat</i>, from Old English <i>catt</i>. Noun <b>cat</b> (<i>plural</i> cats) <i>(countable)</i> A domestic feline <i>(<i>Felis catus</i>)</i>. <i>The <b>cat</b> sat.</i>");

	Ok(())
}

// --- Extractor, lexer and parser ---

#[test]
fn innermost_spans_skip_enclosing_constructs() {
	assert_eq!(innermost_spans("{{a|{{b}}}} {{c}}"), vec![4..9, 12..17]);
	assert!(innermost_spans("plain text").is_empty());
	assert!(innermost_spans("{{a|{b}}}").is_empty());
}

#[rstest]
#[case::nested("x {{a|{{b}}}} y", Some(2..13))]
#[case::first_of_two("{{a}}{{b}}", Some(0..5))]
#[case::unterminated("{{a|b", None)]
#[case::unterminated_outer("{{a {{b}}", None)]
#[case::none("no markers", None)]
fn first_top_level_span_depth_counts(
	#[case] text: &str,
	#[case] expected: Option<std::ops::Range<usize>>,
) {
	assert_eq!(first_top_level_span(text), expected);
}

#[test]
fn markers_are_counted_in_pairs_of_braces() {
	assert_eq!(count_markers("{{a}} {{b"), 3);
	assert_eq!(count_markers("{a} b"), 0);
}

#[test]
fn fields_split_only_at_top_level() {
	assert_eq!(split_fields("a|{{b|c}}|d"), vec!["a", "{{b|c}}", "d"]);
	assert_eq!(split_fields("a"), vec!["a"]);
	assert_eq!(split_fields("a||"), vec!["a", "", ""]);
}

#[test]
fn parse_separates_positional_and_named_fields() {
	let construct = parse_construct("name | one | key = value | 2=two");

	assert_eq!(construct.name, "name");
	assert_eq!(construct.positional, vec!["one", "two"]);
	assert_eq!(construct.named("key"), Some("value"));
	assert_eq!(construct.total_fields(), 4);
	assert!(construct.had_extra_whitespace);
}

#[rstest]
#[case::numbered_slot("x|3=c", vec!["", "", "c"], vec![])]
#[case::value_with_equals("x|a=b=c", vec![], vec![("a", "b=c")])]
#[case::illegal_key("x|not a key!=v", vec!["not a key!=v"], vec![])]
#[case::empty_key("x|=v", vec!["=v"], vec![])]
#[case::spaced_key("x|first name=Ann", vec![], vec![("first name", "Ann")])]
#[case::repeated_key("x|k=1|k=2", vec![], vec![("k", "2")])]
#[case::numbered_before_unnumbered("x|2=b|a", vec!["a", "b"], vec![])]
#[case::numbered_overrides_slot("x|a|b|1=c", vec!["c", "b"], vec![])]
#[case::numbered_gap_then_unnumbered("x|3=c|a", vec!["a", "", "c"], vec![])]
#[case::numbered_past_limit("x|65=a", vec![], vec![("65", "a")])]
#[case::numbered_overflow("x|18446744073709551615=a", vec![], vec![("18446744073709551615", "a")])]
#[case::numbered_zero("x|0=a", vec![], vec![("0", "a")])]
fn parse_classifies_fields(
	#[case] body: &str,
	#[case] positional: Vec<&str>,
	#[case] named: Vec<(&str, &str)>,
) {
	let construct = parse_construct(body);
	let expected_named: std::collections::BTreeMap<String, String> = named
		.into_iter()
		.map(|(key, value)| (key.to_string(), value.to_string()))
		.collect();

	assert_eq!(construct.positional, positional);
	assert_eq!(construct.named, expected_named);
	assert!(!construct.had_extra_whitespace);
}

// --- Normalizer ---

#[rstest]
#[case::comment("<!-- hidden -->text", "text")]
#[case::multiline_comment("a<!--\nb\n-->c", "ac")]
#[case::self_closing_ref("a<ref name=\"x\"/>b", "ab")]
#[case::paired_ref("a<ref>cite [[x]]\n{{R:OED}}</ref>b", "ab")]
#[case::magic_word("__NOTOC__word", "word")]
#[case::heading("== Etymology ==", "Etymology")]
#[case::crlf_heading("== Etymology ==\r\nFrom Latin", "Etymology From Latin")]
#[case::list_markers("# first\n#: example", "first example")]
#[case::link("[[cat]]", "cat")]
#[case::link_anchor("[[cat#English]]", "cat")]
#[case::link_label("[[cat|kitty]]", "kitty")]
#[case::section_link("[[#Etymology|above]]", "above")]
#[case::media_link("a [[File:Cat.jpg|thumb|A cat]] b", "a b")]
#[case::media_link_with_nested_caption("[[Image:x.png|thumb|a [[cat]]]]", "")]
#[case::category_link("[[Category:Felines]]", "")]
#[case::external_link("[https://example.org Example site]", "Example site")]
#[case::external_link_without_label("see [https://example.org] now", "see now")]
#[case::bare_url("see https://example.org/page now", "see now")]
#[case::bold_italic("'''''both'''''", "<i><b>both</b></i>")]
#[case::bold("'''bold'''", "<b>bold</b>")]
#[case::italic("''it''", "<i>it</i>")]
fn normalizer_rewrites_inline_markup(#[case] text: &str, #[case] expected: &str) {
	assert_eq!(clean(text), expected);
}

#[rstest]
#[case::whitespace("a  \n\t b", "a b")]
#[case::punctuation("word , next .", "word, next.")]
#[case::parentheses("( inner )", "(inner)")]
#[case::nbsp("a&nbsp;b", "a b")]
#[case::trim("  padded  ", "padded")]
#[case::leading_heading_marker(" = x =", "&#61; x =")]
#[case::leading_list_marker("#1 and *2", "&#35;1 and *2")]
fn finalize_tidies_whitespace(#[case] text: &str, #[case] expected: &str) {
	assert_eq!(finalize(text), expected);
}

#[test]
fn normalizer_passes_are_idempotent() {
	let text = "== Head ==\n# '''bold''' [[a|b]] ( x ) , y <!-- c -->";
	let once = clean(text);
	assert_eq!(clean(&once), once);
}

#[test]
fn constructs_survive_normalization() {
	let namespaces = Namespaces::default();
	assert_eq!(
		normalize("{{a|''x''|[[y]]}}", &namespaces),
		"{{a|<i>x</i>|y}}"
	);
}

#[test]
fn namespaces_are_matched_case_insensitively() {
	let namespaces = Namespaces::new(vec!["Fichier".to_string()], vec![]);
	assert!(namespaces.is_dropped("fichier:Chat.jpg"));
	assert!(!namespaces.is_dropped(":Fichier:Chat.jpg"));
	assert!(!namespaces.is_dropped("File:Cat.jpg"));
	assert!(!namespaces.is_dropped("chat"));
}

// --- Helpers ---

#[rstest]
#[case(1, "I")]
#[case(4, "IV")]
#[case(16, "XVI")]
#[case(1994, "MCMXCIV")]
#[case(0, "")]
fn roman_numerals(#[case] number: u32, #[case] expected: &str) {
	assert_eq!(helpers::roman(number), expected);
}

#[test]
fn concat_joins_non_empty_parts() {
	assert_eq!(helpers::concat(&["a", "", "b", "c"], ", ", " and "), "a, b and c");
	assert_eq!(helpers::concat(&["a"], ", ", " and "), "a");
	assert_eq!(helpers::concat(&["", ""], ", ", " and "), "");
}

#[test]
fn capitalize_only_touches_first_character() {
	assert_eq!(helpers::capitalize("éclair au chocolat"), "Éclair au chocolat");
	assert_eq!(helpers::capitalize("iPhone"), "IPhone");
	assert_eq!(helpers::capitalize(""), "");
}

// --- English handler ---

#[rstest]
#[case::borrowing("{{bor|en|la|bonus}}", "Latin <i>bonus</i>")]
#[case::derivation(
	"{{der|en|grc|λόγος|tr=lógos|t=word}}",
	"Ancient Greek <i>λόγος</i> (lógos) (“word”)"
)]
#[case::learned_borrowing("{{lbor|en|la|bonus}}", "Learned borrowing from Latin <i>bonus</i>")]
#[case::notext("{{inh|en|enm|cat|notext=1}}", "<i>cat</i>")]
#[case::cognate("{{cog|fr|bon}}", "French <i>bon</i>")]
#[case::compound("{{compound|en|foot|ball}}", "<i>foot</i> + <i>ball</i>")]
#[case::prefix("{{prefix|en|un|do}}", "<i>un-</i> + <i>do</i>")]
#[case::suffix("{{suffix|en|do|er}}", "<i>do</i> + <i>-er</i>")]
#[case::confix("{{confix|en|neo|logism}}", "<i>neo-</i> + <i>-logism</i>")]
#[case::place("{{place|en|city|s/Texas|c/USA}}", "A city in Texas, USA")]
#[case::place_article("{{place|en|island}}", "An island")]
#[case::given_name("{{given name|en|male}}", "A male given name")]
#[case::surname("{{surname|en|from=Old English}}", "A surname, from Old English")]
#[case::labels(
	"{{lb|en|archaic|_|slang|or|dialectal}}",
	"<i>(archaic slang or dialectal)</i>"
)]
#[case::labels_comma("{{lb|en|rare|figurative}}", "<i>(rare, figuratively)</i>")]
#[case::form_of("{{plural of|en|cat}}", "plural of <b>cat</b>")]
#[case::gloss("{{gloss|small}}", "(small)")]
#[case::mention_rule("{{m|en|word}}", "<i>word</i>")]
#[case::italic_rule("{{archaic}}", "<i>(Archaic)</i>")]
#[case::ignored("{{rfv|en}}", "")]
#[case::literal("{{sic}}", "[sic]")]
#[case::century("{{century|16}}", "XVI<sup>th</sup> century")]
#[case::qualifier("{{q|rare|chiefly US}}", "<i>(rare, chiefly US)</i>")]
#[case::ipa("{{IPA|en|/kæt/|/kat/}}", "/kæt/, /kat/")]
#[case::link("{{l|en|cat}}", "cat")]
#[case::link_alt("{{l|en|cat|cats}}", "cats")]
fn english_rules(#[case] markup: &str, #[case] expected: &str) -> WiktResult<()> {
	assert_eq!(render_builtin("en", markup)?, expected);

	Ok(())
}

// --- French handler ---

#[rstest]
#[case::etyl("{{étyl|la|fr|mot=bonus|sens=bon}}", "latin <i>bonus</i> («\u{a0}bon\u{a0}»)")]
#[case::compose_de(
	"{{composé de|porte|manteau|lang=fr}}",
	"composé de <i>porte</i> et de <i>manteau</i>"
)]
#[case::compose_de_capitalized(
	"{{composé de|porte|manteau|lang=fr|m=1}}",
	"Composé de <i>porte</i> et de <i>manteau</i>"
)]
#[case::siecle(
	"{{siècle|16}}",
	"<span style=\"font-variant:small-caps\">XVI</span><sup>e</sup> siècle"
)]
#[case::premier_siecle(
	"{{siècle|1}}",
	"<span style=\"font-variant:small-caps\">I</span><sup>er</sup> siècle"
)]
#[case::prenom("{{prénom|fr|m}}", "Prénom masculin")]
#[case::nom_w_pc(
	"{{nom w pc|Victor|Hugo}}",
	"Victor <span style=\"font-variant:small-caps\">Hugo</span>"
)]
#[case::lien("{{lien|chat|fr}}", "chat")]
#[case::lien_sens("{{lien|chat|fr|sens=chats}}", "chats")]
#[case::lang("{{lang|la|bonus}}", "bonus")]
#[case::italic_rule("{{fam}}", "<i>(Familier)</i>")]
#[case::ignored("{{ébauche|fr}}", "")]
#[case::complex_rule("{{smcp|Hugo}}", "<span style=\"font-variant:small-caps\">Hugo</span>")]
#[case::literal("{{R:TLFi}}", "Trésor de la langue française informatisé")]
fn french_rules(#[case] markup: &str, #[case] expected: &str) -> WiktResult<()> {
	assert_eq!(render_builtin("fr", markup)?, expected);

	Ok(())
}

#[test]
fn media_namespaces_are_per_locale() -> WiktResult<()> {
	let markup = "[[Fichier:Chat.jpg|vignette|Un chat]]";
	assert_eq!(render_builtin("fr", markup)?, "");
	assert_eq!(render_builtin("en", markup)?, "Un chat");

	Ok(())
}

// --- Registry and configuration ---

#[test]
fn builtin_registry_holds_sample_locales() -> WiktResult<()> {
	let registry = builtin_registry();
	let locales: Vec<&str> = registry.iter().map(LocaleRuleSet::locale).collect();

	assert_eq!(locales, vec!["en", "fr"]);
	assert_eq!(registry.get("fr")?.summary().handler, "fr");
	assert!(matches!(
		registry.get("zz"),
		Err(WiktError::UnknownLocale(locale)) if locale == "zz"
	));

	Ok(())
}

#[test]
fn config_is_not_required() -> WiktResult<()> {
	let tmp = tempfile::tempdir().unwrap_or_else(|e| panic!("tempdir: {e}"));
	assert!(WiktConfig::load(tmp.path())?.is_none());

	Ok(())
}

#[test]
fn config_candidates_are_searched_in_order() -> WiktResult<()> {
	let tmp = tempfile::tempdir().unwrap_or_else(|e| panic!("tempdir: {e}"));
	std::fs::create_dir(tmp.path().join(".config")).unwrap_or_else(|e| panic!("mkdir: {e}"));
	std::fs::write(tmp.path().join(".config/wikt.toml"), "locale = \"de\"\n")
		.unwrap_or_else(|e| panic!("write: {e}"));

	let config = WiktConfig::load(tmp.path())?.unwrap_or_else(|| panic!("config not found"));
	assert_eq!(config.default_locale(), "de");

	std::fs::write(tmp.path().join(".wikt.toml"), "locale = \"fr\"\n")
		.unwrap_or_else(|e| panic!("write: {e}"));
	let config = WiktConfig::load(tmp.path())?.unwrap_or_else(|| panic!("config not found"));
	assert_eq!(config.default_locale(), "fr");

	Ok(())
}

#[test]
fn config_without_locale_uses_default() -> WiktResult<()> {
	let tmp = tempfile::tempdir().unwrap_or_else(|e| panic!("tempdir: {e}"));
	std::fs::write(tmp.path().join("wikt.toml"), "").unwrap_or_else(|e| panic!("write: {e}"));

	let config = WiktConfig::load(tmp.path())?.unwrap_or_else(|| panic!("config not found"));
	assert_eq!(config.default_locale(), DEFAULT_LOCALE);
	assert!(config.rules.is_empty());

	Ok(())
}

#[test]
fn invalid_config_is_a_parse_error() {
	let tmp = tempfile::tempdir().unwrap_or_else(|e| panic!("tempdir: {e}"));
	std::fs::write(tmp.path().join("wikt.toml"), "colour = true\n")
		.unwrap_or_else(|e| panic!("write: {e}"));

	let result = WiktConfig::load(tmp.path());
	assert!(matches!(result, Err(WiktError::ConfigParse(_))));
}

#[test]
fn registry_merges_configured_tables() -> WiktResult<()> {
	let tmp = tempfile::tempdir().unwrap_or_else(|e| panic!("tempdir: {e}"));
	std::fs::create_dir(tmp.path().join("rules")).unwrap_or_else(|e| panic!("mkdir: {e}"));
	std::fs::write(
		tmp.path().join("rules/fr.toml"),
		"[literal]\nbonjour = \"salut\"\n",
	)
	.unwrap_or_else(|e| panic!("write: {e}"));
	std::fs::write(
		tmp.path().join("rules/it.toml"),
		"[italic]\nraro = \"Raro\"\n",
	)
	.unwrap_or_else(|e| panic!("write: {e}"));
	std::fs::write(
		tmp.path().join("wikt.toml"),
		"locale = \"it\"\n\n[rules]\nfr = \"rules/fr.toml\"\nit = \"rules/it.toml\"\n",
	)
	.unwrap_or_else(|e| panic!("write: {e}"));

	let config = WiktConfig::load(tmp.path())?.unwrap_or_else(|| panic!("config not found"));
	let registry = LocaleRegistry::from_config(&config)?;
	assert_eq!(config.default_locale(), "it");
	assert_eq!(registry.len(), 3);

	let fr = registry.get("fr")?;
	assert_eq!(render("{{bonjour}}", fr, "salut")?.text, "salut");
	assert_eq!(render("{{fam}}", fr, "salut")?.text, "<i>(Familier)</i>");

	let it = registry.get("it")?;
	assert_eq!(it.summary().handler, "*");
	assert_eq!(render("{{raro}}", it, "raro")?.text, "<i>(Raro)</i>");
	assert_eq!(render("{{bor|it|la|x}}", it, "raro")?.text, "");

	Ok(())
}

#[test]
fn missing_rule_table_is_reported() {
	let tmp = tempfile::tempdir().unwrap_or_else(|e| panic!("tempdir: {e}"));
	std::fs::write(tmp.path().join("wikt.toml"), "[rules]\nde = \"missing.toml\"\n")
		.unwrap_or_else(|e| panic!("write: {e}"));

	let config = WiktConfig::load(tmp.path())
		.unwrap_or_else(|e| panic!("config: {e}"))
		.unwrap_or_else(|| panic!("config not found"));
	let result = LocaleRegistry::from_config(&config);
	assert!(matches!(result, Err(WiktError::RuleTableParse { .. })));
}

// --- Batch rendering ---

#[test]
fn huge_numbered_key_renders_as_named_field() -> WiktResult<()> {
	assert_eq!(render_test("{{zork|18446744073709551615=a}}")?.text, "<i>(Zork)</i>");
	assert_eq!(render_test("{{zork|50000000=a}}")?.text, "<i>(Zork)</i>");

	Ok(())
}

#[test]
fn malformed_entry_does_not_poison_batch() {
	let registry = builtin_registry();
	let entry = |word: &str, markup: &str| {
		Entry {
			word: word.to_string(),
			locale: None,
			markup: markup.to_string(),
		}
	};
	let entries = vec![
		entry("cat", "{{bor|en|la|cattus}}"),
		entry("zork", "{{zork|18446744073709551615=a}}"),
		entry("xyzzy", "{{xyzzy|50000000=a}} {{q|rare}}"),
		entry("dog", "{{lb|en|archaic}}"),
	];

	let outcomes = render_batch(&entries, &registry, "en");

	assert!(!outcomes.has_failures());
	let texts: Vec<String> = outcomes
		.into_inner()
		.into_iter()
		.filter_map(|outcome| outcome.result.ok())
		.map(|rendered| rendered.text)
		.collect();
	assert_eq!(
		texts,
		vec![
			"Latin <i>cattus</i>",
			"<i>(Zork)</i>",
			"<i>(Xyzzy)</i> <i>(rare)</i>",
			"<i>(archaic)</i>",
		]
	);
}

#[test]
fn batch_isolates_failures_and_keeps_order() -> WiktResult<()> {
	let mut registry = builtin_registry();
	registry.register(test_rules());

	let entry = |word: &str, locale: Option<&str>, markup: &str| {
		Entry {
			word: word.to_string(),
			locale: locale.map(ToString::to_string),
			markup: markup.to_string(),
		}
	};
	let entries = vec![
		entry("cat", None, "{{bor|en|la|cattus}}"),
		entry("chat", Some("zz"), "{{fam}}"),
		entry("loop", Some("xx"), "{{loop}}"),
		entry("chat", Some("fr"), "{{fam}}"),
	];

	let outcomes = render_batch(&entries, &registry, "en");
	let words: Vec<&str> = outcomes.iter().map(|outcome| outcome.word.as_str()).collect();

	assert_eq!(words, vec!["cat", "chat", "loop", "chat"]);
	assert_eq!(outcomes.failures().count(), 2);
	assert!(outcomes.has_failures());
	assert_eq!(outcomes[0].locale, "en");
	assert!(matches!(outcomes[1].result, Err(WiktError::UnknownLocale(_))));
	assert!(matches!(outcomes[2].result, Err(WiktError::NonTerminating { .. })));

	let texts: Vec<String> = outcomes
		.into_inner()
		.into_iter()
		.filter_map(|outcome| outcome.result.ok())
		.map(|rendered| rendered.text)
		.collect();
	assert_eq!(texts, vec!["Latin <i>cattus</i>", "<i>(Familier)</i>"]);

	Ok(())
}
