use std::io::Read;
use std::path::Path;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;
use wikt_cli::Commands;
use wikt_cli::OutputFormat;
use wikt_cli::WiktCli;
use wikt_core::Entry;
use wikt_core::LocaleRegistry;
use wikt_core::WiktConfig;
use wikt_core::render;
use wikt_core::render_batch;

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,yellow) => {
		if color_enabled() {
			format!("{}", $text.yellow())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,bold) => {
		if color_enabled() {
			format!("{}", $text.bold())
		} else {
			format!("{}", $text)
		}
	};
}

fn main() {
	let args = WiktCli::parse();

	// Respect NO_COLOR env var and --no-color flag.
	let use_color = !args.no_color && std::env::var_os("NO_COLOR").is_none();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	// Install miette's fancy handler for rich error diagnostics.
	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	init_tracing(args.verbose, use_color);

	let result = match &args.command {
		Some(Commands::Render { file, word }) => run_render(&args, file.as_deref(), word.as_deref()),
		Some(Commands::Batch { file, format }) => run_batch(&args, file.as_deref(), *format),
		Some(Commands::Locales { format }) => run_locales(&args, *format),
		None => {
			eprintln!("No subcommand specified. Run `wikt --help` for usage.");
			process::exit(1);
		}
	};

	if let Err(e) = result {
		// Try to render through miette for rich diagnostics with help text
		// and error codes.
		match e.downcast::<wikt_core::WiktError>() {
			Ok(wikt_err) => {
				let report: miette::Report = (*wikt_err).into();
				eprintln!("{report:?}");
			}
			Err(e) => {
				eprintln!("{} {e}", colored!("error:", red));
			}
		}
		process::exit(2);
	}
}

/// Log to stderr. `RUST_LOG` wins unless `--verbose` is given.
fn init_tracing(verbose: bool, use_color: bool) {
	let filter = if verbose {
		EnvFilter::new("debug")
	} else {
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
	};

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_ansi(use_color)
		.with_target(false)
		.without_time()
		.init();
}

/// The config named on the command line, or the one discovered in the
/// current directory.
fn load_config(args: &WiktCli) -> Result<Option<WiktConfig>, Box<dyn std::error::Error>> {
	if let Some(path) = &args.config {
		return Ok(Some(WiktConfig::load_file(path)?));
	}

	let root = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
	Ok(WiktConfig::load(&root)?)
}

/// Build the registry and pick the locale: `--locale`, then the configured
/// default.
fn load_registry(
	args: &WiktCli,
) -> Result<(LocaleRegistry, String), Box<dyn std::error::Error>> {
	let config = load_config(args)?;
	let registry = match &config {
		Some(config) => LocaleRegistry::from_config(config)?,
		None => LocaleRegistry::builtin()?,
	};
	let locale = args.locale.clone().unwrap_or_else(|| {
		config
			.as_ref()
			.map_or(wikt_core::DEFAULT_LOCALE, WiktConfig::default_locale)
			.to_string()
	});

	Ok((registry, locale))
}

/// Read `file`, or stdin when no file is given.
fn read_input(file: Option<&Path>) -> Result<String, Box<dyn std::error::Error>> {
	match file {
		Some(path) => Ok(std::fs::read_to_string(path)?),
		None => {
			let mut input = String::new();
			std::io::stdin().read_to_string(&mut input)?;
			Ok(input)
		}
	}
}

fn run_render(
	args: &WiktCli,
	file: Option<&Path>,
	word: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
	let (registry, locale) = load_registry(args)?;
	let rules = registry.get(&locale)?;
	let markup = read_input(file)?;

	let stem = file
		.and_then(Path::file_stem)
		.map(|stem| stem.to_string_lossy().into_owned());
	let word = word.map(ToString::to_string).or(stem).unwrap_or_default();

	let rendered = render(&markup, rules, &word)?;
	for diagnostic in &rendered.diagnostics {
		eprintln!("{} {diagnostic}", colored!("warning:", yellow));
	}
	println!("{}", rendered.text);

	Ok(())
}

fn run_batch(
	args: &WiktCli,
	file: Option<&Path>,
	format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
	let (registry, locale) = load_registry(args)?;
	let input = read_input(file)?;

	let mut entries = Vec::new();
	for (index, line) in input.lines().enumerate() {
		if line.trim().is_empty() {
			continue;
		}
		let entry: Entry = serde_json::from_str(line)
			.map_err(|e| format!("invalid entry on line {}: {e}", index + 1))?;
		entries.push(entry);
	}

	tracing::debug!(entries = entries.len(), locale = %locale, "rendering batch");
	let outcomes = render_batch(&entries, &registry, &locale);

	for outcome in outcomes.iter() {
		match (&outcome.result, format) {
			(Ok(rendered), OutputFormat::Text) => println!("{}: {}", outcome.word, rendered.text),
			(Ok(rendered), OutputFormat::Json) => {
				let output = serde_json::json!({
					"word": outcome.word,
					"locale": outcome.locale,
					"text": rendered.text,
					"diagnostics": rendered.diagnostics,
				});
				println!("{output}");
			}
			(Err(e), OutputFormat::Text) => {
				eprintln!("{} {}: {e}", colored!("error:", red), outcome.word);
			}
			(Err(e), OutputFormat::Json) => {
				let output = serde_json::json!({
					"word": outcome.word,
					"locale": outcome.locale,
					"error": e.to_string(),
				});
				println!("{output}");
			}
		}
	}

	let failed = outcomes.failures().count();
	if failed > 0 {
		eprintln!(
			"\n{} of {} entries failed to render",
			colored!(failed, red),
			outcomes.len()
		);
		process::exit(1);
	}

	Ok(())
}

fn run_locales(args: &WiktCli, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
	let (registry, locale) = load_registry(args)?;
	let summaries: Vec<_> = registry.iter().map(|rules| rules.summary()).collect();

	if format == OutputFormat::Json {
		println!("{}", serde_json::to_string_pretty(&summaries)?);
		return Ok(());
	}

	println!("{}", colored!("Locales:", bold));
	for summary in &summaries {
		let marker = if summary.locale == locale { "*" } else { " " };
		println!(
			"{marker} {:<6} handler={:<3} ignored={} complex={} italic={} literal={} labels={} \
			 languages={}",
			summary.locale,
			summary.handler,
			summary.ignored,
			summary.complex,
			summary.italic,
			summary.literal,
			summary.labels,
			summary.languages,
		);
	}

	Ok(())
}
