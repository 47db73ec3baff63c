use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Render the wiki markup of dictionary entries into clean, display-ready text.",
	long_about = "wikt expands the `{{…}}` constructs of dictionary entry markup against \
	              per-locale rule tables and cleans up the surrounding inline markup.\n\nQuick \
	              start:\n  wikt render entry.txt --word cat    Render one entry\n  wikt batch \
	              entries.jsonl                  Render JSON-lines entries in parallel\n  wikt \
	              locales                              List the registered locales"
)]
pub struct WiktCli {
	#[command(subcommand)]
	pub command: Option<Commands>,

	/// Path to a `wikt.toml` config file. Defaults to discovery in the
	/// current directory.
	#[arg(long, short, global = true)]
	pub config: Option<PathBuf>,

	/// Locale to render with. Overrides the configured default.
	#[arg(long, short, global = true)]
	pub locale: Option<String>,

	/// Enable verbose output.
	#[arg(long, short, global = true, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, global = true, default_value_t = false)]
	pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
	/// Render the markup of one entry.
	///
	/// Reads the markup from FILE, or from stdin when no file is given, and
	/// prints the rendered text. Non-fatal diagnostics such as superfluous
	/// whitespace in a construct are printed to stderr.
	Render {
		/// File holding the entry's markup.
		file: Option<PathBuf>,

		/// The word the markup belongs to. Defaults to the file stem.
		#[arg(long, short)]
		word: Option<String>,
	},
	/// Render a batch of entries in parallel.
	///
	/// Reads JSON lines of the form `{"word": …, "locale": …, "markup": …}`
	/// from FILE or stdin. The locale is optional. Prints one line per entry
	/// in input order and exits with status 1 when any entry failed.
	Batch {
		/// File holding one JSON entry per line.
		file: Option<PathBuf>,

		/// Output format. Use `text` for `word: text` lines or `json` for one
		/// JSON object per entry.
		#[arg(long, value_enum, default_value_t = OutputFormat::Text)]
		format: OutputFormat,
	},
	/// List the registered locales and the size of their rule tables.
	Locales {
		/// Output format for the listing.
		#[arg(long, value_enum, default_value_t = OutputFormat::Text)]
		format: OutputFormat,
	},
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
	/// Human-readable text output.
	Text,
	/// JSON output for programmatic consumption.
	Json,
}
