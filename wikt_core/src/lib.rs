//! `wikt_core` is the core library of [wikt](https://github.com/wikt-dev/wikt). It turns the raw wiki markup of a dictionary entry into a cleaned, display-ready fragment by expanding every `{{name|field|key=value}}` construct against a per-locale rule set.
//!
//! ## Processing Pipeline
//!
//! ```text
//! Raw markup
//!   → Normalizer (comments, refs, headings, bullets, links, emphasis)
//!   → Expansion driver, repeated until no construct remains:
//!       Extractor (innermost spans first, then the first top-level span)
//!       → Parser (name, positional and named fields, whitespace diagnostics)
//!       → Resolver (ignored → complex → italic → literal → locale handler)
//!       → substitution into a new buffer
//!   → Normalizer closing pass (whitespace and punctuation)
//! ```
//!
//! ## Modules
//!
//! - [`config`] — Configuration loading from `wikt.toml`.
//! - [`handlers`] — Per-locale fallback handlers and the shared [`DefaultHandler`].
//! - [`helpers`] — Formatting helpers emitting inline tags.
//!
//! ## Key Types
//!
//! - [`LocaleRuleSet`] — The immutable rules of one locale: ignored names, complex rules, italic labels, literals, the diagnostics skip-set and a fallback handler.
//! - [`LocaleRegistry`] — Locale code to rule set, built once at startup.
//! - [`Construct`] — A parsed `{{…}}` invocation.
//! - [`Rendered`] — A rendered fragment together with its diagnostics.
//! - [`WiktConfig`] — Configuration loaded from `wikt.toml`.
//!
//! ## Complex Rules
//!
//! A complex rule binds a construct name to a [`minijinja`](https://docs.rs/minijinja) expression. The expression sees the construct's `args`, `kwargs` and `name`, the current `word` and `locale`, and a small library of pure helpers:
//!
//! ```toml
//! [complex]
//! m = "italic(args[1])"
//! century = "roman(args[0]) ~ superscript('th') ~ ' century'"
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use wikt_core::LocaleRegistry;
//! use wikt_core::render;
//!
//! let registry = LocaleRegistry::builtin().unwrap();
//! let rules = registry.get("en").unwrap();
//!
//! let rendered = render("'''cat''' {{lb|en|archaic}}", rules, "cat").unwrap();
//! assert_eq!(rendered.text, "<b>cat</b> <i>(archaic)</i>");
//! ```

pub use batch::*;
pub use config::*;
pub use context::*;
pub use engine::*;
pub use error::*;
pub use extractor::*;
pub use handlers::*;
pub use normalizer::*;
pub use parser::*;
pub use resolver::*;
pub use rules::*;

mod batch;
pub mod config;
mod context;
mod engine;
#[allow(unused_assignments)]
mod error;
mod extractor;
pub mod handlers;
pub mod helpers;
pub(crate) mod lexer;
mod normalizer;
mod parser;
mod resolver;
mod rules;
pub(crate) mod sandbox;

#[cfg(test)]
mod __fixtures;
#[cfg(test)]
mod __tests;
