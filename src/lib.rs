//! # Prensa
//!
//! A browser-driven news scraper: it walks a news site's opinion section,
//! extracts up to five articles, downloads their cover images, translates
//! the headlines, and tallies repeated words across the translations,
//! either in one local Chrome session or across a fleet of remote cloud
//! browsers run in parallel.
//!
//! ## Architecture
//!
//! ```text
//! Driver → Extractor → (ImageFetcher, Translator) → Analyzer → report
//! ```
//!
//! Data flows strictly one way; each session owns its browser, its article
//! records, and its word counts, so fleet sessions never interact.
//!
//! ## Quick Start
//!
//! ```bash
//! # One local headless-Chrome session
//! prensa local
//!
//! # The configured remote fleet (credentials from the environment)
//! export BROWSERSTACK_USERNAME=... BROWSERSTACK_ACCESS_KEY=...
//! prensa fleet
//!
//! # Local session, then the fleet
//! prensa run
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together the config
/// and the shared collaborators: translator and image fetcher.
pub mod app;

/// Word frequency analysis over translated headlines.
pub mod analyzer;

/// Command-line interface using clap.
///
/// - `local` - One session against local Chrome
/// - `fleet` - The configured remote sessions in parallel
/// - `run` - Local, then fleet
pub mod cli;

/// Configuration management.
///
/// Loads `~/.config/prensa/config.toml` (created with comments on first
/// run); remote credentials come from environment variables only.
pub mod config;

/// Core domain models.
///
/// - [`ArticleRecord`](domain::ArticleRecord): one scraped article
/// - [`TranslatedTitle`](domain::TranslatedTitle): heading + translation
/// - [`SessionResult`](domain::SessionResult): everything one session produced
pub mod domain;

/// Browser session control.
///
/// - [`Driver`](driver::Driver): async trait over one browser session
/// - [`ChromeDriver`](driver::ChromeDriver): local Chrome via chromiumoxide
/// - [`RemoteDriver`](driver::RemoteDriver): remote W3C WebDriver session
pub mod driver;

/// Per-article field extraction with sentinel degradation.
pub mod extractor;

/// Cover image download.
pub mod fetcher;

/// Parallel execution of remote sessions over a bounded worker pool.
pub mod fleet;

/// End-to-end session orchestration.
///
/// [`SessionRunner`](session::SessionRunner) drives one session from the
/// listing page through analysis and report, releasing the browser on
/// every exit path.
pub mod session;

/// Headline translation behind the [`Translator`](translator::Translator)
/// trait.
pub mod translator;
