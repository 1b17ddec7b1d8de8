//! # eksi-reader
//!
//! A command-line reader for ekşi sözlük: list the popular topics of a
//! channel, read their entries and keep favourites in a local store.
//!
//! ## Architecture
//!
//! Every step runs in sequence on one thread:
//!
//! ```text
//! Fetcher → Extractor → Menu → Session → Store
//! ```
//!
//! - [`fetcher`]: HTTP client returning page markup
//! - [`extractor`]: Topics, entries and channels parsed from that markup
//! - [`menu`]: Numbered selection over stdin
//! - [`session`]: Channel, topic and entry menus and the favourite flow
//! - [`store`]: SQLite or JSON document persistence of favourites
//!
//! ## Quick Start
//!
//! ```bash
//! # Browse today's popular topics
//! eksi
//!
//! # Pick a channel first, ten items per page
//! eksi --channels -c 10
//!
//! # Save topics, then read what they got today
//! eksi --favtitle
//! eksi --getfavs
//!
//! # Saved entries written today
//! eksi --showfavs --today
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together all components:
/// store, fetcher, extractor and theme.
pub mod app;

/// Configuration loaded from `~/.config/eksi-reader/config.toml`.
///
/// - Site address, timeout and user agents
/// - Menu sentinels and page size
/// - Storage backend and data directory
/// - Theme and colour overrides
/// - CSS selectors for the site's markup
pub mod config;

/// Command-line interface using clap.
pub mod cli;

/// Themed output through crossterm.
pub mod console;

/// Core domain models.
///
/// - [`Topic`](domain::Topic): A titled thread with today's entry count
/// - [`Entry`](domain::Entry): A single post, fingerprinted with SHA-256
/// - [`Channel`](domain::Channel): A named feed of topics
/// - [`FavouriteTopic`](domain::FavouriteTopic) and
///   [`FavouriteEntry`](domain::FavouriteEntry): Saved records
pub mod domain;

/// Markup extraction built on the `scraper` crate.
pub mod extractor;

/// Page fetching.
///
/// - [`Fetcher`](fetcher::Fetcher): Async trait returning page markup
/// - [`HttpFetcher`](fetcher::HttpFetcher): reqwest-based implementation
/// - [`SiteUrls`](fetcher::SiteUrls): URL building for every page kind
pub mod fetcher;

pub mod menu;

pub mod session;

/// Favourites persistence.
///
/// - [`FavouriteStore`](store::FavouriteStore): Trait defining storage operations
/// - [`SqliteStore`](store::SqliteStore): SQLite implementation
/// - [`DocumentStore`](store::DocumentStore): JSON document implementation
pub mod store;
