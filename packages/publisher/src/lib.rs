//! AutoNifty - publish a webcomic's dated archive through tag templates.
//!
//! Comic files are named after the day they go live (`20240115.png`). A
//! publishing run moves due files from the upload directory into the live
//! comics directory, then renders one daily page per comic date and a front
//! page for the newest one. Pages come from templates expanded by the
//! [`autonifty_tags`] engine, extended here with comic and navigation tags.
//!
//! # Example
//!
//! ```
//! use autonifty::config::Config;
//!
//! let config = Config::from_yaml("url: https://example.com/\n").unwrap();
//! let date = "20240115".parse().unwrap();
//! assert_eq!(config.daily_url(date), "https://example.com/d/20240115.html");
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Site configuration and the "today" calculation
//! - [`bucket`]: Live comics by date, and promotion of staged comics
//! - [`tags`]: `comic` and `nav_*` tag handlers
//! - [`publish`]: The publishing run
//! - [`error`]: Error types and Result alias
//! - [`cli`]: Command-line interface

pub mod bucket;
pub mod cli;
pub mod config;
pub mod error;
pub mod publish;
pub mod tags;

pub use bucket::ComicBucket;
pub use config::Config;
pub use error::{PublishError, Result};
pub use publish::{publish, render_file, PublishReport};
