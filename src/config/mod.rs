//! Configuration module for Fathom
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files, plus the built-in defaults used when no file is given.
//!
//! # Example
//!
//! ```no_run
//! use fathom::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("fathom.toml")).unwrap();
//! println!("Download pool size: {}", config.downloaders);
//! ```

mod parser;
mod types;
mod validation;

pub use parser::load_config;
pub use types::{CrawlConfig, DEFAULT_DEPTH};
pub use validation::validate;
