//! # CLI Module
//!
//! Command-line front end for the generator.
//!
//! ## Commands
//!
//! ### `generate` (default)
//!
//! ```bash
//! postalcode-gen                      # same as: generate --spec-dir .
//! postalcode-gen generate --spec-dir scripts --dry-run
//! ```
//!
//! Options:
//! - `--spec-dir <DIR>` - Directory with the JSON documents and skeletons (default: `.`)
//! - `--config <FILE>` - Generator configuration (default: `<spec-dir>/postalcode-gen.toml` if present)
//! - `--dry-run` - Render and check everything, write nothing
//!
//! ### `lint`
//!
//! ```bash
//! postalcode-gen lint --spec-dir scripts --fail-on-error
//! ```
//!
//! `--verbose` is accepted anywhere and raises logging to debug.
//!
//! ## Usage from Code
//!
//! ```rust,ignore
//! use postalcode_gen::cli::{run_cli, Cli};
//! use clap::Parser;
//!
//! run_cli(Cli::parse())?;
//! ```

mod commands;


pub use commands::{run_cli, Cli, Commands};
