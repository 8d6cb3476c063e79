//! # CLI Module
//!
//! Command-line front end of the `validagen` binary.
//!
//! ## Commands
//!
//! ### `generate`
//!
//! Generate one validator source file per type declared in a configuration:
//!
//! ```bash
//! validagen generate validators.toml
//! ```
//!
//! Options:
//! - `--template <FILE>` / `-t` - Render with a custom template instead of the builtin one
//! - `--dry-run` - Resolve and render everything, but only log what would be written
//!
//! ### `check`
//!
//! Validate a configuration and print every issue found:
//!
//! ```bash
//! validagen check validators.toml
//! ```
//!
//! ### `init`
//!
//! Write a starter configuration:
//!
//! ```bash
//! validagen init --package person
//! ```
//!
//! All commands accept `--loglevel <LEVEL>` / `-l` (default `info`). Any fatal
//! error ends the process with a non-zero exit code.

mod commands;


pub use commands::{run_cli, run_command, Cli, Commands, KindArg};
