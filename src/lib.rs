//! # compact-json
//!
//! A JSON formatter that balances compactness and human readability.
//!
//! Most pretty-printers force a choice between one long line and one
//! value per line. compact-json picks a layout per element instead:
//!
//! - Lists and dicts are written on a single line when they're short
//!   and simple enough
//! - When sibling dicts or lists have similar structure, they are
//!   aligned like table rows, with numeric columns justified to a
//!   common precision
//! - Long lists are written with multiple items per line
//! - Everything else falls back to classic expanded indentation
//!
//! ## Command-Line Tool
//!
//! This crate includes the `cjson` CLI tool for formatting JSON from
//! the terminal:
//!
//! ```sh
//! # Install
//! cargo install compact-json
//!
//! # Format a file
//! cjson input.json
//!
//! # Format from stdin with a 100-column inline budget
//! cat input.json | cjson --max-inline-length 100 -
//! ```
//!
//! Run `cjson --help` for all options.
//!
//! ## Quick Start
//!
//! ```rust
//! use compact_json::Formatter;
//!
//! let input = r#"{"name":"Alice","scores":[95,87,92],"active":true}"#;
//!
//! let mut formatter = Formatter::new();
//! let output = formatter.reformat(input).unwrap();
//!
//! assert_eq!(output, r#"{ "name": "Alice", "scores": [95, 87, 92], "active": true }"#);
//! ```
//!
//! ## Serializing Rust Types
//!
//! Any type implementing [`serde::Serialize`] can be formatted
//! directly:
//!
//! ```rust
//! use compact_json::Formatter;
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Player {
//!     name: String,
//!     scores: Vec<i64>,
//! }
//!
//! let player = Player {
//!     name: "Alice".into(),
//!     scores: vec![95, 87, 92],
//! };
//!
//! let mut formatter = Formatter::new();
//! let output = formatter.serialize_serde(&player).unwrap();
//! assert_eq!(output, r#"{ "name": "Alice", "scores": [95, 87, 92] }"#);
//! ```
//!
//! ## Configuration
//!
//! Formatting behavior is controlled through [`FormatterOptions`]:
//!
//! ```rust
//! use compact_json::{Formatter, EolStyle};
//!
//! let mut formatter = Formatter::new();
//! formatter.options.max_inline_length = 100;
//! formatter.options.indent_spaces = 2;
//! formatter.options.json_eol_style = EolStyle::Lf;
//! formatter.options.table_dict_minimum_similarity = 50;
//!
//! let output = formatter.reformat(r#"{"values":[1,2,3]}"#).unwrap();
//! ```
//!
//! ## Example Output
//!
//! Given suitable input, compact-json produces output like:
//!
//! ```json
//! {
//!     "units": [
//!         { "type": "turret"   , "hp": 400, "x": 47.50 },
//!         { "type": "assassin" , "hp":  80, "x": 12.25 },
//!         { "type": "berserker", "hp": 150, "x":  0.00 }
//!     ]
//! }
//! ```
//!
//! Notice how similar dicts become aligned rows, numbers line up on
//! their decimal points, and the structure stays compact without
//! sacrificing readability.
//!
//! ## Warnings
//!
//! Dict keys that aren't strings are coerced to text, and duplicate
//! keys resolve to the last value in input order. Both situations are
//! reported as [`Warning`] records through [`Formatter::warnings`]
//! rather than errors; formatting always completes.

mod buffer;
mod column;
mod convert;
mod error;
mod formatter;
mod model;
mod options;
mod value;
mod width;

pub use crate::error::CompactJsonError;
pub use crate::formatter::Formatter;
pub use crate::model::Warning;
pub use crate::options::{EolStyle, FormatterOptions};
pub use crate::value::{Key, Value};
