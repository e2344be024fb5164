//! # Introduction
//!
//! minikconf validates configuration description files written in a small
//! Kconfig dialect. Parsing succeeds only if every symbol used in an
//! assignment, dependency, default condition or `select` was declared with
//! `config NAME` somewhere in the file set.
//!
//! ## Pipeline
//!
//! ```text
//! Root file → Lexer → Parser ──(source/include)──→ Parser for included file
//!                       │                                  │
//!                       └──────────→ KconfigData ←─────────┘
//!                                        │
//!                              undefined-symbol check
//! ```
//!
//! 1. [`parser`] — scanner, recursive descent parser, include resolution
//!    and error reporting.
//! 2. [`symbols`] — the symbol table shared by every file of one parse.
//!
//! ## Example
//!
//! ```
//! let data = minikconf::parse_source("Kconfig", "config FOO\n  bool\nCONFIG_FOO=y\n").unwrap();
//! assert_eq!(data.declared(), vec!["FOO"]);
//! ```
//!
//! Boolean expressions are parsed for syntax and symbol references only;
//! they are never evaluated.

pub mod parser;
pub mod symbols;

pub use parser::errors::{KconfigError, SourceLocation};
pub use parser::parse::{parse_file, parse_file_with, parse_source, parse_source_with, ParseOptions};
pub use symbols::KconfigData;
