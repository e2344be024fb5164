//! Kconfig dialect parser
//!
//! This module turns Kconfig source files into a validated [`KconfigData`]:
//! - [`lexer`]: Tokenization (source text → tokens), pulled on demand
//! - [`parse`]: Parser struct, entry points and options
//! - [`errors`]: Error types and include-aware source locations
//! - `declarations`, `expressions`, `include`: the grammar productions
//!
//! # Supported Dialect
//!
//! - `config NAME` with `bool`, `default y|n [if EXPR]`, `depends on EXPR`
//!   and `select NAME [if EXPR]` properties
//! - `CONFIG_NAME=y|n` assignments
//! - `source FILE` / `include FILE`, relative to the including file
//! - `#` line comments
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser. Semantic actions run as each
//! production is recognized; there is no separate AST.
//!
//! [`KconfigData`]: crate::symbols::KconfigData

pub mod constants;
mod declarations;
pub mod errors;
mod expressions;
mod include;
pub mod lexer;
pub mod parse;
