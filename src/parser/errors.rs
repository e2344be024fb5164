//! Parse error types and source locations
//!
//! Every failure aborts the whole parse. [`KconfigError`] carries the fully
//! resolved [`SourceLocation`], include chain included, so callers only need
//! to print it.

use crate::parser::lexer::Token;
use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// One `source`/`include` directive on the way to the current file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncludeSite {
    pub file: String,
    pub line: usize,
}

/// Source location information for error reporting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    /// Including files, outermost first.
    pub includes: Vec<IncludeSite>,
    pub file: String,
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for site in &self.includes {
            writeln!(f, "In file included from {}:{}:", site.file, site.line)?;
        }
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// Errors that can occur while parsing a Kconfig file set
#[derive(Debug, Error)]
pub enum KconfigError {
    /// Unrecognized character in the input
    #[error("{location}: {message}")]
    Lex {
        message: String,
        location: SourceLocation,
    },

    /// Current token does not fit the grammar
    #[error("{location}: {message}{}", before_suffix(.before))]
    Syntax {
        message: String,
        /// Token the parser was looking at, if the error is about it.
        before: Option<Token>,
        location: SourceLocation,
    },

    /// A `config` name declared twice across the file set
    #[error("{location}: variable \"{name}\" defined twice")]
    DuplicateDeclaration {
        name: String,
        location: SourceLocation,
    },

    /// Symbols referenced but never declared; reported after the whole parse.
    #[error("{}{location}: there were undefined symbols", undefined_lines(.symbols))]
    UndefinedSymbols {
        symbols: Vec<String>,
        location: SourceLocation,
    },

    /// A file includes itself, directly or transitively
    #[error("{location}: Inclusion loop for {path}")]
    InclusionLoop {
        path: String,
        location: SourceLocation,
    },

    /// An included file could not be read
    #[error("{location}: {source}: {path}")]
    Include {
        path: String,
        #[source]
        source: io::Error,
        location: SourceLocation,
    },

    /// The root file could not be read
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Expression or include nesting beyond the configured limit
    #[error("{location}: {what} nested more than {limit} levels deep")]
    NestingTooDeep {
        what: &'static str,
        limit: usize,
        location: SourceLocation,
    },
}

impl KconfigError {
    pub fn location(&self) -> Option<&SourceLocation> {
        match self {
            KconfigError::Lex { location, .. } => Some(location),
            KconfigError::Syntax { location, .. } => Some(location),
            KconfigError::DuplicateDeclaration { location, .. } => Some(location),
            KconfigError::UndefinedSymbols { location, .. } => Some(location),
            KconfigError::InclusionLoop { location, .. } => Some(location),
            KconfigError::Include { location, .. } => Some(location),
            KconfigError::NestingTooDeep { location, .. } => Some(location),
            KconfigError::Io { .. } => None,
        }
    }
}

fn before_suffix(before: &Option<Token>) -> String {
    match before {
        Some(token) => format!(" before {}", token),
        None => String::new(),
    }
}

fn undefined_lines(symbols: &[String]) -> String {
    symbols
        .iter()
        .map(|name| format!("undefined symbol {}\n", name))
        .collect()
}
