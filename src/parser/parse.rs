//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct, its token helpers, and the
//! public entry points [`parse_file`] and [`parse_source`].
//!
//! # Parser Architecture
//!
//! The Parser is a recursive descent parser that pulls tokens from the
//! [`Lexer`] one at a time and fires semantic actions on the shared
//! [`KconfigData`] as each production is recognized:
//! - This module: Parser struct, helper methods, and coordination
//! - `declarations`: clauses, `config` declarations and assignments
//! - `expressions`: `depends on` / `if` expressions
//! - `include`: `source` / `include` directives
//!
//! One Parser exists per file. Included files get a fresh Parser that
//! borrows the same [`KconfigData`], so undefined-symbol checking can wait
//! until the whole file set has been read.

use crate::parser::constants::{MAX_EXPRESSION_DEPTH, MAX_INCLUDE_DEPTH};
use crate::parser::errors::{KconfigError, SourceLocation};
use crate::parser::include::absolute_path;
use crate::parser::lexer::{Lexer, Token};
use crate::symbols::KconfigData;
use std::fs;
use std::path::{Path, PathBuf};

/// Limits applied while parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    pub max_expression_depth: usize,
    pub max_include_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_expression_depth: MAX_EXPRESSION_DEPTH,
            max_include_depth: MAX_INCLUDE_DEPTH,
        }
    }
}

/// Parse `path` and every file it includes, then check that all referenced
/// symbols were declared.
pub fn parse_file(path: impl AsRef<Path>) -> Result<KconfigData, KconfigError> {
    parse_file_with(path, ParseOptions::default())
}

pub fn parse_file_with(
    path: impl AsRef<Path>,
    options: ParseOptions,
) -> Result<KconfigData, KconfigError> {
    let path = path.as_ref();
    let source = fs::read_to_string(path).map_err(|source| KconfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_source_with(&path.to_string_lossy(), &source, options)
}

/// Parse in-memory text as the root file. Includes are resolved relative to
/// the directory of `name`.
pub fn parse_source(name: &str, source: &str) -> Result<KconfigData, KconfigError> {
    parse_source_with(name, source, ParseOptions::default())
}

pub fn parse_source_with(
    name: &str,
    source: &str,
    options: ParseOptions,
) -> Result<KconfigData, KconfigError> {
    let abs_path = absolute_path(Path::new(name)).map_err(|source| KconfigError::Io {
        path: PathBuf::from(name),
        source,
    })?;

    let mut data = KconfigData::new();
    let location = {
        let mut parser = Parser::new(&mut data, options, name, abs_path, source);
        parser.parse_config()?;
        parser.location()
    };

    let undefined = data.undefined_symbols();
    if !undefined.is_empty() {
        return Err(KconfigError::UndefinedSymbols {
            symbols: undefined,
            location,
        });
    }

    tracing::debug!(
        root = name,
        symbols = data.declared().len(),
        files = data.included_files().len(),
        "validated"
    );
    Ok(data)
}

/// Recursive descent parser for one Kconfig file
pub struct Parser<'a> {
    pub(crate) data: &'a mut KconfigData,
    pub(crate) options: ParseOptions,
    pub(crate) lexer: Lexer,
    /// Current (lookahead) token
    pub(crate) token: Token,
    /// File name as shown in diagnostics
    pub(crate) file_name: String,
    pub(crate) abs_path: PathBuf,
    /// Current expression nesting
    pub(crate) depth: usize,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(
        data: &'a mut KconfigData,
        options: ParseOptions,
        file_name: &str,
        abs_path: PathBuf,
        source: &str,
    ) -> Self {
        Self {
            data,
            options,
            lexer: Lexer::new(source),
            token: Token::Eof,
            file_name: file_name.to_string(),
            abs_path,
            depth: 0,
        }
    }

    /// Parse the whole file: `config := clause* EOF`
    pub(crate) fn parse_config(&mut self) -> Result<(), KconfigError> {
        tracing::debug!(file = %self.file_name, "parsing");
        self.data.mark_included(self.abs_path.clone());

        self.advance()?;
        while self.token != Token::Eof {
            self.parse_clause()?;
        }

        tracing::debug!(file = %self.file_name, "done");
        Ok(())
    }

    // ===== Helper methods =====

    /// Location of the current token, include chain included.
    pub(crate) fn location(&self) -> SourceLocation {
        SourceLocation {
            includes: self.data.include_sites(),
            file: self.file_name.clone(),
            line: self.lexer.line(),
            column: self.lexer.column(),
        }
    }

    pub(crate) fn advance(&mut self) -> Result<(), KconfigError> {
        match self.lexer.next_token() {
            Ok(token) => {
                self.token = token;
                Ok(())
            }
            Err(err) => Err(KconfigError::Lex {
                message: err.message,
                location: self.location(),
            }),
        }
    }

    pub(crate) fn check(&self, token: &Token) -> bool {
        std::mem::discriminant(&self.token) == std::mem::discriminant(token)
    }

    pub(crate) fn match_token(&mut self, token: &Token) -> Result<bool, KconfigError> {
        if self.check(token) {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    pub(crate) fn expect_token(&mut self, token: &Token, message: &str) -> Result<(), KconfigError> {
        if self.match_token(token)? {
            Ok(())
        } else {
            Err(self.syntax_error(message))
        }
    }

    /// Syntax error reported before the current token.
    pub(crate) fn syntax_error(&self, message: &str) -> KconfigError {
        KconfigError::Syntax {
            message: message.to_string(),
            before: Some(self.token.clone()),
            location: self.location(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> Result<KconfigData, KconfigError> {
        parse_source("Kconfig", source)
    }

    #[test]
    fn test_parse_bool_declaration() {
        let data = parse("config FOO\n  bool\n").unwrap();
        assert_eq!(data.declared(), vec!["FOO"]);
    }

    #[test]
    fn test_parse_empty_file() {
        let data = parse("").unwrap();
        assert!(data.declared().is_empty());
    }

    #[test]
    fn test_undefined_dependency() {
        let err = parse("config FOO\n  depends on BAR\n").unwrap_err();
        match err {
            KconfigError::UndefinedSymbols { symbols, location } => {
                assert_eq!(symbols, vec!["BAR"]);
                assert_eq!(location.file, "Kconfig");
            }
            other => panic!("Expected undefined symbols, got {:?}", other),
        }
    }

    #[test]
    fn test_all_undefined_symbols_reported() {
        let source = "config A\n  select B if C\n  default y if D || !(E && A)\nCONFIG_F=n\n";
        let err = parse(source).unwrap_err();
        match err {
            KconfigError::UndefinedSymbols { symbols, .. } => {
                assert_eq!(symbols, vec!["B", "C", "D", "E", "F"]);
            }
            other => panic!("Expected undefined symbols, got {:?}", other),
        }
    }

    #[test]
    fn test_forward_reference() {
        let data = parse("CONFIG_B=y\nconfig A\n  depends on B\nconfig B\n").unwrap();
        assert_eq!(data.declared(), vec!["A", "B"]);
        assert_eq!(data.assignments().len(), 1);
    }

    #[test]
    fn test_expression_depth_limit() {
        let options = ParseOptions {
            max_expression_depth: 4,
            ..ParseOptions::default()
        };
        let nested = "config A\n  depends on (((((A)))))\n";
        let err = parse_source_with("Kconfig", nested, options).unwrap_err();
        assert!(matches!(
            err,
            KconfigError::NestingTooDeep {
                what: "expression",
                limit: 4,
                ..
            }
        ));

        let shallow = "config A\n  depends on ((((A))))\n";
        assert!(parse_source_with("Kconfig", shallow, options).is_ok());
    }

    #[test]
    fn test_deep_negation_fails_cleanly() {
        let source = format!("config A\n  depends on {}A\n", "!".repeat(10_000));
        let err = parse(&source).unwrap_err();
        assert!(matches!(err, KconfigError::NestingTooDeep { .. }));
    }

    #[test]
    fn test_lex_error_location() {
        let err = parse("config A\n\tbool @\n").unwrap_err();
        match &err {
            KconfigError::Lex { message, location } => {
                assert_eq!(message, "Stray \"@\"");
                assert_eq!((location.line, location.column), (2, 14));
            }
            other => panic!("Expected lex error, got {:?}", other),
        }
        assert_eq!(err.to_string(), "Kconfig:2:14: Stray \"@\"");
    }
}
