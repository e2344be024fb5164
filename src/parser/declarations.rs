//! Clause parsing implementation
//!
//! This module handles the top-level constructs of a Kconfig file:
//!
//! - Include directives: `source FILE` / `include FILE`
//! - Declarations: `config NAME` followed by its properties
//! - Assignments: `CONFIG_NAME=y` / `CONFIG_NAME=n`
//!
//! # Grammar
//!
//! ```text
//! clause      ::= source_directive | declaration | assignment
//! declaration ::= "config" var properties
//! properties  ::= (default | depends_on | select | "bool")*
//! default     ::= "default" y_or_n condition
//! depends_on  ::= "depends" "on" expr
//! select      ::= "select" var condition
//! assignment  ::= assignment_var "=" y_or_n
//! ```
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::constants::CONFIG_PREFIX;
use crate::parser::errors::KconfigError;
use crate::parser::lexer::Token;
use crate::parser::parse::Parser;
use crate::symbols::DefaultValue;

impl Parser<'_> {
    /// Parse one top-level clause
    pub(crate) fn parse_clause(&mut self) -> Result<(), KconfigError> {
        match &self.token {
            Token::Source(path) => {
                let path = path.clone();
                self.parse_include(&path)?;
                self.advance()
            }
            Token::Config => self.parse_declaration(),
            Token::Ident(_) => self.parse_assignment(),
            _ => Err(self.syntax_error("expected \"source\", \"config\" or identifier")),
        }
    }

    /// Parse declaration: config NAME properties
    pub(crate) fn parse_declaration(&mut self) -> Result<(), KconfigError> {
        self.expect_token(&Token::Config, "expected \"config\"")?;

        let line = self.lexer.line();
        let location = self.location();
        let var = self.parse_var()?;
        if !self.data.declare(&var, &self.file_name, line) {
            return Err(KconfigError::DuplicateDeclaration {
                name: var,
                location,
            });
        }

        self.parse_properties(&var)
    }

    /// Parse the properties of `var`, then append its implicit `n` default.
    pub(crate) fn parse_properties(&mut self, var: &str) -> Result<(), KconfigError> {
        while self.token.starts_property() {
            self.parse_property(var)?;
        }
        self.data.add_default(
            var,
            DefaultValue {
                value: false,
                conditional: false,
                implicit: true,
            },
        );

        // Checked here only for a more helpful message than parse_clause gives.
        if !self.token.starts_clause() {
            return Err(self.syntax_error(
                "expected \"source\", \"config\", identifier, \"default\", \"depends on\" or \"select\"",
            ));
        }
        Ok(())
    }

    fn parse_property(&mut self, var: &str) -> Result<(), KconfigError> {
        match self.token {
            Token::Default => {
                self.advance()?;
                let value = self.parse_y_or_n()?;
                let conditional = self.parse_condition()?;
                self.data.add_default(
                    var,
                    DefaultValue {
                        value,
                        conditional,
                        implicit: false,
                    },
                );
            }
            Token::Depends => {
                self.advance()?;
                self.expect_token(&Token::On, "Expected \"on\"")?;
                self.parse_expr()?;
                self.data.add_dependency(var);
            }
            Token::Select => {
                self.advance()?;
                let selected = self.parse_var()?;
                self.parse_condition()?;
                self.data.add_select(var, &selected);
            }
            Token::Bool => self.advance()?,
            _ => return Err(self.syntax_error("expected property")),
        }
        Ok(())
    }

    /// Parse assignment: CONFIG_NAME = y_or_n
    pub(crate) fn parse_assignment(&mut self) -> Result<(), KconfigError> {
        let var = self.parse_assignment_var()?;
        self.expect_token(&Token::Equal, "Expected \"=\"")?;
        let value = self.parse_y_or_n()?;
        self.data.assign(&var, value);
        Ok(())
    }

    /// Identifier that must start with `CONFIG_`; the prefix is stripped.
    fn parse_assignment_var(&mut self) -> Result<String, KconfigError> {
        let Token::Ident(name) = &self.token else {
            return Err(self.syntax_error("Expected identifier"));
        };
        let Some(stripped) = name.strip_prefix(CONFIG_PREFIX) else {
            return Err(KconfigError::Syntax {
                message: format!("Expected identifier starting with \"{}\"", CONFIG_PREFIX),
                before: None,
                location: self.location(),
            });
        };

        let var = stripped.to_string();
        self.advance()?;
        self.data.reference(&var);
        Ok(var)
    }

    /// Parse var: identifier, registering a reference
    pub(crate) fn parse_var(&mut self) -> Result<String, KconfigError> {
        let Token::Ident(name) = &self.token else {
            return Err(self.syntax_error("Expected identifier"));
        };

        let var = name.clone();
        self.advance()?;
        self.data.reference(&var);
        Ok(var)
    }

    fn parse_y_or_n(&mut self) -> Result<bool, KconfigError> {
        let value = match self.token {
            Token::Y => true,
            Token::N => false,
            _ => return Err(self.syntax_error("Expected \"y\" or \"n\"")),
        };
        self.advance()?;
        Ok(value)
    }
}
