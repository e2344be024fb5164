//! Expression parsing implementation
//!
//! Expressions appear after `depends on` and in `if` conditions. They are
//! parsed only to validate their syntax and to register every symbol they
//! mention; no value is ever computed.
//!
//! # Grammar
//!
//! ```text
//! condition ::= ("if" expr)?
//! expr      ::= disj ("&&" disj)*
//! disj      ::= primary ("||" primary)*
//! primary   ::= "!" primary | "(" expr ")" | var
//! ```
//!
//! Note that `||` binds tighter than `&&` in this dialect.

use crate::parser::errors::KconfigError;
use crate::parser::lexer::Token;
use crate::parser::parse::Parser;

impl Parser<'_> {
    /// Parse an optional `if` condition. Returns whether one was present.
    pub(crate) fn parse_condition(&mut self) -> Result<bool, KconfigError> {
        if self.match_token(&Token::If)? {
            self.parse_expr()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    pub(crate) fn parse_expr(&mut self) -> Result<(), KconfigError> {
        self.parse_disj()?;
        while self.match_token(&Token::And)? {
            self.parse_disj()?;
        }
        Ok(())
    }

    fn parse_disj(&mut self) -> Result<(), KconfigError> {
        self.parse_primary()?;
        while self.match_token(&Token::Or)? {
            self.parse_primary()?;
        }
        Ok(())
    }

    fn parse_primary(&mut self) -> Result<(), KconfigError> {
        match self.token {
            Token::Not => {
                self.advance()?;
                self.nested(|parser| parser.parse_primary())
            }
            Token::LParen => {
                self.advance()?;
                self.nested(|parser| parser.parse_expr())?;
                self.expect_token(&Token::RParen, "Expected \")\"")
            }
            Token::Ident(_) => self.parse_var().map(|_| ()),
            _ => Err(self.syntax_error("Expected \"!\" or \"(\" or identifier")),
        }
    }

    /// Run `f` one nesting level deeper, failing once the limit is exceeded.
    fn nested<F>(&mut self, f: F) -> Result<(), KconfigError>
    where
        F: FnOnce(&mut Self) -> Result<(), KconfigError>,
    {
        if self.depth >= self.options.max_expression_depth {
            return Err(KconfigError::NestingTooDeep {
                what: "expression",
                limit: self.options.max_expression_depth,
                location: self.location(),
            });
        }

        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::errors::KconfigError;
    use crate::parser::lexer::Token;
    use crate::parser::parse::parse_source;

    fn depends_on(expr: &str) -> Result<(), KconfigError> {
        let source = format!("config A\nconfig B\nconfig C\nconfig D\n  depends on {}\n", expr);
        parse_source("Kconfig", &source).map(|_| ())
    }

    #[test]
    fn test_valid_expressions() {
        for expr in [
            "A",
            "!A",
            "!!A",
            "A && B",
            "A || B && C",
            "(A && B) || !(C || D)",
            "((A))",
        ] {
            assert!(depends_on(expr).is_ok(), "failed on {:?}", expr);
        }
    }

    #[test]
    fn test_unclosed_paren() {
        let err = depends_on("(A && B").unwrap_err();
        assert!(matches!(
            err,
            KconfigError::Syntax { ref message, before: Some(Token::Eof), .. }
                if message == "Expected \")\""
        ));
    }

    #[test]
    fn test_dangling_operator() {
        let err = depends_on("A &&").unwrap_err();
        assert!(matches!(
            err,
            KconfigError::Syntax { ref message, .. }
                if message == "Expected \"!\" or \"(\" or identifier"
        ));
    }

    #[test]
    fn test_expression_references_registered() {
        let err = depends_on("A && (E || !F)").unwrap_err();
        match err {
            KconfigError::UndefinedSymbols { symbols, .. } => assert_eq!(symbols, vec!["E", "F"]),
            other => panic!("Expected undefined symbols, got {:?}", other),
        }
    }

    #[test]
    fn test_condition_on_select_and_default() {
        let source = "config A\n  select B if !C\n  default y if B || C\nconfig B\nconfig C\n";
        let data = parse_source("Kconfig", source).unwrap();
        assert!(data.is_referenced("C"));
        assert!(data.symbol("A").unwrap().defaults[0].conditional);
    }
}
