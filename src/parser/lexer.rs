//! Scanner for the Kconfig dialect
//!
//! The [`Lexer`] is pull-based: the parser asks for one [`Token`] at a time
//! and the lexer keeps the line/column bookkeeping needed for diagnostics.
//! Comments (`#` to end of line) and whitespace never reach the parser.
//!
//! The source buffer always ends with a newline; a newline that is the last
//! character of the buffer is reported as [`Token::Eof`].

use std::fmt;

/// All token variants produced by the lexer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    // Punctuation and operators
    LParen, // (
    RParen, // )
    Equal,  // =
    And,    // &&
    Or,     // ||
    Not,    // !

    // Keywords
    Depends,
    On,
    Select,
    Config,
    Default,
    Bool,
    If,

    // Literals
    Y,
    N,

    /// `source FILE` or `include FILE`; carries the raw file name.
    Source(String),

    Ident(String),

    Eof,
}

impl Token {
    /// Whether this token may begin a new top-level clause.
    pub fn starts_clause(&self) -> bool {
        matches!(
            self,
            Token::Source(_) | Token::Config | Token::Ident(_) | Token::Eof
        )
    }

    /// Whether this token begins a `config` property.
    pub fn starts_property(&self) -> bool {
        matches!(
            self,
            Token::Default | Token::Depends | Token::Select | Token::Bool
        )
    }
}

/// Fixed human-readable names used in "before ..." diagnostics. Payloads
/// are never printed.
impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Token::LParen => "\"(\"",
            Token::RParen => "\")\"",
            Token::Equal => "\"=\"",
            Token::And => "\"&&\"",
            Token::Or => "\"||\"",
            Token::Not => "\"!\"",
            Token::Depends => "\"depends\"",
            Token::On => "\"on\"",
            Token::Select => "\"select\"",
            Token::Config => "\"config\"",
            Token::Default => "\"default\"",
            Token::Bool => "\"bool\"",
            Token::If => "\"if\"",
            Token::Y => "\"y\"",
            Token::N => "\"n\"",
            Token::Source(_) => "\"source\"",
            Token::Ident(_) => "identifier",
            Token::Eof => "end of file",
        };
        f.write_str(name)
    }
}

/// Lexer error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.line, self.column, self.message)
    }
}

impl std::error::Error for LexError {}

/// Lexer for Kconfig source text
pub struct Lexer {
    input: Vec<char>,
    /// Next character to scan.
    cursor: usize,
    /// First character of the most recently scanned token.
    start: usize,
    line: usize,
    /// Offset of the first character of the current line.
    line_start: usize,
}

impl Lexer {
    /// Create a new lexer, appending a trailing newline if the source lacks one.
    pub fn new(source: &str) -> Self {
        let mut input: Vec<char> = source.chars().collect();
        if input.last() != Some(&'\n') {
            input.push('\n');
        }

        Self {
            input,
            cursor: 0,
            start: 0,
            line: 1,
            line_start: 0,
        }
    }

    /// Line of the most recently scanned token (1-based).
    pub fn line(&self) -> usize {
        self.line
    }

    /// Column of the most recently scanned token (1-based), with tabs
    /// expanded to the next multiple of eight.
    pub fn column(&self) -> usize {
        self.input[self.line_start..self.start]
            .iter()
            .fold(1, |col, &ch| {
                if ch == '\t' {
                    col + 8 - ((col - 1) % 8)
                } else {
                    col + 1
                }
            })
    }

    /// Scan the next meaningful token.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        loop {
            self.start = self.cursor;
            let Some(ch) = self.advance() else {
                // Already reported Eof once; keep pointing at the final newline.
                self.start = self.input.len() - 1;
                return Ok(Token::Eof);
            };

            match ch {
                '#' => self.skip_comment(),
                '\n' => {
                    if self.is_at_end() {
                        return Ok(Token::Eof);
                    }
                    self.line += 1;
                    self.line_start = self.cursor;
                }
                '=' => return Ok(Token::Equal),
                '(' => return Ok(Token::LParen),
                ')' => return Ok(Token::RParen),
                '!' => return Ok(Token::Not),
                '&' if self.peek() == Some('&') => {
                    self.advance();
                    return Ok(Token::And);
                }
                '|' if self.peek() == Some('|') => {
                    self.advance();
                    return Ok(Token::Or);
                }
                c if c.is_ascii_alphabetic() => return Ok(self.word(c)),
                c if c.is_whitespace() => {}
                c => return Err(self.error(format!("Stray \"{}\"", c))),
            }
        }
    }

    /// Tokenize the remaining input, up to and including [`Token::Eof`].
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = token == Token::Eof;
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }

    /// Keyword, `y`/`n` literal, include directive or identifier.
    fn word(&mut self, first: char) -> Token {
        let keyword = match first {
            'd' if self.check_keyword("epends") => Some(Token::Depends),
            'o' if self.check_keyword("n") => Some(Token::On),
            's' if self.check_keyword("elect") => Some(Token::Select),
            'c' if self.check_keyword("onfig") => Some(Token::Config),
            'd' if self.check_keyword("efault") => Some(Token::Default),
            'b' if self.check_keyword("ool") => Some(Token::Bool),
            'i' if self.check_keyword("f") => Some(Token::If),
            'y' if self.check_keyword("") => Some(Token::Y),
            'n' if self.check_keyword("") => Some(Token::N),
            's' if self.check_keyword("ource") => Some(self.file_name()),
            'i' if self.check_keyword("nclude") => Some(self.file_name()),
            _ => None,
        };
        if let Some(token) = keyword {
            return token;
        }

        while matches!(self.peek(), Some(c) if c.is_ascii_alphanumeric() || c == '_') {
            self.advance();
        }
        Token::Ident(self.input[self.start..self.cursor].iter().collect())
    }

    /// Consume `rest` if it follows the cursor and is not itself the prefix
    /// of a longer word.
    fn check_keyword(&mut self, rest: &str) -> bool {
        let mut end = self.cursor;
        for expected in rest.chars() {
            if self.input.get(end) != Some(&expected) {
                return false;
            }
            end += 1;
        }

        match self.input.get(end) {
            Some(&c) if c.is_ascii_alphanumeric() || c == '|' => false,
            _ => {
                self.cursor = end;
                true
            }
        }
    }

    /// The rest of the line after `source`/`include`, taken verbatim.
    fn file_name(&mut self) -> Token {
        while matches!(self.peek(), Some(c) if c != '\n' && c.is_whitespace()) {
            self.advance();
        }
        let begin = self.cursor;
        while !matches!(self.peek(), Some('\n') | None) {
            self.advance();
        }
        let name: String = self.input[begin..self.cursor].iter().collect();
        Token::Source(name.trim_end().to_string())
    }

    /// Skip to (but not past) the end of the line.
    fn skip_comment(&mut self) {
        while !matches!(self.peek(), Some('\n') | None) {
            self.advance();
        }
    }

    fn error(&self, message: String) -> LexError {
        LexError {
            message,
            line: self.line,
            column: self.column(),
        }
    }

    // ===== Character helpers =====

    fn peek(&self) -> Option<char> {
        self.input.get(self.cursor).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.cursor += 1;
        Some(ch)
    }

    fn is_at_end(&self) -> bool {
        self.cursor >= self.input.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(source: &str) -> Vec<Token> {
        Lexer::new(source).tokenize().unwrap()
    }

    #[test]
    fn test_declaration_tokens() {
        let tokens = lex("config FOO\n  bool\n  default y if BAR && !BAZ\n");

        assert!(matches!(tokens[0], Token::Config));
        assert!(matches!(tokens[1], Token::Ident(ref s) if s == "FOO"));
        assert!(matches!(tokens[2], Token::Bool));
        assert!(matches!(tokens[3], Token::Default));
        assert!(matches!(tokens[4], Token::Y));
        assert!(matches!(tokens[5], Token::If));
        assert!(matches!(tokens[6], Token::Ident(ref s) if s == "BAR"));
        assert!(matches!(tokens[7], Token::And));
        assert!(matches!(tokens[8], Token::Not));
        assert!(matches!(tokens[9], Token::Ident(ref s) if s == "BAZ"));
        assert!(matches!(tokens[10], Token::Eof));
        assert_eq!(tokens.len(), 11);
    }

    #[test]
    fn test_operators() {
        let tokens = lex("( ) = && || !");
        assert_eq!(
            tokens,
            vec![
                Token::LParen,
                Token::RParen,
                Token::Equal,
                Token::And,
                Token::Or,
                Token::Not,
                Token::Eof,
            ]
        );
    }

    #[test]
    fn test_keyword_prefix_is_identifier() {
        let tokens = lex("configure yes no ifdef boolean selected");
        for token in &tokens[..6] {
            assert!(matches!(token, Token::Ident(_)), "got {:?}", token);
        }
    }

    #[test]
    fn test_keyword_followed_by_pipe() {
        // A keyword immediately followed by `|` is scanned as an identifier.
        let tokens = lex("on||y");
        assert!(matches!(tokens[0], Token::Ident(ref s) if s == "on"));
        assert!(matches!(tokens[1], Token::Or));
        assert!(matches!(tokens[2], Token::Y));
    }

    #[test]
    fn test_source_and_include() {
        let tokens = lex("source  sub/Kconfig\ninclude\tother.kconfig \nconfig A\n");
        assert!(matches!(tokens[0], Token::Source(ref s) if s == "sub/Kconfig"));
        assert!(matches!(tokens[1], Token::Source(ref s) if s == "other.kconfig"));
        assert!(matches!(tokens[2], Token::Config));
    }

    #[test]
    fn test_comments() {
        let tokens = lex("# leading comment\nconfig A # trailing\n#\n");
        assert_eq!(
            tokens,
            vec![Token::Config, Token::Ident("A".to_string()), Token::Eof]
        );
    }

    #[test]
    fn test_missing_trailing_newline() {
        assert_eq!(lex("CONFIG_A=y"), lex("CONFIG_A=y\n"));
        assert_eq!(lex(""), vec![Token::Eof]);
    }

    #[test]
    fn test_repeated_eof() {
        let mut lexer = Lexer::new("config A");
        lexer.tokenize().unwrap();
        assert_eq!(lexer.next_token().unwrap(), Token::Eof);
    }

    #[test]
    fn test_line_tracking() {
        let mut lexer = Lexer::new("config A\n\n  bool\n");
        lexer.next_token().unwrap();
        assert_eq!((lexer.line(), lexer.column()), (1, 1));
        lexer.next_token().unwrap();
        assert_eq!((lexer.line(), lexer.column()), (1, 8));
        lexer.next_token().unwrap();
        assert_eq!((lexer.line(), lexer.column()), (3, 3));
        assert_eq!(lexer.next_token().unwrap(), Token::Eof);
        assert_eq!(lexer.line(), 3);
    }

    #[test]
    fn test_tab_expansion() {
        let mut lexer = Lexer::new("\tbool\n  \tbool\n1234567\tx\n");
        lexer.next_token().unwrap();
        assert_eq!(lexer.column(), 9);
        lexer.next_token().unwrap();
        assert_eq!(lexer.column(), 9);
        lexer.next_token().unwrap_err();
    }

    #[test]
    fn test_stray_character() {
        let err = Lexer::new("config A\n  bool $\n").tokenize().unwrap_err();
        assert_eq!(err.message, "Stray \"$\"");
        assert_eq!((err.line, err.column), (2, 8));
    }

    #[test]
    fn test_single_ampersand_is_stray() {
        let err = Lexer::new("A & B").tokenize().unwrap_err();
        assert_eq!(err.message, "Stray \"&\"");
    }
}
