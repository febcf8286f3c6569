//! Lexer (tokenizer) for Jack source code
//!
//! Converts raw source text into a flat [`Token`] sequence consumed by the
//! parser. The scanner walks the input once, one character at a time, and
//! keeps three pieces of state between characters:
//!
//! - a comment mode (none, line, block); `/** */` doc comments are block
//!   comments whose first body character happens to be `*`
//! - the run being accumulated (integer, word or string literal)
//! - a pending `/` that is either a symbol or the start of a comment,
//!   decided by the character that follows it
//!
//! Word runs are classified when a delimiter closes them, so `iffy` is a
//! single identifier while `if(` is the keyword `if` followed by `(`.

use super::ast::{SourceLocation, Token, TokenKind};
use rustc_hash::FxHashSet;
use std::sync::OnceLock;
use thiserror::Error;

/// Reserved words of the language.
pub const KEYWORDS: [&str; 21] = [
    "class",
    "constructor",
    "function",
    "method",
    "field",
    "static",
    "var",
    "int",
    "char",
    "boolean",
    "void",
    "true",
    "false",
    "null",
    "this",
    "let",
    "do",
    "if",
    "else",
    "while",
    "return",
];

/// Single-character symbols. A symbol is never merged with its neighbours.
pub const SYMBOLS: [char; 19] = [
    '{', '}', '(', ')', '[', ']', '.', ',', ';', '+', '-', '*', '/', '&', '|', '<', '>', '=', '~',
];

fn keyword_set() -> &'static FxHashSet<&'static str> {
    static SET: OnceLock<FxHashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| KEYWORDS.iter().copied().collect())
}

/// Returns true if `word` is a reserved word.
pub fn is_keyword(word: &str) -> bool {
    keyword_set().contains(word)
}

pub fn is_symbol(ch: char) -> bool {
    SYMBOLS.contains(&ch)
}

/// Lexer error type
///
/// Every variant carries the text accumulated for the token that was in
/// progress when scanning stopped, so the message points at the exact spot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("invalid character {ch:?} after {partial:?} at {location}")]
    InvalidCharacter {
        ch: char,
        partial: String,
        location: SourceLocation,
    },

    #[error("letter {ch:?} inside integer constant {partial:?} at {location}")]
    LetterAfterDigits {
        ch: char,
        partial: String,
        location: SourceLocation,
    },

    #[error("string literal \"{partial}\" is not closed before the end of the line at {location}")]
    UnterminatedString {
        partial: String,
        location: SourceLocation,
    },

    #[error("control character {ch:?} inside string literal \"{partial}\" at {location}")]
    ControlInString {
        ch: char,
        partial: String,
        location: SourceLocation,
    },

    #[error("comment opened at {location} is never closed")]
    UnterminatedComment { location: SourceLocation },
}

impl LexError {
    pub fn location(&self) -> SourceLocation {
        match self {
            LexError::InvalidCharacter { location, .. }
            | LexError::LetterAfterDigits { location, .. }
            | LexError::UnterminatedString { location, .. }
            | LexError::ControlInString { location, .. }
            | LexError::UnterminatedComment { location } => *location,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CommentMode {
    None,
    Line,
    /// `star` is set while the previous comment character was `*`.
    Block { star: bool, opened_at: SourceLocation },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Run {
    Integer,
    Word,
    Str { opened_at: SourceLocation },
}

/// Lexer for Jack source code
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
    comment: CommentMode,
    run: Option<Run>,
    buffer: String,
    pending_slash: Option<SourceLocation>,
    tokens: Vec<Token>,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
            comment: CommentMode::None,
            run: None,
            buffer: String::new(),
            pending_slash: None,
            tokens: Vec::new(),
        }
    }

    /// Tokenize the entire input
    pub fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        loop {
            let location = self.current_location();
            let Some(ch) = self.advance() else { break };
            self.scan(ch, location)?;
        }
        self.finish()?;
        Ok(self.tokens)
    }

    /// Feed one character through the state machine.
    fn scan(&mut self, ch: char, location: SourceLocation) -> Result<(), LexError> {
        match self.comment {
            CommentMode::Line => {
                if is_newline(ch) {
                    self.comment = CommentMode::None;
                }
                return Ok(());
            }
            CommentMode::Block { star, opened_at } => {
                self.comment = if star && ch == '/' {
                    CommentMode::None
                } else {
                    CommentMode::Block {
                        star: ch == '*',
                        opened_at,
                    }
                };
                return Ok(());
            }
            CommentMode::None => {}
        }

        if let Some(Run::Str { .. }) = self.run {
            return self.string_char(ch, location);
        }

        if let Some(opened_at) = self.pending_slash.take() {
            match ch {
                '/' => {
                    self.comment = CommentMode::Line;
                    return Ok(());
                }
                '*' => {
                    self.comment = CommentMode::Block {
                        star: false,
                        opened_at,
                    };
                    return Ok(());
                }
                _ => self.emit(TokenKind::Symbol, "/".to_string()),
            }
        }

        match ch {
            ' ' | '\t' => self.close_run(),
            c if is_newline(c) => self.close_run(),
            '"' => {
                self.close_run();
                self.run = Some(Run::Str {
                    opened_at: location,
                });
            }
            '0'..='9' => {
                if self.run.is_none() {
                    self.run = Some(Run::Integer);
                }
                self.buffer.push(ch);
            }
            'a'..='z' | 'A'..='Z' | '_' => {
                match self.run {
                    Some(Run::Integer) => {
                        return Err(LexError::LetterAfterDigits {
                            ch,
                            partial: self.buffer.clone(),
                            location,
                        });
                    }
                    None => self.run = Some(Run::Word),
                    _ => {}
                }
                self.buffer.push(ch);
            }
            '/' => {
                self.close_run();
                self.pending_slash = Some(location);
            }
            c if is_symbol(c) => {
                self.close_run();
                self.emit(TokenKind::Symbol, c.to_string());
            }
            _ => {
                return Err(LexError::InvalidCharacter {
                    ch,
                    partial: self.buffer.clone(),
                    location,
                });
            }
        }

        Ok(())
    }

    /// Handle a character while a string literal is open.
    fn string_char(&mut self, ch: char, location: SourceLocation) -> Result<(), LexError> {
        match ch {
            '"' => {
                self.run = None;
                let text = std::mem::take(&mut self.buffer);
                self.emit(TokenKind::StringConstant, text);
            }
            c if is_newline(c) => {
                return Err(LexError::UnterminatedString {
                    partial: self.buffer.clone(),
                    location,
                });
            }
            '\t' => self.buffer.push(ch),
            c if c.is_control() => {
                return Err(LexError::ControlInString {
                    ch,
                    partial: self.buffer.clone(),
                    location,
                });
            }
            _ => self.buffer.push(ch),
        }
        Ok(())
    }

    /// Close whatever run is in progress and emit it.
    fn close_run(&mut self) {
        let kind = match self.run.take() {
            None => return,
            Some(Run::Integer) => TokenKind::IntegerConstant,
            Some(Run::Word) if is_keyword(&self.buffer) => TokenKind::Keyword,
            Some(Run::Word) => TokenKind::Identifier,
            Some(run @ Run::Str { .. }) => {
                // Strings end only on a quote.
                self.run = Some(run);
                return;
            }
        };
        let text = std::mem::take(&mut self.buffer);
        self.emit(kind, text);
    }

    /// Flush state at end of input.
    fn finish(&mut self) -> Result<(), LexError> {
        if let CommentMode::Block { opened_at, .. } = self.comment {
            return Err(LexError::UnterminatedComment {
                location: opened_at,
            });
        }
        if let Some(Run::Str { opened_at }) = self.run {
            return Err(LexError::UnterminatedString {
                partial: self.buffer.clone(),
                location: opened_at,
            });
        }
        if self.pending_slash.take().is_some() {
            self.emit(TokenKind::Symbol, "/".to_string());
        }
        self.close_run();
        Ok(())
    }

    fn emit(&mut self, kind: TokenKind, text: String) {
        self.tokens.push(Token::leaf(kind, text));
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        let ch = *self.input.get(self.position)?;
        self.position += 1;

        // A lone '\r' ends a line too; in "\r\n" the '\n' does.
        let ends_line =
            ch == '\n' || (ch == '\r' && self.input.get(self.position) != Some(&'\n'));
        if ends_line {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    /// Get current source location
    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}

fn is_newline(ch: char) -> bool {
    ch == '\n' || ch == '\r'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(source: &str) -> Vec<(TokenKind, String)> {
        Lexer::new(source)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| (t.kind, t.text))
            .collect()
    }

    fn texts(source: &str) -> Vec<String> {
        lex(source).into_iter().map(|(_, text)| text).collect()
    }

    #[test]
    fn test_simple_tokens() {
        let tokens = lex("class Main { field int x; }");

        assert_eq!(tokens[0], (TokenKind::Keyword, "class".to_string()));
        assert_eq!(tokens[1], (TokenKind::Identifier, "Main".to_string()));
        assert_eq!(tokens[2], (TokenKind::Symbol, "{".to_string()));
        assert_eq!(tokens[3], (TokenKind::Keyword, "field".to_string()));
        assert_eq!(tokens[4], (TokenKind::Keyword, "int".to_string()));
        assert_eq!(tokens[5], (TokenKind::Identifier, "x".to_string()));
        assert_eq!(tokens[6], (TokenKind::Symbol, ";".to_string()));
        assert_eq!(tokens[7], (TokenKind::Symbol, "}".to_string()));
        assert_eq!(tokens.len(), 8);
    }

    #[test]
    fn test_symbols_are_never_merged() {
        let tokens = lex("a[i]=~(b+1);");
        let kinds: Vec<TokenKind> = tokens.iter().map(|(k, _)| *k).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Identifier,
                TokenKind::Symbol,
                TokenKind::Identifier,
                TokenKind::Symbol,
                TokenKind::Symbol,
                TokenKind::Symbol,
                TokenKind::Symbol,
                TokenKind::Identifier,
                TokenKind::Symbol,
                TokenKind::IntegerConstant,
                TokenKind::Symbol,
                TokenKind::Symbol,
            ]
        );
    }

    #[test]
    fn test_keyword_prefix_stays_identifier() {
        let tokens = lex("iffy dot this_ if(");
        assert_eq!(tokens[0], (TokenKind::Identifier, "iffy".to_string()));
        assert_eq!(tokens[1], (TokenKind::Identifier, "dot".to_string()));
        assert_eq!(tokens[2], (TokenKind::Identifier, "this_".to_string()));
        assert_eq!(tokens[3], (TokenKind::Keyword, "if".to_string()));
        assert_eq!(tokens[4], (TokenKind::Symbol, "(".to_string()));
    }

    #[test]
    fn test_identifier_may_contain_digits() {
        assert_eq!(
            lex("x1 _tmp2"),
            vec![
                (TokenKind::Identifier, "x1".to_string()),
                (TokenKind::Identifier, "_tmp2".to_string()),
            ]
        );
    }

    #[test]
    fn test_comments() {
        let source = "let x = 1; // trailing\n/* block\n spans */ let y /** doc */ = 2;";
        assert_eq!(
            texts(source),
            vec!["let", "x", "=", "1", ";", "let", "y", "=", "2", ";"]
        );
    }

    #[test]
    fn test_empty_doc_comment_closes() {
        assert_eq!(texts("a/**/b"), vec!["a", "b"]);
        assert_eq!(texts("a/* * / **/b"), vec!["a", "b"]);
    }

    #[test]
    fn test_slash_is_symbol_when_not_a_comment() {
        assert_eq!(texts("x/y"), vec!["x", "/", "y"]);
        assert_eq!(texts("x / 2"), vec!["x", "/", "2"]);
        assert_eq!(texts("x/"), vec!["x", "/"]);
    }

    #[test]
    fn test_string_literal_is_verbatim() {
        let tokens = lex("\"Hello, World! (x + y) // not a comment\"");
        assert_eq!(
            tokens,
            vec![(
                TokenKind::StringConstant,
                "Hello, World! (x + y) // not a comment".to_string()
            )]
        );
    }

    #[test]
    fn test_empty_string_literal() {
        assert_eq!(lex("\"\""), vec![(TokenKind::StringConstant, String::new())]);
    }

    #[test]
    fn test_crlf_line_endings() {
        assert_eq!(
            texts("let x\r\n= 1; // c\r\nreturn;"),
            vec!["let", "x", "=", "1", ";", "return", ";"]
        );
    }

    #[test]
    fn test_error_lines_with_cr_line_endings() {
        let err = Lexer::new("let x = 1;\rlet y = #;").tokenize().unwrap_err();
        assert_eq!(err.location(), SourceLocation::new(2, 9));

        let err = Lexer::new("let x = 1;\r\nlet y = #;").tokenize().unwrap_err();
        assert_eq!(err.location(), SourceLocation::new(2, 9));
    }

    #[test]
    fn test_string_across_newline_is_rejected() {
        let err = Lexer::new("let s = \"abc\ndef\";").tokenize().unwrap_err();
        match err {
            LexError::UnterminatedString { partial, location } => {
                assert_eq!(partial, "abc");
                assert_eq!(location.line, 1);
            }
            other => panic!("Expected unterminated string, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_character_is_rejected() {
        let err = Lexer::new("let x = 1;\nlet y = #;").tokenize().unwrap_err();
        assert_eq!(
            err,
            LexError::InvalidCharacter {
                ch: '#',
                partial: String::new(),
                location: SourceLocation::new(2, 9),
            }
        );
    }

    #[test]
    fn test_letter_after_digits_is_rejected() {
        let err = Lexer::new("let x = 12ab;").tokenize().unwrap_err();
        assert!(matches!(
            err,
            LexError::LetterAfterDigits { ch: 'a', ref partial, .. } if partial == "12"
        ));
    }

    #[test]
    fn test_unclosed_comment_is_rejected() {
        let err = Lexer::new("class A { }\n/** never closed").tokenize().unwrap_err();
        assert_eq!(
            err,
            LexError::UnterminatedComment {
                location: SourceLocation::new(2, 1)
            }
        );
    }

    #[test]
    fn test_unclosed_string_at_end_of_input() {
        let err = Lexer::new("\"open").tokenize().unwrap_err();
        assert!(matches!(err, LexError::UnterminatedString { .. }));
    }

    #[test]
    fn test_control_character_in_string() {
        let err = Lexer::new("\"a\u{7}b\"").tokenize().unwrap_err();
        assert!(matches!(err, LexError::ControlInString { ch: '\u{7}', .. }));
    }

    #[test]
    fn test_line_comment_at_end_of_input() {
        assert_eq!(texts("return; // done"), vec!["return", ";"]);
    }
}
