//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including error types, helper methods, and the main parse entry point.
//!
//! # Parser Architecture
//!
//! The Parser uses a recursive descent approach with one method per grammar
//! non-terminal:
//! - This module: Parser struct, helper methods, and coordination
//! - `declarations`: class, class variables, subroutines, parameters, locals
//! - `statements`: let, if, while, do and return statements
//! - `expressions`: expressions, terms, subroutine calls, expression lists
//!
//! # Implementation
//!
//! Parser methods are split across multiple files using `impl Parser` blocks,
//! allowing each module to extend the Parser with related functionality while
//! maintaining access to the shared cursor.
//!
//! Every production returns a new composite [`Token`] whose children are the
//! tokens and subtrees it consumed, in order. Nothing is dropped: the leaves
//! of the finished tree are exactly the input token sequence.

use crate::parser::ast::{Token, TokenKind};
use crate::parser::cursor::Cursor;
use crate::parser::lexer::LexError;
use thiserror::Error;

/// Literal keyword values usable as a term.
pub const KEYWORD_CONSTANTS: [&str; 4] = ["true", "false", "null", "this"];

/// Prefix operators.
pub const UNARY_OPS: [&str; 2] = ["-", "~"];

/// Infix operators. The language gives them no precedence.
pub const BINARY_OPS: [&str; 9] = ["+", "-", "*", "/", "&", "|", "<", ">", "="];

/// Keywords naming a built-in type.
pub const PRIMITIVE_TYPES: [&str; 3] = ["int", "char", "boolean"];

/// Parser error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("token {found:?} ({kind}) at position {position} is not suitable, expected {expected}")]
    UnexpectedToken {
        expected: String,
        found: String,
        kind: TokenKind,
        position: usize,
    },

    #[error("input ended at position {position}, expected {expected}")]
    UnexpectedEnd { expected: String, position: usize },

    #[error("token {found:?} ({kind}) at position {position} follows the end of the class")]
    TrailingTokens {
        found: String,
        kind: TokenKind,
        position: usize,
    },
}

impl ParseError {
    /// Index into the token sequence where parsing stopped.
    pub fn position(&self) -> usize {
        match self {
            ParseError::UnexpectedToken { position, .. }
            | ParseError::UnexpectedEnd { position, .. }
            | ParseError::TrailingTokens { position, .. } => *position,
        }
    }
}

/// Either stage of the front end failing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    #[error("lexical error: {0}")]
    Lex(#[from] LexError),

    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
}

/// How many operator/term pairs an expression may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExpressionGrammar {
    /// `term (op term)*`
    #[default]
    Chained,
    /// `term (op term)?`; a second operator ends the expression.
    SinglePair,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParserConfig {
    pub expression: ExpressionGrammar,
}

/// Recursive descent parser for Jack
pub struct Parser<'a> {
    pub(crate) cursor: Cursor<'a>,
    pub(crate) config: ParserConfig,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Self::with_config(tokens, ParserConfig::default())
    }

    pub fn with_config(tokens: &'a [Token], config: ParserConfig) -> Self {
        Self {
            cursor: Cursor::new(tokens),
            config,
        }
    }

    /// Parse one compilation unit; the result is the `class` root.
    pub fn parse(mut self) -> Result<Token, ParseError> {
        let class = self.parse_class()?;

        if let Some(extra) = self.cursor.current() {
            return Err(ParseError::TrailingTokens {
                found: extra.text.clone(),
                kind: extra.kind,
                position: self.cursor.position(),
            });
        }

        tracing::debug!(
            tokens = self.cursor.len(),
            nodes = class.node_count(),
            "parsed all tokens"
        );
        Ok(class)
    }

    // ===== Helper methods =====

    /// Consume the next token, failing if the input is exhausted.
    pub(crate) fn next(&mut self, expected: &str) -> Result<&'a Token, ParseError> {
        let position = self.cursor.position();
        self.cursor.advance().ok_or_else(|| ParseError::UnexpectedEnd {
            expected: expected.to_string(),
            position,
        })
    }

    /// Error for a token that was just consumed.
    pub(crate) fn mismatch(&self, token: &Token, expected: &str) -> ParseError {
        ParseError::UnexpectedToken {
            expected: expected.to_string(),
            found: token.text.clone(),
            kind: token.kind,
            position: self.cursor.position().saturating_sub(1),
        }
    }

    pub(crate) fn check_symbol(&self, symbol: &str) -> bool {
        self.cursor.current().is_some_and(|t| t.is_symbol(symbol))
    }

    pub(crate) fn check_keyword(&self, keyword: &str) -> bool {
        self.cursor.current().is_some_and(|t| t.is_keyword(keyword))
    }

    pub(crate) fn expect_symbol(
        &mut self,
        node: &mut Token,
        symbol: &str,
    ) -> Result<(), ParseError> {
        let expected = format!("'{symbol}'");
        let token = self.next(&expected)?;
        if !token.is_symbol(symbol) {
            return Err(self.mismatch(token, &expected));
        }
        node.children.push(token.clone());
        Ok(())
    }

    /// Consume a keyword that must be one of `keywords`.
    pub(crate) fn expect_keyword(
        &mut self,
        node: &mut Token,
        keywords: &[&str],
    ) -> Result<(), ParseError> {
        let expected = quoted_alternatives(keywords);
        let token = self.next(&expected)?;
        if token.kind != TokenKind::Keyword || !keywords.contains(&token.text.as_str()) {
            return Err(self.mismatch(token, &expected));
        }
        node.children.push(token.clone());
        Ok(())
    }

    pub(crate) fn expect_identifier(
        &mut self,
        node: &mut Token,
        what: &str,
    ) -> Result<(), ParseError> {
        let token = self.next(what)?;
        if token.kind != TokenKind::Identifier {
            return Err(self.mismatch(token, what));
        }
        node.children.push(token.clone());
        Ok(())
    }

    pub(crate) fn expect_type(&mut self, node: &mut Token) -> Result<(), ParseError> {
        let token = self.next("type")?;
        if !is_type(token) {
            return Err(self.mismatch(token, "type"));
        }
        node.children.push(token.clone());
        Ok(())
    }
}

/// `int`, `char`, `boolean` or a class name.
pub fn is_type(token: &Token) -> bool {
    match token.kind {
        TokenKind::Keyword => PRIMITIVE_TYPES.contains(&token.text.as_str()),
        TokenKind::Identifier => true,
        _ => false,
    }
}

pub fn is_binary_op(token: &Token) -> bool {
    token.kind == TokenKind::Symbol && BINARY_OPS.contains(&token.text.as_str())
}

pub fn is_unary_op(token: &Token) -> bool {
    token.kind == TokenKind::Symbol && UNARY_OPS.contains(&token.text.as_str())
}

pub fn is_keyword_constant(token: &Token) -> bool {
    token.kind == TokenKind::Keyword && KEYWORD_CONSTANTS.contains(&token.text.as_str())
}

fn quoted_alternatives(words: &[&str]) -> String {
    words
        .iter()
        .map(|w| format!("'{w}'"))
        .collect::<Vec<_>>()
        .join(" | ")
}
