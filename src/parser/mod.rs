//! Jack source code front end
//!
//! This module transforms Jack source text into a parse tree:
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`cursor`]: Position tracking with one-step rewind, used by the parser
//! - [`parse`]: Parsing (tokens → parse tree), with the productions split
//!   across `declarations`, `statements` and `expressions`
//! - [`ast`]: The [`Token`] node type shared by both stages
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser, one method per grammar
//! non-terminal, deciding between alternatives with a single token of
//! lookahead. There is no error recovery: the first violation is returned.
//!
//! Neither stage performs I/O.

pub mod ast;
pub mod cursor;
mod declarations;
mod expressions;
pub mod lexer;
pub mod parse;
mod statements;

pub use ast::{SourceLocation, Token, TokenKind};
pub use lexer::{LexError, Lexer};
pub use parse::{ExpressionGrammar, ParseError, Parser, ParserConfig, SyntaxError};

/// Split `source` into lexical tokens.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(source).tokenize()
}

/// Build the `class` parse tree from a token sequence.
pub fn parse(tokens: &[Token]) -> Result<Token, ParseError> {
    Parser::new(tokens).parse()
}

/// Tokenize and parse in one step.
pub fn parse_source(source: &str, config: ParserConfig) -> Result<Token, SyntaxError> {
    let tokens = tokenize(source)?;
    Ok(Parser::with_config(&tokens, config).parse()?)
}
