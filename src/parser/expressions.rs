//! Expression parsing implementation
//!
//! # Grammar
//!
//! ```text
//! expression     ::= term (op term)*
//! term           ::= integerConstant | stringConstant | keywordConstant
//!                  | varName | varName '[' expression ']' | subroutineCall
//!                  | '(' expression ')' | '[' expression ']' | unaryOp term
//! subroutineCall ::= subroutineName '(' expressionList ')'
//!                  | (className | varName) '.' subroutineName '(' expressionList ')'
//! expressionList ::= (expression (',' expression)*)?
//! op             ::= '+' | '-' | '*' | '/' | '&' | '|' | '<' | '>' | '='
//! unaryOp        ::= '-' | '~'
//! ```
//!
//! Operators have no precedence; an expression is a flat sequence of terms
//! and operators. With [`ExpressionGrammar::SinglePair`] at most one
//! operator is accepted and the next one is left for the caller to reject.
//!
//! A subroutine call has no node of its own: its tokens are appended to the
//! node hosting it (`doStatement` or `term`).

use crate::parser::ast::{Token, TokenKind};
use crate::parser::parse::{
    is_binary_op, is_keyword_constant, is_unary_op, ExpressionGrammar, ParseError, Parser,
};

impl<'a> Parser<'a> {
    pub(crate) fn parse_expression(&mut self) -> Result<Token, ParseError> {
        let mut expression = Token::node(TokenKind::Expression);
        let term = self.parse_term()?;
        expression.children.push(term);

        loop {
            let Some(token) = self.cursor.advance() else {
                break;
            };
            if !is_binary_op(token) {
                self.cursor.rewind();
                break;
            }
            expression.children.push(token.clone());
            let term = self.parse_term()?;
            expression.children.push(term);

            if self.config.expression == ExpressionGrammar::SinglePair {
                break;
            }
        }

        Ok(expression)
    }

    pub(crate) fn parse_term(&mut self) -> Result<Token, ParseError> {
        let mut term = Token::node(TokenKind::Term);
        let token = self.next("term")?;

        match token.kind {
            TokenKind::IntegerConstant | TokenKind::StringConstant => {
                term.children.push(token.clone());
            }
            TokenKind::Keyword if is_keyword_constant(token) => {
                term.children.push(token.clone());
            }
            TokenKind::Symbol if is_unary_op(token) => {
                term.children.push(token.clone());
                let operand = self.parse_term()?;
                term.children.push(operand);
            }
            TokenKind::Symbol if token.is_symbol("(") => {
                term.children.push(token.clone());
                self.parse_enclosed(&mut term, ")")?;
            }
            TokenKind::Symbol if token.is_symbol("[") => {
                term.children.push(token.clone());
                self.parse_enclosed(&mut term, "]")?;
            }
            TokenKind::Identifier => {
                if self.check_symbol("(") || self.check_symbol(".") {
                    self.cursor.rewind();
                    self.parse_subroutine_call(&mut term)?;
                } else if self.check_symbol("[") {
                    term.children.push(token.clone());
                    self.expect_symbol(&mut term, "[")?;
                    self.parse_enclosed(&mut term, "]")?;
                } else {
                    term.children.push(token.clone());
                }
            }
            _ => return Err(self.mismatch(token, "term")),
        }

        Ok(term)
    }

    /// `expression close`, after the opening delimiter was consumed.
    fn parse_enclosed(&mut self, node: &mut Token, close: &str) -> Result<(), ParseError> {
        let inner = self.parse_expression()?;
        node.children.push(inner);
        self.expect_symbol(node, close)
    }

    /// Append the tokens of a subroutine call to `host`.
    pub(crate) fn parse_subroutine_call(&mut self, host: &mut Token) -> Result<(), ParseError> {
        self.expect_identifier(host, "subroutine, class or variable name")?;

        let token = self.next("'(' | '.'")?;
        if token.is_symbol(".") {
            host.children.push(token.clone());
            self.expect_identifier(host, "subroutine name")?;
            self.expect_symbol(host, "(")?;
        } else if token.is_symbol("(") {
            host.children.push(token.clone());
        } else {
            return Err(self.mismatch(token, "'(' | '.'"));
        }

        let arguments = self.parse_expression_list()?;
        host.children.push(arguments);
        self.expect_symbol(host, ")")
    }

    pub(crate) fn parse_expression_list(&mut self) -> Result<Token, ParseError> {
        let mut list = Token::node(TokenKind::ExpressionList);

        if self.check_symbol(")") {
            return Ok(list);
        }

        let first = self.parse_expression()?;
        list.children.push(first);

        loop {
            let Some(token) = self.cursor.advance() else {
                break;
            };
            if !token.is_symbol(",") {
                self.cursor.rewind();
                break;
            }
            list.children.push(token.clone());
            let next = self.parse_expression()?;
            list.children.push(next);
        }

        Ok(list)
    }
}
