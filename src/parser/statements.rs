//! Statement parsing implementation
//!
//! # Grammar
//!
//! ```text
//! statements      ::= statement*
//! statement       ::= letStatement | ifStatement | whileStatement
//!                   | doStatement | returnStatement
//! letStatement    ::= 'let' varName ('[' expression ']')? '=' expression ';'
//! ifStatement     ::= 'if' '(' expression ')' '{' statements '}'
//!                     ('else' '{' statements '}')?
//! whileStatement  ::= 'while' '(' expression ')' '{' statements '}'
//! doStatement     ::= 'do' subroutineCall ';'
//! returnStatement ::= 'return' expression? ';'
//! ```

use crate::parser::ast::{Token, TokenKind};
use crate::parser::parse::{ParseError, Parser};

impl<'a> Parser<'a> {
    /// Parse statements until a token that starts none of them.
    pub(crate) fn parse_statements(&mut self) -> Result<Token, ParseError> {
        let mut statements = Token::node(TokenKind::Statements);

        loop {
            let token = self.next("statement | '}'")?;
            // Put the token back either way: the statement production owns
            // its keyword, and anything else belongs to the enclosing block.
            self.cursor.rewind();

            if token.kind != TokenKind::Keyword {
                break;
            }
            let statement = match token.text.as_str() {
                "let" => self.parse_let_statement()?,
                "if" => self.parse_if_statement()?,
                "while" => self.parse_while_statement()?,
                "do" => self.parse_do_statement()?,
                "return" => self.parse_return_statement()?,
                _ => break,
            };
            statements.children.push(statement);
        }

        Ok(statements)
    }

    fn parse_let_statement(&mut self) -> Result<Token, ParseError> {
        let mut statement = Token::node(TokenKind::LetStatement);
        self.expect_keyword(&mut statement, &["let"])?;
        self.expect_identifier(&mut statement, "variable name")?;

        if self.check_symbol("[") {
            self.expect_symbol(&mut statement, "[")?;
            let index = self.parse_expression()?;
            statement.children.push(index);
            self.expect_symbol(&mut statement, "]")?;
        }

        self.expect_symbol(&mut statement, "=")?;
        let value = self.parse_expression()?;
        statement.children.push(value);
        self.expect_symbol(&mut statement, ";")?;

        Ok(statement)
    }

    fn parse_if_statement(&mut self) -> Result<Token, ParseError> {
        let mut statement = Token::node(TokenKind::IfStatement);
        self.expect_keyword(&mut statement, &["if"])?;
        self.parse_condition(&mut statement)?;
        self.parse_block(&mut statement)?;

        if self.check_keyword("else") {
            self.expect_keyword(&mut statement, &["else"])?;
            self.parse_block(&mut statement)?;
        }

        Ok(statement)
    }

    fn parse_while_statement(&mut self) -> Result<Token, ParseError> {
        let mut statement = Token::node(TokenKind::WhileStatement);
        self.expect_keyword(&mut statement, &["while"])?;
        self.parse_condition(&mut statement)?;
        self.parse_block(&mut statement)?;
        Ok(statement)
    }

    fn parse_do_statement(&mut self) -> Result<Token, ParseError> {
        let mut statement = Token::node(TokenKind::DoStatement);
        self.expect_keyword(&mut statement, &["do"])?;
        self.parse_subroutine_call(&mut statement)?;
        self.expect_symbol(&mut statement, ";")?;
        Ok(statement)
    }

    fn parse_return_statement(&mut self) -> Result<Token, ParseError> {
        let mut statement = Token::node(TokenKind::ReturnStatement);
        self.expect_keyword(&mut statement, &["return"])?;

        if !self.check_symbol(";") {
            let value = self.parse_expression()?;
            statement.children.push(value);
        }
        self.expect_symbol(&mut statement, ";")?;

        Ok(statement)
    }

    /// `'(' expression ')'`
    fn parse_condition(&mut self, statement: &mut Token) -> Result<(), ParseError> {
        self.expect_symbol(statement, "(")?;
        let condition = self.parse_expression()?;
        statement.children.push(condition);
        self.expect_symbol(statement, ")")
    }

    /// `'{' statements '}'`
    fn parse_block(&mut self, statement: &mut Token) -> Result<(), ParseError> {
        self.expect_symbol(statement, "{")?;
        let body = self.parse_statements()?;
        statement.children.push(body);
        self.expect_symbol(statement, "}")
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::{Token, TokenKind};
    use crate::parser::lexer::Lexer;
    use crate::parser::parse::{ParseError, Parser};

    /// Wrap statements in a minimal class and return the `statements` node.
    fn parse_statements(body: &str) -> Result<Token, ParseError> {
        let source = format!("class T {{ method void m() {{ {body} }} }}");
        let tokens = Lexer::new(&source).tokenize().unwrap();
        let class = Parser::new(&tokens).parse()?;
        let subroutine = &class.children[3];
        let body = &subroutine.children[6];
        let statements = body
            .children_of(TokenKind::Statements)
            .next()
            .cloned()
            .unwrap();
        Ok(statements)
    }

    fn texts(token: &Token) -> Vec<&str> {
        token.leaves().iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn test_return_without_value() {
        let statements = parse_statements("return;").unwrap();
        let ret = &statements.children[0];
        assert_eq!(ret.kind, TokenKind::ReturnStatement);
        assert_eq!(ret.children.len(), 2);
        assert!(ret.children[0].is_keyword("return"));
        assert!(ret.children[1].is_symbol(";"));
    }

    #[test]
    fn test_return_with_value() {
        let statements = parse_statements("return x;").unwrap();
        let kinds: Vec<TokenKind> = statements.children[0].children.iter().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            vec![TokenKind::Keyword, TokenKind::Expression, TokenKind::Symbol]
        );
    }

    #[test]
    fn test_if_statement() {
        let statements = parse_statements("if (direction = 1) { do square.moveUp(); }").unwrap();
        let stmt = &statements.children[0];
        assert_eq!(stmt.kind, TokenKind::IfStatement);

        let condition = &stmt.children[2];
        assert_eq!(condition.kind, TokenKind::Expression);
        let kinds: Vec<TokenKind> = condition.children.iter().map(|c| c.kind).collect();
        assert_eq!(kinds, vec![TokenKind::Term, TokenKind::Symbol, TokenKind::Term]);
        assert_eq!(texts(condition), vec!["direction", "=", "1"]);

        let block = &stmt.children[5];
        assert_eq!(block.kind, TokenKind::Statements);
        assert_eq!(block.children.len(), 1);
        let call = &block.children[0];
        assert_eq!(call.kind, TokenKind::DoStatement);
        assert_eq!(texts(call), vec!["do", "square", ".", "moveUp", "(", ")", ";"]);
        assert_eq!(call.children[5].kind, TokenKind::ExpressionList);
    }

    #[test]
    fn test_if_else_statement() {
        let statements =
            parse_statements("if (x) { let y = 1; } else { let y = 2; } return;").unwrap();
        assert_eq!(statements.children.len(), 2);
        let stmt = &statements.children[0];
        assert_eq!(stmt.children.len(), 11);
        assert!(stmt.children[7].is_keyword("else"));
        assert_eq!(statements.children[1].kind, TokenKind::ReturnStatement);
    }

    #[test]
    fn test_let_with_index() {
        let statements = parse_statements("let a[i] = b[j];").unwrap();
        let stmt = &statements.children[0];
        let kinds: Vec<TokenKind> = stmt.children.iter().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Keyword,
                TokenKind::Identifier,
                TokenKind::Symbol,
                TokenKind::Expression,
                TokenKind::Symbol,
                TokenKind::Symbol,
                TokenKind::Expression,
                TokenKind::Symbol,
            ]
        );
        assert_eq!(texts(stmt), vec!["let", "a", "[", "i", "]", "=", "b", "[", "j", "]", ";"]);
    }

    #[test]
    fn test_nested_while() {
        let statements =
            parse_statements("while (~exit) { while (key = 0) { let key = Keyboard.keyPressed(); } }")
                .unwrap();
        let outer = &statements.children[0];
        assert_eq!(outer.kind, TokenKind::WhileStatement);
        let inner = &outer.children[5].children[0];
        assert_eq!(inner.kind, TokenKind::WhileStatement);
    }

    #[test]
    fn test_empty_statements() {
        let statements = parse_statements("").unwrap();
        assert!(statements.children.is_empty());
    }

    #[test]
    fn test_do_requires_call() {
        let err = parse_statements("do x;").unwrap_err();
        assert!(matches!(
            err,
            ParseError::UnexpectedToken { ref found, .. } if found == ";"
        ));
    }

    #[test]
    fn test_let_missing_semicolon() {
        let err = parse_statements("let x = 1 return;").unwrap_err();
        assert!(matches!(
            err,
            ParseError::UnexpectedToken { ref found, ref expected, .. }
                if found == "return" && expected == "';'"
        ));
    }
}
