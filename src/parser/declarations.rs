//! Declaration parsing implementation
//!
//! Handles the program-structure productions:
//!
//! ```text
//! class          ::= 'class' className '{' classVarDec* subroutineDec* '}'
//! classVarDec    ::= ('static' | 'field') type varName (',' varName)* ';'
//! subroutineDec  ::= ('constructor' | 'function' | 'method') ('void' | type)
//!                    subroutineName '(' parameterList ')' subroutineBody
//! parameterList  ::= ((type varName) (',' type varName)*)?
//! subroutineBody ::= '{' varDec* statements '}'
//! varDec         ::= 'var' type varName (',' varName)* ';'
//! ```
//!
//! Class members may appear in any order. `parameterList` does not include
//! its parentheses; `subroutineDec` holds them.

use crate::parser::ast::{Token, TokenKind};
use crate::parser::parse::{is_type, ParseError, Parser};

impl<'a> Parser<'a> {
    pub(crate) fn parse_class(&mut self) -> Result<Token, ParseError> {
        let mut class = Token::node(TokenKind::Class);
        self.expect_keyword(&mut class, &["class"])?;
        self.expect_identifier(&mut class, "class name")?;
        self.expect_symbol(&mut class, "{")?;

        loop {
            // The member keyword is read, then put back for the production
            // that owns it.
            let token = self.next("class member or '}'")?;
            match (token.kind, token.text.as_str()) {
                (TokenKind::Keyword, "static" | "field") => {
                    self.cursor.rewind();
                    let var_dec = self.parse_class_var_dec()?;
                    class.children.push(var_dec);
                }
                (TokenKind::Keyword, "constructor" | "function" | "method") => {
                    self.cursor.rewind();
                    let subroutine = self.parse_subroutine_dec()?;
                    class.children.push(subroutine);
                }
                (TokenKind::Symbol, "}") => {
                    class.children.push(token.clone());
                    break;
                }
                _ => {
                    return Err(self.mismatch(
                        token,
                        "'static' | 'field' | 'constructor' | 'function' | 'method' | '}'",
                    ));
                }
            }
        }

        Ok(class)
    }

    pub(crate) fn parse_class_var_dec(&mut self) -> Result<Token, ParseError> {
        let mut var_dec = Token::node(TokenKind::ClassVarDec);
        self.expect_keyword(&mut var_dec, &["static", "field"])?;
        self.expect_type(&mut var_dec)?;
        self.parse_var_names(&mut var_dec)?;
        Ok(var_dec)
    }

    pub(crate) fn parse_subroutine_dec(&mut self) -> Result<Token, ParseError> {
        let mut subroutine = Token::node(TokenKind::SubroutineDec);
        self.expect_keyword(&mut subroutine, &["constructor", "function", "method"])?;

        let return_type = self.next("'void' | type")?;
        if !(return_type.is_keyword("void") || is_type(return_type)) {
            return Err(self.mismatch(return_type, "'void' | type"));
        }
        subroutine.children.push(return_type.clone());

        self.expect_identifier(&mut subroutine, "subroutine name")?;
        self.expect_symbol(&mut subroutine, "(")?;
        let params = self.parse_parameter_list()?;
        subroutine.children.push(params);
        self.expect_symbol(&mut subroutine, ")")?;

        let body = self.parse_subroutine_body()?;
        subroutine.children.push(body);

        Ok(subroutine)
    }

    /// Parameters between the parentheses; the parentheses stay with the caller.
    pub(crate) fn parse_parameter_list(&mut self) -> Result<Token, ParseError> {
        let mut params = Token::node(TokenKind::ParameterList);

        if self.check_symbol(")") {
            return Ok(params);
        }

        self.expect_type(&mut params)?;
        self.expect_identifier(&mut params, "parameter name")?;

        while self.check_symbol(",") {
            self.expect_symbol(&mut params, ",")?;
            self.expect_type(&mut params)?;
            self.expect_identifier(&mut params, "parameter name")?;
        }

        Ok(params)
    }

    pub(crate) fn parse_subroutine_body(&mut self) -> Result<Token, ParseError> {
        let mut body = Token::node(TokenKind::SubroutineBody);
        self.expect_symbol(&mut body, "{")?;

        while self.check_keyword("var") {
            let var_dec = self.parse_var_dec()?;
            body.children.push(var_dec);
        }

        let statements = self.parse_statements()?;
        body.children.push(statements);

        self.expect_symbol(&mut body, "}")?;
        Ok(body)
    }

    pub(crate) fn parse_var_dec(&mut self) -> Result<Token, ParseError> {
        let mut var_dec = Token::node(TokenKind::VarDec);
        self.expect_keyword(&mut var_dec, &["var"])?;
        self.expect_type(&mut var_dec)?;
        self.parse_var_names(&mut var_dec)?;
        Ok(var_dec)
    }

    /// `varName (',' varName)* ';'`, shared by class and local declarations.
    fn parse_var_names(&mut self, node: &mut Token) -> Result<(), ParseError> {
        self.expect_identifier(node, "variable name")?;

        loop {
            let token = self.next("',' | ';'")?;
            if token.is_symbol(",") {
                node.children.push(token.clone());
                self.expect_identifier(node, "variable name")?;
            } else if token.is_symbol(";") {
                node.children.push(token.clone());
                return Ok(());
            } else {
                return Err(self.mismatch(token, "',' | ';'"));
            }
        }
    }
}
