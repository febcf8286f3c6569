// Parse tree definitions shared by the lexer and the parser

use std::fmt;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Every kind a [`Token`] can have.
///
/// The first five are produced by the lexer; the rest are grammar
/// non-terminals built by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Lexical kinds
    Keyword,
    Symbol,
    IntegerConstant,
    StringConstant,
    Identifier,

    // Program structure
    Class,
    ClassVarDec,
    SubroutineDec,
    ParameterList,
    SubroutineBody,
    VarDec,

    // Statements
    Statements,
    LetStatement,
    IfStatement,
    WhileStatement,
    DoStatement,
    ReturnStatement,

    // Expressions
    Expression,
    Term,
    ExpressionList,
}

impl TokenKind {
    /// The element name used when the tree is rendered as markup.
    pub fn tag(self) -> &'static str {
        match self {
            TokenKind::Keyword => "keyword",
            TokenKind::Symbol => "symbol",
            TokenKind::IntegerConstant => "integerConstant",
            TokenKind::StringConstant => "stringConstant",
            TokenKind::Identifier => "identifier",
            TokenKind::Class => "class",
            TokenKind::ClassVarDec => "classVarDec",
            TokenKind::SubroutineDec => "subroutineDec",
            TokenKind::ParameterList => "parameterList",
            TokenKind::SubroutineBody => "subroutineBody",
            TokenKind::VarDec => "varDec",
            TokenKind::Statements => "statements",
            TokenKind::LetStatement => "letStatement",
            TokenKind::IfStatement => "ifStatement",
            TokenKind::WhileStatement => "whileStatement",
            TokenKind::DoStatement => "doStatement",
            TokenKind::ReturnStatement => "returnStatement",
            TokenKind::Expression => "expression",
            TokenKind::Term => "term",
            TokenKind::ExpressionList => "expressionList",
        }
    }

    /// Returns true for the kinds the lexer emits.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            TokenKind::Keyword
                | TokenKind::Symbol
                | TokenKind::IntegerConstant
                | TokenKind::StringConstant
                | TokenKind::Identifier
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A node of the parse tree.
///
/// Leaves carry the lexeme in `text` and have no children. Composite nodes
/// have an empty `text` and hold their children in the order the grammar
/// production consumed them, punctuation included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub children: Vec<Token>,
}

impl Token {
    /// Create a leaf token.
    pub fn leaf(kind: TokenKind, text: impl Into<String>) -> Self {
        debug_assert!(kind.is_terminal(), "{kind} is not a lexical kind");
        Self {
            kind,
            text: text.into(),
            children: Vec::new(),
        }
    }

    /// Create an empty composite node; the parser pushes children as it goes.
    pub fn node(kind: TokenKind) -> Self {
        debug_assert!(!kind.is_terminal(), "{kind} is a lexical kind");
        Self {
            kind,
            text: String::new(),
            children: Vec::new(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.kind.is_terminal()
    }

    /// Checks both kind and literal text.
    pub fn is(&self, kind: TokenKind, text: &str) -> bool {
        self.kind == kind && self.text == text
    }

    pub fn is_symbol(&self, symbol: &str) -> bool {
        self.is(TokenKind::Symbol, symbol)
    }

    pub fn is_keyword(&self, keyword: &str) -> bool {
        self.is(TokenKind::Keyword, keyword)
    }

    /// Leaves of the subtree in depth-first, left-to-right order.
    pub fn leaves(&self) -> Vec<&Token> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a Token>) {
        if self.is_leaf() {
            out.push(self);
            return;
        }
        for child in &self.children {
            child.collect_leaves(out);
        }
    }

    /// Direct children of the given kind.
    pub fn children_of(&self, kind: TokenKind) -> impl Iterator<Item = &Token> {
        self.children.iter().filter(move |c| c.kind == kind)
    }

    /// Number of nodes in the subtree, this one included.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Token::node_count).sum::<usize>()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_leaf() {
            write!(f, "{} '{}'", self.kind, self.text)
        } else {
            write!(f, "<{}>", self.kind)
        }
    }
}
